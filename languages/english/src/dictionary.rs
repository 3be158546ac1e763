use lexi_types::WordDefinition;
use reqwest::StatusCode;

use crate::error::LookupError;

/// Client for the Free Dictionary API (`<api_url>/<word>`)
#[derive(Clone)]
pub struct FreeDictionaryClient {
    client: reqwest::Client,
    api_url: String,
}

impl FreeDictionaryClient {
    pub fn new(api_url: impl Into<String>) -> Self {
        let api_url: String = api_url.into();
        Self {
            client: reqwest::Client::new(),
            api_url: api_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn entry_url(&self, word: &str) -> Result<reqwest::Url, LookupError> {
        let mut url = reqwest::Url::parse(&self.api_url)
            .map_err(|e| LookupError::Parse(format!("bad dictionary URL {}: {}", self.api_url, e)))?;
        url.path_segments_mut()
            .map_err(|_| LookupError::Parse(format!("bad dictionary URL {}", self.api_url)))?
            .push(word);
        Ok(url)
    }

    /// First entry for `word`. A 404 means the word is unknown and yields
    /// `Ok(None)`.
    pub async fn lookup(&self, word: &str) -> Result<Option<WordDefinition>, LookupError> {
        let url = self.entry_url(word)?;
        tracing::debug!("Dictionary lookup: {}", url);

        let response = self.client.get(url).send().await?;
        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !status.is_success() {
            return Err(LookupError::Status {
                word: word.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.text().await?;
        parse_entries(&body)
    }
}

/// Take the first element of the API's entry array
pub fn parse_entries(body: &str) -> Result<Option<WordDefinition>, LookupError> {
    let entries: Vec<WordDefinition> =
        serde_json::from_str(body).map_err(|e| LookupError::Parse(e.to_string()))?;
    Ok(entries.into_iter().next())
}
