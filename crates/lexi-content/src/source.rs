use std::path::PathBuf;
use std::sync::Arc;

use lexi_config::content::ContentConfig;
use serde::de::DeserializeOwned;

use crate::error::ContentError;

/// Raw text access to the content tree, addressed by `/`-separated paths
/// relative to the content root
#[async_trait::async_trait]
pub trait ContentSource: Send + Sync {
    async fn fetch_text(&self, path: &str) -> Result<String, ContentError>;

    /// Human readable location of the root, for logs
    fn describe(&self) -> String;
}

pub(crate) async fn fetch_json<T>(source: &dyn ContentSource, path: &str) -> Result<T, ContentError>
where
    T: DeserializeOwned,
{
    let text = source.fetch_text(path).await?;
    serde_json::from_str(&text).map_err(|source| ContentError::Parse {
        path: path.to_string(),
        source,
    })
}

/// Content served over HTTP
#[derive(Clone)]
pub struct HttpContentSource {
    base_url: String,
    client: reqwest::Client,
}

impl HttpContentSource {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait::async_trait]
impl ContentSource for HttpContentSource {
    async fn fetch_text(&self, path: &str) -> Result<String, ContentError> {
        let url = format!("{}/{}", self.base_url, path.trim_start_matches('/'));
        tracing::debug!("GET {}", url);

        let response = self.client.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ContentError::Status {
                path: path.to_string(),
                status: status.as_u16(),
            });
        }

        Ok(response.text().await?)
    }

    fn describe(&self) -> String {
        self.base_url.clone()
    }
}

/// Content read from a local directory
#[derive(Debug, Clone)]
pub struct FsContentSource {
    root: PathBuf,
}

impl FsContentSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

#[async_trait::async_trait]
impl ContentSource for FsContentSource {
    async fn fetch_text(&self, path: &str) -> Result<String, ContentError> {
        let relative = path.trim_start_matches('/');
        if relative.split('/').any(|part| part == "..") {
            return Err(ContentError::Io {
                path: path.to_string(),
                source: std::io::Error::new(
                    std::io::ErrorKind::PermissionDenied,
                    "path leaves the content root",
                ),
            });
        }

        tokio::fs::read_to_string(self.root.join(relative))
            .await
            .map_err(|source| ContentError::Io {
                path: path.to_string(),
                source,
            })
    }

    fn describe(&self) -> String {
        self.root.display().to_string()
    }
}

/// HTTP source for URL bases, filesystem source otherwise
pub fn source_from_config(config: &ContentConfig) -> Arc<dyn ContentSource> {
    if config.is_remote() {
        Arc::new(HttpContentSource::new(config.base.clone()))
    } else {
        Arc::new(FsContentSource::new(config.base.clone()))
    }
}
