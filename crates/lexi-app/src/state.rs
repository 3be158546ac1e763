use std::path::Path;
use std::sync::Arc;

use lexi_config::Config;
use lexi_content::{Catalog, ContentSource, load_catalog, source_from_config};
use lexi_core::profile::{ProfileChange, ProfileStore, load_profile, update_profile};
use lexi_core::{DefinitionLookup, ProfileError, WordLevelIndex};
use lexi_lang_english::EnglishLookup;
use lexi_types::UserProfile;
use tokio::sync::RwLock;

use crate::profile::FileProfileStore;

pub struct AppState {
    pub config: Arc<RwLock<Config>>,
    pub catalog: Catalog,
    /// Set when the manifest could not be loaded
    pub catalog_error: Option<String>,
    pub content: Arc<dyn ContentSource>,
    pub index: WordLevelIndex,
    pub lookup: Arc<dyn DefinitionLookup>,
    store: Arc<dyn ProfileStore>,
    profile_key: String,
    profile: RwLock<UserProfile>,
}

impl AppState {
    pub fn new(
        config: Config,
        catalog: Catalog,
        content: Arc<dyn ContentSource>,
        index: WordLevelIndex,
        lookup: Arc<dyn DefinitionLookup>,
        store: Arc<dyn ProfileStore>,
    ) -> Self {
        let profile_key = config.profile.key.clone();
        let profile = load_profile(store.as_ref(), &profile_key);

        Self {
            config: Arc::new(RwLock::new(config)),
            catalog,
            catalog_error: None,
            content,
            index,
            lookup,
            store,
            profile_key,
            profile: RwLock::new(profile),
        }
    }

    /// Load catalog, word levels and profile for `profile_name`
    pub async fn bootstrap(config: Config, profile_name: &str) -> Self {
        let content = source_from_config(&config.content);

        let (catalog, catalog_error) = match load_catalog(content.clone(), &config.content).await {
            Ok(catalog) => (catalog, None),
            Err(e) => {
                tracing::error!("Could not load course catalog: {}", e);
                (
                    Catalog::assemble(vec![], &config.content.enrolled_course_ids),
                    Some(e.to_string()),
                )
            }
        };

        let index = lexi_lang_english::load_index(&config.dictionary);
        let lookup: Arc<dyn DefinitionLookup> = Arc::new(EnglishLookup::from_config(&config));
        let store: Arc<dyn ProfileStore> = Arc::new(FileProfileStore::for_profile(
            Path::new(&config.profile.dir),
            profile_name,
        ));

        let mut state = Self::new(config, catalog, content, index, lookup, store);
        state.catalog_error = catalog_error;
        state
    }

    /// Snapshot of the current profile
    pub async fn profile(&self) -> UserProfile {
        self.profile.read().await.clone()
    }

    /// Apply, persist and publish a profile change. On failure the current
    /// profile stays in place.
    pub async fn update_profile(&self, changes: &[ProfileChange]) -> Result<UserProfile, ProfileError> {
        let mut profile = self.profile.write().await;
        let next = update_profile(self.store.as_ref(), &self.profile_key, &profile, changes)?;
        *profile = next.clone();
        Ok(next)
    }
}
