use std::fs;
use std::path::{Path, PathBuf};

use lexi_core::ProfileError;
use lexi_core::profile::ProfileStore;

/// Profiles stored as `<dir>/<key>.json`
pub struct FileProfileStore {
    dir: PathBuf,
}

impl FileProfileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Store rooted at `<base>/<name>`, so named profiles don't share files
    pub fn for_profile(base: &Path, name: &str) -> Self {
        Self::new(base.join(name))
    }

    fn file(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl ProfileStore for FileProfileStore {
    fn get(&self, key: &str) -> Result<Option<String>, ProfileError> {
        let file = self.file(key);
        if !file.exists() {
            return Ok(None);
        }
        Ok(Some(fs::read_to_string(file)?))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), ProfileError> {
        fs::create_dir_all(&self.dir)?;
        fs::write(self.file(key), value)?;
        tracing::debug!("Wrote profile {} to {}", key, self.dir.display());
        Ok(())
    }
}
