use color_eyre::Result;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::SystemTime;
use tracing::debug;

use crate::dataset::Dataset;
use crate::error::PairingResult;
use crate::loader::{self, OpenOptions};

/// Log file written by the subscriber installed in `main`.
pub const LOG_FILE: &str = "taste-harmony.log";

/// Registry of known cache files
const CACHE_FILES: &[&str] = &[LOG_FILE];

/// Manages cache directory and cache file operations
#[derive(Clone)]
pub struct CacheManager {
    pub(crate) cache_dir: PathBuf,
}

impl CacheManager {
    /// Create a new CacheManager for the given app name
    pub fn new(app_name: &str) -> Result<Self> {
        let cache_dir = dirs::cache_dir()
            .ok_or_else(|| color_eyre::eyre::eyre!("Could not determine cache directory"))?
            .join(app_name);

        Ok(Self { cache_dir })
    }

    /// Create a CacheManager with a custom cache directory (primarily for testing)
    pub fn with_dir(cache_dir: PathBuf) -> Self {
        Self { cache_dir }
    }

    pub fn cache_dir(&self) -> &Path {
        &self.cache_dir
    }

    pub fn cache_file(&self, filename: &str) -> PathBuf {
        self.cache_dir.join(filename)
    }

    pub fn ensure_cache_dir(&self) -> Result<()> {
        if !self.cache_dir.exists() {
            fs::create_dir_all(&self.cache_dir)?;
        }
        Ok(())
    }

    /// Clear all registered cache files
    pub fn clear_all(&self) -> Result<()> {
        for filename in CACHE_FILES {
            let file_path = self.cache_file(filename);
            if file_path.exists() {
                if let Err(e) = fs::remove_file(&file_path) {
                    eprintln!("Warning: Could not remove cache file {}: {}", filename, e);
                }
            }
        }

        Ok(())
    }
}

struct CachedDataset {
    modified: Option<SystemTime>,
    options: OpenOptions,
    dataset: Arc<Dataset>,
}

/// Memoized datasets keyed by path. An entry is reused while the file's
/// modification time and the read options are unchanged.
#[derive(Default)]
pub struct DatasetCache {
    entries: HashMap<PathBuf, CachedDataset>,
    loads: usize,
}

impl DatasetCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached dataset for `path`, loading it if absent or stale.
    pub fn load(&mut self, path: &Path, options: &OpenOptions) -> PairingResult<Arc<Dataset>> {
        let modified = fs::metadata(path).and_then(|m| m.modified()).ok();

        if let Some(entry) = self.entries.get(path) {
            if entry.modified == modified && modified.is_some() && entry.options == *options {
                debug!(path = %path.display(), "dataset cache hit");
                return Ok(Arc::clone(&entry.dataset));
            }
        }

        debug!(path = %path.display(), "dataset cache miss");
        let dataset = Arc::new(loader::load(path, options)?);
        self.loads += 1;
        self.entries.insert(
            path.to_path_buf(),
            CachedDataset {
                modified,
                options: options.clone(),
                dataset: Arc::clone(&dataset),
            },
        );
        Ok(dataset)
    }

    pub fn invalidate(&mut self, path: &Path) {
        self.entries.remove(path);
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// How many times a file was actually parsed.
    pub fn load_count(&self) -> usize {
        self.loads
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clear_all_removes_log_file() {
        let dir = tempfile::tempdir().unwrap();
        let cache = CacheManager::with_dir(dir.path().to_path_buf());
        cache.ensure_cache_dir().unwrap();
        let log = cache.cache_file(LOG_FILE);
        fs::write(&log, "line\n").unwrap();
        let unrelated = cache.cache_file("keep.txt");
        fs::write(&unrelated, "x").unwrap();

        cache.clear_all().unwrap();
        assert!(!log.exists());
        assert!(unrelated.exists());
    }

    #[test]
    fn clear_all_without_files_is_ok() {
        let dir = tempfile::tempdir().unwrap();
        let cache = CacheManager::with_dir(dir.path().join("missing"));
        assert!(cache.clear_all().is_ok());
    }
}
