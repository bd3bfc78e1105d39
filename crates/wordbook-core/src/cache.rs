use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

use crate::dictionary::Dictionary;

/// Default time a cached dictionary list stays valid
pub const DEFAULT_TTL: Duration = Duration::from_secs(24 * 60 * 60);

pub const CACHE_FILE_NAME: &str = "dictionaries.json";

/// Dictionary list persisted as a single JSON file.
///
/// Freshness is the file's modification time; no timestamp is stored. A
/// missing, unreadable or corrupt file is a cache miss.
#[derive(Debug, Clone)]
pub struct DictionaryCache {
    path: PathBuf,
    ttl: Duration,
}

impl DictionaryCache {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            ttl: DEFAULT_TTL,
        }
    }

    /// Cache file named [`CACHE_FILE_NAME`] inside `dir`
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        Self::new(dir.as_ref().join(CACHE_FILE_NAME))
    }

    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn load_if_fresh(&self) -> Option<Vec<Dictionary>> {
        self.load_if_fresh_at(SystemTime::now())
    }

    /// Load the cached list as seen at `now`.
    ///
    /// An expired file is deleted before returning `None`.
    pub fn load_if_fresh_at(&self, now: SystemTime) -> Option<Vec<Dictionary>> {
        let modified = match fs::metadata(&self.path).and_then(|m| m.modified()) {
            Ok(modified) => modified,
            Err(e) => {
                tracing::debug!("No dictionary cache at {}: {}", self.path.display(), e);
                return None;
            }
        };

        // mtime in the future counts as just written
        let age = now.duration_since(modified).unwrap_or(Duration::ZERO);
        if age >= self.ttl {
            tracing::debug!(
                "Dictionary cache expired ({}s old), removing {}",
                age.as_secs(),
                self.path.display()
            );
            if let Err(e) = fs::remove_file(&self.path) {
                tracing::warn!("Failed to remove expired cache {}: {}", self.path.display(), e);
            }
            return None;
        }

        let data = match fs::read(&self.path) {
            Ok(data) => data,
            Err(e) => {
                tracing::warn!("Failed to read cache {}: {}", self.path.display(), e);
                return None;
            }
        };

        match serde_json::from_slice::<Vec<Dictionary>>(&data) {
            Ok(records) => {
                tracing::debug!("Loaded {} dictionaries from cache", records.len());
                Some(records)
            }
            Err(e) => {
                tracing::warn!("Ignoring unreadable cache {}: {}", self.path.display(), e);
                None
            }
        }
    }

    /// Persist `records`, logging and discarding any failure
    pub fn save(&self, records: &[Dictionary]) {
        match self.try_save(records) {
            Ok(()) => tracing::info!(
                "Cached {} dictionaries at {}",
                records.len(),
                self.path.display()
            ),
            Err(e) => tracing::warn!(
                "Failed to write dictionary cache {}: {}",
                self.path.display(),
                e
            ),
        }
    }

    fn try_save(&self, records: &[Dictionary]) -> io::Result<()> {
        if let Some(dir) = self.path.parent() {
            create_cache_dir(dir)?;
        }
        let json = serde_json::to_vec(records)?;
        fs::write(&self.path, json)
    }
}

/// Platform cache directory: `$HOME/.wordbook` when `HOME` is set, else
/// `%ProgramData%\Wordbook`.
pub fn default_cache_dir() -> Option<PathBuf> {
    cache_dir_from(|key| std::env::var_os(key).map(PathBuf::from))
}

fn cache_dir_from(lookup: impl Fn(&str) -> Option<PathBuf>) -> Option<PathBuf> {
    if let Some(home) = lookup("HOME") {
        return Some(home.join(".wordbook"));
    }
    lookup("ProgramData").map(|data| data.join("Wordbook"))
}

#[cfg(unix)]
fn create_cache_dir(dir: &Path) -> io::Result<()> {
    use std::os::unix::fs::DirBuilderExt;

    fs::DirBuilder::new().recursive(true).mode(0o777).create(dir)
}

#[cfg(not(unix))]
fn create_cache_dir(dir: &Path) -> io::Result<()> {
    fs::create_dir_all(dir)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn records() -> Vec<Dictionary> {
        vec![
            Dictionary::new("2-1", "swe-eng", "Swedish-English", "a", "i").unwrap(),
            Dictionary::new("1-2", "eng-swe", "English-Swedish", "a", "i").unwrap(),
        ]
    }

    fn written_at(cache: &DictionaryCache) -> SystemTime {
        fs::metadata(cache.path()).unwrap().modified().unwrap()
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let cache = DictionaryCache::in_dir(dir.path().join("nested").join("wordbook"));

        assert!(cache.load_if_fresh().is_none());
        cache.save(&records());
        assert_eq!(cache.load_if_fresh().unwrap(), records());
    }

    #[test]
    fn test_fresh_just_before_ttl() {
        let dir = tempfile::tempdir().unwrap();
        let cache = DictionaryCache::in_dir(dir.path());
        cache.save(&records());

        let t = written_at(&cache);
        let loaded = cache.load_if_fresh_at(t + Duration::from_secs(86399));
        assert_eq!(loaded.unwrap().len(), 2);
        assert!(cache.path().exists());
    }

    #[test]
    fn test_expired_entry_is_deleted() {
        let dir = tempfile::tempdir().unwrap();
        let cache = DictionaryCache::in_dir(dir.path());
        cache.save(&records());

        let t = written_at(&cache);
        assert!(cache.load_if_fresh_at(t + Duration::from_secs(86401)).is_none());
        assert!(!cache.path().exists());
        assert!(cache.load_if_fresh_at(t).is_none());
    }

    #[test]
    fn test_future_mtime_is_fresh() {
        let dir = tempfile::tempdir().unwrap();
        let cache = DictionaryCache::in_dir(dir.path());
        cache.save(&records());

        let t = written_at(&cache);
        assert!(cache.load_if_fresh_at(t - Duration::from_secs(60)).is_some());
    }

    #[test]
    fn test_custom_ttl() {
        let dir = tempfile::tempdir().unwrap();
        let cache = DictionaryCache::in_dir(dir.path()).with_ttl(Duration::from_secs(10));
        cache.save(&records());

        let t = written_at(&cache);
        assert!(cache.load_if_fresh_at(t + Duration::from_secs(9)).is_some());
        assert!(cache.load_if_fresh_at(t + Duration::from_secs(10)).is_none());
    }

    #[test]
    fn test_corrupt_file_is_a_miss() {
        let dir = tempfile::tempdir().unwrap();
        let cache = DictionaryCache::in_dir(dir.path());
        fs::write(cache.path(), b"{not json").unwrap();
        assert!(cache.load_if_fresh().is_none());

        fs::write(cache.path(), br#"[{"id":"21","short":"swe-eng","long":"Swedish-English"}]"#)
            .unwrap();
        assert!(cache.load_if_fresh().is_none());
    }

    #[test]
    fn test_save_failure_is_swallowed() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("file");
        fs::write(&blocker, b"").unwrap();

        // parent "directory" is a regular file
        let cache = DictionaryCache::in_dir(blocker.join("sub"));
        cache.save(&records());
        assert!(cache.load_if_fresh().is_none());
    }

    #[test]
    fn test_cache_dir_resolution() {
        let home = cache_dir_from(|key| match key {
            "HOME" => Some(PathBuf::from("/home/user")),
            _ => Some(PathBuf::from("C:\\ProgramData")),
        });
        assert_eq!(home, Some(PathBuf::from("/home/user").join(".wordbook")));

        let shared = cache_dir_from(|key| match key {
            "ProgramData" => Some(PathBuf::from("/srv/data")),
            _ => None,
        });
        assert_eq!(shared, Some(PathBuf::from("/srv/data").join("Wordbook")));

        assert_eq!(cache_dir_from(|_| None), None);
    }
}
