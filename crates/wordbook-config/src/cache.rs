use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::Lookup;

fn default_ttl_seconds() -> u64 {
    24 * 60 * 60
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct CacheConfig {
    /// Overrides the platform cache directory
    pub dir: Option<PathBuf>,
    #[serde(default = "default_ttl_seconds")]
    pub ttl_seconds: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            dir: None,
            ttl_seconds: default_ttl_seconds(),
        }
    }
}

impl CacheConfig {
    pub(crate) fn from_lookup(lookup: &Lookup<'_>) -> Self {
        let dir = lookup("WORDBOOK_CACHE_DIR")
            .filter(|dir| !dir.is_empty())
            .map(PathBuf::from);

        let ttl_seconds = lookup("WORDBOOK_CACHE_TTL_SECONDS")
            .and_then(|v| v.parse().ok())
            .unwrap_or_else(default_ttl_seconds);

        Self { dir, ttl_seconds }
    }
}
