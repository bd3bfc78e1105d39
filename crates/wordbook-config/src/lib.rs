use std::env;

use serde::{Deserialize, Serialize};

use self::cache::CacheConfig;
use self::network::NetworkConfig;

pub mod cache;
pub mod network;

/// Reads one configuration variable by name
pub type Lookup<'a> = dyn Fn(&str) -> Option<String> + 'a;

#[derive(Debug, Default, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct Config {
    pub network: NetworkConfig,
    pub cache: CacheConfig,

    /// Emit logs as JSON lines instead of human readable text
    pub log_json: bool,
}

impl Config {
    /// Configuration from `WORDBOOK_*` environment variables
    pub fn new() -> Self {
        Self::from_lookup(&|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: &Lookup<'_>) -> Self {
        let log_json = lookup("WORDBOOK_LOG_JSON")
            .map(|v| matches!(v.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
            .unwrap_or(false);

        Config {
            network: NetworkConfig::from_lookup(lookup),
            cache: CacheConfig::from_lookup(lookup),
            log_json,
        }
    }
}
