use serde::{Deserialize, Serialize};

use crate::Lookup;

fn default_api_url() -> String {
    "https://wordbook.cjpg.app".to_string()
}

fn default_timeout_seconds() -> u64 {
    30
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct NetworkConfig {
    /// Base url of the Wordbook API
    #[serde(default = "default_api_url")]
    pub api_url: String,
    /// Per request timeout
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            timeout_seconds: default_timeout_seconds(),
        }
    }
}

impl NetworkConfig {
    pub(crate) fn from_lookup(lookup: &Lookup<'_>) -> Self {
        let api_url = lookup("WORDBOOK_API_URL")
            .map(|url| url.trim_end_matches('/').to_string())
            .filter(|url| !url.is_empty())
            .unwrap_or_else(default_api_url);

        let timeout_seconds = lookup("WORDBOOK_TIMEOUT_SECONDS")
            .and_then(|v| v.parse().ok())
            .filter(|&secs: &u64| secs > 0)
            .unwrap_or_else(default_timeout_seconds);

        Self {
            api_url,
            timeout_seconds,
        }
    }
}
