mod client;
mod parse;

pub use client::{ResourceKind, WordbookClient};

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("Network error")]
    Network(#[from] reqwest::Error),

    #[error("API error: {0}")]
    Api(String),

    #[error("Failed to parse response: {0}")]
    Parse(String),
}
