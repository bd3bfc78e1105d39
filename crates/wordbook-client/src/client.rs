use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{ACCEPT, HeaderMap, HeaderValue};
use serde_json::Value;
use tokio::sync::RwLock;
use wordbook_config::network::NetworkConfig;
use wordbook_core::{
    Composite, Definition, DefinitionQuery, Dictionary, DictionarySource, FetchError, Suggestions,
};

use crate::ClientError;
use crate::parse;

const PATH_DICTIONARIES: &str = "/dictionaries";
const PATH_SUGGESTIONS: &str = "/suggestions";
const PATH_DEFINITIONS: &str = "/definitions";

/// Per dictionary resources behind the `alphabet` and `info` urls
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    Alphabet,
    Info,
}

impl ResourceKind {
    fn url(self, dictionary: &Dictionary) -> &str {
        match self {
            ResourceKind::Alphabet => dictionary.alphabet_url(),
            ResourceKind::Info => dictionary.info_url(),
        }
    }
}

/// Client for the Wordbook JSON API
pub struct WordbookClient {
    client: reqwest::Client,
    base_url: String,
    /// Loaded alphabet/info texts. `None` means loaded but without text;
    /// failed requests are never stored.
    resources: RwLock<HashMap<(String, ResourceKind), Option<String>>>,
}

impl WordbookClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, ClientError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .user_agent(concat!("Rust-Wordbook-Client/", env!("CARGO_PKG_VERSION")))
            .default_headers(headers)
            .timeout(timeout)
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            resources: RwLock::new(HashMap::new()),
        })
    }

    pub fn from_config(config: &NetworkConfig) -> Result<Self, ClientError> {
        Self::new(
            config.api_url.clone(),
            Duration::from_secs(config.timeout_seconds),
        )
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// All dictionaries as untyped JSON values
    pub async fn dictionaries_raw(&self) -> Result<Vec<Value>, ClientError> {
        let json = self.get_json(&self.endpoint(PATH_DICTIONARIES), &[]).await?;
        match json {
            Value::Array(items) => Ok(items),
            other => Err(ClientError::Parse(format!(
                "expected a dictionary array, got {other}"
            ))),
        }
    }

    pub async fn dictionaries(&self) -> Result<Vec<Dictionary>, ClientError> {
        let raw = self.dictionaries_raw().await?;
        let dictionaries = parse::dictionaries(raw)?;
        tracing::info!("Fetched {} dictionaries", dictionaries.len());
        Ok(dictionaries)
    }

    /// Suggestions for `query`, in one dictionary or in all of them.
    /// The service returns at most 25.
    pub async fn suggestions(
        &self,
        query: &str,
        dictionary_id: Option<&Composite>,
    ) -> Result<Suggestions, ClientError> {
        let mut params = vec![("query", query.to_string())];
        if let Some(id) = dictionary_id {
            params.push(("language", id.to_string()));
        }

        let json = self.get_json(&self.endpoint(PATH_SUGGESTIONS), &params).await?;
        parse::suggestions(json, dictionary_id)
    }

    pub async fn definitions(&self, query: &DefinitionQuery) -> Result<Vec<Definition>, ClientError> {
        let json = self
            .get_json(&self.endpoint(PATH_DEFINITIONS), &query.params())
            .await?;
        parse::definitions(json)
    }

    pub async fn alphabet(&self, dictionary: &Dictionary) -> Result<Option<String>, ClientError> {
        self.resource(dictionary, ResourceKind::Alphabet).await
    }

    pub async fn info(&self, dictionary: &Dictionary) -> Result<Option<String>, ClientError> {
        self.resource(dictionary, ResourceKind::Info).await
    }

    /// Load a dictionary resource once per client; errors are retried on
    /// the next call.
    pub async fn resource(
        &self,
        dictionary: &Dictionary,
        kind: ResourceKind,
    ) -> Result<Option<String>, ClientError> {
        let key = (dictionary.id().to_string(), kind);
        if let Some(text) = self.resources.read().await.get(&key) {
            return Ok(text.clone());
        }

        let json = self.get_json(kind.url(dictionary), &[]).await?;
        let text = parse::resource_text(&json, dictionary.id().as_str());
        if text.is_none() {
            tracing::debug!("No {:?} text for dictionary {}", kind, dictionary.id());
        }

        self.resources.write().await.insert(key, text.clone());
        Ok(text)
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn get_json(&self, url: &str, params: &[(&str, String)]) -> Result<Value, ClientError> {
        tracing::debug!("GET {} {:?}", url, params);

        let response = self.client.get(url).query(params).send().await?;

        if !response.status().is_success() {
            return Err(ClientError::Api(format!("HTTP {}", response.status())));
        }

        response
            .json::<Value>()
            .await
            .map_err(|e| ClientError::Parse(e.to_string()))
    }
}

#[async_trait]
impl DictionarySource for WordbookClient {
    async fn fetch_dictionaries(&self) -> Result<Vec<Dictionary>, FetchError> {
        self.dictionaries()
            .await
            .map_err(|e| FetchError::Source(Box::new(e)))
    }
}
