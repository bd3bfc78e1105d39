use std::error::Error;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use crate::cache::DictionaryCache;
use crate::catalog::{DictionarySource, FetchError, load_dictionaries};
use crate::dictionary::Dictionary;
use crate::error::WordbookError;
use crate::filter::{MatchScope, filter};

enum Reply {
    Records(Vec<Dictionary>),
    Fail,
}

struct FakeSource {
    reply: Reply,
    calls: AtomicUsize,
}

impl FakeSource {
    fn new(reply: Reply) -> Self {
        Self {
            reply,
            calls: AtomicUsize::new(0),
        }
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl DictionarySource for FakeSource {
    async fn fetch_dictionaries(&self) -> Result<Vec<Dictionary>, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.reply {
            Reply::Records(records) => Ok(records.clone()),
            Reply::Fail => Err(FetchError::Source("connection refused".into())),
        }
    }
}

fn records() -> Vec<Dictionary> {
    vec![
        Dictionary::new("2-1", "swe-eng", "Swedish-English", "", "").unwrap(),
        Dictionary::new("1-2", "eng-swe", "English-Swedish", "", "").unwrap(),
        Dictionary::new("3-1", "deu-eng", "German-English", "", "").unwrap(),
    ]
}

#[tokio::test]
async fn test_fetch_populates_cache() {
    let dir = tempfile::tempdir().unwrap();
    let cache = DictionaryCache::in_dir(dir.path());
    let source = FakeSource::new(Reply::Records(records()));

    let loaded = load_dictionaries(&source, &cache).await.unwrap();
    assert_eq!(loaded, records());
    assert_eq!(source.calls(), 1);
    assert_eq!(cache.load_if_fresh().unwrap(), records());
}

#[tokio::test]
async fn test_fresh_cache_skips_fetch() {
    let dir = tempfile::tempdir().unwrap();
    let cache = DictionaryCache::in_dir(dir.path());
    cache.save(&records()[..1]);
    let source = FakeSource::new(Reply::Records(records()));

    let loaded = load_dictionaries(&source, &cache).await.unwrap();
    assert_eq!(loaded.len(), 1);
    assert_eq!(source.calls(), 0);
}

#[tokio::test]
async fn test_expired_cache_refetches() {
    let dir = tempfile::tempdir().unwrap();
    let cache = DictionaryCache::in_dir(dir.path()).with_ttl(Duration::ZERO);
    cache.save(&records()[..1]);
    let source = FakeSource::new(Reply::Records(records()));

    let loaded = load_dictionaries(&source, &cache).await.unwrap();
    assert_eq!(loaded.len(), 3);
    assert_eq!(source.calls(), 1);
}

#[tokio::test]
async fn test_corrupt_cache_refetches() {
    let dir = tempfile::tempdir().unwrap();
    let cache = DictionaryCache::in_dir(dir.path());
    std::fs::write(cache.path(), b"[{]").unwrap();
    let source = FakeSource::new(Reply::Records(records()));

    let loaded = load_dictionaries(&source, &cache).await.unwrap();
    assert_eq!(loaded.len(), 3);
    assert_eq!(source.calls(), 1);
}

#[tokio::test]
async fn test_fetch_failure_is_no_dictionaries() {
    let dir = tempfile::tempdir().unwrap();
    let cache = DictionaryCache::in_dir(dir.path());
    let source = FakeSource::new(Reply::Fail);

    let err = load_dictionaries(&source, &cache).await.unwrap_err();
    assert!(matches!(err, WordbookError::NoDictionaries(FetchError::Source(_))));
    assert!(!cache.path().exists());
}

#[tokio::test]
async fn test_failure_chain_names_each_cause_once() {
    let dir = tempfile::tempdir().unwrap();
    let cache = DictionaryCache::in_dir(dir.path());
    let source = FakeSource::new(Reply::Fail);

    let err = load_dictionaries(&source, &cache).await.unwrap_err();

    let mut chain = vec![err.to_string()];
    let mut cause = err.source();
    while let Some(e) = cause {
        chain.push(e.to_string());
        cause = e.source();
    }
    assert_eq!(
        chain,
        ["No dictionaries available", "dictionary source failed", "connection refused"]
    );
}

#[tokio::test]
async fn test_empty_list_is_no_dictionaries() {
    let dir = tempfile::tempdir().unwrap();
    let cache = DictionaryCache::in_dir(dir.path());
    let source = FakeSource::new(Reply::Records(vec![]));

    let err = load_dictionaries(&source, &cache).await.unwrap_err();
    assert!(matches!(err, WordbookError::NoDictionaries(FetchError::Empty)));
    assert!(!cache.path().exists());
}

#[tokio::test]
async fn test_search_over_loaded_list() {
    let dir = tempfile::tempdir().unwrap();
    let cache = DictionaryCache::in_dir(dir.path());
    let source = FakeSource::new(Reply::Records(records()));

    let loaded = load_dictionaries(&source, &cache).await.unwrap();
    let english = filter(
        &loaded,
        "-eng",
        MatchScope {
            short: true,
            ..Default::default()
        },
    );
    let ids: Vec<&str> = english.iter().map(|d| d.id().as_str()).collect();
    assert_eq!(ids, ["2-1", "3-1"]);
}
