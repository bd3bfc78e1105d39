use crate::cache::DictionaryCache;
use crate::dictionary::Dictionary;
use crate::error::WordbookError;

/// Provider of the full dictionary list
#[async_trait::async_trait]
pub trait DictionarySource: Send + Sync {
    async fn fetch_dictionaries(&self) -> Result<Vec<Dictionary>, FetchError>;
}

#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("dictionary source failed")]
    Source(#[from] Box<dyn std::error::Error + Send + Sync>),

    #[error("dictionary list is empty")]
    Empty,
}

/// Dictionary list from the cache when fresh, otherwise from `source`.
///
/// A fetched list is written back to the cache; failing to write it does
/// not fail the load.
pub async fn load_dictionaries<S>(
    source: &S,
    cache: &DictionaryCache,
) -> Result<Vec<Dictionary>, WordbookError>
where
    S: DictionarySource + ?Sized,
{
    if let Some(records) = cache.load_if_fresh() {
        return Ok(records);
    }

    tracing::info!("Fetching dictionary list");
    let records = source
        .fetch_dictionaries()
        .await
        .map_err(WordbookError::NoDictionaries)?;

    if records.is_empty() {
        return Err(WordbookError::NoDictionaries(FetchError::Empty));
    }

    cache.save(&records);
    Ok(records)
}
