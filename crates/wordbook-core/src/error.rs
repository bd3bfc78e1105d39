use crate::catalog::FetchError;

#[derive(Debug, thiserror::Error)]
pub enum WordbookError {
    #[error("Malformed composite value '{0}': expected '<source>-<destination>'")]
    MalformedComposite(String),

    #[error("Invalid language id '{0}': expected a positive integer")]
    InvalidLanguageId(String),

    #[error("No dictionaries available")]
    NoDictionaries(#[source] FetchError),
}
