pub mod cache;
pub mod catalog;
pub mod composite;
pub mod dictionary;
pub mod error;
pub mod filter;
pub mod preprocess;
pub mod word;


pub use cache::DictionaryCache;
pub use catalog::{DictionarySource, FetchError, load_dictionaries};
pub use composite::{Composite, split};
pub use dictionary::Dictionary;
pub use error::WordbookError;
pub use filter::{MatchScope, Resolution, filter, resolve};
pub use word::{Definition, DefinitionQuery, Suggestions, Word};
