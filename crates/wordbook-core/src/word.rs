use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::composite::{Composite, parse_language_id};
use crate::error::WordbookError;

/// A word or phrase suggested for a query
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "RawWord")]
pub struct Word {
    /// Display form of the suggestion
    pub value: String,
    pub word_id: u64,
    pub word: String,
    /// Name of the source language
    pub language: String,
    pub language_id: u32,
    /// Dictionary the suggestion was requested against, if any
    pub dictionary_id: Option<Composite>,
}

#[derive(Deserialize)]
struct RawWord {
    #[serde(default)]
    value: String,
    #[serde(default)]
    data: WordData,
}

#[derive(Deserialize, Default)]
struct WordData {
    #[serde(default, deserialize_with = "lenient_number")]
    word_id: u64,
    #[serde(default)]
    word: String,
    #[serde(default)]
    language: String,
    #[serde(default, deserialize_with = "lenient_number")]
    language_id: u32,
}

impl From<RawWord> for Word {
    fn from(raw: RawWord) -> Self {
        Self {
            value: raw.value,
            word_id: raw.data.word_id,
            word: raw.data.word,
            language: raw.data.language,
            language_id: raw.data.language_id,
            dictionary_id: None,
        }
    }
}

impl Word {
    pub fn with_dictionary(mut self, dictionary_id: Option<Composite>) -> Self {
        self.dictionary_id = dictionary_id;
        self
    }

    /// Source language: from the dictionary when one was used, else the
    /// language the service reported for the word
    pub fn source_language_id(&self) -> Result<u32, WordbookError> {
        match &self.dictionary_id {
            Some(id) => parse_language_id(id.source()),
            None => Ok(self.language_id),
        }
    }

    /// Destination language, known only when a dictionary was used
    pub fn destination_language_id(&self) -> Result<Option<u32>, WordbookError> {
        self.dictionary_id
            .as_ref()
            .map(|id| parse_language_id(id.destination()))
            .transpose()
    }

    /// Query for this word's definitions, narrowed to its language pair
    pub fn definition_query(&self) -> Result<DefinitionQuery, WordbookError> {
        Ok(DefinitionQuery::ById {
            word_id: self.word_id,
            source: Some(self.source_language_id()?),
            destination: self.destination_language_id()?,
        })
    }
}

/// Suggestions returned for one query
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Suggestions {
    pub dictionary_id: Option<Composite>,
    pub words: Vec<Word>,
}

impl Suggestions {
    pub fn new(words: Vec<Word>, dictionary_id: Option<Composite>) -> Self {
        let words = words
            .into_iter()
            .map(|w| w.with_dictionary(dictionary_id.clone()))
            .collect();
        Self {
            dictionary_id,
            words,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Word> {
        self.words.iter()
    }
}

impl<'a> IntoIterator for &'a Suggestions {
    type Item = &'a Word;
    type IntoIter = std::slice::Iter<'a, Word>;

    fn into_iter(self) -> Self::IntoIter {
        self.words.iter()
    }
}

/// Translation text for a word in one dictionary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Definition {
    /// Name of the dictionary the definition comes from
    #[serde(default)]
    pub dictionary: String,
    #[serde(default, deserialize_with = "lenient_number")]
    pub src_language_id: u32,
    #[serde(default, deserialize_with = "lenient_number")]
    pub dest_language_id: u32,
    /// Definition text, may span several lines
    #[serde(default)]
    pub definition: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// The ways the service can look up definitions
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DefinitionQuery {
    ById {
        word_id: u64,
        source: Option<u32>,
        destination: Option<u32>,
    },
    ByWord {
        word: String,
        source: u32,
        destination: u32,
    },
}

impl DefinitionQuery {
    /// Query string parameters for the definitions endpoint
    pub fn params(&self) -> Vec<(&'static str, String)> {
        match self {
            DefinitionQuery::ById {
                word_id,
                source,
                destination,
            } => {
                let mut params = vec![("id", word_id.to_string())];
                if let Some(source) = source {
                    params.push(("src_language_id", source.to_string()));
                }
                if let Some(destination) = destination {
                    params.push(("dest_language_id", destination.to_string()));
                }
                params
            }
            DefinitionQuery::ByWord {
                word,
                source,
                destination,
            } => vec![
                ("word", word.clone()),
                ("src_language_id", source.to_string()),
                ("dest_language_id", destination.to_string()),
            ],
        }
    }
}

/// Accept numbers sent either as JSON numbers or numeric strings
fn lenient_number<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: std::str::FromStr + TryFrom<u64>,
{
    use serde::de::Error;

    match Value::deserialize(deserializer)? {
        Value::Number(n) => n
            .as_u64()
            .and_then(|n| T::try_from(n).ok())
            .ok_or_else(|| D::Error::custom(format!("number out of range: {n}"))),
        Value::String(s) => s
            .trim()
            .parse()
            .map_err(|_| D::Error::custom(format!("not a number: {s}"))),
        other => Err(D::Error::custom(format!("expected a number, got {other}"))),
    }
}
