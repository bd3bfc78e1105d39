use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::composite::{Composite, parse_language_id};
use crate::error::WordbookError;

/// One dictionary offered by the service, e.g. Swedish → English.
///
/// Values are validated when built or deserialized: `id`, `short` and
/// `long` are composites and both sides of `id` are positive integers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawDictionary", into = "RawDictionary")]
pub struct Dictionary {
    id: Composite,
    short: Composite,
    long: Composite,
    alphabet: String,
    info: String,
    source_language_id: u32,
    destination_language_id: u32,
    extra: Map<String, Value>,
}

/// Wire form of a dictionary, as served by the API and stored in the cache
#[derive(Debug, Clone, Serialize, Deserialize)]
struct RawDictionary {
    id: String,
    short: String,
    long: String,
    #[serde(default)]
    alphabet: String,
    #[serde(default)]
    info: String,
    #[serde(flatten)]
    extra: Map<String, Value>,
}

impl Dictionary {
    pub fn new(
        id: &str,
        short: &str,
        long: &str,
        alphabet: &str,
        info: &str,
    ) -> Result<Self, WordbookError> {
        Self::try_from(RawDictionary {
            id: id.to_string(),
            short: short.to_string(),
            long: long.to_string(),
            alphabet: alphabet.to_string(),
            info: info.to_string(),
            extra: Map::new(),
        })
    }

    /// Composite language id, e.g. `"2-1"`
    pub fn id(&self) -> &Composite {
        &self.id
    }

    /// ISO3 composite code, e.g. `"swe-eng"`
    pub fn short(&self) -> &Composite {
        &self.short
    }

    /// Human readable composite name, e.g. `"Swedish-English"`
    pub fn long(&self) -> &Composite {
        &self.long
    }

    /// Url of the alphabet resource
    pub fn alphabet_url(&self) -> &str {
        &self.alphabet
    }

    /// Url of the info resource
    pub fn info_url(&self) -> &str {
        &self.info
    }

    pub fn source_language_id(&self) -> u32 {
        self.source_language_id
    }

    pub fn destination_language_id(&self) -> u32 {
        self.destination_language_id
    }

    /// Fields the service sent that have no typed counterpart
    pub fn extra(&self) -> &Map<String, Value> {
        &self.extra
    }
}

impl TryFrom<RawDictionary> for Dictionary {
    type Error = WordbookError;

    fn try_from(raw: RawDictionary) -> Result<Self, Self::Error> {
        let id = Composite::try_from(raw.id)?;
        let source_language_id = parse_language_id(id.source())?;
        let destination_language_id = parse_language_id(id.destination())?;

        Ok(Self {
            short: Composite::try_from(raw.short)?,
            long: Composite::try_from(raw.long)?,
            id,
            alphabet: raw.alphabet,
            info: raw.info,
            source_language_id,
            destination_language_id,
            extra: raw.extra,
        })
    }
}

impl From<Dictionary> for RawDictionary {
    fn from(dictionary: Dictionary) -> Self {
        Self {
            id: dictionary.id.into(),
            short: dictionary.short.into(),
            long: dictionary.long.into(),
            alphabet: dictionary.alphabet,
            info: dictionary.info,
            extra: dictionary.extra,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_language_ids_from_id() {
        let dict = Dictionary::new("2-1", "swe-eng", "Swedish-English", "", "").unwrap();
        assert_eq!(dict.source_language_id(), 2);
        assert_eq!(dict.destination_language_id(), 1);
        assert_eq!(
            format!("{}-{}", dict.source_language_id(), dict.destination_language_id()),
            dict.id().as_str()
        );
    }

    #[test]
    fn test_rejects_malformed_fields() {
        assert!(Dictionary::new("21", "swe-eng", "Swedish-English", "", "").is_err());
        assert!(Dictionary::new("2-1", "sweeng", "Swedish-English", "", "").is_err());
        assert!(Dictionary::new("2-1", "swe-eng", "Swedish", "", "").is_err());
        assert!(Dictionary::new("a-1", "swe-eng", "Swedish-English", "", "").is_err());
    }

    #[test]
    fn test_deserialize_keeps_extra_fields() {
        let json = r#"{
            "id": "2-1",
            "short": "swe-eng",
            "long": "Swedish-English",
            "alphabet": "https://wordbook.cjpg.app/alphabet/2-1",
            "info": "https://wordbook.cjpg.app/info/2-1",
            "url": "https://wordbook.cjpg.app/2-1"
        }"#;

        let dict: Dictionary = serde_json::from_str(json).unwrap();
        assert_eq!(dict.short().as_str(), "swe-eng");
        assert_eq!(dict.info_url(), "https://wordbook.cjpg.app/info/2-1");
        assert_eq!(
            dict.extra().get("url").and_then(Value::as_str),
            Some("https://wordbook.cjpg.app/2-1")
        );

        let back = serde_json::to_value(&dict).unwrap();
        assert_eq!(back["id"], "2-1");
        assert_eq!(back["url"], "https://wordbook.cjpg.app/2-1");
    }

    #[test]
    fn test_deserialize_rejects_invalid_id() {
        let json = r#"{"id": "21", "short": "swe-eng", "long": "Swedish-English"}"#;
        assert!(serde_json::from_str::<Dictionary>(json).is_err());
    }
}
