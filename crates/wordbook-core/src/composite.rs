use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::WordbookError;

/// Split a composite value on its first dash into `(source, destination)`.
///
/// Everything after the first dash belongs to the destination side, so
/// `"a-b-c"` splits into `("a", "b-c")`.
pub fn split(value: &str) -> Result<(&str, &str), WordbookError> {
    value
        .split_once('-')
        .ok_or_else(|| WordbookError::MalformedComposite(value.to_string()))
}

/// Parse one side of a composite id into a language id.
pub fn parse_language_id(part: &str) -> Result<u32, WordbookError> {
    match part.parse::<u32>() {
        Ok(id) if id > 0 => Ok(id),
        _ => Err(WordbookError::InvalidLanguageId(part.to_string())),
    }
}

/// A `"<source>-<destination>"` value such as `"2-1"`, `"swe-eng"` or
/// `"Swedish-English"`.
///
/// The separating dash is located once on construction, so the two sides
/// can be read without re-validating.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Composite {
    value: String,
    dash: usize,
}

impl Composite {
    pub fn as_str(&self) -> &str {
        &self.value
    }

    /// Part before the first dash
    pub fn source(&self) -> &str {
        &self.value[..self.dash]
    }

    /// Part after the first dash
    pub fn destination(&self) -> &str {
        &self.value[self.dash + 1..]
    }
}

impl TryFrom<String> for Composite {
    type Error = WordbookError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.find('-') {
            Some(dash) => Ok(Self { value, dash }),
            None => Err(WordbookError::MalformedComposite(value)),
        }
    }
}

impl FromStr for Composite {
    type Err = WordbookError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::try_from(s.to_string())
    }
}

impl From<Composite> for String {
    fn from(composite: Composite) -> Self {
        composite.value
    }
}

impl AsRef<str> for Composite {
    fn as_ref(&self) -> &str {
        &self.value
    }
}

impl fmt::Display for Composite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}
