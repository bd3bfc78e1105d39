use serde_json::Value;
use wordbook_core::{Composite, Definition, Dictionary, Suggestions, Word};

use crate::ClientError;

pub(crate) fn dictionaries(raw: Vec<Value>) -> Result<Vec<Dictionary>, ClientError> {
    raw.into_iter()
        .map(|value| {
            serde_json::from_value(value)
                .map_err(|e| ClientError::Parse(format!("invalid dictionary: {e}")))
        })
        .collect()
}

/// `{"suggestions": [{"value": .., "data": {..}}, ..]}`
pub(crate) fn suggestions(
    json: Value,
    dictionary_id: Option<&Composite>,
) -> Result<Suggestions, ClientError> {
    let items = match json.get("suggestions") {
        Some(Value::Array(items)) => items.clone(),
        Some(Value::Null) | None => Vec::new(),
        Some(other) => {
            return Err(ClientError::Parse(format!(
                "expected a suggestions array, got {other}"
            )));
        }
    };

    let words = items
        .into_iter()
        .map(serde_json::from_value::<Word>)
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| ClientError::Parse(format!("invalid suggestion: {e}")))?;

    Ok(Suggestions::new(words, dictionary_id.cloned()))
}

/// Definitions come grouped (one group per dictionary); flatten the groups
/// into a single list in document order.
pub(crate) fn definitions(json: Value) -> Result<Vec<Definition>, ClientError> {
    let groups: Vec<Value> = match json {
        Value::Object(map) => map.into_iter().map(|(_, group)| group).collect(),
        Value::Array(groups) => groups,
        Value::Null => Vec::new(),
        other => {
            return Err(ClientError::Parse(format!(
                "expected grouped definitions, got {other}"
            )));
        }
    };

    let mut flat = Vec::new();
    for group in groups {
        match group {
            Value::Array(items) => {
                for item in items {
                    flat.push(definition(item)?);
                }
            }
            Value::Object(_) => flat.push(definition(group)?),
            _ => {}
        }
    }
    Ok(flat)
}

fn definition(value: Value) -> Result<Definition, ClientError> {
    serde_json::from_value(value).map_err(|e| ClientError::Parse(format!("invalid definition: {e}")))
}

/// Text of an alphabet/info resource: `{"<dictionary id>": [{"definition": ..}]}`
pub(crate) fn resource_text(json: &Value, dictionary_id: &str) -> Option<String> {
    json.get(dictionary_id)?
        .get(0)?
        .get("definition")?
        .as_str()
        .map(str::to_string)
}
