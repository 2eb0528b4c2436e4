use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

/// Why a request body was rejected.
#[derive(Debug, PartialEq, Eq)]
pub enum BodyError {
    /// Not a JSON object, or the key set differs from the schema.
    Shape,
    /// The named field is present but is not a string.
    Type(&'static str),
}

/// Parse a body whose schema is a fixed set of string fields.
///
/// The key set must match `fields` exactly before any value is inspected;
/// values are then checked in `fields` order, so the first offending field
/// is the one reported.
pub fn parse_body<T: DeserializeOwned>(
    body: &[u8],
    fields: &'static [&'static str],
) -> Result<T, BodyError> {
    let map: Map<String, Value> = serde_json::from_slice(body).map_err(|_| BodyError::Shape)?;

    if map.len() != fields.len() || !fields.iter().all(|f| map.contains_key(*f)) {
        return Err(BodyError::Shape);
    }

    if let Some(field) = fields.iter().find(|f| !map[**f].is_string()) {
        return Err(BodyError::Type(*field));
    }

    serde_json::from_value(Value::Object(map)).map_err(|_| BodyError::Shape)
}
