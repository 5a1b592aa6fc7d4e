//! Turning page responses into records

use crate::error::{Error, Result};
use crate::http::ApiResponse;
use crate::types::{JsonObject, JsonValue};

/// Concatenate the `data` arrays of every page, in page order
pub fn records(pages: &[ApiResponse]) -> Result<Vec<JsonValue>> {
    let mut rows = Vec::new();
    for (index, page) in pages.iter().enumerate() {
        let body: JsonValue = page.json()?;
        match body.get("data") {
            Some(JsonValue::Array(items)) => rows.extend(items.iter().cloned()),
            _ => {
                return Err(Error::validation(format!(
                    "Page {index} has no 'data' array"
                )))
            }
        }
    }
    Ok(rows)
}

/// Flatten nested objects into dotted keys
///
/// `{"loan": {"id": 1}}` becomes `{"loan.id": 1}`. Arrays and scalars are
/// kept as they are; an empty nested object contributes no keys.
pub fn flatten_record(record: &JsonObject) -> JsonObject {
    let mut flat = JsonObject::new();
    flatten_into(&mut flat, None, record);
    flat
}

fn flatten_into(out: &mut JsonObject, prefix: Option<&str>, object: &JsonObject) {
    for (key, value) in object {
        let name = match prefix {
            Some(prefix) => format!("{prefix}.{key}"),
            None => key.clone(),
        };
        match value {
            JsonValue::Object(nested) => flatten_into(out, Some(name.as_str()), nested),
            other => {
                out.insert(name, other.clone());
            }
        }
    }
}

/// Flatten every record, rejecting rows that are not objects
pub fn flatten_records(rows: Vec<JsonValue>) -> Result<Vec<JsonValue>> {
    rows.into_iter()
        .map(|row| match row {
            JsonValue::Object(object) => Ok(JsonValue::Object(flatten_record(&object))),
            other => Err(Error::validation(format!(
                "Expected an object record, found {other}"
            ))),
        })
        .collect()
}
