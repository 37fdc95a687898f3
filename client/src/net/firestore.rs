//! Firestore REST encoding for document writes.
//!
//! Documents are written with `PATCH .../documents/{collection}/{id}`, which
//! creates or fully replaces the document. Field values use Firestore's typed
//! JSON representation.

#[cfg(test)]
#[path = "firestore_test.rs"]
mod firestore_test;

use serde_json::{Map, Value, json};
use time::format_description::well_known::Rfc3339;

use super::gateway::GatewayError;
use super::types::{FieldValue, Fields};

pub const FIRESTORE_URL: &str = "https://firestore.googleapis.com/v1";

/// Collection holding one profile document per user.
pub const USERS_COLLECTION: &str = "users";

/// REST URL of `collection/id` in the project's default database.
pub fn document_url(project_id: &str, collection: &str, id: &str) -> String {
    format!("{FIRESTORE_URL}/projects/{project_id}/databases/(default)/documents/{collection}/{id}")
}

/// Encode `fields` as a Firestore document body.
///
/// # Errors
///
/// Returns [`GatewayError::Payload`] if a timestamp cannot be formatted.
pub fn encode_document(fields: &Fields) -> Result<Value, GatewayError> {
    let mut encoded = Map::new();
    for (name, value) in fields {
        encoded.insert(name.clone(), encode_value(value)?);
    }
    Ok(json!({ "fields": encoded }))
}

fn encode_value(value: &FieldValue) -> Result<Value, GatewayError> {
    match value {
        FieldValue::String(s) => Ok(json!({ "stringValue": s })),
        FieldValue::Timestamp(ts) => {
            let formatted = ts
                .to_offset(time::UtcOffset::UTC)
                .format(&Rfc3339)
                .map_err(|e| GatewayError::Payload(e.to_string()))?;
            Ok(json!({ "timestampValue": formatted }))
        }
    }
}
