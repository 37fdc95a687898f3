use super::*;
use crate::net::types::UserProfile;

#[test]
fn document_url_targets_default_database() {
    assert_eq!(
        document_url("flow360-app", USERS_COLLECTION, "uid-1"),
        "https://firestore.googleapis.com/v1/projects/flow360-app/databases/(default)/documents/users/uid-1"
    );
}

#[test]
fn encode_profile_document_uses_typed_values() {
    let profile = UserProfile {
        name: "Ana".to_owned(),
        email: "ana@x.com".to_owned(),
        created_at: time::macros::datetime!(2026-10-17 09:30:00 UTC),
    };
    let body = encode_document(&profile.to_fields()).unwrap();
    assert_eq!(
        body,
        serde_json::json!({
            "fields": {
                "name": { "stringValue": "Ana" },
                "email": { "stringValue": "ana@x.com" },
                "createdAt": { "timestampValue": "2026-10-17T09:30:00Z" }
            }
        })
    );
}

#[test]
fn timestamps_are_normalized_to_utc() {
    let mut fields = Fields::new();
    fields.insert(
        "createdAt".to_owned(),
        FieldValue::Timestamp(time::macros::datetime!(2026-10-17 09:30:00 -3)),
    );
    let body = encode_document(&fields).unwrap();
    assert_eq!(body["fields"]["createdAt"]["timestampValue"], "2026-10-17T12:30:00Z");
}
