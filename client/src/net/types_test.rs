use super::*;

#[test]
fn auth_response_converts_into_session() {
    let resp: AuthResponse = serde_json::from_value(serde_json::json!({
        "kind": "identitytoolkit#VerifyPasswordResponse",
        "idToken": "id-1",
        "refreshToken": "refresh-1",
        "localId": "uid-1",
        "email": "ana@x.com",
        "expiresIn": "3600"
    }))
    .unwrap();
    let session = Session::from(resp);
    assert_eq!(session.id_token, "id-1");
    assert_eq!(session.refresh_token, "refresh-1");
    assert_eq!(session.user_id, "uid-1");
    assert_eq!(session.email.as_deref(), Some("ana@x.com"));
}

#[test]
fn auth_response_treats_empty_email_as_missing() {
    let resp: AuthResponse = serde_json::from_value(serde_json::json!({
        "idToken": "id-1",
        "refreshToken": "refresh-1",
        "localId": "uid-1",
        "email": ""
    }))
    .unwrap();
    assert_eq!(Session::from(resp).email, None);
}

#[test]
fn user_profile_fields_use_stored_names() {
    let created_at = time::macros::datetime!(2026-10-17 12:00 UTC);
    let profile = UserProfile { name: "Ana".to_owned(), email: "ana@x.com".to_owned(), created_at };
    let fields = profile.to_fields();
    assert_eq!(fields.len(), 3);
    assert_eq!(fields.get("name"), Some(&FieldValue::String("Ana".to_owned())));
    assert_eq!(fields.get("email"), Some(&FieldValue::String("ana@x.com".to_owned())));
    assert_eq!(fields.get("createdAt"), Some(&FieldValue::Timestamp(created_at)));
}

#[test]
fn firebase_config_defaults_timeout_when_absent() {
    let cfg: FirebaseConfig = serde_json::from_value(serde_json::json!({
        "api_key": "k",
        "project_id": "p",
        "auth_domain": "p.firebaseapp.com"
    }))
    .unwrap();
    assert_eq!(cfg.timeout_secs, DEFAULT_TIMEOUT_SECS);
    assert_eq!(cfg.google_client_id, None);
    assert!(cfg.is_configured());
}

#[test]
fn default_firebase_config_is_not_configured() {
    assert!(!FirebaseConfig::default().is_configured());
}
