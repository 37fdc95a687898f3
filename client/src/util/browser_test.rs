use super::*;

#[test]
fn config_meta_round_trips() {
    let config = FirebaseConfig {
        api_key: "key-1".to_owned(),
        project_id: "flow360-app".to_owned(),
        auth_domain: "flow360-app.firebaseapp.com".to_owned(),
        google_client_id: Some("client-1".to_owned()),
        timeout_secs: 9,
    };
    let encoded = encode_config_meta(&config);
    assert_eq!(decode_config_meta(&encoded), Some(config));
}

#[test]
fn decode_config_meta_rejects_garbage() {
    assert_eq!(decode_config_meta("not json"), None);
    assert_eq!(decode_config_meta(""), None);
}

#[test]
fn browser_helpers_are_inert_outside_the_browser() {
    assert_eq!(read_config_meta(), None);
    assert_eq!(entry_point_uri(), None);
    assert_eq!(location_fragment(), None);
    assert_eq!(take_provider_callback(), None);
}

#[test]
fn unrelated_fragment_is_left_in_place() {
    for fragment in [None, Some("#pricing"), Some("#tab=2")] {
        let mut cleared = false;
        assert_eq!(provider_callback_from(fragment, || cleared = true), None);
        assert!(!cleared, "fragment {fragment:?} should not be stripped");
    }
}

#[test]
fn provider_redirect_fragment_is_stripped() {
    let mut cleared = false;
    let callback = provider_callback_from(Some("#state=s-1&id_token=tok"), || cleared = true);
    assert_eq!(callback, Some(ProviderCallback::Token { id_token: "tok".to_owned(), state: "s-1".to_owned() }));
    assert!(cleared);

    let mut cleared = false;
    let callback = provider_callback_from(Some("#error=access_denied"), || cleared = true);
    assert_eq!(callback, Some(ProviderCallback::Error("access_denied".to_owned())));
    assert!(cleared);
}
