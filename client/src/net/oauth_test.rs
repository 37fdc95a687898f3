use super::*;

fn pending(state: &str) -> PendingProviderSignIn {
    PendingProviderSignIn { state: state.to_owned(), nonce: "n-1".to_owned() }
}

#[test]
fn authorization_url_requests_id_token_with_correlation_values() {
    let url = authorization_url("client-1.apps.googleusercontent.com", "https://app.test/", &pending("s-1")).unwrap();
    let parsed = Url::parse(&url).unwrap();
    assert_eq!(parsed.host_str(), Some("accounts.google.com"));
    let params: std::collections::HashMap<String, String> = parsed.query_pairs().into_owned().collect();
    assert_eq!(params["client_id"], "client-1.apps.googleusercontent.com");
    assert_eq!(params["redirect_uri"], "https://app.test/");
    assert_eq!(params["response_type"], "id_token");
    assert_eq!(params["scope"], "openid email profile");
    assert_eq!(params["state"], "s-1");
    assert_eq!(params["nonce"], "n-1");
}

#[test]
fn generated_pending_values_are_unique() {
    let a = PendingProviderSignIn::generate();
    let b = PendingProviderSignIn::generate();
    assert_ne!(a.state, b.state);
    assert_ne!(a.state, a.nonce);
    assert_eq!(a.state.len(), 32);
}

#[test]
fn parse_fragment_with_token() {
    let callback = parse_callback_fragment("#state=s-1&id_token=eyJ.abc.def&authuser=0").unwrap();
    assert_eq!(
        callback,
        ProviderCallback::Token { id_token: "eyJ.abc.def".to_owned(), state: "s-1".to_owned() }
    );
}

#[test]
fn parse_fragment_with_error() {
    let callback = parse_callback_fragment("error=access_denied&state=s-1").unwrap();
    assert_eq!(callback, ProviderCallback::Error("access_denied".to_owned()));
}

#[test]
fn parse_unrelated_fragment_returns_none() {
    assert_eq!(parse_callback_fragment(""), None);
    assert_eq!(parse_callback_fragment("#section-2"), None);
}

#[test]
fn verify_callback_accepts_matching_state() {
    let callback = ProviderCallback::Token { id_token: "tok".to_owned(), state: "s-1".to_owned() };
    let parked = pending("s-1");
    assert_eq!(
        verify_callback(&callback, Some(&parked)),
        Ok(VerifiedCallback { id_token: "tok", nonce: "n-1" })
    );
}

#[test]
fn verify_callback_rejects_mismatch_and_missing_request() {
    let callback = ProviderCallback::Token { id_token: "tok".to_owned(), state: "s-1".to_owned() };
    let other = pending("other");
    assert!(matches!(verify_callback(&callback, Some(&other)), Err(GatewayError::Provider(_))));
    assert!(matches!(verify_callback(&callback, None), Err(GatewayError::Provider(_))));
}

#[test]
fn verify_callback_surfaces_provider_error() {
    let callback = ProviderCallback::Error("access_denied".to_owned());
    let parked = pending("s-1");
    assert_eq!(
        verify_callback(&callback, Some(&parked)),
        Err(GatewayError::Provider("access_denied".to_owned()))
    );
}

#[test]
fn idp_post_body_encodes_token_and_provider() {
    let verified = VerifiedCallback { id_token: "a+b=c", nonce: "n-1" };
    assert_eq!(idp_post_body(&verified), "id_token=a%2Bb%3Dc&providerId=google.com&nonce=n-1");
}

#[test]
fn parked_nonce_reaches_the_idp_post_body() {
    let callback = ProviderCallback::Token { id_token: "tok".to_owned(), state: "s-1".to_owned() };
    let parked = PendingProviderSignIn { state: "s-1".to_owned(), nonce: "nonce-xyz".to_owned() };
    let verified = verify_callback(&callback, Some(&parked)).unwrap();
    let pairs: Vec<(String, String)> = form_urlencoded::parse(idp_post_body(&verified).as_bytes()).into_owned().collect();
    assert!(pairs.contains(&("nonce".to_owned(), "nonce-xyz".to_owned())));
    assert!(pairs.contains(&("id_token".to_owned(), "tok".to_owned())));
}
