//! Google redirect sign-in helpers.
//!
//! The browser is sent to Google's authorization endpoint asking for an
//! identity token (`response_type=id_token`). Google redirects back to the
//! public entry point with the token in the URL fragment; the token is then
//! exchanged with the identity provider via `accounts:signInWithIdp`.
//!
//! A random `state` and `nonce` are parked in `sessionStorage` before leaving.
//! The returning `state` must match; the nonce is forwarded to
//! `signInWithIdp` so the backend can match it to the token's claim.

#[cfg(test)]
#[path = "oauth_test.rs"]
mod oauth_test;

use serde::{Deserialize, Serialize};
use url::Url;
use url::form_urlencoded;

use super::gateway::{GatewayError, ProviderCallback};

pub const GOOGLE_AUTH_URL: &str = "https://accounts.google.com/o/oauth2/v2/auth";
pub const GOOGLE_PROVIDER_ID: &str = "google.com";
const GOOGLE_SCOPES: &str = "openid email profile";

/// `sessionStorage` key holding the in-flight request.
pub const PENDING_SIGN_IN_KEY: &str = "flow360.oauth.pending";

/// Correlation values for a redirect that has not returned yet.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingProviderSignIn {
    pub state: String,
    pub nonce: String,
}

impl PendingProviderSignIn {
    pub fn generate() -> Self {
        Self {
            state: uuid::Uuid::new_v4().simple().to_string(),
            nonce: uuid::Uuid::new_v4().simple().to_string(),
        }
    }
}

/// Build the Google authorization URL for `pending`.
///
/// # Errors
///
/// Returns [`GatewayError::Provider`] if the URL cannot be assembled.
pub fn authorization_url(
    client_id: &str,
    redirect_uri: &str,
    pending: &PendingProviderSignIn,
) -> Result<String, GatewayError> {
    let url = Url::parse_with_params(
        GOOGLE_AUTH_URL,
        &[
            ("client_id", client_id),
            ("redirect_uri", redirect_uri),
            ("response_type", "id_token"),
            ("scope", GOOGLE_SCOPES),
            ("state", pending.state.as_str()),
            ("nonce", pending.nonce.as_str()),
            ("prompt", "select_account"),
        ],
    )
    .map_err(|e| GatewayError::Provider(e.to_string()))?;
    Ok(url.into())
}

/// Read a provider redirect out of a URL fragment.
///
/// Returns `None` when the fragment carries neither a token nor an error,
/// i.e. the page was not reached through a provider redirect.
pub fn parse_callback_fragment(fragment: &str) -> Option<ProviderCallback> {
    let fragment = fragment.strip_prefix('#').unwrap_or(fragment);
    let mut id_token = None;
    let mut state = None;
    let mut error = None;
    for (key, value) in form_urlencoded::parse(fragment.as_bytes()) {
        match key.as_ref() {
            "id_token" => id_token = Some(value.into_owned()),
            "state" => state = Some(value.into_owned()),
            "error" => error = Some(value.into_owned()),
            _ => {}
        }
    }

    if let Some(error) = error {
        return Some(ProviderCallback::Error(error));
    }
    let id_token = id_token?;
    Some(ProviderCallback::Token { id_token, state: state.unwrap_or_default() })
}

/// Token and nonce of a redirect that matched its parked request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct VerifiedCallback<'a> {
    pub id_token: &'a str,
    /// Nonce sent with the authorization request; the identity backend checks
    /// it against the token's `nonce` claim.
    pub nonce: &'a str,
}

/// Check the redirect against the parked request.
///
/// # Errors
///
/// Returns [`GatewayError::Provider`] for a provider-reported error, a missing
/// parked request, or a `state` mismatch.
pub fn verify_callback<'a>(
    callback: &'a ProviderCallback,
    pending: Option<&'a PendingProviderSignIn>,
) -> Result<VerifiedCallback<'a>, GatewayError> {
    match callback {
        ProviderCallback::Error(error) => Err(GatewayError::Provider(error.clone())),
        ProviderCallback::Token { id_token, state } => {
            let pending = pending.ok_or_else(|| GatewayError::Provider("no sign-in in progress".to_owned()))?;
            if pending.state != *state {
                return Err(GatewayError::Provider("state mismatch".to_owned()));
            }
            Ok(VerifiedCallback { id_token, nonce: &pending.nonce })
        }
    }
}

/// `postBody` for `accounts:signInWithIdp`.
pub fn idp_post_body(verified: &VerifiedCallback<'_>) -> String {
    form_urlencoded::Serializer::new(String::new())
        .append_pair("id_token", verified.id_token)
        .append_pair("providerId", GOOGLE_PROVIDER_ID)
        .append_pair("nonce", verified.nonce)
        .finish()
}
