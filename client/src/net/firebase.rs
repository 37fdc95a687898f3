//! Identity Toolkit + Firestore REST gateway.
//!
//! Client-side (hydrate): real HTTP calls via `gloo-net`, each raced against
//! the configured timeout.
//! Server-side (SSR): every network operation returns
//! [`GatewayError::Unavailable`]; the session hub is never settled, so route
//! guards render their placeholder until the browser takes over.
//!
//! Request building and response parsing are pure functions so they can be
//! unit tested without a browser.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "firebase_test.rs"]
mod firebase_test;

use std::sync::Arc;

use async_trait::async_trait;
#[cfg(any(test, feature = "hydrate"))]
use serde_json::{Value, json};

#[cfg(any(test, feature = "hydrate"))]
use super::gateway::AuthErrorCode;
use super::gateway::{AuthGateway, DocumentStore, GatewayError, ProviderCallback};
use super::session::{AuthObserver, SessionHub, Subscription};
#[cfg(any(test, feature = "hydrate"))]
use super::types::AuthResponse;
use super::types::{Fields, FirebaseConfig, Session};
use crate::util::storage::{self, StorageArea};

pub const IDENTITY_TOOLKIT_URL: &str = "https://identitytoolkit.googleapis.com/v1";

/// `localStorage` key holding the persisted session.
pub const SESSION_STORAGE_KEY: &str = "flow360.session";

#[cfg(any(test, feature = "hydrate"))]
fn identity_url(method: &str, api_key: &str) -> String {
    format!("{IDENTITY_TOOLKIT_URL}/accounts:{method}?key={api_key}")
}

#[cfg(any(test, feature = "hydrate"))]
fn password_body(email: &str, password: &str) -> Value {
    json!({ "email": email, "password": password, "returnSecureToken": true })
}

#[cfg(any(test, feature = "hydrate"))]
fn password_reset_body(email: &str) -> Value {
    json!({ "requestType": "PASSWORD_RESET", "email": email })
}

#[cfg(any(test, feature = "hydrate"))]
fn idp_body(post_body: &str, request_uri: &str) -> Value {
    json!({
        "postBody": post_body,
        "requestUri": request_uri,
        "returnSecureToken": true,
        "returnIdpCredential": true,
    })
}

/// Map a non-success Identity Toolkit response to a [`GatewayError`].
#[cfg(any(test, feature = "hydrate"))]
fn parse_error_response(status: u16, body: &str) -> GatewayError {
    #[derive(serde::Deserialize)]
    struct ErrorEnvelope {
        error: ErrorBody,
    }
    #[derive(serde::Deserialize)]
    struct ErrorBody {
        message: String,
    }

    match serde_json::from_str::<ErrorEnvelope>(body) {
        Ok(envelope) => GatewayError::Auth(AuthErrorCode::from_rest_message(&envelope.error.message)),
        Err(_) => GatewayError::Transport(format!("identity request failed: {status}")),
    }
}

#[cfg(any(test, feature = "hydrate"))]
fn parse_session_response(status: u16, body: &str) -> Result<Session, GatewayError> {
    if !(200..300).contains(&status) {
        return Err(parse_error_response(status, body));
    }
    let resp: AuthResponse = serde_json::from_str(body).map_err(|e| GatewayError::Payload(e.to_string()))?;
    Ok(resp.into())
}

#[cfg(any(test, feature = "hydrate"))]
fn parse_empty_response(status: u16, body: &str) -> Result<(), GatewayError> {
    if (200..300).contains(&status) {
        Ok(())
    } else {
        Err(parse_error_response(status, body))
    }
}

#[cfg(any(test, feature = "hydrate"))]
fn parse_document_response(status: u16, body: String) -> Result<(), GatewayError> {
    if (200..300).contains(&status) {
        Ok(())
    } else {
        Err(GatewayError::Document { status, body })
    }
}

#[cfg(feature = "hydrate")]
async fn with_timeout<T>(
    timeout_secs: u64,
    fut: impl std::future::Future<Output = Result<T, GatewayError>>,
) -> Result<T, GatewayError> {
    use futures::future::{Either, select};

    let timeout = gloo_timers::future::sleep(std::time::Duration::from_secs(timeout_secs));
    futures::pin_mut!(fut);
    futures::pin_mut!(timeout);
    match select(fut, timeout).await {
        Either::Left((result, _)) => result,
        Either::Right(((), _)) => Err(GatewayError::Timeout),
    }
}

#[cfg(feature = "hydrate")]
async fn send_json(
    builder: gloo_net::http::RequestBuilder,
    body: &Value,
    timeout_secs: u64,
) -> Result<(u16, String), GatewayError> {
    let request = builder.json(body).map_err(|e| GatewayError::Payload(e.to_string()))?;
    with_timeout(timeout_secs, async move {
        let resp = request
            .send()
            .await
            .map_err(|e| GatewayError::Transport(e.to_string()))?;
        let status = resp.status();
        let text = resp.text().await.map_err(|e| GatewayError::Transport(e.to_string()))?;
        Ok((status, text))
    })
    .await
}

/// Gateway backed by the managed backend's public REST endpoints.
#[derive(Clone)]
pub struct FirebaseGateway {
    config: Arc<FirebaseConfig>,
    hub: SessionHub,
}

impl FirebaseGateway {
    pub fn new(config: FirebaseConfig) -> Self {
        Self { config: Arc::new(config), hub: SessionHub::new() }
    }

    pub fn config(&self) -> &FirebaseConfig {
        &self.config
    }

    /// Settle the session hub from `localStorage`. An unreadable entry is
    /// treated as signed out.
    pub fn restore_session(&self) {
        let stored = storage::load_json::<Session>(StorageArea::Local, SESSION_STORAGE_KEY);
        log::debug!("session restored: signed_in={}", stored.is_some());
        self.hub.restore(stored);
    }

    #[cfg(any(test, feature = "hydrate"))]
    fn establish(&self, session: Session) -> Session {
        storage::save_json(StorageArea::Local, SESSION_STORAGE_KEY, &session);
        self.hub.publish(Some(session.clone()));
        session
    }

    fn ensure_configured(&self) -> Result<(), GatewayError> {
        if self.config.is_configured() {
            Ok(())
        } else {
            Err(GatewayError::NotConfigured("api_key/project_id"))
        }
    }

    #[cfg(feature = "hydrate")]
    async fn identity_call(&self, method: &str, body: &Value) -> Result<(u16, String), GatewayError> {
        self.ensure_configured()?;
        let url = identity_url(method, &self.config.api_key);
        send_json(gloo_net::http::Request::post(&url), body, self.config.timeout_secs).await
    }

    #[cfg(feature = "hydrate")]
    async fn password_sign_in(&self, method: &str, email: &str, password: &str) -> Result<Session, GatewayError> {
        let (status, text) = self.identity_call(method, &password_body(email, password)).await?;
        let session = parse_session_response(status, &text)?;
        Ok(self.establish(session))
    }
}

#[async_trait(?Send)]
impl AuthGateway for FirebaseGateway {
    async fn sign_in(&self, email: &str, password: &str) -> Result<Session, GatewayError> {
        #[cfg(feature = "hydrate")]
        {
            self.password_sign_in("signInWithPassword", email, password).await
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (email, password);
            Err(GatewayError::Unavailable)
        }
    }

    async fn sign_up(&self, email: &str, password: &str) -> Result<Session, GatewayError> {
        #[cfg(feature = "hydrate")]
        {
            self.password_sign_in("signUp", email, password).await
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (email, password);
            Err(GatewayError::Unavailable)
        }
    }

    async fn begin_provider_sign_in(&self) -> Result<(), GatewayError> {
        use super::oauth::{PENDING_SIGN_IN_KEY, PendingProviderSignIn, authorization_url};

        self.ensure_configured()?;
        let client_id = self
            .config
            .google_client_id
            .as_deref()
            .ok_or(GatewayError::NotConfigured("google_client_id"))?;
        let redirect_uri = crate::util::browser::entry_point_uri().ok_or(GatewayError::Unavailable)?;
        let pending = PendingProviderSignIn::generate();
        let url = authorization_url(client_id, &redirect_uri, &pending)?;
        storage::save_json(StorageArea::Session, PENDING_SIGN_IN_KEY, &pending);
        crate::util::browser::navigate_to(&url);
        Ok(())
    }

    async fn complete_provider_sign_in(&self, callback: &ProviderCallback) -> Result<Session, GatewayError> {
        use super::oauth::{PENDING_SIGN_IN_KEY, PendingProviderSignIn, verify_callback};

        let pending = storage::take_json::<PendingProviderSignIn>(StorageArea::Session, PENDING_SIGN_IN_KEY);
        let verified = verify_callback(callback, pending.as_ref())?;
        #[cfg(feature = "hydrate")]
        {
            let request_uri = crate::util::browser::entry_point_uri().ok_or(GatewayError::Unavailable)?;
            let body = idp_body(&super::oauth::idp_post_body(&verified), &request_uri);
            let (status, text) = self.identity_call("signInWithIdp", &body).await?;
            let session = parse_session_response(status, &text)?;
            Ok(self.establish(session))
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = verified;
            Err(GatewayError::Unavailable)
        }
    }

    async fn send_password_reset(&self, email: &str) -> Result<(), GatewayError> {
        #[cfg(feature = "hydrate")]
        {
            let (status, text) = self.identity_call("sendOobCode", &password_reset_body(email)).await?;
            parse_empty_response(status, &text)
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = email;
            Err(GatewayError::Unavailable)
        }
    }

    fn sign_out(&self) {
        storage::remove(StorageArea::Local, SESSION_STORAGE_KEY);
        self.hub.publish(None);
    }

    fn current_session(&self) -> Option<Session> {
        self.hub.current()
    }

    fn on_auth_state_changed(&self, observer: AuthObserver) -> Subscription {
        self.hub.subscribe(observer)
    }
}

#[async_trait(?Send)]
impl DocumentStore for FirebaseGateway {
    async fn write_document(
        &self,
        session: &Session,
        collection: &str,
        id: &str,
        fields: &Fields,
    ) -> Result<(), GatewayError> {
        #[cfg(feature = "hydrate")]
        {
            use super::firestore::{document_url, encode_document};

            self.ensure_configured()?;
            let body = encode_document(fields)?;
            let url = document_url(&self.config.project_id, collection, id);
            let builder = gloo_net::http::Request::patch(&url)
                .header("Authorization", &format!("Bearer {}", session.id_token));
            let (status, text) = send_json(builder, &body, self.config.timeout_secs).await?;
            parse_document_response(status, text)
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (session, collection, id, fields);
            Err(GatewayError::Unavailable)
        }
    }
}
