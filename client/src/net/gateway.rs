//! Capability surface of the managed identity and document backends.
//!
//! SYSTEM CONTEXT
//! ==============
//! Pages and actions depend on these traits rather than on the REST client so
//! the form and guard logic can be exercised against an in-memory fake.
//!
//! ERROR HANDLING
//! ==============
//! Provider rejections are normalized into [`AuthErrorCode`] kinds; anything
//! the table does not know survives as `Other` with the raw code.

#[cfg(test)]
#[path = "gateway_test.rs"]
mod gateway_test;

use std::fmt;

use async_trait::async_trait;

use super::session::{AuthObserver, Subscription};
use super::types::{Fields, Session};

/// Outcome codes reported by the identity provider for a rejected request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AuthErrorCode {
    EmailAlreadyInUse,
    InvalidEmail,
    WeakPassword,
    WrongPassword,
    UserNotFound,
    Other(String),
}

impl AuthErrorCode {
    /// Parse an Identity Toolkit REST error message such as `EMAIL_EXISTS` or
    /// `WEAK_PASSWORD : Password should be at least 6 characters`.
    pub fn from_rest_message(message: &str) -> Self {
        let code = message
            .split(|c: char| c == ':' || c.is_whitespace())
            .next()
            .unwrap_or_default();
        match code {
            "EMAIL_EXISTS" => Self::EmailAlreadyInUse,
            "INVALID_EMAIL" => Self::InvalidEmail,
            "WEAK_PASSWORD" => Self::WeakPassword,
            "INVALID_PASSWORD" => Self::WrongPassword,
            "EMAIL_NOT_FOUND" => Self::UserNotFound,
            other => Self::Other(other.to_owned()),
        }
    }

    /// Parse an SDK-style code, with or without the `auth/` prefix.
    pub fn from_sdk_code(code: &str) -> Self {
        match code.strip_prefix("auth/").unwrap_or(code) {
            "email-already-in-use" => Self::EmailAlreadyInUse,
            "invalid-email" => Self::InvalidEmail,
            "weak-password" => Self::WeakPassword,
            "wrong-password" => Self::WrongPassword,
            "user-not-found" => Self::UserNotFound,
            other => Self::Other(other.to_owned()),
        }
    }

    /// SDK-style code string, used for diagnostics.
    pub fn as_str(&self) -> &str {
        match self {
            Self::EmailAlreadyInUse => "email-already-in-use",
            Self::InvalidEmail => "invalid-email",
            Self::WeakPassword => "weak-password",
            Self::WrongPassword => "wrong-password",
            Self::UserNotFound => "user-not-found",
            Self::Other(raw) => raw,
        }
    }
}

impl fmt::Display for AuthErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Failures surfaced by gateway and document-store calls.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum GatewayError {
    /// The provider rejected the request with a known or unknown outcome code.
    #[error("auth rejected: {0}")]
    Auth(AuthErrorCode),

    /// The HTTP request could not be completed.
    #[error("request failed: {0}")]
    Transport(String),

    /// No response arrived within the configured timeout.
    #[error("request timed out")]
    Timeout,

    /// A response body could not be decoded, or a request could not be encoded.
    #[error("payload decode failed: {0}")]
    Payload(String),

    /// The federated sign-in round trip failed.
    #[error("provider sign-in failed: {0}")]
    Provider(String),

    /// The document backend refused the write.
    #[error("document write rejected: status {status}")]
    Document { status: u16, body: String },

    /// A required piece of configuration is missing.
    #[error("not configured: {0}")]
    NotConfigured(&'static str),

    /// Browser-only capability invoked during server rendering.
    #[error("not available on server")]
    Unavailable,
}

impl GatewayError {
    /// The provider outcome code, if this is a provider rejection.
    pub fn auth_code(&self) -> Option<&AuthErrorCode> {
        match self {
            Self::Auth(code) => Some(code),
            _ => None,
        }
    }
}

/// Query string produced by the federated provider after a redirect sign-in.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ProviderCallback {
    /// The provider issued an identity token for the given `state`.
    Token { id_token: String, state: String },
    /// The provider reported an error (consent denied, bad client, ...).
    Error(String),
}

/// Identity operations consumed by the credential form and route guard.
#[async_trait(?Send)]
pub trait AuthGateway {
    /// Sign in with email and password.
    async fn sign_in(&self, email: &str, password: &str) -> Result<Session, GatewayError>;

    /// Create an account; on success the new user is also signed in.
    async fn sign_up(&self, email: &str, password: &str) -> Result<Session, GatewayError>;

    /// Start federated sign-in. The browser leaves the page on success.
    async fn begin_provider_sign_in(&self) -> Result<(), GatewayError>;

    /// Finish federated sign-in from the provider's redirect payload.
    async fn complete_provider_sign_in(&self, callback: &ProviderCallback) -> Result<Session, GatewayError>;

    /// Ask the provider to email a password-reset link.
    async fn send_password_reset(&self, email: &str) -> Result<(), GatewayError>;

    /// Drop the current session.
    fn sign_out(&self);

    /// Session currently known to the client, if any.
    fn current_session(&self) -> Option<Session>;

    /// Register `observer` for auth-state changes.
    ///
    /// The observer fires once the client knows whether a session exists,
    /// then on every change. Dropping or unsubscribing the returned handle
    /// deregisters it.
    fn on_auth_state_changed(&self, observer: AuthObserver) -> Subscription;
}

/// Document persistence consumed at sign-up.
#[async_trait(?Send)]
pub trait DocumentStore {
    /// Create or replace `collection/id` with `fields` on behalf of `session`.
    async fn write_document(
        &self,
        session: &Session,
        collection: &str,
        id: &str,
        fields: &Fields,
    ) -> Result<(), GatewayError>;
}
