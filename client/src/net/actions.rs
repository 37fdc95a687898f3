//! Credential-form operations on top of the gateway traits.
//!
//! SYSTEM CONTEXT
//! ==============
//! The login page snapshots its form, runs one of these futures, and applies
//! the result with `FormState::finish`. Each operation issues at most one
//! identity call (plus the profile write after sign-up).
//!
//! ERROR HANDLING
//! ==============
//! Every failure is caught here and returned as an [`ActionError`] carrying a
//! display message; nothing propagates past the page. A profile write that
//! fails after the account was created keeps the account and reports a
//! dedicated, recoverable error.

#[cfg(test)]
#[path = "actions_test.rs"]
mod actions_test;

use time::OffsetDateTime;

use super::firestore::USERS_COLLECTION;
use super::gateway::{AuthGateway, DocumentStore, GatewayError, ProviderCallback};
use super::types::UserProfile;
use crate::state::form::FormMode;
use crate::util::messages;

/// Form fields captured at submit time.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Credentials {
    pub mode: FormMode,
    pub name: String,
    pub email: String,
    pub password: String,
}

/// A completed operation and how the form should react.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ActionSuccess {
    pub message: &'static str,
    pub clear_credentials: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ActionError {
    /// Rejected locally; no request was made.
    #[error("validation failed: {0}")]
    Validation(&'static str),

    #[error("sign-in failed: {0}")]
    SignIn(GatewayError),

    #[error("sign-up failed: {0}")]
    SignUp(GatewayError),

    /// The account exists but its profile document was not written.
    #[error("profile write failed: {0}")]
    ProfileWrite(GatewayError),

    #[error("provider sign-in failed: {0}")]
    Provider(GatewayError),

    #[error("password reset failed: {0}")]
    PasswordReset(GatewayError),
}

impl ActionError {
    /// Text shown to the user for this failure.
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::Validation(msg) => *msg,
            Self::SignIn(err) | Self::SignUp(err) => messages::credential_error_message(err),
            Self::ProfileWrite(_) => messages::PROFILE_WRITE_FAILED,
            Self::Provider(_) => messages::PROVIDER_FAILURE,
            Self::PasswordReset(err) => messages::reset_error_message(err),
        }
    }
}

/// Local checks that run before any request.
///
/// # Errors
///
/// Returns [`ActionError::Validation`] for a sign-up password shorter than
/// [`messages::MIN_PASSWORD_LEN`] UTF-16 code units, the unit the identity
/// backend measures in.
pub fn validate_credentials(creds: &Credentials) -> Result<(), ActionError> {
    if creds.mode == FormMode::SignUp && creds.password.encode_utf16().count() < messages::MIN_PASSWORD_LEN {
        return Err(ActionError::Validation(messages::PASSWORD_TOO_SHORT));
    }
    Ok(())
}

/// Sign in or sign up with the submitted credentials.
///
/// After a sign-up the profile document `users/{uid}` is written with
/// `created_at` as its creation time.
///
/// # Errors
///
/// Returns the validation, provider, or profile-write failure.
pub async fn submit<G>(gateway: &G, creds: &Credentials, created_at: OffsetDateTime) -> Result<ActionSuccess, ActionError>
where
    G: AuthGateway + DocumentStore + ?Sized,
{
    validate_credentials(creds)?;

    match creds.mode {
        FormMode::SignIn => {
            gateway.sign_in(&creds.email, &creds.password).await.map_err(|e| {
                log::error!("sign-in failed: {e}");
                ActionError::SignIn(e)
            })?;
            Ok(ActionSuccess { message: messages::SIGN_IN_SUCCESS, clear_credentials: false })
        }
        FormMode::SignUp => {
            let session = gateway.sign_up(&creds.email, &creds.password).await.map_err(|e| {
                log::error!("sign-up failed: {e}");
                ActionError::SignUp(e)
            })?;

            let profile = UserProfile { name: creds.name.clone(), email: creds.email.clone(), created_at };
            gateway
                .write_document(&session, USERS_COLLECTION, &session.user_id, &profile.to_fields())
                .await
                .map_err(|e| {
                    log::error!("profile write failed for {}: {e}", session.user_id);
                    ActionError::ProfileWrite(e)
                })?;

            Ok(ActionSuccess { message: messages::SIGN_UP_SUCCESS, clear_credentials: true })
        }
    }
}

/// Start Google sign-in. On success the browser is already leaving the page.
///
/// # Errors
///
/// Returns [`ActionError::Provider`] if the redirect could not be started.
pub async fn sign_in_with_provider<G>(gateway: &G) -> Result<(), ActionError>
where
    G: AuthGateway + ?Sized,
{
    gateway.begin_provider_sign_in().await.map_err(|e| {
        log::error!("provider sign-in failed to start: {e}");
        ActionError::Provider(e)
    })
}

/// Finish Google sign-in after the provider redirected back.
///
/// # Errors
///
/// Returns [`ActionError::Provider`] for any failure.
pub async fn complete_provider_sign_in<G>(gateway: &G, callback: &ProviderCallback) -> Result<ActionSuccess, ActionError>
where
    G: AuthGateway + ?Sized,
{
    gateway.complete_provider_sign_in(callback).await.map_err(|e| {
        log::error!("provider sign-in failed: {e}");
        ActionError::Provider(e)
    })?;
    Ok(ActionSuccess { message: messages::PROVIDER_SUCCESS, clear_credentials: false })
}

/// Send a password-reset email to `email`.
///
/// # Errors
///
/// Returns [`ActionError::Validation`] for a blank email, otherwise
/// [`ActionError::PasswordReset`] on failure.
pub async fn request_password_reset<G>(gateway: &G, email: &str) -> Result<ActionSuccess, ActionError>
where
    G: AuthGateway + ?Sized,
{
    let email = email.trim();
    if email.is_empty() {
        return Err(ActionError::Validation(messages::RESET_EMAIL_REQUIRED));
    }
    gateway.send_password_reset(email).await.map_err(|e| {
        log::error!("password reset failed: {e}");
        ActionError::PasswordReset(e)
    })?;
    Ok(ActionSuccess { message: messages::RESET_SENT, clear_credentials: false })
}
