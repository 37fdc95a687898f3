//! Shared DTOs for the identity and document backends.
//!
//! DESIGN
//! ======
//! `Session` is stored verbatim in browser storage and is never inspected
//! beyond the user identifier; token contents stay opaque to this crate.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// Default per-request timeout applied to gateway HTTP calls.
pub const DEFAULT_TIMEOUT_SECS: u64 = 15;

/// A signed-in session issued by the identity provider.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Short-lived bearer token for backend calls.
    pub id_token: String,
    /// Long-lived token used by the provider to mint new id tokens.
    pub refresh_token: String,
    /// Provider-assigned user identifier.
    pub user_id: String,
    /// Email bound to the account, when the provider reports one.
    pub email: Option<String>,
}

/// Successful sign-in payload returned by the Identity Toolkit endpoints.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct AuthResponse {
    pub id_token: String,
    pub refresh_token: String,
    pub local_id: String,
    #[serde(default)]
    pub email: Option<String>,
}

impl From<AuthResponse> for Session {
    fn from(resp: AuthResponse) -> Self {
        Self {
            id_token: resp.id_token,
            refresh_token: resp.refresh_token,
            user_id: resp.local_id,
            email: resp.email.filter(|e| !e.is_empty()),
        }
    }
}

/// Profile document written to `users/{user_id}` at sign-up.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UserProfile {
    pub name: String,
    pub email: String,
    pub created_at: OffsetDateTime,
}

impl UserProfile {
    /// Document fields keyed by their stored names.
    pub fn to_fields(&self) -> Fields {
        let mut fields = Fields::new();
        fields.insert("name".to_owned(), FieldValue::String(self.name.clone()));
        fields.insert("email".to_owned(), FieldValue::String(self.email.clone()));
        fields.insert("createdAt".to_owned(), FieldValue::Timestamp(self.created_at));
        fields
    }
}

/// A typed document field value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FieldValue {
    String(String),
    Timestamp(OffsetDateTime),
}

/// Document body: field name to value, ordered for stable encoding.
pub type Fields = BTreeMap<String, FieldValue>;

/// Public web configuration for the managed backend project.
///
/// None of these values are secrets; they are embedded in the served page.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FirebaseConfig {
    pub api_key: String,
    pub project_id: String,
    pub auth_domain: String,
    /// OAuth client used for Google sign-in. Google sign-in is unavailable without it.
    #[serde(default)]
    pub google_client_id: Option<String>,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl Default for FirebaseConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            project_id: String::new(),
            auth_domain: String::new(),
            google_client_id: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl FirebaseConfig {
    /// Whether the identity endpoints can be addressed at all.
    pub fn is_configured(&self) -> bool {
        !self.api_key.is_empty() && !self.project_id.is_empty()
    }
}
