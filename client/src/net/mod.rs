//! Networking modules for the identity and document backends.
//!
//! SYSTEM CONTEXT
//! ==============
//! `gateway` defines the backend-facing traits, `firebase` implements them over
//! REST, `session` owns the signed-in state and its observers, and `actions`
//! holds the form operations the pages call.

pub mod actions;
#[cfg(test)]
pub(crate) mod fake;
pub mod firebase;
pub mod firestore;
pub mod gateway;
pub mod oauth;
pub mod session;
pub mod types;
