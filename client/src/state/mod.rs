//! Page-local state types.
//!
//! Plain structs held in `RwSignal`s; transitions are methods so they can be
//! tested without a reactive runtime.

pub mod auth;
pub mod form;
