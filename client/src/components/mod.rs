//! Reusable UI component modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Components read the gateway from Leptos context or take the form signal
//! from their page; none of them own auth state.

pub mod feedback_banner;
pub mod password_field;
pub mod private_route;
