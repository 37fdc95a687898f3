//! Auth-gate state for protected routes.
//!
//! SYSTEM CONTEXT
//! ==============
//! `PrivateRoute` owns one `GuardState` per mount and feeds it every auth
//! notification. The explicit `Checking` state keeps the guard from
//! redirecting before the first notification arrives.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use crate::net::types::Session;

/// Lifecycle of a route guard.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum GuardState {
    /// Not yet subscribed.
    #[default]
    Unknown,
    /// Subscribed, waiting for the first notification.
    Checking,
    Authenticated(Session),
    Unauthenticated,
}

/// What the guard renders for a given state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GuardView {
    /// Neutral loading placeholder: no protected content, no redirect.
    Placeholder,
    /// Replace the current history entry with the public entry point.
    Redirect,
    /// Render the wrapped content.
    Protected,
}

impl GuardState {
    /// Enter `Checking`; called right before subscribing.
    pub fn mount(&mut self) {
        *self = Self::Checking;
    }

    /// Apply one auth notification. Ignored while unsubscribed.
    pub fn observe(&mut self, session: Option<&Session>) {
        if *self == Self::Unknown {
            return;
        }
        *self = match session {
            Some(session) => Self::Authenticated(session.clone()),
            None => Self::Unauthenticated,
        };
    }

    pub fn view(&self) -> GuardView {
        match self {
            Self::Unknown | Self::Checking => GuardView::Placeholder,
            Self::Authenticated(_) => GuardView::Protected,
            Self::Unauthenticated => GuardView::Redirect,
        }
    }

    pub fn session(&self) -> Option<&Session> {
        match self {
            Self::Authenticated(session) => Some(session),
            _ => None,
        }
    }
}
