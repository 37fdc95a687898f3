use std::sync::{Arc, Mutex};

use super::*;
use crate::net::fake::{FakeGateway, session};
use crate::net::gateway::AuthGateway;

// =============================================================
// GuardState transitions
// =============================================================

#[test]
fn default_is_unknown_placeholder() {
    let state = GuardState::default();
    assert_eq!(state, GuardState::Unknown);
    assert_eq!(state.view(), GuardView::Placeholder);
}

#[test]
fn mount_enters_checking_without_redirect() {
    let mut state = GuardState::default();
    state.mount();
    assert_eq!(state, GuardState::Checking);
    assert_eq!(state.view(), GuardView::Placeholder);
}

#[test]
fn notification_before_mount_is_ignored() {
    let mut state = GuardState::default();
    state.observe(Some(&session("u1")));
    assert_eq!(state, GuardState::Unknown);
}

#[test]
fn session_notification_admits() {
    let mut state = GuardState::default();
    state.mount();
    state.observe(Some(&session("u1")));
    assert_eq!(state.view(), GuardView::Protected);
    assert_eq!(state.session().map(|s| s.user_id.as_str()), Some("u1"));
}

#[test]
fn null_notification_redirects() {
    let mut state = GuardState::default();
    state.mount();
    state.observe(None);
    assert_eq!(state.view(), GuardView::Redirect);
    assert_eq!(state.session(), None);
}

#[test]
fn every_notification_is_applied_in_order() {
    let sequences: [&[Option<&str>]; 4] = [
        &[Some("a"), None],
        &[None, Some("a")],
        &[Some("a"), Some("b"), None, None, Some("c")],
        &[None, None, None],
    ];
    for sequence in sequences {
        let mut state = GuardState::default();
        state.mount();
        for uid in sequence {
            state.observe(uid.map(session).as_ref());
            let expected = if uid.is_some() { GuardView::Protected } else { GuardView::Redirect };
            assert_eq!(state.view(), expected, "sequence {sequence:?}");
        }
    }
}

// =============================================================
// Guard lifecycle against a gateway
// =============================================================

/// Mirrors what `PrivateRoute` does on mount.
fn mount_guard(gateway: &FakeGateway) -> (Arc<Mutex<GuardState>>, crate::net::session::Subscription) {
    let state = Arc::new(Mutex::new(GuardState::default()));
    state.lock().unwrap().mount();
    let sink = Arc::clone(&state);
    let sub = gateway.on_auth_state_changed(Arc::new(move |s: Option<&Session>| {
        sink.lock().unwrap().observe(s);
    }));
    (state, sub)
}

#[test]
fn guard_stays_in_placeholder_until_first_notification() {
    let gateway = FakeGateway::new();
    let (state, _sub) = mount_guard(&gateway);
    assert_eq!(state.lock().unwrap().view(), GuardView::Placeholder);
    gateway.hub.restore(Some(session("u1")));
    assert_eq!(state.lock().unwrap().view(), GuardView::Protected);
}

#[test]
fn guard_follows_sign_out() {
    let gateway = FakeGateway::new();
    gateway.hub.restore(Some(session("u1")));
    let (state, _sub) = mount_guard(&gateway);
    assert_eq!(state.lock().unwrap().view(), GuardView::Protected);
    gateway.sign_out();
    assert_eq!(state.lock().unwrap().view(), GuardView::Redirect);
}

#[test]
fn unsubscribe_runs_once_per_mount_with_no_notifications() {
    let gateway = FakeGateway::new();
    let (_state, sub) = mount_guard(&gateway);
    sub.unsubscribe();
    drop(sub);
    assert_eq!(gateway.unsubscribe_count(), 1);
    assert_eq!(gateway.hub.observer_count(), 0);
}

#[test]
fn unsubscribe_runs_once_per_mount_with_many_notifications() {
    let gateway = FakeGateway::new();
    for cycle in 1..=3 {
        let (_state, sub) = mount_guard(&gateway);
        gateway.hub.publish(Some(session("u1")));
        gateway.hub.publish(None);
        gateway.hub.publish(Some(session("u2")));
        sub.unsubscribe();
        assert_eq!(gateway.unsubscribe_count(), cycle);
    }
    assert_eq!(gateway.hub.observer_count(), 0);
}

#[test]
fn dropping_without_explicit_unsubscribe_still_releases() {
    let gateway = FakeGateway::new();
    {
        let (_state, _sub) = mount_guard(&gateway);
    }
    assert_eq!(gateway.unsubscribe_count(), 1);
}
