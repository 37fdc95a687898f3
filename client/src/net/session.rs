//! Client-side session ownership and auth-state fan-out.
//!
//! SYSTEM CONTEXT
//! ==============
//! The REST identity endpoints are stateless, so something in the client has
//! to hold the current session and tell interested components when it
//! changes. `SessionHub` is that owner: the gateway publishes into it, route
//! guards subscribe to it.
//!
//! DESIGN
//! ======
//! Observers are not called until the hub is *settled*, i.e. until the
//! stored session has been restored (or a session has been published). This
//! gives subscribers a defined "checking" window before the first
//! notification. Observers always run outside the registry lock so they may
//! subscribe or publish re-entrantly.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use std::sync::{Arc, Mutex, PoisonError, Weak};

use super::types::Session;

/// Callback invoked with the current session (`None` when signed out).
pub type AuthObserver = Arc<dyn Fn(Option<&Session>) + Send + Sync>;

#[derive(Default)]
struct HubInner {
    current: Option<Session>,
    settled: bool,
    next_id: u64,
    observers: Vec<(u64, AuthObserver)>,
}

/// Shared owner of the current session and its observers.
#[derive(Clone, Default)]
pub struct SessionHub {
    inner: Arc<Mutex<HubInner>>,
}

impl SessionHub {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an observer. If the hub is already settled the observer is
    /// called immediately with the current session.
    pub fn subscribe(&self, observer: AuthObserver) -> Subscription {
        let (id, initial) = {
            let mut inner = self.lock();
            let id = inner.next_id;
            inner.next_id += 1;
            inner.observers.push((id, Arc::clone(&observer)));
            (id, inner.settled.then(|| inner.current.clone()))
        };
        if let Some(session) = initial {
            observer(session.as_ref());
        }

        let hub = Arc::downgrade(&self.inner);
        Subscription::new(move || remove_observer(&hub, id))
    }

    /// Settle the hub with the session found in storage.
    ///
    /// Only the first settle has an effect; a session published before the
    /// restore completes wins over the stored one.
    pub fn restore(&self, stored: Option<Session>) {
        {
            let mut inner = self.lock();
            if inner.settled {
                return;
            }
            inner.settled = true;
            inner.current = stored;
        }
        self.notify();
    }

    /// Replace the current session and notify every observer.
    pub fn publish(&self, session: Option<Session>) {
        {
            let mut inner = self.lock();
            inner.settled = true;
            inner.current = session;
        }
        self.notify();
    }

    pub fn current(&self) -> Option<Session> {
        self.lock().current.clone()
    }

    pub fn is_settled(&self) -> bool {
        self.lock().settled
    }

    pub fn observer_count(&self) -> usize {
        self.lock().observers.len()
    }

    fn notify(&self) {
        let (session, observers) = {
            let inner = self.lock();
            let observers: Vec<AuthObserver> = inner.observers.iter().map(|(_, o)| Arc::clone(o)).collect();
            (inner.current.clone(), observers)
        };
        for observer in observers {
            observer(session.as_ref());
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HubInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn remove_observer(hub: &Weak<Mutex<HubInner>>, id: u64) {
    let Some(inner) = hub.upgrade() else {
        return;
    };
    let mut inner = inner.lock().unwrap_or_else(PoisonError::into_inner);
    inner.observers.retain(|(observer_id, _)| *observer_id != id);
}

type Disposer = Box<dyn FnOnce() + Send>;

/// Handle returned by a subscription; releases the registration exactly once.
///
/// Call [`Subscription::unsubscribe`] on teardown. Dropping the handle
/// releases it too, so no exit path leaks the observer.
pub struct Subscription {
    disposer: Mutex<Option<Disposer>>,
}

impl Subscription {
    pub fn new(disposer: impl FnOnce() + Send + 'static) -> Self {
        Self { disposer: Mutex::new(Some(Box::new(disposer))) }
    }

    /// Deregister the observer. Later calls are no-ops.
    pub fn unsubscribe(&self) {
        let disposer = self.disposer.lock().unwrap_or_else(PoisonError::into_inner).take();
        if let Some(dispose) = disposer {
            dispose();
        }
    }

    pub fn is_active(&self) -> bool {
        self.disposer.lock().unwrap_or_else(PoisonError::into_inner).is_some()
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.unsubscribe();
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription").field("active", &self.is_active()).finish()
    }
}
