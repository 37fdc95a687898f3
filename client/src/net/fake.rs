//! In-memory gateway for unit tests.
//!
//! Records every call in order and replays scripted results. Auth-state
//! subscriptions go through a real [`SessionHub`] so tests can drive
//! notifications explicitly.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use super::gateway::{AuthGateway, DocumentStore, GatewayError, ProviderCallback};
use super::session::{AuthObserver, SessionHub, Subscription};
use super::types::{Fields, Session};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Call {
    SignIn { email: String, password: String },
    SignUp { email: String, password: String },
    BeginProvider,
    CompleteProvider,
    PasswordReset { email: String },
    WriteDocument { collection: String, id: String, fields: Fields },
    SignOut,
}

#[derive(Default)]
pub struct FakeGateway {
    pub hub: SessionHub,
    calls: RefCell<Vec<Call>>,
    auth_results: RefCell<VecDeque<Result<Session, GatewayError>>>,
    unit_results: RefCell<VecDeque<Result<(), GatewayError>>>,
    write_results: RefCell<VecDeque<Result<(), GatewayError>>>,
    unsubscribes: Arc<AtomicUsize>,
}

pub fn session(uid: &str) -> Session {
    Session {
        id_token: format!("id-{uid}"),
        refresh_token: format!("refresh-{uid}"),
        user_id: uid.to_owned(),
        email: Some(format!("{uid}@x.com")),
    }
}

impl FakeGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue the result of the next sign-in, sign-up, or provider completion.
    pub fn push_auth(&self, result: Result<Session, GatewayError>) -> &Self {
        self.auth_results.borrow_mut().push_back(result);
        self
    }

    /// Queue the result of the next provider start or password reset.
    pub fn push_unit(&self, result: Result<(), GatewayError>) -> &Self {
        self.unit_results.borrow_mut().push_back(result);
        self
    }

    /// Queue the result of the next document write.
    pub fn push_write(&self, result: Result<(), GatewayError>) -> &Self {
        self.write_results.borrow_mut().push_back(result);
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    pub fn network_calls(&self) -> usize {
        self.calls.borrow().iter().filter(|c| !matches!(c, Call::SignOut)).count()
    }

    pub fn unsubscribe_count(&self) -> usize {
        self.unsubscribes.load(Ordering::SeqCst)
    }

    fn record(&self, call: Call) {
        self.calls.borrow_mut().push(call);
    }

    fn next_auth(&self) -> Result<Session, GatewayError> {
        let result = self
            .auth_results
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Ok(session("uid-default")));
        if let Ok(session) = &result {
            self.hub.publish(Some(session.clone()));
        }
        result
    }
}

#[async_trait(?Send)]
impl AuthGateway for FakeGateway {
    async fn sign_in(&self, email: &str, password: &str) -> Result<Session, GatewayError> {
        self.record(Call::SignIn { email: email.to_owned(), password: password.to_owned() });
        self.next_auth()
    }

    async fn sign_up(&self, email: &str, password: &str) -> Result<Session, GatewayError> {
        self.record(Call::SignUp { email: email.to_owned(), password: password.to_owned() });
        self.next_auth()
    }

    async fn begin_provider_sign_in(&self) -> Result<(), GatewayError> {
        self.record(Call::BeginProvider);
        self.unit_results.borrow_mut().pop_front().unwrap_or(Ok(()))
    }

    async fn complete_provider_sign_in(&self, _callback: &ProviderCallback) -> Result<Session, GatewayError> {
        self.record(Call::CompleteProvider);
        self.next_auth()
    }

    async fn send_password_reset(&self, email: &str) -> Result<(), GatewayError> {
        self.record(Call::PasswordReset { email: email.to_owned() });
        self.unit_results.borrow_mut().pop_front().unwrap_or(Ok(()))
    }

    fn sign_out(&self) {
        self.record(Call::SignOut);
        self.hub.publish(None);
    }

    fn current_session(&self) -> Option<Session> {
        self.hub.current()
    }

    fn on_auth_state_changed(&self, observer: AuthObserver) -> Subscription {
        let inner = self.hub.subscribe(observer);
        let counter = Arc::clone(&self.unsubscribes);
        Subscription::new(move || {
            counter.fetch_add(1, Ordering::SeqCst);
            inner.unsubscribe();
        })
    }
}

#[async_trait(?Send)]
impl DocumentStore for FakeGateway {
    async fn write_document(
        &self,
        _session: &Session,
        collection: &str,
        id: &str,
        fields: &Fields,
    ) -> Result<(), GatewayError> {
        self.record(Call::WriteDocument {
            collection: collection.to_owned(),
            id: id.to_owned(),
            fields: fields.clone(),
        });
        self.write_results.borrow_mut().pop_front().unwrap_or(Ok(()))
    }
}
