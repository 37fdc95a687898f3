//! Route guard that only renders its children for a signed-in user.
//!
//! SYSTEM CONTEXT
//! ==============
//! Wraps protected routes in `app.rs`. The guard subscribes to the gateway's
//! auth stream on mount and releases the subscription in `on_cleanup`; the
//! `Subscription` drop covers any teardown that skips cleanup.

use std::sync::Arc;

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::components::Redirect;

use crate::net::firebase::FirebaseGateway;
use crate::net::gateway::AuthGateway;
use crate::net::types::Session;
use crate::state::auth::{GuardState, GuardView};

#[component]
pub fn PrivateRoute(children: ChildrenFn) -> impl IntoView {
    let gateway = expect_context::<FirebaseGateway>();
    let guard = RwSignal::new(GuardState::default());

    guard.update(GuardState::mount);
    let subscription = gateway.on_auth_state_changed(Arc::new(move |session: Option<&Session>| {
        let _ = guard.try_update(|state| state.observe(session));
    }));
    on_cleanup(move || subscription.unsubscribe());

    move || match guard.with(GuardState::view) {
        GuardView::Placeholder => view! { <p class="route-guard__loading">"Carregando..."</p> }.into_any(),
        GuardView::Redirect => {
            let options = NavigateOptions { replace: true, ..NavigateOptions::default() };
            view! { <Redirect path="/" options=options/> }.into_any()
        }
        GuardView::Protected => children().into_any(),
    }
}
