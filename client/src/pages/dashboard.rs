//! Protected landing page for a signed-in user.
//!
//! Only rendered inside `PrivateRoute`, so a session is present on mount.
//! Signing out notifies the guard, which redirects back to `/`.

use leptos::prelude::*;

use crate::net::firebase::FirebaseGateway;
use crate::net::gateway::AuthGateway;

#[component]
pub fn DashboardPage() -> impl IntoView {
    let gateway = expect_context::<FirebaseGateway>();
    let email = gateway
        .current_session()
        .and_then(|session| session.email)
        .unwrap_or_default();

    let on_sign_out = move |_: leptos::ev::MouseEvent| {
        log::info!("signing out");
        gateway.sign_out();
    };

    view! {
        <div class="dashboard-page">
            <header class="dashboard-header">
                <h1>"Flow 360"</h1>
                <span class="dashboard-header__user">{email}</span>
                <button class="dashboard-header__signout" type="button" on:click=on_sign_out>
                    "Sair"
                </button>
            </header>
            <p class="dashboard-welcome">"Gerencie facilmente seus investimentos"</p>
        </div>
    }
}
