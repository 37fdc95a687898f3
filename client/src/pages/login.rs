//! Public entry page: sign-in, sign-up, Google sign-in, and password reset.
//!
//! SYSTEM CONTEXT
//! ==============
//! Mounted at `/`. All form state is local to this page and starts over on
//! reload. Each button snapshots the form, runs one future from
//! `net::actions`, and applies the outcome with `FormState::finish`.
//!
//! When Google redirects back to `/`, the token arrives in the URL fragment;
//! an effect picks it up after hydration and finishes the sign-in.

#[cfg(test)]
#[path = "login_test.rs"]
mod login_test;

use std::future::Future;
use std::sync::Arc;

use leptos::prelude::*;
use leptos_router::components::A;

use crate::components::feedback_banner::FeedbackBanner;
use crate::components::password_field::PasswordField;
use crate::net::actions::{self, ActionError, ActionSuccess};
use crate::net::firebase::FirebaseGateway;
use crate::net::gateway::AuthGateway;
use crate::net::types::Session;
use crate::state::form::{FormMode, FormState};

/// Mode-dependent labels.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct ModeCopy {
    pub heading: &'static str,
    pub submit: &'static str,
    pub toggle_prompt: &'static str,
    pub toggle_action: &'static str,
}

pub(crate) fn mode_copy(mode: FormMode) -> ModeCopy {
    match mode {
        FormMode::SignIn => ModeCopy {
            heading: "Login",
            submit: "Entrar",
            toggle_prompt: "Não tem conta?",
            toggle_action: "Cadastre-se",
        },
        FormMode::SignUp => ModeCopy {
            heading: "Cadastro",
            submit: "Cadastrar",
            toggle_prompt: "Já possui conta?",
            toggle_action: "Faça login",
        },
    }
}

/// Run `action` unless another request is outstanding.
fn run_action<F>(form: RwSignal<FormState>, action: F)
where
    F: Future<Output = Result<ActionSuccess, ActionError>> + 'static,
{
    if !form.try_update(FormState::begin_request).unwrap_or(false) {
        return;
    }

    #[cfg(feature = "hydrate")]
    leptos::task::spawn_local(async move {
        let result = action.await;
        let _ = form.try_update(|f| f.finish(result));
    });

    #[cfg(not(feature = "hydrate"))]
    {
        drop(action);
        form.update(|f| f.busy = false);
    }
}

#[component]
pub fn LoginPage() -> impl IntoView {
    let gateway = expect_context::<FirebaseGateway>();
    let form = RwSignal::new(FormState::default());
    let session = RwSignal::new(None::<Session>);

    let subscription = gateway.on_auth_state_changed(Arc::new(move |current: Option<&Session>| {
        let _ = session.try_set(current.cloned());
    }));
    on_cleanup(move || subscription.unsubscribe());

    #[cfg(feature = "hydrate")]
    {
        // A page restored from the back-forward cache after leaving for the
        // provider would otherwise stay busy.
        let pageshow = window_event_listener(leptos::ev::pageshow, move |ev: web_sys::PageTransitionEvent| {
            if ev.persisted() {
                let _ = form.try_update(FormState::abandon_request);
            }
        });
        on_cleanup(move || pageshow.remove());

        let gateway = gateway.clone();
        Effect::new(move || {
            if let Some(callback) = crate::util::browser::take_provider_callback() {
                let gateway = gateway.clone();
                run_action(form, async move { actions::complete_provider_sign_in(&gateway, &callback).await });
            }
        });
    }

    let on_submit = {
        let gateway = gateway.clone();
        move |ev: leptos::ev::SubmitEvent| {
            ev.prevent_default();
            let creds = form.with_untracked(FormState::credentials);
            let gateway = gateway.clone();
            run_action(form, async move {
                actions::submit(&gateway, &creds, time::OffsetDateTime::now_utc()).await
            });
        }
    };

    let on_google = {
        let gateway = gateway.clone();
        move |_: leptos::ev::MouseEvent| {
            if !form.try_update(FormState::begin_request).unwrap_or(false) {
                return;
            }
            let gateway = gateway.clone();
            #[cfg(feature = "hydrate")]
            leptos::task::spawn_local(async move {
                // On success the browser is navigating away; keep the form busy.
                if let Err(e) = actions::sign_in_with_provider(&gateway).await {
                    let _ = form.try_update(|f| f.finish(Err(e)));
                }
            });
            #[cfg(not(feature = "hydrate"))]
            {
                drop(gateway);
                form.update(|f| f.busy = false);
            }
        }
    };

    let on_forgot = move |_: leptos::ev::MouseEvent| {
        let email = form.with_untracked(|f| f.email.clone());
        let gateway = gateway.clone();
        run_action(form, async move { actions::request_password_reset(&gateway, &email).await });
    };

    let mode = move || form.with(|f| f.mode);
    let busy = move || form.with(|f| f.busy);
    let copy = move || mode_copy(mode());

    view! {
        <div class="login-page">
            <div class="login-hero">
                <p class="login-hero__title">"Bem-vindo ao Flow 360"</p>
                <p class="login-hero__subtitle">"Gerencie facilmente seus investimentos"</p>
            </div>
            <div class="login-card">
                <h1>{move || copy().heading}</h1>

                <FeedbackBanner feedback=Signal::derive(move || form.with(|f| f.feedback.clone()))/>

                <Show when=move || session.with(Option::is_some)>
                    <p class="login-message">
                        <A href="/dashboard">"Ir para o painel"</A>
                    </p>
                </Show>

                <button class="login-button login-button--google" type="button" disabled=busy on:click=on_google>
                    "Continuar com Google"
                </button>

                <div class="login-divider"><span>"ou"</span></div>

                <form class="login-form" on:submit=on_submit>
                    <Show when=move || mode() == FormMode::SignUp>
                        <label class="login-label">
                            "Nome"
                            <input
                                class="login-input"
                                type="text"
                                placeholder="Seu nome completo"
                                required=true
                                prop:value=move || form.with(|f| f.name.clone())
                                on:input=move |ev| form.update(|f| f.name = event_target_value(&ev))
                            />
                        </label>
                    </Show>
                    <label class="login-label">
                        "Email"
                        <input
                            class="login-input"
                            type="email"
                            placeholder="voce@exemplo.com"
                            required=true
                            prop:value=move || form.with(|f| f.email.clone())
                            on:input=move |ev| form.update(|f| f.email = event_target_value(&ev))
                        />
                    </label>
                    <label class="login-label">
                        "Senha"
                        <PasswordField form=form/>
                    </label>
                    <button class="login-button" type="submit" disabled=busy>
                        {move || copy().submit}
                    </button>
                </form>

                <Show when=move || mode() == FormMode::SignIn>
                    <div class="login-forgot">
                        <button class="login-link" type="button" disabled=busy on:click=on_forgot.clone()>
                            "Esqueci minha senha"
                        </button>
                    </div>
                </Show>

                <p class="login-toggle">
                    {move || copy().toggle_prompt}
                    " "
                    <button class="login-link" type="button" on:click=move |_| form.update(FormState::toggle_mode)>
                        {move || copy().toggle_action}
                    </button>
                </p>
            </div>
        </div>
    }
}
