//! Password input with a show/hide toggle.

use leptos::prelude::*;

use crate::state::form::FormState;

#[component]
pub fn PasswordField(form: RwSignal<FormState>) -> impl IntoView {
    let visible = move || form.with(|f| f.show_password);

    view! {
        <div class="login-password">
            <input
                class="login-input"
                type=move || if visible() { "text" } else { "password" }
                placeholder="Senha"
                required=true
                prop:value=move || form.with(|f| f.password.clone())
                on:input=move |ev| form.update(|f| f.password = event_target_value(&ev))
            />
            <button
                class="login-password__toggle"
                type="button"
                aria-label=move || if visible() { "Ocultar senha" } else { "Mostrar senha" }
                on:click=move |_| form.update(FormState::toggle_password_visibility)
            >
                {move || if visible() { "Ocultar" } else { "Mostrar" }}
            </button>
        </div>
    }
}
