//! Single error-or-success message above the credential form.

use leptos::prelude::*;

use crate::state::form::Feedback;

#[component]
pub fn FeedbackBanner(#[prop(into)] feedback: Signal<Option<Feedback>>) -> impl IntoView {
    move || {
        feedback.get().map(|feedback| {
            let (class, text) = match feedback {
                Feedback::Error(text) => ("login-message login-message--error", text),
                Feedback::Success(text) => ("login-message login-message--success", text),
            };
            view! { <p class=class role="status">{text}</p> }
        })
    }
}
