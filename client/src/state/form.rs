//! Local state of the credential form.
//!
//! DESIGN
//! ======
//! Feedback is a single `Option<Feedback>`, so an error and a success message
//! can never be shown together. Nothing here is persisted; a reload starts
//! from `FormState::default()`.

#[cfg(test)]
#[path = "form_test.rs"]
mod form_test;

use crate::net::actions::{ActionError, ActionSuccess, Credentials};

/// Which credential flow the form submits.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FormMode {
    #[default]
    SignIn,
    SignUp,
}

/// Message shown above the form.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Feedback {
    Error(String),
    Success(String),
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FormState {
    pub mode: FormMode,
    pub name: String,
    pub email: String,
    pub password: String,
    pub show_password: bool,
    pub feedback: Option<Feedback>,
    /// A gateway request is outstanding.
    pub busy: bool,
}

impl FormState {
    /// Switch between sign-in and sign-up; clears any message.
    pub fn toggle_mode(&mut self) {
        self.mode = match self.mode {
            FormMode::SignIn => FormMode::SignUp,
            FormMode::SignUp => FormMode::SignIn,
        };
        self.feedback = None;
    }

    pub fn toggle_password_visibility(&mut self) {
        self.show_password = !self.show_password;
    }

    /// Start a request: clears feedback and marks the form busy.
    ///
    /// Returns `false` (and changes nothing) if a request is already
    /// outstanding.
    pub fn begin_request(&mut self) -> bool {
        if self.busy {
            return false;
        }
        self.feedback = None;
        self.busy = true;
        true
    }

    /// Drop the in-flight mark without a message, for a request whose outcome
    /// will never arrive (the page was restored after leaving for the
    /// provider).
    pub fn abandon_request(&mut self) {
        self.busy = false;
    }

    /// Apply the result of a request started with [`FormState::begin_request`].
    pub fn finish(&mut self, result: Result<ActionSuccess, ActionError>) {
        self.busy = false;
        match result {
            Ok(success) => {
                if success.clear_credentials {
                    self.name.clear();
                    self.email.clear();
                    self.password.clear();
                }
                self.feedback = Some(Feedback::Success(success.message.to_owned()));
            }
            Err(err) => {
                self.feedback = Some(Feedback::Error(err.user_message().to_owned()));
            }
        }
    }

    /// Snapshot of the fields a submit needs.
    pub fn credentials(&self) -> Credentials {
        Credentials {
            mode: self.mode,
            name: self.name.clone(),
            email: self.email.clone(),
            password: self.password.clone(),
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        match &self.feedback {
            Some(Feedback::Error(msg)) => Some(msg),
            _ => None,
        }
    }

    pub fn success_message(&self) -> Option<&str> {
        match &self.feedback {
            Some(Feedback::Success(msg)) => Some(msg),
            _ => None,
        }
    }
}
