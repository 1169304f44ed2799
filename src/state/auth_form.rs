use std::fmt;

use crate::core::validate::{Field, FieldErrors, validate_credentials};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthMode {
    SignIn,
    SignUp,
}

/// Credentials that passed validation and are ready to send.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}

/// Sign-in or registration form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthForm {
    pub mode: AuthMode,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub errors: FieldErrors,
    pub submitting: bool,
}

impl AuthForm {
    pub fn new(mode: AuthMode) -> Self {
        Self {
            mode,
            email: String::new(),
            password: String::new(),
            confirm_password: String::new(),
            errors: FieldErrors::new(),
            submitting: false,
        }
    }

    pub fn set_email(&mut self, value: String) {
        self.email = value;
        self.errors.clear(Field::Email);
    }

    pub fn set_password(&mut self, value: String) {
        self.password = value;
        self.errors.clear(Field::Password);
    }

    pub fn set_confirm_password(&mut self, value: String) {
        self.confirm_password = value;
        self.errors.clear(Field::ConfirmPassword);
    }

    /// Validate and mark the form in flight. `None` if a request is already
    /// running or a field is invalid (errors are then populated).
    pub fn submit(&mut self) -> Option<Credentials> {
        if self.submitting {
            return None;
        }

        let confirm = match self.mode {
            AuthMode::SignIn => None,
            AuthMode::SignUp => Some(self.confirm_password.as_str()),
        };
        self.errors = validate_credentials(&self.email, &self.password, confirm);
        if !self.errors.is_empty() {
            return None;
        }

        self.submitting = true;
        Some(Credentials {
            email: self.email.clone(),
            password: self.password.clone(),
        })
    }

    /// The backend refused; keep what was typed and allow another attempt.
    pub fn failed(&mut self) {
        self.submitting = false;
    }
}
