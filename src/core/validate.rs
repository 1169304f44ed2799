//! Field-level validation for the task and account forms.
//!
//! Both validators are pure: the current day is passed in, nothing is read
//! from the clock or the network. An empty [`FieldErrors`] means the form can
//! be submitted.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;

use super::task::TaskForm;

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\S+@\S+\.\S+").unwrap());

pub const MIN_PASSWORD_LEN: usize = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    Title,
    DueDate,
    Email,
    Password,
    ConfirmPassword,
}

impl Field {
    /// Form field name, matching the backend column where there is one.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::DueDate => "due_date",
            Self::Email => "email",
            Self::Password => "password",
            Self::ConfirmPassword => "confirmPassword",
        }
    }
}

/// Mapping of field to error message. A missing key means the field is valid.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(BTreeMap<Field, String>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, field: Field, message: impl Into<String>) {
        self.0.insert(field, message.into());
    }

    pub fn get(&self, field: Field) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    pub fn contains(&self, field: Field) -> bool {
        self.0.contains_key(&field)
    }

    /// Drop the error for one field, used when the user edits it.
    pub fn clear(&mut self, field: Field) {
        self.0.remove(&field);
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn fields(&self) -> impl Iterator<Item = Field> + '_ {
        self.0.keys().copied()
    }
}

/// Validate a task form against `today` (day granularity).
pub fn validate_task(form: &TaskForm, today: NaiveDate) -> FieldErrors {
    let mut errors = FieldErrors::new();

    if form.title.trim().is_empty() {
        errors.insert(Field::Title, "Title is required");
    }

    match form.parsed_due_date() {
        Ok(Some(due)) if due < today => {
            errors.insert(Field::DueDate, "Due date cannot be in the past");
        }
        Ok(_) => {}
        Err(_) => {
            errors.insert(Field::DueDate, "Due date must be a valid date (YYYY-MM-DD)");
        }
    }

    errors
}

/// Validate sign-in (`confirm_password = None`) or registration credentials.
pub fn validate_credentials(
    email: &str,
    password: &str,
    confirm_password: Option<&str>,
) -> FieldErrors {
    let mut errors = FieldErrors::new();

    if email.is_empty() {
        errors.insert(Field::Email, "Email is required");
    } else if !EMAIL_RE.is_match(email) {
        errors.insert(Field::Email, "Email is invalid");
    }

    if password.is_empty() {
        errors.insert(Field::Password, "Password is required");
    } else if password.chars().count() < MIN_PASSWORD_LEN {
        errors.insert(Field::Password, "Password must be at least 6 characters");
    }

    if let Some(confirm) = confirm_password {
        if confirm.is_empty() {
            errors.insert(Field::ConfirmPassword, "Please confirm your password");
        } else if confirm != password {
            errors.insert(Field::ConfirmPassword, "Passwords do not match");
        }
    }

    errors
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 5, 14).unwrap()
    }

    fn form(title: &str, due: &str) -> TaskForm {
        TaskForm {
            title: title.into(),
            due_date: due.into(),
            ..TaskForm::default()
        }
    }

    #[test]
    fn empty_title_only_error() {
        let errors = validate_task(&form("", ""), today());
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.get(Field::Title), Some("Title is required"));
    }

    #[test]
    fn whitespace_title_is_empty() {
        let errors = validate_task(&form("   \t", ""), today());
        assert!(errors.contains(Field::Title));
    }

    #[test]
    fn due_yesterday_rejected_today_accepted() {
        let yesterday = (today() - Duration::days(1)).format("%Y-%m-%d").to_string();
        let errors = validate_task(&form("Buy milk", &yesterday), today());
        assert_eq!(errors.get(Field::DueDate), Some("Due date cannot be in the past"));

        let same_day = today().format("%Y-%m-%d").to_string();
        let errors = validate_task(&form("Buy milk", &same_day), today());
        assert!(!errors.contains(Field::DueDate));
        assert!(errors.is_empty());
    }

    #[test]
    fn garbage_due_date_rejected() {
        let errors = validate_task(&form("Buy milk", "next tuesday"), today());
        assert!(errors.contains(Field::DueDate));
        assert!(!errors.contains(Field::Title));
    }

    #[test]
    fn bad_email_only() {
        let errors = validate_credentials("bad-email", "123456", Some("123456"));
        assert_eq!(errors.fields().collect::<Vec<_>>(), vec![Field::Email]);
        assert_eq!(errors.get(Field::Email), Some("Email is invalid"));
    }

    #[test]
    fn mismatched_confirmation_only() {
        let errors = validate_credentials("a@b.com", "abcdef", Some("xyz"));
        assert_eq!(errors.fields().collect::<Vec<_>>(), vec![Field::ConfirmPassword]);
        assert_eq!(errors.get(Field::ConfirmPassword), Some("Passwords do not match"));
    }

    #[test]
    fn sign_in_skips_confirmation() {
        let errors = validate_credentials("a@b.com", "abcdef", None);
        assert!(errors.is_empty());
    }

    #[test]
    fn required_messages() {
        let errors = validate_credentials("", "", Some(""));
        assert_eq!(errors.get(Field::Email), Some("Email is required"));
        assert_eq!(errors.get(Field::Password), Some("Password is required"));
        assert_eq!(
            errors.get(Field::ConfirmPassword),
            Some("Please confirm your password")
        );
    }

    #[test]
    fn short_password() {
        let errors = validate_credentials("a@b.com", "abc", None);
        assert_eq!(
            errors.get(Field::Password),
            Some("Password must be at least 6 characters")
        );
    }

    #[test]
    fn clear_removes_single_field() {
        let mut errors = validate_credentials("", "", None);
        errors.clear(Field::Email);
        assert!(!errors.contains(Field::Email));
        assert!(errors.contains(Field::Password));
    }

    #[test]
    fn field_names() {
        assert_eq!(Field::DueDate.name(), "due_date");
        assert_eq!(Field::ConfirmPassword.name(), "confirmPassword");
    }
}
