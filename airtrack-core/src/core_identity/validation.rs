//! Validation module
//!
//! Stateless checks for the login and registration forms.

use crate::core_store::store::errors::FieldErrors;
use regex::Regex;
use std::sync::LazyLock;

/// Minimum password length accepted by the forms
pub const MIN_PASSWORD_LEN: usize = 6;

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\S+@\S+\.\S+").expect("valid regex"));

/// Registration form as submitted
#[derive(Debug, Clone, Default)]
pub struct Registration {
    pub username: String,
    pub email: String,
    pub password: String,
    pub invite_code: String,
    pub telegram_username: String,
}

fn check_credentials(errors: &mut FieldErrors, email: &str, password: &str) {
    if email.trim().is_empty() {
        errors.add("email", "Email is required");
    } else if !EMAIL_RE.is_match(email) {
        errors.add("email", "Email is invalid");
    }

    if password.trim().is_empty() {
        errors.add("password", "Password is required");
    } else if password.chars().count() < MIN_PASSWORD_LEN {
        errors.add("password", "Password must be at least 6 characters");
    }
}

/// Validate the login form
pub fn validate_login(email: &str, password: &str) -> Result<(), FieldErrors> {
    let mut errors = FieldErrors::new();
    check_credentials(&mut errors, email, password);
    errors.into_result()
}

/// Validate the registration form
pub fn validate_registration(form: &Registration) -> Result<(), FieldErrors> {
    let mut errors = FieldErrors::new();

    if form.username.trim().is_empty() {
        errors.add("username", "Username is required");
    }
    if form.invite_code.trim().is_empty() {
        errors.add("inviteCode", "Invite code is required");
    }
    if form.telegram_username.trim().is_empty() {
        errors.add("telegramUsername", "Telegram username is required");
    }
    check_credentials(&mut errors, &form.email, &form.password);

    errors.into_result()
}
