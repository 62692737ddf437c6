//! Local credential validation.
//!
//! Runs before anything else in a submission: no backend call, no rate
//! limit charge. Both fields are checked independently so a surface can
//! show every problem at once, and the per-field functions are public so
//! it can also validate on blur.

use serde::{Deserialize, Serialize};

/// Minimum password length, in characters.
pub const MIN_PASSWORD_CHARS: usize = 6;

// ---------------------------------------------------------------------------
// Field errors
// ---------------------------------------------------------------------------

/// Which input a [`FieldError`] belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Field {
    Email,
    Password,
}

/// A validation failure on a single input field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    /// The offending field.
    pub field: Field,
    /// User-facing message, ready to render next to the field.
    pub message: String,
}

impl FieldError {
    fn new(field: Field, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

impl std::fmt::Display for FieldError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Validates the email field.
///
/// The input is trimmed first. An empty result is "required"; otherwise
/// the address must contain no whitespace, exactly one `@` with a
/// non-empty local part, and a domain with an interior dot.
pub fn validate_email(email: &str) -> Result<(), FieldError> {
    let email = email.trim();
    if email.is_empty() {
        return Err(FieldError::new(Field::Email, "Email is required."));
    }
    if !is_valid_email(email) {
        return Err(FieldError::new(
            Field::Email,
            "Please enter a valid email address.",
        ));
    }
    Ok(())
}

/// Validates the password field.
///
/// A blank (or whitespace-only) password is "required"; otherwise it must
/// be at least [`MIN_PASSWORD_CHARS`] characters. The password itself is
/// never trimmed: leading and trailing whitespace are significant.
pub fn validate_password(password: &str) -> Result<(), FieldError> {
    if password.trim().is_empty() {
        return Err(FieldError::new(Field::Password, "Password is required."));
    }
    if password.chars().count() < MIN_PASSWORD_CHARS {
        return Err(FieldError::new(
            Field::Password,
            format!("Password must be at least {MIN_PASSWORD_CHARS} characters."),
        ));
    }
    Ok(())
}

/// Validates both fields, collecting every failure.
///
/// Returns `Ok(())` only when both fields pass; otherwise the errors, in
/// email-then-password order.
pub fn validate_credentials(email: &str, password: &str) -> Result<(), Vec<FieldError>> {
    let mut errors = Vec::new();
    if let Err(e) = validate_email(email) {
        errors.push(e);
    }
    if let Err(e) = validate_password(password) {
        errors.push(e);
    }
    if errors.is_empty() { Ok(()) } else { Err(errors) }
}

/// Structural email check on an already-trimmed input.
fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    // The domain needs an interior dot: "x.y", not ".y" or "x.".
    match domain.rfind('.') {
        Some(i) => i > 0 && i < domain.len() - 1,
        None => false,
    }
}
