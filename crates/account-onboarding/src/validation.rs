//! Field validation rules for the registration and verification forms.
//!
//! Every check is a pure function returning a [`ValidationOutcome`]. Checks
//! run in a fixed order and stop at the first rule a value breaks, so the
//! message always names the most basic problem first.

use crate::form::RegistrationForm;
use once_cell::sync::Lazy;
use regex::Regex;
use secrecy::ExposeSecret;
use unicode_segmentation::UnicodeSegmentation;

static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Z0-9a-z._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$")
        .expect("email regex should compile")
});

// Apostrophes and hyphens are rejected, so "O'Connor" fails.
static NAME_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-zA-Z\s]+$").expect("name regex should compile"));

static NON_DIGIT_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\D").expect("non-digit regex should compile"));

pub const MIN_NAME_LENGTH: usize = 2;
pub const MIN_PASSWORD_LENGTH: usize = 8;
pub const MIN_PHONE_DIGITS: usize = 8;
pub const MAX_PHONE_DIGITS: usize = 15;

/// Accepted lengths for a one-time code.
pub const OTP_LENGTHS: [usize; 2] = [5, 6];

pub const FIRST_NAME_LABEL: &str = "First name";
pub const LAST_NAME_LABEL: &str = "Last name";

/// Verdict for a single field.
///
/// An invalid outcome always carries a non-empty message and a valid one
/// never does.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationOutcome {
    error_message: Option<String>,
}

impl ValidationOutcome {
    pub fn valid() -> Self {
        Self {
            error_message: None,
        }
    }

    pub fn invalid(message: impl Into<String>) -> Self {
        let message = message.into();
        debug_assert!(!message.is_empty(), "invalid outcome needs a message");
        Self {
            error_message: Some(message),
        }
    }

    pub fn is_valid(&self) -> bool {
        self.error_message.is_none()
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }
}

/// Outcomes of every registration field, in check order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormValidation {
    outcomes: Vec<ValidationOutcome>,
}

impl FormValidation {
    pub fn outcomes(&self) -> &[ValidationOutcome] {
        &self.outcomes
    }

    pub fn is_valid(&self) -> bool {
        self.outcomes.iter().all(ValidationOutcome::is_valid)
    }

    /// Message of the first failing field, if any.
    pub fn first_error(&self) -> Option<&str> {
        self.outcomes
            .iter()
            .find_map(ValidationOutcome::error_message)
    }
}

pub fn validate_email(email: &str) -> ValidationOutcome {
    if email.is_empty() {
        return ValidationOutcome::invalid("Email is required");
    }

    if EMAIL_REGEX.is_match(email) {
        ValidationOutcome::valid()
    } else {
        ValidationOutcome::invalid("Please enter a valid email address")
    }
}

/// Validate a personal name; `field` is the label used in messages.
pub fn validate_name(name: &str, field: &str) -> ValidationOutcome {
    if name.is_empty() {
        return ValidationOutcome::invalid(format!("{} is required", field));
    }

    if visible_length(name) < MIN_NAME_LENGTH {
        return ValidationOutcome::invalid(format!(
            "{} must be at least {} characters long",
            field, MIN_NAME_LENGTH
        ));
    }

    if NAME_REGEX.is_match(name) {
        ValidationOutcome::valid()
    } else {
        ValidationOutcome::invalid(format!("{} should only contain letters and spaces", field))
    }
}

pub fn validate_password(password: &str) -> ValidationOutcome {
    if password.is_empty() {
        return ValidationOutcome::invalid("Password is required");
    }

    if visible_length(password) < MIN_PASSWORD_LENGTH {
        return ValidationOutcome::invalid(format!(
            "Password must be at least {} characters long",
            MIN_PASSWORD_LENGTH
        ));
    }

    let has_uppercase = password.chars().any(|c| c.is_ascii_uppercase());
    let has_lowercase = password.chars().any(|c| c.is_ascii_lowercase());
    let has_digit = password.chars().any(|c| c.is_ascii_digit());

    if has_uppercase && has_lowercase && has_digit {
        ValidationOutcome::valid()
    } else {
        ValidationOutcome::invalid(
            "Password must contain at least one uppercase letter, one lowercase letter, and one digit",
        )
    }
}

pub fn validate_confirm_password(confirm_password: &str, original: &str) -> ValidationOutcome {
    if confirm_password.is_empty() {
        return ValidationOutcome::invalid("Please confirm your password");
    }

    if confirm_password == original {
        ValidationOutcome::valid()
    } else {
        ValidationOutcome::invalid("Passwords do not match")
    }
}

/// Phone numbers may contain separators; only the digits are counted.
pub fn validate_phone(phone: &str) -> ValidationOutcome {
    if phone.is_empty() {
        return ValidationOutcome::invalid("Phone number is required");
    }

    let digits = digit_count(phone);
    if (MIN_PHONE_DIGITS..=MAX_PHONE_DIGITS).contains(&digits) {
        ValidationOutcome::valid()
    } else {
        ValidationOutcome::invalid(format!(
            "Phone number must be between {} and {} digits",
            MIN_PHONE_DIGITS, MAX_PHONE_DIGITS
        ))
    }
}

pub fn validate_otp(otp: &str) -> ValidationOutcome {
    if otp.is_empty() {
        return ValidationOutcome::invalid("OTP is required");
    }

    if OTP_LENGTHS.contains(&digit_count(otp)) {
        ValidationOutcome::valid()
    } else {
        ValidationOutcome::invalid("Please enter a valid OTP")
    }
}

/// Run every registration check in display order.
///
/// Order: first name, last name, email, password, confirm password, phone.
pub fn validate_registration_form(form: &RegistrationForm) -> FormValidation {
    let password = form.password.expose_secret();

    FormValidation {
        outcomes: vec![
            validate_name(&form.first_name, FIRST_NAME_LABEL),
            validate_name(&form.last_name, LAST_NAME_LABEL),
            validate_email(&form.email),
            validate_password(password),
            validate_confirm_password(form.confirm_password.expose_secret(), password),
            validate_phone(&form.phone),
        ],
    }
}

/// Length in user-perceived characters (extended grapheme clusters).
fn visible_length(value: &str) -> usize {
    value.graphemes(true).count()
}

fn digit_count(value: &str) -> usize {
    NON_DIGIT_REGEX.replace_all(value, "").chars().count()
}
