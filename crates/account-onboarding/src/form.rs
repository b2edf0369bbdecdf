//! Caller-owned registration input.

use secrecy::SecretString;

/// Country calling code used when the caller does not pick one.
pub const DEFAULT_PHONE_CODE: &str = "965";

/// Raw registration fields as typed by the user.
///
/// Built per submission attempt and never persisted. Password fields are
/// secrets so they stay out of `Debug` output and logs.
#[derive(Debug)]
pub struct RegistrationForm {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: SecretString,
    pub confirm_password: SecretString,
    pub phone: String,
    pub phone_code: String,
    pub dob: String,
    pub gender: String,
    pub newsletter_subscribed: bool,
}

impl Default for RegistrationForm {
    fn default() -> Self {
        Self {
            first_name: String::new(),
            last_name: String::new(),
            email: String::new(),
            password: SecretString::new(String::new()),
            confirm_password: SecretString::new(String::new()),
            phone: String::new(),
            phone_code: DEFAULT_PHONE_CODE.into(),
            dob: String::new(),
            gender: String::new(),
            newsletter_subscribed: false,
        }
    }
}
