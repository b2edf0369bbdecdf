//! Common test utilities for integration tests.

use account_onboarding::{AccountClient, DeviceInfo, RegistrationForm};
use secrecy::SecretString;
use std::sync::Arc;
use std::time::Duration;
use wiremock::MockServer;

/// Create an account client configured for a mock server.
pub fn test_client(mock_server: &MockServer) -> Arc<AccountClient> {
    Arc::new(AccountClient::new(mock_server.uri(), Duration::from_secs(5)).unwrap())
}

pub fn test_device() -> DeviceInfo {
    DeviceInfo {
        app_version: "1.0".into(),
        device_model: "iPhone".into(),
        os_version: "17.0".into(),
        device_token: String::new(),
    }
}

pub fn valid_form() -> RegistrationForm {
    RegistrationForm {
        first_name: "Jane".into(),
        last_name: "Smith".into(),
        email: "jane.smith@example.com".into(),
        password: SecretString::new("Secret123".into()),
        confirm_password: SecretString::new("Secret123".into()),
        phone: "98765432".into(),
        dob: "1992-03-04".into(),
        gender: "female".into(),
        ..RegistrationForm::default()
    }
}
