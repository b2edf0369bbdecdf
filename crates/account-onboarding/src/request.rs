//! Mapping from validated form input to wire requests.

use crate::form::RegistrationForm;
use account_client::{
    OtpVerificationRequest, RegistrationRequest, ResendCodeRequest, DEVICE_TYPE,
};
use secrecy::{ExposeSecret, SecretString};

/// App and device metadata sent with a registration.
///
/// Supplied by the caller; the core never probes the host for it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeviceInfo {
    pub app_version: String,
    pub device_model: String,
    pub os_version: String,
    /// Push notification token, empty when unknown.
    pub device_token: String,
}

pub fn build_registration_request(
    form: &RegistrationForm,
    device: &DeviceInfo,
) -> RegistrationRequest {
    RegistrationRequest {
        app_version: device.app_version.clone(),
        device_model: device.device_model.clone(),
        device_token: device.device_token.clone(),
        device_type: DEVICE_TYPE.into(),
        dob: form.dob.clone(),
        email: form.email.clone(),
        first_name: form.first_name.clone(),
        gender: form.gender.clone(),
        last_name: form.last_name.clone(),
        newsletter_subscribed: u8::from(form.newsletter_subscribed),
        os_version: device.os_version.clone(),
        password: SecretString::new(form.password.expose_secret().clone()),
        phone: form.phone.clone(),
        phone_code: form.phone_code.clone(),
    }
}

pub fn build_otp_request(otp: &str, user_id: &str) -> OtpVerificationRequest {
    OtpVerificationRequest {
        otp: otp.into(),
        user_id: user_id.into(),
    }
}

pub fn build_resend_request(user_id: &str) -> ResendCodeRequest {
    ResendCodeRequest {
        user_id: user_id.into(),
    }
}
