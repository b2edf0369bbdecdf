//! Request and response types for the account API.

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize, Serializer};

/// Platform family code the backend expects in `device_type`.
pub const DEVICE_TYPE: &str = "I";

/// Phrase the verify endpoint includes in its message when a code is accepted.
pub const OTP_CONFIRMATION_PHRASE: &str = "otp verified";

/// Body of `POST /register-new`.
#[derive(Debug, Serialize)]
pub struct RegistrationRequest {
    pub app_version: String,
    pub device_model: String,
    pub device_token: String,
    pub device_type: String,
    pub dob: String,
    pub email: String,
    pub first_name: String,
    pub gender: String,
    pub last_name: String,
    /// 1 when subscribed, 0 otherwise.
    pub newsletter_subscribed: u8,
    pub os_version: String,
    #[serde(serialize_with = "serialize_secret")]
    pub password: SecretString,
    pub phone: String,
    pub phone_code: String,
}

/// Response of `POST /register-new`.
#[derive(Debug, Clone, Deserialize)]
pub struct RegistrationResponse {
    pub success: bool,
    pub status: Option<i64>,
    #[serde(default)]
    pub message: String,
    pub data: Option<RegisteredUser>,
}

/// User record embedded in a successful registration response.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RegisteredUser {
    pub id: Option<i64>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub gender: Option<String>,
    pub dob: Option<String>,
    pub email: Option<String>,
    pub image: Option<String>,
    pub phone_code: Option<String>,
    pub phone: Option<String>,
    /// Verification code issued for the new account.
    pub code: Option<String>,
    pub is_phone_verified: Option<i64>,
    pub is_email_verified: Option<i64>,
    pub is_social_register: Option<i64>,
    pub social_register_type: Option<String>,
    pub device_token: Option<String>,
    pub device_type: Option<String>,
    pub device_model: Option<String>,
    pub app_version: Option<String>,
    pub os_version: Option<String>,
    pub push_enabled: Option<String>,
    pub newsletter_subscribed: Option<i64>,
    pub create_date: Option<String>,
}

/// Outcome of a registration call as seen by callers.
///
/// `user_id` and `verification_code` are only populated when the server
/// reported success and included them in its `data` object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistrationResult {
    pub success: bool,
    pub message: String,
    pub user_id: Option<String>,
    pub verification_code: Option<String>,
}

impl From<RegistrationResponse> for RegistrationResult {
    fn from(response: RegistrationResponse) -> Self {
        let data = if response.success {
            response.data
        } else {
            None
        };
        let (user_id, verification_code) = match data {
            Some(user) => (user.id.map(|id| id.to_string()), user.code),
            None => (None, None),
        };

        Self {
            success: response.success,
            message: response.message,
            user_id,
            verification_code,
        }
    }
}

/// Body of `POST /verify-code`.
#[derive(Debug, Clone, Serialize)]
pub struct OtpVerificationRequest {
    pub otp: String,
    pub user_id: String,
}

/// Response of `POST /verify-code`.
#[derive(Debug, Clone, Deserialize)]
pub struct OtpVerificationResponse {
    pub success: bool,
    #[serde(default)]
    pub message: String,
    pub data: Option<OtpCodeData>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OtpCodeData {
    pub id: Option<String>,
    pub code: Option<String>,
}

/// Verdict of a code verification.
///
/// The upstream `success` flag is true even for rejected codes, so the
/// verdict comes from the message text alone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OtpVerificationResult {
    pub verified: bool,
    pub message: String,
}

impl OtpVerificationResult {
    /// Derive the verdict from a server message.
    pub fn from_message(message: impl Into<String>) -> Self {
        let message = message.into();
        Self {
            verified: message.to_lowercase().contains(OTP_CONFIRMATION_PHRASE),
            message,
        }
    }
}

impl From<OtpVerificationResponse> for OtpVerificationResult {
    fn from(response: OtpVerificationResponse) -> Self {
        Self::from_message(response.message)
    }
}

/// Body of the resend-code request.
#[derive(Debug, Clone, Serialize)]
pub struct ResendCodeRequest {
    pub user_id: String,
}

/// Response of the resend-code request.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct ResendCodeResult {
    pub success: bool,
    #[serde(default)]
    pub message: String,
}

/// Minimal error body the API falls back to when a call fails.
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub message: String,
}

fn serialize_secret<S: Serializer>(secret: &SecretString, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(secret.expose_secret())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_request(newsletter_subscribed: u8) -> RegistrationRequest {
        RegistrationRequest {
            app_version: "1.0".into(),
            device_model: "iPhone".into(),
            device_token: String::new(),
            device_type: DEVICE_TYPE.into(),
            dob: "1990-01-01".into(),
            email: "test@example.com".into(),
            first_name: "John".into(),
            gender: "male".into(),
            last_name: "Doe".into(),
            newsletter_subscribed,
            os_version: "17.0".into(),
            password: SecretString::new("Password123".into()),
            phone: "12345678".into(),
            phone_code: "965".into(),
        }
    }

    #[test]
    fn test_registration_request_wire_keys() {
        let json = serde_json::to_value(sample_request(1)).unwrap();
        let object = json.as_object().unwrap();

        let mut keys: Vec<&str> = object.keys().map(String::as_str).collect();
        keys.sort_unstable();
        assert_eq!(
            keys,
            vec![
                "app_version",
                "device_model",
                "device_token",
                "device_type",
                "dob",
                "email",
                "first_name",
                "gender",
                "last_name",
                "newsletter_subscribed",
                "os_version",
                "password",
                "phone",
                "phone_code",
            ]
        );
        assert_eq!(json["newsletter_subscribed"], 1);
        assert_eq!(json["password"], "Password123");
        assert_eq!(json["device_type"], "I");
    }

    #[test]
    fn test_password_redacted_in_debug() {
        let debug = format!("{:?}", sample_request(0));
        assert!(!debug.contains("Password123"));
    }

    #[test]
    fn test_registration_result_extracts_nested_data() {
        let response: RegistrationResponse = serde_json::from_value(serde_json::json!({
            "success": true,
            "data": { "id": 42, "code": "98765" }
        }))
        .unwrap();

        let result = RegistrationResult::from(response);
        assert!(result.success);
        assert_eq!(result.message, "");
        assert_eq!(result.user_id.as_deref(), Some("42"));
        assert_eq!(result.verification_code.as_deref(), Some("98765"));
    }

    #[test]
    fn test_registration_result_null_data() {
        let response: RegistrationResponse = serde_json::from_value(serde_json::json!({
            "success": true,
            "message": "Registered",
            "data": null
        }))
        .unwrap();

        let result = RegistrationResult::from(response);
        assert_eq!(result.user_id, None);
        assert_eq!(result.verification_code, None);
    }

    #[test]
    fn test_registration_result_ignores_data_on_failure() {
        let response: RegistrationResponse = serde_json::from_value(serde_json::json!({
            "success": false,
            "status": 409,
            "message": "Email already exists",
            "data": { "id": 7, "code": "11111" }
        }))
        .unwrap();

        let result = RegistrationResult::from(response);
        assert!(!result.success);
        assert_eq!(result.message, "Email already exists");
        assert_eq!(result.user_id, None);
        assert_eq!(result.verification_code, None);
    }

    #[test]
    fn test_otp_verdict_from_message() {
        assert!(OtpVerificationResult::from_message("OTP verified successfully").verified);
        assert!(OtpVerificationResult::from_message("Your otp VERIFIED").verified);
        assert!(!OtpVerificationResult::from_message("Invalid code").verified);
        assert!(!OtpVerificationResult::from_message("").verified);
    }

    #[test]
    fn test_otp_verdict_ignores_success_flag() {
        let response: OtpVerificationResponse = serde_json::from_value(serde_json::json!({
            "success": true,
            "message": "Invalid code",
            "data": { "id": "5", "code": "12345" }
        }))
        .unwrap();

        let result = OtpVerificationResult::from(response);
        assert!(!result.verified);
        assert_eq!(result.message, "Invalid code");

        let response: OtpVerificationResponse = serde_json::from_value(serde_json::json!({
            "success": false,
            "message": "OTP verified successfully"
        }))
        .unwrap();
        assert!(OtpVerificationResult::from(response).verified);
    }

    #[test]
    fn test_otp_request_wire_keys() {
        let request = OtpVerificationRequest {
            otp: "12345".into(),
            user_id: "42".into(),
        };
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            serde_json::json!({ "otp": "12345", "user_id": "42" })
        );
    }
}
