//! Registration flow.

use super::{FlowState, StateMachine};
use crate::api::AccountApi;
use crate::error::{FlowError, FlowResult};
use crate::form::RegistrationForm;
use crate::request::{build_registration_request, DeviceInfo};
use crate::validation::validate_registration_form;
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{debug, info, instrument, warn};

/// User id reported when the server omits one.
pub const DEFAULT_USER_ID: &str = "0";

/// A successfully registered account, ready for code verification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    pub user_id: String,
    pub verification_code: String,
}

/// Validates a registration form and submits it.
pub struct RegistrationFlow<A> {
    api: Arc<A>,
    device: DeviceInfo,
    state: StateMachine,
}

impl<A: AccountApi> RegistrationFlow<A> {
    pub fn new(api: Arc<A>, device: DeviceInfo) -> Self {
        Self {
            api,
            device,
            state: StateMachine::new(),
        }
    }

    pub fn state(&self) -> FlowState {
        self.state.current()
    }

    /// Watch state changes, e.g. to disable a submit button while busy.
    pub fn subscribe(&self) -> watch::Receiver<FlowState> {
        self.state.subscribe()
    }

    /// Return a finished flow to `Idle`. Returns false while an attempt runs.
    pub fn reset(&self) -> bool {
        self.state.reset()
    }

    /// Validate `form` and, if every field passes, register the account.
    ///
    /// No request is sent when validation fails. The server's `success`
    /// flag decides between success and [`FlowError::Rejected`].
    #[instrument(skip_all)]
    pub async fn submit(&self, form: &RegistrationForm) -> FlowResult<Registration> {
        let attempt = self.state.begin()?;

        let validation = validate_registration_form(form);
        if let Some(message) = validation.first_error() {
            debug!(reason = message, "Registration form invalid");
            return attempt.fail(FlowError::Validation(message.to_string()));
        }

        attempt.submitting();
        let request = build_registration_request(form, &self.device);

        match self.api.register(&request).await {
            Ok(result) if result.success => {
                let registration = Registration {
                    user_id: result
                        .user_id
                        .unwrap_or_else(|| DEFAULT_USER_ID.to_string()),
                    verification_code: result.verification_code.unwrap_or_default(),
                };
                info!(user_id = %registration.user_id, "Registration succeeded");
                attempt.succeed(registration)
            }
            Ok(result) => {
                warn!(server_message = %result.message, "Registration rejected by server");
                attempt.fail(FlowError::Rejected(result.message))
            }
            Err(e) => {
                warn!(error = %e, "Registration request failed");
                attempt.fail(e.into())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::MockAccountApi;
    use account_client::{ApiError, RegistrationResult};
    use secrecy::SecretString;

    fn device() -> DeviceInfo {
        DeviceInfo {
            app_version: "1.0".into(),
            device_model: "iPhone".into(),
            os_version: "17.0".into(),
            device_token: String::new(),
        }
    }

    fn valid_form() -> RegistrationForm {
        RegistrationForm {
            first_name: "John".into(),
            last_name: "Doe".into(),
            email: "john@example.com".into(),
            password: SecretString::new("Password123".into()),
            confirm_password: SecretString::new("Password123".into()),
            phone: "12345678".into(),
            newsletter_subscribed: true,
            ..RegistrationForm::default()
        }
    }

    fn flow(api: MockAccountApi) -> RegistrationFlow<MockAccountApi> {
        RegistrationFlow::new(Arc::new(api), device())
    }

    fn result(
        success: bool,
        message: &str,
        user_id: Option<&str>,
        code: Option<&str>,
    ) -> RegistrationResult {
        RegistrationResult {
            success,
            message: message.into(),
            user_id: user_id.map(Into::into),
            verification_code: code.map(Into::into),
        }
    }

    #[tokio::test]
    async fn test_invalid_form_never_calls_api() {
        let mut api = MockAccountApi::new();
        api.expect_register().times(0);

        let flow = flow(api);
        let form = RegistrationForm {
            email: "invalid-email".into(),
            ..valid_form()
        };

        let outcome = flow.submit(&form).await;
        assert_eq!(
            outcome,
            Err(FlowError::Validation(
                "Please enter a valid email address".into()
            ))
        );
        assert_eq!(flow.state(), FlowState::Failed);
    }

    #[tokio::test]
    async fn test_success_extracts_user_and_code() {
        let mut api = MockAccountApi::new();
        api.expect_register()
            .withf(|request| {
                request.first_name == "John"
                    && request.newsletter_subscribed == 1
                    && request.device_type == "I"
            })
            .times(1)
            .returning(|_| Ok(result(true, "Registered", Some("42"), Some("98765"))));

        let flow = flow(api);
        let registration = flow.submit(&valid_form()).await.unwrap();

        assert_eq!(
            registration,
            Registration {
                user_id: "42".into(),
                verification_code: "98765".into(),
            }
        );
        assert_eq!(flow.state(), FlowState::Succeeded);
    }

    #[tokio::test]
    async fn test_success_without_data_uses_defaults() {
        let mut api = MockAccountApi::new();
        api.expect_register()
            .times(1)
            .returning(|_| Ok(result(true, "", None, None)));

        let registration = flow(api).submit(&valid_form()).await.unwrap();
        assert_eq!(registration.user_id, "0");
        assert_eq!(registration.verification_code, "");
    }

    #[tokio::test]
    async fn test_server_rejection_passes_message_through() {
        let mut api = MockAccountApi::new();
        api.expect_register()
            .times(1)
            .returning(|_| Ok(result(false, "Email already exists", None, None)));

        let flow = flow(api);
        let outcome = flow.submit(&valid_form()).await;

        assert_eq!(
            outcome,
            Err(FlowError::Rejected("Email already exists".into()))
        );
        assert_eq!(flow.state(), FlowState::Failed);
    }

    #[tokio::test]
    async fn test_api_error_mapped_to_display_string() {
        let mut api = MockAccountApi::new();
        api.expect_register()
            .times(1)
            .returning(|_| Err(ApiError::TransportFailure("connection reset".into())));

        let outcome = flow(api).submit(&valid_form()).await;
        assert_eq!(
            outcome,
            Err(FlowError::Api("Network error: connection reset".into()))
        );
    }

    #[tokio::test]
    async fn test_failed_flow_can_retry() {
        let mut api = MockAccountApi::new();
        let mut seq = mockall::Sequence::new();
        api.expect_register()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Err(ApiError::Unknown));
        api.expect_register()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(result(true, "", Some("7"), Some("12345"))));

        let flow = flow(api);
        assert_eq!(
            flow.submit(&valid_form()).await,
            Err(FlowError::Api("Unknown error occurred".into()))
        );
        assert_eq!(flow.submit(&valid_form()).await.unwrap().user_id, "7");
    }
}
