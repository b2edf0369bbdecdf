//! One-time code verification flow.

use super::{FlowState, StateMachine};
use crate::api::AccountApi;
use crate::error::{FlowError, FlowResult};
use crate::request::{build_otp_request, build_resend_request};
use crate::validation::validate_otp;
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{debug, info, instrument, warn};

/// Shown for any code the server does not confirm.
///
/// The server's own message is not echoed back.
pub const INVALID_OTP_MESSAGE: &str = "Invalid OTP. Please try again.";

/// Validates a one-time code and verifies it with the server.
pub struct OtpFlow<A> {
    api: Arc<A>,
    state: StateMachine,
}

impl<A: AccountApi> OtpFlow<A> {
    pub fn new(api: Arc<A>) -> Self {
        Self {
            api,
            state: StateMachine::new(),
        }
    }

    pub fn state(&self) -> FlowState {
        self.state.current()
    }

    pub fn subscribe(&self) -> watch::Receiver<FlowState> {
        self.state.subscribe()
    }

    pub fn reset(&self) -> bool {
        self.state.reset()
    }

    /// Verify `otp` for `user_id`.
    #[instrument(skip(self, otp))]
    pub async fn verify(&self, otp: &str, user_id: &str) -> FlowResult<()> {
        let attempt = self.state.begin()?;

        let outcome = validate_otp(otp);
        if let Some(message) = outcome.error_message() {
            debug!(reason = message, "Code format invalid");
            return attempt.fail(FlowError::Validation(message.to_string()));
        }

        attempt.submitting();
        let request = build_otp_request(otp, user_id);

        match self.api.verify_otp(&request).await {
            Ok(result) if result.verified => {
                info!(server_message = %result.message, "Code verified");
                attempt.succeed(())
            }
            Ok(result) => {
                warn!(server_message = %result.message, "Code not confirmed by server");
                attempt.fail(FlowError::Rejected(INVALID_OTP_MESSAGE.to_string()))
            }
            Err(e) => {
                warn!(error = %e, "Code verification request failed");
                attempt.fail(e.into())
            }
        }
    }

    /// Ask for a new code.
    ///
    /// Without a resend endpoint this reports success straight away. It
    /// does not change the verification state but is refused while a
    /// verification is in flight.
    #[instrument(skip(self))]
    pub async fn resend(&self, user_id: &str) -> FlowResult<()> {
        if self.state().is_busy() {
            return Err(FlowError::Busy);
        }

        if !self.api.can_resend() {
            info!("No resend endpoint configured, reporting success");
            return Ok(());
        }

        match self.api.resend_code(&build_resend_request(user_id)).await {
            Ok(result) if result.success => {
                info!("Verification code resent");
                Ok(())
            }
            Ok(result) => {
                warn!(server_message = %result.message, "Resend rejected by server");
                Err(FlowError::Rejected(result.message))
            }
            Err(e) => {
                warn!(error = %e, "Resend request failed");
                Err(e.into())
            }
        }
    }
}
