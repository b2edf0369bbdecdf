//! The remote calls the flows depend on.

use account_client::{
    AccountClient, ApiError, OtpVerificationRequest, OtpVerificationResult, RegistrationRequest,
    RegistrationResult, ResendCodeRequest, ResendCodeResult,
};
use async_trait::async_trait;

/// Account API as seen by the flows.
///
/// Implementations must be safe to call from several flows at once.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AccountApi: Send + Sync {
    async fn register(&self, request: &RegistrationRequest)
        -> Result<RegistrationResult, ApiError>;

    async fn verify_otp(
        &self,
        request: &OtpVerificationRequest,
    ) -> Result<OtpVerificationResult, ApiError>;

    /// Whether [`AccountApi::resend_code`] reaches a real endpoint.
    fn can_resend(&self) -> bool;

    async fn resend_code(&self, request: &ResendCodeRequest)
        -> Result<ResendCodeResult, ApiError>;
}

#[async_trait]
impl AccountApi for AccountClient {
    async fn register(
        &self,
        request: &RegistrationRequest,
    ) -> Result<RegistrationResult, ApiError> {
        AccountClient::register(self, request).await
    }

    async fn verify_otp(
        &self,
        request: &OtpVerificationRequest,
    ) -> Result<OtpVerificationResult, ApiError> {
        AccountClient::verify_otp(self, request).await
    }

    fn can_resend(&self) -> bool {
        AccountClient::can_resend(self)
    }

    async fn resend_code(
        &self,
        request: &ResendCodeRequest,
    ) -> Result<ResendCodeResult, ApiError> {
        AccountClient::resend_code(self, request).await
    }
}
