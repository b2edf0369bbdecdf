//! Account API HTTP client.

use crate::error::ApiError;
use crate::types::*;
use reqwest::{header, Client, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;
use tracing::{debug, instrument, warn};

const REGISTER_PATH: &str = "register-new";
const VERIFY_CODE_PATH: &str = "verify-code";
const DEFAULT_LANG: &str = "en";
const JSON_CONTENT_TYPE: &str = "application/json";

/// Maximum number of response characters written to debug logs.
const LOGGED_BODY_CHARS: usize = 200;

/// Account API client.
///
/// Stateless apart from its connection pool, so clones are cheap and may be
/// shared across concurrent flows.
#[derive(Clone)]
pub struct AccountClient {
    client: Client,
    base_url: String,
    lang: String,
    resend_path: Option<String>,
}

impl AccountClient {
    /// Create a new account API client.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, ApiError> {
        // Builder failures here come from the TLS backend, not the URL.
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| {
                warn!(error = %e, "Failed to build HTTP client");
                ApiError::Unknown
            })?;

        Ok(Self {
            client,
            base_url: base_url.into(),
            lang: DEFAULT_LANG.into(),
            resend_path: None,
        })
    }

    /// Set the `lang` query parameter sent with every call.
    pub fn with_lang(mut self, lang: impl Into<String>) -> Self {
        self.lang = lang.into();
        self
    }

    /// Enable the resend-code call against `path`, relative to the base URL.
    pub fn with_resend_path(mut self, path: impl Into<String>) -> Self {
        self.resend_path = Some(path.into());
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Whether a resend-code endpoint has been configured.
    pub fn can_resend(&self) -> bool {
        self.resend_path.is_some()
    }

    /// Register a new account.
    #[instrument(skip(self, request))]
    pub async fn register(
        &self,
        request: &RegistrationRequest,
    ) -> Result<RegistrationResult, ApiError> {
        let url = self.endpoint(REGISTER_PATH)?;
        let response: RegistrationResponse = self.post_json(url, request).await?;
        Ok(response.into())
    }

    /// Submit a one-time code for verification.
    #[instrument(skip(self, request), fields(user_id = %request.user_id))]
    pub async fn verify_otp(
        &self,
        request: &OtpVerificationRequest,
    ) -> Result<OtpVerificationResult, ApiError> {
        let url = self.endpoint(VERIFY_CODE_PATH)?;
        let response: OtpVerificationResponse = self.post_json(url, request).await?;
        Ok(response.into())
    }

    /// Ask the server to send a fresh verification code.
    ///
    /// Fails with [`ApiError::InvalidEndpoint`] when no resend path is configured.
    #[instrument(skip(self, request), fields(user_id = %request.user_id))]
    pub async fn resend_code(
        &self,
        request: &ResendCodeRequest,
    ) -> Result<ResendCodeResult, ApiError> {
        let path = self.resend_path.as_deref().ok_or(ApiError::InvalidEndpoint)?;
        let url = self.endpoint(path)?;
        self.post_json(url, request).await
    }

    /// Build `<base_url>/<path>?lang=<lang>`.
    fn endpoint(&self, path: &str) -> Result<Url, ApiError> {
        let raw = format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        );
        let mut url = Url::parse(&raw).map_err(|e| {
            warn!(url = %raw, error = %e, "Invalid endpoint URL");
            ApiError::InvalidEndpoint
        })?;
        url.query_pairs_mut().append_pair("lang", &self.lang);
        Ok(url)
    }

    /// POST a JSON body and decode the JSON reply.
    ///
    /// The status code is not interpreted; the API reports failures in the body.
    async fn post_json<B, R>(&self, url: Url, body: &B) -> Result<R, ApiError>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let payload = serde_json::to_vec(body)?;

        debug!(url = %url, "Sending request");

        let response = self
            .client
            .post(url)
            .header(header::CONTENT_TYPE, JSON_CONTENT_TYPE)
            .header(header::ACCEPT, JSON_CONTENT_TYPE)
            .body(payload)
            .send()
            .await?;

        let status = response.status();
        let body = response.bytes().await?;

        if body.is_empty() {
            warn!(status = %status, "Response had no body");
            return Err(ApiError::NoResponseBody);
        }

        debug!(status = %status, body = %preview(&body), "Response received");
        decode_response(&body)
    }
}

/// Decode the expected shape, falling back to the minimal error body.
pub(crate) fn decode_response<R: DeserializeOwned>(body: &[u8]) -> Result<R, ApiError> {
    let error = match serde_json::from_slice::<R>(body) {
        Ok(decoded) => return Ok(decoded),
        Err(e) => e,
    };

    match serde_json::from_slice::<ErrorResponse>(body) {
        Ok(fallback) => {
            warn!(server_message = %fallback.message, "Unexpected response shape, server rejected request");
            Err(ApiError::ServerRejected(fallback.message))
        }
        Err(_) => {
            warn!(error = %error, "Failed to decode response");
            Err(ApiError::DecodeFailure(error.to_string()))
        }
    }
}

fn preview(body: &[u8]) -> String {
    String::from_utf8_lossy(body)
        .chars()
        .take(LOGGED_BODY_CHARS)
        .collect()
}
