//! Account onboarding core: field validation, request building, and the
//! registration and code verification flows.
//!
//! The flows take their API dependency explicitly:
//!
//! ```no_run
//! use account_onboarding::{AccountClient, DeviceInfo, RegistrationFlow, RegistrationForm};
//! use std::sync::Arc;
//! use std::time::Duration;
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let client = Arc::new(AccountClient::new("https://api.example.com/api/v1", Duration::from_secs(30))?);
//! let flow = RegistrationFlow::new(client, DeviceInfo::default());
//! let registration = flow.submit(&RegistrationForm::default()).await?;
//! println!("registered user {}", registration.user_id);
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod error;
pub mod flow;
pub mod form;
pub mod request;
pub mod validation;

pub use account_client::{AccountClient, ApiError};
pub use api::AccountApi;
pub use error::{FlowError, FlowResult};
pub use flow::{FlowState, OtpFlow, Registration, RegistrationFlow, INVALID_OTP_MESSAGE};
pub use form::RegistrationForm;
pub use request::DeviceInfo;
pub use validation::{validate_registration_form, FormValidation, ValidationOutcome};
