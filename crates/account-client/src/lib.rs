//! Client for the account registration and code verification API.

mod client;
mod error;
mod types;

pub use client::AccountClient;
pub use error::ApiError;
pub use types::*;
