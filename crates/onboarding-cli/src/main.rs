//! Account onboarding terminal front-end - Main entry point.

mod config;
mod error;
mod terminal;

use crate::config::Config;
use crate::error::AppResult;
use crate::terminal::Terminal;
use account_onboarding::{AccountApi, AccountClient, OtpFlow, Registration, RegistrationFlow};
use anyhow::Context;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const RESEND_COMMAND: &str = "resend";

#[tokio::main]
async fn main() -> AppResult<()> {
    // Load configuration
    let config = Config::load().context("Failed to load configuration")?;

    // Initialize logging
    init_logging(&config.log.level);

    info!("Starting account onboarding");

    let mut client = AccountClient::new(&config.api.base_url, config.api.timeout)?
        .with_lang(&config.api.lang);
    if let Some(path) = &config.api.resend_path {
        client = client.with_resend_path(path);
    }
    let client = Arc::new(client);

    info!(base_url = %client.base_url(), "Account API client ready");

    let registration_flow = RegistrationFlow::new(client.clone(), config.device.clone().into());
    let otp_flow = OtpFlow::new(client);
    let mut terminal = Terminal::new();

    let Some(registration) = register(&registration_flow, &mut terminal).await? else {
        info!("Input closed before registration completed");
        return Ok(());
    };

    if verify(&otp_flow, &registration, &mut terminal).await? {
        info!(user_id = %registration.user_id, "Onboarding complete");
    } else {
        info!("Input closed before verification completed");
    }

    Ok(())
}

/// Prompt for the form until registration succeeds or input ends.
async fn register<A: AccountApi>(
    flow: &RegistrationFlow<A>,
    terminal: &mut Terminal,
) -> AppResult<Option<Registration>> {
    loop {
        let Some(form) = terminal.prompt_form().await? else {
            return Ok(None);
        };

        match flow.submit(&form).await {
            Ok(registration) => {
                terminal
                    .say(&format!(
                        "Registered. Enter the code sent to +{} {}.",
                        form.phone_code, form.phone
                    ))
                    .await?;
                return Ok(Some(registration));
            }
            Err(e) => terminal.say(&e.message()).await?,
        }
    }
}

/// Prompt for the code until it is verified or input ends.
async fn verify<A: AccountApi>(
    flow: &OtpFlow<A>,
    registration: &Registration,
    terminal: &mut Terminal,
) -> AppResult<bool> {
    let label = format!("Verification code (or '{}')", RESEND_COMMAND);

    loop {
        let Some(input) = terminal.prompt(&label).await? else {
            return Ok(false);
        };

        if input.eq_ignore_ascii_case(RESEND_COMMAND) {
            match flow.resend(&registration.user_id).await {
                Ok(()) => terminal.say("A new code is on its way.").await?,
                Err(e) => terminal.say(&e.message()).await?,
            }
            continue;
        }

        match flow.verify(&input, &registration.user_id).await {
            Ok(()) => {
                terminal.say("Account verified.").await?;
                return Ok(true);
            }
            Err(e) => terminal.say(&e.message()).await?,
        }
    }
}

fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level));

    // Keep stdout for prompts.
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
