//! Line-based prompts on stdin/stdout.

use crate::error::AppResult;
use account_onboarding::form::DEFAULT_PHONE_CODE;
use account_onboarding::RegistrationForm;
use secrecy::SecretString;
use tokio::io::{self, AsyncBufReadExt, AsyncWriteExt, BufReader, Lines, Stdin, Stdout};

pub struct Terminal {
    lines: Lines<BufReader<Stdin>>,
    stdout: Stdout,
}

impl Terminal {
    pub fn new() -> Self {
        Self {
            lines: BufReader::new(io::stdin()).lines(),
            stdout: io::stdout(),
        }
    }

    /// Print a line of output.
    pub async fn say(&mut self, text: &str) -> AppResult<()> {
        self.stdout.write_all(text.as_bytes()).await?;
        self.stdout.write_all(b"\n").await?;
        self.stdout.flush().await?;
        Ok(())
    }

    /// Ask for one line of input. Returns `None` once stdin is closed.
    pub async fn prompt(&mut self, label: &str) -> AppResult<Option<String>> {
        Ok(self
            .prompt_raw(label)
            .await?
            .map(|line| line.trim().to_string()))
    }

    /// Like [`Terminal::prompt`], but the answer is kept exactly as typed.
    pub async fn prompt_raw(&mut self, label: &str) -> AppResult<Option<String>> {
        self.stdout.write_all(label.as_bytes()).await?;
        self.stdout.write_all(b": ").await?;
        self.stdout.flush().await?;

        Ok(self.lines.next_line().await?)
    }

    /// Ask for every registration field in display order.
    pub async fn prompt_form(&mut self) -> AppResult<Option<RegistrationForm>> {
        let phone_code_label = format!("Phone code [{}]", DEFAULT_PHONE_CODE);
        // (label, is_secret)
        let fields = [
            ("First name", false),
            ("Last name", false),
            ("Email", false),
            ("Password", true),
            ("Confirm password", true),
            (phone_code_label.as_str(), false),
            ("Phone", false),
            ("Date of birth (YYYY-MM-DD)", false),
            ("Gender", false),
            ("Subscribe to the newsletter? [y/N]", false),
        ];

        let mut answers = Vec::with_capacity(fields.len());
        for (label, is_secret) in fields {
            let Some(answer) = self.prompt_raw(label).await? else {
                return Ok(None);
            };
            answers.push(clean_answer(answer, is_secret));
        }

        Ok(Some(form_from_answers(answers)))
    }
}

/// Secrets are kept as typed; everything else is trimmed.
fn clean_answer(answer: String, is_secret: bool) -> String {
    if is_secret {
        answer
    } else {
        answer.trim().to_string()
    }
}

/// Assemble a form from answers given in prompt order.
fn form_from_answers(answers: Vec<String>) -> RegistrationForm {
    let mut answers = answers.into_iter();
    let mut next = || answers.next().unwrap_or_default();
    let first_name = next();
    let last_name = next();
    let email = next();
    let password = SecretString::new(next());
    let confirm_password = SecretString::new(next());
    let phone_code = next();
    let phone = next();
    let dob = next();
    let gender = next();
    let newsletter = next();

    RegistrationForm {
        first_name,
        last_name,
        email,
        password,
        confirm_password,
        phone,
        phone_code: non_empty_or(phone_code, DEFAULT_PHONE_CODE),
        dob,
        gender,
        newsletter_subscribed: is_yes(&newsletter),
    }
}

fn non_empty_or(value: String, fallback: &str) -> String {
    if value.is_empty() {
        fallback.to_string()
    } else {
        value
    }
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.to_ascii_lowercase().as_str(), "y" | "yes")
}
