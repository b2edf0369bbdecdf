//! Registration and code verification flows.
//!
//! Both flows move through the same states:
//! `Idle -> Validating -> Submitting -> Succeeded | Failed`.
//! A flow runs one attempt at a time; starting another while one is
//! validating or submitting fails with [`FlowError::Busy`].

mod otp;
mod registration;

pub use otp::{OtpFlow, INVALID_OTP_MESSAGE};
pub use registration::{Registration, RegistrationFlow, DEFAULT_USER_ID};

use crate::error::{FlowError, FlowResult};
use tokio::sync::watch;

/// Where a flow currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowState {
    Idle,
    Validating,
    Submitting,
    Succeeded,
    Failed,
}

impl FlowState {
    /// An attempt is in flight.
    pub fn is_busy(self) -> bool {
        matches!(self, FlowState::Validating | FlowState::Submitting)
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, FlowState::Succeeded | FlowState::Failed)
    }
}

/// Shared state holder for a flow instance.
#[derive(Debug)]
pub(crate) struct StateMachine {
    tx: watch::Sender<FlowState>,
}

impl StateMachine {
    pub(crate) fn new() -> Self {
        let (tx, _) = watch::channel(FlowState::Idle);
        Self { tx }
    }

    pub(crate) fn current(&self) -> FlowState {
        *self.tx.borrow()
    }

    pub(crate) fn subscribe(&self) -> watch::Receiver<FlowState> {
        self.tx.subscribe()
    }

    /// Move a terminal flow back to `Idle`. Returns false if an attempt is running.
    pub(crate) fn reset(&self) -> bool {
        let mut reset = false;
        self.tx.send_if_modified(|state| {
            if state.is_busy() {
                return false;
            }
            reset = true;
            let changed = *state != FlowState::Idle;
            *state = FlowState::Idle;
            changed
        });
        reset
    }

    /// Claim the flow for a new attempt.
    pub(crate) fn begin(&self) -> FlowResult<Attempt<'_>> {
        let mut claimed = false;
        self.tx.send_if_modified(|state| {
            if state.is_busy() {
                return false;
            }
            *state = FlowState::Validating;
            claimed = true;
            true
        });

        if claimed {
            Ok(Attempt {
                tx: &self.tx,
                finished: false,
            })
        } else {
            Err(FlowError::Busy)
        }
    }
}

/// One in-flight attempt.
///
/// Finishing it records the terminal state; dropping it unfinished
/// (the caller abandoned the future) puts the flow back to `Idle`.
#[derive(Debug)]
pub(crate) struct Attempt<'a> {
    tx: &'a watch::Sender<FlowState>,
    finished: bool,
}

impl Attempt<'_> {
    pub(crate) fn submitting(&self) {
        self.tx.send_replace(FlowState::Submitting);
    }

    pub(crate) fn succeed<T>(mut self, value: T) -> FlowResult<T> {
        self.finish(FlowState::Succeeded);
        Ok(value)
    }

    pub(crate) fn fail<T>(mut self, error: FlowError) -> FlowResult<T> {
        self.finish(FlowState::Failed);
        Err(error)
    }

    fn finish(&mut self, state: FlowState) {
        self.finished = true;
        self.tx.send_replace(state);
    }
}

impl Drop for Attempt<'_> {
    fn drop(&mut self) {
        if !self.finished {
            self.tx.send_replace(FlowState::Idle);
        }
    }
}
