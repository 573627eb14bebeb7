//! Unified error types surfaced by the runtime.
//!
//! Wraps failures from the combat engine, content loading and scenario
//! parsing so callers can bubble them up with consistent context.

use spire_core::rng::SeedError;
use spire_core::{ErrorSeverity, GameError, SimError, StreamKind};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error(transparent)]
    Sim(#[from] SimError),

    #[error(transparent)]
    Content(#[from] anyhow::Error),

    #[error("invalid scenario: {0}")]
    InvalidScenario(String),

    #[error("invalid run seed")]
    Seed(#[from] SeedError),

    #[error(transparent)]
    Parity(#[from] ParityError),

    #[error("failed to encode or decode json")]
    Json(#[source] serde_json::Error),
}

impl GameError for RuntimeError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Sim(error) => error.severity(),
            Self::Content(_) | Self::InvalidScenario(_) | Self::Seed(_) => {
                ErrorSeverity::Validation
            }
            Self::Parity(_) | Self::Json(_) => ErrorSeverity::Internal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Sim(error) => error.error_code(),
            Self::Content(_) => "RUNTIME_CONTENT",
            Self::InvalidScenario(_) => "RUNTIME_INVALID_SCENARIO",
            Self::Seed(_) => "RUNTIME_INVALID_SEED",
            Self::Parity(_) => "RUNTIME_RNG_PARITY",
            Self::Json(_) => "RUNTIME_JSON",
        }
    }
}

/// Counter-parity failures against a reference RNG trace.
///
/// Only raised by verification tooling; the simulator itself cannot detect
/// a desync.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum ParityError {
    #[error("{stream} stream desynced at call {seq}: expected {expected}, got {actual}")]
    RngDesync {
        stream: StreamKind,
        seq: u64,
        expected: String,
        actual: String,
    },

    #[error("{stream} stream made {actual} calls, expected {expected}")]
    CallCount {
        stream: StreamKind,
        expected: u64,
        actual: u64,
    },
}
