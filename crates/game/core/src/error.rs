//! Common error infrastructure for spire-core.
//!
//! Domain-specific errors live next to the code that detects them
//! ([`crate::action::IllegalAction`] beside legality checks, seed errors beside
//! seed parsing). This module holds the shared classification trait and the
//! top-level [`SimError`] every public engine operation returns.
//!
//! # Design Principles
//!
//! - **Explicit**: every failure is a returned value, never a skipped action
//! - **Loud lookups**: a missing content id is [`ErrorSeverity::Fatal`]
//! - **Classified**: each error reports a severity and a stable code

use crate::action::IllegalAction;

/// Severity level of an error, used for categorization and recovery strategies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// The caller can pick another action from the same state.
    ///
    /// Examples: not enough energy, card blocked by hand composition
    Recoverable,

    /// Malformed request that no state would accept.
    ///
    /// Examples: hand index out of range, target index out of range
    Validation,

    /// Unexpected state inconsistency inside the simulator.
    Internal,

    /// Simulation output is meaningless from here on.
    ///
    /// Examples: card, power or enemy id missing from the content tables
    Fatal,
}

impl ErrorSeverity {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
            Self::Internal => "internal",
            Self::Fatal => "fatal",
        }
    }

    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }

    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal | Self::Fatal)
    }
}

/// Common trait for all spire-core errors.
///
/// # Implementation Guidelines
///
/// - Use `#[derive(thiserror::Error)]` for Display/Error impl
/// - Classify severity based on recoverability, not impact
pub trait GameError: core::fmt::Display + core::fmt::Debug {
    fn severity(&self) -> ErrorSeverity;

    /// Stable identifier for metrics and tests.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}

/// Content table an identifier was looked up in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum IdentifierKind {
    Card,
    Power,
    Enemy,
    Move,
    Relic,
}

/// Errors surfaced by the combat engine.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SimError {
    #[error("illegal action: {0}")]
    IllegalAction(#[from] IllegalAction),

    #[error("unknown {kind} identifier '{id}'")]
    UnknownIdentifier { kind: IdentifierKind, id: String },

    #[error("invalid combat setup: {reason}")]
    InvalidSetup { reason: String },
}

impl SimError {
    pub fn unknown(kind: IdentifierKind, id: impl Into<String>) -> Self {
        Self::UnknownIdentifier {
            kind,
            id: id.into(),
        }
    }

    pub fn invalid_setup(reason: impl Into<String>) -> Self {
        Self::InvalidSetup {
            reason: reason.into(),
        }
    }

    pub fn is_illegal_action(&self) -> bool {
        matches!(self, Self::IllegalAction(_))
    }
}

impl GameError for SimError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::IllegalAction(inner) => inner.severity(),
            Self::UnknownIdentifier { .. } => ErrorSeverity::Fatal,
            Self::InvalidSetup { .. } => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::IllegalAction(inner) => inner.error_code(),
            Self::UnknownIdentifier { .. } => "SIM_UNKNOWN_IDENTIFIER",
            Self::InvalidSetup { .. } => "SIM_INVALID_SETUP",
        }
    }
}
