//! Orchestration around the deterministic combat core.
//!
//! This crate wires content, policies and the combat engine into complete
//! automated runs, and carries the verification tooling that checks RNG
//! parity against reference traces.
//!
//! Modules are organized by responsibility:
//! - [`runner`] plays combats to completion with tracing spans
//! - [`policy`] provides scripted, random and search-based policies
//! - [`parity`] compares stream draws against recorded traces
//! - [`scenario`] loads deck/encounter/seed bundles from RON
//! - [`logging`] installs the `tracing` subscriber for binaries and tests
pub mod error;
pub mod logging;
pub mod parity;
pub mod policy;
pub mod runner;
pub mod scenario;
pub mod utils;

pub use error::{ParityError, Result, RuntimeError};
pub use parity::{ReferenceTrace, expect_calls, verify_trace};
pub use policy::{
    AttackFirstPolicy, FirstLegalPolicy, GreedySearchPolicy, PolicyKind, RandomPolicy,
    SearchStats,
};
pub use runner::{RunReport, Runner, RunnerConfig, damage_taken};
pub use scenario::{Scenario, ScenarioSeeds};
