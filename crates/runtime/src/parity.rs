//! RNG counter-parity checks against reference traces.
//!
//! A reference trace is a JSON list of `{seq, op, arg, result}` entries
//! recorded from the reference game. Verification walks the draws a stream
//! has traced and reports the first one that disagrees.

use std::path::Path;

use spire_core::rng::{RngTraceEntry, TraceValue};
use spire_core::{GameRng, RngStreams, StreamKind};

use crate::error::{ParityError, Result, RuntimeError};

/// Absolute tolerance for float arguments and results. Integer and boolean
/// draws must match exactly.
const FLOAT_TOLERANCE: f64 = 1e-6;

/// Recorded draws of one stream.
#[derive(Clone, Debug, PartialEq)]
pub struct ReferenceTrace {
    pub stream: StreamKind,
    pub calls: Vec<RngTraceEntry>,
}

impl ReferenceTrace {
    /// Captures the draws `rng` has traced so far.
    pub fn record(stream: StreamKind, rng: &GameRng) -> Self {
        Self {
            stream,
            calls: rng.trace().to_vec(),
        }
    }

    pub fn from_json(stream: StreamKind, text: &str) -> Result<Self> {
        let calls = serde_json::from_str(text).map_err(RuntimeError::Json)?;
        Ok(Self { stream, calls })
    }

    pub fn load(stream: StreamKind, path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| {
            RuntimeError::Content(anyhow::anyhow!(
                "Failed to read trace {}: {}",
                path.display(),
                e
            ))
        })?;
        Self::from_json(stream, &text)
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(&self.calls).map_err(RuntimeError::Json)
    }
}

fn same_value(expected: TraceValue, actual: TraceValue) -> bool {
    match (expected, actual) {
        (TraceValue::Float(a), TraceValue::Float(b)) => (a - b).abs() <= FLOAT_TOLERANCE,
        _ => expected == actual,
    }
}

fn same_draw(expected: &RngTraceEntry, actual: &RngTraceEntry) -> bool {
    expected.seq == actual.seq
        && expected.op == actual.op
        && same_value(expected.arg, actual.arg)
        && same_value(expected.result, actual.result)
}

fn describe(entry: &RngTraceEntry) -> String {
    format!("{}({}) -> {}", entry.op, entry.arg, entry.result)
}

/// Checks every traced draw of `rng` against the reference entry with the
/// same sequence number, then the total call count.
///
/// Tracing may have been enabled mid-stream; draws before it are only
/// covered by the count check.
pub fn verify_trace(rng: &GameRng, reference: &ReferenceTrace) -> std::result::Result<(), ParityError> {
    let stream = reference.stream;
    for actual in rng.trace() {
        let expected = usize::try_from(actual.seq)
            .ok()
            .and_then(|seq| reference.calls.get(seq));
        match expected {
            Some(expected) if same_draw(expected, actual) => {}
            Some(expected) => {
                return Err(ParityError::RngDesync {
                    stream,
                    seq: actual.seq,
                    expected: describe(expected),
                    actual: describe(actual),
                });
            }
            None => {
                return Err(ParityError::RngDesync {
                    stream,
                    seq: actual.seq,
                    expected: "end of trace".to_owned(),
                    actual: describe(actual),
                });
            }
        }
    }
    let expected = u64::try_from(reference.calls.len()).unwrap_or(u64::MAX);
    expect_count(stream, expected, rng.counter())
}

/// Checks that a stream of `streams` has served exactly `expected` draws.
pub fn expect_calls(
    streams: &RngStreams,
    stream: StreamKind,
    expected: u64,
) -> std::result::Result<(), ParityError> {
    expect_count(stream, expected, streams.stream(stream).counter())
}

fn expect_count(
    stream: StreamKind,
    expected: u64,
    actual: u64,
) -> std::result::Result<(), ParityError> {
    if expected == actual {
        Ok(())
    } else {
        Err(ParityError::CallCount {
            stream,
            expected,
            actual,
        })
    }
}
