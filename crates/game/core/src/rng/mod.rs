//! Seeded random streams with call-for-call parity against the reference game.
//!
//! [`GameRng`] reproduces the reference game's random wrapper on top of the
//! [`Xs128`] generator. Every public draw increments the call counter exactly
//! once regardless of its bound, which makes the counter the primary oracle
//! for replay verification: two runs that consumed the same operations agree
//! on the counter even when their bounds differed.
//!
//! # Determinism
//!
//! Streams are plain values. Cloning a stream forks it; the original is never
//! advanced by draws on the clone. Combat code receives the four logical
//! streams through [`RngStreams`] and never constructs generators on its own.

mod java;
mod seed;
mod streams;
mod xs128;

pub use java::JavaRandom;
pub use seed::{SEED_ALPHABET, SeedError, seed_from_str, seed_to_string};
pub use streams::{RngStreams, StreamKind, StreamSeeds};
pub use xs128::{Xs128, murmur_hash3};

/// Operation recorded in an RNG trace.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumString)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum RngOp {
    /// Inclusive integer draw `[0, range]`.
    Random,
    /// Inclusive integer draw `[start, end]`.
    RandomRange,
    /// Raw 64-bit draw.
    RandomLong,
    /// Double-scaled draw `[0, range)`.
    RandomLongRange,
    /// Fair coin.
    RandomBool,
    /// Biased coin.
    RandomBoolChance,
    /// Float draw `[0, 1)`.
    RandomFloat,
    /// Float draw scaled into a range.
    RandomFloatRange,
}

/// A traced argument or result.
///
/// Integer and boolean draws keep their exact value; only float draws are
/// stored as floats.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum TraceValue {
    None,
    Int(i64),
    Float(f64),
    Bool(bool),
}

impl core::fmt::Display for TraceValue {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::None => Ok(()),
            Self::Int(value) => write!(f, "{value}"),
            Self::Float(value) => write!(f, "{value}"),
            Self::Bool(value) => write!(f, "{value}"),
        }
    }
}

/// One traced draw.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RngTraceEntry {
    /// Counter value before the draw (0-indexed).
    pub seq: u64,
    pub op: RngOp,
    /// Bound, range start or chance.
    pub arg: TraceValue,
    pub result: TraceValue,
}

/// A counted random stream.
#[derive(Clone)]
pub struct GameRng {
    inner: Xs128,
    seed: i64,
    counter: u64,
    tracing: bool,
    trace: Vec<RngTraceEntry>,
}

impl core::fmt::Debug for GameRng {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("GameRng")
            .field("seed", &self.seed)
            .field("counter", &self.counter)
            .finish()
    }
}

impl PartialEq for GameRng {
    fn eq(&self, other: &Self) -> bool {
        self.inner == other.inner && self.seed == other.seed && self.counter == other.counter
    }
}

impl GameRng {
    /// Creates a stream from a numeric seed with a zero counter.
    pub fn new(seed: i64) -> Self {
        Self {
            inner: Xs128::new(seed),
            seed,
            counter: 0,
            tracing: false,
            trace: Vec::new(),
        }
    }

    /// Rebuilds a stream that has already served `counter` calls.
    ///
    /// The reference restores saved streams by burning `random(999)` draws,
    /// so this reproduces both the state and the counter.
    pub fn with_counter(seed: i64, counter: u64) -> Self {
        let mut rng = Self::new(seed);
        for _ in 0..counter {
            rng.random(999);
        }
        rng
    }

    /// Seed the stream was created from.
    pub fn seed(&self) -> i64 {
        self.seed
    }

    /// Number of draws served so far.
    pub fn counter(&self) -> u64 {
        self.counter
    }

    /// Raw generator state, for diagnostics.
    pub fn state(&self) -> (u64, u64) {
        self.inner.state()
    }

    // ------------------------------------------------------------------------
    // Portable draw names
    // ------------------------------------------------------------------------

    /// Uniform integer in the inclusive range `[0, bound]`.
    pub fn next_bounded(&mut self, bound: u32) -> u32 {
        let value = self.inner.next_long_bounded(i64::from(bound) + 1) as u32;
        self.record(
            RngOp::Random,
            TraceValue::Int(i64::from(bound)),
            TraceValue::Int(i64::from(value)),
        );
        value
    }

    /// Uniform float in `[0, 1)`, widened from the reference's single precision.
    pub fn next_float(&mut self) -> f64 {
        f64::from(self.random_float())
    }

    /// Returns `true` with probability `chance`.
    pub fn next_bool(&mut self, chance: f64) -> bool {
        self.random_bool_chance(chance as f32)
    }

    // ------------------------------------------------------------------------
    // Reference wrapper surface
    // ------------------------------------------------------------------------

    /// Uniform integer in `[0, range]`. Negative ranges yield 0.
    pub fn random(&mut self, range: i32) -> i32 {
        let value = self.inner.next_int_bounded(range.saturating_add(1));
        self.record(
            RngOp::Random,
            TraceValue::Int(i64::from(range)),
            TraceValue::Int(i64::from(value)),
        );
        value
    }

    /// Uniform integer in `[start, end]`.
    pub fn random_range(&mut self, start: i32, end: i32) -> i32 {
        let span = end.saturating_sub(start).saturating_add(1);
        let value = start + self.inner.next_int_bounded(span);
        self.record(
            RngOp::RandomRange,
            TraceValue::Int(i64::from(start)),
            TraceValue::Int(i64::from(value)),
        );
        value
    }

    /// Raw signed 64-bit draw.
    pub fn random_long(&mut self) -> i64 {
        let value = self.inner.next_long();
        self.record(RngOp::RandomLong, TraceValue::None, TraceValue::Int(value));
        value
    }

    /// `floor(next_double * range)`, the reference's long-range draw.
    pub fn random_long_range(&mut self, range: i64) -> i64 {
        let value = (self.inner.next_double() * range as f64) as i64;
        self.record(
            RngOp::RandomLongRange,
            TraceValue::Int(range),
            TraceValue::Int(value),
        );
        value
    }

    /// Fair coin.
    pub fn random_bool(&mut self) -> bool {
        let value = self.inner.next_bool();
        self.record(RngOp::RandomBool, TraceValue::None, TraceValue::Bool(value));
        value
    }

    /// Biased coin compared in single precision like the reference.
    pub fn random_bool_chance(&mut self, chance: f32) -> bool {
        let value = self.inner.next_float() < chance;
        self.record(
            RngOp::RandomBoolChance,
            TraceValue::Float(f64::from(chance)),
            TraceValue::Bool(value),
        );
        value
    }

    /// Uniform float in `[0, 1)`.
    pub fn random_float(&mut self) -> f32 {
        let value = self.inner.next_float();
        self.record(
            RngOp::RandomFloat,
            TraceValue::None,
            TraceValue::Float(f64::from(value)),
        );
        value
    }

    /// Uniform float in `[start, end)`.
    pub fn random_float_range(&mut self, start: f32, end: f32) -> f32 {
        let value = start + self.inner.next_float() * (end - start);
        self.record(
            RngOp::RandomFloatRange,
            TraceValue::Float(f64::from(start)),
            TraceValue::Float(f64::from(value)),
        );
        value
    }

    /// Shuffles a pile the way the reference does: one `random_long` seeds a
    /// [`JavaRandom`] that performs the Fisher–Yates pass.
    pub fn shuffle<T>(&mut self, items: &mut [T]) {
        let seed = self.random_long();
        JavaRandom::new(seed).shuffle(items);
    }

    // ------------------------------------------------------------------------
    // Tracing
    // ------------------------------------------------------------------------

    /// Starts recording every draw. Clears any previous trace.
    pub fn enable_tracing(&mut self) {
        self.tracing = true;
        self.trace.clear();
    }

    /// Stops recording; the captured trace is kept.
    pub fn disable_tracing(&mut self) {
        self.tracing = false;
    }

    /// Draws recorded since tracing was enabled.
    pub fn trace(&self) -> &[RngTraceEntry] {
        &self.trace
    }

    #[inline]
    fn record(&mut self, op: RngOp, arg: TraceValue, result: TraceValue) {
        if self.tracing {
            self.trace.push(RngTraceEntry {
                seq: self.counter,
                op,
                arg,
                result,
            });
        }
        self.counter += 1;
    }
}
