//! Two-word xorshift128+ generator.
//!
//! Bit-exact replica of the generator behind the reference game's random
//! streams: the state words are derived from the seed through two rounds of
//! the MurmurHash3 64-bit finaliser, and every draw advances the state by one
//! xorshift128+ step. All arithmetic is performed on `u64` with wrapping
//! semantics and reinterpreted as `i64` wherever the reference uses signed
//! comparisons.

/// Scale factor turning 53 random bits into a double in `[0, 1)`.
const NORM_DOUBLE: f64 = 1.0 / (1u64 << 53) as f64;

/// Scale factor turning 24 random bits into a float in `[0, 1)`.
const NORM_FLOAT: f64 = 1.0 / (1u64 << 24) as f64;

/// xorshift128+ state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Xs128 {
    seed0: u64,
    seed1: u64,
}

impl Xs128 {
    /// Seeds the generator. A zero seed is replaced by `i64::MIN` before
    /// hashing, as the reference does.
    pub fn new(seed: i64) -> Self {
        let seed = if seed == 0 { i64::MIN } else { seed };
        let seed0 = murmur_hash3(seed as u64);
        Self::from_state(seed0, murmur_hash3(seed0))
    }

    /// Rebuilds a generator from raw state words.
    pub const fn from_state(seed0: u64, seed1: u64) -> Self {
        Self { seed0, seed1 }
    }

    /// Returns the raw state words.
    pub const fn state(&self) -> (u64, u64) {
        (self.seed0, self.seed1)
    }

    /// Advances the state once and returns the next 64 random bits.
    #[inline]
    pub fn next_u64(&mut self) -> u64 {
        let mut s1 = self.seed0;
        let s0 = self.seed1;
        self.seed0 = s0;
        s1 ^= s1 << 23;
        self.seed1 = s1 ^ s0 ^ (s1 >> 17) ^ (s0 >> 26);
        self.seed1.wrapping_add(s0)
    }

    /// Signed view of [`Self::next_u64`].
    #[inline]
    pub fn next_long(&mut self) -> i64 {
        self.next_u64() as i64
    }

    /// Uniform value in `[0, n)` using the reference rejection loop.
    ///
    /// The loop only rejects when `bits - value + (n - 1)` overflows a signed
    /// 64-bit integer, which keeps the output free of modulo bias for every
    /// `n` while almost always consuming a single step.
    ///
    /// Returns 0 without consuming state when `n <= 0`.
    pub fn next_long_bounded(&mut self, n: i64) -> i64 {
        if n <= 0 {
            return 0;
        }
        loop {
            let bits = (self.next_u64() >> 1) as i64;
            let value = bits % n;
            if bits.wrapping_sub(value).wrapping_add(n - 1) >= 0 {
                return value;
            }
        }
    }

    /// Uniform `int` in `[0, n)`; truncates like the reference's narrowing cast.
    #[inline]
    pub fn next_int_bounded(&mut self, n: i32) -> i32 {
        self.next_long_bounded(i64::from(n)) as i32
    }

    /// Uniform double in `[0, 1)` built from the top 53 bits.
    #[inline]
    pub fn next_double(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 * NORM_DOUBLE
    }

    /// Uniform float in `[0, 1)` built from the top 24 bits.
    #[inline]
    pub fn next_float(&mut self) -> f32 {
        ((self.next_u64() >> 40) as f64 * NORM_FLOAT) as f32
    }

    /// Fair coin from the lowest bit.
    #[inline]
    pub fn next_bool(&mut self) -> bool {
        self.next_u64() & 1 != 0
    }
}

/// MurmurHash3 64-bit finaliser used for seed scrambling.
#[inline]
pub const fn murmur_hash3(mut x: u64) -> u64 {
    x ^= x >> 33;
    x = x.wrapping_mul(0xff51_afd7_ed55_8ccd);
    x ^= x >> 33;
    x = x.wrapping_mul(0xc4ce_b9fe_1a85_ec53);
    x ^= x >> 33;
    x
}
