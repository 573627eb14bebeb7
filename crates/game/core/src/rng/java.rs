//! 48-bit linear congruential generator used for pile shuffles.
//!
//! The reference game never shuffles a pile with its xorshift streams
//! directly: it draws one `random_long()` from the shuffle stream and seeds a
//! throw-away LCG with it, then runs a Fisher–Yates pass driven by that LCG.
//! Reproducing draw order therefore requires this generator as well.

const MULTIPLIER: i64 = 0x5_DEEC_E66D;
const ADDEND: i64 = 0xB;
const MASK: i64 = (1 << 48) - 1;

/// Single-use shuffle generator.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct JavaRandom {
    seed: i64,
}

impl JavaRandom {
    /// Scrambles the seed the way the reference constructor does.
    pub fn new(seed: i64) -> Self {
        Self {
            seed: (seed ^ MULTIPLIER) & MASK,
        }
    }

    fn next(&mut self, bits: u32) -> i32 {
        self.seed = self
            .seed
            .wrapping_mul(MULTIPLIER)
            .wrapping_add(ADDEND)
            & MASK;
        (self.seed >> (48 - bits)) as i32
    }

    /// Uniform value in `[0, bound)`.
    ///
    /// Powers of two take the high bits; other bounds reject the values that
    /// would bias the modulo, using 32-bit wrapping arithmetic.
    pub fn next_int(&mut self, bound: i32) -> i32 {
        debug_assert!(bound > 0, "bound must be positive");
        let mut r = self.next(31);
        let m = bound - 1;
        if bound & m == 0 {
            return ((i64::from(bound) * i64::from(r)) >> 31) as i32;
        }
        let mut u = r;
        loop {
            r = u % bound;
            if u.wrapping_sub(r).wrapping_add(m) >= 0 {
                return r;
            }
            u = self.next(31);
        }
    }

    /// In-place Fisher–Yates pass walking from the end of the slice.
    pub fn shuffle<T>(&mut self, items: &mut [T]) {
        for i in (2..=items.len()).rev() {
            let j = self.next_int(i as i32) as usize;
            items.swap(i - 1, j);
        }
    }
}
