//! Human-readable seed strings.
//!
//! Seeds are displayed in base 35 using the digits and capital letters minus
//! `O`, which is read as `0`. Parsing folds each character positionally into
//! a wrapping 64-bit total; rendering treats the seed as unsigned.

/// Digit alphabet, indexed by digit value.
pub const SEED_ALPHABET: &[u8; 35] = b"0123456789ABCDEFGHIJKLMNPQRSTUVWXYZ";

const BASE: u64 = SEED_ALPHABET.len() as u64;

/// Seed parsing failures.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SeedError {
    #[error("seed string is empty")]
    Empty,

    #[error("invalid seed character {character:?} at position {position}")]
    InvalidCharacter { character: char, position: usize },
}

/// Converts a seed string to its numeric form (case-insensitive).
pub fn seed_from_str(text: &str) -> Result<i64, SeedError> {
    if text.is_empty() {
        return Err(SeedError::Empty);
    }

    let mut total: u64 = 0;
    for (position, character) in text.chars().enumerate() {
        let digit = digit_value(character)
            .ok_or(SeedError::InvalidCharacter { character, position })?;
        total = total.wrapping_mul(BASE).wrapping_add(digit);
    }
    Ok(total as i64)
}

/// Renders a numeric seed as a seed string. Zero renders as `"0"`.
pub fn seed_to_string(seed: i64) -> String {
    let mut left = seed as u64;
    if left == 0 {
        return "0".to_string();
    }

    let mut digits = Vec::new();
    while left != 0 {
        digits.push(SEED_ALPHABET[(left % BASE) as usize]);
        left /= BASE;
    }
    digits.iter().rev().map(|&b| b as char).collect()
}

fn digit_value(character: char) -> Option<u64> {
    let upper = match character.to_ascii_uppercase() {
        'O' => '0',
        other => other,
    };
    SEED_ALPHABET
        .iter()
        .position(|&b| b as char == upper)
        .map(|index| index as u64)
}
