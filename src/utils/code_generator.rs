//! Short code generation and format validation.
//!
//! Codes are drawn from the 62-character alphabet `A-Za-z0-9`, one
//! independent uniform draw per character.

use rand::Rng;
use regex::Regex;
use std::sync::LazyLock;

/// Characters a short code may contain.
pub const ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

/// Shortest generated code.
pub const MIN_GENERATED_LEN: usize = 6;

/// Longest generated code.
pub const MAX_GENERATED_LEN: usize = 8;

/// Longest caller-supplied code.
pub const MAX_CODE_LEN: usize = 20;

/// Total number of candidates tried before giving up.
pub const MAX_ATTEMPTS: usize = 20;

/// Number of candidates with a random length; the rest are fixed at
/// [`MAX_GENERATED_LEN`].
pub const RANDOM_LENGTH_ATTEMPTS: usize = 10;

static CODE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!("^[A-Za-z0-9]{{1,{MAX_CODE_LEN}}}$")).expect("static regex is valid")
});

/// Returns true if `code` is 1-20 ASCII alphanumeric characters.
///
/// ```ignore
/// assert!(is_valid_code("abc123"));
/// assert!(!is_valid_code("my-link"));
/// assert!(!is_valid_code(""));
/// ```
pub fn is_valid_code(code: &str) -> bool {
    CODE_REGEX.is_match(code)
}

/// Generates a code of exactly `len` characters.
pub fn generate_code<R: Rng>(rng: &mut R, len: usize) -> String {
    (0..len)
        .map(|_| ALPHABET[rng.random_range(0..ALPHABET.len())] as char)
        .collect()
}

/// Lazy, bounded sequence of [`MAX_ATTEMPTS`] candidate codes.
///
/// The first [`RANDOM_LENGTH_ATTEMPTS`] candidates have a length drawn
/// uniformly from `6..=8`; every later candidate is 8 characters long.
pub fn candidates<R: Rng>(mut rng: R) -> impl Iterator<Item = String> {
    (0..MAX_ATTEMPTS).map(move |attempt| {
        let len = if attempt < RANDOM_LENGTH_ATTEMPTS {
            rng.random_range(MIN_GENERATED_LEN..=MAX_GENERATED_LEN)
        } else {
            MAX_GENERATED_LEN
        };
        generate_code(&mut rng, len)
    })
}
