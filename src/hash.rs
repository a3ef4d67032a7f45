//! Home-slot hash functions for string keys

/// Multiplier applied to the key length by [`HashStrategy::LengthScaled`]
pub const LARGE_CONSTANT: u64 = 2_654_435_761;

/// Radix used by [`HashStrategy::Base27`]
const RADIX: u64 = 27;

/// How a key is mapped to its home slot.
///
/// All strategies are deterministic and return a position in `0..capacity`. They differ only in
/// how many keys share a home slot; probing keeps the table correct either way.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum HashStrategy {
    /// `len(key) mod capacity`
    Length,
    /// Horner evaluation in base 27, lowercase letters counting as digits 1-26
    Base27,
    /// `(len(key) * LARGE_CONSTANT) mod capacity`
    #[default]
    LengthScaled,
}

impl HashStrategy {
    /// Every strategy, in declaration order
    pub const ALL: [Self; 3] = [Self::Length, Self::Base27, Self::LengthScaled];

    /// Maps `key` to a slot in `0..capacity`. A zero capacity is treated as one.
    #[must_use]
    #[allow(clippy::arithmetic_side_effects, clippy::cast_possible_truncation)]
    pub fn index(self, key: &str, capacity: usize) -> usize {
        let modulus = capacity.max(1) as u64;
        let len = key.len() as u64;

        let hash = match self {
            Self::Length => len % modulus,
            Self::Base27 => key.bytes().fold(0, |acc, byte| {
                let digit = base27_digit(byte);
                let acc = u128::from(acc) * u128::from(RADIX) + u128::from(digit);
                (acc % u128::from(modulus)) as u64
            }),
            Self::LengthScaled => {
                ((u128::from(len) * u128::from(LARGE_CONSTANT)) % u128::from(modulus)) as u64
            }
        };

        // `hash < modulus`, which came from a usize
        hash as usize
    }

    /// Short human-readable name
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Length => "length",
            Self::Base27 => "base-27",
            Self::LengthScaled => "length-scaled",
        }
    }
}

/// Digit value of a byte in the base-27 hash
#[allow(clippy::arithmetic_side_effects)]
fn base27_digit(byte: u8) -> u64 {
    if byte.is_ascii_lowercase() {
        u64::from(byte - b'a') + 1
    } else {
        u64::from(byte) % RADIX
    }
}
