// Knapsack Error Type

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum KnapsackError {
    /// A caller-supplied size, key or configuration value is unusable
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
    /// No prime modulus or coprime multiplier could be found
    #[error("key generation failed: {0}")]
    KeyGeneration(String),
    /// The private key cannot be used to decrypt
    #[error("invalid key: {0}")]
    InvalidKey(String),
    /// The bit codec only carries code points 0..=255
    #[error("character {ch:?} at position {position} does not fit in 8 bits")]
    UnsupportedCharacter { ch: char, position: usize },
}

pub type Result<T> = std::result::Result<T, KnapsackError>;
