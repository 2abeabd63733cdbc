// Key Generation Parameters

use super::error::{KnapsackError, Result};

/// Inclusive upper end of the search for the prime modulus
pub const DEFAULT_PRIME_UPPER_BOUND: u64 = 10_000;

/// Random draws allowed before falling back to a linear scan
pub const DEFAULT_MAX_ATTEMPTS: usize = 10_000;

/// Configuration for knapsack key generation
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KeyGenParams {
    pub prime_upper_bound: u64,
    pub max_prime_attempts: usize,
    pub max_multiplier_attempts: usize,
}

impl Default for KeyGenParams {
    fn default() -> Self {
        Self {
            prime_upper_bound: DEFAULT_PRIME_UPPER_BOUND,
            max_prime_attempts: DEFAULT_MAX_ATTEMPTS,
            max_multiplier_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }
}

impl KeyGenParams {
    pub fn with_prime_upper_bound(mut self, bound: u64) -> Self {
        self.prime_upper_bound = bound;
        self
    }

    pub fn with_max_prime_attempts(mut self, attempts: usize) -> Self {
        self.max_prime_attempts = attempts;
        self
    }

    pub fn with_max_multiplier_attempts(mut self, attempts: usize) -> Self {
        self.max_multiplier_attempts = attempts;
        self
    }

    /// The smallest modulus that can satisfy q > 2 * e[0] is 3
    pub fn validate(&self) -> Result<()> {
        if self.prime_upper_bound < 3 {
            return Err(KnapsackError::InvalidParameter(format!(
                "prime upper bound must be at least 3, got {}",
                self.prime_upper_bound
            )));
        }
        Ok(())
    }
}
