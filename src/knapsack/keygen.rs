// Knapsack Key Generation
// Builds a superincreasing easy key, a prime modulus and a multiplier,
// then derives the public hard key from them

use std::fmt;

use rand::{Rng, RngCore};
use tracing::{debug, trace};

use super::arith::{gcd, is_prime, is_superincreasing, mul_mod};
use super::error::{KnapsackError, Result};
use super::params::KeyGenParams;

/// Source of uniform integer draws for key generation
pub trait RandomSource {
    /// Uniform draw from the inclusive range `low..=high`
    fn draw(&mut self, low: u64, high: u64) -> u64;
}

impl<R: RngCore + ?Sized> RandomSource for R {
    fn draw(&mut self, low: u64, high: u64) -> u64 {
        Rng::gen_range(self, low..=high)
    }
}

/// Knapsack Public Key (the hard sequence h)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublicKey {
    pub hard: Vec<u64>,
}

/// Knapsack Private Key (e, q, w)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrivateKey {
    pub easy: Vec<u64>,  // Superincreasing sequence
    pub modulus: u64,    // Prime q > 2 * e[n-1]
    pub multiplier: u64, // w with gcd(w, q) = 1
}

/// Knapsack Key Pair (both public and private keys)
#[derive(Debug, Clone)]
pub struct KeyPair {
    pub public_key: PublicKey,
    pub private_key: PrivateKey,
}

impl PublicKey {
    pub fn new(hard: Vec<u64>) -> Self {
        Self { hard }
    }

    /// Number of elements, which is also the block size in bits
    pub fn len(&self) -> usize {
        self.hard.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hard.is_empty()
    }

    /// Encrypt text using this public key
    pub fn encrypt(&self, plaintext: &str) -> Result<Vec<u64>> {
        use super::encrypt::encrypt;
        encrypt(plaintext, self)
    }

    /// Encrypt a raw bit sequence using this public key
    pub fn encrypt_bits(&self, bits: &[u8]) -> Result<Vec<u64>> {
        use super::encrypt::encrypt_bits;
        encrypt_bits(bits, self)
    }
}

impl PrivateKey {
    /// Build a private key from its parts without checking it.
    /// Use [`PrivateKey::validate`] for untrusted input.
    pub fn new(easy: Vec<u64>, modulus: u64, multiplier: u64) -> Self {
        Self {
            easy,
            modulus,
            multiplier,
        }
    }

    pub fn len(&self) -> usize {
        self.easy.len()
    }

    pub fn is_empty(&self) -> bool {
        self.easy.is_empty()
    }

    /// Derive the public key: h[i] = (w * e[i]) mod q
    pub fn public_key(&self) -> Result<PublicKey> {
        if self.modulus == 0 {
            return Err(KnapsackError::InvalidKey("modulus is zero".to_string()));
        }
        let hard = self
            .easy
            .iter()
            .map(|&e| mul_mod(self.multiplier, e, self.modulus))
            .collect();
        Ok(PublicKey { hard })
    }

    /// Check every invariant a generated key satisfies.
    /// Primality of q is checked by trial division, so this is slow for huge moduli.
    pub fn validate(&self) -> Result<()> {
        let largest = match self.easy.last() {
            Some(&e) => e,
            None => return Err(KnapsackError::InvalidKey("easy key is empty".to_string())),
        };

        if !is_superincreasing(&self.easy) {
            return Err(KnapsackError::InvalidKey(
                "easy key is not superincreasing".to_string(),
            ));
        }
        if !is_prime(self.modulus) {
            return Err(KnapsackError::InvalidKey(format!(
                "modulus {} is not prime",
                self.modulus
            )));
        }
        if u128::from(self.modulus) <= 2 * u128::from(largest) {
            return Err(KnapsackError::InvalidKey(format!(
                "modulus {} does not exceed twice the largest easy element {}",
                self.modulus, largest
            )));
        }
        if self.multiplier < 2 || self.multiplier >= self.modulus {
            return Err(KnapsackError::InvalidKey(format!(
                "multiplier {} outside [2, {}]",
                self.multiplier,
                self.modulus - 1
            )));
        }
        if gcd(self.multiplier, self.modulus) != 1 {
            return Err(KnapsackError::InvalidKey(format!(
                "multiplier {} is not coprime to modulus {}",
                self.multiplier, self.modulus
            )));
        }
        Ok(())
    }

    /// Decrypt ciphertext to text using this private key
    pub fn decrypt(&self, ciphertext: &[u64]) -> Result<String> {
        use super::decrypt::decrypt;
        decrypt(ciphertext, self)
    }

    /// Decrypt ciphertext to the raw bit sequence, n bits per value
    pub fn decrypt_bits(&self, ciphertext: &[u64]) -> Result<Vec<u8>> {
        use super::decrypt::decrypt_bits;
        decrypt_bits(ciphertext, self)
    }
}

impl KeyPair {
    /// Number of elements in each key
    pub fn key_size(&self) -> usize {
        self.public_key.len()
    }
}

impl fmt::Display for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.hard)
    }
}

impl fmt::Display for PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:?}, {}, {})", self.easy, self.modulus, self.multiplier)
    }
}

/// Generate a key pair with `n` elements using the default parameters
pub fn generate_keypair<R: RandomSource + ?Sized>(n: usize, rng: &mut R) -> Result<KeyPair> {
    generate_keypair_with(n, &KeyGenParams::default(), rng)
}

/// Generate a key pair with `n` elements
///
/// Fails with `InvalidParameter` if `n` is zero and with `KeyGeneration`
/// when the easy key grows too large for a modulus below
/// `params.prime_upper_bound`.
pub fn generate_keypair_with<R: RandomSource + ?Sized>(
    n: usize,
    params: &KeyGenParams,
    rng: &mut R,
) -> Result<KeyPair> {
    if n == 0 {
        return Err(KnapsackError::InvalidParameter(
            "key size must be at least 1".to_string(),
        ));
    }
    params.validate()?;

    // Step 1: Superincreasing easy key
    let easy = generate_easy_key(n, rng)?;
    let largest = easy[easy.len() - 1];

    // Step 2: Prime modulus q > 2 * e[n-1]
    let modulus = choose_modulus(largest, params, rng)?;

    // Step 3: Multiplier coprime to q
    let multiplier = choose_multiplier(modulus, params, rng)?;

    // Step 4: h[i] = w * e[i] mod q
    let private_key = PrivateKey::new(easy, modulus, multiplier);
    let public_key = private_key.public_key()?;

    debug!(n, modulus, multiplier, "generated knapsack key pair");

    Ok(KeyPair {
        public_key,
        private_key,
    })
}

/// Each element is drawn from [sum + 1, sum + 2n], where sum covers all earlier elements
fn generate_easy_key<R: RandomSource + ?Sized>(n: usize, rng: &mut R) -> Result<Vec<u64>> {
    let overflow = || KnapsackError::KeyGeneration("easy key overflowed 64 bits".to_string());

    let spread = u64::try_from(n)
        .ok()
        .and_then(|n| n.checked_mul(2))
        .ok_or_else(overflow)?;

    let mut easy = Vec::new();
    let mut sum: u64 = 0;
    for _ in 0..n {
        let low = sum.checked_add(1).ok_or_else(overflow)?;
        let high = sum.checked_add(spread).ok_or_else(overflow)?;
        let e = rng.draw(low, high);
        easy.push(e);
        sum = sum.checked_add(e).ok_or_else(overflow)?;
    }

    Ok(easy)
}

fn choose_modulus<R: RandomSource + ?Sized>(
    largest: u64,
    params: &KeyGenParams,
    rng: &mut R,
) -> Result<u64> {
    let upper = params.prime_upper_bound;
    let lower = largest
        .checked_mul(2)
        .and_then(|x| x.checked_add(1))
        .filter(|&lower| lower <= upper)
        .ok_or_else(|| {
            KnapsackError::KeyGeneration(format!(
                "largest easy element {} leaves no room for a modulus below {}",
                largest, upper
            ))
        })?;

    for _ in 0..params.max_prime_attempts {
        let q = rng.draw(lower, upper);
        if is_prime(q) {
            return Ok(q);
        }
        trace!(q, "rejected modulus candidate");
    }

    debug!(lower, upper, "random modulus search exhausted, scanning upward");
    (lower..=upper).find(|&q| is_prime(q)).ok_or_else(|| {
        KnapsackError::KeyGeneration(format!("no prime in [{}, {}]", lower, upper))
    })
}

fn choose_multiplier<R: RandomSource + ?Sized>(
    modulus: u64,
    params: &KeyGenParams,
    rng: &mut R,
) -> Result<u64> {
    if modulus < 3 {
        return Err(KnapsackError::KeyGeneration(format!(
            "modulus {} has no multiplier in [2, q-1]",
            modulus
        )));
    }

    for _ in 0..params.max_multiplier_attempts {
        let w = rng.draw(2, modulus - 1);
        if gcd(w, modulus) == 1 {
            return Ok(w);
        }
        trace!(w, "rejected multiplier candidate");
    }

    debug!(modulus, "random multiplier search exhausted, scanning upward");
    (2..modulus).find(|&w| gcd(w, modulus) == 1).ok_or_else(|| {
        KnapsackError::KeyGeneration(format!("no multiplier coprime to {}", modulus))
    })
}
