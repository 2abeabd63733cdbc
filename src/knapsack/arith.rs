// Knapsack Integer Arithmetic
// Primality, gcd and modular inverse helpers used by key generation and decryption

use num_integer::Integer;
use num_traits::{One, Zero};

/// Trial-division primality check.
///
/// A number is prime when it is greater than 1 and has no divisor in
/// `[2, num / 2]`. This is O(num), which is fine while moduli stay in the
/// low thousands.
pub fn is_prime(num: u64) -> bool {
    if num <= 1 {
        return false;
    }
    (2..=num / 2).all(|d| num % d != 0)
}

/// Greatest common divisor
pub fn gcd(a: u64, b: u64) -> u64 {
    a.gcd(&b)
}

/// Compute modular inverse: a^(-1) mod m
/// Returns None if inverse doesn't exist
pub fn mod_inverse(a: u64, m: u64) -> Option<u64> {
    if m < 2 {
        return None;
    }

    let egcd = i128::from(a).extended_gcd(&i128::from(m));
    if !egcd.gcd.is_one() {
        return None;
    }

    let m_wide = i128::from(m);
    let inv = egcd.x.rem_euclid(m_wide);
    if inv.is_zero() {
        return None;
    }

    u64::try_from(inv).ok()
}

/// (a * b) mod m without overflowing 64 bits
pub fn mul_mod(a: u64, b: u64, m: u64) -> u64 {
    ((u128::from(a) * u128::from(b)) % u128::from(m)) as u64
}

/// Every element strictly exceeds the sum of all elements before it
pub fn is_superincreasing(seq: &[u64]) -> bool {
    let mut sum: u128 = 0;
    for &x in seq {
        if u128::from(x) <= sum {
            return false;
        }
        sum += u128::from(x);
    }
    true
}
