// Knapsack Decryption Implementation
// Undoes the modular scaling, then recovers each block greedily from the easy key

use tracing::warn;

use super::arith::{mod_inverse, mul_mod};
use super::codec::bits_to_text;
use super::error::{KnapsackError, Result};
use super::keygen::PrivateKey;

/// Decrypt ciphertext to text using the knapsack private key
pub fn decrypt(ciphertext: &[u64], private_key: &PrivateKey) -> Result<String> {
    let bits = decrypt_bits(ciphertext, private_key)?;
    Ok(bits_to_text(&bits))
}

/// Decrypt ciphertext to bits.
///
/// Every value yields exactly n = `private_key.len()` bits, including a value
/// that came from a short final block.
pub fn decrypt_bits(ciphertext: &[u64], private_key: &PrivateKey) -> Result<Vec<u8>> {
    if private_key.is_empty() {
        return Err(KnapsackError::InvalidParameter(
            "private key is empty".to_string(),
        ));
    }

    let q = private_key.modulus;
    let w_inv = mod_inverse(private_key.multiplier, q).ok_or_else(|| {
        KnapsackError::InvalidKey(format!(
            "multiplier {} has no inverse modulo {}",
            private_key.multiplier, q
        ))
    })?;

    let mut bits = Vec::with_capacity(ciphertext.len() * private_key.len());
    for (index, &c) in ciphertext.iter().enumerate() {
        let c_prime = mul_mod(c, w_inv, q);
        bits.extend(solve_block(c_prime, &private_key.easy, index));
    }

    Ok(bits)
}

/// Greedy subset-sum over a superincreasing sequence, largest element first
fn solve_block(mut target: u64, easy: &[u64], index: usize) -> Vec<u8> {
    let mut block = vec![0u8; easy.len()];

    for (bit, &e) in block.iter_mut().zip(easy).rev() {
        if target >= e {
            *bit = 1;
            target -= e;
        }
    }

    if target != 0 {
        warn!(block = index, residue = target, "ciphertext value is not a subset sum of the easy key");
    }

    block
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::knapsack::encrypt::encrypt;
    use crate::knapsack::keygen::generate_keypair;
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;

    fn sample_key() -> PrivateKey {
        PrivateKey::new(vec![2, 3, 7], 17, 3)
    }

    #[test]
    fn test_decrypt_known_ciphertext() {
        let ciphertext = vec![9, 0, 9, 6, 0, 10, 0, 4];
        assert_eq!(decrypt(&ciphertext, &sample_key()).unwrap(), "AAA");
    }

    #[test]
    fn test_solve_block() {
        // 12 = 2 + 3 + 7
        assert_eq!(solve_block(12, &[2, 3, 7], 0), vec![1, 1, 1]);
        assert_eq!(solve_block(9, &[2, 3, 7], 0), vec![1, 0, 1]);
        assert_eq!(solve_block(0, &[2, 3, 7], 0), vec![0, 0, 0]);
    }

    #[test]
    fn test_roundtrip_aligned_messages() {
        let mut rng = ChaCha20Rng::seed_from_u64(2023);
        for n in 1..=8 {
            let keypair = generate_keypair(n, &mut rng).unwrap();
            // n characters give 8n bits, always a whole number of blocks
            let message: String = "Knapsack".chars().cycle().take(n * 3).collect();

            let ciphertext = encrypt(&message, &keypair.public_key).unwrap();
            assert_eq!(ciphertext.len(), message.len() * 8 / n);

            let decrypted = decrypt(&ciphertext, &keypair.private_key).unwrap();
            assert_eq!(decrypted, message);
        }
    }

    #[test]
    fn test_short_final_block_quirk() {
        // "A" splits into [0,1,0] [0,0,0] [0,1]; the last value decrypts to a
        // full block [0,1,0], so one extra bit (a NUL) trails the message
        let ciphertext = vec![9, 0, 9];
        let bits = decrypt_bits(&ciphertext, &sample_key()).unwrap();
        assert_eq!(bits, vec![0, 1, 0, 0, 0, 0, 0, 1, 0]);
        assert_eq!(decrypt(&ciphertext, &sample_key()).unwrap(), "A\u{0}");
    }

    #[test]
    fn test_decrypt_non_invertible_multiplier() {
        let key = PrivateKey::new(vec![2, 3, 7], 18, 3);
        let result = decrypt(&[9], &key);
        assert!(matches!(result, Err(KnapsackError::InvalidKey(_))));
    }

    #[test]
    fn test_decrypt_degenerate_modulus() {
        for q in [0, 1] {
            let key = PrivateKey::new(vec![2, 3, 7], q, 3);
            assert!(matches!(decrypt(&[9], &key), Err(KnapsackError::InvalidKey(_))));
        }
    }

    #[test]
    fn test_decrypt_empty_key() {
        let key = PrivateKey::new(vec![], 17, 3);
        assert!(matches!(decrypt(&[9], &key), Err(KnapsackError::InvalidParameter(_))));
    }

    #[test]
    fn test_decrypt_empty_ciphertext() {
        assert_eq!(decrypt(&[], &sample_key()).unwrap(), "");
    }
}
