// Knapsack Encryption Implementation
// Sums the public key elements selected by each block of plaintext bits

use super::codec::text_to_bits;
use super::error::{KnapsackError, Result};
use super::keygen::PublicKey;

/// Encrypt text using the knapsack public key
/// Returns one sum per block of `public_key.len()` bits
pub fn encrypt(plaintext: &str, public_key: &PublicKey) -> Result<Vec<u64>> {
    let bits = text_to_bits(plaintext)?;
    encrypt_bits(&bits, public_key)
}

/// Encrypt a bit sequence using the knapsack public key.
///
/// The bits are split into blocks of n = `public_key.len()`. A final block
/// shorter than n only sums the key elements it covers, so it will not
/// decrypt back to the same bits; pad to a multiple of n when an exact
/// round trip matters.
pub fn encrypt_bits(bits: &[u8], public_key: &PublicKey) -> Result<Vec<u64>> {
    if public_key.is_empty() {
        return Err(KnapsackError::InvalidParameter(
            "public key is empty".to_string(),
        ));
    }

    bits.chunks(public_key.len())
        .map(|block| encrypt_block(block, &public_key.hard))
        .collect()
}

fn encrypt_block(block: &[u8], hard: &[u64]) -> Result<u64> {
    block
        .iter()
        .zip(hard)
        .filter(|&(&bit, _)| bit != 0)
        .try_fold(0u64, |sum, (_, &h)| sum.checked_add(h))
        .ok_or_else(|| {
            KnapsackError::InvalidParameter("block sum overflows 64 bits".to_string())
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_key() -> PublicKey {
        PublicKey::new(vec![6, 9, 4])
    }

    #[test]
    fn test_encrypt_blocks() {
        // "AAA" = 01000001 01000001 01000001, eight blocks of three bits
        let ciphertext = encrypt("AAA", &sample_key()).unwrap();
        assert_eq!(ciphertext, vec![9, 0, 9, 6, 0, 10, 0, 4]);
    }

    #[test]
    fn test_encrypt_short_final_block() {
        // "A" = [0,1,0] [0,0,0] [0,1]
        let ciphertext = encrypt("A", &sample_key()).unwrap();
        assert_eq!(ciphertext, vec![9, 0, 9]);
    }

    #[test]
    fn test_encrypt_bits_matches_text() {
        let key = sample_key();
        let bits = text_to_bits("Hi").unwrap();
        assert_eq!(encrypt_bits(&bits, &key).unwrap(), encrypt("Hi", &key).unwrap());
    }

    #[test]
    fn test_encrypt_empty_message() {
        assert!(encrypt("", &sample_key()).unwrap().is_empty());
    }

    #[test]
    fn test_encrypt_empty_key() {
        let result = encrypt("A", &PublicKey::new(vec![]));
        assert!(matches!(result, Err(KnapsackError::InvalidParameter(_))));
    }

    #[test]
    fn test_encrypt_wide_character() {
        let result = encrypt("Ω", &sample_key());
        assert!(matches!(result, Err(KnapsackError::UnsupportedCharacter { .. })));
    }

    #[test]
    fn test_encrypt_overflow() {
        let key = PublicKey::new(vec![u64::MAX, 1]);
        let result = encrypt_bits(&[1, 1], &key);
        assert!(matches!(result, Err(KnapsackError::InvalidParameter(_))));
    }
}
