// Knapsack Module - Main module file
// Exports all Merkle-Hellman knapsack functionality

pub mod arith;
pub mod codec;
pub mod decrypt;
pub mod encrypt;
pub mod error;
pub mod keygen;
pub mod params;

pub use arith::{gcd, is_prime, is_superincreasing, mod_inverse};
pub use codec::{bits_to_text, text_to_bits, BITS_PER_CHAR};
pub use decrypt::{decrypt, decrypt_bits};
pub use encrypt::{encrypt, encrypt_bits};
pub use error::{KnapsackError, Result};
pub use keygen::{generate_keypair, generate_keypair_with, KeyPair, PrivateKey, PublicKey, RandomSource};
pub use params::KeyGenParams;
