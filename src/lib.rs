//! Merkle-Hellman knapsack public-key encryption.
//!
//! A superincreasing "easy" sequence, a prime modulus and a multiplier form
//! the private key; scaling the easy sequence by the multiplier gives the
//! public "hard" sequence. Text is encrypted eight bits per character, one
//! subset sum per block of key-size bits.
//!
//! This construction is breakable by lattice reduction and is only meant
//! for teaching.

pub mod knapsack;

pub use knapsack::{
    decrypt, encrypt, generate_keypair, generate_keypair_with, KeyGenParams, KeyPair,
    KnapsackError, PrivateKey, PublicKey, RandomSource, Result,
};
