//! Hash functions that can be injected into the maps.
//!
//! A map only needs a deterministic `Fn(&str) -> u64`; it reduces the result modulo its
//! prime capacity itself. Poorly distributed functions such as [`additive_hash`] stay
//! correct, they just make probe sequences and chains longer.

use std::hash::{DefaultHasher, Hash, Hasher};

/// Plain function pointer type used as the default hash parameter of both maps
pub type HashFunction = fn(&str) -> u64;

/// Sum of the key's bytes. Anagrams always collide.
#[must_use]
pub fn additive_hash(key: &str) -> u64 {
    key.bytes().fold(0_u64, |hash, byte| hash.wrapping_add(u64::from(byte)))
}

/// Sum of each byte weighted by its one-based position in the key.
#[must_use]
pub fn positional_hash(key: &str) -> u64 {
    key.bytes().zip(1_u64..).fold(0_u64, |hash, (byte, position)| {
        hash.wrapping_add(position.wrapping_mul(u64::from(byte)))
    })
}

/// The standard library's `DefaultHasher`, created fresh for each key so the result is
/// stable for the life of the process.
#[must_use]
pub fn std_hash(key: &str) -> u64 {
    let mut hasher = DefaultHasher::new();
    key.hash(&mut hasher);
    hasher.finish()
}
