//! Seed Value Object
//!
//! A seed makes generation reproducible: the PRNG is keyed with the
//! SHA-256 digest of the seed string.

use rand::SeedableRng;
use rand::rngs::StdRng;
use std::fmt;

pub const SEED_MAX_LENGTH: usize = 64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedError {
    Length,
    Characters,
}

impl SeedError {
    pub fn message(&self) -> &'static str {
        match self {
            SeedError::Length => "Seed musi mieć od 1 do 64 znaków",
            SeedError::Characters => "Seed może zawierać tylko litery, cyfry oraz znaki . _ -",
        }
    }
}

impl fmt::Display for SeedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

impl std::error::Error for SeedError {}

/// 1..=64 characters from `[A-Za-z0-9._-]`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Seed(String);

impl Seed {
    pub fn new(raw: impl Into<String>) -> Result<Self, SeedError> {
        let raw = raw.into();

        if raw.is_empty() || raw.len() > SEED_MAX_LENGTH {
            return Err(SeedError::Length);
        }

        if !raw
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'))
        {
            return Err(SeedError::Characters);
        }

        Ok(Self(raw))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Deterministic PRNG for this seed
    pub fn rng(&self) -> StdRng {
        StdRng::from_seed(platform::crypto::sha256(self.0.as_bytes()))
    }
}

impl fmt::Display for Seed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
