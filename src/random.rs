//! Reproducible random number generation with a public hex-encoded seed.

use rand::{rngs::OsRng, RngCore, SeedableRng};
use rand_xoshiro::Xoshiro256PlusPlus;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use thiserror::Error;

type SeedInner = [u8; 32];

/// 256-bit PRNG seed, printed and parsed as 64 hex digits.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Seed(SeedInner);

impl Seed {
    pub fn from_entropy() -> Self {
        let mut buf = SeedInner::default();
        OsRng.fill_bytes(&mut buf);
        Self(buf)
    }
}

/// Deterministic generator for the given seed.
pub fn rng_from_seed(seed: Seed) -> Xoshiro256PlusPlus {
    Xoshiro256PlusPlus::from_seed(seed.into())
}

/// Resolves an optional seed to a concrete one (drawing from entropy if
/// absent) together with the generator it produces, so callers can report
/// the seed that was actually used.
pub fn seeded_rng(seed: Option<Seed>) -> (Seed, Xoshiro256PlusPlus) {
    let seed = seed.unwrap_or_else(Seed::from_entropy);
    (seed, rng_from_seed(seed))
}

impl From<SeedInner> for Seed {
    #[inline]
    fn from(arr: SeedInner) -> Self {
        Self(arr)
    }
}

impl From<Seed> for SeedInner {
    #[inline]
    fn from(seed: Seed) -> Self {
        seed.0
    }
}

impl TryFrom<String> for Seed {
    type Error = SeedFromHexError;

    fn try_from(value: String) -> Result<Self, SeedFromHexError> {
        let bytes = hex::decode(value)?;
        let arr = SeedInner::try_from(&bytes[..])?;
        Ok(Self(arr))
    }
}

impl<'de> Deserialize<'de> for Seed {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(Seed(hex::serde::deserialize(deserializer)?))
    }
}

impl Serialize for Seed {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        hex::serde::serialize(self.0, serializer)
    }
}

impl fmt::Display for Seed {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", hex::encode(self.0))
    }
}

#[derive(Debug, Error)]
pub enum SeedFromHexError {
    #[error("failed to decode hex string: {0}")]
    HexDecodeError(#[from] hex::FromHexError),
    #[error("PRNG seed must be 256 bits: {0}")]
    SizeError(#[from] std::array::TryFromSliceError),
}
