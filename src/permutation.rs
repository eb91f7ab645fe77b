use crate::bits::{BitVector, Index};
use rand::{seq::SliceRandom, Rng};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

#[derive(Copy, Clone, Debug, Error)]
pub enum InvalidPermutation {
    #[error("permutation entries must be in range 0..{0}")]
    OutOfBounds(usize),
    #[error("permutation entries must all be distinct")]
    RepeatedIndex,
}

/// Bijection on `{0, ..., n-1}`, stored as the image array: `pi[i]` is the
/// image of `i`.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[repr(transparent)]
#[serde(transparent)]
pub struct Permutation(Vec<Index>);

impl Permutation {
    pub fn identity(n: usize) -> Self {
        Self((0..n as Index).collect())
    }

    /// Uniformly random permutation by Fisher-Yates shuffle.
    pub fn random<R: Rng + ?Sized>(n: usize, rng: &mut R) -> Self {
        let mut pi: Vec<Index> = (0..n as Index).collect();
        pi.shuffle(rng);
        Self(pi)
    }

    pub fn from_mapping(mapping: Vec<Index>) -> Result<Self, InvalidPermutation> {
        let pi = Self(mapping);
        pi.validate()?;
        Ok(pi)
    }

    // Ensure the image array is a bijection on 0..n
    pub fn validate(&self) -> Result<(), InvalidPermutation> {
        let n = self.len();
        let mut seen = vec![false; n];
        for &image in &self.0 {
            let image = image as usize;
            if image >= n {
                return Err(InvalidPermutation::OutOfBounds(n));
            }
            if seen[image] {
                return Err(InvalidPermutation::RepeatedIndex);
            }
            seen[image] = true;
        }
        Ok(())
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[inline]
    pub fn get(&self, i: usize) -> usize {
        self.0[i] as usize
    }

    /// The permutation `q` with `q[self[i]] = i`.
    pub fn inverse(&self) -> Self {
        let mut inv = vec![0 as Index; self.len()];
        for (i, &image) in self.0.iter().enumerate() {
            inv[image as usize] = i as Index;
        }
        Self(inv)
    }

    /// Reorders a vector: output bit `i` is input bit `self[i]`.
    pub fn apply(&self, v: &BitVector) -> BitVector {
        assert_eq!(v.len(), self.len(), "permutation length mismatch");
        let mut out = BitVector::zero(v.len());
        for i in 0..self.len() {
            if v.get(self.get(i)) {
                out.set_one(i);
            }
        }
        out
    }
}

impl fmt::Display for Permutation {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let entries = self
            .0
            .iter()
            .map(|i| i.to_string())
            .collect::<Vec<_>>()
            .join(", ");
        write!(f, "[{entries}]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TRIALS: usize = 100;

    #[test]
    fn random_is_bijection() {
        let mut rng = rand::thread_rng();
        for _ in 0..TRIALS {
            let pi = Permutation::random(45, &mut rng);
            pi.validate().expect("Random permutation should validate");
            let mut sorted: Vec<Index> = (0..pi.len()).map(|i| pi.get(i) as Index).collect();
            sorted.sort_unstable();
            assert_eq!(sorted, (0..45).collect::<Vec<Index>>());
        }
    }

    #[test]
    fn inverse_composes_to_identity() {
        let mut rng = rand::thread_rng();
        for _ in 0..TRIALS {
            let pi = Permutation::random(60, &mut rng);
            let inv = pi.inverse();
            for i in 0..60 {
                assert_eq!(inv.get(pi.get(i)), i);
            }
        }
    }

    #[test]
    fn apply_roundtrip() {
        let mut rng = rand::thread_rng();
        for _ in 0..TRIALS {
            let pi = Permutation::random(75, &mut rng);
            let v = BitVector::random(75, &mut rng);
            assert_eq!(pi.inverse().apply(&pi.apply(&v)), v);
        }
    }

    #[test]
    fn identity_fixes_vectors() {
        let mut rng = rand::thread_rng();
        let pi = Permutation::identity(40);
        pi.validate().unwrap();
        assert_eq!(pi, pi.inverse());
        let v = BitVector::random(40, &mut rng);
        assert_eq!(pi.apply(&v), v);
    }

    #[test]
    fn rejects_invalid_mappings() {
        assert!(Permutation::from_mapping(vec![0, 1, 3]).is_err());
        assert!(Permutation::from_mapping(vec![0, 1, 1]).is_err());
        assert!(Permutation::from_mapping(vec![2, 0, 1]).is_ok());
    }
}
