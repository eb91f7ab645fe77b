use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

pub type Index = u32;

const WORD_BITS: usize = 64;

/// Bit vector over GF(2), packed little-endian into 64-bit words: bit `i`
/// lives in word `i / 64` at position `i % 64`. Bits past `len` in the last
/// word are kept zero so that equality and popcounts work wordwise.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct BitVector {
    len: usize,
    words: Vec<u64>,
}

impl BitVector {
    pub fn zero(len: usize) -> Self {
        Self {
            len,
            words: vec![0; len.div_ceil(WORD_BITS)],
        }
    }

    /// Builds a vector from a slice of 0/1 values, in order.
    pub fn from_bits(bits: &[u8]) -> Self {
        let mut v = Self::zero(bits.len());
        for (i, &bit) in bits.iter().enumerate() {
            if bit & 1 == 1 {
                v.set_one(i);
            }
        }
        v
    }

    pub fn random<R: Rng + ?Sized>(len: usize, rng: &mut R) -> Self {
        let mut v = Self {
            len,
            words: (0..len.div_ceil(WORD_BITS)).map(|_| rng.gen()).collect(),
        };
        v.mask_last_word();
        v
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    pub fn get(&self, i: usize) -> bool {
        assert!(i < self.len, "bit index {} out of range 0..{}", i, self.len);
        self.words[i / WORD_BITS] >> (i % WORD_BITS) & 1 == 1
    }

    #[inline]
    pub fn set_one(&mut self, i: usize) {
        assert!(i < self.len, "bit index {} out of range 0..{}", i, self.len);
        self.words[i / WORD_BITS] |= 1 << (i % WORD_BITS);
    }

    #[inline]
    pub fn set_zero(&mut self, i: usize) {
        assert!(i < self.len, "bit index {} out of range 0..{}", i, self.len);
        self.words[i / WORD_BITS] &= !(1 << (i % WORD_BITS));
    }

    #[inline]
    pub fn flip(&mut self, i: usize) {
        assert!(i < self.len, "bit index {} out of range 0..{}", i, self.len);
        self.words[i / WORD_BITS] ^= 1 << (i % WORD_BITS);
    }

    pub fn hamming_weight(&self) -> u32 {
        self.words.iter().map(|w| w.count_ones()).sum()
    }

    /// Popcount mod 2.
    pub fn parity(&self) -> bool {
        self.words.iter().fold(0, |acc, w| acc ^ w).count_ones() & 1 == 1
    }

    /// Parity of the bitwise AND with `other`, i.e. the GF(2) inner product.
    pub fn dot(&self, other: &Self) -> bool {
        assert_eq!(self.len, other.len, "inner product length mismatch");
        self.words
            .iter()
            .zip(&other.words)
            .fold(0, |acc, (a, b)| acc ^ (a & b))
            .count_ones()
            & 1
            == 1
    }

    pub fn xor_with(&mut self, other: &Self) {
        assert_eq!(self.len, other.len, "xor length mismatch");
        self.words
            .iter_mut()
            .zip(&other.words)
            .for_each(|(a, b)| *a ^= b);
    }

    pub fn support(&self) -> Vec<Index> {
        (0..self.len)
            .filter(|&i| self.get(i))
            .map(|i| i as Index)
            .collect()
    }

    /// Copies out the `count` bits starting at `start`.
    pub fn range(&self, start: usize, count: usize) -> Self {
        assert!(
            start + count <= self.len,
            "range {}..{} out of bounds for length {}",
            start,
            start + count,
            self.len
        );
        let mut out = Self::zero(count);
        for i in 0..count {
            if self.get(start + i) {
                out.set_one(i);
            }
        }
        out
    }

    pub fn push(&mut self, bit: bool) {
        if self.len % WORD_BITS == 0 {
            self.words.push(0);
        }
        self.len += 1;
        if bit {
            self.set_one(self.len - 1);
        }
    }

    pub fn extend_from(&mut self, other: &Self) {
        for i in 0..other.len {
            self.push(other.get(i));
        }
    }

    /// Packs into bytes: bit `i` goes to bit `i % 8` of byte `i / 8`.
    /// The empty vector packs to zero bytes.
    pub fn pack_bytes(&self) -> Vec<u8> {
        (0..self.len.div_ceil(8))
            .map(|j| (self.words[j / 8] >> (8 * (j % 8))) as u8)
            .collect()
    }

    /// Inverse of [`pack_bytes`](Self::pack_bytes). If the buffer covers fewer
    /// than `len` bits the result is truncated to what the buffer holds.
    pub fn unpack_bytes(data: &[u8], len: usize) -> Self {
        let len = len.min(data.len() * 8);
        let mut v = Self::zero(len);
        for (j, &byte) in data.iter().enumerate().take(len.div_ceil(8)) {
            v.words[j / 8] |= u64::from(byte) << (8 * (j % 8));
        }
        v.mask_last_word();
        v
    }

    fn mask_last_word(&mut self) {
        let tail = self.len % WORD_BITS;
        if tail != 0 {
            if let Some(last) = self.words.last_mut() {
                *last &= (1 << tail) - 1;
            }
        }
    }
}

impl fmt::Display for BitVector {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for i in 0..self.len {
            write!(f, "{}", u8::from(self.get(i)))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TRIALS: usize = 100;

    #[test]
    fn pack_unpack_roundtrip() {
        let mut rng = rand::thread_rng();
        for len in [0, 1, 7, 8, 9, 63, 64, 65, 150] {
            for _ in 0..TRIALS {
                let v = BitVector::random(len, &mut rng);
                let bytes = v.pack_bytes();
                assert_eq!(bytes.len(), len.div_ceil(8));
                assert_eq!(BitVector::unpack_bytes(&bytes, len), v);
            }
        }
    }

    #[test]
    fn pack_empty() {
        assert!(BitVector::zero(0).pack_bytes().is_empty());
    }

    #[test]
    fn unpack_truncates_short_buffer() {
        let v = BitVector::unpack_bytes(&[0xff], 100);
        assert_eq!(v.len(), 8);
        assert_eq!(v.hamming_weight(), 8);
    }

    #[test]
    fn pack_bit_order() {
        // Bit 0 maps to the low bit of byte 0
        let v = BitVector::from_bits(&[1, 0, 0, 0, 0, 0, 0, 0, 1]);
        assert_eq!(v.pack_bytes(), vec![0x01, 0x01]);
    }

    #[test]
    fn weight_parity_support_agree() {
        let mut rng = rand::thread_rng();
        for _ in 0..TRIALS {
            let v = BitVector::random(131, &mut rng);
            let supp = v.support();
            assert_eq!(v.hamming_weight() as usize, supp.len());
            assert_eq!(v.parity(), supp.len() % 2 == 1);
            for i in supp {
                assert!(v.get(i as usize));
            }
        }
    }

    #[test]
    fn xor_is_addition() {
        let mut rng = rand::thread_rng();
        for _ in 0..TRIALS {
            let a = BitVector::random(77, &mut rng);
            let b = BitVector::random(77, &mut rng);
            let mut sum = a.clone();
            sum.xor_with(&b);
            for i in 0..77 {
                assert_eq!(sum.get(i), a.get(i) ^ b.get(i));
            }
            // Adding a vector to itself gives zero
            sum.xor_with(&sum.clone());
            assert_eq!(sum, BitVector::zero(77));
        }
    }

    #[test]
    fn range_and_extend() {
        let mut rng = rand::thread_rng();
        for _ in 0..TRIALS {
            let v = BitVector::random(90, &mut rng);
            let mut rebuilt = BitVector::zero(0);
            rebuilt.extend_from(&v.range(0, 30));
            rebuilt.extend_from(&v.range(30, 60));
            assert_eq!(rebuilt, v);
        }
    }
}
