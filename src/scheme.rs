//! The McEliece construction over `L` concatenated copies of a base block
//! code: a random invertible scrambler hides the message side, a random
//! column permutation hides the block-diagonal generator, and decryption
//! undoes both around the per-block decoder.

use crate::bits::BitVector;
use crate::code::BlockCode;
use crate::error::Error;
use crate::keys::{PrivateKey, PublicKey};
use crate::matrix::Matrix;
use crate::permutation::Permutation;
use crate::sampler::ErrorSampler;
use rand::Rng;

pub type HammingMcEliece = McEliece<crate::hamming::HammingCode>;
pub type BchMcEliece = McEliece<crate::bch::BchCode>;

#[derive(Clone, Debug)]
pub struct McEliece<C> {
    code: C,
    block_count: usize,
    errors_per_block: usize,
    sampler: ErrorSampler,
    generator: Matrix,
}

impl<C: BlockCode> McEliece<C> {
    /// Scheme over `block_count` copies of `code`, injecting
    /// `errors_per_block` errors into each block during encryption.
    pub fn new(code: C, block_count: usize, errors_per_block: usize) -> Result<Self, Error> {
        if block_count == 0 {
            return Err(Error::InvalidParameter(
                "block count must be at least 1".to_string(),
            ));
        }
        if errors_per_block == 0 || errors_per_block > C::T {
            return Err(Error::InvalidParameter(format!(
                "errors per block must be in range 1..={}",
                C::T
            )));
        }
        let sampler = ErrorSampler::new(C::N, block_count, errors_per_block)?;
        let generator = block_generator(&code, block_count);
        Ok(Self {
            code,
            block_count,
            errors_per_block,
            sampler,
            generator,
        })
    }

    /// Message length `k = K * L`.
    pub fn message_length(&self) -> usize {
        C::K * self.block_count
    }

    /// Ciphertext length `n = N * L`.
    pub fn ciphertext_length(&self) -> usize {
        C::N * self.block_count
    }

    pub fn code(&self) -> &C {
        &self.code
    }

    pub fn block_count(&self) -> usize {
        self.block_count
    }

    pub fn errors_per_block(&self) -> usize {
        self.errors_per_block
    }

    pub fn keygen<R: Rng + ?Sized>(&self, rng: &mut R) -> (PublicKey, PrivateKey) {
        let k = self.message_length();
        let n = self.ciphertext_length();
        // A uniform GF(2) matrix is invertible with probability ~0.29, so a
        // handful of retries suffices.
        let (s, s_inv) = loop {
            let s = Matrix::random(k, k, rng);
            if let Ok(s_inv) = s.inverse() {
                break (s, s_inv);
            }
        };
        let p = Permutation::random(n, rng);
        let g_pub = s.mul(&self.generator).permute_columns(&p);
        let public = PublicKey::new(g_pub, self.block_count, self.errors_per_block, p.clone());
        let private = PrivateKey::new(
            s_inv,
            p.inverse(),
            self.code.syndrome_table(),
            self.block_count,
            self.errors_per_block,
        );
        (public, private)
    }

    /// Encrypts a `k`-bit message: multiply by the public generator, then add
    /// a fresh error vector carried into the permuted coordinates.
    pub fn encrypt<R: Rng + ?Sized>(
        &self,
        message: &BitVector,
        public: &PublicKey,
        rng: &mut R,
    ) -> Result<BitVector, Error> {
        if message.len() != public.k() {
            return Err(Error::InvalidLength {
                expected: public.k(),
                found: message.len(),
            });
        }
        let mut ciphertext = public.g_pub().vec_mul(message);
        let e_private = self.sampler.sample(rng);
        let e_public = public.p().apply(&e_private);
        ciphertext.xor_with(&e_public);
        Ok(ciphertext)
    }

    /// Decrypts an `n`-bit ciphertext. The boolean reports whether every
    /// block decoded within the code's correction capacity; the message bits
    /// are returned either way.
    pub fn decrypt(
        &self,
        ciphertext: &BitVector,
        public: &PublicKey,
        private: &PrivateKey,
    ) -> Result<(BitVector, bool), Error> {
        if ciphertext.len() != public.n() {
            return Err(Error::InvalidLength {
                expected: public.n(),
                found: ciphertext.len(),
            });
        }
        let permuted = private.p_inv().apply(ciphertext);
        let mut decoded = BitVector::zero(0);
        let mut success = true;
        for block in 0..self.block_count {
            let (msg, ok) = self.code.decode_block(&permuted.range(block * C::N, C::N));
            decoded.extend_from(&msg);
            success &= ok;
        }
        Ok((private.s_inv().vec_mul(&decoded), success))
    }
}

/// Block-diagonal generator: `L` copies of the base code's generator along
/// the diagonal, zero elsewhere.
fn block_generator<C: BlockCode>(code: &C, block_count: usize) -> Matrix {
    let base = code.generator();
    let mut g = Matrix::zero(C::K * block_count, C::N * block_count);
    for block in 0..block_count {
        for r in 0..C::K {
            for c in 0..C::N {
                if base.get(r, c) {
                    g.set_one(block * C::K + r, block * C::N + c);
                }
            }
        }
    }
    g
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bch::BchCode;
    use crate::hamming::HammingCode;

    const TRIALS: usize = 20;

    #[test]
    fn rejects_bad_parameters() {
        assert!(McEliece::new(HammingCode::new(), 0, 1).is_err());
        assert!(McEliece::new(HammingCode::new(), 3, 0).is_err());
        assert!(McEliece::new(HammingCode::new(), 3, 2).is_err());
        assert!(McEliece::new(BchCode::new(), 3, 3).is_err());
        assert!(McEliece::new(BchCode::new(), 3, 2).is_ok());
    }

    #[test]
    fn block_generator_is_block_diagonal() {
        let code = HammingCode::new();
        let base = code.generator();
        let g = block_generator(&code, 3);
        assert_eq!((g.rows(), g.cols()), (33, 45));
        for r in 0..33 {
            for c in 0..45 {
                let expected = if r / 11 == c / 15 {
                    base.get(r % 11, c % 15)
                } else {
                    false
                };
                assert_eq!(g.get(r, c), expected);
            }
        }
    }

    #[test]
    fn hamming_roundtrip() {
        let mut rng = rand::thread_rng();
        let scheme = McEliece::new(HammingCode::new(), 4, 1).unwrap();
        let (public, private) = scheme.keygen(&mut rng);
        for _ in 0..TRIALS {
            let message = BitVector::random(scheme.message_length(), &mut rng);
            let ciphertext = scheme.encrypt(&message, &public, &mut rng).unwrap();
            let (decrypted, success) = scheme.decrypt(&ciphertext, &public, &private).unwrap();
            assert!(success);
            assert_eq!(decrypted, message);
        }
    }

    #[test]
    fn bch_roundtrip() {
        let mut rng = rand::thread_rng();
        let scheme = McEliece::new(BchCode::new(), 3, 2).unwrap();
        let (public, private) = scheme.keygen(&mut rng);
        for _ in 0..TRIALS {
            let message = BitVector::random(scheme.message_length(), &mut rng);
            let ciphertext = scheme.encrypt(&message, &public, &mut rng).unwrap();
            let (decrypted, success) = scheme.decrypt(&ciphertext, &public, &private).unwrap();
            assert!(success);
            assert_eq!(decrypted, message);
        }
    }

    // With no injected errors the roundtrip exercises only the scrambler and
    // permutation composition, isolating them from the decoders.
    #[test]
    fn zero_error_isolates_scrambler_and_permutation() {
        let mut rng = rand::thread_rng();
        let code = HammingCode::new();
        let scheme = McEliece {
            sampler: ErrorSampler::new(15, 2, 0).unwrap(),
            generator: block_generator(&code, 2),
            code,
            block_count: 2,
            errors_per_block: 0,
        };
        for _ in 0..TRIALS {
            let (public, private) = scheme.keygen(&mut rng);
            let message = BitVector::random(22, &mut rng);
            let ciphertext = scheme.encrypt(&message, &public, &mut rng).unwrap();
            let (decrypted, success) = scheme.decrypt(&ciphertext, &public, &private).unwrap();
            assert!(success);
            assert_eq!(decrypted, message);
        }
    }

    #[test]
    fn wrong_lengths_are_rejected() {
        let mut rng = rand::thread_rng();
        let scheme = McEliece::new(BchCode::new(), 2, 2).unwrap();
        let (public, private) = scheme.keygen(&mut rng);
        let short = BitVector::zero(scheme.message_length() - 1);
        assert_eq!(
            scheme.encrypt(&short, &public, &mut rng),
            Err(Error::InvalidLength {
                expected: 14,
                found: 13
            })
        );
        let long = BitVector::zero(scheme.ciphertext_length() + 1);
        assert_eq!(
            scheme.decrypt(&long, &public, &private),
            Err(Error::InvalidLength {
                expected: 30,
                found: 31
            })
        );
    }

    #[test]
    fn key_sizes_match_reported_formula() {
        let mut rng = rand::thread_rng();
        let scheme = McEliece::new(BchCode::new(), 3, 2).unwrap();
        let (public, private) = scheme.keygen(&mut rng);
        let (n, k) = (45, 21);
        assert!(private.syndrome_table().is_some());
        assert_eq!(public.serialize_size(), (k * n + 7) / 8 + 2 * n);
        assert_eq!(
            private.serialize_size(),
            (k * k + 7) / 8 + 2 * n + 121 * (2 + 2)
        );
        let scheme = McEliece::new(HammingCode::new(), 2, 1).unwrap();
        let (public, private) = scheme.keygen(&mut rng);
        let (n, k) = (30, 22);
        assert!(private.syndrome_table().is_none());
        assert_eq!(public.serialize_size(), (k * n + 7) / 8 + 2 * n);
        assert_eq!(private.serialize_size(), (k * k + 7) / 8 + 2 * n);
    }
}
