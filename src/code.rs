use crate::bch::SyndromeTable;
use crate::bits::BitVector;
use crate::matrix::Matrix;
use std::sync::Arc;

/// A binary block code with hard-decision decoding of up to `T` errors.
///
/// `encode_block` must agree with multiplication by [`generator`](Self::generator):
/// `encode_block(m) = m * G`. `decode_block` must recover the message and
/// report `true` whenever the received word is within Hamming distance `T` of
/// a codeword; otherwise it returns best-effort bits and `false`.
pub trait BlockCode {
    /// Codeword length in bits.
    const N: usize;
    /// Message length in bits.
    const K: usize;
    /// Number of errors correctable per block.
    const T: usize;

    fn encode_block(&self, msg: &BitVector) -> BitVector;

    fn decode_block(&self, received: &BitVector) -> (BitVector, bool);

    /// Generator matrix, built by encoding the `K` unit messages.
    fn generator(&self) -> Matrix {
        let rows = (0..Self::K)
            .map(|i| {
                let mut msg = BitVector::zero(Self::K);
                msg.set_one(i);
                self.encode_block(&msg)
            })
            .collect();
        Matrix::from_rows(rows)
    }

    /// Coset-leader table handle for codes that decode through one.
    fn syndrome_table(&self) -> Option<Arc<SyndromeTable>> {
        None
    }
}
