use crate::bits::BitVector;
use crate::error::Error;
use rand::{seq::SliceRandom, Rng};

/// Samples error vectors with exactly `errors_per_block` ones in each
/// contiguous `block_length`-bit window. Windows are independent; within a
/// window the error positions are chosen uniformly without replacement.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct ErrorSampler {
    block_length: usize,
    block_count: usize,
    errors_per_block: usize,
}

impl ErrorSampler {
    pub fn new(
        block_length: usize,
        block_count: usize,
        errors_per_block: usize,
    ) -> Result<Self, Error> {
        if errors_per_block > block_length {
            return Err(Error::InvalidParameter(format!(
                "cannot place {errors_per_block} errors in a {block_length}-bit block"
            )));
        }
        Ok(Self {
            block_length,
            block_count,
            errors_per_block,
        })
    }

    /// Total length of sampled vectors.
    pub fn length(&self) -> usize {
        self.block_length * self.block_count
    }

    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> BitVector {
        let mut error = BitVector::zero(self.length());
        let mut positions: Vec<usize> = (0..self.block_length).collect();
        for block in 0..self.block_count {
            let (chosen, _) = positions.partial_shuffle(rng, self.errors_per_block);
            for &pos in chosen.iter() {
                error.set_one(block * self.block_length + pos);
            }
        }
        error
    }
}
