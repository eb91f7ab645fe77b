//! The (15, 11) Hamming code, correcting a single error per block.
//!
//! Positions are 1-indexed in the classic layout: parity bits sit at the
//! powers of two 1, 2, 4, 8 and data bits fill the rest. The syndrome of a
//! word is the XOR of its set positions, which is either zero or the position
//! of the single flipped bit.

use crate::bits::BitVector;
use crate::code::BlockCode;

pub const N: usize = 15;
pub const K: usize = 11;
pub const T: usize = 1;

/// Data positions, 1-indexed; the remaining positions 1, 2, 4, 8 hold parity.
const DATA_POSITIONS: [usize; K] = [3, 5, 6, 7, 9, 10, 11, 12, 13, 14, 15];

#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct HammingCode;

impl HammingCode {
    pub fn new() -> Self {
        Self
    }
}

// Codewords are held in a u16 register with bit i = position i (bit 0 unused).

fn syndrome(word: u16) -> usize {
    (1..=N).filter(|&pos| word >> pos & 1 == 1).fold(0, |acc, pos| acc ^ pos)
}

fn to_register(block: &BitVector) -> u16 {
    let mut word = 0u16;
    for pos in 1..=N {
        if block.get(pos - 1) {
            word |= 1 << pos;
        }
    }
    word
}

fn data_bits(word: u16) -> BitVector {
    let mut msg = BitVector::zero(K);
    for (i, &pos) in DATA_POSITIONS.iter().enumerate() {
        if word >> pos & 1 == 1 {
            msg.set_one(i);
        }
    }
    msg
}

impl BlockCode for HammingCode {
    const N: usize = N;
    const K: usize = K;
    const T: usize = T;

    fn encode_block(&self, msg: &BitVector) -> BitVector {
        assert_eq!(msg.len(), K, "message block must be {K} bits");
        let mut word = 0u16;
        for (i, &pos) in DATA_POSITIONS.iter().enumerate() {
            if msg.get(i) {
                word |= 1 << pos;
            }
        }
        // Parity bit at position 2^j cancels bit j of the data syndrome, so
        // the finished codeword has syndrome zero.
        let syn = syndrome(word);
        for j in 0..4 {
            if syn >> j & 1 == 1 {
                word |= 1 << (1 << j);
            }
        }
        let mut out = BitVector::zero(N);
        for pos in 1..=N {
            if word >> pos & 1 == 1 {
                out.set_one(pos - 1);
            }
        }
        out
    }

    fn decode_block(&self, received: &BitVector) -> (BitVector, bool) {
        assert_eq!(received.len(), N, "received block must be {N} bits");
        let mut word = to_register(received);
        let syn = syndrome(word);
        if syn != 0 {
            word ^= 1 << syn;
        }
        // Every nonzero syndrome names a position, so correction never fails
        (data_bits(word), true)
    }
}
