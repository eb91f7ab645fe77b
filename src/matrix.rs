use crate::bits::BitVector;
use crate::permutation::Permutation;
use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Copy, Clone, Debug, Error, Eq, PartialEq)]
#[error("matrix has no inverse over GF(2)")]
pub struct SingularMatrix;

/// Dense matrix over GF(2). Rows are packed bit vectors, so multiplication
/// reduces to popcounts of wordwise ANDs.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Matrix {
    rows: usize,
    cols: usize,
    data: Vec<BitVector>,
}

impl Matrix {
    pub fn zero(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            data: vec![BitVector::zero(cols); rows],
        }
    }

    pub fn identity(n: usize) -> Self {
        let mut m = Self::zero(n, n);
        for i in 0..n {
            m.data[i].set_one(i);
        }
        m
    }

    /// Matrix with uniformly random entries.
    pub fn random<R: Rng + ?Sized>(rows: usize, cols: usize, rng: &mut R) -> Self {
        Self {
            rows,
            cols,
            data: (0..rows).map(|_| BitVector::random(cols, rng)).collect(),
        }
    }

    pub fn from_rows(data: Vec<BitVector>) -> Self {
        assert!(!data.is_empty(), "matrix must have at least one row");
        let cols = data[0].len();
        assert!(
            data.iter().all(|row| row.len() == cols),
            "matrix rows must all have the same length"
        );
        Self {
            rows: data.len(),
            cols,
            data,
        }
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    #[inline]
    pub fn row(&self, i: usize) -> &BitVector {
        &self.data[i]
    }

    #[inline]
    pub fn get(&self, i: usize, j: usize) -> bool {
        self.data[i].get(j)
    }

    #[inline]
    pub fn set_one(&mut self, i: usize, j: usize) {
        self.data[i].set_one(j);
    }

    pub fn transpose(&self) -> Self {
        let mut out = Self::zero(self.cols, self.rows);
        for i in 0..self.rows {
            for j in 0..self.cols {
                if self.get(i, j) {
                    out.set_one(j, i);
                }
            }
        }
        out
    }

    /// Product over GF(2): each output bit is the parity of a row-column AND.
    /// Inner dimensions must match.
    pub fn mul(&self, other: &Self) -> Self {
        assert_eq!(
            self.cols, other.rows,
            "matrix product dimension mismatch: {}x{} times {}x{}",
            self.rows, self.cols, other.rows, other.cols
        );
        let rhs_cols = other.transpose();
        let mut out = Self::zero(self.rows, other.cols);
        for i in 0..self.rows {
            for j in 0..other.cols {
                if self.data[i].dot(rhs_cols.row(j)) {
                    out.set_one(i, j);
                }
            }
        }
        out
    }

    /// Row vector times matrix; `v` must have one entry per matrix row.
    pub fn vec_mul(&self, v: &BitVector) -> BitVector {
        assert_eq!(
            v.len(),
            self.rows,
            "vector-matrix dimension mismatch: {} times {}x{}",
            v.len(),
            self.rows,
            self.cols
        );
        let mut out = BitVector::zero(self.cols);
        for i in 0..self.rows {
            if v.get(i) {
                out.xor_with(&self.data[i]);
            }
        }
        out
    }

    /// Gauss-Jordan inverse. For each column the first row at or below the
    /// diagonal with a set pivot bit is swapped in, then every other row with
    /// that column set gets the pivot row XORed into it; the same operations
    /// applied to an identity shadow yield the inverse.
    pub fn inverse(&self) -> Result<Self, SingularMatrix> {
        assert_eq!(self.rows, self.cols, "only square matrices can be inverted");
        let n = self.rows;
        let mut a = self.clone();
        let mut shadow = Self::identity(n);
        for col in 0..n {
            let pivot = (col..n)
                .find(|&r| a.get(r, col))
                .ok_or(SingularMatrix)?;
            a.data.swap(col, pivot);
            shadow.data.swap(col, pivot);
            let pivot_row = a.data[col].clone();
            let shadow_row = shadow.data[col].clone();
            for r in 0..n {
                if r != col && a.get(r, col) {
                    a.data[r].xor_with(&pivot_row);
                    shadow.data[r].xor_with(&shadow_row);
                }
            }
        }
        Ok(shadow)
    }

    /// Column reorder: output entry `(i, j)` is input entry `(i, pi[j])`.
    pub fn permute_columns(&self, pi: &Permutation) -> Self {
        assert_eq!(pi.len(), self.cols, "permutation length mismatch");
        Self {
            rows: self.rows,
            cols: self.cols,
            data: self.data.iter().map(|row| pi.apply(row)).collect(),
        }
    }
}
