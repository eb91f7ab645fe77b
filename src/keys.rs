use crate::bch::SyndromeTable;
use crate::matrix::Matrix;
use crate::permutation::Permutation;
use getset::{CopyGetters, Getters};
use serde::Serialize;
use std::sync::Arc;

/// Public half of a key pair.
///
/// The column permutation is published so that encryption can inject
/// block-structured error vectors in the permuted coordinate system. This
/// matches the reference construction but gives away the hiding step, so the
/// scheme is a teaching device, not a secure cryptosystem.
#[derive(Clone, Debug, Getters, CopyGetters, Serialize)]
pub struct PublicKey {
    #[getset(get = "pub")]
    g_pub: Matrix,
    #[getset(get_copy = "pub")]
    n: usize,
    #[getset(get_copy = "pub")]
    k: usize,
    #[getset(get_copy = "pub")]
    block_count: usize,
    #[getset(get_copy = "pub")]
    errors_per_block: usize,
    #[getset(get = "pub")]
    p: Permutation,
}

impl PublicKey {
    pub(crate) fn new(
        g_pub: Matrix,
        block_count: usize,
        errors_per_block: usize,
        p: Permutation,
    ) -> Self {
        Self {
            n: g_pub.cols(),
            k: g_pub.rows(),
            g_pub,
            block_count,
            errors_per_block,
            p,
        }
    }

    /// Packed size in bytes: the generator bits plus two bytes per
    /// permutation entry. Informational only.
    pub fn serialize_size(&self) -> usize {
        (self.k * self.n).div_ceil(8) + 2 * self.n
    }
}

/// Private half of a key pair. The syndrome table handle is present for codes
/// that decode through one and is shared, not owned, by each key pair.
#[derive(Clone, Debug, Getters, CopyGetters)]
pub struct PrivateKey {
    #[getset(get = "pub")]
    s_inv: Matrix,
    #[getset(get = "pub")]
    p_inv: Permutation,
    syndrome_table: Option<Arc<SyndromeTable>>,
    #[getset(get_copy = "pub")]
    block_count: usize,
    #[getset(get_copy = "pub")]
    errors_per_block: usize,
}

impl PrivateKey {
    pub(crate) fn new(
        s_inv: Matrix,
        p_inv: Permutation,
        syndrome_table: Option<Arc<SyndromeTable>>,
        block_count: usize,
        errors_per_block: usize,
    ) -> Self {
        Self {
            s_inv,
            p_inv,
            syndrome_table,
            block_count,
            errors_per_block,
        }
    }

    pub fn syndrome_table(&self) -> Option<&SyndromeTable> {
        self.syndrome_table.as_deref()
    }

    /// Packed size in bytes: the scrambler inverse, two bytes per permutation
    /// entry, and (for table-driven codes) each table entry as a two-byte
    /// syndrome plus a packed error pattern. Informational only.
    pub fn serialize_size(&self) -> usize {
        let k = self.s_inv.rows();
        let n = self.p_inv.len();
        let table_bytes = self
            .syndrome_table
            .as_ref()
            .map_or(0, |table| table.entry_count() * (2 + crate::bch::N.div_ceil(8)));
        (k * k).div_ceil(8) + 2 * n + table_bytes
    }
}
