//! Test-only support code shared by the integration tests in this directory.
//!
//! This crate only implements the receive (de-matching + decode) direction;
//! there is no encoder. But several of the integration tests want to verify
//! "encode a message, then feed the decoder its exact LLRs, and recover the
//! message bit-exactly", so the tests need *some* way to produce a valid
//! codeword. [`gf2_encode`] is a from-scratch GF(2) Gaussian elimination over
//! the lifted parity-check matrix built straight from
//! `nr_ldpc_fec::geometry::Geometry` — it exists purely to synthesize test
//! vectors and is not a rendition of any production encoder.

use nr_ldpc_fec::geometry::Geometry;

/// One row of a GF(2) matrix, stored as a bitset over `u64` words.
#[derive(Clone)]
struct GfRow {
    words: Vec<u64>,
}

impl GfRow {
    fn zeros(n_bits: usize) -> Self {
        GfRow {
            words: vec![0u64; n_bits.div_ceil(64)],
        }
    }

    fn get(&self, i: usize) -> bool {
        (self.words[i / 64] >> (i % 64)) & 1 != 0
    }

    fn set(&mut self, i: usize, v: bool) {
        if v {
            self.words[i / 64] |= 1u64 << (i % 64);
        } else {
            self.words[i / 64] &= !(1u64 << (i % 64));
        }
    }

    fn xor_assign(&mut self, other: &GfRow) {
        for (a, b) in self.words.iter_mut().zip(other.words.iter()) {
            *a ^= b;
        }
    }
}

/// Builds the full lifted parity-check matrix as one `GfRow` per check
/// equation, `n_cols * z` bits wide, using the same `(pos + shift) mod z`
/// addressing convention as [`nr_ldpc_fec::decoder::kernel`].
fn build_full_pcm(geom: &Geometry) -> Vec<GfRow> {
    let z = geom.z as usize;
    let n_cols = geom.n_cols;
    let n_checks = geom.n_rows() * z;

    let mut rows: Vec<GfRow> = (0..n_checks).map(|_| GfRow::zeros(n_cols * z)).collect();

    for r in 0..geom.n_rows() {
        for entry in geom.row_entries(r) {
            let column = entry.column as usize;
            let shift = entry.shift as usize;
            for pos in 0..z {
                let check_row = r * z + pos;
                let var_col = column * z + ((pos + shift) % z);
                rows[check_row].set(var_col, true);
            }
        }
    }

    rows
}

/// Solves `H_parity * p = H_message * m` for the parity bits `p` given a
/// systematic message vector `m` of length `n_systematic_cols * z`, by
/// Gaussian elimination over GF(2). Panics if the parity sub-matrix is
/// singular (it is not, for a standard 3GPP base graph).
///
/// Returns the full codeword: message bits followed by parity bits, each
/// `0` or `1`, length `n_cols * z`.
pub fn gf2_encode(geom: &Geometry, message: &[u8]) -> Vec<u8> {
    let z = geom.z as usize;
    let n_systematic_bits = geom.n_systematic_cols * z;
    assert_eq!(message.len(), n_systematic_bits);

    let n_checks = geom.n_rows() * z;
    let pcm = build_full_pcm(geom);

    // rhs[r] = XOR over message columns of H[r][col] * m[col]
    let mut augmented: Vec<GfRow> = Vec::with_capacity(n_checks);
    for row in &pcm {
        let mut parity_part = GfRow::zeros(n_checks + 1);
        let mut rhs = false;
        for (col, &m) in message.iter().enumerate() {
            if m != 0 && row.get(col) {
                rhs ^= true;
            }
        }
        for j in 0..n_checks {
            parity_part.set(j, row.get(n_systematic_bits + j));
        }
        parity_part.set(n_checks, rhs);
        augmented.push(parity_part);
    }

    // Gaussian elimination with partial pivoting, in place, on `augmented`
    // (an n_checks x (n_checks + 1) system: columns 0..n_checks are the
    // parity sub-matrix, column n_checks is the RHS).
    for col in 0..n_checks {
        let pivot = (col..n_checks)
            .find(|&r| augmented[r].get(col))
            .expect("parity sub-matrix of a standard 3GPP base graph is non-singular");
        augmented.swap(col, pivot);
        let pivot_row = augmented[col].clone();
        for r in 0..n_checks {
            if r != col && augmented[r].get(col) {
                augmented[r].xor_assign(&pivot_row);
            }
        }
    }

    let mut codeword = vec![0u8; n_systematic_bits + n_checks];
    codeword[..n_systematic_bits].copy_from_slice(message);
    for j in 0..n_checks {
        codeword[n_systematic_bits + j] = augmented[j].get(n_checks) as u8;
    }
    codeword
}

/// Converts a hard codeword bit (`0`/`1`) to a large-magnitude LLR: `0` maps
/// to a strongly positive value (bit more likely zero), `1` to a strongly
/// negative one.
pub fn bit_to_llr_i8(bit: u8, magnitude: i8) -> i8 {
    if bit == 0 {
        magnitude
    } else {
        -magnitude
    }
}
