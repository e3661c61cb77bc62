//! Produces the final soft and hard decoder output from the working
//! variable-node buffer.
//!
//! Grounded in `original_source/lib_ldpc_decoder_5gnr/LdpcDecoderTop.cpp`'s
//! `CompactReverseMessages`/`LdpcAlignedRestore`. The original keeps each
//! column physically rotated in memory by its most recent circulant shift
//! (`old_shift`) so that SIMD reads at a new layer's shift stay contiguous;
//! it must de-rotate by `(Z - old_shift) mod Z` on the way out to recover
//! logical bit order. This crate's [`kernel`](crate::decoder::kernel)
//! addresses every read and write by `(check_pos + shift) mod Z` against a
//! column buffer that is never itself pre-rotated, so `storage[idx]` already
//! *is* the value of logical bit `idx` at every point in the decode — there
//! is no physical rotation left to undo here. `old_shift` is still tracked
//! per column (mirroring the data model in SPEC_FULL.md §3) but this
//! function does not need it; see DESIGN.md for this decision.

use bitvec::prelude::*;

use crate::decoder::ExtractorView;
use crate::geometry::Geometry;

/// Takes the hard decision (negative LLR => bit 1) on every column's
/// logical-order values, and packs the first `n_info_bits` of that decision
/// MSB-first into bytes.
///
/// Unlike `original_source`'s `bblib_ldpc_decoder_5gnr_avx512()`, which masks
/// the unused tail bits of the final output byte as an external "FIXME:
/// workaround" applied by the caller after the decode call returns, this
/// crate makes that masking an unconditional part of this function's
/// contract (see SPEC_FULL.md §4.5 / DESIGN.md's open-question decision).
pub fn extract(
    view: &ExtractorView,
    geom: &Geometry,
    filler_bits: usize,
) -> (Vec<i16>, Vec<u8>, usize) {
    let z = geom.z as usize;
    let n_cols = geom.n_cols;

    let mut app_llr = vec![0i16; n_cols * z];
    for (col, (buffer, _shift)) in view.columns.iter().enumerate() {
        for logical_pos in 0..z {
            app_llr[col * z + logical_pos] = buffer[logical_pos];
        }
    }

    let n_info_bits = (geom.n_systematic_cols * z).saturating_sub(filler_bits);
    let n_bytes = n_info_bits.div_ceil(8);
    let mut bits = vec![0u8; n_bytes];

    // NR conventional bit ordering: bit `i` of the message occupies bit
    // `7 - (i mod 8)` of byte `i / 8`, i.e. MSB-first packing.
    let packed = bits.view_bits_mut::<Msb0>();
    for i in 0..n_info_bits {
        packed.set(i, app_llr[i] < 0);
    }
    // Unused tail bits of the last byte (beyond n_info_bits) stay zero:
    // view_bits_mut only ever touched indices below n_info_bits.

    (app_llr, bits, n_info_bits)
}
