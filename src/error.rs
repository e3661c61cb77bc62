//! Error types for the rate-dematching and LDPC decoding pipeline.

use snafu::Snafu;

/// Errors that can be raised while resolving code geometry, de-matching
/// rates, or decoding. Exhausting `max_iterations` without reaching zero
/// parity error, and HARQ-buffer saturation, are *not* represented here:
/// both are normal outcomes reported through response fields, not failures.
#[derive(Debug, Snafu, PartialEq, Eq, Clone, Copy)]
pub enum DecoderError {
    /// The requested lifting factor Z is not a member of any 3GPP lifting
    /// set (`a * 2^j` for `a` in `{2,3,5,7,9,11,13,15}`).
    #[snafu(display("lifting factor {z} is not a supported 3GPP lifting factor"))]
    UnsupportedLiftingFactor { z: u16 },

    /// The requested base graph is neither 1 nor 2.
    #[snafu(display("base graph {value} is not a supported base graph (expected 1 or 2)"))]
    UnsupportedBaseGraph { value: u8 },

    /// `n_rows` is out of the valid range for the selected base graph.
    #[snafu(display("row count {n_rows} is out of range (must be 4..={max_rows})"))]
    InvalidRowCount { n_rows: usize, max_rows: usize },

    /// A caller-provided buffer is too small to hold the required data.
    #[snafu(display("buffer too small: needed {needed} elements, got {got}"))]
    BufferTooSmall { needed: usize, got: usize },
}
