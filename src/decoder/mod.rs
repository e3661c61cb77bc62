//! Layered min-sum LDPC decoding over the 5G-NR base graphs.
//!
//! Grounded in `original_source/lib_ldpc_decoder_5gnr/LdpcLayerAlignedInt16.cpp`'s
//! `LdpcLayeredDecoderAlignedInt16` driver loop: initialize the working
//! variable-node buffer from the channel LLRs, then repeatedly sweep every
//! parity-check row (layer) in ascending order, feeding each layer through
//! [`kernel::process_layer`], until either every layer's parity-check
//! signature is zero or `max_iterations` is exhausted.

pub mod kernel;

use tracing::{debug, info};

use crate::geometry::Geometry;
use kernel::{process_layer, LayerState, VarNodeAccess};

/// The number of systematic columns that 5G-NR punctures (never transmits).
/// Fixed by the standard for both base graphs.
pub const PUNCTURED_COLUMNS: usize = 2;

/// The "known zero" LLR used to represent filler bits: maximum positive
/// confidence that the bit is `0`.
pub const FILLER_LLR: i16 = i16::MAX;

/// Parameters for one `decode()` call.
#[derive(Debug, Clone, Copy)]
pub struct DecodeRequest {
    /// Min-sum normalization offset. 3GPP reference implementations use 8.
    pub beta: i16,
    /// Hard cap on full passes over all layers.
    pub max_iterations: u16,
    /// If set, stop as soon as every layer's parity check passes.
    pub early_termination: bool,
    /// Number of filler bits inserted at the end of the systematic block
    /// (`n_systematic_cols * Z - filler_bits` is the first real message bit
    /// past which filler runs to the end of the systematic portion).
    pub filler_bits: usize,
    /// Length, in elements, of `var_nodes_in` (the channel LLR stream
    /// covering every transmitted column, i.e. excluding the two punctured
    /// columns, which are never part of the circular buffer).
    pub n_channel_llrs: usize,
}

impl Default for DecodeRequest {
    fn default() -> Self {
        DecodeRequest {
            beta: 8,
            max_iterations: 20,
            early_termination: true,
            filler_bits: 0,
            n_channel_llrs: 0,
        }
    }
}

/// Result of a `decode()` call.
#[derive(Debug, Clone)]
pub struct DecodeOutcome {
    /// Final soft values, unshifted (logical column order).
    pub app_llr: Vec<i16>,
    /// Packed hard bits, MSB-first, length `ceil(n_msg_bits / 8)`.
    pub bits: Vec<u8>,
    /// `n_systematic_cols * Z - filler_bits`: the number of real message bits
    /// represented in `bits` (the tail bits of the last byte beyond this
    /// count are padding, always zero).
    pub n_msg_bits: u32,
    pub iterations_used: u16,
    pub parity_passed: bool,
}

/// A column's double-buffered variable-node store plus the shift most
/// recently used to write it (needed by [`crate::extractor`] to de-rotate).
struct ColumnBuffer {
    a: Vec<i16>,
    b: Vec<i16>,
    current_is_b: bool,
    last_shift: i16,
}

impl ColumnBuffer {
    fn new(z: usize) -> Self {
        ColumnBuffer {
            a: vec![0; z],
            b: vec![0; z],
            current_is_b: false,
            last_shift: 0,
        }
    }
}

struct DoubleBuffer {
    columns: Vec<ColumnBuffer>,
}

impl VarNodeAccess for DoubleBuffer {
    fn read(&self, column: usize, rotated_pos: usize) -> i16 {
        let c = &self.columns[column];
        if c.current_is_b {
            c.b[rotated_pos]
        } else {
            c.a[rotated_pos]
        }
    }

    fn write(&mut self, column: usize, rotated_pos: usize, value: i16) {
        let c = &mut self.columns[column];
        if c.current_is_b {
            c.a[rotated_pos] = value;
        } else {
            c.b[rotated_pos] = value;
        }
    }

    fn mark_column_flushed(&mut self, column: usize, shift: i16) {
        let c = &mut self.columns[column];
        c.current_is_b = !c.current_is_b;
        c.last_shift = shift;
    }
}

/// Runs the layered min-sum decoder to completion (or early termination).
///
/// `var_nodes_in` holds the channel LLRs for every transmitted column
/// (columns `PUNCTURED_COLUMNS..n_cols`), sign-extended into this function;
/// its length must equal `request.n_channel_llrs`.
pub fn decode(var_nodes_in: &[i8], geom: &Geometry, request: &DecodeRequest) -> DecodeOutcome {
    let z = geom.z as usize;
    let n_cols = geom.n_cols;

    let mut buffers = DoubleBuffer {
        columns: (0..n_cols).map(|_| ColumnBuffer::new(z)).collect(),
    };

    initialize_var_nodes(&mut buffers, geom, var_nodes_in, request);

    let mut layer_states: Vec<LayerState> = (0..geom.n_rows())
        .map(|row| LayerState::new(z, geom.row_weight(row)))
        .collect();

    // Each row's (column, shift) entries are fixed for the whole decode call
    // (they depend only on `geom`, not on the iteration); collecting them
    // once here, rather than inside the iteration/layer loop below, keeps
    // that hot loop allocation-free.
    let layer_entries: Vec<Vec<_>> = (0..geom.n_rows()).map(|row| geom.row_entries(row).collect()).collect();

    let mut iterations_used = request.max_iterations.max(1);
    let mut parity_passed = false;

    for iter in 1..=request.max_iterations {
        let mut iter_has_error = false;

        for row in 0..geom.n_rows() {
            let state = &mut layer_states[row];
            let report = process_layer(&layer_entries[row], z, request.beta, state, &mut buffers);
            iter_has_error |= report.has_error;
        }

        debug!(iteration = iter, has_error = iter_has_error, "layer sweep complete");

        if request.early_termination && !iter_has_error {
            iterations_used = iter;
            parity_passed = true;
            info!(iterations_used = iter, "early termination: parity satisfied");
            break;
        }

        if iter == request.max_iterations {
            iterations_used = iter;
            parity_passed = !iter_has_error;
        }
    }

    let (app_llr, bits, n_info_bits) =
        crate::extractor::extract(&buffers_to_extractor_view(&buffers), geom, request.filler_bits);

    DecodeOutcome {
        app_llr,
        bits,
        n_msg_bits: n_info_bits as u32,
        iterations_used,
        parity_passed,
    }
}

/// Adapter exposing the decoder's private double buffer to `extractor`
/// without leaking `ColumnBuffer`'s internals outside this module.
pub(crate) struct ExtractorView<'a> {
    pub columns: Vec<(&'a [i16], i16)>,
}

fn buffers_to_extractor_view(buffers: &DoubleBuffer) -> ExtractorView<'_> {
    ExtractorView {
        columns: buffers
            .columns
            .iter()
            .map(|c| {
                let current = if c.current_is_b { &c.b } else { &c.a };
                (current.as_slice(), c.last_shift)
            })
            .collect(),
    }
}

fn initialize_var_nodes(
    buffers: &mut DoubleBuffer,
    geom: &Geometry,
    var_nodes_in: &[i8],
    request: &DecodeRequest,
) {
    let z = geom.z as usize;

    for col in 0..PUNCTURED_COLUMNS.min(geom.n_cols) {
        for v in buffers.columns[col].a.iter_mut() {
            *v = 0;
        }
    }

    // Filler bits sit in the tail of the systematic portion, in the same
    // logical bit-position space as the full codeword (i.e. including the
    // two punctured columns this loop never iterates over, since they're
    // excluded from `var_nodes_in`).
    let filler_start = geom
        .n_systematic_cols
        .saturating_mul(z)
        .saturating_sub(request.filler_bits);
    let filler_end = filler_start + request.filler_bits;
    let punctured_bits = PUNCTURED_COLUMNS * z;

    for (p, &llr) in var_nodes_in.iter().enumerate().take(request.n_channel_llrs) {
        let col = PUNCTURED_COLUMNS + p / z;
        if col >= geom.n_cols {
            break;
        }
        let idx = p % z;
        let logical_pos = p + punctured_bits;
        let value = if logical_pos >= filler_start && logical_pos < filler_end {
            FILLER_LLR
        } else {
            llr as i16
        };
        buffers.columns[col].a[idx] = value;
    }
}
