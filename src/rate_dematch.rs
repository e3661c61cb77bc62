//! Rate de-matching: bit de-interleaving, circular-buffer start-index (`k0`)
//! derivation, and HARQ soft-combining of signed LLRs (3GPP TS38.212 §5.4.2).

use crate::arith::sat_add_i8;

/// Saturating LLR bounds used throughout rate-dematching (signed 8-bit).
pub const MAX_LLR: i8 = 127;
pub const MIN_LLR: i8 = -127;

/// A single rate-dematching call's parameters.
#[derive(Debug, Clone, Copy)]
pub struct RateDematchRequest<'a> {
    /// Channel LLRs as received from the demodulator, length `e`.
    pub channel_llr: &'a [i8],
    /// Modulation order (1 = BPSK, 2 = QPSK, 4 = 16QAM, 6 = 64QAM, 8 = 256QAM).
    pub modulation_order: u32,
    /// Redundancy version index, 0..=3.
    pub rv_id: u8,
    /// `true` if this is a HARQ retransmission (combine into existing buffer
    /// rather than resetting it first).
    pub is_retx: bool,
    /// Circular buffer size.
    pub ncb: usize,
    /// Lifting factor.
    pub zc: u16,
    /// `1` for BG1, `2` for BG2.
    pub base_graph: u8,
    /// Index of the first filler bit in the circular buffer.
    pub start_null_index: usize,
    /// Number of consecutive filler bits starting at `start_null_index`.
    pub num_null: usize,
}

/// Computes the circular-buffer start offset `k0` for a given redundancy
/// version, per 3GPP TS38.212 Table 5.4.2.1-2.
pub fn compute_k0(rv_id: u8, base_graph: u8, zc: u16, ncb: usize) -> usize {
    let zc = zc as i64;
    let ncb = ncb as i64;
    let k0 = match (rv_id, base_graph) {
        (0, _) => 0,
        (1, 1) => zc * ((17 * ncb) / (66 * zc)),
        (1, _) => zc * ((13 * ncb) / (50 * zc)),
        (2, 1) => zc * ((33 * ncb) / (66 * zc)),
        (2, _) => zc * ((25 * ncb) / (50 * zc)),
        (3, 1) => zc * ((56 * ncb) / (66 * zc)),
        (3, _) => zc * ((43 * ncb) / (50 * zc)),
        _ => 0,
    };
    k0 as usize
}

/// Bit de-interleaves `input` (3GPP TS38.212 §5.4.2.2): input is read in
/// `modulation_order`-wide columns and written out row-major.
pub fn deinterleave(input: &[i8], modulation_order: u32, output: &mut [i8]) {
    let modulation_order = modulation_order as usize;
    let intl_size = input.len() / modulation_order;
    for byte in 0..intl_size {
        for m in 0..modulation_order {
            output[byte + m * intl_size] = input[modulation_order * byte + m];
        }
    }
}

/// Adds two LLR streams, saturating to `[MIN_LLR, MAX_LLR]`.
fn combine(harq: &mut [i8], input: &[i8]) {
    for (h, &i) in harq.iter_mut().zip(input.iter()) {
        let sum = sat_add_i8(*h, i).clamp(MIN_LLR, MAX_LLR);
        *h = sum;
    }
}

/// Maps a compacted (filler-excluded) circular-buffer index to its physical
/// index in the full `[0, ncb)` HARQ buffer.
///
/// See `SPEC_FULL.md` §4.1 for why this general remap is needed rather than
/// the single conditional offset the narrower common case can get away with:
/// every physical position visited during wraparound must individually skip
/// the filler region, not just the first one.
fn compacted_to_physical(compacted: usize, start_null: usize, num_null: usize) -> usize {
    if compacted < start_null {
        compacted
    } else {
        compacted + num_null
    }
}

/// Soft-combines de-interleaved channel LLRs into the persistent HARQ
/// buffer, honoring `k0`, wraparound, and the filler-bit region.
///
/// `harq_buffer` has length `ncb` and is caller-owned; it must persist
/// across calls for the same HARQ process so that retransmissions combine
/// correctly.
pub fn harq_combine(request: &RateDematchRequest, deinterleaved: &[i8], harq_buffer: &mut [i8]) {
    if !request.is_retx {
        harq_buffer.fill(0);
    }

    let k0 = compute_k0(request.rv_id, request.base_graph, request.zc, request.ncb);
    let ncb_compacted = request.ncb - request.num_null;

    // k0 is expressed in physical-buffer coordinates; convert once to the
    // compacted coordinate space used for the wraparound walk below.
    let mut compacted_offset = if k0 > request.start_null_index {
        k0 - request.num_null
    } else {
        k0
    };

    let mut offset_e = 0usize;
    let e = deinterleaved.len();
    while offset_e < e {
        let length = (e - offset_e).min(ncb_compacted - compacted_offset);

        let mut tmp_harq = vec![0i8; length];
        for (n, slot) in tmp_harq.iter_mut().enumerate() {
            let phys = compacted_to_physical(
                compacted_offset + n,
                request.start_null_index,
                request.num_null,
            );
            *slot = harq_buffer[phys];
        }
        combine(&mut tmp_harq, &deinterleaved[offset_e..offset_e + length]);
        for (n, &v) in tmp_harq.iter().enumerate() {
            let phys = compacted_to_physical(
                compacted_offset + n,
                request.start_null_index,
                request.num_null,
            );
            harq_buffer[phys] = v;
        }

        compacted_offset += length;
        if compacted_offset == ncb_compacted {
            compacted_offset = 0;
        }
        offset_e += length;
    }
}

/// Runs the full rate-dematching pipeline: de-interleave then HARQ-combine.
pub fn rate_dematch(request: &RateDematchRequest, harq_buffer: &mut [i8]) {
    let mut deinterleaved = vec![0i8; request.channel_llr.len()];
    deinterleave(request.channel_llr, request.modulation_order, &mut deinterleaved);
    harq_combine(request, &deinterleaved, harq_buffer);
}
