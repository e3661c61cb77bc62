//! Batch dispatch of independent rate-dematch + decode requests.
//!
//! A `Default`-impl'd configuration struct plus a `rayon` parallel-iterator
//! fan-out across independent units of work: each transport-block decode
//! holds no process-global state and touches no shared memory beyond its own
//! caller-provided HARQ buffer, so batches of them are trivially parallel
//! across disjoint inputs.

use rayon::prelude::*;

use crate::decoder::{self, DecodeOutcome, DecodeRequest};
use crate::error::DecoderError;
use crate::geometry::{BaseGraph, Geometry};
use crate::rate_dematch::{self, RateDematchRequest};

/// Configuration shared by every request in a batch.
#[derive(Debug, Clone, Copy)]
pub struct DriverConfig {
    pub beta: i16,
    pub max_iterations: u16,
    pub early_termination: bool,
}

impl Default for DriverConfig {
    fn default() -> Self {
        DriverConfig {
            beta: 8,
            max_iterations: 20,
            early_termination: true,
        }
    }
}

/// One independent unit of work: rate-dematch a channel LLR stream into a
/// caller-owned HARQ buffer, then decode it.
pub struct TransportBlockRequest<'a> {
    pub rate_dematch: RateDematchRequest<'a>,
    pub base_graph: BaseGraph,
    pub n_rows: usize,
    pub filler_bits: usize,
    /// Persistent across HARQ retransmissions for this process; borrowed
    /// mutably for the duration of this single call only.
    pub harq_buffer: &'a mut [i8],
}

/// Runs rate de-matching followed by layered LDPC decoding for one transport
/// block.
pub fn process_one(
    request: &mut TransportBlockRequest,
    config: &DriverConfig,
) -> Result<DecodeOutcome, DecoderError> {
    rate_dematch::rate_dematch(&request.rate_dematch, request.harq_buffer);

    let geom = Geometry::resolve(request.base_graph, request.rate_dematch.zc, request.n_rows)?;

    let var_nodes_in: Vec<i8> = request.harq_buffer.to_vec();
    let decode_request = DecodeRequest {
        beta: config.beta,
        max_iterations: config.max_iterations,
        early_termination: config.early_termination,
        filler_bits: request.filler_bits,
        n_channel_llrs: var_nodes_in.len(),
    };

    Ok(decoder::decode(&var_nodes_in, &geom, &decode_request))
}

/// Runs a batch of independent transport-block requests in parallel. Each
/// request's HARQ buffer is borrowed mutably only for the duration of its
/// own call, so disjoint buffers never alias across threads.
pub fn process_batch(
    requests: &mut [TransportBlockRequest],
    config: &DriverConfig,
) -> Vec<Result<DecodeOutcome, DecoderError>> {
    requests
        .par_iter_mut()
        .map(|request| process_one(request, config))
        .collect()
}
