//! 5G-NR physical-layer forward error correction: rate de-matching and
//! layered min-sum LDPC decoding over the two standard 3GPP base graphs.
//!
//! The crate is organized the way the chain runs: [`rate_dematch`] turns
//! channel LLRs into an updated HARQ accumulator, [`geometry`] (backed by
//! [`tables`]) resolves a `(base_graph, Z, n_rows)` triple into a concrete
//! parity-check-matrix description, [`decoder`] runs the iterative layered
//! min-sum algorithm (with the hot-path kernel in [`decoder::kernel`]), and
//! [`extractor`] turns the decoder's working state into soft and hard
//! output. [`driver`] ties the pipeline together for one or many
//! independent transport blocks.

pub mod arith;
pub mod decoder;
pub mod driver;
pub mod error;
pub mod extractor;
pub mod geometry;
pub mod logging;
pub mod rate_dematch;
pub mod tables;

pub use decoder::{decode, DecodeOutcome, DecodeRequest};
pub use driver::{process_batch, process_one, DriverConfig, TransportBlockRequest};
pub use error::DecoderError;
pub use geometry::{BaseGraph, Geometry};
pub use rate_dematch::{rate_dematch, RateDematchRequest};
