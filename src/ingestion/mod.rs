//! Ingestion utilities for turning markdown sources into tracked chunk sets.
//!
//! The helpers in this module provide three core capabilities:
//!
//! * [`gate`] — per-run deduplication of cross-platform sources.
//! * [`record`] — identity and metadata attachment for finished chunks.
//! * [`pipeline`] — the sequential orchestrator tying gate, chunker, sink,
//!   and ledger together.

pub mod gate;
pub mod pipeline;
pub mod record;

pub use gate::DedupGate;
pub use pipeline::{IngestPipeline, RunStats, SourceDocument, SourceReport};
pub use record::ChunkRecordBuilder;
