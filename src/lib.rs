//! ```text
//! Source resolution (external) ──► SourceDocument
//!                                       │
//!                     ingestion::DedupGate ── cross-platform filter
//!                                       │ admitted
//!                     chunking::BudgetedChunker ──► bounded chunk bodies
//!                                       │
//!                     ingestion::ChunkRecordBuilder ──► ChunkRecord
//!                                       │
//!                  ┌────────────────────┴───────────────────┐
//!                  ▼                                        ▼
//!     stores::YamlChunkStore                     stores::CsvLedger
//!     (one chunk_<id>.yaml per chunk)            (per-source totals table)
//! ```
//!
//! chunkmill turns long-form markdown documentation into bounded-size,
//! independently retrievable chunks, keeping a per-source ledger of how
//! much content each URL contributed and refusing to process a
//! cross-platform source twice in one run. Everything upstream of the
//! [`ingestion::SourceDocument`] (fetching, navigation scraping,
//! embeddings, vector indexing) lives in external collaborators.

pub mod chunking;
pub mod ingestion;
pub mod stores;
pub mod types;

pub use chunking::{BudgetedChunker, ChunkPolicy, PolicyBuilder};
pub use ingestion::{
    ChunkRecordBuilder, DedupGate, IngestPipeline, RunStats, SourceDocument, SourceReport,
};
pub use stores::{ChunkRecord, ChunkSink, CsvLedger, LedgerRow, MemorySink, YamlChunkStore};
pub use types::IngestError;
