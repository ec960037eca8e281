//! Persistence surfaces for finished chunk records.
//!
//! This module provides the [`ChunkSink`] trait that abstracts over chunk
//! storage implementations, plus the two concrete surfaces the pipeline
//! writes through:
//!
//! ```text
//!                    ┌──────────────────┐
//!                    │  ChunkSink trait │
//!                    │  (async persist) │
//!                    └────────┬─────────┘
//!                             │
//!            ┌────────────────┼────────────────┐
//!            ▼                ▼                ▼
//!     ┌──────────────┐ ┌──────────────┐ ┌──────────────┐
//!     │  YAML files  │ │  MemorySink  │ │   (future)   │
//!     │ chunk_<id>   │ │ (tests, dry  │ │ vector store │
//!     │    .yaml     │ │    runs)     │ │   adapters   │
//!     └──────────────┘ └──────────────┘ └──────────────┘
//! ```
//!
//! The [`CsvLedger`] sits beside the sink rather than behind it: every
//! admitted chunk is persisted through the sink and then recorded against
//! its source URL in the ledger table.

pub mod ledger;
pub mod yaml;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use crate::types::IngestError;

pub use ledger::{CsvLedger, LedgerRow};
pub use yaml::YamlChunkStore;

/// A finished chunk with its retrieval metadata, ready for storage.
///
/// Field order is the serialization order, which fixes the key order of
/// the YAML documents written by [`YamlChunkStore`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChunkRecord {
    /// Human-readable label of the source document
    pub title: String,
    /// Canonical address of the source document
    pub url: String,
    /// Unique chunk identifier (hyphenated UUID)
    pub id: String,
    /// Lowercase keywords, comma-and-space joined, producer order
    pub keywords: String,
    /// The chunk text body
    pub content: String,
}

impl ChunkRecord {
    /// Number of whitespace-separated words in the chunk body.
    pub fn word_count(&self) -> usize {
        crate::chunking::word_count(&self.content)
    }

    /// The id in its ledger cell form, `chunk_<id>`.
    pub fn ledger_id(&self) -> String {
        format!("chunk_{}", self.id)
    }
}

/// Persistence backend receiving finished chunk records.
///
/// The pipeline is generic over its sink, so tests capture records in
/// memory and future backends slot in without touching the ingest flow.
#[async_trait]
pub trait ChunkSink: Send + Sync {
    /// Persist a single record.
    async fn persist(&self, record: &ChunkRecord) -> Result<(), IngestError>;
}

/// In-memory sink for tests and dry runs.
#[derive(Debug, Default)]
pub struct MemorySink {
    records: Mutex<Vec<ChunkRecord>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything persisted so far, in arrival order.
    pub async fn records(&self) -> Vec<ChunkRecord> {
        self.records.lock().await.clone()
    }
}

#[async_trait]
impl ChunkSink for MemorySink {
    async fn persist(&self, record: &ChunkRecord) -> Result<(), IngestError> {
        self.records.lock().await.push(record.clone());
        Ok(())
    }
}
