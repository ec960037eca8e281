//! The sequential ingest orchestrator: gate, chunk, persist, ledger.

use tracing::{debug, info};

use super::gate::DedupGate;
use super::record::ChunkRecordBuilder;
use crate::chunking::{BudgetedChunker, ChunkPolicy};
use crate::stores::{ChunkSink, CsvLedger};
use crate::types::IngestError;

/// One markdown source ready for ingestion.
///
/// Upstream resolution (fetching, navigation scraping, frontmatter
/// stripping) happens before this value is built; the markdown body is
/// expected to be complete.
#[derive(Clone, Debug)]
pub struct SourceDocument {
    /// Canonical address; ledger key and dedup key.
    pub url: String,
    /// Human-readable label shared by the source's chunks.
    pub title: String,
    /// Retrieval keywords in producer order.
    pub keywords: Vec<String>,
    /// Complete markdown body.
    pub markdown: String,
    /// Whether this source is reachable from several navigation paths.
    pub cross_platform: bool,
}

/// Per-source outcome of an [`IngestPipeline::ingest`] call.
#[derive(Clone, Debug)]
pub struct SourceReport {
    pub url: String,
    /// `false` when the dedup gate rejected the source.
    pub admitted: bool,
    /// Ledger ids of the chunks written, in document order.
    pub chunk_ids: Vec<String>,
    /// Words recorded against the source.
    pub words: u64,
}

/// Totals accumulated over a pipeline's lifetime.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RunStats {
    pub sources_admitted: usize,
    pub sources_rejected: usize,
    pub chunks_written: usize,
    pub words_recorded: u64,
}

/// Sequential ingest pipeline over a chunk sink and a ledger.
///
/// Each source is gated, chunked, persisted, and ledgered to completion
/// before the next is touched; per chunk, the sink write lands before the
/// ledger update. Nothing here runs concurrently, and the ledger's
/// single-writer assumption holds as long as one pipeline owns it.
pub struct IngestPipeline<S> {
    chunker: BudgetedChunker,
    sink: S,
    ledger: CsvLedger,
    gate: DedupGate,
    stats: RunStats,
}

impl<S: ChunkSink> IngestPipeline<S> {
    /// Creates a pipeline chunking under the default thresholds.
    pub fn new(sink: S, ledger: CsvLedger) -> Self {
        Self::with_policy(ChunkPolicy::default(), sink, ledger)
    }

    /// Creates a pipeline chunking under the given thresholds.
    pub fn with_policy(policy: ChunkPolicy, sink: S, ledger: CsvLedger) -> Self {
        Self {
            chunker: BudgetedChunker::new(policy),
            sink,
            ledger,
            gate: DedupGate::new(),
            stats: RunStats::default(),
        }
    }

    /// Ingests one source document.
    ///
    /// A gate rejection is not an error: the report comes back with
    /// `admitted` unset and nothing written. Sink and ledger failures
    /// propagate and abort the source mid-way; chunks already persisted
    /// stay persisted.
    pub async fn ingest(&mut self, source: SourceDocument) -> Result<SourceReport, IngestError> {
        if !self.gate.admit(&source.url, source.cross_platform) {
            self.stats.sources_rejected += 1;
            return Ok(SourceReport {
                url: source.url,
                admitted: false,
                chunk_ids: Vec::new(),
                words: 0,
            });
        }

        let chunks = self.chunker.chunk(&source.markdown);
        debug!(url = %source.url, chunks = chunks.len(), "split source into chunks");

        let builder = ChunkRecordBuilder::new(&source.title, &source.url, &source.keywords);
        let mut chunk_ids = Vec::with_capacity(chunks.len());
        let mut words = 0u64;
        for chunk in chunks {
            let record = builder.build(chunk);
            words += record.word_count() as u64;
            self.sink.persist(&record).await?;
            self.ledger.record(&record).await?;
            chunk_ids.push(record.ledger_id());
        }

        self.stats.sources_admitted += 1;
        self.stats.chunks_written += chunk_ids.len();
        self.stats.words_recorded += words;
        info!(url = %source.url, chunks = chunk_ids.len(), words, "source ingested");

        Ok(SourceReport {
            url: source.url,
            admitted: true,
            chunk_ids,
            words,
        })
    }

    /// Totals over every ingest call so far.
    pub fn stats(&self) -> RunStats {
        self.stats
    }

    /// The ledger this pipeline records into.
    pub fn ledger(&self) -> &CsvLedger {
        &self.ledger
    }

    /// The sink chunk records are persisted to.
    pub fn sink(&self) -> &S {
        &self.sink
    }
}
