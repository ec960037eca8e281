//! Whole-table CSV ledger tracking per-source chunk statistics.

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize, Serializer};
use tokio::fs;

use super::ChunkRecord;
use crate::types::IngestError;

const HEADER: [&str; 5] = [
    "URL",
    "Date",
    "Number of Words",
    "Number of Chunks",
    "Chunk IDs",
];

/// One accumulated row of the ledger table.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerRow {
    /// Exact source URL string; the join key.
    #[serde(rename = "URL")]
    pub url: String,

    /// Date the source was first recorded.
    #[serde(rename = "Date")]
    pub date: NaiveDate,

    /// Words over every chunk recorded for this source.
    #[serde(rename = "Number of Words")]
    pub total_words: u64,

    /// Chunks recorded for this source.
    #[serde(rename = "Number of Chunks")]
    pub chunk_count: u64,

    /// Ledger ids (`chunk_<id>`), in record order. Stored in one CSV cell
    /// as a comma-and-space joined list, which the writer quotes.
    #[serde(
        rename = "Chunk IDs",
        serialize_with = "join_ids",
        deserialize_with = "split_ids"
    )]
    pub chunk_ids: Vec<String>,
}

fn join_ids<S>(ids: &[String], serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&ids.join(", "))
}

fn split_ids<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let cell = String::deserialize(deserializer)?;
    if cell.trim().is_empty() {
        return Ok(Vec::new());
    }
    cell.split(',')
        .map(|id| {
            let id = id.trim();
            if id.is_empty() {
                Err(de::Error::custom("empty chunk id in ledger cell"))
            } else {
                Ok(id.to_string())
            }
        })
        .collect()
}

/// Durable per-source accumulator, stored as one CSV table.
///
/// Every [`record`](CsvLedger::record) call reads the complete table,
/// updates or appends the row for the chunk's source URL, and rewrites the
/// file whole. The design assumes a single writer; interleaved writers
/// lose updates.
#[derive(Clone, Debug)]
pub struct CsvLedger {
    path: PathBuf,
}

impl CsvLedger {
    /// Starts a fresh ledger at `path`, truncating any existing table down
    /// to the header row.
    pub async fn create(path: impl Into<PathBuf>) -> Result<Self, IngestError> {
        let path = path.into();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).await?;
            }
        }
        let ledger = Self { path };
        ledger.write_rows(&[]).await?;
        Ok(ledger)
    }

    /// Attaches to an existing ledger file.
    ///
    /// # Errors
    ///
    /// Returns [`IngestError::Ledger`] when the file does not exist; a
    /// missing table cannot be patched into existence mid-run.
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self, IngestError> {
        let path = path.into();
        if !path.exists() {
            return Err(IngestError::Ledger(format!(
                "ledger table {} does not exist",
                path.display()
            )));
        }
        Ok(Self { path })
    }

    /// Path of the backing table.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Parses and returns the current table rows.
    pub async fn rows(&self) -> Result<Vec<LedgerRow>, IngestError> {
        let data = fs::read_to_string(&self.path)
            .await
            .map_err(|err| IngestError::Ledger(format!("reading {}: {err}", self.path.display())))?;

        let mut reader = csv::Reader::from_reader(data.as_bytes());
        let mut rows = Vec::new();
        for row in reader.deserialize() {
            let row: LedgerRow = row.map_err(|err| {
                IngestError::Ledger(format!("parsing {}: {err}", self.path.display()))
            })?;
            rows.push(row);
        }
        Ok(rows)
    }

    /// Accumulates one chunk record against its source URL.
    ///
    /// A row already holding the exact URL string gains the chunk's words,
    /// one more chunk, and the chunk's ledger id; an unseen URL appends a
    /// fresh row dated today. Rows keep their relative order across calls.
    pub async fn record(&self, record: &ChunkRecord) -> Result<(), IngestError> {
        let mut rows = self.rows().await?;
        let words = record.word_count() as u64;
        let ledger_id = record.ledger_id();

        match rows.iter_mut().find(|row| row.url == record.url) {
            Some(row) => {
                row.total_words += words;
                row.chunk_count += 1;
                row.chunk_ids.push(ledger_id);
            }
            None => rows.push(LedgerRow {
                url: record.url.clone(),
                date: chrono::Local::now().date_naive(),
                total_words: words,
                chunk_count: 1,
                chunk_ids: vec![ledger_id],
            }),
        }

        self.write_rows(&rows).await
    }

    async fn write_rows(&self, rows: &[LedgerRow]) -> Result<(), IngestError> {
        let mut writer = csv::Writer::from_writer(Vec::new());
        if rows.is_empty() {
            writer
                .write_record(HEADER)
                .map_err(|err| IngestError::Ledger(err.to_string()))?;
        }
        for row in rows {
            writer
                .serialize(row)
                .map_err(|err| IngestError::Ledger(err.to_string()))?;
        }
        let bytes = writer
            .into_inner()
            .map_err(|err| IngestError::Ledger(err.to_string()))?;
        fs::write(&self.path, bytes).await?;
        Ok(())
    }
}
