//! One-YAML-file-per-chunk storage.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;

use super::{ChunkRecord, ChunkSink};
use crate::types::IngestError;

/// Writes each chunk record as `chunk_<id>.yaml` under a target directory.
///
/// The files are what downstream embedding jobs consume; keys appear in
/// record declaration order (title, url, id, keywords, content).
#[derive(Clone, Debug)]
pub struct YamlChunkStore {
    dir: PathBuf,
}

impl YamlChunkStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Directory receiving the chunk files.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path the record with `id` is written to.
    pub fn record_path(&self, id: &str) -> PathBuf {
        self.dir.join(format!("chunk_{id}.yaml"))
    }

    /// Reads a previously written record back.
    pub async fn load(&self, path: impl AsRef<Path>) -> Result<ChunkRecord, IngestError> {
        let data = fs::read_to_string(path.as_ref()).await?;
        serde_yaml::from_str(&data).map_err(|err| IngestError::Serialize(err.to_string()))
    }
}

#[async_trait]
impl ChunkSink for YamlChunkStore {
    async fn persist(&self, record: &ChunkRecord) -> Result<(), IngestError> {
        fs::create_dir_all(&self.dir).await?;
        let body = serde_yaml::to_string(record)
            .map_err(|err| IngestError::Serialize(err.to_string()))?;
        fs::write(self.record_path(&record.id), body).await?;
        Ok(())
    }
}
