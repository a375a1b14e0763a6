//! Embedding records on disk.
//!
//! A record is a pretty-printed JSON document:
//!
//! ```text
//! {
//!   "embedding": [0.1, 0.2, ...],
//!   "dimension": 768,
//!   "model": "models/text-embedding-004",
//!   "metadata": { ... }
//! }
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tokio::fs;
use tracing::{debug, warn};

use crate::Embedding;
use crate::error::{EmbeddingError, Result};
use crate::similarity::cosine_similarity;

/// Caller-supplied metadata stored next to an embedding.
pub type Metadata = serde_json::Map<String, serde_json::Value>;

/// A persisted embedding with its metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmbeddingRecord {
    /// The embedding vector. Missing on disk reads as empty.
    #[serde(default)]
    pub embedding: Embedding,

    /// Length of `embedding` at write time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dimension: Option<usize>,

    /// Model that produced the embedding.
    #[serde(default)]
    pub model: String,

    /// Arbitrary metadata. Missing on disk reads as empty.
    #[serde(default)]
    pub metadata: Metadata,
}

impl EmbeddingRecord {
    /// Create a record; `dimension` is derived from the vector.
    pub fn new(embedding: Embedding, model: impl Into<String>, metadata: Metadata) -> Self {
        Self {
            dimension: Some(embedding.len()),
            embedding,
            model: model.into(),
            metadata,
        }
    }

    /// Check that the stored dimension, if any, matches the vector.
    pub fn validate(&self) -> Result<()> {
        match self.dimension {
            Some(expected) if expected != self.embedding.len() => {
                Err(EmbeddingError::DimensionMismatch {
                    expected,
                    actual: self.embedding.len(),
                })
            }
            _ => Ok(()),
        }
    }
}

/// Reads and writes [`EmbeddingRecord`] files.
#[derive(Debug, Clone)]
pub struct EmbeddingStore {
    /// Model identifier written into every saved record.
    model: String,
}

impl EmbeddingStore {
    /// Create a store that tags records with `model`.
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
        }
    }

    /// Model identifier written into saved records.
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Save an embedding with metadata, replacing any existing file.
    ///
    /// Parent directories are created as needed. The document is written to
    /// a temporary sibling first and renamed into place.
    pub async fn save(
        &self,
        embedding: &[f64],
        path: impl AsRef<Path>,
        metadata: Option<Metadata>,
    ) -> Result<()> {
        let path = path.as_ref();
        let record =
            EmbeddingRecord::new(embedding.to_vec(), &self.model, metadata.unwrap_or_default());
        let content = serde_json::to_string_pretty(&record)?;

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).await?;
        }

        let temp_path = temp_path_for(path);
        fs::write(&temp_path, &content).await?;
        if let Err(e) = fs::rename(&temp_path, path).await {
            let _ = fs::remove_file(&temp_path).await;
            return Err(e.into());
        }

        debug!(
            "Saved {}-dimension embedding to {}",
            embedding.len(),
            path.display()
        );
        Ok(())
    }

    /// Load an embedding and its metadata.
    pub async fn load(&self, path: impl AsRef<Path>) -> Result<(Embedding, Metadata)> {
        let record = self.load_record(path).await?;
        Ok((record.embedding, record.metadata))
    }

    /// Load a full record.
    ///
    /// Missing `embedding` or `metadata` keys read as empty rather than
    /// failing; a warning is logged so corrupt files do not go unnoticed.
    /// A `dimension` that disagrees with the vector is rejected.
    pub async fn load_record(&self, path: impl AsRef<Path>) -> Result<EmbeddingRecord> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).await?;
        let value: serde_json::Value = serde_json::from_str(&content)?;

        if let Some(object) = value.as_object() {
            for key in ["embedding", "metadata"] {
                if !object.contains_key(key) {
                    warn!("{} has no `{key}` field, using an empty value", path.display());
                }
            }
        }

        let record: EmbeddingRecord = serde_json::from_value(value)?;
        record.validate()?;

        debug!(
            "Loaded {}-dimension embedding from {}",
            record.embedding.len(),
            path.display()
        );
        Ok(record)
    }

    /// Load two records and score them with [`cosine_similarity`].
    pub async fn compare_files(
        &self,
        a: impl AsRef<Path>,
        b: impl AsRef<Path>,
    ) -> Result<f64> {
        let (embedding_a, _) = self.load(a).await?;
        let (embedding_b, _) = self.load(b).await?;
        cosine_similarity(&embedding_a, &embedding_b)
    }
}

fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(std::ffi::OsStr::to_os_string)
        .unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}
