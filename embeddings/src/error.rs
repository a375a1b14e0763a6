//! Error types for the embeddings system.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for embedding operations.
pub type Result<T> = std::result::Result<T, EmbeddingError>;

/// Errors that can occur while generating, storing or comparing embeddings.
#[derive(Error, Debug)]
pub enum EmbeddingError {
    /// No API key was available when a request was about to be sent.
    #[error("API_KEY environment variable not set")]
    MissingApiKey,

    /// Invalid configuration value.
    #[error("configuration error: {0}")]
    Config(String),

    /// The provider answered with a non-success status.
    #[error("embedding API error: HTTP {status} - {body}")]
    Provider { status: u16, body: String },

    /// The provider answered successfully but without `embedding.values`.
    #[error("unexpected API response format: {0}")]
    MalformedResponse(serde_json::Value),

    /// Network-level failure (DNS, connect, timeout, reset).
    #[error("failed to generate embedding: {0}")]
    Transport(#[from] reqwest::Error),

    /// The pipeline input file does not exist.
    #[error("input file not found: {}", .0.display())]
    InputNotFound(PathBuf),

    /// Dimension mismatch.
    #[error("dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    /// Serialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// IO error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl EmbeddingError {
    /// Whether a caller-side retry could plausibly succeed.
    ///
    /// Nothing in this crate retries; this only classifies the failure.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Transport(_) => true,
            Self::Provider { status, .. } => *status == 429 || *status >= 500,
            _ => false,
        }
    }
}
