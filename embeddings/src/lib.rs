//! # Embeddings
//!
//! A small client for a remote text-embedding service, plus the pieces
//! needed to keep the results around:
//!
//! - **Embedding Generation**: send text to the Gemini `embedContent` API
//! - **Storage**: persist a vector and its metadata as a JSON record
//! - **Similarity**: cosine similarity between two vectors or two records
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                    Embeddings                                   │
//! ├─────────────────────────────────────────────────────────────────┤
//! │  text ──► GeminiProvider ──► Embedding ──► EmbeddingStore       │
//! │                                                 │               │
//! │                                                 ▼               │
//! │                                      cosine_similarity          │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use textvec_embeddings::{EmbeddingConfig, EmbeddingStore, GeminiProvider, TaskType};
//!
//! let config = EmbeddingConfig::from_env()?;
//! let store = EmbeddingStore::new(&config.model);
//! let provider = GeminiProvider::new(config)?;
//!
//! let embedding = provider.generate("hello world", TaskType::RetrievalDocument).await?;
//! store.save(&embedding, "out/hello.json", None).await?;
//! ```

pub mod config;
pub mod error;
pub mod pipeline;
pub mod provider;
pub mod similarity;
pub mod store;
pub mod task;

pub use config::EmbeddingConfig;
pub use error::{EmbeddingError, Result};
pub use pipeline::{build_metadata, embed_file};
pub use provider::{EmbeddingProvider, EmbeddingRequest, GeminiProvider};
pub use similarity::cosine_similarity;
pub use store::{EmbeddingRecord, EmbeddingStore, Metadata};
pub use task::TaskType;

/// A dense vector embedding.
pub type Embedding = Vec<f64>;
