//! Text file to embedding file.

use std::path::Path;

use serde_json::Value;
use tokio::fs;
use tracing::{info, warn};

use crate::error::{EmbeddingError, Result};
use crate::provider::{EmbeddingProvider, EmbeddingRequest};
use crate::store::{EmbeddingStore, Metadata};
use crate::task::TaskType;

/// Number of characters kept in `text_preview`.
pub const PREVIEW_CHARS: usize = 200;

/// Build the metadata stored alongside an embedded file.
///
/// `text_length` and the preview cut are measured in characters, not bytes.
pub fn build_metadata(source: &Path, text: &str) -> Metadata {
    let length = text.chars().count();
    let mut preview: String = text.chars().take(PREVIEW_CHARS).collect();
    if length > PREVIEW_CHARS {
        preview.push_str("...");
    }

    let mut metadata = Metadata::new();
    metadata.insert(
        "source_file".to_string(),
        Value::String(source.display().to_string()),
    );
    metadata.insert("text_length".to_string(), Value::from(length));
    metadata.insert("text_preview".to_string(), Value::String(preview));
    metadata
}

/// Embed the contents of `input` and save the record to `output`.
///
/// The input is read before the provider is called, so a missing file never
/// costs a request.
pub async fn embed_file(
    provider: &dyn EmbeddingProvider,
    store: &EmbeddingStore,
    input: &Path,
    output: &Path,
    task_type: TaskType,
) -> Result<()> {
    let text = match fs::read_to_string(input).await {
        Ok(text) => text,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(EmbeddingError::InputNotFound(input.to_path_buf()));
        }
        Err(e) => return Err(e.into()),
    };

    if store.model() != provider.model() {
        warn!(
            "{} will be tagged with model {} but is generated by {}",
            output.display(),
            store.model(),
            provider.model()
        );
    }

    info!("Generating embedding for {}...", input.display());
    let embedding = provider
        .embed(EmbeddingRequest::new(text.as_str()).with_task_type(task_type))
        .await?;

    let metadata = build_metadata(input, &text);
    store.save(&embedding, output, Some(metadata)).await?;

    info!("Saved embedding to {}", output.display());
    info!("Embedding dimension: {}", embedding.len());
    Ok(())
}
