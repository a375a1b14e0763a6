//! Embedding providers.
//!
//! [`GeminiProvider`] talks to the Generative Language `embedContent`
//! endpoint. The [`EmbeddingProvider`] trait is the seam the file pipeline
//! depends on, so it can be driven by a stub in tests.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::Embedding;
use crate::config::EmbeddingConfig;
use crate::error::{EmbeddingError, Result};
use crate::task::TaskType;

/// Request for generating one embedding.
#[derive(Debug, Clone)]
pub struct EmbeddingRequest {
    /// Text to embed. May be empty; the provider decides what that means.
    pub text: String,

    /// Use-case hint forwarded to the provider.
    pub task_type: TaskType,
}

impl EmbeddingRequest {
    /// Create a new embedding request with the default task type.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            task_type: TaskType::default(),
        }
    }

    /// Set the task type.
    pub fn with_task_type(mut self, task_type: TaskType) -> Self {
        self.task_type = task_type;
        self
    }
}

/// Trait for embedding providers.
#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    /// Model identifier embeddings are generated with.
    fn model(&self) -> &str;

    /// Generate an embedding for the given request. Single shot, no retries.
    async fn embed(&self, request: EmbeddingRequest) -> Result<Embedding>;
}

/// Gemini embedding provider.
pub struct GeminiProvider {
    config: EmbeddingConfig,

    /// HTTP client, built once with the configured timeout.
    client: reqwest::Client,
}

impl GeminiProvider {
    /// Create a new provider from a resolved configuration.
    pub fn new(config: EmbeddingConfig) -> Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;

        Ok(Self { config, client })
    }

    /// Generate an embedding for `text`.
    pub async fn generate(&self, text: &str, task_type: TaskType) -> Result<Embedding> {
        self.embed(EmbeddingRequest::new(text).with_task_type(task_type))
            .await
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/{}:embedContent",
            self.config.base_url, self.config.model
        )
    }
}

#[async_trait]
impl EmbeddingProvider for GeminiProvider {
    fn model(&self) -> &str {
        &self.config.model
    }

    async fn embed(&self, request: EmbeddingRequest) -> Result<Embedding> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .ok_or(EmbeddingError::MissingApiKey)?;

        debug!(
            "Generating embedding with model: {} (task type {})",
            self.config.model, request.task_type
        );

        let body = EmbedContentRequest {
            model: &self.config.model,
            content: Content {
                parts: vec![Part {
                    text: &request.text,
                }],
            },
            task_type: &request.task_type,
        };

        let response = self
            .client
            .post(self.endpoint())
            .query(&[("key", api_key)])
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            return Err(EmbeddingError::Provider {
                status: status.as_u16(),
                body: text,
            });
        }

        let value: serde_json::Value = serde_json::from_str(&text)
            .map_err(|_| EmbeddingError::MalformedResponse(serde_json::Value::String(text)))?;

        let embedding = match serde_json::from_value::<EmbedContentResponse>(value.clone()) {
            Ok(parsed) => parsed.embedding.values,
            Err(_) => return Err(EmbeddingError::MalformedResponse(value)),
        };

        info!("Generated embedding with {} dimensions", embedding.len());

        Ok(embedding)
    }
}

/// `embedContent` request body.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct EmbedContentRequest<'a> {
    model: &'a str,
    content: Content<'a>,
    task_type: &'a TaskType,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

/// `embedContent` response format.
#[derive(Debug, Deserialize)]
struct EmbedContentResponse {
    embedding: ContentEmbedding,
}

#[derive(Debug, Deserialize)]
struct ContentEmbedding {
    values: Vec<f64>,
}
