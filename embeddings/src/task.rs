//! Task type hints sent to the embedding provider.

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use serde::{Serialize, Serializer};

/// The intended downstream use of an embedding.
///
/// Only affects the request payload. Unknown values are kept as
/// [`TaskType::Other`] and forwarded verbatim, so the provider decides
/// whether they are valid.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum TaskType {
    /// Embeddings stored in a database for search.
    #[default]
    RetrievalDocument,
    /// Embeddings of search queries.
    RetrievalQuery,
    /// Similarity comparison between texts.
    SemanticSimilarity,
    /// Text classification.
    Classification,
    /// Clustering texts.
    Clustering,
    /// Any other value, passed through unchanged.
    Other(String),
}

impl TaskType {
    /// The known task types with a short description each.
    pub const ALL: [(TaskType, &'static str); 5] = [
        (
            TaskType::RetrievalDocument,
            "For embeddings stored in a database",
        ),
        (TaskType::RetrievalQuery, "For search queries"),
        (TaskType::SemanticSimilarity, "For similarity comparison"),
        (TaskType::Classification, "For text classification"),
        (TaskType::Clustering, "For clustering texts"),
    ];

    /// The provider's wire name.
    pub fn as_str(&self) -> &str {
        match self {
            Self::RetrievalDocument => "RETRIEVAL_DOCUMENT",
            Self::RetrievalQuery => "RETRIEVAL_QUERY",
            Self::SemanticSimilarity => "SEMANTIC_SIMILARITY",
            Self::Classification => "CLASSIFICATION",
            Self::Clustering => "CLUSTERING",
            Self::Other(value) => value,
        }
    }
}

impl From<&str> for TaskType {
    fn from(value: &str) -> Self {
        match value {
            "RETRIEVAL_DOCUMENT" => Self::RetrievalDocument,
            "RETRIEVAL_QUERY" => Self::RetrievalQuery,
            "SEMANTIC_SIMILARITY" => Self::SemanticSimilarity,
            "CLASSIFICATION" => Self::Classification,
            "CLUSTERING" => Self::Clustering,
            other => Self::Other(other.to_string()),
        }
    }
}

impl FromStr for TaskType {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from(s))
    }
}

impl fmt::Display for TaskType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for TaskType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}
