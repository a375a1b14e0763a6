//! Similarity computation for embeddings.

use crate::error::{EmbeddingError, Result};

fn check_dimensions(a: &[f64], b: &[f64]) -> Result<()> {
    if a.len() != b.len() {
        return Err(EmbeddingError::DimensionMismatch {
            expected: a.len(),
            actual: b.len(),
        });
    }
    Ok(())
}

/// Largest absolute component, 0.0 for an all-zero or empty vector.
fn max_abs(embedding: &[f64]) -> f64 {
    embedding.iter().fold(0.0_f64, |max, x| max.max(x.abs()))
}

/// Compute the cosine similarity between two embeddings.
///
/// Returns a value between -1.0 and 1.0, where:
/// - 1.0 means identical direction
/// - 0.0 means orthogonal vectors, or that either vector has zero norm
/// - -1.0 means opposite vectors
///
/// Each vector is scaled by its largest component before summing, so very
/// large or very small magnitudes neither overflow nor underflow.
pub fn cosine_similarity(a: &[f64], b: &[f64]) -> Result<f64> {
    check_dimensions(a, b)?;

    let scale_a = max_abs(a);
    let scale_b = max_abs(b);
    if scale_a == 0.0 || scale_b == 0.0 {
        return Ok(0.0);
    }

    let mut dot = 0.0_f64;
    let mut norm_a = 0.0_f64;
    let mut norm_b = 0.0_f64;
    for (x, y) in a.iter().zip(b) {
        let x = x / scale_a;
        let y = y / scale_b;
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }

    // Rounding can push the ratio slightly outside [-1, 1].
    Ok((dot / (norm_a.sqrt() * norm_b.sqrt())).clamp(-1.0, 1.0))
}
