//! Cosine similarity between embedding vectors.

/// Cosine similarity remapped from [-1, 1] to [0, 1] so it composes
/// additively with the rule scores.
///
/// Degenerate input (length mismatch, zero-norm vector) scores 0.0, the
/// same neutral default used when the embedding service is unavailable,
/// never a remapped 0.5.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() {
        tracing::warn!(
            a_len = a.len(),
            b_len = b.len(),
            "embedding dimension mismatch; returning zero similarity"
        );
        return 0.0;
    }

    let dot: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }

    ((dot / (norm_a * norm_b)) + 1.0) / 2.0
}
