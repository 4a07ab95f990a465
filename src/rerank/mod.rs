//! Cross-encoder reranking: a second, more precise pass over the head of an
//! already-ranked list.
//!
//! The pairwise model is too expensive to run against every candidate, so
//! only the top K items are re-scored (one batch call) and re-ordered; the
//! remainder keeps its first-stage order untouched. The stage is generic
//! over the item type: it only needs a text projection and a query string.

pub mod http;

use async_trait::async_trait;
use thiserror::Error;

pub use http::{HttpPairScorer, HttpPairScorerConfig};

#[derive(Debug, Error)]
pub enum RerankError {
    #[error("rerank request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("rerank service returned malformed output: {0}")]
    MalformedResponse(String),
}

/// Capability interface for the external pairwise reranking model: one raw
/// logit per (query, document) pair, order-preserving, scored as a single
/// batch.
#[async_trait]
pub trait PairScorer: Send + Sync {
    /// Implementation name, recorded in logs.
    fn name(&self) -> &'static str;

    async fn score_pairs(&self, pairs: &[(String, String)]) -> Result<Vec<f64>, RerankError>;
}

/// An item after the rerank stage. `logit` is present only for items that
/// went through the pairwise model (the top-K slice).
#[derive(Debug, Clone)]
pub struct Reranked<T> {
    pub item: T,
    pub logit: Option<f64>,
}

/// Logit-to-[0,1] calibration for display. Ranking uses the raw logit:
/// sigmoid is monotonic, so it adds nothing to the ordering.
pub fn sigmoid(logit: f64) -> f64 {
    1.0 / (1.0 + (-logit).exp())
}

/// Re-order the first `k` items of an already-sorted list by their pairwise
/// score against `query`, leaving items `k..` untouched.
///
/// The input must already be sorted by the primary ranking key. `k` is
/// clamped to the list length. Item count is preserved exactly; ties keep
/// their incoming order (stable sort). On failure the untouched items are
/// handed back with the error so the caller can fall back to the
/// first-stage order.
pub async fn rerank_top_k<T, F>(
    scorer: &dyn PairScorer,
    query: &str,
    items: Vec<T>,
    k: usize,
    doc_text: F,
) -> Result<Vec<Reranked<T>>, (Vec<T>, RerankError)>
where
    F: Fn(&T) -> String,
{
    let k = k.min(items.len());
    if k == 0 {
        return Ok(items
            .into_iter()
            .map(|item| Reranked { item, logit: None })
            .collect());
    }

    let pairs: Vec<(String, String)> = items[..k]
        .iter()
        .map(|item| (query.to_string(), doc_text(item)))
        .collect();

    let logits = match scorer.score_pairs(&pairs).await {
        Ok(logits) => logits,
        Err(err) => return Err((items, err)),
    };
    if logits.len() != k {
        let err = RerankError::MalformedResponse(format!(
            "expected {} scores, got {}",
            k,
            logits.len()
        ));
        return Err((items, err));
    }

    let mut items = items.into_iter();
    let mut head: Vec<Reranked<T>> = items
        .by_ref()
        .take(k)
        .zip(logits)
        .map(|(item, logit)| Reranked {
            item,
            logit: Some(logit),
        })
        .collect();

    // Vec::sort_by is stable: equal logits keep their fusion order.
    head.sort_by(|a, b| {
        b.logit
            .partial_cmp(&a.logit)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    head.extend(items.map(|item| Reranked { item, logit: None }));
    Ok(head)
}
