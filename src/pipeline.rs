//! Ranking orchestration: batch scoring, fusion ordering and the optional
//! cross-encoder pass.
//!
//! External services are best-effort here. A failed embedding call degrades
//! to a neutral similarity of 0.0, a failed rerank call keeps the fusion
//! order; neither ever fails the request. The only hard errors are
//! unresolvable identities (profile without a target role, job without a
//! title), rejected before any scoring happens.
//!
//! All service calls run inside the caller's future: dropping it aborts
//! in-flight requests, and results are spliced only after a whole batch
//! returns, so partial results never leak out.

use std::cmp::Ordering;
use std::sync::Arc;

use tracing::{debug, warn};

use crate::config::RankerConfig;
use crate::embedding::{TextEncoder, pair_similarity};
use crate::error::ScoreError;
use crate::rerank::{PairScorer, rerank_top_k, sigmoid};
use crate::scoring::{ScoreBreakdown, compute_rule_scores, fuse};
use crate::text::{build_job_text, build_profile_text};
use crate::{JobRecord, UserProfile};

/// One entry of the ranked output: the job, its full score detail and, when
/// the cross-encoder ran over it, the pairwise scores.
#[derive(Debug, Clone)]
pub struct RankedJob {
    pub job: JobRecord,
    pub score: ScoreBreakdown,
    /// Raw logit from the pairwise model. Ranking inside the reranked head
    /// uses this value.
    pub cross_encoder_score: Option<f64>,
    /// `sigmoid(logit)`, bounded to [0, 1] for display.
    pub match_score: Option<f64>,
}

/// The scoring pipeline. Stateless across requests; the encoder and pair
/// scorer are optional collaborators; without them the pipeline still
/// produces complete rule-based rankings.
pub struct Ranker {
    config: RankerConfig,
    encoder: Option<Arc<dyn TextEncoder>>,
    pair_scorer: Option<Arc<dyn PairScorer>>,
}

impl Ranker {
    pub fn new(config: RankerConfig) -> Self {
        Self {
            config,
            encoder: None,
            pair_scorer: None,
        }
    }

    pub fn with_encoder(mut self, encoder: Arc<dyn TextEncoder>) -> Self {
        self.encoder = Some(encoder);
        self
    }

    pub fn with_pair_scorer(mut self, scorer: Arc<dyn PairScorer>) -> Self {
        self.pair_scorer = Some(scorer);
        self
    }

    /// Score a single (profile, job) pair.
    ///
    /// A stored `embedding_similarity` is used as-is; otherwise the pair is
    /// encoded on demand when an encoder is configured. Service failure
    /// falls back to 0.0 similarity, never to an error.
    pub async fn score(
        &self,
        profile: &UserProfile,
        job: &JobRecord,
    ) -> Result<ScoreBreakdown, ScoreError> {
        validate_profile(profile)?;
        validate_job(job)?;

        let embedding = match job.embedding_similarity {
            Some(stored) => stored.clamp(0.0, 1.0),
            None => self.encode_pair(profile, job).await,
        };

        let rules = compute_rule_scores(profile, job);
        Ok(fuse(embedding, &rules, &self.config.weights))
    }

    /// Rank a batch of jobs for one profile.
    ///
    /// Jobs are fused and sorted by final score descending (stable on
    /// ties), then the top `rerank_top_k` entries go through the
    /// cross-encoder when one is configured. `rerank_top_k` falls back to
    /// the configured window; pass `Some(0)` to skip reranking explicitly.
    /// An empty batch is an empty result, not an error.
    pub async fn rank(
        &self,
        profile: &UserProfile,
        jobs: Vec<JobRecord>,
        rerank_top_k_override: Option<usize>,
    ) -> Result<Vec<RankedJob>, ScoreError> {
        validate_profile(profile)?;
        if jobs.is_empty() {
            return Ok(Vec::new());
        }
        for job in &jobs {
            validate_job(job)?;
        }

        let profile_text = build_profile_text(profile);
        let similarities = self.batch_similarities(&profile_text, &jobs).await;

        let mut ranked: Vec<RankedJob> = jobs
            .into_iter()
            .zip(similarities)
            .map(|(job, embedding)| {
                let rules = compute_rule_scores(profile, &job);
                let score = fuse(embedding, &rules, &self.config.weights);
                RankedJob {
                    job,
                    score,
                    cross_encoder_score: None,
                    match_score: None,
                }
            })
            .collect();

        // Stable sort: equal totals keep their input order.
        ranked.sort_by(|a, b| {
            b.score
                .total
                .partial_cmp(&a.score.total)
                .unwrap_or(Ordering::Equal)
        });

        let k = rerank_top_k_override.unwrap_or(self.config.rerank_top_k);
        let Some(scorer) = &self.pair_scorer else {
            return Ok(ranked);
        };
        if k == 0 {
            return Ok(ranked);
        }

        match rerank_top_k(scorer.as_ref(), &profile_text, ranked, k, |entry| {
            build_job_text(&entry.job)
        })
        .await
        {
            Ok(reranked) => {
                debug!(k, scorer = scorer.name(), "cross-encoder rerank applied");
                Ok(reranked
                    .into_iter()
                    .map(|r| {
                        let mut entry = r.item;
                        entry.cross_encoder_score = r.logit;
                        entry.match_score = r.logit.map(sigmoid);
                        entry
                    })
                    .collect())
            }
            Err((fusion_order, err)) => {
                warn!(
                    scorer = scorer.name(),
                    error = %err,
                    "reranking unavailable; keeping fusion order"
                );
                Ok(fusion_order)
            }
        }
    }

    /// Embedding similarity for one pair, on demand.
    async fn encode_pair(&self, profile: &UserProfile, job: &JobRecord) -> f64 {
        let Some(encoder) = &self.encoder else {
            return 0.0;
        };

        let texts = vec![build_profile_text(profile), build_job_text(job)];
        match encoder.encode_batch(&texts).await {
            Ok(vectors) if vectors.len() == 2 => pair_similarity(&vectors[0], &vectors[1]),
            Ok(vectors) => {
                warn!(
                    encoder = encoder.name(),
                    got = vectors.len(),
                    "unexpected embedding count; using neutral similarity"
                );
                0.0
            }
            Err(err) => {
                warn!(
                    encoder = encoder.name(),
                    error = %err,
                    "embedding service failed; using neutral similarity"
                );
                0.0
            }
        }
    }

    /// Embedding similarities for a whole batch. Stored values win; the
    /// remaining jobs are encoded against the profile vector in a single
    /// batched call. Any service failure leaves the affected jobs at the
    /// neutral 0.0.
    async fn batch_similarities(&self, profile_text: &str, jobs: &[JobRecord]) -> Vec<f64> {
        let mut similarities: Vec<f64> = jobs
            .iter()
            .map(|job| job.embedding_similarity.unwrap_or(0.0).clamp(0.0, 1.0))
            .collect();

        let missing: Vec<usize> = jobs
            .iter()
            .enumerate()
            .filter(|(_, job)| job.embedding_similarity.is_none())
            .map(|(i, _)| i)
            .collect();
        if missing.is_empty() {
            return similarities;
        }
        let Some(encoder) = &self.encoder else {
            return similarities;
        };

        // Profile once, all missing job texts in one round trip.
        let profile_vector = match encoder.encode(profile_text).await {
            Ok(vector) => vector,
            Err(err) => {
                warn!(
                    encoder = encoder.name(),
                    error = %err,
                    "profile embedding failed; using neutral similarity for {} jobs",
                    missing.len()
                );
                return similarities;
            }
        };

        let job_texts: Vec<String> = missing.iter().map(|&i| build_job_text(&jobs[i])).collect();
        match encoder.encode_batch(&job_texts).await {
            Ok(vectors) if vectors.len() == job_texts.len() => {
                for (&i, vector) in missing.iter().zip(&vectors) {
                    similarities[i] = pair_similarity(&profile_vector, vector);
                }
            }
            Ok(vectors) => {
                warn!(
                    encoder = encoder.name(),
                    expected = job_texts.len(),
                    got = vectors.len(),
                    "unexpected embedding count; using neutral similarity"
                );
            }
            Err(err) => {
                warn!(
                    encoder = encoder.name(),
                    error = %err,
                    "job embedding batch failed; using neutral similarity"
                );
            }
        }

        similarities
    }
}

impl Default for Ranker {
    fn default() -> Self {
        Self::new(RankerConfig::default())
    }
}

fn validate_profile(profile: &UserProfile) -> Result<(), ScoreError> {
    if profile.target_job.trim().is_empty() {
        return Err(ScoreError::InvalidProfile("target_job is required".into()));
    }
    Ok(())
}

fn validate_job(job: &JobRecord) -> Result<(), ScoreError> {
    if job.title.trim().is_empty() {
        return Err(ScoreError::InvalidJob("title is required".into()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering as AtomicOrdering};

    use async_trait::async_trait;

    use super::*;
    use crate::WorkMode;
    use crate::embedding::EncoderError;
    use crate::rerank::RerankError;

    fn base_profile() -> UserProfile {
        UserProfile {
            target_job: "Data Engineer".into(),
            skills: vec!["python".into(), "sql".into()],
            preferred_work_modes: vec![WorkMode::Remote],
            ..UserProfile::default()
        }
    }

    fn job_with_similarity(title: &str, similarity: f64) -> JobRecord {
        JobRecord {
            title: title.into(),
            embedding_similarity: Some(similarity),
            ..JobRecord::default()
        }
    }

    /// Counts service calls; embeds every text to the same unit vector.
    struct CountingEncoder {
        single_calls: AtomicUsize,
        batch_calls: AtomicUsize,
    }

    impl CountingEncoder {
        fn new() -> Self {
            Self {
                single_calls: AtomicUsize::new(0),
                batch_calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl TextEncoder for CountingEncoder {
        fn name(&self) -> &'static str {
            "counting"
        }

        fn dimension(&self) -> usize {
            2
        }

        async fn encode(&self, _text: &str) -> Result<Vec<f32>, EncoderError> {
            self.single_calls.fetch_add(1, AtomicOrdering::SeqCst);
            Ok(vec![1.0, 0.0])
        }

        async fn encode_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, EncoderError> {
            self.batch_calls.fetch_add(1, AtomicOrdering::SeqCst);
            Ok(texts.iter().map(|_| vec![1.0, 0.0]).collect())
        }
    }

    struct FailingEncoder;

    #[async_trait]
    impl TextEncoder for FailingEncoder {
        fn name(&self) -> &'static str {
            "failing"
        }

        fn dimension(&self) -> usize {
            2
        }

        async fn encode(&self, _text: &str) -> Result<Vec<f32>, EncoderError> {
            Err(EncoderError::MalformedResponse("down".into()))
        }
    }

    /// Prefers the job text with the smallest final byte, inverting any
    /// fusion order built from single-letter titles.
    struct TitleScorer;

    #[async_trait]
    impl PairScorer for TitleScorer {
        fn name(&self) -> &'static str {
            "title"
        }

        async fn score_pairs(&self, pairs: &[(String, String)]) -> Result<Vec<f64>, RerankError> {
            Ok(pairs
                .iter()
                .map(|(_, doc)| {
                    doc.bytes().last().map(|b| 1000.0 - b as f64).unwrap_or(0.0)
                })
                .collect())
        }
    }

    struct FailingScorer;

    #[async_trait]
    impl PairScorer for FailingScorer {
        fn name(&self) -> &'static str {
            "failing"
        }

        async fn score_pairs(&self, _pairs: &[(String, String)]) -> Result<Vec<f64>, RerankError> {
            Err(RerankError::MalformedResponse("down".into()))
        }
    }

    #[tokio::test]
    async fn score_uses_stored_similarity() {
        let ranker = Ranker::default();
        let job = JobRecord {
            title: "Data Engineer".into(),
            required_skills: vec!["Python".into(), "Django".into(), "SQL".into()],
            work_mode: Some(WorkMode::Remote),
            embedding_similarity: Some(0.8),
            ..JobRecord::default()
        };

        let breakdown = ranker.score(&base_profile(), &job).await.unwrap();

        assert!((breakdown.total - 0.7067).abs() < 1e-3);
    }

    #[tokio::test]
    async fn score_without_encoder_or_stored_similarity_is_rule_only() {
        let ranker = Ranker::default();
        let job = JobRecord {
            title: "Data Engineer".into(),
            work_mode: Some(WorkMode::Remote),
            ..JobRecord::default()
        };

        let breakdown = ranker.score(&base_profile(), &job).await.unwrap();

        assert_eq!(breakdown.embedding, 0.0);
        assert_eq!(breakdown.work_mode, 1.0);
    }

    #[tokio::test]
    async fn score_rejects_missing_identities() {
        let ranker = Ranker::default();

        let err = ranker
            .score(&UserProfile::default(), &job_with_similarity("Job", 0.5))
            .await
            .unwrap_err();
        assert!(matches!(err, ScoreError::InvalidProfile(_)));

        let err = ranker
            .score(&base_profile(), &JobRecord::default())
            .await
            .unwrap_err();
        assert!(matches!(err, ScoreError::InvalidJob(_)));
    }

    #[tokio::test]
    async fn encoder_failure_degrades_to_neutral_similarity() {
        let ranker = Ranker::default().with_encoder(Arc::new(FailingEncoder));
        let job = JobRecord {
            title: "Data Engineer".into(),
            work_mode: Some(WorkMode::Remote),
            ..JobRecord::default()
        };

        let breakdown = ranker.score(&base_profile(), &job).await.unwrap();

        assert_eq!(breakdown.embedding, 0.0);
        assert!(breakdown.total > 0.0);
    }

    #[tokio::test]
    async fn rank_of_empty_batch_is_empty() {
        let ranker = Ranker::default();
        let ranked = ranker.rank(&base_profile(), Vec::new(), None).await.unwrap();
        assert!(ranked.is_empty());
    }

    #[tokio::test]
    async fn rank_sorts_by_final_score_descending() {
        let ranker = Ranker::default();
        let jobs = vec![
            job_with_similarity("weak", 0.1),
            job_with_similarity("strong", 0.9),
            job_with_similarity("middle", 0.5),
        ];

        let ranked = ranker.rank(&base_profile(), jobs, Some(0)).await.unwrap();

        let titles: Vec<&str> = ranked.iter().map(|r| r.job.title.as_str()).collect();
        assert_eq!(titles, vec!["strong", "middle", "weak"]);
        assert!(ranked.iter().all(|r| r.cross_encoder_score.is_none()));
    }

    #[tokio::test]
    async fn rank_batches_missing_embeddings_into_one_call() {
        let encoder = Arc::new(CountingEncoder::new());
        let ranker = Ranker::default().with_encoder(encoder.clone());

        let jobs = vec![
            JobRecord {
                title: "alpha".into(),
                ..JobRecord::default()
            },
            JobRecord {
                title: "beta".into(),
                ..JobRecord::default()
            },
            job_with_similarity("gamma", 0.4),
        ];

        let ranked = ranker.rank(&base_profile(), jobs, Some(0)).await.unwrap();

        assert_eq!(ranked.len(), 3);
        // One single call for the profile, one batch call for the two jobs
        // without stored similarity.
        assert_eq!(encoder.single_calls.load(AtomicOrdering::SeqCst), 1);
        assert_eq!(encoder.batch_calls.load(AtomicOrdering::SeqCst), 1);
        // Identical unit vectors: similarity (1+1)/2 = 1.0 for encoded jobs.
        let alpha = ranked.iter().find(|r| r.job.title == "alpha").unwrap();
        assert_eq!(alpha.score.embedding, 1.0);
        let gamma = ranked.iter().find(|r| r.job.title == "gamma").unwrap();
        assert_eq!(gamma.score.embedding, 0.4);
    }

    #[tokio::test]
    async fn rerank_reorders_head_and_attaches_scores() {
        let ranker = Ranker::default().with_pair_scorer(Arc::new(TitleScorer));
        // Fusion order: c (0.9), b (0.5), a (0.1). The scorer prefers the
        // smallest title byte, so the reranked head [c, b] flips to [b, c]
        // while a stays outside the window.
        let jobs = vec![
            job_with_similarity("c", 0.9),
            job_with_similarity("b", 0.5),
            job_with_similarity("a", 0.1),
        ];

        let ranked = ranker.rank(&base_profile(), jobs, Some(2)).await.unwrap();

        let titles: Vec<&str> = ranked.iter().map(|r| r.job.title.as_str()).collect();
        assert_eq!(titles, vec!["b", "c", "a"]);
        assert!(ranked[0].cross_encoder_score.is_some());
        assert!(ranked[1].cross_encoder_score.is_some());
        assert!(ranked[2].cross_encoder_score.is_none());
        let display = ranked[0].match_score.unwrap();
        assert!((0.0..=1.0).contains(&display));
        assert!(ranked[0].cross_encoder_score.unwrap() > ranked[1].cross_encoder_score.unwrap());
    }

    #[tokio::test]
    async fn rerank_failure_keeps_fusion_order() {
        let ranker = Ranker::default().with_pair_scorer(Arc::new(FailingScorer));
        let jobs = vec![
            job_with_similarity("strong", 0.9),
            job_with_similarity("weak", 0.1),
        ];

        let ranked = ranker.rank(&base_profile(), jobs, Some(2)).await.unwrap();

        let titles: Vec<&str> = ranked.iter().map(|r| r.job.title.as_str()).collect();
        assert_eq!(titles, vec!["strong", "weak"]);
        assert!(ranked.iter().all(|r| r.cross_encoder_score.is_none()));
    }

    #[tokio::test]
    async fn rerank_preserves_count_and_remainder_order() {
        let ranker = Ranker::default().with_pair_scorer(Arc::new(TitleScorer));
        let jobs: Vec<JobRecord> = (0..6)
            .map(|i| job_with_similarity(&format!("job-{i}"), 1.0 - i as f64 / 10.0))
            .collect();

        let ranked = ranker.rank(&base_profile(), jobs, Some(3)).await.unwrap();

        assert_eq!(ranked.len(), 6);
        // Remainder untouched: still fusion order.
        let tail: Vec<&str> = ranked[3..].iter().map(|r| r.job.title.as_str()).collect();
        assert_eq!(tail, vec!["job-3", "job-4", "job-5"]);
    }
}
