//! Latent Semantic Indexing
//!
//! Truncated SVD of the term-document matrix, computed by power iteration
//! with deflation. Fully deterministic for a given corpus.

use ndarray::{Array1, Array2};
use serde::{Deserialize, Serialize};

use super::{check_topic, rank_words, TopicModel};
use crate::error::{Result, TopicError};
use crate::vocabulary::{SparseDocument, Vocabulary};

/// Singular values at or below this fraction of the largest are treated as zero.
const RANK_TOLERANCE: f64 = 1e-8;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LsiConfig {
    pub num_topics: usize,
    /// Maximum power iterations per singular triplet
    pub power_iterations: usize,
    /// Change in the unit right singular vector treated as converged
    pub tolerance: f64,
}

impl Default for LsiConfig {
    fn default() -> Self {
        LsiConfig {
            num_topics: 10,
            power_iterations: 200,
            tolerance: 1e-10,
        }
    }
}

impl LsiConfig {
    pub fn new(num_topics: usize) -> Self {
        LsiConfig {
            num_topics,
            ..Default::default()
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.num_topics == 0 {
            return Err(TopicError::InvalidConfig("LSI needs at least one topic".into()));
        }
        if self.power_iterations == 0 {
            return Err(TopicError::InvalidConfig(
                "power_iterations must be positive".into(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct LsiModel {
    /// Left singular vectors, one row per topic: topics x terms
    projection: Array2<f64>,
    singular_values: Array1<f64>,
    terms: Vec<String>,
}

impl LsiModel {
    pub fn singular_values(&self) -> &Array1<f64> {
        &self.singular_values
    }
}

impl TopicModel for LsiModel {
    type Config = LsiConfig;

    fn fit<D: SparseDocument>(
        corpus: &[D],
        vocabulary: &Vocabulary,
        config: &LsiConfig,
    ) -> Result<Self> {
        config.validate()?;
        if corpus.is_empty() || vocabulary.is_empty() {
            return Err(TopicError::EmptyCorpus);
        }

        let n_terms = vocabulary.len();
        let n_docs = corpus.len();
        let mut matrix = Array2::<f64>::zeros((n_terms, n_docs));
        for (doc_idx, doc) in corpus.iter().enumerate() {
            for (id, weight) in doc.term_weights() {
                if id < n_terms {
                    matrix[[id, doc_idx]] += weight;
                }
            }
        }

        let k = config.num_topics.min(n_terms).min(n_docs);
        if k < config.num_topics {
            log::warn!(
                "LSI: {} topics requested but a {}x{} matrix supports at most {}",
                config.num_topics,
                n_terms,
                n_docs,
                k
            );
        }

        let (projection, singular_values) = truncated_svd(&matrix, k, config);
        if singular_values.is_empty() {
            return Err(TopicError::EmptyCorpus);
        }
        if singular_values.len() < k {
            log::info!(
                "LSI: numerical rank is {}, dropping {} of {} topics",
                singular_values.len(),
                k - singular_values.len(),
                k
            );
        }

        Ok(LsiModel {
            projection,
            singular_values,
            terms: vocabulary.tokens().to_vec(),
        })
    }

    fn num_topics(&self) -> usize {
        self.projection.nrows()
    }

    /// Ranked by magnitude; the returned weights keep their sign.
    fn top_words(&self, topic_id: usize, n: usize) -> Result<Vec<(String, f64)>> {
        check_topic(topic_id, self.num_topics())?;
        let row = self.projection.row(topic_id);
        Ok(rank_words(
            row.iter().copied().enumerate(),
            &self.terms,
            n,
            f64::abs,
        ))
    }
}

/// Up to `k` left singular vectors (as rows) with their singular values.
///
/// Extraction stops early once a singular value falls to `RANK_TOLERANCE`
/// relative to the first one, so the result never exceeds the numerical rank.
fn truncated_svd(
    matrix: &Array2<f64>,
    k: usize,
    config: &LsiConfig,
) -> (Array2<f64>, Array1<f64>) {
    let m = matrix.nrows();
    let mut vectors: Vec<Array1<f64>> = Vec::with_capacity(k);
    let mut sigmas: Vec<f64> = Vec::with_capacity(k);
    let mut work = matrix.to_owned();

    while sigmas.len() < k {
        let (sigma, mut u, mut v) =
            power_iteration(&work, config.power_iterations, config.tolerance);
        let leading = sigmas.first().copied().unwrap_or(sigma);
        if sigma <= 0.0 || sigma <= RANK_TOLERANCE * leading {
            break;
        }

        for ((row, col), value) in work.indexed_iter_mut() {
            *value -= sigma * u[row] * v[col];
        }

        let pivot = u
            .iter()
            .copied()
            .fold(0.0f64, |best, x| if x.abs() > best.abs() { x } else { best });
        if pivot < 0.0 {
            u.mapv_inplace(|x| -x);
            v.mapv_inplace(|x| -x);
        }

        sigmas.push(sigma);
        vectors.push(u);
    }

    let left = Array2::from_shape_fn((vectors.len(), m), |(t, term)| vectors[t][term]);
    (left, Array1::from(sigmas))
}

/// Largest singular value with its left and right singular vectors.
fn power_iteration(
    matrix: &Array2<f64>,
    max_iter: usize,
    tolerance: f64,
) -> (f64, Array1<f64>, Array1<f64>) {
    let (m, n) = matrix.dim();

    let mut v: Array1<f64> = Array1::from_iter((0..n).map(|i| ((i + 1) as f64).sin()));
    let norm = l2_norm(&v);
    v /= norm;

    let mut sigma = 0.0;
    for _ in 0..max_iter {
        let mut u = matrix.dot(&v);
        let norm_u = l2_norm(&u);
        if norm_u < 1e-12 {
            return (0.0, Array1::zeros(m), v);
        }
        u /= norm_u;

        let v_new = matrix.t().dot(&u);
        sigma = l2_norm(&v_new);
        if sigma < 1e-12 {
            return (0.0, Array1::zeros(m), v);
        }
        let v_new = v_new / sigma;

        let change = l2_norm(&(&v_new - &v));
        v = v_new;
        if change <= tolerance {
            break;
        }
    }

    let mut u = matrix.dot(&v);
    let norm_u = l2_norm(&u);
    if norm_u > 1e-12 {
        u /= norm_u;
    }

    (sigma, u, v)
}

fn l2_norm(x: &Array1<f64>) -> f64 {
    x.dot(x).sqrt()
}
