//! Latent Dirichlet Allocation fitted by variational Bayes.
//!
//! Works on fractional weights as well as raw counts, so the same model runs
//! over a bag-of-words corpus or a TF-IDF weighted one.

use ndarray::{Array1, Array2, Axis};
use rand::prelude::*;
use rand_distr::Gamma;
use serde::{Deserialize, Serialize};
use statrs::function::gamma::digamma;

use super::{check_topic, rank_words, TopicModel};
use crate::error::{Result, TopicError};
use crate::vocabulary::{SparseDocument, Vocabulary};

/// Keeps the per-word normalizer away from zero.
const PHI_FLOOR: f64 = 1e-100;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LdaConfig {
    pub num_topics: usize,
    /// Full sweeps over the corpus
    pub passes: usize,
    /// Maximum per-document inference iterations within one pass
    pub iterations: usize,
    /// Per-document inference stops once the mean gamma change drops below this
    pub gamma_threshold: f64,
    /// Document-topic prior, 1/num_topics when unset
    pub alpha: Option<f64>,
    /// Topic-word prior, 1/num_topics when unset
    pub eta: Option<f64>,
    /// Fixed seed for reproducible fits; entropy when unset
    pub random_seed: Option<u64>,
}

impl Default for LdaConfig {
    fn default() -> Self {
        LdaConfig {
            num_topics: 10,
            passes: 1,
            iterations: 50,
            gamma_threshold: 0.001,
            alpha: None,
            eta: None,
            random_seed: None,
        }
    }
}

impl LdaConfig {
    pub fn new(num_topics: usize) -> Self {
        LdaConfig {
            num_topics,
            ..Default::default()
        }
    }

    /// Settings used for corpus-wide topic discovery: 10 topics, 20 passes.
    pub fn discovery() -> Self {
        LdaConfig {
            passes: 20,
            ..Default::default()
        }
    }

    pub fn passes(mut self, passes: usize) -> Self {
        self.passes = passes;
        self
    }

    pub fn iterations(mut self, iterations: usize) -> Self {
        self.iterations = iterations;
        self
    }

    pub fn alpha(mut self, alpha: f64) -> Self {
        self.alpha = Some(alpha);
        self
    }

    pub fn eta(mut self, eta: f64) -> Self {
        self.eta = Some(eta);
        self
    }

    pub fn random_seed(mut self, seed: u64) -> Self {
        self.random_seed = Some(seed);
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.num_topics == 0 {
            return Err(TopicError::InvalidConfig("LDA needs at least one topic".into()));
        }
        if self.passes == 0 {
            return Err(TopicError::InvalidConfig("LDA needs at least one pass".into()));
        }
        if self.gamma_threshold < 0.0 {
            return Err(TopicError::InvalidConfig("gamma_threshold must not be negative".into()));
        }
        for (name, prior) in [("alpha", self.alpha), ("eta", self.eta)] {
            if let Some(value) = prior {
                if value <= 0.0 {
                    return Err(TopicError::InvalidConfig(format!("{} must be positive", name)));
                }
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct LdaModel {
    /// Variational topic-word parameters: topics x terms
    lambda: Array2<f64>,
    terms: Vec<String>,
}

struct DocumentInference {
    exp_elog_theta: Array1<f64>,
    phinorm: Vec<f64>,
    converged: bool,
}

impl LdaModel {
    /// Word distribution of one topic, summing to one.
    pub fn topic_distribution(&self, topic_id: usize) -> Result<Array1<f64>> {
        check_topic(topic_id, self.num_topics())?;
        let row = self.lambda.row(topic_id);
        let total = row.sum();
        Ok(row.mapv(|w| w / total))
    }
}

impl TopicModel for LdaModel {
    type Config = LdaConfig;

    fn fit<D: SparseDocument>(
        corpus: &[D],
        vocabulary: &Vocabulary,
        config: &LdaConfig,
    ) -> Result<Self> {
        config.validate()?;
        if corpus.is_empty() || vocabulary.is_empty() {
            return Err(TopicError::EmptyCorpus);
        }

        let k = config.num_topics;
        let n_terms = vocabulary.len();
        let alpha = config.alpha.unwrap_or(1.0 / k as f64);
        let eta = config.eta.unwrap_or(1.0 / k as f64);

        let mut rng = match config.random_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let init =
            Gamma::new(100.0, 1.0 / 100.0).map_err(|e| TopicError::Model(e.to_string()))?;

        let documents: Vec<Vec<(usize, f64)>> = corpus
            .iter()
            .map(|doc| in_vocabulary(doc, n_terms))
            .collect();
        if documents.iter().all(Vec::is_empty) {
            return Err(TopicError::EmptyCorpus);
        }

        let mut lambda = Array2::from_shape_fn((k, n_terms), |_| init.sample(&mut rng));

        for pass in 0..config.passes {
            let exp_elog_beta = exp_dirichlet_expectation_rows(&lambda);
            let mut sstats = Array2::<f64>::zeros((k, n_terms));
            let mut converged = 0;

            for doc in documents.iter().filter(|doc| !doc.is_empty()) {
                let gamma = Array1::from_shape_fn(k, |_| init.sample(&mut rng));
                let inference = infer_document(
                    doc,
                    &exp_elog_beta,
                    gamma,
                    alpha,
                    config.iterations,
                    config.gamma_threshold,
                );
                if inference.converged {
                    converged += 1;
                }

                for (&(id, weight), &norm) in doc.iter().zip(&inference.phinorm) {
                    let scale = weight / norm;
                    for t in 0..k {
                        sstats[[t, id]] += inference.exp_elog_theta[t] * scale;
                    }
                }
            }

            sstats *= &exp_elog_beta;
            lambda = sstats + eta;

            log::debug!(
                "LDA pass {}/{}: {}/{} documents converged",
                pass + 1,
                config.passes,
                converged,
                documents.len()
            );
        }

        Ok(LdaModel {
            lambda,
            terms: vocabulary.tokens().to_vec(),
        })
    }

    fn num_topics(&self) -> usize {
        self.lambda.nrows()
    }

    fn top_words(&self, topic_id: usize, n: usize) -> Result<Vec<(String, f64)>> {
        let distribution = self.topic_distribution(topic_id)?;
        Ok(rank_words(
            distribution.iter().copied().enumerate(),
            &self.terms,
            n,
            |w| w,
        ))
    }
}

fn in_vocabulary<D: SparseDocument>(doc: &D, n_terms: usize) -> Vec<(usize, f64)> {
    doc.term_weights()
        .into_iter()
        .filter(|&(id, weight)| id < n_terms && weight > 0.0)
        .collect()
}

/// E-step for one document: alternates gamma and phi updates until gamma settles.
fn infer_document(
    doc: &[(usize, f64)],
    exp_elog_beta: &Array2<f64>,
    mut gamma: Array1<f64>,
    alpha: f64,
    iterations: usize,
    threshold: f64,
) -> DocumentInference {
    let k = gamma.len();
    let mut exp_elog_theta = exp_dirichlet_expectation(&gamma);
    let mut phinorm = phi_normalizer(doc, &exp_elog_theta, exp_elog_beta);
    let mut converged = false;

    for _ in 0..iterations {
        let last = gamma.clone();
        for t in 0..k {
            let expected: f64 = doc
                .iter()
                .zip(&phinorm)
                .map(|(&(id, weight), &norm)| weight / norm * exp_elog_beta[[t, id]])
                .sum();
            gamma[t] = alpha + exp_elog_theta[t] * expected;
        }

        exp_elog_theta = exp_dirichlet_expectation(&gamma);
        phinorm = phi_normalizer(doc, &exp_elog_theta, exp_elog_beta);

        let mean_change = (&gamma - &last).mapv(f64::abs).mean().unwrap_or(0.0);
        if mean_change < threshold {
            converged = true;
            break;
        }
    }

    DocumentInference {
        exp_elog_theta,
        phinorm,
        converged,
    }
}

fn phi_normalizer(
    doc: &[(usize, f64)],
    exp_elog_theta: &Array1<f64>,
    exp_elog_beta: &Array2<f64>,
) -> Vec<f64> {
    doc.iter()
        .map(|&(id, _)| exp_elog_theta.dot(&exp_elog_beta.column(id)) + PHI_FLOOR)
        .collect()
}

/// exp(E[log θ]) for θ ~ Dirichlet(params).
fn exp_dirichlet_expectation(params: &Array1<f64>) -> Array1<f64> {
    let total = digamma(params.sum());
    params.mapv(|p| (digamma(p) - total).exp())
}

fn exp_dirichlet_expectation_rows(params: &Array2<f64>) -> Array2<f64> {
    let mut out = params.clone();
    for mut row in out.axis_iter_mut(Axis(0)) {
        let total = digamma(row.sum());
        row.mapv_inplace(|p| (digamma(p) - total).exp());
    }
    out
}
