//! Topic models over sparse document corpora.
//!
//! Both variants share the same capability: fit once over a corpus and a
//! vocabulary, then answer "top N words for topic k".

pub mod lda;
pub mod lsi;

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Result, TopicError};
use crate::vocabulary::{SparseDocument, Vocabulary};

pub use lda::{LdaConfig, LdaModel};
pub use lsi::{LsiConfig, LsiModel};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModeledTopic {
    pub id: usize,
    pub words: Vec<(String, f64)>, // Word and its weight in this topic, descending
}

impl ModeledTopic {
    pub fn keywords(&self) -> Vec<&str> {
        self.words.iter().map(|(word, _)| word.as_str()).collect()
    }
}

/// Renders as `0.123*"word" + 0.045*"other"`.
impl fmt::Display for ModeledTopic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (word, weight)) in self.words.iter().enumerate() {
            if i > 0 {
                write!(f, " + ")?;
            }
            write!(f, "{:.3}*\"{}\"", weight, word)?;
        }
        Ok(())
    }
}

pub trait TopicModel: Sized {
    type Config;

    /// Topic count is fixed here and never changes afterwards.
    fn fit<D: SparseDocument>(
        corpus: &[D],
        vocabulary: &Vocabulary,
        config: &Self::Config,
    ) -> Result<Self>;

    fn num_topics(&self) -> usize;

    /// Up to `n` words for `topic_id`, highest weight first.
    fn top_words(&self, topic_id: usize, n: usize) -> Result<Vec<(String, f64)>>;

    /// Every topic in `0..num_topics` with its top `n` words.
    fn show_topics(&self, n: usize) -> Result<Vec<ModeledTopic>> {
        (0..self.num_topics())
            .map(|id| {
                Ok(ModeledTopic {
                    id,
                    words: self.top_words(id, n)?,
                })
            })
            .collect()
    }
}

pub(crate) fn check_topic(topic: usize, num_topics: usize) -> Result<()> {
    if topic >= num_topics {
        return Err(TopicError::TopicOutOfRange { topic, num_topics });
    }
    Ok(())
}

/// Rank `(id, score)` pairs descending by `key`; equal keys keep ascending id order.
pub(crate) fn rank_words<F>(
    weights: impl Iterator<Item = (usize, f64)>,
    vocabulary: &[String],
    n: usize,
    key: F,
) -> Vec<(String, f64)>
where
    F: Fn(f64) -> f64,
{
    let mut ranked: Vec<(usize, f64)> = weights.collect();
    ranked.sort_by(|a, b| key(b.1).total_cmp(&key(a.1)));
    ranked
        .into_iter()
        .take(n)
        .filter_map(|(id, weight)| vocabulary.get(id).map(|word| (word.clone(), weight)))
        .collect()
}
