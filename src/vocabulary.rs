//! Token ↔ id dictionary and bag-of-words conversion.

use std::collections::HashMap;

use counter::Counter;
use serde::{Deserialize, Serialize};

/// A sparse document: `(token_id, weight)` pairs in ascending id order.
pub trait SparseDocument {
    fn term_weights(&self) -> Vec<(usize, f64)>;
}

/// Term counts for one document, sorted by token id. Zero counts never appear.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BagOfWords {
    pub entries: Vec<(usize, u32)>,
}

impl BagOfWords {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn count(&self, id: usize) -> u32 {
        self.entries
            .binary_search_by_key(&id, |&(i, _)| i)
            .map(|pos| self.entries[pos].1)
            .unwrap_or(0)
    }

    pub fn total(&self) -> u64 {
        self.entries.iter().map(|&(_, c)| c as u64).sum()
    }
}

impl SparseDocument for BagOfWords {
    fn term_weights(&self) -> Vec<(usize, f64)> {
        self.entries.iter().map(|&(id, c)| (id, c as f64)).collect()
    }
}

/// Dictionary built once per run from the normalized corpus.
///
/// Ids are assigned in first-seen order and never change afterwards, so every
/// vector produced through the same instance is consistent with every other.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Vocabulary {
    token2id: HashMap<String, usize>,
    id2token: Vec<String>,
}

impl Vocabulary {
    pub fn build(documents: &[Vec<String>]) -> Self {
        let mut vocabulary = Vocabulary::default();
        for doc in documents {
            vocabulary.add_document(doc);
        }
        vocabulary
    }

    fn add_document(&mut self, tokens: &[String]) {
        for token in tokens {
            if !self.token2id.contains_key(token) {
                self.token2id.insert(token.clone(), self.id2token.len());
                self.id2token.push(token.clone());
            }
        }
    }

    /// Tokens unknown to the dictionary are ignored.
    pub fn doc2bow(&self, tokens: &[String]) -> BagOfWords {
        let counts: Counter<&str> = tokens.iter().map(String::as_str).collect();

        let mut entries: Vec<(usize, u32)> = counts
            .into_iter()
            .filter_map(|(token, count)| self.token2id.get(token).map(|&id| (id, count as u32)))
            .collect();
        entries.sort_unstable_by_key(|&(id, _)| id);

        BagOfWords { entries }
    }

    pub fn corpus(&self, documents: &[Vec<String>]) -> Vec<BagOfWords> {
        documents.iter().map(|doc| self.doc2bow(doc)).collect()
    }

    pub fn id(&self, token: &str) -> Option<usize> {
        self.token2id.get(token).copied()
    }

    pub fn token(&self, id: usize) -> Option<&str> {
        self.id2token.get(id).map(String::as_str)
    }

    pub fn tokens(&self) -> &[String] {
        &self.id2token
    }

    pub fn len(&self) -> usize {
        self.id2token.len()
    }

    pub fn is_empty(&self) -> bool {
        self.id2token.is_empty()
    }
}
