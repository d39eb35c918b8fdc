//! TF-IDF reweighting of a bag-of-words corpus.

use serde::{Deserialize, Serialize};

use crate::vocabulary::{BagOfWords, SparseDocument};

/// Weights at or below this magnitude are dropped from the output vectors.
const WEIGHT_EPSILON: f64 = 1e-12;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IdfMethod {
    /// log2(N / df)
    Standard,
    /// log2((1 + N) / (1 + df)) + 1, finite even for ids never seen in the corpus
    Smooth,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TfidfConfig {
    pub idf: IdfMethod,
    /// Scale every vector to unit L2 length
    pub normalize: bool,
}

impl Default for TfidfConfig {
    fn default() -> Self {
        TfidfConfig {
            idf: IdfMethod::Standard,
            normalize: true,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TfidfVector {
    pub entries: Vec<(usize, f64)>,
}

impl TfidfVector {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn weight(&self, id: usize) -> f64 {
        self.entries
            .iter()
            .find(|&&(i, _)| i == id)
            .map(|&(_, w)| w)
            .unwrap_or(0.0)
    }
}

impl SparseDocument for TfidfVector {
    fn term_weights(&self) -> Vec<(usize, f64)> {
        self.entries.clone()
    }
}

/// IDF statistics gathered over one whole corpus.
///
/// Vectors produced here only make sense next to the vocabulary and corpus
/// the model was fitted on.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TfidfModel {
    config: TfidfConfig,
    num_docs: usize,
    doc_freqs: Vec<usize>,
    idfs: Vec<f64>,
}

impl TfidfModel {
    pub fn fit(corpus: &[BagOfWords], config: TfidfConfig) -> Self {
        let num_terms = corpus
            .iter()
            .filter_map(|bow| bow.entries.last().map(|&(id, _)| id + 1))
            .max()
            .unwrap_or(0);

        let mut doc_freqs = vec![0usize; num_terms];
        for bow in corpus {
            for &(id, _) in &bow.entries {
                doc_freqs[id] += 1;
            }
        }

        let mut model = TfidfModel {
            config,
            num_docs: corpus.len(),
            doc_freqs,
            idfs: Vec::new(),
        };
        model.idfs = model.doc_freqs.iter().map(|&df| model.idf(df)).collect();
        model
    }

    fn idf(&self, df: usize) -> f64 {
        let n = self.num_docs as f64;
        match self.config.idf {
            IdfMethod::Standard if df == 0 => 0.0,
            IdfMethod::Standard => (n / df as f64).log2(),
            IdfMethod::Smooth => ((1.0 + n) / (1.0 + df as f64)).log2() + 1.0,
        }
    }

    pub fn idf_for(&self, id: usize) -> f64 {
        match self.idfs.get(id) {
            Some(&idf) => idf,
            None => self.idf(0),
        }
    }

    pub fn num_docs(&self) -> usize {
        self.num_docs
    }

    pub fn doc_freq(&self, id: usize) -> usize {
        self.doc_freqs.get(id).copied().unwrap_or(0)
    }

    pub fn transform(&self, bow: &BagOfWords) -> TfidfVector {
        let mut entries: Vec<(usize, f64)> = bow
            .entries
            .iter()
            .map(|&(id, count)| (id, count as f64 * self.idf_for(id)))
            .collect();

        if self.config.normalize {
            let norm = entries.iter().map(|(_, w)| w * w).sum::<f64>().sqrt();
            if norm > 0.0 {
                for (_, w) in entries.iter_mut() {
                    *w /= norm;
                }
            }
        }

        entries.retain(|&(_, w)| w.abs() > WEIGHT_EPSILON);
        TfidfVector { entries }
    }

    pub fn transform_corpus(&self, corpus: &[BagOfWords]) -> Vec<TfidfVector> {
        corpus.iter().map(|bow| self.transform(bow)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bow(entries: &[(usize, u32)]) -> BagOfWords {
        BagOfWords {
            entries: entries.to_vec(),
        }
    }

    #[test]
    fn test_term_in_every_document_vanishes() {
        // foo bar / bar baz
        let corpus = vec![bow(&[(0, 1), (1, 1)]), bow(&[(1, 1), (2, 1)])];
        let model = TfidfModel::fit(&corpus, TfidfConfig::default());
        let weighted = model.transform_corpus(&corpus);

        assert_eq!(weighted.len(), 2);
        assert_eq!(weighted[0].entries, vec![(0, 1.0)]);
        assert_eq!(weighted[1].entries, vec![(2, 1.0)]);
        assert_eq!(model.doc_freq(1), 2);
    }

    #[test]
    fn test_unnormalized_weights() {
        let corpus = vec![
            bow(&[(0, 2), (1, 1)]),
            bow(&[(1, 1)]),
            bow(&[(1, 1)]),
            bow(&[(2, 1)]),
        ];
        let config = TfidfConfig {
            normalize: false,
            ..Default::default()
        };
        let model = TfidfModel::fit(&corpus, config);
        let weighted = model.transform(&corpus[0]);

        // id 0: 2 * log2(4/1) = 4, id 1: 1 * log2(4/3)
        assert!((weighted.weight(0) - 4.0).abs() < 1e-9);
        assert!((weighted.weight(1) - (4.0f64 / 3.0).log2()).abs() < 1e-9);
    }

    #[test]
    fn test_normalized_vectors_have_unit_length() {
        let corpus = vec![bow(&[(0, 3), (1, 1)]), bow(&[(1, 2), (2, 1)]), bow(&[(2, 4)])];
        let model = TfidfModel::fit(&corpus, TfidfConfig::default());

        for vector in model.transform_corpus(&corpus) {
            let norm: f64 = vector.entries.iter().map(|(_, w)| w * w).sum::<f64>().sqrt();
            assert!((norm - 1.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_unseen_ids() {
        let corpus = vec![bow(&[(0, 1)]), bow(&[(1, 1)])];
        let unseen = bow(&[(0, 1), (5, 1)]);

        let standard = TfidfModel::fit(&corpus, TfidfConfig::default());
        assert_eq!(standard.transform(&unseen).entries, vec![(0, 1.0)]);

        let smooth = TfidfModel::fit(
            &corpus,
            TfidfConfig {
                idf: IdfMethod::Smooth,
                normalize: false,
            },
        );
        let weighted = smooth.transform(&unseen);
        assert_eq!(weighted.len(), 2);
        assert!(weighted.weight(5).is_finite());
        assert!(weighted.weight(5) > weighted.weight(0));
    }
}
