//! Run configuration for both pipelines, loadable from JSON.

use std::fs;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::corpus::DEFAULT_TEXT_COLUMN;
use crate::error::{Result, TopicError};
use crate::normalize::{StemmerKind, TextNormalizer};
use crate::stopwords::StopwordSet;
use crate::tfidf::TfidfConfig;
use crate::topic_modeling::{LdaConfig, LsiConfig};

/// Corpus-wide topic discovery over a folder of conversation exports.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DiscoveryConfig {
    pub text_column: usize,
    pub words_per_topic: usize,
    /// Stopword list, one word per line; the built-in English list when unset
    pub stopwords: Option<PathBuf>,
    pub stemmer: StemmerKind,
    pub lda: LdaConfig,
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        DiscoveryConfig {
            text_column: DEFAULT_TEXT_COLUMN,
            words_per_topic: 2,
            stopwords: None,
            stemmer: StemmerKind::default(),
            lda: LdaConfig::discovery(),
        }
    }
}

impl DiscoveryConfig {
    pub fn load_stopwords(&self) -> Result<StopwordSet> {
        match &self.stopwords {
            Some(path) => StopwordSet::from_file(path),
            None => Ok(StopwordSet::english()),
        }
    }

    /// Normalizer with the configured stopword list and stemmer.
    pub fn normalizer(&self) -> Result<TextNormalizer> {
        let stopwords = self.load_stopwords()?;
        log::info!("Using {} stopwords, {:?} stemming", stopwords.len(), self.stemmer);
        Ok(TextNormalizer::with_stemmer(stopwords, self.stemmer))
    }
}

/// Topic and keyword extraction over a pre-segmented sentence file.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectorConfig {
    pub corpus_path: PathBuf,
    pub lsi_output: PathBuf,
    pub lda_output: PathBuf,
    pub words_per_topic: usize,
    pub tfidf: TfidfConfig,
    pub lsi: LsiConfig,
    pub lda: LdaConfig,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        DetectorConfig {
            corpus_path: PathBuf::from("corpus_train_test.tsv"),
            lsi_output: PathBuf::from("topics_lsi.tsv"),
            lda_output: PathBuf::from("topics_lda.tsv"),
            words_per_topic: 50,
            tfidf: TfidfConfig::default(),
            lsi: LsiConfig::default(),
            lda: LdaConfig::default(),
        }
    }
}

/// Read a JSON config file; missing fields fall back to their defaults.
pub fn load_json<T: DeserializeOwned, P: AsRef<Path>>(path: P) -> Result<T> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|source| TopicError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&content).map_err(|source| TopicError::Config {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tfidf::IdfMethod;
    use std::io::Write;

    #[test]
    fn test_defaults_match_the_two_pipelines() {
        let discovery = DiscoveryConfig::default();
        assert_eq!(discovery.text_column, 3);
        assert_eq!(discovery.words_per_topic, 2);
        assert_eq!(discovery.lda.num_topics, 10);
        assert_eq!(discovery.lda.passes, 20);
        assert_eq!(discovery.stemmer, StemmerKind::Porter);

        let detector = DetectorConfig::default();
        assert_eq!(detector.corpus_path, PathBuf::from("corpus_train_test.tsv"));
        assert_eq!(detector.words_per_topic, 50);
        assert_eq!(detector.lda.passes, 1);
        assert_eq!(detector.lsi.num_topics, 10);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"words_per_topic": 20, "lda": {{"random_seed": 9}}, "tfidf": {{"idf": "smooth"}}}}"#
        )
        .unwrap();

        let config: DetectorConfig = load_json(file.path()).unwrap();
        assert_eq!(config.words_per_topic, 20);
        assert_eq!(config.lda.random_seed, Some(9));
        assert_eq!(config.lda.num_topics, 10);
        assert_eq!(config.tfidf.idf, IdfMethod::Smooth);
        assert!(config.tfidf.normalize);
        assert_eq!(config.lda_output, PathBuf::from("topics_lda.tsv"));
    }

    #[test]
    fn test_stemmer_selected_from_json() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"stemmer": "snowball"}}"#).unwrap();

        let config: DiscoveryConfig = load_json(file.path()).unwrap();
        assert_eq!(config.stemmer, StemmerKind::Snowball);
        let normalizer = config.normalizer().unwrap();
        assert_eq!(normalizer.normalize("quickly shipped"), vec!["quick", "ship"]);

        let porter = DiscoveryConfig::default().normalizer().unwrap();
        assert_eq!(porter.normalize("quickly shipped"), vec!["quickli", "ship"]);
    }

    #[test]
    fn test_bad_json_is_a_config_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{{ not json").unwrap();

        let result: Result<DiscoveryConfig> = load_json(file.path());
        assert!(matches!(result, Err(TopicError::Config { .. })));
    }
}
