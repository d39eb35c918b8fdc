//! The two end-to-end runs, composed from the library parts.

use std::path::Path;

use crate::config::{DetectorConfig, DiscoveryConfig};
use crate::corpus::{read_sentence_corpus, CorpusLoader, SentenceIndex};
use crate::error::{Result, TopicError};
use crate::normalize::TextNormalizer;
use crate::output::write_topic_keywords;
use crate::tfidf::{TfidfModel, TfidfVector};
use crate::topic_modeling::{LdaModel, LsiModel, ModeledTopic, TopicModel};
use crate::vocabulary::Vocabulary;

#[derive(Debug)]
pub struct DiscoveryReport {
    pub documents: usize,
    pub vocabulary: Vocabulary,
    pub topics: Vec<ModeledTopic>,
}

/// Load every `.tsv` in `folder`, normalize, and fit LDA over the bag-of-words corpus.
pub fn discover_topics(
    folder: &Path,
    normalizer: &TextNormalizer,
    config: &DiscoveryConfig,
) -> Result<DiscoveryReport> {
    let records = CorpusLoader::new()
        .text_column(config.text_column)
        .load(folder)?;
    log::info!("Loaded {} conversations", records.len());

    let texts = normalizer.normalize_all(&records);
    drop(records);

    let vocabulary = Vocabulary::build(&texts);
    if vocabulary.is_empty() {
        return Err(TopicError::EmptyCorpus);
    }
    let corpus = vocabulary.corpus(&texts);
    log::info!(
        "Vocabulary: {} tokens over {} documents",
        vocabulary.len(),
        corpus.len()
    );

    let lda = LdaModel::fit(&corpus, &vocabulary, &config.lda)?;
    let topics = lda.show_topics(config.words_per_topic)?;

    Ok(DiscoveryReport {
        documents: corpus.len(),
        vocabulary,
        topics,
    })
}

#[derive(Debug)]
pub struct DetectorReport {
    pub sentences: SentenceIndex,
    pub vocabulary: Vocabulary,
    pub lsi_topics: Vec<ModeledTopic>,
    pub lda_topics: Vec<ModeledTopic>,
}

/// Read the sentence file, weight by TF-IDF, fit LSI then LDA and write
/// both keyword files (LSI first).
pub fn detect_topics(config: &DetectorConfig) -> Result<DetectorReport> {
    let corpus = read_sentence_corpus(&config.corpus_path)?;
    log::info!(
        "Read {} sentences from {}",
        corpus.len(),
        config.corpus_path.display()
    );

    let vocabulary = Vocabulary::build(&corpus.sentences);
    if corpus.is_empty() || vocabulary.is_empty() {
        return Err(TopicError::EmptyCorpus);
    }
    let bow = vocabulary.corpus(&corpus.sentences);

    let tfidf = TfidfModel::fit(&bow, config.tfidf.clone());
    let weighted = tfidf.transform_corpus(&bow);
    if weighted.iter().all(TfidfVector::is_empty) {
        log::error!("Every token appears in every sentence; TF-IDF leaves nothing to model");
        return Err(TopicError::EmptyCorpus);
    }

    let lsi = LsiModel::fit(&weighted, &vocabulary, &config.lsi)?;
    let lsi_topics = lsi.show_topics(config.words_per_topic)?;
    write_topic_keywords(&config.lsi_output, &lsi_topics)?;

    let lda = LdaModel::fit(&weighted, &vocabulary, &config.lda)?;
    let lda_topics = lda.show_topics(config.words_per_topic)?;
    write_topic_keywords(&config.lda_output, &lda_topics)?;

    Ok(DetectorReport {
        sentences: corpus.index,
        vocabulary,
        lsi_topics,
        lda_topics,
    })
}
