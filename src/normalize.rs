//! Text normalization: lowercase, split into word runs, drop stopwords, stem.

mod porter;

use once_cell::sync::Lazy;
use regex::Regex;
use rust_stemmers::{Algorithm, Stemmer};
use serde::{Deserialize, Serialize};

use crate::stopwords::StopwordSet;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StemmerKind {
    /// Classic Porter (1980)
    #[default]
    Porter,
    /// Snowball English, also known as Porter2
    Snowball,
}

enum Stemming {
    Porter,
    Snowball(Stemmer),
}

impl From<StemmerKind> for Stemming {
    fn from(kind: StemmerKind) -> Self {
        match kind {
            StemmerKind::Porter => Stemming::Porter,
            StemmerKind::Snowball => Stemming::Snowball(Stemmer::create(Algorithm::English)),
        }
    }
}

static WORD_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\w+").expect("valid word pattern"));

/// Turns raw conversation text into stemmed token sequences.
///
/// The stopword set is injected rather than fetched, so normalization is a
/// pure function of its input.
pub struct TextNormalizer {
    stopwords: StopwordSet,
    stemming: Stemming,
}

impl TextNormalizer {
    pub fn new(stopwords: StopwordSet) -> Self {
        Self::with_stemmer(stopwords, StemmerKind::default())
    }

    pub fn with_stemmer(stopwords: StopwordSet, stemmer: StemmerKind) -> Self {
        TextNormalizer {
            stopwords,
            stemming: stemmer.into(),
        }
    }

    /// Lowercased maximal runs of word characters, punctuation and whitespace dropped.
    pub fn tokenize(&self, text: &str) -> Vec<String> {
        WORD_RE
            .find_iter(&text.to_lowercase())
            .map(|m| m.as_str().to_string())
            .collect()
    }

    pub fn stem(&self, token: &str) -> String {
        match &self.stemming {
            Stemming::Porter => porter::stem(token),
            Stemming::Snowball(stemmer) => stemmer.stem(token).into_owned(),
        }
    }

    pub fn normalize(&self, text: &str) -> Vec<String> {
        self.tokenize(text)
            .into_iter()
            .filter(|token| !self.stopwords.contains(token))
            .map(|token| self.stem(&token))
            .collect()
    }

    /// One token sequence per input, in input order. Texts made only of
    /// stopwords still yield an (empty) entry.
    pub fn normalize_all<S: AsRef<str>>(&self, texts: &[S]) -> Vec<Vec<String>> {
        texts.iter().map(|text| self.normalize(text.as_ref())).collect()
    }
}

impl Default for TextNormalizer {
    fn default() -> Self {
        Self::new(StopwordSet::english())
    }
}
