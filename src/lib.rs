//! Topic discovery over tab-separated conversation logs.
//!
//! Two batch pipelines share the same building blocks:
//! - corpus-wide discovery: folder of `.tsv` exports → normalize → bag of words → LDA
//! - sentence topic detection: pre-tokenized sentences → bag of words → TF-IDF → LSI + LDA

pub mod config;
pub mod corpus;
pub mod error;
pub mod normalize;
pub mod output;
pub mod pipeline;
pub mod stopwords;
pub mod tfidf;
pub mod topic_modeling;
pub mod vocabulary;

pub use error::{Result, TopicError};
