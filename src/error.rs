use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TopicError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Input not found: {0}")]
    InputNotFound(PathBuf),

    #[error("No .tsv files found in {0}")]
    NoInputFiles(PathBuf),

    #[error("Malformed tab-separated file {path}: {source}")]
    Tsv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("{path}: row {row} has {found} columns, column {column} is required")]
    MissingColumn {
        path: PathBuf,
        row: usize,
        column: usize,
        found: usize,
    },

    #[error("Invalid file pattern: {0}")]
    Pattern(#[from] glob::PatternError),

    #[error("Failed to list input files: {0}")]
    Glob(#[from] glob::GlobError),

    #[error("Stopword list unavailable at {path}: {source}")]
    Stopwords {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid configuration file {path}: {source}")]
    Config {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to encode JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Empty corpus: no documents or no tokens left after normalization")]
    EmptyCorpus,

    #[error("Topic {topic} out of range (model has {num_topics} topics)")]
    TopicOutOfRange { topic: usize, num_topics: usize },

    #[error("Model error: {0}")]
    Model(String),
}

pub type Result<T> = std::result::Result<T, TopicError>;
