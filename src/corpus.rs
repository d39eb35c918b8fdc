//! Readers for the two input shapes: a folder of conversation exports and a
//! pre-segmented sentence file.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use glob::glob;

use crate::error::{Result, TopicError};

/// Column holding the conversation text in exported `.tsv` files.
pub const DEFAULT_TEXT_COLUMN: usize = 3;

/// Reads every `*.tsv` file directly inside a folder and pulls out one text column.
#[derive(Debug, Clone)]
pub struct CorpusLoader {
    text_column: usize,
}

impl CorpusLoader {
    pub fn new() -> Self {
        CorpusLoader {
            text_column: DEFAULT_TEXT_COLUMN,
        }
    }

    pub fn text_column(mut self, column: usize) -> Self {
        self.text_column = column;
        self
    }

    /// `.tsv` files in the folder (non-recursive), in sorted path order.
    pub fn discover(&self, folder: &Path) -> Result<Vec<PathBuf>> {
        if !folder.is_dir() {
            return Err(TopicError::InputNotFound(folder.to_path_buf()));
        }

        let pattern = folder.join("*.tsv");
        let mut files = Vec::new();
        for entry in glob(&pattern.to_string_lossy())? {
            let path = entry?;
            if path.is_file() {
                files.push(path);
            }
        }

        if files.is_empty() {
            return Err(TopicError::NoInputFiles(folder.to_path_buf()));
        }
        Ok(files)
    }

    /// Raw text records from every file, file order then row order.
    pub fn load(&self, folder: &Path) -> Result<Vec<String>> {
        let files = self.discover(folder)?;
        let mut records = Vec::new();

        for (count, path) in files.iter().enumerate() {
            let rows = self.load_file(path)?;
            log::info!("File {} done! ({}, {} rows)", count + 1, path.display(), rows.len());
            records.extend(rows);
        }

        Ok(records)
    }

    pub fn load_file(&self, path: &Path) -> Result<Vec<String>> {
        let tsv_error = |source: csv::Error| TopicError::Tsv {
            path: path.to_path_buf(),
            source,
        };

        let mut reader = csv::ReaderBuilder::new()
            .delimiter(b'\t')
            .has_headers(false)
            .flexible(true)
            .from_path(path)
            .map_err(tsv_error)?;

        let mut texts = Vec::new();
        for (row, result) in reader.records().enumerate() {
            let record = result.map_err(tsv_error)?;
            let text = record.get(self.text_column).ok_or_else(|| TopicError::MissingColumn {
                path: path.to_path_buf(),
                row: row + 1,
                column: self.text_column,
                found: record.len(),
            })?;
            texts.push(text.to_string());
        }

        Ok(texts)
    }
}

impl Default for CorpusLoader {
    fn default() -> Self {
        Self::new()
    }
}

/// Position → original sentence text, kept for tracing topics back to input.
#[derive(Debug, Clone, Default)]
pub struct SentenceIndex {
    sentences: BTreeMap<usize, String>,
}

impl SentenceIndex {
    pub fn insert(&mut self, position: usize, sentence: String) {
        self.sentences.insert(position, sentence);
    }

    pub fn get(&self, position: usize) -> Option<&str> {
        self.sentences.get(&position).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.sentences.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sentences.is_empty()
    }
}

#[derive(Debug, Clone, Default)]
pub struct SentenceCorpus {
    pub index: SentenceIndex,
    pub sentences: Vec<Vec<String>>,
}

impl SentenceCorpus {
    pub fn len(&self) -> usize {
        self.sentences.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sentences.is_empty()
    }
}

/// Reads `<index>\t<space separated tokens>` lines.
///
/// Reading stops quietly at the first line that does not split into exactly
/// two fields; everything after it is ignored.
pub fn read_sentence_corpus<P: AsRef<Path>>(path: P) -> Result<SentenceCorpus> {
    let path = path.as_ref();
    let io_error = |source: std::io::Error| TopicError::Io {
        path: path.to_path_buf(),
        source,
    };

    let file = File::open(path).map_err(|source| match source.kind() {
        std::io::ErrorKind::NotFound => TopicError::InputNotFound(path.to_path_buf()),
        _ => io_error(source),
    })?;

    let mut corpus = SentenceCorpus::default();
    for line in BufReader::new(file).lines() {
        let line = line.map_err(io_error)?;
        let fields: Vec<&str> = line.trim().split('\t').collect();
        if fields.len() != 2 {
            log::debug!("Stopping at line {}: {} fields", corpus.len() + 1, fields.len());
            break;
        }

        let sentence = fields[1];
        corpus.index.insert(corpus.len(), sentence.to_string());
        corpus.sentences.push(
            sentence
                .split(' ')
                .filter(|token| !token.is_empty())
                .map(|token| token.to_string())
                .collect(),
        );
    }

    Ok(corpus)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_load_preserves_file_then_row_order() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("b.tsv"), "1\tx\ty\tthird\n2\tx\ty\tfourth\n").unwrap();
        fs::write(dir.path().join("a.tsv"), "1\tx\ty\tfirst\n2\tx\ty\tsecond\n").unwrap();
        fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

        let records = CorpusLoader::new().load(dir.path()).unwrap();
        assert_eq!(records, vec!["first", "second", "third", "fourth"]);
    }

    #[test]
    fn test_extra_columns_are_fine() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("a.tsv"), "1\tx\ty\thello there\tmeta\textra\n").unwrap();

        let records = CorpusLoader::new().load(dir.path()).unwrap();
        assert_eq!(records, vec!["hello there"]);
    }

    #[test]
    fn test_short_row_is_fatal() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("a.tsv"), "1\tx\ty\tok\n2\tx\n").unwrap();

        let err = CorpusLoader::new().load(dir.path()).unwrap_err();
        match err {
            TopicError::MissingColumn { row, column, found, .. } => {
                assert_eq!(row, 2);
                assert_eq!(column, 3);
                assert_eq!(found, 2);
            }
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_missing_folder_and_empty_folder() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("nope");
        assert!(matches!(
            CorpusLoader::new().load(&missing),
            Err(TopicError::InputNotFound(_))
        ));
        assert!(matches!(
            CorpusLoader::new().load(dir.path()),
            Err(TopicError::NoInputFiles(_))
        ));
    }

    #[test]
    fn test_custom_text_column() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("a.tsv"), "id\tbody\n").unwrap();

        let records = CorpusLoader::new().text_column(1).load(dir.path()).unwrap();
        assert_eq!(records, vec!["body"]);
    }

    #[test]
    fn test_sentence_reader_stops_at_malformed_line() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("corpus.tsv");
        fs::write(
            &path,
            "0\ta b\n1\tc d\n2\te f\n3\tg h\n4\ti\tj\n5\tk l\n",
        )
        .unwrap();

        let corpus = read_sentence_corpus(&path).unwrap();
        assert_eq!(corpus.len(), 4);
        assert_eq!(corpus.index.len(), 4);
        assert_eq!(corpus.index.get(3), Some("g h"));
        assert_eq!(corpus.index.get(4), None);
        assert_eq!(corpus.sentences[0], vec!["a", "b"]);
    }

    #[test]
    fn test_sentence_reader_trims_and_splits_on_spaces() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("corpus.tsv");
        fs::write(&path, "0\tfoo  bar \r\n1\tbar baz\n").unwrap();

        let corpus = read_sentence_corpus(&path).unwrap();
        assert_eq!(corpus.sentences, vec![vec!["foo", "bar"], vec!["bar", "baz"]]);
        assert_eq!(corpus.index.get(0), Some("foo  bar"));
    }

    #[test]
    fn test_sentence_reader_missing_file() {
        let result = read_sentence_corpus("/nonexistent/corpus_train_test.tsv");
        assert!(matches!(result, Err(TopicError::InputNotFound(_))));
    }
}
