//! Rendering fitted topics for the operator and for downstream files.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::error::{Result, TopicError};
use crate::topic_modeling::ModeledTopic;

/// `Topic <id>: 0.123*"word" + ...`, one line per topic.
pub fn format_topic_summaries(topics: &[ModeledTopic]) -> Vec<String> {
    topics
        .iter()
        .map(|topic| format!("Topic {}: {}", topic.id, topic))
        .collect()
}

pub fn print_topic_summaries(topics: &[ModeledTopic]) {
    for line in format_topic_summaries(topics) {
        println!("{}", line);
    }
}

pub fn topics_to_json(topics: &[ModeledTopic]) -> Result<String> {
    Ok(serde_json::to_string_pretty(topics)?)
}

/// `<id>\t<word>,<word>,...` per topic; weights are dropped.
pub fn keyword_line(topic: &ModeledTopic) -> String {
    format!("{}\t{}", topic.id, topic.keywords().join(","))
}

/// Overwrites `path` with one keyword line per topic, in topic order.
pub fn write_topic_keywords<P: AsRef<Path>>(path: P, topics: &[ModeledTopic]) -> Result<()> {
    let path = path.as_ref();
    let io_error = |source: std::io::Error| TopicError::Io {
        path: path.to_path_buf(),
        source,
    };

    let file = File::create(path).map_err(io_error)?;
    let mut writer = BufWriter::new(file);
    for topic in topics {
        writeln!(writer, "{}", keyword_line(topic)).map_err(io_error)?;
    }
    writer.flush().map_err(io_error)?;

    log::info!("Wrote {} topics to {}", topics.len(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn topic(id: usize, words: &[(&str, f64)]) -> ModeledTopic {
        ModeledTopic {
            id,
            words: words.iter().map(|&(w, p)| (w.to_string(), p)).collect(),
        }
    }

    #[test]
    fn test_summary_lines() {
        let topics = vec![
            topic(0, &[("love", 0.3), ("dog", 0.3)]),
            topic(1, &[("refund", 0.125), ("order", 0.05)]),
        ];
        assert_eq!(
            format_topic_summaries(&topics),
            vec![
                "Topic 0: 0.300*\"love\" + 0.300*\"dog\"",
                "Topic 1: 0.125*\"refund\" + 0.050*\"order\"",
            ]
        );
    }

    #[test]
    fn test_keyword_file_is_overwritten() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("topics_lda.tsv");
        fs::write(&path, "stale content\nmore stale\nand more\n").unwrap();

        let topics = vec![
            topic(0, &[("foo", 0.5), ("bar", 0.3), ("baz", 0.2)]),
            topic(1, &[("qux", -0.9)]),
        ];
        write_topic_keywords(&path, &topics).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(content, "0\tfoo,bar,baz\n1\tqux\n");
    }

    #[test]
    fn test_json_round_trip() {
        let topics = vec![topic(0, &[("foo", 0.5)])];
        let json = topics_to_json(&topics).unwrap();
        let parsed: Vec<ModeledTopic> = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, topics);
    }
}
