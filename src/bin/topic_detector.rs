use std::path::PathBuf;

use clap::Parser;
use conversation_topics::config::{load_json, DetectorConfig};
use conversation_topics::pipeline::detect_topics;

/// Runs with no arguments against ./corpus_train_test.tsv, writing
/// ./topics_lsi.tsv and ./topics_lda.tsv.
#[derive(Parser, Debug)]
#[command(
    version,
    about = "Extract LSI and LDA topic keywords from a sentence corpus",
    long_about = None
)]
struct Args {
    #[clap(short, long, help = "JSON file with run configuration")]
    config: Option<PathBuf>,
    #[clap(long, help = "Sentence corpus (default corpus_train_test.tsv)")]
    corpus: Option<PathBuf>,
    #[clap(long, help = "LSI keyword output (default topics_lsi.tsv)")]
    lsi_output: Option<PathBuf>,
    #[clap(long, help = "LDA keyword output (default topics_lda.tsv)")]
    lda_output: Option<PathBuf>,
    #[clap(short, long, help = "Number of topics for both models (default 10)")]
    topics: Option<usize>,
    #[clap(short, long, help = "LDA passes over the corpus (default 1)")]
    passes: Option<usize>,
    #[clap(short, long, help = "Random seed for a reproducible LDA fit")]
    seed: Option<u64>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let mut config: DetectorConfig = match &args.config {
        Some(path) => load_json(path)?,
        None => DetectorConfig::default(),
    };
    if let Some(corpus) = args.corpus {
        config.corpus_path = corpus;
    }
    if let Some(path) = args.lsi_output {
        config.lsi_output = path;
    }
    if let Some(path) = args.lda_output {
        config.lda_output = path;
    }
    if let Some(topics) = args.topics {
        config.lsi.num_topics = topics;
        config.lda.num_topics = topics;
    }
    if let Some(passes) = args.passes {
        config.lda.passes = passes;
    }
    if let Some(seed) = args.seed {
        config.lda.random_seed = Some(seed);
    }

    let report = detect_topics(&config)?;
    println!(
        "Processed {} sentences ({} distinct tokens)",
        report.sentences.len(),
        report.vocabulary.len()
    );
    println!(
        "LSI: {} topics -> {}",
        report.lsi_topics.len(),
        config.lsi_output.display()
    );
    println!(
        "LDA: {} topics -> {}",
        report.lda_topics.len(),
        config.lda_output.display()
    );

    Ok(())
}
