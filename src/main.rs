use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use clap::Parser;
use conversation_topics::config::{load_json, DiscoveryConfig};
use conversation_topics::output::{print_topic_summaries, topics_to_json};
use conversation_topics::pipeline::discover_topics;

#[derive(Parser, Debug)]
#[command(
    version,
    about = "Find the dominant topics in a folder of conversation logs",
    long_about = None
)]
struct Args {
    #[clap(short, long, help = "JSON file with run configuration")]
    config: Option<PathBuf>,
    #[clap(short, long, help = "Number of LDA topics (default 10)")]
    topics: Option<usize>,
    #[clap(short, long, help = "Number of training passes over the corpus (default 20)")]
    passes: Option<usize>,
    #[clap(short, long, help = "Random seed for a reproducible fit")]
    seed: Option<u64>,
    #[clap(short, long, help = "Words shown per topic (default 2)")]
    words: Option<usize>,
    #[clap(
        long,
        help = "Stopword list, one word per line. Built-in English list if not specified."
    )]
    stopwords: Option<PathBuf>,
    #[clap(long, help = "Print topics as JSON instead of text")]
    json: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let mut config: DiscoveryConfig = match &args.config {
        Some(path) => load_json(path)?,
        None => DiscoveryConfig::default(),
    };
    if let Some(topics) = args.topics {
        config.lda.num_topics = topics;
    }
    if let Some(passes) = args.passes {
        config.lda.passes = passes;
    }
    if let Some(seed) = args.seed {
        config.lda.random_seed = Some(seed);
    }
    if let Some(words) = args.words {
        config.words_per_topic = words;
    }
    if args.stopwords.is_some() {
        config.stopwords = args.stopwords.clone();
    }

    let folder = prompt_folder()?;
    let normalizer = config.normalizer()?;

    let report = discover_topics(&folder, &normalizer, &config)?;
    log::info!(
        "Fitted {} topics over {} documents ({} distinct tokens)",
        report.topics.len(),
        report.documents,
        report.vocabulary.len()
    );

    if args.json {
        println!("{}", topics_to_json(&report.topics)?);
    } else {
        print_topic_summaries(&report.topics);
    }

    Ok(())
}

fn prompt_folder() -> io::Result<PathBuf> {
    print!("Please enter the folder directory: ");
    io::stdout().flush()?;

    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(PathBuf::from(line.trim()))
}
