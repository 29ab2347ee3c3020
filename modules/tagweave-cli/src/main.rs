use std::fs;
use std::io::Read;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use tagweave_common::{AggregateOptions, PostRecord, TagWeaveError};
use tagweave_graph::{aggregate, zip_by_rank};

/// Aggregate a batch of scored posts into a hashtag co-occurrence graph
/// and summary statistics, as JSON for the rendering surfaces.
#[derive(Parser, Debug)]
#[command(name = "tagweave", version)]
struct Args {
    /// Path to a JSON array of post records, or "-" for stdin.
    #[arg(long, default_value = "-")]
    input: String,

    /// Write the output JSON here instead of stdout.
    #[arg(long)]
    output: Option<PathBuf>,

    /// Row cap for the location and tag tables.
    #[arg(long, env = "TAGWEAVE_TOP_N", default_value_t = 5)]
    top_n: usize,

    /// Node display size factor (size = count * factor).
    #[arg(long, env = "TAGWEAVE_SIZE_FACTOR", default_value_t = 3)]
    size_factor: u64,

    /// Number of sentiment histogram bins.
    #[arg(long, env = "TAGWEAVE_BINS", default_value_t = 10)]
    bins: usize,

    /// Row cap for the word-frequency table.
    #[arg(long, env = "TAGWEAVE_MAX_WORDS", default_value_t = 50)]
    max_words: usize,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("tagweave=info".parse()?))
        .init();

    let args = Args::parse();

    let raw = if args.input == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("failed to read posts from stdin")?;
        buf
    } else {
        fs::read_to_string(&args.input)
            .with_context(|| format!("failed to read posts from {}", args.input))?
    };

    let posts: Vec<PostRecord> =
        serde_json::from_str(&raw).map_err(|e| TagWeaveError::Input(e.to_string()))?;

    let opts = AggregateOptions::builder()
        .top_n(args.top_n)
        .size_factor(args.size_factor)
        .histogram_bins(args.bins)
        .max_words(args.max_words)
        .build();

    let result = aggregate(&posts, &opts)?;
    info!(
        posts = posts.len(),
        nodes = result.nodes.len(),
        edges = result.edges.len(),
        "batch aggregated"
    );

    let table = zip_by_rank(&result.location_table, &result.tag_table);
    let out = serde_json::json!({
        "elements": result.elements(),
        "table": table,
        "histogram": result.sentiment_histogram,
        "words": result.word_frequencies,
    });
    let rendered = serde_json::to_string_pretty(&out)?;

    match &args.output {
        Some(path) => fs::write(path, rendered)
            .with_context(|| format!("failed to write output to {}", path.display()))?,
        None => println!("{rendered}"),
    }

    Ok(())
}
