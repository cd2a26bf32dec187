use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use log::info;

use digit_net::corpus::load_corpus;
use digit_net::{run_sweep, Dataset, Episodes, ExperimentConfig};

/// Trains a digit classifier for each hidden-layer size and reports test
/// accuracy as JSON.
#[derive(Debug, Parser)]
#[command(name = "digit-net", version)]
struct Args {
    /// Training corpus
    #[arg(long)]
    train: PathBuf,
    /// Test corpus
    #[arg(long)]
    test: PathBuf,
    /// JSON experiment config; unset keys keep their defaults
    #[arg(long)]
    config: Option<PathBuf>,
    #[arg(long)]
    epochs: Option<usize>,
    #[arg(long)]
    learning_rate: Option<f64>,
    #[arg(long)]
    seed: Option<u64>,
    /// Run weight updates on the calling thread
    #[arg(long)]
    sequential: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => ExperimentConfig::load_json(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => ExperimentConfig::default(),
    };
    if let Some(epochs) = args.epochs {
        config.epochs = epochs;
    }
    if let Some(learning_rate) = args.learning_rate {
        config.learning_rate = learning_rate;
    }
    if args.seed.is_some() {
        config.seed = args.seed;
    }
    if args.sequential {
        config.episodes = Episodes::Sequential;
    }

    let train = load_corpus(&args.train, config.row_width)
        .with_context(|| format!("loading training corpus {}", args.train.display()))?;
    let test = load_corpus(&args.test, config.row_width)
        .with_context(|| format!("loading test corpus {}", args.test.display()))?;

    let train = Dataset::from_samples(&train, config.regions, config.classes)?;
    let test = Dataset::from_samples(&test, config.regions, config.classes)?;
    info!("{} training / {} test samples, {} features", train.len(), test.len(), config.input_dim());

    let results = run_sweep(&config, &train, &test)?;
    println!("{}", serde_json::to_string_pretty(&results)?);
    Ok(())
}
