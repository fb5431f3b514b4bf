use anyhow::{Context, Result};
use clap::Parser;
use layline_simulator::{run, Config};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "layline", about = "Run craps wagering strategies at a seeded table.")]
struct Args {
    /// Path to the YAML run description.
    #[arg(long)]
    config: PathBuf,

    /// Override the configured dice seed.
    #[arg(long)]
    seed: Option<u64>,

    /// Override the configured roll limit.
    #[arg(long)]
    max_rolls: Option<u64>,

    /// Print the final summary as JSON on stdout.
    #[arg(long, default_value_t = false)]
    json: bool,
}

fn init_tracing(level: &str) -> Result<()> {
    // RUST_LOG wins over the config file.
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(level).context("invalid log level")?,
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = Config::from_file(&args.config)?;
    if let Some(seed) = args.seed {
        config.seed = Some(seed);
    }
    if let Some(max_rolls) = args.max_rolls {
        config.max_rolls = max_rolls;
    }
    init_tracing(&config.log_level)?;

    let summary = run(&config)?;
    if args.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&summary).context("could not encode summary")?
        );
    }
    Ok(())
}
