//! dropout-engine - batch entry point
//!
//! Reads a JSON batch, runs the decision engine, prints the report to stdout.

use std::path::PathBuf;
use std::process;

use anyhow::Context;
use clap::Parser;

use dropout_engine::api;
use dropout_engine::constants::APP_VERSION;
use dropout_engine::EngineConfig;

#[derive(Parser)]
#[command(name = "dropout-engine")]
#[command(version, about = "Hybrid rule + classifier dropout-risk decisions", long_about = None)]
struct Cli {
    /// Batch file (class names, feature names, records, outputs, attributions)
    #[arg(short, long)]
    input: PathBuf,

    /// Engine config (JSON); default location is used when omitted
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Decide samples in parallel
    #[arg(long)]
    parallel: bool,

    /// Pretty-print the report
    #[arg(long)]
    pretty: bool,
}

fn main() {
    dotenvy::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        log::error!("{:#}", e);
        eprintln!("Error: {:#}", e);
        process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    log::info!("Starting dropout-engine v{}", APP_VERSION);

    let mut config = match &cli.config {
        Some(path) => {
            let mut config = EngineConfig::from_file(path)
                .with_context(|| format!("loading config {}", path.display()))?;
            config.apply_env();
            config
        }
        None => EngineConfig::load_default().context("loading default config")?,
    };
    if cli.parallel {
        config.parallel = true;
    }

    let report = api::run_batch_file(&cli.input, &config)
        .with_context(|| format!("running batch {}", cli.input.display()))?;

    let json = if cli.pretty {
        serde_json::to_string_pretty(&report)?
    } else {
        serde_json::to_string(&report)?
    };
    println!("{}", json);

    Ok(())
}
