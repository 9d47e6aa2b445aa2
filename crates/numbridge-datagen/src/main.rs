// ─────────────────────────────────────────────────────────────────────
// NumBridge — Fixture Generator CLI
// (C) 1998-2026 Miroslav Sotek. All rights reserved.
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! numbridge-datagen: write a file of uniformly random values, one per line.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use env_logger::Env;

use numbridge_datagen::{run, DataGenConfig};
use numbridge_types::FloatFormat;

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Format {
    /// Shortest text that reads back to the same value
    Shortest,
    /// Fixed-point, `--precision` decimals (6 matches C "%lf")
    Fixed,
}

#[derive(Parser)]
#[command(name = "numbridge-datagen")]
#[command(about = "Generate number-stream fixtures for the NumBridge codec")]
#[command(version)]
struct Cli {
    /// Output file
    #[arg(short, long, default_value = "data.txt")]
    output: PathBuf,

    /// Number of values to write
    #[arg(short = 'n', long, default_value = "100000")]
    count: usize,

    /// Lower bound (inclusive)
    #[arg(long, default_value = "-10000", allow_hyphen_values = true)]
    low: f64,

    /// Upper bound (inclusive)
    #[arg(long, default_value = "10000", allow_hyphen_values = true)]
    high: f64,

    /// Random seed for reproducibility
    #[arg(long)]
    seed: Option<u64>,

    /// Text representation of each value
    #[arg(long, value_enum, default_value = "shortest")]
    format: Format,

    /// Decimals for `--format fixed`
    #[arg(long, default_value = "6")]
    precision: usize,
}

impl From<Cli> for DataGenConfig {
    fn from(cli: Cli) -> Self {
        let float_format = match cli.format {
            Format::Shortest => FloatFormat::Shortest,
            Format::Fixed => FloatFormat::Fixed {
                precision: cli.precision,
            },
        };
        Self {
            output: cli.output,
            count: cli.count,
            low: cli.low,
            high: cli.high,
            seed: cli.seed,
            float_format,
        }
    }
}

fn main() {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let config = DataGenConfig::from(Cli::parse());
    log::debug!("configuration: {config:?}");

    if let Err(e) = run(&config) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
