// ─────────────────────────────────────────────────────────────────────
// NumBridge — Fixture Generator
// (C) 1998-2026 Miroslav Sotek. All rights reserved.
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
#![deny(unsafe_code)]
//! Writes number-stream fixtures: `count` values drawn uniformly from
//! `[low, high]`, one per line, for exercising the file codec.
//!
//! Not part of the runtime contract.

use std::path::{Path, PathBuf};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use numbridge_core::codec;
use numbridge_types::{FloatFormat, NumBridgeError, NumBridgeResult, MAX_FIXED_PRECISION};

/// Settings for one generated fixture file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataGenConfig {
    /// Destination file. Default: `data.txt`.
    pub output: PathBuf,
    /// Number of values (lines). Default: 100 000.
    pub count: usize,
    /// Lower bound, inclusive. Default: -10 000.
    pub low: f64,
    /// Upper bound, inclusive. Default: 10 000.
    pub high: f64,
    /// Seed for a reproducible fixture; entropy when `None`.
    pub seed: Option<u64>,
    /// Default: shortest round-trip text.
    pub float_format: FloatFormat,
}

impl Default for DataGenConfig {
    fn default() -> Self {
        Self {
            output: PathBuf::from("data.txt"),
            count: 100_000,
            low: -10_000.0,
            high: 10_000.0,
            seed: None,
            float_format: FloatFormat::Shortest,
        }
    }
}

impl DataGenConfig {
    pub fn validate(&self) -> NumBridgeResult<()> {
        if !self.low.is_finite() || !self.high.is_finite() {
            return Err(NumBridgeError::Config(format!(
                "bounds must be finite, got [{}, {}]",
                self.low, self.high
            )));
        }
        if self.low > self.high {
            return Err(NumBridgeError::Config(format!(
                "low must be <= high, got [{}, {}]",
                self.low, self.high
            )));
        }
        if !(self.high - self.low).is_finite() {
            return Err(NumBridgeError::Config(format!(
                "range [{}, {}] is wider than f64 can represent",
                self.low, self.high
            )));
        }
        if let FloatFormat::Fixed { precision } = self.float_format {
            if precision > MAX_FIXED_PRECISION {
                return Err(NumBridgeError::Config(format!(
                    "precision must be <= {MAX_FIXED_PRECISION}, got {precision}"
                )));
            }
        }
        Ok(())
    }
}

/// Draw `config.count` values uniformly from `[low, high]`.
pub fn generate(config: &DataGenConfig) -> NumBridgeResult<Vec<f64>> {
    config.validate()?;
    let mut rng = match config.seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_entropy(),
    };
    let (low, high) = (config.low, config.high);
    Ok((0..config.count).map(|_| rng.gen_range(low..=high)).collect())
}

/// Generate a fixture and write it to `config.output`.
///
/// Returns the path written.
pub fn run(config: &DataGenConfig) -> NumBridgeResult<&Path> {
    let values = generate(config)?;
    codec::write_file(&config.output, &values, config.float_format)?;
    log::info!(
        "wrote {} values in [{}, {}] to {}",
        values.len(),
        config.low,
        config.high,
        config.output.display()
    );
    Ok(&config.output)
}
