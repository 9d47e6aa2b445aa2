// ─────────────────────────────────────────────────────────────────────
// NumBridge — Bridge Configuration
// ─────────────────────────────────────────────────────────────────────

use serde::{Deserialize, Serialize};

use crate::error::{NumBridgeError, NumBridgeResult};

/// Argument handed to a registered callback by `callback()`.
/// 42 is the value the C library passes.
pub const CALLBACK_ARG: i32 = 42;

/// Upper bound on `FloatFormat::Fixed::precision`.
pub const MAX_FIXED_PRECISION: usize = 32;

/// Textual representation used when writing values to a number stream.
///
/// The default is `Shortest`: fixed-point drops significant digits of
/// small magnitudes (`3.5e-8` is `0.000000` at 6 decimals).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FloatFormat {
    /// Fixed-point with `precision` decimals. Precision 6 is byte-identical
    /// to C `printf("%lf")`.
    Fixed { precision: usize },
    /// Shortest text that parses back to the same `f64`.
    Shortest,
}

impl Default for FloatFormat {
    fn default() -> Self {
        FloatFormat::Shortest
    }
}

/// Runtime configuration for a `NativeKernel`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BridgeConfig {
    /// Integer passed to the function given to `callback()`.
    /// Default: 42.
    pub callback_arg: i32,

    /// Representation used by `write_file`.
    /// Default: shortest round-trip text.
    pub float_format: FloatFormat,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            callback_arg: CALLBACK_ARG,
            float_format: FloatFormat::default(),
        }
    }
}

impl BridgeConfig {
    /// Validate configuration parameters.
    pub fn validate(&self) -> NumBridgeResult<()> {
        if let FloatFormat::Fixed { precision } = self.float_format {
            if precision > MAX_FIXED_PRECISION {
                return Err(NumBridgeError::Config(format!(
                    "float_format.precision must be <= {MAX_FIXED_PRECISION}, got {precision}"
                )));
            }
        }
        Ok(())
    }

    /// Load from JSON string. Missing fields take their defaults.
    pub fn from_json(json: &str) -> NumBridgeResult<Self> {
        serde_json::from_str(json)
            .map_err(|e| NumBridgeError::Config(format!("JSON parse error: {e}")))
    }

    /// Serialize to a JSON string.
    pub fn to_json(&self) -> NumBridgeResult<String> {
        serde_json::to_string(self)
            .map_err(|e| NumBridgeError::Config(format!("JSON encode error: {e}")))
    }
}
