// ─────────────────────────────────────────────────────────────────────
// NumBridge — Kernel Types
// (C) 1998-2026 Miroslav Sotek. All rights reserved.
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
#![deny(unsafe_code)]
//! Value types, configuration, and error hierarchy shared by the
//! NumBridge numeric kernel, file codec, and Python bridge.

pub mod config;
pub mod error;
pub mod point;

pub use config::{BridgeConfig, FloatFormat, CALLBACK_ARG, MAX_FIXED_PRECISION};
pub use error::{
    NumBridgeError, NumBridgeResult, STATUS_CONFIG, STATUS_INVALID_ARGUMENT, STATUS_IO, STATUS_OK,
    STATUS_PARSE, STATUS_TRUNCATED,
};
pub use point::Point;
