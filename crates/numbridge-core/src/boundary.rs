// ─────────────────────────────────────────────────────────────────────
// NumBridge — Call Boundary
// ─────────────────────────────────────────────────────────────────────
//! The call interface between a caller and the kernel/codec.
//!
//! `NativeBoundary` carries the C-shaped signatures of the shared
//! library this crate replaces: counts and dimensions arrive as signed
//! `i32`, and the file operations answer with an `i32` status (0 on
//! success). `NativeKernel` implements it on top of [`crate::kernel`]
//! and [`crate::codec`], validating every count before it touches a
//! buffer.

use std::path::Path;

use numbridge_types::{BridgeConfig, NumBridgeError, NumBridgeResult, Point};

use crate::{codec, kernel};

/// Integer callback handed to `callback()`.
pub type IntCallback<'a> = &'a dyn Fn(i32) -> i32;

/// Trait for kernel/codec backends.
pub trait NativeBoundary: Send + Sync {
    fn add(&self, x: i32, y: i32) -> i32;
    fn sum(&self, array: &[i32], length: i32) -> NumBridgeResult<i32>;
    fn multiply(&self, x: f32, y: f32) -> f32;
    fn greet(&self, name: &str) -> NumBridgeResult<String>;
    fn callback(&self, f: IntCallback<'_>) -> i32;
    fn move_point(&self, p: Point, dx: i32, dy: i32) -> Point;
    fn is_even(&self, num: i32) -> bool;
    fn matrix_multiply(
        &self,
        a: &[f64],
        b: &[f64],
        c: &mut [f64],
        m: i32,
        n: i32,
        p: i32,
    ) -> NumBridgeResult<()>;
    fn read_file(&self, path: &Path, data: &mut [f64], size: i32) -> i32;
    fn write_file(&self, path: &Path, data: &[f64], size: i32) -> i32;
}

/// In-process implementation of the boundary.
#[derive(Debug, Clone, Default)]
pub struct NativeKernel {
    config: BridgeConfig,
}

impl NativeKernel {
    pub fn new(config: BridgeConfig) -> NumBridgeResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &BridgeConfig {
        &self.config
    }

    /// Codec read with the full error, for callers that want more than a status.
    pub fn try_read_file(&self, path: &Path, data: &mut [f64], size: i32) -> NumBridgeResult<()> {
        let size = to_count("read_file", "size", size)?;
        let buf = prefix_mut("read_file", data, size)?;
        codec::read_file(path, buf)
    }

    /// Read `size` values into a new vector sized by what the file holds.
    ///
    /// Unlike `read_file` there is no caller buffer to bound `size`, so
    /// nothing is allocated for values that never arrive.
    pub fn read_values(&self, path: &Path, size: i32) -> NumBridgeResult<Vec<f64>> {
        let size = to_count("read_file", "size", size)?;
        codec::read_values(path, size)
    }

    /// Codec write with the full error, for callers that want more than a status.
    pub fn try_write_file(&self, path: &Path, data: &[f64], size: i32) -> NumBridgeResult<()> {
        let size = to_count("write_file", "size", size)?;
        let buf = data.get(..size).ok_or_else(|| {
            NumBridgeError::InvalidArgument(format!(
                "write_file: size {size} exceeds buffer of {} elements",
                data.len()
            ))
        })?;
        codec::write_file(path, buf, self.config.float_format)
    }
}

impl NativeBoundary for NativeKernel {
    fn add(&self, x: i32, y: i32) -> i32 {
        kernel::add(x, y)
    }

    fn sum(&self, array: &[i32], length: i32) -> NumBridgeResult<i32> {
        let length = to_count("sum", "length", length)?;
        kernel::sum(array, length)
    }

    fn multiply(&self, x: f32, y: f32) -> f32 {
        kernel::multiply(x, y)
    }

    fn greet(&self, name: &str) -> NumBridgeResult<String> {
        kernel::greet(name)
    }

    fn callback(&self, f: IntCallback<'_>) -> i32 {
        let arg = self.config.callback_arg;
        let result = kernel::callback(f, arg);
        log::debug!("callback({arg}) returned {result}");
        result
    }

    fn move_point(&self, p: Point, dx: i32, dy: i32) -> Point {
        kernel::move_point(p, dx, dy)
    }

    fn is_even(&self, num: i32) -> bool {
        kernel::is_even(num)
    }

    fn matrix_multiply(
        &self,
        a: &[f64],
        b: &[f64],
        c: &mut [f64],
        m: i32,
        n: i32,
        p: i32,
    ) -> NumBridgeResult<()> {
        let m = to_count("matrix_multiply", "m", m)?;
        let n = to_count("matrix_multiply", "n", n)?;
        let p = to_count("matrix_multiply", "p", p)?;
        kernel::matrix_multiply(a, b, c, m, n, p)
    }

    fn read_file(&self, path: &Path, data: &mut [f64], size: i32) -> i32 {
        status("read_file", path, self.try_read_file(path, data, size))
    }

    fn write_file(&self, path: &Path, data: &[f64], size: i32) -> i32 {
        status("write_file", path, self.try_write_file(path, data, size))
    }
}

/// Convert a signed C count to `usize`, rejecting negatives.
pub fn to_count(op: &str, name: &str, value: i32) -> NumBridgeResult<usize> {
    usize::try_from(value).map_err(|_| {
        log::warn!("{op}: rejected negative {name} = {value}");
        NumBridgeError::InvalidArgument(format!("{op}: {name} must be >= 0, got {value}"))
    })
}

fn prefix_mut<'a>(op: &str, data: &'a mut [f64], size: usize) -> NumBridgeResult<&'a mut [f64]> {
    let len = data.len();
    data.get_mut(..size).ok_or_else(|| {
        NumBridgeError::InvalidArgument(format!(
            "{op}: size {size} exceeds buffer of {len} elements"
        ))
    })
}

fn status(op: &str, path: &Path, result: NumBridgeResult<()>) -> i32 {
    match result {
        Ok(()) => 0,
        Err(e) => {
            log::error!("{op} {} failed: {e}", path.display());
            e.status_code()
        }
    }
}
