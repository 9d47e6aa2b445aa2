// ─────────────────────────────────────────────────────────────────────
// NumBridge — PyO3 FFI Bindings
// (C) 1998-2026 Miroslav Sotek. All rights reserved.
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
// Note: #[deny(unsafe_code)] not applied — PyO3 proc macros generate
// unsafe blocks internally. All hand-written code in this crate is safe.
//! Python-callable wrappers around the NumBridge kernel and codec.
//!
//! Drop-in for the `cffi`-loaded `example.so`: the same function names,
//! the same argument order, and the same `0 = success` status from the
//! file operations.
//!
//! # FFI Safety
//!
//! - Lists are copied in and out; no Python buffer is borrowed past a call.
//! - Invalid lengths, dimensions, and names raise `ValueError`.
//! - Exceptions raised inside a `callback()` callable propagate unchanged.
//! - File operations never raise; they return a non-zero status.
//!
//! Install: `pip install -e crates/numbridge-ffi` (requires maturin).
//!
//! Usage from Python:
//! ```python
//! import numbridge as lib
//!
//! lib.add(2, 3)                                  # 5
//! lib.move_point({"x": 12, "y": 21}, 10, 9)      # Point(x=22, y=30)
//! status, data = lib.read_file("data.txt", 100_000)
//! ```

use std::path::{Path, PathBuf};

use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use pyo3::types::PyDict;

use numbridge_core::{kernel, NativeBoundary, NativeKernel};
use numbridge_types::{
    BridgeConfig, FloatFormat, NumBridgeError, Point, CALLBACK_ARG, STATUS_CONFIG,
    STATUS_INVALID_ARGUMENT, STATUS_IO, STATUS_OK, STATUS_PARSE, STATUS_TRUNCATED,
};

fn value_error(e: NumBridgeError) -> PyErr {
    PyValueError::new_err(e.to_string())
}

// ─── PyPoint ────────────────────────────────────────────────────────

/// Python-visible `{x, y}` integer record.
#[pyclass(name = "Point", eq)]
#[derive(Clone, PartialEq)]
struct PyPoint {
    inner: Point,
}

#[pymethods]
impl PyPoint {
    #[new]
    #[pyo3(signature = (x = 0, y = 0))]
    fn new(x: i32, y: i32) -> Self {
        Self {
            inner: Point::new(x, y),
        }
    }

    #[getter]
    fn x(&self) -> i32 {
        self.inner.x
    }

    #[getter]
    fn y(&self) -> i32 {
        self.inner.y
    }

    fn to_dict<'py>(&self, py: Python<'py>) -> PyResult<Bound<'py, PyDict>> {
        let dict = PyDict::new(py);
        dict.set_item("x", self.inner.x)?;
        dict.set_item("y", self.inner.y)?;
        Ok(dict)
    }

    fn __repr__(&self) -> String {
        format!("Point(x={}, y={})", self.inner.x, self.inner.y)
    }
}

impl From<Point> for PyPoint {
    fn from(inner: Point) -> Self {
        Self { inner }
    }
}

/// Anything `move_point` accepts as a point: a `Point`, a mapping with
/// `"x"`/`"y"` keys, or an `(x, y)` pair.
#[derive(FromPyObject)]
enum PointArg {
    Point(PyPoint),
    Mapping {
        #[pyo3(item)]
        x: i32,
        #[pyo3(item)]
        y: i32,
    },
    Pair((i32, i32)),
}

impl From<PointArg> for Point {
    fn from(arg: PointArg) -> Self {
        match arg {
            PointArg::Point(p) => p.inner,
            PointArg::Mapping { x, y } => Point::new(x, y),
            PointArg::Pair(pair) => Point::from(pair),
        }
    }
}

// ─── PyBridgeConfig ─────────────────────────────────────────────────

/// Python-visible configuration for a `Bridge`.
#[pyclass(name = "BridgeConfig")]
#[derive(Clone)]
struct PyBridgeConfig {
    inner: BridgeConfig,
}

#[pymethods]
impl PyBridgeConfig {
    #[new]
    #[pyo3(signature = (callback_arg = CALLBACK_ARG, float_format = "shortest", precision = 6))]
    fn new(callback_arg: i32, float_format: &str, precision: usize) -> PyResult<Self> {
        let float_format = match float_format {
            "fixed" => FloatFormat::Fixed { precision },
            "shortest" => FloatFormat::Shortest,
            other => {
                return Err(PyValueError::new_err(format!(
                    "float_format must be 'fixed' or 'shortest', got {other:?}"
                )))
            }
        };
        let config = BridgeConfig {
            callback_arg,
            float_format,
        };
        config.validate().map_err(value_error)?;
        Ok(Self { inner: config })
    }

    /// Construct from JSON string.
    #[staticmethod]
    fn from_json(json: &str) -> PyResult<Self> {
        let config = BridgeConfig::from_json(json).map_err(value_error)?;
        config.validate().map_err(value_error)?;
        Ok(Self { inner: config })
    }

    fn to_json(&self) -> PyResult<String> {
        self.inner.to_json().map_err(value_error)
    }

    #[getter]
    fn callback_arg(&self) -> i32 {
        self.inner.callback_arg
    }

    #[getter]
    fn float_format(&self) -> &'static str {
        match self.inner.float_format {
            FloatFormat::Fixed { .. } => "fixed",
            FloatFormat::Shortest => "shortest",
        }
    }

    #[getter]
    fn precision(&self) -> Option<usize> {
        match self.inner.float_format {
            FloatFormat::Fixed { precision } => Some(precision),
            FloatFormat::Shortest => None,
        }
    }

    fn __repr__(&self) -> String {
        format!(
            "BridgeConfig(callback_arg={}, float_format={:?})",
            self.inner.callback_arg, self.inner.float_format
        )
    }
}

// ─── Shared call paths ──────────────────────────────────────────────

fn call_back(bridge: &NativeKernel, f: &Bound<'_, PyAny>) -> PyResult<i32> {
    let arg = bridge.config().callback_arg;
    let result = kernel::try_callback(|x| f.call1((x,))?.extract::<i32>(), arg)?;
    log::debug!("python callback({arg}) returned {result}");
    Ok(result)
}

/// On failure the values list is empty.
fn read_into(bridge: &NativeKernel, path: &Path, size: i32) -> (i32, Vec<f64>) {
    match bridge.read_values(path, size) {
        Ok(data) => (STATUS_OK, data),
        Err(e) => {
            log::error!("read_file {} failed: {e}", path.display());
            (e.status_code(), Vec::new())
        }
    }
}

/// Count to write: the caller's `size`, else `len` if it fits in `i32`.
fn write_size(len: usize, size: Option<i32>) -> Option<i32> {
    size.or_else(|| i32::try_from(len).ok())
}

fn write_from(bridge: &NativeKernel, path: &Path, data: &[f64], size: Option<i32>) -> i32 {
    match write_size(data.len(), size) {
        Some(size) => bridge.write_file(path, data, size),
        None => {
            log::error!(
                "write_file {}: {} values exceed the i32 size range",
                path.display(),
                data.len()
            );
            STATUS_INVALID_ARGUMENT
        }
    }
}

fn matmul(
    bridge: &NativeKernel,
    a: Vec<f64>,
    b: Vec<f64>,
    mut c: Vec<f64>,
    m: i32,
    n: i32,
    p: i32,
) -> PyResult<Vec<f64>> {
    bridge
        .matrix_multiply(&a, &b, &mut c, m, n, p)
        .map_err(value_error)?;
    Ok(c)
}

// ─── PyBridge ───────────────────────────────────────────────────────

/// A configured kernel: callback argument and output float format.
#[pyclass(name = "Bridge")]
struct PyBridge {
    inner: NativeKernel,
}

#[pymethods]
impl PyBridge {
    #[new]
    #[pyo3(signature = (config = None))]
    fn new(config: Option<PyBridgeConfig>) -> PyResult<Self> {
        let cfg = config.map(|c| c.inner).unwrap_or_default();
        let inner = NativeKernel::new(cfg).map_err(value_error)?;
        Ok(Self { inner })
    }

    #[getter]
    fn config(&self) -> PyBridgeConfig {
        PyBridgeConfig {
            inner: self.inner.config().clone(),
        }
    }

    /// Call `f(callback_arg)` and return its result.
    fn callback(&self, f: &Bound<'_, PyAny>) -> PyResult<i32> {
        call_back(&self.inner, f)
    }

    #[pyo3(signature = (a, b, c, m, n, p))]
    fn matrix_multiply(
        &self,
        a: Vec<f64>,
        b: Vec<f64>,
        c: Vec<f64>,
        m: i32,
        n: i32,
        p: i32,
    ) -> PyResult<Vec<f64>> {
        matmul(&self.inner, a, b, c, m, n, p)
    }

    /// Returns `(status, values)`; status 0 on success.
    fn read_file(&self, filename: PathBuf, size: i32) -> (i32, Vec<f64>) {
        read_into(&self.inner, &filename, size)
    }

    /// Returns status 0 on success. `size` defaults to `len(data)`.
    #[pyo3(signature = (filename, data, size = None))]
    fn write_file(&self, filename: PathBuf, data: Vec<f64>, size: Option<i32>) -> i32 {
        write_from(&self.inner, &filename, &data, size)
    }

    fn __repr__(&self) -> String {
        format!("Bridge(callback_arg={})", self.inner.config().callback_arg)
    }
}

// ─── Module-level functions (default bridge) ────────────────────────

#[pyfunction]
fn add(x: i32, y: i32) -> i32 {
    kernel::add(x, y)
}

/// Sum of all integers in `array`.
#[pyfunction]
fn sum(array: Vec<i32>) -> PyResult<i32> {
    kernel::sum(&array, array.len()).map_err(value_error)
}

#[pyfunction]
fn multiply(x: f32, y: f32) -> f32 {
    kernel::multiply(x, y)
}

/// Returns a new `str`; nothing to free on the Python side.
#[pyfunction]
fn greet(name: &str) -> PyResult<String> {
    kernel::greet(name).map_err(value_error)
}

#[pyfunction]
fn move_point(p: PointArg, dx: i32, dy: i32) -> PyPoint {
    kernel::move_point(p.into(), dx, dy).into()
}

#[pyfunction]
fn is_even(num: i32) -> bool {
    kernel::is_even(num)
}

/// Multiply row-major `a` (m×n) by `b` (n×p); returns `c` with its first
/// `m·p` entries replaced by the product.
#[pyfunction]
#[pyo3(signature = (a, b, c, m, n, p))]
fn matrix_multiply(
    a: Vec<f64>,
    b: Vec<f64>,
    c: Vec<f64>,
    m: i32,
    n: i32,
    p: i32,
) -> PyResult<Vec<f64>> {
    matmul(&NativeKernel::default(), a, b, c, m, n, p)
}

/// Call `f(42)` and return its result.
#[pyfunction]
fn callback(f: &Bound<'_, PyAny>) -> PyResult<i32> {
    call_back(&NativeKernel::default(), f)
}

/// Returns `(status, values)`; status 0 on success.
#[pyfunction]
fn read_file(filename: PathBuf, size: i32) -> (i32, Vec<f64>) {
    read_into(&NativeKernel::default(), &filename, size)
}

/// Returns status 0 on success. `size` defaults to `len(data)`.
#[pyfunction]
#[pyo3(signature = (filename, data, size = None))]
fn write_file(filename: PathBuf, data: Vec<f64>, size: Option<i32>) -> i32 {
    write_from(&NativeKernel::default(), &filename, &data, size)
}

// ─── Module Registration ────────────────────────────────────────────

/// NumBridge — native numeric kernel and number-stream codec.
///
/// - `add`, `sum`, `multiply`, `greet`, `move_point`, `is_even`
/// - `matrix_multiply`, `callback`
/// - `read_file`, `write_file` (status codes, `STATUS_*`)
/// - `Point`, `BridgeConfig`, `Bridge`
#[pymodule]
fn numbridge(m: &Bound<'_, PyModule>) -> PyResult<()> {
    // Kernel
    m.add_function(wrap_pyfunction!(add, m)?)?;
    m.add_function(wrap_pyfunction!(sum, m)?)?;
    m.add_function(wrap_pyfunction!(multiply, m)?)?;
    m.add_function(wrap_pyfunction!(greet, m)?)?;
    m.add_function(wrap_pyfunction!(move_point, m)?)?;
    m.add_function(wrap_pyfunction!(is_even, m)?)?;
    m.add_function(wrap_pyfunction!(matrix_multiply, m)?)?;
    m.add_function(wrap_pyfunction!(callback, m)?)?;
    // Codec
    m.add_function(wrap_pyfunction!(read_file, m)?)?;
    m.add_function(wrap_pyfunction!(write_file, m)?)?;
    m.add("STATUS_OK", STATUS_OK)?;
    m.add("STATUS_IO", STATUS_IO)?;
    m.add("STATUS_PARSE", STATUS_PARSE)?;
    m.add("STATUS_TRUNCATED", STATUS_TRUNCATED)?;
    m.add("STATUS_INVALID_ARGUMENT", STATUS_INVALID_ARGUMENT)?;
    m.add("STATUS_CONFIG", STATUS_CONFIG)?;
    m.add("CALLBACK_ARG", CALLBACK_ARG)?;
    // Types
    m.add_class::<PyPoint>()?;
    m.add_class::<PyBridgeConfig>()?;
    m.add_class::<PyBridge>()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pyo3::types::{PyString, PyTuple};

    fn extract_point(obj: &Bound<'_, PyAny>) -> PyResult<Point> {
        obj.extract::<PointArg>().map(Point::from)
    }

    #[test]
    fn test_point_arg_forms() {
        pyo3::prepare_freethreaded_python();
        Python::with_gil(|py| {
            let dict = PyDict::new(py);
            dict.set_item("x", 12).unwrap();
            dict.set_item("y", 21).unwrap();
            assert_eq!(extract_point(&dict).unwrap(), Point::new(12, 21));

            let pair = PyTuple::new(py, [3, 4]).unwrap();
            assert_eq!(extract_point(&pair).unwrap(), Point::new(3, 4));

            let point = Bound::new(py, PyPoint::new(-1, 5)).unwrap();
            assert_eq!(extract_point(&point).unwrap(), Point::new(-1, 5));
        });
    }

    #[test]
    fn test_point_arg_rejects_other_shapes() {
        pyo3::prepare_freethreaded_python();
        Python::with_gil(|py| {
            let partial = PyDict::new(py);
            partial.set_item("x", 1).unwrap();
            assert!(extract_point(&partial).is_err());
            assert!(extract_point(&PyString::new(py, "xy")).is_err());
            assert!(extract_point(&PyTuple::new(py, [1, 2, 3]).unwrap()).is_err());
        });
    }

    #[test]
    fn test_move_point_from_mapping() {
        pyo3::prepare_freethreaded_python();
        Python::with_gil(|py| {
            let dict = PyDict::new(py);
            dict.set_item("x", 12).unwrap();
            dict.set_item("y", 21).unwrap();
            let arg = dict.extract::<PointArg>().unwrap();
            assert_eq!(move_point(arg, 10, 9).inner, Point::new(22, 30));
        });
    }

    #[test]
    fn test_write_size_defaults_to_len() {
        assert_eq!(write_size(3, None), Some(3));
        assert_eq!(write_size(3, Some(2)), Some(2));
        assert_eq!(write_size(0, None), Some(0));
    }

    #[test]
    fn test_write_size_overflow() {
        assert_eq!(write_size(i32::MAX as usize, None), Some(i32::MAX));
        assert_eq!(write_size(i32::MAX as usize + 1, None), None);
        assert_eq!(write_size(i32::MAX as usize + 1, Some(4)), Some(4));
    }

    #[test]
    fn test_write_then_read_without_size() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.txt");
        let k = NativeKernel::default();
        let data = [0.5, -3.0, 3.5e-8];
        assert_eq!(write_from(&k, &path, &data, None), STATUS_OK);
        assert_eq!(read_into(&k, &path, 3), (STATUS_OK, data.to_vec()));
    }

    #[test]
    fn test_read_into_negative_size() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.txt");
        std::fs::write(&path, "1\n").unwrap();
        let (status, data) = read_into(&NativeKernel::default(), &path, -4);
        assert_eq!(status, STATUS_INVALID_ARGUMENT);
        assert!(data.is_empty());
    }

    #[test]
    fn test_read_into_max_size_on_short_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("short.txt");
        std::fs::write(&path, "1\n2\n").unwrap();
        let (status, data) = read_into(&NativeKernel::default(), &path, i32::MAX);
        assert_eq!(status, STATUS_TRUNCATED);
        assert!(data.is_empty());
    }

    #[test]
    fn test_read_into_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let (status, _) = read_into(&NativeKernel::default(), &dir.path().join("nope"), 1);
        assert_eq!(status, STATUS_IO);
    }

    #[test]
    fn test_config_defaults_to_shortest() {
        let cfg = PyBridgeConfig::new(CALLBACK_ARG, "shortest", 6).unwrap();
        assert_eq!(cfg.inner, BridgeConfig::default());
        let fixed = PyBridgeConfig::new(CALLBACK_ARG, "fixed", 6).unwrap();
        assert_eq!(fixed.precision(), Some(6));
    }
}
