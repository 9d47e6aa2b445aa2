// ─────────────────────────────────────────────────────────────────────
// NumBridge — Numeric Kernel
// ─────────────────────────────────────────────────────────────────────
//! Stateless arithmetic, reduction, struct, and matrix operations.
//!
//! Integer operations use `i32` and wrap on overflow, matching the
//! two's-complement behaviour callers of the C library observed.
//! Only `sum`, `greet`, and `matrix_multiply` can fail, and only on
//! malformed lengths, dimensions, or strings.

use numbridge_types::{NumBridgeError, NumBridgeResult, Point};

/// Sum of two integers, wrapping at `i32` width.
#[inline]
pub fn add(x: i32, y: i32) -> i32 {
    x.wrapping_add(y)
}

/// Sum of the first `length` elements of `array`, wrapping at `i32` width.
///
/// Fails if `length` exceeds the slice.
pub fn sum(array: &[i32], length: usize) -> NumBridgeResult<i32> {
    let values = array.get(..length).ok_or_else(|| {
        NumBridgeError::InvalidArgument(format!(
            "sum: length {length} exceeds array of {} elements",
            array.len()
        ))
    })?;
    Ok(sum_all(values))
}

/// Sum of every element in `array`, wrapping at `i32` width.
pub fn sum_all(array: &[i32]) -> i32 {
    array.iter().fold(0i32, |acc, &v| acc.wrapping_add(v))
}

/// Single-precision product.
#[inline]
pub fn multiply(x: f32, y: f32) -> f32 {
    x * y
}

/// Build the greeting `"Hello, <name>!"`.
///
/// The caller owns the returned string. Names containing NUL cannot
/// cross a null-terminated boundary and are rejected.
pub fn greet(name: &str) -> NumBridgeResult<String> {
    if let Some(pos) = name.find('\0') {
        return Err(NumBridgeError::InvalidArgument(format!(
            "greet: name contains NUL at byte {pos}"
        )));
    }
    Ok(format!("Hello, {name}!"))
}

/// Translate a point by `(dx, dy)`, wrapping at `i32` width.
#[inline]
pub fn move_point(p: Point, dx: i32, dy: i32) -> Point {
    Point {
        x: p.x.wrapping_add(dx),
        y: p.y.wrapping_add(dy),
    }
}

/// True iff `num % 2 == 0` under truncating remainder.
#[inline]
pub fn is_even(num: i32) -> bool {
    num % 2 == 0
}

/// Row-major product of `a` (m×n) and `b` (n×p) written into `c` (m×p).
///
/// Each output element is accumulated in `f64` from `0.0` with `k`
/// ascending. Buffers longer than required are accepted; elements of
/// `c` past `m·p` are left untouched.
pub fn matrix_multiply(
    a: &[f64],
    b: &[f64],
    c: &mut [f64],
    m: usize,
    n: usize,
    p: usize,
) -> NumBridgeResult<()> {
    let need_a = checked_area("A", m, n)?;
    let need_b = checked_area("B", n, p)?;
    let need_c = checked_area("C", m, p)?;
    check_buffer("A", a.len(), need_a)?;
    check_buffer("B", b.len(), need_b)?;
    check_buffer("C", c.len(), need_c)?;

    for i in 0..m {
        let row = &a[i * n..(i + 1) * n];
        for j in 0..p {
            let mut acc = 0.0;
            for (k, &aik) in row.iter().enumerate() {
                acc += aik * b[k * p + j];
            }
            c[i * p + j] = acc;
        }
    }
    Ok(())
}

/// Invoke `f` once with `arg` and return its result.
pub fn callback<F>(f: F, arg: i32) -> i32
where
    F: FnOnce(i32) -> i32,
{
    f(arg)
}

/// Fallible `callback` for callees that can raise.
pub fn try_callback<F, E>(f: F, arg: i32) -> Result<i32, E>
where
    F: FnOnce(i32) -> Result<i32, E>,
{
    f(arg)
}

fn checked_area(name: &str, rows: usize, cols: usize) -> NumBridgeResult<usize> {
    rows.checked_mul(cols).ok_or_else(|| {
        NumBridgeError::InvalidArgument(format!(
            "matrix_multiply: {name} dimensions {rows}x{cols} overflow"
        ))
    })
}

fn check_buffer(name: &str, len: usize, need: usize) -> NumBridgeResult<()> {
    if len < need {
        return Err(NumBridgeError::InvalidArgument(format!(
            "matrix_multiply: {name} has {len} elements, needs {need}"
        )));
    }
    Ok(())
}
