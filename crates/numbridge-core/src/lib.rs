// ─────────────────────────────────────────────────────────────────────
// NumBridge — Kernel Core
// (C) 1998-2026 Miroslav Sotek. All rights reserved.
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
#![deny(unsafe_code)]
//! Numeric kernel, number-stream file codec, and the call boundary
//! that the Python bridge binds to.
//!
//! # Invariants
//!
//! 1. **Kernel functions are stateless**: no operation keeps a reference
//!    to a caller buffer past its return. Integer arithmetic wraps at
//!    `i32` width instead of panicking.
//!
//! 2. **Buffers are checked, never trusted**: `sum` and `matrix_multiply`
//!    reject lengths and dimensions that exceed the slices they are
//!    given. Longer buffers are fine; only the leading prefix is used.
//!
//! 3. **Codec failures are values**: every I/O, parse, and truncation
//!    failure surfaces as a `NumBridgeError` (or a non-zero status at the
//!    boundary), never as a panic. Reads stop after the requested count;
//!    trailing lines are not an error.

pub mod boundary;
pub mod codec;
pub mod kernel;

pub use boundary::{IntCallback, NativeBoundary, NativeKernel};
pub use codec::{read_file, read_values, write_file};
pub use kernel::{
    add, callback, greet, is_even, matrix_multiply, move_point, multiply, sum, sum_all,
    try_callback,
};
