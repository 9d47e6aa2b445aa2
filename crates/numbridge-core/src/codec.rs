// ─────────────────────────────────────────────────────────────────────
// NumBridge — Number-Stream File Codec
// ─────────────────────────────────────────────────────────────────────
//! Line-oriented text codec for fixed-size `f64` sequences.
//!
//! Format: one decimal literal per line, platform newline, no header
//! and no count. The count travels out of band as the length of the
//! caller's buffer.
//!
//! Reading follows `fscanf("%lf")` token semantics: surrounding
//! whitespace is ignored and blank lines are skipped. A line holding
//! anything other than a single literal (including bytes that are not
//! UTF-8) is malformed. Reading stops once the requested count is
//! reached; whatever follows is never looked at.

use std::fmt;
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use numbridge_types::{FloatFormat, NumBridgeError, NumBridgeResult};

#[cfg(windows)]
pub const LINE_ENDING: &str = "\r\n";
#[cfg(not(windows))]
pub const LINE_ENDING: &str = "\n";

const STREAM_LABEL: &str = "<stream>";

/// Capacity reserved up front by `read_values`; the vector grows past
/// it only as values actually arrive.
const INITIAL_CAPACITY: usize = 4096;

/// Write `data` to `path`, one value per line, truncating any existing file.
pub fn write_file(path: impl AsRef<Path>, data: &[f64], format: FloatFormat) -> NumBridgeResult<()> {
    let path = path.as_ref();
    let file = File::create(path).map_err(|e| NumBridgeError::io(path, e))?;
    let mut writer = BufWriter::new(file);
    encode(&mut writer, data, format).map_err(|e| NumBridgeError::io(path, e))?;
    writer.flush().map_err(|e| NumBridgeError::io(path, e))?;
    log::debug!("wrote {} values to {}", data.len(), path.display());
    Ok(())
}

/// Fill `out` with the first `out.len()` values stored in `path`.
///
/// On error the contents of `out` are unspecified.
pub fn read_file(path: impl AsRef<Path>, out: &mut [f64]) -> NumBridgeResult<()> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| NumBridgeError::io(path, e))?;
    decode_each(BufReader::new(file), out.len(), path, |i, v| out[i] = v)?;
    log::debug!("read {} values from {}", out.len(), path.display());
    Ok(())
}

/// Read `count` values from `path` into a new vector.
///
/// Memory grows with the values actually read, not with `count`, so a
/// large count against a short file fails with `TruncatedInput`.
pub fn read_values(path: impl AsRef<Path>, count: usize) -> NumBridgeResult<Vec<f64>> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| NumBridgeError::io(path, e))?;
    let out = decode_vec(BufReader::new(file), count, path)?;
    log::debug!("read {} values from {}", out.len(), path.display());
    Ok(out)
}

/// Encode `data` into `writer`. The writer is not flushed.
pub fn encode<W: Write>(writer: &mut W, data: &[f64], format: FloatFormat) -> io::Result<()> {
    for &value in data {
        write!(writer, "{}{LINE_ENDING}", Formatted { value, format })?;
    }
    Ok(())
}

/// Decode `out.len()` values from `reader`.
pub fn decode<R: BufRead>(reader: R, out: &mut [f64]) -> NumBridgeResult<()> {
    decode_each(reader, out.len(), Path::new(STREAM_LABEL), |i, v| out[i] = v)
}

/// Render a single value the way `encode` writes it, without newline.
pub fn format_value(value: f64, format: FloatFormat) -> String {
    Formatted { value, format }.to_string()
}

/// Parse one literal as written by `encode` (or by C `printf`).
pub fn parse_value(text: &str) -> Option<f64> {
    text.parse::<f64>().ok()
}

/// One value rendered in a given `FloatFormat`.
struct Formatted {
    value: f64,
    format: FloatFormat,
}

impl fmt::Display for Formatted {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = self.value;
        if value.is_nan() {
            return f.write_str("nan");
        }
        if value.is_infinite() {
            return f.write_str(if value > 0.0 { "inf" } else { "-inf" });
        }
        match self.format {
            FloatFormat::Fixed { precision } => write!(f, "{value:.precision$}"),
            FloatFormat::Shortest => write!(f, "{value}"),
        }
    }
}

fn decode_vec<R: BufRead>(reader: R, count: usize, label: &Path) -> NumBridgeResult<Vec<f64>> {
    let mut out = Vec::with_capacity(count.min(INITIAL_CAPACITY));
    decode_each(reader, count, label, |_, v| out.push(v))?;
    Ok(out)
}

/// Parse `expected` values from `reader`, handing each to `sink` with its index.
fn decode_each<R, F>(mut reader: R, expected: usize, label: &Path, mut sink: F) -> NumBridgeResult<()>
where
    R: BufRead,
    F: FnMut(usize, f64),
{
    let mut found = 0usize;
    let mut line_no = 0usize;
    let mut line = Vec::new();

    while found < expected {
        line.clear();
        let n = reader
            .read_until(b'\n', &mut line)
            .map_err(|e| NumBridgeError::io(label, e))?;
        if n == 0 {
            return Err(NumBridgeError::TruncatedInput { expected, found });
        }
        line_no += 1;

        let malformed = |bytes: &[u8]| NumBridgeError::Parse {
            line: line_no,
            text: String::from_utf8_lossy(bytes).trim().to_string(),
        };
        let text = std::str::from_utf8(&line).map_err(|_| malformed(&line))?.trim();
        if text.is_empty() {
            continue;
        }
        let value = parse_value(text).ok_or_else(|| malformed(text.as_bytes()))?;
        sink(found, value);
        found += 1;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn fixed6() -> FloatFormat {
        FloatFormat::Fixed { precision: 6 }
    }

    #[test]
    fn test_fixed_matches_printf_lf() {
        assert_eq!(format_value(1.5, fixed6()), "1.500000");
        assert_eq!(format_value(-9876.54321, fixed6()), "-9876.543210");
        assert_eq!(format_value(0.0, fixed6()), "0.000000");
        assert_eq!(format_value(1e-7, fixed6()), "0.000000");
    }

    #[test]
    fn test_non_finite_spelling() {
        assert_eq!(format_value(f64::NAN, fixed6()), "nan");
        assert_eq!(format_value(f64::INFINITY, fixed6()), "inf");
        assert_eq!(format_value(f64::NEG_INFINITY, FloatFormat::Shortest), "-inf");
        assert!(parse_value("nan").unwrap().is_nan());
        assert_eq!(parse_value("-inf"), Some(f64::NEG_INFINITY));
    }

    #[test]
    fn test_shortest_is_exact() {
        let v = 1234.567_890_123_4_f64;
        assert_eq!(parse_value(&format_value(v, FloatFormat::Shortest)), Some(v));
    }

    #[test]
    fn test_encode_layout() {
        let mut buf = Vec::new();
        encode(&mut buf, &[1.0, -2.25], fixed6()).unwrap();
        let expected = format!("1.000000{LINE_ENDING}-2.250000{LINE_ENDING}");
        assert_eq!(String::from_utf8(buf).unwrap(), expected);
    }

    #[test]
    fn test_encode_empty() {
        let mut buf = Vec::new();
        encode(&mut buf, &[], fixed6()).unwrap();
        assert!(buf.is_empty());
    }

    #[test]
    fn test_decode_exact() {
        let mut out = [0.0; 3];
        decode(Cursor::new("1.5\n-2\n3e2\n"), &mut out).unwrap();
        assert_eq!(out, [1.5, -2.0, 300.0]);
    }

    #[test]
    fn test_decode_ignores_excess_lines() {
        let mut out = [0.0; 2];
        decode(Cursor::new("1\n2\n3\nnot a number\n"), &mut out).unwrap();
        assert_eq!(out, [1.0, 2.0]);
    }

    #[test]
    fn test_decode_truncated() {
        let mut out = [0.0; 4];
        let err = decode(Cursor::new("1\n2\n"), &mut out).unwrap_err();
        match err {
            NumBridgeError::TruncatedInput { expected, found } => {
                assert_eq!(expected, 4);
                assert_eq!(found, 2);
            }
            other => panic!("expected TruncatedInput, got {other:?}"),
        }
    }

    #[test]
    fn test_decode_malformed_line_number() {
        let mut out = [0.0; 3];
        let err = decode(Cursor::new("1\n\nabc\n4\n"), &mut out).unwrap_err();
        match err {
            NumBridgeError::Parse { line, text } => {
                assert_eq!(line, 3);
                assert_eq!(text, "abc");
            }
            other => panic!("expected Parse, got {other:?}"),
        }
    }

    #[test]
    fn test_decode_two_tokens_on_a_line() {
        let mut out = [0.0; 2];
        let err = decode(Cursor::new("1.0 2.0\n"), &mut out).unwrap_err();
        assert_eq!(err.status_code(), -2);
    }

    #[test]
    fn test_decode_crlf_and_blank_lines() {
        let mut out = [0.0; 2];
        decode(Cursor::new("\r\n  7.25\r\n\r\n-1\r\n"), &mut out).unwrap();
        assert_eq!(out, [7.25, -1.0]);
    }

    #[test]
    fn test_decode_zero_count_reads_nothing() {
        let mut out: [f64; 0] = [];
        decode(Cursor::new("garbage"), &mut out).unwrap();
    }

    #[test]
    fn test_file_round_trip_fixed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.txt");
        let data = [-10000.0, -1234.567891, 0.5, 42.0, 9999.999999];
        write_file(&path, &data, fixed6()).unwrap();
        let back = read_values(&path, data.len()).unwrap();
        for (a, b) in data.iter().zip(&back) {
            assert!((a - b).abs() <= 5e-7, "{a} vs {b}");
        }
    }

    #[test]
    fn test_write_truncates_existing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.txt");
        write_file(&path, &[1.0, 2.0, 3.0, 4.0], fixed6()).unwrap();
        write_file(&path, &[5.0], fixed6()).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(text, format!("5.000000{LINE_ENDING}"));
    }

    #[test]
    fn test_read_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.txt");
        let err = read_values(&path, 1).unwrap_err();
        assert!(matches!(err, NumBridgeError::Io { .. }));
        assert_eq!(err.status_code(), -1);
    }

    #[test]
    fn test_decode_invalid_utf8_is_parse_error() {
        let mut out = [0.0; 3];
        let err = decode(Cursor::new(&b"1\n\xff\xfe\n3\n"[..]), &mut out).unwrap_err();
        match &err {
            NumBridgeError::Parse { line, .. } => assert_eq!(*line, 2),
            other => panic!("expected Parse, got {other:?}"),
        }
        assert_eq!(err.status_code(), -2);
    }

    #[test]
    fn test_read_values_huge_count_on_short_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("short.txt");
        std::fs::write(&path, "1\n2\n").unwrap();
        let err = read_values(&path, usize::MAX).unwrap_err();
        assert!(matches!(
            err,
            NumBridgeError::TruncatedInput { expected: usize::MAX, found: 2 }
        ));
    }

    #[test]
    fn test_shortest_keeps_small_magnitudes() {
        let data = [0.001_234_567, 1.234_567e-5, 3.5e-8];
        let mut buf = Vec::new();
        encode(&mut buf, &data, FloatFormat::Shortest).unwrap();
        let mut out = [0.0; 3];
        decode(Cursor::new(buf), &mut out).unwrap();
        for (a, b) in data.iter().zip(&out) {
            assert!(((a - b) / a).abs() < 5e-6, "{a} vs {b}");
        }
    }

    #[test]
    fn test_format_value_matches_encode() {
        for format in [fixed6(), FloatFormat::Fixed { precision: 0 }, FloatFormat::Shortest] {
            for v in [-2.5, 0.1, 1e300, f64::NAN] {
                let mut buf = Vec::new();
                encode(&mut buf, &[v], format).unwrap();
                let line = String::from_utf8(buf).unwrap();
                assert_eq!(line, format!("{}{LINE_ENDING}", format_value(v, format)));
            }
        }
    }

    #[test]
    fn test_write_into_missing_dir() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("no_such_dir").join("out.txt");
        let err = write_file(&path, &[1.0], fixed6()).unwrap_err();
        assert!(matches!(err, NumBridgeError::Io { .. }));
    }
}
