mod fallback;
mod math;
mod pow10tab;
mod scan;

use std::fmt;
use std::sync::OnceLock;

static FAST_PATH: OnceLock<bool> = OnceLock::new();

/// Returns true if the proving fast path is enabled.
///
/// Enabled by default. Set `VIF_NO_FAST_PATH=1` to route every
/// successfully scanned literal through the slow path instead, e.g. to
/// bisect a suspected rounding discrepancy. Read once, then cached.
pub(crate) fn fast_path_enabled() -> bool {
    *FAST_PATH.get_or_init(|| std::env::var("VIF_NO_FAST_PATH").map_or(true, |v| v != "1"))
}

/// The input was not a well-formed floating-point literal.
///
/// Carries the offending input quoted as ISO-8859-1 text when it is at
/// most 1024 bytes long; longer inputs carry only their length.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MalformedNumber {
    input: Box<str>,
}

impl MalformedNumber {
    pub(crate) fn new(input: &[u8]) -> Self {
        if input.len() > 1024 {
            return Self::from_len(input.len());
        }
        // ISO-8859-1: each byte is the code point of the same value.
        let text: String = input.iter().map(|&b| char::from(b)).collect();
        MalformedNumber { input: format!("\"{text}\"").into_boxed_str() }
    }

    pub(crate) fn from_len(len: usize) -> Self {
        MalformedNumber { input: format!("input of length {len}").into_boxed_str() }
    }

    /// The offending input, quoted, or a length description for inputs
    /// longer than 1024 bytes.
    pub fn input(&self) -> &str {
        &self.input
    }
}

impl fmt::Display for MalformedNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "malformed number: {}", self.input)
    }
}

impl std::error::Error for MalformedNumber {}

/// Parses `bytes` as a floating-point literal and returns the correctly
/// rounded `f64`, rounding to nearest with ties to even.
///
/// Equivalent to [`parse_double_range`] over the whole slice. Accepts the
/// reference grammar: optional whitespace (bytes `<= 0x20`) around an
/// optionally signed `NaN`, `Infinity`, decimal literal, or hexadecimal
/// literal (`0x` prefix, mandatory `p` exponent).
///
/// ```
/// assert_eq!(vif::parse_double(b"-0.5"), Ok(-0.5));
/// assert_eq!(vif::parse_double(b"0x1.8p1"), Ok(3.0));
/// assert!(vif::parse_double(b"1..2").is_err());
/// ```
pub fn parse_double(bytes: &[u8]) -> Result<f64, MalformedNumber> {
    scan::parse(bytes)
}

/// Parses the `len` bytes of `bytes` starting at `offset`.
///
/// A range that does not lie inside `bytes` is reported as
/// [`MalformedNumber`], never a panic.
pub fn parse_double_range(
    bytes: &[u8],
    offset: usize,
    len: usize,
) -> Result<f64, MalformedNumber> {
    match offset.checked_add(len).and_then(|end| bytes.get(offset..end)) {
        Some(span) => scan::parse(span),
        None => Err(MalformedNumber::from_len(len)),
    }
}

/// Convenience entry point over UTF-8 text.
pub fn parse_double_str(s: &str) -> Result<f64, MalformedNumber> {
    scan::parse(s.as_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn whole_slice_entrypoint() {
        assert_eq!(parse_double(b"1"), Ok(1.0));
        assert_eq!(parse_double(b" +3.14159 "), Ok(3.14159));
        assert_eq!(parse_double_str("1e308"), Ok(1e308));
    }

    #[test]
    fn range_entrypoint() {
        let buf = b"xx-0.5yy";
        assert_eq!(parse_double_range(buf, 2, 4), Ok(-0.5));
        assert!(parse_double_range(buf, 0, buf.len()).is_err());
        // Out-of-bounds ranges are errors, not panics.
        assert!(parse_double_range(buf, 6, 3).is_err());
        assert!(parse_double_range(buf, usize::MAX, 2).is_err());
    }

    #[test]
    fn error_carries_quoted_input() {
        let err = parse_double(b"1..2").unwrap_err();
        assert_eq!(err.input(), "\"1..2\"");
        assert_eq!(err.to_string(), "malformed number: \"1..2\"");

        // Non-ASCII bytes are quoted as ISO-8859-1.
        let err = parse_double(&[0xE9]).unwrap_err();
        assert_eq!(err.input(), "\"\u{e9}\"");
    }

    #[test]
    fn error_for_long_input_carries_length_only() {
        // 2000 ones parse fine (to infinity), so break the grammar to
        // reach the error path.
        let mut bad = vec![b'1'; 2000];
        bad.push(b'x');
        let err = parse_double(&bad).unwrap_err();
        assert_eq!(err.input(), "input of length 2001");
    }

    #[test]
    fn shortest_representations_round_trip() {
        let values = [
            0.0,
            -0.0,
            1.0,
            -1.0,
            0.1,
            1.5,
            core::f64::consts::PI,
            core::f64::consts::E,
            f64::MAX,
            f64::MIN,
            f64::MIN_POSITIVE,
            5e-324,
            1e308,
            123456.789e-30,
            8.98846567431158e307,
        ];
        for x in values {
            let text = format!("{x}");
            let back = parse_double(text.as_bytes()).unwrap();
            assert_eq!(
                back.to_bits(),
                x.to_bits(),
                "{text:?} did not round-trip: got {back}"
            );
        }
    }

    #[test]
    fn differential_sweep_against_std() {
        // Deterministic corpus spanning digit counts and exponents; every
        // value must agree with the standard library bit for bit.
        let mut state: u64 = 0x243F_6A88_85A3_08D3;
        let mut next = move |bound: u64| {
            state = state.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
            (state >> 33) % bound
        };

        let mut total = 0u32;
        let mut mismatches = 0u32;
        for _ in 0..4000 {
            let int_digits = next(25) as usize;
            let frac_digits = next(30) as usize;
            let mut text = String::new();
            if next(4) == 0 {
                text.push(if next(2) == 0 { '+' } else { '-' });
            }
            for _ in 0..int_digits {
                text.push(char::from(b'0' + next(10) as u8));
            }
            if int_digits == 0 || next(2) == 0 {
                text.push('.');
                let n = if int_digits == 0 { frac_digits.max(1) } else { frac_digits };
                for _ in 0..n {
                    text.push(char::from(b'0' + next(10) as u8));
                }
            }
            if next(2) == 0 {
                text.push(if next(2) == 0 { 'e' } else { 'E' });
                if next(3) == 0 {
                    text.push('+');
                } else if next(3) == 1 {
                    text.push('-');
                }
                text.push(char::from(b'1' + next(9) as u8));
                for _ in 0..next(3) {
                    text.push(char::from(b'0' + next(10) as u8));
                }
            }

            let std_val: f64 = match text.parse() {
                Ok(v) => v,
                Err(_) => continue,
            };
            total += 1;
            let got = parse_double(text.as_bytes()).unwrap();
            if got.to_bits() != std_val.to_bits() {
                if mismatches < 10 {
                    eprintln!("MISMATCH: {text:?} → std={std_val:?} vif={got:?}");
                }
                mismatches += 1;
            }
        }
        eprintln!("{total} literals checked, {mismatches} mismatches");
        assert_eq!(mismatches, 0, "{mismatches}/{total} values differ from std");
    }
}
