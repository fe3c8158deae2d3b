//! Slow paths for literals the fast path cannot prove correctly rounded.

use crate::math;
use crate::MalformedNumber;
use crate::scan::hex_digit_class;

/// Reference conversion for a decimal literal. `literal` is the
/// whitespace-trimmed text, already validated by the scanner; the standard
/// library's conversion is correctly rounded for every such literal.
pub fn dec_slow(literal: &[u8]) -> Result<f64, MalformedNumber> {
    // The scanner admits only ASCII, so the conversion cannot fail.
    let text = core::str::from_utf8(literal).map_err(|_| MalformedNumber::new(literal))?;
    text.parse::<f64>().map_err(|_| MalformedNumber::new(literal))
}

/// Exact conversion of a hexadecimal literal whose significand overflowed
/// 64 bits. Hex digits map straight onto significand bits, so the top 64
/// bits plus one sticky bit determine the correctly rounded result.
///
/// `[first, after)` is the digit region (hex digits and at most one point,
/// which `point` locates); `exp_number` is the parsed binary exponent
/// field.
pub fn hex_slow(
    s: &[u8],
    first: usize,
    after: usize,
    point: Option<usize>,
    exp_number: i64,
    negative: bool,
) -> f64 {
    let mut w: u64 = 0;
    let mut sticky: u64 = 0;
    let mut overflow_shift: i64 = 0;
    for &b in &s[first..after] {
        let class = hex_digit_class(b);
        if class < 0 {
            continue;
        }
        if w >> 60 != 0 {
            // No room for four more bits; the digit only matters for the
            // sticky bit and the scale.
            sticky |= class as u64;
            overflow_shift += 4;
        } else {
            w = (w << 4) | class as u64;
        }
    }
    if w == 0 {
        return math::signed_zero(negative);
    }

    let frac_digits = match point {
        Some(p) => s[p + 1..after].iter().filter(|&&b| hex_digit_class(b) >= 0).count() as i64,
        None => 0,
    };
    let q = exp_number - 4 * frac_digits + overflow_shift;
    math::scale_pow2(negative, w, q, sticky != 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dec_slow_is_the_reference() {
        assert_eq!(dec_slow(b"3.14159").unwrap(), 3.14159);
        assert_eq!(dec_slow(b"+1.").unwrap(), 1.0);
        assert_eq!(dec_slow(b".5e1").unwrap(), 5.0);
        assert_eq!(dec_slow(b"-0.0").unwrap().to_bits(), (-0.0f64).to_bits());
    }

    #[test]
    fn hex_slow_matches_exact_values() {
        // 0x123456789abcdef01 spans 65 bits; the dropped low bit is the
        // sticky bit.
        let s = b"123456789abcdef01";
        assert_eq!(hex_slow(s, 0, s.len(), None, 0, false), 2.0988295479420645e19);

        // The same digits with a point: four fraction digits scale by 2^-16,
        // and a nonzero exponent field shifts on top.
        let s = b"123456789abcd.ef01";
        assert_eq!(hex_slow(s, 0, s.len(), Some(13), 0, false), 320255973501901.94);
        assert_eq!(hex_slow(s, 0, s.len(), Some(13), 7, false), 4.099276460824345e16);

        // All-ones rounds up across the 53-bit boundary.
        let s = b"fffffffffffffffffffffffff";
        assert_eq!(hex_slow(s, 0, s.len(), None, 0, false), 1.2676506002282294e30);
    }

    #[test]
    fn hex_slow_zero_stays_signed() {
        let s = b"000000000000000000";
        assert_eq!(hex_slow(s, 0, s.len(), None, 0, true).to_bits(), (-0.0f64).to_bits());
    }
}
