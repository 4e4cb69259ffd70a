//! Radix validation and conversion between Rust strings and backend numerals.

use std::ffi::CString;

use crate::errors::{NumError, Result};

/// Number of leading/trailing zero digits that float output will write out
/// positionally before switching to exponent notation.
const POSITIONAL_PAD: i64 = 16;

/// Digits used by the backend for radices up to 36 (case-insensitive).
const LOWER_DIGITS: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
/// Digits used by the backend for radices 37 to 62.
const MIXED_DIGITS: &[u8] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz";

/// Panics unless `radix` is accepted for parsing integers and rationals
/// (0 for auto-detection, or 2 to 62).
#[inline]
pub(crate) fn assert_parse_radix(radix: i32) {
    assert!(
        radix == 0 || (2..=62).contains(&radix),
        "{}",
        NumError::InvalidRadix(radix),
    );
}

/// Panics unless `radix` is accepted for output and for parsing floats (2 to
/// 62, or -36 to -2 for uppercase digits).
#[inline]
pub(crate) fn assert_output_radix(radix: i32) {
    assert!(
        (2..=62).contains(&radix) || (-36..=-2).contains(&radix),
        "{}",
        NumError::InvalidRadix(radix),
    );
}

/// Converts a numeral to a C string that the backend can parse.
///
/// Surrounding whitespace is ignored and a single leading `+` is accepted.
/// Whitespace inside the numeral is rejected, though the backend would skip
/// it.
pub(crate) fn numeral(s: &str) -> Result<CString> {
    let s = s.trim();
    let body = match s.strip_prefix('+') {
        Some(rest) if rest.starts_with(|c| c == '+' || c == '-') => {
            return Err(NumError::InvalidStringFormat)
        }
        Some(rest) => rest,
        None => s,
    };
    if body.is_empty() || body == "-" || body.contains(char::is_whitespace) {
        return Err(NumError::InvalidStringFormat);
    }
    CString::new(body).map_err(|_| NumError::InvalidStringFormat)
}

/// Returns the value of the digit `c` in `radix`, using the same alphabet as
/// the backend: case-insensitive up to 36, then `0-9A-Za-z`.
pub(crate) fn digit_value(c: char, radix: u32) -> Option<u32> {
    let value = if radix <= 36 {
        c.to_digit(36)?
    } else {
        match c {
            '0'..='9' => c as u32 - '0' as u32,
            'A'..='Z' => c as u32 - 'A' as u32 + 10,
            'a'..='z' => c as u32 - 'a' as u32 + 36,
            _ => return None,
        }
    };
    if value < radix {
        Some(value)
    } else {
        None
    }
}

/// Converts a NUL-terminated buffer filled in by the backend to a `String`.
pub(crate) fn from_c_buf(mut buf: Vec<u8>) -> String {
    let end = buf.iter().position(|&b| b == 0).unwrap_or(buf.len());
    buf.truncate(end);
    buf.into_iter().map(char::from).collect()
}

/// Returns the number of digits in `radix` needed to represent `prec` bits.
pub(crate) fn digits_for_prec(prec: u32, radix: i32) -> usize {
    let bits_per_digit = f64::from(radix.unsigned_abs()).log2();
    1 + (f64::from(prec) / bits_per_digit).ceil() as usize
}

/// Formats an integer in `radix` using the backend's digit alphabet.
pub(crate) fn int_to_radix(value: i64, radix: u32) -> String {
    let alphabet = if radix <= 36 { LOWER_DIGITS } else { MIXED_DIGITS };
    let mut magnitude = value.unsigned_abs();
    let mut digits = vec![];
    loop {
        digits.push(alphabet[(magnitude % u64::from(radix)) as usize]);
        magnitude /= u64::from(radix);
        if magnitude == 0 {
            break;
        }
    }
    if value < 0 {
        digits.push(b'-');
    }
    digits.into_iter().rev().map(char::from).collect()
}

/// Formats the backend's float digit string, which represents
/// `0.DIGITS * radix^exp`, in positional notation when the exponent is
/// modest and in exponent notation otherwise.
///
/// `exponent` formats the exponent that follows the marker.
pub(crate) fn format_float_digits(
    raw: &str,
    exp: i64,
    radix: i32,
    exponent: impl Fn(i64) -> String,
) -> String {
    let (negative, digits) = match raw.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, raw),
    };
    let digits = digits.trim_end_matches('0');
    if digits.is_empty() {
        return "0".to_owned();
    }
    let len = digits.len() as i64;

    let mut ret = String::with_capacity(digits.len() + 8);
    if negative {
        ret.push('-');
    }
    if 0 < exp && exp <= len + POSITIONAL_PAD {
        if exp >= len {
            ret.push_str(digits);
            ret.extend(std::iter::repeat('0').take((exp - len) as usize));
        } else {
            ret.push_str(&digits[..exp as usize]);
            ret.push('.');
            ret.push_str(&digits[exp as usize..]);
        }
    } else if exp <= 0 && exp > -POSITIONAL_PAD {
        ret.push_str("0.");
        ret.extend(std::iter::repeat('0').take((-exp) as usize));
        ret.push_str(digits);
    } else {
        ret.push_str(&digits[..1]);
        if len > 1 {
            ret.push('.');
            ret.push_str(&digits[1..]);
        }
        ret.push(if radix.abs() <= 10 { 'e' } else { '@' });
        ret.push_str(&exponent(exp - 1));
    }
    ret
}
