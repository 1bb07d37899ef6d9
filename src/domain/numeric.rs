// SPDX-License-Identifier: MIT OR Apache-2.0

//! Locale independent numeric scanning and formatting.
//!
//! Values in a keyfile are plain text, so numbers are read with prefix
//! semantics: the longest numeric prefix is used and anything after it is
//! ignored. A value with no numeric prefix reads as zero. Formatting always
//! uses `.` as the decimal point, whatever the host locale says.

/// Significant digits used when formatting single precision values.
const FLOAT_PRECISION: usize = 6;

fn is_c_space(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\x0b' | '\x0c' | '\r')
}

/// Reads a base-10 integer from the start of `s`.
///
/// Leading whitespace and a single sign are accepted, scanning stops at the
/// first non-digit, an absent number reads as `0` and out-of-range values
/// saturate at the `i32` bounds.
///
/// # Examples
///
/// ```
/// use mcs::domain::numeric::parse_leading_int;
///
/// assert_eq!(parse_leading_int("100"), 100);
/// assert_eq!(parse_leading_int("  -42px"), -42);
/// assert_eq!(parse_leading_int("loud"), 0);
/// ```
pub fn parse_leading_int(s: &str) -> i32 {
    let bytes = s.trim_start_matches(is_c_space).as_bytes();
    let (negative, digits) = match bytes.split_first() {
        Some((b'-', rest)) => (true, rest),
        Some((b'+', rest)) => (false, rest),
        _ => (false, bytes),
    };

    let magnitude = digits
        .iter()
        .take_while(|b| b.is_ascii_digit())
        .fold(0i64, |acc, b| {
            acc.saturating_mul(10).saturating_add(i64::from(b - b'0'))
        });

    let value = if negative { -magnitude } else { magnitude };
    value.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
}

/// Returns the byte length of the floating point literal at the start of `t`.
fn float_prefix_len(t: &str) -> usize {
    let b = t.as_bytes();
    let mut i = usize::from(matches!(b.first(), Some(b'+' | b'-')));

    for word in ["infinity", "inf", "nan"] {
        let candidate = b.get(i..i + word.len());
        if candidate.is_some_and(|c| c.eq_ignore_ascii_case(word.as_bytes())) {
            return i + word.len();
        }
    }

    let mut digits = 0;
    while i < b.len() && b[i].is_ascii_digit() {
        i += 1;
        digits += 1;
    }
    if i < b.len() && b[i] == b'.' {
        let mut j = i + 1;
        let mut fraction = 0;
        while j < b.len() && b[j].is_ascii_digit() {
            j += 1;
            fraction += 1;
        }
        if digits + fraction > 0 {
            i = j;
            digits += fraction;
        }
    }
    if digits == 0 {
        return 0;
    }

    if i < b.len() && matches!(b[i], b'e' | b'E') {
        let mut j = i + 1;
        if j < b.len() && matches!(b[j], b'+' | b'-') {
            j += 1;
        }
        let start = j;
        while j < b.len() && b[j].is_ascii_digit() {
            j += 1;
        }
        if j > start {
            i = j;
        }
    }
    i
}

/// Reads a decimal floating point number from the start of `s`.
///
/// Accepts leading whitespace, a sign, digits with an optional fraction and
/// exponent, and the words `inf`, `infinity` and `nan` in any case. Anything
/// else reads as `0.0`.
///
/// # Examples
///
/// ```
/// use mcs::domain::numeric::parse_leading_float;
///
/// assert_eq!(parse_leading_float("0.75"), 0.75);
/// assert_eq!(parse_leading_float("1.5e3dB"), 1500.0);
/// assert_eq!(parse_leading_float("half"), 0.0);
/// ```
pub fn parse_leading_float(s: &str) -> f64 {
    let t = s.trim_start_matches(is_c_space);
    match float_prefix_len(t) {
        0 => 0.0,
        end => t[..end].parse::<f64>().unwrap_or(0.0),
    }
}

fn strip_fraction_zeros(s: &str) -> &str {
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.')
    } else {
        s
    }
}

fn non_finite(value: f64) -> Option<&'static str> {
    if value.is_nan() {
        Some("nan")
    } else if value == f64::INFINITY {
        Some("inf")
    } else if value == f64::NEG_INFINITY {
        Some("-inf")
    } else {
        None
    }
}

/// Formats `value` the way C's `%g` does with the default precision.
///
/// Six significant digits, trailing zeros removed, and exponent notation
/// when the decimal exponent is below -4 or at least 6.
///
/// # Examples
///
/// ```
/// use mcs::domain::numeric::format_general;
///
/// assert_eq!(format_general(0.5), "0.5");
/// assert_eq!(format_general(3.14159265), "3.14159");
/// assert_eq!(format_general(1.0e6), "1e+06");
/// ```
pub fn format_general(value: f64) -> String {
    if let Some(word) = non_finite(value) {
        return word.to_string();
    }
    if value == 0.0 {
        return if value.is_sign_negative() { "-0" } else { "0" }.to_string();
    }

    let scientific = format!("{:.*e}", FLOAT_PRECISION - 1, value);
    let Some((mantissa, exponent)) = scientific.split_once('e') else {
        return value.to_string();
    };
    let exponent: i32 = exponent.parse().unwrap_or(0);

    if exponent < -4 || exponent >= FLOAT_PRECISION as i32 {
        let sign = if exponent < 0 { '-' } else { '+' };
        format!(
            "{}e{}{:02}",
            strip_fraction_zeros(mantissa),
            sign,
            exponent.unsigned_abs()
        )
    } else {
        let decimals = (FLOAT_PRECISION as i32 - 1 - exponent) as usize;
        let fixed = format!("{:.*}", decimals, value);
        strip_fraction_zeros(&fixed).to_string()
    }
}

/// Formats `value` with the shortest decimal text that reads back exactly.
///
/// # Examples
///
/// ```
/// use mcs::domain::numeric::format_exact;
///
/// assert_eq!(format_exact(0.1), "0.1");
/// assert_eq!(format_exact(2.0), "2");
/// assert_eq!(format_exact(f64::NAN), "nan");
/// ```
pub fn format_exact(value: f64) -> String {
    match non_finite(value) {
        Some(word) => word.to_string(),
        None => value.to_string(),
    }
}
