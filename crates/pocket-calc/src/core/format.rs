//! Number formatting for the display
//!
//! Two renderings exist. [`canonical`] is the shortest round-trip decimal
//! form using the browser number-to-string layout (plain decimals for
//! exponents in `[-7, 21)`, `d.ddde±x` otherwise). [`format_result`] rounds
//! non-integers to a fixed number of decimal places first, which hides
//! binary floating-point artifacts such as `0.30000000000000004`.

/// Decimal places kept by [`format_result`] unless configured otherwise
pub const DEFAULT_DECIMAL_PLACES: u32 = 10;

/// Renders `value` in shortest round-trip form
#[must_use]
pub fn canonical(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if value == 0.0 {
        // Covers negative zero
        return "0".to_string();
    }

    // `{:e}` yields the shortest digits that round-trip, e.g. "1.25e-3"
    let sci = format!("{:e}", value.abs());
    let (mantissa, exponent) = sci.split_once('e').unwrap_or((sci.as_str(), "0"));
    let digits: String = mantissa.chars().filter(char::is_ascii_digit).collect();
    let exponent: i32 = exponent.parse().unwrap_or(0);

    let k = digits.len() as i32;
    let n = exponent + 1;

    let body = if k <= n && n <= 21 {
        format!("{digits}{}", "0".repeat((n - k) as usize))
    } else if 0 < n && n <= 21 {
        let (int_part, frac_part) = digits.split_at(n as usize);
        format!("{int_part}.{frac_part}")
    } else if -6 < n && n <= 0 {
        format!("0.{}{digits}", "0".repeat((-n) as usize))
    } else {
        let sign = if n - 1 < 0 { '-' } else { '+' };
        let e = (n - 1).abs();
        let (first, rest) = digits.split_at(1);
        if rest.is_empty() {
            format!("{first}e{sign}{e}")
        } else {
            format!("{first}.{rest}e{sign}{e}")
        }
    };

    if value < 0.0 {
        format!("-{body}")
    } else {
        body
    }
}

/// Formats a committed or previewed result
///
/// Integers render without a fractional part; anything else is rounded to
/// `decimal_places` (half toward positive infinity) before rendering.
#[must_use]
pub fn format_result(value: f64, decimal_places: u32) -> String {
    if !value.is_finite() || value.fract() == 0.0 {
        return canonical(value);
    }

    let scale = 10f64.powi(decimal_places as i32);
    canonical(round_half_up(value * scale) / scale)
}

/// Rounds to the nearest integer, ties toward positive infinity
#[must_use]
pub fn round_half_up(x: f64) -> f64 {
    let floor = x.floor();
    if x - floor >= 0.5 {
        floor + 1.0
    } else {
        floor
    }
}
