//! Display formatting for the dashboard's stat cards and chart axes.

use chrono::DateTime;

/// Format a floating-point number with thousands separators and a fixed number
/// of decimal places.
///
/// # Examples
///
/// ```
/// use sensorviz_core::formatting::format_number;
///
/// assert_eq!(format_number(1234.5, 1), "1,234.5");
/// assert_eq!(format_number(9.81, 3), "9.810");
/// assert_eq!(format_number(0.0, 2), "0.00");
/// assert_eq!(format_number(-42.5, 2), "-42.50");
/// ```
pub fn format_number(value: f64, decimals: u32) -> String {
    // Handle the sign separately so the thousands grouping works on the
    // absolute value.
    let negative = value < 0.0;
    let abs_value = value.abs();

    // Round to the requested decimal places.
    // Add a tiny epsilon (half ULP at the target precision) before rounding
    // to avoid IEEE 754 binary-representation issues at exact midpoints.
    let factor = 10_f64.powi(decimals as i32);
    let epsilon = f64::EPSILON * abs_value * factor;
    let rounded = ((abs_value * factor) + epsilon).round() / factor;

    let integer_part = rounded.trunc() as u64;
    let frac_part = rounded - rounded.trunc();

    // Build the thousands-separated integer portion.
    let int_str = integer_part.to_string();
    let grouped = group_thousands(&int_str);

    let result = if decimals == 0 {
        grouped
    } else {
        // Format the fractional part to the exact number of decimals.
        let frac_str = format!("{:.prec$}", frac_part, prec = decimals as usize);
        // `frac_str` starts with "0.", e.g. "0.50". Strip the leading "0".
        let decimal_digits = &frac_str[1..];
        format!("{}{}", grouped, decimal_digits)
    };

    if negative {
        format!("-{}", result)
    } else {
        result
    }
}

/// Format a reading with its measurement unit, e.g. for a stat-card cell.
///
/// # Examples
///
/// ```
/// use sensorviz_core::formatting::format_measurement;
///
/// assert_eq!(format_measurement(9.81, 3, "m/s²"), "9.810 m/s²");
/// assert_eq!(format_measurement(-2.5, 2, "dB"), "-2.50 dB");
/// ```
pub fn format_measurement(value: f64, decimals: u32, unit: &str) -> String {
    format!("{} {}", format_number(value, decimals), unit)
}

/// Render a millisecond timestamp as a UTC wall-clock label for chart axis
/// ticks.
///
/// Timestamps are treated as milliseconds since the Unix epoch and are never
/// interpreted in a local timezone. Values that cannot be mapped to a clock
/// time (non-finite, out of chrono's range) fall back to the raw number.
///
/// # Examples
///
/// ```
/// use sensorviz_core::formatting::format_clock_ms;
///
/// assert_eq!(format_clock_ms(0.0), "00:00:00");
/// assert_eq!(format_clock_ms(45_296_789.0), "12:34:56");
/// ```
pub fn format_clock_ms(timestamp_ms: f64) -> String {
    if !timestamp_ms.is_finite() {
        return timestamp_ms.to_string();
    }
    match DateTime::from_timestamp_millis(timestamp_ms as i64) {
        Some(dt) => dt.format("%H:%M:%S").to_string(),
        None => timestamp_ms.to_string(),
    }
}

// ── Internal helpers ──────────────────────────────────────────────────────────

/// Insert commas every three digits from the right of an integer string.
fn group_thousands(s: &str) -> String {
    if s.len() <= 3 {
        return s.to_string();
    }

    let mut grouped = String::with_capacity(s.len() + s.len() / 3);
    let offset = s.len() % 3;
    for (i, ch) in s.chars().enumerate() {
        if i != 0 && (i + 3 - offset) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

// ── Tests ─────────────────────────────────────────────────────────────────────
