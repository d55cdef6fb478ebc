//! Normalization of raw metadata values into comparable keys
//!
//! EXIF values arrive in heterogeneous encodings: rational fractions
//! ("1/250"), plain numbers ("50.0"), and free text. This module converts
//! them into sort keys where numeric values always order before textual
//! sentinels, and buckets continuous values (aperture) onto fixed scales.

use std::cmp::Ordering;

/// Sentinel for metadata fields that are absent or unreadable
pub const UNKNOWN: &str = "Unknown";

/// Standard full-stop f-number sequence used for aperture bucketing
pub const FULL_STOPS: &[f64] = &[
    1.0, 1.4, 2.0, 2.8, 4.0, 5.6, 8.0, 11.0, 16.0, 22.0, 32.0,
];

/// Tagged comparison key: numeric keys sort before textual ones
#[derive(Debug, Clone, PartialEq)]
pub enum SortKey {
    Number(f64),
    Text(String),
}

impl SortKey {
    /// Build a key from a raw metadata value
    ///
    /// Rational and plain numeric strings become `Number`; everything else
    /// (including the `"Unknown"` sentinel) becomes `Text`.
    pub fn from_raw(raw: &str) -> Self {
        match fraction_to_float(raw) {
            Some(value) => SortKey::Number(value),
            None => SortKey::Text(raw.to_string()),
        }
    }
}

impl Eq for SortKey {}

impl Ord for SortKey {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (SortKey::Number(a), SortKey::Number(b)) => a.total_cmp(b),
            (SortKey::Number(_), SortKey::Text(_)) => Ordering::Less,
            (SortKey::Text(_), SortKey::Number(_)) => Ordering::Greater,
            (SortKey::Text(a), SortKey::Text(b)) => a.cmp(b),
        }
    }
}

impl PartialOrd for SortKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Parse a rational string `"a/b"` or a plain numeric string into a float
///
/// A zero denominator yields `0` rather than an error, matching the way
/// degenerate EXIF rationals are treated everywhere downstream.
pub fn fraction_to_float(raw: &str) -> Option<f64> {
    let raw = raw.trim();
    if let Some((num, denom)) = raw.split_once('/') {
        let num: f64 = num.trim().parse().ok()?;
        let denom: f64 = denom.trim().parse().ok()?;
        if denom == 0.0 {
            return Some(0.0);
        }
        return Some(num / denom);
    }
    raw.parse().ok()
}

/// Map a raw f-number onto the nearest full stop, formatted with one decimal
///
/// Unparsable input maps to the `"Unknown"` bucket.
pub fn round_aperture(raw: &str) -> String {
    match fraction_to_float(raw) {
        Some(value) => {
            let mut nearest = FULL_STOPS[0];
            for &stop in FULL_STOPS {
                if (stop - value).abs() < (nearest - value).abs() {
                    nearest = stop;
                }
            }
            format!("{nearest:.1}")
        }
        None => UNKNOWN.to_string(),
    }
}

/// Real-valued exposure duration for sort ordering
///
/// Unparsable entries sort to the end; their raw label is kept for display.
pub fn shutter_duration(raw: &str) -> f64 {
    fraction_to_float(raw).unwrap_or(f64::INFINITY)
}

/// Integer sort key for ISO and 35mm-equivalent focal length values
///
/// Truncates toward zero, so `"50.0"` keys as `50`.
pub fn integer_key(raw: &str) -> Option<i64> {
    fraction_to_float(raw).map(|v| v.trunc() as i64)
}

/// F-number display key, rounded to one decimal place
///
/// Distinct from [`round_aperture`]: this forms chart bucket labels, not
/// full-stop buckets.
pub fn fnumber_key(raw: &str) -> Option<f64> {
    fraction_to_float(raw).map(|v| (v * 10.0).round() / 10.0)
}

/// Inner key of the camera -> focal-length table
///
/// Unparsable focal lengths key to `"0"`.
pub fn focal_length_key(raw: &str) -> String {
    format_number(fraction_to_float(raw).unwrap_or(0.0))
}

/// Render a float without a trailing `.0` for whole numbers
pub fn format_number(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{value:.0}")
    } else {
        value.to_string()
    }
}
