//! Human-readable duration strings (`"30s"`, `"2m"`, `"1.5h"`, `"1d"`).

use crate::timing::round::round_significant;

/// Time unit accepted by [`parse_duration`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum DurationUnit {
    /// `s`
    Seconds,
    /// `m`
    Minutes,
    /// `h`
    Hours,
    /// `d`
    Days,
}

impl DurationUnit {
    /// Length of one unit in milliseconds.
    pub const fn millis(self) -> f64 {
        match self {
            Self::Seconds => 1_000.0,
            Self::Minutes => 60_000.0,
            Self::Hours => 3_600_000.0,
            Self::Days => 86_400_000.0,
        }
    }

    /// Suffix letter used when formatting.
    pub const fn suffix(self) -> char {
        match self {
            Self::Seconds => 's',
            Self::Minutes => 'm',
            Self::Hours => 'h',
            Self::Days => 'd',
        }
    }

    fn from_letter(c: char) -> Option<Self> {
        match c.to_ascii_lowercase() {
            's' => Some(Self::Seconds),
            'm' => Some(Self::Minutes),
            'h' => Some(Self::Hours),
            'd' => Some(Self::Days),
            _ => None,
        }
    }
}

/// Parse a duration string into milliseconds.
///
/// Grammar: optional surrounding whitespace, a non-negative decimal (`12` or `1.5`), optional
/// whitespace, then exactly one of `s`, `m`, `h`, `d` (case-insensitive). Returns `None` for
/// anything else.
pub fn parse_duration(s: &str) -> Option<f64> {
    let (value, unit) = split_duration(s)?;
    Some(value * unit.millis())
}

/// Split a duration string into its numeric value and unit without scaling.
pub fn split_duration(s: &str) -> Option<(f64, DurationUnit)> {
    let s = s.trim();
    let mut chars = s.chars();
    let unit = DurationUnit::from_letter(chars.next_back()?)?;
    let number = chars.as_str().trim_end();
    if !is_decimal(number) {
        return None;
    }
    let value = number.parse::<f64>().ok()?;
    Some((value, unit))
}

/// `true` for `digits` or `digits.digits`, the only numeric forms the grammar accepts.
pub(crate) fn is_decimal(s: &str) -> bool {
    let (int, frac) = match s.split_once('.') {
        Some((int, frac)) => (int, Some(frac)),
        None => (s, None),
    };
    let all_digits = |p: &str| !p.is_empty() && p.bytes().all(|b| b.is_ascii_digit());
    all_digits(int) && frac.is_none_or(all_digits)
}

/// Format milliseconds with the largest unit whose value is at least 1.
///
/// Values are rounded to three significant digits and printed without trailing zeros
/// (`1500.0` → `"1.5s"`, `90_000.0` → `"1.5m"`). Negative input formats as `"0s"`.
pub fn ms_to_friendly_string(ms: f64) -> String {
    if ms < 0.0 {
        return "0s".to_owned();
    }
    for unit in [
        DurationUnit::Days,
        DurationUnit::Hours,
        DurationUnit::Minutes,
    ] {
        let v = ms / unit.millis();
        if v >= 1.0 {
            return format!("{}{}", three_significant(v), unit.suffix());
        }
    }
    let v = ms / DurationUnit::Seconds.millis();
    format!("{}{}", three_significant(v), DurationUnit::Seconds.suffix())
}

fn three_significant(v: f64) -> f64 {
    round_significant(v, 3)
}

/// A parsed `startAt` value.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum StartAt {
    /// Bare number, optionally suffixed with `%`: percent of total duration.
    Percent(f64),
    /// Duration string, already in milliseconds.
    Millis(f64),
}

impl StartAt {
    /// Parse a non-empty `startAt` string. Percent form wins over duration form.
    pub fn parse(s: &str) -> Option<Self> {
        let bare = s.strip_suffix('%').unwrap_or(s);
        if is_decimal(bare) {
            return bare.parse::<f64>().ok().map(Self::Percent);
        }
        parse_duration(s).map(Self::Millis)
    }

    /// Offset into the animation, in milliseconds.
    pub fn offset_ms(self, total_duration_ms: f64) -> f64 {
        match self {
            Self::Percent(p) => (p / 100.0) * total_duration_ms,
            Self::Millis(ms) => ms,
        }
    }
}

/// Resolve a raw `startAt` string to an offset in milliseconds; empty or unparsable → `0`.
pub fn start_offset_ms(start_at: &str, total_duration_ms: f64) -> f64 {
    if start_at.is_empty() {
        return 0.0;
    }
    StartAt::parse(start_at).map_or(0.0, |s| s.offset_ms(total_duration_ms))
}

#[cfg(test)]
#[path = "../../tests/unit/timing/duration.rs"]
mod tests;
