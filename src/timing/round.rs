//! Decimal rounding that matches browser number formatting.
//!
//! `format!("{:.N}")` rounds exact ties to even; `toPrecision` and `toFixed` round them up.
//! Both helpers read the exact decimal expansion of the binary value, so only true ties are
//! affected.

/// Digits of the exact expansion inspected; far below the spacing of neighbouring `f64`s.
const EXACT_DIGITS: usize = 40;

/// Round to `sig` significant digits, exact ties away from zero.
pub(crate) fn round_significant(v: f64, sig: usize) -> f64 {
    if v == 0.0 || !v.is_finite() || sig == 0 {
        return v;
    }
    let exact = format!("{:.*e}", EXACT_DIGITS, v.abs());
    let Some((mantissa, exp)) = exact.split_once('e') else {
        return v;
    };
    let Ok(exp) = exp.parse::<i64>() else {
        return v;
    };
    let digits: String = mantissa.chars().filter(|c| *c != '.').collect();
    let Some(n) = round_digits(&digits, sig) else {
        return v;
    };
    with_sign(v, format!("{n}e{}", exp - (sig as i64 - 1)))
}

/// Round to `decimals` places after the point, exact ties away from zero.
pub(crate) fn round_fixed(v: f64, decimals: usize) -> f64 {
    if !v.is_finite() {
        return v;
    }
    let exact = format!("{:.*}", EXACT_DIGITS, v.abs());
    let Some((int, frac)) = exact.split_once('.') else {
        return v;
    };
    let Some(n) = round_digits(&format!("{int}{frac}"), int.len() + decimals) else {
        return v;
    };
    with_sign(v, format!("{n}e-{decimals}"))
}

fn round_digits(digits: &str, keep: usize) -> Option<u128> {
    let (head, tail) = digits.split_at(keep.min(digits.len()));
    let n = head.parse::<u128>().ok()?;
    match tail.bytes().next() {
        Some(d) if d >= b'5' => n.checked_add(1),
        _ => Some(n),
    }
}

fn with_sign(v: f64, magnitude: String) -> f64 {
    let Ok(m) = magnitude.parse::<f64>() else {
        return v;
    };
    if v.is_sign_negative() { -m } else { m }
}

#[cfg(test)]
#[path = "../../tests/unit/timing/round.rs"]
mod tests;
