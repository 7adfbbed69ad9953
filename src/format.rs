//! Display formatting for quote values
//!
//! All output follows en-US conventions (comma thousands separators, dot
//! decimal separator) regardless of the currency being rendered.

use crate::types::Currency;
use chrono::{DateTime, Local, Utc};

const TRILLION: f64 = 1e12;
const BILLION: f64 = 1e9;
const MILLION: f64 = 1e6;

/// Renders an amount as a currency string with exactly 2 fractional digits
///
/// The currency only selects the symbol; grouping and separators stay en-US.
///
/// # Example
/// ```
/// use btc_ticker::{format::format_currency, Currency};
///
/// assert_eq!(format_currency(42.5, Currency::USD), "$42.50");
/// assert_eq!(format_currency(67123.5, Currency::EUR), "€67,123.50");
/// ```
pub fn format_currency(amount: f64, currency: Currency) -> String {
    let sign = if amount < 0.0 { "-" } else { "" };
    let fixed = format!("{:.2}", round_half_up(amount.abs(), 2));
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    format!(
        "{}{}{}.{}",
        sign,
        currency.symbol(),
        group_thousands(int_part),
        frac_part
    )
}

/// Abbreviates large amounts with a T/B/M suffix
///
/// Values at or above a boundary take the larger suffix, so exactly one
/// billion renders as `1.00B`. Amounts below one million are rendered in
/// full with thousands separators and up to 3 fractional digits.
///
/// # Example
/// ```
/// use btc_ticker::format::format_compact;
///
/// assert_eq!(format_compact(1_500_000_000_000.0), "1.50T");
/// assert_eq!(format_compact(1_000_000_000.0), "1.00B");
/// assert_eq!(format_compact(12_345.0), "12,345");
/// ```
pub fn format_compact(amount: f64) -> String {
    if amount >= TRILLION {
        format!("{:.2}T", round_half_up(amount / TRILLION, 2))
    } else if amount >= BILLION {
        format!("{:.2}B", round_half_up(amount / BILLION, 2))
    } else if amount >= MILLION {
        format!("{:.2}M", round_half_up(amount / MILLION, 2))
    } else {
        format_grouped(amount)
    }
}

/// Renders a 24h change percentage with a direction arrow
pub fn format_change(percent: f64) -> String {
    let arrow = if percent >= 0.0 { "▲" } else { "▼" };
    format!("{} {:.2}%", arrow, round_half_up(percent.abs(), 2))
}

/// Renders a timestamp as local wall-clock time
pub fn format_time(timestamp: DateTime<Utc>) -> String {
    timestamp
        .with_timezone(&Local)
        .format("%H:%M:%S")
        .to_string()
}

/// Full-precision rendering with grouping, at most 3 fractional digits
fn format_grouped(amount: f64) -> String {
    let sign = if amount < 0.0 { "-" } else { "" };
    let fixed = format!("{:.3}", round_half_up(amount.abs(), 3));
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), ""));
    let frac_part = frac_part.trim_end_matches('0');

    if frac_part.is_empty() {
        format!("{}{}", sign, group_thousands(int_part))
    } else {
        format!("{}{}.{}", sign, group_thousands(int_part), frac_part)
    }
}

/// Rounds a non-negative value to `digits` places, ties going up
///
/// `{:.N}` alone rounds exact binary ties (0.125, 2.375, ...) to even.
fn round_half_up(value: f64, digits: i32) -> f64 {
    let scale = 10f64.powi(digits);
    (value * scale).round() / scale
}

/// Inserts a comma between every group of three digits
fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);

    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_currency_fixed_fraction() {
        assert_eq!(format_currency(42.5, Currency::USD), "$42.50");
        assert_eq!(format_currency(0.0, Currency::USD), "$0.00");
        assert_eq!(format_currency(1234567.891, Currency::GBP), "£1,234,567.89");
        assert_eq!(format_currency(999.999, Currency::USD), "$1,000.00");
    }

    #[test]
    fn test_format_currency_symbols() {
        assert_eq!(format_currency(10.0, Currency::JPY), "¥10.00");
        assert_eq!(format_currency(10.0, Currency::CAD), "CA$10.00");
        assert_eq!(format_currency(10.0, Currency::AUD), "A$10.00");
        assert_eq!(format_currency(10.0, Currency::CHF), "CHF\u{a0}10.00");
        assert_eq!(format_currency(10.0, Currency::CNY), "CN¥10.00");
    }

    #[test]
    fn test_format_currency_negative() {
        assert_eq!(format_currency(-1500.0, Currency::USD), "-$1,500.00");
    }

    #[test]
    fn test_format_compact_suffixes() {
        assert_eq!(format_compact(1_000_000_000.0), "1.00B");
        assert_eq!(format_compact(1_500_000_000_000.0), "1.50T");
        assert_eq!(format_compact(1_000_000_000_000.0), "1.00T");
        assert_eq!(format_compact(2_345_678.0), "2.35M");
        assert_eq!(format_compact(1_000_000.0), "1.00M");
    }

    #[test]
    fn test_format_compact_below_billion_has_no_b_suffix() {
        let formatted = format_compact(999_999_999.0);
        assert!(!formatted.ends_with('B'));
        assert_eq!(formatted, "1000.00M");
    }

    #[test]
    fn test_format_compact_small_values() {
        assert_eq!(format_compact(999_999.0), "999,999");
        assert_eq!(format_compact(1234.5), "1,234.5");
        assert_eq!(format_compact(1234.56789), "1,234.568");
        assert_eq!(format_compact(0.0), "0");
        assert_eq!(format_compact(12.0), "12");
    }

    #[test]
    fn test_format_change() {
        assert_eq!(format_change(2.346), "▲ 2.35%");
        assert_eq!(format_change(0.0), "▲ 0.00%");
        assert_eq!(format_change(-1.2), "▼ 1.20%");
    }

    #[test]
    fn test_exact_ties_round_up() {
        assert_eq!(format_currency(0.125, Currency::USD), "$0.13");
        assert_eq!(format_currency(67250.125, Currency::USD), "$67,250.13");
        assert_eq!(format_change(2.125), "▲ 2.13%");
        assert_eq!(format_change(-0.375), "▼ 0.38%");
        assert_eq!(format_compact(2_125_000.0), "2.13M");
        assert_eq!(format_compact(1.0625), "1.063");
    }

    #[test]
    fn test_group_thousands() {
        assert_eq!(group_thousands("1"), "1");
        assert_eq!(group_thousands("123"), "123");
        assert_eq!(group_thousands("1234"), "1,234");
        assert_eq!(group_thousands("1234567"), "1,234,567");
    }
}
