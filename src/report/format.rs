/// Number and date formatting for the report
use chrono::{DateTime, Datelike, Utc};
use chrono_tz::Tz;
use num_format::{Locale, ToFormattedString};

/// Rendered in place of an upstream value that was missing or not numeric
pub const MISSING_VALUE: &str = "N/A";

/// Medium date style in Traditional Chinese, e.g. `2024年6月1日`
pub fn localized_date(now: DateTime<Utc>, tz: Tz) -> String {
    let local = now.with_timezone(&tz);
    format!("{}年{}月{}日", local.year(), local.month(), local.day())
}

/// USD amount with thousands separators and exactly two decimals
///
/// `65000.5` -> `65,000.50`. Rounding happens before grouping, so
/// `999.999` -> `1,000.00`.
pub fn format_usd(amount: f64) -> String {
    if !amount.is_finite() {
        return amount.to_string();
    }

    let cents = (amount.abs() * 100.0).round() as u64;
    let sign = if amount < 0.0 && cents > 0 { "-" } else { "" };

    format!(
        "{}{}.{:02}",
        sign,
        (cents / 100).to_formatted_string(&Locale::en),
        cents % 100
    )
}

/// Signed percentage with two decimals; non-negative values get a `+`
pub fn format_change(change: f64) -> String {
    // -0.0 counts as non-negative and must not print as "-0.00"
    let change = if change == 0.0 { 0.0 } else { change };
    let prefix = if change >= 0.0 { "+" } else { "" };
    format!("{}{:.2}", prefix, change)
}

pub fn format_optional_usd(amount: Option<f64>) -> String {
    amount.map(format_usd).unwrap_or_else(|| MISSING_VALUE.to_string())
}

pub fn format_optional_change(change: Option<f64>) -> String {
    change
        .map(format_change)
        .unwrap_or_else(|| MISSING_VALUE.to_string())
}

pub fn format_optional_fee(fee: Option<u64>) -> String {
    fee.map(|f| f.to_string())
        .unwrap_or_else(|| MISSING_VALUE.to_string())
}
