//! Formatting for presentation consumers.

use chrono::NaiveDate;

/// Shown wherever an optional value is missing.
pub const MISSING: &str = "—";

/// Group digits in threes with `.` and append the currency symbol:
/// `1500000` -> `1.500.000 ₫`.
pub fn format_currency(amount: i64, symbol: &str) -> String {
    let digits = amount.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(c);
    }
    let sign = if amount < 0 { "-" } else { "" };
    if symbol.is_empty() {
        format!("{}{}", sign, grouped)
    } else {
        format!("{}{} {}", sign, grouped, symbol)
    }
}

/// `dd/mm/yyyy`
pub fn format_date(date: NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}

pub fn format_optional_date(date: Option<NaiveDate>) -> String {
    date.map(format_date).unwrap_or_else(|| MISSING.to_string())
}

/// One decimal place, as KPI cards show percentages.
pub fn format_percentage(value: f64) -> String {
    format!("{:.1}%", value)
}
