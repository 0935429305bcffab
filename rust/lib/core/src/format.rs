//! Display helpers for table cells.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

/// `12345678901` → `123.456.789-01`. Anything that is not 11 digits is
/// returned unchanged.
pub fn format_cpf(cpf: &str) -> String {
    if cpf.len() != 11 || !cpf.bytes().all(|b| b.is_ascii_digit()) {
        return cpf.to_string();
    }
    format!("{}.{}.{}-{}", &cpf[..3], &cpf[3..6], &cpf[6..9], &cpf[9..])
}

/// Brazilian phone numbers: 11 digits (mobile) or 10 digits (landline).
pub fn format_phone(phone: &str) -> String {
    if !phone.bytes().all(|b| b.is_ascii_digit()) {
        return phone.to_string();
    }
    match phone.len() {
        11 => format!("({}) {}-{}", &phone[..2], &phone[2..7], &phone[7..]),
        10 => format!("({}) {}-{}", &phone[..2], &phone[2..6], &phone[6..]),
        _ => phone.to_string(),
    }
}

/// Format an amount in reais: `1234.5` → `R$ 1.234,50`.
pub fn format_brl(value: f64) -> String {
    let cents = (value.abs() * 100.0).round() as u64;
    let (int_part, frac) = (cents / 100, cents % 100);

    let digits = int_part.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }

    let sign = if value < 0.0 && cents > 0 { "-" } else { "" };
    format!("{}R$ {},{:02}", sign, grouped, frac)
}

/// First 8 characters of an identifier.
pub fn short_id(id: &str) -> &str {
    match id.char_indices().nth(8) {
        Some((idx, _)) => &id[..idx],
        None => id,
    }
}

/// Render an API timestamp or date as `DD/MM/YYYY`.
///
/// Accepts RFC 3339, naive `YYYY-MM-DDTHH:MM:SS[.fff]` and plain dates.
/// Unparseable input is returned as-is so nothing is hidden.
pub fn format_date(value: &str) -> String {
    if value.is_empty() {
        return "-".to_string();
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return dt.format("%d/%m/%Y").to_string();
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f") {
        return dt.format("%d/%m/%Y").to_string();
    }
    if let Ok(d) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return d.format("%d/%m/%Y").to_string();
    }
    value.to_string()
}
