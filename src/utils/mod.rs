use chrono::{Datelike, NaiveDate};
use sha2::{Digest, Sha256};
use std::path::Path;

use crate::models::BillStatus;

const MONTHS_FR: [&str; 12] = [
    "Jan", "Fév", "Mar", "Avr", "Mai", "Jui", "Jui", "Aoû", "Sep", "Oct", "Nov", "Déc",
];

pub fn sha256_hex(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    hex::encode(hasher.finalize())
}

/// Reads the leading `YYYY-MM-DD` of an ISO-like date, so a trailing time
/// part such as `T10:00:00` is ignored.
pub fn parse_date(value: &str) -> Result<NaiveDate, chrono::ParseError> {
    let value = value.trim();
    let day = value.get(..10).unwrap_or(value);
    NaiveDate::parse_from_str(day, "%Y-%m-%d")
}

/// `2004-04-04` becomes `4 Avr. 04`.
pub fn format_date(value: &str) -> Result<String, chrono::ParseError> {
    let date = parse_date(value)?;
    let month = MONTHS_FR[date.month0() as usize];
    Ok(format!("{} {}. {:02}", date.day(), month, date.year().rem_euclid(100)))
}

pub fn format_status(status: BillStatus) -> &'static str {
    match status {
        BillStatus::Pending => "En attente",
        BillStatus::Accepted => "Accepté",
        BillStatus::Refused => "Refusé",
    }
}

pub fn format_amount(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{:.0}", value)
    } else {
        format!("{:.2}", value)
    }
}

pub fn has_allowed_extension(file_name: &str, allowed: &[String]) -> bool {
    Path::new(file_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| allowed.iter().any(|a| ext.eq_ignore_ascii_case(a)))
        .unwrap_or(false)
}

pub fn unescape_html(value: &str) -> String {
    value
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}
