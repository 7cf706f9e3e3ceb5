use chrono::{Datelike, Local};

/// `MM.YYYY` key selecting the active monthly statistics file.
/// Zero-padded month, four-digit year.
pub fn period_key(date: &impl Datelike) -> String {
    format!("{:02}.{}", date.month(), date.year())
}

/// Wall-clock period key; recomputed on every invocation, never stored.
pub fn current_period_key() -> String {
    period_key(&Local::now())
}
