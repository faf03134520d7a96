//! Locale date formatting for result timestamps.
//!
//! Result dates arrive from the engine as GMT timestamps and render as
//! the GMT calendar date, either machine-readable (`2024-05-21`) or in
//! the page's display form (`May 21, 2024` / `21 mai 2024`).

use chrono::{DateTime, Datelike, Utc};

use crate::config::Lang;

const MONTHS_EN: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];
const MONTHS_FR: [&str; 12] = [
    "janv.", "févr.", "mars", "avr.", "mai", "juin", "juil.", "août", "sept.", "oct.", "nov.",
    "déc.",
];

/// `YYYY-MM-DD`, for `datetime` attributes.
pub fn short_date_format(date: DateTime<Utc>) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// The display date for the given language.
pub fn long_date_format(date: DateTime<Utc>, lang: Lang) -> String {
    let month = date.month0() as usize;
    match lang {
        Lang::En => format!("{} {}, {}", MONTHS_EN[month], date.day(), date.year()),
        Lang::Fr => format!("{} {} {}", date.day(), MONTHS_FR[month], date.year()),
    }
}
