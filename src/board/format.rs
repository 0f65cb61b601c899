//! Date and avatar text for cards and sprint headers.
//!
//! Dates render in UTC.

use crate::tracker::domain::EpochMillis;

/// Formats a date as `Jan 5, 2026`; empty for `None`.
#[must_use]
pub fn format_date(millis: Option<EpochMillis>) -> String {
    render(millis, "%b %-d, %Y")
}

/// Formats a date as `Jan 5`; empty for `None`.
#[must_use]
pub fn format_date_short(millis: Option<EpochMillis>) -> String {
    render(millis, "%b %-d")
}

/// Formats a planned window.
///
/// `Jan 5 – Jan 19` with both ends, `From Jan 5` or `Until Jan 19` with
/// one, and empty with neither.
#[must_use]
pub fn format_date_range(start: Option<EpochMillis>, end: Option<EpochMillis>) -> String {
    match (start, end) {
        (None, None) => String::new(),
        (Some(_), Some(_)) => format!(
            "{} \u{2013} {}",
            format_date_short(start),
            format_date_short(end)
        ),
        (Some(_), None) => format!("From {}", format_date_short(start)),
        (None, Some(_)) => format!("Until {}", format_date_short(end)),
    }
}

/// Avatar letter: the first character upper-cased, `?` for an empty name.
#[must_use]
pub fn avatar_initial(name: &str) -> String {
    name.chars()
        .next()
        .map_or_else(|| "?".to_owned(), |first| first.to_uppercase().collect())
}

fn render(millis: Option<EpochMillis>, pattern: &str) -> String {
    millis
        .and_then(EpochMillis::to_datetime)
        .map(|instant| instant.format(pattern).to_string())
        .unwrap_or_default()
}
