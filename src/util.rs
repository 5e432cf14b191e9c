use chrono::{DateTime, FixedOffset};

pub fn short_id(id: &str) -> &str {
    // Slice at a char boundary; ids are not guaranteed to be ASCII.
    match id.char_indices().nth(8) {
        Some((end, _)) => &id[..end],
        None => id,
    }
}

/// Deep link for a commit under a configured repository base URL.
pub fn commit_url(base: &str, id: &str) -> String {
    format!("{}/commit/{}", base.trim_end_matches('/'), id)
}

/// Long-form date label for tooltips, e.g. "Friday, March 1, 2024 14:30".
pub fn full_date_label(datetime: &DateTime<FixedOffset>) -> String {
    datetime.format("%A, %B %-d, %Y %H:%M").to_string()
}
