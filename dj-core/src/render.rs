//! Pure text helpers for presenting entries.

use chrono::{DateTime, Local, NaiveDate};

use crate::dates::DATE_ISO_FORMAT;
use crate::entry::Entry;

/// The title, or `Untitled` when it is blank.
pub fn display_title(entry: &Entry) -> &str {
    let title = entry.title.trim();
    if title.is_empty() { "Untitled" } else { title }
}

/// One line summary: `12 words • 2 photos • 1 tag`, or `—` for an empty entry.
pub fn entry_meta(entry: &Entry) -> String {
    let words = entry.body.split_whitespace().count();
    let mut parts = Vec::new();
    if words > 0 {
        parts.push(format!("{words} words"));
    }
    if !entry.photos.is_empty() {
        parts.push(plural(entry.photos.len(), "photo"));
    }
    if !entry.tags.is_empty() {
        parts.push(plural(entry.tags.len(), "tag"));
    }
    if parts.is_empty() {
        "—".to_string()
    } else {
        parts.join(" • ")
    }
}

fn plural(count: usize, noun: &str) -> String {
    if count == 1 {
        format!("{count} {noun}")
    } else {
        format!("{count} {noun}s")
    }
}

/// Formats a `YYYY-MM-DD` day with `date_format`. Unparsable input is
/// returned as is.
pub fn format_day(date_iso: &str, date_format: &str) -> String {
    match NaiveDate::parse_from_str(date_iso, DATE_ISO_FORMAT) {
        Ok(date) => date.format(date_format).to_string(),
        Err(_) => date_iso.to_string(),
    }
}

/// Local `HH:MM` of an RFC 3339 timestamp. Unparsable input is returned as is.
pub fn format_time(timestamp: &str) -> String {
    match DateTime::parse_from_rfc3339(timestamp) {
        Ok(t) => t.with_timezone(&Local).format("%H:%M").to_string(),
        Err(_) => timestamp.to_string(),
    }
}

/// Tags trimmed, blanks dropped.
pub fn clean_tags(entry: &Entry) -> Vec<&str> {
    entry
        .tags
        .iter()
        .map(|t| t.trim())
        .filter(|t| !t.is_empty())
        .collect()
}
