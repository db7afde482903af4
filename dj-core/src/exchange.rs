//! Backup files: exporting the journal and merging an import into it.

use chrono::{DateTime, Local};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::dates::{iso_date, iso_timestamp};
use crate::entry::Entry;
use crate::error::JournalError;
use crate::normalize::normalize_entry;

pub const EXPORT_VERSION: u32 = 1;

/// The portable backup format. Unlike the stored document it carries a
/// version and the time of export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportDocument {
    pub version: u32,
    #[serde(rename = "exportedAt")]
    pub exported_at: String,
    pub entries: Vec<Entry>,
}

/// Outcome of merging an import file into the journal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImportSummary {
    /// Entries read from the file.
    pub imported: usize,
    /// Entries in the journal before the merge.
    pub previous: usize,
    /// Entries in the journal after the merge.
    pub total: usize,
}

pub fn export_document(entries: &[Entry], now: DateTime<Local>) -> ExportDocument {
    ExportDocument {
        version: EXPORT_VERSION,
        exported_at: iso_timestamp(now),
        entries: entries.to_vec(),
    }
}

/// Pretty printed JSON, two space indent.
pub fn export_json(document: &ExportDocument) -> Result<String, JournalError> {
    serde_json::to_string_pretty(document).map_err(JournalError::Serialize)
}

/// `daily-journal-backup-YYYY-MM-DD.json`
pub fn backup_file_name(now: DateTime<Local>) -> String {
    format!("daily-journal-backup-{}.json", iso_date(now))
}

/// Reads an import file: either an export document (any object with an
/// `entries` array) or a bare array of entries.
///
/// Each element is normalized on its own, so a malformed record degrades to
/// defaults instead of failing the whole import.
pub fn import_document(text: &str, now: DateTime<Local>) -> Result<Vec<Entry>, JournalError> {
    let parsed: Value = serde_json::from_str(text).map_err(JournalError::InvalidJson)?;
    let items = match &parsed {
        Value::Object(fields) => match fields.get("entries") {
            Some(Value::Array(items)) => items,
            _ => return Err(JournalError::InvalidFormat),
        },
        Value::Array(items) => items,
        _ => return Err(JournalError::InvalidFormat),
    };
    Ok(items.iter().map(|raw| normalize_entry(raw, now)).collect())
}

/// Union of both collections keyed by `id`; an incoming entry replaces an
/// existing one with the same id.
///
/// Existing entries keep their relative order and new ids are appended;
/// callers re-sort afterwards.
pub fn merge_entries(existing: Vec<Entry>, incoming: Vec<Entry>) -> Vec<Entry> {
    let mut by_id: IndexMap<String, Entry> = existing
        .into_iter()
        .map(|entry| (entry.id.clone(), entry))
        .collect();
    for entry in incoming {
        by_id.insert(entry.id.clone(), entry);
    }
    by_id.into_values().collect()
}
