//! The core `Journal` struct: the in-memory collection and its persistence.

use anyhow::{Context, Result};
use chrono::{DateTime, Local};
use indexmap::IndexMap;
use serde::Serialize;
use serde_json::Value;
use std::fs;
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::dates::iso_timestamp;
use crate::entry::{Entry, EntryDraft, new_id, sort_entries};
use crate::error::JournalError;
use crate::exchange::{
    ExportDocument, ImportSummary, export_document, import_document, merge_entries,
};
use crate::normalize::normalize_entry;
use crate::storage::{DEFAULT_QUOTA_BYTES, FileStore, KeyValueStore, StorageUsage};

/// Key of the single document holding every entry.
pub const STORAGE_KEY: &str = "dailyJournal.v1";

#[derive(Serialize)]
struct StoredDocument<'a> {
    entries: &'a [Entry],
}

/// The central struct for all journal operations.
///
/// Owns the entries, always sorted newest day first (ties: most recently
/// updated first), and is the only writer of the stored document. Every
/// mutation rewrites that document whole.
///
/// When a write is refused for lack of space the mutation is still kept in
/// memory and [`JournalError::StorageFull`] is returned, so the caller can
/// tell the user their change is not saved yet.
///
/// If the stored document could not be read at all, every save is refused
/// with [`JournalError::Unreadable`] until a later [`Journal::load`]
/// succeeds, so the unreadable file is never overwritten.
#[derive(Debug)]
pub struct Journal<S: KeyValueStore> {
    store: S,
    entries: Vec<Entry>,
    unreadable: Option<String>,
}

impl Journal<FileStore> {
    /// Opens the journal in `config.data_dir`, creating the directory.
    pub fn with_config(config: &Config) -> Result<Self> {
        fs::create_dir_all(&config.data_dir)
            .with_context(|| format!("creating {}", config.data_dir.display()))?;
        let store = FileStore::new(&config.data_dir, Some(config.quota_bytes));
        Ok(Self::open(store))
    }
}

impl<S: KeyValueStore> Journal<S> {
    /// Wraps `store` and loads whatever it holds.
    pub fn open(store: S) -> Self {
        let mut journal = Self {
            store,
            entries: Vec::new(),
            unreadable: None,
        };
        journal.load();
        journal
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    /// Entries in collection order.
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    /// Replaces the in-memory collection with the stored one.
    ///
    /// A missing, unreadable or malformed document yields an empty journal;
    /// this never fails.
    pub fn load(&mut self) {
        self.unreadable = None;
        self.entries = match self.store.get(STORAGE_KEY) {
            Ok(Some(raw)) => parse_stored_document(&raw, Local::now()),
            Ok(None) => Vec::new(),
            Err(error) => {
                warn!(%error, "could not read journal, starting empty");
                self.unreadable = Some(error.to_string());
                Vec::new()
            }
        };
        debug!(count = self.entries.len(), "journal loaded");
    }

    /// Writes the whole collection to the store.
    pub fn save(&mut self) -> Result<(), JournalError> {
        if let Some(reason) = &self.unreadable {
            return Err(JournalError::Unreadable(reason.clone()));
        }
        let document = StoredDocument {
            entries: &self.entries,
        };
        let raw = serde_json::to_string(&document).map_err(JournalError::Serialize)?;
        match self.store.set(STORAGE_KEY, &raw) {
            Ok(()) => {
                debug!(count = self.entries.len(), bytes = raw.len(), "journal saved");
                Ok(())
            }
            Err(error) => {
                warn!(%error, "journal not saved");
                Err(error.into())
            }
        }
    }

    pub fn get(&self, id: &str) -> Option<&Entry> {
        self.entries.iter().find(|e| e.id == id)
    }

    /// Finds an entry by exact id, or by a prefix matching exactly one id.
    pub fn resolve(&self, id_or_prefix: &str) -> Result<&Entry, JournalError> {
        if let Some(entry) = self.get(id_or_prefix) {
            return Ok(entry);
        }
        let mut matches = self
            .entries
            .iter()
            .filter(|e| !id_or_prefix.is_empty() && e.id.starts_with(id_or_prefix));
        match (matches.next(), matches.next()) {
            (Some(entry), None) => Ok(entry),
            (Some(_), Some(_)) => Err(JournalError::AmbiguousId(id_or_prefix.to_string())),
            _ => Err(JournalError::NotFound(id_or_prefix.to_string())),
        }
    }

    /// Saves a new entry built from `draft`.
    ///
    /// `now` defaults to the current time and becomes both `createdAt` and
    /// `updatedAt`.
    pub fn create(
        &mut self,
        draft: EntryDraft,
        now: Option<DateTime<Local>>,
    ) -> Result<Entry, JournalError> {
        let draft = draft.validated()?;
        let now = now.unwrap_or_else(Local::now);
        let timestamp = iso_timestamp(now);
        let candidate = Entry {
            id: new_id(),
            date_iso: draft.date_iso,
            title: draft.title,
            body: draft.body,
            tags: draft.tags,
            photos: draft.photos,
            created_at: timestamp.clone(),
            updated_at: timestamp,
        };
        let entry = self.normalized(&candidate, now)?;
        info!(id = %entry.id, date = %entry.date_iso, "entry created");

        self.entries.insert(0, entry.clone());
        sort_entries(&mut self.entries);
        self.save()?;
        Ok(entry)
    }

    /// Replaces the editable fields of entry `id` with `draft`.
    ///
    /// `id` and `createdAt` are kept, `updatedAt` becomes `now`.
    pub fn update(
        &mut self,
        id: &str,
        draft: EntryDraft,
        now: Option<DateTime<Local>>,
    ) -> Result<Entry, JournalError> {
        let draft = draft.validated()?;
        let index = self
            .entries
            .iter()
            .position(|e| e.id == id)
            .ok_or_else(|| JournalError::NotFound(id.to_string()))?;
        let now = now.unwrap_or_else(Local::now);
        let previous = &self.entries[index];
        let candidate = Entry {
            id: previous.id.clone(),
            date_iso: draft.date_iso,
            title: draft.title,
            body: draft.body,
            tags: draft.tags,
            photos: draft.photos,
            created_at: previous.created_at.clone(),
            updated_at: iso_timestamp(now),
        };
        let entry = self.normalized(&candidate, now)?;
        info!(id = %entry.id, "entry updated");

        self.entries[index] = entry.clone();
        sort_entries(&mut self.entries);
        self.save()?;
        Ok(entry)
    }

    /// Removes entry `id`, returning whether it existed. The journal is
    /// saved either way.
    pub fn delete(&mut self, id: &str) -> Result<bool, JournalError> {
        let before = self.entries.len();
        self.entries.retain(|e| e.id != id);
        let removed = self.entries.len() != before;
        if removed {
            info!(id, "entry deleted");
        }
        self.save()?;
        Ok(removed)
    }

    /// Entries on `date` (exact `YYYY-MM-DD`) whose title or body contains
    /// `query`, ignoring case. Blank filters match everything.
    pub fn filter(&self, query: Option<&str>, date: Option<&str>) -> Vec<&Entry> {
        let query = query.map(str::trim).unwrap_or_default().to_lowercase();
        let date = date.map(str::trim).unwrap_or_default();
        self.entries
            .iter()
            .filter(|e| date.is_empty() || e.date_iso == date)
            .filter(|e| {
                query.is_empty()
                    || e.title.to_lowercase().contains(&query)
                    || e.body.to_lowercase().contains(&query)
            })
            .collect()
    }

    /// Snapshot of every entry in the backup format.
    pub fn export(&self, now: Option<DateTime<Local>>) -> ExportDocument {
        export_document(&self.entries, now.unwrap_or_else(Local::now))
    }

    /// Merges an import file into the journal and saves it.
    ///
    /// Entries sharing an id with an existing one overwrite it. An invalid
    /// file changes nothing.
    pub fn import(
        &mut self,
        text: &str,
        now: Option<DateTime<Local>>,
    ) -> Result<ImportSummary, JournalError> {
        let incoming = import_document(text, now.unwrap_or_else(Local::now))?;
        self.merge_import(incoming)
    }

    /// Merges already parsed entries, for callers that need to inspect an
    /// import file before committing to it.
    pub fn merge_import(&mut self, incoming: Vec<Entry>) -> Result<ImportSummary, JournalError> {
        let imported = incoming.len();
        let previous = self.entries.len();

        let mut merged = merge_entries(std::mem::take(&mut self.entries), incoming);
        sort_entries(&mut merged);
        self.entries = merged;
        info!(imported, previous, total = self.entries.len(), "entries imported");

        self.save()?;
        Ok(ImportSummary {
            imported,
            previous,
            total: self.entries.len(),
        })
    }

    pub fn usage(&self) -> StorageUsage {
        StorageUsage {
            bytes: self.store.approximate_size(STORAGE_KEY),
            quota_bytes: self.store.quota().unwrap_or(DEFAULT_QUOTA_BYTES),
        }
    }

    fn normalized(&self, candidate: &Entry, now: DateTime<Local>) -> Result<Entry, JournalError> {
        let raw = serde_json::to_value(candidate).map_err(JournalError::Serialize)?;
        Ok(normalize_entry(&raw, now))
    }
}

/// Parses the stored `{ "entries": [...] }` document. Anything else is an
/// empty journal. Falsy items (`null`, `false`, `0`, `""`) are dropped.
fn parse_stored_document(raw: &str, now: DateTime<Local>) -> Vec<Entry> {
    let parsed: Value = match serde_json::from_str(raw) {
        Ok(value) => value,
        Err(error) => {
            warn!(%error, "stored journal is not valid JSON, starting empty");
            return Vec::new();
        }
    };
    let Some(Value::Array(items)) = parsed.get("entries") else {
        warn!("stored journal has no entries array, starting empty");
        return Vec::new();
    };
    let mut entries: Vec<Entry> = items
        .iter()
        .filter(|raw| is_truthy(raw))
        .map(|raw| normalize_entry(raw, now))
        .collect();
    sort_entries(&mut entries);
    entries
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Buckets `entries` by day, newest day first. Entries keep their relative
/// order inside a day.
pub fn group_by_date<'a>(entries: &[&'a Entry]) -> Vec<(&'a str, Vec<&'a Entry>)> {
    let mut groups: IndexMap<&'a str, Vec<&'a Entry>> = IndexMap::new();
    for &entry in entries {
        groups.entry(entry.date_iso.as_str()).or_default().push(entry);
    }
    let mut groups: Vec<_> = groups.into_iter().collect();
    groups.sort_by(|a, b| b.0.cmp(a.0));
    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::tests::mk_config;
    use crate::entry::Photo;
    use crate::storage::MemoryStore;
    use chrono::{Duration, TimeZone, Utc};
    use serde_json::json;
    use tempfile::tempdir;

    fn at(hour: u32) -> DateTime<Local> {
        Utc.with_ymd_and_hms(2024, 1, 10, hour, 0, 0)
            .unwrap()
            .with_timezone(&Local)
    }

    fn draft(date: &str, title: &str, body: &str) -> EntryDraft {
        EntryDraft {
            date_iso: date.into(),
            title: title.into(),
            body: body.into(),
            ..Default::default()
        }
    }

    fn mk_journal() -> Journal<MemoryStore> {
        Journal::open(MemoryStore::new())
    }

    fn mk_journal_with_document(document: &str) -> Journal<MemoryStore> {
        let mut store = MemoryStore::new();
        store.set(STORAGE_KEY, document).unwrap();
        Journal::open(store)
    }

    fn ids<S: KeyValueStore>(journal: &Journal<S>) -> Vec<&str> {
        journal.entries().iter().map(|e| e.id.as_str()).collect()
    }

    fn assert_sorted<S: KeyValueStore>(journal: &Journal<S>) {
        for pair in journal.entries().windows(2) {
            assert_ne!(
                Entry::recency_order(&pair[0], &pair[1]),
                std::cmp::Ordering::Greater
            );
        }
    }

    // --- load ---

    #[test]
    fn load_missing_document_is_empty() {
        assert!(mk_journal().entries().is_empty());
    }

    #[test]
    fn load_malformed_documents_is_empty() {
        for doc in ["{oops", "[]", "42", r#"{"entries":"nope"}"#, r#"{"other":[]}"#] {
            assert!(mk_journal_with_document(doc).entries().is_empty(), "{doc}");
        }
    }

    #[test]
    fn load_normalizes_skips_nulls_and_sorts() {
        let doc = json!({
            "entries": [
                { "id": "a", "dateISO": "2024-01-01", "updatedAt": "2024-01-01T00:00:00.000Z" },
                null,
                { "id": "b", "dateISO": "2024-01-03", "title": 5 },
                { "id": "c", "dateISO": "2024-01-01", "updatedAt": "2024-01-02T00:00:00.000Z" }
            ]
        });
        let j = mk_journal_with_document(&doc.to_string());
        assert_eq!(ids(&j), ["b", "c", "a"]);
        assert_eq!(j.get("b").unwrap().title, "");
    }

    #[test]
    fn save_then_load_round_trips() {
        let mut j = mk_journal();
        j.create(draft("2024-01-01", "A", "one"), Some(at(8))).unwrap();
        j.create(draft("2024-01-02", "B", "two"), Some(at(9))).unwrap();
        let before = j.entries().to_vec();

        j.load();
        assert_eq!(j.entries(), before.as_slice());

        let stored: Value =
            serde_json::from_str(&j.store().get(STORAGE_KEY).unwrap().unwrap()).unwrap();
        assert!(stored.get("version").is_none());
        assert_eq!(stored["entries"].as_array().unwrap().len(), 2);
    }

    // --- create / update ---

    #[test]
    fn create_sets_timestamps_and_persists() {
        let mut j = mk_journal();
        let e = j
            .create(draft("2024-01-01", "A", "hi"), Some(at(8)))
            .unwrap();
        assert_eq!(j.entries().len(), 1);
        assert_eq!(e.created_at, e.updated_at);
        assert_eq!(e.created_at, "2024-01-10T08:00:00.000Z");
        assert!(j.store().get(STORAGE_KEY).unwrap().unwrap().contains(&e.id));
    }

    #[test]
    fn update_refreshes_updated_at_only() {
        let mut j = mk_journal();
        let created = j
            .create(draft("2024-01-01", "A", "hi"), Some(at(8)))
            .unwrap();
        let updated = j
            .update(&created.id, draft("2024-01-01", "B", "hi"), Some(at(9)))
            .unwrap();

        assert_eq!(updated.id, created.id);
        assert_eq!(updated.title, "B");
        assert_eq!(updated.created_at, created.created_at);
        assert_ne!(updated.updated_at, created.updated_at);
        assert_eq!(j.entries().len(), 1);
        assert_eq!(j.get(&created.id).unwrap().title, "B");
    }

    #[test]
    fn update_unknown_id_is_not_found() {
        let mut j = mk_journal();
        let err = j
            .update("missing", draft("2024-01-01", "A", "b"), None)
            .unwrap_err();
        assert!(matches!(err, JournalError::NotFound(id) if id == "missing"));
    }

    #[test]
    fn invalid_draft_changes_nothing() {
        let mut j = mk_journal();
        let err = j.create(draft("2024-01-01", " ", "b"), None).unwrap_err();
        assert!(matches!(err, JournalError::Validation(_)));
        assert!(j.entries().is_empty());
        assert!(j.store().get(STORAGE_KEY).unwrap().is_none());
    }

    #[test]
    fn create_normalizes_photos() {
        let mut j = mk_journal();
        let mut d = draft("2024-01-01", "A", "b");
        d.photos = vec![
            Photo {
                name: "ok.jpg".into(),
                mime_type: "image/jpeg".into(),
                data_url: "data:image/jpeg;base64,AA==".into(),
            },
            Photo {
                name: "bad".into(),
                mime_type: "text/plain".into(),
                data_url: "data:text/plain;base64,AA==".into(),
            },
        ];
        let e = j.create(d, None).unwrap();
        assert_eq!(e.photos.len(), 1);
        assert_eq!(e.photos[0].name, "ok.jpg");
    }

    #[test]
    fn mutations_keep_collection_sorted() {
        let mut j = mk_journal();
        let a = j.create(draft("2024-01-02", "A", "a"), Some(at(1))).unwrap();
        j.create(draft("2024-01-05", "B", "b"), Some(at(2))).unwrap();
        j.create(draft("2024-01-02", "C", "c"), Some(at(3))).unwrap();
        assert_sorted(&j);
        assert_eq!(j.entries()[0].title, "B");

        // Touching A moves it ahead of C on the same day.
        j.update(&a.id, draft("2024-01-02", "A2", "a"), Some(at(4)))
            .unwrap();
        assert_sorted(&j);
        let titles: Vec<_> = j.entries().iter().map(|e| e.title.as_str()).collect();
        assert_eq!(titles, ["B", "A2", "C"]);
    }

    // --- quota ---

    #[test]
    fn quota_failure_keeps_memory_and_reports_storage_full() {
        let mut j = Journal::open(MemoryStore::with_quota(1000));
        let first = j.create(draft("2024-01-01", "A", "a"), None).unwrap();

        let long_body = "x".repeat(600);
        let err = j
            .create(draft("2024-01-02", "B", &long_body), None)
            .unwrap_err();
        assert!(matches!(err, JournalError::StorageFull));
        assert_eq!(j.entries().len(), 2);

        // The store still has only the first entry.
        let mut reloaded = Journal::open(MemoryStore::new());
        let stored = j.store().get(STORAGE_KEY).unwrap().unwrap();
        reloaded.store_mut().set(STORAGE_KEY, &stored).unwrap();
        reloaded.load();
        assert_eq!(ids(&reloaded), [first.id.as_str()]);
    }

    #[test]
    fn quota_failure_on_update_keeps_edit_in_memory() {
        let mut j = Journal::open(MemoryStore::with_quota(1000));
        let e = j.create(draft("2024-01-01", "A", "a"), None).unwrap();
        let err = j
            .update(&e.id, draft("2024-01-01", "A", &"y".repeat(600)), None)
            .unwrap_err();
        assert!(matches!(err, JournalError::StorageFull));
        assert_eq!(j.get(&e.id).unwrap().body.len(), 600);
    }

    // --- delete ---

    #[test]
    fn delete_removes_entry() {
        let mut j = mk_journal();
        let e = j.create(draft("2024-01-01", "A", "a"), None).unwrap();
        assert!(j.delete(&e.id).unwrap());
        assert!(j.entries().is_empty());
        j.load();
        assert!(j.entries().is_empty());
    }

    #[test]
    fn delete_missing_id_is_a_no_op() {
        let mut j = mk_journal();
        j.create(draft("2024-01-01", "A", "a"), None).unwrap();
        let before = j.entries().to_vec();
        assert!(!j.delete("nope").unwrap());
        assert_eq!(j.entries(), before.as_slice());
    }

    #[test]
    fn delete_missing_id_still_rewrites_the_document() {
        let doc = json!({ "entries": [
            { "id": "old", "dateISO": "2024-01-01", "extra": true },
            { "id": "new", "dateISO": "2024-01-02" }
        ]})
        .to_string();
        let mut j = mk_journal_with_document(&doc);
        assert!(!j.delete("nope").unwrap());

        let stored = j.store().get(STORAGE_KEY).unwrap().unwrap();
        assert_ne!(stored, doc);
        assert!(!stored.contains("extra"));
        let stored: Value = serde_json::from_str(&stored).unwrap();
        assert_eq!(stored["entries"][0]["id"], "new");
        assert_eq!(stored["entries"][1]["id"], "old");
    }

    // --- load ---

    #[test]
    fn load_skips_falsy_items() {
        let j = mk_journal_with_document(
            r#"{"entries":[0,false,"",null,{"id":"real","dateISO":"2024-01-01"}]}"#,
        );
        assert_eq!(ids(&j), ["real"]);

        let j = mk_journal_with_document(r#"{"entries":[1,"x",{}]}"#);
        assert_eq!(j.entries().len(), 3);
    }

    #[test]
    fn unreadable_document_is_never_overwritten() {
        let tmp = tempdir().unwrap();
        let cfg = mk_config(tmp.path().to_path_buf());
        let path = cfg.data_dir.join(format!("{STORAGE_KEY}.json"));
        fs::write(&path, [0xff, 0xfe, 0x00]).unwrap();

        let mut j = Journal::with_config(&cfg).unwrap();
        assert!(j.entries().is_empty());
        let err = j.create(draft("2024-01-01", "A", "a"), None).unwrap_err();
        assert!(matches!(err, JournalError::Unreadable(_)));
        assert!(matches!(j.delete("x"), Err(JournalError::Unreadable(_))));
        assert_eq!(fs::read(&path).unwrap(), [0xff, 0xfe, 0x00]);

        fs::remove_file(&path).unwrap();
        j.load();
        j.create(draft("2024-01-01", "A", "a"), None).unwrap();
        assert!(path.exists());
    }

    // --- lookup ---

    #[test]
    fn resolve_by_id_or_unique_prefix() {
        let doc = json!({ "entries": [
            { "id": "abc123", "dateISO": "2024-01-01" },
            { "id": "abd456", "dateISO": "2024-01-01" }
        ]});
        let j = mk_journal_with_document(&doc.to_string());
        assert_eq!(j.resolve("abc123").unwrap().id, "abc123");
        assert_eq!(j.resolve("abd").unwrap().id, "abd456");
        assert!(matches!(j.resolve("ab"), Err(JournalError::AmbiguousId(_))));
        assert!(matches!(j.resolve("zz"), Err(JournalError::NotFound(_))));
        assert!(matches!(j.resolve(""), Err(JournalError::NotFound(_))));
    }

    // --- filter / group ---

    fn sample() -> Journal<MemoryStore> {
        let doc = json!({ "entries": [
            { "id": "1", "dateISO": "2024-01-02", "title": "Beach day", "body": "Sunny", "updatedAt": "b" },
            { "id": "2", "dateISO": "2024-01-01", "title": "Work", "body": "Long MEETING", "updatedAt": "a" },
            { "id": "3", "dateISO": "2024-01-02", "title": "Dinner", "body": "pasta", "updatedAt": "a" }
        ]});
        mk_journal_with_document(&doc.to_string())
    }

    #[test]
    fn filter_matches_title_or_body_ignoring_case() {
        let j = sample();
        let hits = |query| -> Vec<String> {
            j.filter(Some(query), None)
                .into_iter()
                .map(|e| e.id.clone())
                .collect()
        };
        assert_eq!(hits("  meeting "), ["2"]);
        assert_eq!(hits("BEACH"), ["1"]);
    }

    #[test]
    fn filter_by_exact_date_and_query() {
        let j = sample();
        assert_eq!(j.filter(None, Some("2024-01-02")).len(), 2);
        assert_eq!(j.filter(Some("pasta"), Some("2024-01-02")).len(), 1);
        assert_eq!(j.filter(Some("pasta"), Some("2024-01-01")).len(), 0);
        assert_eq!(j.filter(Some(""), Some(" ")).len(), 3);
        assert_eq!(j.filter(None, None).len(), 3);
    }

    #[test]
    fn group_by_date_orders_days_descending() {
        let j = sample();
        let all: Vec<&Entry> = j.entries().iter().rev().collect();
        let groups = group_by_date(&all);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].0, "2024-01-02");
        assert_eq!(groups[1].0, "2024-01-01");
        let day: Vec<_> = groups[0].1.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(day, ["3", "1"]);
    }

    // --- import / export ---

    #[test]
    fn import_overwrites_entry_with_same_id() {
        let mut j = mk_journal_with_document(
            &json!({ "entries": [{ "id": "x", "dateISO": "2024-01-01", "title": "old", "body": "old" }] })
                .to_string(),
        );
        let summary = j
            .import(
                r#"{"entries":[{"id":"x","dateISO":"2024-01-02","title":"T","body":"B"}]}"#,
                None,
            )
            .unwrap();
        assert_eq!(
            summary,
            ImportSummary {
                imported: 1,
                previous: 1,
                total: 1
            }
        );
        assert_eq!(j.entries().len(), 1);
        let e = &j.entries()[0];
        assert_eq!((e.id.as_str(), e.date_iso.as_str()), ("x", "2024-01-02"));
        assert_eq!((e.title.as_str(), e.body.as_str()), ("T", "B"));

        j.load();
        assert_eq!(j.entries()[0].title, "T");
    }

    #[test]
    fn import_invalid_file_changes_nothing() {
        let mut j = sample();
        let before = j.entries().to_vec();
        assert!(matches!(j.import("{}", None), Err(JournalError::InvalidFormat)));
        assert!(matches!(j.import("nope", None), Err(JournalError::InvalidJson(_))));
        assert_eq!(j.entries(), before.as_slice());
    }

    #[test]
    fn export_then_import_into_empty_journal() {
        let source = sample();
        let text = crate::exchange::export_json(&source.export(None)).unwrap();

        let mut target = mk_journal();
        let summary = target.import(&text, None).unwrap();
        assert_eq!(summary.total, 3);
        assert_eq!(target.entries(), source.entries());
    }

    #[test]
    fn merge_import_adds_new_ids_and_sorts() {
        let mut j = sample();
        let incoming =
            crate::exchange::import_document(r#"[{"id":"n","dateISO":"2030-01-01"}]"#, at(9))
                .unwrap();
        let summary = j.merge_import(incoming).unwrap();
        assert_eq!((summary.previous, summary.total), (3, 4));
        assert_eq!(j.entries()[0].id, "n");
        assert_sorted(&j);
    }

    #[test]
    fn usage_reports_document_size() {
        let mut j = mk_journal();
        assert_eq!(j.usage().bytes, 0);
        j.create(draft("2024-01-01", "A", "a"), None).unwrap();
        let stored = j.store().get(STORAGE_KEY).unwrap().unwrap();
        assert_eq!(j.usage().bytes, stored.len() * 2);
        assert_eq!(j.usage().quota_bytes, 5 * 1024 * 1024);
    }

    #[test]
    fn usage_quota_comes_from_the_store() {
        let j = Journal::open(MemoryStore::with_quota(1000));
        assert_eq!(j.usage().quota_bytes, 1000);
    }

    // --- file backed ---

    #[test]
    fn with_config_persists_to_data_dir() {
        let tmp = tempdir().unwrap();
        let cfg = mk_config(tmp.path().join("dj"));
        let mut j = Journal::with_config(&cfg).unwrap();
        let e = j
            .create(draft("2024-01-01", "A", "hi"), Some(at(8) - Duration::days(1)))
            .unwrap();

        let path = cfg.data_dir.join(format!("{STORAGE_KEY}.json"));
        assert!(path.exists());

        let reopened = Journal::with_config(&cfg).unwrap();
        assert_eq!(reopened.entries(), &[e]);
    }
}
