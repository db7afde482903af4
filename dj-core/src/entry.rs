use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use uuid::Uuid;

use crate::error::JournalError;

pub const MAX_PHOTOS_PER_ENTRY: usize = 5;
pub const MAX_TAGS: usize = 20;
pub const DEFAULT_PHOTO_NAME: &str = "photo.jpg";
pub const DEFAULT_PHOTO_TYPE: &str = "image/jpeg";
/// Every stored photo payload starts with this.
pub const IMAGE_DATA_PREFIX: &str = "data:image/";

/// An image embedded in an entry as a base64 data URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Photo {
    pub name: String,
    #[serde(rename = "type")]
    pub mime_type: String,
    #[serde(rename = "dataUrl")]
    pub data_url: String,
}

/// One journal record, as stored and exported.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    pub id: String,
    #[serde(rename = "dateISO")]
    pub date_iso: String,
    pub title: String,
    pub body: String,
    pub tags: Vec<String>,
    pub photos: Vec<Photo>,
    #[serde(rename = "createdAt")]
    pub created_at: String,
    #[serde(rename = "updatedAt")]
    pub updated_at: String,
}

impl Entry {
    /// Collection order: newest day first, then most recently updated.
    pub fn recency_order(a: &Entry, b: &Entry) -> Ordering {
        b.date_iso
            .cmp(&a.date_iso)
            .then_with(|| b.updated_at.cmp(&a.updated_at))
    }
}

pub fn sort_entries(entries: &mut [Entry]) {
    entries.sort_by(Entry::recency_order);
}

/// Fresh random identifier for a new entry.
pub fn new_id() -> String {
    Uuid::new_v4().to_string()
}

/// The user editable part of an entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntryDraft {
    pub date_iso: String,
    pub title: String,
    pub body: String,
    pub tags: Vec<String>,
    pub photos: Vec<Photo>,
}

impl EntryDraft {
    /// Starting point for editing an existing entry.
    pub fn from_entry(entry: &Entry) -> Self {
        Self {
            date_iso: entry.date_iso.clone(),
            title: entry.title.clone(),
            body: entry.body.clone(),
            tags: entry.tags.clone(),
            photos: entry.photos.clone(),
        }
    }

    /// Trims the text fields and caps photos, rejecting a draft with an empty
    /// date, title or body.
    pub fn validated(self) -> Result<Self, JournalError> {
        let date_iso = self.date_iso.trim().to_string();
        let title = self.title.trim().to_string();
        let body = self.body.trim().to_string();

        if date_iso.is_empty() {
            return Err(JournalError::Validation("Please choose a date.".into()));
        }
        if title.is_empty() {
            return Err(JournalError::Validation("Please enter a title.".into()));
        }
        if body.is_empty() {
            return Err(JournalError::Validation(
                "Please write something in the journal text.".into(),
            ));
        }

        let mut photos = self.photos;
        photos.truncate(MAX_PHOTOS_PER_ENTRY);

        Ok(Self {
            date_iso,
            title,
            body,
            tags: self.tags,
            photos,
        })
    }
}

/// Splits a comma separated tag list, dropping blanks. At most [`MAX_TAGS`].
///
/// ```
/// # use dj_core::entry::parse_tags;
/// assert_eq!(parse_tags(" work, ,family,, work "), vec!["work", "family", "work"]);
/// ```
pub fn parse_tags(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .take(MAX_TAGS)
        .map(str::to_string)
        .collect()
}
