//! Turning untrusted JSON into well-formed entries.
//!
//! Every record crossing a boundary (the stored document, an import file, a
//! freshly saved draft) goes through [`normalize_entry`]. It never fails: a
//! field with the wrong shape takes its default instead, and a photo that is
//! not an image data URL is dropped.

use chrono::{DateTime, Local};
use serde_json::{Map, Value};

use crate::dates::{iso_date, iso_timestamp};
use crate::entry::{
    DEFAULT_PHOTO_NAME, DEFAULT_PHOTO_TYPE, Entry, IMAGE_DATA_PREFIX, MAX_PHOTOS_PER_ENTRY, Photo,
    new_id,
};

/// Normalizes `raw` using the current clock for missing dates and timestamps.
pub fn normalize(raw: &Value) -> Entry {
    normalize_entry(raw, Local::now())
}

/// Normalizes `raw`, filling missing values relative to `now`.
///
/// - `id`: a fresh identifier
/// - `dateISO`: the local date of `now`
/// - `title`, `body`: empty
/// - `tags`: only the string elements, in order
/// - `photos`: only image data URLs, at most [`MAX_PHOTOS_PER_ENTRY`]
/// - `createdAt`: `now`; `updatedAt`: `createdAt`
///
/// A value that is not a JSON object is treated as an object with no fields.
pub fn normalize_entry(raw: &Value, now: DateTime<Local>) -> Entry {
    let empty = Map::new();
    let fields = raw.as_object().unwrap_or(&empty);
    let string = |key: &str| fields.get(key).and_then(Value::as_str).map(str::to_string);

    let created_at = string("createdAt").unwrap_or_else(|| iso_timestamp(now));
    let updated_at = string("updatedAt").unwrap_or_else(|| created_at.clone());

    Entry {
        id: string("id").unwrap_or_else(new_id),
        date_iso: string("dateISO").unwrap_or_else(|| iso_date(now)),
        title: string("title").unwrap_or_default(),
        body: string("body").unwrap_or_default(),
        tags: normalize_tags(fields.get("tags")),
        photos: normalize_photos(fields.get("photos")),
        created_at,
        updated_at,
    }
}

fn normalize_tags(raw: Option<&Value>) -> Vec<String> {
    match raw {
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(Value::as_str)
            .map(str::to_string)
            .collect(),
        _ => Vec::new(),
    }
}

fn normalize_photos(raw: Option<&Value>) -> Vec<Photo> {
    let Some(Value::Array(items)) = raw else {
        return Vec::new();
    };
    items
        .iter()
        .filter_map(normalize_photo)
        .filter(|p| p.data_url.starts_with(IMAGE_DATA_PREFIX))
        .take(MAX_PHOTOS_PER_ENTRY)
        .collect()
}

/// Structural pass: only objects become photos, with per-field defaults.
fn normalize_photo(raw: &Value) -> Option<Photo> {
    let fields = raw.as_object()?;
    let string = |key: &str| fields.get(key).and_then(Value::as_str).map(str::to_string);
    Some(Photo {
        name: string("name").unwrap_or_else(|| DEFAULT_PHOTO_NAME.to_string()),
        mime_type: string("type").unwrap_or_else(|| DEFAULT_PHOTO_TYPE.to_string()),
        data_url: string("dataUrl").unwrap_or_default(),
    })
}
