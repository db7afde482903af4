use crate::storage::StorageError;

/// Everything a journal operation can refuse to do.
///
/// Malformed stored or imported records never show up here: they are
/// repaired by normalization instead.
#[derive(Debug, thiserror::Error)]
pub enum JournalError {
    /// A draft was rejected before touching any state.
    #[error("{0}")]
    Validation(String),
    #[error("no entry with id '{0}'")]
    NotFound(String),
    #[error("'{0}' matches more than one entry, use a longer id")]
    AmbiguousId(String),
    /// The store refused the write because of its size quota.
    /// The in-memory collection still holds the attempted change.
    #[error("Storage is full. Try removing some photos or deleting old entries, then save again.")]
    StorageFull,
    #[error("storage error: {0}")]
    Storage(StorageError),
    /// The stored document exists but could not be read, so saving over it
    /// is refused.
    #[error("the stored journal could not be read ({0}); move or repair it before saving")]
    Unreadable(String),
    #[error("That file is not valid JSON: {0}")]
    InvalidJson(#[source] serde_json::Error),
    #[error("JSON must be an object with an 'entries' array (or just an entries array).")]
    InvalidFormat,
    #[error("You can attach up to {0} photos.")]
    TooManyPhotos(usize),
    #[error("could not process image '{name}': {reason}")]
    Image { name: String, reason: String },
    #[error("could not serialize journal: {0}")]
    Serialize(#[source] serde_json::Error),
}

impl From<StorageError> for JournalError {
    fn from(error: StorageError) -> Self {
        match error {
            StorageError::QuotaExceeded { .. } => JournalError::StorageFull,
            other => JournalError::Storage(other),
        }
    }
}
