pub mod config;
pub mod dates;
pub mod entry;
pub mod error;
pub mod exchange;
pub mod journal;
pub mod normalize;
pub mod photos;
pub mod render;
pub mod storage;

pub use config::Config;
pub use entry::{Entry, EntryDraft, Photo};
pub use error::JournalError;
pub use exchange::{ExportDocument, ImportSummary};
pub use journal::Journal;
pub use photos::{AttachReport, ImageCodec, PhotoSource};
pub use storage::{FileStore, KeyValueStore, MemoryStore, StorageError, StorageUsage};
