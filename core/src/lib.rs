//! Note lifecycle and view-derivation engine.
//!
//! [`NoteStore`] owns an ordered collection of [`Note`]s, applies the
//! pin/archive/trash/restore/delete transitions, derives the active,
//! archived and trashed views, and writes the collection back to an
//! injected [`StorageBackend`] after every change.

pub mod clock;
pub mod error;
pub mod models;
pub mod storage;
pub mod store;

pub use clock::{Clock, ManualClock, SystemClock};
pub use error::{Error, Result};
pub use models::{Note, NoteDraft, NotePatch, ViewCounts, ViewKind};
pub use storage::{FileBackend, MemoryBackend, SqliteBackend, StorageBackend};
pub use store::{NoteStore, DEFAULT_STORAGE_KEY};
