mod backend;
mod database;
mod file_backend;
mod kv_repository;
mod note_repository;
mod sqlite_backend;

pub use backend::{MemoryBackend, StorageBackend};
pub use database::{Connection, Database};
pub use file_backend::FileBackend;
pub use kv_repository::KvRepository;
pub use note_repository::{NoteRepository, SCHEMA_VERSION};
pub use sqlite_backend::SqliteBackend;
