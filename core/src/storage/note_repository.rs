use super::StorageBackend;
use crate::models::Note;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};

/// Version written into every saved slot.
pub const SCHEMA_VERSION: u32 = 1;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct EnvelopeRef<'a> {
    schema_version: u32,
    notes: &'a [Note],
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct Envelope {
    schema_version: u32,
    notes: Vec<Note>,
}

/// Slots written before the envelope existed were a bare array of notes.
#[derive(Deserialize)]
#[serde(untagged)]
enum Stored {
    Envelope(Envelope),
    Legacy(Vec<Note>),
}

pub struct NoteRepository;

impl NoteRepository {
    /// Encode the whole collection for a slot
    pub fn encode(notes: &[Note]) -> Result<String> {
        let envelope = EnvelopeRef {
            schema_version: SCHEMA_VERSION,
            notes,
        };
        Ok(serde_json::to_string(&envelope)?)
    }

    /// Decode a slot, migrating legacy payloads
    pub fn decode(raw: &str) -> Result<Vec<Note>> {
        match serde_json::from_str::<Stored>(raw) {
            Ok(Stored::Envelope(envelope)) => {
                if envelope.schema_version > SCHEMA_VERSION {
                    return Err(Error::UnsupportedSchema {
                        found: envelope.schema_version,
                        supported: SCHEMA_VERSION,
                    });
                }
                Ok(envelope.notes)
            }
            Ok(Stored::Legacy(notes)) => Ok(notes),
            // Untagged enums swallow the real cause; re-parse for a useful message
            Err(untagged) => Err(serde_json::from_str::<Envelope>(raw)
                .err()
                .unwrap_or(untagged)
                .into()),
        }
    }

    /// Load the collection stored under `key`, `None` if the slot is empty
    pub fn load<B: StorageBackend + ?Sized>(backend: &B, key: &str) -> Result<Option<Vec<Note>>> {
        match backend.get(key)? {
            Some(raw) => Self::decode(&raw).map(Some),
            None => Ok(None),
        }
    }

    /// Overwrite the slot under `key` with the whole collection
    pub fn save<B: StorageBackend + ?Sized>(backend: &mut B, key: &str, notes: &[Note]) -> Result<()> {
        let encoded = Self::encode(notes)?;
        backend.set(key, &encoded)
    }
}
