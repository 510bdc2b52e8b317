use crate::clock::{Clock, SystemClock};
use crate::models::{view_order, Note, NoteDraft, NotePatch, ViewCounts, ViewKind};
use crate::storage::{NoteRepository, StorageBackend};
use crate::Result;
use chrono::{DateTime, Utc};
use std::collections::BTreeSet;
use tracing::{debug, error, info, warn};

/// Storage slot used when no key is given.
pub const DEFAULT_STORAGE_KEY: &str = "notes";

/// Owns the note collection and keeps the backend in step with it.
///
/// The collection is read once in [`NoteStore::open`] and the whole of it is
/// written back after every mutation that changed something. Mutations on an
/// unknown id are no-ops and return `false`.
pub struct NoteStore<B: StorageBackend, C: Clock = SystemClock> {
    backend: B,
    clock: C,
    key: String,
    notes: Vec<Note>,
    unsaved: bool,
}

impl<B: StorageBackend, C: Clock> NoteStore<B, C> {
    /// Load the collection under [`DEFAULT_STORAGE_KEY`]
    pub fn open(backend: B, clock: C) -> Self {
        Self::open_with_key(backend, clock, DEFAULT_STORAGE_KEY)
    }

    /// Load the collection under `key`.
    ///
    /// A missing slot starts an empty collection. An unreadable or
    /// undecodable slot does too, with a warning, and is overwritten by the
    /// next mutation.
    pub fn open_with_key(backend: B, clock: C, key: impl Into<String>) -> Self {
        let key = key.into();
        let notes = match NoteRepository::load(&backend, &key) {
            Ok(Some(mut notes)) => {
                notes.sort_by(view_order);
                debug!(key = %key, count = notes.len(), "loaded notes");
                notes
            }
            Ok(None) => {
                info!(key = %key, "no saved notes, starting empty");
                Vec::new()
            }
            Err(e) => {
                warn!(key = %key, error = %e, "saved notes could not be loaded, starting empty");
                Vec::new()
            }
        };

        Self {
            backend,
            clock,
            key,
            notes,
            unsaved: false,
        }
    }

    // ========== Mutations ==========

    /// Insert a new note at the front of the collection
    pub fn create(&mut self, draft: NoteDraft) -> Note {
        let note = Note::new(draft, self.clock.now());
        debug!(id = %note.id, "created note");
        self.notes.insert(0, note.clone());
        self.persist();
        note
    }

    /// Merge the supplied fields into a note
    pub fn update(&mut self, id: &str, patch: NotePatch) -> bool {
        self.modify(id, "update", |note, now| {
            note.apply(patch);
            note.touch(now);
        })
    }

    pub fn toggle_pin(&mut self, id: &str) -> bool {
        self.modify(id, "toggle_pin", |note, now| {
            note.pinned = !note.pinned;
            note.touch(now);
        })
    }

    /// Flip `archived`; archiving also takes the note out of the trash
    pub fn toggle_archive(&mut self, id: &str) -> bool {
        self.modify(id, "toggle_archive", |note, now| {
            note.archived = !note.archived;
            if note.archived {
                note.deleted = false;
            }
            note.touch(now);
        })
    }

    /// Trash a note, clearing its pin and archive flags
    pub fn move_to_trash(&mut self, id: &str) -> bool {
        self.modify(id, "move_to_trash", |note, now| {
            note.deleted = true;
            note.archived = false;
            note.pinned = false;
            note.touch(now);
        })
    }

    /// Clear `deleted`. Leaves the other flags and `updated_at` alone.
    pub fn restore_from_trash(&mut self, id: &str) -> bool {
        self.modify(id, "restore_from_trash", |note, _| {
            note.deleted = false;
        })
    }

    /// Remove a note for good
    pub fn permanently_delete(&mut self, id: &str) -> bool {
        let before = self.notes.len();
        self.notes.retain(|n| n.id != id);
        if self.notes.len() == before {
            debug!(id, "permanently_delete: no such note");
            return false;
        }
        debug!(id, "permanently deleted note");
        self.persist();
        true
    }

    fn modify<F>(&mut self, id: &str, op: &'static str, f: F) -> bool
    where
        F: FnOnce(&mut Note, DateTime<Utc>),
    {
        let now = self.clock.now();
        let Some(note) = self.notes.iter_mut().find(|n| n.id == id) else {
            debug!(id, op, "no such note");
            return false;
        };
        f(note, now);
        debug!(id, op, "modified note");
        self.persist();
        true
    }

    fn persist(&mut self) {
        match NoteRepository::save(&mut self.backend, &self.key, &self.notes) {
            Ok(()) => self.unsaved = false,
            Err(e) => {
                self.unsaved = true;
                error!(key = %self.key, error = %e, "failed to save notes, changes kept in memory");
            }
        }
    }

    /// Write the collection now, reporting failure to the caller
    pub fn flush(&mut self) -> Result<()> {
        NoteRepository::save(&mut self.backend, &self.key, &self.notes)?;
        self.unsaved = false;
        Ok(())
    }

    /// True when the last write to the backend failed
    pub fn has_unsaved_changes(&self) -> bool {
        self.unsaved
    }

    // ========== Queries ==========

    /// Every tag in use, including on archived and trashed notes, sorted and deduplicated
    pub fn list_tags(&self) -> Vec<String> {
        self.notes
            .iter()
            .flat_map(|n| n.tags.iter().cloned())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Derive one view of the collection.
    ///
    /// `search` is trimmed and matched case-insensitively against title and
    /// content; an empty search matches everything. `active_tag` must match
    /// a tag exactly.
    pub fn view(&self, kind: ViewKind, search: &str, active_tag: Option<&str>) -> Vec<&Note> {
        let needle = search.trim().to_lowercase();
        let mut notes: Vec<&Note> = self
            .notes
            .iter()
            .filter(|n| kind.admits(n))
            .filter(|n| needle.is_empty() || n.matches_query(&needle))
            .filter(|n| active_tag.map_or(true, |tag| n.has_tag(tag)))
            .collect();
        notes.sort_by(|a, b| view_order(a, b));
        notes
    }

    pub fn get(&self, id: &str) -> Option<&Note> {
        self.notes.iter().find(|n| n.id == id)
    }

    /// The master collection in storage order
    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    pub fn counts(&self) -> ViewCounts {
        ViewCounts::tally(&self.notes)
    }

    pub fn storage_key(&self) -> &str {
        &self.key
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn into_backend(self) -> B {
        self.backend
    }
}
