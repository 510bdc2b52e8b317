use super::Note;
use crate::Error;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Which projection of the collection to derive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ViewKind {
    #[default]
    Active,
    Archived,
    Trashed,
}

impl ViewKind {
    pub const ALL: [ViewKind; 3] = [ViewKind::Active, ViewKind::Archived, ViewKind::Trashed];

    /// Whether a note belongs to this view, before search and tag filters.
    pub fn admits(self, note: &Note) -> bool {
        match self {
            ViewKind::Active => !note.deleted && !note.archived,
            ViewKind::Archived => note.archived,
            ViewKind::Trashed => note.deleted,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ViewKind::Active => "active",
            ViewKind::Archived => "archived",
            ViewKind::Trashed => "trashed",
        }
    }
}

impl fmt::Display for ViewKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ViewKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "active" | "notes" | "all" => Ok(ViewKind::Active),
            "archived" | "archive" => Ok(ViewKind::Archived),
            "trashed" | "trash" => Ok(ViewKind::Trashed),
            other => Err(Error::InvalidInput(format!("Unknown view: {}", other))),
        }
    }
}

/// Display order shared by every view: pinned first, then most recently
/// updated, then id ascending.
pub fn view_order(a: &Note, b: &Note) -> Ordering {
    b.pinned
        .cmp(&a.pinned)
        .then_with(|| b.updated_at.cmp(&a.updated_at))
        .then_with(|| a.id.cmp(&b.id))
}

/// Number of notes admitted by each view.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ViewCounts {
    pub active: usize,
    pub archived: usize,
    pub trashed: usize,
}

impl ViewCounts {
    pub fn tally<'a>(notes: impl IntoIterator<Item = &'a Note>) -> Self {
        let mut counts = Self::default();
        for note in notes {
            if ViewKind::Active.admits(note) {
                counts.active += 1;
            }
            if ViewKind::Archived.admits(note) {
                counts.archived += 1;
            }
            if ViewKind::Trashed.admits(note) {
                counts.trashed += 1;
            }
        }
        counts
    }

    pub fn get(&self, kind: ViewKind) -> usize {
        match kind {
            ViewKind::Active => self.active,
            ViewKind::Archived => self.archived,
            ViewKind::Trashed => self.trashed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NoteDraft;
    use chrono::{TimeZone, Utc};

    fn note(id: &str, secs: i64, pinned: bool) -> Note {
        let now = Utc.timestamp_opt(1_700_000_000 + secs, 0).unwrap();
        let mut n = Note::with_id(id.to_string(), NoteDraft::new(id, ""), now);
        n.pinned = pinned;
        n
    }

    #[test]
    fn test_parse_view_kind() {
        assert_eq!("active".parse::<ViewKind>().unwrap(), ViewKind::Active);
        assert_eq!("Archive".parse::<ViewKind>().unwrap(), ViewKind::Archived);
        assert_eq!(" trash ".parse::<ViewKind>().unwrap(), ViewKind::Trashed);
        assert!("bin".parse::<ViewKind>().is_err());
    }

    #[test]
    fn test_admits() {
        let mut n = note("a", 0, false);
        assert!(ViewKind::Active.admits(&n));
        n.archived = true;
        assert!(!ViewKind::Active.admits(&n));
        assert!(ViewKind::Archived.admits(&n));
        n.archived = false;
        n.deleted = true;
        assert!(!ViewKind::Active.admits(&n));
        assert!(ViewKind::Trashed.admits(&n));
    }

    #[test]
    fn test_view_order() {
        let mut notes = vec![
            note("old", 0, false),
            note("new", 10, false),
            note("pinned-old", 1, true),
            note("b-tie", 5, false),
            note("a-tie", 5, false),
        ];
        notes.sort_by(view_order);
        let ids: Vec<_> = notes.iter().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, vec!["pinned-old", "new", "a-tie", "b-tie", "old"]);
    }

    #[test]
    fn test_tally() {
        let mut archived = note("b", 0, false);
        archived.archived = true;
        let mut trashed = note("c", 0, false);
        trashed.deleted = true;
        let notes = vec![note("a", 0, false), archived, trashed];

        let counts = ViewCounts::tally(&notes);
        assert_eq!(counts, ViewCounts { active: 1, archived: 1, trashed: 1 });
        assert_eq!(counts.get(ViewKind::Trashed), 1);
    }
}
