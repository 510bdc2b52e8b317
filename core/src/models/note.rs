use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Title given to notes created without one.
pub const UNTITLED: &str = "Untitled";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub pinned: bool,
    #[serde(default)]
    pub archived: bool,
    #[serde(default)]
    pub deleted: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Note {
    /// Create a new note with a generated UUID, stamped at `now`
    pub fn new(draft: NoteDraft, now: DateTime<Utc>) -> Self {
        Self::with_id(uuid::Uuid::new_v4().to_string(), draft, now)
    }

    /// Create a note with a specific ID (for testing or import)
    pub fn with_id(id: String, draft: NoteDraft, now: DateTime<Utc>) -> Self {
        let title = if draft.title.trim().is_empty() {
            UNTITLED.to_string()
        } else {
            draft.title
        };

        Self {
            id,
            title,
            content: draft.content,
            tags: draft.tags,
            pinned: false,
            archived: false,
            deleted: false,
            created_at: now,
            updated_at: now,
        }
    }

    /// Update the modified timestamp
    pub fn touch(&mut self, now: DateTime<Utc>) {
        self.updated_at = now;
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    /// Case-insensitive substring match on title or content.
    ///
    /// `needle` must already be lowercased.
    pub fn matches_query(&self, needle: &str) -> bool {
        self.title.to_lowercase().contains(needle) || self.content.to_lowercase().contains(needle)
    }

    /// Merge the supplied fields of `patch`. Returns `true` if anything was supplied.
    pub fn apply(&mut self, patch: NotePatch) -> bool {
        let mut changed = false;
        if let Some(title) = patch.title {
            self.title = title;
            changed = true;
        }
        if let Some(content) = patch.content {
            self.content = content;
            changed = true;
        }
        if let Some(tags) = patch.tags {
            self.tags = tags;
            changed = true;
        }
        changed
    }
}

/// Input for creating a note.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NoteDraft {
    pub title: String,
    pub content: String,
    pub tags: Vec<String>,
}

impl NoteDraft {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
            tags: Vec::new(),
        }
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    /// True when neither title nor content carries any text. Callers reject
    /// such drafts before reaching the store.
    pub fn is_empty(&self) -> bool {
        self.title.trim().is_empty() && self.content.trim().is_empty()
    }
}

/// Partial edit of a note. `None` fields are left as they are.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NotePatch {
    pub title: Option<String>,
    pub content: Option<String>,
    pub tags: Option<Vec<String>>,
}

impl NotePatch {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.content.is_none() && self.tags.is_none()
    }
}
