use chrono::{DateTime, Utc};

/// A note as persisted by the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Note {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Validated, writable fields of a note.
///
/// Only produced by [`crate::dto::NoteRequest::validate`], so a store never
/// sees a blank title.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteFields {
    pub title: String,
    pub content: String,
}
