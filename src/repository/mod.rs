mod embedded;
#[cfg(test)]
mod memory;
mod postgres;

#[cfg(test)]
pub use memory::MemoryStore;
pub use postgres::Repository;

use async_trait::async_trait;

use crate::models::{Note, NoteFields};

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("store unavailable: {0}")]
    Unavailable(String),

    #[error("database error: {0}")]
    Database(tokio_postgres::Error),
}

impl From<tokio_postgres::Error> for StoreError {
    fn from(err: tokio_postgres::Error) -> Self {
        if err.is_closed() {
            Self::Unavailable(err.to_string())
        } else {
            Self::Database(err)
        }
    }
}

/// Durable CRUD over notes. Every call touches a single note, or reads the
/// whole collection, in one round-trip.
#[async_trait]
pub trait NoteStore: Send + Sync {
    /// All notes, most recently updated first; ties go to the higher id.
    async fn get_all_notes(&self) -> Result<Vec<Note>, StoreError>;

    async fn get_one_note(&self, id: i64) -> Result<Option<Note>, StoreError>;

    /// Assigns a fresh id and sets both timestamps to the same instant.
    async fn create_note(&self, fields: NoteFields) -> Result<Note, StoreError>;

    /// Replaces title and content; `updated_at` never moves backwards.
    async fn update_note(&self, id: i64, fields: NoteFields) -> Result<Option<Note>, StoreError>;

    /// Returns `false` when no note had this id.
    async fn delete_note(&self, id: i64) -> Result<bool, StoreError>;
}
