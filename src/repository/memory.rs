use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use super::{NoteStore, StoreError};
use crate::models::{Note, NoteFields};

/// In-process store with the same ordering and id rules as the database.
#[derive(Default)]
pub struct MemoryStore {
    state: RwLock<State>,
}

#[derive(Default)]
struct State {
    last_id: i64,
    notes: BTreeMap<i64, Note>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn count(&self) -> usize {
        self.state.read().await.notes.len()
    }
}

#[async_trait]
impl NoteStore for MemoryStore {
    async fn get_all_notes(&self) -> Result<Vec<Note>, StoreError> {
        let mut notes: Vec<Note> = self.state.read().await.notes.values().cloned().collect();
        notes.sort_by(|a, b| {
            b.updated_at
                .cmp(&a.updated_at)
                .then_with(|| b.id.cmp(&a.id))
        });
        Ok(notes)
    }

    async fn get_one_note(&self, id: i64) -> Result<Option<Note>, StoreError> {
        Ok(self.state.read().await.notes.get(&id).cloned())
    }

    async fn create_note(&self, fields: NoteFields) -> Result<Note, StoreError> {
        let mut state = self.state.write().await;
        state.last_id += 1;

        let now = Utc::now();
        let note = Note {
            id: state.last_id,
            title: fields.title,
            content: fields.content,
            created_at: now,
            updated_at: now,
        };
        state.notes.insert(note.id, note.clone());
        Ok(note)
    }

    async fn update_note(&self, id: i64, fields: NoteFields) -> Result<Option<Note>, StoreError> {
        let mut state = self.state.write().await;
        let Some(note) = state.notes.get_mut(&id) else {
            return Ok(None);
        };

        note.title = fields.title;
        note.content = fields.content;
        note.updated_at = Utc::now().max(note.updated_at);
        Ok(Some(note.clone()))
    }

    async fn delete_note(&self, id: i64) -> Result<bool, StoreError> {
        Ok(self.state.write().await.notes.remove(&id).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(title: &str) -> NoteFields {
        NoteFields {
            title: title.to_owned(),
            content: String::new(),
        }
    }

    #[tokio::test]
    async fn ids_are_not_reused_after_delete() {
        let store = MemoryStore::new();
        let first = store.create_note(fields("a")).await.unwrap();
        assert!(store.delete_note(first.id).await.unwrap());

        let second = store.create_note(fields("b")).await.unwrap();
        assert!(second.id > first.id);
    }

    #[tokio::test]
    async fn list_orders_by_updated_at_then_id() {
        let store = MemoryStore::new();
        let a = store.create_note(fields("a")).await.unwrap();
        let b = store.create_note(fields("b")).await.unwrap();
        let c = store.create_note(fields("c")).await.unwrap();
        tokio::time::sleep(std::time::Duration::from_millis(2)).await;
        store.update_note(a.id, fields("a2")).await.unwrap();

        let ids: Vec<i64> = store
            .get_all_notes()
            .await
            .unwrap()
            .iter()
            .map(|note| note.id)
            .collect();
        assert_eq!(ids, [a.id, c.id, b.id]);
    }

    #[tokio::test]
    async fn missing_ids_report_absence() {
        let store = MemoryStore::new();

        assert!(store.get_one_note(1).await.unwrap().is_none());
        assert!(store.update_note(1, fields("x")).await.unwrap().is_none());
        assert!(!store.delete_note(1).await.unwrap());
        assert_eq!(store.count().await, 0);
    }
}
