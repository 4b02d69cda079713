use crate::{
    dto::{NoteRequest, NoteResponse, ValidationErrors},
    repository::{NoteStore, StoreError},
};

use std::sync::Arc;

#[derive(Debug, thiserror::Error)]
pub enum NoteServiceError {
    #[error(transparent)]
    Validation(#[from] ValidationErrors),

    #[error("note {0} not found")]
    NotFound(i64),

    #[error(transparent)]
    Store(#[from] StoreError),
}

#[derive(Clone)]
pub struct NoteService {
    store: Arc<dyn NoteStore>,
}

impl NoteService {
    pub const fn new(store: Arc<dyn NoteStore>) -> Self {
        Self { store }
    }

    pub async fn create_note(
        &self,
        request: NoteRequest,
    ) -> Result<NoteResponse, NoteServiceError> {
        let fields = request.validate()?;
        let note = self.store.create_note(fields).await?;

        tracing::debug!("created note {}", note.id);
        Ok(note.into())
    }

    /// Full replacement of title and content. An unknown id wins over an
    /// invalid payload: a rejected body is only reported for a note that
    /// exists.
    pub async fn update_note(
        &self,
        id: i64,
        request: NoteRequest,
    ) -> Result<NoteResponse, NoteServiceError> {
        let fields = match request.validate() {
            Ok(fields) => fields,
            Err(errors) => {
                self.ensure_exists(id).await?;
                return Err(errors.into());
            }
        };

        self.store
            .update_note(id, fields)
            .await?
            .map(NoteResponse::from)
            .ok_or(NoteServiceError::NotFound(id))
    }

    pub async fn delete_note(&self, id: i64) -> Result<(), NoteServiceError> {
        if self.store.delete_note(id).await? {
            tracing::debug!("deleted note {id}");
            Ok(())
        } else {
            Err(NoteServiceError::NotFound(id))
        }
    }

    pub async fn get_one_note(&self, id: i64) -> Result<NoteResponse, NoteServiceError> {
        self.store
            .get_one_note(id)
            .await?
            .map(NoteResponse::from)
            .ok_or(NoteServiceError::NotFound(id))
    }

    /// Read-only existence check, used before reporting a bad update body.
    pub async fn ensure_exists(&self, id: i64) -> Result<(), NoteServiceError> {
        self.store
            .get_one_note(id)
            .await?
            .map(|_| ())
            .ok_or(NoteServiceError::NotFound(id))
    }

    pub async fn get_all_notes(&self) -> Result<Vec<NoteResponse>, NoteServiceError> {
        let notes = self.store.get_all_notes().await?;
        Ok(notes.into_iter().map(NoteResponse::from).collect())
    }
}
