mod validation;

pub use validation::ValidationErrors;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use utoipa::ToSchema;

use crate::models::{Note, NoteFields};

pub const FIELD_REQUIRED: &str = "This field is required.";
pub const FIELD_BLANK: &str = "This field may not be blank.";
pub const FIELD_NULL: &str = "This field may not be null.";

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct NoteResponse {
    /// Note ID
    pub id: i64,
    /// Note title
    pub title: String,
    /// Note content
    pub content: String,
    /// Creation time (ISO-8601, UTC)
    pub created_at: DateTime<Utc>,
    /// Time of the last update (ISO-8601, UTC)
    pub updated_at: DateTime<Utc>,
}

impl From<Note> for NoteResponse {
    fn from(note: Note) -> Self {
        Self {
            id: note.id,
            title: note.title,
            content: note.content,
            created_at: note.created_at,
            updated_at: note.updated_at,
        }
    }
}

/// Payload of both create and update requests.
///
/// The outer `Option` is whether the field was sent at all, the inner one
/// whether it was `null`, so a missing title and a null title can be told
/// apart. Unknown fields, `id` included, are ignored.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct NoteRequest {
    /// Note title, required, non-null and non-blank
    #[serde(default, deserialize_with = "present")]
    #[schema(value_type = String)]
    pub title: Option<Option<String>>,
    /// Note content, non-null, defaults to an empty string when omitted
    #[serde(default, deserialize_with = "present")]
    #[schema(value_type = String, required = false)]
    pub content: Option<Option<String>>,
}

/// Marks a field that appeared in the payload, keeping `null` as `Some(None)`.
fn present<'de, D>(deserializer: D) -> Result<Option<Option<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Some)
}

impl NoteRequest {
    /// Checks field constraints and produces the fields a store may write.
    ///
    /// Surrounding whitespace is trimmed from both fields before the title
    /// is checked for blankness.
    pub fn validate(self) -> Result<NoteFields, ValidationErrors> {
        let mut errors = ValidationErrors::default();

        let title = match self.title {
            None => {
                errors.add("title", FIELD_REQUIRED);
                String::new()
            }
            Some(None) => {
                errors.add("title", FIELD_NULL);
                String::new()
            }
            Some(Some(title)) => {
                let title = title.trim();
                if title.is_empty() {
                    errors.add("title", FIELD_BLANK);
                }
                title.to_owned()
            }
        };

        let content = match self.content {
            None => String::new(),
            Some(None) => {
                errors.add("content", FIELD_NULL);
                String::new()
            }
            Some(Some(content)) => content.trim().to_owned(),
        };

        if errors.is_empty() {
            Ok(NoteFields { title, content })
        } else {
            Err(errors)
        }
    }
}

/// Body of every non-validation error response.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Human readable description of the failure
    pub detail: String,
}

impl ErrorResponse {
    pub fn new(detail: impl Into<String>) -> Self {
        Self {
            detail: detail.into(),
        }
    }
}
