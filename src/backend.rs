pub mod api_backend;
pub mod local_backend;
pub mod seed;

use crate::models::{Folder, Note, NoteDraft, NoteFilter, NoteUpdate, Tag, Version};
use std::io;
use thiserror::Error;

pub use api_backend::ApiBackend;
pub use local_backend::LocalBackend;

pub type StoreResult<T> = Result<T, StoreError>;

/// Custom error types for the note stores
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered with a non-success status
    #[error("{status}: {detail}")]
    Api { status: u16, detail: String },

    #[error("Could not connect to the server: {0}")]
    Connection(String),

    #[error("Unexpected error: {0}")]
    Unexpected(String),

    #[error("{0} not found")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Validation error in {field}: {message}")]
    Validation { field: String, message: String },

    #[error("Invalid hash: {0}")]
    InvalidHash(String),
}

impl StoreError {
    pub fn not_found(what: impl Into<String>) -> Self {
        StoreError::NotFound(what.into())
    }

    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        StoreError::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound(_) | StoreError::Api { status: 404, .. })
    }
}

/// Everything the UI needs from a notes backend.
///
/// Both implementations follow the same history rules: creating a code note
/// writes version 1, and every content change of a code note that differs
/// from the current content appends the next version.
pub trait NoteStore: Send {
    fn folders(&self) -> StoreResult<Vec<Folder>>;
    fn create_folder(&mut self, name: &str) -> StoreResult<Folder>;
    fn rename_folder(&mut self, id: &str, name: &str) -> StoreResult<Folder>;
    fn delete_folder(&mut self, id: &str) -> StoreResult<()>;

    fn tags(&self) -> StoreResult<Vec<Tag>>;
    fn create_tag(&mut self, name: &str, color: &str) -> StoreResult<Tag>;

    /// Notes matching `filter`, most recently updated first
    fn notes(&self, filter: &NoteFilter) -> StoreResult<Vec<Note>>;
    fn note(&self, id: &str) -> StoreResult<Note>;
    fn create_note(&mut self, draft: &NoteDraft) -> StoreResult<Note>;
    fn update_note(&mut self, id: &str, update: &NoteUpdate) -> StoreResult<Note>;
    fn delete_note(&mut self, id: &str) -> StoreResult<()>;

    /// Versions of a note ordered by version number
    fn history(&self, id: &str) -> StoreResult<Vec<Version>>;
}

pub(crate) fn require_non_blank(field: &str, value: &str) -> StoreResult<()> {
    if value.trim().is_empty() {
        return Err(StoreError::validation(field, "must not be empty"));
    }
    Ok(())
}
