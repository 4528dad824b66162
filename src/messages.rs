use crate::models::{Folder, Note, NoteDraft, NoteFilter, NoteUpdate, Tag, Version};

/// Requests handled by the background store worker
#[derive(Debug, Clone)]
pub enum StoreRequest {
    /// Reload notes, folders and tags together
    Refresh(NoteFilter),
    CreateNote(NoteDraft),
    UpdateNote { id: String, update: NoteUpdate },
    DeleteNote(String),
    LoadHistory(String),
    CreateFolder(String),
    RenameFolder { id: String, name: String },
    DeleteFolder(String),
    CreateTag { name: String, color: String },
}

/// Snapshot of everything the pages list
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    pub notes: Vec<Note>,
    pub folders: Vec<Folder>,
    pub tags: Vec<Tag>,
    /// Size of the unfiltered collection
    pub total_notes: usize,
}

/// Response messages from background operations
#[derive(Debug)]
pub enum ResponseMessage {
    Refreshed(Result<Snapshot, String>),
    NoteCreated(Result<Note, String>),
    NoteUpdated(Result<Note, String>),
    NoteDeleted(Result<String, String>), // note id, error
    HistoryLoaded(String, Result<Vec<Version>, String>), // note id
    FolderSaved(Result<Folder, String>),
    FolderDeleted(Result<String, String>), // folder id, error
    TagCreated(Result<Tag, String>),
}
