use super::seed;
use super::{NoteStore, StoreError, StoreResult, require_non_blank};
use crate::constant::{CONTENT_EDITED_CHANGES, INITIAL_VERSION_CHANGES};
use crate::models::{Folder, Note, NoteDraft, NoteFilter, NoteTag, NoteUpdate, Tag, Version};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use uuid::Uuid;
use xxhash_rust::xxh64::xxh64;

const CATALOG_FILE: &str = "catalog.json";
const BLOB_DIR: &str = "blobs";
const HISTORY_DIR: &str = "history";

/// Represents a single version entry in a note's history file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub version: u32,
    pub hash: String,
    pub timestamp: DateTime<Utc>,
    pub changes: String,
}

/// Folders, tags and notes; history lives in separate files
#[derive(Debug, Default, Serialize, Deserialize)]
struct Catalog {
    folders: Vec<Folder>,
    tags: Vec<Tag>,
    notes: Vec<Note>,
    next_tag_id: i64,
}

/// File-backed store with content-addressable version bodies
pub struct LocalBackend {
    data_dir: PathBuf,
    blobs_dir: PathBuf,
    history_dir: PathBuf,
    catalog: Catalog,
}

impl LocalBackend {
    /// Open (and on first use, seed) the store rooted at `data_dir`
    pub fn open(data_dir: &Path) -> StoreResult<Self> {
        let mut backend = Self::with_dirs(data_dir)?;

        let catalog_path = backend.catalog_path();
        if catalog_path.exists() {
            let content = fs::read_to_string(&catalog_path)?;
            backend.catalog = serde_json::from_str(&content)?;
            info!(
                "Loaded catalog from {:?}: {} notes, {} folders",
                catalog_path,
                backend.catalog.notes.len(),
                backend.catalog.folders.len()
            );
        } else {
            backend.seed()?;
        }

        Ok(backend)
    }

    /// Create directories without touching the catalog
    fn with_dirs(data_dir: &Path) -> StoreResult<Self> {
        let blobs_dir = data_dir.join(BLOB_DIR);
        let history_dir = data_dir.join(HISTORY_DIR);

        // Create directories if they don't exist
        fs::create_dir_all(&blobs_dir)?;
        fs::create_dir_all(&history_dir)?;

        Ok(Self {
            data_dir: data_dir.to_path_buf(),
            blobs_dir,
            history_dir,
            catalog: Catalog {
                next_tag_id: 1,
                ..Catalog::default()
            },
        })
    }

    fn seed(&mut self) -> StoreResult<()> {
        info!("Seeding a new catalog in {:?}", self.data_dir);
        let now = Utc::now();

        self.catalog.folders = seed::FOLDERS
            .iter()
            .map(|(id, name)| Folder {
                id: id.to_string(),
                name: name.to_string(),
                created_at: Some(now),
                note_count: 0,
            })
            .collect();

        for (name, color) in seed::TAGS {
            self.push_tag(name, color);
        }

        for sample in seed::sample_notes() {
            let note = self.create_note(&sample.draft)?;
            for content in sample.edits {
                let update = NoteUpdate {
                    content: Some(content.to_string()),
                    ..NoteUpdate::default()
                };
                self.update_note(&note.id, &update)?;
            }
        }

        self.save_catalog()
    }

    fn catalog_path(&self) -> PathBuf {
        self.data_dir.join(CATALOG_FILE)
    }

    fn save_catalog(&self) -> StoreResult<()> {
        let path = self.catalog_path();
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, serde_json::to_string_pretty(&self.catalog)?)?;
        fs::rename(tmp, path)?;
        Ok(())
    }

    /// Calculate XXHash64 of content and return as hex string
    fn calculate_hash(content: &str) -> String {
        let hash = xxh64(content.as_bytes(), 0);
        format!("{:016x}", hash)
    }

    /// Save blob to storage if it doesn't already exist (deduplication)
    fn save_blob(&self, hash: &str, content: &str) -> StoreResult<()> {
        let blob_path = self.blobs_dir.join(hash);

        // Only write if blob doesn't exist (deduplication)
        if !blob_path.exists() {
            fs::write(blob_path, content)?;
        }

        Ok(())
    }

    /// Restore content from a specific hash
    fn restore_blob(&self, hash: &str) -> StoreResult<String> {
        let blob_path = self.blobs_dir.join(hash);

        if !blob_path.exists() {
            return Err(StoreError::InvalidHash(format!(
                "Blob not found for hash: {}",
                hash
            )));
        }

        Ok(fs::read_to_string(blob_path)?)
    }

    fn history_path(&self, note_id: &str) -> PathBuf {
        self.history_dir.join(format!("{}.json", note_id))
    }

    fn load_history_entries(&self, note_id: &str) -> StoreResult<Vec<HistoryEntry>> {
        let history_path = self.history_path(note_id);

        if !history_path.exists() {
            return Ok(Vec::new());
        }

        let content = fs::read_to_string(history_path)?;
        Ok(serde_json::from_str(&content)?)
    }

    fn save_history_entries(&self, note_id: &str, entries: &[HistoryEntry]) -> StoreResult<()> {
        let content = serde_json::to_string_pretty(entries)?;
        fs::write(self.history_path(note_id), content)?;
        Ok(())
    }

    /// Append the next version; numbers stay contiguous from 1
    fn append_version(
        &self,
        note_id: &str,
        content: &str,
        changes: &str,
        timestamp: DateTime<Utc>,
    ) -> StoreResult<u32> {
        let hash = Self::calculate_hash(content);
        self.save_blob(&hash, content)?;

        let mut entries = self.load_history_entries(note_id)?;
        let version = entries.iter().map(|e| e.version).max().unwrap_or(0) + 1;
        entries.push(HistoryEntry {
            version,
            hash,
            timestamp,
            changes: changes.to_string(),
        });
        self.save_history_entries(note_id, &entries)?;

        debug!("Note {} is now at version {}", note_id, version);
        Ok(version)
    }

    /// Undo `append_version` after the catalog could not be written
    fn drop_version(&self, note_id: &str, version: u32) {
        let result = self.load_history_entries(note_id).and_then(|mut entries| {
            entries.retain(|e| e.version != version);
            if entries.is_empty() {
                fs::remove_file(self.history_path(note_id)).map_err(StoreError::from)
            } else {
                self.save_history_entries(note_id, &entries)
            }
        });
        if let Err(e) = result {
            warn!("Failed to roll back version {} of note {}: {}", version, note_id, e);
        }
    }

    fn push_tag(&mut self, name: &str, color: &str) -> Tag {
        let tag = Tag {
            id: self.catalog.next_tag_id,
            name: name.to_string(),
            color: color.to_string(),
        };
        self.catalog.next_tag_id += 1;
        self.catalog.tags.push(tag.clone());
        tag
    }

    /// Known tags for `names`, in the given order; unknown names are skipped
    fn resolve_tags(&self, names: &[String]) -> Vec<NoteTag> {
        let mut tags: Vec<NoteTag> = Vec::new();
        for name in names {
            match self.catalog.tags.iter().find(|t| &t.name == name) {
                Some(tag) if !tags.iter().any(|t| t.name == tag.name) => tags.push(tag.into()),
                Some(_) => {}
                None => debug!("Ignoring unknown tag {:?}", name),
            }
        }
        tags
    }

    fn note_index(&self, id: &str) -> StoreResult<usize> {
        self.catalog
            .notes
            .iter()
            .position(|n| n.id == id)
            .ok_or_else(|| StoreError::not_found("Note"))
    }

    fn folder_index(&self, id: &str) -> StoreResult<usize> {
        self.catalog
            .folders
            .iter()
            .position(|f| f.id == id)
            .ok_or_else(|| StoreError::not_found("Folder"))
    }

    fn with_note_count(&self, folder: &Folder) -> Folder {
        let note_count = self
            .catalog
            .notes
            .iter()
            .filter(|n| n.folder_id.as_deref() == Some(folder.id.as_str()))
            .count();
        Folder {
            note_count: note_count as u32,
            ..folder.clone()
        }
    }
}

impl NoteStore for LocalBackend {
    fn folders(&self) -> StoreResult<Vec<Folder>> {
        let mut folders: Vec<Folder> = self
            .catalog
            .folders
            .iter()
            .map(|f| self.with_note_count(f))
            .collect();
        folders.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(folders)
    }

    fn create_folder(&mut self, name: &str) -> StoreResult<Folder> {
        require_non_blank("name", name)?;
        let folder = Folder {
            id: Uuid::new_v4().to_string(),
            name: name.trim().to_string(),
            created_at: Some(Utc::now()),
            note_count: 0,
        };
        self.catalog.folders.push(folder.clone());
        self.save_catalog()?;
        info!("Created folder {:?} ({})", folder.name, folder.id);
        Ok(folder)
    }

    fn rename_folder(&mut self, id: &str, name: &str) -> StoreResult<Folder> {
        require_non_blank("name", name)?;
        let idx = self.folder_index(id)?;
        self.catalog.folders[idx].name = name.trim().to_string();
        self.save_catalog()?;
        Ok(self.with_note_count(&self.catalog.folders[idx]))
    }

    fn delete_folder(&mut self, id: &str) -> StoreResult<()> {
        let idx = self.folder_index(id)?;
        self.catalog.folders.remove(idx);

        // Notes survive their folder
        for note in self
            .catalog
            .notes
            .iter_mut()
            .filter(|n| n.folder_id.as_deref() == Some(id))
        {
            note.folder_id = None;
        }

        self.save_catalog()?;
        info!("Deleted folder {}", id);
        Ok(())
    }

    fn tags(&self) -> StoreResult<Vec<Tag>> {
        let mut tags = self.catalog.tags.clone();
        tags.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(tags)
    }

    fn create_tag(&mut self, name: &str, color: &str) -> StoreResult<Tag> {
        require_non_blank("name", name)?;
        require_non_blank("color", color)?;
        let name = name.trim();
        if self.catalog.tags.iter().any(|t| t.name == name) {
            return Err(StoreError::Conflict(format!("tag {:?} already exists", name)));
        }
        let tag = self.push_tag(name, color.trim());
        self.save_catalog()?;
        Ok(tag)
    }

    fn notes(&self, filter: &NoteFilter) -> StoreResult<Vec<Note>> {
        let mut notes: Vec<Note> = self
            .catalog
            .notes
            .iter()
            .filter(|n| filter.matches(n))
            .cloned()
            .collect();
        notes.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        Ok(notes)
    }

    fn note(&self, id: &str) -> StoreResult<Note> {
        let idx = self.note_index(id)?;
        Ok(self.catalog.notes[idx].clone())
    }

    fn create_note(&mut self, draft: &NoteDraft) -> StoreResult<Note> {
        require_non_blank("title", &draft.title)?;

        let folder_id = draft.folder_id.clone().filter(|id| !id.is_empty());
        if let Some(folder_id) = &folder_id
            && self.folder_index(folder_id).is_err()
        {
            return Err(StoreError::validation(
                "folder_id",
                format!("unknown folder {}", folder_id),
            ));
        }

        let now = Utc::now();
        let note = Note {
            id: Uuid::new_v4().to_string(),
            title: draft.title.trim().to_string(),
            content: draft.content.clone(),
            note_type: draft.note_type,
            folder_id,
            created_at: now,
            updated_at: now,
            tags: self.resolve_tags(&draft.tag_names),
        };

        let appended = if note.note_type.is_versioned() {
            Some(self.append_version(&note.id, &note.content, INITIAL_VERSION_CHANGES, now)?)
        } else {
            None
        };

        self.catalog.notes.push(note.clone());
        if let Err(e) = self.save_catalog() {
            self.catalog.notes.pop();
            if let Some(version) = appended {
                self.drop_version(&note.id, version);
            }
            return Err(e);
        }
        info!("Created {} note {:?} ({})", note.note_type, note.title, note.id);
        Ok(note)
    }

    fn update_note(&mut self, id: &str, update: &NoteUpdate) -> StoreResult<Note> {
        let idx = self.note_index(id)?;
        if let Some(title) = &update.title {
            require_non_blank("title", title)?;
        }

        let now = Utc::now();
        let current = &self.catalog.notes[idx];
        let new_version = match &update.content {
            Some(content) if current.note_type.is_versioned() && *content != current.content => {
                Some(content.clone())
            }
            _ => None,
        };
        let appended = match &new_version {
            Some(content) => Some(self.append_version(id, content, CONTENT_EDITED_CHANGES, now)?),
            None => None,
        };

        let previous = self.catalog.notes[idx].clone();
        let tags = update.tag_names.as_ref().map(|names| self.resolve_tags(names));

        let note = &mut self.catalog.notes[idx];
        if let Some(title) = &update.title {
            note.title = title.trim().to_string();
        }
        if let Some(content) = &update.content {
            note.content = content.clone();
        }
        if let Some(tags) = tags {
            note.tags = tags;
        }
        if update.title.is_some() || update.content.is_some() {
            note.updated_at = now;
        }
        let note = note.clone();

        // history and catalog must agree on the latest content
        if let Err(e) = self.save_catalog() {
            self.catalog.notes[idx] = previous;
            if let Some(version) = appended {
                self.drop_version(id, version);
            }
            return Err(e);
        }
        Ok(note)
    }

    fn delete_note(&mut self, id: &str) -> StoreResult<()> {
        let idx = self.note_index(id)?;
        self.catalog.notes.remove(idx);

        // blobs may be shared with other notes, only the history goes
        let history_path = self.history_path(id);
        if history_path.exists()
            && let Err(e) = fs::remove_file(&history_path)
        {
            warn!("Failed to remove history {:?}: {}", history_path, e);
        }

        self.save_catalog()?;
        info!("Deleted note {}", id);
        Ok(())
    }

    fn history(&self, id: &str) -> StoreResult<Vec<Version>> {
        self.note_index(id)?;

        let mut entries = self.load_history_entries(id)?;
        entries.sort_by_key(|e| e.version);
        entries
            .into_iter()
            .map(|entry| {
                Ok(Version {
                    version: entry.version,
                    content: self.restore_blob(&entry.hash)?,
                    timestamp: entry.timestamp,
                    changes: entry.changes,
                })
            })
            .collect()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NoteType;

    fn setup_test_backend() -> (LocalBackend, PathBuf) {
        let test_dir = std::env::temp_dir().join(format!("test_notes_{}", Uuid::new_v4()));
        let mut backend = LocalBackend::with_dirs(&test_dir).unwrap();
        backend.catalog.folders.push(Folder {
            id: "work".to_string(),
            name: "Work".to_string(),
            created_at: None,
            note_count: 0,
        });
        backend.push_tag("react", "bg-blue-500");
        backend.push_tag("python", "bg-green-500");
        (backend, test_dir)
    }

    fn cleanup_test_dir(test_dir: &Path) {
        let _ = fs::remove_dir_all(test_dir);
    }

    fn draft(title: &str, content: &str, note_type: NoteType) -> NoteDraft {
        NoteDraft {
            title: title.to_string(),
            content: content.to_string(),
            note_type,
            folder_id: None,
            tag_names: Vec::new(),
        }
    }

    fn content_update(content: &str) -> NoteUpdate {
        NoteUpdate {
            content: Some(content.to_string()),
            ..NoteUpdate::default()
        }
    }

    #[test]
    fn test_hash_calculation() {
        let hash1 = LocalBackend::calculate_hash("Hello, World!");
        let hash2 = LocalBackend::calculate_hash("Hello, World!");
        let hash3 = LocalBackend::calculate_hash("Different content");

        assert_eq!(hash1, hash2, "Same content should produce same hash");
        assert_ne!(hash1, hash3, "Different content should produce different hash");
        assert_eq!(hash1.len(), 16, "Hash should be 16 hex characters");
    }

    #[test]
    fn test_code_note_history_is_contiguous() {
        let (mut backend, test_dir) = setup_test_backend();

        let note = backend
            .create_note(&draft("Setup", "npm install", NoteType::Code))
            .unwrap();
        backend.update_note(&note.id, &content_update("npm install axios")).unwrap();
        // unchanged content does not create a version
        backend.update_note(&note.id, &content_update("npm install axios")).unwrap();
        let updated = backend.update_note(&note.id, &content_update("npm ci")).unwrap();

        let history = backend.history(&note.id).unwrap();
        let versions: Vec<u32> = history.iter().map(|v| v.version).collect();
        assert_eq!(versions, vec![1, 2, 3]);
        assert_eq!(history[0].changes, INITIAL_VERSION_CHANGES);
        assert_eq!(history[1].changes, CONTENT_EDITED_CHANGES);
        assert_eq!(history[0].content, "npm install");
        // the note always matches its latest version
        assert_eq!(history.last().unwrap().content, updated.content);

        cleanup_test_dir(&test_dir);
    }

    #[test]
    fn test_non_code_notes_have_no_history() {
        let (mut backend, test_dir) = setup_test_backend();

        let note = backend
            .create_note(&draft("Groceries", "milk", NoteType::List))
            .unwrap();
        backend.update_note(&note.id, &content_update("milk\neggs")).unwrap();
        assert!(backend.history(&note.id).unwrap().is_empty());

        cleanup_test_dir(&test_dir);
    }

    #[test]
    fn test_blob_deduplication() {
        let (mut backend, test_dir) = setup_test_backend();

        let a = backend.create_note(&draft("A", "same body", NoteType::Code)).unwrap();
        let b = backend.create_note(&draft("B", "same body", NoteType::Code)).unwrap();
        let blobs = fs::read_dir(&backend.blobs_dir).unwrap().count();
        assert_eq!(blobs, 1, "Identical contents should share one blob");

        // deleting one note keeps the shared blob readable for the other
        backend.delete_note(&a.id).unwrap();
        assert_eq!(backend.history(&b.id).unwrap()[0].content, "same body");

        cleanup_test_dir(&test_dir);
    }

    #[test]
    fn test_missing_blob_is_reported() {
        let (mut backend, test_dir) = setup_test_backend();

        let note = backend.create_note(&draft("A", "body", NoteType::Code)).unwrap();
        let hash = LocalBackend::calculate_hash("body");
        fs::remove_file(backend.blobs_dir.join(&hash)).unwrap();
        assert!(matches!(
            backend.history(&note.id),
            Err(StoreError::InvalidHash(_))
        ));

        cleanup_test_dir(&test_dir);
    }

    #[test]
    fn test_update_fields_and_tags() {
        let (mut backend, test_dir) = setup_test_backend();

        let mut d = draft("Old", "body", NoteType::Text);
        d.tag_names = vec!["react".to_string(), "nope".to_string()];
        let note = backend.create_note(&d).unwrap();
        assert_eq!(note.tag_names(), vec!["react".to_string()]);

        let update = NoteUpdate {
            title: Some("New".to_string()),
            content: None,
            tag_names: Some(vec!["python".to_string()]),
        };
        let updated = backend.update_note(&note.id, &update).unwrap();
        assert_eq!(updated.title, "New");
        assert_eq!(updated.content, "body");
        assert_eq!(updated.tags[0].color, "bg-green-500");
        assert!(updated.updated_at >= note.updated_at);

        // tags alone leave updated_at alone
        let tags_only = NoteUpdate {
            tag_names: Some(Vec::new()),
            ..NoteUpdate::default()
        };
        let again = backend.update_note(&note.id, &tags_only).unwrap();
        assert!(again.tags.is_empty());
        assert_eq!(again.updated_at, updated.updated_at);

        cleanup_test_dir(&test_dir);
    }

    #[test]
    fn test_validation_and_not_found() {
        let (mut backend, test_dir) = setup_test_backend();

        assert!(matches!(
            backend.create_note(&draft("   ", "x", NoteType::Text)),
            Err(StoreError::Validation { .. })
        ));

        let mut d = draft("T", "x", NoteType::Text);
        d.folder_id = Some("nowhere".to_string());
        assert!(matches!(
            backend.create_note(&d),
            Err(StoreError::Validation { .. })
        ));

        assert!(backend.note("missing").unwrap_err().is_not_found());
        assert!(backend.history("missing").unwrap_err().is_not_found());
        assert!(
            backend
                .update_note("missing", &content_update("x"))
                .unwrap_err()
                .is_not_found()
        );
        assert!(backend.delete_note("missing").unwrap_err().is_not_found());
        assert!(backend.delete_folder("missing").unwrap_err().is_not_found());

        cleanup_test_dir(&test_dir);
    }

    #[test]
    fn test_filters_and_ordering() {
        let (mut backend, test_dir) = setup_test_backend();

        let mut d = draft("React hooks", "useState", NoteType::Text);
        d.folder_id = Some("work".to_string());
        d.tag_names = vec!["react".to_string()];
        let first = backend.create_note(&d).unwrap();
        backend
            .create_note(&draft("Pasta", "Boil WATER", NoteType::Text))
            .unwrap();
        backend
            .update_note(&first.id, &content_update("useEffect"))
            .unwrap();

        let all = backend.notes(&NoteFilter::default()).unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].id, first.id, "Most recently updated first");

        let by_search = backend
            .notes(&NoteFilter {
                search: Some("water".to_string()),
                ..NoteFilter::default()
            })
            .unwrap();
        assert_eq!(by_search.len(), 1);
        assert_eq!(by_search[0].title, "Pasta");

        let by_folder = backend
            .notes(&NoteFilter {
                folder_id: Some("work".to_string()),
                ..NoteFilter::default()
            })
            .unwrap();
        assert_eq!(by_folder.len(), 1);

        let by_tag = backend
            .notes(&NoteFilter {
                tag: Some("react".to_string()),
                ..NoteFilter::default()
            })
            .unwrap();
        assert_eq!(by_tag[0].id, first.id);

        cleanup_test_dir(&test_dir);
    }

    #[test]
    fn test_folders_and_tags() {
        let (mut backend, test_dir) = setup_test_backend();

        let archive = backend.create_folder("Archive").unwrap();
        let mut d = draft("T", "x", NoteType::Text);
        d.folder_id = Some(archive.id.clone());
        let note = backend.create_note(&d).unwrap();

        let folders = backend.folders().unwrap();
        let names: Vec<&str> = folders.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["Archive", "Work"]);
        assert_eq!(folders[0].note_count, 1);

        let renamed = backend.rename_folder(&archive.id, "Old stuff").unwrap();
        assert_eq!(renamed.name, "Old stuff");
        assert_eq!(renamed.note_count, 1);

        backend.delete_folder(&archive.id).unwrap();
        assert_eq!(backend.note(&note.id).unwrap().folder_id, None);

        let tag = backend.create_tag("rust", "bg-orange-500").unwrap();
        assert_eq!(tag.id, 3);
        assert!(matches!(
            backend.create_tag("rust", "bg-red-500"),
            Err(StoreError::Conflict(_))
        ));
        let tag_names: Vec<String> = backend.tags().unwrap().into_iter().map(|t| t.name).collect();
        assert_eq!(tag_names, vec!["python", "react", "rust"]);

        cleanup_test_dir(&test_dir);
    }

    #[test]
    fn test_catalog_survives_reopen() {
        let test_dir = std::env::temp_dir().join(format!("test_notes_{}", Uuid::new_v4()));

        let seeded_notes = {
            let backend = LocalBackend::open(&test_dir).unwrap();
            let notes = backend.notes(&NoteFilter::default()).unwrap();
            assert_eq!(backend.folders().unwrap().len(), seed::FOLDERS.len());
            assert_eq!(backend.tags().unwrap().len(), seed::TAGS.len());

            let code = notes
                .iter()
                .find(|n| n.title == "React environment setup")
                .unwrap();
            let history = backend.history(&code.id).unwrap();
            assert_eq!(history.len(), 3);
            assert_eq!(history[2].content, code.content);
            notes.len()
        };

        let mut reopened = LocalBackend::open(&test_dir).unwrap();
        assert_eq!(
            reopened.notes(&NoteFilter::default()).unwrap().len(),
            seeded_notes
        );
        // tag ids keep counting after a reload
        let tag = reopened.create_tag("rust", "bg-orange-500").unwrap();
        assert_eq!(tag.id, seed::TAGS.len() as i64 + 1);

        cleanup_test_dir(&test_dir);
    }

    #[test]
    fn test_failed_catalog_write_rolls_back_version() {
        let (mut backend, test_dir) = setup_test_backend();
        let note = backend
            .create_note(&draft("Script", "v1", NoteType::Code))
            .unwrap();

        // a non-empty directory where the catalog goes makes the rename fail
        let catalog_path = backend.catalog_path();
        let _ = fs::remove_file(&catalog_path);
        fs::create_dir_all(catalog_path.join("blocker")).unwrap();

        assert!(backend.update_note(&note.id, &content_update("v2")).is_err());
        let history = backend.history(&note.id).unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(backend.note(&note.id).unwrap().content, "v1");
        assert_eq!(history[0].content, "v1");

        let before = backend.notes(&NoteFilter::default()).unwrap().len();
        assert!(
            backend
                .create_note(&draft("Other", "x", NoteType::Code))
                .is_err()
        );
        assert_eq!(backend.notes(&NoteFilter::default()).unwrap().len(), before);
        // only the first note still has a history file
        assert_eq!(fs::read_dir(&backend.history_dir).unwrap().count(), 1);

        cleanup_test_dir(&test_dir);
    }
}
