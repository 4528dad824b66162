//! What the history window shows, independent of how egui draws it.

use super::diff::line_diff;
use super::selection::{Selection, VersionNumber};
use super::stats::{DiffStats, calculate_stats};
use super::types::{CompareSlot, DiffEntry};
use crate::constant::TIMESTAMP_FMT;
use crate::models::Version;
use chrono::{DateTime, Local, Utc};

/// One line of the version list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionRow {
    pub version: VersionNumber,
    pub changes: String,
    pub timestamp: String,
    pub selected: bool,
    pub slot: Option<CompareSlot>,
}

/// Main area of the history window
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HistoryContent<'a> {
    /// Nothing to show yet; a placeholder, never an error
    Empty,
    Single(&'a Version),
    Compare {
        first: &'a Version,
        second: &'a Version,
        diff: Vec<DiffEntry>,
        stats: DiffStats,
    },
}

/// Versions of one note plus the private selection over them
#[derive(Debug, Clone, Default)]
pub struct HistoryViewer {
    note_id: Option<String>,
    history: Vec<Version>,
    selection: Selection,
}

impl HistoryViewer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Supply the history of a note.
    ///
    /// A different note starts from a clean selection. A refreshed history of
    /// the same note keeps the selection minus versions that disappeared.
    pub fn set_history(&mut self, note_id: &str, mut history: Vec<Version>) {
        history.sort_by_key(|v| v.version);

        if self.note_id.as_deref() == Some(note_id) {
            let selection = std::mem::take(&mut self.selection);
            self.selection = selection.retain(|v| history.iter().any(|h| h.version == v));
        } else {
            self.note_id = Some(note_id.to_string());
            self.selection = Selection::Idle;
        }
        self.history = history;
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn note_id(&self) -> Option<&str> {
        self.note_id.as_deref()
    }

    pub fn history(&self) -> &[Version] {
        &self.history
    }

    pub fn selection(&self) -> Selection {
        self.selection
    }

    pub fn is_compare_mode(&self) -> bool {
        self.selection.is_compare_mode()
    }

    pub fn toggle_compare(&mut self) {
        self.selection = self.selection.toggle_compare();
    }

    pub fn select(&mut self, version: VersionNumber) {
        if self.find(version).is_some() {
            self.selection = self.selection.select(version);
        }
    }

    fn find(&self, version: VersionNumber) -> Option<&Version> {
        self.history.iter().find(|v| v.version == version)
    }

    /// All versions, newest first
    pub fn rows(&self) -> Vec<VersionRow> {
        self.history
            .iter()
            .rev()
            .map(|v| VersionRow {
                version: v.version,
                changes: v.changes.clone(),
                timestamp: format_timestamp(&v.timestamp),
                selected: self.selection.is_selected(v.version),
                slot: self.selection.slot_of(v.version),
            })
            .collect()
    }

    pub fn content(&self) -> HistoryContent<'_> {
        match self.selection {
            Selection::Single(v) => self
                .find(v)
                .map_or(HistoryContent::Empty, HistoryContent::Single),
            Selection::Ready { first, second } => match (self.find(first), self.find(second)) {
                (Some(first), Some(second)) => {
                    let diff = line_diff(&first.content, &second.content);
                    let stats = calculate_stats(&diff);
                    HistoryContent::Compare {
                        first,
                        second,
                        diff,
                        stats,
                    }
                }
                _ => HistoryContent::Empty,
            },
            Selection::Idle | Selection::Collecting { .. } => HistoryContent::Empty,
        }
    }
}

/// Local wall-clock rendering used across the app
pub fn format_timestamp(timestamp: &DateTime<Utc>) -> String {
    timestamp
        .with_timezone(&Local)
        .format(TIMESTAMP_FMT)
        .to_string()
}
