mod diff;
mod selection;
mod stats;
mod types;
mod ui;
mod view;

use crate::models::Version;
use egui::{Context, Ui};

// Re-export public types
pub use diff::{inline_changes, line_diff};
pub use selection::{Selection, VersionNumber};
pub use stats::{DiffStats, calculate_stats};
pub use types::{CompareSlot, DiffEntry, DiffKind, InlineSpan};
pub use view::{HistoryContent, HistoryViewer, VersionRow, format_timestamp};

/// Window wrapping a [`HistoryViewer`] for the selected code note
#[derive(Default)]
pub struct HistoryWindow {
    open: bool,
    loading: bool,
    /// Note whose history was last asked for
    requested: Option<String>,
    title: String,
    viewer: HistoryViewer,
}

impl HistoryWindow {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open for a note while its history is being fetched
    pub fn open_for(&mut self, note_id: &str, note_title: &str) {
        self.open = true;
        self.title = note_title.to_string();
        self.requested = Some(note_id.to_string());
        if self.viewer.note_id() != Some(note_id) {
            self.viewer.clear();
            self.loading = true;
        }
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn close(&mut self) {
        self.open = false;
    }

    pub fn note_id(&self) -> Option<&str> {
        self.viewer.note_id()
    }

    /// Apply a loaded history; replies for a note no longer requested are dropped
    pub fn set_history(&mut self, note_id: &str, history: Vec<Version>) {
        if self.requested.as_deref() != Some(note_id) {
            tracing::debug!("Dropping stale history for note {}", note_id);
            return;
        }
        self.loading = false;
        self.viewer.set_history(note_id, history);
    }

    /// The note went away; drop everything we showed for it
    pub fn forget(&mut self, note_id: &str) {
        if self.requested.as_deref() == Some(note_id) {
            self.requested = None;
            self.loading = false;
            self.open = false;
        }
        if self.viewer.note_id() == Some(note_id) {
            self.viewer.clear();
        }
    }

    pub fn show(&mut self, ctx: &Context) {
        if !self.open {
            return;
        }

        let mut open = self.open;
        egui::Window::new(format!("📜 History: {}", self.title))
            .id(egui::Id::new("history_window"))
            .open(&mut open)
            .resizable(true)
            .collapsible(false)
            .default_size([900.0, 520.0])
            .show(ctx, |ui| {
                self.show_content(ui);
            });
        self.open = open;
    }

    fn show_content(&mut self, ui: &mut Ui) {
        if self.loading {
            ui.vertical_centered(|ui| {
                ui.add_space(100.0);
                ui.heading("Loading history...");
                ui.add_space(10.0);
                ui.spinner();
            });
            return;
        }

        let mut clicked = None;
        let mut toggle = false;

        // Use SidePanel for better layout (left panel for versions)
        egui::SidePanel::left("version_list_panel")
            .resizable(true)
            .default_width(240.0)
            .show_inside(ui, |ui| {
                ui.horizontal(|ui| {
                    ui.strong(format!("Versions ({})", self.viewer.history().len()));
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui
                            .selectable_label(self.viewer.is_compare_mode(), "Compare")
                            .clicked()
                        {
                            toggle = true;
                        }
                    });
                });
                if self.viewer.is_compare_mode() {
                    ui.label(egui::RichText::new("Select two versions to compare").small());
                }
                ui.separator();

                egui::ScrollArea::vertical()
                    .id_salt("version_list_scroll")
                    .show(ui, |ui| {
                        clicked = ui::render_version_list(ui, &self.viewer.rows());
                    });
            });

        egui::CentralPanel::default().show_inside(ui, |ui| match self.viewer.content() {
            HistoryContent::Compare {
                first,
                second,
                diff,
                stats,
            } => ui::render_compare(ui, first, second, &diff, &stats),
            HistoryContent::Single(version) => {
                ui::render_single(ui, version, &format_timestamp(&version.timestamp))
            }
            HistoryContent::Empty => {
                ui.vertical_centered(|ui| {
                    ui.add_space(100.0);
                    ui.heading("📜");
                    ui.label("Select a version to view it");
                });
            }
        });

        if toggle {
            self.viewer.toggle_compare();
        }
        if let Some(version) = clicked {
            self.viewer.select(version);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn version(n: u32) -> Version {
        Version {
            version: n,
            content: format!("v{n}"),
            timestamp: Utc::now(),
            changes: String::new(),
        }
    }

    #[test]
    fn open_for_other_note_waits_for_history() {
        let mut window = HistoryWindow::new();
        window.open_for("n1", "First");
        assert!(window.is_open());
        assert!(window.loading);

        window.set_history("n1", vec![version(1)]);
        assert!(!window.loading);

        // same note again: keep what we have while it refreshes
        window.open_for("n1", "First");
        assert!(!window.loading);

        window.open_for("n2", "Second");
        assert!(window.loading);
        assert_eq!(window.note_id(), None);
    }

    #[test]
    fn forget_closes_window_for_deleted_note() {
        let mut window = HistoryWindow::new();
        window.open_for("n1", "First");
        window.set_history("n1", vec![version(1), version(2)]);
        window.forget("n2");
        assert!(window.is_open());
        window.forget("n1");
        assert!(!window.is_open());
        assert_eq!(window.note_id(), None);
    }

    #[test]
    fn late_reply_for_previous_note_is_dropped() {
        let mut window = HistoryWindow::new();
        window.open_for("a", "Alpha");
        window.open_for("b", "Beta");

        window.set_history("a", vec![version(1)]);
        assert!(window.loading);
        assert_eq!(window.note_id(), None);

        // a failed reply for the old note leaves the new request alone
        window.forget("a");
        assert!(window.is_open());
        assert!(window.loading);

        window.set_history("b", vec![version(1), version(2)]);
        assert!(!window.loading);
        assert_eq!(window.note_id(), Some("b"));
    }
}
