//! Landing page: statistics, recent notes and notes grouped by folder.

use super::note_dialog::NoteDialog;
use super::widgets::note_card;
use crate::constant::{HOME_RECENT_LIMIT, PREVIEW_CHARS};
use crate::messages::Snapshot;
use crate::models::{Folder, Note, NoteDraft, NoteType, matches_search};
use egui::{Context, RichText, Ui};

pub enum HomeAction {
    /// Go to the dashboard, optionally with a note selected
    OpenDashboard { note: Option<String> },
    CreateNote(NoteDraft),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum HomeView {
    #[default]
    All,
    Recent,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HomeStats {
    pub total: usize,
    /// Count per type, in `NoteType::ALL` order
    pub by_type: Vec<(NoteType, usize)>,
    pub folders: usize,
}

impl HomeStats {
    pub fn collect(notes: &[Note], folders: &[Folder]) -> Self {
        Self {
            total: notes.len(),
            by_type: NoteType::ALL
                .iter()
                .map(|t| (*t, notes.iter().filter(|n| n.note_type == *t).count()))
                .collect(),
            folders: folders.len(),
        }
    }
}

/// Notes of one folder; `folder` is `None` for the unorganized group
pub struct FolderGroup<'a> {
    pub folder: Option<&'a Folder>,
    pub notes: Vec<&'a Note>,
}

impl FolderGroup<'_> {
    pub fn name(&self) -> &str {
        self.folder.map(|f| f.name.as_str()).unwrap_or("Unorganized")
    }
}

/// The `limit` most recently updated notes
pub fn recent_notes(notes: &[Note], limit: usize) -> Vec<&Note> {
    let mut recent: Vec<&Note> = notes.iter().collect();
    recent.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
    recent.truncate(limit);
    recent
}

/// Group notes by folder in folder order. Empty folders are skipped; notes
/// without a folder, or whose folder is unknown, end up in a trailing
/// unorganized group.
pub fn group_by_folder<'a>(notes: &[&'a Note], folders: &'a [Folder]) -> Vec<FolderGroup<'a>> {
    let mut groups: Vec<FolderGroup<'a>> = folders
        .iter()
        .map(|folder| FolderGroup {
            folder: Some(folder),
            notes: notes
                .iter()
                .copied()
                .filter(|n| n.folder_id.as_deref() == Some(folder.id.as_str()))
                .collect(),
        })
        .filter(|g| !g.notes.is_empty())
        .collect();

    let unorganized: Vec<&Note> = notes
        .iter()
        .copied()
        .filter(|n| match &n.folder_id {
            Some(id) => !folders.iter().any(|f| &f.id == id),
            None => true,
        })
        .collect();
    if !unorganized.is_empty() {
        groups.push(FolderGroup {
            folder: None,
            notes: unorganized,
        });
    }
    groups
}

#[derive(Default)]
pub struct HomePage {
    search: String,
    view: HomeView,
    dialog: NoteDialog,
}

impl HomePage {
    pub fn new() -> Self {
        Self::default()
    }

    fn visible<'a>(&self, notes: &'a [Note]) -> Vec<&'a Note> {
        let term = self.search.trim();
        let matching: Vec<&Note> = notes
            .iter()
            .filter(|n| term.is_empty() || matches_search(n, term))
            .collect();
        match self.view {
            HomeView::All => matching,
            HomeView::Recent => {
                let mut recent = matching;
                recent.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
                recent.truncate(HOME_RECENT_LIMIT);
                recent
            }
        }
    }

    pub fn show(&mut self, ctx: &Context, data: &Snapshot) -> Option<HomeAction> {
        let mut action = None;

        egui::CentralPanel::default().show(ctx, |ui| {
            self.header(ui, &mut action);
            ui.separator();

            egui::ScrollArea::vertical()
                .id_salt("home_scroll")
                .show(ui, |ui| {
                    stats_row(ui, &HomeStats::collect(&data.notes, &data.folders));
                    ui.add_space(12.0);

                    if self.search.trim().is_empty() && self.view == HomeView::All {
                        ui.heading("Recent");
                        note_grid(ui, &recent_notes(&data.notes, HOME_RECENT_LIMIT), &mut action);
                        ui.add_space(12.0);
                    }

                    let visible = self.visible(&data.notes);
                    if visible.is_empty() {
                        ui.vertical_centered(|ui| {
                            ui.add_space(40.0);
                            ui.label("No notes found");
                        });
                        return;
                    }

                    match self.view {
                        HomeView::All => {
                            for group in group_by_folder(&visible, &data.folders) {
                                ui.heading(format!("📁 {} ({})", group.name(), group.notes.len()));
                                note_grid(ui, &group.notes, &mut action);
                                ui.add_space(8.0);
                            }
                        }
                        HomeView::Recent => note_grid(ui, &visible, &mut action),
                    }
                });
        });

        if let Some(draft) = self.dialog.show(ctx, &data.folders, &data.tags) {
            action = Some(HomeAction::CreateNote(draft));
        }

        action
    }

    fn header(&mut self, ui: &mut Ui, action: &mut Option<HomeAction>) {
        ui.horizontal(|ui| {
            ui.heading("📝 My notes");
            ui.add_space(16.0);
            ui.add(
                egui::TextEdit::singleline(&mut self.search)
                    .hint_text("🔍 Search notes...")
                    .desired_width(240.0),
            );
            ui.selectable_value(&mut self.view, HomeView::All, "All");
            ui.selectable_value(&mut self.view, HomeView::Recent, "Recent");

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui.button("📂 Dashboard").clicked() {
                    *action = Some(HomeAction::OpenDashboard { note: None });
                }
                if ui.button("➕ New note").clicked() {
                    self.dialog.open(None);
                }
            });
        });
    }
}

fn stats_row(ui: &mut Ui, stats: &HomeStats) {
    ui.horizontal_wrapped(|ui| {
        stat_card(ui, "Notes", stats.total);
        for (note_type, count) in &stats.by_type {
            stat_card(ui, &format!("{} {}", note_type.icon(), note_type.label()), *count);
        }
        stat_card(ui, "📁 Folders", stats.folders);
    });
}

fn stat_card(ui: &mut Ui, label: &str, value: usize) {
    egui::Frame::group(ui.style()).show(ui, |ui| {
        ui.set_min_width(110.0);
        ui.vertical(|ui| {
            ui.label(RichText::new(value.to_string()).heading().strong());
            ui.label(RichText::new(label).small().weak());
        });
    });
}

fn note_grid(ui: &mut Ui, notes: &[&Note], action: &mut Option<HomeAction>) {
    let columns = ((ui.available_width() / 300.0).floor() as usize).clamp(1, 3);
    for row in notes.chunks(columns) {
        ui.columns(columns, |cols| {
            for (col, note) in cols.iter_mut().zip(row) {
                if note_card(col, note, PREVIEW_CHARS, false) {
                    *action = Some(HomeAction::OpenDashboard {
                        note: Some(note.id.clone()),
                    });
                }
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    fn note(id: &str, folder: Option<&str>, note_type: NoteType, age_mins: i64) -> Note {
        let at = Utc::now() - Duration::minutes(age_mins);
        Note {
            id: id.to_string(),
            title: format!("Note {id}"),
            content: String::new(),
            note_type,
            folder_id: folder.map(str::to_string),
            created_at: at,
            updated_at: at,
            tags: Vec::new(),
        }
    }

    fn folder(id: &str) -> Folder {
        Folder {
            id: id.to_string(),
            name: id.to_uppercase(),
            created_at: None,
            note_count: 0,
        }
    }

    #[test]
    fn stats_count_by_type() {
        let notes = vec![
            note("a", None, NoteType::Code, 1),
            note("b", None, NoteType::Code, 2),
            note("c", None, NoteType::List, 3),
        ];
        let stats = HomeStats::collect(&notes, &[folder("work")]);
        assert_eq!(stats.total, 3);
        assert_eq!(
            stats.by_type,
            vec![(NoteType::Text, 0), (NoteType::Code, 2), (NoteType::List, 1)]
        );
        assert_eq!(stats.folders, 1);
    }

    #[test]
    fn recent_notes_are_newest_first_and_limited() {
        let notes: Vec<Note> = (0..8)
            .map(|i| note(&i.to_string(), None, NoteType::Text, 10 - i))
            .collect();
        let recent = recent_notes(&notes, HOME_RECENT_LIMIT);
        assert_eq!(recent.len(), HOME_RECENT_LIMIT);
        assert_eq!(recent[0].id, "7");
        assert_eq!(recent[5].id, "2");
    }

    #[test]
    fn groups_follow_folder_order_with_unorganized_last() {
        let folders = vec![folder("personal"), folder("work"), folder("empty")];
        let notes = vec![
            note("a", Some("work"), NoteType::Text, 1),
            note("b", None, NoteType::Text, 2),
            note("c", Some("personal"), NoteType::Text, 3),
            note("d", Some("gone"), NoteType::Text, 4),
        ];
        let refs: Vec<&Note> = notes.iter().collect();
        let groups = group_by_folder(&refs, &folders);
        let names: Vec<&str> = groups.iter().map(|g| g.name()).collect();
        assert_eq!(names, vec!["PERSONAL", "WORK", "Unorganized"]);
        let orphans: Vec<&str> = groups[2].notes.iter().map(|n| n.id.as_str()).collect();
        assert_eq!(orphans, vec!["b", "d"]);
    }

    #[test]
    fn search_and_recent_view_narrow_the_list() {
        let mut notes: Vec<Note> = (0..8)
            .map(|i| note(&i.to_string(), None, NoteType::Text, 10 - i))
            .collect();
        notes[0].content = "needle".to_string();

        let mut page = HomePage::new();
        assert_eq!(page.visible(&notes).len(), 8);

        page.view = HomeView::Recent;
        assert_eq!(page.visible(&notes).len(), HOME_RECENT_LIMIT);

        page.view = HomeView::All;
        page.search = "NEEDLE".to_string();
        let found = page.visible(&notes);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, "0");
    }
}
