//! Folder sidebar, note list and note detail.

use super::editor::{Editor, EditorAction};
use super::note_dialog::NoteDialog;
use super::note_list;
use super::sidebar::{Sidebar, SidebarAction};
use crate::messages::{Snapshot, StoreRequest};
use crate::models::{Note, NoteFilter};
use egui::{Context, Ui};

pub enum DashboardAction {
    GoHome,
    /// Forward to the store worker
    Request(StoreRequest),
    /// The filter changed, reload the list
    Refresh(NoteFilter),
    OpenHistory { note_id: String, title: String },
    /// A note was opened, for the recent list
    Opened(String),
}

#[derive(Default)]
pub struct Dashboard {
    filter: NoteFilter,
    search: String,
    selected: Option<String>,
    sidebar: Sidebar,
    editor: Editor,
    dialog: NoteDialog,
}

impl Dashboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn filter(&self) -> &NoteFilter {
        &self.filter
    }

    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    /// Select a note, clearing filters that would hide it
    pub fn select(&mut self, note_id: Option<String>) {
        if note_id.is_some() && note_id != self.selected {
            self.filter = NoteFilter::default();
            self.search.clear();
        }
        self.selected = note_id;
    }

    pub fn note_saved(&mut self, note: &Note) {
        self.editor.saved(note);
    }

    /// A note or folder went away
    pub fn forget_note(&mut self, note_id: &str) {
        if self.selected.as_deref() == Some(note_id) {
            self.selected = None;
            self.editor.clear();
        }
    }

    pub fn forget_folder(&mut self, folder_id: &str) {
        if self.filter.folder_id.as_deref() == Some(folder_id) {
            self.filter.folder_id = None;
        }
    }

    fn apply_search(&mut self) -> NoteFilter {
        let term = self.search.trim();
        self.filter.search = (!term.is_empty()).then(|| term.to_string());
        self.filter.clone()
    }

    pub fn show(&mut self, ctx: &Context, data: &Snapshot) -> Vec<DashboardAction> {
        let mut actions = Vec::new();

        egui::SidePanel::left("dashboard_sidebar")
            .resizable(true)
            .default_width(220.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical()
                    .id_salt("dashboard_sidebar_scroll")
                    .show(ui, |ui| {
                        let action = self.sidebar.show(
                            ui,
                            &data.folders,
                            &data.tags,
                            data.total_notes,
                            &self.filter,
                        );
                        if let Some(action) = action {
                            actions.push(self.sidebar_action(action));
                        }
                    });
            });

        egui::SidePanel::left("dashboard_note_list")
            .resizable(true)
            .default_width(320.0)
            .show(ctx, |ui| {
                self.list_header(ui, &mut actions);
                ui.separator();
                if let Some(id) = note_list::show(ui, &data.notes, self.selected.as_deref()) {
                    actions.push(DashboardAction::Opened(id.clone()));
                    self.selected = Some(id);
                }
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            let note = self
                .selected
                .as_ref()
                .and_then(|id| data.notes.iter().find(|n| &n.id == id));
            match note {
                Some(note) => {
                    self.editor.load(note);
                    if let Some(action) = self.editor.show(ui, note, &data.tags) {
                        actions.push(editor_action(note, action));
                    }
                }
                None => {
                    ui.vertical_centered(|ui| {
                        ui.add_space(120.0);
                        ui.heading("📝");
                        ui.label("Select a note or create a new one");
                    });
                }
            }
        });

        if let Some(draft) = self.dialog.show(ctx, &data.folders, &data.tags) {
            actions.push(DashboardAction::Request(StoreRequest::CreateNote(draft)));
        }

        actions
    }

    fn list_header(&mut self, ui: &mut Ui, actions: &mut Vec<DashboardAction>) {
        ui.horizontal(|ui| {
            if ui.button("🏠").on_hover_text("Home").clicked() {
                actions.push(DashboardAction::GoHome);
            }
            let response = ui.add(
                egui::TextEdit::singleline(&mut self.search)
                    .hint_text("🔍 Search notes...")
                    .desired_width(ui.available_width() - 40.0),
            );
            if response.changed() {
                actions.push(DashboardAction::Refresh(self.apply_search()));
            }
            if ui.button("➕").on_hover_text("New note").clicked() {
                self.dialog.open(self.filter.folder_id.clone());
            }
        });
    }

    fn sidebar_action(&mut self, action: SidebarAction) -> DashboardAction {
        match action {
            SidebarAction::SelectFolder(folder_id) => {
                self.filter.folder_id = folder_id;
                DashboardAction::Refresh(self.apply_search())
            }
            SidebarAction::SelectTag(tag) => {
                self.filter.tag = tag;
                DashboardAction::Refresh(self.apply_search())
            }
            SidebarAction::CreateFolder(name) => {
                DashboardAction::Request(StoreRequest::CreateFolder(name))
            }
            SidebarAction::RenameFolder { id, name } => {
                DashboardAction::Request(StoreRequest::RenameFolder { id, name })
            }
            SidebarAction::DeleteFolder(id) => {
                DashboardAction::Request(StoreRequest::DeleteFolder(id))
            }
            SidebarAction::CreateTag { name, color } => {
                DashboardAction::Request(StoreRequest::CreateTag { name, color })
            }
        }
    }
}

fn editor_action(note: &Note, action: EditorAction) -> DashboardAction {
    match action {
        EditorAction::Save(update) => DashboardAction::Request(StoreRequest::UpdateNote {
            id: note.id.clone(),
            update,
        }),
        EditorAction::Delete => DashboardAction::Request(StoreRequest::DeleteNote(note.id.clone())),
        EditorAction::ShowHistory => DashboardAction::OpenHistory {
            note_id: note.id.clone(),
            title: note.title.clone(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn folder_selection_keeps_search_and_tag() {
        let mut dashboard = Dashboard::new();
        dashboard.search = " rust ".to_string();
        dashboard.filter.tag = Some("python".to_string());

        match dashboard.sidebar_action(SidebarAction::SelectFolder(Some("work".to_string()))) {
            DashboardAction::Refresh(filter) => {
                assert_eq!(filter.folder_id.as_deref(), Some("work"));
                assert_eq!(filter.tag.as_deref(), Some("python"));
                assert_eq!(filter.search.as_deref(), Some("rust"));
            }
            _ => panic!("expected a refresh"),
        }
    }

    #[test]
    fn opening_a_note_clears_filters() {
        let mut dashboard = Dashboard::new();
        dashboard.filter.folder_id = Some("work".to_string());
        dashboard.search = "x".to_string();

        dashboard.select(Some("n1".to_string()));
        assert_eq!(dashboard.selected(), Some("n1"));
        assert!(dashboard.filter().is_empty());
        assert!(dashboard.search.is_empty());
    }

    #[test]
    fn deleted_folder_drops_out_of_filter() {
        let mut dashboard = Dashboard::new();
        dashboard.filter.folder_id = Some("work".to_string());
        dashboard.forget_folder("personal");
        assert_eq!(dashboard.filter().folder_id.as_deref(), Some("work"));
        dashboard.forget_folder("work");
        assert_eq!(dashboard.filter().folder_id, None);
    }
}
