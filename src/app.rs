use crate::backend::NoteStore;
use crate::config::{BackendKind, Config};
use crate::constant::DEFAULT_WINDOW_TITLE;
use crate::messages::{ResponseMessage, Snapshot, StoreRequest};
use crate::models::NoteFilter;
use crate::notify::{Notifier, Toasts};
use crate::style::configure_style;
use crate::ui::dashboard::{Dashboard, DashboardAction};
use crate::ui::history::HistoryWindow;
use crate::ui::home::{HomeAction, HomePage};
use crate::ui::title_bar::{TitleBar, TitleBarAction, TitleBarState};
use crate::worker::spawn_worker;
use std::sync::mpsc::{Receiver, Sender};
use tracing::{error, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Home,
    Dashboard,
}

pub struct NotesApp {
    config: Config,
    page: Page,
    home: HomePage,
    dashboard: Dashboard,
    history: HistoryWindow,
    toasts: Toasts,
    data: Snapshot,
    backend_label: String,
    store_sender: Sender<StoreRequest>,
    response_receiver: Receiver<ResponseMessage>,
    pending: usize,
}

impl NotesApp {
    pub fn new(cc: &eframe::CreationContext<'_>, config: Config, store: Box<dyn NoteStore>) -> Self {
        cc.egui_ctx.set_fonts(crate::ui::font::setup_fonts());
        configure_style(&cc.egui_ctx, &config.settings);
        Self::with_store(config, store, Some(cc.egui_ctx.clone()))
    }

    /// Build the app around `store`, which moves onto the worker thread
    pub fn with_store(
        config: Config,
        store: Box<dyn NoteStore>,
        repaint: Option<egui::Context>,
    ) -> Self {
        let backend_label = match config.backend() {
            BackendKind::Local => "Local".to_string(),
            BackendKind::Remote { api_url } => api_url,
        };
        let (store_sender, response_receiver) = spawn_worker(store, repaint);

        let mut app = Self {
            config,
            page: Page::Home,
            home: HomePage::new(),
            dashboard: Dashboard::new(),
            history: HistoryWindow::new(),
            toasts: Toasts::new(),
            data: Snapshot::default(),
            backend_label,
            store_sender,
            response_receiver,
            pending: 0,
        };
        app.refresh();
        app
    }

    fn send(&mut self, request: StoreRequest) {
        match self.store_sender.send(request) {
            Ok(()) => self.pending += 1,
            Err(e) => {
                error!("Failed to send store request: {}", e);
                self.toasts.error("Error", "The note store stopped");
            }
        }
    }

    /// Reload the list for the current page
    fn refresh(&mut self) {
        let filter = match self.page {
            Page::Home => NoteFilter::default(),
            Page::Dashboard => self.dashboard.filter().clone(),
        };
        self.send(StoreRequest::Refresh(filter));
    }

    fn navigate(&mut self, page: Page) {
        if self.page != page {
            self.page = page;
            self.refresh();
        }
    }

    fn open_note(&mut self, note_id: Option<String>) {
        if let Some(id) = &note_id {
            self.config.add_recent_note(id);
        }
        self.dashboard.select(note_id);
        self.page = Page::Dashboard;
        self.refresh();
    }

    fn open_history(&mut self, note_id: &str, title: &str) {
        self.history.open_for(note_id, title);
        self.send(StoreRequest::LoadHistory(note_id.to_string()));
    }

    fn handle_response(&mut self, response: ResponseMessage) {
        self.pending = self.pending.saturating_sub(1);

        match response {
            ResponseMessage::Refreshed(Ok(data)) => {
                self.data = data;
            }
            ResponseMessage::Refreshed(Err(e)) => {
                self.toasts.error("Error loading notes", &e);
            }
            ResponseMessage::NoteCreated(Ok(note)) => {
                info!("Created note {}", note.id);
                self.toasts.success("Note created", &note.title);
                self.open_note(Some(note.id));
            }
            ResponseMessage::NoteUpdated(Ok(note)) => {
                self.toasts.success("Note saved", &note.title);
                self.dashboard.note_saved(&note);
                // An open history window for this note picks up the new version
                if self.history.is_open() && self.history.note_id() == Some(note.id.as_str()) {
                    self.send(StoreRequest::LoadHistory(note.id.clone()));
                }
                self.refresh();
            }
            ResponseMessage::NoteDeleted(Ok(id)) => {
                self.toasts.success("Note deleted", "");
                self.dashboard.forget_note(&id);
                self.history.forget(&id);
                self.config.remove_recent_note(&id);
                self.refresh();
            }
            ResponseMessage::HistoryLoaded(id, Ok(history)) => {
                self.history.set_history(&id, history);
            }
            ResponseMessage::HistoryLoaded(id, Err(e)) => {
                self.history.forget(&id);
                self.toasts.error("Error loading history", &e);
            }
            ResponseMessage::FolderSaved(Ok(folder)) => {
                self.toasts.success("Folder saved", &folder.name);
                self.refresh();
            }
            ResponseMessage::FolderDeleted(Ok(id)) => {
                self.toasts.success("Folder deleted", "");
                self.dashboard.forget_folder(&id);
                self.refresh();
            }
            ResponseMessage::TagCreated(Ok(tag)) => {
                self.toasts.success("Tag created", &tag.name);
                self.refresh();
            }
            ResponseMessage::NoteCreated(Err(e)) | ResponseMessage::NoteUpdated(Err(e)) => {
                self.toasts.error("Error saving note", &e);
            }
            ResponseMessage::NoteDeleted(Err(e)) => {
                self.toasts.error("Error deleting note", &e);
            }
            ResponseMessage::FolderSaved(Err(e)) | ResponseMessage::FolderDeleted(Err(e)) => {
                self.toasts.error("Error updating folder", &e);
            }
            ResponseMessage::TagCreated(Err(e)) => {
                self.toasts.error("Error creating tag", &e);
            }
        }
    }

    /// Titles for the recent notes menu; ids we cannot resolve are skipped
    fn recent_notes(&self) -> Vec<(String, String)> {
        self.config
            .settings
            .recent_notes
            .iter()
            .filter_map(|id| {
                self.data
                    .notes
                    .iter()
                    .find(|n| &n.id == id)
                    .map(|n| (n.id.clone(), n.title.clone()))
            })
            .collect()
    }

    fn toggle_theme(&mut self, ctx: &egui::Context) {
        self.config.settings.theme = if self.config.settings.theme == "dark" {
            "light".to_string()
        } else {
            "dark".to_string()
        };
        configure_style(ctx, &self.config.settings);
        if let Err(e) = self.config.save() {
            error!("Failed to save theme: {}", e);
        }
    }
}

impl eframe::App for NotesApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        while let Ok(response) = self.response_receiver.try_recv() {
            self.handle_response(response);
        }

        // Title Bar
        let recent_notes = self.recent_notes();
        let title_action = egui::TopBottomPanel::top("title_bar_panel")
            .show(ctx, |ui| {
                TitleBar::show(
                    ui,
                    TitleBarState {
                        title: DEFAULT_WINDOW_TITLE,
                        on_home: self.page == Page::Home,
                        backend: &self.backend_label,
                        pending: self.pending,
                        recent_notes: &recent_notes,
                        dark_mode: ctx.style().visuals.dark_mode,
                    },
                )
            })
            .inner;

        match title_action {
            Some(TitleBarAction::Home) => self.navigate(Page::Home),
            Some(TitleBarAction::Dashboard) => self.navigate(Page::Dashboard),
            Some(TitleBarAction::Refresh) => self.refresh(),
            Some(TitleBarAction::OpenRecent(id)) => self.open_note(Some(id)),
            Some(TitleBarAction::ToggleTheme) => self.toggle_theme(ctx),
            None => {}
        }

        match self.page {
            Page::Home => match self.home.show(ctx, &self.data) {
                Some(HomeAction::OpenDashboard { note }) => self.open_note(note),
                Some(HomeAction::CreateNote(draft)) => self.send(StoreRequest::CreateNote(draft)),
                None => {}
            },
            Page::Dashboard => {
                for action in self.dashboard.show(ctx, &self.data) {
                    match action {
                        DashboardAction::GoHome => self.navigate(Page::Home),
                        DashboardAction::Request(request) => self.send(request),
                        DashboardAction::Refresh(filter) => {
                            self.send(StoreRequest::Refresh(filter))
                        }
                        DashboardAction::OpenHistory { note_id, title } => {
                            self.open_history(&note_id, &title)
                        }
                        DashboardAction::Opened(id) => self.config.add_recent_note(&id),
                    }
                }
            }
        }

        self.history.show(ctx);
        self.toasts.show(ctx);
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        if let Err(e) = self.config.save() {
            error!("Failed to save config on exit: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::LocalBackend;
    use crate::config::Settings;
    use std::path::PathBuf;
    use std::time::Duration;
    use uuid::Uuid;

    fn setup_app() -> (NotesApp, PathBuf) {
        let test_dir = std::env::temp_dir().join(format!("test_app_{}", Uuid::new_v4()));
        let store = LocalBackend::open(&test_dir).unwrap();
        let config = Config {
            settings: Settings::default(),
        };
        (NotesApp::with_store(config, Box::new(store), None), test_dir)
    }

    /// Feed worker responses back until nothing is pending
    fn settle(app: &mut NotesApp) {
        while app.pending > 0 {
            let response = app
                .response_receiver
                .recv_timeout(Duration::from_secs(5))
                .unwrap();
            app.handle_response(response);
        }
    }

    #[test]
    fn startup_loads_seeded_notes() {
        let (mut app, test_dir) = setup_app();
        settle(&mut app);
        assert!(!app.data.notes.is_empty());
        assert_eq!(app.data.total_notes, app.data.notes.len());
        assert!(app.toasts.is_empty());
        let _ = std::fs::remove_dir_all(&test_dir);
    }

    #[test]
    fn history_window_follows_note_lifecycle() {
        let (mut app, test_dir) = setup_app();
        settle(&mut app);

        let note = app
            .data
            .notes
            .iter()
            .find(|n| n.note_type.is_versioned())
            .cloned()
            .unwrap();
        app.open_history(&note.id, &note.title);
        settle(&mut app);
        assert!(app.history.is_open());
        assert_eq!(app.history.note_id(), Some(note.id.as_str()));

        app.send(StoreRequest::DeleteNote(note.id.clone()));
        settle(&mut app);
        assert!(!app.history.is_open());
        assert!(app.data.notes.iter().all(|n| n.id != note.id));
        let _ = std::fs::remove_dir_all(&test_dir);
    }

    #[test]
    fn failures_become_error_toasts() {
        let (mut app, test_dir) = setup_app();
        settle(&mut app);

        app.send(StoreRequest::DeleteFolder("missing".to_string()));
        settle(&mut app);
        assert_eq!(app.toasts.len(), 1);
        let _ = std::fs::remove_dir_all(&test_dir);
    }
}
