use egui::{Align, Layout, Ui};

pub enum TitleBarAction {
    Home,
    Dashboard,
    Refresh,
    OpenRecent(String),
    ToggleTheme,
}

pub struct TitleBar;

pub struct TitleBarState<'a> {
    pub title: &'a str,
    pub on_home: bool,
    /// Where notes come from, e.g. "Local" or the API URL
    pub backend: &'a str,
    /// Requests still waiting for the worker
    pub pending: usize,
    /// (note id, title) newest first
    pub recent_notes: &'a [(String, String)],
    pub dark_mode: bool,
}

impl TitleBar {
    pub fn show(ui: &mut Ui, state: TitleBarState<'_>) -> Option<TitleBarAction> {
        let TitleBarState {
            title,
            on_home,
            backend,
            pending,
            recent_notes,
            dark_mode,
        } = state;

        let mut action = None;

        ui.horizontal(|ui| {
            ui.with_layout(Layout::left_to_right(Align::Center), |ui| {
                ui.strong(title);
                ui.add_space(16.0);

                if ui.selectable_label(on_home, "🏠 Home").clicked() {
                    action = Some(TitleBarAction::Home);
                }
                if ui.selectable_label(!on_home, "📂 Dashboard").clicked() {
                    action = Some(TitleBarAction::Dashboard);
                }

                ui.menu_button("🕒 Recent", |ui| {
                    if recent_notes.is_empty() {
                        ui.label("No recent notes");
                    }
                    for (id, note_title) in recent_notes {
                        if ui.button(note_title).clicked() {
                            action = Some(TitleBarAction::OpenRecent(id.clone()));
                            ui.close();
                        }
                    }
                });
            });

            ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                ui.spacing_mut().item_spacing.x = 8.0;

                let theme_icon = if dark_mode { "☀" } else { "🌙" };
                if ui.button(theme_icon).on_hover_text("Toggle theme").clicked() {
                    action = Some(TitleBarAction::ToggleTheme);
                }
                if ui.button("🔄").on_hover_text("Refresh").clicked() {
                    action = Some(TitleBarAction::Refresh);
                }
                if pending > 0 {
                    ui.spinner();
                }
                ui.label(egui::RichText::new(backend).small().weak());
            });
        });

        action
    }
}
