use crate::models::{Folder, NoteFilter, Tag};
use crate::style::{TAG_PALETTE, tag_color};
use egui::{RichText, Ui};

pub enum SidebarAction {
    SelectFolder(Option<String>),
    SelectTag(Option<String>),
    CreateFolder(String),
    RenameFolder { id: String, name: String },
    DeleteFolder(String),
    CreateTag { name: String, color: String },
}

/// Folder and tag navigation on the dashboard
pub struct Sidebar {
    new_folder: String,
    renaming: Option<(String, String)>, // folder id, edited name
    new_tag: String,
    new_tag_color: String,
}

impl Default for Sidebar {
    fn default() -> Self {
        Self {
            new_folder: String::new(),
            renaming: None,
            new_tag: String::new(),
            new_tag_color: TAG_PALETTE[0].to_string(),
        }
    }
}

impl Sidebar {
    pub fn show(
        &mut self,
        ui: &mut Ui,
        folders: &[Folder],
        tags: &[Tag],
        total_notes: usize,
        filter: &NoteFilter,
    ) -> Option<SidebarAction> {
        let mut action = None;

        ui.heading("Folders");
        let all_selected = filter.folder_id.is_none();
        if ui
            .selectable_label(all_selected, format!("📚 All notes ({})", total_notes))
            .clicked()
        {
            action = Some(SidebarAction::SelectFolder(None));
        }

        for folder in folders {
            let selected = filter.folder_id.as_deref() == Some(folder.id.as_str());
            if let Some((id, name)) = &mut self.renaming
                && id == &folder.id
            {
                let mut finished = false;
                ui.horizontal(|ui| {
                    let response = ui.add(egui::TextEdit::singleline(name).desired_width(120.0));
                    let enter = response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
                    if (ui.small_button("✔").clicked() || enter) && !name.trim().is_empty() {
                        action = Some(SidebarAction::RenameFolder {
                            id: id.clone(),
                            name: name.trim().to_string(),
                        });
                        finished = true;
                    }
                    if ui.small_button("✖").clicked() {
                        finished = true;
                    }
                });
                if finished {
                    self.renaming = None;
                }
                continue;
            }

            let response =
                ui.selectable_label(selected, format!("📁 {} ({})", folder.name, folder.note_count));
            if response.clicked() {
                action = Some(SidebarAction::SelectFolder(Some(folder.id.clone())));
            }
            response.context_menu(|ui| {
                if ui.button("Rename").clicked() {
                    self.renaming = Some((folder.id.clone(), folder.name.clone()));
                    ui.close();
                }
                if ui.button("Delete").clicked() {
                    action = Some(SidebarAction::DeleteFolder(folder.id.clone()));
                    ui.close();
                }
            });
        }

        ui.horizontal(|ui| {
            ui.add(
                egui::TextEdit::singleline(&mut self.new_folder)
                    .hint_text("New folder")
                    .desired_width(120.0),
            );
            if ui.small_button("➕").clicked() && !self.new_folder.trim().is_empty() {
                action = Some(SidebarAction::CreateFolder(
                    self.new_folder.trim().to_string(),
                ));
                self.new_folder.clear();
            }
        });

        ui.separator();
        ui.heading("Tags");
        ui.horizontal_wrapped(|ui| {
            for tag in tags {
                let selected = filter.tag.as_deref() == Some(tag.name.as_str());
                let text = RichText::new(format!("● {}", tag.name)).color(tag_color(&tag.color));
                if ui.selectable_label(selected, text).clicked() {
                    let next = if selected { None } else { Some(tag.name.clone()) };
                    action = Some(SidebarAction::SelectTag(next));
                }
            }
        });

        ui.horizontal(|ui| {
            ui.add(
                egui::TextEdit::singleline(&mut self.new_tag)
                    .hint_text("New tag")
                    .desired_width(90.0),
            );
            egui::ComboBox::from_id_salt("new_tag_color")
                .width(30.0)
                .selected_text(RichText::new("●").color(tag_color(&self.new_tag_color)))
                .show_ui(ui, |ui| {
                    for token in TAG_PALETTE {
                        ui.selectable_value(
                            &mut self.new_tag_color,
                            token.to_string(),
                            RichText::new(format!("● {}", token)).color(tag_color(token)),
                        );
                    }
                });
            if ui.small_button("➕").clicked() && !self.new_tag.trim().is_empty() {
                action = Some(SidebarAction::CreateTag {
                    name: self.new_tag.trim().to_string(),
                    color: self.new_tag_color.clone(),
                });
                self.new_tag.clear();
            }
        });

        action
    }
}
