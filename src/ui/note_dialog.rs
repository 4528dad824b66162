use crate::models::{Folder, NoteDraft, NoteType, Tag};
use crate::style::tag_color;
use egui::{Context, RichText};

/// Modal form for a new note. `show` yields the draft once it is valid.
#[derive(Default)]
pub struct NoteDialog {
    open: bool,
    draft: NoteDraft,
    error: Option<String>,
}

impl NoteDialog {
    /// Open an empty form, preselecting `folder_id` when given
    pub fn open(&mut self, folder_id: Option<String>) {
        self.open = true;
        self.error = None;
        self.draft = NoteDraft {
            folder_id,
            ..NoteDraft::default()
        };
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Check the form, returning the draft to submit
    fn submit(&mut self) -> Option<NoteDraft> {
        if self.draft.title.trim().is_empty() {
            self.error = Some("Title is required".to_string());
            return None;
        }
        self.open = false;
        self.error = None;
        let mut draft = std::mem::take(&mut self.draft);
        draft.title = draft.title.trim().to_string();
        Some(draft)
    }

    pub fn show(&mut self, ctx: &Context, folders: &[Folder], tags: &[Tag]) -> Option<NoteDraft> {
        if !self.open {
            return None;
        }

        let mut submitted = None;
        let mut cancel = false;
        let mut open = self.open;

        egui::Window::new("New note")
            .id(egui::Id::new("note_dialog"))
            .open(&mut open)
            .collapsible(false)
            .resizable(true)
            .default_width(480.0)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                egui::Grid::new("note_dialog_grid")
                    .num_columns(2)
                    .spacing([12.0, 8.0])
                    .show(ui, |ui| {
                        ui.label("Title");
                        ui.text_edit_singleline(&mut self.draft.title);
                        ui.end_row();

                        ui.label("Type");
                        ui.horizontal(|ui| {
                            for note_type in NoteType::ALL {
                                ui.selectable_value(
                                    &mut self.draft.note_type,
                                    note_type,
                                    format!("{} {}", note_type.icon(), note_type.label()),
                                );
                            }
                        });
                        ui.end_row();

                        ui.label("Folder");
                        let selected = self
                            .draft
                            .folder_id
                            .as_ref()
                            .and_then(|id| folders.iter().find(|f| &f.id == id))
                            .map(|f| f.name.as_str())
                            .unwrap_or("No folder");
                        egui::ComboBox::from_id_salt("note_dialog_folder")
                            .selected_text(selected)
                            .show_ui(ui, |ui| {
                                ui.selectable_value(&mut self.draft.folder_id, None, "No folder");
                                for folder in folders {
                                    ui.selectable_value(
                                        &mut self.draft.folder_id,
                                        Some(folder.id.clone()),
                                        &folder.name,
                                    );
                                }
                            });
                        ui.end_row();

                        ui.label("Tags");
                        ui.horizontal_wrapped(|ui| {
                            for tag in tags {
                                let mut checked = self.draft.tag_names.contains(&tag.name);
                                let text = RichText::new(&tag.name).color(tag_color(&tag.color));
                                if ui.checkbox(&mut checked, text).changed() {
                                    if checked {
                                        self.draft.tag_names.push(tag.name.clone());
                                    } else {
                                        self.draft.tag_names.retain(|n| n != &tag.name);
                                    }
                                }
                            }
                        });
                        ui.end_row();
                    });

                ui.label("Content");
                let editor = egui::TextEdit::multiline(&mut self.draft.content)
                    .desired_width(f32::INFINITY)
                    .desired_rows(10);
                if self.draft.note_type == NoteType::Code {
                    ui.add(editor.code_editor());
                } else {
                    ui.add(editor);
                }

                if let Some(error) = &self.error {
                    ui.colored_label(ui.visuals().error_fg_color, error);
                }

                ui.horizontal(|ui| {
                    if ui.button("Create").clicked() {
                        submitted = self.submit();
                    }
                    if ui.button("Cancel").clicked() {
                        cancel = true;
                    }
                });
            });

        if cancel || !open {
            self.open = false;
        }
        submitted
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_title_keeps_dialog_open() {
        let mut dialog = NoteDialog::default();
        dialog.open(Some("work".to_string()));
        dialog.draft.title = "   ".to_string();
        assert!(dialog.submit().is_none());
        assert!(dialog.is_open());
        assert!(dialog.error.is_some());
    }

    #[test]
    fn submit_trims_title_and_closes() {
        let mut dialog = NoteDialog::default();
        dialog.open(Some("work".to_string()));
        dialog.draft.title = "  Plan ".to_string();
        let draft = dialog.submit().unwrap();
        assert_eq!(draft.title, "Plan");
        assert_eq!(draft.folder_id.as_deref(), Some("work"));
        assert!(!dialog.is_open());
    }
}
