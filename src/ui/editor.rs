use super::widgets::{format_date, tag_chip};
use crate::models::{Note, NoteType, NoteUpdate, Tag};
use crate::style::tag_color;
use egui::{RichText, Ui};

pub enum EditorAction {
    Save(NoteUpdate),
    Delete,
    ShowHistory,
}

/// Detail pane for the selected note, switching between view and edit mode
#[derive(Default)]
pub struct Editor {
    note_id: Option<String>,
    editing: bool,
    confirm_delete: bool,
    title: String,
    content: String,
    tag_names: Vec<String>,
}

impl Editor {
    /// Point the editor at `note`, called every frame. Mode and pending
    /// confirmation only reset when a different note comes in.
    pub fn load(&mut self, note: &Note) {
        if self.note_id.as_deref() == Some(note.id.as_str()) {
            if !self.editing {
                self.reset_fields(note);
            }
            return;
        }
        self.note_id = Some(note.id.clone());
        self.editing = false;
        self.confirm_delete = false;
        self.reset_fields(note);
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn is_editing(&self) -> bool {
        self.editing
    }

    fn reset_fields(&mut self, note: &Note) {
        self.title = note.title.clone();
        self.content = note.content.clone();
        self.tag_names = note.tag_names();
    }

    /// Only the fields that differ from `note`
    fn pending_update(&self, note: &Note) -> NoteUpdate {
        let mut tag_names = self.tag_names.clone();
        let mut current = note.tag_names();
        tag_names.sort();
        current.sort();
        NoteUpdate {
            title: (self.title.trim() != note.title).then(|| self.title.trim().to_string()),
            content: (self.content != note.content).then(|| self.content.clone()),
            tag_names: (tag_names != current).then(|| self.tag_names.clone()),
        }
    }

    /// Saved successfully; leave edit mode
    pub fn saved(&mut self, note: &Note) {
        if self.note_id.as_deref() == Some(note.id.as_str()) {
            self.editing = false;
            self.reset_fields(note);
        }
    }

    pub fn show(&mut self, ui: &mut Ui, note: &Note, tags: &[Tag]) -> Option<EditorAction> {
        let mut action = None;

        ui.horizontal(|ui| {
            if self.editing {
                ui.add(
                    egui::TextEdit::singleline(&mut self.title)
                        .font(egui::TextStyle::Heading)
                        .desired_width(ui.available_width() * 0.5),
                );
            } else {
                ui.heading(format!("{} {}", note.note_type.icon(), note.title));
            }

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if self.confirm_delete {
                    if ui.button("Cancel").clicked() {
                        self.confirm_delete = false;
                    }
                    if ui
                        .button(RichText::new("Delete").color(ui.visuals().error_fg_color))
                        .clicked()
                    {
                        self.confirm_delete = false;
                        action = Some(EditorAction::Delete);
                    }
                    ui.label("Delete this note?");
                    return;
                }

                if ui.button("🗑").on_hover_text("Delete").clicked() {
                    self.confirm_delete = true;
                }
                if self.editing {
                    if ui.button("Cancel").clicked() {
                        self.editing = false;
                        self.reset_fields(note);
                    }
                    if ui.button("💾 Save").clicked() {
                        if self.title.trim().is_empty() {
                            self.title = note.title.clone();
                        }
                        let update = self.pending_update(note);
                        if update.is_empty() {
                            self.editing = false;
                        } else {
                            action = Some(EditorAction::Save(update));
                        }
                    }
                } else if ui.button("✏ Edit").clicked() {
                    self.editing = true;
                    self.reset_fields(note);
                }
                if note.note_type.is_versioned()
                    && ui.button("📜 History").on_hover_text("Version history").clicked()
                {
                    action = Some(EditorAction::ShowHistory);
                }
            });
        });

        ui.horizontal(|ui| {
            ui.label(RichText::new(note.note_type.label()).small().strong());
            ui.label(RichText::new(format!("Updated {}", format_date(&note.updated_at))).small().weak());
            ui.label(RichText::new(format!("Created {}", format_date(&note.created_at))).small().weak());
        });

        if self.editing {
            ui.horizontal_wrapped(|ui| {
                for tag in tags {
                    let mut checked = self.tag_names.contains(&tag.name);
                    let text = RichText::new(&tag.name).color(tag_color(&tag.color));
                    if ui.checkbox(&mut checked, text).changed() {
                        if checked {
                            self.tag_names.push(tag.name.clone());
                        } else {
                            self.tag_names.retain(|n| n != &tag.name);
                        }
                    }
                }
            });
        } else if !note.tags.is_empty() {
            ui.horizontal_wrapped(|ui| {
                for tag in &note.tags {
                    tag_chip(ui, tag);
                }
            });
        }
        ui.separator();

        let content_lines = if self.editing {
            self.content.split('\n').count()
        } else {
            note.line_count()
        };
        if note.note_type == NoteType::Code {
            ui.label(RichText::new(format!("{} lines", content_lines)).small().weak());
        }

        egui::ScrollArea::vertical()
            .id_salt("note_content_scroll")
            .show(ui, |ui| {
                if self.editing {
                    let editor = egui::TextEdit::multiline(&mut self.content)
                        .desired_width(f32::INFINITY)
                        .desired_rows(24);
                    if note.note_type == NoteType::Code {
                        ui.add(editor.code_editor());
                    } else {
                        ui.add(editor);
                    }
                } else if note.note_type == NoteType::Code {
                    egui::Frame::group(ui.style())
                        .fill(ui.visuals().extreme_bg_color)
                        .show(ui, |ui| {
                            ui.set_min_width(ui.available_width());
                            ui.label(RichText::new(&note.content).monospace());
                        });
                } else {
                    ui.label(&note.content);
                }
            });

        action
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NoteTag;
    use chrono::Utc;

    fn note() -> Note {
        Note {
            id: "n1".to_string(),
            title: "Setup".to_string(),
            content: "npm i".to_string(),
            note_type: NoteType::Code,
            folder_id: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
            tags: vec![
                NoteTag {
                    name: "react".to_string(),
                    color: "bg-blue-500".to_string(),
                },
                NoteTag {
                    name: "important".to_string(),
                    color: "bg-red-500".to_string(),
                },
            ],
        }
    }

    #[test]
    fn update_only_carries_changed_fields() {
        let note = note();
        let mut editor = Editor::default();
        editor.load(&note);
        assert!(editor.pending_update(&note).is_empty());

        editor.content = "npm i axios".to_string();
        editor.tag_names = vec!["important".to_string(), "react".to_string()];
        let update = editor.pending_update(&note);
        assert_eq!(update.content.as_deref(), Some("npm i axios"));
        assert_eq!(update.title, None);
        // same set in another order is not a change
        assert_eq!(update.tag_names, None);
    }

    #[test]
    fn reload_keeps_edits_for_same_note() {
        let note = note();
        let mut editor = Editor::default();
        editor.load(&note);
        editor.editing = true;
        editor.content = "draft".to_string();

        editor.load(&note);
        assert!(editor.is_editing());
        assert_eq!(editor.content, "draft");

        let mut other = note.clone();
        other.id = "n2".to_string();
        editor.load(&other);
        assert!(!editor.is_editing());
        assert_eq!(editor.content, "npm i");
    }

    #[test]
    fn delete_confirmation_survives_next_frame() {
        let note = note();
        let mut editor = Editor::default();
        editor.load(&note);
        editor.confirm_delete = true;

        editor.load(&note);
        assert!(editor.confirm_delete);

        let mut other = note.clone();
        other.id = "n2".to_string();
        editor.load(&other);
        assert!(!editor.confirm_delete);
    }

    #[test]
    fn viewing_picks_up_refreshed_content() {
        let mut note = note();
        let mut editor = Editor::default();
        editor.load(&note);

        note.content = "npm ci".to_string();
        editor.load(&note);
        assert_eq!(editor.content, "npm ci");
    }
}
