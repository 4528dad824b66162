use super::widgets::note_card;
use crate::constant::PREVIEW_CHARS;
use crate::models::Note;
use egui::Ui;

/// List of note cards, returns the id of a clicked note
pub fn show(ui: &mut Ui, notes: &[Note], selected: Option<&str>) -> Option<String> {
    let mut clicked = None;

    if notes.is_empty() {
        ui.vertical_centered(|ui| {
            ui.add_space(40.0);
            ui.label("No notes found");
        });
        return None;
    }

    egui::ScrollArea::vertical()
        .id_salt("note_list_scroll")
        .show(ui, |ui| {
            for note in notes {
                let is_selected = selected == Some(note.id.as_str());
                if note_card(ui, note, PREVIEW_CHARS, is_selected) {
                    clicked = Some(note.id.clone());
                }
            }
        });

    clicked
}
