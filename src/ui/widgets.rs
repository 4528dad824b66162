use crate::constant::{DATE_FMT, MAX_LISTED_TAGS};
use crate::models::{Note, NoteTag};
use crate::style::tag_color;
use chrono::{DateTime, Local, Utc};
use egui::{Color32, RichText, Ui};

/// Small coloured pill for a tag
pub fn tag_chip(ui: &mut Ui, tag: &NoteTag) {
    egui::Frame::new()
        .fill(tag_color(&tag.color))
        .corner_radius(8.0)
        .inner_margin(egui::Margin::symmetric(6, 1))
        .show(ui, |ui| {
            ui.label(RichText::new(&tag.name).small().color(Color32::WHITE));
        });
}

/// First few tags of a note, then "+n"
pub fn tag_row(ui: &mut Ui, tags: &[NoteTag]) {
    ui.horizontal_wrapped(|ui| {
        for tag in tags.iter().take(MAX_LISTED_TAGS) {
            tag_chip(ui, tag);
        }
        if tags.len() > MAX_LISTED_TAGS {
            ui.label(RichText::new(format!("+{}", tags.len() - MAX_LISTED_TAGS)).small().weak());
        }
    });
}

pub fn format_date(dt: &DateTime<Utc>) -> String {
    dt.with_timezone(&Local).format(DATE_FMT).to_string()
}

/// A clickable card summarising a note, returns true when clicked
pub fn note_card(ui: &mut Ui, note: &Note, preview_chars: usize, selected: bool) -> bool {
    let fill = if selected {
        ui.visuals().selection.bg_fill
    } else {
        ui.visuals().faint_bg_color
    };
    egui::Frame::group(ui.style())
        .fill(fill)
        .show(ui, |ui| {
            ui.set_min_width(ui.available_width());
            ui.horizontal(|ui| {
                ui.label(note.note_type.icon());
                ui.label(RichText::new(&note.title).strong());
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.label(RichText::new(format_date(&note.updated_at)).small().weak());
                });
            });
            let preview = note.preview(preview_chars);
            if !preview.is_empty() {
                ui.label(RichText::new(preview).small());
            }
            if !note.tags.is_empty() {
                tag_row(ui, &note.tags);
            }
        })
        .response
        .interact(egui::Sense::click())
        .clicked()
}
