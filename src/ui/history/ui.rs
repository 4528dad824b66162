use super::diff::inline_changes;
use super::stats::DiffStats;
use super::types::{CompareSlot, DiffEntry, DiffKind, InlineSpan};
use super::view::VersionRow;
use crate::models::Version;
use egui::{Color32, FontId, RichText, ScrollArea, TextFormat, Ui, text::LayoutJob};

// Color constants for better maintainability
const FIRST_BG: Color32 = Color32::from_rgb(236, 253, 240);
const SECOND_BG: Color32 = Color32::from_rgb(235, 245, 255);
const ADDED_BG: Color32 = Color32::from_rgb(220, 252, 231);
const REMOVED_BG: Color32 = Color32::from_rgb(254, 226, 226);
const MODIFIED_BG: Color32 = Color32::from_rgb(254, 249, 195);
const REMOVED_WORD_BG: Color32 = Color32::from_rgb(255, 170, 170);
const ADDED_WORD_BG: Color32 = Color32::from_rgb(170, 255, 170);
const ADDED_TEXT_COLOR: Color32 = Color32::from_rgb(22, 101, 52);
const REMOVED_TEXT_COLOR: Color32 = Color32::from_rgb(153, 27, 27);
const MODIFIED_TEXT_COLOR: Color32 = Color32::from_rgb(133, 77, 14);

/// Draw the version list, returning the version the user clicked
pub fn render_version_list(ui: &mut Ui, rows: &[VersionRow]) -> Option<u32> {
    let mut clicked = None;

    for row in rows {
        let bg = match row.slot {
            Some(CompareSlot::First) => FIRST_BG,
            Some(CompareSlot::Second) => SECOND_BG,
            None => Color32::TRANSPARENT,
        };

        let response = egui::Frame::group(ui.style())
            .fill(bg)
            .show(ui, |ui| {
                ui.set_min_width(ui.available_width());
                ui.horizontal(|ui| {
                    ui.label(RichText::new(format!("v{}", row.version)).monospace().strong());
                    if let Some(slot) = row.slot {
                        ui.label(RichText::new(slot.label()).small().strong());
                    }
                });
                ui.label(RichText::new(&row.changes).small());
                ui.label(RichText::new(format!("🕒 {}", row.timestamp)).small().weak());
            })
            .response
            .interact(egui::Sense::click());

        if row.selected {
            ui.painter().rect_stroke(
                response.rect,
                4.0,
                egui::Stroke::new(2.0, ui.visuals().selection.stroke.color),
                egui::StrokeKind::Inside,
            );
        }

        if response.clicked() {
            clicked = Some(row.version);
        }
    }

    clicked
}

/// Full content of one version, whitespace preserved
pub fn render_single(ui: &mut Ui, version: &Version, timestamp: &str) {
    ui.horizontal(|ui| {
        ui.vertical(|ui| {
            ui.heading(format!("Version {}", version.version));
            ui.label(RichText::new(&version.changes).weak());
        });
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            ui.label(RichText::new(timestamp).weak());
        });
    });
    ui.separator();

    ScrollArea::both()
        .id_salt("single_version_scroll")
        .auto_shrink([false, false])
        .show(ui, |ui| {
            ui.add(egui::Label::new(RichText::new(&version.content).monospace()).extend());
        });
}

/// Side-by-side contents followed by the diff summary
pub fn render_compare(
    ui: &mut Ui,
    first: &Version,
    second: &Version,
    diff: &[DiffEntry],
    stats: &DiffStats,
) {
    ui.vertical_centered(|ui| {
        ui.label(
            RichText::new(format!("v{}  →  v{}", first.version, second.version))
                .monospace()
                .strong(),
        );
    });
    ui.separator();

    let pane_height = (ui.available_height() * 0.55).max(120.0);
    ui.columns(2, |cols| {
        render_pane(&mut cols[0], "compare_first", first, FIRST_BG, pane_height);
        render_pane(&mut cols[1], "compare_second", second, SECOND_BG, pane_height);
    });

    ui.separator();
    ui.horizontal(|ui| {
        ui.strong("Differences:");
        if stats.is_empty() {
            ui.label("none");
        } else {
            for (kind, count) in stats.line_counts() {
                let (_, text_color) = kind_colors(kind);
                ui.label(RichText::new(format!("{}: {}", kind.label(), count)).color(text_color));
            }
            ui.separator();
            ui.label(
                RichText::new(format!("+{} chars", stats.added_chars)).color(ADDED_TEXT_COLOR),
            );
            ui.label(
                RichText::new(format!("-{} chars", stats.removed_chars)).color(REMOVED_TEXT_COLOR),
            );
        }
    });

    ScrollArea::vertical()
        .id_salt("diff_entries_scroll")
        .auto_shrink([false, false])
        .show(ui, |ui| {
            render_diff_entries(ui, diff);
        });
}

fn render_pane(ui: &mut Ui, id: &str, version: &Version, bg: Color32, height: f32) {
    ui.strong(format!("Version {}", version.version));
    egui::Frame::default()
        .fill(bg)
        .inner_margin(8.0)
        .show(ui, |ui| {
            ScrollArea::both()
                .id_salt(id)
                .max_height(height)
                .auto_shrink([false, true])
                .show(ui, |ui| {
                    ui.add(
                        egui::Label::new(RichText::new(&version.content).monospace().size(12.0))
                            .extend(),
                    );
                });
        });
}

/// One row per divergent line with its kind label
pub fn render_diff_entries(ui: &mut Ui, diff: &[DiffEntry]) {
    ui.style_mut().spacing.item_spacing.y = 2.0;

    for entry in diff {
        let (bg, color) = kind_colors(entry.kind);
        ui.horizontal(|ui| {
            ui.label(
                RichText::new(format!("Line {}:", entry.line_number))
                    .monospace()
                    .weak(),
            );
            egui::Frame::default()
                .fill(bg)
                .inner_margin(4.0)
                .show(ui, |ui| {
                    ui.label(RichText::new(entry.kind.label()).color(color).small());
                });
            render_inline_highlight(ui, entry);
        });
    }
}

fn kind_colors(kind: DiffKind) -> (Color32, Color32) {
    match kind {
        DiffKind::Added => (ADDED_BG, ADDED_TEXT_COLOR),
        DiffKind::Removed => (REMOVED_BG, REMOVED_TEXT_COLOR),
        DiffKind::Modified => (MODIFIED_BG, MODIFIED_TEXT_COLOR),
    }
}

/// Show the line itself; modified lines get char-level highlighting
fn render_inline_highlight(ui: &mut Ui, entry: &DiffEntry) {
    let font_id = FontId::monospace(12.0);
    let base = ui.visuals().text_color();
    let plain = |color: Color32, background: Color32| TextFormat {
        font_id: font_id.clone(),
        color,
        background,
        ..Default::default()
    };

    let mut job = LayoutJob::default();
    match entry.kind {
        DiffKind::Added => job.append(&entry.new_line, 0.0, plain(ADDED_TEXT_COLOR, Color32::TRANSPARENT)),
        DiffKind::Removed => job.append(
            &entry.old_line,
            0.0,
            plain(REMOVED_TEXT_COLOR, Color32::TRANSPARENT),
        ),
        DiffKind::Modified => {
            for span in inline_changes(&entry.old_line, &entry.new_line) {
                match span {
                    InlineSpan::Same(text) => job.append(&text, 0.0, plain(base, Color32::TRANSPARENT)),
                    InlineSpan::Deleted(text) => {
                        job.append(&text, 0.0, plain(REMOVED_TEXT_COLOR, REMOVED_WORD_BG))
                    }
                    InlineSpan::Inserted(text) => {
                        job.append(&text, 0.0, plain(ADDED_TEXT_COLOR, ADDED_WORD_BG))
                    }
                }
            }
        }
    }

    ui.add(egui::Label::new(job).wrap());
}
