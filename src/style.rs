use crate::config::Settings;
use egui::{Color32, Context, FontId, Stroke, Style, TextStyle, Visuals};

pub fn configure_style(ctx: &Context, settings: &Settings) {
    let mut style = Style::default();

    style.spacing.item_spacing = egui::vec2(8.0, 8.0);
    style.spacing.window_margin = egui::Margin::same(12);

    if settings.font_size > 0.0 {
        let size = settings.font_size;
        style.text_styles.insert(TextStyle::Body, FontId::proportional(size));
        style.text_styles.insert(TextStyle::Button, FontId::proportional(size));
        style.text_styles.insert(TextStyle::Monospace, FontId::monospace(size));
        style.text_styles.insert(TextStyle::Heading, FontId::proportional(size * 1.5));
        style.text_styles.insert(TextStyle::Small, FontId::proportional(size * 0.8));
    }

    ctx.set_style(style);

    let mut visuals = if settings.theme == "dark" {
        Visuals::dark()
    } else {
        Visuals::light()
    };
    visuals.window_shadow = egui::epaint::Shadow::NONE;
    visuals.popup_shadow = egui::epaint::Shadow::NONE;

    if !visuals.dark_mode {
        visuals.widgets.hovered.bg_fill = Color32::from_gray(240);
        visuals.widgets.active.bg_fill = Color32::from_gray(230);
        visuals.selection.bg_fill = Color32::from_rgb(200, 220, 255);
        visuals.selection.stroke = Stroke::new(1.0, Color32::from_rgb(59, 130, 246));
    }

    ctx.set_visuals(visuals);
}

/// Map a tag palette token (`bg-red-500`) to its swatch colour
pub fn tag_color(token: &str) -> Color32 {
    let name = token
        .trim()
        .trim_start_matches("bg-")
        .trim_end_matches("-500");
    match name {
        "red" => Color32::from_rgb(239, 68, 68),
        "orange" => Color32::from_rgb(249, 115, 22),
        "yellow" => Color32::from_rgb(234, 179, 8),
        "green" => Color32::from_rgb(34, 197, 94),
        "teal" => Color32::from_rgb(20, 184, 166),
        "cyan" => Color32::from_rgb(6, 182, 212),
        "blue" => Color32::from_rgb(59, 130, 246),
        "indigo" => Color32::from_rgb(99, 102, 241),
        "violet" => Color32::from_rgb(139, 92, 246),
        "purple" => Color32::from_rgb(168, 85, 247),
        "pink" => Color32::from_rgb(236, 72, 153),
        "rose" => Color32::from_rgb(244, 63, 94),
        _ => Color32::from_rgb(107, 114, 128),
    }
}

/// Tokens offered when creating a tag
pub const TAG_PALETTE: [&str; 12] = [
    "bg-red-500",
    "bg-orange-500",
    "bg-yellow-500",
    "bg-green-500",
    "bg-teal-500",
    "bg-cyan-500",
    "bg-blue-500",
    "bg-indigo-500",
    "bg-violet-500",
    "bg-purple-500",
    "bg-pink-500",
    "bg-rose-500",
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_tokens_map_to_distinct_colors() {
        let colors: std::collections::HashSet<_> =
            TAG_PALETTE.iter().map(|t| tag_color(t)).collect();
        assert_eq!(colors.len(), TAG_PALETTE.len());
    }

    #[test]
    fn unknown_token_is_gray() {
        assert_eq!(tag_color("bg-mauve-500"), Color32::from_rgb(107, 114, 128));
        assert_eq!(tag_color(""), Color32::from_rgb(107, 114, 128));
    }
}
