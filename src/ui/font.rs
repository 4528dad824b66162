//! System font fallback so note content in Chinese, Japanese or Korean renders.
//!
//! The egui default fonts stay first in every family, they carry the emoji
//! used by the UI. A system CJK font is appended as a fallback.

use eframe::egui::{FontData, FontDefinitions, FontFamily};
use std::sync::Arc;

const SYSTEM_FONT_NAME: &str = "SystemCJKFont";

pub fn setup_fonts() -> FontDefinitions {
    let mut fonts = FontDefinitions::default();
    let source = font_kit::source::SystemSource::new();

    for family in preferred_font_names(std::env::consts::OS) {
        if let Some(bytes) = load_family(&source, family) {
            register_fallback(&mut fonts, bytes);
            tracing::info!("Using system font '{}' for CJK text", family);
            return fonts;
        }
    }

    tracing::warn!("No CJK system font found, using egui defaults");
    fonts
}

fn preferred_font_names(os: &str) -> &'static [&'static str] {
    match os {
        "macos" => &["PingFang SC", "Hiragino Sans GB", "Heiti SC"],
        "windows" => &["Microsoft YaHei", "SimSun", "MS Gothic"],
        "linux" => &["Noto Sans CJK SC", "Noto Sans CJK TC", "WenQuanYi Micro Hei"],
        _ => &[],
    }
}

fn load_family(source: &font_kit::source::SystemSource, name: &str) -> Option<Vec<u8>> {
    let family = source.select_family_by_name(name).ok()?;
    match family.fonts().first()? {
        font_kit::handle::Handle::Memory { bytes, .. } => Some(bytes.to_vec()),
        font_kit::handle::Handle::Path { path, .. } => std::fs::read(path).ok(),
    }
}

fn register_fallback(fonts: &mut FontDefinitions, bytes: Vec<u8>) {
    fonts.font_data.insert(
        SYSTEM_FONT_NAME.to_owned(),
        Arc::new(FontData::from_owned(bytes)),
    );
    for family in [FontFamily::Proportional, FontFamily::Monospace] {
        fonts
            .families
            .entry(family)
            .or_default()
            .push(SYSTEM_FONT_NAME.to_owned());
    }
}
