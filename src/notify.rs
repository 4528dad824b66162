//! User-facing notifications.
//!
//! Outcomes are reported through a [`Notifier`] rather than drawn on the
//! spot. [`Toasts`] is the egui implementation the app renders each frame.

use egui::{Align2, Color32, Context, RichText};
use std::collections::VecDeque;
use std::time::{Duration, Instant};

const TOAST_LIFETIME: Duration = Duration::from_secs(4);
const MAX_TOASTS: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub level: ToastLevel,
    pub title: String,
    pub message: String,
}

pub trait Notifier {
    fn notify(&mut self, toast: Toast);

    fn success(&mut self, title: &str, message: &str) {
        self.notify(Toast {
            level: ToastLevel::Success,
            title: title.to_string(),
            message: message.to_string(),
        });
    }

    fn error(&mut self, title: &str, message: &str) {
        tracing::warn!("{}: {}", title, message);
        self.notify(Toast {
            level: ToastLevel::Error,
            title: title.to_string(),
            message: message.to_string(),
        });
    }
}

/// Stack of toasts drawn in the bottom right corner
#[derive(Default)]
pub struct Toasts {
    items: VecDeque<(Toast, Instant)>,
}

impl Toasts {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    fn expire(&mut self, now: Instant) {
        self.items
            .retain(|(_, shown)| now.duration_since(*shown) < TOAST_LIFETIME);
    }

    pub fn show(&mut self, ctx: &Context) {
        self.expire(Instant::now());
        if self.items.is_empty() {
            return;
        }

        let mut dismissed = None;
        egui::Area::new(egui::Id::new("toasts"))
            .anchor(Align2::RIGHT_BOTTOM, [-12.0, -12.0])
            .show(ctx, |ui| {
                for (index, (toast, _)) in self.items.iter().enumerate() {
                    let (fill, accent) = match toast.level {
                        ToastLevel::Success => (
                            Color32::from_rgb(236, 253, 240),
                            Color32::from_rgb(22, 101, 52),
                        ),
                        ToastLevel::Error => (
                            Color32::from_rgb(254, 226, 226),
                            Color32::from_rgb(153, 27, 27),
                        ),
                    };
                    let response = egui::Frame::popup(ui.style())
                        .fill(fill)
                        .show(ui, |ui| {
                            ui.set_max_width(320.0);
                            ui.label(RichText::new(&toast.title).strong().color(accent));
                            if !toast.message.is_empty() {
                                ui.label(&toast.message);
                            }
                        })
                        .response
                        .interact(egui::Sense::click());
                    if response.clicked() {
                        dismissed = Some(index);
                    }
                }
            });

        if let Some(index) = dismissed {
            self.items.remove(index);
        }
        // Keep repainting so expired toasts disappear without input
        ctx.request_repaint_after(Duration::from_millis(500));
    }
}

impl Notifier for Toasts {
    fn notify(&mut self, toast: Toast) {
        self.items.push_back((toast, Instant::now()));
        while self.items.len() > MAX_TOASTS {
            self.items.pop_front();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toasts_are_capped() {
        let mut toasts = Toasts::new();
        for i in 0..(MAX_TOASTS + 2) {
            toasts.success("Saved", &i.to_string());
        }
        assert_eq!(toasts.len(), MAX_TOASTS);
        assert_eq!(toasts.items.front().map(|(t, _)| t.message.as_str()), Some("2"));
    }

    #[test]
    fn toasts_expire() {
        let mut toasts = Toasts::new();
        toasts.error("Error", "Server error");
        toasts.expire(Instant::now());
        assert_eq!(toasts.len(), 1);

        toasts.expire(Instant::now() + TOAST_LIFETIME);
        assert!(toasts.is_empty());
    }
}
