//! Cell rendering functions for the users table.

use chrono::{DateTime, Utc};
use egui::{RichText, Ui};
use userdesk_business::format_created_at;

pub const CHECK_MARK: &str = "✅";
pub const BLOCKED_MARK: &str = "🚫";

/// ✅ for admins, blank otherwise.
#[inline]
pub fn admin_glyph(admin: bool) -> &'static str {
    if admin { CHECK_MARK } else { "" }
}

/// 🚫 for disabled accounts, ✅ otherwise.
#[inline]
pub fn status_glyph(disabled: bool) -> &'static str {
    if disabled { BLOCKED_MARK } else { CHECK_MARK }
}

/// Renders the row checkbox.
///
/// `checked` comes from the selection; returns the new value when the user
/// clicked it.
#[inline]
pub fn render_select_cell(ui: &mut Ui, checked: bool) -> Option<bool> {
    let mut value = checked;
    ui.centered_and_justified(|ui| ui.checkbox(&mut value, ""))
        .inner
        .changed()
        .then_some(value)
}

#[inline]
pub fn render_text_cell(ui: &mut Ui, text: &str) {
    ui.centered_and_justified(|ui| {
        ui.label(text);
    });
}

/// Relative creation time, with the raw value on hover.
#[inline]
pub fn render_created_cell(ui: &mut Ui, created_at: &str, now: DateTime<Utc>) {
    ui.centered_and_justified(|ui| {
        ui.label(format_created_at(created_at, now))
            .on_hover_text(created_at);
    });
}

#[inline]
pub fn render_glyph_cell(ui: &mut Ui, glyph: &str) {
    ui.centered_and_justified(|ui| {
        ui.label(glyph);
    });
}

/// External-service values are shown verbatim in monospace.
#[inline]
pub fn render_opaque_cell(ui: &mut Ui, value: &str) {
    ui.centered_and_justified(|ui| {
        ui.label(RichText::new(value).monospace());
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn admin_glyph_follows_flag() {
        assert_eq!(admin_glyph(true), "✅");
        assert_eq!(admin_glyph(false), "");
    }

    #[test]
    fn status_glyph_follows_flag() {
        assert_eq!(status_glyph(true), "🚫");
        assert_eq!(status_glyph(false), "✅");
    }
}
