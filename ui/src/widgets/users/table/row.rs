//! Row rendering for the users table.

use chrono::{DateTime, Utc};
use egui::{Stroke, Ui};
use egui_extras::TableRow;
use userdesk_business::User;

use super::cells::{
    admin_glyph, render_created_cell, render_glyph_cell, render_opaque_cell, render_select_cell,
    render_text_cell, status_glyph,
};

/// Renders one user. Returns the new checkbox value if it was clicked.
#[inline]
pub fn render_user_row(
    row: &mut TableRow<'_, '_>,
    user: &User,
    checked: bool,
    now: DateTime<Utc>,
) -> Option<bool> {
    let mut toggled = None;

    row.col(|ui| {
        toggled = render_select_cell(ui, checked);
        draw_cell_bottom_border(ui);
    });

    row.col(|ui| {
        render_text_cell(ui, &user.name);
        draw_cell_bottom_border(ui);
    });

    row.col(|ui| {
        render_text_cell(ui, &user.email);
        draw_cell_bottom_border(ui);
    });

    row.col(|ui| {
        render_created_cell(ui, &user.created_at, now);
        draw_cell_bottom_border(ui);
    });

    row.col(|ui| {
        render_glyph_cell(ui, admin_glyph(user.admin));
        draw_cell_bottom_border(ui);
    });

    row.col(|ui| {
        render_glyph_cell(ui, status_glyph(user.disabled));
        draw_cell_bottom_border(ui);
    });

    row.col(|ui| {
        render_opaque_cell(ui, &user.powergate_token);
        draw_cell_bottom_border(ui);
    });

    row.col(|ui| {
        render_opaque_cell(ui, &user.powergate_id);
        draw_cell_bottom_border(ui);
    });

    toggled
}

#[inline]
fn draw_cell_bottom_border(ui: &mut Ui) {
    let rect = ui.available_rect_before_wrap();
    let border_color = ui.visuals().widgets.noninteractive.bg_stroke.color;
    ui.painter().hline(
        rect.left()..=rect.right(),
        rect.bottom(),
        Stroke::new(1.0, border_color),
    );
}
