//! Table components for the users panel:
//! - `columns`: column definitions and widths
//! - `header`: table header rendering
//! - `row`: one row per user
//! - `cells`: cell rendering and flag glyphs

mod cells;
pub mod columns;
pub mod header;
pub mod row;

use chrono::{DateTime, Utc};
use egui::{Align, Layout, Ui};
use egui_extras::TableBuilder;
use userdesk_business::{Selection, User};
use ustr::Ustr;

pub use cells::{admin_glyph, status_glyph};
use columns::{HEADER_HEIGHT, ROW_HEIGHT, table_columns};
use header::render_table_header;
use row::render_user_row;

/// Renders every user and returns the checkbox changes made this frame.
///
/// Checked state is read from `selection` only; the table keeps no widget
/// state of its own.
pub fn render_users_table(
    ui: &mut Ui,
    users: &[User],
    selection: &Selection,
    now: DateTime<Utc>,
) -> Vec<(Ustr, bool)> {
    let mut toggles = Vec::new();

    let mut builder = TableBuilder::new(ui)
        .id_salt("users_table")
        .striped(true)
        .resizable(false)
        .cell_layout(Layout::left_to_right(Align::Center));
    for column in table_columns() {
        builder = builder.column(column);
    }

    builder
        .header(HEADER_HEIGHT, |mut header| {
            render_table_header(&mut header);
        })
        .body(|mut body| {
            for user in users {
                let id = Ustr::from(&user.id);
                body.row(ROW_HEIGHT, |mut row| {
                    if let Some(checked) =
                        render_user_row(&mut row, user, selection.contains(id), now)
                    {
                        toggles.push((id, checked));
                    }
                });
            }
        });

    toggles
}
