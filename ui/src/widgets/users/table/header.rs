//! Table header rendering for the users table.

use egui::Ui;
use egui_extras::TableRow;

/// Header column labels. The checkbox column has no caption.
pub const HEADERS: [&str; 8] = [
    "",
    "Name",
    "Email",
    "Created",
    "Admin",
    "Status",
    "Powergate Token",
    "Powergate ID",
];

/// Renders the table header with centered, bold labels.
#[inline]
pub fn render_table_header(header: &mut TableRow<'_, '_>) {
    for label in HEADERS {
        header.col(|ui| {
            render_header_cell(ui, label);
        });
    }
}

#[inline]
fn render_header_cell(ui: &mut Ui, label: &str) {
    ui.centered_and_justified(|ui| {
        ui.strong(label);
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::widgets::users::table::columns::table_columns;

    #[test]
    fn every_column_has_a_header() {
        assert_eq!(HEADERS.len(), table_columns().len());
    }
}
