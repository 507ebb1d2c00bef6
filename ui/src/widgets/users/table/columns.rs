//! Column definitions for the users table.

use egui_extras::Column;

pub const SELECT_WIDTH: f32 = 32.0;
pub const FLAG_WIDTH: f32 = 64.0;
pub const CREATED_WIDTH: f32 = 120.0;
pub const ROW_HEIGHT: f32 = 28.0;
pub const HEADER_HEIGHT: f32 = 24.0;

/// Columns in render order:
/// select, name, email, created, admin, status, powergate token, powergate id.
#[inline]
pub fn table_columns() -> Vec<Column> {
    vec![
        Column::exact(SELECT_WIDTH),               // checkbox
        Column::auto().at_least(100.0),            // name
        Column::auto().at_least(160.0),            // email
        Column::exact(CREATED_WIDTH),              // created
        Column::exact(FLAG_WIDTH),                 // admin
        Column::exact(FLAG_WIDTH),                 // status
        Column::auto().at_least(120.0).clip(true), // powergate token
        Column::remainder().at_least(100.0),       // powergate id
    ]
}
