//! User management widgets:
//! - `panel`: toolbar, error banners and table wiring
//! - `table`: table rendering components (columns, header, row, cells)

mod panel;
pub mod table;

pub use panel::users_panel;
