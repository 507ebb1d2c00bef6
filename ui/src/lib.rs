//! Desktop front end for user administration: a table of accounts with
//! bulk disable, enable, promote and demote actions.

#![warn(clippy::all, rust_2018_idioms)]

pub mod app;
pub mod state;
pub mod widgets;

pub use app::UserDeskApp;
