//! The users panel: listing accounts, tracking checked rows and applying
//! batch actions.

pub mod action_compute;
pub mod api;
pub mod list_users_compute;
pub mod model;
pub mod selection;
pub mod state;
pub mod workflow;
