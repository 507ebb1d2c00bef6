//! Business layer of the user administration panel.
//!
//! Holds configuration, the HTTP client, the users API and the computes and
//! commands that drive the panel. Nothing in here knows about egui.

use chrono::Utc;
use userdesk_states::{StateCtx, Time};

mod config;
pub mod http;
pub mod session;
pub mod time_ago;
pub mod users;

#[cfg(all(test, not(target_arch = "wasm32")))]
pub mod test_utils;

pub use config::BusinessConfig;
pub use session::Session;
pub use time_ago::{format_created_at, format_relative};
pub use users::action_compute::{
    DisableUsersCommand, EnableUsersCommand, MakeAdminCommand, MakeUserCommand,
    UsersActionCompute, UsersActionInput, UsersActionState,
};
pub use users::api::{ApiResult, UsersActionKind, UsersApiError};
pub use users::list_users_compute::{RefreshUsersCommand, UsersListCompute, UsersListResult};
pub use users::model::User;
pub use users::selection::Selection;
pub use users::state::UsersState;
pub use users::workflow::{
    dismiss_action_error, poll_users_workflow, request_refresh, request_users_action,
    toggle_user,
};

/// Builds a context with every state, compute and command the panel uses.
///
/// The session starts from `config.api_token`; a session provider may
/// publish a new [`Session`] later through the updater.
pub fn build_state_ctx(config: BusinessConfig) -> StateCtx {
    let mut ctx = StateCtx::new();

    let session = config
        .api_token
        .as_deref()
        .map_or_else(Session::anonymous, Session::bearer);

    ctx.add_state(Time::new(Utc::now()));
    ctx.add_state(config);
    ctx.add_state(UsersState::default());
    ctx.add_state(UsersActionInput::default());

    ctx.record_compute(session);
    ctx.record_compute(UsersListCompute::default());
    ctx.record_compute(UsersActionCompute::default());

    ctx.record_command(RefreshUsersCommand);
    ctx.record_command(DisableUsersCommand);
    ctx.record_command(EnableUsersCommand);
    ctx.record_command(MakeAdminCommand);
    ctx.record_command(MakeUserCommand);

    ctx
}
