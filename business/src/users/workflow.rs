//! Frame-driven glue between the computes and `UsersState`.
//!
//! Commands cannot touch `UsersState`, so the panel calls
//! [`poll_users_workflow`] once per frame after `sync_computes`. Each finished
//! run is consumed exactly once, keyed by its generation.

use userdesk_states::{StateCtx, Time};

use crate::users::action_compute::{
    DisableUsersCommand, EnableUsersCommand, MakeAdminCommand, MakeUserCommand,
    UsersActionCompute, UsersActionInput,
};
use crate::users::api::UsersActionKind;
use crate::users::list_users_compute::{RefreshUsersCommand, UsersListCompute, UsersListResult};
use crate::users::state::UsersState;

/// Applies fresh list results and schedules the refresh that follows a
/// successful action.
pub fn poll_users_workflow(ctx: &mut StateCtx) {
    let seen = ctx.state::<UsersState>().seen_list_generation;
    let fresh = match ctx.cached::<UsersListCompute>().map(|c| &c.result) {
        Some(UsersListResult::Loaded { users, generation }) if *generation > seen => {
            Some((users.clone(), *generation))
        }
        _ => None,
    };
    if let Some((users, generation)) = fresh {
        let now = *ctx.state::<Time>().as_ref();
        ctx.update::<UsersState>(|state| {
            state.replace_users(users, now);
            state.seen_list_generation = generation;
        });
    }

    let acknowledged = ctx.state::<UsersState>().acknowledged_action_generation;
    let succeeded = ctx
        .cached::<UsersActionCompute>()
        .and_then(UsersActionCompute::succeeded_generation)
        .filter(|generation| *generation > acknowledged);
    if let Some(generation) = succeeded {
        log::debug!("action generation {generation} succeeded, refreshing users");
        ctx.update::<UsersState>(|state| state.acknowledged_action_generation = generation);
        ctx.enqueue_command::<RefreshUsersCommand>();
    }
}

/// Queues `kind` against the current selection.
///
/// Returns `false` without queuing anything when nothing is selected.
pub fn request_users_action(ctx: &mut StateCtx, kind: UsersActionKind) -> bool {
    let ids = ctx.state::<UsersState>().selection().ids().to_vec();
    if ids.is_empty() {
        log::debug!("{kind:?} requested with an empty selection, ignoring");
        return false;
    }

    ctx.update::<UsersActionInput>(|input| input.ids = ids);
    match kind {
        UsersActionKind::Disable => ctx.enqueue_command::<DisableUsersCommand>(),
        UsersActionKind::Enable => ctx.enqueue_command::<EnableUsersCommand>(),
        UsersActionKind::MakeAdmin => ctx.enqueue_command::<MakeAdminCommand>(),
        UsersActionKind::MakeUser => ctx.enqueue_command::<MakeUserCommand>(),
    }
    true
}

pub fn request_refresh(ctx: &mut StateCtx) {
    ctx.enqueue_command::<RefreshUsersCommand>();
}

pub fn toggle_user(ctx: &mut StateCtx, id: &str, checked: bool) {
    ctx.update::<UsersState>(|state| state.set_selected(id, checked));
}

/// Clears a failed-action banner.
pub fn dismiss_action_error(ctx: &mut StateCtx) {
    ctx.updater().set(UsersActionCompute::default());
    ctx.sync_computes();
}
