//! Batch action compute + the four action commands.
//!
//! Each command POSTs the ids in `UsersActionInput` to its endpoint and
//! publishes the outcome into `UsersActionCompute`. Requests are never
//! aborted once sent; a newer run of the same command only supersedes what
//! gets displayed.

use userdesk_states::{
    CancellationToken, Command, CommandFuture, CommandSnapshot, Compute, LatestOnlyUpdater,
    snapshot_state,
};
use ustr::Ustr;

use crate::BusinessConfig;
use crate::session::Session;
use crate::users::api::{self as users_api, UsersActionKind};

/// Ids captured from the selection when an action is requested.
#[derive(Debug, Clone, Default)]
pub struct UsersActionInput {
    pub ids: Vec<Ustr>,
}

snapshot_state!(UsersActionInput);

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum UsersActionState {
    #[default]
    Idle,

    InFlight { kind: UsersActionKind, count: usize },

    /// `generation` identifies the run so the workflow refreshes exactly once.
    Succeeded {
        kind: UsersActionKind,
        count: usize,
        generation: u64,
    },

    Failed { kind: UsersActionKind, message: String },
}

#[derive(Debug, Clone, Default)]
pub struct UsersActionCompute {
    pub state: UsersActionState,
}

snapshot_state!(UsersActionCompute);
impl Compute for UsersActionCompute {}

impl UsersActionCompute {
    pub fn is_in_flight(&self) -> bool {
        matches!(self.state, UsersActionState::InFlight { .. })
    }

    /// Banner text for a failed action, e.g. `Make Admin failed: ...`.
    pub fn error_message(&self) -> Option<String> {
        match &self.state {
            UsersActionState::Failed { kind, message } => {
                Some(format!("{} failed: {message}", kind.label()))
            }
            _ => None,
        }
    }

    pub fn succeeded_generation(&self) -> Option<u64> {
        match self.state {
            UsersActionState::Succeeded { generation, .. } => Some(generation),
            _ => None,
        }
    }
}

fn run_users_action(
    kind: UsersActionKind,
    snap: &CommandSnapshot,
    updater: LatestOnlyUpdater,
) -> CommandFuture {
    let config = snap.state::<BusinessConfig>().clone();
    let session = snap.compute::<Session>().clone();
    let ids = snap.state::<UsersActionInput>().ids.clone();

    Box::pin(async move {
        if ids.is_empty() {
            log::debug!("{:?}: nothing selected, skipping request", kind);
            return;
        }

        let count = ids.len();
        updater.set(UsersActionCompute {
            state: UsersActionState::InFlight { kind, count },
        });

        let state = match users_api::apply_action(&config, &session, kind, &ids).await {
            Ok(()) => {
                log::info!("{:?} applied to {count} user(s)", kind);
                UsersActionState::Succeeded {
                    kind,
                    count,
                    generation: updater.generation(),
                }
            }
            Err(err) => {
                log::warn!("{:?} failed: {err}", kind);
                UsersActionState::Failed {
                    kind,
                    message: err.to_string(),
                }
            }
        };
        updater.set(UsersActionCompute { state });
    })
}

macro_rules! users_action_command {
    ($(#[$meta:meta])* $name:ident => $kind:expr) => {
        $(#[$meta])*
        #[derive(Default, Debug)]
        pub struct $name;

        impl Command for $name {
            fn run(
                &self,
                snap: CommandSnapshot,
                updater: LatestOnlyUpdater,
                _cancel: CancellationToken,
            ) -> CommandFuture {
                run_users_action($kind, &snap, updater)
            }
        }
    };
}

users_action_command!(
    /// POST `/api/v1/users/disable`
    DisableUsersCommand => UsersActionKind::Disable
);
users_action_command!(
    /// POST `/api/v1/users/enable`
    EnableUsersCommand => UsersActionKind::Enable
);
users_action_command!(
    /// POST `/api/v1/users/makeadmin`
    MakeAdminCommand => UsersActionKind::MakeAdmin
);
users_action_command!(
    /// POST `/api/v1/users/makeuser`
    MakeUserCommand => UsersActionKind::MakeUser
);
