//! "List users" compute + refresh command.
//!
//! `RefreshUsersCommand` performs the GET and publishes into
//! `UsersListCompute`. The UI never reads rows from here directly;
//! `poll_users_workflow` moves a fresh result into `UsersState`.

use userdesk_states::{
    CancellationToken, Command, CommandFuture, CommandSnapshot, Compute, LatestOnlyUpdater,
    snapshot_state,
};

use crate::BusinessConfig;
use crate::session::Session;
use crate::users::api as users_api;
use crate::users::model::User;

/// Status/result of the list call.
#[derive(Debug, Clone, Default)]
pub enum UsersListResult {
    /// No request has been made yet.
    #[default]
    Idle,

    /// A refresh is currently in-flight.
    Loading,

    /// The refresh run `generation` succeeded with these users.
    Loaded { users: Vec<User>, generation: u64 },

    /// The refresh run `generation` failed with this error message.
    Error { message: String, generation: u64 },
}

#[derive(Debug, Clone, Default)]
pub struct UsersListCompute {
    pub result: UsersListResult,
}

snapshot_state!(UsersListCompute);
impl Compute for UsersListCompute {}

impl UsersListCompute {
    pub fn is_loading(&self) -> bool {
        matches!(self.result, UsersListResult::Loading)
    }

    pub fn error_message(&self) -> Option<&str> {
        match &self.result {
            UsersListResult::Error { message, .. } => Some(message.as_str()),
            _ => None,
        }
    }

    pub fn users(&self) -> Option<&[User]> {
        match &self.result {
            UsersListResult::Loaded { users, .. } => Some(users.as_slice()),
            _ => None,
        }
    }

    /// Generation of the run that produced a finished result.
    pub fn generation(&self) -> Option<u64> {
        match &self.result {
            UsersListResult::Loaded { generation, .. }
            | UsersListResult::Error { generation, .. } => Some(*generation),
            _ => None,
        }
    }
}

/// Manual-only command that re-fetches every user.
///
/// A newer dispatch cancels this one; whatever a superseded run would still
/// publish is dropped by its updater.
#[derive(Default, Debug)]
pub struct RefreshUsersCommand;

impl Command for RefreshUsersCommand {
    fn run(
        &self,
        snap: CommandSnapshot,
        updater: LatestOnlyUpdater,
        cancel: CancellationToken,
    ) -> CommandFuture {
        let config = snap.state::<BusinessConfig>().clone();
        let session = snap.compute::<Session>().clone();

        Box::pin(async move {
            let generation = updater.generation();
            updater.set(UsersListCompute {
                result: UsersListResult::Loading,
            });

            let result = tokio::select! {
                _ = cancel.cancelled() => {
                    log::debug!("RefreshUsersCommand: generation {generation} cancelled");
                    return;
                }
                result = users_api::list_users(&config, &session) => result,
            };

            match result {
                Ok(users) => {
                    log::info!("RefreshUsersCommand: loaded {} users", users.len());
                    updater.set(UsersListCompute {
                        result: UsersListResult::Loaded { users, generation },
                    });
                }
                Err(err) => {
                    log::warn!("RefreshUsersCommand: {err}");
                    updater.set(UsersListCompute {
                        result: UsersListResult::Error {
                            message: err.to_string(),
                            generation,
                        },
                    });
                }
            }
        })
    }
}
