//! Bookkeeping for spawned command runs.
//!
//! Each flushed command gets a [`TaskHandle`]: a [`TaskId`] (command type plus
//! dispatch generation) and the `CancellationToken` passed to
//! [`crate::Command::run`]. Dispatching the same command again cancels the
//! previous handle, so a superseded refresh can stop early.

use std::any::TypeId;

use tokio_util::sync::CancellationToken;

/// Identifies one run of a command type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TaskId {
    type_id: TypeId,
    generation: u64,
}

impl TaskId {
    pub fn new(type_id: TypeId, generation: u64) -> Self {
        Self {
            type_id,
            generation,
        }
    }

    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    /// Higher generations were dispatched later.
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// Cancellation handle of a spawned command run.
///
/// Cancellation is cooperative: the command has to observe the token, usually
/// through `tokio::select!` on `token.cancelled()`.
#[derive(Debug, Clone)]
pub struct TaskHandle {
    id: TaskId,
    cancel_token: CancellationToken,
}

impl TaskHandle {
    pub fn new(id: TaskId, cancel_token: CancellationToken) -> Self {
        Self { id, cancel_token }
    }

    pub fn id(&self) -> TaskId {
        self.id
    }

    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel_token.clone()
    }

    pub fn cancel(&self) {
        self.cancel_token.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel_token.is_cancelled()
    }
}
