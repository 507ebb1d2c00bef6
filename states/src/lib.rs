//! Minimal state runtime for immediate-mode UIs.
//!
//! - [`State`]: values owned by the UI thread, mutated in place.
//! - [`Compute`]: caches written only by commands through an [`Updater`].
//! - [`Command`]: manual async work spawned on Tokio with a [`CommandSnapshot`].

mod basic_state;
mod command;
mod ctx;
mod error;
mod snapshot;
mod state;
mod task;
mod updater;

pub use basic_state::Time;
pub use command::{Command, CommandFuture};
pub use ctx::StateCtx;
pub use error::{Error, Result};
pub use snapshot::CommandSnapshot;
pub use state::{Compute, State, state_assign_impl};
pub use task::{TaskHandle, TaskId};
pub use tokio_util::sync::CancellationToken;
pub use updater::{LatestOnlyUpdater, Updater};
