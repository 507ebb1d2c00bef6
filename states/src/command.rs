use std::future::Future;
use std::pin::Pin;

use tokio_util::sync::CancellationToken;

use crate::{CommandSnapshot, LatestOnlyUpdater};

/// Boxed future returned by [`Command::run`].
pub type CommandFuture = Pin<Box<dyn Future<Output = ()> + Send>>;

/// A manual-only unit of work, the only place allowed to perform IO.
///
/// Commands never run implicitly. The UI queues them with
/// [`crate::StateCtx::enqueue_command`] and the context spawns them on
/// [`crate::StateCtx::flush_commands`]. A command reads its inputs from the
/// snapshot taken at flush time and reports results through the updater.
pub trait Command: Send + Sync + 'static {
    fn run(
        &self,
        snap: CommandSnapshot,
        updater: LatestOnlyUpdater,
        cancel: CancellationToken,
    ) -> CommandFuture;
}
