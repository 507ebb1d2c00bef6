use std::any::{TypeId, type_name};
use std::collections::BTreeMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use flume::Receiver;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;

use crate::error::{Error, Result};
use crate::updater::{self, Update};
use crate::{Command, CommandSnapshot, Compute, LatestOnlyUpdater, State, TaskHandle, TaskId, Updater};

struct Entry {
    name: &'static str,
    is_compute: bool,
    value: Box<dyn State>,
}

struct CommandEntry {
    name: &'static str,
    command: Box<dyn Command>,
    latest: Arc<AtomicU64>,
    running: Option<TaskHandle>,
}

/// Owns every state, compute and command of the application.
///
/// The UI thread is the only owner. Async work happens in commands spawned on
/// the ambient Tokio runtime; their results come back through the update
/// channel and become visible after [`StateCtx::sync_computes`].
pub struct StateCtx {
    storage: BTreeMap<TypeId, Entry>,
    commands: BTreeMap<TypeId, CommandEntry>,
    queue: Vec<(TypeId, &'static str)>,
    updater: Updater,
    updates: Receiver<Update>,
    generation: u64,
    tasks: JoinSet<()>,
}

impl Default for StateCtx {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for StateCtx {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let states: Vec<&str> = self.storage.values().map(|e| e.name).collect();
        let commands: Vec<&str> = self.commands.values().map(|e| e.name).collect();
        f.debug_struct("StateCtx")
            .field("states", &states)
            .field("commands", &commands)
            .field("queued", &self.queue.len())
            .field("generation", &self.generation)
            .field("tasks", &self.tasks.len())
            .finish()
    }
}

impl StateCtx {
    pub fn new() -> Self {
        let (updater, updates) = updater::channel();
        Self {
            storage: BTreeMap::new(),
            commands: BTreeMap::new(),
            queue: Vec::new(),
            updater,
            updates,
            generation: 0,
            tasks: JoinSet::new(),
        }
    }

    pub fn add_state<T: State>(&mut self, state: T) {
        self.insert(state, false);
    }

    pub fn record_compute<T: Compute>(&mut self, compute: T) {
        self.insert(compute, true);
    }

    fn insert<T: State>(&mut self, value: T, is_compute: bool) {
        let previous = self.storage.insert(
            TypeId::of::<T>(),
            Entry {
                name: type_name::<T>(),
                is_compute,
                value: Box::new(value),
            },
        );
        if previous.is_some() {
            log::warn!("{} registered twice, keeping the latest", type_name::<T>());
        }
    }

    pub fn record_command<C: Command>(&mut self, command: C) {
        self.commands.insert(
            TypeId::of::<C>(),
            CommandEntry {
                name: type_name::<C>(),
                command: Box::new(command),
                latest: Arc::new(AtomicU64::new(0)),
                running: None,
            },
        );
    }

    pub fn try_state<T: State>(&self) -> Result<&T> {
        self.storage
            .get(&TypeId::of::<T>())
            .and_then(|entry| entry.value.as_any().downcast_ref::<T>())
            .ok_or_else(|| Error::state_not_found(type_name::<T>(), "state"))
    }

    /// # Panics
    /// Panics if `T` was never registered.
    pub fn state<T: State>(&self) -> &T {
        self.try_state::<T>().unwrap_or_else(|err| panic!("{err}"))
    }

    /// # Panics
    /// Panics if `T` was never registered.
    pub fn state_mut<T: State>(&mut self) -> &mut T {
        self.storage
            .get_mut(&TypeId::of::<T>())
            .and_then(|entry| entry.value.as_any_mut().downcast_mut::<T>())
            .unwrap_or_else(|| {
                panic!("{}", Error::state_not_found(type_name::<T>(), "state_mut"))
            })
    }

    pub fn update<T: State>(&mut self, f: impl FnOnce(&mut T)) {
        f(self.state_mut::<T>());
    }

    pub fn try_compute<T: Compute>(&self) -> Result<&T> {
        self.storage
            .get(&TypeId::of::<T>())
            .filter(|entry| entry.is_compute)
            .and_then(|entry| entry.value.as_any().downcast_ref::<T>())
            .ok_or_else(|| Error::compute_not_found(type_name::<T>(), "cached"))
    }

    /// Latest synced value of a compute, `None` when it was never recorded.
    pub fn cached<T: Compute>(&self) -> Option<&T> {
        self.try_compute::<T>().ok()
    }

    pub fn updater(&self) -> Updater {
        self.updater.clone()
    }

    /// Applies every compute update published since the last call.
    pub fn sync_computes(&mut self) {
        for update in self.updates.try_iter() {
            match self.storage.get_mut(&update.type_id) {
                Some(entry) if entry.is_compute => entry.value.assign_box(update.value),
                Some(_) => log::warn!("{} is a state, not a compute; update dropped", update.type_name),
                None => log::warn!("{} is not recorded; update dropped", update.type_name),
            }
        }

        while let Some(finished) = self.tasks.try_join_next() {
            match finished {
                Err(err) if err.is_panic() => log::error!("command task panicked: {err}"),
                _ => {}
            }
        }
    }

    /// Whether any spawned command has not finished yet.
    pub fn has_running_tasks(&self) -> bool {
        !self.tasks.is_empty()
    }

    /// Queues a command; it is spawned by the next [`StateCtx::flush_commands`].
    pub fn enqueue_command<C: Command>(&mut self) {
        self.queue.push((TypeId::of::<C>(), type_name::<C>()));
    }

    pub fn pending_commands(&self) -> usize {
        self.queue.len()
    }

    pub fn dispatch<C: Command>(&mut self) {
        self.enqueue_command::<C>();
        self.flush_commands();
    }

    /// Spawns every queued command on the current Tokio runtime.
    ///
    /// A new run of a command supersedes the previous one: the old token is
    /// cancelled and its later updates are dropped.
    pub fn flush_commands(&mut self) {
        if self.queue.is_empty() {
            return;
        }
        if tokio::runtime::Handle::try_current().is_err() {
            log::error!(
                "no Tokio runtime available, {} queued command(s) left pending",
                self.queue.len()
            );
            return;
        }

        for (id, name) in std::mem::take(&mut self.queue) {
            let snap = self.snapshot();
            self.generation += 1;
            let generation = self.generation;
            let updater = self.updater.clone();

            let Some(entry) = self.commands.get_mut(&id) else {
                log::error!("{}", Error::command_not_found(name));
                continue;
            };

            entry.latest.store(generation, Ordering::Release);
            let handle = TaskHandle::new(TaskId::new(id, generation), CancellationToken::new());
            if let Some(previous) = entry.running.replace(handle.clone()) {
                previous.cancel();
            }

            log::debug!("spawning {} (generation {generation})", entry.name);
            let updater = LatestOnlyUpdater::new(updater, generation, entry.latest.clone());
            let future = entry
                .command
                .run(snap, updater, handle.cancellation_token());
            self.tasks.spawn(future);
        }
    }

    /// Id of the most recent run of `C`, if it was ever spawned.
    pub fn latest_task<C: Command>(&self) -> Option<TaskId> {
        self.commands
            .get(&TypeId::of::<C>())
            .and_then(|entry| entry.running.as_ref())
            .map(TaskHandle::id)
    }

    pub fn task_count(&self) -> usize {
        self.tasks.len()
    }

    pub fn task_set_mut(&mut self) -> &mut JoinSet<()> {
        &mut self.tasks
    }

    /// Cancels and aborts all running commands.
    pub async fn shutdown(&mut self) {
        for entry in self.commands.values_mut() {
            if let Some(handle) = entry.running.take() {
                handle.cancel();
            }
        }
        self.tasks.abort_all();
        while self.tasks.join_next().await.is_some() {}
        self.queue.clear();
    }

    fn snapshot(&self) -> CommandSnapshot {
        let mut snap = CommandSnapshot::new();
        for (id, entry) in &self.storage {
            if let Some(cloned) = entry.value.snapshot() {
                snap.insert_cloned(*id, cloned);
            }
        }
        snap
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::{CommandFuture, snapshot_state};

    #[derive(Debug, Clone, Default)]
    struct EchoInput {
        value: String,
        delay_ms: u64,
    }
    snapshot_state!(EchoInput);

    #[derive(Debug, Clone, Default)]
    struct EchoCompute {
        value: Option<String>,
    }
    snapshot_state!(EchoCompute);
    impl Compute for EchoCompute {}

    #[derive(Debug, Clone, Default)]
    struct Unrecorded;
    snapshot_state!(Unrecorded);
    impl Compute for Unrecorded {}

    struct EchoCommand;

    impl Command for EchoCommand {
        fn run(
            &self,
            snap: CommandSnapshot,
            updater: LatestOnlyUpdater,
            cancel: CancellationToken,
        ) -> CommandFuture {
            let input = snap.state::<EchoInput>().clone();
            Box::pin(async move {
                tokio::select! {
                    _ = cancel.cancelled() => {}
                    _ = tokio::time::sleep(Duration::from_millis(input.delay_ms)) => {}
                }
                updater.set(EchoCompute {
                    value: Some(input.value),
                });
            })
        }
    }

    fn setup_ctx() -> StateCtx {
        let mut ctx = StateCtx::new();
        ctx.add_state(EchoInput::default());
        ctx.record_compute(EchoCompute::default());
        ctx.record_command(EchoCommand);
        ctx
    }

    async fn wait_all(ctx: &mut StateCtx) {
        while ctx.task_set_mut().join_next().await.is_some() {}
        ctx.sync_computes();
    }

    #[test]
    fn state_and_update_round_trip() {
        let mut ctx = setup_ctx();
        ctx.update::<EchoInput>(|input| input.value = "hello".to_string());
        assert_eq!(ctx.state::<EchoInput>().value, "hello");
    }

    #[test]
    fn missing_state_reports_error() {
        let ctx = StateCtx::new();
        let err = ctx.try_state::<EchoInput>().unwrap_err();
        assert!(err.to_string().contains("EchoInput"));
    }

    #[test]
    fn cached_ignores_plain_states() {
        let ctx = setup_ctx();
        assert!(ctx.cached::<EchoCompute>().is_some());

        let err = ctx.try_compute::<Unrecorded>().unwrap_err();
        assert!(matches!(err, Error::ComputeNotFound { .. }));
    }

    #[tokio::test]
    async fn unrecorded_command_is_skipped() {
        struct Orphan;
        impl Command for Orphan {
            fn run(
                &self,
                _snap: CommandSnapshot,
                _updater: LatestOnlyUpdater,
                _cancel: CancellationToken,
            ) -> CommandFuture {
                Box::pin(async {})
            }
        }

        let mut ctx = setup_ctx();
        ctx.dispatch::<Orphan>();
        assert_eq!(ctx.pending_commands(), 0);
        assert_eq!(ctx.task_count(), 0);
    }

    #[test]
    fn updates_wait_for_sync() {
        let mut ctx = setup_ctx();
        ctx.updater().set(EchoCompute {
            value: Some("x".to_string()),
        });
        assert_eq!(ctx.cached::<EchoCompute>().and_then(|c| c.value.clone()), None);

        ctx.sync_computes();
        assert_eq!(
            ctx.cached::<EchoCompute>().and_then(|c| c.value.clone()),
            Some("x".to_string())
        );
    }

    #[tokio::test]
    async fn dispatch_runs_command_with_snapshot() {
        let mut ctx = setup_ctx();
        ctx.update::<EchoInput>(|input| input.value = "first".to_string());
        ctx.dispatch::<EchoCommand>();

        // Later edits must not leak into the already-spawned run.
        ctx.update::<EchoInput>(|input| input.value = "edited".to_string());
        wait_all(&mut ctx).await;

        assert_eq!(
            ctx.cached::<EchoCompute>().and_then(|c| c.value.clone()),
            Some("first".to_string())
        );
    }

    #[tokio::test]
    async fn newer_dispatch_wins_over_slower_older_run() {
        let mut ctx = setup_ctx();

        ctx.update::<EchoInput>(|input| {
            input.value = "old".to_string();
            input.delay_ms = 200;
        });
        ctx.dispatch::<EchoCommand>();
        let first = ctx.latest_task::<EchoCommand>().expect("first run");

        ctx.update::<EchoInput>(|input| {
            input.value = "new".to_string();
            input.delay_ms = 0;
        });
        ctx.dispatch::<EchoCommand>();
        let second = ctx.latest_task::<EchoCommand>().expect("second run");
        assert!(second.generation() > first.generation());

        wait_all(&mut ctx).await;
        assert_eq!(
            ctx.cached::<EchoCompute>().and_then(|c| c.value.clone()),
            Some("new".to_string())
        );
    }

    #[test]
    fn flush_without_runtime_keeps_queue() {
        let mut ctx = setup_ctx();
        ctx.enqueue_command::<EchoCommand>();
        ctx.flush_commands();
        assert_eq!(ctx.pending_commands(), 1);
        assert_eq!(ctx.task_count(), 0);
    }

    #[tokio::test]
    async fn shutdown_clears_tasks() {
        let mut ctx = setup_ctx();
        ctx.update::<EchoInput>(|input| input.delay_ms = 10_000);
        ctx.dispatch::<EchoCommand>();
        assert_eq!(ctx.task_count(), 1);

        ctx.shutdown().await;
        assert_eq!(ctx.task_count(), 0);
    }

    #[tokio::test]
    async fn sync_reaps_finished_tasks() {
        let mut ctx = setup_ctx();
        ctx.dispatch::<EchoCommand>();
        assert!(ctx.has_running_tasks());

        for _ in 0..50 {
            tokio::time::sleep(Duration::from_millis(5)).await;
            ctx.sync_computes();
            if !ctx.has_running_tasks() {
                break;
            }
        }
        assert!(!ctx.has_running_tasks());
        assert_eq!(
            ctx.cached::<EchoCompute>().and_then(|c| c.value.clone()),
            Some(String::new())
        );
    }
}
