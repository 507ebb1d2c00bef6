//! Channels that carry compute updates from async commands back to
//! [`crate::StateCtx`].

use std::any::{Any, TypeId, type_name};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use flume::{Receiver, Sender};

use crate::Compute;

/// A boxed compute value waiting to be applied by `sync_computes`.
pub(crate) struct Update {
    pub(crate) type_id: TypeId,
    pub(crate) type_name: &'static str,
    pub(crate) value: Box<dyn Any + Send>,
}

pub(crate) fn channel() -> (Updater, Receiver<Update>) {
    let (send, recv) = flume::unbounded();
    (Updater { send }, recv)
}

/// Publishes new compute values. Cheap to clone; safe to move into tasks.
#[derive(Debug, Clone)]
pub struct Updater {
    send: Sender<Update>,
}

impl Updater {
    pub fn set<T: Compute>(&self, value: T) {
        let update = Update {
            type_id: TypeId::of::<T>(),
            type_name: type_name::<T>(),
            value: Box::new(value),
        };
        if self.send.send(update).is_err() {
            log::warn!("state context dropped, update for {} lost", type_name::<T>());
        }
    }
}

/// An [`Updater`] bound to one command run.
///
/// Every dispatch of a command bumps the command's latest generation. Once a
/// newer run exists, values published by older runs are dropped so a slow
/// response can never overwrite a fresher one.
#[derive(Debug, Clone)]
pub struct LatestOnlyUpdater {
    inner: Updater,
    generation: u64,
    latest: Arc<AtomicU64>,
}

impl LatestOnlyUpdater {
    pub(crate) fn new(inner: Updater, generation: u64, latest: Arc<AtomicU64>) -> Self {
        Self {
            inner,
            generation,
            latest,
        }
    }

    /// Generation of the run that owns this updater.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Whether a newer run of the same command has been dispatched.
    pub fn is_stale(&self) -> bool {
        self.latest.load(Ordering::Acquire) != self.generation
    }

    pub fn set<T: Compute>(&self, value: T) {
        if self.is_stale() {
            log::debug!(
                "dropping stale {} from generation {}",
                type_name::<T>(),
                self.generation
            );
            return;
        }
        self.inner.set(value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Default)]
    struct Probe(u8);

    crate::snapshot_state!(Probe);
    impl Compute for Probe {}

    #[test]
    fn updater_sends_typed_update() {
        let (updater, recv) = channel();
        updater.set(Probe(4));

        let update = recv.try_recv().expect("update should be queued");
        assert_eq!(update.type_id, TypeId::of::<Probe>());
        assert_eq!(update.value.downcast_ref::<Probe>().map(|p| p.0), Some(4));
    }

    #[test]
    fn latest_only_drops_superseded_generation() {
        let (updater, recv) = channel();
        let latest = Arc::new(AtomicU64::new(1));
        let first = LatestOnlyUpdater::new(updater.clone(), 1, latest.clone());

        first.set(Probe(1));
        assert!(recv.try_recv().is_ok());

        latest.store(2, Ordering::Release);
        assert!(first.is_stale());
        first.set(Probe(2));
        assert!(recv.try_recv().is_err());

        let second = LatestOnlyUpdater::new(updater, 2, latest);
        second.set(Probe(3));
        assert!(recv.try_recv().is_ok());
    }
}
