//! Position store and the worker that feeds it.
//!
//! The scanner never touches the map. It pushes [`Update`]s into a bounded
//! queue, and one worker thread per manager applies them under the write
//! lock. Readers only ever take the read lock.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, SyncSender};
use std::thread::JoinHandle;

use parking_lot::{Mutex, RwLock};

use crate::error::ZoneError;
use crate::zone::Zone;

/// Messages from the scanner to the worker.
#[derive(Debug)]
pub(crate) enum Update {
    /// A zone observed during a scan.
    Zone(Zone),
    /// Every zone of this iteration has been sent; drop the rest.
    IterationComplete(u64),
    Shutdown,
}

#[derive(Debug, Clone, Default)]
pub(crate) struct PositionStore {
    zones: Arc<RwLock<HashMap<String, Zone>>>,
}

impl PositionStore {
    pub(crate) fn get(&self, id: &str) -> Zone {
        self.zones.read().get(id).cloned().unwrap_or_default()
    }

    pub(crate) fn remove(&self, id: &str) {
        self.zones.write().remove(id);
    }

    /// All zones, sorted by id.
    pub(crate) fn snapshot(&self) -> Vec<Zone> {
        let mut zones: Vec<Zone> = self.zones.read().values().cloned().collect();
        zones.sort_by(|a, b| a.id().cmp(b.id()));
        zones
    }

    /// Zones accepted by `pred`, sorted by id. Filters under the read lock so
    /// only matches are cloned.
    pub(crate) fn filtered(&self, mut pred: impl FnMut(&Zone) -> bool) -> Vec<Zone> {
        let mut zones: Vec<Zone> = self
            .zones
            .read()
            .values()
            .filter(|z| pred(z))
            .cloned()
            .collect();
        zones.sort_by(|a, b| a.id().cmp(b.id()));
        zones
    }

    pub(crate) fn len(&self) -> usize {
        self.zones.read().len()
    }

    fn apply(&self, update: Update) {
        match update {
            Update::Zone(zone) => {
                self.zones.write().insert(zone.id().to_string(), zone);
            }
            Update::IterationComplete(iteration) => {
                let mut zones = self.zones.write();
                let before = zones.len();
                zones.retain(|_, z| z.iteration() == iteration);
                let evicted = before - zones.len();
                if evicted > 0 {
                    tracing::debug!(iteration, evicted, "evicted stale zones");
                }
            }
            Update::Shutdown => {}
        }
    }
}

/// Handle to the background worker.
#[derive(Debug)]
pub(crate) struct Worker {
    tx: SyncSender<Update>,
    closed: Arc<AtomicBool>,
    handle: Mutex<Option<JoinHandle<()>>>,
}

impl Worker {
    pub(crate) fn spawn(store: PositionStore, capacity: usize) -> Result<Self, ZoneError> {
        let (tx, rx) = mpsc::sync_channel(capacity);
        let closed = Arc::new(AtomicBool::new(false));

        let worker_closed = Arc::clone(&closed);
        let handle = std::thread::Builder::new()
            .name("zone-worker".to_string())
            .spawn(move || run(store, rx, worker_closed))?;

        Ok(Self {
            tx,
            closed,
            handle: Mutex::new(Some(handle)),
        })
    }

    /// Queue an update, blocking while the queue is full. Updates sent after
    /// `close` are dropped.
    pub(crate) fn send(&self, update: Update) {
        if self.tx.send(update).is_err() {
            tracing::trace!("zone worker stopped; update dropped");
        }
    }

    pub(crate) fn is_closed(&self) -> bool {
        self.closed.load(Ordering::Acquire)
    }

    /// Stop the worker and wait for it to exit. Idempotent.
    pub(crate) fn close(&self) {
        self.closed.store(true, Ordering::Release);

        // A full queue means the worker is busy and will see the flag on its
        // next message.
        let _ = self.tx.try_send(Update::Shutdown);

        let handle = self.handle.lock().take();
        if let Some(handle) = handle {
            if handle.join().is_err() {
                tracing::warn!("zone worker panicked");
            }
        }
    }
}

impl Drop for Worker {
    fn drop(&mut self) {
        self.close();
    }
}

fn run(store: PositionStore, rx: Receiver<Update>, closed: Arc<AtomicBool>) {
    tracing::debug!("zone worker started");

    while let Ok(update) = rx.recv() {
        if closed.load(Ordering::Acquire) || matches!(update, Update::Shutdown) {
            break;
        }
        store.apply(update);
    }

    tracing::debug!("zone worker stopped");
}
