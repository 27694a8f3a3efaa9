use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use crate::config::ManagerConfig;
use crate::dispatch::{ZoneHandler, ZoneInBounds};
use crate::error::ZoneError;
use crate::event::PointerEvent;
use crate::marker::{self, ESC};
use crate::registry::Registry;
use crate::scanner::Scanner;
use crate::store::{PositionStore, Update, Worker};
use crate::zone::Zone;

/// Owns the id registry, the position store and the worker that updates it.
///
/// Components call [`mark`](Manager::mark) while rendering; the outermost
/// view calls [`scan`](Manager::scan) once per frame on the composed output;
/// the event loop asks [`get`](Manager::get) or
/// [`any_in_bounds`](Manager::any_in_bounds) which zone a pointer event hit.
///
/// Positions are applied in the background, so a `get` right after `scan`
/// may still see the previous frame.
pub struct Manager {
    registry: Registry,
    store: PositionStore,
    worker: Worker,
    iteration: AtomicU64,
    enabled: AtomicBool,
}

impl std::fmt::Debug for Manager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Manager")
            .field("zones", &self.store.len())
            .field("enabled", &self.enabled())
            .field("closed", &self.worker.is_closed())
            .finish()
    }
}

impl Manager {
    /// Start a manager with the default configuration.
    pub fn new() -> Result<Self, ZoneError> {
        Self::with_config(ManagerConfig::default())
    }

    pub fn with_config(config: ManagerConfig) -> Result<Self, ZoneError> {
        config.validate()?;

        let store = PositionStore::default();
        let worker = Worker::spawn(store.clone(), config.queue_capacity)?;

        Ok(Self {
            registry: Registry::new(),
            store,
            worker,
            iteration: AtomicU64::new(0),
            enabled: AtomicBool::new(config.enabled),
        })
    }

    /// Wrap `text` in the invisible marker pair for `id`.
    ///
    /// Empty ids, empty text and a disabled manager all return `text`
    /// unchanged. The same id always gets the same markers.
    pub fn mark(&self, id: &str, text: &str) -> String {
        if id.is_empty() || text.is_empty() || !self.enabled() {
            return text.to_string();
        }
        self.registry.mark(id, text)
    }

    /// Strip zone markers from a rendered frame and queue their positions.
    ///
    /// Call this once per frame, from the outermost view, on the fully
    /// composed output. It blocks only if the update queue is full.
    pub fn scan(&self, text: &str) -> String {
        let out = self.scan_bytes(text.as_bytes());
        // Only whole ASCII marker sequences are removed, so this stays UTF-8.
        String::from_utf8(out)
            .unwrap_or_else(|e| String::from_utf8_lossy(e.as_bytes()).into_owned())
    }

    /// [`scan`](Manager::scan) for frames that may not be valid UTF-8.
    pub fn scan_bytes(&self, input: &[u8]) -> Vec<u8> {
        let enabled = self.enabled();
        let iteration = self.iteration.fetch_add(1, Ordering::Relaxed) + 1;

        let out = if input.contains(&ESC) {
            let (out, stats) = Scanner::new(&self.registry, iteration).run(input, |zone| {
                if enabled {
                    self.worker.send(Update::Zone(zone));
                }
            });
            tracing::trace!(
                iteration,
                markers = stats.markers,
                zones = stats.zones,
                unclosed = stats.unclosed,
                "scanned frame"
            );
            out
        } else {
            input.to_vec()
        };

        if enabled {
            self.worker.send(Update::IterationComplete(iteration));
        }
        out
    }

    /// Last known zone for `id`, or the empty zone.
    pub fn get(&self, id: &str) -> Zone {
        self.store.get(id)
    }

    /// Forget the zone for `id`.
    pub fn clear(&self, id: &str) {
        self.store.remove(id);
    }

    /// Every known zone, sorted by id.
    pub fn zones(&self) -> Vec<Zone> {
        self.store.snapshot()
    }

    pub fn len(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// See [`new_prefix`](crate::new_prefix).
    pub fn new_prefix(&self) -> String {
        marker::new_prefix()
    }

    /// Zones containing `event`, sorted by id.
    pub fn find_in_bounds(&self, event: &PointerEvent) -> Vec<Zone> {
        self.store.filtered(|zone| zone.in_bounds(event))
    }

    /// Send a [`ZoneInBounds`] to `handler` for each zone containing
    /// `event`, in id order. The store lock is released before the handler
    /// runs, so it may call back into the manager.
    pub fn any_in_bounds(&self, handler: &mut impl ZoneHandler, event: &PointerEvent) {
        for zone in self.find_in_bounds(event) {
            handler.zone_in_bounds(ZoneInBounds {
                zone,
                event: *event,
            });
        }
    }

    /// Turn marking and position tracking on or off. While disabled, `mark`
    /// returns its input and `scan` strips known markers without updating
    /// the store.
    pub fn set_enabled(&self, enabled: bool) {
        self.enabled.store(enabled, Ordering::Relaxed);
    }

    pub fn enabled(&self) -> bool {
        self.enabled.load(Ordering::Relaxed)
    }

    /// Stop the background worker. Zones stay as they are; later scans still
    /// strip markers but their positions are never applied.
    pub fn close(&self) {
        self.worker.close();
    }

    pub fn is_closed(&self) -> bool {
        self.worker.is_closed()
    }
}
