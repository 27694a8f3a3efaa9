//! Id <-> marker registry.
//!
//! Lookups of already-known ids take the read lock only; the write lock is
//! held just long enough to allocate a marker for a new id.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;

use crate::marker;

#[derive(Debug, Default)]
struct Maps {
    /// user id -> marker sequence
    ids: HashMap<String, Arc<str>>,
    /// marker number -> user id
    rids: HashMap<u64, Arc<str>>,
}

#[derive(Debug, Default)]
pub(crate) struct Registry {
    maps: RwLock<Maps>,
}

impl Registry {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Marker sequence for `id`, allocating one on first use.
    pub(crate) fn marker_for(&self, id: &str) -> Arc<str> {
        if let Some(seq) = self.maps.read().ids.get(id) {
            return Arc::clone(seq);
        }

        let mut maps = self.maps.write();
        // Another caller may have allocated it between the two locks.
        if let Some(seq) = maps.ids.get(id) {
            return Arc::clone(seq);
        }

        let number = marker::next_number();
        let seq: Arc<str> = marker::encode(number).into();
        let owned: Arc<str> = id.into();
        maps.ids.insert(id.to_string(), Arc::clone(&seq));
        maps.rids.insert(number, owned);
        tracing::trace!(id, number, "allocated zone marker");
        seq
    }

    /// Wrap `text` in the marker pair for `id`.
    pub(crate) fn mark(&self, id: &str, text: &str) -> String {
        let seq = self.marker_for(id);
        let mut out = String::with_capacity(text.len() + seq.len() * 2);
        out.push_str(&seq);
        out.push_str(text);
        out.push_str(&seq);
        out
    }

    /// User id owning marker `number`, if this registry allocated it.
    pub(crate) fn resolve(&self, number: u64) -> Option<Arc<str>> {
        self.maps.read().rids.get(&number).cloned()
    }
}
