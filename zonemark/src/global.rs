//! Process-wide manager.
//!
//! Handy when you control every component and don't want to thread a
//! [`Manager`] through them. Libraries should take a `&Manager` from their
//! caller instead.
//!
//! Call [`init_global`] once at startup. Every other function here panics if
//! it runs first; that is a setup bug, not something to recover from.

use std::sync::OnceLock;

use parking_lot::Mutex;

use crate::dispatch::ZoneHandler;
use crate::error::ZoneError;
use crate::event::PointerEvent;
use crate::manager::Manager;
use crate::zone::Zone;

static GLOBAL: OnceLock<Manager> = OnceLock::new();

/// Serializes [`init_global`] so only one manager (and worker) is built.
static INIT: Mutex<()> = Mutex::new(());

/// Create the global manager. Calling it again is a no-op.
pub fn init_global() -> Result<(), ZoneError> {
    if GLOBAL.get().is_some() {
        return Ok(());
    }

    let _guard = INIT.lock();
    if GLOBAL.get().is_none() {
        let manager = Manager::new()?;
        if GLOBAL.set(manager).is_err() {
            tracing::warn!("global zone manager set outside init_global");
        }
    }
    Ok(())
}

/// The global manager, or [`ZoneError::NotInitialized`].
pub fn try_global() -> Result<&'static Manager, ZoneError> {
    GLOBAL.get().ok_or(ZoneError::NotInitialized)
}

/// The global manager.
///
/// # Panics
///
/// If [`init_global`] has not been called.
pub fn global() -> &'static Manager {
    match GLOBAL.get() {
        Some(manager) => manager,
        None => panic!("{}", ZoneError::NotInitialized),
    }
}

pub fn mark(id: &str, text: &str) -> String {
    global().mark(id, text)
}

pub fn scan(text: &str) -> String {
    global().scan(text)
}

pub fn scan_bytes(bytes: &[u8]) -> Vec<u8> {
    global().scan_bytes(bytes)
}

pub fn get(id: &str) -> Zone {
    global().get(id)
}

pub fn clear(id: &str) {
    global().clear(id)
}

pub fn new_prefix() -> String {
    global().new_prefix()
}

pub fn find_in_bounds(event: &PointerEvent) -> Vec<Zone> {
    global().find_in_bounds(event)
}

pub fn any_in_bounds(handler: &mut impl ZoneHandler, event: &PointerEvent) {
    global().any_in_bounds(handler, event)
}

pub fn set_enabled(enabled: bool) {
    global().set_enabled(enabled)
}

pub fn enabled() -> bool {
    global().enabled()
}

/// Stop the global worker. The manager itself lives until process exit.
pub fn close() {
    global().close()
}
