//! # zonemark
//!
//! Track where named regions of rendered terminal text end up on screen, so
//! mouse events can be routed back to the component that drew them.
//!
//! Components wrap what they render with [`Manager::mark`]. The outermost
//! view hands the composed frame to [`Manager::scan`], which strips the
//! (invisible, zero-width) markers and records each zone's start and end
//! cell in the background. The event loop then hit-tests pointer events
//! with [`Zone::in_bounds`] or [`Manager::any_in_bounds`].
//!
//! ```
//! use zonemark::{Manager, PointerEvent};
//!
//! let zones = Manager::new()?;
//! let frame = format!("menu: {}", zones.mark("file", "File"));
//! assert_eq!(zones.scan(&frame), "menu: File");
//!
//! // Positions land asynchronously; by the next pointer event they are there.
//! let hit = zones.get("file").in_bounds(&PointerEvent::at(7, 0));
//! # let _ = hit;
//! # Ok::<(), zonemark::ZoneError>(())
//! ```
//!
//! - `registry` / `marker`: id <-> marker allocation and marker syntax
//! - `scanner`: single-pass marker stripping and position recovery
//! - `store`: position map and its background worker
//! - `zone`: bounds and offset predicates
//! - `global`: optional process-wide manager

mod config;
mod dispatch;
mod error;
mod event;
mod manager;
mod marker;
mod registry;
mod scanner;
mod store;
mod width;
mod zone;

pub mod global;

pub use config::{DEFAULT_QUEUE_CAPACITY, ManagerConfig};
pub use dispatch::{ZoneHandler, ZoneInBounds};
pub use error::ZoneError;
pub use event::{PointerAction, PointerButton, PointerEvent};
pub use manager::Manager;
pub use marker::new_prefix;
pub use width::display_width;
pub use zone::{Position, Zone};
