//! "Which zones did this event hit?" notifications.

use tokio::sync::mpsc;

use crate::event::PointerEvent;
use crate::zone::Zone;

/// Sent once per zone that contains a pointer event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZoneInBounds {
    /// The zone that was hit.
    pub zone: Zone,
    /// The event that hit it.
    pub event: PointerEvent,
}

/// Receives [`ZoneInBounds`] notifications from
/// [`Manager::any_in_bounds`](crate::Manager::any_in_bounds).
pub trait ZoneHandler {
    fn zone_in_bounds(&mut self, msg: ZoneInBounds);
}

impl<F> ZoneHandler for F
where
    F: FnMut(ZoneInBounds),
{
    fn zone_in_bounds(&mut self, msg: ZoneInBounds) {
        self(msg)
    }
}

impl ZoneHandler for Vec<ZoneInBounds> {
    fn zone_in_bounds(&mut self, msg: ZoneInBounds) {
        self.push(msg);
    }
}

impl ZoneHandler for mpsc::UnboundedSender<ZoneInBounds> {
    fn zone_in_bounds(&mut self, msg: ZoneInBounds) {
        if self.send(msg).is_err() {
            tracing::warn!("zone handler channel closed; notification dropped");
        }
    }
}

/// Never blocks: a full channel drops the notification.
impl ZoneHandler for mpsc::Sender<ZoneInBounds> {
    fn zone_in_bounds(&mut self, msg: ZoneInBounds) {
        if let Err(e) = self.try_send(msg) {
            let msg = e.into_inner();
            tracing::warn!(
                zone = msg.zone.id(),
                "zone handler channel full or closed; notification dropped"
            );
        }
    }
}
