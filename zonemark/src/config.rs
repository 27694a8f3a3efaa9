use serde::{Deserialize, Serialize};

use crate::error::ZoneError;

/// Default number of pending updates before `scan` applies backpressure.
pub const DEFAULT_QUEUE_CAPACITY: usize = 200;

/// Manager settings. Every field has a default, so a host application can
/// embed this in its own config file and only spell out what it overrides.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ManagerConfig {
    /// Bounded capacity of the scanner -> worker queue.
    pub queue_capacity: usize,
    /// Initial state of the enable switch.
    pub enabled: bool,
}

impl Default for ManagerConfig {
    fn default() -> Self {
        Self {
            queue_capacity: DEFAULT_QUEUE_CAPACITY,
            enabled: true,
        }
    }
}

impl ManagerConfig {
    pub fn validate(&self) -> Result<(), ZoneError> {
        if self.queue_capacity == 0 {
            return Err(ZoneError::InvalidQueueCapacity);
        }
        Ok(())
    }
}
