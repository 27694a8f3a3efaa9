use thiserror::Error;

/// Errors raised while building a [`Manager`](crate::Manager) or reaching the
/// global one. Scanning and lookups never fail.
#[derive(Debug, Error)]
pub enum ZoneError {
    #[error("update queue capacity must be at least 1")]
    InvalidQueueCapacity,

    #[error("failed to spawn zone worker: {0}")]
    WorkerSpawn(#[from] std::io::Error),

    #[error("zone manager not initialized")]
    NotInitialized,
}
