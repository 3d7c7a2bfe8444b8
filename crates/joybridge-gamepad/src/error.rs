use thiserror::Error;

use crate::types::DeviceId;

/// Error type for gamepad bridging operations.
#[derive(Debug, Error)]
pub enum Error {
    /// Failed to initialize the backend (SDL2 or subsystems).
    #[error("backend init failed: {0}")]
    BackendInit(String),
    /// Neither device class could be opened for a hardware slot.
    #[error("failed to open device in slot {slot}: {reason}")]
    Open { slot: u32, reason: String },
    /// Requested device was not found in the registry.
    #[error("device not found: {0}")]
    NotFound(DeviceId),
}

/// Convenient result alias for gamepad bridging operations.
pub type Result<T> = std::result::Result<T, Error>;
