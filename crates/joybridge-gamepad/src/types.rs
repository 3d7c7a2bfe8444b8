/// Unique identifier of a connected device.
///
/// This is the hardware-assigned instance ID, which stays unique for the
/// lifetime of a single physical connection and is never reused across
/// reconnects. Slot indices, by contrast, can be recycled by the enumerator.
pub type DeviceId = u32;

/// How a device was opened. The classification is decided once at connect
/// time and never changes for the life of the connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeviceClass {
    /// Recognized by the backend as having a standardized button/axis layout.
    Controller,
    /// Anything else with buttons and axes.
    Joystick,
}

/// Upper bound of the per-device button state cache.
pub const MAX_BUTTONS: usize = 32;

/// Upper bound of the per-device axis state cache.
pub const MAX_AXES: usize = 8;

/// Symmetric deadzone applied when quantizing a raw axis reading,
/// roughly 25% of the signed 16-bit range in each direction.
pub const AXIS_DEADZONE: i16 = 0x1fff;

/// Quantizes a raw signed 16-bit axis reading to `-1`, `0` or `1`.
#[must_use]
pub fn normalize_axis(raw: i16) -> i8 {
    if raw > AXIS_DEADZONE {
        1
    } else if raw < -AXIS_DEADZONE {
        -1
    } else {
        0
    }
}
