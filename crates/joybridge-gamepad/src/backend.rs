use crate::error::Result;
use crate::types::{DeviceClass, DeviceId};

/// A raw hardware event drained from the backend queue.
///
/// Button and axis records carry the class of the event family they arrived
/// on: SDL reports controller-class devices on both the controller and the
/// joystick event families, and the translator uses the class tag to drop
/// the duplicate joystick-level copies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RawEvent {
    Button {
        id: DeviceId,
        class: DeviceClass,
        index: u8,
        pressed: bool,
    },
    Axis {
        id: DeviceId,
        class: DeviceClass,
        index: u8,
        value: i16,
    },
    /// A device appeared in an enumeration slot.
    Added { slot: u32 },
    /// An already-open device had its mapping rebuilt by the backend.
    Remapped { id: DeviceId },
    /// A device went away.
    Removed { id: DeviceId },
}

/// State queries against a single opened device.
pub trait RawDevice {
    fn instance_id(&self) -> DeviceId;
    fn name(&self) -> String;
    /// Whether the underlying device is still physically connected.
    fn attached(&self) -> bool;
    fn num_buttons(&self) -> u8;
    fn num_axes(&self) -> u8;
    /// Current pressed state of a button, `false` for unknown indices.
    fn button(&self, index: u8) -> bool;
    /// Current raw reading of an axis, `0` for unknown indices.
    fn axis(&self, index: u8) -> i16;
    /// Best-effort rumble. Returns whether the device accepted the request.
    fn set_rumble(&mut self, low: u16, high: u16, duration_ms: u32) -> bool {
        let _ = (low, high, duration_ms);
        false
    }
}

/// The hardware abstraction layer: a drainable raw event queue plus device
/// enumeration and opening.
pub trait JoyBackend {
    type Controller: RawDevice;
    type Joystick: RawDevice;

    /// Pops the next pending raw event, or `None` when the queue is empty.
    fn next_event(&mut self) -> Option<RawEvent>;

    /// Number of currently visible enumeration slots.
    fn num_slots(&self) -> u32;

    /// Whether the device in `slot` is recognized as controller-capable.
    fn is_controller_slot(&self, slot: u32) -> bool;

    fn open_controller(&mut self, slot: u32) -> Result<Self::Controller>;

    fn open_joystick(&mut self, slot: u32) -> Result<Self::Joystick>;
}
