use crate::types::DeviceId;

/// Which control on the device changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlKind {
    Button,
    Axis,
}

/// A normalized state transition on a single control.
///
/// Buttons carry `0`/`1`, axes the quantized `-1`/`0`/`1`. Axis events are
/// only ever emitted with `value != previous`; button events fire on every
/// raw edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControlEvent {
    pub device: DeviceId,
    pub kind: ControlKind,
    pub index: u8,
    pub value: i8,
    pub previous: i8,
}

/// Dispatch capability of the consuming event system.
///
/// Returns whether the event was handled. When no handler is attached the
/// poller still maintains its state cache but emits nothing.
pub trait EventHandler {
    fn dispatch(&mut self, event: &ControlEvent) -> bool;
}

/// Fire-and-forget sink for transient user-visible messages, invoked only
/// on device connect/disconnect.
pub trait Notifier {
    fn show_message(&mut self, text: &str);
}
