mod backend;
mod error;
mod events;
mod handle;
mod poller;
mod registry;
mod sdl;
mod types;

pub use crate::backend::{JoyBackend, RawDevice, RawEvent};
pub use crate::error::{Error, Result};
pub use crate::events::{ControlEvent, ControlKind, EventHandler, Notifier};
pub use crate::poller::JoyPoller;
pub use crate::sdl::{Sdl2Backend, SdlControllerDevice, SdlJoystickDevice};
pub use crate::types::{
    normalize_axis, DeviceClass, DeviceId, AXIS_DEADZONE, MAX_AXES, MAX_BUTTONS,
};

/// Poller wired to the SDL2 backend.
pub type SdlJoyPoller = JoyPoller<Sdl2Backend>;
