use crate::backend::RawDevice;
use crate::types::DeviceClass;

/// Owned handle to an opened device, tagged with its class.
///
/// Exactly one variant is ever active for a given connection; the class never
/// changes after open. "No device" is expressed by registry entry absence,
/// never by a null handle.
pub(crate) enum Handle<C, J> {
    Controller(C),
    Joystick(J),
}

impl<C: RawDevice, J: RawDevice> Handle<C, J> {
    pub(crate) fn class(&self) -> DeviceClass {
        match self {
            Handle::Controller(_) => DeviceClass::Controller,
            Handle::Joystick(_) => DeviceClass::Joystick,
        }
    }

    pub(crate) fn device(&self) -> &dyn RawDevice {
        match self {
            Handle::Controller(dev) => dev,
            Handle::Joystick(dev) => dev,
        }
    }

    pub(crate) fn device_mut(&mut self) -> &mut dyn RawDevice {
        match self {
            Handle::Controller(dev) => dev,
            Handle::Joystick(dev) => dev,
        }
    }

    pub(crate) fn attached(&self) -> bool {
        self.device().attached()
    }

    /// Releases the underlying device through its matching close routine.
    pub(crate) fn close(self) {
        drop(self);
    }
}
