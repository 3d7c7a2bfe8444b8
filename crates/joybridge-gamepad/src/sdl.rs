use sdl2::controller::{Axis as SdlAxis, Button as SdlButton, GameController};
use sdl2::event::Event;
use sdl2::joystick::Joystick;
use sdl2::{EventPump, GameControllerSubsystem, JoystickSubsystem};

use crate::backend::{JoyBackend, RawDevice, RawEvent};
use crate::error::{Error, Result};
use crate::types::{DeviceClass, DeviceId};

// SDL numbering: position in these tables equals the raw index carried by
// controller button/axis events.
const CONTROLLER_BUTTONS: [SdlButton; 15] = [
    SdlButton::A,
    SdlButton::B,
    SdlButton::X,
    SdlButton::Y,
    SdlButton::Back,
    SdlButton::Guide,
    SdlButton::Start,
    SdlButton::LeftStick,
    SdlButton::RightStick,
    SdlButton::LeftShoulder,
    SdlButton::RightShoulder,
    SdlButton::DPadUp,
    SdlButton::DPadDown,
    SdlButton::DPadLeft,
    SdlButton::DPadRight,
];

const CONTROLLER_AXES: [SdlAxis; 6] = [
    SdlAxis::LeftX,
    SdlAxis::LeftY,
    SdlAxis::RightX,
    SdlAxis::RightY,
    SdlAxis::TriggerLeft,
    SdlAxis::TriggerRight,
];

/// A controller-class device plus the instance ID it was opened under.
pub struct SdlControllerDevice {
    dev: GameController,
    id: DeviceId,
}

impl RawDevice for SdlControllerDevice {
    fn instance_id(&self) -> DeviceId {
        self.id
    }

    fn name(&self) -> String {
        self.dev.name()
    }

    fn attached(&self) -> bool {
        self.dev.attached()
    }

    fn num_buttons(&self) -> u8 {
        CONTROLLER_BUTTONS.len() as u8
    }

    fn num_axes(&self) -> u8 {
        CONTROLLER_AXES.len() as u8
    }

    fn button(&self, index: u8) -> bool {
        CONTROLLER_BUTTONS
            .get(usize::from(index))
            .map_or(false, |button| self.dev.button(*button))
    }

    fn axis(&self, index: u8) -> i16 {
        CONTROLLER_AXES
            .get(usize::from(index))
            .map_or(0, |axis| self.dev.axis(*axis))
    }

    fn set_rumble(&mut self, low: u16, high: u16, duration_ms: u32) -> bool {
        self.dev.set_rumble(low, high, duration_ms).is_ok()
    }
}

/// A plain joystick device.
pub struct SdlJoystickDevice {
    dev: Joystick,
}

impl RawDevice for SdlJoystickDevice {
    fn instance_id(&self) -> DeviceId {
        self.dev.instance_id()
    }

    fn name(&self) -> String {
        self.dev.name()
    }

    fn attached(&self) -> bool {
        self.dev.attached()
    }

    fn num_buttons(&self) -> u8 {
        self.dev.num_buttons().min(u32::from(u8::MAX)) as u8
    }

    fn num_axes(&self) -> u8 {
        self.dev.num_axes().min(u32::from(u8::MAX)) as u8
    }

    fn button(&self, index: u8) -> bool {
        self.dev.button(u32::from(index)).unwrap_or(false)
    }

    fn axis(&self, index: u8) -> i16 {
        self.dev.axis(u32::from(index)).unwrap_or(0)
    }

    fn set_rumble(&mut self, low: u16, high: u16, duration_ms: u32) -> bool {
        self.dev.set_rumble(low, high, duration_ms).is_ok()
    }
}

/// SDL2-backed hardware abstraction layer.
///
/// Owns the SDL context, both device subsystems and the event pump, so it
/// must live on the thread that created it.
pub struct Sdl2Backend {
    _sdl: sdl2::Sdl,
    controller: GameControllerSubsystem,
    joystick: JoystickSubsystem,
    pump: EventPump,
}

impl Sdl2Backend {
    pub fn new() -> Result<Self> {
        let sdl = sdl2::init().map_err(Error::BackendInit)?;
        let controller = sdl.game_controller().map_err(Error::BackendInit)?;
        let joystick = sdl.joystick().map_err(Error::BackendInit)?;
        let pump = sdl.event_pump().map_err(Error::BackendInit)?;
        Ok(Self { _sdl: sdl, controller, joystick, pump })
    }

    fn convert(&self, event: Event) -> Option<RawEvent> {
        match event {
            Event::ControllerButtonDown { which, button, .. } => {
                Some(RawEvent::Button {
                    id: which,
                    class: DeviceClass::Controller,
                    index: button as u8,
                    pressed: true,
                })
            }
            Event::ControllerButtonUp { which, button, .. } => {
                Some(RawEvent::Button {
                    id: which,
                    class: DeviceClass::Controller,
                    index: button as u8,
                    pressed: false,
                })
            }
            Event::ControllerAxisMotion { which, axis, value, .. } => {
                Some(RawEvent::Axis {
                    id: which,
                    class: DeviceClass::Controller,
                    index: axis as u8,
                    value,
                })
            }
            Event::ControllerDeviceAdded { which, .. } => {
                Some(RawEvent::Added { slot: which })
            }
            Event::ControllerDeviceRemapped { which, .. } => {
                Some(RawEvent::Remapped { id: which })
            }
            Event::ControllerDeviceRemoved { which, .. } => {
                Some(RawEvent::Removed { id: which })
            }
            Event::JoyButtonDown { which, button_idx, .. } => {
                Some(RawEvent::Button {
                    id: which,
                    class: DeviceClass::Joystick,
                    index: button_idx,
                    pressed: true,
                })
            }
            Event::JoyButtonUp { which, button_idx, .. } => {
                Some(RawEvent::Button {
                    id: which,
                    class: DeviceClass::Joystick,
                    index: button_idx,
                    pressed: false,
                })
            }
            Event::JoyAxisMotion { which, axis_idx, value, .. } => {
                Some(RawEvent::Axis {
                    id: which,
                    class: DeviceClass::Joystick,
                    index: axis_idx,
                    value,
                })
            }
            Event::JoyDeviceAdded { which, .. } => {
                // Controller-capable slots also raise ControllerDeviceAdded;
                // keep only one insertion trigger per slot.
                if self.controller.is_game_controller(which) {
                    None
                } else {
                    Some(RawEvent::Added { slot: which })
                }
            }
            Event::JoyDeviceRemoved { which, .. } => {
                Some(RawEvent::Removed { id: which })
            }
            _ => None,
        }
    }
}

impl JoyBackend for Sdl2Backend {
    type Controller = SdlControllerDevice;
    type Joystick = SdlJoystickDevice;

    fn next_event(&mut self) -> Option<RawEvent> {
        while let Some(event) = self.pump.poll_event() {
            if let Some(raw) = self.convert(event) {
                return Some(raw);
            }
        }
        None
    }

    fn num_slots(&self) -> u32 {
        self.joystick.num_joysticks().unwrap_or(0)
    }

    fn is_controller_slot(&self, slot: u32) -> bool {
        self.controller.is_game_controller(slot)
    }

    fn open_controller(&mut self, slot: u32) -> Result<SdlControllerDevice> {
        let dev = self.controller.open(slot).map_err(|e| Error::Open {
            slot,
            reason: e.to_string(),
        })?;
        // The joystick view of the same slot yields the instance ID the
        // event stream will report for this device.
        let id = match self.joystick.open(slot) {
            Ok(js) => js.instance_id(),
            Err(_) => slot,
        };
        Ok(SdlControllerDevice { dev, id })
    }

    fn open_joystick(&mut self, slot: u32) -> Result<SdlJoystickDevice> {
        let dev = self.joystick.open(slot).map_err(|e| Error::Open {
            slot,
            reason: e.to_string(),
        })?;
        Ok(SdlJoystickDevice { dev })
    }
}
