use std::time::{Duration, Instant};

use log::debug;

use crate::backend::{JoyBackend, RawEvent};
use crate::error::{Error, Result};
use crate::events::{ControlEvent, ControlKind, EventHandler, Notifier};
use crate::handle::Handle;
use crate::registry::{DeviceEntry, Registry};
use crate::types::{normalize_axis, DeviceClass, DeviceId};

/// How long the raw queue may stay silent before the poll fallback re-reads
/// every tracked device.
const IDLE_THRESHOLD: Duration = Duration::from_millis(1000);

/// Length of one rumble pulse; re-asserted on every poll while active.
const RUMBLE_PULSE_MS: u32 = 500;

/// Bridges raw gamepad/joystick hardware events into a normalized,
/// change-only event stream.
///
/// Designed to be owned by the input subsystem and driven synchronously from
/// the GUI tick loop: call [`poll`](Self::poll) periodically. Each call
/// drains the backend queue fully, and falls back to re-reading full device
/// state when the queue has been silent past the idle threshold.
pub struct JoyPoller<B: JoyBackend> {
    backend: B,
    devices: Registry<B::Controller, B::Joystick>,
    handler: Option<Box<dyn EventHandler>>,
    notifier: Option<Box<dyn Notifier>>,
    auto_add: bool,
    rumbling: bool,
    last_activity: Instant,
    idle_threshold: Duration,
}

impl<B: JoyBackend> JoyPoller<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            devices: Registry::new(),
            handler: None,
            notifier: None,
            auto_add: false,
            rumbling: false,
            last_activity: Instant::now(),
            idle_threshold: IDLE_THRESHOLD,
        }
    }

    /// Registers the event handler, returning the previous one.
    pub fn attach(
        &mut self,
        handler: Option<Box<dyn EventHandler>>,
    ) -> Option<Box<dyn EventHandler>> {
        std::mem::replace(&mut self.handler, handler)
    }

    /// Registers the sink for transient connect/disconnect messages.
    pub fn set_notifier(&mut self, notifier: Option<Box<dyn Notifier>>) {
        self.notifier = notifier;
    }

    /// Overrides the idle threshold of the poll fallback.
    pub fn set_idle_threshold(&mut self, threshold: Duration) {
        self.idle_threshold = threshold;
    }

    /// Number of currently tracked devices.
    pub fn device_count(&self) -> usize {
        self.devices.len()
    }

    pub fn is_tracked(&self, id: DeviceId) -> bool {
        self.devices.lookup(id).is_some()
    }

    /// Whether newly enumerated devices are connected automatically.
    pub fn auto_add(&self) -> bool {
        self.auto_add
    }

    /// Opens the device in `slot` and creates its registry entry.
    ///
    /// Controller-capable slots are opened as controllers; anything else, or
    /// a failed controller open, falls back to a plain joystick. When both
    /// opens fail no entry is created. A stale entry for the same instance
    /// ID is disconnected first, so the handle is replaced rather than
    /// duplicated. Idempotent with respect to an already-open device.
    pub fn connect(&mut self, slot: u32) -> Result<DeviceId> {
        if self.backend.is_controller_slot(slot) {
            match self.backend.open_controller(slot) {
                Ok(dev) => return Ok(self.install(Handle::Controller(dev), slot)),
                Err(err) => {
                    debug!("controller open failed for slot {slot}: {err}");
                }
            }
        }
        match self.backend.open_joystick(slot) {
            Ok(dev) => Ok(self.install(Handle::Joystick(dev), slot)),
            Err(err) => {
                debug!("connect failed for slot {slot}: {err}");
                Err(Error::Open { slot, reason: err.to_string() })
            }
        }
    }

    fn install(&mut self, handle: Handle<B::Controller, B::Joystick>, slot: u32) -> DeviceId {
        let id = handle.device().instance_id();
        let name = handle.device().name();
        let class = handle.class();
        self.disconnect(id);
        self.devices.upsert(id, DeviceEntry::new(handle, slot));
        debug!("connected {class:?} \"{name}\" id={id} slot={slot}");
        id
    }

    /// Closes and forgets a device. Safe to call for unknown IDs; the second
    /// of two back-to-back calls is a no-op.
    pub fn disconnect(&mut self, id: DeviceId) {
        if let Some(entry) = self.devices.remove(id) {
            let handle = entry.into_handle();
            if handle.attached() {
                handle.close();
            }
            debug!("disconnected device id={id}");
        }
    }

    /// Connects every visible device slot and enables auto-add for devices
    /// enumerated later.
    pub fn add_all(&mut self) {
        for slot in 0..self.backend.num_slots() {
            if let Err(err) = self.connect(slot) {
                debug!("add_all: {err}");
            }
        }
        self.auto_add = true;
    }

    /// Disconnects every tracked device and disables auto-add.
    pub fn remove_all(&mut self) {
        self.auto_add = false;
        for id in self.devices.ids() {
            self.disconnect(id);
        }
    }

    /// Starts or stops rumble on the device in slot 0, if it is
    /// controller-class. Re-asserted on every poll while active.
    pub fn set_rumble(&mut self, on: bool) {
        self.rumbling = on;
        self.assert_rumble(on);
    }

    fn assert_rumble(&mut self, on: bool) {
        let Some(id) = self.devices.id_at_slot(0) else { return };
        let Some(entry) = self.devices.lookup_mut(id) else { return };
        if entry.class() != DeviceClass::Controller {
            return;
        }
        let accepted = if on {
            entry.device_mut().set_rumble(u16::MAX, u16::MAX, RUMBLE_PULSE_MS)
        } else {
            entry.device_mut().set_rumble(0, 0, 0)
        };
        if !accepted {
            debug!("rumble not supported by device id={id}");
        }
    }

    /// Drains the raw event queue and runs the poll fallback when the queue
    /// has been idle past the threshold.
    pub fn poll(&mut self) {
        let mut got_event = false;
        while let Some(raw) = self.backend.next_event() {
            self.handle_raw(raw);
            got_event = true;
        }

        let now = Instant::now();
        if got_event {
            self.last_activity = now;
        } else if now.duration_since(self.last_activity) >= self.idle_threshold {
            self.last_activity = now;
            self.poll_devices();
        }

        if self.rumbling {
            self.assert_rumble(true);
        }
    }

    /// Translates one raw event into registry updates and at most one
    /// normalized event. Unknown IDs, class mismatches and out-of-range
    /// control indices drop the event; all are expected during the window
    /// between hardware disconnect and registry cleanup.
    fn handle_raw(&mut self, raw: RawEvent) {
        match raw {
            RawEvent::Button { id, class, index, pressed } => {
                let Some(entry) = self.devices.lookup_mut(id) else { return };
                if entry.class() != class {
                    return;
                }
                let Some(prev) = entry.cached_button(index) else { return };
                let value = i8::from(pressed);
                let previous = i8::from(prev);
                if value != previous {
                    if let Some(handler) = self.handler.as_deref_mut() {
                        let _ = handler.dispatch(&ControlEvent {
                            device: id,
                            kind: ControlKind::Button,
                            index,
                            value,
                            previous,
                        });
                    }
                }
                // A button event marks a real edge, so the cache always
                // follows the raw value.
                entry.set_button(index, pressed);
            }
            RawEvent::Axis { id, class, index, value } => {
                let Some(entry) = self.devices.lookup_mut(id) else { return };
                if entry.class() != class {
                    return;
                }
                let Some(previous) = entry.cached_axis(index) else { return };
                let value = normalize_axis(value);
                // Sub-threshold jitter must leave both the cache and the
                // stream untouched, so the write is gated like the emit.
                if value != previous {
                    if let Some(handler) = self.handler.as_deref_mut() {
                        let _ = handler.dispatch(&ControlEvent {
                            device: id,
                            kind: ControlKind::Axis,
                            index,
                            value,
                            previous,
                        });
                    }
                    entry.set_axis(index, value);
                }
            }
            RawEvent::Added { slot } => {
                let stale = self.devices.id_at_slot(slot);
                if !self.auto_add && stale.is_none() {
                    return;
                }
                if let Some(id) = stale {
                    self.disconnect(id);
                }
                match self.connect(slot) {
                    Ok(_) => self.show_message(&format!(
                        "Connected game controller {}",
                        slot + 1
                    )),
                    Err(err) => debug!("reconnect of slot {slot} failed: {err}"),
                }
            }
            RawEvent::Remapped { id } => {
                let Some(slot) = self.devices.lookup(id).map(DeviceEntry::slot)
                else {
                    return;
                };
                self.disconnect(id);
                if self.connect(slot).is_ok() {
                    self.show_message(&format!(
                        "Connected game controller {}",
                        slot + 1
                    ));
                }
            }
            RawEvent::Removed { id } => {
                if let Some(slot) = self.devices.lookup(id).map(DeviceEntry::slot) {
                    self.disconnect(id);
                    self.show_message(&format!(
                        "Disconnected game controller {}",
                        slot + 1
                    ));
                }
            }
        }
    }

    /// Re-reads the full control state of every tracked device and emits
    /// synthetic change events for anything the raw queue missed.
    fn poll_devices(&mut self) {
        for (id, entry) in self.devices.iter_mut() {
            for index in 0..entry.num_buttons() {
                let state = entry.device().button(index);
                let Some(prev) = entry.cached_button(index) else { break };
                if state != prev {
                    if let Some(handler) = self.handler.as_deref_mut() {
                        let _ = handler.dispatch(&ControlEvent {
                            device: *id,
                            kind: ControlKind::Button,
                            index,
                            value: i8::from(state),
                            previous: i8::from(prev),
                        });
                    }
                    entry.set_button(index, state);
                }
            }
            for index in 0..entry.num_axes() {
                let value = normalize_axis(entry.device().axis(index));
                let Some(previous) = entry.cached_axis(index) else { break };
                if value != previous {
                    if let Some(handler) = self.handler.as_deref_mut() {
                        let _ = handler.dispatch(&ControlEvent {
                            device: *id,
                            kind: ControlKind::Axis,
                            index,
                            value,
                            previous,
                        });
                    }
                    entry.set_axis(index, value);
                }
            }
        }
    }

    fn show_message(&mut self, text: &str) {
        if let Some(notifier) = self.notifier.as_deref_mut() {
            notifier.show_message(text);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::collections::VecDeque;
    use std::rc::Rc;

    use super::*;
    use crate::types::{MAX_AXES, MAX_BUTTONS};

    #[derive(Clone, Copy)]
    struct FakeSlot {
        controller: bool,
        instance: DeviceId,
        open_fails: bool,
    }

    #[derive(Default)]
    struct FakeState {
        events: VecDeque<RawEvent>,
        slots: Vec<FakeSlot>,
        // Live hardware state read back by the poll fallback.
        buttons: ahash::AHashMap<DeviceId, [bool; MAX_BUTTONS]>,
        axes: ahash::AHashMap<DeviceId, [i16; MAX_AXES]>,
        detached: Vec<DeviceId>,
        closed: Vec<DeviceId>,
        rumble_calls: Vec<(DeviceId, u16, u32)>,
    }

    type Shared = Rc<RefCell<FakeState>>;

    struct FakeDevice {
        id: DeviceId,
        shared: Shared,
    }

    impl Drop for FakeDevice {
        fn drop(&mut self) {
            self.shared.borrow_mut().closed.push(self.id);
        }
    }

    impl crate::backend::RawDevice for FakeDevice {
        fn instance_id(&self) -> DeviceId {
            self.id
        }
        fn name(&self) -> String {
            format!("fake-{}", self.id)
        }
        fn attached(&self) -> bool {
            !self.shared.borrow().detached.contains(&self.id)
        }
        fn num_buttons(&self) -> u8 {
            8
        }
        fn num_axes(&self) -> u8 {
            4
        }
        fn button(&self, index: u8) -> bool {
            self.shared
                .borrow()
                .buttons
                .get(&self.id)
                .map_or(false, |b| b[usize::from(index)])
        }
        fn axis(&self, index: u8) -> i16 {
            self.shared
                .borrow()
                .axes
                .get(&self.id)
                .map_or(0, |a| a[usize::from(index)])
        }
        fn set_rumble(&mut self, low: u16, _high: u16, duration_ms: u32) -> bool {
            self.shared.borrow_mut().rumble_calls.push((self.id, low, duration_ms));
            true
        }
    }

    struct FakeBackend {
        shared: Shared,
    }

    impl FakeBackend {
        fn open(&mut self, slot: u32) -> Result<FakeDevice> {
            let state = self.shared.borrow();
            let fake = state.slots.get(slot as usize).copied();
            drop(state);
            match fake {
                Some(fake) if !fake.open_fails => Ok(FakeDevice {
                    id: fake.instance,
                    shared: self.shared.clone(),
                }),
                _ => Err(Error::Open {
                    slot,
                    reason: "device busy".to_string(),
                }),
            }
        }
    }

    impl JoyBackend for FakeBackend {
        type Controller = FakeDevice;
        type Joystick = FakeDevice;

        fn next_event(&mut self) -> Option<RawEvent> {
            self.shared.borrow_mut().events.pop_front()
        }
        fn num_slots(&self) -> u32 {
            self.shared.borrow().slots.len() as u32
        }
        fn is_controller_slot(&self, slot: u32) -> bool {
            self.shared
                .borrow()
                .slots
                .get(slot as usize)
                .map_or(false, |s| s.controller)
        }
        fn open_controller(&mut self, slot: u32) -> Result<FakeDevice> {
            if !self.is_controller_slot(slot) {
                return Err(Error::Open {
                    slot,
                    reason: "not a controller".to_string(),
                });
            }
            self.open(slot)
        }
        fn open_joystick(&mut self, slot: u32) -> Result<FakeDevice> {
            self.open(slot)
        }
    }

    #[derive(Clone, Default)]
    struct Capture {
        events: Rc<RefCell<Vec<ControlEvent>>>,
    }

    impl EventHandler for Capture {
        fn dispatch(&mut self, event: &ControlEvent) -> bool {
            self.events.borrow_mut().push(*event);
            true
        }
    }

    #[derive(Clone, Default)]
    struct Messages {
        texts: Rc<RefCell<Vec<String>>>,
    }

    impl Notifier for Messages {
        fn show_message(&mut self, text: &str) {
            self.texts.borrow_mut().push(text.to_string());
        }
    }

    fn fixture(slots: &[(bool, DeviceId)]) -> (JoyPoller<FakeBackend>, Shared, Capture) {
        let shared: Shared = Rc::new(RefCell::new(FakeState::default()));
        shared.borrow_mut().slots = slots
            .iter()
            .map(|&(controller, instance)| FakeSlot {
                controller,
                instance,
                open_fails: false,
            })
            .collect();
        let mut poller = JoyPoller::new(FakeBackend { shared: shared.clone() });
        let capture = Capture::default();
        poller.attach(Some(Box::new(capture.clone())));
        (poller, shared, capture)
    }

    fn push(shared: &Shared, raw: RawEvent) {
        shared.borrow_mut().events.push_back(raw);
    }

    #[test]
    fn button_edge_emits_event_and_updates_cache() {
        let (mut poller, shared, capture) =
            fixture(&[(true, 40), (true, 41), (true, 42)]);
        poller.add_all();

        push(&shared, RawEvent::Button {
            id: 42,
            class: DeviceClass::Controller,
            index: 1,
            pressed: true,
        });
        poller.poll();

        let events = capture.events.borrow();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0], ControlEvent {
            device: 42,
            kind: ControlKind::Button,
            index: 1,
            value: 1,
            previous: 0,
        });
        drop(events);
        assert_eq!(
            poller.devices.lookup(42).unwrap().cached_button(1),
            Some(true)
        );
    }

    #[test]
    fn button_cache_tracks_last_raw_state() {
        let (mut poller, shared, _capture) = fixture(&[(true, 40)]);
        poller.add_all();

        for pressed in [true, false, true, true, false] {
            push(&shared, RawEvent::Button {
                id: 40,
                class: DeviceClass::Controller,
                index: 3,
                pressed,
            });
        }
        poller.poll();

        assert_eq!(
            poller.devices.lookup(40).unwrap().cached_button(3),
            Some(false)
        );
    }

    #[test]
    fn axis_motion_is_quantized_and_deduplicated() {
        let (mut poller, shared, capture) = fixture(&[(true, 40)]);
        poller.add_all();

        // 9000 crosses the deadzone; the repeat and the jitter value do not
        // change the normalized state and must be suppressed.
        for value in [9000, 9000, 8500, 100, -9000] {
            push(&shared, RawEvent::Axis {
                id: 40,
                class: DeviceClass::Controller,
                index: 0,
                value,
            });
            poller.poll();
        }

        let events = capture.events.borrow();
        assert_eq!(events.len(), 3);
        assert_eq!((events[0].value, events[0].previous), (1, 0));
        assert_eq!((events[1].value, events[1].previous), (0, 1));
        assert_eq!((events[2].value, events[2].previous), (-1, 0));
        for event in events.iter() {
            assert_ne!(event.value, event.previous);
        }
    }

    #[test]
    fn axis_cache_updates_without_handler() {
        let (mut poller, shared, capture) = fixture(&[(true, 40)]);
        poller.add_all();
        poller.attach(None);

        push(&shared, RawEvent::Axis {
            id: 40,
            class: DeviceClass::Controller,
            index: 2,
            value: -20000,
        });
        poller.poll();

        assert!(capture.events.borrow().is_empty());
        assert_eq!(poller.devices.lookup(40).unwrap().cached_axis(2), Some(-1));
    }

    #[test]
    fn unknown_device_events_are_dropped() {
        let (mut poller, shared, capture) = fixture(&[(true, 40)]);
        poller.add_all();

        push(&shared, RawEvent::Button {
            id: 99,
            class: DeviceClass::Controller,
            index: 0,
            pressed: true,
        });
        push(&shared, RawEvent::Axis {
            id: 99,
            class: DeviceClass::Controller,
            index: 0,
            value: 30000,
        });
        poller.poll();

        assert!(capture.events.borrow().is_empty());
    }

    #[test]
    fn duplicate_joystick_level_events_are_dropped_for_controllers() {
        let (mut poller, shared, capture) = fixture(&[(true, 40)]);
        poller.add_all();

        // SDL mirrors controller input on the joystick event family; the
        // sticky class tag filters the copy out.
        push(&shared, RawEvent::Button {
            id: 40,
            class: DeviceClass::Joystick,
            index: 0,
            pressed: true,
        });
        poller.poll();

        assert!(capture.events.borrow().is_empty());
        assert_eq!(
            poller.devices.lookup(40).unwrap().cached_button(0),
            Some(false)
        );
    }

    #[test]
    fn out_of_range_control_index_is_dropped() {
        let (mut poller, shared, capture) = fixture(&[(true, 40)]);
        poller.add_all();

        push(&shared, RawEvent::Button {
            id: 40,
            class: DeviceClass::Controller,
            index: MAX_BUTTONS as u8,
            pressed: true,
        });
        push(&shared, RawEvent::Axis {
            id: 40,
            class: DeviceClass::Controller,
            index: MAX_AXES as u8,
            value: 30000,
        });
        poller.poll();

        assert!(capture.events.borrow().is_empty());
    }

    #[test]
    fn connect_prefers_controller_class_and_falls_back() {
        let (mut poller, _shared, _capture) = fixture(&[(true, 40), (false, 50)]);

        assert_eq!(poller.connect(0).unwrap(), 40);
        assert_eq!(poller.connect(1).unwrap(), 50);
        assert_eq!(
            poller.devices.lookup(40).map(DeviceEntry::class),
            Some(DeviceClass::Controller)
        );
        assert_eq!(
            poller.devices.lookup(50).map(DeviceEntry::class),
            Some(DeviceClass::Joystick)
        );
    }

    #[test]
    fn open_failure_leaves_no_entry() {
        let (mut poller, shared, _capture) = fixture(&[(true, 40)]);
        shared.borrow_mut().slots[0].open_fails = true;

        assert!(poller.connect(0).is_err());
        assert_eq!(poller.device_count(), 0);
    }

    #[test]
    fn disconnect_twice_closes_handle_once() {
        let (mut poller, shared, _capture) = fixture(&[(true, 40)]);
        poller.add_all();

        poller.disconnect(40);
        assert_eq!(shared.borrow().closed, vec![40]);
        poller.disconnect(40);
        assert_eq!(shared.borrow().closed, vec![40]);
        assert!(!poller.is_tracked(40));
    }

    #[test]
    fn add_all_and_remove_all_toggle_auto_add() {
        let (mut poller, _shared, _capture) = fixture(&[(true, 40), (false, 50)]);

        poller.add_all();
        assert!(poller.auto_add());
        assert_eq!(poller.device_count(), 2);

        poller.remove_all();
        assert!(!poller.auto_add());
        assert_eq!(poller.device_count(), 0);
    }

    #[test]
    fn device_added_is_ignored_without_auto_add() {
        let (mut poller, shared, _capture) = fixture(&[(true, 40)]);

        push(&shared, RawEvent::Added { slot: 0 });
        poller.poll();

        assert_eq!(poller.device_count(), 0);
    }

    #[test]
    fn device_added_reconnects_tracked_slot_in_place() {
        let (mut poller, shared, _capture) = fixture(&[(true, 40)]);
        let messages = Messages::default();
        poller.set_notifier(Some(Box::new(messages.clone())));
        poller.add_all();

        // Reconnect churn: the slot re-enumerates with a fresh instance ID.
        shared.borrow_mut().slots[0].instance = 41;
        push(&shared, RawEvent::Added { slot: 0 });
        poller.poll();

        assert_eq!(poller.device_count(), 1);
        assert!(!poller.is_tracked(40));
        assert!(poller.is_tracked(41));
        assert_eq!(shared.borrow().closed, vec![40]);
        assert_eq!(
            messages.texts.borrow().as_slice(),
            ["Connected game controller 1"]
        );
    }

    #[test]
    fn remapped_device_is_reopened_in_place() {
        let (mut poller, shared, _capture) = fixture(&[(true, 40)]);
        poller.add_all();

        push(&shared, RawEvent::Remapped { id: 40 });
        poller.poll();

        assert_eq!(poller.device_count(), 1);
        assert!(poller.is_tracked(40));
        assert_eq!(shared.borrow().closed, vec![40]);
    }

    #[test]
    fn removed_device_erases_entry_and_notifies() {
        let (mut poller, shared, _capture) = fixture(&[(true, 40)]);
        let messages = Messages::default();
        poller.set_notifier(Some(Box::new(messages.clone())));
        poller.add_all();

        // The hardware is already gone when the removal arrives, so the
        // stale handle close is skipped but the entry still goes away.
        shared.borrow_mut().detached.push(40);
        push(&shared, RawEvent::Removed { id: 40 });
        poller.poll();

        assert_eq!(poller.device_count(), 0);
        assert_eq!(
            messages.texts.borrow().as_slice(),
            ["Disconnected game controller 1"]
        );

        push(&shared, RawEvent::Removed { id: 40 });
        poller.poll();
        assert_eq!(messages.texts.borrow().len(), 1);
    }

    #[test]
    fn poll_fallback_catches_missed_button() {
        let (mut poller, shared, capture) = fixture(&[(true, 40)]);
        poller.add_all();
        poller.set_idle_threshold(Duration::ZERO);

        // The queue dropped the edge; only the readback sees it.
        shared.borrow_mut().buttons.entry(40).or_default()[3] = true;
        poller.poll();

        let events = capture.events.borrow();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0], ControlEvent {
            device: 40,
            kind: ControlKind::Button,
            index: 3,
            value: 1,
            previous: 0,
        });
        drop(events);
        assert_eq!(
            poller.devices.lookup(40).unwrap().cached_button(3),
            Some(true)
        );

        // A second quiet poll finds nothing new.
        poller.poll();
        assert_eq!(capture.events.borrow().len(), 1);
    }

    #[test]
    fn poll_fallback_normalizes_axes_like_the_event_path() {
        let (mut poller, shared, capture) = fixture(&[(true, 40)]);
        poller.add_all();
        poller.set_idle_threshold(Duration::ZERO);

        {
            let mut state = shared.borrow_mut();
            let axes = state.axes.entry(40).or_default();
            axes[0] = 9000;
            axes[1] = 100;
        }
        poller.poll();

        let events = capture.events.borrow();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].kind, ControlKind::Axis);
        assert_eq!(events[0].index, 0);
        assert_eq!(events[0].value, 1);
    }

    #[test]
    fn poll_fallback_waits_for_idle_threshold() {
        let (mut poller, shared, capture) = fixture(&[(true, 40)]);
        poller.add_all();

        shared.borrow_mut().buttons.entry(40).or_default()[0] = true;
        // Raw activity keeps resetting the idle clock.
        push(&shared, RawEvent::Button {
            id: 40,
            class: DeviceClass::Controller,
            index: 1,
            pressed: true,
        });
        poller.poll();
        poller.poll();

        // Only the live edge on button 1 came through; the missed change on
        // button 0 stays hidden until the threshold elapses.
        assert_eq!(capture.events.borrow().len(), 1);
        assert_eq!(capture.events.borrow()[0].index, 1);
    }

    #[test]
    fn rumble_targets_slot_zero_controller_only() {
        let (mut poller, shared, _capture) = fixture(&[(true, 40), (false, 50)]);
        poller.add_all();

        poller.set_rumble(true);
        assert_eq!(shared.borrow().rumble_calls.len(), 1);
        assert_eq!(shared.borrow().rumble_calls[0].0, 40);

        // Re-asserted on every poll while active.
        poller.poll();
        assert_eq!(shared.borrow().rumble_calls.len(), 2);

        poller.set_rumble(false);
        assert_eq!(shared.borrow().rumble_calls.last().copied(), Some((40, 0, 0)));
        let calls_after_stop = shared.borrow().rumble_calls.len();
        poller.poll();
        assert_eq!(shared.borrow().rumble_calls.len(), calls_after_stop);
    }

    #[test]
    fn rumble_is_skipped_when_slot_zero_is_plain_joystick() {
        let (mut poller, shared, _capture) = fixture(&[(false, 50), (true, 40)]);
        poller.add_all();

        poller.set_rumble(true);
        assert!(shared.borrow().rumble_calls.is_empty());
    }
}
