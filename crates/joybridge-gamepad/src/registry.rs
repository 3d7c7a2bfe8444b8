use ahash::AHashMap;

use crate::backend::RawDevice;
use crate::handle::Handle;
use crate::types::{DeviceClass, DeviceId, MAX_AXES, MAX_BUTTONS};

/// Cached state of one connected device.
///
/// Exists if and only if the device is currently open; the handle inside is
/// always valid. Button and axis caches hold the last value observed on the
/// event path or read back by the poll fallback.
pub(crate) struct DeviceEntry<C, J> {
    handle: Handle<C, J>,
    slot: u32,
    buttons: [bool; MAX_BUTTONS],
    axes: [i8; MAX_AXES],
}

impl<C: RawDevice, J: RawDevice> DeviceEntry<C, J> {
    pub(crate) fn new(handle: Handle<C, J>, slot: u32) -> Self {
        Self {
            handle,
            slot,
            buttons: [false; MAX_BUTTONS],
            axes: [0; MAX_AXES],
        }
    }

    pub(crate) fn class(&self) -> DeviceClass {
        self.handle.class()
    }

    pub(crate) fn slot(&self) -> u32 {
        self.slot
    }

    pub(crate) fn device(&self) -> &dyn RawDevice {
        self.handle.device()
    }

    pub(crate) fn device_mut(&mut self) -> &mut dyn RawDevice {
        self.handle.device_mut()
    }

    pub(crate) fn into_handle(self) -> Handle<C, J> {
        self.handle
    }

    /// Number of buttons the poll fallback iterates, bounded by the cache.
    pub(crate) fn num_buttons(&self) -> u8 {
        self.handle.device().num_buttons().min(MAX_BUTTONS as u8)
    }

    pub(crate) fn num_axes(&self) -> u8 {
        self.handle.device().num_axes().min(MAX_AXES as u8)
    }

    /// Cached state of a button, `None` for indices beyond the cache.
    pub(crate) fn cached_button(&self, index: u8) -> Option<bool> {
        self.buttons.get(usize::from(index)).copied()
    }

    pub(crate) fn cached_axis(&self, index: u8) -> Option<i8> {
        self.axes.get(usize::from(index)).copied()
    }

    pub(crate) fn set_button(&mut self, index: u8, pressed: bool) {
        if let Some(slot) = self.buttons.get_mut(usize::from(index)) {
            *slot = pressed;
        }
    }

    pub(crate) fn set_axis(&mut self, index: u8, value: i8) {
        if let Some(slot) = self.axes.get_mut(usize::from(index)) {
            *slot = value;
        }
    }
}

/// Instance-ID-keyed map of connected devices.
pub(crate) struct Registry<C, J> {
    entries: AHashMap<DeviceId, DeviceEntry<C, J>>,
}

impl<C: RawDevice, J: RawDevice> Registry<C, J> {
    pub(crate) fn new() -> Self {
        Self { entries: AHashMap::new() }
    }

    pub(crate) fn lookup(&self, id: DeviceId) -> Option<&DeviceEntry<C, J>> {
        self.entries.get(&id)
    }

    pub(crate) fn lookup_mut(
        &mut self,
        id: DeviceId,
    ) -> Option<&mut DeviceEntry<C, J>> {
        self.entries.get_mut(&id)
    }

    /// Inserts `entry` unless an entry for `id` already exists.
    pub(crate) fn upsert(
        &mut self,
        id: DeviceId,
        entry: DeviceEntry<C, J>,
    ) -> &mut DeviceEntry<C, J> {
        self.entries.entry(id).or_insert(entry)
    }

    pub(crate) fn remove(&mut self, id: DeviceId) -> Option<DeviceEntry<C, J>> {
        self.entries.remove(&id)
    }

    /// The tracked device currently occupying an enumeration slot, if any.
    pub(crate) fn id_at_slot(&self, slot: u32) -> Option<DeviceId> {
        self.entries
            .iter()
            .find(|(_, entry)| entry.slot == slot)
            .map(|(id, _)| *id)
    }

    pub(crate) fn ids(&self) -> Vec<DeviceId> {
        self.entries.keys().copied().collect()
    }

    pub(crate) fn iter_mut(
        &mut self,
    ) -> impl Iterator<Item = (&DeviceId, &mut DeviceEntry<C, J>)> {
        self.entries.iter_mut()
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }
}
