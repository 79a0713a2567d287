//! Power button input and the device bindings that give it meaning.
//!
//! The host turns keyboard and mouse activity into [`PowerEvent`]s. The
//! navigator feeds them through a [`PowerButton`] so a key held down (and
//! repeated by the OS) counts as one press, then decides what the press does
//! from the current flow and the [`DeviceBindings`].

use std::time::{Duration, Instant};

use crate::step::StepRef;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum PowerEvent {
    /// Button went down.
    PressStart,
    /// Button released.
    PressEnd,
    /// Pointer left the button while held.
    PressCancel,
}

/// Press state of the power button.
#[derive(Debug, Default)]
pub struct PowerButton {
    pressed_at: Option<Instant>,
}

impl PowerButton {
    pub const fn new() -> Self { Self { pressed_at: None } }

    /// Register a press. Returns `false` if the button was already down.
    pub fn press(
        &mut self,
        now: Instant,
    ) -> bool {
        if self.pressed_at.is_some() {
            return false;
        }
        self.pressed_at = Some(now);
        true
    }

    /// Register a release. Returns how long the button was held, or `None`
    /// if it was not down.
    pub fn release(
        &mut self,
        now: Instant,
    ) -> Option<Duration> {
        self.pressed_at
            .take()
            .map(|pressed| now.saturating_duration_since(pressed))
    }

    #[inline]
    pub const fn is_pressed(&self) -> bool { self.pressed_at.is_some() }
}

/// Steps the power button and firmware progress act on.
#[derive(Clone, Copy, Debug)]
pub struct DeviceBindings {
    /// Flow in which holding the button shuts the device down.
    pub power_flow: &'static str,
    /// Where a press goes while the device is off.
    pub power_on: StepRef,
    /// Step showing the hold-to-shutdown countdown (in `power_flow`).
    pub shutdown: usize,
    /// Step reached when the hold completes (in `power_flow`).
    pub powered_off: usize,
    /// Step on which a press toggles the serial number instead.
    pub serial_toggle: Option<StepRef>,
    /// Step reached when firmware progress hits 100% inside its flow.
    pub firmware_complete: Option<StepRef>,
}
