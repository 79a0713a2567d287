//! Built-in flows and the journal page.
//!
//! # Flows
//!
//! Each module defines one flow: its step table, step renders, and the tick
//! logic of its animated steps. Renders draw onto a 160x80 [`Surface`](crate::surface::Surface)
//! and are pure functions of the [`Frame`](crate::step::Frame).
//!
//! | Key | Flow | Module |
//! |-----|------|--------|
//! | `1` | `power` | [`power`] |
//! | `2` | `binding` | [`binding`] |
//! | `3` | `calibration` | [`calibration`] |
//! | `4` | `firmwareUpdate` | [`firmware`] |
//! | `5` | `errorStates` | [`errors`] |
//! | `6` | `batteryStatus` | [`battery`] |
//! | `7` | `attitude` | [`attitude`] |
//! | `8` | `testing` | [`testing`] |
//!
//! Drawing helpers shared by several flows (battery gauge, connection icon,
//! error glyphs) live in `common`.
//!
//! # Journal Page
//!
//! [`draw_journal_page`] fills the whole preview window with frame metrics
//! and the transition journal (toggled with `J`).

mod common;
mod journal_page;

pub mod attitude;
pub mod battery;
pub mod binding;
pub mod calibration;
pub mod errors;
pub mod firmware;
pub mod power;
pub mod testing;

pub use journal_page::draw_journal_page;

use crate::{flow::Flow, input::DeviceBindings, step::StepRef};

/// Built-in flows in selection order (number keys `1`-`8`).
pub static BUILTIN_FLOWS: [&Flow; 8] = [
    &power::FLOW,
    &binding::FLOW,
    &calibration::FLOW,
    &firmware::FLOW,
    &errors::FLOW,
    &battery::FLOW,
    &attitude::FLOW,
    &testing::FLOW,
];

/// Where the power button and firmware progress act in the built-in flows.
pub const BINDINGS: DeviceBindings = DeviceBindings {
    power_flow: power::FLOW_ID,
    power_on: StepRef::new(power::FLOW_ID, power::POWER_ON),
    shutdown: power::SHUTDOWN,
    powered_off: power::SHUTDOWN_COMPLETE,
    serial_toggle: Some(StepRef::new(binding::FLOW_ID, binding::READY)),
    firmware_complete: Some(StepRef::new(firmware::FLOW_ID, firmware::COMPLETE)),
};
