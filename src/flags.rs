//! Simulated device state shared by the step callbacks.
//!
//! The navigator owns one [`SimulationFlags`] value for the whole preview
//! session and resets it whenever the user explicitly selects a flow. Render
//! callbacks only ever see `&SimulationFlags`; the active step's update and
//! lifecycle hooks get mutable access through their control handle.

use std::time::{Duration, Instant};

use crate::config::SHUTDOWN_HOLD_TIME;

/// Joystick travel limit in degrees.
pub const ORIENTATION_LIMIT: f32 = 90.0;

/// Roll and pitch magnitude (degrees) still considered level.
pub const LEVEL_TOLERANCE: f32 = 1.0;

// =============================================================================
// Connection Phase
// =============================================================================

#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum ConnectionPhase {
    #[default]
    Searching,
    Connecting,
    Connected,
}

impl ConnectionPhase {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Searching => "Searching",
            Self::Connecting => "Connecting",
            Self::Connected => "Connected",
        }
    }
}

// =============================================================================
// Orientation
// =============================================================================

/// Attitude from the simulated joystick, in degrees.
#[derive(Clone, Copy, PartialEq, Debug, Default)]
pub struct Orientation {
    pub roll: f32,
    pub pitch: f32,
}

impl Orientation {
    /// Build an orientation with both axes clamped to the joystick range.
    pub fn new(roll: f32, pitch: f32) -> Self {
        Self {
            roll: roll.clamp(-ORIENTATION_LIMIT, ORIENTATION_LIMIT),
            pitch: pitch.clamp(-ORIENTATION_LIMIT, ORIENTATION_LIMIT),
        }
    }

    pub const LEVEL: Self = Self { roll: 0.0, pitch: 0.0 };

    /// `|roll| <= 1 && |pitch| <= 1`.
    #[inline]
    pub fn is_level(&self) -> bool { self.roll.abs() <= LEVEL_TOLERANCE && self.pitch.abs() <= LEVEL_TOLERANCE }

    /// Nudge both axes, keeping the result inside the joystick range.
    pub fn nudged(self, d_roll: f32, d_pitch: f32) -> Self { Self::new(self.roll + d_roll, self.pitch + d_pitch) }
}

// =============================================================================
// Simulation Flags
// =============================================================================

#[derive(Clone, Debug, PartialEq)]
pub struct SimulationFlags {
    pub powered_on: bool,
    pub connection_phase: ConnectionPhase,
    /// Set while the power button is held for shutdown.
    pub shutdown_started_at: Option<Instant>,
    /// Countdown shown by the Shutdown step, refreshed by the poll timer.
    pub shutdown_remaining: Duration,
    /// Firmware update progress, 0.0..=1.0.
    pub firmware_progress: f32,
    pub orientation: Orientation,
    /// Binding Ready shows the serial number instead of the micro QR code.
    pub show_serial: bool,
    pub charger_connected: bool,
}

impl SimulationFlags {
    /// Defaults for a flow whose first step is `powered_on`.
    pub const fn new(powered_on: bool) -> Self {
        Self {
            powered_on,
            connection_phase: ConnectionPhase::Searching,
            shutdown_started_at: None,
            shutdown_remaining: SHUTDOWN_HOLD_TIME,
            firmware_progress: 0.0,
            orientation: Orientation::LEVEL,
            show_serial: false,
            charger_connected: false,
        }
    }

    #[inline]
    pub const fn shutdown_in_progress(&self) -> bool { self.shutdown_started_at.is_some() }

    /// Whole seconds left on the shutdown countdown, rounded up.
    pub const fn shutdown_seconds_left(&self) -> u64 {
        let d = self.shutdown_remaining;
        if d.subsec_nanos() > 0 { d.as_secs() + 1 } else { d.as_secs() }
    }

    /// Set the firmware progress, clamped to 0..=1.
    pub fn set_firmware_progress(
        &mut self,
        progress: f32,
    ) {
        self.firmware_progress = progress.clamp(0.0, 1.0);
    }
}

impl Default for SimulationFlags {
    fn default() -> Self { Self::new(true) }
}

#[cfg(test)]
mod tests {
    use test_case::test_case;

    use super::*;

    #[test_case(0.0, 0.0, true; "centered")]
    #[test_case(1.0, -1.0, true; "on the tolerance edge")]
    #[test_case(1.5, 0.0, false; "rolled")]
    #[test_case(0.0, -3.0, false; "pitched down")]
    fn test_is_level(roll: f32, pitch: f32, expected: bool) {
        assert_eq!(Orientation::new(roll, pitch).is_level(), expected);
    }

    #[test]
    fn test_orientation_clamped_to_joystick_range() {
        let o = Orientation::new(120.0, -400.0);
        assert!((o.roll - ORIENTATION_LIMIT).abs() < f32::EPSILON);
        assert!((o.pitch + ORIENTATION_LIMIT).abs() < f32::EPSILON);

        let nudged = o.nudged(10.0, 0.0);
        assert!((nudged.roll - ORIENTATION_LIMIT).abs() < f32::EPSILON, "Nudging past the limit stays clamped");
    }

    #[test]
    fn test_defaults() {
        let flags = SimulationFlags::new(false);
        assert!(!flags.powered_on);
        assert_eq!(flags.connection_phase, ConnectionPhase::Searching);
        assert!(!flags.shutdown_in_progress());
        assert!(flags.firmware_progress.abs() < f32::EPSILON);
        assert!(flags.orientation.is_level());
        assert!(!flags.show_serial);
    }

    #[test]
    fn test_shutdown_seconds_round_up() {
        let mut flags = SimulationFlags::default();
        assert_eq!(flags.shutdown_seconds_left(), 2);

        flags.shutdown_remaining = Duration::from_millis(1_950);
        assert_eq!(flags.shutdown_seconds_left(), 2);

        flags.shutdown_remaining = Duration::from_millis(1_000);
        assert_eq!(flags.shutdown_seconds_left(), 1);

        flags.shutdown_remaining = Duration::from_millis(10);
        assert_eq!(flags.shutdown_seconds_left(), 1);

        flags.shutdown_remaining = Duration::ZERO;
        assert_eq!(flags.shutdown_seconds_left(), 0);
    }

    #[test]
    fn test_firmware_progress_clamped() {
        let mut flags = SimulationFlags::default();
        flags.set_firmware_progress(1.7);
        assert!((flags.firmware_progress - 1.0).abs() < f32::EPSILON);
        flags.set_firmware_progress(-0.2);
        assert!(flags.firmware_progress.abs() < f32::EPSILON);
    }
}
