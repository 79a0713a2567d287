//! Status LED descriptors and their projection onto the observable indicator.
//!
//! Every step declares a default [`LedDescriptor`]. A running animation may
//! override it for the rest of the step (the "On" step switches from breathing
//! blue to solid green once connected). The [`StatusIndicator`] is the single
//! observable `{mode, color}` pair; the navigator projects the effective
//! descriptor onto it on every transition and on every animated tick.
//!
//! # Mode Semantics
//!
//! | Mode | Meaning |
//! |------|---------|
//! | `Off` | Powered down |
//! | `On` | Steady nominal state |
//! | `Breathing` | In progress or non-critical problem |
//! | `Blink` | Critical or unrecoverable error |

use core::f32::consts::TAU;

use embedded_graphics::pixelcolor::Rgb565;

use crate::colors::{BLACK, BLUE, GREEN, RED, WHITE, YELLOW};
use crate::config::TICKS_PER_SECOND;

// =============================================================================
// Animation Constants
// =============================================================================

/// One full breathing cycle (2 seconds).
const BREATHING_PERIOD_TICKS: u32 = TICKS_PER_SECOND * 2;

/// Dimmest point of the breathing cycle.
const BREATHING_MIN: f32 = 0.15;

/// Blink half-period (on for 15 ticks, off for 15 ticks = 2 Hz).
const BLINK_HALF_PERIOD_TICKS: u32 = TICKS_PER_SECOND / 4;

// =============================================================================
// Descriptor
// =============================================================================

#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum LedMode {
    #[default]
    Off,
    On,
    Breathing,
    Blink,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum LedColor {
    #[default]
    None,
    White,
    Blue,
    Green,
    Yellow,
    Red,
}

impl LedColor {
    /// Display color of the LED at full intensity.
    pub const fn rgb(self) -> Rgb565 {
        match self {
            Self::None => BLACK,
            Self::White => WHITE,
            Self::Blue => BLUE,
            Self::Green => GREEN,
            Self::Yellow => YELLOW,
            Self::Red => RED,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::White => "white",
            Self::Blue => "blue",
            Self::Green => "green",
            Self::Yellow => "yellow",
            Self::Red => "red",
        }
    }
}

/// What the LED should be doing.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct LedDescriptor {
    pub mode: LedMode,
    pub color: LedColor,
}

impl LedDescriptor {
    pub const OFF: Self = Self::new(LedMode::Off, LedColor::None);

    pub const fn new(mode: LedMode, color: LedColor) -> Self { Self { mode, color } }

    pub const fn on(color: LedColor) -> Self { Self::new(LedMode::On, color) }

    pub const fn breathing(color: LedColor) -> Self { Self::new(LedMode::Breathing, color) }

    pub const fn blink(color: LedColor) -> Self { Self::new(LedMode::Blink, color) }

    /// Brightness at `tick`, 0.0 (dark) to 1.0 (full).
    pub fn intensity(&self, tick: u32) -> f32 {
        match self.mode {
            LedMode::Off => 0.0,
            LedMode::On => 1.0,
            LedMode::Breathing => {
                let phase = (tick % BREATHING_PERIOD_TICKS) as f32 / BREATHING_PERIOD_TICKS as f32;
                // Starts dim, peaks half way through the cycle
                let wave = 0.5 - 0.5 * (phase * TAU).cos();
                (1.0 - BREATHING_MIN).mul_add(wave, BREATHING_MIN)
            }
            LedMode::Blink => {
                if (tick / BLINK_HALF_PERIOD_TICKS).is_multiple_of(2) {
                    1.0
                } else {
                    0.0
                }
            }
        }
    }
}

// =============================================================================
// Status Indicator
// =============================================================================

/// The externally observable LED state.
#[derive(Debug, Default)]
pub struct StatusIndicator {
    state: LedDescriptor,
}

impl StatusIndicator {
    pub const fn new() -> Self { Self { state: LedDescriptor::OFF } }

    /// Project a descriptor onto the indicator.
    ///
    /// Returns `true` if the observable state changed.
    pub fn project(
        &mut self,
        descriptor: LedDescriptor,
    ) -> bool {
        if self.state == descriptor {
            false
        } else {
            self.state = descriptor;
            true
        }
    }

    #[inline]
    pub const fn state(&self) -> LedDescriptor { self.state }
}

#[cfg(test)]
mod tests {
    use test_case::test_case;

    use super::*;

    #[test]
    fn test_indicator_starts_off() {
        assert_eq!(StatusIndicator::new().state(), LedDescriptor::OFF);
    }

    #[test]
    fn test_project_reports_changes_only() {
        let mut indicator = StatusIndicator::new();

        assert!(indicator.project(LedDescriptor::breathing(LedColor::Blue)), "Off -> breathing is a change");
        assert!(!indicator.project(LedDescriptor::breathing(LedColor::Blue)), "Same descriptor is not a change");
        assert!(indicator.project(LedDescriptor::on(LedColor::Green)), "Mode and color switch is a change");
        assert_eq!(indicator.state(), LedDescriptor::on(LedColor::Green));
    }

    #[test_case(LedDescriptor::OFF, 0.0; "off is dark")]
    #[test_case(LedDescriptor::on(LedColor::White), 1.0; "on is full")]
    fn test_steady_intensity(led: LedDescriptor, expected: f32) {
        for tick in [0, 1, 59, 600] {
            assert!((led.intensity(tick) - expected).abs() < f32::EPSILON, "tick {tick}");
        }
    }

    #[test]
    fn test_breathing_stays_in_range_and_varies() {
        let led = LedDescriptor::breathing(LedColor::Yellow);
        let samples: Vec<f32> = (0..BREATHING_PERIOD_TICKS).map(|t| led.intensity(t)).collect();

        assert!(samples.iter().all(|v| (BREATHING_MIN - 1e-4..=1.0 + 1e-4).contains(v)), "Breathing out of range");
        assert!((samples[0] - BREATHING_MIN).abs() < 1e-4, "Cycle should start at the dim point");
        let peak = samples[(BREATHING_PERIOD_TICKS / 2) as usize];
        assert!((peak - 1.0).abs() < 1e-4, "Cycle should peak half way, got {peak}");
    }

    #[test]
    fn test_blink_toggles_hard() {
        let led = LedDescriptor::blink(LedColor::Red);

        assert!((led.intensity(0) - 1.0).abs() < f32::EPSILON);
        assert!((led.intensity(BLINK_HALF_PERIOD_TICKS - 1) - 1.0).abs() < f32::EPSILON);
        assert!(led.intensity(BLINK_HALF_PERIOD_TICKS).abs() < f32::EPSILON, "Second half period is dark");
        assert!((led.intensity(BLINK_HALF_PERIOD_TICKS * 2) - 1.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_color_names() {
        assert_eq!(LedColor::Green.name(), "green");
        assert_eq!(LedColor::None.rgb(), BLACK);
    }
}
