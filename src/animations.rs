//! Tick-based animation helpers shared by the step renders and the preview chrome.
//!
//! Step renders are pure functions of the tick, so every effect here takes the
//! tick (or a normalized progress) and returns a value. Nothing keeps state
//! except [`ColorFade`], which the host uses to ease the LED widget between
//! colors.
//!
//! # Phases
//!
//! Most steps are a sequence of phases measured in ticks. [`phase_progress`]
//! maps a tick onto one phase:
//!
//! ```ignore
//! // Logo fades in over the first 240 ticks
//! let opacity = phase_progress(frame.tick, 0, 240);
//! // Checkmark draws during ticks 30..50
//! let check = phase_progress(frame.tick, 30, 20);
//! ```
//!
//! # Shake Effect
//!
//! Critical error icons wiggle horizontally:
//! ```text
//! offset = sin(tick * frequency) * amplitude
//! ```

use embedded_graphics::{pixelcolor::Rgb565, prelude::IntoStorage, prelude::Point};

// =============================================================================
// Shake Effect Constants
// =============================================================================

/// Maximum horizontal shake offset in pixels.
const SHAKE_AMPLITUDE: f32 = 2.0;

/// Shake oscillation speed. At 60 ticks per second, 0.6 gives ~6 wiggles per second.
const SHAKE_FREQUENCY: f32 = 0.6;

// =============================================================================
// Color Fade Constants
// =============================================================================

/// Fraction of the remaining distance covered per frame.
const COLOR_LERP_SPEED: f32 = 0.2;

/// Manhattan distance (in 565 channel steps) at which a fade snaps to its target.
const COLOR_SNAP_THRESHOLD: i32 = 2;

// =============================================================================
// Phase Helpers
// =============================================================================

/// Progress through a phase starting at `start` and lasting `duration` ticks.
///
/// 0.0 before the phase, 1.0 after it. A zero-length phase is complete as
/// soon as it starts.
#[inline]
pub fn phase_progress(tick: u32, start: u32, duration: u32) -> f32 {
    if tick < start {
        return 0.0;
    }
    if duration == 0 {
        return 1.0;
    }
    ((tick - start) as f32 / duration as f32).min(1.0)
}

#[inline]
pub fn lerp(from: f32, to: f32, t: f32) -> f32 { (to - from).mul_add(t, from) }

/// Point between `from` and `to`, rounded to the pixel grid.
pub fn lerp_point(from: Point, to: Point, t: f32) -> Point {
    Point::new(
        lerp(from.x as f32, to.x as f32, t).round() as i32,
        lerp(from.y as f32, to.y as f32, t).round() as i32,
    )
}

/// Sine pulse `sin(tick * speed) * depth + base`, clamped to 0..=1.
#[inline]
pub fn pulse(tick: u32, speed: f32, depth: f32, base: f32) -> f32 {
    (tick as f32 * speed).sin().mul_add(depth, base).clamp(0.0, 1.0)
}

/// Decelerating curve for slide-ins.
#[inline]
pub fn ease_out_cubic(t: f32) -> f32 {
    let inv = 1.0 - t.clamp(0.0, 1.0);
    1.0 - inv * inv * inv
}

// =============================================================================
// Shake Effect
// =============================================================================

/// Horizontal shake offset for critical icons. 0 when `active` is false.
#[inline]
pub fn shake_offset(tick: u32, active: bool) -> i32 {
    if !active {
        return 0;
    }
    let phase = tick as f32 * SHAKE_FREQUENCY;
    (phase.sin() * SHAKE_AMPLITUDE) as i32
}

// =============================================================================
// Color Fade
// =============================================================================

/// Eases one color toward a target over several frames.
#[derive(Debug)]
pub struct ColorFade {
    current: Rgb565,
    target: Rgb565,
}

impl ColorFade {
    pub const fn new(color: Rgb565) -> Self {
        Self {
            current: color,
            target: color,
        }
    }

    /// Returns `true` if the target changed.
    pub fn set_target(
        &mut self,
        target: Rgb565,
    ) -> bool {
        if self.target == target {
            false
        } else {
            self.target = target;
            true
        }
    }

    #[inline]
    pub const fn current(&self) -> Rgb565 { self.current }

    #[inline]
    pub fn is_settled(&self) -> bool { self.current == self.target }

    /// Advance one frame. Returns `true` if the current color changed.
    pub fn update(&mut self) -> bool {
        if self.current == self.target {
            return false;
        }
        let next = lerp_rgb565(self.current, self.target, COLOR_LERP_SPEED);
        self.current = if colors_close_enough(next, self.target) { self.target } else { next };
        true
    }
}

// =============================================================================
// Color Interpolation Helpers
// =============================================================================

fn channels(color: Rgb565) -> (i32, i32, i32) {
    let raw = color.into_storage();
    (((raw >> 11) & 0x1F) as i32, ((raw >> 5) & 0x3F) as i32, (raw & 0x1F) as i32)
}

/// Linear interpolation between two colors in 565 channel space.
///
/// Fixed-point with 8 fractional bits. A nonzero delta always moves at least
/// one step, so repeated calls converge instead of stalling on rounding.
pub fn lerp_rgb565(from: Rgb565, to: Rgb565, t: f32) -> Rgb565 {
    let (from_r, from_g, from_b) = channels(from);
    let (to_r, to_g, to_b) = channels(to);
    let t_fixed = (t.clamp(0.0, 1.0) * 256.0) as i32;

    let step = |delta: i32| -> i32 {
        if delta == 0 || t_fixed == 0 {
            return 0;
        }
        match (delta * t_fixed) >> 8 {
            0 => delta.signum(),
            // Arithmetic shift rounds negative steps away from zero; don't overshoot
            s if s.abs() > delta.abs() => delta,
            s => s,
        }
    };

    let r = (from_r + step(to_r - from_r)).clamp(0, 31);
    let g = (from_g + step(to_g - from_g)).clamp(0, 63);
    let b = (from_b + step(to_b - from_b)).clamp(0, 31);

    Rgb565::new(r as u8, g as u8, b as u8)
}

fn colors_close_enough(a: Rgb565, b: Rgb565) -> bool {
    let (a_r, a_g, a_b) = channels(a);
    let (b_r, b_g, b_b) = channels(b);
    (a_r - b_r).abs() + (a_g - b_g).abs() + (a_b - b_b).abs() <= COLOR_SNAP_THRESHOLD
}

#[cfg(test)]
mod tests {
    use test_case::test_case;

    use super::*;
    use crate::colors::{BLACK, GREEN, RED, WHITE};

    // -------------------------------------------------------------------------
    // Phase Tests
    // -------------------------------------------------------------------------

    #[test_case(0, 30, 20, 0.0; "before phase")]
    #[test_case(30, 30, 20, 0.0; "phase start")]
    #[test_case(40, 30, 20, 0.5; "half way")]
    #[test_case(50, 30, 20, 1.0; "phase end")]
    #[test_case(500, 30, 20, 1.0; "long after")]
    #[test_case(5, 5, 0, 1.0; "zero length")]
    fn test_phase_progress(tick: u32, start: u32, duration: u32, expected: f32) {
        assert!((phase_progress(tick, start, duration) - expected).abs() < 1e-6);
    }

    #[test]
    fn test_lerp_point_rounds() {
        let p = lerp_point(Point::new(80, 40), Point::new(110, 10), 0.5);
        assert_eq!(p, Point::new(95, 25));
        assert_eq!(lerp_point(Point::zero(), Point::new(10, 10), 0.0), Point::zero());
    }

    #[test]
    fn test_pulse_bounded() {
        for tick in 0..600 {
            let v = pulse(tick, 0.2, 0.4, 0.6);
            assert!((0.2 - 1e-4..=1.0).contains(&v), "tick {tick}: {v}");
        }
    }

    #[test]
    fn test_ease_out_monotonic() {
        let mut last = 0.0;
        for i in 0..=10 {
            let v = ease_out_cubic(i as f32 / 10.0);
            assert!(v >= last, "Easing should never go backwards");
            last = v;
        }
        assert!((last - 1.0).abs() < 1e-6);
    }

    // -------------------------------------------------------------------------
    // Shake Tests
    // -------------------------------------------------------------------------

    #[test]
    fn test_shake_inactive_is_zero() {
        assert_eq!(shake_offset(0, false), 0);
        assert_eq!(shake_offset(123, false), 0);
    }

    #[test]
    fn test_shake_bounded() {
        assert_eq!(shake_offset(0, true), 0, "sin(0) = 0");
        for tick in 0..1000 {
            let offset = shake_offset(tick, true);
            assert!(offset.abs() <= SHAKE_AMPLITUDE as i32, "Tick {tick}: offset {offset} exceeds amplitude");
        }
    }

    // -------------------------------------------------------------------------
    // Color Tests
    // -------------------------------------------------------------------------

    #[test]
    fn test_lerp_rgb565_endpoints() {
        assert_eq!(lerp_rgb565(RED, RED, 0.5), RED);
        assert_eq!(lerp_rgb565(BLACK, WHITE, 0.0), BLACK);
        assert_eq!(lerp_rgb565(BLACK, WHITE, 1.0), WHITE);
        assert_eq!(lerp_rgb565(WHITE, BLACK, 1.0), BLACK, "Downward lerp reaches the target");
    }

    #[test]
    fn test_colors_close_enough() {
        assert!(colors_close_enough(RED, RED));
        assert!(!colors_close_enough(BLACK, WHITE));
        assert!(colors_close_enough(Rgb565::new(15, 32, 15), Rgb565::new(15, 33, 15)));
        assert!(!colors_close_enough(Rgb565::new(15, 32, 15), Rgb565::new(16, 33, 16)));
    }

    #[test]
    fn test_color_fade_converges() {
        let mut fade = ColorFade::new(BLACK);
        assert!(fade.set_target(WHITE));
        assert!(!fade.set_target(WHITE), "Same target is not a change");

        let mut frames = 0;
        while !fade.is_settled() && frames < 150 {
            assert!(fade.update());
            frames += 1;
        }
        assert_eq!(fade.current(), WHITE, "Fade should land exactly on the target");
        assert!(!fade.update(), "Settled fade reports no change");
    }

    #[test]
    fn test_color_fade_retargets_mid_way() {
        let mut fade = ColorFade::new(BLACK);
        fade.set_target(RED);
        fade.update();
        fade.update();

        fade.set_target(GREEN);
        for _ in 0..150 {
            fade.update();
        }
        assert_eq!(fade.current(), GREEN);
    }
}
