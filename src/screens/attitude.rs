//! Attitude flow: artificial horizon and bubble level from the simulated
//! orientation.
//!
//! Roll rotates the horizon around the LCD center, pitch shifts it
//! vertically. The ground turns green and the LED goes solid while the device
//! is level (within one degree on both axes); otherwise the LED blinks.

use core::fmt::Write;

use embedded_graphics::prelude::Point;
use heapless::String;

use crate::{
    colors::{BLACK, EARTH_BROWN, LEVEL_GREEN, ORANGE, SKY_BLUE, WHITE},
    config::{LCD_CENTER_X, LCD_CENTER_Y},
    flags::{ORIENTATION_LIMIT, Orientation},
    flow::Flow,
    led::{LedColor, LedDescriptor},
    step::{Frame, Step, StepControl},
    styles::Font,
    surface::{Paint, Stroke, Surface, TextSpec},
};

pub const FLOW_ID: &str = "attitude";

/// Horizon shift per degree of pitch.
const PITCH_PIXELS_PER_DEGREE: f32 = 0.8;

/// Half-length of the horizon line and depth of the ground polygon; long
/// enough to cover the LCD at any roll.
const HORIZON_REACH: f32 = 200.0;

const BUBBLE_CENTER: Point = Point::new(120, 40);
const BUBBLE_RING: u32 = 56;
const BUBBLE_SIZE: u32 = 10;

static STEPS: [Step; 2] = [
    Step::new(
        "Attitude",
        "Artificial horizon. Tilt the device to move it; the LED turns solid when level.",
        LedDescriptor::on(LedColor::Green),
        draw_horizon,
    )
    .with_enter(update_level_led)
    .with_update(update_level_led),
    Step::new(
        "Attitude Readout",
        "Roll and pitch in degrees with a bubble level.",
        LedDescriptor::on(LedColor::Green),
        draw_readout,
    )
    .with_enter(update_level_led)
    .with_update(update_level_led),
];

pub static FLOW: Flow = Flow::new(FLOW_ID, &STEPS);

/// LED for the current orientation: solid green when level, blinking otherwise.
pub const fn level_led(level: bool) -> LedDescriptor {
    if level { LedDescriptor::on(LedColor::Green) } else { LedDescriptor::blink(LedColor::Green) }
}

fn update_level_led(control: &mut StepControl<'_>) {
    let level = control.flags().orientation.is_level();
    control.set_led(level_led(level));
}

/// Horizon endpoints and the ground polygon for `orientation`.
pub fn horizon_geometry(orientation: Orientation) -> ([Point; 2], [Point; 4]) {
    let (sin, cos) = orientation.roll.to_radians().sin_cos();
    let cx = LCD_CENTER_X as f32;
    let cy = orientation.pitch.mul_add(PITCH_PIXELS_PER_DEGREE, LCD_CENTER_Y as f32);

    let at = |along: f32, down: f32| {
        Point::new(
            (cx + cos * along - sin * down).round() as i32,
            (cy + sin * along + cos * down).round() as i32,
        )
    };

    let left = at(-HORIZON_REACH, 0.0);
    let right = at(HORIZON_REACH, 0.0);
    let ground = [left, right, at(HORIZON_REACH, HORIZON_REACH), at(-HORIZON_REACH, HORIZON_REACH)];
    ([left, right], ground)
}

fn draw_horizon(surface: &mut dyn Surface, frame: &Frame<'_>) {
    let orientation = frame.flags.orientation;
    let ground_color = if orientation.is_level() { LEVEL_GREEN } else { EARTH_BROWN };

    surface.clear(SKY_BLUE);
    let ([left, right], ground) = horizon_geometry(orientation);
    surface.polygon(&ground, Paint::Fill(ground_color));
    surface.line(left, right, Stroke::new(WHITE, 1));

    // Fixed aircraft symbol
    let center = Point::new(LCD_CENTER_X, LCD_CENTER_Y);
    let wing = Stroke::new(ORANGE, 2);
    surface.line(center + Point::new(-22, 0), center + Point::new(-8, 0), wing);
    surface.line(center + Point::new(8, 0), center + Point::new(22, 0), wing);
    surface.circle(center, 4, Paint::Fill(ORANGE));
}

fn draw_readout(surface: &mut dyn Surface, frame: &Frame<'_>) {
    surface.clear(BLACK);
    let orientation = frame.flags.orientation;
    let level = orientation.is_level();

    let spec = TextSpec::left(Font::Medium, WHITE);
    let mut line: String<16> = String::new();
    write!(line, "Roll  {:+.1}", orientation.roll).ok();
    surface.text(&line, Point::new(8, 28), spec);
    line.clear();
    write!(line, "Pitch {:+.1}", orientation.pitch).ok();
    surface.text(&line, Point::new(8, 48), spec);

    let status = if level { "LEVEL" } else { "TILTED" };
    let status_color = if level { LEVEL_GREEN } else { ORANGE };
    surface.text(status, Point::new(8, 68), TextSpec::left(Font::Small, status_color));

    // Bubble drifts toward the raised side, pinned inside the ring
    let reach = (BUBBLE_RING - BUBBLE_SIZE) as f32 / 2.0;
    let offset = Point::new(
        (orientation.roll / ORIENTATION_LIMIT * reach).round() as i32,
        (orientation.pitch / ORIENTATION_LIMIT * reach).round() as i32,
    );
    surface.circle(BUBBLE_CENTER, BUBBLE_RING, Paint::stroke(WHITE, 1));
    surface.line(BUBBLE_CENTER + Point::new(-4, 0), BUBBLE_CENTER + Point::new(4, 0), Stroke::new(WHITE, 1));
    surface.line(BUBBLE_CENTER + Point::new(0, -4), BUBBLE_CENTER + Point::new(0, 4), Stroke::new(WHITE, 1));
    surface.circle(BUBBLE_CENTER + offset, BUBBLE_SIZE, Paint::Fill(status_color));
}
