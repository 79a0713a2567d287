//! Calibration flow: a short intro, a spinning needle with a percentage, done.

use core::fmt::Write;

use embedded_graphics::prelude::Point;
use heapless::String;

use super::common::{battery, headline_pair};
use crate::{
    colors::{BLACK, WHITE},
    flow::Flow,
    led::{LedColor, LedDescriptor},
    step::{Frame, Step, Target},
    styles::Font,
    surface::{Paint, Stroke, Surface, TextSpec},
};

pub const FLOW_ID: &str = "calibration";

const START_TICKS: u32 = 60;
const CALIBRATING_TICKS: u32 = 180;

const DIAL_CENTER: Point = Point::new(80, 40);
const NEEDLE_LENGTH: f32 = 20.0;

const BATTERY_LEVEL: u32 = 85;

static STEPS: [Step; 3] = [
    Step::new(
        "Calibration Start",
        "Device is ready to begin calibration.",
        LedDescriptor::breathing(LedColor::Yellow),
        draw_start,
    )
    .advance_after(START_TICKS, Target::Step(1)),
    Step::new(
        "Calibrating",
        "Device is calibrating sensors and alignment.",
        LedDescriptor::breathing(LedColor::Yellow),
        draw_calibrating,
    )
    .advance_after(CALIBRATING_TICKS, Target::Step(2)),
    Step::new(
        "Calibration Complete",
        "Device calibration has been completed successfully.",
        LedDescriptor::on(LedColor::Green),
        draw_complete,
    ),
];

pub static FLOW: Flow = Flow::new(FLOW_ID, &STEPS);

fn draw_start(surface: &mut dyn Surface, _: &Frame<'_>) {
    surface.clear(BLACK);
    headline_pair(surface, "Calibration", "Starting...", 1.0);
    battery(surface, BATTERY_LEVEL);
}

/// Percent shown at `tick`, reaching 100 when the step advances.
pub fn calibration_percent(tick: u32) -> u32 { (tick * 100 / CALIBRATING_TICKS).min(100) }

fn draw_calibrating(surface: &mut dyn Surface, frame: &Frame<'_>) {
    surface.clear(BLACK);

    let angle = frame.tick as f32 * 0.1;
    let tip = DIAL_CENTER
        + Point::new(
            (angle.cos() * NEEDLE_LENGTH).round() as i32,
            (angle.sin() * NEEDLE_LENGTH).round() as i32,
        );
    surface.line(DIAL_CENTER, tip, Stroke::new(WHITE, 2));
    surface.circle(DIAL_CENTER, 6, Paint::Fill(WHITE));

    let mut percent: String<8> = String::new();
    write!(percent, "{}%", calibration_percent(frame.tick)).ok();
    surface.text(&percent, Point::new(80, 70), TextSpec::centered(Font::Medium, WHITE));

    battery(surface, BATTERY_LEVEL);
}

fn draw_complete(surface: &mut dyn Surface, _: &Frame<'_>) {
    surface.clear(BLACK);
    headline_pair(surface, "Calibration", "Complete!", 1.0);
    battery(surface, BATTERY_LEVEL);
}

#[cfg(test)]
mod tests {
    use test_case::test_case;

    use super::*;

    #[test_case(0, 0; "start")]
    #[test_case(90, 50; "half way")]
    #[test_case(180, 100; "done")]
    #[test_case(400, 100; "clamped")]
    fn test_calibration_percent(tick: u32, expected: u32) {
        assert_eq!(calibration_percent(tick), expected);
    }

    #[test]
    fn test_steps_chain_to_complete() {
        assert_eq!(STEPS[0].auto_advance.map(|a| a.target), Some(Target::Step(1)));
        assert_eq!(STEPS[1].auto_advance.map(|a| a.after_ticks), Some(CALIBRATING_TICKS));
        assert!(STEPS[2].auto_advance.is_none(), "Complete is terminal");
    }
}
