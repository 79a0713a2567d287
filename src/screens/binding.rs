//! Binding flow: pair the device with an account via a micro QR code.
//!
//! On Binding Ready a power press toggles between the QR view and a large
//! serial number; the navigator routes the press here through the device
//! bindings instead of starting a shutdown.

use embedded_graphics::{prelude::Point, primitives::Rectangle};
use heapless::String;

use super::common::{battery, headline_pair};
use crate::{
    assets::Asset,
    colors::{BLACK, WHITE},
    config::LCD_HEIGHT,
    flow::Flow,
    led::{LedColor, LedDescriptor},
    step::{Frame, Step, StepControl, Target},
    styles::Font,
    surface::{Surface, TextSpec},
};

pub const FLOW_ID: &str = "binding";

pub const READY: usize = 0;
pub const IN_PROGRESS: usize = 1;
pub const COMPLETE: usize = 2;

/// Serial number printed on the device label.
pub const SERIAL: &str = "124_DS";

const BINDING_TICKS: u32 = 300;

/// One more dot every this many ticks, up to three.
const DOT_TICKS: u32 = 20;

const BATTERY_LEVEL: u32 = 85;

static STEPS: [Step; 3] = [
    Step::new(
        "Binding Ready",
        "Device is ready to be bound to your account.",
        LedDescriptor::breathing(LedColor::Yellow),
        draw_ready,
    )
    .with_enter(enter_ready)
    .with_power_hint(),
    Step::new(
        "Binding in Progress",
        "Device is being bound to your account.",
        LedDescriptor::breathing(LedColor::Yellow),
        draw_in_progress,
    )
    .advance_after(BINDING_TICKS, Target::Step(COMPLETE)),
    Step::new(
        "Binding Complete",
        "Device has been successfully bound to your account.",
        LedDescriptor::on(LedColor::Green),
        draw_complete,
    ),
];

pub static FLOW: Flow = Flow::new(FLOW_ID, &STEPS);

fn enter_ready(control: &mut StepControl<'_>) { control.flags_mut().show_serial = false; }

fn draw_ready(surface: &mut dyn Surface, frame: &Frame<'_>) {
    surface.clear(BLACK);

    if frame.flags.show_serial {
        surface.text(SERIAL, Point::new(80, 40), TextSpec::centered(Font::Huge, WHITE).middle());
        return;
    }

    // QR spans the width, pinned to the bottom edge
    let size = frame.assets.size_for_width(Asset::MicroQr, 160);
    let top = LCD_HEIGHT as i32 - size.height as i32;
    surface.image(Asset::MicroQr, Rectangle::new(Point::new(0, top), size), 1.0);
    surface.text(SERIAL, Point::new(80, top / 2), TextSpec::centered(Font::Medium, WHITE).middle());
}

fn draw_in_progress(surface: &mut dyn Surface, frame: &Frame<'_>) {
    surface.clear(BLACK);

    let dots = ((frame.tick / DOT_TICKS) % 4) as usize;
    let mut text: String<12> = String::new();
    text.push_str("Binding").ok();
    for _ in 0..dots {
        text.push('.').ok();
    }
    surface.text(&text, Point::new(80, 40), TextSpec::centered(Font::Medium, WHITE));
    battery(surface, BATTERY_LEVEL);
}

fn draw_complete(surface: &mut dyn Surface, _: &Frame<'_>) {
    surface.clear(BLACK);
    headline_pair(surface, "Binding", "Complete!", 1.0);
    battery(surface, BATTERY_LEVEL);
}
