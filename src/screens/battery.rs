//! Battery status flow: normal, low, and critical levels.

use super::common::{battery, caption, error_exclamation, status_label};
use crate::{
    animations::pulse,
    colors::BLACK,
    flow::Flow,
    led::{LedColor, LedDescriptor},
    step::{Frame, Step},
    surface::Surface,
};

pub const FLOW_ID: &str = "batteryStatus";

static STEPS: [Step; 3] = [
    Step::new(
        "Battery Normal",
        "Battery level is normal. Shows in tray position.",
        LedDescriptor::on(LedColor::Green),
        draw_normal,
    ),
    Step::new(
        "Battery Low",
        "Battery level is low. Shows warning with percentage.",
        LedDescriptor::on(LedColor::Green),
        draw_low,
    )
    .animated(),
    Step::new(
        "Battery Critical",
        "Battery level is critical. Device will shutdown soon.",
        LedDescriptor::on(LedColor::Green),
        draw_critical,
    )
    .animated(),
];

pub static FLOW: Flow = Flow::new(FLOW_ID, &STEPS);

fn draw_normal(surface: &mut dyn Surface, _: &Frame<'_>) {
    surface.clear(BLACK);
    battery(surface, 85);
    status_label(surface, "Battery: 85%", 0.5);
}

fn draw_low(surface: &mut dyn Surface, frame: &Frame<'_>) {
    surface.clear(BLACK);
    battery(surface, 15);
    error_exclamation(surface, pulse(frame.tick, 0.1, 0.3, 0.7));
    caption(surface, "Low Battery", "15% Remaining");
}

fn draw_critical(surface: &mut dyn Surface, frame: &Frame<'_>) {
    surface.clear(BLACK);
    battery(surface, 5);
    error_exclamation(surface, pulse(frame.tick, 0.2, 0.4, 0.6));
    caption(surface, "Critical Battery", "Shutdown Imminent");
}
