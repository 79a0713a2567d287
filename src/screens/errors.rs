//! Error states catalogue.
//!
//! The first two steps are the firmware flow's failure screens, reachable
//! here without running an update. Critical errors blink and restart the
//! device after five seconds.

use super::{
    common::{caption, code_label, error_cross, error_exclamation},
    firmware::{CHARGER_DISCONNECTED_STEP, UPDATE_FAILED_STEP},
    power,
};
use crate::{
    colors::BLACK,
    flow::Flow,
    led::{LedColor, LedDescriptor},
    step::{Frame, Step, StepRef, Target},
    surface::Surface,
};

pub const FLOW_ID: &str = "errorStates";

/// Critical errors restart after this many ticks.
const AUTO_RESTART_TICKS: u32 = 300;

const RESTART: Target = Target::Flow(StepRef::new(power::FLOW_ID, power::POWER_ON));

static STEPS: [Step; 7] = [
    CHARGER_DISCONNECTED_STEP,
    UPDATE_FAILED_STEP,
    Step::new(
        "System Error",
        "A system error has occurred. Please restart the device.",
        LedDescriptor::breathing(LedColor::Red),
        draw_system_error,
    ),
    Step::new(
        "Critical Error",
        "A critical error has occurred. Device will restart automatically.",
        LedDescriptor::blink(LedColor::Red),
        draw_critical_error,
    )
    .advance_after(AUTO_RESTART_TICKS, RESTART),
    Step::new(
        "Error E001",
        "Hardware initialization error. Please contact support.",
        LedDescriptor::breathing(LedColor::Red),
        draw_e001,
    ),
    Step::new(
        "Error E002",
        "Memory corruption detected. Device will restart.",
        LedDescriptor::blink(LedColor::Red),
        draw_e002,
    )
    .advance_after(AUTO_RESTART_TICKS, RESTART),
    Step::new(
        "Error E003",
        "Sensor calibration error. Please recalibrate.",
        LedDescriptor::breathing(LedColor::Red),
        draw_e003,
    ),
];

pub static FLOW: Flow = Flow::new(FLOW_ID, &STEPS);

fn draw_system_error(surface: &mut dyn Surface, _: &Frame<'_>) {
    surface.clear(BLACK);
    error_exclamation(surface, 1.0);
    caption(surface, "System Error", "Restart Required");
}

fn draw_critical_error(surface: &mut dyn Surface, frame: &Frame<'_>) {
    surface.clear(BLACK);
    error_cross(surface, frame.tick, true);
    caption(surface, "Critical Error", "Auto-Restarting...");
}

fn draw_e001(surface: &mut dyn Surface, frame: &Frame<'_>) {
    draw_coded(surface, frame, "E001", "Hardware Error", "Contact Support", false);
}

fn draw_e002(surface: &mut dyn Surface, frame: &Frame<'_>) {
    draw_coded(surface, frame, "E002", "Memory Error", "Auto-Restarting...", true);
}

fn draw_e003(surface: &mut dyn Surface, frame: &Frame<'_>) {
    draw_coded(surface, frame, "E003", "Sensor Error", "Recalibration Needed", false);
}

fn draw_coded(
    surface: &mut dyn Surface,
    frame: &Frame<'_>,
    code: &str,
    headline: &str,
    detail: &str,
    critical: bool,
) {
    surface.clear(BLACK);
    code_label(surface, code);
    error_cross(surface, frame.tick, critical);
    caption(surface, headline, detail);
}
