//! Power flow: boot, connection, and hold-to-shutdown.
//!
//! ```text
//! Off --press--> Power On --240--> On --640--> Fully On
//!                                                 |
//!                                 press (hold 2 s) v
//! Off <--30-- Shutdown Complete <--hold-- Shutdown --release early--> back
//! ```
//!
//! The press handling itself lives in the navigator; these steps only draw
//! and drive the connection phase.

use core::fmt::Write;

use embedded_graphics::{prelude::Point, primitives::Rectangle};
use heapless::String;

use super::common::{
    CENTER_ICON_CENTER, CENTER_ICON_SIZE, TRAY_ICON_CENTER, TRAY_ICON_SIZE, battery, connected_badge,
    connection_icon, power_button_hint, status_label,
};
use crate::{
    animations::{lerp, lerp_point, phase_progress},
    assets::Asset,
    colors::{BLACK, WHITE, with_opacity},
    config::{LCD_HEIGHT, LCD_WIDTH},
    flags::ConnectionPhase,
    flow::Flow,
    led::{LedColor, LedDescriptor},
    step::{Frame, Step, StepControl, Target},
    styles::Font,
    surface::{Surface, TextSpec},
};

pub const FLOW_ID: &str = "power";

pub const OFF: usize = 0;
pub const POWER_ON: usize = 1;
pub const ON: usize = 2;
pub const FULLY_ON: usize = 3;
pub const SHUTDOWN: usize = 4;
pub const SHUTDOWN_COMPLETE: usize = 5;

/// Logo fade-in length.
const LOGO_FADE_TICKS: u32 = 240;

/// Connection phase boundaries during On.
const CONNECTING_AT: u32 = 200;
const CONNECTED_AT: u32 = 540;

/// Connected icon shrinks into the tray over this many ticks.
const MINIMIZE_TICKS: u32 = 30;

/// On hands over to Fully On once the icon has settled.
const ON_DURATION: u32 = 640;

const POWER_OFF_FADE_TICKS: u32 = 30;

/// Battery level shown while the device is up.
const BATTERY_LEVEL: u32 = 85;

const STATUS_OPACITY: f32 = 0.4;

static STEPS: [Step; 6] = [
    Step::new(
        "Off",
        "Device is powered off. Press the power button to turn on.",
        LedDescriptor::OFF,
        draw_off,
    )
    .with_enter(enter_off)
    .with_power_hint(),
    Step::new(
        "Power On",
        "Device is powering on with logo fade in.",
        LedDescriptor::on(LedColor::White),
        draw_power_on,
    )
    .with_enter(enter_power_on)
    .advance_after(LOGO_FADE_TICKS, Target::Step(ON)),
    Step::new(
        "On",
        "Device is powered on. It is automatically searching for a connection.",
        LedDescriptor::breathing(LedColor::Blue),
        draw_on,
    )
    .with_update(update_on)
    .advance_after(ON_DURATION, Target::Step(FULLY_ON)),
    Step::new(
        "Fully On",
        "Device is fully powered on and connected.",
        LedDescriptor::on(LedColor::Green),
        draw_fully_on,
    )
    .with_power_hint(),
    Step::new(
        "Shutdown",
        "Press and hold the power button to initiate shutdown.",
        LedDescriptor::on(LedColor::White),
        draw_shutdown,
    )
    .animated(),
    Step::new(
        "Shutdown Complete",
        "Device has been powered off.",
        LedDescriptor::OFF,
        draw_shutdown_complete,
    )
    .advance_after(POWER_OFF_FADE_TICKS, Target::Step(OFF)),
];

pub static FLOW: Flow = Flow::new(FLOW_ID, &STEPS).starting_off();

// =============================================================================
// Hooks
// =============================================================================

fn enter_off(control: &mut StepControl<'_>) {
    let flags = control.flags_mut();
    flags.powered_on = false;
    flags.connection_phase = ConnectionPhase::Searching;
}

fn enter_power_on(control: &mut StepControl<'_>) { control.flags_mut().powered_on = true; }

fn update_on(control: &mut StepControl<'_>) {
    let phase = connection_phase_at(control.tick());
    control.flags_mut().connection_phase = phase;
    control.set_led(if phase == ConnectionPhase::Connected {
        LedDescriptor::on(LedColor::Green)
    } else {
        LedDescriptor::breathing(LedColor::Blue)
    });
}

/// Connection phase the On step shows at `tick`.
pub const fn connection_phase_at(tick: u32) -> ConnectionPhase {
    if tick >= CONNECTED_AT {
        ConnectionPhase::Connected
    } else if tick >= CONNECTING_AT {
        ConnectionPhase::Connecting
    } else {
        ConnectionPhase::Searching
    }
}

// =============================================================================
// Renders
// =============================================================================

fn draw_off(surface: &mut dyn Surface, _: &Frame<'_>) { surface.clear(BLACK); }

fn draw_power_on(surface: &mut dyn Surface, frame: &Frame<'_>) {
    surface.clear(BLACK);
    let size = frame.assets.size_or_placeholder(Asset::Logo);
    let top_left = Point::new(
        (LCD_WIDTH as i32 - size.width as i32) / 2,
        (LCD_HEIGHT as i32 - size.height as i32) / 2,
    );
    let opacity = phase_progress(frame.tick, 0, LOGO_FADE_TICKS);
    surface.image(Asset::Logo, Rectangle::new(top_left, size), opacity);
}

fn draw_on(surface: &mut dyn Surface, frame: &Frame<'_>) {
    surface.clear(BLACK);
    battery(surface, BATTERY_LEVEL);

    let phase = frame.flags.connection_phase;
    if phase != ConnectionPhase::Connected {
        connection_icon(surface, phase, frame.tick, CENTER_ICON_CENTER, CENTER_ICON_SIZE);
        status_label(surface, phase.label(), STATUS_OPACITY);
        return;
    }

    // Shrink the badge from the center into the tray
    let progress = phase_progress(frame.tick, CONNECTED_AT, MINIMIZE_TICKS);
    let center = lerp_point(CENTER_ICON_CENTER, TRAY_ICON_CENTER, progress);
    let size = lerp(CENTER_ICON_SIZE as f32, TRAY_ICON_SIZE as f32, progress).round() as u32;
    connected_badge(surface, center, size);

    if progress < 1.0 {
        status_label(surface, phase.label(), STATUS_OPACITY * (1.0 - progress));
    }
}

fn draw_fully_on(surface: &mut dyn Surface, _: &Frame<'_>) {
    surface.clear(BLACK);
    battery(surface, BATTERY_LEVEL);
    connected_badge(surface, TRAY_ICON_CENTER, TRAY_ICON_SIZE);
}

fn draw_shutdown(surface: &mut dyn Surface, frame: &Frame<'_>) {
    surface.clear(BLACK);
    let spec = TextSpec::left(Font::Medium, WHITE);

    if frame.flags.shutdown_in_progress() {
        let mut seconds: String<8> = String::new();
        write!(seconds, "{}", frame.flags.shutdown_seconds_left()).ok();
        surface.text("Shutting down", Point::new(10, 30), spec);
        surface.text(&seconds, Point::new(10, 50), spec);
    } else {
        surface.text("Press and hold", Point::new(10, 30), spec);
        surface.text("power button", Point::new(10, 50), spec);
        surface.text("to shutdown", Point::new(10, 70), spec);
    }

    battery(surface, BATTERY_LEVEL);
    power_button_hint(surface, frame.tick);
}

fn draw_shutdown_complete(surface: &mut dyn Surface, frame: &Frame<'_>) {
    surface.clear(BLACK);
    let opacity = 1.0 - phase_progress(frame.tick, 0, POWER_OFF_FADE_TICKS);
    let spec = TextSpec::centered(Font::Medium, with_opacity(WHITE, opacity));
    surface.text("Device", Point::new(80, 30), spec);
    surface.text("Powered Off", Point::new(80, 50), spec);
}
