//! Firmware update flow.
//!
//! Update Ready asks for a charger and shows the charger overlay until one is
//! connected. Updating fills a segmented bar over 30 seconds, from empty on
//! every visit, or faster when the companion remote pushes progress. If the
//! charger is still missing halfway through, the update drops to Charger
//! Disconnected. Update Complete draws a check and restarts the device
//! through the power flow.

use core::{f32::consts::TAU, fmt::Write};

use embedded_graphics::{
    prelude::{Angle, Point, Size},
    primitives::Rectangle,
};
use heapless::String;

use super::{
    common::{caption, error_cross},
    power,
};
use crate::{
    animations::{lerp_point, phase_progress, pulse},
    colors::{BLACK, GREEN, RED, TRACK_GRAY, WHITE, with_opacity},
    config::TICKS_PER_SECOND,
    flow::Flow,
    led::{LedColor, LedDescriptor},
    overlay::Overlay,
    step::{Frame, Step, StepControl, StepRef, Target},
    styles::Font,
    surface::{Paint, Stroke, Surface, TextSpec},
};

pub const FLOW_ID: &str = "firmwareUpdate";

pub const READY: usize = 0;
pub const UPDATING: usize = 1;
pub const COMPLETE: usize = 2;
pub const CHARGER_DISCONNECTED: usize = 3;
pub const FAILED: usize = 4;

// =============================================================================
// Timing
// =============================================================================

/// Unassisted update length.
const UPDATE_TICKS: u32 = 30 * TICKS_PER_SECOND;

/// Without a charger the update aborts here.
const CHARGER_CHECK_TICKS: u32 = 900;

/// Charge bar grows over this many ticks, then breathes with this period.
const BAR_GROW_TICKS: u32 = 30;
const BAR_BREATH_TICKS: u32 = 60;

const RESTART_TICKS: u32 = 170;

// =============================================================================
// Layout
// =============================================================================

const BAR_X: i32 = 2;
const BAR_TOP: i32 = 28;
const BAR_WIDTH: u32 = 3;
const BAR_HEIGHT: u32 = 44;

const TRACK: Rectangle = Rectangle::new(Point::new(20, 30), Size::new(120, 10));
const SEGMENTS: u32 = 12;
const SEGMENT_PITCH: i32 = 10;
const SEGMENT_WIDTH: u32 = 9;

const CHECK_CENTER: Point = Point::new(80, 30);
const CHECK_POINTS: [Point; 3] = [Point::new(70, 30), Point::new(75, 35), Point::new(90, 25)];

// =============================================================================
// Steps
// =============================================================================

/// Shared with the error-states flow.
pub(super) const CHARGER_DISCONNECTED_STEP: Step = Step::new(
    "Charger Disconnected",
    "Charger was disconnected during update. Please reconnect and try again.",
    LedDescriptor::breathing(LedColor::Red),
    draw_charger_disconnected,
);

/// Shared with the error-states flow.
pub(super) const UPDATE_FAILED_STEP: Step = Step::new(
    "Update Failed",
    "Firmware update failed. Please try again.",
    LedDescriptor::breathing(LedColor::Red),
    draw_update_failed,
);

static STEPS: [Step; 5] = [
    Step::new(
        "Update Ready",
        "Connect charger before starting firmware update. Once charger is connected we can remove the warnings",
        LedDescriptor::breathing(LedColor::Yellow),
        draw_ready,
    )
    .with_enter(enter_ready)
    .with_update(update_ready),
    Step::new(
        "Updating",
        "Firmware update in progress. Do not power off.",
        LedDescriptor::breathing(LedColor::Yellow),
        draw_updating,
    )
    .with_enter(enter_updating)
    .with_update(update_updating),
    Step::new(
        "Update Complete",
        "Firmware update completed successfully.",
        LedDescriptor::on(LedColor::Green),
        draw_complete,
    )
    .advance_after(RESTART_TICKS, Target::Flow(StepRef::new(power::FLOW_ID, power::POWER_ON))),
    CHARGER_DISCONNECTED_STEP,
    UPDATE_FAILED_STEP,
];

pub static FLOW: Flow = Flow::new(FLOW_ID, &STEPS);

// =============================================================================
// Update Ready
// =============================================================================

fn enter_ready(control: &mut StepControl<'_>) {
    control.flags_mut().charger_connected = false;
    control.show_overlay(Overlay::ChargerIcon);
}

fn update_ready(control: &mut StepControl<'_>) {
    if control.flags().charger_connected {
        control.hide_overlay();
    } else {
        control.show_overlay(Overlay::ChargerIcon);
    }
}

/// Height and opacity of the charge bar at `tick`.
pub fn charge_bar(tick: u32) -> (u32, f32) {
    if tick < BAR_GROW_TICKS {
        return (BAR_HEIGHT * tick / BAR_GROW_TICKS, 1.0);
    }
    let cycle = (tick - BAR_GROW_TICKS) as f32 / BAR_BREATH_TICKS as f32;
    (BAR_HEIGHT, (cycle * TAU).sin().mul_add(0.35, 0.3).clamp(0.0, 1.0))
}

fn draw_ready(surface: &mut dyn Surface, frame: &Frame<'_>) {
    surface.clear(BLACK);

    if !frame.flags.charger_connected {
        let (height, opacity) = charge_bar(frame.tick);
        if height > 0 {
            let top = BAR_TOP + (BAR_HEIGHT - height) as i32 / 2;
            let bar = Rectangle::new(Point::new(BAR_X, top), Size::new(BAR_WIDTH, height));
            surface.rect(bar, 0, Paint::Fill(with_opacity(WHITE, opacity)));
        }
    }

    surface.text("Firmware update", Point::new(80, 45), TextSpec::centered(Font::Medium, WHITE));
    surface.text("connect power", Point::new(80, 65), TextSpec::centered(Font::Small, WHITE));
}

// =============================================================================
// Updating
// =============================================================================

/// Every visit starts the update over.
fn enter_updating(control: &mut StepControl<'_>) { control.flags_mut().set_firmware_progress(0.0); }

fn update_updating(control: &mut StepControl<'_>) {
    let tick = control.tick();
    let elapsed = tick as f32 / UPDATE_TICKS as f32;
    let progress = control.flags().firmware_progress.max(elapsed);
    control.flags_mut().set_firmware_progress(progress);

    if control.flags().firmware_progress >= 1.0 {
        control.jump_to(COMPLETE);
    } else if tick >= CHARGER_CHECK_TICKS && !control.flags().charger_connected {
        control.jump_to(CHARGER_DISCONNECTED);
    }
}

/// Time left at `progress`, as `m:ss`.
fn remaining_label(progress: f32) -> String<24> {
    let total = UPDATE_TICKS / TICKS_PER_SECOND;
    let left = ((1.0 - progress.clamp(0.0, 1.0)) * total as f32).ceil() as u32;
    let mut label = String::new();
    write!(label, "{}:{:02} remaining", left / 60, left % 60).ok();
    label
}

fn draw_updating(surface: &mut dyn Surface, frame: &Frame<'_>) {
    surface.clear(BLACK);
    let tick = frame.tick;
    let progress = frame.flags.firmware_progress;

    surface.rect(TRACK, 0, Paint::Fill(TRACK_GRAY));
    let lit = progress * SEGMENTS as f32;
    for i in 0..SEGMENTS {
        let opacity = if (i as f32) <= lit {
            ((tick as f32).mul_add(0.1, i as f32 * 0.5)).sin().mul_add(0.3, 0.7)
        } else {
            0.2
        };
        let segment = Rectangle::new(
            Point::new(TRACK.top_left.x + SEGMENT_PITCH * i as i32, TRACK.top_left.y),
            Size::new(SEGMENT_WIDTH, TRACK.size.height),
        );
        surface.rect(segment, 0, Paint::Fill(with_opacity(GREEN, opacity)));
    }

    let mut percent: String<8> = String::new();
    write!(percent, "{}%", (progress * 100.0) as u32).ok();
    let percent_color = with_opacity(WHITE, pulse(tick, 0.05, 0.2, 0.8));
    surface.text(&percent, Point::new(80, 25), TextSpec::centered(Font::Small, percent_color));

    surface.text(&remaining_label(progress), Point::new(80, 55), TextSpec::centered(Font::Small, WHITE));

    let warning = with_opacity(RED, pulse(tick, 0.1, 0.3, 0.7));
    surface.text("DO NOT POWER OFF", Point::new(80, 70), TextSpec::centered(Font::Small, warning));
}

// =============================================================================
// Update Complete
// =============================================================================

fn draw_complete(surface: &mut dyn Surface, frame: &Frame<'_>) {
    surface.clear(BLACK);
    let tick = frame.tick;
    let stroke = Stroke::new(GREEN, 2);

    let ring = phase_progress(tick, 0, 30);
    if ring > 0.0 {
        surface.arc(CHECK_CENTER, 30, Angle::from_degrees(-90.0), Angle::from_degrees(360.0 * ring), stroke);
    }

    // Check is drawn stroke by stroke: short leg, then long leg
    let check = phase_progress(tick, 30, 20);
    if check > 0.0 {
        let [a, b, c] = CHECK_POINTS;
        if check < 0.5 {
            surface.line(a, lerp_point(a, b, check * 2.0), stroke);
        } else {
            surface.polyline(&[a, b, lerp_point(b, c, (check - 0.5) * 2.0)], stroke);
        }
    }

    let headline = phase_progress(tick, 50, 30);
    if headline > 0.0 {
        let spec = TextSpec::centered(Font::Medium, with_opacity(WHITE, headline));
        surface.text("Update Complete", Point::new(80, 60), spec);
    }

    let detail = phase_progress(tick, 80, 60);
    if detail > 0.0 {
        let spec = TextSpec::centered(Font::Small, with_opacity(WHITE, detail));
        surface.text("Device will restart", Point::new(80, 75), spec);
    }
}

// =============================================================================
// Failures
// =============================================================================

fn draw_charger_disconnected(surface: &mut dyn Surface, frame: &Frame<'_>) {
    surface.clear(BLACK);
    error_cross(surface, frame.tick, false);
    caption(surface, "Charger", "Disconnected");
}

fn draw_update_failed(surface: &mut dyn Surface, frame: &Frame<'_>) {
    surface.clear(BLACK);
    error_cross(surface, frame.tick, false);
    caption(surface, "Update Failed", "Please try again");
}
