//! Drawing pieces shared by several flows: tray battery, connection icon,
//! error badges, captions, and the power-button hint.
//!
//! Positions are LCD pixels. The tray sits along the top edge (connection icon
//! at x=110, battery at x=130), the error badge is a 30px ring centered at
//! (80, 30), and two-line captions sit under it at y=60 and y=75.

use core::f32::consts::TAU;

use embedded_graphics::{
    prelude::{Angle, Point, Size},
    primitives::Rectangle,
};

use crate::{
    animations::shake_offset,
    colors::{GREEN, RED, WHITE, with_opacity},
    flags::ConnectionPhase,
    styles::Font,
    surface::{Paint, Stroke, Surface, TextSpec},
};

// =============================================================================
// Layout
// =============================================================================

/// Tray battery outline.
const BATTERY_AREA: Rectangle = Rectangle::new(Point::new(130, 5), Size::new(20, 10));

/// Battery fill turns red at or below this level.
const BATTERY_LOW_LEVEL: u32 = 20;

/// Connection icon in the tray.
pub const TRAY_ICON_CENTER: Point = Point::new(110, 10);
pub const TRAY_ICON_SIZE: u32 = 10;

/// Connection icon while it has the screen to itself.
pub const CENTER_ICON_CENTER: Point = Point::new(80, 40);
pub const CENTER_ICON_SIZE: u32 = 30;

/// Error badge ring.
pub const BADGE_CENTER: Point = Point::new(80, 30);
pub const BADGE_DIAMETER: u32 = 30;

const CAPTION_LINE_1: Point = Point::new(80, 60);
const CAPTION_LINE_2: Point = Point::new(80, 75);

/// Top-left status label (connection phase, error code, battery level).
const STATUS_LABEL_POS: Point = Point::new(10, 15);

// =============================================================================
// Tray
// =============================================================================

/// Tray battery with a fill proportional to `level` (0..=100).
pub fn battery(
    surface: &mut dyn Surface,
    level: u32,
) {
    let level = level.min(100);
    surface.rect(BATTERY_AREA, 0, Paint::stroke(WHITE, 1));

    // Tip on the right
    let tip = Rectangle::new(
        Point::new(BATTERY_AREA.top_left.x + BATTERY_AREA.size.width as i32, BATTERY_AREA.top_left.y + 2),
        Size::new(2, BATTERY_AREA.size.height - 4),
    );
    surface.rect(tip, 0, Paint::Fill(WHITE));

    let fill_width = (BATTERY_AREA.size.width - 2) * level / 100;
    if fill_width > 0 {
        let fill = Rectangle::new(
            BATTERY_AREA.top_left + Point::new(1, 1),
            Size::new(fill_width, BATTERY_AREA.size.height - 2),
        );
        let color = if level > BATTERY_LOW_LEVEL { WHITE } else { RED };
        surface.rect(fill, 0, Paint::Fill(color));
    }
}

/// Connection state icon of `size` pixels centered on `center`.
///
/// Searching spins a 270° arc, connecting pulses a ring, connected shows a
/// green ring with a checkmark.
pub fn connection_icon(
    surface: &mut dyn Surface,
    phase: ConnectionPhase,
    tick: u32,
    center: Point,
    size: u32,
) {
    let width = if size >= 20 { 2 } else { 1 };
    match phase {
        ConnectionPhase::Searching => {
            let start = Angle::from_radians((tick as f32 * 0.1) % TAU);
            surface.arc(center, size, start, Angle::from_degrees(270.0), Stroke::new(WHITE, width));
        }
        ConnectionPhase::Connecting => {
            let scale = (tick as f32 * 0.1).sin().mul_add(0.2, 0.8);
            let diameter = (size as f32 * scale).round() as u32;
            surface.circle(center, diameter, Paint::stroke(WHITE, width));
        }
        ConnectionPhase::Connected => connected_badge(surface, center, size),
    }
}

/// Green ring with a checkmark.
pub fn connected_badge(
    surface: &mut dyn Surface,
    center: Point,
    size: u32,
) {
    let width = if size >= 20 { 2 } else { 1 };
    surface.circle(center, size, Paint::stroke(GREEN, width));

    let s = size as i32;
    let origin = center - Point::new(s / 2, s / 2);
    surface.polyline(
        &[
            origin + Point::new(s / 3, s / 2),
            origin + Point::new(s / 2, s * 2 / 3),
            origin + Point::new(s * 2 / 3, s / 3),
        ],
        Stroke::new(GREEN, width),
    );
}

// =============================================================================
// Text
// =============================================================================

/// Small status label in the top-left corner.
pub fn status_label(
    surface: &mut dyn Surface,
    text: &str,
    opacity: f32,
) {
    surface.text(text, STATUS_LABEL_POS, TextSpec::left(Font::Small, with_opacity(WHITE, opacity)));
}

/// Error code label (`E001`) in the top-left corner.
pub fn code_label(
    surface: &mut dyn Surface,
    code: &str,
) {
    surface.text(code, STATUS_LABEL_POS, TextSpec::left(Font::Medium, WHITE));
}

/// Two centered lines under the badge: a medium headline and a small detail.
pub fn caption(
    surface: &mut dyn Surface,
    headline: &str,
    detail: &str,
) {
    surface.text(headline, CAPTION_LINE_1, TextSpec::centered(Font::Medium, WHITE));
    surface.text(detail, CAPTION_LINE_2, TextSpec::centered(Font::Small, WHITE));
}

/// Two centered medium lines at y=30 and y=50 ("Binding" / "Complete!").
pub fn headline_pair(
    surface: &mut dyn Surface,
    first: &str,
    second: &str,
    opacity: f32,
) {
    let spec = TextSpec::centered(Font::Medium, with_opacity(WHITE, opacity));
    surface.text(first, Point::new(80, 30), spec);
    surface.text(second, Point::new(80, 50), spec);
}

// =============================================================================
// Badges
// =============================================================================

/// Red ring with an X. `shake` wiggles it horizontally (critical errors).
pub fn error_cross(
    surface: &mut dyn Surface,
    tick: u32,
    shake: bool,
) {
    let c = BADGE_CENTER + Point::new(shake_offset(tick, shake), 0);
    let stroke = Stroke::new(RED, 2);
    surface.circle(c, BADGE_DIAMETER, Paint::Stroke(stroke));
    surface.line(c + Point::new(-10, -10), c + Point::new(10, 10), stroke);
    surface.line(c + Point::new(10, -10), c + Point::new(-10, 10), stroke);
}

/// Red ring with an exclamation mark, at `opacity` (warning pulses).
pub fn error_exclamation(
    surface: &mut dyn Surface,
    opacity: f32,
) {
    let color = with_opacity(RED, opacity);
    let stroke = Stroke::new(color, 2);
    let c = BADGE_CENTER;
    surface.circle(c, BADGE_DIAMETER, Paint::Stroke(stroke));
    surface.line(c + Point::new(0, -10), c + Point::new(0, 5), stroke);
    surface.circle(c + Point::new(0, 10), 3, Paint::Fill(color));
}

// =============================================================================
// Power Button Hint
// =============================================================================

/// Arrow bouncing toward a breathing bar on the right edge, pointing at the
/// device's power button.
pub fn power_button_hint(
    surface: &mut dyn Surface,
    tick: u32,
) {
    const X: i32 = 140;
    const Y: i32 = 40;
    const ARROW_LENGTH: i32 = 15;
    const BAR_HEIGHT: i32 = 20;

    let t = tick as f32;

    let bar_opacity = (t * 0.02).sin().abs().mul_add(0.5, 0.3);
    surface.line(
        Point::new(X + 5, Y - BAR_HEIGHT / 2),
        Point::new(X + 5, Y + BAR_HEIGHT / 2),
        Stroke::new(with_opacity(WHITE, bar_opacity), 2),
    );

    let bounce = ((t * 0.05).sin().abs() * 10.0) as i32;
    let tail = X - ARROW_LENGTH - 20 + bounce;
    let head = Point::new(tail + ARROW_LENGTH, Y);
    let stroke = Stroke::new(with_opacity(WHITE, 0.8), 2);
    surface.line(Point::new(tail, Y), head, stroke);
    surface.polyline(&[head + Point::new(-5, -5), head, head + Point::new(-5, 5)], stroke);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::{DrawCall, RecordingSurface};

    fn surface() -> RecordingSurface { RecordingSurface::new(Size::new(160, 80)) }

    fn fills(surface: &RecordingSurface) -> Vec<(Rectangle, Paint)> {
        surface
            .calls()
            .iter()
            .filter_map(|call| match call {
                DrawCall::Rect { area, paint, .. } => Some((*area, *paint)),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_battery_fill_scales_with_level() {
        let mut s = surface();
        battery(&mut s, 50);
        let rects = fills(&s);
        assert_eq!(rects.len(), 3, "Outline, tip, fill");
        assert_eq!(rects[2].0.size, Size::new(9, 8), "Half of the 18px interior");
        assert_eq!(rects[2].1, Paint::Fill(WHITE));
    }

    #[test]
    fn test_battery_low_level_is_red() {
        let mut s = surface();
        battery(&mut s, 15);
        assert_eq!(fills(&s)[2].1, Paint::Fill(RED));
    }

    #[test]
    fn test_empty_battery_has_no_fill() {
        let mut s = surface();
        battery(&mut s, 0);
        assert_eq!(fills(&s).len(), 2, "Only outline and tip");
    }

    #[test]
    fn test_connection_icon_per_phase() {
        let mut s = surface();
        connection_icon(&mut s, ConnectionPhase::Searching, 0, CENTER_ICON_CENTER, CENTER_ICON_SIZE);
        assert!(matches!(s.calls()[0], DrawCall::Arc { .. }), "Searching spins an arc");

        let mut s = surface();
        connection_icon(&mut s, ConnectionPhase::Connected, 0, TRAY_ICON_CENTER, TRAY_ICON_SIZE);
        assert!(
            matches!(s.calls()[0], DrawCall::Circle { paint: Paint::Stroke(Stroke { color: GREEN, width: 1 }), .. }),
            "Connected tray icon is a thin green ring"
        );
        assert!(matches!(s.calls()[1], DrawCall::Polyline { .. }), "Followed by a checkmark");
    }

    #[test]
    fn test_error_cross_shakes_only_when_asked() {
        let mut still = surface();
        error_cross(&mut still, 3, false);
        let mut shaking = surface();
        error_cross(&mut shaking, 3, true);

        assert!(
            matches!(still.calls()[0], DrawCall::Circle { center, .. } if center == BADGE_CENTER),
            "Still badge stays centered"
        );
        assert_ne!(still.calls(), shaking.calls(), "Shaking badge moves at tick 3");
    }
}
