//! Scratch flow for screen experiments: a placeholder and two large
//! charging-battery animations.
//!
//! Both batteries run the same 2000-tick charge cycle (0% to 100%, then
//! wrap). The first sweeps a shimmer band across the fill, the second shows a
//! bolt and the percentage inside the body.

use core::fmt::Write;

use embedded_graphics::{
    prelude::{Point, Size},
    primitives::Rectangle,
};
use heapless::String;

use crate::{
    animations::lerp_rgb565,
    colors::{CHARCOAL, GREEN, RED, SLATE, WHITE, YELLOW},
    config::{LCD_CENTER_X, LCD_CENTER_Y, LCD_HEIGHT, LCD_WIDTH},
    flow::Flow,
    led::{LedColor, LedDescriptor},
    step::{Frame, Step},
    styles::Font,
    surface::{Paint, Surface, TextSpec, bolt_outline},
};

pub const FLOW_ID: &str = "testing";

/// Ticks for one full 0..100% charge.
const CHARGE_CYCLE_TICKS: u32 = 2000;

const SHIMMER_WIDTH: i32 = 25;
const SHIMMER_SPEED: u32 = 2;

static STEPS: [Step; 3] = [
    Step::new(
        "Test Screen 1",
        "This is a test screen for experiments.",
        LedDescriptor::OFF,
        draw_test_screen,
    ),
    Step::new(
        "Animated Battery",
        "A large battery animating a charging sequence.",
        LedDescriptor::breathing(LedColor::White),
        draw_shimmer_battery,
    )
    .animated(),
    Step::new(
        "Animated Battery 2",
        "A large battery animating a charging sequence.",
        LedDescriptor::breathing(LedColor::White),
        draw_bolt_battery,
    )
    .animated(),
];

pub static FLOW: Flow = Flow::new(FLOW_ID, &STEPS);

/// Charge percentage at `tick`, cycling every [`CHARGE_CYCLE_TICKS`].
pub const fn charge_percent(tick: u32) -> u32 { (tick % CHARGE_CYCLE_TICKS) * 100 / (CHARGE_CYCLE_TICKS - 1) }

fn fill_color(percent: u32) -> embedded_graphics::pixelcolor::Rgb565 {
    match percent {
        0..20 => RED,
        20..50 => YELLOW,
        _ => GREEN,
    }
}

fn draw_test_screen(surface: &mut dyn Surface, _: &Frame<'_>) {
    surface.clear(SLATE);
    surface.text("Testing Flow", Point::new(80, 40), TextSpec::centered(Font::Large, GREEN));
    surface.text("Add your tests here!", Point::new(80, 60), TextSpec::centered(Font::Small, WHITE));
}

// =============================================================================
// Shimmer Battery
// =============================================================================

const BODY: Rectangle = Rectangle::new(Point::new(32, 5), Size::new(90, 45));
const BODY_STROKE: u32 = 3;
const BODY_PAD: u32 = 6;

fn draw_shimmer_battery(surface: &mut dyn Surface, frame: &Frame<'_>) {
    surface.clear(CHARCOAL);
    let percent = charge_percent(frame.tick);

    surface.rect(BODY, 6, Paint::stroke(WHITE, BODY_STROKE));
    let tip = Rectangle::new(
        BODY.top_left + Point::new(BODY.size.width as i32, BODY.size.height as i32 / 4),
        Size::new(8, BODY.size.height / 2),
    );
    surface.rect(tip, 2, Paint::Fill(WHITE));

    let inner_width = BODY.size.width - 2 * BODY_PAD;
    let inner_height = BODY.size.height - 2 * BODY_PAD;
    let inner_origin = BODY.top_left + Point::new(BODY_PAD as i32, BODY_PAD as i32);
    let fill = Rectangle::new(inner_origin, Size::new(inner_width * percent / 100, inner_height));
    let color = fill_color(percent);

    if fill.size.width > 0 {
        surface.rect(fill, 2, Paint::Fill(color));

        // Lighter band sweeping left to right, clipped to the fill
        let travel = inner_width + SHIMMER_WIDTH as u32;
        let band_x = ((frame.tick * SHIMMER_SPEED) % travel) as i32 - SHIMMER_WIDTH;
        let band = Rectangle::new(
            inner_origin + Point::new(band_x, 0),
            Size::new(SHIMMER_WIDTH as u32, inner_height),
        )
        .intersection(&fill);
        if band.size.width > 0 {
            surface.rect(band, 0, Paint::Fill(lerp_rgb565(color, WHITE, 0.4)));
        }
    }

    let mut label: String<8> = String::new();
    write!(label, "{percent}%").ok();
    surface.text(&label, Point::new(80, 75), TextSpec::centered(Font::Large, WHITE));
}

// =============================================================================
// Bolt Battery
// =============================================================================

const COMPACT_BODY: Rectangle = Rectangle::new(
    Point::new((LCD_WIDTH as i32 - 72) / 2, (LCD_HEIGHT as i32 - 36) / 2),
    Size::new(72, 36),
);

fn draw_bolt_battery(surface: &mut dyn Surface, frame: &Frame<'_>) {
    surface.clear(CHARCOAL);
    let percent = charge_percent(frame.tick);
    let color = fill_color(percent);

    // Charge indicator strip and bolt on the left edge
    surface.rect(Rectangle::new(Point::new(0, 17), Size::new(4, 45)), 0, Paint::Fill(color));
    surface.polygon(&bolt_outline(Point::new(10, 27), 14, 22), Paint::Fill(YELLOW));

    surface.rect(COMPACT_BODY, 5, Paint::stroke(WHITE, 2));
    let tip = Rectangle::new(
        COMPACT_BODY.top_left + Point::new(COMPACT_BODY.size.width as i32, COMPACT_BODY.size.height as i32 / 4),
        Size::new(6, COMPACT_BODY.size.height / 2),
    );
    surface.rect(tip, 2, Paint::Fill(WHITE));

    let inner = COMPACT_BODY.offset(-4);
    let fill_width = inner.size.width * percent / 100;
    if fill_width > 0 {
        surface.rect(Rectangle::new(inner.top_left, Size::new(fill_width, inner.size.height)), 3, Paint::Fill(color));
    }

    let mut label: String<8> = String::new();
    write!(label, "{percent}%").ok();
    surface.text(
        &label,
        Point::new(LCD_CENTER_X, LCD_CENTER_Y),
        TextSpec::centered(Font::Large, WHITE).middle(),
    );
}

#[cfg(test)]
mod tests {
    use test_case::test_case;

    use super::*;
    use crate::{assets::AssetCatalog, flags::SimulationFlags, surface::RecordingSurface};

    #[test_case(0, 0; "empty")]
    #[test_case(1999, 100; "full")]
    #[test_case(2000, 0; "wraps")]
    #[test_case(1000, 50; "half")]
    fn test_charge_percent(tick: u32, expected: u32) {
        assert_eq!(charge_percent(tick), expected);
    }

    #[test]
    fn test_fill_color_thresholds() {
        assert_eq!(fill_color(5), RED);
        assert_eq!(fill_color(35), YELLOW);
        assert_eq!(fill_color(80), GREEN);
    }

    #[test]
    fn test_batteries_label_percentage() {
        let flags = SimulationFlags::default();
        let assets = AssetCatalog::new();
        for step in 1..=2 {
            let mut surface = RecordingSurface::new(Size::new(LCD_WIDTH, LCD_HEIGHT));
            (STEPS[step].render)(&mut surface, &Frame { tick: 1000, flags: &flags, assets: &assets });
            assert!(surface.contains_text("50%"), "{} shows its charge", STEPS[step].title);
        }
    }
}
