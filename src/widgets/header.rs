//! Header bar and the static device frame.
//!
//! The header names the active flow on the left and shows the step position
//! and frame rate on the right. The device frame (body, bezel, LCD window) is
//! painted once per page switch; the LCD itself is drawn by the active step.

use core::fmt::Write;

use embedded_graphics::{
    pixelcolor::Rgb565,
    prelude::*,
    primitives::{PrimitiveStyle, Rectangle, RoundedRectangle},
    text::Text,
};
use heapless::String;

use crate::{
    colors::{BEZEL, BLACK, CHARCOAL, DEVICE_BODY},
    config::{BEZEL_AREA, HEADER_HEIGHT, LCD_AREA, PREVIEW_WIDTH},
    styles::{LABEL_STYLE_WHITE, LEFT_ALIGNED, RIGHT_ALIGNED},
};

// =============================================================================
// Layout Constants
// =============================================================================

const HEADER_RECT: Rectangle = Rectangle::new(Point::zero(), Size::new(PREVIEW_WIDTH, HEADER_HEIGHT));

/// Flow label, left aligned, 4px from the edge.
const HEADER_LABEL_POS: Point = Point::new(4, 10);

/// Position and FPS, right aligned, 4px from the edge.
const HEADER_STATUS_POS: Point = Point::new((PREVIEW_WIDTH - 4) as i32, 10);

/// Device body behind the bezel, LED and power button.
pub const DEVICE_BODY_AREA: Rectangle = Rectangle::new(Point::new(3, 14), Size::new(PREVIEW_WIDTH - 6, 90));

const BODY_CORNER_RADIUS: Size = Size::new(6, 6);

const HEADER_FILL_STYLE: PrimitiveStyle<Rgb565> = PrimitiveStyle::with_fill(CHARCOAL);
const BODY_FILL_STYLE: PrimitiveStyle<Rgb565> = PrimitiveStyle::with_fill(DEVICE_BODY);
const BEZEL_FILL_STYLE: PrimitiveStyle<Rgb565> = PrimitiveStyle::with_fill(BEZEL);
const LCD_FILL_STYLE: PrimitiveStyle<Rgb565> = PrimitiveStyle::with_fill(BLACK);

// =============================================================================
// Drawing Functions
// =============================================================================

/// Draw the header bar.
///
/// `position` is the 1-based step index and the flow length.
pub fn draw_header<D>(
    display: &mut D,
    flow_label: &str,
    position: (usize, usize),
    fps: f32,
) where
    D: DrawTarget<Color = Rgb565>,
{
    HEADER_RECT.into_styled(HEADER_FILL_STYLE).draw(display).ok();

    Text::with_text_style(flow_label, HEADER_LABEL_POS, LABEL_STYLE_WHITE, LEFT_ALIGNED)
        .draw(display)
        .ok();

    let mut status: String<24> = String::new();
    write!(status, "{}/{} {fps:.0}FPS", position.0, position.1).ok();
    Text::with_text_style(&status, HEADER_STATUS_POS, LABEL_STYLE_WHITE, RIGHT_ALIGNED)
        .draw(display)
        .ok();
}

/// Draw the device body, the bezel and a black LCD window.
pub fn draw_device_frame<D>(display: &mut D)
where
    D: DrawTarget<Color = Rgb565>,
{
    RoundedRectangle::with_equal_corners(DEVICE_BODY_AREA, BODY_CORNER_RADIUS)
        .into_styled(BODY_FILL_STYLE)
        .draw(display)
        .ok();

    BEZEL_AREA.into_styled(BEZEL_FILL_STYLE).draw(display).ok();
    LCD_AREA.into_styled(LCD_FILL_STYLE).draw(display).ok();
}

#[cfg(test)]
mod tests {
    use embedded_graphics_simulator::SimulatorDisplay;

    use super::*;
    use crate::{
        colors::WHITE,
        config::{PREVIEW_HEIGHT, POWER_BUTTON_AREA},
    };

    fn display() -> SimulatorDisplay<Rgb565> { SimulatorDisplay::new(Size::new(PREVIEW_WIDTH, PREVIEW_HEIGHT)) }

    #[test]
    fn test_device_frame_layers() {
        let mut display = display();
        draw_device_frame(&mut display);

        assert_eq!(display.get_pixel(LCD_AREA.center()), BLACK, "LCD window is black");
        assert_eq!(display.get_pixel(BEZEL_AREA.top_left + Point::new(1, 1)), BEZEL);
        assert_eq!(display.get_pixel(POWER_BUTTON_AREA.top_left - Point::new(4, 0)), DEVICE_BODY);
    }

    #[test]
    fn test_frame_contains_chrome_areas() {
        for area in [BEZEL_AREA, POWER_BUTTON_AREA] {
            assert!(
                DEVICE_BODY_AREA.contains(area.top_left) && DEVICE_BODY_AREA.contains(area.bottom_right().unwrap_or(area.top_left)),
                "{area:?} outside the device body"
            );
        }
    }

    #[test]
    fn test_header_draws_text() {
        let mut display = display();
        draw_header(&mut display, "Power", (3, 6), 60.0);

        let left = Rectangle::new(Point::new(0, 0), Size::new(40, HEADER_HEIGHT));
        let right = Rectangle::new(Point::new(180, 0), Size::new(60, HEADER_HEIGHT));
        assert!(left.points().any(|p| display.get_pixel(p) == WHITE), "Flow label drawn");
        assert!(right.points().any(|p| display.get_pixel(p) == WHITE), "Status drawn");
    }
}
