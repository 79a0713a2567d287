//! Power button, step text and the prev/next row.
//!
//! # Layout
//!
//! ```text
//!   ▼        <- hint, when the step asks for a power press
//! [PWR]      <- filled while held
//!
//! Fully On                                   <- title
//! Device is fully powered on and             <- explanation,
//! connected.                                    word wrapped
//! < PREV                           NEXT >    <- gray when unavailable
//! ```

use embedded_graphics::{
    pixelcolor::Rgb565,
    prelude::*,
    primitives::{PrimitiveStyle, PrimitiveStyleBuilder, Rectangle, RoundedRectangle, Triangle},
    text::Text,
};
use heapless::{String, Vec};

use crate::{
    colors::{BLACK, DEVICE_BODY, LIGHT_GRAY, YELLOW},
    config::{
        EXPLANATION_LINE_CHARS,
        EXPLANATION_LINE_HEIGHT,
        EXPLANATION_MAX_LINES,
        EXPLANATION_POS,
        NEXT_AREA,
        POWER_BUTTON_AREA,
        PREV_AREA,
        PREVIEW_WIDTH,
        TITLE_POS,
    },
    render::ControlsKey,
    styles::{
        BUTTON_LABEL_PRESSED_STYLE,
        CENTERED,
        LABEL_STYLE_DISABLED,
        LABEL_STYLE_MUTED,
        LABEL_STYLE_WHITE,
        LEFT_ALIGNED,
        RIGHT_ALIGNED,
        TITLE_STYLE_WHITE,
    },
};

// =============================================================================
// Layout Constants
// =============================================================================

/// One explanation line including a trailing ellipsis.
pub const LINE_CAPACITY: usize = EXPLANATION_LINE_CHARS + 3;

/// Cleared before the button and hint are redrawn.
const BUTTON_CLEAR_AREA: Rectangle = Rectangle::new(Point::new(184, 62), Size::new(44, 32));

/// Cleared before the title and explanation are redrawn.
const TEXT_CLEAR_AREA: Rectangle = Rectangle::new(Point::new(0, 104), Size::new(PREVIEW_WIDTH, 40));

const NAV_CLEAR_AREA: Rectangle = Rectangle::new(Point::new(0, 144), Size::new(PREVIEW_WIDTH, 16));

const BUTTON_LABEL_POS: Point = Point::new(
    POWER_BUTTON_AREA.top_left.x + (POWER_BUTTON_AREA.size.width / 2) as i32,
    POWER_BUTTON_AREA.top_left.y + 11,
);

const HINT_ARROW: Triangle = Triangle::new(
    Point::new(BUTTON_LABEL_POS.x - 5, 64),
    Point::new(BUTTON_LABEL_POS.x + 5, 64),
    Point::new(BUTTON_LABEL_POS.x, 71),
);

const PREV_LABEL_POS: Point = Point::new(PREV_AREA.top_left.x + 2, PREV_AREA.top_left.y + 9);
const NEXT_LABEL_POS: Point = Point::new(
    NEXT_AREA.top_left.x + NEXT_AREA.size.width as i32 - 2,
    NEXT_AREA.top_left.y + 9,
);

const BUTTON_RADIUS: Size = Size::new(3, 3);

const BUTTON_IDLE_STYLE: PrimitiveStyle<Rgb565> = PrimitiveStyleBuilder::new()
    .stroke_color(LIGHT_GRAY)
    .stroke_width(1)
    .fill_color(BLACK)
    .build();

const BUTTON_PRESSED_STYLE: PrimitiveStyle<Rgb565> = PrimitiveStyle::with_fill(LIGHT_GRAY);

// =============================================================================
// Drawing Functions
// =============================================================================

/// Draw the power button, its hint arrow and the prev/next row.
pub fn draw_controls<D>(
    display: &mut D,
    key: ControlsKey,
) where
    D: DrawTarget<Color = Rgb565>,
{
    BUTTON_CLEAR_AREA
        .into_styled(PrimitiveStyle::with_fill(DEVICE_BODY))
        .draw(display)
        .ok();

    if key.power_hint {
        HINT_ARROW
            .into_styled(PrimitiveStyle::with_fill(YELLOW))
            .draw(display)
            .ok();
    }

    let (button_style, label_style) = if key.power_pressed {
        (BUTTON_PRESSED_STYLE, BUTTON_LABEL_PRESSED_STYLE)
    } else {
        (BUTTON_IDLE_STYLE, LABEL_STYLE_WHITE)
    };
    RoundedRectangle::with_equal_corners(POWER_BUTTON_AREA, BUTTON_RADIUS)
        .into_styled(button_style)
        .draw(display)
        .ok();
    Text::with_text_style("PWR", BUTTON_LABEL_POS, label_style, CENTERED)
        .draw(display)
        .ok();

    NAV_CLEAR_AREA
        .into_styled(PrimitiveStyle::with_fill(BLACK))
        .draw(display)
        .ok();
    let prev_style = if key.can_prev { LABEL_STYLE_WHITE } else { LABEL_STYLE_DISABLED };
    let next_style = if key.can_next { LABEL_STYLE_WHITE } else { LABEL_STYLE_DISABLED };
    Text::with_text_style("< PREV", PREV_LABEL_POS, prev_style, LEFT_ALIGNED)
        .draw(display)
        .ok();
    Text::with_text_style("NEXT >", NEXT_LABEL_POS, next_style, RIGHT_ALIGNED)
        .draw(display)
        .ok();
}

/// Draw the step title and its word-wrapped explanation.
pub fn draw_step_text<D>(
    display: &mut D,
    title: &str,
    explanation: &str,
) where
    D: DrawTarget<Color = Rgb565>,
{
    TEXT_CLEAR_AREA
        .into_styled(PrimitiveStyle::with_fill(BLACK))
        .draw(display)
        .ok();

    Text::with_text_style(title, TITLE_POS, TITLE_STYLE_WHITE, LEFT_ALIGNED)
        .draw(display)
        .ok();

    let mut position = EXPLANATION_POS;
    for line in wrap_words(explanation, EXPLANATION_LINE_CHARS) {
        Text::with_text_style(&line, position, LABEL_STYLE_MUTED, LEFT_ALIGNED)
            .draw(display)
            .ok();
        position.y += EXPLANATION_LINE_HEIGHT;
    }
}

/// Which nav area, if any, contains `point`.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum ControlHit {
    Power,
    Prev,
    Next,
}

pub fn hit_test(point: Point) -> Option<ControlHit> {
    if POWER_BUTTON_AREA.contains(point) {
        Some(ControlHit::Power)
    } else if PREV_AREA.contains(point) {
        Some(ControlHit::Prev)
    } else if NEXT_AREA.contains(point) {
        Some(ControlHit::Next)
    } else {
        None
    }
}

// =============================================================================
// Word Wrapping
// =============================================================================

/// Greedy word wrap into at most [`EXPLANATION_MAX_LINES`] lines of `width`
/// characters. Text that does not fit ends the last line with `...`.
///
/// Words longer than a line are cut. `width` must leave room for the
/// ellipsis within [`LINE_CAPACITY`].
pub fn wrap_words(
    text: &str,
    width: usize,
) -> Vec<String<LINE_CAPACITY>, EXPLANATION_MAX_LINES> {
    let mut lines = Vec::new();
    let mut line: String<LINE_CAPACITY> = String::new();

    for word in text.split_whitespace() {
        let word = clip(word, width);
        let fits = line.is_empty() || line.len() + 1 + word.len() <= width;
        if !fits {
            if lines.len() + 1 == EXPLANATION_MAX_LINES {
                line.push_str("...").ok();
                lines.push(line).ok();
                return lines;
            }
            lines.push(core::mem::replace(&mut line, String::new())).ok();
        }
        if !line.is_empty() {
            line.push(' ').ok();
        }
        line.push_str(word).ok();
    }

    if !line.is_empty() {
        lines.push(line).ok();
    }
    lines
}

/// The first `width` characters of `word`.
fn clip(
    word: &str,
    width: usize,
) -> &str {
    word.char_indices()
        .nth(width)
        .map_or(word, |(end, _)| &word[..end])
}
