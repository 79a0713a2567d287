//! Pre-computed text styles and the font scale used by step renders.
//!
//! Steps never name an `embedded-graphics` font directly. They pick a [`Font`]
//! size class, and the surface resolves it with [`Font::mono`]. The classes
//! approximate the mockup's monospace pixel sizes on a 160x80 LCD:
//!
//! | Class | Mockup size | Font |
//! |-------|-------------|------|
//! | `Small` | 10px | `FONT_6X10` |
//! | `Medium` | 12px | `ProFont` 12pt |
//! | `Large` | 16-18px | `ProFont` 18pt |
//! | `Huge` | 24px | `ProFont` 24pt |
//!
//! Chrome widgets reuse the const styles below so no style object is built per frame.

use embedded_graphics::{
    mono_font::{MonoFont, MonoTextStyle, ascii::FONT_6X10},
    pixelcolor::Rgb565,
    text::{Alignment, Baseline, TextStyle, TextStyleBuilder},
};
use profont::{PROFONT_12_POINT, PROFONT_18_POINT, PROFONT_24_POINT};

use crate::colors::{BLACK, GRAY, GREEN, LIGHT_GRAY, ORANGE, WHITE};

// =============================================================================
// Font Scale
// =============================================================================

/// Font size class used by step renders.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Font {
    Small,
    Medium,
    Large,
    Huge,
}

impl Font {
    /// Resolve to a concrete monospace font.
    pub const fn mono(self) -> &'static MonoFont<'static> {
        match self {
            Self::Small => &FONT_6X10,
            Self::Medium => &PROFONT_12_POINT,
            Self::Large => &PROFONT_18_POINT,
            Self::Huge => &PROFONT_24_POINT,
        }
    }
}

// =============================================================================
// Text Alignment Styles (const - zero runtime cost)
// =============================================================================

/// Left-aligned, baseline-anchored text. Header labels and explanation lines.
pub const LEFT_ALIGNED: TextStyle = TextStyleBuilder::new()
    .alignment(Alignment::Left)
    .baseline(Baseline::Alphabetic)
    .build();

/// Right-aligned text. Step counter and FPS in the header.
pub const RIGHT_ALIGNED: TextStyle = TextStyleBuilder::new()
    .alignment(Alignment::Right)
    .baseline(Baseline::Alphabetic)
    .build();

/// Centered text. Power button label and LED caption.
pub const CENTERED: TextStyle = TextStyleBuilder::new()
    .alignment(Alignment::Center)
    .baseline(Baseline::Alphabetic)
    .build();

// =============================================================================
// Pre-computed Chrome Text Styles
// =============================================================================

/// Small white text for the header and titles.
pub const LABEL_STYLE_WHITE: MonoTextStyle<'static, Rgb565> = MonoTextStyle::new(&FONT_6X10, WHITE);

/// Small gray text for explanation lines.
pub const LABEL_STYLE_MUTED: MonoTextStyle<'static, Rgb565> = MonoTextStyle::new(&FONT_6X10, LIGHT_GRAY);

/// Small dark gray text for disabled nav affordances.
pub const LABEL_STYLE_DISABLED: MonoTextStyle<'static, Rgb565> = MonoTextStyle::new(&FONT_6X10, GRAY);

/// Dark label on the pressed (light gray) power button.
pub const BUTTON_LABEL_PRESSED_STYLE: MonoTextStyle<'static, Rgb565> = MonoTextStyle::new(&FONT_6X10, BLACK);

/// Journal prompt (`>`).
pub const JOURNAL_PROMPT_STYLE: MonoTextStyle<'static, Rgb565> = MonoTextStyle::new(&FONT_6X10, GREEN);

/// Journal line text.
pub const JOURNAL_TEXT_STYLE: MonoTextStyle<'static, Rgb565> = MonoTextStyle::new(&FONT_6X10, ORANGE);

/// Step title (`ProFont` 12pt).
pub const TITLE_STYLE_WHITE: MonoTextStyle<'static, Rgb565> = MonoTextStyle::new(&PROFONT_12_POINT, WHITE);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_font_classes_grow() {
        let heights = [Font::Small, Font::Medium, Font::Large, Font::Huge].map(|f| f.mono().character_size.height);
        assert!(
            heights.windows(2).all(|w| w[0] < w[1]),
            "Font classes should be strictly increasing in height: {heights:?}"
        );
    }

    #[test]
    fn test_small_font_fits_lcd_lines() {
        // "Recalibration Needed" is the longest small-font line on the LCD
        let width = Font::Small.mono().character_size.width * 20;
        assert!(width <= 160, "Longest small line should fit the LCD, got {width}px");
    }
}
