//! Application configuration constants.
//!
//! Everything here is resolved at compile time. Step-local phase durations
//! (fade lengths, auto-advance thresholds) live next to the step that uses
//! them, not in this module.
//!
//! # Layout
//!
//! The preview window is a small frame around the 160x80 device LCD:
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │ Power                              3/6 60FPS │  header
//! │ ┌──────────────────────────┐   LED           │
//! │ │                          │    ●            │
//! │ │        device LCD        │        ▼        │
//! │ │         160 x 80         │      [PWR]      │
//! │ └──────────────────────────┘                 │
//! │ Fully On                                     │  title
//! │ Device is fully powered on and connected.    │  explanation
//! │ < PREV                              NEXT >   │  nav row
//! └──────────────────────────────────────────────┘
//! ```

use std::time::Duration;

use embedded_graphics::{
    prelude::{Point, Size},
    primitives::Rectangle,
};

// =============================================================================
// Device LCD
// =============================================================================

/// Device LCD width in pixels.
pub const LCD_WIDTH: u32 = 160;

/// Device LCD height in pixels.
pub const LCD_HEIGHT: u32 = 80;

/// LCD center X coordinate.
pub const LCD_CENTER_X: i32 = (LCD_WIDTH / 2) as i32;

/// LCD center Y coordinate.
pub const LCD_CENTER_Y: i32 = (LCD_HEIGHT / 2) as i32;

// =============================================================================
// Timing Configuration
// =============================================================================

/// Rate at which the frame clock delivers ticks. All tick thresholds in the
/// built-in flows assume this rate (240 ticks = 4 seconds).
pub const TICKS_PER_SECOND: u32 = 60;

/// Target frame time (~60 FPS). The preview loop sleeps if a frame completes early.
pub const FRAME_TIME: Duration = Duration::from_micros(16_667);

/// How long the power button must be held before shutdown completes.
pub const SHUTDOWN_HOLD_TIME: Duration = Duration::from_millis(2000);

/// Poll interval of the shutdown countdown timer.
pub const SHUTDOWN_POLL_INTERVAL: Duration = Duration::from_millis(50);

// =============================================================================
// Transition Journal
// =============================================================================

/// Number of journal lines kept in the ring buffer.
pub const JOURNAL_SIZE: usize = 8;

/// Maximum characters per journal line.
pub const JOURNAL_LINE_LENGTH: usize = 48;

// =============================================================================
// Preview Window Layout
// =============================================================================

/// Preview display width in pixels (before window scaling).
pub const PREVIEW_WIDTH: u32 = 240;

/// Preview display height in pixels (before window scaling).
pub const PREVIEW_HEIGHT: u32 = 160;

/// Integer scale applied by the simulator window.
pub const WINDOW_SCALE: u32 = 3;

/// Header bar height.
pub const HEADER_HEIGHT: u32 = 13;

/// Where the device LCD sits inside the preview.
pub const LCD_AREA: Rectangle = Rectangle::new(Point::new(10, 19), Size::new(LCD_WIDTH, LCD_HEIGHT));

/// Bezel drawn around [`LCD_AREA`] (2px border).
pub const BEZEL_AREA: Rectangle = Rectangle::new(Point::new(7, 16), Size::new(LCD_WIDTH + 6, LCD_HEIGHT + 6));

/// Center of the LED widget.
pub const LED_CENTER: Point = Point::new(206, 32);

/// LED widget diameter.
pub const LED_DIAMETER: u32 = 14;

/// Clickable power button area.
pub const POWER_BUTTON_AREA: Rectangle = Rectangle::new(Point::new(188, 76), Size::new(36, 16));

/// Step title baseline area (below the bezel).
pub const TITLE_POS: Point = Point::new(8, 116);

/// First explanation line position.
pub const EXPLANATION_POS: Point = Point::new(8, 128);

/// Line height of the explanation text.
pub const EXPLANATION_LINE_HEIGHT: i32 = 10;

/// Maximum explanation lines shown under the LCD.
pub const EXPLANATION_MAX_LINES: usize = 2;

/// Characters per explanation line (`FONT_6X10` over the preview width, minus
/// margins and room for a trailing ellipsis).
pub const EXPLANATION_LINE_CHARS: usize = 35;

/// Clickable "previous step" area in the nav row.
pub const PREV_AREA: Rectangle = Rectangle::new(Point::new(4, 146), Size::new(48, 12));

/// Clickable "next step" area in the nav row.
pub const NEXT_AREA: Rectangle = Rectangle::new(Point::new(188, 146), Size::new(48, 12));
