//! Color constants for the storyboard preview.
//!
//! # Rgb565 Color Format
//!
//! Rgb565 uses 16 bits per pixel: 5 bits red, 6 bits green, 5 bits blue.
//! - Red: 0-31 (5 bits)
//! - Green: 0-63 (6 bits)
//! - Blue: 0-31 (5 bits)
//!
//! The mockup screens were designed with alpha blending over a black LCD. Rgb565
//! has no alpha channel, so translucency is flattened with [`with_opacity`], which
//! scales a color toward black. Every step clears to an opaque background before
//! drawing, so blending against black matches what the device would show.

use embedded_graphics::{
    pixelcolor::{Rgb565, RgbColor},
    prelude::IntoStorage,
};

// =============================================================================
// Standard Colors (from RgbColor trait)
// =============================================================================

/// Pure black (0, 0, 0). LCD background and powered-off screen.
pub const BLACK: Rgb565 = Rgb565::BLACK;

/// Pure white (31, 63, 31). Default text and outline color.
pub const WHITE: Rgb565 = Rgb565::WHITE;

/// Pure red (31, 0, 0). Error icons and low battery fill.
pub const RED: Rgb565 = Rgb565::RED;

/// Pure green (0, 63, 0). Connected icon, progress segments, success marks.
pub const GREEN: Rgb565 = Rgb565::GREEN;

/// Pure blue (0, 0, 31). LED while searching for a connection.
pub const BLUE: Rgb565 = Rgb565::BLUE;

/// Pure yellow (31, 63, 0). LED for in-progress flows (binding, calibration, update).
pub const YELLOW: Rgb565 = Rgb565::YELLOW;

// =============================================================================
// Custom Colors (application-specific)
// =============================================================================

/// Orange highlight. Used for journal text and tilted attitude readouts.
/// RGB565: (31, 32, 0) - slightly darker than yellow.
pub const ORANGE: Rgb565 = Rgb565::new(31, 32, 0);

/// Dark gray for dividers and disabled affordances.
/// RGB565: (8, 16, 8) - roughly 25% brightness.
pub const GRAY: Rgb565 = Rgb565::new(8, 16, 8);

/// Mid gray for secondary chrome text.
pub const LIGHT_GRAY: Rgb565 = Rgb565::new(20, 40, 20);

/// Empty progress bar track (#333).
pub const TRACK_GRAY: Rgb565 = Rgb565::new(6, 12, 6);

/// Near-black background of the testing screens (#111).
pub const CHARCOAL: Rgb565 = Rgb565::new(2, 4, 2);

/// Background of the first testing screen (#222).
pub const SLATE: Rgb565 = Rgb565::new(4, 8, 4);

/// Sky half of the attitude horizon.
pub const SKY_BLUE: Rgb565 = Rgb565::new(6, 30, 26);

/// Ground half of the attitude horizon when tilted.
pub const EARTH_BROWN: Rgb565 = Rgb565::new(18, 20, 4);

/// Ground half of the attitude horizon when level.
pub const LEVEL_GREEN: Rgb565 = Rgb565::new(4, 36, 6);

/// Device body in the preview chrome.
pub const DEVICE_BODY: Rgb565 = Rgb565::new(5, 10, 7);

/// Bezel around the LCD window in the preview chrome.
pub const BEZEL: Rgb565 = Rgb565::new(3, 6, 4);

// =============================================================================
// Opacity
// =============================================================================

/// Scale a color toward black by `opacity` (0.0 = black, 1.0 = unchanged).
///
/// Values outside 0..1 are clamped.
pub fn with_opacity(color: Rgb565, opacity: f32) -> Rgb565 {
    let opacity = opacity.clamp(0.0, 1.0);
    let raw = color.into_storage();

    let r = f32::from((raw >> 11) & 0x1F) * opacity;
    let g = f32::from((raw >> 5) & 0x3F) * opacity;
    let b = f32::from(raw & 0x1F) * opacity;

    Rgb565::new(r.round() as u8, g.round() as u8, b.round() as u8)
}
