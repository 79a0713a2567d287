//! Preview chrome drawn around the device LCD.
//!
//! - [`header`]: header bar and the static device frame
//! - [`led`]: status LED with eased color changes
//! - [`controls`]: power button, step title and explanation, prev/next row
//!
//! Every widget draws straight onto the preview window and is repainted only
//! when [`ChromeState`](crate::render::ChromeState) reports it dirty. Each one
//! clears its own area first, so widgets can repaint independently.

mod controls;
mod header;
mod led;

pub use controls::{ControlHit, LINE_CAPACITY, draw_controls, draw_step_text, hit_test, wrap_words};
pub use header::{DEVICE_BODY_AREA, draw_device_frame, draw_header};
pub use led::LedWidget;
