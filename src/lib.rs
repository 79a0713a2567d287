// Crate-level lints: Allow common embedded/graphics patterns that pedantic lints flag
#![allow(clippy::cast_possible_truncation)] // Intentional f32->i32, u32->i32 casts for pixel math
#![allow(clippy::cast_precision_loss)] // u32/i32->f32 in graphics calculations
#![allow(clippy::cast_possible_wrap)] // u32->i32 wrapping is acceptable for our value ranges
#![allow(clippy::cast_sign_loss)] // i32->u32 where we know sign is positive
#![allow(clippy::struct_excessive_bools)] // Step and ControlsKey flags

//! Flow/step navigation engine for a 160x80 device LCD, with a storyboard
//! preview of the device around it.
//!
//! A **flow** is an ordered list of **steps**. Each step renders one screen of
//! the device, declares what the status LED does, and optionally runs a
//! per-tick loop that animates the screen, changes the LED, or jumps to
//! another step. The [`Navigator`] owns the active flow, the simulated device
//! state, and the frame clock that drives the active step.
//!
//! ```ignore
//! let mut navigator = Navigator::builtin("power")?;
//! navigator.handle_power(PowerEvent::PressStart, Instant::now());
//! navigator.handle_power(PowerEvent::PressEnd, Instant::now());
//!
//! // Once per frame at TICKS_PER_SECOND:
//! navigator.poll(Instant::now());
//! navigator.tick(&mut surface);
//! ```
//!
//! # Modules
//!
//! | Module | Role |
//! |--------|------|
//! | [`navigator`] | Transitions, power button, flags, journal |
//! | [`flow`], [`step`] | Flow registry and the step descriptor |
//! | [`clock`] | Frame clock with generation-based cancellation, interval timer |
//! | [`led`] | LED descriptors and the observable indicator |
//! | [`surface`] | Render surface over `embedded-graphics`, plus a draw-call recorder |
//! | [`screens`] | The built-in flows and the journal page |
//! | [`widgets`], [`render`], [`pages`] | Preview chrome around the LCD |
//!
//! The SDL preview window lives in the `storyboard` binary behind the
//! `window` feature.

pub mod animations;
pub mod assets;
pub mod clock;
pub mod colors;
pub mod config;
pub mod flags;
pub mod flow;
pub mod input;
pub mod journal;
pub mod led;
pub mod navigator;
pub mod overlay;
pub mod pages;
pub mod profiling;
pub mod render;
pub mod screens;
pub mod step;
pub mod styles;
pub mod surface;
pub mod widgets;

pub use flow::{Flow, FlowRegistry};
pub use input::PowerEvent;
pub use navigator::{NavigationError, Navigator};
pub use step::{Frame, Step};
pub use surface::{DisplaySurface, RecordingSurface, Surface};
