//! Steps: the nodes of a flow.
//!
//! A [`Step`] is plain data: a title, an explanation, a default LED descriptor,
//! and function pointers for rendering and lifecycle. Built-in flows declare
//! their steps as `static` arrays with the const builder methods:
//!
//! ```ignore
//! Step::new("Power On", "Device is powering on with logo fade in.", LedDescriptor::on(LedColor::White), draw_power_on)
//!     .advance_after(POWER_ON_FADE_TICKS, Target::Step(ON))
//! ```
//!
//! # Callback Contract
//!
//! | Callback | Receives | May |
//! |----------|----------|-----|
//! | `render` | `&mut dyn Surface`, [`Frame`] (read-only flags) | draw |
//! | `update` | [`StepControl`] | mutate flags, override LED, show/hide overlay, request a jump |
//! | `on_enter` / `on_exit` | [`StepControl`] at tick 0 | same as `update`, except jumping |
//!
//! `render` must be idempotent: the same tick and the same flags produce the
//! same draw calls. Anything that changes over time goes through `update`,
//! which runs before `render` on every tick of an animated step.

use core::fmt;

use crate::{
    assets::AssetCatalog,
    flags::SimulationFlags,
    led::LedDescriptor,
    overlay::{Overlay, OverlaySlot},
    surface::Surface,
};

pub type RenderFn = fn(&mut dyn Surface, &Frame<'_>);
pub type UpdateFn = fn(&mut StepControl<'_>);
pub type HookFn = fn(&mut StepControl<'_>);

// =============================================================================
// Targets
// =============================================================================

/// A step in a specific flow.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct StepRef {
    pub flow: &'static str,
    pub step: usize,
}

impl StepRef {
    pub const fn new(flow: &'static str, step: usize) -> Self { Self { flow, step } }
}

/// Where a step-initiated jump goes.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Target {
    /// Another step in the current flow.
    Step(usize),
    /// A step in another flow. Simulation flags are kept.
    Flow(StepRef),
}

/// Jump to `target` once the step's tick reaches `after_ticks`.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct AutoAdvance {
    pub after_ticks: u32,
    pub target: Target,
}

// =============================================================================
// Step
// =============================================================================

#[derive(Clone, Copy)]
pub struct Step {
    pub title: &'static str,
    pub explanation: &'static str,
    pub led: LedDescriptor,
    pub render: RenderFn,
    /// Run a per-tick loop. Static steps render once per entry or redraw request.
    pub animated: bool,
    pub update: Option<UpdateFn>,
    pub auto_advance: Option<AutoAdvance>,
    pub on_enter: Option<HookFn>,
    pub on_exit: Option<HookFn>,
    /// Show the "press power" hint next to the power button.
    pub power_hint: bool,
}

impl Step {
    /// A static step: rendered once on entry.
    pub const fn new(
        title: &'static str,
        explanation: &'static str,
        led: LedDescriptor,
        render: RenderFn,
    ) -> Self {
        Self {
            title,
            explanation,
            led,
            render,
            animated: false,
            update: None,
            auto_advance: None,
            on_enter: None,
            on_exit: None,
            power_hint: false,
        }
    }

    /// Redraw on every tick.
    pub const fn animated(mut self) -> Self {
        self.animated = true;
        self
    }

    /// Per-tick logic. Implies [`Step::animated`].
    pub const fn with_update(
        mut self,
        update: UpdateFn,
    ) -> Self {
        self.update = Some(update);
        self.animated = true;
        self
    }

    /// Jump to `target` at tick `after_ticks`. Implies [`Step::animated`].
    pub const fn advance_after(
        mut self,
        after_ticks: u32,
        target: Target,
    ) -> Self {
        self.auto_advance = Some(AutoAdvance { after_ticks, target });
        self.animated = true;
        self
    }

    pub const fn with_enter(
        mut self,
        hook: HookFn,
    ) -> Self {
        self.on_enter = Some(hook);
        self
    }

    pub const fn with_exit(
        mut self,
        hook: HookFn,
    ) -> Self {
        self.on_exit = Some(hook);
        self
    }

    pub const fn with_power_hint(mut self) -> Self {
        self.power_hint = true;
        self
    }
}

impl fmt::Debug for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Step")
            .field("title", &self.title)
            .field("led", &self.led)
            .field("animated", &self.animated)
            .field("auto_advance", &self.auto_advance)
            .finish_non_exhaustive()
    }
}

// =============================================================================
// Frame Context
// =============================================================================

/// Read-only context handed to `render`.
#[derive(Clone, Copy, Debug)]
pub struct Frame<'a> {
    /// Ticks since the step was entered (0 for static renders).
    pub tick: u32,
    pub flags: &'a SimulationFlags,
    pub assets: &'a AssetCatalog,
}

// =============================================================================
// Step Control
// =============================================================================

/// Mutation handle passed to the active step's `update` and lifecycle hooks.
///
/// Only the active step ever receives one, so every write to the simulation
/// flags has exactly one author.
pub struct StepControl<'a> {
    tick: u32,
    flags: &'a mut SimulationFlags,
    led: &'a mut Option<LedDescriptor>,
    overlay: &'a mut OverlaySlot,
    request: Option<Target>,
}

impl<'a> StepControl<'a> {
    pub(crate) const fn new(
        tick: u32,
        flags: &'a mut SimulationFlags,
        led: &'a mut Option<LedDescriptor>,
        overlay: &'a mut OverlaySlot,
    ) -> Self {
        Self {
            tick,
            flags,
            led,
            overlay,
            request: None,
        }
    }

    #[inline]
    pub const fn tick(&self) -> u32 { self.tick }

    #[inline]
    pub fn flags(&self) -> &SimulationFlags { &*self.flags }

    #[inline]
    pub fn flags_mut(&mut self) -> &mut SimulationFlags { &mut *self.flags }

    /// Override the step's LED descriptor until the step is left.
    pub fn set_led(
        &mut self,
        led: LedDescriptor,
    ) {
        *self.led = Some(led);
    }

    pub fn show_overlay(
        &mut self,
        overlay: Overlay,
    ) {
        self.overlay.show(overlay);
    }

    pub fn hide_overlay(&mut self) { self.overlay.hide(); }

    /// Request a jump within the current flow. The first request of a tick wins.
    pub fn jump_to(
        &mut self,
        step: usize,
    ) {
        self.request(Target::Step(step));
    }

    /// Request a jump into another flow. The first request of a tick wins.
    pub fn jump_to_flow(
        &mut self,
        flow: &'static str,
        step: usize,
    ) {
        self.request(Target::Flow(StepRef::new(flow, step)));
    }

    fn request(
        &mut self,
        target: Target,
    ) {
        if self.request.is_none() {
            self.request = Some(target);
        }
    }

    /// The jump requested during this callback, if any.
    pub(crate) const fn into_request(self) -> Option<Target> { self.request }
}
