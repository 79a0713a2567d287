//! Flow navigation engine.
//!
//! The [`Navigator`] owns the active flow and step, the simulation flags, the
//! LED indicator, the overlay slot, and the frame clock. Everything runs on the
//! caller's thread: the host calls [`Navigator::tick`] once per frame,
//! [`Navigator::poll`] with the wall clock, and forwards user input.
//!
//! # Transitions
//!
//! Every move between steps, whoever asks for it, goes through one sequence:
//!
//! 1. cancel the frame clock (the outgoing loop goes stale)
//! 2. run the outgoing step's exit hook
//! 3. clear the overlay slot and the LED override
//! 4. reset the simulation flags (explicit flow selection only)
//! 5. move to the new position and journal it
//! 6. run the incoming step's enter hook
//! 7. project the incoming LED descriptor
//! 8. start a new loop (animated) or schedule one render (static)
//!
//! Lifecycle hooks can mutate flags and the overlay but cannot navigate; a
//! jump requested from a hook is logged and dropped.
//!
//! # Frame Order
//!
//! Within one tick of an animated step: auto-advance check, then `update`, then
//! LED projection, then `render` and the overlay. A jump from either of the
//! first two ends the tick without drawing the outgoing step.

use std::time::{Duration, Instant};

use thiserror::Error;

use crate::{
    assets::AssetCatalog,
    clock::{AnimationLoop, FrameClock, IntervalTimer},
    config::{SHUTDOWN_HOLD_TIME, SHUTDOWN_POLL_INTERVAL},
    flags::{Orientation, SimulationFlags},
    flow::{Flow, FlowRegistry},
    input::{DeviceBindings, PowerButton, PowerEvent},
    journal::Journal,
    led::{LedDescriptor, StatusIndicator},
    overlay::{Overlay, OverlaySlot},
    step::{Frame, HookFn, Step, StepControl, StepRef, Target},
    surface::Surface,
};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum NavigationError {
    #[error("unknown flow `{0}`")]
    UnknownFlow(String),

    #[error("step {index} is out of range for flow `{flow}` ({len} steps)")]
    StepOutOfRange { flow: String, index: usize, len: usize },
}

/// Why a transition happened. Shows up in the journal and the log.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum Cause {
    Start,
    Select,
    Next,
    Prev,
    Jump,
    Auto,
    Update,
    Power,
    Firmware,
}

impl Cause {
    const fn label(self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Select => "select",
            Self::Next => "next",
            Self::Prev => "prev",
            Self::Jump => "jump",
            Self::Auto => "auto",
            Self::Update => "step",
            Self::Power => "power",
            Self::Firmware => "fw",
        }
    }
}

pub struct Navigator {
    registry: FlowRegistry,
    bindings: DeviceBindings,

    flow: Flow,
    index: usize,

    clock: FrameClock,
    active: Option<AnimationLoop>,
    pending_render: bool,
    last_tick: u32,

    flags: SimulationFlags,
    led_override: Option<LedDescriptor>,
    indicator: StatusIndicator,
    overlay: OverlaySlot,
    assets: AssetCatalog,

    button: PowerButton,
    shutdown: IntervalTimer,
    resume_index: Option<usize>,

    journal: Journal,
    transitions: u32,
}

impl Navigator {
    /// Start at step 0 of `flow_id`.
    pub fn new(
        registry: FlowRegistry,
        bindings: DeviceBindings,
        flow_id: &str,
    ) -> Result<Self, NavigationError> {
        let flow = *registry
            .get(flow_id)
            .ok_or_else(|| NavigationError::UnknownFlow(flow_id.into()))?;

        let mut navigator = Self {
            registry,
            bindings,
            flow,
            index: 0,
            clock: FrameClock::new(),
            active: None,
            pending_render: false,
            last_tick: 0,
            flags: SimulationFlags::new(flow.starts_powered),
            led_override: None,
            indicator: StatusIndicator::new(),
            overlay: OverlaySlot::new(),
            assets: AssetCatalog::new(),
            button: PowerButton::new(),
            shutdown: IntervalTimer::new(SHUTDOWN_POLL_INTERVAL),
            resume_index: None,
            journal: Journal::new(),
            transitions: 0,
        };
        navigator.enter(Cause::Start);
        Ok(navigator)
    }

    /// Navigator over the built-in flows.
    pub fn builtin(flow_id: &str) -> Result<Self, NavigationError> {
        Self::new(FlowRegistry::builtin(), crate::screens::BINDINGS, flow_id)
    }

    // =========================================================================
    // Queries
    // =========================================================================

    #[inline]
    pub const fn registry(&self) -> &FlowRegistry { &self.registry }

    #[inline]
    pub const fn current_flow(&self) -> &Flow { &self.flow }

    #[inline]
    pub const fn current_index(&self) -> usize { self.index }

    pub fn current_step(&self) -> &'static Step {
        let steps: &'static [Step] = self.flow.steps;
        &steps[self.index]
    }

    /// 1-based position and step count, e.g. `(3, 6)`.
    #[inline]
    pub const fn position(&self) -> (usize, usize) { (self.index + 1, self.flow.len()) }

    #[inline]
    pub const fn can_prev(&self) -> bool { self.index > 0 }

    #[inline]
    pub const fn can_next(&self) -> bool { self.index + 1 < self.flow.len() }

    #[inline]
    pub const fn flags(&self) -> &SimulationFlags { &self.flags }

    /// Current observable LED state.
    #[inline]
    pub const fn led(&self) -> LedDescriptor { self.indicator.state() }

    #[inline]
    pub const fn overlay(&self) -> Option<Overlay> { self.overlay.active() }

    #[inline]
    pub const fn assets(&self) -> &AssetCatalog { &self.assets }

    #[inline]
    pub const fn assets_mut(&mut self) -> &mut AssetCatalog { &mut self.assets }

    #[inline]
    pub const fn journal(&self) -> &Journal { &self.journal }

    /// Whether the host should point at the power button.
    pub fn power_hint_visible(&self) -> bool { self.current_step().power_hint }

    #[inline]
    pub const fn power_pressed(&self) -> bool { self.button.is_pressed() }

    /// Whether the current step runs a per-tick loop.
    pub fn is_animating(&self) -> bool { self.current_step().animated && self.active.is_some() }

    /// Tick of the last animated frame drawn.
    #[inline]
    pub const fn last_tick(&self) -> u32 { self.last_tick }

    /// Transitions since startup.
    #[inline]
    pub const fn transitions(&self) -> u32 { self.transitions }

    // =========================================================================
    // Navigation
    // =========================================================================

    /// Switch to step 0 of `flow_id` with fresh simulation flags.
    /// Unknown ids are logged and ignored.
    pub fn select_flow(
        &mut self,
        flow_id: &str,
    ) -> bool {
        match self.try_select_flow(flow_id) {
            Ok(()) => true,
            Err(err) => {
                log::warn!("flow selection ignored: {err}");
                false
            }
        }
    }

    pub fn try_select_flow(
        &mut self,
        flow_id: &str,
    ) -> Result<(), NavigationError> {
        let flow = *self
            .registry
            .get(flow_id)
            .ok_or_else(|| NavigationError::UnknownFlow(flow_id.into()))?;
        self.move_to(flow, 0, true, Cause::Select);
        Ok(())
    }

    /// Select a flow by its registration position.
    pub fn select_flow_at(
        &mut self,
        position: usize,
    ) -> bool {
        match self.registry.by_index(position).copied() {
            Some(flow) => {
                self.move_to(flow, 0, true, Cause::Select);
                true
            }
            None => {
                log::warn!("no flow at position {position}");
                false
            }
        }
    }

    /// Select the next (or previous) registered flow, wrapping around.
    pub fn cycle_flow(
        &mut self,
        forward: bool,
    ) -> bool {
        let count = self.registry.len();
        let Some(current) = self.registry.index_of(self.flow.id) else {
            return false;
        };
        let position = if forward { (current + 1) % count } else { (current + count - 1) % count };
        self.select_flow_at(position)
    }

    /// Advance one step. No-op on the last step.
    pub fn next(&mut self) -> bool {
        if !self.can_next() {
            return false;
        }
        self.follow(Target::Step(self.index + 1), Cause::Next)
    }

    /// Go back one step. No-op on the first step.
    pub fn prev(&mut self) -> bool {
        if !self.can_prev() {
            return false;
        }
        self.follow(Target::Step(self.index - 1), Cause::Prev)
    }

    /// Jump within the current flow. Out-of-range indices are logged and ignored.
    pub fn jump_to(
        &mut self,
        index: usize,
    ) -> bool {
        match self.try_jump_to(index) {
            Ok(()) => true,
            Err(err) => {
                log::warn!("jump ignored: {err}");
                false
            }
        }
    }

    pub fn try_jump_to(
        &mut self,
        index: usize,
    ) -> Result<(), NavigationError> {
        let (flow, index) = self.locate(None, index)?;
        self.move_to(flow, index, false, Cause::Jump);
        Ok(())
    }

    /// Jump into another flow, keeping the simulation flags.
    pub fn jump_to_flow(
        &mut self,
        flow_id: &str,
        index: usize,
    ) -> Result<(), NavigationError> {
        let (flow, index) = self.locate(Some(flow_id), index)?;
        self.move_to(flow, index, false, Cause::Jump);
        Ok(())
    }

    /// Have the next [`Navigator::tick`] redraw a static step.
    /// Animated steps redraw every tick anyway.
    pub fn request_redraw(&mut self) {
        if !self.current_step().animated {
            self.pending_render = true;
        }
    }

    // =========================================================================
    // Frame
    // =========================================================================

    /// Run one frame. Returns `true` if the LCD was drawn.
    pub fn tick(
        &mut self,
        surface: &mut dyn Surface,
    ) -> bool {
        if self.pending_render {
            self.pending_render = false;
            self.draw(surface, 0);
            return true;
        }

        let Some(tick) = self.active.as_mut().and_then(|anim| anim.advance(&self.clock)) else {
            return false;
        };
        let step = self.current_step();

        if let Some(advance) = step.auto_advance
            && tick >= advance.after_ticks
        {
            log::debug!("\"{}\" auto-advances at tick {tick}", step.title);
            self.follow(advance.target, Cause::Auto);
            return false;
        }

        if let Some(update) = step.update {
            let mut control = StepControl::new(tick, &mut self.flags, &mut self.led_override, &mut self.overlay);
            update(&mut control);
            if let Some(target) = control.into_request()
                && self.follow(target, Cause::Update)
            {
                return false;
            }
        }

        self.project_led();
        self.last_tick = tick;
        self.draw(surface, tick);
        true
    }

    fn draw(
        &self,
        surface: &mut dyn Surface,
        tick: u32,
    ) {
        let frame = Frame {
            tick,
            flags: &self.flags,
            assets: &self.assets,
        };
        (self.current_step().render)(surface, &frame);
        self.overlay.draw(surface);
    }

    // =========================================================================
    // Simulated Device Input
    // =========================================================================

    pub fn handle_power(
        &mut self,
        event: PowerEvent,
        now: Instant,
    ) {
        match event {
            PowerEvent::PressStart => self.press_power(now),
            PowerEvent::PressEnd | PowerEvent::PressCancel => self.release_power(now),
        }
    }

    /// Drive the shutdown countdown. Call once per frame.
    pub fn poll(
        &mut self,
        now: Instant,
    ) {
        if !self.shutdown.poll(now) {
            return;
        }
        let Some(started) = self.flags.shutdown_started_at else {
            self.shutdown.cancel();
            return;
        };
        self.flags.shutdown_remaining = SHUTDOWN_HOLD_TIME.saturating_sub(now.saturating_duration_since(started));
        if self.flags.shutdown_remaining.is_zero() {
            self.complete_shutdown();
        }
    }

    /// Set firmware progress. Reaching 100% inside the firmware flow jumps to
    /// its completion step.
    pub fn set_firmware_progress(
        &mut self,
        progress: f32,
    ) {
        self.flags.set_firmware_progress(progress);
        log::debug!("firmware progress {:.0}%", self.flags.firmware_progress * 100.0);

        if let Some(complete) = self.bindings.firmware_complete
            && self.flow.id == complete.flow
            && self.index != complete.step
            && self.flags.firmware_progress >= 1.0
        {
            self.follow(Target::Flow(complete), Cause::Firmware);
        } else {
            self.request_redraw();
        }
    }

    pub fn set_orientation(
        &mut self,
        orientation: Orientation,
    ) {
        self.flags.orientation = orientation;
        self.request_redraw();
    }

    /// Move the simulated joystick by a delta, in degrees.
    pub fn nudge_orientation(
        &mut self,
        d_roll: f32,
        d_pitch: f32,
    ) {
        self.set_orientation(self.flags.orientation.nudged(d_roll, d_pitch));
    }

    pub fn set_charger_connected(
        &mut self,
        connected: bool,
    ) {
        if self.flags.charger_connected != connected {
            log::info!("charger {}", if connected { "connected" } else { "disconnected" });
        }
        self.flags.charger_connected = connected;
        self.request_redraw();
    }

    fn press_power(
        &mut self,
        now: Instant,
    ) {
        if !self.button.press(now) {
            return;
        }

        if let Some(toggle) = self.bindings.serial_toggle
            && self.is_at(toggle)
        {
            self.flags.show_serial = !self.flags.show_serial;
            log::debug!("serial number {}", if self.flags.show_serial { "shown" } else { "hidden" });
            self.request_redraw();
        } else if !self.flags.powered_on {
            self.flags.powered_on = true;
            self.follow(Target::Flow(self.bindings.power_on), Cause::Power);
        } else if self.flow.id == self.bindings.power_flow {
            self.begin_shutdown(now);
        } else {
            log::debug!("power press has no effect in `{}`", self.flow.id);
        }
    }

    fn release_power(
        &mut self,
        now: Instant,
    ) {
        if self.button.release(now).is_none() {
            return;
        }
        let Some(started) = self.flags.shutdown_started_at else {
            return;
        };
        if now.saturating_duration_since(started) >= SHUTDOWN_HOLD_TIME {
            self.complete_shutdown();
        } else {
            self.cancel_shutdown();
        }
    }

    fn begin_shutdown(
        &mut self,
        now: Instant,
    ) {
        if self.shutdown.is_active() {
            return;
        }
        self.resume_index = Some(self.index);
        self.flags.shutdown_started_at = Some(now);
        self.flags.shutdown_remaining = SHUTDOWN_HOLD_TIME;
        self.shutdown.start(now);
        self.journal.push("shutdown hold started");
        log::info!("shutdown hold started, {}ms to go", SHUTDOWN_HOLD_TIME.as_millis());

        let target = Target::Flow(StepRef::new(self.bindings.power_flow, self.bindings.shutdown));
        if !self.follow(target, Cause::Power) {
            self.clear_shutdown();
        }
    }

    fn cancel_shutdown(&mut self) {
        let resume = self.resume_index.unwrap_or(self.index);
        self.clear_shutdown();
        self.journal.push("shutdown cancelled");
        log::info!("shutdown cancelled");
        self.follow(Target::Flow(StepRef::new(self.bindings.power_flow, resume)), Cause::Power);
    }

    fn complete_shutdown(&mut self) {
        self.clear_shutdown();
        self.flags.powered_on = false;
        self.journal.push("shutdown complete");
        log::info!("shutdown complete");
        self.follow(
            Target::Flow(StepRef::new(self.bindings.power_flow, self.bindings.powered_off)),
            Cause::Power,
        );
    }

    fn clear_shutdown(&mut self) {
        self.shutdown.cancel();
        self.flags.shutdown_started_at = None;
        self.flags.shutdown_remaining = SHUTDOWN_HOLD_TIME;
        self.resume_index = None;
    }

    /// Time left on the shutdown hold, if one is running.
    pub const fn shutdown_remaining(&self) -> Option<Duration> {
        if self.flags.shutdown_in_progress() { Some(self.flags.shutdown_remaining) } else { None }
    }

    // =========================================================================
    // Transition Machinery
    // =========================================================================

    fn is_at(
        &self,
        step: StepRef,
    ) -> bool {
        self.flow.id == step.flow && self.index == step.step
    }

    /// Resolve a flow id (`None` = current flow) and step index.
    fn locate(
        &self,
        flow_id: Option<&str>,
        index: usize,
    ) -> Result<(Flow, usize), NavigationError> {
        let flow = match flow_id {
            None => self.flow,
            Some(id) => *self
                .registry
                .get(id)
                .ok_or_else(|| NavigationError::UnknownFlow(id.into()))?,
        };
        if index >= flow.len() {
            return Err(NavigationError::StepOutOfRange {
                flow: flow.id.into(),
                index,
                len: flow.len(),
            });
        }
        Ok((flow, index))
    }

    fn follow(
        &mut self,
        target: Target,
        cause: Cause,
    ) -> bool {
        let located = match target {
            Target::Step(index) => self.locate(None, index),
            Target::Flow(step) => self.locate(Some(step.flow), step.step),
        };
        match located {
            Ok((flow, index)) => {
                self.move_to(flow, index, false, cause);
                true
            }
            Err(err) => {
                log::warn!("{} jump ignored: {err}", cause.label());
                false
            }
        }
    }

    fn move_to(
        &mut self,
        flow: Flow,
        index: usize,
        reset_flags: bool,
        cause: Cause,
    ) {
        self.leave();
        if reset_flags {
            self.flags = SimulationFlags::new(flow.starts_powered);
            self.shutdown.cancel();
            self.resume_index = None;
        }
        self.flow = flow;
        self.index = index;
        self.transitions = self.transitions.wrapping_add(1);
        self.enter(cause);
    }

    fn leave(&mut self) {
        self.clock.cancel();
        self.pending_render = false;
        if let Some(hook) = self.current_step().on_exit {
            self.run_hook(hook, "exit");
        }
        self.overlay.hide();
        self.led_override = None;
    }

    fn enter(
        &mut self,
        cause: Cause,
    ) {
        let step = self.current_step();
        self.journal
            .push_fmt(format_args!("{} {}/{} {}", cause.label(), self.flow.id, self.index, step.title));
        log::info!("{}: {}/{} \"{}\"", cause.label(), self.flow.id, self.index, step.title);

        if let Some(hook) = step.on_enter {
            self.run_hook(hook, "enter");
        }
        self.project_led();

        if step.animated {
            self.active = Some(self.clock.start());
        } else {
            self.active = None;
            self.pending_render = true;
        }
        self.last_tick = 0;
    }

    fn run_hook(
        &mut self,
        hook: HookFn,
        phase: &str,
    ) {
        let mut control = StepControl::new(0, &mut self.flags, &mut self.led_override, &mut self.overlay);
        hook(&mut control);
        if let Some(target) = control.into_request() {
            log::warn!(
                "{phase} hook of \"{}\" requested {target:?}; hooks cannot navigate",
                self.current_step().title
            );
        }
    }

    fn project_led(&mut self) {
        let led = self.led_override.unwrap_or(self.current_step().led);
        if self.indicator.project(led) {
            log::debug!("LED {:?} {}", led.mode, led.color.name());
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use embedded_graphics::prelude::Size;

    use super::*;
    use crate::{
        led::{LedColor, LedMode},
        surface::RecordingSurface,
    };

    thread_local! {
        static EVENTS: RefCell<Vec<&'static str>> = const { RefCell::new(Vec::new()) };
    }

    fn record(event: &'static str) { EVENTS.with(|e| e.borrow_mut().push(event)); }

    fn events() -> Vec<&'static str> { EVENTS.with(|e| e.take()) }

    fn draw_a(surface: &mut dyn Surface, frame: &Frame<'_>) {
        surface.text(
            if frame.tick == 0 { "A0" } else { "A" },
            embedded_graphics::prelude::Point::zero(),
            crate::surface::TextSpec::left(crate::styles::Font::Small, crate::colors::WHITE),
        );
    }

    fn draw_b(surface: &mut dyn Surface, _: &Frame<'_>) { surface.clear(crate::colors::BLACK); }

    fn enter_a(_: &mut StepControl<'_>) { record("enter a"); }
    fn exit_a(_: &mut StepControl<'_>) { record("exit a"); }
    fn enter_b(control: &mut StepControl<'_>) {
        record("enter b");
        control.show_overlay(Overlay::ChargerIcon);
        control.jump_to(0);
    }
    fn exit_b(_: &mut StepControl<'_>) { record("exit b"); }

    fn go_green(control: &mut StepControl<'_>) {
        if control.tick() >= 2 {
            control.set_led(LedDescriptor::on(LedColor::Green));
        }
        if control.tick() >= 4 {
            control.jump_to(0);
        }
    }

    static ALPHA: [Step; 3] = [
        Step::new("A", "Static first step.", LedDescriptor::OFF, draw_a)
            .with_enter(enter_a)
            .with_exit(exit_a),
        Step::new("B", "Animated, advances after 3 ticks.", LedDescriptor::breathing(LedColor::Blue), draw_b)
            .with_enter(enter_b)
            .with_exit(exit_b)
            .advance_after(3, Target::Step(2)),
        Step::new("C", "Overrides its LED.", LedDescriptor::breathing(LedColor::Blue), draw_b).with_update(go_green),
    ];

    static BETA: [Step; 1] = [Step::new("A", "Same title, other flow.", LedDescriptor::on(LedColor::Red), draw_a)];

    const TEST_BINDINGS: DeviceBindings = DeviceBindings {
        power_flow: "alpha",
        power_on: StepRef::new("alpha", 1),
        shutdown: 2,
        powered_off: 0,
        serial_toggle: None,
        firmware_complete: None,
    };

    fn navigator() -> Navigator {
        let mut registry = FlowRegistry::new();
        registry.register(Flow::new("alpha", &ALPHA)).unwrap();
        registry.register(Flow::new("beta", &BETA).starting_off()).unwrap();
        let navigator = Navigator::new(registry, TEST_BINDINGS, "alpha").unwrap();
        events();
        navigator
    }

    fn lcd() -> RecordingSurface { RecordingSurface::new(Size::new(160, 80)) }

    #[test]
    fn test_unknown_initial_flow() {
        let result = Navigator::new(FlowRegistry::new(), TEST_BINDINGS, "nope");
        assert_eq!(result.err(), Some(NavigationError::UnknownFlow("nope".into())));
    }

    #[test]
    fn test_static_step_renders_once() {
        let mut nav = navigator();
        let mut surface = lcd();
        assert!(!nav.is_animating());

        assert!(nav.tick(&mut surface), "First tick draws the static step");
        assert!(!nav.tick(&mut surface), "Static step does not redraw by itself");
        assert!(surface.contains_text("A0"), "Static render gets tick 0");

        nav.request_redraw();
        assert!(nav.tick(&mut surface), "Redraw request draws again");
    }

    #[test]
    fn test_next_prev_boundaries() {
        let mut nav = navigator();
        assert!(!nav.prev(), "No step before the first");
        assert_eq!(nav.position(), (1, 3));

        assert!(nav.next());
        assert!(nav.next());
        assert!(!nav.next(), "No step after the last");
        assert_eq!(nav.position(), (3, 3));
        assert!(nav.can_prev());
        assert!(!nav.can_next());
    }

    #[test]
    fn test_lifecycle_order_and_hook_jump_dropped() {
        let mut nav = navigator();
        nav.next();

        assert_eq!(events(), vec!["exit a", "enter b"]);
        assert_eq!(nav.current_index(), 1, "Jump requested by enter hook is dropped");
        assert_eq!(nav.overlay(), Some(Overlay::ChargerIcon));

        nav.prev();
        assert_eq!(events(), vec!["exit b", "enter a"], "Each hook runs exactly once");
        assert_eq!(nav.overlay(), None, "Overlay cleared on transition");
    }

    #[test]
    fn test_auto_advance_before_draw() {
        let mut nav = navigator();
        nav.next();
        let mut surface = lcd();

        for _ in 0..3 {
            assert!(nav.tick(&mut surface), "Ticks 0..3 draw");
        }
        assert_eq!(nav.current_index(), 1);
        assert!(!nav.tick(&mut surface), "Tick 3 advances without drawing");
        assert_eq!(nav.current_index(), 2);
    }

    #[test]
    fn test_led_override_resets_on_transition() {
        let mut nav = navigator();
        nav.jump_to(2);
        let mut surface = lcd();
        assert!(nav.is_animating());

        assert_eq!(nav.led(), LedDescriptor::breathing(LedColor::Blue));
        nav.tick(&mut surface);
        nav.tick(&mut surface);
        nav.tick(&mut surface);
        assert_eq!(nav.led(), LedDescriptor::on(LedColor::Green), "Update override projected");

        nav.tick(&mut surface);
        assert!(!nav.tick(&mut surface), "Update jump ends the tick");
        assert_eq!(nav.current_index(), 0);
        assert_eq!(nav.led().mode, LedMode::Off, "Override does not survive the step");
    }

    #[test]
    fn test_transition_cancels_loop() {
        let mut nav = navigator();
        nav.jump_to(2);
        let mut surface = lcd();
        nav.tick(&mut surface);
        nav.tick(&mut surface);

        nav.jump_to(2);
        nav.tick(&mut surface);
        assert_eq!(nav.last_tick(), 0, "Re-entering restarts the loop at tick 0");
    }

    #[test]
    fn test_select_flow_resets_flags() {
        let mut nav = navigator();
        nav.set_firmware_progress(0.5);
        assert!(nav.flags().powered_on);

        assert!(nav.select_flow("beta"));
        assert_eq!(nav.current_step().title, "A", "Titles may repeat across flows");
        assert!(!nav.flags().powered_on, "Beta starts powered off");
        assert!(nav.flags().firmware_progress.abs() < f32::EPSILON);
        assert_eq!(nav.led(), LedDescriptor::on(LedColor::Red));

        assert!(!nav.select_flow("gamma"), "Unknown flow ignored");
        assert_eq!(nav.current_flow().id, "beta");
    }

    #[test]
    fn test_jump_errors() {
        let mut nav = navigator();
        assert_eq!(
            nav.try_jump_to(9),
            Err(NavigationError::StepOutOfRange {
                flow: "alpha".into(),
                index: 9,
                len: 3
            })
        );
        assert!(!nav.jump_to(3));
        assert_eq!(nav.jump_to_flow("gamma", 0), Err(NavigationError::UnknownFlow("gamma".into())));

        nav.set_firmware_progress(0.25);
        nav.jump_to_flow("beta", 0).unwrap();
        assert!((nav.flags().firmware_progress - 0.25).abs() < f32::EPSILON, "Cross-flow jump keeps flags");
    }

    #[test]
    fn test_cycle_flow_wraps() {
        let mut nav = navigator();
        assert!(nav.cycle_flow(true));
        assert_eq!(nav.current_flow().id, "beta");
        assert!(nav.cycle_flow(true));
        assert_eq!(nav.current_flow().id, "alpha");
        assert!(nav.cycle_flow(false));
        assert_eq!(nav.current_flow().id, "beta");
    }

    #[test]
    fn test_registered_asset_reaches_renders() {
        let mut nav = navigator();
        assert!(!nav.assets().is_loaded(crate::assets::Asset::Logo));

        nav.assets_mut().register(crate::assets::Asset::Logo, Size::new(120, 30));
        assert_eq!(nav.assets().size_or_placeholder(crate::assets::Asset::Logo), Size::new(120, 30));
    }

    #[test]
    fn test_journal_records_transitions() {
        let mut nav = navigator();
        nav.next();
        assert_eq!(nav.journal().last(), Some("next alpha/1 B"));
        assert_eq!(nav.transitions(), 1);
    }
}
