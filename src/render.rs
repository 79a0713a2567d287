//! Dirty tracking for the storyboard chrome.
//!
//! The LCD is redrawn by the navigator whenever the active step draws. The
//! chrome around it changes far less often, so each part is only repainted
//! when what it shows changes:
//!
//! | Element | Redrawn when |
//! |---------|--------------|
//! | Device frame (bezel, body) | First frame / page switch |
//! | Header | Flow, position, or rounded FPS changes |
//! | Title + explanation | Active step changes |
//! | Controls | Prev/next availability, button press, or power hint changes |
//! | LED | Every frame its faded color moves (see [`crate::widgets::LedWidget`]) |
//!
//! # Page Switch Cleanup
//!
//! The journal page clears the whole window. [`ChromeState::mark_display_cleared`]
//! forces every element to repaint on the next storyboard frame.

/// Inputs of the controls row that decide whether it needs repainting.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct ControlsKey {
    pub can_prev: bool,
    pub can_next: bool,
    pub power_pressed: bool,
    pub power_hint: bool,
}

/// Tracks what the chrome last showed.
#[derive(Debug)]
pub struct ChromeState {
    first_frame: bool,
    display_cleared: bool,

    prev_header: Option<(&'static str, usize, usize)>,
    prev_fps_rounded: u32,
    prev_step: Option<(&'static str, usize)>,
    prev_controls: Option<ControlsKey>,
}

impl ChromeState {
    pub const fn new() -> Self {
        Self {
            first_frame: true,
            display_cleared: false,
            prev_header: None,
            prev_fps_rounded: 0,
            prev_step: None,
            prev_controls: None,
        }
    }

    #[inline]
    const fn full_redraw(&self) -> bool { self.first_frame || self.display_cleared }

    /// The static device frame needs painting.
    #[inline]
    pub const fn need_frame(&self) -> bool { self.full_redraw() }

    /// Compare the header against the last painted one and remember it.
    ///
    /// The FPS is compared rounded, matching its `{:.0}` formatting.
    pub fn check_header_dirty(
        &mut self,
        flow_id: &'static str,
        position: (usize, usize),
        fps: f32,
    ) -> bool {
        let header = Some((flow_id, position.0, position.1));
        let fps_rounded = fps.round() as u32;
        let dirty = self.full_redraw() || header != self.prev_header || fps_rounded != self.prev_fps_rounded;

        self.prev_header = header;
        self.prev_fps_rounded = fps_rounded;
        dirty
    }

    /// Title and explanation need painting for this step.
    pub fn check_step_dirty(
        &mut self,
        flow_id: &'static str,
        index: usize,
    ) -> bool {
        let step = Some((flow_id, index));
        let dirty = self.full_redraw() || step != self.prev_step;
        self.prev_step = step;
        dirty
    }

    pub fn check_controls_dirty(
        &mut self,
        controls: ControlsKey,
    ) -> bool {
        let dirty = self.full_redraw() || Some(controls) != self.prev_controls;
        self.prev_controls = Some(controls);
        dirty
    }

    #[inline]
    pub const fn is_first_frame(&self) -> bool { self.first_frame }

    /// The window was cleared externally (page switch).
    pub const fn mark_display_cleared(&mut self) { self.display_cleared = true; }

    /// Reset per-frame state. Call once at the end of each storyboard frame.
    pub const fn end_frame(&mut self) {
        self.first_frame = false;
        self.display_cleared = false;
    }
}

impl Default for ChromeState {
    fn default() -> Self { Self::new() }
}
