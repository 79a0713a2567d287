//! Transient overlays layered above the LCD.
//!
//! A step may ask for one overlay while it is active (the firmware update
//! flow shows a charger icon while it waits for power). The slot holds at most
//! one overlay; showing a new one replaces the old one. The navigator clears
//! the slot on every transition, after the outgoing step's exit hook, so an
//! overlay never outlives the step that created it.

use embedded_graphics::{
    prelude::{Point, Size},
    primitives::Rectangle,
};

use crate::{assets::Asset, config::LCD_HEIGHT, surface::Surface};

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Overlay {
    /// Charger lightning icon in the bottom-left corner of the LCD.
    ChargerIcon,
}

impl Overlay {
    pub const fn asset(self) -> Asset {
        match self {
            Self::ChargerIcon => Asset::PowerIcon,
        }
    }

    /// Where the overlay sits, in LCD coordinates.
    pub const fn area(self) -> Rectangle {
        match self {
            // 5% from the left, lifted half its height off the bottom edge
            Self::ChargerIcon => Rectangle::new(Point::new(8, LCD_HEIGHT as i32 - 24), Size::new(16, 16)),
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::ChargerIcon => "charger icon",
        }
    }
}

/// Holder for the single active overlay.
#[derive(Debug, Default)]
pub struct OverlaySlot {
    active: Option<Overlay>,
}

impl OverlaySlot {
    pub const fn new() -> Self { Self { active: None } }

    /// Show `overlay`, replacing any active one.
    pub fn show(
        &mut self,
        overlay: Overlay,
    ) {
        if self.active != Some(overlay) {
            log::debug!("overlay shown: {}", overlay.name());
        }
        self.active = Some(overlay);
    }

    /// Remove the active overlay. Returns what was removed.
    pub fn hide(&mut self) -> Option<Overlay> {
        let removed = self.active.take();
        if let Some(overlay) = removed {
            log::debug!("overlay removed: {}", overlay.name());
        }
        removed
    }

    #[inline]
    pub const fn active(&self) -> Option<Overlay> { self.active }

    /// Draw the active overlay, if any, on top of the step render.
    pub fn draw(
        &self,
        surface: &mut dyn Surface,
    ) {
        if let Some(overlay) = self.active {
            surface.image(overlay.asset(), overlay.area(), 1.0);
        }
    }
}

#[cfg(test)]
mod tests {
    use embedded_graphics::primitives::ContainsPoint;

    use super::*;
    use crate::surface::{DrawCall, RecordingSurface};

    #[test]
    fn test_slot_holds_at_most_one() {
        let mut slot = OverlaySlot::new();
        assert_eq!(slot.active(), None);

        slot.show(Overlay::ChargerIcon);
        slot.show(Overlay::ChargerIcon);
        assert_eq!(slot.active(), Some(Overlay::ChargerIcon));

        assert_eq!(slot.hide(), Some(Overlay::ChargerIcon));
        assert_eq!(slot.hide(), None, "Second hide has nothing to remove");
    }

    #[test]
    fn test_draw_only_when_active() {
        let mut slot = OverlaySlot::new();
        let mut surface = RecordingSurface::new(Size::new(160, 80));

        slot.draw(&mut surface);
        assert!(surface.calls().is_empty(), "Empty slot draws nothing");

        slot.show(Overlay::ChargerIcon);
        slot.draw(&mut surface);
        assert_eq!(
            surface.calls(),
            &[DrawCall::Image {
                asset: Asset::PowerIcon,
                area: Overlay::ChargerIcon.area(),
                opacity: 1.0,
            }]
        );
    }

    #[test]
    fn test_charger_icon_inside_lcd() {
        let area = Overlay::ChargerIcon.area();
        let lcd = Rectangle::new(Point::zero(), Size::new(160, 80));
        assert!(lcd.contains(area.top_left));
        assert!(area.bottom_right().is_some_and(|p| lcd.contains(p)));
    }
}
