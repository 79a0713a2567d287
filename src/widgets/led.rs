//! Status LED widget next to the LCD.
//!
//! The LED is drawn from the navigator's observable indicator. Its brightness
//! follows the host frame counter rather than the step tick, so a static step
//! with a breathing LED keeps breathing. Color changes ease in through a
//! [`ColorFade`] and the widget only repaints while the faded color moves.

use embedded_graphics::{
    pixelcolor::Rgb565,
    prelude::*,
    primitives::{Circle, PrimitiveStyle, PrimitiveStyleBuilder, Rectangle},
    text::Text,
};

use crate::{
    animations::ColorFade,
    colors::{BLACK, DEVICE_BODY, GRAY, with_opacity},
    config::{LED_CENTER, LED_DIAMETER},
    led::{LedDescriptor, LedMode},
    styles::{CENTERED, LABEL_STYLE_MUTED},
};

/// Mode caption baseline.
const MODE_CAPTION_POS: Point = Point::new(LED_CENTER.x, LED_CENTER.y + 16);

/// Color caption baseline.
const COLOR_CAPTION_POS: Point = Point::new(LED_CENTER.x, LED_CENTER.y + 26);

/// Cleared before the captions are redrawn.
const CAPTION_AREA: Rectangle = Rectangle::new(Point::new(LED_CENTER.x - 30, LED_CENTER.y + 8), Size::new(60, 21));

const RING_STYLE: PrimitiveStyle<Rgb565> = PrimitiveStyleBuilder::new()
    .stroke_color(GRAY)
    .stroke_width(2)
    .build();

const fn mode_label(mode: LedMode) -> &'static str {
    match mode {
        LedMode::Off => "off",
        LedMode::On => "steady",
        LedMode::Breathing => "breathing",
        LedMode::Blink => "blinking",
    }
}

#[derive(Debug)]
pub struct LedWidget {
    fade: ColorFade,
    caption: Option<LedDescriptor>,
    drawn: bool,
}

impl LedWidget {
    pub const fn new() -> Self {
        Self {
            fade: ColorFade::new(BLACK),
            caption: None,
            drawn: false,
        }
    }

    /// Advance the fade toward `led` at host frame `frame`.
    ///
    /// Returns `true` if the widget needs repainting.
    pub fn update(
        &mut self,
        led: LedDescriptor,
        frame: u32,
    ) -> bool {
        self.fade
            .set_target(with_opacity(led.color.rgb(), led.intensity(frame)));
        let moved = self.fade.update();
        moved || !self.drawn || self.caption != Some(led)
    }

    /// Force a repaint (page switch).
    pub const fn invalidate(&mut self) { self.drawn = false; }

    #[inline]
    pub const fn current_color(&self) -> Rgb565 { self.fade.current() }

    pub fn draw<D>(
        &mut self,
        display: &mut D,
        led: LedDescriptor,
    ) where
        D: DrawTarget<Color = Rgb565>,
    {
        Circle::with_center(LED_CENTER, LED_DIAMETER)
            .into_styled(PrimitiveStyle::with_fill(self.fade.current()))
            .draw(display)
            .ok();
        Circle::with_center(LED_CENTER, LED_DIAMETER + 4)
            .into_styled(RING_STYLE)
            .draw(display)
            .ok();

        if !self.drawn || self.caption != Some(led) {
            CAPTION_AREA
                .into_styled(PrimitiveStyle::with_fill(DEVICE_BODY))
                .draw(display)
                .ok();
            Text::with_text_style(mode_label(led.mode), MODE_CAPTION_POS, LABEL_STYLE_MUTED, CENTERED)
                .draw(display)
                .ok();
            if led.mode != LedMode::Off {
                Text::with_text_style(led.color.name(), COLOR_CAPTION_POS, LABEL_STYLE_MUTED, CENTERED)
                    .draw(display)
                    .ok();
            }
            self.caption = Some(led);
        }

        self.drawn = true;
    }
}

impl Default for LedWidget {
    fn default() -> Self { Self::new() }
}

#[cfg(test)]
mod tests {
    use embedded_graphics_simulator::SimulatorDisplay;

    use super::*;
    use crate::{
        colors::GREEN,
        config::{PREVIEW_HEIGHT, PREVIEW_WIDTH},
        led::LedColor,
    };

    fn settle(
        widget: &mut LedWidget,
        led: LedDescriptor,
    ) {
        for frame in 0..200 {
            widget.update(led, frame);
        }
    }

    #[test]
    fn test_first_update_needs_paint() {
        let mut widget = LedWidget::new();
        assert!(widget.update(LedDescriptor::OFF, 0), "Never drawn");
    }

    #[test]
    fn test_steady_led_settles_and_goes_quiet() {
        let mut widget = LedWidget::new();
        let mut display = SimulatorDisplay::<Rgb565>::new(Size::new(PREVIEW_WIDTH, PREVIEW_HEIGHT));
        let led = LedDescriptor::on(LedColor::Green);

        settle(&mut widget, led);
        assert_eq!(widget.current_color(), GREEN);

        widget.draw(&mut display, led);
        assert_eq!(display.get_pixel(LED_CENTER), GREEN);
        assert!(!widget.update(led, 500), "Settled and painted");

        widget.invalidate();
        assert!(widget.update(led, 501), "Invalidated");
    }

    #[test]
    fn test_caption_change_needs_paint() {
        let mut widget = LedWidget::new();
        let mut display = SimulatorDisplay::<Rgb565>::new(Size::new(PREVIEW_WIDTH, PREVIEW_HEIGHT));
        let led = LedDescriptor::on(LedColor::Green);
        settle(&mut widget, led);
        widget.draw(&mut display, led);

        assert!(widget.update(LedDescriptor::blink(LedColor::Green), 500), "Mode changed");
    }

    #[test]
    fn test_breathing_follows_host_frames() {
        let mut widget = LedWidget::new();
        let mut display = SimulatorDisplay::<Rgb565>::new(Size::new(PREVIEW_WIDTH, PREVIEW_HEIGHT));
        let led = LedDescriptor::breathing(LedColor::Blue);

        let mut moving = 0;
        for frame in 0..120 {
            if widget.update(led, frame) {
                widget.draw(&mut display, led);
                moving += 1;
            }
        }
        assert!(moving > 20, "Breathing keeps the widget busy, moved {moving}");
    }

    #[test]
    fn test_mode_labels() {
        assert_eq!(mode_label(LedMode::Off), "off");
        assert_eq!(mode_label(LedMode::Breathing), "breathing");
    }
}
