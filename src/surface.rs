//! Render surface abstraction for step callbacks.
//!
//! Step renders draw through the object-safe [`Surface`] trait, never through a
//! concrete graphics API. Two implementations ship with the crate:
//!
//! - [`DisplaySurface`]: draws into any `embedded-graphics` `DrawTarget<Color = Rgb565>`
//!   (the simulator display, or a cropped region of it for the LCD window).
//! - [`RecordingSurface`]: records every call as a [`DrawCall`], for headless
//!   previews and for comparing two renders call by call.
//!
//! All calls are synchronous and immediate. Coordinates are LCD pixels with the
//! origin in the top-left corner; angles follow `embedded-graphics` (0° at
//! 3 o'clock, positive sweep clockwise).
//!
//! # Polygon Fill
//!
//! `embedded-graphics` only fills triangles, so [`DisplaySurface::polygon`]
//! runs a small even-odd scanline fill. That handles concave outlines such as
//! the lightning bolt without the caller splitting them into triangles.

use embedded_graphics::{
    mono_font::MonoTextStyle,
    pixelcolor::Rgb565,
    prelude::*,
    primitives::{Arc, Circle, Line, Polyline, PrimitiveStyle, Rectangle, RoundedRectangle},
    text::{Alignment, Baseline, Text, TextStyleBuilder},
};
use heapless::Vec as FixedVec;

use crate::{
    assets::Asset,
    colors::{BLACK, WHITE, with_opacity},
    styles::Font,
};

/// Maximum edge crossings per scanline in [`DisplaySurface::polygon`].
const MAX_SCANLINE_CROSSINGS: usize = 32;

// =============================================================================
// Paint & Text Specs
// =============================================================================

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Stroke {
    pub color: Rgb565,
    pub width: u32,
}

impl Stroke {
    pub const fn new(color: Rgb565, width: u32) -> Self { Self { color, width } }
}

/// How a closed shape is painted.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Paint {
    Fill(Rgb565),
    Stroke(Stroke),
}

impl Paint {
    pub const fn stroke(color: Rgb565, width: u32) -> Self { Self::Stroke(Stroke::new(color, width)) }

    const fn style(self) -> PrimitiveStyle<Rgb565> {
        match self {
            Self::Fill(color) => PrimitiveStyle::with_fill(color),
            Self::Stroke(s) => PrimitiveStyle::with_stroke(s.color, s.width),
        }
    }
}

/// Font, color, and anchoring of a text call.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct TextSpec {
    pub font: Font,
    pub color: Rgb565,
    pub alignment: Alignment,
    pub baseline: Baseline,
}

impl TextSpec {
    /// Left-aligned text anchored on the alphabetic baseline.
    pub const fn left(font: Font, color: Rgb565) -> Self {
        Self {
            font,
            color,
            alignment: Alignment::Left,
            baseline: Baseline::Alphabetic,
        }
    }

    /// Horizontally centered text anchored on the alphabetic baseline.
    pub const fn centered(font: Font, color: Rgb565) -> Self {
        Self {
            font,
            color,
            alignment: Alignment::Center,
            baseline: Baseline::Alphabetic,
        }
    }

    /// Same spec, anchored on the vertical middle of the glyphs.
    pub const fn middle(mut self) -> Self {
        self.baseline = Baseline::Middle;
        self
    }
}

// =============================================================================
// Surface Trait
// =============================================================================

/// Pixels a step can draw on.
pub trait Surface {
    fn size(&self) -> Size;

    /// Fill the whole surface.
    fn clear(
        &mut self,
        color: Rgb565,
    );

    /// Rectangle, optionally with rounded corners (`corner_radius` > 0).
    fn rect(
        &mut self,
        area: Rectangle,
        corner_radius: u32,
        paint: Paint,
    );

    fn circle(
        &mut self,
        center: Point,
        diameter: u32,
        paint: Paint,
    );

    fn arc(
        &mut self,
        center: Point,
        diameter: u32,
        start: Angle,
        sweep: Angle,
        stroke: Stroke,
    );

    fn line(
        &mut self,
        from: Point,
        to: Point,
        stroke: Stroke,
    );

    /// Open path through `points`.
    fn polyline(
        &mut self,
        points: &[Point],
        stroke: Stroke,
    );

    /// Closed polygon through `points`.
    fn polygon(
        &mut self,
        points: &[Point],
        paint: Paint,
    );

    fn text(
        &mut self,
        text: &str,
        position: Point,
        spec: TextSpec,
    );

    /// Blit an asset scaled into `area` at `opacity` (0.0..=1.0).
    fn image(
        &mut self,
        asset: Asset,
        area: Rectangle,
        opacity: f32,
    );
}

// =============================================================================
// Recording Surface
// =============================================================================

/// One recorded surface call.
#[derive(Clone, PartialEq, Debug)]
pub enum DrawCall {
    Clear(Rgb565),
    Rect {
        area: Rectangle,
        corner_radius: u32,
        paint: Paint,
    },
    Circle {
        center: Point,
        diameter: u32,
        paint: Paint,
    },
    Arc {
        center: Point,
        diameter: u32,
        start: Angle,
        sweep: Angle,
        stroke: Stroke,
    },
    Line {
        from: Point,
        to: Point,
        stroke: Stroke,
    },
    Polyline {
        points: Vec<Point>,
        stroke: Stroke,
    },
    Polygon {
        points: Vec<Point>,
        paint: Paint,
    },
    Text {
        text: String,
        position: Point,
        spec: TextSpec,
    },
    Image {
        asset: Asset,
        area: Rectangle,
        opacity: f32,
    },
}

/// Surface that records calls instead of drawing them.
#[derive(Debug)]
pub struct RecordingSurface {
    size: Size,
    calls: Vec<DrawCall>,
}

impl RecordingSurface {
    pub const fn new(size: Size) -> Self {
        Self {
            size,
            calls: Vec::new(),
        }
    }

    #[inline]
    pub fn calls(&self) -> &[DrawCall] { &self.calls }

    /// Take the recorded calls, leaving the recorder empty.
    pub fn take(&mut self) -> Vec<DrawCall> { core::mem::take(&mut self.calls) }

    /// All text drawn so far, in call order.
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.calls.iter().filter_map(|call| match call {
            DrawCall::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }

    /// Whether any recorded text call contains `needle`.
    pub fn contains_text(&self, needle: &str) -> bool { self.texts().any(|t| t.contains(needle)) }
}

impl Surface for RecordingSurface {
    fn size(&self) -> Size { self.size }

    fn clear(&mut self, color: Rgb565) { self.calls.push(DrawCall::Clear(color)); }

    fn rect(&mut self, area: Rectangle, corner_radius: u32, paint: Paint) {
        self.calls.push(DrawCall::Rect {
            area,
            corner_radius,
            paint,
        });
    }

    fn circle(&mut self, center: Point, diameter: u32, paint: Paint) {
        self.calls.push(DrawCall::Circle { center, diameter, paint });
    }

    fn arc(&mut self, center: Point, diameter: u32, start: Angle, sweep: Angle, stroke: Stroke) {
        self.calls.push(DrawCall::Arc {
            center,
            diameter,
            start,
            sweep,
            stroke,
        });
    }

    fn line(&mut self, from: Point, to: Point, stroke: Stroke) { self.calls.push(DrawCall::Line { from, to, stroke }); }

    fn polyline(&mut self, points: &[Point], stroke: Stroke) {
        self.calls.push(DrawCall::Polyline {
            points: points.to_vec(),
            stroke,
        });
    }

    fn polygon(&mut self, points: &[Point], paint: Paint) {
        self.calls.push(DrawCall::Polygon {
            points: points.to_vec(),
            paint,
        });
    }

    fn text(&mut self, text: &str, position: Point, spec: TextSpec) {
        self.calls.push(DrawCall::Text {
            text: text.into(),
            position,
            spec,
        });
    }

    fn image(&mut self, asset: Asset, area: Rectangle, opacity: f32) {
        self.calls.push(DrawCall::Image { asset, area, opacity });
    }
}

// =============================================================================
// Display Surface
// =============================================================================

/// Surface backed by an `embedded-graphics` draw target.
///
/// Draw errors are ignored, matching how the rest of the preview treats
/// `DrawTarget::draw` results.
pub struct DisplaySurface<'a, D> {
    target: &'a mut D,
}

impl<'a, D> DisplaySurface<'a, D>
where
    D: DrawTarget<Color = Rgb565>,
{
    pub const fn new(target: &'a mut D) -> Self { Self { target } }

    /// Even-odd scanline fill.
    fn fill_polygon(
        &mut self,
        points: &[Point],
        color: Rgb565,
    ) {
        if points.len() < 3 {
            return;
        }
        let min_y = points.iter().map(|p| p.y).min().unwrap_or(0);
        let max_y = points.iter().map(|p| p.y).max().unwrap_or(0);

        for y in min_y..=max_y {
            // Sample at pixel centers so shared vertices are counted once
            let sy = y as f32 + 0.5;
            let mut crossings: FixedVec<f32, MAX_SCANLINE_CROSSINGS> = FixedVec::new();

            for (i, a) in points.iter().enumerate() {
                let b = points[(i + 1) % points.len()];
                let (ay, by) = (a.y as f32, b.y as f32);
                if (ay <= sy && sy < by) || (by <= sy && sy < ay) {
                    let x = (sy - ay).mul_add((b.x - a.x) as f32 / (by - ay), a.x as f32);
                    crossings.push(x).ok();
                }
            }

            crossings.sort_unstable_by(f32::total_cmp);
            for span in crossings.chunks_exact(2) {
                let x0 = (span[0] - 0.5).ceil() as i32;
                let x1 = (span[1] - 0.5).floor() as i32;
                if x1 >= x0 {
                    let row = Rectangle::new(Point::new(x0, y), Size::new((x1 - x0 + 1) as u32, 1));
                    self.target.fill_solid(&row, color).ok();
                }
            }
        }
    }

    /// Procedural micro QR stand-in: 13x13 modules with a finder pattern.
    fn draw_qr_placeholder(
        &mut self,
        area: Rectangle,
        color: Rgb565,
    ) {
        const MODULES: u32 = 13;
        let module = (area.size.height.min(area.size.width) / MODULES).max(1);
        let side = module * MODULES;
        let origin = area.top_left
            + Point::new(
                (area.size.width.saturating_sub(side) / 2) as i32,
                (area.size.height.saturating_sub(side) / 2) as i32,
            );

        for row in 0..MODULES {
            for col in 0..MODULES {
                if qr_module(col, row) {
                    let cell = Rectangle::new(
                        origin + Point::new((col * module) as i32, (row * module) as i32),
                        Size::new(module, module),
                    );
                    self.target.fill_solid(&cell, color).ok();
                }
            }
        }
    }

    /// Stylized two-letter wordmark in a rounded frame.
    fn draw_logo_placeholder(
        &mut self,
        area: Rectangle,
        color: Rgb565,
    ) {
        RoundedRectangle::with_equal_corners(area, Size::new(6, 6))
            .into_styled(PrimitiveStyle::with_stroke(color, 2))
            .draw(self.target)
            .ok();
        let style = TextStyleBuilder::new()
            .alignment(Alignment::Center)
            .baseline(Baseline::Middle)
            .build();
        Text::with_text_style("DS", area.center(), MonoTextStyle::new(Font::Huge.mono(), color), style)
            .draw(self.target)
            .ok();
    }
}

/// Module pattern of the QR stand-in. Finder in the top-left corner, timing
/// lines along row 0 and column 0, and a fixed pseudo-random data area.
const fn qr_module(col: u32, row: u32) -> bool {
    if col < 8 && row < 8 {
        // 7x7 finder with a 1-module separator
        if col == 7 || row == 7 {
            return false;
        }
        let ring = col == 0 || col == 6 || row == 0 || row == 6;
        let core = col >= 2 && col <= 4 && row >= 2 && row <= 4;
        return ring || core;
    }
    if row == 0 {
        return col.is_multiple_of(2);
    }
    if col == 0 {
        return row.is_multiple_of(2);
    }
    (col.wrapping_mul(7) ^ row.wrapping_mul(13) ^ (col * row)) % 3 == 0
}

/// Lightning bolt outline in a `w` x `h` box, as used by the charger icon.
pub fn bolt_outline(origin: Point, w: u32, h: u32) -> [Point; 7] {
    let (w, h) = (w as f32, h as f32);
    let p = |fx: f32, fy: f32| origin + Point::new((w * fx).round() as i32, (h * fy).round() as i32);
    [
        p(0.794, 0.0),
        p(0.308, 0.0),
        p(0.0, 0.526),
        p(0.481, 0.526),
        p(0.264, 1.0),
        p(1.0, 0.383),
        p(0.481, 0.383),
    ]
}

impl<D> Surface for DisplaySurface<'_, D>
where
    D: DrawTarget<Color = Rgb565>,
{
    fn size(&self) -> Size { self.target.bounding_box().size }

    fn clear(&mut self, color: Rgb565) { self.target.clear(color).ok(); }

    fn rect(&mut self, area: Rectangle, corner_radius: u32, paint: Paint) {
        if corner_radius == 0 {
            area.into_styled(paint.style()).draw(self.target).ok();
        } else {
            RoundedRectangle::with_equal_corners(area, Size::new(corner_radius, corner_radius))
                .into_styled(paint.style())
                .draw(self.target)
                .ok();
        }
    }

    fn circle(&mut self, center: Point, diameter: u32, paint: Paint) {
        Circle::with_center(center, diameter)
            .into_styled(paint.style())
            .draw(self.target)
            .ok();
    }

    fn arc(&mut self, center: Point, diameter: u32, start: Angle, sweep: Angle, stroke: Stroke) {
        Arc::with_center(center, diameter, start, sweep)
            .into_styled(PrimitiveStyle::with_stroke(stroke.color, stroke.width))
            .draw(self.target)
            .ok();
    }

    fn line(&mut self, from: Point, to: Point, stroke: Stroke) {
        Line::new(from, to)
            .into_styled(PrimitiveStyle::with_stroke(stroke.color, stroke.width))
            .draw(self.target)
            .ok();
    }

    fn polyline(&mut self, points: &[Point], stroke: Stroke) {
        Polyline::new(points)
            .into_styled(PrimitiveStyle::with_stroke(stroke.color, stroke.width))
            .draw(self.target)
            .ok();
    }

    fn polygon(&mut self, points: &[Point], paint: Paint) {
        match paint {
            Paint::Fill(color) => self.fill_polygon(points, color),
            Paint::Stroke(stroke) => {
                self.polyline(points, stroke);
                if let (Some(first), Some(last)) = (points.first(), points.last()) {
                    self.line(*last, *first, stroke);
                }
            }
        }
    }

    fn text(&mut self, text: &str, position: Point, spec: TextSpec) {
        let style = TextStyleBuilder::new()
            .alignment(spec.alignment)
            .baseline(spec.baseline)
            .build();
        Text::with_text_style(text, position, MonoTextStyle::new(spec.font.mono(), spec.color), style)
            .draw(self.target)
            .ok();
    }

    fn image(&mut self, asset: Asset, area: Rectangle, opacity: f32) {
        let color = with_opacity(WHITE, opacity);
        if color == BLACK {
            return;
        }
        match asset {
            Asset::MicroQr => self.draw_qr_placeholder(area, color),
            Asset::Logo => self.draw_logo_placeholder(area, color),
            Asset::PowerIcon => {
                let bolt = bolt_outline(area.top_left, area.size.width, area.size.height);
                self.fill_polygon(&bolt, color);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use embedded_graphics_simulator::SimulatorDisplay;

    use super::*;
    use crate::colors::{GREEN, RED};

    fn lcd() -> SimulatorDisplay<Rgb565> { SimulatorDisplay::new(Size::new(160, 80)) }

    #[test]
    fn test_recording_surface_records_in_order() {
        let mut surface = RecordingSurface::new(Size::new(160, 80));
        surface.clear(BLACK);
        surface.text("Hello", Point::new(80, 40), TextSpec::centered(Font::Medium, WHITE));
        surface.line(Point::zero(), Point::new(10, 10), Stroke::new(RED, 2));

        assert_eq!(surface.calls().len(), 3);
        assert_eq!(surface.calls()[0], DrawCall::Clear(BLACK));
        assert!(surface.contains_text("Hell"));
        assert!(!surface.contains_text("World"));

        let taken = surface.take();
        assert_eq!(taken.len(), 3);
        assert!(surface.calls().is_empty(), "Take should empty the recorder");
    }

    #[test]
    fn test_display_surface_clear_and_rect() {
        let mut display = lcd();
        {
            let mut surface = DisplaySurface::new(&mut display);
            assert_eq!(surface.size(), Size::new(160, 80));
            surface.clear(BLACK);
            surface.rect(Rectangle::new(Point::new(10, 10), Size::new(5, 5)), 0, Paint::Fill(GREEN));
        }
        assert_eq!(display.get_pixel(Point::new(12, 12)), GREEN);
        assert_eq!(display.get_pixel(Point::new(20, 20)), BLACK);
    }

    #[test]
    fn test_scanline_fill_covers_concave_shape() {
        let mut display = lcd();
        let bolt = bolt_outline(Point::new(10, 10), 14, 22);
        {
            let mut surface = DisplaySurface::new(&mut display);
            surface.clear(BLACK);
            surface.polygon(&bolt, Paint::Fill(WHITE));
        }
        // Upper stroke and lower stroke of the bolt are both filled
        assert_eq!(display.get_pixel(Point::new(17, 12)), WHITE, "Upper bolt body");
        assert_eq!(display.get_pixel(Point::new(17, 26)), WHITE, "Lower bolt body");
        // The notch on the right of the upper body stays empty
        assert_eq!(display.get_pixel(Point::new(23, 11)), BLACK, "Outside the bolt");
    }

    fn all_black(display: &SimulatorDisplay<Rgb565>) -> bool {
        display.bounding_box().points().all(|p| display.get_pixel(p) == BLACK)
    }

    #[test]
    fn test_fill_ignores_degenerate_polygons() {
        let mut display = lcd();
        {
            let mut surface = DisplaySurface::new(&mut display);
            surface.clear(BLACK);
            surface.polygon(&[Point::new(1, 1), Point::new(5, 5)], Paint::Fill(WHITE));
        }
        assert!(all_black(&display), "Two points fill nothing");
    }

    #[test]
    fn test_zero_opacity_image_draws_nothing() {
        let mut display = lcd();
        {
            let mut surface = DisplaySurface::new(&mut display);
            surface.clear(BLACK);
            surface.image(Asset::Logo, Rectangle::new(Point::zero(), Size::new(40, 20)), 0.0);
        }
        assert!(all_black(&display));
    }

    #[test]
    fn test_qr_placeholder_draws_modules() {
        let mut display = lcd();
        {
            let mut surface = DisplaySurface::new(&mut display);
            surface.clear(BLACK);
            surface.image(Asset::MicroQr, Rectangle::new(Point::new(0, 40), Size::new(160, 40)), 1.0);
        }
        // 40px tall area gives 3px modules, 39px square centered horizontally
        assert_eq!(display.get_pixel(Point::new(61, 41)), WHITE, "Finder corner module");
        assert!(!all_black(&display));
    }

    #[test]
    fn test_qr_placeholder_has_finder_pattern() {
        assert!(qr_module(0, 0), "Finder corner is dark");
        assert!(qr_module(3, 3), "Finder core is dark");
        assert!(!qr_module(1, 1), "Finder gap is light");
        assert!(!qr_module(7, 3), "Separator is light");
    }
}
