//! Journal page: frame metrics and the navigator's transition journal.
//!
//! Toggled with `J` from the storyboard page. Fills the whole preview window.
//!
//! # Layout
//!
//! ```text
//! ┌────────────────────────────────────────┐
//! │ JOURNAL        UP 00:12:34      60 FPS │
//! ├────────────────────────────────────────┤
//! │ TIMING              COUNTS             │
//! │ Frame: 16.7ms       Frames: 12847      │
//! │ Render: 0.4ms       LCD:    9120       │
//! │ Sleep: 16.2ms       Chrome: 41         │
//! │ Avg:   16.7ms       Trans:  17         │
//! ├────────────────────────────────────────┤
//! │ > select power/0 Off                   │
//! │ > power power/1 Power On               │
//! │ > auto power/2 On                      │
//! │ > _                                    │
//! └────────────────────────────────────────┘
//! ```

use core::fmt::Write;

use embedded_graphics::{
    mono_font::{MonoTextStyle, ascii::FONT_6X10},
    pixelcolor::Rgb565,
    prelude::*,
    primitives::{Line, PrimitiveStyle, Rectangle},
    text::Text,
};
use heapless::String;

use crate::{
    colors::{BLACK, GRAY, GREEN, YELLOW},
    config::{PREVIEW_HEIGHT, PREVIEW_WIDTH},
    journal::Journal,
    profiling::FrameMetrics,
    styles::{JOURNAL_PROMPT_STYLE, JOURNAL_TEXT_STYLE, LABEL_STYLE_WHITE, RIGHT_ALIGNED},
};

// =============================================================================
// Layout Constants
// =============================================================================

const HEADER_Y: i32 = 10;
const HEADER_DIVIDER_Y: i32 = 14;
const SECTION_HEADER_Y: i32 = 25;
const STATS_Y: i32 = 36;
const STAT_LINE_HEIGHT: i32 = 10;
const LOG_DIVIDER_Y: i32 = 72;
const LOG_Y: i32 = 82;
const LOG_LINE_HEIGHT: i32 = 10;

const COL1_X: i32 = 4;
const COL2_X: i32 = 124;

/// Terminal background (very dark green tint).
const LOG_BG: Rgb565 = Rgb565::new(1, 2, 1);

const SECTION_STYLE: MonoTextStyle<'static, Rgb565> = MonoTextStyle::new(&FONT_6X10, GRAY);
const HIGHLIGHT_STYLE: MonoTextStyle<'static, Rgb565> = MonoTextStyle::new(&FONT_6X10, YELLOW);
const HEADER_STYLE: MonoTextStyle<'static, Rgb565> = MonoTextStyle::new(&FONT_6X10, GREEN);

/// Draw the journal page over the whole preview window.
pub fn draw_journal_page<D>(
    display: &mut D,
    metrics: &FrameMetrics,
    journal: &Journal,
    transitions: u32,
) where
    D: DrawTarget<Color = Rgb565>,
{
    display.clear(BLACK).ok();

    draw_header(display, metrics);
    draw_horizontal_line(display, HEADER_DIVIDER_Y);

    Text::new("TIMING", Point::new(COL1_X, SECTION_HEADER_Y), SECTION_STYLE)
        .draw(display)
        .ok();
    Text::new("COUNTS", Point::new(COL2_X, SECTION_HEADER_Y), SECTION_STYLE)
        .draw(display)
        .ok();
    draw_timing_column(display, metrics);
    draw_count_column(display, metrics, transitions);

    draw_horizontal_line(display, LOG_DIVIDER_Y);
    draw_log_terminal(display, journal);
}

fn draw_header<D>(
    display: &mut D,
    metrics: &FrameMetrics,
) where
    D: DrawTarget<Color = Rgb565>,
{
    Text::new("JOURNAL", Point::new(COL1_X, HEADER_Y), HEADER_STYLE)
        .draw(display)
        .ok();

    let mut uptime: String<24> = String::new();
    write!(uptime, "UP {}", metrics.uptime_string()).ok();
    Text::new(&uptime, Point::new(76, HEADER_Y), LABEL_STYLE_WHITE)
        .draw(display)
        .ok();

    let mut fps: String<12> = String::new();
    write!(fps, "{:.0} FPS", metrics.fps()).ok();
    Text::with_text_style(
        &fps,
        Point::new(PREVIEW_WIDTH as i32 - COL1_X, HEADER_Y),
        LABEL_STYLE_WHITE,
        RIGHT_ALIGNED,
    )
    .draw(display)
    .ok();
}

fn draw_timing_column<D>(
    display: &mut D,
    metrics: &FrameMetrics,
) where
    D: DrawTarget<Color = Rgb565>,
{
    let rows = [
        ("Frame:", metrics.frame_time_us),
        ("Render:", metrics.render_time_us),
        ("Sleep:", metrics.sleep_time_us),
        ("Avg:", metrics.frame_time_avg_us()),
    ];

    let mut y = STATS_Y;
    for (i, (label, us)) in rows.into_iter().enumerate() {
        let mut s: String<20> = String::new();
        write!(s, "{label:<7}{:.1}ms", us as f32 / 1000.0).ok();
        let style = if i == rows.len() - 1 { HIGHLIGHT_STYLE } else { LABEL_STYLE_WHITE };
        Text::new(&s, Point::new(COL1_X, y), style).draw(display).ok();
        y += STAT_LINE_HEIGHT;
    }
}

fn draw_count_column<D>(
    display: &mut D,
    metrics: &FrameMetrics,
    transitions: u32,
) where
    D: DrawTarget<Color = Rgb565>,
{
    let rows = [
        ("Frames:", metrics.total_frames),
        ("LCD:", u64::from(metrics.lcd_frames)),
        ("Chrome:", u64::from(metrics.chrome_redraws)),
        ("Trans:", u64::from(transitions)),
    ];

    let mut y = STATS_Y;
    for (label, count) in rows {
        let mut s: String<20> = String::new();
        write!(s, "{label:<8}{count}").ok();
        Text::new(&s, Point::new(COL2_X, y), LABEL_STYLE_WHITE)
            .draw(display)
            .ok();
        y += STAT_LINE_HEIGHT;
    }
}

/// Journal lines, oldest first, followed by a cursor line when there is room.
fn draw_log_terminal<D>(
    display: &mut D,
    journal: &Journal,
) where
    D: DrawTarget<Color = Rgb565>,
{
    Rectangle::new(
        Point::new(0, LOG_DIVIDER_Y + 2),
        Size::new(PREVIEW_WIDTH, PREVIEW_HEIGHT - LOG_DIVIDER_Y as u32 - 2),
    )
    .into_styled(PrimitiveStyle::with_fill(LOG_BG))
    .draw(display)
    .ok();

    let mut y = LOG_Y;
    for line in journal.iter() {
        Text::new(">", Point::new(COL1_X, y), JOURNAL_PROMPT_STYLE)
            .draw(display)
            .ok();
        Text::new(line, Point::new(COL1_X + 10, y), JOURNAL_TEXT_STYLE)
            .draw(display)
            .ok();
        y += LOG_LINE_HEIGHT;
    }

    if y < PREVIEW_HEIGHT as i32 {
        Text::new("> _", Point::new(COL1_X, y), JOURNAL_PROMPT_STYLE)
            .draw(display)
            .ok();
    }
}

fn draw_horizontal_line<D>(
    display: &mut D,
    y: i32,
) where
    D: DrawTarget<Color = Rgb565>,
{
    Line::new(Point::new(2, y), Point::new(PREVIEW_WIDTH as i32 - 2, y))
        .into_styled(PrimitiveStyle::with_stroke(GRAY, 1))
        .draw(display)
        .ok();
}
