//! Frame timing and redraw counters for the preview window.
//!
//! The journal page shows these next to the transition journal so the
//! frame pacing and the chrome's dirty tracking can be checked at a glance.
//!
//! # Usage
//!
//! ```ignore
//! let mut metrics = FrameMetrics::new();
//!
//! // In the main loop:
//! let frame_start = Instant::now();
//! if navigator.tick(&mut lcd) {
//!     metrics.inc_lcd_frames();
//! }
//! let render_time = frame_start.elapsed();
//! // ... sleep ...
//! metrics.record_frame(frame_start.elapsed(), render_time, sleep_time);
//! ```

use std::time::{Duration, Instant};

use heapless::String;

/// Frame timing and render statistics.
#[derive(Debug)]
pub struct FrameMetrics {
    /// Total frame time (render + sleep + overhead)
    pub frame_time_us: u32,
    /// Time spent drawing the LCD and chrome
    pub render_time_us: u32,
    /// Time spent sleeping to hold the tick rate
    pub sleep_time_us: u32,

    pub frame_time_min_us: u32,
    pub frame_time_max_us: u32,
    /// Exponential moving average of the frame time
    frame_time_avg_us: f32,

    /// Window frames since startup
    pub total_frames: u64,
    /// Frames in which the active step drew the LCD
    pub lcd_frames: u32,
    /// Chrome redraws (header, title, explanation, controls)
    pub chrome_redraws: u32,
    /// LED widget repaints
    pub led_redraws: u32,

    start_time: Instant,
}

impl FrameMetrics {
    /// Start the uptime clock.
    pub fn new() -> Self {
        Self {
            frame_time_us: 0,
            render_time_us: 0,
            sleep_time_us: 0,
            frame_time_min_us: u32::MAX,
            frame_time_max_us: 0,
            frame_time_avg_us: 0.0,
            total_frames: 0,
            lcd_frames: 0,
            chrome_redraws: 0,
            led_redraws: 0,
            start_time: Instant::now(),
        }
    }

    const EMA_ALPHA: f32 = 0.1;

    pub fn record_frame(&mut self, total_time: Duration, render_time: Duration, sleep_time: Duration) {
        let total_us = total_time.as_micros() as u32;

        self.frame_time_us = total_us;
        self.render_time_us = render_time.as_micros() as u32;
        self.sleep_time_us = sleep_time.as_micros() as u32;

        self.frame_time_min_us = self.frame_time_min_us.min(total_us);
        self.frame_time_max_us = self.frame_time_max_us.max(total_us);

        self.frame_time_avg_us = if self.total_frames == 0 {
            total_us as f32
        } else {
            Self::EMA_ALPHA.mul_add(total_us as f32, (1.0 - Self::EMA_ALPHA) * self.frame_time_avg_us)
        };

        self.total_frames += 1;
    }

    #[inline]
    pub const fn frame_time_avg_us(&self) -> u32 { self.frame_time_avg_us as u32 }

    /// Frames per second implied by the average frame time.
    pub fn fps(&self) -> f32 {
        if self.frame_time_avg_us <= 0.0 { 0.0 } else { 1_000_000.0 / self.frame_time_avg_us }
    }

    #[inline]
    pub fn uptime(&self) -> Duration { self.start_time.elapsed() }

    /// Uptime as `HH:MM:SS`.
    pub fn uptime_string(&self) -> String<12> { format_hms(self.uptime().as_secs()) }

    #[inline]
    pub const fn inc_lcd_frames(&mut self) { self.lcd_frames += 1; }

    #[inline]
    pub const fn inc_chrome_redraws(&mut self) { self.chrome_redraws += 1; }

    #[inline]
    pub const fn inc_led_redraws(&mut self) { self.led_redraws += 1; }
}

impl Default for FrameMetrics {
    fn default() -> Self { Self::new() }
}

/// `secs` as zero-padded `HH:MM:SS`.
fn format_hms(secs: u64) -> String<12> {
    let hours = secs / 3600;
    let mins = (secs % 3600) / 60;
    let secs = secs % 60;

    let mut s = String::new();
    for (i, part) in [hours, mins, secs].into_iter().enumerate() {
        if i > 0 {
            s.push(':').ok();
        }
        if part < 10 {
            s.push('0').ok();
        }
        push_u32(&mut s, part as u32);
    }
    s
}

/// Push a u32 value to a heapless string without the formatting machinery.
pub fn push_u32<const N: usize>(s: &mut String<N>, mut val: u32) {
    if val == 0 {
        s.push('0').ok();
        return;
    }

    let mut digits = [0u8; 10];
    let mut i = 0;
    while val > 0 {
        digits[i] = (val % 10) as u8;
        val /= 10;
        i += 1;
    }

    while i > 0 {
        i -= 1;
        s.push((b'0' + digits[i]) as char).ok();
    }
}
