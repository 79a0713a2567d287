//! Frame clock, cancellation tokens, and the wall-clock interval timer.
//!
//! # Frame Clock
//!
//! The active step's render loop is driven by ticks. [`FrameClock::start`]
//! hands out an [`AnimationLoop`] bound to the clock's current generation.
//! Every transition bumps the generation with [`FrameClock::cancel`], which
//! turns every previously issued loop stale:
//!
//! ```ignore
//! let mut clock = FrameClock::new();
//! let mut anim = clock.start();
//! assert_eq!(anim.advance(&clock), Some(0));
//! assert_eq!(anim.advance(&clock), Some(1));
//!
//! clock.cancel();
//! assert_eq!(anim.advance(&clock), None); // stale, silently ignored
//! ```
//!
//! Liveness is decided only by the token. Step titles play no part, so two
//! flows may reuse a title without one loop keeping the other alive.
//!
//! # Interval Timer
//!
//! Countdowns such as hold-to-shutdown run on wall-clock time, independent of
//! the tick rate. [`IntervalTimer`] is polled by the host loop with the current
//! `Instant` and reports when its period has elapsed. Cancelling drops the
//! schedule entirely, so a cancelled timer can never fire again.

use std::time::{Duration, Instant};

// =============================================================================
// Cancellation Token
// =============================================================================

/// Generation stamp identifying one started loop.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct CancelToken(u64);

// =============================================================================
// Frame Clock
// =============================================================================

/// Source of animation loops. Owns the current generation.
#[derive(Debug, Default)]
pub struct FrameClock {
    generation: u64,
}

impl FrameClock {
    pub const fn new() -> Self { Self { generation: 0 } }

    /// Start a new loop. Any loop started earlier becomes stale.
    pub const fn start(&mut self) -> AnimationLoop {
        self.generation = self.generation.wrapping_add(1);
        AnimationLoop {
            token: CancelToken(self.generation),
            next_tick: 0,
        }
    }

    /// Invalidate every outstanding loop.
    pub const fn cancel(&mut self) { self.generation = self.generation.wrapping_add(1); }

    /// Whether `token` belongs to the most recently started, uncancelled loop.
    #[inline]
    pub const fn is_current(&self, token: CancelToken) -> bool { token.0 == self.generation }
}

/// Tick counter of one running loop.
#[derive(Debug)]
pub struct AnimationLoop {
    token: CancelToken,
    next_tick: u32,
}

impl AnimationLoop {
    /// Produce the next tick, or `None` once the loop has been cancelled.
    ///
    /// Ticks start at 0 and increase by one per call. A stale loop does not
    /// advance, so it stays stale and silent.
    pub const fn advance(&mut self, clock: &FrameClock) -> Option<u32> {
        if !clock.is_current(self.token) {
            return None;
        }
        let tick = self.next_tick;
        self.next_tick = self.next_tick.saturating_add(1);
        Some(tick)
    }

    /// Token this loop was started with.
    #[inline]
    pub const fn token(&self) -> CancelToken { self.token }
}

// =============================================================================
// Interval Timer
// =============================================================================

/// Polled wall-clock interval.
#[derive(Debug)]
pub struct IntervalTimer {
    period: Duration,
    next_due: Option<Instant>,
}

impl IntervalTimer {
    pub const fn new(period: Duration) -> Self {
        Self {
            period,
            next_due: None,
        }
    }

    /// Arm the timer. The first firing is one period after `now`.
    pub fn start(
        &mut self,
        now: Instant,
    ) {
        self.next_due = Some(now + self.period);
    }

    /// Disarm the timer. A cancelled timer never fires.
    pub const fn cancel(&mut self) { self.next_due = None; }

    #[inline]
    pub const fn is_active(&self) -> bool { self.next_due.is_some() }

    /// Returns `true` when a period has elapsed since the last firing.
    ///
    /// Missed periods are coalesced into one firing; the next one is
    /// scheduled a full period after `now`.
    pub fn poll(
        &mut self,
        now: Instant,
    ) -> bool {
        match self.next_due {
            Some(due) if now >= due => {
                self.next_due = Some(now + self.period);
                true
            }
            _ => false,
        }
    }
}
