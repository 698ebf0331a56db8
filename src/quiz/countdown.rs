/// Cadence of the quiz timer, in seconds.
pub const TICK_SECS: f64 = 1.0;

/// One-second ticker driven by the UI clock.
///
/// The ticker never calls back on its own: the owner polls it with the current
/// time and applies whatever ticks are due. Once cancelled it never reports a
/// tick again, so a dropped or finished quiz cannot be mutated by a late poll.
#[derive(Debug, Clone, PartialEq)]
pub struct Countdown {
    started_at: f64,
    delivered: u64,
    cancelled: bool,
}

impl Countdown {
    pub fn start(now: f64) -> Self {
        Self {
            started_at: now,
            delivered: 0,
            cancelled: false,
        }
    }

    /// Number of whole ticks elapsed since the last poll.
    pub fn due_ticks(&mut self, now: f64) -> u64 {
        if self.cancelled {
            return 0;
        }
        let elapsed = now - self.started_at;
        // also rejects NaN and a clock that went backwards
        if !(elapsed >= TICK_SECS) {
            return 0;
        }
        let total = (elapsed / TICK_SECS).floor() as u64;
        let due = total.saturating_sub(self.delivered);
        self.delivered = self.delivered.max(total);
        due
    }

    /// Seconds until the next tick, used to schedule a repaint.
    pub fn until_next_tick(&self, now: f64) -> f64 {
        let next = self.started_at + (self.delivered + 1) as f64 * TICK_SECS;
        (next - now).clamp(0.0, TICK_SECS)
    }

    pub fn cancel(&mut self) {
        self.cancelled = true;
    }
}
