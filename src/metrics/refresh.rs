/// Shortest allowed refresh interval (ms).
pub const INTERVAL_MIN_MS: u64 = 30_000;
/// Longest allowed refresh interval (ms).
pub const INTERVAL_MAX_MS: u64 = 60_000;
/// Granularity of the interval setting (ms).
pub const INTERVAL_STEP_MS: u64 = 5_000;

/// Real-time refresh countdown.
///
/// Time is supplied by the caller as monotonic milliseconds, so the timer
/// is equally usable from a live event loop and from tests.
///
/// # Examples
///
/// ```
/// use gridview::metrics::refresh::RefreshTimer;
///
/// let mut timer = RefreshTimer::new(30_000, true, 0);
/// assert!(!timer.due(29_999));
/// assert!(timer.due(30_000));
/// timer.fired(30_000);
/// assert!(!timer.due(45_000));
/// ```
#[derive(Debug, Clone)]
pub struct RefreshTimer {
    interval_ms: u64,
    real_time: bool,
    last_fire_ms: u64,
}

impl RefreshTimer {
    /// Creates a timer whose countdown starts at `now_ms`.
    ///
    /// The interval is snapped onto the allowed grid.
    pub fn new(interval_ms: u64, real_time: bool, now_ms: u64) -> Self {
        Self {
            interval_ms: snap_interval(interval_ms),
            real_time,
            last_fire_ms: now_ms,
        }
    }

    pub fn interval_ms(&self) -> u64 {
        self.interval_ms
    }

    pub fn is_real_time(&self) -> bool {
        self.real_time
    }

    /// Returns `true` when real-time mode is on and a full interval has
    /// elapsed since the last fire.
    pub fn due(&self, now_ms: u64) -> bool {
        self.real_time && now_ms.saturating_sub(self.last_fire_ms) >= self.interval_ms
    }

    /// Records a refresh at `now_ms`, restarting the countdown.
    pub fn fired(&mut self, now_ms: u64) {
        self.last_fire_ms = now_ms;
    }

    /// Milliseconds until the next refresh, or `None` while paused.
    pub fn remaining_ms(&self, now_ms: u64) -> Option<u64> {
        if !self.real_time {
            return None;
        }
        let elapsed = now_ms.saturating_sub(self.last_fire_ms);
        Some(self.interval_ms.saturating_sub(elapsed))
    }

    /// Switches real-time mode; turning it on restarts the countdown.
    pub fn set_real_time(&mut self, on: bool, now_ms: u64) {
        if on && !self.real_time {
            self.last_fire_ms = now_ms;
        }
        self.real_time = on;
    }

    /// Sets the interval (snapped and clamped) and restarts the countdown.
    pub fn set_interval_ms(&mut self, interval_ms: u64, now_ms: u64) {
        self.interval_ms = snap_interval(interval_ms);
        self.last_fire_ms = now_ms;
    }

    /// Shortens the interval by one step.
    pub fn faster(&mut self, now_ms: u64) {
        let next = self.interval_ms.saturating_sub(INTERVAL_STEP_MS);
        self.set_interval_ms(next, now_ms);
    }

    /// Lengthens the interval by one step.
    pub fn slower(&mut self, now_ms: u64) {
        let next = self.interval_ms + INTERVAL_STEP_MS;
        self.set_interval_ms(next, now_ms);
    }
}

/// Rounds to the nearest step and clamps into the allowed range.
pub fn snap_interval(interval_ms: u64) -> u64 {
    let snapped = (interval_ms + INTERVAL_STEP_MS / 2) / INTERVAL_STEP_MS * INTERVAL_STEP_MS;
    snapped.clamp(INTERVAL_MIN_MS, INTERVAL_MAX_MS)
}

/// Fixed-period ticker for charging station updates.
///
/// Counts whole periods elapsed since the last call and carries the
/// remainder forward, so ticks are never lost or doubled.
#[derive(Debug, Clone)]
pub struct StationTicker {
    period_ms: u64,
    last_tick_ms: u64,
}

impl StationTicker {
    /// # Panics
    ///
    /// Panics if `period_ms` is zero.
    pub fn new(period_ms: u64, now_ms: u64) -> Self {
        assert!(period_ms > 0, "station tick period must be > 0");
        Self {
            period_ms,
            last_tick_ms: now_ms,
        }
    }

    pub fn period_ms(&self) -> u64 {
        self.period_ms
    }

    /// Returns how many ticks fell due up to `now_ms` and consumes them.
    pub fn poll(&mut self, now_ms: u64) -> u64 {
        let elapsed = now_ms.saturating_sub(self.last_tick_ms);
        let ticks = elapsed / self.period_ms;
        self.last_tick_ms += ticks * self.period_ms;
        ticks
    }
}
