use web_time::Instant;

/// Pause-aware play clock.
///
/// The clock never samples time on its own; every operation takes the caller's
/// `now`, so elapsed time is a pure function of the instants fed in. Freezing
/// pins the elapsed value; unfreezing shifts `started_at` forward by the
/// frozen duration so the gap never counts toward play time.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct PlayClock {
    started_at: Instant,
    frozen_at: Option<Instant>,
}

impl PlayClock {
    pub fn start(now: Instant) -> Self {
        Self {
            started_at: now,
            frozen_at: None,
        }
    }

    pub fn is_frozen(&self) -> bool {
        self.frozen_at.is_some()
    }

    /// Pins the elapsed value at `now`. Idempotent while frozen.
    pub fn freeze(&mut self, now: Instant) {
        if self.frozen_at.is_none() {
            self.frozen_at = Some(now);
        }
    }

    pub fn unfreeze(&mut self, now: Instant) {
        if let Some(frozen_at) = self.frozen_at.take() {
            self.started_at += now.saturating_duration_since(frozen_at);
        }
    }

    /// Whole elapsed seconds of active play at `now`. While frozen, `now` is
    /// ignored in favor of the freeze instant.
    pub fn elapsed_secs(&self, now: Instant) -> u64 {
        let reference = self.frozen_at.unwrap_or(now);
        reference.saturating_duration_since(self.started_at).as_secs()
    }

    /// The pinned elapsed seconds, if the clock is frozen.
    pub fn frozen_secs(&self) -> Option<u64> {
        self.frozen_at.map(|at| self.elapsed_secs(at))
    }
}
