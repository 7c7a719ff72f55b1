use core::time::Duration;
use web_time::Instant;

/// Elapsed time of the current round.
///
/// Starts on the first click of a round and freezes when the round ends.
#[derive(Copy, Clone, Debug, Default)]
pub struct RoundClock {
    started_at: Option<Instant>,
    frozen: Option<Duration>,
}

impl RoundClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_running(&self) -> bool {
        self.started_at.is_some() && self.frozen.is_none()
    }

    /// Starts the clock unless it already started this round.
    pub fn start(&mut self, now: Instant) {
        if self.started_at.is_none() {
            log::debug!("Round clock started");
            self.started_at = Some(now);
        }
    }

    /// Freezes the elapsed time at `now`; later calls keep the first value.
    pub fn stop(&mut self, now: Instant) {
        if self.frozen.is_none() {
            self.frozen = Some(self.elapsed(now));
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn elapsed(&self, now: Instant) -> Duration {
        match (self.frozen, self.started_at) {
            (Some(frozen), _) => frozen,
            (None, Some(started_at)) => now.saturating_duration_since(started_at),
            (None, None) => Duration::ZERO,
        }
    }

    /// Whole seconds, as shown to the player.
    pub fn elapsed_secs(&self, now: Instant) -> u64 {
        self.elapsed(now).as_secs()
    }
}
