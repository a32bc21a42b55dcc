use std::time::{Duration, Instant};

/// The game's single countdown timer.
///
/// Holds at most one pending deadline. Time is always passed in, so callers
/// (and tests) decide what "now" is.
#[derive(Debug, Clone)]
pub struct Ticker {
    period: Duration,
    deadline: Option<Instant>,
}

impl Ticker {
    #[must_use]
    pub fn new(period: Duration) -> Self {
        Self {
            period,
            deadline: None,
        }
    }

    #[must_use]
    pub fn period(&self) -> Duration {
        self.period
    }

    #[must_use]
    pub fn is_armed(&self) -> bool {
        self.deadline.is_some()
    }

    /// Schedule the next tick one period from `now` unless one is pending.
    pub fn ensure_armed(&mut self, now: Instant) {
        if self.deadline.is_none() {
            self.deadline = Some(now + self.period);
        }
    }

    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    /// Count the ticks that fell due by `now` and move the deadline past
    /// them. The deadline advances in whole periods so it never drifts;
    /// when the backlog is too large to count, it is re-armed from `now`.
    pub fn take_due(&mut self, now: Instant) -> u32 {
        let Some(deadline) = self.deadline else {
            return 0;
        };
        if now < deadline || self.period.is_zero() {
            return 0;
        }
        let overdue = now.duration_since(deadline);
        let extra = u32::try_from(overdue.as_nanos() / self.period.as_nanos()).unwrap_or(u32::MAX - 1);
        let due = extra + 1;
        let next = self
            .period
            .checked_mul(due)
            .and_then(|step| deadline.checked_add(step))
            .filter(|next| *next > now);
        self.deadline = Some(next.unwrap_or(now + self.period));
        due
    }

    #[must_use]
    pub fn time_until(&self, now: Instant) -> Option<Duration> {
        self.deadline
            .map(|deadline| deadline.saturating_duration_since(now))
    }
}
