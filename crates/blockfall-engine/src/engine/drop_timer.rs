use std::time::{Duration, Instant};

/// Repeating auto-drop timer.
///
/// The timer does not own a thread or callback. The host event loop asks for the
/// [`deadline`](Self::deadline) to know how long it may sleep, then calls
/// [`poll`](Self::poll), which reports at most one firing per call.
///
/// The period is fixed when the timer is armed. Re-arm it whenever the drop speed may
/// have changed; cancel it whenever drops must stop.
#[derive(Debug, Clone, Default)]
pub struct DropTimer {
    schedule: Option<Schedule>,
}

#[derive(Debug, Clone, Copy)]
struct Schedule {
    period: Duration,
    deadline: Instant,
}

impl DropTimer {
    /// Creates a disarmed timer.
    #[must_use]
    pub const fn new() -> Self {
        Self { schedule: None }
    }

    /// Arms (or re-arms) the timer to fire every `period`, first at `now + period`.
    pub fn arm(&mut self, now: Instant, period: Duration) {
        tracing::trace!(?period, "drop timer armed");
        self.schedule = Some(Schedule {
            period,
            deadline: now + period,
        });
    }

    /// Disarms the timer. Polling a cancelled timer never fires.
    pub fn cancel(&mut self) {
        if self.schedule.take().is_some() {
            tracing::trace!("drop timer cancelled");
        }
    }

    #[must_use]
    pub fn is_armed(&self) -> bool {
        self.schedule.is_some()
    }

    #[must_use]
    pub fn period(&self) -> Option<Duration> {
        self.schedule.map(|s| s.period)
    }

    #[must_use]
    pub fn deadline(&self) -> Option<Instant> {
        self.schedule.map(|s| s.deadline)
    }

    /// Returns `true` if the timer was due at `now`, and schedules the next firing.
    ///
    /// Missed periods are not replayed: if the host fell behind by several periods,
    /// the next deadline is counted from `now`.
    pub fn poll(&mut self, now: Instant) -> bool {
        let Some(schedule) = &mut self.schedule else {
            return false;
        };
        if now < schedule.deadline {
            return false;
        }
        schedule.deadline += schedule.period;
        if schedule.deadline <= now {
            schedule.deadline = now + schedule.period;
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECOND: Duration = Duration::from_secs(1);

    #[test]
    fn test_disarmed_timer_never_fires() {
        let mut timer = DropTimer::new();
        let now = Instant::now();
        assert!(!timer.is_armed());
        assert!(!timer.poll(now + SECOND * 100));
        assert_eq!(timer.deadline(), None);
    }

    #[test]
    fn test_fires_once_per_period() {
        let start = Instant::now();
        let mut timer = DropTimer::new();
        timer.arm(start, SECOND);

        assert!(!timer.poll(start));
        assert!(!timer.poll(start + SECOND / 2));
        assert!(timer.poll(start + SECOND));
        assert!(!timer.poll(start + SECOND));
        assert_eq!(timer.deadline(), Some(start + SECOND * 2));
        assert!(timer.poll(start + SECOND * 2));
    }

    #[test]
    fn test_late_poll_does_not_replay_missed_periods() {
        let start = Instant::now();
        let mut timer = DropTimer::new();
        timer.arm(start, SECOND);

        let late = start + SECOND * 5 + SECOND / 2;
        assert!(timer.poll(late));
        assert!(!timer.poll(late));
        assert_eq!(timer.deadline(), Some(late + SECOND));
    }

    #[test]
    fn test_cancel_stops_firing() {
        let start = Instant::now();
        let mut timer = DropTimer::new();
        timer.arm(start, SECOND);
        timer.cancel();

        assert!(!timer.is_armed());
        assert!(!timer.poll(start + SECOND * 3));
    }

    #[test]
    fn test_rearm_replaces_period() {
        let start = Instant::now();
        let mut timer = DropTimer::new();
        timer.arm(start, SECOND);
        timer.arm(start + SECOND / 2, SECOND / 4);

        assert_eq!(timer.period(), Some(SECOND / 4));
        assert_eq!(timer.deadline(), Some(start + SECOND * 3 / 4));
        assert!(timer.poll(start + SECOND * 3 / 4));
    }
}
