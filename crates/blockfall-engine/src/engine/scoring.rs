//! Scoring, level and drop-speed rules.
//!
//! Everything here is a pure function of the lock result or of the elapsed play
//! time, so callers can evaluate it at any instant without tracking running totals.

use std::time::Duration;

/// Score values for line clears.
///
/// Index corresponds to number of lines cleared by one lock:
/// - 0 lines: 0 points
/// - 1 line: 100 points
/// - 2 lines: 300 points
/// - 3 lines: 500 points
/// - 4 lines: 800 points
pub const LINE_SCORE_TABLE: [u64; 5] = [0, 100, 300, 500, 800];

/// Bonus per combo step, applied on locks that clear at least one line.
pub const COMBO_BONUS: u64 = 50;

/// Points accrued per whole second of play.
pub const TIME_SCORE_PER_SECOND: u64 = 10;

/// Auto-drop interval at the start of a session.
pub const INITIAL_DROP_INTERVAL: Duration = Duration::from_millis(1000);

/// Length of one speed epoch; the level also advances once per epoch.
pub const SPEED_INCREASE_INTERVAL: Duration = Duration::from_secs(30);

/// Factor applied to the drop interval for every elapsed epoch.
pub const SPEED_MULTIPLIER: f64 = 0.85;

/// Smallest representable drop interval.
///
/// The formula itself has no floor; this only keeps the interval strictly positive
/// once `0.85^n` falls below one nanosecond.
pub const MIN_DROP_INTERVAL: Duration = Duration::from_nanos(1);

/// Returns the points for a lock that cleared `lines_cleared` rows.
///
/// `combo` is the combo counter *before* this lock. The combo bonus is only paid when
/// the lock clears at least one line.
///
/// ```
/// use blockfall_engine::scoring::line_score;
///
/// assert_eq!(line_score(4, 0), 800);
/// assert_eq!(line_score(1, 3), 250);
/// assert_eq!(line_score(0, 5), 0);
/// ```
#[must_use]
pub fn line_score(lines_cleared: usize, combo: u32) -> u64 {
    if lines_cleared == 0 {
        return 0;
    }
    let base = LINE_SCORE_TABLE.get(lines_cleared).copied().unwrap_or(0);
    base + u64::from(combo) * COMBO_BONUS
}

/// Returns the time component of the score: 10 points per whole elapsed second.
#[must_use]
pub fn time_score(elapsed: Duration) -> u64 {
    elapsed.as_secs().saturating_mul(TIME_SCORE_PER_SECOND)
}

/// Returns the 0-based level: one level per 30 elapsed seconds.
#[must_use]
pub fn level(elapsed: Duration) -> u32 {
    u32::try_from(elapsed.as_millis() / SPEED_INCREASE_INTERVAL.as_millis()).unwrap_or(u32::MAX)
}

/// Returns the interval between automatic descents after `elapsed` play time.
///
/// `INITIAL_DROP_INTERVAL × SPEED_MULTIPLIER ^ floor(elapsed / SPEED_INCREASE_INTERVAL)`.
#[must_use]
pub fn drop_interval(elapsed: Duration) -> Duration {
    let epochs = i32::try_from(level(elapsed)).unwrap_or(i32::MAX);
    INITIAL_DROP_INTERVAL
        .mul_f64(SPEED_MULTIPLIER.powi(epochs))
        .max(MIN_DROP_INTERVAL)
}
