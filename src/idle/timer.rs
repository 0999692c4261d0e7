//! Idle progress accrual.
//!
//! Converts elapsed wall-clock time into whole completions of a repeating
//! action plus a fractional remainder. Pure arithmetic; the caller owns
//! updating `last_tick_at` and capping extreme elapsed times.

use crate::constants::MIN_RATE_MODIFIER;

/// Result of advancing an idle timer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IdleAdvance {
    /// New fractional progress, always in [0, 1).
    pub progress: f64,
    /// Whole action cycles completed during the elapsed time.
    pub completions: u64,
}

/// Advances fractional progress by the time elapsed between `last_tick_at`
/// and `now` (millisecond timestamps).
///
/// `rate_modifier` 1.0 is normal speed; higher is faster. A rate at or below
/// zero is clamped to a small positive floor rather than rejected. Negative
/// elapsed time (clock skew) yields zero completions and unchanged progress.
/// No capping of large elapsed times happens here.
pub fn advance_idle_timer(
    progress: f64,
    last_tick_at: i64,
    now: i64,
    duration_per_completion_sec: f64,
    rate_modifier: f64,
) -> IdleAdvance {
    if duration_per_completion_sec <= 0.0 {
        return IdleAdvance {
            progress,
            completions: 0,
        };
    }

    let elapsed_seconds = ((now - last_tick_at) as f64 / 1000.0).max(0.0);
    let rate = rate_modifier.max(MIN_RATE_MODIFIER);
    let total = progress + elapsed_seconds * rate / duration_per_completion_sec;
    let completions = total.floor();
    IdleAdvance {
        progress: total - completions,
        completions: completions as u64,
    }
}
