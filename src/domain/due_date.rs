//! Due dates are stored as epoch seconds. Screens and date pickers speak epoch
//! milliseconds; these helpers are the only place the factor of 1000 lives.

use chrono::Utc;

const MILLIS_PER_SECOND: i64 = 1000;

/// Truncates toward zero, like integer division on the UI side.
pub fn millis_to_seconds(millis: i64) -> i64 {
    millis / MILLIS_PER_SECOND
}

pub fn seconds_to_millis(seconds: i64) -> i64 {
    seconds.saturating_mul(MILLIS_PER_SECOND)
}

pub fn now_epoch_seconds() -> i64 {
    Utc::now().timestamp()
}
