use time::{Duration, OffsetDateTime};

use crate::error::Error;
use crate::window::TimeWindow;

/// Partition `window` into one timestamp per effort, proportionally.
///
/// Every index but the last receives `floor(total_seconds * effort /
/// total_effort)` seconds, clamped to the remaining budget; the last index
/// absorbs the rounding remainder, so the deltas sum to the window span
/// exactly and the final timestamp equals the window end exactly. All-zero
/// efforts degenerate to equal weights; a zero effort next to positive ones
/// keeps its zero-width slice (a duplicate timestamp).
pub fn allocate(window: &TimeWindow, efforts: &[i64]) -> Result<Vec<OffsetDateTime>, Error> {
    if efforts.is_empty() {
        return Err(Error::NoEfforts);
    }
    if let Some(&bad) = efforts.iter().find(|&&e| e < 0) {
        return Err(Error::NegativeEffort(bad));
    }

    let total_seconds = window.total_seconds();
    if total_seconds <= 0 {
        return Err(Error::Window);
    }

    let mut total_effort: i64 = efforts.iter().sum();
    let uniform = total_effort == 0;
    if uniform {
        total_effort = efforts.len() as i64;
    }

    let mut times = Vec::with_capacity(efforts.len());
    let mut elapsed: i64 = 0;
    for (i, &effort) in efforts.iter().enumerate() {
        let remaining = total_seconds - elapsed;
        let seconds = if i == efforts.len() - 1 {
            remaining
        } else {
            let weight = if uniform { 1 } else { effort };
            let share = i128::from(total_seconds) * i128::from(weight) / i128::from(total_effort);
            (share as i64).min(remaining)
        };
        elapsed += seconds;
        times.push(window.start() + Duration::seconds(elapsed));
    }
    Ok(times)
}
