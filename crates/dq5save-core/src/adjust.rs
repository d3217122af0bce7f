//! Diff adjustment.
//!
//! Rewrites a single field so the aggregate moves toward zero. This is a
//! best-effort nudge, not a solver: one pass may leave a non-zero aggregate,
//! and callers re-check [`DiffTracker::check_zero`] afterwards.
//!
//! Both the field's bytes and the aggregate are snapshotted once. Every byte
//! position compares against the same snapshot, so amounts are not carried
//! from one position to the next.

use crate::codec;
use crate::diff::DiffTracker;
use crate::error::Result;
use crate::field::Field;

/// Successive values the field takes while adjusting `diff`.
///
/// Only value changes are listed; an empty plan means nothing to do.
pub fn plan(current: u32, width: usize, diff: i64) -> Vec<u32> {
    let width = width.min(codec::MAX_WIDTH);
    let snapshot = current.to_le_bytes();
    let mut value = u64::from(current);
    let mut steps = Vec::new();

    if diff > 0 {
        for (i, &b) in snapshot.iter().enumerate().take(width) {
            let amount = if i64::from(b) > diff {
                diff as u64
            } else {
                u64::from(b)
            };
            let next = value.saturating_sub(amount * u64::from(codec::place_value(i)));
            if next != value {
                value = next;
                steps.push(value as u32);
            }
        }
    } else if diff < 0 {
        let max = u64::from(codec::max_value(width));
        let need = diff.unsigned_abs();
        for (i, &b) in snapshot.iter().enumerate().take(width) {
            let headroom = u64::from(u8::MAX - b);
            let delta = need.min(headroom) * u64::from(codec::place_value(i));
            if value + delta < max {
                if delta != 0 {
                    value += delta;
                    steps.push(value as u32);
                }
            } else {
                if value != max {
                    value = max;
                    steps.push(value as u32);
                }
                break;
            }
        }
    }

    steps
}

/// Adjust `field` against `tracker`, reporting every write to the tracker.
///
/// Returns the aggregate after adjustment.
pub fn apply(field: &mut Field, tracker: &mut DiffTracker) -> Result<i64> {
    for value in plan(field.current(), field.width(), tracker.aggregate()) {
        let old = field.set_current(value)?;
        tracker.on_value_changed(field, old, value);
    }
    Ok(tracker.aggregate())
}
