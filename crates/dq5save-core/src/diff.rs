//! Byte-wise diff tracking.
//!
//! The save checksum is never recomputed, so an edited save is only valid
//! when the sum of every byte-level change across all tracked fields is zero.
//! [`DiffTracker`] keeps that running sum.

use crate::codec;
use crate::field::Field;

/// Sum of `byte_n(new) - byte_n(old)` over the low `width` bytes
pub fn byte_delta(old: u32, new: u32, width: usize) -> i64 {
    (0..width.min(codec::MAX_WIDTH))
        .map(|n| i64::from(codec::byte_at(new, n)) - i64::from(codec::byte_at(old, n)))
        .sum()
}

/// Running aggregate of byte deltas for one session
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DiffTracker {
    aggregate: i64,
}

impl DiffTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a change of `field` from `old` to `new`, returning the delta
    pub fn on_value_changed(&mut self, field: &Field, old: u32, new: u32) -> i64 {
        let delta = byte_delta(old, new, field.width());
        self.aggregate += delta;
        delta
    }

    #[cfg(test)]
    pub(crate) fn with_aggregate(aggregate: i64) -> Self {
        Self { aggregate }
    }

    pub fn aggregate(&self) -> i64 {
        self.aggregate
    }

    /// True when the edits so far keep the checksum intact
    pub fn check_zero(&self) -> bool {
        self.aggregate == 0
    }

    pub fn reset(&mut self) {
        self.aggregate = 0;
    }

    /// Recompute the aggregate from scratch over `fields`
    pub fn recompute<'a, I>(fields: I) -> i64
    where
        I: IntoIterator<Item = &'a Field>,
    {
        fields.into_iter().map(Field::delta).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::FieldKind;

    fn field(width: usize, baseline: u32) -> Field {
        let mut f = Field::new(0, width, FieldKind::Plain).unwrap();
        f.set_current(baseline).unwrap();
        f.mark_baseline();
        f
    }

    fn edit(tracker: &mut DiffTracker, f: &mut Field, value: u32) -> i64 {
        let old = f.set_current(value).unwrap();
        tracker.on_value_changed(f, old, value)
    }

    #[test]
    fn test_byte_delta() {
        assert_eq!(byte_delta(0x10, 0x20, 4), 16);
        assert_eq!(byte_delta(0x00FF, 0x0100, 2), -254);
        // bytes above the width are ignored
        assert_eq!(byte_delta(0x0100, 0x0000, 1), 0);
    }

    #[test]
    fn test_opposite_edits_cancel() {
        let mut tracker = DiffTracker::new();
        let mut a = field(1, 0x05);
        let mut b = field(1, 0x0A);

        assert_eq!(edit(&mut tracker, &mut a, 0x06), 1);
        assert!(!tracker.check_zero());
        assert_eq!(edit(&mut tracker, &mut b, 0x09), -1);

        assert_eq!(tracker.aggregate(), 0);
        assert!(tracker.check_zero());
    }

    #[test]
    fn test_incremental_matches_recompute() {
        let mut tracker = DiffTracker::new();
        let mut a = field(4, 0x0000_0010);
        let mut b = field(2, 0x1234);

        edit(&mut tracker, &mut a, 0x0000_0020);
        assert_eq!(tracker.aggregate(), 16);
        edit(&mut tracker, &mut b, 0x00FF);
        edit(&mut tracker, &mut a, 0x0102_0304);
        edit(&mut tracker, &mut b, 0x1233);

        assert_eq!(tracker.aggregate(), DiffTracker::recompute([&a, &b]));
    }

    #[test]
    fn test_reset() {
        let mut tracker = DiffTracker::new();
        let mut a = field(1, 3);
        edit(&mut tracker, &mut a, 9);
        tracker.reset();
        assert!(tracker.check_zero());
    }
}
