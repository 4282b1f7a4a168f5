use std::slice::Iter;

/// Represent a range of time, from a start to an end, generally in seconds
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct TimeRange {
    start: f64,
    end: f64,
}

impl TimeRange {
    /// Returns the start time of the range
    pub(crate) fn start(&self) -> f64 {
        self.start
    }
    /// Returns the end time of the range
    pub(crate) fn end(&self) -> f64 {
        self.end
    }

    /// Returns `true` if `pos` is inside that range, with `epsilon` seconds of tolerance on both
    /// sides.
    pub(crate) fn contains(&self, pos: f64, epsilon: f64) -> bool {
        pos >= self.start() - epsilon && pos <= self.end() + epsilon
    }
}

/// Abstracts non-contiguous chronological ranges of time, generally expressed in seconds.
///
/// This is a view of what the media element reports as buffered: it is never patched, only
/// rebuilt from the latest observation.
#[derive(Clone, Debug, Default, PartialEq)]
pub(crate) struct TimeRanges {
    ranges: Vec<TimeRange>,
}

impl TimeRanges {
    /// Create a new empty `TimeRanges` object
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Build a `TimeRanges` object from `(start, end)` pairs, in any order.
    ///
    /// Empty or inverted pairs are dropped and overlapping ones are merged.
    pub(crate) fn from_pairs(pairs: &[(f64, f64)]) -> Self {
        let mut ranges = Self::new();
        for &(start, end) in pairs {
            ranges.add(start, end);
        }
        ranges
    }

    /// Add a range of time to that `TimeRanges` object, merging it with the ranges that are
    /// already there.
    pub(crate) fn add(&mut self, start: f64, end: f64) {
        // Also rejects NaN bounds
        if !(end > start) {
            return;
        }
        let insert_idx = self
            .ranges
            .iter()
            .position(|r| r.start > start)
            .unwrap_or(self.ranges.len());
        self.ranges.insert(insert_idx, TimeRange { start, end });

        let mut merged: Vec<TimeRange> = Vec::with_capacity(self.ranges.len());
        for range in self.ranges.drain(..) {
            match merged.last_mut() {
                Some(prev) if range.start <= prev.end => {
                    prev.end = f64::max(prev.end, range.end);
                }
                _ => merged.push(range),
            }
        }
        self.ranges = merged;
    }

    /// Returns the number of non-contiguous ranges in this `TimeRanges` object
    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.ranges.len()
    }

    #[cfg(test)]
    pub(crate) fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }

    /// Returns the range containing the given position, with `epsilon` seconds of tolerance.
    ///
    /// Returns `None` if no range in this `TimeRanges` object contains it.
    pub(crate) fn range_for(&self, pos: f64, epsilon: f64) -> Option<&TimeRange> {
        self.ranges.iter().find(|r| r.contains(pos, epsilon))
    }

    /// Seconds of data buffered ahead of `pos`. Never negative.
    ///
    /// When `pos` is in a gap, the first range starting after it is used as a forward-looking
    /// estimate, and if there's none, the last range is.
    pub(crate) fn buffer_ahead(&self, pos: f64, epsilon: f64) -> f64 {
        let reference = self
            .range_for(pos, epsilon)
            .or_else(|| self.ranges.iter().find(|r| r.start() > pos))
            .or_else(|| self.ranges.last());
        match reference {
            Some(range) => f64::max(range.end() - pos, 0.),
            None => 0.,
        }
    }
}

impl<'a> IntoIterator for &'a TimeRanges {
    type Item = &'a TimeRange;
    type IntoIter = Iter<'a, TimeRange>;

    fn into_iter(self) -> Self::IntoIter {
        self.ranges.iter()
    }
}
