use core::ops::Range;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TrackerError {
    #[error("Cannot build a tracker over an empty array")]
    Empty,

    #[error("Index {index} out of bounds for array of length {len}")]
    IndexOutOfBounds { index: usize, len: usize },
}

#[derive(Clone, Copy, Debug)]
struct Node {
    min: i64,
    max: i64,
    /// Value at the leftmost index of the covered range.
    first: i64,
    /// Value at the rightmost index of the covered range.
    last: i64,
    /// Whether the covered subarray is non-decreasing.
    sorted: bool,
}

impl Node {
    fn leaf(value: i64) -> Self {
        Self {
            min: value,
            max: value,
            first: value,
            last: value,
            sorted: true,
        }
    }

    fn merge(left: &Self, right: &Self) -> Self {
        Self {
            min: left.min.min(right.min),
            max: left.max.max(right.max),
            first: left.first,
            last: right.last,
            sorted: left.sorted && right.sorted && left.last <= right.first,
        }
    }
}

/// Tracks, under point updates, the minimal contiguous index range that has to change for the
/// whole array to become non-decreasing.
///
/// Indices are 0-based. `update` and `violation_span` both cost `O(log n)` (the span query runs
/// one extra tree search per expansion round, and rounds are bounded by the number of unsorted
/// runs).
pub struct OrderTracker {
    // Heap layout: root at 1, children of `v` at `2v` and `2v + 1`. Node ranges are implicit in
    // the recursion; only the aggregates are stored.
    nodes: Vec<Node>,
    len: usize,
}

impl OrderTracker {
    pub fn new(values: &[i64]) -> Result<Self, TrackerError> {
        if values.is_empty() {
            return Err(TrackerError::Empty);
        }
        let mut tracker = Self {
            nodes: vec![Node::leaf(0); 4 * values.len()],
            len: values.len(),
        };
        tracker.build(1, 0..values.len(), values);
        Ok(tracker)
    }

    pub fn len(&self) -> usize {
        self.len
    }

    /// Overwrites the element at `index`, recomputing aggregates on the root path only.
    pub fn update(&mut self, index: usize, value: i64) -> Result<(), TrackerError> {
        if index >= self.len {
            return Err(TrackerError::IndexOutOfBounds {
                index,
                len: self.len,
            });
        }
        self.update_at(1, 0..self.len, index, value);
        Ok(())
    }

    /// Returns the minimal inclusive range containing every position responsible for the array
    /// not being sorted, or `None` if the array is already non-decreasing.
    ///
    /// The result is a fixed point: starting from the narrowest adjacent-pair violation found by
    /// tree descent, the range grows leftward past any value above the range minimum and
    /// rightward past any value below the range maximum, until neither side moves.
    pub fn violation_span(&self) -> Option<(usize, usize)> {
        if self.nodes[1].sorted {
            return None;
        }
        let mut lo = self.first_break(1, 0..self.len);
        let mut hi = self.last_break(1, 0..self.len);
        loop {
            let (mn, mx) = self
                .extremes(1, 0..self.len, lo..hi + 1)
                .expect("witness range is nonempty");
            let mut grew = false;
            if let Some(p) = self.rightmost_above(1, 0..self.len, lo, mn) {
                lo = p;
                grew = true;
            }
            if let Some(q) = self.leftmost_below(1, 0..self.len, hi + 1, mx) {
                hi = q;
                grew = true;
            }
            if !grew {
                return Some((lo, hi));
            }
        }
    }

    pub fn min_in(&self, range: Range<usize>) -> Option<i64> {
        self.extremes(1, 0..self.len, range).map(|(mn, _)| mn)
    }

    pub fn max_in(&self, range: Range<usize>) -> Option<i64> {
        self.extremes(1, 0..self.len, range).map(|(_, mx)| mx)
    }

    fn build(&mut self, v: usize, range: Range<usize>, values: &[i64]) {
        if range.end - range.start == 1 {
            self.nodes[v] = Node::leaf(values[range.start]);
            return;
        }
        let mid = range.start.midpoint(range.end);
        self.build(2 * v, range.start..mid, values);
        self.build(2 * v + 1, mid..range.end, values);
        self.nodes[v] = Node::merge(&self.nodes[2 * v], &self.nodes[2 * v + 1]);
    }

    fn update_at(&mut self, v: usize, range: Range<usize>, index: usize, value: i64) {
        if range.end - range.start == 1 {
            self.nodes[v] = Node::leaf(value);
            return;
        }
        let mid = range.start.midpoint(range.end);
        if index < mid {
            self.update_at(2 * v, range.start..mid, index, value);
        } else {
            self.update_at(2 * v + 1, mid..range.end, index, value);
        }
        self.nodes[v] = Node::merge(&self.nodes[2 * v], &self.nodes[2 * v + 1]);
    }

    /// `(min, max)` over the intersection of the node's range with `query`, or `None` if they are
    /// disjoint.
    fn extremes(&self, v: usize, node: Range<usize>, query: Range<usize>) -> Option<(i64, i64)> {
        if query.end <= node.start || node.end <= query.start {
            return None;
        }
        if query.start <= node.start && node.end <= query.end {
            return Some((self.nodes[v].min, self.nodes[v].max));
        }
        let mid = node.start.midpoint(node.end);
        let left = self.extremes(2 * v, node.start..mid, query.clone());
        let right = self.extremes(2 * v + 1, mid..node.end, query);
        match (left, right) {
            (Some((a, b)), Some((c, d))) => Some((a.min(c), b.max(d))),
            (left, right) => left.or(right),
        }
    }

    // The descent below must only be entered on unsorted nodes: if the left child is unsorted the
    // leftmost break is inside it, else if the child boundary decreases the break is exactly
    // there, else the right child holds it.

    /// Index of the left element of the leftmost adjacent pair violating non-decreasing order.
    fn first_break(&self, v: usize, range: Range<usize>) -> usize {
        if range.end - range.start == 1 {
            return range.start;
        }
        let mid = range.start.midpoint(range.end);
        if !self.nodes[2 * v].sorted {
            self.first_break(2 * v, range.start..mid)
        } else if self.nodes[2 * v].last > self.nodes[2 * v + 1].first {
            mid - 1
        } else {
            self.first_break(2 * v + 1, mid..range.end)
        }
    }

    /// Index of the right element of the rightmost violating adjacent pair.
    fn last_break(&self, v: usize, range: Range<usize>) -> usize {
        if range.end - range.start == 1 {
            return range.start;
        }
        let mid = range.start.midpoint(range.end);
        if !self.nodes[2 * v + 1].sorted {
            self.last_break(2 * v + 1, mid..range.end)
        } else if self.nodes[2 * v].last > self.nodes[2 * v + 1].first {
            mid
        } else {
            self.last_break(2 * v, range.start..mid)
        }
    }

    /// Rightmost index in `[0, limit)` holding a value strictly greater than `threshold`.
    ///
    /// Right child first, so the first leaf reached is the farthest qualifying one; subtrees with
    /// `max <= threshold` contain no candidate and are pruned whole.
    fn rightmost_above(
        &self,
        v: usize,
        range: Range<usize>,
        limit: usize,
        threshold: i64,
    ) -> Option<usize> {
        if range.start >= limit || self.nodes[v].max <= threshold {
            return None;
        }
        if range.end - range.start == 1 {
            return Some(range.start);
        }
        let mid = range.start.midpoint(range.end);
        self.rightmost_above(2 * v + 1, mid..range.end, limit, threshold)
            .or_else(|| self.rightmost_above(2 * v, range.start..mid, limit, threshold))
    }

    /// Leftmost index in `[start, n)` holding a value strictly less than `threshold`. Mirror of
    /// `rightmost_above`: left child first, pruning on `min >= threshold`.
    fn leftmost_below(
        &self,
        v: usize,
        range: Range<usize>,
        start: usize,
        threshold: i64,
    ) -> Option<usize> {
        if range.end <= start || self.nodes[v].min >= threshold {
            return None;
        }
        if range.end - range.start == 1 {
            return Some(range.start);
        }
        let mid = range.start.midpoint(range.end);
        self.leftmost_below(2 * v, range.start..mid, start, threshold)
            .or_else(|| self.leftmost_below(2 * v + 1, mid..range.end, start, threshold))
    }
}
