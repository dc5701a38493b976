//! Visible range calculation

use super::height_index::HeightIndex;
use serde::Serialize;
use std::ops::Range;

/// Range of rows intersecting the viewport.
///
/// # Invariants
/// - `start <= end <= rows.len()`
/// - Every row in range has a nonempty intersection with
///   `[scroll_top, scroll_top + viewport_height)`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct VisibleRange {
    /// Index of first visible row (inclusive).
    pub start: usize,
    /// Index one past the last visible row (exclusive).
    pub end: usize,
}

impl VisibleRange {
    /// # Panics
    /// In debug builds, panics if start > end.
    pub fn new(start: usize, end: usize) -> Self {
        debug_assert!(start <= end, "start {} > end {}", start, end);
        Self { start, end }
    }

    /// Rows intersecting `[scroll_top, scroll_top + viewport_height)`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use rowview::view_state::height_index::HeightIndex;
    /// # use rowview::view_state::visible_range::VisibleRange;
    /// let index = HeightIndex::from_heights([20; 25]);
    /// assert_eq!(VisibleRange::compute(&index, 0, 200), VisibleRange::new(0, 10));
    /// assert_eq!(VisibleRange::compute(&index, 25, 200), VisibleRange::new(1, 12));
    /// ```
    pub fn compute(index: &HeightIndex, scroll_top: usize, viewport_height: usize) -> Self {
        let start = index.index_at(scroll_top);
        if viewport_height == 0 {
            return Self::new(start, start);
        }
        let bottom = scroll_top.saturating_add(viewport_height);
        // Last pixel row inside the viewport is bottom - 1.
        let end = index.index_after(bottom - 1).max(start);
        Self::new(start, end)
    }

    /// Number of rows in the range.
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Whether the range covers no rows.
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Whether `index` is inside the range.
    pub fn contains(&self, index: usize) -> bool {
        self.start <= index && index < self.end
    }

    /// As a `std::ops::Range`.
    pub fn as_range(&self) -> Range<usize> {
        self.start..self.end
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn twenty_px_rows(count: usize) -> HeightIndex {
        HeightIndex::from_heights(std::iter::repeat(20).take(count))
    }

    #[test]
    fn viewport_aligned_to_rows() {
        let index = twenty_px_rows(25);
        assert_eq!(VisibleRange::compute(&index, 20, 200), VisibleRange::new(1, 11));
    }

    #[test]
    fn partial_rows_at_both_edges_are_visible() {
        let index = twenty_px_rows(25);
        // [25, 225): row 1 partially, row 11 partially
        assert_eq!(VisibleRange::compute(&index, 25, 200), VisibleRange::new(1, 12));
    }

    #[test]
    fn viewport_past_content_clamps_to_len() {
        let index = twenty_px_rows(5);
        assert_eq!(VisibleRange::compute(&index, 0, 400), VisibleRange::new(0, 5));
        assert_eq!(VisibleRange::compute(&index, 500, 400), VisibleRange::new(5, 5));
    }

    #[test]
    fn zero_height_viewport_is_empty() {
        let index = twenty_px_rows(5);
        assert!(VisibleRange::compute(&index, 40, 0).is_empty());
    }

    #[test]
    fn empty_index_is_empty_range() {
        let index = HeightIndex::new(0);
        assert_eq!(VisibleRange::compute(&index, 0, 100), VisibleRange::new(0, 0));
    }

    #[test]
    fn contains_respects_half_open_bounds() {
        let range = VisibleRange::new(2, 4);
        assert!(!range.contains(1));
        assert!(range.contains(2));
        assert!(range.contains(3));
        assert!(!range.contains(4));
        assert_eq!(range.len(), 2);
    }

    #[test]
    #[should_panic]
    #[cfg(debug_assertions)]
    fn new_panics_when_start_greater_than_end() {
        VisibleRange::new(5, 2);
    }
}
