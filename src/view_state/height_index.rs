//! HeightIndex - O(log n) prefix sums and offset lookup via Fenwick tree
//!
//! Maps row index to cumulative pixel offset and back. Rows can be inserted and
//! removed at arbitrary positions with `splice`.
//!
//! # Complexity
//!
//! - `set`: O(log n)
//! - `prefix_sum` / `top_of`: O(log n)
//! - `index_at` / `index_after`: O(log² n)
//! - `push`: O(log n) amortized
//! - `splice`: O(n log n)
//! - `total`: O(log n)
//! - `len`: O(1)

/// HeightIndex wraps a Fenwick tree for O(log n) prefix sum queries and updates.
///
/// Row `i` covers the half-open pixel span `[top_of(i), prefix_sum(i))`.
#[derive(Debug, Clone)]
pub struct HeightIndex {
    /// Fenwick tree backing storage (1-indexed internally, but we expose 0-indexed API).
    /// Slots at and beyond `heights.len()` are always zero.
    tree: Vec<isize>,
    /// Raw per-row heights, kept for rebuilds after splices.
    heights: Vec<usize>,
}

impl HeightIndex {
    /// Creates a new HeightIndex with the given initial capacity.
    ///
    /// # Examples
    ///
    /// ```
    /// # use rowview::view_state::height_index::HeightIndex;
    /// let index = HeightIndex::new(100);
    /// assert_eq!(index.len(), 0);
    /// assert_eq!(index.total(), 0);
    /// ```
    pub fn new(capacity: usize) -> Self {
        Self {
            tree: vec![0; capacity],
            heights: Vec::with_capacity(capacity),
        }
    }

    /// Builds an index from a sequence of heights.
    pub fn from_heights(heights: impl IntoIterator<Item = usize>) -> Self {
        let mut index = Self::new(0);
        index.heights = heights.into_iter().collect();
        index.rebuild(index.heights.len());
        index
    }

    /// Sets the height at the given index.
    ///
    /// # Panics
    ///
    /// Panics if `index >= len()`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use rowview::view_state::height_index::HeightIndex;
    /// let mut index = HeightIndex::new(10);
    /// index.push(5);
    /// index.set(0, 10);
    /// assert_eq!(index.prefix_sum(0), 10);
    /// ```
    pub fn set(&mut self, index: usize, height: usize) {
        self.check_bounds(index);

        let delta = height as isize - self.heights[index] as isize;
        self.heights[index] = height;
        if delta != 0 {
            fenwick::array::update(&mut self.tree, index, delta);
        }
    }

    /// Returns the height of a single row.
    ///
    /// # Panics
    ///
    /// Panics if `index >= len()`.
    pub fn height_of(&self, index: usize) -> usize {
        self.check_bounds(index);
        self.heights[index]
    }

    /// Returns the cumulative height up to and including the given index.
    ///
    /// # Panics
    ///
    /// Panics if `index >= len()`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use rowview::view_state::height_index::HeightIndex;
    /// let index = HeightIndex::from_heights([3, 4, 5]);
    /// assert_eq!(index.prefix_sum(0), 3);
    /// assert_eq!(index.prefix_sum(1), 7);
    /// assert_eq!(index.prefix_sum(2), 12);
    /// ```
    pub fn prefix_sum(&self, index: usize) -> usize {
        self.check_bounds(index);

        let sum = fenwick::array::prefix_sum(&self.tree, index);
        sum.max(0) as usize
    }

    /// Returns the offset at which the given row starts.
    ///
    /// `top_of(len())` is accepted and equals `total()`.
    ///
    /// # Panics
    ///
    /// Panics if `index > len()`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use rowview::view_state::height_index::HeightIndex;
    /// let index = HeightIndex::from_heights([10, 20, 15]);
    /// assert_eq!(index.top_of(0), 0);
    /// assert_eq!(index.top_of(2), 30);
    /// assert_eq!(index.top_of(3), 45);
    /// ```
    pub fn top_of(&self, index: usize) -> usize {
        assert!(
            index <= self.len(),
            "index {} out of bounds (len: {})",
            index,
            self.len()
        );
        if index == 0 {
            0
        } else {
            self.prefix_sum(index - 1)
        }
    }

    /// Index of the row containing `offset`: the largest row whose top is
    /// `<= offset` among rows that have any height there.
    ///
    /// Returns `len()` when `offset >= total()`, including on an empty index.
    ///
    /// # Examples
    ///
    /// ```
    /// # use rowview::view_state::height_index::HeightIndex;
    /// let index = HeightIndex::from_heights([10, 20, 15]); // [0..10) [10..30) [30..45)
    ///
    /// assert_eq!(index.index_at(0), 0);
    /// assert_eq!(index.index_at(9), 0);
    /// assert_eq!(index.index_at(10), 1);
    /// assert_eq!(index.index_at(44), 2);
    /// assert_eq!(index.index_at(45), 3);
    /// ```
    pub fn index_at(&self, offset: usize) -> usize {
        // First index where prefix_sum(index) > offset.
        let mut left = 0;
        let mut right = self.len();

        while left < right {
            let mid = left + (right - left) / 2;
            if self.prefix_sum(mid) > offset {
                right = mid;
            } else {
                left = mid + 1;
            }
        }

        left
    }

    /// Index of the first row whose top is strictly greater than `offset`,
    /// clamped to `len()`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use rowview::view_state::height_index::HeightIndex;
    /// let index = HeightIndex::from_heights([10, 20, 15]);
    ///
    /// assert_eq!(index.index_after(0), 1);
    /// assert_eq!(index.index_after(10), 2);
    /// assert_eq!(index.index_after(30), 3);
    /// assert_eq!(index.index_after(100), 3);
    /// ```
    pub fn index_after(&self, offset: usize) -> usize {
        (self.index_at(offset) + 1).min(self.len())
    }

    /// Returns the total cumulative height of all rows.
    pub fn total(&self) -> usize {
        if self.is_empty() {
            0
        } else {
            self.prefix_sum(self.len() - 1)
        }
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.heights.len()
    }

    /// Whether the index has no rows.
    pub fn is_empty(&self) -> bool {
        self.heights.is_empty()
    }

    /// Appends a new row with the given height.
    ///
    /// Grows the backing storage if necessary.
    pub fn push(&mut self, height: usize) {
        let idx = self.heights.len();
        self.heights.push(height);

        if idx >= self.tree.len() {
            // New Fenwick nodes cover earlier rows; appended zeros would be wrong.
            let capacity = (self.tree.len().max(1) * 2).max(self.heights.len());
            self.rebuild(capacity);
        } else {
            fenwick::array::update(&mut self.tree, idx, height as isize);
        }
    }

    /// Removes `delete_count` rows starting at `start` and inserts `heights`
    /// in their place.
    ///
    /// # Panics
    ///
    /// Panics if `start > len()`. The delete count is clamped to the rows
    /// available after `start`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use rowview::view_state::height_index::HeightIndex;
    /// let mut index = HeightIndex::from_heights([10, 10, 10]);
    /// index.splice(1, 1, [5, 5]);
    /// assert_eq!(index.len(), 4);
    /// assert_eq!(index.top_of(3), 20);
    /// assert_eq!(index.total(), 30);
    /// ```
    pub fn splice(
        &mut self,
        start: usize,
        delete_count: usize,
        heights: impl IntoIterator<Item = usize>,
    ) {
        assert!(
            start <= self.len(),
            "splice start {} out of bounds (len: {})",
            start,
            self.len()
        );
        let end = start.saturating_add(delete_count).min(self.len());
        self.heights.splice(start..end, heights);
        let capacity = self.tree.len().max(self.heights.len());
        self.rebuild(capacity);
    }

    /// Clears all rows, retaining allocated capacity.
    pub fn clear(&mut self) {
        self.tree.iter_mut().for_each(|slot| *slot = 0);
        self.heights.clear();
    }

    fn rebuild(&mut self, capacity: usize) {
        self.tree.clear();
        self.tree.resize(capacity, 0);
        for (idx, &height) in self.heights.iter().enumerate() {
            if height != 0 {
                fenwick::array::update(&mut self.tree, idx, height as isize);
            }
        }
    }

    fn check_bounds(&self, index: usize) {
        assert!(
            index < self.len(),
            "index {} out of bounds (len: {})",
            index,
            self.len()
        );
    }
}

impl Default for HeightIndex {
    fn default() -> Self {
        Self::new(0)
    }
}
