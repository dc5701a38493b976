//! Index-keyed table of rendered rows.
//!
//! The view resolves elements back to rows through this table instead of
//! storing row references on the elements themselves.

use crate::surface::ElementId;
use std::collections::{BTreeMap, HashMap};
use std::ops::Range;

/// Rendered rows keyed by row index, with the reverse element lookup.
///
/// # Invariants
/// - `by_index` and `by_element` are mutual inverses
/// - an element appears at most once
#[derive(Debug, Clone, Default)]
pub struct RowTable {
    by_index: BTreeMap<usize, ElementId>,
    by_element: HashMap<ElementId, usize>,
}

impl RowTable {
    /// Empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records that `element` renders row `index`, replacing any previous
    /// binding of either side.
    pub fn insert(&mut self, index: usize, element: ElementId) {
        if let Some(old) = self.by_index.insert(index, element) {
            self.by_element.remove(&old);
        }
        if let Some(old_index) = self.by_element.insert(element, index) {
            if old_index != index {
                self.by_index.remove(&old_index);
            }
        }
    }

    /// Forgets row `index`, returning its element.
    pub fn remove(&mut self, index: usize) -> Option<ElementId> {
        let element = self.by_index.remove(&index)?;
        self.by_element.remove(&element);
        Some(element)
    }

    /// Element of row `index`.
    pub fn element_of(&self, index: usize) -> Option<ElementId> {
        self.by_index.get(&index).copied()
    }

    /// Row rendered into `element`.
    pub fn index_of(&self, element: ElementId) -> Option<usize> {
        self.by_element.get(&element).copied()
    }

    /// First rendered row strictly after `index`.
    pub fn next_after(&self, index: usize) -> Option<(usize, ElementId)> {
        self.by_index
            .range(index.saturating_add(1)..)
            .next()
            .map(|(i, e)| (*i, *e))
    }

    /// Rendered row indices in ascending order.
    pub fn indices(&self) -> impl Iterator<Item = usize> + '_ {
        self.by_index.keys().copied()
    }

    /// Rendered rows whose index falls outside `keep`.
    pub fn outside(&self, keep: &Range<usize>) -> Vec<usize> {
        self.by_index
            .keys()
            .copied()
            .filter(|i| !keep.contains(i))
            .collect()
    }

    /// Re-keys rows after `delete_count` rows at `start` were replaced by
    /// `insert_count` rows. Rows inside the deleted span must already have
    /// been removed.
    pub fn shift(&mut self, start: usize, delete_count: usize, insert_count: usize) {
        if delete_count == insert_count {
            return;
        }
        let tail = self.by_index.split_off(&start.saturating_add(delete_count));
        for (old_index, element) in tail {
            let new_index = old_index - delete_count + insert_count;
            self.by_index.insert(new_index, element);
            self.by_element.insert(element, new_index);
        }
    }

    /// Number of rendered rows.
    pub fn len(&self) -> usize {
        self.by_index.len()
    }

    /// Whether no rows are rendered.
    pub fn is_empty(&self) -> bool {
        self.by_index.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn e(raw: u64) -> ElementId {
        ElementId::new(raw)
    }

    #[test]
    fn insert_and_lookup_both_directions() {
        let mut table = RowTable::new();
        table.insert(3, e(10));
        assert_eq!(table.element_of(3), Some(e(10)));
        assert_eq!(table.index_of(e(10)), Some(3));
    }

    #[test]
    fn rebinding_element_drops_old_index() {
        let mut table = RowTable::new();
        table.insert(3, e(10));
        table.insert(5, e(10));
        assert_eq!(table.element_of(3), None);
        assert_eq!(table.index_of(e(10)), Some(5));
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn next_after_skips_gaps() {
        let mut table = RowTable::new();
        table.insert(1, e(1));
        table.insert(4, e(4));
        assert_eq!(table.next_after(1), Some((4, e(4))));
        assert_eq!(table.next_after(0), Some((1, e(1))));
        assert_eq!(table.next_after(4), None);
    }

    #[test]
    fn outside_lists_rows_not_kept() {
        let mut table = RowTable::new();
        for i in 0..5 {
            table.insert(i, e(i as u64));
        }
        assert_eq!(table.outside(&(1..3)), vec![0, 3, 4]);
    }

    #[test]
    fn shift_moves_tail_rows() {
        let mut table = RowTable::new();
        table.insert(0, e(0));
        table.insert(5, e(5));
        table.insert(6, e(6));

        // rows 2..4 deleted, one row inserted
        table.shift(2, 2, 1);

        assert_eq!(table.indices().collect::<Vec<_>>(), vec![0, 4, 5]);
        assert_eq!(table.index_of(e(5)), Some(4));
        assert_eq!(table.index_of(e(6)), Some(5));
    }

    #[test]
    fn shift_grows_indices_on_insert() {
        let mut table = RowTable::new();
        table.insert(1, e(1));
        table.insert(2, e(2));

        table.shift(1, 0, 3);

        assert_eq!(table.indices().collect::<Vec<_>>(), vec![4, 5]);
        assert_eq!(table.element_of(4), Some(e(1)));
    }

    #[test]
    fn remove_clears_both_sides() {
        let mut table = RowTable::new();
        table.insert(2, e(7));
        assert_eq!(table.remove(2), Some(e(7)));
        assert_eq!(table.index_of(e(7)), None);
        assert!(table.is_empty());
        assert_eq!(table.remove(2), None);
    }
}
