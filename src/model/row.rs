//! Data rows and their presentation traits.

use super::identifiers::RowId;
use std::collections::BTreeSet;

/// Boolean presentation trait carried by a row.
///
/// Each trait maps to a CSS-style class on the row's element while set.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RowTrait {
    /// Row is part of the selection.
    Selected,
    /// Row has keyboard focus.
    Focused,
    /// Host-defined trait, rendered as a class of the same name.
    Custom(String),
}

impl RowTrait {
    /// Class name applied to the row element while the trait is set.
    pub fn class_name(&self) -> &str {
        match self {
            RowTrait::Selected => "selected",
            RowTrait::Focused => "focused",
            RowTrait::Custom(name) => name,
        }
    }
}

/// One data row: opaque payload plus identity, pixel height and traits.
#[derive(Debug, Clone, PartialEq)]
pub struct Row<T> {
    id: RowId,
    data: T,
    height: usize,
    traits: BTreeSet<RowTrait>,
}

impl<T> Row<T> {
    /// Row with no traits set.
    pub fn new(id: RowId, data: T, height: usize) -> Self {
        Self {
            id,
            data,
            height,
            traits: BTreeSet::new(),
        }
    }

    /// Stable id of the row.
    pub fn id(&self) -> &RowId {
        &self.id
    }

    /// Payload handed to the row renderer.
    pub fn data(&self) -> &T {
        &self.data
    }

    /// Height in pixels.
    pub fn height(&self) -> usize {
        self.height
    }

    pub(crate) fn set_height(&mut self, height: usize) {
        self.height = height;
    }

    /// Whether `row_trait` is set.
    pub fn has_trait(&self, row_trait: &RowTrait) -> bool {
        self.traits.contains(row_trait)
    }

    /// Traits currently set, in no particular order.
    pub fn traits(&self) -> impl Iterator<Item = &RowTrait> {
        self.traits.iter()
    }

    /// Sets or clears a trait. Returns true if the set changed.
    pub fn set_trait(&mut self, row_trait: RowTrait, on: bool) -> bool {
        if on {
            self.traits.insert(row_trait)
        } else {
            self.traits.remove(&row_trait)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row() -> Row<&'static str> {
        Row::new(RowId::new("a").unwrap(), "payload", 20)
    }

    #[test]
    fn new_row_has_no_traits() {
        let row = row();
        assert_eq!(row.traits().count(), 0);
        assert_eq!(row.height(), 20);
        assert_eq!(*row.data(), "payload");
    }

    #[test]
    fn set_trait_reports_changes_only() {
        let mut row = row();
        assert!(row.set_trait(RowTrait::Selected, true));
        assert!(!row.set_trait(RowTrait::Selected, true));
        assert!(row.has_trait(&RowTrait::Selected));
        assert!(row.set_trait(RowTrait::Selected, false));
        assert!(!row.set_trait(RowTrait::Selected, false));
    }

    #[test]
    fn custom_trait_class_is_its_name() {
        assert_eq!(RowTrait::Custom("dirty".into()).class_name(), "dirty");
        assert_eq!(RowTrait::Focused.class_name(), "focused");
    }
}
