//! Host UI surface capability.
//!
//! The view never talks to a concrete UI toolkit. Everything it needs from the
//! host (element construction, tree edits, property updates, scroll dimensions)
//! goes through the [`Surface`] trait. [`HeadlessSurface`] is an in-memory
//! implementation used by tests and the command-line driver.

pub mod headless;

pub use headless::HeadlessSurface;

use std::fmt;
use thiserror::Error;

/// Opaque handle to an element owned by a surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(u64);

impl ElementId {
    /// Wraps a raw id.
    pub fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Raw arena slot.
    pub fn get(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Element tree failures reported by a surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SurfaceError {
    /// The handle does not name a live element.
    #[error("Unknown element {0}")]
    UnknownElement(ElementId),

    /// The reference element is not a child of the given parent.
    #[error("Element {child} is not a child of {parent}")]
    NotAChild {
        /// Expected parent.
        parent: ElementId,
        /// Element that was expected under `parent`.
        child: ElementId,
    },

    /// The element has no parent to detach from.
    #[error("Element {0} is not attached")]
    NotAttached(ElementId),

    /// Attaching would make an element its own ancestor.
    #[error("Attaching {0} would create a cycle")]
    Cycle(ElementId),
}

/// Capability interface over the host UI toolkit.
///
/// Tree semantics follow the DOM: attaching an element that already has a
/// parent moves it.
pub trait Surface {
    /// Creates a detached element.
    fn create_element(&mut self, tag: &str) -> ElementId;

    /// Destroys an element and its subtree, detaching it first if needed.
    fn remove_element(&mut self, element: ElementId) -> Result<(), SurfaceError>;

    /// Appends `child` as the last child of `parent`.
    fn append_child(&mut self, parent: ElementId, child: ElementId) -> Result<(), SurfaceError>;

    /// Inserts `child` into `parent` immediately before `reference`.
    ///
    /// Fails with [`SurfaceError::NotAChild`] if `reference` is not currently
    /// a child of `parent`.
    fn insert_before(
        &mut self,
        parent: ElementId,
        child: ElementId,
        reference: ElementId,
    ) -> Result<(), SurfaceError>;

    /// Detaches `element` from its parent.
    fn detach(&mut self, element: ElementId) -> Result<(), SurfaceError>;

    /// Parent of `element`, if attached.
    fn parent_of(&self, element: ElementId) -> Option<ElementId>;

    /// Children of `element` in document order.
    fn children_of(&self, element: ElementId) -> Vec<ElementId>;

    /// Sets an inline style property.
    fn set_style(
        &mut self,
        element: ElementId,
        property: &str,
        value: &str,
    ) -> Result<(), SurfaceError>;

    /// Adds (`on`) or removes a class.
    fn set_class(&mut self, element: ElementId, class: &str, on: bool)
        -> Result<(), SurfaceError>;

    /// Sets an attribute, or removes it when `value` is `None`.
    fn set_attribute(
        &mut self,
        element: ElementId,
        name: &str,
        value: Option<&str>,
    ) -> Result<(), SurfaceError>;

    /// Replaces the text content of `element`.
    fn set_text(&mut self, element: ElementId, text: &str) -> Result<(), SurfaceError>;

    /// Publishes the scroll position and scroll dimensions of a scrollable element.
    fn set_scroll_state(
        &mut self,
        element: ElementId,
        scroll_top: usize,
        viewport_height: usize,
        content_height: usize,
    ) -> Result<(), SurfaceError>;
}
