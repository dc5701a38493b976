//! Raw input events routed from the host surface to the row controller.

use crate::surface::ElementId;

/// Mouse button that produced a mouse event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseButton {
    /// Primary button.
    Left,
    /// Wheel button.
    Middle,
    /// Secondary button.
    Right,
}

/// Kind of raw input event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventKind {
    /// Key press, identified by the host's key name (e.g. "ArrowDown").
    Key(String),
    /// Button pressed.
    MouseDown(MouseButton),
    /// Button released.
    MouseUp(MouseButton),
    /// Press and release on the same element.
    Click(MouseButton),
    /// Second click in quick succession.
    DoubleClick,
    /// Touch began.
    TouchStart,
    /// Touch ended.
    TouchEnd,
    /// Context menu requested.
    ContextMenu,
}

/// Input event targeted at an element inside the view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputEvent {
    /// What happened.
    pub kind: EventKind,
    /// Innermost element the event was delivered to.
    pub target: ElementId,
}

impl InputEvent {
    /// Event of `kind` delivered to `target`.
    pub fn new(kind: EventKind, target: ElementId) -> Self {
        Self { kind, target }
    }
}
