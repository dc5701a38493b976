//! Domain model types (pure).
//!
//! All types in this module are pure data with smart constructors.

pub mod error;
pub mod event;
pub mod identifiers;
pub mod row;

// Re-export for convenience
pub use error::{AppError, ViewError};
pub use event::{EventKind, InputEvent, MouseButton};
pub use identifiers::{InvalidRowId, InvalidTemplateKind, RowId, TemplateKind};
pub use row::{Row, RowTrait};
