//! rowview
//!
//! Virtualized list view: only rows intersecting the viewport own an element,
//! row cells are recycled through a per-template pool, and row offsets come
//! from a Fenwick-tree height index.
//!
//! The host element tree is abstracted behind [`surface::Surface`];
//! [`surface::HeadlessSurface`] is an in-memory implementation used by the
//! command-line driver and tests.

pub mod config;
pub mod logging;
pub mod model;
pub mod surface;
pub mod view_state;
