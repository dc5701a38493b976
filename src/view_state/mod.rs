//! View-state layer - height index, cell recycling, and windowed rendering
//!
//! # Module Structure
//!
//! - `height_index`: HeightIndex - O(log n) prefix sums via Fenwick tree
//! - `visible_range`: VisibleRange - rows intersecting the viewport
//! - `render`: RenderPlan / RenderDelta - per-pass insert/remove sets
//! - `renderer`: host rendering contracts (templates, rows, data source, controller)
//! - `cell_cache`: CellCache - pooled row cells keyed by template kind
//! - `view_row`: ViewRow - data row lazily bound to a cell
//! - `row_table`: RowTable - index-keyed table of rendered rows
//! - `hit_test`: RowHit - event target resolution result
//! - `list_view`: ListView - the virtualized view

pub mod cell_cache;
pub mod height_index;
pub mod list_view;
pub mod render;
pub mod renderer;
pub mod row_table;
pub mod view_row;
pub mod visible_range;

pub use list_view::ListView;
pub use render::RenderDelta;
pub use renderer::{Controller, DataSource, RowRenderer, TemplateRenderer, TextRenderer};
