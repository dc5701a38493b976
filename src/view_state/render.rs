//! Render pass planning: row deltas between two visible ranges.

use super::visible_range::VisibleRange;
use serde::Serialize;
use std::ops::Range;

/// The four index ranges of one render pass.
///
/// Derived from the previous range `[ps, pe)` and the new range `[ns, ne)`:
///
/// | pass            | rows                     |
/// |-----------------|--------------------------|
/// | extend down     | `[max(pe, ns), ne)`      |
/// | extend up       | `[ns, min(ps, ne))`      |
/// | retract top     | `[ps, min(pe, ns))`      |
/// | retract bottom  | `[max(ps, ne), pe)`      |
///
/// Insert ranges are disjoint from the previous range and remove ranges are
/// disjoint from the new one, so no row is removed and reinserted in a pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderPlan {
    /// Rows inserted below the old range.
    pub extend_down: Range<usize>,
    /// Rows inserted above the old range.
    pub extend_up: Range<usize>,
    /// Rows removed from the top.
    pub retract_top: Range<usize>,
    /// Rows removed from the bottom.
    pub retract_bottom: Range<usize>,
}

impl RenderPlan {
    /// Plan that turns `previous` into `next`.
    pub fn between(previous: VisibleRange, next: VisibleRange) -> Self {
        let (ps, pe) = (previous.start, previous.end);
        let (ns, ne) = (next.start, next.end);
        Self {
            extend_down: pe.max(ns)..ne,
            extend_up: ns..ps.min(ne),
            retract_top: ps..pe.min(ns),
            retract_bottom: ps.max(ne)..pe,
        }
    }

    /// Rows to insert, in pass order.
    pub fn inserts(&self) -> impl Iterator<Item = usize> {
        self.extend_down.clone().chain(self.extend_up.clone())
    }

    /// Rows to remove, in pass order.
    pub fn removes(&self) -> impl Iterator<Item = usize> {
        self.retract_top.clone().chain(self.retract_bottom.clone())
    }

    /// True when the plan touches no rows.
    pub fn is_noop(&self) -> bool {
        self.extend_down.is_empty()
            && self.extend_up.is_empty()
            && self.retract_top.is_empty()
            && self.retract_bottom.is_empty()
    }
}

/// Outcome of one render pass.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct RenderDelta {
    /// Rows whose elements were inserted, in insertion order.
    pub inserted: Vec<usize>,
    /// Rows whose elements were released, in removal order.
    pub removed: Vec<usize>,
    /// Visible range after the pass.
    pub range: VisibleRange,
    /// Rows container offset relative to the scroll origin, in pixels.
    pub container_top: i64,
}
