//! ListView - windowed rendering of rows into a host surface
//!
//! Only rows intersecting the viewport have elements. A scroll or resize runs a
//! render pass that inserts rows entering the viewport and releases rows
//! leaving it, recycling row cells through the [`CellCache`].
//!
//! # Element structure
//!
//! ```text
//! <div class="list-view">        root, carries scroll state
//!   <div class="list-rows">      rows container, style top = first row top - scroll top
//!     <div class="row">...       one per visible row, in row order
//! ```

use super::cell_cache::CellCache;
use super::height_index::HeightIndex;
use super::hit_test::RowHit;
use super::render::{RenderDelta, RenderPlan};
use super::renderer::{Controller, DataSource, RowRenderer};
use super::row_table::RowTable;
use super::view_row::ViewRow;
use super::visible_range::VisibleRange;
use crate::model::{InputEvent, Row, RowId, RowTrait, TemplateKind, ViewError};
use crate::surface::{ElementId, Surface, SurfaceError};
use tracing::{debug, trace, warn};

/// Class of the scrollable root element.
pub const ROOT_CLASS: &str = "list-view";
/// Class of the rows container element.
pub const ROWS_CLASS: &str = "list-rows";

/// Virtualized list of rows rendered into a [`Surface`].
pub struct ListView<T, R, S>
where
    R: RowRenderer<T>,
    S: Surface,
{
    surface: S,
    renderer: R,
    root: ElementId,
    rows_container: ElementId,
    items: Vec<ViewRow<T, R::State>>,
    heights: HeightIndex,
    cache: CellCache<R::State>,
    table: RowTable,
    scroll_top: usize,
    viewport_height: usize,
    range: VisibleRange,
    next_row_id: usize,
    /// Container top, scroll top, viewport height and content height last
    /// written to the surface.
    published: Option<(i64, usize, usize, usize)>,
}

impl<T, R, S> ListView<T, R, S>
where
    R: RowRenderer<T>,
    S: Surface,
{
    /// Builds the root and rows container elements on `surface`.
    pub fn new(mut surface: S, renderer: R, viewport_height: usize) -> Result<Self, ViewError> {
        let root = surface.create_element("div");
        surface.set_class(root, ROOT_CLASS, true)?;
        let rows_container = surface.create_element("div");
        surface.set_class(rows_container, ROWS_CLASS, true)?;
        surface.append_child(root, rows_container)?;

        let mut view = Self {
            surface,
            renderer,
            root,
            rows_container,
            items: Vec::new(),
            heights: HeightIndex::new(0),
            cache: CellCache::new(),
            table: RowTable::new(),
            scroll_top: 0,
            viewport_height,
            range: VisibleRange::default(),
            next_row_id: 0,
            published: None,
        };
        view.publish(0)?;
        Ok(view)
    }

    // ===== Model updates =====

    /// Replaces `delete_count` rows at `start` with `rows`.
    ///
    /// New rows get fresh identities. `removed` in the returned delta uses
    /// indices from before the splice; `inserted` uses indices after it.
    pub fn splice(
        &mut self,
        start: usize,
        delete_count: usize,
        rows: impl IntoIterator<Item = T>,
    ) -> Result<RenderDelta, ViewError> {
        let rows: Vec<Row<T>> = rows
            .into_iter()
            .map(|data| {
                let id = RowId::from(self.next_row_id);
                self.next_row_id += 1;
                let height = self.renderer.height(&data);
                Row::new(id, data, height)
            })
            .collect();
        self.splice_rows(start, delete_count, rows)
    }

    /// Replaces every row with the contents of `source`.
    pub fn load(&mut self, source: &dyn DataSource<T>) -> Result<RenderDelta, ViewError> {
        let rows = (0..source.len())
            .map(|i| {
                let data = source.row_at(i);
                let height = self.renderer.height(&data);
                Row::new(source.row_id(i), data, height)
            })
            .collect();
        self.splice_rows(0, self.items.len(), rows)
    }

    fn splice_rows(
        &mut self,
        start: usize,
        delete_count: usize,
        rows: Vec<Row<T>>,
    ) -> Result<RenderDelta, ViewError> {
        let len = self.items.len();
        if start > len {
            return Err(ViewError::SpliceOutOfBounds { start, len });
        }
        let end = start.saturating_add(delete_count).min(len);
        let insert_count = rows.len();

        let mut delta = RenderDelta::default();
        let doomed: Vec<usize> = self
            .table
            .indices()
            .filter(|i| (start..end).contains(i))
            .collect();
        for index in doomed {
            self.remove_row(index);
            delta.removed.push(index);
        }

        let heights: Vec<usize> = rows.iter().map(Row::height).collect();
        let new_items: Vec<ViewRow<T, R::State>> = rows
            .into_iter()
            .map(|row| {
                let kind = self.renderer.template_kind(row.data());
                ViewRow::new(row, kind)
            })
            .collect();
        self.items.splice(start..end, new_items);
        self.table.shift(start, end - start, insert_count);
        self.heights.splice(start, end - start, heights);

        debug!(
            start,
            deleted = end - start,
            inserted = insert_count,
            len = self.items.len(),
            "Spliced rows"
        );

        self.scroll_top = self.scroll_top.min(self.max_scroll_top());
        let delta = self.reconcile(delta)?;

        // Rows that kept their cell but moved need their index attributes refreshed.
        let moved: Vec<usize> = self
            .table
            .indices()
            .filter(|i| *i >= start && !delta.inserted.contains(i))
            .collect();
        for index in moved {
            self.items[index].render(index, &mut self.renderer, &mut self.surface)?;
        }

        Ok(delta)
    }

    /// Changes the height of one row.
    pub fn resize_row(&mut self, index: usize, height: usize) -> Result<RenderDelta, ViewError> {
        self.check_index(index)?;
        self.heights.set(index, height);
        self.items[index].row_mut().set_height(height);
        self.items[index].render(index, &mut self.renderer, &mut self.surface)?;
        self.scroll_top = self.scroll_top.min(self.max_scroll_top());
        self.reconcile(RenderDelta::default())
    }

    /// Sets or clears a presentation trait, refreshing the row if rendered.
    ///
    /// Returns true if the trait changed.
    pub fn set_trait(
        &mut self,
        index: usize,
        row_trait: RowTrait,
        on: bool,
    ) -> Result<bool, ViewError> {
        self.check_index(index)?;
        let changed = self.items[index].row_mut().set_trait(row_trait, on);
        if changed {
            self.items[index].render(index, &mut self.renderer, &mut self.surface)?;
        }
        Ok(changed)
    }

    /// Indices of rows carrying `row_trait`.
    pub fn rows_with_trait(&self, row_trait: &RowTrait) -> Vec<usize> {
        self.items
            .iter()
            .enumerate()
            .filter(|(_, item)| item.row().has_trait(row_trait))
            .map(|(i, _)| i)
            .collect()
    }

    // ===== Scrolling =====

    /// Scrolls to `scroll_top`, clamped to the scrollable extent.
    pub fn set_scroll_top(&mut self, scroll_top: usize) -> Result<RenderDelta, ViewError> {
        self.scroll_top = scroll_top.min(self.max_scroll_top());
        self.render()
    }

    /// Resizes the viewport.
    pub fn layout(&mut self, viewport_height: usize) -> Result<RenderDelta, ViewError> {
        self.viewport_height = viewport_height;
        self.scroll_top = self.scroll_top.min(self.max_scroll_top());
        self.render()
    }

    /// Scrolls the least distance that makes row `index` fully visible.
    pub fn reveal(&mut self, index: usize) -> Result<RenderDelta, ViewError> {
        self.check_index(index)?;
        let top = self.heights.top_of(index);
        let bottom = top + self.heights.height_of(index);
        if top < self.scroll_top {
            self.set_scroll_top(top)
        } else if bottom > self.scroll_top.saturating_add(self.viewport_height) {
            self.set_scroll_top(bottom.saturating_sub(self.viewport_height))
        } else {
            Ok(RenderDelta {
                range: self.range,
                container_top: self.container_top(),
                ..RenderDelta::default()
            })
        }
    }

    /// One render pass from the current range to the range for the current
    /// scroll position and viewport height.
    fn render(&mut self) -> Result<RenderDelta, ViewError> {
        let previous = self.range;
        let next = VisibleRange::compute(&self.heights, self.scroll_top, self.viewport_height);
        let plan = RenderPlan::between(previous, next);

        if plan.is_noop() && self.published == Some(self.scroll_snapshot(self.container_top())) {
            trace!(start = next.start, end = next.end, "Render pass skipped");
            return Ok(RenderDelta {
                range: self.range,
                container_top: self.container_top(),
                ..RenderDelta::default()
            });
        }

        let mut delta = RenderDelta::default();
        for index in plan.inserts() {
            if let Err(err) = self.insert_row(index) {
                // Roll back to the previous window so the table still matches `range`.
                for inserted in delta.inserted {
                    self.remove_row(inserted);
                }
                warn!(row = index, error = %err, "Render pass aborted");
                return Err(err);
            }
            delta.inserted.push(index);
        }
        for index in plan.removes() {
            self.remove_row(index);
            delta.removed.push(index);
        }

        self.range = next;
        self.finish(delta)
    }

    /// Brings the rendered rows in line with the visible range when the
    /// previous range no longer describes them (after splices and resizes).
    fn reconcile(&mut self, mut delta: RenderDelta) -> Result<RenderDelta, ViewError> {
        let next = VisibleRange::compute(&self.heights, self.scroll_top, self.viewport_height);

        for index in self.table.outside(&next.as_range()) {
            self.remove_row(index);
            delta.removed.push(index);
        }
        for index in next.as_range() {
            if self.table.element_of(index).is_none() {
                if let Err(err) = self.insert_row(index) {
                    // The window may have holes now; start the next pass from nothing.
                    let rendered: Vec<usize> = self.table.indices().collect();
                    for rendered_index in rendered {
                        self.remove_row(rendered_index);
                    }
                    self.range = VisibleRange::new(next.start, next.start);
                    warn!(row = index, error = %err, "Reconcile aborted");
                    return Err(err);
                }
                delta.inserted.push(index);
            }
        }

        self.range = next;
        self.finish(delta)
    }

    fn insert_row(&mut self, index: usize) -> Result<(), ViewError> {
        let before = self.table.next_after(index).map(|(_, element)| element);
        self.items[index].insert_in_dom(
            index,
            self.rows_container,
            before,
            &mut self.cache,
            &mut self.renderer,
            &mut self.surface,
        )?;
        if let Some(element) = self.items[index].element() {
            self.table.insert(index, element);
        }
        Ok(())
    }

    fn remove_row(&mut self, index: usize) {
        self.items[index].remove_from_dom(&mut self.cache, &mut self.surface);
        self.table.remove(index);
    }

    fn finish(&mut self, mut delta: RenderDelta) -> Result<RenderDelta, ViewError> {
        delta.range = self.range;
        delta.container_top = self.container_top();
        self.publish(delta.container_top)?;
        trace!(
            start = delta.range.start,
            end = delta.range.end,
            inserted = delta.inserted.len(),
            removed = delta.removed.len(),
            container_top = delta.container_top,
            pooled = self.cache.len(),
            "Render pass"
        );
        Ok(delta)
    }

    fn publish(&mut self, container_top: i64) -> Result<(), ViewError> {
        self.surface
            .set_style(self.rows_container, "top", &format!("{}px", container_top))?;
        self.surface.set_scroll_state(
            self.root,
            self.scroll_top,
            self.viewport_height,
            self.heights.total(),
        )?;
        self.published = Some(self.scroll_snapshot(container_top));
        Ok(())
    }

    fn scroll_snapshot(&self, container_top: i64) -> (i64, usize, usize, usize) {
        (
            container_top,
            self.scroll_top,
            self.viewport_height,
            self.heights.total(),
        )
    }

    fn container_top(&self) -> i64 {
        let first_top = if self.range.start < self.heights.len() {
            self.heights.top_of(self.range.start)
        } else {
            self.heights.total()
        };
        first_top as i64 - self.scroll_top as i64
    }

    fn max_scroll_top(&self) -> usize {
        self.heights.total().saturating_sub(self.viewport_height)
    }

    fn check_index(&self, index: usize) -> Result<(), ViewError> {
        if index < self.items.len() {
            Ok(())
        } else {
            Err(ViewError::RowOutOfBounds {
                index,
                len: self.items.len(),
            })
        }
    }

    // ===== Input =====

    /// Resolves an element inside the view to the row rendering it.
    pub fn hit_test(&self, target: ElementId) -> RowHit {
        let mut current = Some(target);
        while let Some(element) = current {
            if let Some(index) = self.table.index_of(element) {
                return RowHit::Hit { index, element };
            }
            if element == self.rows_container || element == self.root {
                break;
            }
            current = self.surface.parent_of(element);
        }
        RowHit::Miss
    }

    /// Routes an input event to `controller` with the row it landed on.
    ///
    /// Events outside every rendered row are dropped. Returns whether the
    /// controller handled the event.
    pub fn dispatch<C>(&self, event: &InputEvent, controller: &mut C) -> bool
    where
        C: Controller<T> + ?Sized,
    {
        match self.hit_test(event.target) {
            RowHit::Hit { index, .. } => {
                controller.handle(index, self.items[index].row(), event)
            }
            RowHit::Miss => {
                trace!(element = %event.target, "Event outside rendered rows");
                false
            }
        }
    }

    // ===== Teardown =====

    /// Releases every rendered row, tears down all pooled cells and removes
    /// the view's elements. Returns the number of cells disposed.
    pub fn dispose(&mut self) -> Result<usize, ViewError> {
        let rendered: Vec<usize> = self.table.indices().collect();
        for index in rendered {
            self.remove_row(index);
        }
        self.range = VisibleRange::default();
        self.published = None;
        let disposed = self
            .cache
            .garbage_collect(&mut self.surface, &mut self.renderer);
        match self.surface.remove_element(self.root) {
            // Already removed by an earlier dispose.
            Ok(()) | Err(SurfaceError::UnknownElement(_)) => {}
            Err(err) => return Err(err.into()),
        }
        debug!(disposed, "List view disposed");
        Ok(disposed)
    }

    // ===== Queries =====

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the view has no rows.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Row at `index`.
    pub fn row(&self, index: usize) -> Option<&Row<T>> {
        self.items.get(index).map(ViewRow::row)
    }

    /// Template kind chosen for row `index`.
    pub fn template_kind(&self, index: usize) -> Option<&TemplateKind> {
        self.items.get(index).map(ViewRow::kind)
    }

    /// Current scroll offset.
    pub fn scroll_top(&self) -> usize {
        self.scroll_top
    }

    /// Height of the visible area.
    pub fn viewport_height(&self) -> usize {
        self.viewport_height
    }

    /// Sum of all row heights.
    pub fn content_height(&self) -> usize {
        self.heights.total()
    }

    /// Offset of the top of row `index`.
    pub fn element_top(&self, index: usize) -> Result<usize, ViewError> {
        self.check_index(index)?;
        Ok(self.heights.top_of(index))
    }

    /// Height of row `index`.
    pub fn element_height(&self, index: usize) -> Result<usize, ViewError> {
        self.check_index(index)?;
        Ok(self.heights.height_of(index))
    }

    /// First row whose bottom is below `offset`, or `len()`.
    pub fn index_at(&self, offset: usize) -> usize {
        self.heights.index_at(offset)
    }

    /// Exclusive end of the row containing `offset`.
    pub fn index_after(&self, offset: usize) -> usize {
        self.heights.index_after(offset)
    }

    /// Rows currently rendered, as a range.
    pub fn visible_range(&self) -> VisibleRange {
        self.range
    }

    /// Indices with a live element, ascending.
    pub fn rendered_indices(&self) -> Vec<usize> {
        self.table.indices().collect()
    }

    /// Element of a rendered row.
    pub fn element_of(&self, index: usize) -> Option<ElementId> {
        self.table.element_of(index)
    }

    /// Scrollable root element.
    pub fn root(&self) -> ElementId {
        self.root
    }

    /// Element that holds the row cells.
    pub fn rows_container(&self) -> ElementId {
        self.rows_container
    }

    /// Idle cells in the pool, across all template kinds.
    pub fn pooled_cells(&self) -> usize {
        self.cache.len()
    }

    /// Surface the view renders into.
    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Row renderer.
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    /// Mutable access to the row renderer.
    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }
}

#[cfg(test)]
#[path = "list_view_tests.rs"]
mod tests;
