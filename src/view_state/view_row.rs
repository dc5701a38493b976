//! A data row lazily bound to a pooled cell.

use super::cell_cache::{CellCache, Wrapper};
use super::renderer::RowRenderer;
use crate::model::{Row, TemplateKind};
use crate::surface::{ElementId, Surface, SurfaceError};
use tracing::warn;

/// Data row plus the cell currently rendering it, if any.
#[derive(Debug)]
pub struct ViewRow<T, S> {
    row: Row<T>,
    kind: TemplateKind,
    wrapper: Option<Wrapper<S>>,
}

impl<T, S> ViewRow<T, S> {
    /// Unbound view row.
    pub fn new(row: Row<T>, kind: TemplateKind) -> Self {
        Self {
            row,
            kind,
            wrapper: None,
        }
    }

    /// Row at `index`.
    pub fn row(&self) -> &Row<T> {
        &self.row
    }

    pub(crate) fn row_mut(&mut self) -> &mut Row<T> {
        &mut self.row
    }

    /// Template kind used for the cell.
    pub fn kind(&self) -> &TemplateKind {
        &self.kind
    }

    /// Element of the bound cell.
    pub fn element(&self) -> Option<ElementId> {
        self.wrapper.as_ref().map(Wrapper::element)
    }

    /// Whether the row currently owns a cell.
    pub fn is_bound(&self) -> bool {
        self.wrapper.is_some()
    }

    /// Binds a cell if needed and inserts its element into `container` before
    /// `before`, or at the end when `before` is `None`. Then renders the row.
    ///
    /// Returns `Ok(false)` without touching the surface if the element is
    /// already in `container`. If `before` is no longer a child of
    /// `container`, the element is appended instead. If rendering fails the
    /// cell goes back to the cache and the row is left unbound.
    pub fn insert_in_dom<R>(
        &mut self,
        index: usize,
        container: ElementId,
        before: Option<ElementId>,
        cache: &mut CellCache<S>,
        renderer: &mut R,
        surface: &mut dyn Surface,
    ) -> Result<bool, SurfaceError>
    where
        R: RowRenderer<T, State = S>,
    {
        if let Some(element) = self.element() {
            if surface.parent_of(element) == Some(container) {
                return Ok(false);
            }
        }

        let wrapper = match self.wrapper.take() {
            Some(wrapper) => wrapper,
            None => cache.alloc(&self.kind, surface, renderer)?,
        };
        let element = wrapper.element();
        self.wrapper = Some(wrapper);

        match before {
            Some(sibling) => {
                if let Err(err) = surface.insert_before(container, element, sibling) {
                    warn!(
                        row = index,
                        sibling = %sibling,
                        error = %err,
                        "Insertion sibling vanished, appending row instead"
                    );
                    surface.append_child(container, element)?;
                }
            }
            None => surface.append_child(container, element)?,
        }

        if let Err(err) = self.render(index, renderer, surface) {
            // Never leave a half-rendered cell in the container.
            self.remove_from_dom(cache, surface);
            return Err(err);
        }
        Ok(true)
    }

    /// Re-binds row data into the bound cell: height, index attributes,
    /// trait classes, then the renderer's row callback. No-op when unbound.
    pub fn render<R>(
        &mut self,
        index: usize,
        renderer: &mut R,
        surface: &mut dyn Surface,
    ) -> Result<(), SurfaceError>
    where
        R: RowRenderer<T, State = S>,
    {
        let Some(wrapper) = self.wrapper.as_mut() else {
            return Ok(());
        };
        let element = wrapper.element();

        surface.set_style(element, "height", &format!("{}px", self.row.height()))?;
        surface.set_attribute(element, "data-index", Some(&index.to_string()))?;
        surface.set_attribute(element, "data-row-id", Some(self.row.id().as_str()))?;

        let wanted: Vec<String> = self
            .row
            .traits()
            .map(|t| t.class_name().to_string())
            .collect();
        for stale in wrapper.applied_classes.iter().filter(|c| !wanted.contains(c)) {
            surface.set_class(element, stale, false)?;
        }
        for class in &wanted {
            surface.set_class(element, class, true)?;
        }
        wrapper.applied_classes = wanted;

        renderer.render_row(self.row.data(), index, wrapper.state_mut(), surface)
    }

    /// Releases the bound cell back to the cache. No-op when unbound.
    ///
    /// Returns the element that was released.
    pub fn remove_from_dom(
        &mut self,
        cache: &mut CellCache<S>,
        surface: &mut dyn Surface,
    ) -> Option<ElementId> {
        let wrapper = self.wrapper.take()?;
        let element = wrapper.element();
        cache.release(wrapper, surface);
        Some(element)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{RowId, RowTrait};
    use crate::surface::HeadlessSurface;
    use crate::view_state::renderer::TextRenderer;

    struct Fixture {
        surface: HeadlessSurface,
        renderer: TextRenderer,
        cache: CellCache<crate::view_state::renderer::TextTemplate>,
        container: ElementId,
    }

    fn fixture() -> Fixture {
        let mut surface = HeadlessSurface::new();
        let container = surface.create_element("div");
        Fixture {
            surface,
            renderer: TextRenderer::new(20),
            cache: CellCache::new(),
            container,
        }
    }

    fn view_row(label: &str) -> ViewRow<String, crate::view_state::renderer::TextTemplate> {
        ViewRow::new(
            Row::new(RowId::new(label).unwrap(), label.to_string(), 20),
            TemplateKind::default(),
        )
    }

    #[test]
    fn insert_binds_and_renders() {
        let mut f = fixture();
        let mut row = view_row("alpha");

        let inserted = row
            .insert_in_dom(0, f.container, None, &mut f.cache, &mut f.renderer, &mut f.surface)
            .unwrap();

        assert!(inserted);
        let element = row.element().unwrap();
        assert_eq!(f.surface.children_of(f.container), vec![element]);
        assert_eq!(f.surface.style(element, "height"), Some("20px"));
        assert_eq!(f.surface.attribute(element, "data-index"), Some("0"));
        assert_eq!(f.surface.attribute(element, "data-row-id"), Some("alpha"));
        assert!(f.surface.dump(element).contains("alpha"));
    }

    #[test]
    fn insert_twice_is_noop() {
        let mut f = fixture();
        let mut row = view_row("alpha");

        row.insert_in_dom(0, f.container, None, &mut f.cache, &mut f.renderer, &mut f.surface)
            .unwrap();
        let again = row
            .insert_in_dom(0, f.container, None, &mut f.cache, &mut f.renderer, &mut f.surface)
            .unwrap();

        assert!(!again);
        assert_eq!(f.renderer.templates_built(), 1);
        assert_eq!(f.surface.children_of(f.container).len(), 1);
    }

    #[test]
    fn insert_before_missing_sibling_appends() {
        let mut f = fixture();
        let mut first = view_row("first");
        first
            .insert_in_dom(0, f.container, None, &mut f.cache, &mut f.renderer, &mut f.surface)
            .unwrap();
        let stray = f.surface.create_element("div");

        let mut second = view_row("second");
        let inserted = second
            .insert_in_dom(
                1,
                f.container,
                Some(stray),
                &mut f.cache,
                &mut f.renderer,
                &mut f.surface,
            )
            .unwrap();

        assert!(inserted);
        assert_eq!(
            f.surface.children_of(f.container),
            vec![first.element().unwrap(), second.element().unwrap()]
        );
    }

    #[test]
    fn remove_returns_cell_to_pool() {
        let mut f = fixture();
        let mut row = view_row("alpha");
        row.insert_in_dom(0, f.container, None, &mut f.cache, &mut f.renderer, &mut f.surface)
            .unwrap();

        let released = row.remove_from_dom(&mut f.cache, &mut f.surface);

        assert!(released.is_some());
        assert!(!row.is_bound());
        assert!(f.surface.children_of(f.container).is_empty());
        assert_eq!(f.cache.pooled(&TemplateKind::default()), 1);
        assert_eq!(row.remove_from_dom(&mut f.cache, &mut f.surface), None);
    }

    #[test]
    fn recycled_cell_drops_stale_trait_classes() {
        let mut f = fixture();
        let mut selected = view_row("a");
        selected.row_mut().set_trait(RowTrait::Selected, true);
        selected
            .insert_in_dom(0, f.container, None, &mut f.cache, &mut f.renderer, &mut f.surface)
            .unwrap();
        let element = selected.element().unwrap();
        assert!(f.surface.has_class(element, "selected"));
        selected.remove_from_dom(&mut f.cache, &mut f.surface);

        let mut plain = view_row("b");
        plain
            .insert_in_dom(1, f.container, None, &mut f.cache, &mut f.renderer, &mut f.surface)
            .unwrap();

        assert_eq!(plain.element(), Some(element));
        assert!(!f.surface.has_class(element, "selected"));
        assert_eq!(f.surface.attribute(element, "data-row-id"), Some("b"));
    }

    #[test]
    fn failed_render_releases_the_cell() {
        let mut f = fixture();
        let mut row = view_row("alpha");
        row.insert_in_dom(0, f.container, None, &mut f.cache, &mut f.renderer, &mut f.surface)
            .unwrap();
        let element = row.element().unwrap();
        let label = f.surface.children_of(element)[0];
        row.remove_from_dom(&mut f.cache, &mut f.surface);
        // The pooled cell loses its label, so the next text update fails.
        f.surface.remove_element(label).unwrap();

        let result =
            row.insert_in_dom(0, f.container, None, &mut f.cache, &mut f.renderer, &mut f.surface);

        assert_eq!(result, Err(SurfaceError::UnknownElement(label)));
        assert!(!row.is_bound());
        assert!(f.surface.children_of(f.container).is_empty());
        assert_eq!(f.cache.pooled(&TemplateKind::default()), 1);
    }
}
