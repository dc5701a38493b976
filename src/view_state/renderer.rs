//! Host-supplied rendering contracts.
//!
//! A renderer owns one template per pooled cell. Templates are built once per
//! cell, bound to many rows over the cell's lifetime, and torn down when the
//! cell pool is garbage-collected.

use crate::model::{InputEvent, Row, RowId, TemplateKind};
use crate::surface::{ElementId, Surface, SurfaceError};
use tracing::warn;

/// Template construction and teardown, independent of the row data type.
pub trait TemplateRenderer {
    /// Template-specific render state kept alongside each pooled element.
    type State;

    /// Builds the template for `kind` inside the freshly created row `element`.
    fn render_template(
        &mut self,
        kind: &TemplateKind,
        element: ElementId,
        surface: &mut dyn Surface,
    ) -> Result<Self::State, SurfaceError>;

    /// Tears down a template built by `render_template`.
    fn dispose_template(&mut self, kind: &TemplateKind, state: Self::State, surface: &mut dyn Surface);
}

/// Row-level rendering: template resolution, measurement, and data binding.
pub trait RowRenderer<T>: TemplateRenderer {
    /// Template a row requires. Rows of the same kind share pooled cells.
    fn template_kind(&self, data: &T) -> TemplateKind;

    /// Pixel height of a row.
    fn height(&self, data: &T) -> usize;

    /// Binds row data into a constructed template.
    fn render_row(
        &mut self,
        data: &T,
        index: usize,
        state: &mut Self::State,
        surface: &mut dyn Surface,
    ) -> Result<(), SurfaceError>;
}

/// Source of row data.
pub trait DataSource<T> {
    /// Number of rows.
    fn len(&self) -> usize;

    /// Whether the source has no rows.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Data of row `index`.
    fn row_at(&self, index: usize) -> T;

    /// Stable identity of the row at `index`.
    fn row_id(&self, index: usize) -> RowId {
        RowId::from(index)
    }
}

impl<T: Clone> DataSource<T> for Vec<T> {
    fn len(&self) -> usize {
        self.as_slice().len()
    }

    fn row_at(&self, index: usize) -> T {
        self[index].clone()
    }
}

/// Receives input events resolved to the row they landed on.
pub trait Controller<T> {
    /// Returns true if the event was handled.
    fn handle(&mut self, index: usize, row: &Row<T>, event: &InputEvent) -> bool;
}

impl<T, F> Controller<T> for F
where
    F: FnMut(usize, &Row<T>, &InputEvent) -> bool,
{
    fn handle(&mut self, index: usize, row: &Row<T>, event: &InputEvent) -> bool {
        self(index, row, event)
    }
}

/// Renders string rows into a single text template. Used by the command-line
/// driver and tests.
#[derive(Debug, Clone)]
pub struct TextRenderer {
    row_height: usize,
    kind: TemplateKind,
    templates_built: usize,
    templates_disposed: usize,
}

/// Render state of a [`TextRenderer`] template.
#[derive(Debug)]
pub struct TextTemplate {
    /// Text node inside the cell.
    pub label: ElementId,
}

impl TextRenderer {
    /// Renderer producing rows of `row_height` pixels.
    pub fn new(row_height: usize) -> Self {
        Self {
            row_height,
            kind: TemplateKind::default(),
            templates_built: 0,
            templates_disposed: 0,
        }
    }

    /// Templates built so far.
    pub fn templates_built(&self) -> usize {
        self.templates_built
    }

    /// Templates disposed so far.
    pub fn templates_disposed(&self) -> usize {
        self.templates_disposed
    }
}

impl TemplateRenderer for TextRenderer {
    type State = TextTemplate;

    fn render_template(
        &mut self,
        _kind: &TemplateKind,
        element: ElementId,
        surface: &mut dyn Surface,
    ) -> Result<TextTemplate, SurfaceError> {
        let label = surface.create_element("span");
        surface.append_child(element, label)?;
        self.templates_built += 1;
        Ok(TextTemplate { label })
    }

    fn dispose_template(
        &mut self,
        _kind: &TemplateKind,
        state: TextTemplate,
        surface: &mut dyn Surface,
    ) {
        if let Err(err) = surface.remove_element(state.label) {
            warn!(error = %err, "Failed to remove text template");
        }
        self.templates_disposed += 1;
    }
}

impl RowRenderer<String> for TextRenderer {
    fn template_kind(&self, _data: &String) -> TemplateKind {
        self.kind.clone()
    }

    fn height(&self, _data: &String) -> usize {
        self.row_height
    }

    fn render_row(
        &mut self,
        data: &String,
        _index: usize,
        state: &mut TextTemplate,
        surface: &mut dyn Surface,
    ) -> Result<(), SurfaceError> {
        surface.set_text(state.label, data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::HeadlessSurface;

    #[test]
    fn dispose_counts_template_whose_label_is_gone() {
        let mut surface = HeadlessSurface::new();
        let mut renderer = TextRenderer::new(20);
        let kind = TemplateKind::default();
        let cell = surface.create_element("div");
        let state = renderer.render_template(&kind, cell, &mut surface).unwrap();

        surface.remove_element(cell).unwrap();
        renderer.dispose_template(&kind, state, &mut surface);

        assert_eq!(renderer.templates_built(), 1);
        assert_eq!(renderer.templates_disposed(), 1);
        assert_eq!(surface.live_count(), 0);
    }
}
