//! Pool of recyclable row cells keyed by template kind.

use super::renderer::TemplateRenderer;
use crate::model::TemplateKind;
use crate::surface::{ElementId, Surface, SurfaceError};
use std::collections::HashMap;
use tracing::{debug, trace, warn};

/// Class carried by every row element.
pub const ROW_CLASS: &str = "row";

/// A row element plus the template render state built inside it.
///
/// Owned by the [`CellCache`] while idle and by exactly one view row while in
/// use. Never cloned.
#[derive(Debug)]
pub struct Wrapper<S> {
    kind: TemplateKind,
    element: ElementId,
    state: S,
    /// Trait classes currently applied to `element`.
    pub(crate) applied_classes: Vec<String>,
}

impl<S> Wrapper<S> {
    /// Template kind of the cell.
    pub fn kind(&self) -> &TemplateKind {
        &self.kind
    }

    /// Root element of the cell.
    pub fn element(&self) -> ElementId {
        self.element
    }

    /// Renderer state built with the cell.
    pub fn state(&self) -> &S {
        &self.state
    }

    /// Mutable renderer state.
    pub fn state_mut(&mut self) -> &mut S {
        &mut self.state
    }
}

/// Idle cells grouped by template kind.
#[derive(Debug)]
pub struct CellCache<S> {
    pools: HashMap<TemplateKind, Vec<Wrapper<S>>>,
}

impl<S> CellCache<S> {
    /// Empty cache.
    pub fn new() -> Self {
        Self {
            pools: HashMap::new(),
        }
    }

    /// Takes an idle cell of `kind`, or builds one through the renderer.
    pub fn alloc<R>(
        &mut self,
        kind: &TemplateKind,
        surface: &mut dyn Surface,
        renderer: &mut R,
    ) -> Result<Wrapper<S>, SurfaceError>
    where
        R: TemplateRenderer<State = S> + ?Sized,
    {
        if let Some(wrapper) = self.pools.get_mut(kind).and_then(Vec::pop) {
            trace!(kind = %kind, element = %wrapper.element, "Reusing pooled cell");
            return Ok(wrapper);
        }

        let element = surface.create_element("div");
        let built = match surface.set_class(element, ROW_CLASS, true) {
            Ok(()) => renderer.render_template(kind, element, surface),
            Err(err) => Err(err),
        };
        match built {
            Ok(state) => {
                debug!(kind = %kind, element = %element, "Built new cell");
                Ok(Wrapper {
                    kind: kind.clone(),
                    element,
                    state,
                    applied_classes: Vec::new(),
                })
            }
            Err(err) => {
                if let Err(cleanup) = surface.remove_element(element) {
                    warn!(error = %cleanup, element = %element, "Failed to remove unbuilt cell element");
                }
                Err(err)
            }
        }
    }

    /// Detaches the cell's element and returns the cell to its pool.
    ///
    /// Detaching an element that is not attached is not an error.
    pub fn release(&mut self, wrapper: Wrapper<S>, surface: &mut dyn Surface) {
        match surface.detach(wrapper.element) {
            Ok(()) => {}
            Err(SurfaceError::NotAttached(element)) => {
                debug!(element = %element, "Released cell was already detached");
            }
            Err(err) => {
                warn!(error = %err, "Failed to detach released cell");
            }
        }
        self.pools
            .entry(wrapper.kind.clone())
            .or_default()
            .push(wrapper);
    }

    /// Tears down every idle cell and empties the pool.
    ///
    /// Returns the number of cells disposed.
    pub fn garbage_collect<R>(&mut self, surface: &mut dyn Surface, renderer: &mut R) -> usize
    where
        R: TemplateRenderer<State = S> + ?Sized,
    {
        let mut disposed = 0;
        for (kind, wrappers) in self.pools.drain() {
            for wrapper in wrappers {
                renderer.dispose_template(&kind, wrapper.state, surface);
                if let Err(err) = surface.remove_element(wrapper.element) {
                    warn!(error = %err, "Failed to remove disposed cell element");
                }
                disposed += 1;
            }
        }
        debug!(disposed, "Cell cache garbage-collected");
        disposed
    }

    /// Idle cells of one kind.
    pub fn pooled(&self, kind: &TemplateKind) -> usize {
        self.pools.get(kind).map_or(0, Vec::len)
    }

    /// Idle cells across all kinds.
    pub fn len(&self) -> usize {
        self.pools.values().map(Vec::len).sum()
    }

    /// Whether no cells are pooled.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<S> Default for CellCache<S> {
    fn default() -> Self {
        Self::new()
    }
}
