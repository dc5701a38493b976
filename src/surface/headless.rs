//! In-memory element tree implementing [`Surface`].

use super::{ElementId, Surface, SurfaceError};
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::fmt::Write as _;

#[derive(Debug, Clone, Default)]
struct Node {
    tag: String,
    parent: Option<ElementId>,
    children: Vec<ElementId>,
    styles: BTreeMap<String, String>,
    classes: BTreeSet<String>,
    attributes: BTreeMap<String, String>,
    text: String,
    scroll: Option<ScrollState>,
}

/// Scroll state last published for a scrollable element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScrollState {
    /// Published scroll offset.
    pub scroll_top: usize,
    /// Height of the visible area.
    pub viewport_height: usize,
    /// Height of all content.
    pub content_height: usize,
}

/// Arena-backed surface with DOM-like tree semantics.
#[derive(Debug, Default)]
pub struct HeadlessSurface {
    nodes: HashMap<ElementId, Node>,
    next_id: u64,
    created: usize,
    /// Pending insertion faults, consumed by the next `insert_before` call.
    fail_next_insert: bool,
}

impl HeadlessSurface {
    /// Empty surface with no elements.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of elements ever created.
    pub fn created_count(&self) -> usize {
        self.created
    }

    /// Number of live elements.
    pub fn live_count(&self) -> usize {
        self.nodes.len()
    }

    /// Whether `element` exists and has not been removed.
    pub fn contains(&self, element: ElementId) -> bool {
        self.nodes.contains_key(&element)
    }

    /// Tag name of `element`.
    pub fn tag(&self, element: ElementId) -> Option<&str> {
        self.nodes.get(&element).map(|n| n.tag.as_str())
    }

    /// Value of an inline style property.
    pub fn style(&self, element: ElementId, property: &str) -> Option<&str> {
        self.nodes
            .get(&element)
            .and_then(|n| n.styles.get(property))
            .map(String::as_str)
    }

    /// Whether `element` carries `class`.
    pub fn has_class(&self, element: ElementId, class: &str) -> bool {
        self.nodes
            .get(&element)
            .is_some_and(|n| n.classes.contains(class))
    }

    /// Value of attribute `name`.
    pub fn attribute(&self, element: ElementId, name: &str) -> Option<&str> {
        self.nodes
            .get(&element)
            .and_then(|n| n.attributes.get(name))
            .map(String::as_str)
    }

    /// Text content set by `set_text`.
    pub fn text(&self, element: ElementId) -> Option<&str> {
        self.nodes.get(&element).map(|n| n.text.as_str())
    }

    /// Last scroll state published for `element`.
    pub fn scroll_state(&self, element: ElementId) -> Option<ScrollState> {
        self.nodes.get(&element).and_then(|n| n.scroll)
    }

    /// Makes the next `insert_before` behave as if its reference sibling had
    /// just been removed from the container.
    pub fn fail_next_insert(&mut self) {
        self.fail_next_insert = true;
    }

    /// Renders the subtree under `root` as indented text.
    pub fn dump(&self, root: ElementId) -> String {
        let mut out = String::new();
        self.dump_into(root, 0, &mut out);
        out
    }

    fn dump_into(&self, element: ElementId, depth: usize, out: &mut String) {
        let Some(node) = self.nodes.get(&element) else {
            return;
        };
        let _ = write!(out, "{}<{}", "  ".repeat(depth), node.tag);
        if !node.classes.is_empty() {
            let classes: Vec<&str> = node.classes.iter().map(String::as_str).collect();
            let _ = write!(out, " class=\"{}\"", classes.join(" "));
        }
        for (name, value) in &node.attributes {
            let _ = write!(out, " {}=\"{}\"", name, value);
        }
        if !node.styles.is_empty() {
            let styles: Vec<String> = node
                .styles
                .iter()
                .map(|(k, v)| format!("{}: {}", k, v))
                .collect();
            let _ = write!(out, " style=\"{}\"", styles.join("; "));
        }
        out.push('>');
        if !node.text.is_empty() {
            out.push_str(&node.text);
        }
        out.push('\n');
        for child in &node.children {
            self.dump_into(*child, depth + 1, out);
        }
    }

    fn node_mut(&mut self, element: ElementId) -> Result<&mut Node, SurfaceError> {
        self.nodes
            .get_mut(&element)
            .ok_or(SurfaceError::UnknownElement(element))
    }

    fn ensure_live(&self, element: ElementId) -> Result<(), SurfaceError> {
        if self.nodes.contains_key(&element) {
            Ok(())
        } else {
            Err(SurfaceError::UnknownElement(element))
        }
    }

    fn is_ancestor_or_self(&self, candidate: ElementId, mut element: ElementId) -> bool {
        loop {
            if element == candidate {
                return true;
            }
            match self.parent_of(element) {
                Some(parent) => element = parent,
                None => return false,
            }
        }
    }

    fn unlink(&mut self, element: ElementId) {
        let parent = self.nodes.get_mut(&element).and_then(|n| n.parent.take());
        if let Some(parent) = parent.and_then(|p| self.nodes.get_mut(&p)) {
            parent.children.retain(|c| *c != element);
        }
    }

    fn check_attach(&self, parent: ElementId, child: ElementId) -> Result<(), SurfaceError> {
        self.ensure_live(parent)?;
        self.ensure_live(child)?;
        if self.is_ancestor_or_self(child, parent) {
            return Err(SurfaceError::Cycle(child));
        }
        Ok(())
    }
}

impl Surface for HeadlessSurface {
    fn create_element(&mut self, tag: &str) -> ElementId {
        let id = ElementId::new(self.next_id);
        self.next_id += 1;
        self.created += 1;
        self.nodes.insert(
            id,
            Node {
                tag: tag.to_string(),
                ..Node::default()
            },
        );
        id
    }

    fn remove_element(&mut self, element: ElementId) -> Result<(), SurfaceError> {
        self.ensure_live(element)?;
        self.unlink(element);
        let mut stack = vec![element];
        while let Some(id) = stack.pop() {
            if let Some(node) = self.nodes.remove(&id) {
                stack.extend(node.children);
            }
        }
        Ok(())
    }

    fn append_child(&mut self, parent: ElementId, child: ElementId) -> Result<(), SurfaceError> {
        self.check_attach(parent, child)?;
        self.unlink(child);
        self.node_mut(child)?.parent = Some(parent);
        self.node_mut(parent)?.children.push(child);
        Ok(())
    }

    fn insert_before(
        &mut self,
        parent: ElementId,
        child: ElementId,
        reference: ElementId,
    ) -> Result<(), SurfaceError> {
        self.check_attach(parent, child)?;
        if std::mem::take(&mut self.fail_next_insert) {
            return Err(SurfaceError::NotAChild {
                parent,
                child: reference,
            });
        }
        if self.parent_of(reference) != Some(parent) || reference == child {
            return Err(SurfaceError::NotAChild {
                parent,
                child: reference,
            });
        }
        self.unlink(child);
        self.node_mut(child)?.parent = Some(parent);
        let siblings = &mut self.node_mut(parent)?.children;
        let position = siblings
            .iter()
            .position(|c| *c == reference)
            .unwrap_or(siblings.len());
        siblings.insert(position, child);
        Ok(())
    }

    fn detach(&mut self, element: ElementId) -> Result<(), SurfaceError> {
        if self.parent_of(element).is_none() {
            self.ensure_live(element)?;
            return Err(SurfaceError::NotAttached(element));
        }
        self.unlink(element);
        Ok(())
    }

    fn parent_of(&self, element: ElementId) -> Option<ElementId> {
        self.nodes.get(&element).and_then(|n| n.parent)
    }

    fn children_of(&self, element: ElementId) -> Vec<ElementId> {
        self.nodes
            .get(&element)
            .map(|n| n.children.clone())
            .unwrap_or_default()
    }

    fn set_style(
        &mut self,
        element: ElementId,
        property: &str,
        value: &str,
    ) -> Result<(), SurfaceError> {
        self.node_mut(element)?
            .styles
            .insert(property.to_string(), value.to_string());
        Ok(())
    }

    fn set_class(
        &mut self,
        element: ElementId,
        class: &str,
        on: bool,
    ) -> Result<(), SurfaceError> {
        let classes = &mut self.node_mut(element)?.classes;
        if on {
            classes.insert(class.to_string());
        } else {
            classes.remove(class);
        }
        Ok(())
    }

    fn set_attribute(
        &mut self,
        element: ElementId,
        name: &str,
        value: Option<&str>,
    ) -> Result<(), SurfaceError> {
        let attributes = &mut self.node_mut(element)?.attributes;
        match value {
            Some(value) => {
                attributes.insert(name.to_string(), value.to_string());
            }
            None => {
                attributes.remove(name);
            }
        }
        Ok(())
    }

    fn set_text(&mut self, element: ElementId, text: &str) -> Result<(), SurfaceError> {
        self.node_mut(element)?.text = text.to_string();
        Ok(())
    }

    fn set_scroll_state(
        &mut self,
        element: ElementId,
        scroll_top: usize,
        viewport_height: usize,
        content_height: usize,
    ) -> Result<(), SurfaceError> {
        self.node_mut(element)?.scroll = Some(ScrollState {
            scroll_top,
            viewport_height,
            content_height,
        });
        Ok(())
    }
}
