//! Layout geometry - synthetic boxes backing the visibility filter.
//!
//! A real engine would run layout; here a naive stacked-box pass is
//! enough to distinguish rendered elements from hidden ones, which is
//! all the focus trap needs.

use tracing::debug;

use crate::NodeId;
use crate::node::Node;
use crate::tree::DomTree;

/// Rectangle geometry
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    /// Create with dimensions
    pub fn from_xywh(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Right edge
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    /// Bottom edge
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }
}

/// Rendered box of an element
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ElementGeometry {
    pub offset_width: f64,
    pub offset_height: f64,
    pub client_rects: Vec<Rect>,
}

impl ElementGeometry {
    /// Whether the element takes up any rendered space. Mirrors the
    /// offsetWidth / offsetHeight / getClientRects().length check used
    /// for visible focusability.
    pub fn is_rendered(&self) -> bool {
        self.offset_width > 0.0 || self.offset_height > 0.0 || !self.client_rects.is_empty()
    }
}

const LINE_HEIGHT: f64 = 20.0;

/// Assign synthetic geometry to every element: stacked full-width
/// boxes, except that an element under a `hidden` attribute (its own
/// or an ancestor's) gets zero size and no client rects.
pub fn reflow(tree: &mut DomTree, viewport_width: f64) {
    let ids: Vec<NodeId> = tree.descendants(tree.root()).collect();
    let mut y = 0.0;
    let mut laid_out = 0usize;
    for id in ids {
        if !tree.get(id).is_some_and(Node::is_element) {
            continue;
        }
        let geometry = if hidden_in_tree(tree, id) {
            ElementGeometry::default()
        } else {
            let rect = Rect::from_xywh(0.0, y, viewport_width, LINE_HEIGHT);
            y += LINE_HEIGHT;
            laid_out += 1;
            ElementGeometry {
                offset_width: viewport_width,
                offset_height: LINE_HEIGHT,
                client_rects: vec![rect],
            }
        };
        if let Some(el) = tree.get_mut(id).and_then(Node::as_element_mut) {
            el.geometry = geometry;
        }
    }
    debug!(elements = laid_out, viewport_width, "reflow complete");
}

fn hidden_in_tree(tree: &DomTree, id: NodeId) -> bool {
    let mut at = Some(id);
    while let Some(current) = at {
        if tree.has_attr(current, "hidden") {
            return true;
        }
        at = tree.parent(current);
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reflow_gives_elements_size() {
        let mut tree = DomTree::new();
        let div = tree.create_element("div");
        let input = tree.create_element("input");
        tree.append_child(tree.root(), div);
        tree.append_child(div, input);
        reflow(&mut tree, 640.0);

        let geo = &tree.get(input).unwrap().as_element().unwrap().geometry;
        assert!(geo.is_rendered());
        assert_eq!(geo.offset_width, 640.0);
        assert_eq!(geo.client_rects.len(), 1);
    }

    #[test]
    fn test_hidden_zeroes_subtree() {
        let mut tree = DomTree::new();
        let div = tree.create_element_with("div", &[("hidden", "")]);
        let input = tree.create_element("input");
        tree.append_child(tree.root(), div);
        tree.append_child(div, input);
        reflow(&mut tree, 640.0);

        let geo = &tree.get(input).unwrap().as_element().unwrap().geometry;
        assert!(!geo.is_rendered());
        assert!(geo.client_rects.is_empty());
    }

    #[test]
    fn test_rect_edges() {
        let rect = Rect::from_xywh(10.0, 20.0, 100.0, 50.0);
        assert_eq!(rect.right(), 110.0);
        assert_eq!(rect.bottom(), 70.0);
    }
}
