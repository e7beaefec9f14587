//! Document - tree plus focus tracking.

use crate::NodeId;
use crate::node::Node;
use crate::tree::DomTree;

/// A document: the node tree and the single focus slot.
///
/// Focus is the only piece of state the dialog controller reads from
/// the document besides attributes; all mutation happens from one
/// thread, event handler by event handler.
#[derive(Debug)]
pub struct Document {
    tree: DomTree,
    active_element: Option<NodeId>,
}

impl Document {
    pub fn new() -> Self {
        Self {
            tree: DomTree::new(),
            active_element: None,
        }
    }

    /// Access the DOM tree
    pub fn tree(&self) -> &DomTree {
        &self.tree
    }

    /// Access the DOM tree mutably
    pub fn tree_mut(&mut self) -> &mut DomTree {
        &mut self.tree
    }

    /// The element currently holding focus, if any
    pub fn active_element(&self) -> Option<NodeId> {
        self.active_element
    }

    /// Move focus to an element. Returns false (and leaves focus
    /// untouched) if `id` is not an element node.
    pub fn focus(&mut self, id: NodeId) -> bool {
        if self.tree.get(id).is_some_and(Node::is_element) {
            self.active_element = Some(id);
            true
        } else {
            false
        }
    }

    /// Drop focus entirely
    pub fn blur(&mut self) {
        self.active_element = None;
    }

    /// Get element by ID (first match in document order)
    pub fn element_by_id(&self, id: &str) -> Option<NodeId> {
        self.tree.descendants(self.tree.root()).find(|&n| {
            self.tree
                .get(n)
                .and_then(Node::as_element)
                .and_then(|e| e.id.as_deref())
                == Some(id)
        })
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_element_by_id() {
        let mut doc = Document::new();
        let root = doc.tree().root();
        let a = doc.tree_mut().create_element_with("div", &[("id", "a")]);
        let b = doc.tree_mut().create_element_with("div", &[("id", "b")]);
        doc.tree_mut().append_child(root, a);
        doc.tree_mut().append_child(root, b);

        assert_eq!(doc.element_by_id("b"), Some(b));
        assert_eq!(doc.element_by_id("missing"), None);
    }

    #[test]
    fn test_focus_rejects_non_elements() {
        let mut doc = Document::new();
        let root = doc.tree().root();
        let text = doc.tree_mut().create_text("hi");
        let input = doc.tree_mut().create_element("input");
        doc.tree_mut().append_child(root, text);
        doc.tree_mut().append_child(root, input);

        assert!(!doc.focus(text));
        assert_eq!(doc.active_element(), None);
        assert!(doc.focus(input));
        assert_eq!(doc.active_element(), Some(input));
        doc.blur();
        assert_eq!(doc.active_element(), None);
    }
}
