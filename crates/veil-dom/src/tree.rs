//! DOM Tree (arena-based allocation)

use crate::NodeId;
use crate::node::Node;

/// Arena-based DOM tree. Index 0 is always the document node.
#[derive(Debug)]
pub struct DomTree {
    nodes: Vec<Node>,
}

impl DomTree {
    /// Create a tree holding only the document node
    pub fn new() -> Self {
        Self {
            nodes: vec![Node::document()],
        }
    }

    /// The document node
    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// Get a node by ID
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index())
    }

    /// Get a mutable node by ID
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.index())
    }

    /// Number of nodes in the tree
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if tree holds only the document node
    pub fn is_empty(&self) -> bool {
        self.nodes.len() == 1
    }

    /// Create a detached element node
    pub fn create_element(&mut self, tag: &str) -> NodeId {
        self.push(Node::element(tag))
    }

    /// Create a detached element node with initial attributes
    pub fn create_element_with(&mut self, tag: &str, attrs: &[(&str, &str)]) -> NodeId {
        let id = self.create_element(tag);
        for (name, value) in attrs {
            self.set_attr(id, name, value);
        }
        id
    }

    /// Create a detached text node
    pub fn create_text(&mut self, content: &str) -> NodeId {
        self.push(Node::text(content))
    }

    fn push(&mut self, node: Node) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(node);
        id
    }

    /// Append `child` as the last child of `parent`.
    ///
    /// No-op on unknown ids; `child` must be detached.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        if self.get(parent).is_none() || self.get(child).is_none() || parent == child {
            return;
        }
        let prev = self.get(parent).and_then(|n| n.last_child);
        if let Some(node) = self.get_mut(child) {
            node.parent = Some(parent);
            node.prev_sibling = prev;
        }
        if let Some(prev) = prev {
            if let Some(node) = self.get_mut(prev) {
                node.next_sibling = Some(child);
            }
        }
        if let Some(node) = self.get_mut(parent) {
            if node.first_child.is_none() {
                node.first_child = Some(child);
            }
            node.last_child = Some(child);
        }
    }

    /// Parent of a node
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.get(id)?.parent
    }

    /// Direct children, in order
    pub fn children(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        let mut next = self.get(id).and_then(|n| n.first_child);
        std::iter::from_fn(move || {
            let current = next?;
            next = self.get(current).and_then(|n| n.next_sibling);
            Some(current)
        })
    }

    /// All descendants of `scope` in document (pre-order) order,
    /// excluding `scope` itself. Lazy; restart by calling again.
    pub fn descendants(&self, scope: NodeId) -> Descendants<'_> {
        Descendants {
            tree: self,
            scope,
            next: self.get(scope).and_then(|n| n.first_child),
        }
    }

    /// DOM-style containment: true if `id` is `ancestor` or one of its
    /// descendants.
    pub fn contains(&self, ancestor: NodeId, id: NodeId) -> bool {
        let mut at = Some(id);
        while let Some(current) = at {
            if current == ancestor {
                return true;
            }
            at = self.get(current).and_then(|n| n.parent);
        }
        false
    }

    /// Element siblings of `id` (excluding `id` itself), in order
    pub fn element_siblings(&self, id: NodeId) -> Vec<NodeId> {
        let Some(parent) = self.parent(id) else {
            return Vec::new();
        };
        self.children(parent)
            .filter(|&c| c != id && self.get(c).is_some_and(Node::is_element))
            .collect()
    }

    /// Tag name of an element node
    pub fn tag_name(&self, id: NodeId) -> Option<&str> {
        self.get(id)?.as_element().map(|e| e.tag.as_str())
    }

    /// Attribute value on an element node
    pub fn attr(&self, id: NodeId, name: &str) -> Option<&str> {
        self.get(id)?.as_element()?.get_attr(name)
    }

    /// Check for an attribute regardless of value
    pub fn has_attr(&self, id: NodeId, name: &str) -> bool {
        self.get(id)
            .and_then(Node::as_element)
            .is_some_and(|e| e.has_attr(name))
    }

    /// Set an attribute. Silently ignored on non-element nodes.
    pub fn set_attr(&mut self, id: NodeId, name: &str, value: &str) {
        if let Some(el) = self.get_mut(id).and_then(Node::as_element_mut) {
            el.set_attr(name, value);
        }
    }

    /// Remove an attribute. Silently ignored on non-element nodes.
    pub fn remove_attr(&mut self, id: NodeId, name: &str) {
        if let Some(el) = self.get_mut(id).and_then(Node::as_element_mut) {
            el.remove_attr(name);
        }
    }
}

impl Default for DomTree {
    fn default() -> Self {
        Self::new()
    }
}

/// Lazy pre-order traversal over the descendants of one node
pub struct Descendants<'a> {
    tree: &'a DomTree,
    scope: NodeId,
    next: Option<NodeId>,
}

impl Descendants<'_> {
    fn advance(&self, from: NodeId) -> Option<NodeId> {
        let node = self.tree.get(from)?;
        if let Some(child) = node.first_child {
            return Some(child);
        }
        let mut at = from;
        loop {
            if at == self.scope {
                return None;
            }
            let node = self.tree.get(at)?;
            if let Some(sibling) = node.next_sibling {
                return Some(sibling);
            }
            at = node.parent?;
        }
    }
}

impl Iterator for Descendants<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let current = self.next?;
        self.next = self.advance(current);
        Some(current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_append_and_children_order() {
        let mut tree = DomTree::new();
        let a = tree.create_element("div");
        let b = tree.create_element("span");
        let c = tree.create_element("p");
        tree.append_child(tree.root(), a);
        tree.append_child(a, b);
        tree.append_child(a, c);

        let kids: Vec<_> = tree.children(a).collect();
        assert_eq!(kids, vec![b, c]);
        assert_eq!(tree.parent(b), Some(a));
        assert_eq!(tree.len(), 4);
    }

    #[test]
    fn test_descendants_preorder() {
        let mut tree = DomTree::new();
        let root = tree.create_element("div");
        let a = tree.create_element("section");
        let a1 = tree.create_element("input");
        let a2 = tree.create_element("button");
        let b = tree.create_element("footer");
        tree.append_child(tree.root(), root);
        tree.append_child(root, a);
        tree.append_child(a, a1);
        tree.append_child(a, a2);
        tree.append_child(root, b);

        let order: Vec<_> = tree.descendants(root).collect();
        assert_eq!(order, vec![a, a1, a2, b]);
    }

    #[test]
    fn test_descendants_does_not_escape_scope() {
        let mut tree = DomTree::new();
        let dialog = tree.create_element("div");
        let inner = tree.create_element("input");
        let after = tree.create_element("p");
        tree.append_child(tree.root(), dialog);
        tree.append_child(dialog, inner);
        tree.append_child(tree.root(), after);

        let order: Vec<_> = tree.descendants(dialog).collect();
        assert_eq!(order, vec![inner]);
    }

    #[test]
    fn test_contains_includes_self() {
        let mut tree = DomTree::new();
        let outer = tree.create_element("div");
        let inner = tree.create_element("input");
        let other = tree.create_element("p");
        tree.append_child(tree.root(), outer);
        tree.append_child(outer, inner);
        tree.append_child(tree.root(), other);

        assert!(tree.contains(outer, outer));
        assert!(tree.contains(outer, inner));
        assert!(!tree.contains(outer, other));
    }

    #[test]
    fn test_element_siblings_skip_text() {
        let mut tree = DomTree::new();
        let body = tree.create_element("body");
        let main = tree.create_element("main");
        let text = tree.create_text("hello");
        let aside = tree.create_element("aside");
        let dialog = tree.create_element("div");
        tree.append_child(tree.root(), body);
        tree.append_child(body, main);
        tree.append_child(body, text);
        tree.append_child(body, aside);
        tree.append_child(body, dialog);

        assert_eq!(tree.element_siblings(dialog), vec![main, aside]);
    }

    #[test]
    fn test_attr_helpers_ignore_text_nodes() {
        let mut tree = DomTree::new();
        let text = tree.create_text("hello");
        tree.set_attr(text, "open", "");
        assert!(!tree.has_attr(text, "open"));
        assert_eq!(tree.attr(text, "open"), None);
    }
}
