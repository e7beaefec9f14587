//! Dialog controller.
//!
//! Owns the open/closed state machine, the ARIA attribute contract and
//! focus save/restore; delegates containment to the focus module.
//!
//! Two states, two edges: `open` and `close`, each an idempotent no-op
//! when invoked in the state it would produce. All attribute changes
//! within one transition are synchronous, so an event handler never
//! observes a half-open dialog.

use tracing::{debug, warn};

use veil_dom::{
    Document, ESCAPE_KEY, InputEvent, InputEventKind, NodeId, TAB_KEY, query_all,
};

use crate::focus;

/// How the inert targets are specified at construction
#[derive(Debug, Clone)]
pub enum TargetsSpec {
    /// Explicit ordered list
    Elements(Vec<NodeId>),
    /// A single element
    Element(NodeId),
    /// Everything in the document matching a selector
    Selector(String),
    /// Fall back to the element siblings of the dialog root
    Siblings,
}

/// An accessible modal dialog bound to one root element.
///
/// Targets, openers and closers are resolved once at construction and
/// never re-scanned; the focusable set, by contrast, is recomputed on
/// every key press.
#[derive(Debug)]
pub struct Dialog {
    root: NodeId,
    shown: bool,
    targets: Vec<NodeId>,
    openers: Vec<NodeId>,
    closers: Vec<NodeId>,
    /// Focus to restore on close. Captured on open, consumed on close.
    focus_before_open: Option<NodeId>,
}

impl Dialog {
    /// Bind a controller to `root`.
    ///
    /// Initial state is read from the root's `open` attribute, so a
    /// dialog rendered open stays open. Openers are matched through
    /// the root's `id`; without one, nothing outside the dialog can
    /// reference it and discovery silently yields no openers.
    pub fn new(doc: &Document, root: NodeId, targets: TargetsSpec) -> Self {
        let targets = resolve_targets(doc, root, targets);
        let shown = doc.tree().has_attr(root, "open");
        let (openers, closers) = discover_controls(doc, root);
        debug!(
            ?root,
            targets = targets.len(),
            openers = openers.len(),
            closers = closers.len(),
            shown,
            "dialog initialized"
        );
        Self {
            root,
            shown,
            targets,
            openers,
            closers,
            focus_before_open: None,
        }
    }

    /// The dialog root element
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Current state
    pub fn is_open(&self) -> bool {
        self.shown
    }

    /// Elements made inert while open
    pub fn targets(&self) -> &[NodeId] {
        &self.targets
    }

    /// Controls wired to open this dialog
    pub fn openers(&self) -> &[NodeId] {
        &self.openers
    }

    /// Controls wired to close this dialog
    pub fn closers(&self) -> &[NodeId] {
        &self.closers
    }

    /// Open the dialog. Idempotent.
    ///
    /// Targets go inert before focus moves, so assistive technology
    /// never announces an element that is about to be hidden while it
    /// still holds focus.
    pub fn open(&mut self, doc: &mut Document) -> &mut Self {
        if self.shown {
            return self;
        }
        self.shown = true;
        self.focus_before_open = doc.active_element();

        let tree = doc.tree_mut();
        tree.set_attr(self.root, "open", "");
        tree.set_attr(self.root, "aria-hidden", "false");
        for &target in &self.targets {
            tree.set_attr(target, "aria-hidden", "true");
        }
        focus::set_focus_to_first_item(doc, self.root);
        debug!(root = ?self.root, "dialog opened");
        self
    }

    /// Close the dialog. Idempotent.
    pub fn close(&mut self, doc: &mut Document) -> &mut Self {
        if !self.shown {
            return self;
        }
        self.shown = false;

        let tree = doc.tree_mut();
        tree.remove_attr(self.root, "open");
        tree.set_attr(self.root, "aria-hidden", "true");
        // Unconditional removal: a target that carried aria-hidden of
        // its own before opening loses it here. Accepted limitation.
        for &target in &self.targets {
            tree.remove_attr(target, "aria-hidden");
        }
        if let Some(previous) = self.focus_before_open.take() {
            doc.focus(previous);
        }
        debug!(root = ?self.root, "dialog closed");
        self
    }

    /// Route one event from the host's input stream.
    ///
    /// Keyboard and focus traffic is ignored while closed, which is
    /// what unsubscribing the listeners would achieve.
    pub fn handle_event(&mut self, doc: &mut Document, event: &mut InputEvent) {
        match event.kind {
            InputEventKind::Click => self.handle_click(doc, event.target),
            InputEventKind::KeyDown { key_code, .. } => {
                self.handle_key_down(doc, key_code, event);
            }
            InputEventKind::FocusIn => {
                if self.shown {
                    focus::maintain_focus(doc, self.root, event);
                }
            }
        }
    }

    fn handle_click(&mut self, doc: &mut Document, target: NodeId) {
        if self.openers.contains(&target) {
            self.open(doc);
        } else if self.closers.contains(&target) {
            self.close(doc);
        }
    }

    fn handle_key_down(&mut self, doc: &mut Document, key_code: u16, event: &mut InputEvent) {
        if !self.shown {
            return;
        }
        if key_code == ESCAPE_KEY {
            event.prevent_default();
            self.close(doc);
            return;
        }
        // Re-check state: a synchronous close above must stop any
        // further focus mutation for this keystroke.
        if key_code == TAB_KEY && self.shown {
            focus::trap_tab_key(doc, self.root, event);
        }
    }
}

fn resolve_targets(doc: &Document, root: NodeId, spec: TargetsSpec) -> Vec<NodeId> {
    let tree = doc.tree();
    match spec {
        TargetsSpec::Elements(list) => list,
        TargetsSpec::Element(id) => vec![id],
        TargetsSpec::Selector(selector) => match query_all(tree, tree.root(), &selector) {
            Ok(found) => found,
            Err(err) => {
                warn!(selector = %selector, %err, "unresolvable target selector, no elements will be disabled");
                Vec::new()
            }
        },
        TargetsSpec::Siblings => tree.element_siblings(root),
    }
}

/// Scan the document for controls wired to this dialog: openers name
/// the root by id, closers either sit inside the root (no value) or
/// name it explicitly.
fn discover_controls(doc: &Document, root: NodeId) -> (Vec<NodeId>, Vec<NodeId>) {
    let tree = doc.tree();
    let mut closers = query_all(tree, root, "[data-dialog-hide]").unwrap_or_default();
    let Some(id) = tree.attr(root, "id") else {
        return (Vec::new(), closers);
    };
    let openers =
        query_all(tree, tree.root(), &format!("[data-dialog-show=\"{id}\"]")).unwrap_or_default();
    let scoped = query_all(tree, tree.root(), &format!("[data-dialog-hide=\"{id}\"]"))
        .unwrap_or_default();
    for closer in scoped {
        if !closers.contains(&closer) {
            closers.push(closer);
        }
    }
    (openers, closers)
}

#[cfg(test)]
mod tests {
    use super::*;
    use veil_dom::reflow;

    fn page() -> (Document, Dialog, NodeId, NodeId) {
        let mut doc = Document::new();
        let root = doc.tree().root();
        let body = doc.tree_mut().create_element("body");
        let opener = doc
            .tree_mut()
            .create_element_with("button", &[("data-dialog-show", "d1")]);
        let main = doc.tree_mut().create_element("main");
        let dialog_root = doc.tree_mut().create_element_with("div", &[("id", "d1")]);
        let input = doc.tree_mut().create_element("input");
        doc.tree_mut().append_child(root, body);
        doc.tree_mut().append_child(body, opener);
        doc.tree_mut().append_child(body, main);
        doc.tree_mut().append_child(body, dialog_root);
        doc.tree_mut().append_child(dialog_root, input);
        reflow(doc.tree_mut(), 640.0);

        let dialog = Dialog::new(&doc, dialog_root, TargetsSpec::Siblings);
        (doc, dialog, dialog_root, opener)
    }

    #[test]
    fn test_sibling_targets_exclude_root() {
        let (_, dialog, root, opener) = page();
        assert!(!dialog.targets().contains(&root));
        assert!(dialog.targets().contains(&opener));
        assert_eq!(dialog.targets().len(), 2);
    }

    #[test]
    fn test_openers_discovered_by_id() {
        let (_, dialog, _, opener) = page();
        assert_eq!(dialog.openers(), &[opener]);
    }

    #[test]
    fn test_aria_contract_on_open_and_close() {
        let (mut doc, mut dialog, root, _) = page();
        dialog.open(&mut doc);
        assert_eq!(doc.tree().attr(root, "open"), Some(""));
        assert_eq!(doc.tree().attr(root, "aria-hidden"), Some("false"));
        for &target in dialog.targets() {
            assert_eq!(doc.tree().attr(target, "aria-hidden"), Some("true"));
        }

        dialog.close(&mut doc);
        assert!(!doc.tree().has_attr(root, "open"));
        assert_eq!(doc.tree().attr(root, "aria-hidden"), Some("true"));
        for &target in dialog.targets() {
            assert!(!doc.tree().has_attr(target, "aria-hidden"));
        }
    }

    #[test]
    fn test_open_reads_server_rendered_state() {
        let mut doc = Document::new();
        let root = doc.tree().root();
        let dialog_root = doc
            .tree_mut()
            .create_element_with("div", &[("id", "d1"), ("open", "")]);
        doc.tree_mut().append_child(root, dialog_root);
        reflow(doc.tree_mut(), 640.0);

        let dialog = Dialog::new(&doc, dialog_root, TargetsSpec::Siblings);
        assert!(dialog.is_open());
    }

    #[test]
    fn test_explicit_target_specs() {
        let (doc, ..) = page();
        let root = doc.element_by_id("d1").unwrap();

        let by_list = Dialog::new(&doc, root, TargetsSpec::Elements(vec![root]));
        assert_eq!(by_list.targets(), &[root]);

        let by_one = Dialog::new(&doc, root, TargetsSpec::Element(root));
        assert_eq!(by_one.targets(), &[root]);

        let by_selector = Dialog::new(&doc, root, TargetsSpec::Selector("main".into()));
        assert_eq!(by_selector.targets().len(), 1);
    }

    #[test]
    fn test_bad_selector_degrades_to_empty() {
        let (doc, _, root, _) = page();
        let dialog = Dialog::new(&doc, root, TargetsSpec::Selector("main aside".into()));
        assert!(dialog.targets().is_empty());
    }
}
