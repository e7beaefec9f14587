//! Event routing.
//!
//! Fans the host's input stream out to registered dialogs. A closed
//! dialog ignores keyboard and focus traffic, so routing every event
//! to every dialog is equivalent to per-dialog listener subscription
//! and unsubscription.

use veil_dom::{Document, InputEvent, Node, NodeId};

use crate::dialog::{Dialog, TargetsSpec};
use crate::DialogError;

/// Handle for a dialog registered with a router
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DialogId(usize);

/// Routes input events to every registered dialog
#[derive(Debug, Default)]
pub struct EventRouter {
    dialogs: Vec<Dialog>,
}

impl EventRouter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an already-constructed dialog
    pub fn register(&mut self, dialog: Dialog) -> DialogId {
        self.dialogs.push(dialog);
        DialogId(self.dialogs.len() - 1)
    }

    /// Register a dialog rooted at the element carrying `id`
    pub fn register_by_id(
        &mut self,
        doc: &Document,
        id: &str,
        targets: TargetsSpec,
    ) -> Result<DialogId, DialogError> {
        let root = doc
            .element_by_id(id)
            .ok_or_else(|| DialogError::UnknownDialog(id.to_string()))?;
        self.register_root(doc, root, targets)
    }

    /// Register a dialog rooted at `root`, which must be an element
    pub fn register_root(
        &mut self,
        doc: &Document,
        root: NodeId,
        targets: TargetsSpec,
    ) -> Result<DialogId, DialogError> {
        if !doc.tree().get(root).is_some_and(Node::is_element) {
            return Err(DialogError::NotAnElement(root));
        }
        Ok(self.register(Dialog::new(doc, root, targets)))
    }

    /// Dialogs never deregister, so every issued id stays valid.
    pub fn dialog(&self, id: DialogId) -> &Dialog {
        &self.dialogs[id.0]
    }

    pub fn dialog_mut(&mut self, id: DialogId) -> &mut Dialog {
        &mut self.dialogs[id.0]
    }

    pub fn len(&self) -> usize {
        self.dialogs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dialogs.is_empty()
    }

    /// Forward one event to every registered dialog
    pub fn dispatch(&mut self, doc: &mut Document, event: &mut InputEvent) {
        for dialog in &mut self.dialogs {
            dialog.handle_event(doc, event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_by_id_unknown() {
        let doc = Document::new();
        let mut router = EventRouter::new();
        let err = router
            .register_by_id(&doc, "nope", TargetsSpec::Siblings)
            .unwrap_err();
        assert_eq!(err, DialogError::UnknownDialog("nope".to_string()));
    }

    #[test]
    fn test_register_root_rejects_text_nodes() {
        let mut doc = Document::new();
        let root = doc.tree().root();
        let text = doc.tree_mut().create_text("hello");
        doc.tree_mut().append_child(root, text);

        let mut router = EventRouter::new();
        let err = router
            .register_root(&doc, text, TargetsSpec::Siblings)
            .unwrap_err();
        assert_eq!(err, DialogError::NotAnElement(text));
    }

    #[test]
    fn test_register_by_id_resolves_root() {
        let mut doc = Document::new();
        let root = doc.tree().root();
        let dialog_root = doc.tree_mut().create_element_with("div", &[("id", "d1")]);
        doc.tree_mut().append_child(root, dialog_root);

        let mut router = EventRouter::new();
        let id = router
            .register_by_id(&doc, "d1", TargetsSpec::Siblings)
            .unwrap();
        assert_eq!(router.dialog(id).root(), dialog_root);
        assert_eq!(router.len(), 1);
        assert!(!router.is_empty());
    }
}
