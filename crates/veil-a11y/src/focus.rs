//! Focus-trap engine.
//!
//! Computes the focusable descendants of a dialog root and keeps
//! keyboard focus cycling inside it while the dialog is open. The
//! focusable set is always derived from the live tree, never cached:
//! elements can be disabled or hidden between two key presses.

use tracing::trace;

use veil_dom::{Document, DomTree, InputEvent, InputEventKind, Node, NodeId};

/// Focusability under the fixed allow-list: form controls, links with
/// an href, frames, media, editable regions and anything with a
/// non-negative explicit tabindex. Does not include the visibility
/// filter.
fn is_focus_candidate(tree: &DomTree, id: NodeId) -> bool {
    if tree.has_attr(id, "disabled") || tree.has_attr(id, "inert") {
        return false;
    }
    match tab_index(tree, id) {
        Some(index) if index >= 0 => true,
        // A negative tabindex opts out of sequential focus, except for
        // controls the allow-list admits unconditionally.
        Some(_) => matches!(
            tree.tag_name(id),
            Some("input" | "select" | "textarea" | "button" | "iframe")
        ),
        None => match tree.tag_name(id) {
            Some("a" | "area") => tree.has_attr(id, "href"),
            Some("input" | "select" | "textarea" | "button") => true,
            Some("iframe" | "audio" | "video") => true,
            _ => tree.has_attr(id, "contenteditable"),
        },
    }
}

fn tab_index(tree: &DomTree, id: NodeId) -> Option<i32> {
    tree.attr(id, "tabindex")?.trim().parse().ok()
}

fn is_rendered(tree: &DomTree, id: NodeId) -> bool {
    tree.get(id)
        .and_then(Node::as_element)
        .is_some_and(|el| el.geometry.is_rendered())
}

/// Ordered focusable descendants of `root`, in document order.
///
/// Lazy and restartable: call again for a fresh view of the tree.
pub fn focusable_children<'a>(
    doc: &'a Document,
    root: NodeId,
) -> impl Iterator<Item = NodeId> + 'a {
    let tree = doc.tree();
    tree.descendants(root)
        .filter(move |&id| is_focus_candidate(tree, id) && is_rendered(tree, id))
}

/// Focus the first `autofocus` descendant of `root` if there is one,
/// else the first focusable child. No-op when neither exists.
pub fn set_focus_to_first_item(doc: &mut Document, root: NodeId) {
    let tree = doc.tree();
    let autofocus = tree
        .descendants(root)
        .find(|&id| tree.has_attr(id, "autofocus"));
    let first = autofocus.or_else(|| focusable_children(doc, root).next());
    if let Some(id) = first {
        doc.focus(id);
    }
}

/// Keep TAB navigation cycling inside `root`.
///
/// Only the boundary presses are intercepted; in the middle of the set
/// the browser's own sequential navigation is left alone.
pub fn trap_tab_key(doc: &mut Document, root: NodeId, event: &mut InputEvent) {
    let InputEventKind::KeyDown { shift, .. } = event.kind else {
        return;
    };
    let focusable: Vec<NodeId> = focusable_children(doc, root).collect();
    if focusable.is_empty() {
        return;
    }
    let position = doc
        .active_element()
        .and_then(|current| focusable.iter().position(|&id| id == current));
    if shift {
        if matches!(position, Some(0) | None) {
            if let Some(&last) = focusable.last() {
                trace!(?root, "wrapping focus to last item");
                doc.focus(last);
                event.prevent_default();
            }
        }
    } else if position == Some(focusable.len() - 1) {
        trace!(?root, "wrapping focus to first item");
        doc.focus(focusable[0]);
        event.prevent_default();
    }
}

/// Pull focus back inside `root` when it lands anywhere else in the
/// document, whatever moved it there.
pub fn maintain_focus(doc: &mut Document, root: NodeId, event: &InputEvent) {
    if doc.tree().contains(root, event.target) {
        return;
    }
    trace!(?root, escaped_to = ?event.target, "focus left the dialog, pulling it back");
    set_focus_to_first_item(doc, root);
}
