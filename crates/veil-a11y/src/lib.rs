//! veil Accessibility
//!
//! Accessible modal dialog core:
//! - dialog open/close state machine with ARIA attribute maintenance
//! - keyboard focus containment while a dialog is open
//! - event routing from the host's input stream to registered dialogs

pub mod dialog;
pub mod focus;
pub mod router;

pub use dialog::{Dialog, TargetsSpec};
pub use focus::{focusable_children, maintain_focus, set_focus_to_first_item, trap_tab_key};
pub use router::{DialogId, EventRouter};

use veil_dom::NodeId;

/// Dialog registration error. Everything past construction degrades
/// silently; only wiring a dialog to a node that does not exist is
/// loud.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DialogError {
    #[error("no element with id {0:?}")]
    UnknownDialog(String),

    #[error("dialog root {0:?} is not an element")]
    NotAnElement(NodeId),
}
