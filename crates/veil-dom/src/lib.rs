//! veil DOM - the document model the dialog controller operates on.
//!
//! Arena-based node tree with attributes, focus tracking, synthetic
//! layout geometry and a thin selector query helper.

mod document;
mod events;
mod geometry;
mod node;
mod query;
mod tree;

pub use document::Document;
pub use events::{ESCAPE_KEY, InputEvent, InputEventKind, TAB_KEY};
pub use geometry::{ElementGeometry, Rect, reflow};
pub use node::{Attribute, ElementData, Node, NodeData, TextData};
pub use query::{Selector, SelectorError, query_all};
pub use tree::{Descendants, DomTree};

/// Node identifier (index into arena)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    /// Arena index of this node
    pub fn index(self) -> usize {
        self.0 as usize
    }
}
