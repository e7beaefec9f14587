//! Input events - the event stream the controller consumes.
//!
//! Only click, keydown and focus-in exist; everything else the host
//! page does is invisible to the dialog core.

use crate::NodeId;

/// TAB keycode
pub const TAB_KEY: u16 = 9;
/// ESCAPE keycode
pub const ESCAPE_KEY: u16 = 27;

/// Event discriminant plus key payload
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEventKind {
    Click,
    KeyDown { key_code: u16, shift: bool },
    FocusIn,
}

/// One event from the host's input stream
#[derive(Debug, Clone)]
pub struct InputEvent {
    pub kind: InputEventKind,
    pub target: NodeId,
    cancelable: bool,
    default_prevented: bool,
}

impl InputEvent {
    /// Click on `target`
    pub fn click(target: NodeId) -> Self {
        Self {
            kind: InputEventKind::Click,
            target,
            cancelable: true,
            default_prevented: false,
        }
    }

    /// Key press while `target` holds focus
    pub fn key_down(target: NodeId, key_code: u16, shift: bool) -> Self {
        Self {
            kind: InputEventKind::KeyDown { key_code, shift },
            target,
            cancelable: true,
            default_prevented: false,
        }
    }

    /// Focus arrived at `target` (not cancelable)
    pub fn focus_in(target: NodeId) -> Self {
        Self {
            kind: InputEventKind::FocusIn,
            target,
            cancelable: false,
            default_prevented: false,
        }
    }

    /// Suppress the default action, if the event allows it
    pub fn prevent_default(&mut self) {
        if self.cancelable {
            self.default_prevented = true;
        }
    }

    /// Check if default was prevented
    pub fn is_default_prevented(&self) -> bool {
        self.default_prevented
    }
}
