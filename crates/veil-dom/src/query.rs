//! Selector query helper.
//!
//! Compound simple selectors only: `tag`, `#id`, `.class`, `[attr]`,
//! `[attr=value]` (bare or quoted values). No combinators - the dialog
//! association convention never needs them.

use std::iter::Peekable;
use std::str::Chars;

use tracing::trace;

use crate::NodeId;
use crate::node::Node;
use crate::tree::DomTree;

/// Selector parse error
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SelectorError {
    #[error("empty selector")]
    Empty,

    #[error("unexpected character {0:?} in selector")]
    Unexpected(char),

    #[error("unterminated attribute selector")]
    UnterminatedAttribute,
}

/// A parsed compound simple selector
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selector {
    tag: Option<String>,
    id: Option<String>,
    classes: Vec<String>,
    attrs: Vec<AttrMatch>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct AttrMatch {
    name: String,
    value: Option<String>,
}

impl Selector {
    /// Parse a selector string
    pub fn parse(input: &str) -> Result<Self, SelectorError> {
        let input = input.trim();
        if input.is_empty() {
            return Err(SelectorError::Empty);
        }
        let mut selector = Selector::default();
        let mut chars = input.chars().peekable();

        if chars.peek().is_some_and(|c| c.is_ascii_alphabetic()) {
            selector.tag = Some(take_name(&mut chars).to_ascii_lowercase());
        }
        while let Some(&c) = chars.peek() {
            match c {
                '#' => {
                    chars.next();
                    let name = take_name(&mut chars);
                    if name.is_empty() {
                        return Err(SelectorError::Unexpected('#'));
                    }
                    selector.id = Some(name);
                }
                '.' => {
                    chars.next();
                    let name = take_name(&mut chars);
                    if name.is_empty() {
                        return Err(SelectorError::Unexpected('.'));
                    }
                    selector.classes.push(name);
                }
                '[' => {
                    chars.next();
                    selector.attrs.push(parse_attr(&mut chars)?);
                }
                other => return Err(SelectorError::Unexpected(other)),
            }
        }
        Ok(selector)
    }

    /// Test one node against this selector
    pub fn matches(&self, tree: &DomTree, id: NodeId) -> bool {
        let Some(el) = tree.get(id).and_then(Node::as_element) else {
            return false;
        };
        if let Some(tag) = &self.tag {
            if el.tag != *tag {
                return false;
            }
        }
        if let Some(want) = &self.id {
            if el.id.as_deref() != Some(want.as_str()) {
                return false;
            }
        }
        if !self.classes.is_empty() {
            let Some(classes) = el.get_attr("class") else {
                return false;
            };
            let have: Vec<&str> = classes.split_whitespace().collect();
            if !self.classes.iter().all(|c| have.contains(&c.as_str())) {
                return false;
            }
        }
        self.attrs
            .iter()
            .all(|a| match (&a.value, el.get_attr(&a.name)) {
                (None, Some(_)) => true,
                (Some(want), Some(have)) => want == have,
                (_, None) => false,
            })
    }
}

fn take_name(chars: &mut Peekable<Chars>) -> String {
    let mut out = String::new();
    while let Some(&c) = chars.peek() {
        if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
            out.push(c);
            chars.next();
        } else {
            break;
        }
    }
    out
}

fn parse_attr(chars: &mut Peekable<Chars>) -> Result<AttrMatch, SelectorError> {
    let name = take_name(chars);
    if name.is_empty() {
        return Err(SelectorError::UnterminatedAttribute);
    }
    match chars.next() {
        Some(']') => Ok(AttrMatch { name, value: None }),
        Some('=') => {
            let value = match chars.peek().copied() {
                Some(quote) if quote == '"' || quote == '\'' => {
                    chars.next();
                    let mut out = String::new();
                    loop {
                        match chars.next() {
                            Some(c) if c == quote => break,
                            Some(c) => out.push(c),
                            None => return Err(SelectorError::UnterminatedAttribute),
                        }
                    }
                    out
                }
                _ => {
                    let mut out = String::new();
                    while let Some(&c) = chars.peek() {
                        if c == ']' {
                            break;
                        }
                        out.push(c);
                        chars.next();
                    }
                    out
                }
            };
            match chars.next() {
                Some(']') => Ok(AttrMatch {
                    name,
                    value: Some(value),
                }),
                _ => Err(SelectorError::UnterminatedAttribute),
            }
        }
        _ => Err(SelectorError::UnterminatedAttribute),
    }
}

/// Query all descendants of `scope` matching `selector`, in document
/// order.
pub fn query_all(
    tree: &DomTree,
    scope: NodeId,
    selector: &str,
) -> Result<Vec<NodeId>, SelectorError> {
    let parsed = Selector::parse(selector)?;
    let found: Vec<NodeId> = tree
        .descendants(scope)
        .filter(|&id| parsed.matches(tree, id))
        .collect();
    trace!(selector, matches = found.len(), "query");
    Ok(found)
}
