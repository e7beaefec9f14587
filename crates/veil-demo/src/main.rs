//! veil demo - Main Entry Point
//!
//! Builds a small page with a newsletter dialog, then drives it with
//! a scripted event sequence: open by click, tab around the trap,
//! steal focus, close with ESCAPE.

use anyhow::Result;
use tracing::info;
use tracing_subscriber::EnvFilter;

use veil_a11y::{EventRouter, TargetsSpec, focusable_children};
use veil_dom::{Document, ESCAPE_KEY, InputEvent, NodeId, TAB_KEY, reflow};

struct Page {
    doc: Document,
    subscribe: NodeId,
    dialog_root: NodeId,
}

fn build_page() -> Page {
    let mut doc = Document::new();
    let root = doc.tree().root();
    let tree = doc.tree_mut();

    let body = tree.create_element("body");
    let nav = tree.create_element("nav");
    let subscribe = tree.create_element_with("button", &[("data-dialog-show", "newsletter")]);
    let main = tree.create_element("main");
    let article = tree.create_element("p");
    let copy = tree.create_text("All the latest, once a week.");
    let dialog_root = tree.create_element_with("div", &[("id", "newsletter")]);
    let name = tree.create_element_with("input", &[("type", "text")]);
    let email = tree.create_element_with("input", &[("type", "email")]);
    let confirm = tree.create_element("button");
    let cancel = tree.create_element_with("button", &[("data-dialog-hide", "")]);

    tree.append_child(root, body);
    tree.append_child(body, nav);
    tree.append_child(nav, subscribe);
    tree.append_child(body, main);
    tree.append_child(main, article);
    tree.append_child(article, copy);
    tree.append_child(body, dialog_root);
    for id in [name, email, confirm, cancel] {
        tree.append_child(dialog_root, id);
    }
    reflow(tree, 800.0);

    Page {
        doc,
        subscribe,
        dialog_root,
    }
}

fn report(page: &Page, label: &str) {
    let tree = page.doc.tree();
    info!(
        step = label,
        open = tree.has_attr(page.dialog_root, "open"),
        root_aria_hidden = tree.attr(page.dialog_root, "aria-hidden").unwrap_or("-"),
        focused = ?page.doc.active_element(),
        "page state"
    );
}

/// Emulate the browser's own sequential navigation for presses the
/// trap leaves alone.
fn advance_focus(page: &mut Page) {
    let order: Vec<NodeId> = focusable_children(&page.doc, page.dialog_root).collect();
    let Some(position) = order
        .iter()
        .position(|&id| Some(id) == page.doc.active_element())
    else {
        return;
    };
    if let Some(&next) = order.get(position + 1) {
        page.doc.focus(next);
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug")),
        )
        .init();

    let mut page = build_page();
    let mut router = EventRouter::new();
    router.register_by_id(&page.doc, "newsletter", TargetsSpec::Siblings)?;
    report(&page, "initial");

    info!("clicking the subscribe button");
    page.doc.focus(page.subscribe);
    router.dispatch(&mut page.doc, &mut InputEvent::click(page.subscribe));
    report(&page, "after open");

    info!("tabbing once around the dialog");
    for _ in 0..4 {
        let Some(focused) = page.doc.active_element() else {
            break;
        };
        let mut tab = InputEvent::key_down(focused, TAB_KEY, false);
        router.dispatch(&mut page.doc, &mut tab);
        if !tab.is_default_prevented() {
            advance_focus(&mut page);
        }
        report(&page, "after tab");
    }

    info!("a script steals focus");
    page.doc.focus(page.subscribe);
    router.dispatch(&mut page.doc, &mut InputEvent::focus_in(page.subscribe));
    report(&page, "after focus theft");

    info!("pressing escape");
    if let Some(focused) = page.doc.active_element() {
        let mut escape = InputEvent::key_down(focused, ESCAPE_KEY, false);
        router.dispatch(&mut page.doc, &mut escape);
    }
    report(&page, "after escape");

    Ok(())
}
