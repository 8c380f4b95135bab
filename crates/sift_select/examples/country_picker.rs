//! Country picker demo
//!
//! Builds a page with one searchable select (a handful of common countries up
//! front, the rest behind "Show all") and drives it through a typical session.
//!
//! Run with: RUST_LOG=sift_select=debug cargo run -p sift_select --example country_picker

use std::path::Path;

use anyhow::Result;
use sift_core::Key;
use sift_dom::{el, Document, ElementBuilder};
use sift_select::{Page, SelectConfig};

const COMMON: &[(&str, &str)] = &[
    ("de", "Germany"),
    ("fr", "France"),
    ("gb", "United Kingdom"),
    ("us", "United States"),
];

const EXTENDED: &[(&str, &str)] = &[
    ("at", "Austria"),
    ("be", "Belgium"),
    ("dk", "Denmark"),
    ("ie", "Ireland"),
    ("nl", "Netherlands"),
    ("nz", "New Zealand"),
];

fn country(code: &str, name: &str, extended: bool) -> ElementBuilder {
    let option = el("div")
        .class("option")
        .data("value", code)
        .height(28.0)
        .text(name);
    if extended {
        option.data("extended", "")
    } else {
        option
    }
}

fn build_document() -> Result<Document> {
    let options = COMMON
        .iter()
        .map(|(code, name)| country(code, name, false))
        .chain(EXTENDED.iter().map(|(code, name)| country(code, name, true)));

    let mut doc = Document::new();
    let root = doc.root();
    doc.append(
        root,
        el("form").id("signup").child(
            el("div")
                .class("searchable-select")
                .child(ElementBuilder::input("text").id("country-input"))
                .child(
                    el("div")
                        .id("country-options")
                        .class("options")
                        .height(112.0)
                        .children(options)
                        .child(
                            el("div").class("options-footer").child(
                                el("button")
                                    .id("country-show-all")
                                    .class("options-show-all")
                                    .text("Show all countries"),
                            ),
                        ),
                )
                .child(ElementBuilder::input("hidden").id("country")),
        ),
    )?;
    doc.append(root, el("footer").id("page-footer").text("Terms"))?;
    Ok(doc)
}

fn report(page: &Page, step: &str) {
    let Some(widget) = page.widget_for_input("country-input") else {
        return;
    };
    let doc = page.document();
    let hidden = doc.value(widget.hidden_node()).unwrap_or_default();
    println!(
        "{:<28} open={:<5} value={:<4} visible={:?}",
        step,
        widget.is_open(),
        hidden,
        widget.visible_labels(doc)
    );
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let config = match std::env::args().nth(1) {
        Some(path) => SelectConfig::load(Path::new(&path))?,
        None => SelectConfig::default(),
    };
    let debounce = config.debounce_ms;

    let mut page = Page::with_config(build_document()?, config);

    // Bind with a sink first; the markup scan then reuses this instance
    let select = page.get_or_create_with(
        "country-input",
        "country-options",
        "country",
        |value, label| println!("  -> selected {} ({})", label, value),
    )?;
    let bound = page.ready();
    tracing::info!("Bound {} searchable select(s)", bound);
    report(&page, "ready");

    page.click("country-input")?;
    report(&page, "focus");

    page.type_text("country-input", "n")?;
    page.type_text("country-input", "ne")?;
    report(&page, "typing (debounce pending)");

    page.advance_time(debounce);
    report(&page, "filter \"ne\"");

    for name in ["ArrowDown", "ArrowDown", "Enter"] {
        page.key_down("country-input", Key::from_name(name))?;
    }
    report(&page, "arrow down x2, enter");

    page.type_text("country-input", "")?;
    page.advance_time(debounce);
    page.click("country-show-all")?;
    report(&page, "show all");

    page.click("page-footer")?;
    report(&page, "click outside");

    if let Some(widget) = page.widget(select) {
        tracing::info!("Final selection: {:?}", widget.selected().map(|o| &o.label));
    }
    Ok(())
}
