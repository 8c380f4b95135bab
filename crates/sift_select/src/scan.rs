//! Markup scanning for automatic initialization
//!
//! Finds every widget root in a document and extracts the ids of its three
//! required elements. Roots missing any of them are skipped with a warning so
//! one broken group never blocks the others.

use sift_dom::{Document, Element, NodeId};

use crate::config::MarkerClasses;
use crate::error::ElementRole;

/// The three element ids of one well-formed widget root
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SelectGroup {
    pub input_id: String,
    pub options_id: String,
    pub hidden_id: String,
}

/// Collect the well-formed widget groups in document order
pub fn scan_groups(doc: &Document, classes: &MarkerClasses) -> Vec<SelectGroup> {
    doc.query_class(doc.root(), &classes.root)
        .into_iter()
        .filter_map(|root| read_group(doc, classes, root))
        .collect()
}

fn read_group(doc: &Document, classes: &MarkerClasses, root: NodeId) -> Option<SelectGroup> {
    let input_id = required_id(doc, root, ElementRole::Input, |e| e.is_input_of_type("text"))?;
    let options_id = required_id(doc, root, ElementRole::Options, |e| {
        e.has_class(&classes.options)
    })?;
    let hidden_id = required_id(doc, root, ElementRole::Hidden, |e| {
        e.is_input_of_type("hidden")
    })?;

    Some(SelectGroup {
        input_id,
        options_id,
        hidden_id,
    })
}

fn required_id<F>(doc: &Document, root: NodeId, role: ElementRole, predicate: F) -> Option<String>
where
    F: Fn(&Element) -> bool,
{
    let Some(node) = doc.first_descendant(root, predicate) else {
        tracing::warn!("Skipping searchable select: no {} found", role);
        return None;
    };
    match doc.element(node).and_then(Element::id) {
        Some(id) => Some(id.to_string()),
        None => {
            tracing::warn!("Skipping searchable select: {} has no id", role);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sift_dom::{el, ElementBuilder};

    fn append(doc: &mut Document, builder: ElementBuilder) -> NodeId {
        let root = doc.root();
        doc.append(root, builder).unwrap()
    }

    #[test]
    fn test_scan_well_formed_group() {
        let mut doc = Document::new();
        append(
            &mut doc,
            el("div")
                .class("searchable-select")
                .child(ElementBuilder::input("text").id("city-input"))
                .child(el("ul").id("city-options").class("options"))
                .child(ElementBuilder::input("hidden").id("city")),
        );

        let groups = scan_groups(&doc, &MarkerClasses::default());
        assert_eq!(
            groups,
            vec![SelectGroup {
                input_id: "city-input".to_string(),
                options_id: "city-options".to_string(),
                hidden_id: "city".to_string(),
            }]
        );
    }

    #[test]
    fn test_scan_skips_malformed_groups() {
        let mut doc = Document::new();
        // No hidden field
        append(
            &mut doc,
            el("div")
                .class("searchable-select")
                .child(ElementBuilder::input("text").id("a-input"))
                .child(el("div").id("a-options").class("options")),
        );
        // Options container without an id
        append(
            &mut doc,
            el("div")
                .class("searchable-select")
                .child(ElementBuilder::input("text").id("b-input"))
                .child(el("div").class("options"))
                .child(ElementBuilder::input("hidden").id("b")),
        );
        // Well formed
        append(
            &mut doc,
            el("div")
                .class("searchable-select")
                .child(ElementBuilder::input("text").id("c-input"))
                .child(el("div").id("c-options").class("options"))
                .child(ElementBuilder::input("hidden").id("c")),
        );

        let groups = scan_groups(&doc, &MarkerClasses::default());
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].input_id, "c-input");
    }

    #[test]
    fn test_scan_uses_configured_classes() {
        let mut doc = Document::new();
        append(
            &mut doc,
            el("div")
                .class("combo")
                .child(ElementBuilder::input("text").id("x-input"))
                .child(el("div").id("x-list").class("choices"))
                .child(ElementBuilder::input("hidden").id("x")),
        );

        let classes = MarkerClasses {
            root: "combo".to_string(),
            options: "choices".to_string(),
            ..MarkerClasses::default()
        };
        assert_eq!(scan_groups(&doc, &classes).len(), 1);
        assert!(scan_groups(&doc, &MarkerClasses::default()).is_empty());
    }
}
