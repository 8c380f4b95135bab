//! Elements and the fluent element builder

use indexmap::IndexMap;
use smallvec::SmallVec;

/// A single element in the document
///
/// Attributes keep their insertion order. The `id` lives outside the attribute
/// map because the document indexes it and it never changes after insertion.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Element {
    tag: String,
    id: Option<String>,
    classes: SmallVec<[String; 4]>,
    attrs: IndexMap<String, String>,
    text: String,
    value: String,
    hidden: bool,
    height: f32,
    scroll_top: f32,
}

impl Element {
    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    /// The element's own text (not including descendants)
    pub fn own_text(&self) -> &str {
        &self.text
    }

    // =========================================================================
    // Classes
    // =========================================================================

    pub fn classes(&self) -> impl Iterator<Item = &str> {
        self.classes.iter().map(String::as_str)
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    /// Add a class; returns false if it was already present
    pub fn add_class(&mut self, class: &str) -> bool {
        if self.has_class(class) {
            return false;
        }
        self.classes.push(class.to_string());
        true
    }

    /// Remove a class; returns false if it was not present
    pub fn remove_class(&mut self, class: &str) -> bool {
        let before = self.classes.len();
        self.classes.retain(|c| c != class);
        self.classes.len() != before
    }

    pub fn toggle_class(&mut self, class: &str, on: bool) {
        if on {
            self.add_class(class);
        } else {
            self.remove_class(class);
        }
    }

    // =========================================================================
    // Attributes
    // =========================================================================

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs.get(name).map(String::as_str)
    }

    pub fn has_attr(&self, name: &str) -> bool {
        self.attrs.contains_key(name)
    }

    pub fn set_attr(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.attrs.insert(name.into(), value.into());
    }

    pub fn remove_attr(&mut self, name: &str) -> Option<String> {
        self.attrs.shift_remove(name)
    }

    /// Read a `data-*` attribute by its short name (`data("value")` reads `data-value`)
    pub fn data(&self, name: &str) -> Option<&str> {
        self.attr(&data_attr(name))
    }

    pub fn has_data(&self, name: &str) -> bool {
        self.has_attr(&data_attr(name))
    }

    pub fn set_data(&mut self, name: &str, value: impl Into<String>) {
        self.set_attr(data_attr(name), value);
    }

    pub fn remove_data(&mut self, name: &str) -> Option<String> {
        self.remove_attr(&data_attr(name))
    }

    /// Whether this is an `<input>` with the given `type` attribute
    pub fn is_input_of_type(&self, kind: &str) -> bool {
        self.tag.eq_ignore_ascii_case("input")
            && self
                .attr("type")
                .is_some_and(|t| t.eq_ignore_ascii_case(kind))
    }

    /// Whether a click moves focus to this element
    pub fn is_focusable(&self) -> bool {
        ["input", "button", "select", "textarea"]
            .iter()
            .any(|tag| self.tag.eq_ignore_ascii_case(tag))
    }

    // =========================================================================
    // Form value, visibility, geometry
    // =========================================================================

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn set_value(&mut self, value: impl Into<String>) {
        self.value = value.into();
    }

    pub fn is_hidden(&self) -> bool {
        self.hidden
    }

    pub fn set_hidden(&mut self, hidden: bool) {
        self.hidden = hidden;
    }

    /// Declared block height in pixels
    pub fn height(&self) -> f32 {
        self.height
    }

    pub fn set_height(&mut self, height: f32) {
        self.height = height.max(0.0);
    }

    /// Vertical scroll offset of this element's content
    pub fn scroll_top(&self) -> f32 {
        self.scroll_top
    }

    pub fn set_scroll_top(&mut self, scroll_top: f32) {
        self.scroll_top = scroll_top.max(0.0);
    }
}

fn data_attr(name: &str) -> String {
    format!("data-{}", name)
}

/// Fluent builder for an element subtree
///
/// Passed to [`Document::append`](crate::Document::append), which assigns node
/// ids and indexes element ids.
#[derive(Clone, Debug, Default)]
pub struct ElementBuilder {
    pub(crate) element: Element,
    pub(crate) children: Vec<ElementBuilder>,
}

/// Start building an element with the given tag
pub fn el(tag: impl Into<String>) -> ElementBuilder {
    ElementBuilder {
        element: Element {
            tag: tag.into(),
            ..Element::default()
        },
        children: Vec::new(),
    }
}

impl ElementBuilder {
    /// Shorthand for `el("input").attr("type", kind)`
    pub fn input(kind: &str) -> Self {
        el("input").attr("type", kind)
    }

    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.element.id = Some(id.into());
        self
    }

    pub fn class(mut self, class: impl Into<String>) -> Self {
        let class = class.into();
        for part in class.split_whitespace() {
            self.element.add_class(part);
        }
        self
    }

    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.element.set_attr(name, value);
        self
    }

    /// Set a `data-*` attribute by its short name
    pub fn data(mut self, name: &str, value: impl Into<String>) -> Self {
        self.element.set_data(name, value);
        self
    }

    /// Append text to the element's own text
    pub fn text(mut self, text: impl AsRef<str>) -> Self {
        self.element.text.push_str(text.as_ref());
        self
    }

    pub fn value(mut self, value: impl Into<String>) -> Self {
        self.element.value = value.into();
        self
    }

    pub fn height(mut self, height: f32) -> Self {
        self.element.set_height(height);
        self
    }

    pub fn hidden(mut self, hidden: bool) -> Self {
        self.element.hidden = hidden;
        self
    }

    pub fn child(mut self, child: ElementBuilder) -> Self {
        self.children.push(child);
        self
    }

    pub fn children(mut self, children: impl IntoIterator<Item = ElementBuilder>) -> Self {
        self.children.extend(children);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_classes_and_data() {
        let built = el("div")
            .class("option active")
            .class("option")
            .data("value", "42")
            .data("extended", "")
            .text("  Banana ")
            .height(-4.0);

        let element = &built.element;
        assert_eq!(element.classes().collect::<Vec<_>>(), vec!["option", "active"]);
        assert_eq!(element.data("value"), Some("42"));
        assert!(element.has_data("extended"));
        assert!(!element.has_data("selected"));
        assert_eq!(element.own_text(), "  Banana ");
        assert_eq!(element.height(), 0.0);
    }

    #[test]
    fn test_input_type() {
        let text = ElementBuilder::input("text").element;
        let hidden = ElementBuilder::input("HIDDEN").element;
        let div = el("div").attr("type", "text").element;

        assert!(text.is_input_of_type("text"));
        assert!(hidden.is_input_of_type("hidden"));
        assert!(!div.is_input_of_type("text"));
    }

    #[test]
    fn test_focusable_tags() {
        assert!(ElementBuilder::input("text").element.is_focusable());
        assert!(el("BUTTON").element.is_focusable());
        assert!(el("textarea").element.is_focusable());
        assert!(!el("div").element.is_focusable());
        assert!(!el("p").element.is_focusable());
    }

    #[test]
    fn test_class_mutation() {
        let mut element = el("li").element;
        assert!(element.add_class("selected"));
        assert!(!element.add_class("selected"));
        element.toggle_class("active", true);
        assert!(element.has_class("active"));
        assert!(element.remove_class("selected"));
        assert!(!element.remove_class("selected"));
        element.toggle_class("active", false);
        assert_eq!(element.classes().count(), 0);
    }
}
