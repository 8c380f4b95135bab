//! Searchable select widget - filtering dropdown bound to a hidden form field
//!
//! One [`SearchableSelect`] binds three elements by id: a text input, the
//! option list container and a hidden field. Typing filters the options,
//! arrow keys move a highlight over the visible ones, and Enter or a click
//! commits an option into the hidden field.
//!
//! Options tagged `data-extended` form a secondary tier that stays hidden until
//! the user asks for it (the show-all affordance) or the initial selection
//! lives there. Searching always looks through both tiers.
//!
//! # Example
//!
//! ```ignore
//! let mut select = SearchableSelect::bind(
//!     &mut doc,
//!     "country-input",
//!     "country-options",
//!     "country",
//!     &SelectConfig::default(),
//!     Some(Box::new(|value, label| println!("{} = {}", label, value))),
//! )?;
//!
//! select.apply_filter(&mut doc, "ger");
//! select.navigate(&mut doc, Direction::Next);
//! select.commit_focused(&mut doc);
//! ```

use sift_core::events::{Key, KeyEvent};
use sift_core::timer::{Debouncer, TimerId, TimerQueue};
use sift_dom::{Document, NodeId};

use crate::config::SelectConfig;
use crate::error::{ElementRole, Result, SelectError};

/// Host notification sink, called with `(value, label)`
pub type OnSelect = Box<dyn FnMut(&str, &str)>;

/// An option read from the markup
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SelectOption {
    /// Element carrying the option
    pub node: NodeId,
    /// Trimmed visible text (used for display and filtering)
    pub label: String,
    /// Committed into the hidden field
    pub value: String,
    /// Whether this option belongs to the initially hidden tier
    pub extended: bool,
    /// Whether this option is the current selection
    pub selected: bool,
}

/// Direction of a keyboard highlight move
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Next,
    Previous,
}

/// A bound searchable select
pub struct SearchableSelect {
    input_id: String,
    options_id: String,
    hidden_id: String,
    input: NodeId,
    list: NodeId,
    hidden: NodeId,
    footer: Option<NodeId>,
    show_all: Option<NodeId>,
    options: Vec<SelectOption>,
    is_open: bool,
    /// Index into the currently visible options
    focused_index: Option<usize>,
    showing_extended: bool,
    filter_debounce: Debouncer,
    on_select: Option<OnSelect>,
    config: SelectConfig,
}

impl std::fmt::Debug for SearchableSelect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchableSelect")
            .field("input_id", &self.input_id)
            .field("options_id", &self.options_id)
            .field("hidden_id", &self.hidden_id)
            .field("options", &self.options.len())
            .field("is_open", &self.is_open)
            .field("focused_index", &self.focused_index)
            .field("showing_extended", &self.showing_extended)
            .field("on_select", &self.on_select.is_some())
            .finish()
    }
}

fn resolve(doc: &Document, role: ElementRole, id: &str) -> Result<NodeId> {
    doc.get_element_by_id(id)
        .ok_or_else(|| SelectError::MissingElement {
            role,
            id: id.to_string(),
        })
}

impl SearchableSelect {
    /// Bind a widget to three element ids and resolve its initial value
    ///
    /// Fails with [`SelectError::MissingElement`] if any id does not resolve.
    /// `on_select` is registered before the initial value is resolved, so it
    /// observes a pre-selected option.
    pub fn bind(
        doc: &mut Document,
        input_id: &str,
        options_id: &str,
        hidden_id: &str,
        config: &SelectConfig,
        on_select: Option<OnSelect>,
    ) -> Result<Self> {
        let input = resolve(doc, ElementRole::Input, input_id)?;
        let list = resolve(doc, ElementRole::Options, options_id)?;
        let hidden = resolve(doc, ElementRole::Hidden, hidden_id)?;

        let classes = &config.classes;
        let options: Vec<SelectOption> = doc
            .query_class(list, &classes.option)
            .into_iter()
            .filter_map(|node| {
                let element = doc.element(node)?;
                Some(SelectOption {
                    node,
                    label: doc.text_content(node).trim().to_string(),
                    value: element.data("value").unwrap_or_default().to_string(),
                    extended: element.has_data("extended"),
                    selected: false,
                })
            })
            .collect();
        let footer = doc.query_class(list, &classes.footer).first().copied();
        let show_all = doc.query_class(list, &classes.show_all).first().copied();

        let mut select = Self {
            input_id: input_id.to_string(),
            options_id: options_id.to_string(),
            hidden_id: hidden_id.to_string(),
            input,
            list,
            hidden,
            footer,
            show_all,
            options,
            is_open: false,
            focused_index: None,
            showing_extended: false,
            filter_debounce: Debouncer::new(config.debounce()),
            on_select,
            config: config.clone(),
        };

        tracing::debug!(
            "SearchableSelect bound: input={} options={} hidden={} ({} options)",
            input_id,
            options_id,
            hidden_id,
            select.options.len()
        );

        select.render_disclosure(doc);
        select.resolve_initial_value(doc);
        Ok(select)
    }

    fn resolve_initial_value(&mut self, doc: &mut Document) {
        let initial = self.options.iter().position(|opt| {
            doc.element(opt.node)
                .and_then(|e| e.data("selected"))
                .is_some_and(|v| v == "true")
        });

        self.mark_selected(doc, initial);

        let Some(index) = initial else {
            return;
        };
        let option = self.options[index].clone();
        if let Some(input) = doc.element_mut(self.input) {
            input.set_value(option.label.as_str());
        }
        tracing::debug!("Initial selection for {}: {}", self.input_id, option.value);
        self.notify(&option.value, &option.label);

        if option.extended {
            self.reveal_extended(doc);
        }
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn input_id(&self) -> &str {
        &self.input_id
    }

    pub fn options_id(&self) -> &str {
        &self.options_id
    }

    pub fn hidden_id(&self) -> &str {
        &self.hidden_id
    }

    pub fn input_node(&self) -> NodeId {
        self.input
    }

    pub fn options_node(&self) -> NodeId {
        self.list
    }

    pub fn hidden_node(&self) -> NodeId {
        self.hidden
    }

    pub fn show_all_node(&self) -> Option<NodeId> {
        self.show_all
    }

    /// All options in document order
    pub fn options(&self) -> &[SelectOption] {
        &self.options
    }

    pub fn is_open(&self) -> bool {
        self.is_open
    }

    /// Highlighted position within the visible options
    pub fn focused_index(&self) -> Option<usize> {
        self.focused_index
    }

    pub fn showing_extended(&self) -> bool {
        self.showing_extended
    }

    pub fn selected(&self) -> Option<&SelectOption> {
        self.options.iter().find(|opt| opt.selected)
    }

    pub fn config(&self) -> &SelectConfig {
        &self.config
    }

    /// Replace the notification sink; it sees subsequent commits only
    pub fn set_on_select<F>(&mut self, callback: F)
    where
        F: FnMut(&str, &str) + 'static,
    {
        self.on_select = Some(Box::new(callback));
    }

    pub fn clear_on_select(&mut self) {
        self.on_select = None;
    }

    /// Whether `target` lies inside the input or the option list
    pub fn contains(&self, doc: &Document, target: NodeId) -> bool {
        doc.contains(self.input, target) || doc.contains(self.list, target)
    }

    /// Indices (into [`options`](Self::options)) of the visible options
    pub fn visible_options(&self, doc: &Document) -> Vec<usize> {
        self.options
            .iter()
            .enumerate()
            .filter(|(_, opt)| !doc.is_hidden(opt.node))
            .map(|(i, _)| i)
            .collect()
    }

    /// Labels of the visible options, in order
    pub fn visible_labels(&self, doc: &Document) -> Vec<&str> {
        self.visible_options(doc)
            .into_iter()
            .map(|i| self.options[i].label.as_str())
            .collect()
    }

    /// Option index under keyboard highlight, if any
    pub fn focused_option(&self, doc: &Document) -> Option<usize> {
        let focused = self.focused_index?;
        self.visible_options(doc).get(focused).copied()
    }

    /// Option index whose element holds `target`
    ///
    /// Hidden options (collapsed extended tier, filtered out) never match.
    pub fn option_at(&self, doc: &Document, target: NodeId) -> Option<usize> {
        if !doc.contains(self.list, target) || !doc.is_rendered(target) {
            return None;
        }
        let node = doc.closest_with_class(target, &self.config.classes.option)?;
        self.options.iter().position(|opt| opt.node == node)
    }

    /// Whether `target` lies inside the show-all affordance while it is shown
    pub fn is_show_all_target(&self, doc: &Document, target: NodeId) -> bool {
        self.show_all
            .is_some_and(|node| doc.contains(node, target) && doc.is_rendered(target))
    }

    // =========================================================================
    // Open / close
    // =========================================================================

    pub fn open(&mut self, doc: &mut Document) {
        self.set_open(doc, true);
    }

    pub fn close(&mut self, doc: &mut Document) {
        self.set_open(doc, false);
    }

    fn set_open(&mut self, doc: &mut Document, open: bool) {
        self.is_open = open;
        doc.toggle_class(self.list, &self.config.classes.open, open);
    }

    // =========================================================================
    // Filtering
    // =========================================================================

    /// Schedule a filter pass, superseding any pass still waiting
    pub fn schedule_filter<T>(&mut self, timers: &mut TimerQueue<T>, payload: T) -> TimerId {
        self.filter_debounce.trigger(timers, payload)
    }

    /// Run the filter pass for a fired timer
    ///
    /// Returns false (and does nothing) for a superseded timer.
    pub fn on_filter_timer(&mut self, doc: &mut Document, id: TimerId) -> bool {
        if !self.filter_debounce.acknowledge(id) {
            return false;
        }
        let query = doc.value(self.input).unwrap_or_default().to_string();
        self.apply_filter(doc, &query);
        true
    }

    /// Show the options matching `query` and open the dropdown
    ///
    /// An empty query restores the disclosure view (primary only until the
    /// extended tier is revealed). A non-empty query matches labels
    /// case-insensitively across both tiers.
    pub fn apply_filter(&mut self, doc: &mut Document, query: &str) {
        let query = query.to_lowercase();

        if query.is_empty() {
            self.render_disclosure(doc);
        } else {
            for opt in &self.options {
                let matches = opt.label.to_lowercase().contains(&query);
                doc.set_hidden(opt.node, !matches);
            }
            if let Some(footer) = self.footer {
                doc.set_hidden(footer, true);
            }
        }

        tracing::trace!(
            "Filter pass on {} for {:?}: {} visible",
            self.input_id,
            query,
            self.visible_options(doc).len()
        );

        self.open(doc);
        self.set_focus(doc, None);
    }

    fn render_disclosure(&self, doc: &mut Document) {
        for opt in &self.options {
            doc.set_hidden(opt.node, opt.extended && !self.showing_extended);
        }
        if let Some(footer) = self.footer {
            doc.set_hidden(footer, self.showing_extended);
        }
    }

    // =========================================================================
    // Extended-option disclosure
    // =========================================================================

    /// Reveal the extended tier for the rest of this widget's life
    pub fn reveal_extended(&mut self, doc: &mut Document) {
        let first_time = !self.showing_extended;
        self.showing_extended = true;

        for opt in self.options.iter().filter(|opt| opt.extended) {
            doc.set_hidden(opt.node, false);
        }
        if let Some(footer) = self.footer {
            doc.set_hidden(footer, true);
        }
        self.set_focus(doc, None);

        if first_time {
            tracing::debug!("Extended options revealed for {}", self.input_id);
        }
    }

    // =========================================================================
    // Keyboard navigation
    // =========================================================================

    /// Move the highlight over the visible options, wrapping at both ends
    ///
    /// Returns the new highlighted position, or `None` when nothing is visible.
    pub fn navigate(&mut self, doc: &mut Document, direction: Direction) -> Option<usize> {
        let visible = self.visible_options(doc);
        let count = visible.len();
        if count == 0 {
            return None;
        }

        let next = match (direction, self.focused_index) {
            (Direction::Next, Some(i)) if i + 1 < count => i + 1,
            (Direction::Next, _) => 0,
            (Direction::Previous, Some(i)) if i > 0 => (i - 1).min(count - 1),
            (Direction::Previous, _) => count - 1,
        };

        self.set_focus(doc, Some(next));
        let node = self.options[visible[next]].node;
        doc.scroll_into_view_nearest(self.list, node);

        tracing::trace!("{} highlight -> {}", self.input_id, next);
        Some(next)
    }

    fn set_focus(&mut self, doc: &mut Document, index: Option<usize>) {
        let focused_class = &self.config.classes.focused;
        for opt in &self.options {
            doc.toggle_class(opt.node, focused_class, false);
        }
        if let Some(i) = index {
            if let Some(&option) = self.visible_options(doc).get(i) {
                doc.toggle_class(self.options[option].node, focused_class, true);
            }
        }
        self.focused_index = index;
    }

    /// Handle a key press on the bound input
    ///
    /// Returns true if the key was consumed by the widget.
    pub fn handle_key(&mut self, doc: &mut Document, event: &mut KeyEvent) -> bool {
        let stop = self.config.stop_key_propagation;
        let suppress = |event: &mut KeyEvent| {
            event.prevent_default();
            if stop {
                event.stop_propagation();
            }
        };

        match event.key().clone() {
            Key::ArrowDown => {
                suppress(event);
                self.navigate(doc, Direction::Next);
                true
            }
            Key::ArrowUp => {
                suppress(event);
                self.navigate(doc, Direction::Previous);
                true
            }
            Key::Enter => {
                suppress(event);
                self.commit_focused(doc);
                true
            }
            Key::Tab if self.config.commit_on_tab => {
                if self.focused_option(doc).is_none() {
                    return false;
                }
                suppress(event);
                self.commit_focused(doc);
                true
            }
            Key::Escape => {
                suppress(event);
                self.close(doc);
                true
            }
            _ => false,
        }
    }

    // =========================================================================
    // Selection commit
    // =========================================================================

    /// Commit the highlighted option, if any
    pub fn commit_focused(&mut self, doc: &mut Document) -> bool {
        match self.focused_option(doc) {
            Some(index) => self.commit(doc, index),
            None => false,
        }
    }

    /// Commit option `index` into the input and hidden field
    ///
    /// Returns false if `index` is out of range.
    pub fn commit(&mut self, doc: &mut Document, index: usize) -> bool {
        let Some(option) = self.options.get(index).cloned() else {
            return false;
        };

        if let Some(input) = doc.element_mut(self.input) {
            input.set_value(option.label.as_str());
        }
        if let Some(hidden) = doc.element_mut(self.hidden) {
            hidden.set_value(option.value.as_str());
        }
        self.close(doc);
        self.mark_selected(doc, Some(index));

        tracing::debug!(
            "Committed {} = {:?} ({})",
            self.hidden_id,
            option.value,
            option.label
        );
        self.notify(&option.value, &option.label);
        true
    }

    fn mark_selected(&mut self, doc: &mut Document, index: Option<usize>) {
        let selected_class = &self.config.classes.selected;
        for (i, opt) in self.options.iter_mut().enumerate() {
            opt.selected = Some(i) == index;
            if let Some(element) = doc.element_mut(opt.node) {
                element.toggle_class(selected_class, opt.selected);
                if opt.selected {
                    element.set_data("selected", "true");
                } else {
                    element.remove_data("selected");
                }
            }
        }
    }

    fn notify(&mut self, value: &str, label: &str) {
        if let Some(callback) = self.on_select.as_mut() {
            callback(value, label);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sift_dom::{el, ElementBuilder};
    use std::cell::RefCell;
    use std::rc::Rc;

    fn option(value: &str, label: &str) -> ElementBuilder {
        el("div")
            .class("option")
            .data("value", value)
            .height(20.0)
            .text(format!("\n  {}\n", label))
    }

    fn fruit_doc(options: Vec<ElementBuilder>, with_footer: bool) -> Document {
        let mut list = el("div").id("fruit-options").class("options").height(40.0);
        list = list.children(options);
        if with_footer {
            list = list.child(
                el("div")
                    .class("options-footer")
                    .child(el("button").id("show-all").class("options-show-all").text("Show all")),
            );
        }

        let mut doc = Document::new();
        let root = doc.root();
        doc.append(
            root,
            el("div")
                .class("searchable-select")
                .child(ElementBuilder::input("text").id("fruit-input"))
                .child(list)
                .child(ElementBuilder::input("hidden").id("fruit").value("initial")),
        )
        .unwrap();
        doc
    }

    fn basic_options() -> Vec<ElementBuilder> {
        vec![
            option("1", "Apple"),
            option("2", "Banana"),
            option("3", "Cherry"),
            option("4", "Durian").data("extended", ""),
            option("5", "Elderberry").data("extended", ""),
        ]
    }

    fn bind(doc: &mut Document, on_select: Option<OnSelect>) -> SearchableSelect {
        SearchableSelect::bind(
            doc,
            "fruit-input",
            "fruit-options",
            "fruit",
            &SelectConfig::default(),
            on_select,
        )
        .unwrap()
    }

    fn capture() -> (Rc<RefCell<Vec<(String, String)>>>, OnSelect) {
        let calls: Rc<RefCell<Vec<(String, String)>>> = Rc::new(RefCell::new(Vec::new()));
        let calls_clone = Rc::clone(&calls);
        let sink: OnSelect = Box::new(move |value: &str, label: &str| {
            calls_clone
                .borrow_mut()
                .push((value.to_string(), label.to_string()));
        });
        (calls, sink)
    }

    #[test]
    fn test_bind_reads_options() {
        let mut doc = fruit_doc(basic_options(), true);
        let select = bind(&mut doc, None);

        let labels: Vec<_> = select.options().iter().map(|o| o.label.as_str()).collect();
        assert_eq!(labels, vec!["Apple", "Banana", "Cherry", "Durian", "Elderberry"]);
        assert_eq!(select.options()[1].value, "2");
        assert!(select.options()[3].extended);
        assert!(!select.is_open());
        assert_eq!(select.focused_index(), None);
        assert!(select.selected().is_none());
    }

    #[test]
    fn test_bind_missing_element() {
        let mut doc = fruit_doc(basic_options(), false);
        let err = SearchableSelect::bind(
            &mut doc,
            "fruit-input",
            "nope",
            "fruit",
            &SelectConfig::default(),
            None,
        )
        .unwrap_err();

        match err {
            SelectError::MissingElement { role, id } => {
                assert_eq!(role, ElementRole::Options);
                assert_eq!(id, "nope");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_initial_view_hides_extended() {
        let mut doc = fruit_doc(basic_options(), true);
        let select = bind(&mut doc, None);

        assert_eq!(select.visible_labels(&doc), vec!["Apple", "Banana", "Cherry"]);
        let footer = doc.query_class(select.options_node(), "options-footer")[0];
        assert!(!doc.is_hidden(footer));
    }

    #[test]
    fn test_no_initial_selection_leaves_input_alone() {
        let mut doc = fruit_doc(basic_options(), true);
        let (calls, sink) = capture();
        let select = bind(&mut doc, Some(sink));

        assert_eq!(doc.value(select.input_node()), Some(""));
        assert!(calls.borrow().is_empty());
    }

    #[test]
    fn test_initial_selection_notifies() {
        let mut options = basic_options();
        options[1] = option("2", "Banana").data("selected", "true");
        let mut doc = fruit_doc(options, true);
        let (calls, sink) = capture();
        let select = bind(&mut doc, Some(sink));

        assert_eq!(doc.value(select.input_node()), Some("Banana"));
        assert_eq!(doc.value(select.hidden_node()), Some("initial"));
        assert_eq!(
            calls.borrow().as_slice(),
            &[("2".to_string(), "Banana".to_string())]
        );
        assert_eq!(select.selected().map(|o| o.value.as_str()), Some("2"));
        assert!(!select.showing_extended());
    }

    #[test]
    fn test_initial_extended_selection_reveals() {
        let mut options = basic_options();
        options[4] = option("5", "Elderberry")
            .data("extended", "")
            .data("selected", "true");
        let mut doc = fruit_doc(options, true);
        let select = bind(&mut doc, None);

        assert!(select.showing_extended());
        assert_eq!(select.visible_labels(&doc).len(), 5);
        let footer = doc.query_class(select.options_node(), "options-footer")[0];
        assert!(doc.is_hidden(footer));
    }

    #[test]
    fn test_only_first_preselected_counts() {
        let options = vec![
            option("1", "Apple").data("selected", "true"),
            option("2", "Banana").data("selected", "true"),
        ];
        let mut doc = fruit_doc(options, false);
        let select = bind(&mut doc, None);

        let selected: Vec<_> = select.options().iter().filter(|o| o.selected).collect();
        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].label, "Apple");
        let banana = select.options()[1].node;
        assert!(!doc.element(banana).unwrap().has_data("selected"));
    }

    #[test]
    fn test_filter_matches_case_insensitive_across_tiers() {
        let mut doc = fruit_doc(basic_options(), true);
        let mut select = bind(&mut doc, None);

        select.apply_filter(&mut doc, "RR");
        assert_eq!(select.visible_labels(&doc), vec!["Cherry", "Elderberry"]);
        assert!(select.is_open());
        assert!(!select.showing_extended());

        let footer = doc.query_class(select.options_node(), "options-footer")[0];
        assert!(doc.is_hidden(footer));

        select.apply_filter(&mut doc, "zzz");
        assert!(select.visible_labels(&doc).is_empty());
    }

    #[test]
    fn test_empty_query_restores_disclosure_view() {
        let mut doc = fruit_doc(basic_options(), true);
        let mut select = bind(&mut doc, None);
        let footer = doc.query_class(select.options_node(), "options-footer")[0];

        select.apply_filter(&mut doc, "an");
        select.apply_filter(&mut doc, "");
        assert_eq!(select.visible_labels(&doc), vec!["Apple", "Banana", "Cherry"]);
        assert!(!doc.is_hidden(footer));

        select.reveal_extended(&mut doc);
        select.apply_filter(&mut doc, "an");
        select.apply_filter(&mut doc, "");
        assert_eq!(select.visible_labels(&doc).len(), 5);
        assert!(doc.is_hidden(footer));
    }

    #[test]
    fn test_filter_resets_focus() {
        let mut doc = fruit_doc(basic_options(), false);
        let mut select = bind(&mut doc, None);

        select.navigate(&mut doc, Direction::Next);
        select.navigate(&mut doc, Direction::Next);
        assert_eq!(select.focused_index(), Some(1));

        select.apply_filter(&mut doc, "a");
        assert_eq!(select.focused_index(), None);
        assert!(select
            .options()
            .iter()
            .all(|o| !doc.has_class(o.node, "active")));
    }

    #[test]
    fn test_navigation_wraps() {
        let mut doc = fruit_doc(basic_options(), false);
        let mut select = bind(&mut doc, None);

        assert_eq!(select.navigate(&mut doc, Direction::Previous), Some(2));
        assert_eq!(select.navigate(&mut doc, Direction::Next), Some(0));
        assert_eq!(select.navigate(&mut doc, Direction::Previous), Some(2));

        // Three presses over three visible options return to the start
        for _ in 0..3 {
            select.navigate(&mut doc, Direction::Next);
        }
        assert_eq!(select.focused_index(), Some(2));

        let marked: Vec<_> = select
            .options()
            .iter()
            .filter(|o| doc.has_class(o.node, "active"))
            .map(|o| o.label.as_str())
            .collect();
        assert_eq!(marked, vec!["Cherry"]);
    }

    #[test]
    fn test_navigation_noop_without_visible_options() {
        let mut doc = fruit_doc(basic_options(), false);
        let mut select = bind(&mut doc, None);
        select.apply_filter(&mut doc, "nothing matches");

        assert_eq!(select.navigate(&mut doc, Direction::Next), None);
        assert_eq!(select.navigate(&mut doc, Direction::Previous), None);
        assert_eq!(select.focused_index(), None);
    }

    #[test]
    fn test_navigation_scrolls_list() {
        let mut doc = fruit_doc(basic_options(), false);
        let mut select = bind(&mut doc, None);
        let list = select.options_node();

        // Viewport shows two 20px rows
        select.navigate(&mut doc, Direction::Next);
        select.navigate(&mut doc, Direction::Next);
        assert_eq!(doc.element(list).unwrap().scroll_top(), 0.0);

        select.navigate(&mut doc, Direction::Next);
        assert_eq!(doc.element(list).unwrap().scroll_top(), 20.0);

        select.navigate(&mut doc, Direction::Next);
        assert_eq!(doc.element(list).unwrap().scroll_top(), 0.0);
    }

    #[test]
    fn test_enter_commits_focused() {
        let mut doc = fruit_doc(basic_options(), false);
        let (calls, sink) = capture();
        let mut select = bind(&mut doc, Some(sink));
        select.open(&mut doc);

        let mut enter = KeyEvent::new(Key::Enter);
        assert!(select.handle_key(&mut doc, &mut enter));
        assert!(enter.default_prevented());
        assert!(calls.borrow().is_empty());

        let mut down = KeyEvent::new(Key::ArrowDown);
        select.handle_key(&mut doc, &mut down);
        assert!(down.default_prevented());
        assert!(down.propagation_stopped());

        let mut enter = KeyEvent::new(Key::Enter);
        select.handle_key(&mut doc, &mut enter);

        assert_eq!(doc.value(select.input_node()), Some("Apple"));
        assert_eq!(doc.value(select.hidden_node()), Some("1"));
        assert!(!select.is_open());
        assert_eq!(
            calls.borrow().as_slice(),
            &[("1".to_string(), "Apple".to_string())]
        );
    }

    #[test]
    fn test_tab_commit_is_configurable() {
        let mut doc = fruit_doc(basic_options(), false);
        let mut select = bind(&mut doc, None);
        select.navigate(&mut doc, Direction::Next);

        let mut tab = KeyEvent::new(Key::Tab);
        assert!(!select.handle_key(&mut doc, &mut tab));
        assert!(!tab.default_prevented());
        assert_eq!(doc.value(select.hidden_node()), Some("initial"));

        let mut doc = fruit_doc(basic_options(), false);
        let mut select = SearchableSelect::bind(
            &mut doc,
            "fruit-input",
            "fruit-options",
            "fruit",
            &SelectConfig::minimal(),
            None,
        )
        .unwrap();

        let mut tab = KeyEvent::new(Key::Tab);
        assert!(!select.handle_key(&mut doc, &mut tab));

        select.navigate(&mut doc, Direction::Next);
        let mut tab = KeyEvent::new(Key::Tab);
        assert!(select.handle_key(&mut doc, &mut tab));
        assert!(tab.default_prevented());
        assert_eq!(doc.value(select.hidden_node()), Some("1"));
    }

    #[test]
    fn test_propagation_is_configurable() {
        let mut doc = fruit_doc(basic_options(), false);
        let config = SelectConfig {
            stop_key_propagation: false,
            ..SelectConfig::default()
        };
        let mut select =
            SearchableSelect::bind(&mut doc, "fruit-input", "fruit-options", "fruit", &config, None)
                .unwrap();

        let mut down = KeyEvent::new(Key::ArrowDown);
        select.handle_key(&mut doc, &mut down);
        assert!(down.default_prevented());
        assert!(!down.propagation_stopped());
    }

    #[test]
    fn test_escape_closes_without_changing_selection() {
        let mut doc = fruit_doc(basic_options(), false);
        let mut select = bind(&mut doc, None);
        select.commit(&mut doc, 2);
        select.open(&mut doc);
        select.navigate(&mut doc, Direction::Next);

        let mut escape = KeyEvent::new(Key::Escape);
        assert!(select.handle_key(&mut doc, &mut escape));
        assert!(!select.is_open());
        assert_eq!(doc.value(select.hidden_node()), Some("3"));
        assert_eq!(select.selected().map(|o| o.label.as_str()), Some("Cherry"));
    }

    #[test]
    fn test_other_keys_ignored() {
        let mut doc = fruit_doc(basic_options(), false);
        let mut select = bind(&mut doc, None);
        let mut key = KeyEvent::new(Key::Character('a'));
        assert!(!select.handle_key(&mut doc, &mut key));
        assert!(!key.default_prevented());
    }

    #[test]
    fn test_commit_moves_selected_flag() {
        let mut doc = fruit_doc(basic_options(), false);
        let mut select = bind(&mut doc, None);

        assert!(select.commit(&mut doc, 0));
        assert!(select.commit(&mut doc, 3));
        assert!(!select.commit(&mut doc, 42));

        let selected: Vec<_> = select.options().iter().filter(|o| o.selected).collect();
        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].label, "Durian");
        assert_eq!(doc.value(select.hidden_node()), Some("4"));

        let apple = select.options()[0].node;
        let durian = select.options()[3].node;
        assert!(!doc.has_class(apple, "selected"));
        assert!(doc.has_class(durian, "selected"));
    }

    #[test]
    fn test_reveal_is_idempotent() {
        let mut doc = fruit_doc(basic_options(), true);
        let mut select = bind(&mut doc, None);

        select.reveal_extended(&mut doc);
        select.reveal_extended(&mut doc);
        assert!(select.showing_extended());
        assert_eq!(select.visible_labels(&doc).len(), 5);
    }

    #[test]
    fn test_option_and_show_all_targets() {
        let options = vec![el("div")
            .class("option")
            .data("value", "1")
            .child(el("strong").id("apple-label").text("Apple"))];
        let mut doc = fruit_doc(options, true);
        let select = bind(&mut doc, None);

        let inner = doc.get_element_by_id("apple-label").unwrap();
        let show_all = doc.get_element_by_id("show-all").unwrap();
        assert_eq!(select.option_at(&doc, inner), Some(0));
        assert_eq!(select.option_at(&doc, show_all), None);
        assert!(select.is_show_all_target(&doc, show_all));
        assert!(select.contains(&doc, show_all));
        assert!(!select.contains(&doc, doc.root()));
        assert_eq!(select.options()[0].label, "Apple");
    }

    #[test]
    fn test_hidden_targets_do_not_match() {
        let mut doc = fruit_doc(basic_options(), true);
        let mut select = bind(&mut doc, None);
        let durian = select.options()[3].node;
        let show_all = doc.get_element_by_id("show-all").unwrap();

        assert_eq!(select.option_at(&doc, durian), None);
        assert!(select.is_show_all_target(&doc, show_all));

        select.reveal_extended(&mut doc);
        assert_eq!(select.option_at(&doc, durian), Some(3));
        assert!(!select.is_show_all_target(&doc, show_all));

        select.apply_filter(&mut doc, "apple");
        assert_eq!(select.option_at(&doc, durian), None);
        assert_eq!(select.option_at(&doc, select.options()[0].node), Some(0));
    }

    #[test]
    fn test_assigned_sink_sees_later_commits_only() {
        let mut options = basic_options();
        options[0] = option("1", "Apple").data("selected", "true");
        let mut doc = fruit_doc(options, false);
        let mut select = bind(&mut doc, None);

        let calls: Rc<RefCell<Vec<String>>> = Rc::new(RefCell::new(Vec::new()));
        let calls_clone = Rc::clone(&calls);
        select.set_on_select(move |value, _label| calls_clone.borrow_mut().push(value.to_string()));
        assert!(calls.borrow().is_empty());

        select.commit(&mut doc, 2);
        assert_eq!(calls.borrow().as_slice(), &["3".to_string()]);

        select.clear_on_select();
        select.commit(&mut doc, 1);
        assert_eq!(calls.borrow().len(), 1);
        assert_eq!(doc.value(select.hidden_node()), Some("2"));
    }
}
