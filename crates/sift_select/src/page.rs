//! Page harness - routes host input events to searchable selects
//!
//! A [`Page`] owns the document, the virtual timer queue and the instance
//! registry, and dispatches discrete input events in browser order:
//!
//! ```text
//! click(target)
//!     ↓
//! focus change (inputs and buttons take focus, anything else blurs)
//!     ↓
//! element-local handling (show-all affordance, option commit)
//!     ↓
//! shared outside-click dismissal
//! ```
//!
//! Typing only schedules a filter pass; it runs once the host advances the
//! clock past the debounce delay with [`Page::advance_time`].
//!
//! # Example
//!
//! ```ignore
//! let mut page = Page::new(document);
//! page.ready();
//!
//! page.focus("country-input")?;
//! page.type_text("country-input", "ger")?;
//! page.advance_time(150);
//! page.key_down("country-input", Key::ArrowDown)?;
//! page.key_down("country-input", Key::Enter)?;
//! ```

use std::time::Duration;

use sift_core::events::{Key, KeyEvent};
use sift_core::timer::{PendingTimer, TimerQueue};
use sift_dom::{Document, DomError, NodeId};

use crate::config::SelectConfig;
use crate::error::Result;
use crate::registry::{SelectId, SelectRegistry};
use crate::scan::scan_groups;
use crate::widget::{OnSelect, SearchableSelect};

/// Deferred work owned by the page's timer queue
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PageTask {
    /// Debounced filter pass for one widget
    Filter(SelectId),
}

/// A document plus the widgets bound to it
pub struct Page {
    document: Document,
    timers: TimerQueue<PageTask>,
    registry: SelectRegistry,
    focused: Option<NodeId>,
}

impl std::fmt::Debug for Page {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Page")
            .field("elements", &self.document.len())
            .field("timers", &self.timers)
            .field("registry", &self.registry)
            .field("focused", &self.focused)
            .finish()
    }
}

impl Page {
    /// Wrap a document using the default configuration
    pub fn new(document: Document) -> Self {
        Self::with_config(document, SelectConfig::default())
    }

    pub fn with_config(document: Document, config: SelectConfig) -> Self {
        Self {
            document,
            timers: TimerQueue::new(),
            registry: SelectRegistry::new(config),
            focused: None,
        }
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn document_mut(&mut self) -> &mut Document {
        &mut self.document
    }

    pub fn registry(&self) -> &SelectRegistry {
        &self.registry
    }

    pub fn config(&self) -> &SelectConfig {
        self.registry.config()
    }

    pub fn now_ms(&self) -> u64 {
        self.timers.now_ms()
    }

    pub fn pending_timers(&self) -> Vec<PendingTimer> {
        self.timers.pending()
    }

    /// Element currently holding focus
    pub fn focused(&self) -> Option<NodeId> {
        self.focused
    }

    // =========================================================================
    // Initialization
    // =========================================================================

    /// Bind a widget to every well-formed root in the document
    ///
    /// Malformed roots are skipped. Safe to call repeatedly; already bound
    /// inputs keep their widget. Returns how many roots resolved to a widget.
    pub fn ready(&mut self) -> usize {
        let groups = scan_groups(&self.document, &self.registry.config().classes);
        let mut bound = 0;
        for group in groups {
            match self.registry.get_or_create(
                &mut self.document,
                &group.input_id,
                &group.options_id,
                &group.hidden_id,
            ) {
                Ok(_) => bound += 1,
                Err(err) => tracing::warn!("Skipping searchable select: {}", err),
            }
        }
        tracing::debug!("Page ready: {} searchable select(s) bound", bound);
        bound
    }

    /// Manually bind a widget; see [`SelectRegistry::get_or_create`]
    pub fn get_or_create(
        &mut self,
        input_id: &str,
        options_id: &str,
        hidden_id: &str,
    ) -> Result<SelectId> {
        self.registry
            .get_or_create(&mut self.document, input_id, options_id, hidden_id)
    }

    /// Manually bind a widget with a notification sink; see
    /// [`SelectRegistry::get_or_create_with`]
    pub fn get_or_create_with<F>(
        &mut self,
        input_id: &str,
        options_id: &str,
        hidden_id: &str,
        on_select: F,
    ) -> Result<SelectId>
    where
        F: FnMut(&str, &str) + 'static,
    {
        let sink: OnSelect = Box::new(on_select);
        self.registry.get_or_create_with(
            &mut self.document,
            input_id,
            options_id,
            hidden_id,
            Some(sink),
        )
    }

    pub fn widget(&self, id: SelectId) -> Option<&SearchableSelect> {
        self.registry.get(id)
    }

    pub fn widget_mut(&mut self, id: SelectId) -> Option<&mut SearchableSelect> {
        self.registry.get_mut(id)
    }

    pub fn widget_for_input(&self, input_id: &str) -> Option<&SearchableSelect> {
        self.registry
            .find_by_input(input_id)
            .and_then(|id| self.registry.get(id))
    }

    /// Assign the notification sink of the widget bound to `input_id`
    ///
    /// The sink sees later commits only. Returns false if no widget is bound
    /// to that input.
    pub fn set_on_select<F>(&mut self, input_id: &str, on_select: F) -> bool
    where
        F: FnMut(&str, &str) + 'static,
    {
        let Some(select) = self.registry.find_by_input(input_id) else {
            return false;
        };
        match self.registry.get_mut(select) {
            Some(widget) => {
                widget.set_on_select(on_select);
                true
            }
            None => false,
        }
    }

    /// Remove the notification sink of the widget bound to `input_id`
    pub fn clear_on_select(&mut self, input_id: &str) -> bool {
        let Some(select) = self.registry.find_by_input(input_id) else {
            return false;
        };
        match self.registry.get_mut(select) {
            Some(widget) => {
                widget.clear_on_select();
                true
            }
            None => false,
        }
    }

    // =========================================================================
    // Input events
    // =========================================================================

    /// Move focus to the element with `id`
    pub fn focus(&mut self, id: &str) -> Result<()> {
        let node = self.document.require(id)?;
        self.focus_node(node);
        Ok(())
    }

    fn focus_node(&mut self, node: NodeId) {
        if self.focused == Some(node) {
            return;
        }
        self.focused = Some(node);

        if let Some(select) = self.registry.find_by_input_node(node) {
            if let Some(widget) = self.registry.get_mut(select) {
                widget.open(&mut self.document);
            }
        }
    }

    /// Replace the value of the element with `id` and fire an input event
    pub fn type_text(&mut self, id: &str, text: &str) -> Result<()> {
        let node = self.document.require(id)?;
        self.document.set_value(node, text)?;

        if let Some(select) = self.registry.find_by_input_node(node) {
            if let Some(widget) = self.registry.get_mut(select) {
                widget.schedule_filter(&mut self.timers, PageTask::Filter(select));
            }
        }
        Ok(())
    }

    /// Press `key` while the element with `id` has focus
    ///
    /// Returns the event so callers can inspect whether its default action was
    /// suppressed or its propagation stopped.
    pub fn key_down(&mut self, id: &str, key: Key) -> Result<KeyEvent> {
        let node = self.document.require(id)?;
        let mut event = KeyEvent::new(key);

        if let Some(select) = self.registry.find_by_input_node(node) {
            if let Some(widget) = self.registry.get_mut(select) {
                widget.handle_key(&mut self.document, &mut event);
            }
        }
        Ok(event)
    }

    /// Click the element with `id`
    pub fn click(&mut self, id: &str) -> Result<()> {
        let node = self.document.require(id)?;
        self.click_node(node)
    }

    /// Click an element by node handle
    pub fn click_node(&mut self, node: NodeId) -> Result<()> {
        let element = self.document.element(node).ok_or(DomError::StaleNode)?;

        if element.is_focusable() {
            self.focus_node(node);
        } else {
            self.focused = None;
        }

        if let Some(select) = self.registry.find_by_list_target(&self.document, node) {
            if let Some(widget) = self.registry.get_mut(select) {
                if widget.is_show_all_target(&self.document, node) {
                    widget.reveal_extended(&mut self.document);
                    widget.open(&mut self.document);
                } else if let Some(index) = widget.option_at(&self.document, node) {
                    widget.commit(&mut self.document, index);
                }
            }
        }

        if self.registry.is_dismissal_installed() {
            self.registry.dismiss_outside(&mut self.document, node);
        }
        Ok(())
    }

    /// Advance the clock by `ms` and run due tasks
    ///
    /// Returns how many filter passes ran.
    pub fn advance_time(&mut self, ms: u64) -> usize {
        let fired = self.timers.advance(Duration::from_millis(ms));
        let mut ran = 0;
        for (timer, task) in fired {
            match task {
                PageTask::Filter(select) => {
                    if let Some(widget) = self.registry.get_mut(select) {
                        if widget.on_filter_timer(&mut self.document, timer) {
                            ran += 1;
                        }
                    }
                }
            }
        }
        ran
    }
}
