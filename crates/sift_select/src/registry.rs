//! Instance registry for searchable selects
//!
//! The registry is the single construction point for widgets. It keys every
//! instance by its input element id so repeated initialization passes never
//! bind a second widget to the same input, and it owns the one shared
//! outside-click listener that closes dropdowns across all instances.
//!
//! A registry lives as long as its page. Tests build one per case instead of
//! sharing process-wide state.

use rustc_hash::FxHashMap;
use sift_dom::{Document, NodeId};
use slotmap::{new_key_type, SlotMap};

use crate::config::SelectConfig;
use crate::error::Result;
use crate::widget::{OnSelect, SearchableSelect};

new_key_type! {
    /// Handle to a registered searchable select
    pub struct SelectId;
}

/// Registry of live searchable selects, keyed by input id
pub struct SelectRegistry {
    instances: SlotMap<SelectId, SearchableSelect>,
    by_input: FxHashMap<String, SelectId>,
    dismissal_installed: bool,
    config: SelectConfig,
}

impl std::fmt::Debug for SelectRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SelectRegistry")
            .field("instances", &self.instances.len())
            .field("dismissal_installed", &self.dismissal_installed)
            .finish()
    }
}

impl Default for SelectRegistry {
    fn default() -> Self {
        Self::new(SelectConfig::default())
    }
}

impl SelectRegistry {
    /// Create an empty registry whose widgets use `config`
    pub fn new(config: SelectConfig) -> Self {
        Self {
            instances: SlotMap::with_key(),
            by_input: FxHashMap::default(),
            dismissal_installed: false,
            config,
        }
    }

    pub fn config(&self) -> &SelectConfig {
        &self.config
    }

    /// Return the widget bound to `input_id`, constructing it on first use
    ///
    /// Later calls with the same `input_id` return the first instance even if
    /// the other ids differ.
    pub fn get_or_create(
        &mut self,
        doc: &mut Document,
        input_id: &str,
        options_id: &str,
        hidden_id: &str,
    ) -> Result<SelectId> {
        self.get_or_create_with(doc, input_id, options_id, hidden_id, None)
    }

    /// Like [`get_or_create`](Self::get_or_create), registering `on_select`
    /// before the initial value is resolved
    ///
    /// When the instance already exists the sink is dropped.
    pub fn get_or_create_with(
        &mut self,
        doc: &mut Document,
        input_id: &str,
        options_id: &str,
        hidden_id: &str,
        on_select: Option<OnSelect>,
    ) -> Result<SelectId> {
        if let Some(&existing) = self.by_input.get(input_id) {
            tracing::debug!("Reusing searchable select for input '{}'", input_id);
            if on_select.is_some() {
                tracing::debug!("Ignoring on_select for already bound input '{}'", input_id);
            }
            return Ok(existing);
        }

        let widget =
            SearchableSelect::bind(doc, input_id, options_id, hidden_id, &self.config, on_select)?;
        let id = self.instances.insert(widget);
        self.by_input.insert(input_id.to_string(), id);
        self.register_dismissal_listener();
        Ok(id)
    }

    // =========================================================================
    // Lookup
    // =========================================================================

    pub fn get(&self, id: SelectId) -> Option<&SearchableSelect> {
        self.instances.get(id)
    }

    pub fn get_mut(&mut self, id: SelectId) -> Option<&mut SearchableSelect> {
        self.instances.get_mut(id)
    }

    pub fn find_by_input(&self, input_id: &str) -> Option<SelectId> {
        self.by_input.get(input_id).copied()
    }

    /// Widget whose text input is `node`
    pub fn find_by_input_node(&self, node: NodeId) -> Option<SelectId> {
        self.instances
            .iter()
            .find(|(_, widget)| widget.input_node() == node)
            .map(|(id, _)| id)
    }

    /// Widget whose option list holds `node`
    pub fn find_by_list_target(&self, doc: &Document, node: NodeId) -> Option<SelectId> {
        self.instances
            .iter()
            .find(|(_, widget)| doc.contains(widget.options_node(), node))
            .map(|(id, _)| id)
    }

    /// Instances in creation order
    pub fn iter(&self) -> impl Iterator<Item = (SelectId, &SearchableSelect)> {
        self.instances.iter()
    }

    pub fn len(&self) -> usize {
        self.instances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }

    // =========================================================================
    // Outside-click dismissal
    // =========================================================================

    /// Install the shared outside-click listener
    ///
    /// Only the first call installs it; returns whether this call did.
    pub fn register_dismissal_listener(&mut self) -> bool {
        if self.dismissal_installed {
            return false;
        }
        self.dismissal_installed = true;
        tracing::debug!("Outside-click dismissal listener installed");
        true
    }

    pub fn is_dismissal_installed(&self) -> bool {
        self.dismissal_installed
    }

    /// Close every widget whose input and option list both miss `target`
    ///
    /// Returns how many open dropdowns this pass closed.
    pub fn dismiss_outside(&mut self, doc: &mut Document, target: NodeId) -> usize {
        let mut closed = 0;
        for (_, widget) in self.instances.iter_mut() {
            if widget.contains(doc, target) {
                continue;
            }
            if widget.is_open() {
                closed += 1;
            }
            widget.close(doc);
        }
        if closed > 0 {
            tracing::trace!("Outside click closed {} dropdown(s)", closed);
        }
        closed
    }
}
