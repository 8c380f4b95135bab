//! Sift searchable select
//!
//! A progressive-enhancement combobox over plain markup: a text input, an
//! option list and a hidden form field. The widget filters options as the user
//! types (debounced), moves a keyboard highlight with the arrow keys, commits
//! the chosen option's value into the hidden field, keeps a secondary tier of
//! "extended" options behind a show-all affordance, and closes when the user
//! clicks elsewhere.
//!
//! # Modules
//!
//! - [`widget`] - a single bound [`SearchableSelect`]
//! - [`registry`] - get-or-create by input id and shared outside-click dismissal
//! - [`scan`] - discovery of widget roots in markup
//! - [`page`] - event routing and the virtual clock
//! - [`config`] - behavior switches and the markup class contract
//!
//! # Example
//!
//! ```rust
//! use sift_core::Key;
//! use sift_dom::{el, Document, ElementBuilder};
//! use sift_select::Page;
//!
//! let mut doc = Document::new();
//! let root = doc.root();
//! doc.append(
//!     root,
//!     el("div")
//!         .class("searchable-select")
//!         .child(ElementBuilder::input("text").id("fruit-input"))
//!         .child(
//!             el("div")
//!                 .id("fruit-options")
//!                 .class("options")
//!                 .child(el("div").class("option").data("value", "1").text("Apple"))
//!                 .child(el("div").class("option").data("value", "2").text("Banana")),
//!         )
//!         .child(ElementBuilder::input("hidden").id("fruit")),
//! )
//! .unwrap();
//!
//! let mut page = Page::new(doc);
//! assert_eq!(page.ready(), 1);
//!
//! page.focus("fruit-input").unwrap();
//! page.type_text("fruit-input", "an").unwrap();
//! page.advance_time(150);
//! page.key_down("fruit-input", Key::ArrowDown).unwrap();
//! page.key_down("fruit-input", Key::Enter).unwrap();
//!
//! let hidden = page.document().get_element_by_id("fruit").unwrap();
//! assert_eq!(page.document().value(hidden), Some("2"));
//! ```

pub mod config;
pub mod error;
pub mod page;
pub mod registry;
pub mod scan;
pub mod widget;

pub use config::{MarkerClasses, SelectConfig};
pub use error::{ElementRole, Result, SelectError};
pub use page::{Page, PageTask};
pub use registry::{SelectId, SelectRegistry};
pub use scan::{scan_groups, SelectGroup};
pub use widget::{Direction, OnSelect, SearchableSelect, SelectOption};
