//! Sift element tree
//!
//! A small retained element tree standing in for host page markup:
//!
//! - `Document` - slotmap-backed arena with an O(1) id index
//! - `Element` - tag, id, classes, attributes, text, form value, visibility
//! - `ElementBuilder` - fluent construction of subtrees (`el("div").class(..)`)
//!
//! Geometry is block-only: the direct children of a container stack
//! vertically by their declared heights, hidden children take no space. That is
//! enough to express "scroll the minimum amount to bring a row into view".
//!
//! # Example
//!
//! ```rust
//! use sift_dom::{el, Document};
//!
//! let mut doc = Document::new();
//! let root = doc.root();
//! doc.append(
//!     root,
//!     el("div").class("searchable-select").child(
//!         el("div").id("fruit-options").class("options").child(
//!             el("div").class("option").data("value", "1").text("Apple"),
//!         ),
//!     ),
//! )
//! .unwrap();
//!
//! let list = doc.get_element_by_id("fruit-options").unwrap();
//! let options = doc.query_class(list, "option");
//! assert_eq!(doc.text_content(options[0]), "Apple");
//! ```

mod document;
mod element;
pub mod error;

pub use document::{Document, NodeId};
pub use element::{el, Element, ElementBuilder};
pub use error::{DomError, Result};
