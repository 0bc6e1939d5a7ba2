//! # peerstyle
//!
//! Typed style declarations for UI components.
//!
//! Property values are written as plain literals (`#FF0000`, `12pt`) or as
//! functor expressions (`border(8pt,#FF0000,STYLE_INSET)`). Value peers turn
//! those literals into typed values and back, and style sheets group property
//! assignments under `Type.name` selectors that inherit from one another via
//! `extends`.
//!
//! ## Core Systems
//!
//! - **[`decl`]**: functor-expression tokenizer and composer
//! - **[`value`]**: typed values (colors, extents, fonts, borders, ...)
//! - **[`peer`]**: peer trait, registry, manifest and builtin peers
//! - **[`sheet`]**: style-sheet parser, style blocks, cascade resolution
//!
//! ## Example
//!
//! ```
//! use std::sync::Arc;
//! use peerstyle::{ComponentType, PeerRegistry, StyleSheet, TypeSchema, ValueType};
//!
//! let schema = TypeSchema::new().component(
//!     "Label",
//!     ComponentType::new().property("foreground", ValueType::Color),
//! );
//! let sheet = StyleSheet::parse(
//!     "Label.base { foreground: #FF0000; }\nLabel.warn extends Label.base { }",
//!     Arc::new(PeerRegistry::builtin()),
//!     &schema,
//! )
//! .unwrap();
//!
//! let style = sheet.get_style("Label", Some("warn")).unwrap();
//! assert_eq!(style.encode("foreground").unwrap().as_deref(), Some("#FF0000"));
//! ```

// Literals and values
pub mod decl;
pub mod value;

// Conversion
pub mod peer;

// Style sheets
pub mod sheet;

pub use peer::{Peer, PeerContext, PeerError, PeerRegistry};
pub use sheet::{
    ComponentType, ResolvedStyle, Selector, StyleSheet, StyleSheetError, StyleSheetLoader,
    StyleValue, TypeSchema,
};
pub use value::{Value, ValueType};
