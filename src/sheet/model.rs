//! Style-sheet AST and style blocks.

use std::fmt;

use indexmap::IndexMap;
use slotmap::new_key_type;

use crate::value::Value;

new_key_type! {
    /// Key of a [`StyleBlock`] in its style sheet's arena.
    pub struct BlockId;
}

/// A style selector: a target type plus an optional style name.
///
/// Written `Button` or `Button.primary` in source.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Selector {
    pub type_name: String,
    pub name: Option<String>,
}

impl Selector {
    pub fn new(type_name: impl Into<String>, name: Option<&str>) -> Self {
        Self {
            type_name: type_name.into(),
            name: name.map(str::to_string),
        }
    }

    /// Selector for the unnamed style of a type.
    pub fn of_type(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            name: None,
        }
    }

    /// Selector for a named style of a type.
    pub fn named(type_name: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            name: Some(name.into()),
        }
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.name {
            Some(name) => write!(f, "{}.{}", self.type_name, name),
            None => f.write_str(&self.type_name),
        }
    }
}

/// A property value: raw literal text, or a value decoded for a known type.
#[derive(Debug, Clone, PartialEq)]
pub enum StyleValue {
    /// Text whose type the schema does not declare.
    Raw(String),
    /// A value decoded with the peer for `type_name`.
    Typed { type_name: String, value: Value },
}

impl StyleValue {
    /// The decoded value, if this property was typed at load.
    pub fn value(&self) -> Option<&Value> {
        match self {
            StyleValue::Typed { value, .. } => Some(value),
            StyleValue::Raw(_) => None,
        }
    }

    /// The raw text, if this property was not typed at load.
    pub fn raw(&self) -> Option<&str> {
        match self {
            StyleValue::Raw(text) => Some(text),
            StyleValue::Typed { .. } => None,
        }
    }
}

/// One `property: value;` line as written in source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    pub property: String,
    /// Raw value text, trimmed.
    pub value: String,
    /// 1-based source line.
    pub line: usize,
}

/// A reference to another selector in an `extends` list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtendsRef {
    pub selector: Selector,
    pub line: usize,
}

/// A parsed rule: `Selector [extends A, B] { declarations }`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    pub selector: Selector,
    pub extends: Vec<ExtendsRef>,
    pub declarations: Vec<Declaration>,
    /// Line of the selector.
    pub line: usize,
}

/// A parsed style sheet: rules in source order, not yet resolved.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedSheet {
    pub rules: Vec<Rule>,
}

impl ParsedSheet {
    pub fn new() -> Self {
        Self::default()
    }
}

/// A style block: the merged properties and extends edges of one selector.
#[derive(Debug, Clone, PartialEq)]
pub struct StyleBlock {
    pub(crate) selector: Selector,
    pub(crate) properties: IndexMap<String, StyleValue>,
    pub(crate) extends: Vec<BlockId>,
}

impl StyleBlock {
    pub(crate) fn new(selector: Selector) -> Self {
        Self {
            selector,
            properties: IndexMap::new(),
            extends: Vec::new(),
        }
    }

    pub fn selector(&self) -> &Selector {
        &self.selector
    }

    /// Properties declared directly on this block, in declaration order.
    pub fn properties(&self) -> &IndexMap<String, StyleValue> {
        &self.properties
    }

    /// Blocks this block extends, highest priority first.
    pub fn extends(&self) -> &[BlockId] {
        &self.extends
    }
}
