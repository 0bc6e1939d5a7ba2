//! Style sheet: block arena, extends validation and cascade resolution.
//!
//! Compiles a [`ParsedSheet`] into [`StyleBlock`]s keyed by [`Selector`],
//! decoding typed property values through the peer registry, and answers
//! `(type, name)` queries by merging a block with its ancestors.
//!
//! Cascade order for a block:
//!
//! 1. Properties declared on the block itself
//! 2. Its `extends` parents in declaration order, each one fully (with its
//!    own ancestors, depth-first) before the next parent
//!
//! The first source to supply a property wins; later sources only fill gaps.

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex, PoisonError};

use indexmap::IndexMap;
use slotmap::SlotMap;

use crate::peer::{PeerError, PeerRegistry};
use crate::sheet::error::StyleSheetError;
use crate::sheet::model::{BlockId, ParsedSheet, Selector, StyleBlock, StyleValue};
use crate::sheet::parser::parse_sheet;
use crate::sheet::schema::TypeSchema;
use crate::value::Value;

/// A loaded, immutable style sheet.
#[derive(Debug)]
pub struct StyleSheet {
    blocks: SlotMap<BlockId, StyleBlock>,
    index: HashMap<Selector, BlockId>,
    /// Block ids in order of first definition.
    order: Vec<BlockId>,
    registry: Arc<PeerRegistry>,
}

impl StyleSheet {
    /// Parse and compile style-sheet source.
    pub fn parse(
        source: &str,
        registry: Arc<PeerRegistry>,
        schema: &TypeSchema,
    ) -> Result<Self, StyleSheetError> {
        let parsed = parse_sheet(source)?;
        Self::compile(&parsed, registry, schema)
    }

    /// Compile parsed rules into style blocks.
    ///
    /// - an `extends` reference must name a selector defined by an earlier rule
    /// - a rule for an already-defined selector merges into that block:
    ///   its properties override, its extends are appended
    /// - typed properties (per `schema`) are decoded now; others stay raw
    /// - any extends cycle fails the whole load
    pub fn compile(
        parsed: &ParsedSheet,
        registry: Arc<PeerRegistry>,
        schema: &TypeSchema,
    ) -> Result<Self, StyleSheetError> {
        let mut sheet = StyleSheet {
            blocks: SlotMap::with_key(),
            index: HashMap::new(),
            order: Vec::new(),
            registry,
        };

        for rule in &parsed.rules {
            let mut parents = Vec::with_capacity(rule.extends.len());
            for reference in &rule.extends {
                let parent = sheet.index.get(&reference.selector).copied().ok_or_else(|| {
                    StyleSheetError::ForwardReference {
                        line: reference.line,
                        selector: rule.selector.to_string(),
                        reference: reference.selector.to_string(),
                    }
                })?;
                parents.push(parent);
            }

            let mut properties = Vec::with_capacity(rule.declarations.len());
            for decl in &rule.declarations {
                let value = match schema.property_type(&rule.selector.type_name, &decl.property) {
                    Some(type_name) => {
                        let value = sheet.registry.decode(type_name, &decl.value).map_err(
                            |source| StyleSheetError::Value {
                                line: decl.line,
                                selector: rule.selector.to_string(),
                                property: decl.property.clone(),
                                source,
                            },
                        )?;
                        StyleValue::Typed {
                            type_name: type_name.to_string(),
                            value,
                        }
                    }
                    None => StyleValue::Raw(decl.value.clone()),
                };
                properties.push((decl.property.clone(), value));
            }

            let id = match sheet.index.get(&rule.selector) {
                Some(&id) => id,
                None => {
                    let id = sheet.blocks.insert(StyleBlock::new(rule.selector.clone()));
                    sheet.index.insert(rule.selector.clone(), id);
                    sheet.order.push(id);
                    id
                }
            };
            let block = &mut sheet.blocks[id];
            block.properties.extend(properties);
            for parent in parents {
                if !block.extends.contains(&parent) {
                    block.extends.push(parent);
                }
            }
        }

        sheet.check_cycles()?;

        tracing::debug!(
            blocks = sheet.blocks.len(),
            rules = parsed.rules.len(),
            "loaded style sheet"
        );
        Ok(sheet)
    }

    /// Fail with the first extends cycle found, as a selector path.
    fn check_cycles(&self) -> Result<(), StyleSheetError> {
        #[derive(Clone, Copy, PartialEq)]
        enum Mark {
            Visiting,
            Done,
        }

        let mut marks: HashMap<BlockId, Mark> = HashMap::new();
        // Current DFS path: each block with the index of its next parent.
        let mut stack: Vec<(BlockId, usize)> = Vec::new();

        for &root in &self.order {
            if marks.contains_key(&root) {
                continue;
            }
            marks.insert(root, Mark::Visiting);
            stack.push((root, 0));

            while let Some(frame) = stack.last_mut() {
                let (id, next) = *frame;
                let Some(&parent) = self.blocks[id].extends.get(next) else {
                    marks.insert(id, Mark::Done);
                    stack.pop();
                    continue;
                };
                frame.1 += 1;

                match marks.get(&parent) {
                    Some(Mark::Done) => {}
                    Some(Mark::Visiting) => {
                        let from = stack.iter().position(|&(p, _)| p == parent).unwrap_or(0);
                        let path = stack[from..]
                            .iter()
                            .map(|&(p, _)| p)
                            .chain(std::iter::once(parent))
                            .map(|p| self.blocks[p].selector.to_string())
                            .collect();
                        return Err(StyleSheetError::CyclicExtends { path });
                    }
                    None => {
                        marks.insert(parent, Mark::Visiting);
                        stack.push((parent, 0));
                    }
                }
            }
        }
        Ok(())
    }

    /// Resolve the style for `(type_name, name)`.
    ///
    /// Requires a block with exactly that selector: an unnamed query does not
    /// fall back to named blocks, and a named query does not fall back to the
    /// unnamed block of the type.
    pub fn get_style(&self, type_name: &str, name: Option<&str>) -> Option<ResolvedStyle> {
        let selector = Selector::new(type_name, name);
        let id = *self.index.get(&selector)?;

        let mut properties = IndexMap::new();
        let mut visited = HashSet::new();
        self.collect(id, &mut properties, &mut visited);

        tracing::trace!(
            selector = %selector,
            properties = properties.len(),
            ancestors = visited.len() - 1,
            "resolved style"
        );

        Some(ResolvedStyle {
            selector,
            properties,
            registry: Arc::clone(&self.registry),
            decoded: Arc::default(),
        })
    }

    /// Add the properties of `id` and then of its ancestors, never overriding.
    ///
    /// Pre-order depth-first walk: parents are pushed in reverse so the
    /// first-listed parent and all of its ancestors come before the next.
    fn collect(
        &self,
        id: BlockId,
        properties: &mut IndexMap<String, StyleValue>,
        visited: &mut HashSet<BlockId>,
    ) {
        let mut stack = vec![id];

        while let Some(id) = stack.pop() {
            if !visited.insert(id) {
                continue;
            }
            let Some(block) = self.blocks.get(id) else {
                continue;
            };

            for (property, value) in &block.properties {
                if !properties.contains_key(property) {
                    properties.insert(property.clone(), value.clone());
                }
            }
            stack.extend(block.extends.iter().rev().copied());
        }
    }

    /// The block for `selector`, without inheritance applied.
    pub fn block(&self, selector: &Selector) -> Option<&StyleBlock> {
        self.index.get(selector).map(|&id| &self.blocks[id])
    }

    pub fn contains(&self, type_name: &str, name: Option<&str>) -> bool {
        self.index.contains_key(&Selector::new(type_name, name))
    }

    /// Selectors in order of first definition.
    pub fn selectors(&self) -> impl Iterator<Item = &Selector> + '_ {
        self.order.iter().map(|&id| &self.blocks[id].selector)
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn registry(&self) -> &Arc<PeerRegistry> {
        &self.registry
    }
}

/// The merged property set for one selector.
///
/// Own properties come first, then inherited ones in cascade order.
/// Clones share the cache of values decoded on demand.
#[derive(Debug, Clone)]
pub struct ResolvedStyle {
    selector: Selector,
    properties: IndexMap<String, StyleValue>,
    registry: Arc<PeerRegistry>,
    /// Raw properties decoded by `get_as`, keyed by `(property, type)`.
    decoded: Arc<Mutex<HashMap<(String, String), Value>>>,
}

impl PartialEq for ResolvedStyle {
    fn eq(&self, other: &Self) -> bool {
        self.selector == other.selector && self.properties == other.properties
    }
}

impl ResolvedStyle {
    pub fn selector(&self) -> &Selector {
        &self.selector
    }

    pub fn get_property(&self, name: &str) -> Option<&StyleValue> {
        self.properties.get(name)
    }

    /// The decoded value of a typed property.
    pub fn get_value(&self, name: &str) -> Option<&Value> {
        self.get_property(name).and_then(StyleValue::value)
    }

    /// The value of `name` as `type_name`.
    ///
    /// Typed properties are returned as decoded at load. Raw properties are
    /// decoded with the peer for `type_name` on the first call for that
    /// `(name, type_name)` pair and cached; failures are not cached.
    pub fn get_as(&self, name: &str, type_name: impl AsRef<str>) -> Result<Option<Value>, PeerError> {
        let text = match self.get_property(name) {
            None => return Ok(None),
            Some(StyleValue::Typed { value, .. }) => return Ok(Some(value.clone())),
            Some(StyleValue::Raw(text)) => text,
        };

        let key = (name.to_string(), type_name.as_ref().to_string());
        let mut decoded = self.decoded.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(value) = decoded.get(&key) {
            return Ok(Some(value.clone()));
        }
        let value = self.registry.decode(&key.1, text)?;
        decoded.insert(key, value.clone());
        Ok(Some(value))
    }

    /// The canonical literal of `name`: re-encoded if typed, verbatim if raw.
    pub fn encode(&self, name: &str) -> Result<Option<String>, PeerError> {
        match self.get_property(name) {
            None => Ok(None),
            Some(StyleValue::Typed { type_name, value }) => {
                self.registry.encode(type_name, value).map(Some)
            }
            Some(StyleValue::Raw(text)) => Ok(Some(text.clone())),
        }
    }

    pub fn property_names(&self) -> impl Iterator<Item = &str> + '_ {
        self.properties.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &StyleValue)> + '_ {
        self.properties.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.properties.len()
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }
}
