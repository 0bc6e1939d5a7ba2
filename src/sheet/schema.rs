//! Property-type catalog for component types.
//!
//! The style sheet needs to know which value type each property holds in
//! order to decode it. A [`TypeSchema`] records, per component type, the
//! declared property types and an optional parent component type whose
//! declarations are inherited.

use std::collections::HashMap;

/// Property declarations of one component type.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ComponentType {
    parent: Option<String>,
    properties: HashMap<String, String>,
}

impl ComponentType {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inherit property declarations from `parent`.
    pub fn parent(mut self, parent: impl Into<String>) -> Self {
        self.parent = Some(parent.into());
        self
    }

    /// Declare `property` as holding values of `value_type` (a registry type name).
    pub fn property(mut self, property: impl Into<String>, value_type: impl AsRef<str>) -> Self {
        self.properties
            .insert(property.into(), value_type.as_ref().to_string());
        self
    }
}

/// Catalog of component types and their property types.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TypeSchema {
    types: HashMap<String, ComponentType>,
}

impl TypeSchema {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a component type.
    pub fn component(mut self, type_name: impl Into<String>, component: ComponentType) -> Self {
        self.types.insert(type_name.into(), component);
        self
    }

    pub fn contains(&self, type_name: &str) -> bool {
        self.types.contains_key(type_name)
    }

    /// The value type of `property` on `type_name`, searching parent types.
    ///
    /// Returns `None` for unknown types and undeclared properties. A cycle
    /// in parent links ends the search.
    pub fn property_type(&self, type_name: &str, property: &str) -> Option<&str> {
        let mut current = self.types.get(type_name);
        let mut hops = 0;

        while let Some(component) = current {
            if let Some(value_type) = component.properties.get(property) {
                return Some(value_type.as_str());
            }
            hops += 1;
            if hops > self.types.len() {
                return None;
            }
            current = component.parent.as_deref().and_then(|p| self.types.get(p));
        }

        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::ValueType;

    fn schema() -> TypeSchema {
        TypeSchema::new()
            .component(
                "Component",
                ComponentType::new()
                    .property("foreground", ValueType::Color)
                    .property("font", ValueType::Font),
            )
            .component(
                "Label",
                ComponentType::new()
                    .parent("Component")
                    .property("text", ValueType::String),
            )
    }

    #[test]
    fn test_local_property() {
        assert_eq!(schema().property_type("Label", "text"), Some("string"));
    }

    #[test]
    fn test_inherited_property() {
        assert_eq!(schema().property_type("Label", "foreground"), Some("color"));
    }

    #[test]
    fn test_unknown_property_or_type() {
        let schema = schema();
        assert_eq!(schema.property_type("Label", "tooltip"), None);
        assert_eq!(schema.property_type("Window", "foreground"), None);
        assert!(!schema.contains("Window"));
    }

    #[test]
    fn test_custom_type_names_are_allowed() {
        let schema = TypeSchema::new().component(
            "Chart",
            ComponentType::new().property("origin", "app.Point"),
        );
        assert_eq!(schema.property_type("Chart", "origin"), Some("app.Point"));
    }

    #[test]
    fn test_parent_cycle_terminates() {
        let schema = TypeSchema::new()
            .component("A", ComponentType::new().parent("B"))
            .component("B", ComponentType::new().parent("A"));
        assert_eq!(schema.property_type("A", "anything"), None);
    }
}
