//! Integration tests for peerstyle.
//!
//! These tests exercise the public API from outside the crate: functor
//! literals, peer registries built from manifests, and style sheets resolved
//! through the cascade.

use std::sync::Arc;

use peerstyle::decl::{compose, tokenize};
use peerstyle::sheet::FsResolver;
use peerstyle::value::{
    Border, BorderStyle, Color, CustomValue, Extent, FontStyle, Insets, Typeface,
};
use peerstyle::{
    ComponentType, Peer, PeerContext, PeerError, PeerRegistry, StyleSheet, StyleSheetError,
    StyleSheetLoader, StyleValue, TypeSchema, Value, ValueType,
};
use pretty_assertions::assert_eq;

fn schema() -> TypeSchema {
    TypeSchema::new()
        .component(
            "Component",
            ComponentType::new()
                .property("foreground", ValueType::Color)
                .property("background", ValueType::Color)
                .property("font", ValueType::Font)
                .property("border", ValueType::Border)
                .property("margin", ValueType::Insets),
        )
        .component(
            "Label",
            ComponentType::new()
                .parent("Component")
                .property("text", ValueType::String),
        )
        .component("Button", ComponentType::new().parent("Label"))
}

fn load(source: &str) -> StyleSheet {
    StyleSheet::parse(source, Arc::new(PeerRegistry::builtin()), &schema())
        .unwrap_or_else(|e| panic!("load failed: {e}"))
}

// ---------------------------------------------------------------------------
// Functor literals
// ---------------------------------------------------------------------------

#[test]
fn test_tokenize_nested_functor() {
    let tokens = tokenize("font(typeface('Verdana','Arial'),BOLD|ITALIC,10pt)");
    assert_eq!(
        tokens,
        vec!["font", "typeface('Verdana','Arial')", "BOLD|ITALIC", "10pt"]
    );
    assert_eq!(tokenize(&tokens[1]), vec!["typeface", "'Verdana'", "'Arial'"]);
}

#[test]
fn test_tokenize_rejects_unbalanced() {
    assert!(tokenize("border(8pt,#FF0000").is_empty());
    assert!(tokenize("border 8pt").is_empty());
}

#[test]
fn test_compose_then_tokenize() {
    let text = compose("insets", &["1px", "2px"]);
    assert_eq!(text, "insets(1px,2px)");
    assert_eq!(tokenize(&text), vec!["insets", "1px", "2px"]);
}

// ---------------------------------------------------------------------------
// Peer registry
// ---------------------------------------------------------------------------

#[test]
fn test_builtin_registry_covers_every_value_type() {
    let registry = PeerRegistry::builtin();
    for value_type in ValueType::ALL {
        assert!(registry.contains(value_type.as_str()), "{value_type}");
    }
}

#[test]
fn test_border_decode_and_canonical_encode() {
    let registry = PeerRegistry::builtin();
    let value = registry
        .decode("border", " border( 8pt, #ff0000 ,STYLE_INSET ) ")
        .unwrap();
    assert_eq!(
        value,
        Value::Border(Border::new(Extent::pt(8), Color::RED, BorderStyle::Inset))
    );
    assert_eq!(
        registry.encode("border", &value).unwrap(),
        "border(8pt,#FF0000,STYLE_INSET)"
    );
}

#[test]
fn test_font_decode() {
    let registry = PeerRegistry::builtin();
    let value = registry
        .decode("font", "font(typeface('Verdana','Arial'),BOLD|ITALIC,10pt)")
        .unwrap();
    let font = value.as_font().unwrap();
    assert_eq!(
        font.typeface,
        Typeface::new("Verdana").with_alternate("Arial")
    );
    assert_eq!(font.style, FontStyle::BOLD | FontStyle::ITALIC);
    assert_eq!(font.size, Extent::pt(10));
}

#[test]
fn test_unknown_type_is_peer_not_found() {
    let registry = PeerRegistry::builtin();
    assert_eq!(
        registry.decode("app.Point", "1,2"),
        Err(PeerError::PeerNotFound("app.Point".into()))
    );
}

#[test]
fn test_composite_fails_without_nested_peer() {
    let manifest = "border = BorderPeer\ncolor = ColorPeer\n";
    let registry = PeerRegistry::from_manifest(manifest).unwrap();
    assert_eq!(
        registry.decode("border", "border(8pt,#FF0000,STYLE_INSET)"),
        Err(PeerError::PeerNotFound("extent".into()))
    );
}

#[test]
fn test_manifest_with_unknown_peer_fails() {
    assert!(PeerRegistry::from_manifest("color = NoSuchPeer").is_err());
}

#[derive(Debug, Clone, PartialEq)]
struct Point {
    x: i32,
    y: i32,
}

#[derive(Debug)]
struct PointPeer;

impl Peer for PointPeer {
    fn decode(&self, registry: &PeerRegistry, target: &str, text: &str) -> Result<Value, PeerError> {
        let tokens = tokenize(text);
        if tokens.len() != 3 || tokens[0] != "point" {
            return Err(PeerError::InvalidValue {
                target: target.to_string(),
                text: text.to_string(),
                reason: "expected point(x,y)".into(),
            });
        }
        let coord = |text: &str| -> Result<i32, PeerError> {
            match registry.decode("integer", text)? {
                Value::Integer(v) => Ok(v),
                other => Err(PeerError::InvalidValue {
                    target: target.to_string(),
                    text: format!("{other:?}"),
                    reason: "expected integer".into(),
                }),
            }
        };
        let point = Point {
            x: coord(&tokens[1])?,
            y: coord(&tokens[2])?,
        };
        Ok(Value::Custom(CustomValue::new(target, point)))
    }

    fn encode(&self, _registry: &PeerRegistry, target: &str, value: &Value) -> Result<String, PeerError> {
        let point = value.as_custom::<Point>().ok_or_else(|| PeerError::InvalidValue {
            target: target.to_string(),
            text: format!("{value:?}"),
            reason: "not a point".into(),
        })?;
        Ok(compose("point", &[point.x.to_string(), point.y.to_string()]))
    }
}

#[test]
fn test_custom_peer_through_manifest() {
    let manifest = format!("{}\napp.Point = PointPeer\n", peerstyle::peer::DEFAULT_MANIFEST);
    let registry = PeerRegistry::builder()
        .define_peer("PointPeer", Arc::new(PointPeer))
        .with_manifest(&manifest)
        .unwrap()
        .build();

    let value = registry.decode("app.Point", "point(3, -4)").unwrap();
    assert_eq!(value.as_custom::<Point>(), Some(&Point { x: 3, y: -4 }));
    assert_eq!(registry.encode("app.Point", &value).unwrap(), "point(3,-4)");
}

#[test]
fn test_custom_peer_in_style_sheet() {
    let registry = PeerRegistry::builder()
        .with_manifest(peerstyle::peer::DEFAULT_MANIFEST)
        .unwrap()
        .register("app.Point", Arc::new(PointPeer))
        .build();
    let schema = TypeSchema::new().component(
        "Chart",
        ComponentType::new().property("origin", "app.Point"),
    );
    let sheet = StyleSheet::parse("Chart { origin: point(1,2); }", Arc::new(registry), &schema).unwrap();
    let style = sheet.get_style("Chart", None).unwrap();
    assert_eq!(
        style.get_value("origin").and_then(|v| v.as_custom::<Point>()),
        Some(&Point { x: 1, y: 2 })
    );
    assert_eq!(style.encode("origin").unwrap().as_deref(), Some("point(1,2)"));
}

// ---------------------------------------------------------------------------
// Peer contexts
// ---------------------------------------------------------------------------

#[test]
fn test_context_builds_one_registry() {
    let context = PeerContext::default();
    assert!(!context.is_initialized());
    let first = context.registry().unwrap();
    let second = context.registry().unwrap();
    assert!(Arc::ptr_eq(&first, &second));
}

#[test]
fn test_contexts_are_isolated() {
    let full = PeerContext::default();
    let colors_only = PeerContext::new("color = ColorPeer");

    assert!(full.registry().unwrap().contains("border"));
    assert!(!colors_only.registry().unwrap().contains("border"));
}

// ---------------------------------------------------------------------------
// Style sheets
// ---------------------------------------------------------------------------

const APP_STYLE: &str = r#"
/* Shared look */
Label.base {
    foreground: #000000;
    background: #FFFFFF;
    font: font(typeface('Verdana','Arial'),PLAIN,10pt);
}

Label.title extends Label.base {
    font: font(typeface('Verdana'),BOLD,14pt);
    margin: insets(4px,8px);
}

Button extends Label.title {
    border: border(1px,#000000,STYLE_SOLID);
    tooltip: 'Press me';
}

Button.danger extends Button {
    foreground: #FF0000;
}
"#;

#[test]
fn test_multi_level_cascade() {
    let sheet = load(APP_STYLE);
    let style = sheet.get_style("Button", Some("danger")).unwrap();

    assert_eq!(
        style.get_value("foreground").and_then(Value::as_color),
        Some(Color::RED)
    );
    assert_eq!(
        style.get_value("background").and_then(Value::as_color),
        Some(Color::WHITE)
    );
    assert_eq!(
        style.get_value("margin").and_then(Value::as_insets),
        Some(Insets::symmetric(Extent::px(4), Extent::px(8)))
    );
    assert_eq!(
        style.encode("font").unwrap().as_deref(),
        Some("font(typeface('Verdana'),BOLD,14pt)")
    );
    assert_eq!(
        style.get_property("tooltip"),
        Some(&StyleValue::Raw("'Press me'".into()))
    );
}

#[test]
fn test_resolved_property_order() {
    let sheet = load(APP_STYLE);
    let style = sheet.get_style("Button", Some("danger")).unwrap();
    let names: Vec<&str> = style.property_names().collect();
    assert_eq!(
        names,
        vec!["foreground", "border", "tooltip", "font", "margin", "background"]
    );
}

#[test]
fn test_named_and_unnamed_are_distinct() {
    let sheet = load(APP_STYLE);
    assert!(sheet.get_style("Button", None).is_some());
    assert!(sheet.get_style("Label", None).is_none());
    assert!(sheet.get_style("Button", Some("missing")).is_none());
}

#[test]
fn test_syntax_error_reports_line() {
    let err = StyleSheet::parse(
        "Label {\n  foreground: #FF0000;\n  background #FFFFFF;\n}",
        Arc::new(PeerRegistry::builtin()),
        &schema(),
    )
    .unwrap_err();
    assert!(matches!(err, StyleSheetError::Syntax { line: 3, .. }), "{err}");
}

#[test]
fn test_forward_reference_error() {
    let err = StyleSheet::parse(
        "Button extends Label.base { }\nLabel.base { }",
        Arc::new(PeerRegistry::builtin()),
        &schema(),
    )
    .unwrap_err();
    assert!(err.to_string().contains("Label.base"), "{err}");
}

#[test]
fn test_loader_reads_from_root() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("app.style"), APP_STYLE).unwrap();

    let loader = StyleSheetLoader::new(
        FsResolver::new(dir.path()),
        Arc::new(PeerRegistry::builtin()),
        schema(),
    );
    let sheet = loader.load_path("app.style").unwrap();
    assert_eq!(sheet.len(), 4);
    assert!(sheet.contains("Button", Some("danger")));
}
