//! Composite value types: colors, extents, fonts, borders, images.
//!
//! These are plain data. Parsing and formatting of their literal form lives
//! in the value peers; the only formatting here is the `Display` of leaf
//! types (`Color`, `Extent`, symbol enums) that the peers reuse.

use std::fmt;

use bitflags::bitflags;

/// Declares a fieldless enum backed by a fixed symbol table.
///
/// Symbols are matched exactly (case-sensitive); there is no fallback.
macro_rules! symbol_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident => $symbol:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $( $(#[$vmeta])* $variant ),+
        }

        impl $name {
            /// Every variant, in declaration order.
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// The literal symbol for this variant.
            pub fn symbol(self) -> &'static str {
                match self {
                    $( $name::$variant => $symbol ),+
                }
            }

            /// Look up a variant by its exact symbol.
            pub fn from_symbol(symbol: &str) -> Option<Self> {
                match symbol {
                    $( $symbol => Some($name::$variant), )+
                    _ => None,
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.symbol())
            }
        }
    };
}

// ── Color ────────────────────────────────────────────────────────────

/// An opaque RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Color {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(0xFF, 0xFF, 0xFF);
    pub const RED: Color = Color::rgb(0xFF, 0, 0);
    pub const GREEN: Color = Color::rgb(0, 0xFF, 0);
    pub const BLUE: Color = Color::rgb(0, 0, 0xFF);

    pub const fn rgb(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }

    /// Parse `#RRGGBB` or `#RGB` (case-insensitive hex digits).
    pub fn from_hex(text: &str) -> Option<Self> {
        let hex = text.strip_prefix('#')?;
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }
        match hex.len() {
            6 => {
                let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
                Some(Self::rgb(channel(0)?, channel(2)?, channel(4)?))
            }
            3 => {
                let channel =
                    |i: usize| u8::from_str_radix(&hex[i..i + 1], 16).ok().map(|v| v * 0x11);
                Some(Self::rgb(channel(0)?, channel(1)?, channel(2)?))
            }
            _ => None,
        }
    }
}

impl fmt::Display for Color {
    /// Canonical `#RRGGBB` form with upper-case digits.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.red, self.green, self.blue)
    }
}

// ── Extent ───────────────────────────────────────────────────────────

symbol_enum! {
    /// Unit of an [`Extent`].
    pub enum Unit {
        Px => "px",
        Percent => "%",
        Pt => "pt",
        Cm => "cm",
        Mm => "mm",
        In => "in",
        Em => "em",
        Ex => "ex",
        Pc => "pc",
    }
}

/// An integral length with a unit, e.g. `8pt`, `50%`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Extent {
    pub value: i32,
    pub unit: Unit,
}

impl Extent {
    pub const fn new(value: i32, unit: Unit) -> Self {
        Self { value, unit }
    }

    pub const fn px(value: i32) -> Self {
        Self::new(value, Unit::Px)
    }

    pub const fn pt(value: i32) -> Self {
        Self::new(value, Unit::Pt)
    }

    pub const fn percent(value: i32) -> Self {
        Self::new(value, Unit::Percent)
    }
}

impl fmt::Display for Extent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.value, self.unit)
    }
}

// ── Fonts ────────────────────────────────────────────────────────────

/// An ordered list of font family names, most preferred first.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Typeface {
    names: Vec<String>,
}

impl Typeface {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            names: vec![name.into()],
        }
    }

    /// Append a fallback family.
    pub fn with_alternate(mut self, name: impl Into<String>) -> Self {
        self.names.push(name.into());
        self
    }

    /// Build from a list of names. Returns `None` if the list is empty.
    pub fn from_names(names: Vec<String>) -> Option<Self> {
        if names.is_empty() {
            None
        } else {
            Some(Self { names })
        }
    }

    /// The preferred family.
    pub fn name(&self) -> &str {
        &self.names[0]
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }
}

bitflags! {
    /// Font style flags. The empty set is `PLAIN`.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct FontStyle: u8 {
        const BOLD = 1 << 0;
        const ITALIC = 1 << 1;
        const UNDERLINE = 1 << 2;
        const OVERLINE = 1 << 3;
        const LINE_THROUGH = 1 << 4;
    }
}

impl FontStyle {
    pub const PLAIN: FontStyle = FontStyle::empty();

    /// Flag symbols in canonical order.
    pub const SYMBOLS: &'static [(&'static str, FontStyle)] = &[
        ("BOLD", FontStyle::BOLD),
        ("ITALIC", FontStyle::ITALIC),
        ("UNDERLINE", FontStyle::UNDERLINE),
        ("OVERLINE", FontStyle::OVERLINE),
        ("LINE_THROUGH", FontStyle::LINE_THROUGH),
    ];
}

/// A font: typeface, style flags and size.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Font {
    pub typeface: Typeface,
    pub style: FontStyle,
    pub size: Extent,
}

impl Font {
    pub fn new(typeface: Typeface, style: FontStyle, size: Extent) -> Self {
        Self {
            typeface,
            style,
            size,
        }
    }
}

// ── Border ───────────────────────────────────────────────────────────

symbol_enum! {
    /// Line style of a [`Border`].
    pub enum BorderStyle {
        None => "STYLE_NONE",
        Solid => "STYLE_SOLID",
        Inset => "STYLE_INSET",
        Outset => "STYLE_OUTSET",
        Groove => "STYLE_GROOVE",
        Ridge => "STYLE_RIDGE",
        Double => "STYLE_DOUBLE",
        Dotted => "STYLE_DOTTED",
        Dashed => "STYLE_DASHED",
    }
}

/// A border with size, color and line style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Border {
    pub size: Extent,
    pub color: Color,
    pub style: BorderStyle,
}

impl Border {
    pub fn new(size: Extent, color: Color, style: BorderStyle) -> Self {
        Self { size, color, style }
    }
}

// ── Insets ───────────────────────────────────────────────────────────

/// Per-side spacing, in CSS order (top, right, bottom, left).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Insets {
    pub top: Extent,
    pub right: Extent,
    pub bottom: Extent,
    pub left: Extent,
}

impl Insets {
    pub fn new(top: Extent, right: Extent, bottom: Extent, left: Extent) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }

    /// Same extent on every side.
    pub fn all(extent: Extent) -> Self {
        Self::new(extent, extent, extent, extent)
    }

    /// Vertical extent for top/bottom, horizontal for left/right.
    pub fn symmetric(vertical: Extent, horizontal: Extent) -> Self {
        Self::new(vertical, horizontal, vertical, horizontal)
    }
}

// ── Alignment ────────────────────────────────────────────────────────

symbol_enum! {
    /// Horizontal component of an [`Alignment`].
    pub enum HorizontalAlign {
        Default => "DEFAULT",
        Leading => "LEADING",
        Trailing => "TRAILING",
        Left => "LEFT",
        Center => "CENTER",
        Right => "RIGHT",
    }
}

symbol_enum! {
    /// Vertical component of an [`Alignment`].
    pub enum VerticalAlign {
        Default => "DEFAULT",
        Top => "TOP",
        Center => "CENTER",
        Bottom => "BOTTOM",
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Alignment {
    pub horizontal: HorizontalAlign,
    pub vertical: VerticalAlign,
}

impl Alignment {
    pub fn new(horizontal: HorizontalAlign, vertical: VerticalAlign) -> Self {
        Self {
            horizontal,
            vertical,
        }
    }
}

// ── Images ───────────────────────────────────────────────────────────

/// A reference to an image by URI, with optional rendered dimensions.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ImageReference {
    pub uri: String,
    pub width: Option<Extent>,
    pub height: Option<Extent>,
}

impl ImageReference {
    pub fn new(uri: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            width: None,
            height: None,
        }
    }

    pub fn with_size(mut self, width: Option<Extent>, height: Option<Extent>) -> Self {
        self.width = width;
        self.height = height;
        self
    }
}

symbol_enum! {
    /// Tiling mode of a [`FillImage`].
    pub enum Repeat {
        Both => "REPEAT",
        None => "NO_REPEAT",
        Horizontal => "REPEAT_HORIZONTAL",
        Vertical => "REPEAT_VERTICAL",
    }
}

symbol_enum! {
    /// Whether a [`FillImage`] scrolls with content.
    pub enum Attachment {
        Scroll => "ATTACHMENT_SCROLL",
        Fixed => "ATTACHMENT_FIXED",
    }
}

/// A background image with offset, tiling and attachment.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FillImage {
    pub image: ImageReference,
    pub x: Option<Extent>,
    pub y: Option<Extent>,
    pub repeat: Repeat,
    pub attachment: Attachment,
}

// ── Locale ───────────────────────────────────────────────────────────

/// A `language[_COUNTRY[_VARIANT]]` locale identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Locale {
    pub language: String,
    pub country: Option<String>,
    pub variant: Option<String>,
}

impl Locale {
    pub fn new(language: impl Into<String>) -> Self {
        Self {
            language: language.into(),
            country: None,
            variant: None,
        }
    }

    pub fn with_country(mut self, country: impl Into<String>) -> Self {
        self.country = Some(country.into());
        self
    }

    pub fn with_variant(mut self, variant: impl Into<String>) -> Self {
        self.variant = Some(variant.into());
        self
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.language)?;
        match (&self.country, &self.variant) {
            (Some(country), Some(variant)) => write!(f, "_{country}_{variant}"),
            (Some(country), None) => write!(f, "_{country}"),
            (None, Some(variant)) => write!(f, "__{variant}"),
            (None, None) => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_hex_forms() {
        assert_eq!(Color::from_hex("#0000FF"), Some(Color::BLUE));
        assert_eq!(Color::from_hex("#0000ff"), Some(Color::BLUE));
        assert_eq!(Color::from_hex("#f00"), Some(Color::RED));
        assert_eq!(Color::from_hex("0000FF"), None);
        assert_eq!(Color::from_hex("#00FF"), None);
        assert_eq!(Color::from_hex("#GG0000"), None);
    }

    #[test]
    fn test_color_display_is_upper_hex() {
        assert_eq!(Color::rgb(0xAB, 0x01, 0xEF).to_string(), "#AB01EF");
    }

    #[test]
    fn test_extent_display() {
        assert_eq!(Extent::pt(8).to_string(), "8pt");
        assert_eq!(Extent::percent(-5).to_string(), "-5%");
    }

    #[test]
    fn test_symbol_lookup_is_exact() {
        assert_eq!(BorderStyle::from_symbol("STYLE_INSET"), Some(BorderStyle::Inset));
        assert_eq!(BorderStyle::from_symbol("style_inset"), None);
        assert_eq!(Repeat::from_symbol("REPEAT"), Some(Repeat::Both));
        assert_eq!(Unit::from_symbol("%"), Some(Unit::Percent));
    }

    #[test]
    fn test_symbol_tables_round_trip() {
        for unit in Unit::ALL {
            assert_eq!(Unit::from_symbol(unit.symbol()), Some(*unit));
        }
        for align in HorizontalAlign::ALL {
            assert_eq!(HorizontalAlign::from_symbol(align.symbol()), Some(*align));
        }
    }

    #[test]
    fn test_typeface_requires_a_name() {
        assert!(Typeface::from_names(Vec::new()).is_none());
        let face = Typeface::new("Verdana").with_alternate("Arial");
        assert_eq!(face.name(), "Verdana");
        assert_eq!(face.names().len(), 2);
    }

    #[test]
    fn test_insets_shorthands() {
        let insets = Insets::symmetric(Extent::px(1), Extent::px(2));
        assert_eq!(insets.top, Extent::px(1));
        assert_eq!(insets.right, Extent::px(2));
        assert_eq!(insets.bottom, Extent::px(1));
        assert_eq!(insets.left, Extent::px(2));
    }

    #[test]
    fn test_locale_display() {
        assert_eq!(Locale::new("en").with_country("US").to_string(), "en_US");
        assert_eq!(Locale::new("no").with_variant("NY").to_string(), "no__NY");
        assert_eq!(Locale::new("fr").to_string(), "fr");
    }
}
