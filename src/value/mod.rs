//! Typed in-memory values produced and consumed by the value peers.

pub mod types;

use std::any::Any;
use std::fmt;
use std::sync::Arc;

pub use types::{
    Alignment, Attachment, Border, BorderStyle, Color, Extent, FillImage, Font, FontStyle,
    HorizontalAlign, ImageReference, Insets, Locale, Repeat, Typeface, Unit, VerticalAlign,
};

/// Builtin target types. Each has a canonical type name used as its registry key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueType {
    Boolean,
    Byte,
    Char,
    Double,
    Float,
    Integer,
    Long,
    Short,
    String,
    Locale,
    Color,
    Extent,
    Font,
    Typeface,
    Border,
    Insets,
    Alignment,
    FillImage,
    Image,
}

impl ValueType {
    pub const ALL: &'static [ValueType] = &[
        ValueType::Boolean,
        ValueType::Byte,
        ValueType::Char,
        ValueType::Double,
        ValueType::Float,
        ValueType::Integer,
        ValueType::Long,
        ValueType::Short,
        ValueType::String,
        ValueType::Locale,
        ValueType::Color,
        ValueType::Extent,
        ValueType::Font,
        ValueType::Typeface,
        ValueType::Border,
        ValueType::Insets,
        ValueType::Alignment,
        ValueType::FillImage,
        ValueType::Image,
    ];

    /// The registry key for this type.
    pub fn as_str(self) -> &'static str {
        match self {
            ValueType::Boolean => "boolean",
            ValueType::Byte => "byte",
            ValueType::Char => "char",
            ValueType::Double => "double",
            ValueType::Float => "float",
            ValueType::Integer => "integer",
            ValueType::Long => "long",
            ValueType::Short => "short",
            ValueType::String => "string",
            ValueType::Locale => "locale",
            ValueType::Color => "color",
            ValueType::Extent => "extent",
            ValueType::Font => "font",
            ValueType::Typeface => "typeface",
            ValueType::Border => "border",
            ValueType::Insets => "insets",
            ValueType::Alignment => "alignment",
            ValueType::FillImage => "fillimage",
            ValueType::Image => "image",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|t| t.as_str() == name)
    }
}

impl AsRef<str> for ValueType {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A value of a type registered by the application rather than built in.
///
/// Equality is identity of the shared payload.
#[derive(Clone)]
pub struct CustomValue {
    pub type_name: String,
    pub value: Arc<dyn Any + Send + Sync>,
}

impl CustomValue {
    pub fn new<T: Any + Send + Sync>(type_name: impl Into<String>, value: T) -> Self {
        Self {
            type_name: type_name.into(),
            value: Arc::new(value),
        }
    }

    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.value.downcast_ref::<T>()
    }
}

impl PartialEq for CustomValue {
    fn eq(&self, other: &Self) -> bool {
        self.type_name == other.type_name && Arc::ptr_eq(&self.value, &other.value)
    }
}

impl fmt::Debug for CustomValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CustomValue")
            .field("type_name", &self.type_name)
            .finish_non_exhaustive()
    }
}

/// A decoded value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Boolean(bool),
    Byte(i8),
    Char(char),
    Double(f64),
    Float(f32),
    Integer(i32),
    Long(i64),
    Short(i16),
    String(String),
    Locale(Locale),
    Color(Color),
    Extent(Extent),
    Font(Font),
    Typeface(Typeface),
    Border(Border),
    Insets(Insets),
    Alignment(Alignment),
    FillImage(FillImage),
    Image(ImageReference),
    Custom(CustomValue),
}

impl Value {
    /// The builtin type of this value, or `None` for custom values.
    pub fn value_type(&self) -> Option<ValueType> {
        let ty = match self {
            Value::Boolean(_) => ValueType::Boolean,
            Value::Byte(_) => ValueType::Byte,
            Value::Char(_) => ValueType::Char,
            Value::Double(_) => ValueType::Double,
            Value::Float(_) => ValueType::Float,
            Value::Integer(_) => ValueType::Integer,
            Value::Long(_) => ValueType::Long,
            Value::Short(_) => ValueType::Short,
            Value::String(_) => ValueType::String,
            Value::Locale(_) => ValueType::Locale,
            Value::Color(_) => ValueType::Color,
            Value::Extent(_) => ValueType::Extent,
            Value::Font(_) => ValueType::Font,
            Value::Typeface(_) => ValueType::Typeface,
            Value::Border(_) => ValueType::Border,
            Value::Insets(_) => ValueType::Insets,
            Value::Alignment(_) => ValueType::Alignment,
            Value::FillImage(_) => ValueType::FillImage,
            Value::Image(_) => ValueType::Image,
            Value::Custom(_) => return None,
        };
        Some(ty)
    }

    /// The registry key naming this value's type.
    pub fn type_name(&self) -> &str {
        match self {
            Value::Custom(custom) => custom.type_name.as_str(),
            other => other.value_type().map(ValueType::as_str).unwrap_or_default(),
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    /// Any integral value widened to `i64`.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Byte(n) => Some(i64::from(*n)),
            Value::Short(n) => Some(i64::from(*n)),
            Value::Integer(n) => Some(i64::from(*n)),
            Value::Long(n) => Some(*n),
            _ => None,
        }
    }

    /// Any floating-point value widened to `f64`.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Float(n) => Some(f64::from(*n)),
            Value::Double(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_color(&self) -> Option<Color> {
        match self {
            Value::Color(c) => Some(*c),
            _ => None,
        }
    }

    pub fn as_extent(&self) -> Option<Extent> {
        match self {
            Value::Extent(e) => Some(*e),
            _ => None,
        }
    }

    pub fn as_font(&self) -> Option<&Font> {
        match self {
            Value::Font(f) => Some(f),
            _ => None,
        }
    }

    pub fn as_border(&self) -> Option<Border> {
        match self {
            Value::Border(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_insets(&self) -> Option<Insets> {
        match self {
            Value::Insets(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_alignment(&self) -> Option<Alignment> {
        match self {
            Value::Alignment(a) => Some(*a),
            _ => None,
        }
    }

    pub fn as_fill_image(&self) -> Option<&FillImage> {
        match self {
            Value::FillImage(f) => Some(f),
            _ => None,
        }
    }

    pub fn as_image(&self) -> Option<&ImageReference> {
        match self {
            Value::Image(i) => Some(i),
            _ => None,
        }
    }

    pub fn as_custom<T: Any>(&self) -> Option<&T> {
        match self {
            Value::Custom(custom) => custom.downcast_ref::<T>(),
            _ => None,
        }
    }
}
