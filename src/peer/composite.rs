//! Peers for composite values written as functor expressions.
//!
//! Each composite peer tokenizes its input, checks the functor name and
//! argument count, then decodes every positional argument through the
//! registry peer for that position's type. Encoding runs the other way and
//! always produces the canonical argument order.

use crate::decl::{compose, tokenize};
use crate::peer::registry::{Peer, PeerError, PeerRegistry};
use crate::value::{
    Alignment, Attachment, Border, BorderStyle, Color, Extent, FillImage, Font, FontStyle,
    HorizontalAlign, ImageReference, Insets, Repeat, Typeface, Unit, Value, ValueType,
    VerticalAlign,
};

// ── Helpers ──────────────────────────────────────────────────────────

/// Tokenize `text` as `name(...)` and return its arguments.
fn functor_args(target: &str, text: &str, name: &str) -> Result<Vec<String>, PeerError> {
    let mut tokens = tokenize(text);
    if tokens.is_empty() {
        return Err(PeerError::invalid(target, text, "not a functor expression"));
    }
    if tokens[0] != name {
        return Err(PeerError::invalid(
            target,
            text,
            format!("expected {name}(...), found {}(...)", tokens[0]),
        ));
    }
    tokens.remove(0);
    Ok(tokens)
}

/// Fail unless `args.len()` is one of `allowed`.
fn expect_arity(
    target: &str,
    text: &str,
    args: &[String],
    allowed: &[usize],
) -> Result<(), PeerError> {
    if allowed.contains(&args.len()) {
        return Ok(());
    }
    let expected = allowed
        .iter()
        .map(usize::to_string)
        .collect::<Vec<_>>()
        .join(" or ");
    Err(PeerError::invalid(
        target,
        text,
        format!("expected {expected} arguments, got {}", args.len()),
    ))
}

/// Look up a symbol in a fixed table.
fn symbol<T>(
    target: &str,
    text: &str,
    token: &str,
    lookup: impl Fn(&str) -> Option<T>,
) -> Result<T, PeerError> {
    lookup(token).ok_or_else(|| PeerError::invalid(target, text, format!("unknown symbol {token}")))
}

fn decode_extent(registry: &PeerRegistry, text: &str) -> Result<Extent, PeerError> {
    let value = registry.decode(ValueType::Extent.as_str(), text)?;
    value
        .as_extent()
        .ok_or_else(|| PeerError::invalid(ValueType::Extent.as_str(), text, "extent peer returned another type"))
}

/// An extent argument that may be left empty.
fn decode_optional_extent(
    registry: &PeerRegistry,
    text: &str,
) -> Result<Option<Extent>, PeerError> {
    if text.is_empty() {
        Ok(None)
    } else {
        decode_extent(registry, text).map(Some)
    }
}

fn encode_extent(registry: &PeerRegistry, extent: Extent) -> Result<String, PeerError> {
    registry.encode(ValueType::Extent.as_str(), &Value::Extent(extent))
}

fn encode_optional_extent(
    registry: &PeerRegistry,
    extent: Option<Extent>,
) -> Result<String, PeerError> {
    extent.map_or(Ok(String::new()), |e| encode_extent(registry, e))
}

fn decode_string(registry: &PeerRegistry, text: &str) -> Result<String, PeerError> {
    match registry.decode(ValueType::String.as_str(), text)? {
        Value::String(s) => Ok(s),
        _ => Err(PeerError::invalid(ValueType::String.as_str(), text, "string peer returned another type")),
    }
}

fn encode_string(registry: &PeerRegistry, s: &str) -> Result<String, PeerError> {
    registry.encode(ValueType::String.as_str(), &Value::String(s.to_string()))
}

// ── Color ────────────────────────────────────────────────────────────

/// `#RRGGBB`; also decodes `#RGB` and `color(r,g,b)`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ColorPeer;

impl Peer for ColorPeer {
    fn decode(&self, registry: &PeerRegistry, target: &str, text: &str) -> Result<Value, PeerError> {
        let trimmed = text.trim();
        if trimmed.starts_with('#') {
            return Color::from_hex(trimmed)
                .map(Value::Color)
                .ok_or_else(|| PeerError::invalid(target, text, "expected #RRGGBB or #RGB"));
        }

        let args = functor_args(target, text, "color")?;
        expect_arity(target, text, &args, &[3])?;
        let mut channels = [0u8; 3];
        for (channel, arg) in channels.iter_mut().zip(&args) {
            let n = registry
                .decode(ValueType::Integer.as_str(), arg)?
                .as_i64()
                .unwrap_or(-1);
            *channel = u8::try_from(n).map_err(|_| {
                PeerError::invalid(target, text, format!("channel {arg} is outside 0..=255"))
            })?;
        }
        Ok(Value::Color(Color::rgb(channels[0], channels[1], channels[2])))
    }

    fn encode(&self, _: &PeerRegistry, target: &str, value: &Value) -> Result<String, PeerError> {
        match value {
            Value::Color(color) => Ok(color.to_string()),
            other => Err(PeerError::mismatch(target, other)),
        }
    }
}

// ── Extent ───────────────────────────────────────────────────────────

/// `<int><unit>`; a bare integer is pixels.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExtentPeer;

impl Peer for ExtentPeer {
    fn decode(&self, _: &PeerRegistry, target: &str, text: &str) -> Result<Value, PeerError> {
        let trimmed = text.trim();
        let unit_start = trimmed
            .char_indices()
            .find(|(i, c)| !c.is_ascii_digit() && !(*c == '-' && *i == 0))
            .map_or(trimmed.len(), |(i, _)| i);

        let (number, unit) = trimmed.split_at(unit_start);
        let value: i32 = number
            .parse()
            .map_err(|_| PeerError::invalid(target, text, "expected an integer magnitude"))?;
        let unit = if unit.is_empty() {
            Unit::Px
        } else {
            symbol(target, text, unit, Unit::from_symbol)?
        };
        Ok(Value::Extent(Extent::new(value, unit)))
    }

    fn encode(&self, _: &PeerRegistry, target: &str, value: &Value) -> Result<String, PeerError> {
        match value {
            Value::Extent(extent) => Ok(extent.to_string()),
            other => Err(PeerError::mismatch(target, other)),
        }
    }
}

// ── Typeface and font ────────────────────────────────────────────────

/// `typeface('Primary','Fallback',...)`. A single quoted name also decodes.
#[derive(Debug, Clone, Copy, Default)]
pub struct TypefacePeer;

impl Peer for TypefacePeer {
    fn decode(&self, registry: &PeerRegistry, target: &str, text: &str) -> Result<Value, PeerError> {
        let trimmed = text.trim();
        let args = if trimmed.starts_with('\'') {
            vec![trimmed.to_string()]
        } else {
            functor_args(target, text, "typeface")?
        };

        let mut names = Vec::with_capacity(args.len());
        for arg in &args {
            let name = decode_string(registry, arg)?;
            if name.is_empty() {
                return Err(PeerError::invalid(target, text, "empty typeface name"));
            }
            names.push(name);
        }

        Typeface::from_names(names)
            .map(Value::Typeface)
            .ok_or_else(|| PeerError::invalid(target, text, "expected at least one name"))
    }

    fn encode(&self, registry: &PeerRegistry, target: &str, value: &Value) -> Result<String, PeerError> {
        let Value::Typeface(face) = value else {
            return Err(PeerError::mismatch(target, value));
        };
        let args = face
            .names()
            .iter()
            .map(|name| encode_string(registry, name))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(compose("typeface", &args))
    }
}

fn parse_font_style(target: &str, text: &str, token: &str) -> Result<FontStyle, PeerError> {
    if token == "PLAIN" {
        return Ok(FontStyle::PLAIN);
    }
    let mut style = FontStyle::PLAIN;
    for flag in token.split('|').map(str::trim) {
        let bit = FontStyle::SYMBOLS
            .iter()
            .find(|(name, _)| *name == flag)
            .map(|(_, bit)| *bit)
            .ok_or_else(|| PeerError::invalid(target, text, format!("unknown font style {flag}")))?;
        style |= bit;
    }
    Ok(style)
}

fn format_font_style(style: FontStyle) -> String {
    if style.is_empty() {
        return "PLAIN".to_string();
    }
    FontStyle::SYMBOLS
        .iter()
        .filter(|(_, bit)| style.contains(*bit))
        .map(|(name, _)| *name)
        .collect::<Vec<_>>()
        .join("|")
}

/// `font(<typeface>,<style>,<size>)`, e.g. `font(typeface('Verdana'),BOLD|ITALIC,10pt)`.
#[derive(Debug, Clone, Copy, Default)]
pub struct FontPeer;

impl Peer for FontPeer {
    fn decode(&self, registry: &PeerRegistry, target: &str, text: &str) -> Result<Value, PeerError> {
        let args = functor_args(target, text, "font")?;
        expect_arity(target, text, &args, &[3])?;

        let typeface = match registry.decode(ValueType::Typeface.as_str(), &args[0])? {
            Value::Typeface(face) => face,
            _ => return Err(PeerError::invalid(target, text, "expected a typeface")),
        };
        let style = parse_font_style(target, text, &args[1])?;
        let size = decode_extent(registry, &args[2])?;

        Ok(Value::Font(Font::new(typeface, style, size)))
    }

    fn encode(&self, registry: &PeerRegistry, target: &str, value: &Value) -> Result<String, PeerError> {
        let Value::Font(font) = value else {
            return Err(PeerError::mismatch(target, value));
        };
        let typeface = registry.encode(
            ValueType::Typeface.as_str(),
            &Value::Typeface(font.typeface.clone()),
        )?;
        let size = encode_extent(registry, font.size)?;
        Ok(compose("font", &[typeface, format_font_style(font.style), size]))
    }
}

// ── Border ───────────────────────────────────────────────────────────

/// `border(<size>,<color>,<style>)`, e.g. `border(8pt,#FF0000,STYLE_INSET)`.
#[derive(Debug, Clone, Copy, Default)]
pub struct BorderPeer;

impl Peer for BorderPeer {
    fn decode(&self, registry: &PeerRegistry, target: &str, text: &str) -> Result<Value, PeerError> {
        let args = functor_args(target, text, "border")?;
        expect_arity(target, text, &args, &[3])?;

        let size = decode_extent(registry, &args[0])?;
        let color = registry
            .decode(ValueType::Color.as_str(), &args[1])?
            .as_color()
            .ok_or_else(|| PeerError::invalid(target, text, "expected a color"))?;
        let style = symbol(target, text, &args[2], BorderStyle::from_symbol)?;

        Ok(Value::Border(Border::new(size, color, style)))
    }

    fn encode(&self, registry: &PeerRegistry, target: &str, value: &Value) -> Result<String, PeerError> {
        let Value::Border(border) = value else {
            return Err(PeerError::mismatch(target, value));
        };
        let size = encode_extent(registry, border.size)?;
        let color = registry.encode(ValueType::Color.as_str(), &Value::Color(border.color))?;
        Ok(compose("border", &[size, color, border.style.symbol().to_string()]))
    }
}

// ── Insets ───────────────────────────────────────────────────────────

/// `insets(<top>,<right>,<bottom>,<left>)`, or 1 (all) / 2 (vertical, horizontal) arguments.
#[derive(Debug, Clone, Copy, Default)]
pub struct InsetsPeer;

impl Peer for InsetsPeer {
    fn decode(&self, registry: &PeerRegistry, target: &str, text: &str) -> Result<Value, PeerError> {
        let args = functor_args(target, text, "insets")?;
        expect_arity(target, text, &args, &[1, 2, 4])?;

        let extents = args
            .iter()
            .map(|arg| decode_extent(registry, arg))
            .collect::<Result<Vec<_>, _>>()?;
        let insets = match extents.as_slice() {
            [all] => Insets::all(*all),
            [vertical, horizontal] => Insets::symmetric(*vertical, *horizontal),
            [top, right, bottom, left] => Insets::new(*top, *right, *bottom, *left),
            _ => return Err(PeerError::invalid(target, text, "expected 1, 2 or 4 arguments")),
        };
        Ok(Value::Insets(insets))
    }

    fn encode(&self, registry: &PeerRegistry, target: &str, value: &Value) -> Result<String, PeerError> {
        let Value::Insets(insets) = value else {
            return Err(PeerError::mismatch(target, value));
        };
        let args = [insets.top, insets.right, insets.bottom, insets.left]
            .into_iter()
            .map(|e| encode_extent(registry, e))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(compose("insets", &args))
    }
}

// ── Alignment ────────────────────────────────────────────────────────

/// `alignment(<horizontal>,<vertical>)`, e.g. `alignment(LEFT,TOP)`.
#[derive(Debug, Clone, Copy, Default)]
pub struct AlignmentPeer;

impl Peer for AlignmentPeer {
    fn decode(&self, _: &PeerRegistry, target: &str, text: &str) -> Result<Value, PeerError> {
        let args = functor_args(target, text, "alignment")?;
        expect_arity(target, text, &args, &[2])?;

        let horizontal = symbol(target, text, &args[0], HorizontalAlign::from_symbol)?;
        let vertical = symbol(target, text, &args[1], VerticalAlign::from_symbol)?;
        Ok(Value::Alignment(Alignment::new(horizontal, vertical)))
    }

    fn encode(&self, _: &PeerRegistry, target: &str, value: &Value) -> Result<String, PeerError> {
        match value {
            Value::Alignment(a) => Ok(compose(
                "alignment",
                &[a.horizontal.symbol(), a.vertical.symbol()],
            )),
            other => Err(PeerError::mismatch(target, other)),
        }
    }
}

// ── Images ───────────────────────────────────────────────────────────

/// `image('<uri>')` or `image('<uri>',<width>,<height>)`; either extent may be empty.
#[derive(Debug, Clone, Copy, Default)]
pub struct ImageReferencePeer;

impl Peer for ImageReferencePeer {
    fn decode(&self, registry: &PeerRegistry, target: &str, text: &str) -> Result<Value, PeerError> {
        let args = functor_args(target, text, "image")?;
        expect_arity(target, text, &args, &[1, 3])?;

        let uri = decode_string(registry, &args[0])?;
        if uri.is_empty() {
            return Err(PeerError::invalid(target, text, "empty image uri"));
        }
        let mut image = ImageReference::new(uri);
        if args.len() == 3 {
            image = image.with_size(
                decode_optional_extent(registry, &args[1])?,
                decode_optional_extent(registry, &args[2])?,
            );
        }
        Ok(Value::Image(image))
    }

    fn encode(&self, registry: &PeerRegistry, target: &str, value: &Value) -> Result<String, PeerError> {
        let Value::Image(image) = value else {
            return Err(PeerError::mismatch(target, value));
        };
        let uri = encode_string(registry, &image.uri)?;
        if image.width.is_none() && image.height.is_none() {
            return Ok(compose("image", &[uri]));
        }
        let width = encode_optional_extent(registry, image.width)?;
        let height = encode_optional_extent(registry, image.height)?;
        Ok(compose("image", &[uri, width, height]))
    }
}

/// `fillimage(<image>,<x>,<y>,<repeat>,<attachment>)`; x and y may be empty.
#[derive(Debug, Clone, Copy, Default)]
pub struct FillImagePeer;

impl Peer for FillImagePeer {
    fn decode(&self, registry: &PeerRegistry, target: &str, text: &str) -> Result<Value, PeerError> {
        let args = functor_args(target, text, "fillimage")?;
        expect_arity(target, text, &args, &[5])?;

        let image = match registry.decode(ValueType::Image.as_str(), &args[0])? {
            Value::Image(image) => image,
            _ => return Err(PeerError::invalid(target, text, "expected an image")),
        };
        let x = decode_optional_extent(registry, &args[1])?;
        let y = decode_optional_extent(registry, &args[2])?;
        let repeat = symbol(target, text, &args[3], Repeat::from_symbol)?;
        let attachment = symbol(target, text, &args[4], Attachment::from_symbol)?;

        Ok(Value::FillImage(FillImage {
            image,
            x,
            y,
            repeat,
            attachment,
        }))
    }

    fn encode(&self, registry: &PeerRegistry, target: &str, value: &Value) -> Result<String, PeerError> {
        let Value::FillImage(fill) = value else {
            return Err(PeerError::mismatch(target, value));
        };
        let image = registry.encode(ValueType::Image.as_str(), &Value::Image(fill.image.clone()))?;
        Ok(compose(
            "fillimage",
            &[
                image,
                encode_optional_extent(registry, fill.x)?,
                encode_optional_extent(registry, fill.y)?,
                fill.repeat.symbol().to_string(),
                fill.attachment.symbol().to_string(),
            ],
        ))
    }
}
