//! Peers for primitive values: numbers, booleans, chars, strings, locales.
//!
//! These parse and format text directly and never consult the registry.

use crate::peer::registry::{Peer, PeerError, PeerRegistry};
use crate::value::{Locale, Value};

/// Declares a peer for a type parsed with `FromStr` and formatted with `Display`.
macro_rules! number_peer {
    ($(#[$meta:meta])* $peer:ident, $ty:ty, $variant:ident, $what:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, Default)]
        pub struct $peer;

        impl Peer for $peer {
            fn decode(
                &self,
                _registry: &PeerRegistry,
                target: &str,
                text: &str,
            ) -> Result<Value, PeerError> {
                text.trim()
                    .parse::<$ty>()
                    .map(Value::$variant)
                    .map_err(|e| PeerError::invalid(target, text, format!("expected {}: {e}", $what)))
            }

            fn encode(
                &self,
                _registry: &PeerRegistry,
                target: &str,
                value: &Value,
            ) -> Result<String, PeerError> {
                match value {
                    Value::$variant(n) => Ok(n.to_string()),
                    other => Err(PeerError::mismatch(target, other)),
                }
            }
        }
    };
}

number_peer!(
    /// `i8` in decimal.
    BytePeer, i8, Byte, "a byte"
);
number_peer!(
    /// `i16` in decimal.
    ShortPeer, i16, Short, "a short"
);
number_peer!(
    /// `i32` in decimal.
    IntegerPeer, i32, Integer, "an integer"
);
number_peer!(
    /// `i64` in decimal.
    LongPeer, i64, Long, "a long"
);
number_peer!(
    /// `f32`, formatted with the shortest text that parses back to the same value.
    FloatPeer, f32, Float, "a float"
);
number_peer!(
    /// `f64`, formatted with the shortest text that parses back to the same value.
    DoublePeer, f64, Double, "a double"
);

/// `true` / `false`. Decoding ignores ASCII case.
#[derive(Debug, Clone, Copy, Default)]
pub struct BooleanPeer;

impl Peer for BooleanPeer {
    fn decode(&self, _: &PeerRegistry, target: &str, text: &str) -> Result<Value, PeerError> {
        let trimmed = text.trim();
        if trimmed.eq_ignore_ascii_case("true") {
            Ok(Value::Boolean(true))
        } else if trimmed.eq_ignore_ascii_case("false") {
            Ok(Value::Boolean(false))
        } else {
            Err(PeerError::invalid(target, text, "expected true or false"))
        }
    }

    fn encode(&self, _: &PeerRegistry, target: &str, value: &Value) -> Result<String, PeerError> {
        match value {
            Value::Boolean(b) => Ok(b.to_string()),
            other => Err(PeerError::mismatch(target, other)),
        }
    }
}

/// Strip one surrounding pair of single quotes, if present.
pub(crate) fn unquote(text: &str) -> &str {
    text.strip_prefix('\'')
        .and_then(|rest| rest.strip_suffix('\''))
        .unwrap_or(text)
}

/// A single character, bare or quoted (`x`, `'x'`).
#[derive(Debug, Clone, Copy, Default)]
pub struct CharPeer;

impl Peer for CharPeer {
    fn decode(&self, _: &PeerRegistry, target: &str, text: &str) -> Result<Value, PeerError> {
        let trimmed = text.trim();
        let inner = if trimmed.len() > 1 { unquote(trimmed) } else { trimmed };
        let mut chars = inner.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Ok(Value::Char(c)),
            _ => Err(PeerError::invalid(target, text, "expected exactly one character")),
        }
    }

    fn encode(&self, _: &PeerRegistry, target: &str, value: &Value) -> Result<String, PeerError> {
        match value {
            // Characters that would be trimmed or split are quoted.
            Value::Char(c) if c.is_whitespace() || matches!(c, '\'' | ',' | '(' | ')') => {
                Ok(format!("'{c}'"))
            }
            Value::Char(c) => Ok(c.to_string()),
            other => Err(PeerError::mismatch(target, other)),
        }
    }
}

/// Text in single quotes. Unquoted input is taken verbatim.
#[derive(Debug, Clone, Copy, Default)]
pub struct StringPeer;

impl Peer for StringPeer {
    fn decode(&self, _: &PeerRegistry, _target: &str, text: &str) -> Result<Value, PeerError> {
        let trimmed = text.trim();
        let inner = if trimmed.len() > 1 { unquote(trimmed) } else { trimmed };
        Ok(Value::String(inner.to_string()))
    }

    fn encode(&self, _: &PeerRegistry, target: &str, value: &Value) -> Result<String, PeerError> {
        match value {
            Value::String(s) => Ok(format!("'{s}'")),
            other => Err(PeerError::mismatch(target, other)),
        }
    }
}

/// `language[_COUNTRY[_VARIANT]]`, e.g. `en_US`, `no__NY`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalePeer;

impl Peer for LocalePeer {
    fn decode(&self, _: &PeerRegistry, target: &str, text: &str) -> Result<Value, PeerError> {
        let trimmed = text.trim();
        let mut parts = trimmed.splitn(3, '_');

        let language = parts.next().unwrap_or_default();
        if language.is_empty() || !language.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(PeerError::invalid(target, text, "expected an alphabetic language code"));
        }

        let country = parts.next();
        let variant = parts.next();
        if let Some(country) = country {
            if !country.chars().all(|c| c.is_ascii_alphanumeric()) {
                return Err(PeerError::invalid(target, text, "invalid country code"));
            }
            if country.is_empty() && variant.is_none_or(str::is_empty) {
                return Err(PeerError::invalid(target, text, "empty country code"));
            }
        }
        if variant.is_some_and(str::is_empty) {
            return Err(PeerError::invalid(target, text, "empty variant"));
        }

        Ok(Value::Locale(Locale {
            language: language.to_string(),
            country: country.filter(|c| !c.is_empty()).map(str::to_string),
            variant: variant.map(str::to_string),
        }))
    }

    fn encode(&self, _: &PeerRegistry, target: &str, value: &Value) -> Result<String, PeerError> {
        match value {
            Value::Locale(locale) => Ok(locale.to_string()),
            other => Err(PeerError::mismatch(target, other)),
        }
    }
}
