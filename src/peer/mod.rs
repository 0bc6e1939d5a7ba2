//! Value peers: pluggable converters between literal text and typed values.
//!
//! A [`PeerRegistry`] maps a target type name to a [`Peer`]. Primitive peers
//! parse text directly; composite peers tokenize a functor expression and
//! decode each argument through the registry.

pub mod composite;
pub mod context;
pub mod manifest;
pub mod primitive;
pub mod registry;

use std::sync::Arc;

pub use context::PeerContext;
pub use manifest::{ManifestEntry, ManifestError};
pub use registry::{Peer, PeerError, PeerRegistry, PeerRegistryBuilder};

use composite::*;
use primitive::*;

/// The manifest that maps every builtin value type to its builtin peer.
pub const DEFAULT_MANIFEST: &str = include_str!("peers.properties");

/// Builtin `(type, peer name)` pairs, matching [`DEFAULT_MANIFEST`].
pub(crate) const BUILTIN_PEERS: &[(&str, &str)] = &[
    ("boolean", "BooleanPeer"),
    ("byte", "BytePeer"),
    ("char", "CharPeer"),
    ("double", "DoublePeer"),
    ("float", "FloatPeer"),
    ("integer", "IntegerPeer"),
    ("long", "LongPeer"),
    ("short", "ShortPeer"),
    ("string", "StringPeer"),
    ("locale", "LocalePeer"),
    ("color", "ColorPeer"),
    ("extent", "ExtentPeer"),
    ("font", "FontPeer"),
    ("typeface", "TypefacePeer"),
    ("border", "BorderPeer"),
    ("insets", "InsetsPeer"),
    ("alignment", "AlignmentPeer"),
    ("fillimage", "FillImagePeer"),
    ("image", "ImageReferencePeer"),
];

/// Instantiate a builtin peer by its manifest name.
pub fn builtin_peer(name: &str) -> Option<Arc<dyn Peer>> {
    let peer: Arc<dyn Peer> = match name {
        "BooleanPeer" => Arc::new(BooleanPeer),
        "BytePeer" => Arc::new(BytePeer),
        "CharPeer" => Arc::new(CharPeer),
        "DoublePeer" => Arc::new(DoublePeer),
        "FloatPeer" => Arc::new(FloatPeer),
        "IntegerPeer" => Arc::new(IntegerPeer),
        "LongPeer" => Arc::new(LongPeer),
        "ShortPeer" => Arc::new(ShortPeer),
        "StringPeer" => Arc::new(StringPeer),
        "LocalePeer" => Arc::new(LocalePeer),
        "ColorPeer" => Arc::new(ColorPeer),
        "ExtentPeer" => Arc::new(ExtentPeer),
        "FontPeer" => Arc::new(FontPeer),
        "TypefacePeer" => Arc::new(TypefacePeer),
        "BorderPeer" => Arc::new(BorderPeer),
        "InsetsPeer" => Arc::new(InsetsPeer),
        "AlignmentPeer" => Arc::new(AlignmentPeer),
        "FillImagePeer" => Arc::new(FillImagePeer),
        "ImageReferencePeer" => Arc::new(ImageReferencePeer),
        _ => return None,
    };
    Some(peer)
}
