//! Peer trait and the read-only registry that maps target types to peers.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::peer::manifest::{parse_manifest, ManifestError};
use crate::peer::{builtin_peer, BUILTIN_PEERS};
use crate::value::Value;

/// Errors from decoding or encoding a value.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PeerError {
    #[error("invalid {target} value '{text}': {reason}")]
    InvalidValue {
        target: String,
        text: String,
        reason: String,
    },
    #[error("no peer registered for type '{0}'")]
    PeerNotFound(String),
}

impl PeerError {
    pub(crate) fn invalid(target: &str, text: &str, reason: impl Into<String>) -> Self {
        PeerError::InvalidValue {
            target: target.to_string(),
            text: text.to_string(),
            reason: reason.into(),
        }
    }

    /// Error for a value of the wrong variant handed to `encode`.
    pub(crate) fn mismatch(target: &str, value: &Value) -> Self {
        PeerError::InvalidValue {
            target: target.to_string(),
            text: format!("{value:?}"),
            reason: format!("cannot encode a {} value", value.type_name()),
        }
    }
}

/// A bidirectional converter between literal text and a typed [`Value`].
///
/// Peers hold no state. Composite peers resolve the peers of their
/// constituent values through the `registry` argument.
pub trait Peer: fmt::Debug + Send + Sync {
    /// Decode `text` as a value of type `target`.
    fn decode(&self, registry: &PeerRegistry, target: &str, text: &str)
        -> Result<Value, PeerError>;

    /// Encode `value` (of type `target`) to its canonical literal.
    fn encode(
        &self,
        registry: &PeerRegistry,
        target: &str,
        value: &Value,
    ) -> Result<String, PeerError>;
}

/// Immutable mapping from target type name to [`Peer`].
///
/// Build one with [`PeerRegistry::builtin`], [`PeerRegistry::from_manifest`]
/// or [`PeerRegistry::builder`]. A built registry is `Send + Sync` and is
/// shared behind an `Arc`.
#[derive(Debug, Default)]
pub struct PeerRegistry {
    peers: HashMap<String, Arc<dyn Peer>>,
}

impl PeerRegistry {
    pub fn builder() -> PeerRegistryBuilder {
        PeerRegistryBuilder::default()
    }

    /// Registry with a peer for every builtin [`ValueType`](crate::value::ValueType).
    pub fn builtin() -> Self {
        let mut builder = Self::builder();
        for (target, peer_name) in BUILTIN_PEERS {
            if let Some(peer) = builtin_peer(peer_name) {
                builder = builder.register(*target, peer);
            }
        }
        builder.build()
    }

    /// Registry from a `type = PeerName` manifest naming builtin peers.
    pub fn from_manifest(manifest: &str) -> Result<Self, ManifestError> {
        Ok(Self::builder().with_manifest(manifest)?.build())
    }

    /// Look up the peer for `target`.
    pub fn lookup(&self, target: &str) -> Result<&dyn Peer, PeerError> {
        self.peers
            .get(target)
            .map(|peer| peer.as_ref())
            .ok_or_else(|| PeerError::PeerNotFound(target.to_string()))
    }

    pub fn contains(&self, target: &str) -> bool {
        self.peers.contains_key(target)
    }

    /// Decode `text` with the peer registered for `target`.
    pub fn decode(&self, target: &str, text: &str) -> Result<Value, PeerError> {
        self.lookup(target)?.decode(self, target, text)
    }

    /// Encode `value` with the peer registered for `target`.
    pub fn encode(&self, target: &str, value: &Value) -> Result<String, PeerError> {
        self.lookup(target)?.encode(self, target, value)
    }

    /// Registered type names, sorted.
    pub fn types(&self) -> Vec<&str> {
        let mut types: Vec<&str> = self.peers.keys().map(String::as_str).collect();
        types.sort_unstable();
        types
    }

    pub fn len(&self) -> usize {
        self.peers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.peers.is_empty()
    }
}

/// Mutable staging area for a [`PeerRegistry`].
#[derive(Debug, Default)]
pub struct PeerRegistryBuilder {
    peers: HashMap<String, Arc<dyn Peer>>,
    /// Application peers that manifests may name in addition to the builtins.
    named: HashMap<String, Arc<dyn Peer>>,
}

impl PeerRegistryBuilder {
    /// Register `peer` for `target`, replacing any earlier registration.
    pub fn register(mut self, target: impl Into<String>, peer: Arc<dyn Peer>) -> Self {
        self.peers.insert(target.into(), peer);
        self
    }

    /// Make `peer` available to manifests under `name`.
    pub fn define_peer(mut self, name: impl Into<String>, peer: Arc<dyn Peer>) -> Self {
        self.named.insert(name.into(), peer);
        self
    }

    /// Register every entry of a `type = PeerName` manifest.
    pub fn with_manifest(mut self, manifest: &str) -> Result<Self, ManifestError> {
        for entry in parse_manifest(manifest)? {
            let peer = self
                .named
                .get(&entry.peer)
                .cloned()
                .or_else(|| builtin_peer(&entry.peer))
                .ok_or_else(|| ManifestError::UnknownPeer {
                    line: entry.line,
                    target: entry.target.clone(),
                    peer: entry.peer.clone(),
                })?;

            if self.peers.insert(entry.target.clone(), peer).is_some() {
                tracing::warn!(
                    target_type = %entry.target,
                    line = entry.line,
                    "manifest entry replaces an earlier peer registration"
                );
            }
        }
        Ok(self)
    }

    pub fn build(self) -> PeerRegistry {
        tracing::debug!(peers = self.peers.len(), "built peer registry");
        PeerRegistry { peers: self.peers }
    }
}
