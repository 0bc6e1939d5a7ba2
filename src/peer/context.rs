//! Per-isolation-unit registry construction.
//!
//! A [`PeerContext`] owns the manifest for one isolation unit (a plugin, a
//! tenant, a test) and builds its [`PeerRegistry`] on first use. Concurrent
//! first calls block on the same cell, so every caller observes the one
//! registry that won.

use std::borrow::Cow;
use std::sync::Arc;

use once_cell::sync::OnceCell;

use crate::peer::manifest::ManifestError;
use crate::peer::registry::PeerRegistry;
use crate::peer::DEFAULT_MANIFEST;

#[derive(Debug)]
pub struct PeerContext {
    manifest: Cow<'static, str>,
    registry: OnceCell<Arc<PeerRegistry>>,
}

impl PeerContext {
    pub fn new(manifest: impl Into<Cow<'static, str>>) -> Self {
        Self {
            manifest: manifest.into(),
            registry: OnceCell::new(),
        }
    }

    pub fn manifest(&self) -> &str {
        &self.manifest
    }

    /// The registry for this context, built from the manifest on first call.
    ///
    /// A manifest error is returned to every caller until a build succeeds;
    /// since the manifest is fixed, that means every call.
    pub fn registry(&self) -> Result<Arc<PeerRegistry>, ManifestError> {
        self.registry
            .get_or_try_init(|| PeerRegistry::from_manifest(&self.manifest).map(Arc::new))
            .cloned()
    }

    /// Returns `true` once the registry has been built.
    pub fn is_initialized(&self) -> bool {
        self.registry.get().is_some()
    }
}

impl Default for PeerContext {
    fn default() -> Self {
        Self::new(DEFAULT_MANIFEST)
    }
}
