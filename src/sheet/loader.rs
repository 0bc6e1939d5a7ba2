//! Loading style sheets from resources.

use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::peer::PeerRegistry;
use crate::sheet::error::StyleSheetError;
use crate::sheet::schema::TypeSchema;
use crate::sheet::stylesheet::StyleSheet;

/// Source of style-sheet text, addressed by path.
pub trait ResourceResolver {
    fn read_to_string(&self, path: &Path) -> io::Result<String>;
}

/// Reads resources from the file system, relative paths under `root`.
#[derive(Debug, Clone, Default)]
pub struct FsResolver {
    root: PathBuf,
}

impl FsResolver {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// The file a resource path refers to. Absolute paths are used as given.
    pub fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.root.join(path)
        }
    }
}

impl ResourceResolver for FsResolver {
    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        std::fs::read_to_string(self.resolve(path))
    }
}

/// Loads style sheets with a shared registry and schema.
#[derive(Debug)]
pub struct StyleSheetLoader<R = FsResolver> {
    resolver: R,
    registry: Arc<PeerRegistry>,
    schema: TypeSchema,
}

impl<R: ResourceResolver> StyleSheetLoader<R> {
    pub fn new(resolver: R, registry: Arc<PeerRegistry>, schema: TypeSchema) -> Self {
        Self {
            resolver,
            registry,
            schema,
        }
    }

    pub fn registry(&self) -> &Arc<PeerRegistry> {
        &self.registry
    }

    pub fn schema(&self) -> &TypeSchema {
        &self.schema
    }

    /// Load a style sheet from source text.
    pub fn load(&self, source: &str) -> Result<StyleSheet, StyleSheetError> {
        StyleSheet::parse(source, Arc::clone(&self.registry), &self.schema)
    }

    /// Load the style sheet at `path`.
    pub fn load_path(&self, path: impl AsRef<Path>) -> Result<StyleSheet, StyleSheetError> {
        let path = path.as_ref();
        let source = self
            .resolver
            .read_to_string(path)
            .map_err(|source| StyleSheetError::Io {
                path: path.to_path_buf(),
                source,
            })?;
        tracing::debug!(path = %path.display(), bytes = source.len(), "read style sheet");
        self.load(&source)
    }
}
