//! Peer registration manifests.
//!
//! A manifest is a property file mapping a target type name to the name of
//! the peer that converts it:
//!
//! ```text
//! # comment
//! color = ColorPeer
//! app.widgets.Point: PointPeer
//! ```
//!
//! Blank lines and lines starting with `#` or `!` are ignored. Keys and
//! values are trimmed; either `=` or `:` separates them.

/// Errors from manifest parsing and peer resolution.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ManifestError {
    #[error("manifest line {line}: expected `type = PeerName`, got '{text}'")]
    Malformed { line: usize, text: String },
    #[error("manifest line {line}: unknown peer '{peer}' for type '{target}'")]
    UnknownPeer {
        line: usize,
        target: String,
        peer: String,
    },
}

/// One `type = PeerName` line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestEntry {
    /// 1-based source line.
    pub line: usize,
    pub target: String,
    pub peer: String,
}

/// Parse manifest text into entries, in source order.
pub fn parse_manifest(text: &str) -> Result<Vec<ManifestEntry>, ManifestError> {
    let mut entries = Vec::new();

    for (index, raw) in text.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') || line.starts_with('!') {
            continue;
        }

        let malformed = || ManifestError::Malformed {
            line: index + 1,
            text: line.to_string(),
        };

        let split = line.find(['=', ':']).ok_or_else(malformed)?;
        let target = line[..split].trim();
        let peer = line[split + 1..].trim();
        if target.is_empty() || peer.is_empty() {
            return Err(malformed());
        }

        entries.push(ManifestEntry {
            line: index + 1,
            target: target.to_string(),
            peer: peer.to_string(),
        });
    }

    Ok(entries)
}
