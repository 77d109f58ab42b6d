// Asset index repository: the immutable list of known language packs

use crate::config::Config;
use crate::error::LoadError;
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// The index shipped inside the binary
const BUNDLED_INDEX: &str = include_str!("../../resources/i18nAssetIndex.json");

/// One record of the index: a game-version range and how to obtain its pack
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetIndexEntry {
    /// Range expression this entry applies to (see `VersionRange`)
    pub game_versions: String,
    pub pack_format: i32,
    /// Older entries whose packs are merged and converted into this one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub convert_from: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub downloads: Option<Vec<DownloadDescriptor>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DownloadDescriptor {
    pub loader: String,
    pub target_version: String,
    pub filename: String,
    pub md5_filename: String,
}

impl AssetIndexEntry {
    /// Downloads declared by this entry; empty when absent
    pub fn downloads(&self) -> &[DownloadDescriptor] {
        self.downloads.as_deref().unwrap_or_default()
    }
}

/// Read-only view over the loaded index entries, kept in payload order
#[derive(Debug, Clone, Default)]
pub struct AssetIndex {
    entries: Vec<AssetIndexEntry>,
}

impl AssetIndex {
    /// Deserialize a JSON payload. Range strings are not checked here.
    pub fn load(payload: &str) -> Result<Self, LoadError> {
        let entries: Vec<AssetIndexEntry> = serde_json::from_str(payload)?;
        debug!("Loaded asset index with {} entries", entries.len());
        Ok(Self { entries })
    }

    /// Like `load`, but a malformed payload yields an empty index and a warning.
    /// Every resolution against the empty index then fails with `NoMatchingIndex`.
    pub fn load_or_empty(payload: &str) -> Self {
        Self::load(payload).unwrap_or_else(|e| {
            warn!("Error getting asset index: {}", e);
            Self::default()
        })
    }

    /// Read an index payload from a file
    pub fn load_file(path: &Path) -> Result<Self, LoadError> {
        let text = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::load(&text)
    }

    /// The index the CLI works against: the configured file when set, otherwise
    /// the bundled one. A configured file that cannot be read or parsed leaves
    /// the index empty.
    pub fn from_config(config: &Config) -> AssetIndex {
        match &config.index {
            Some(path) => Self::load_file(path).unwrap_or_else(|e| {
                warn!("Error getting asset index: {}", e);
                Self::default()
            }),
            None => bundled().clone(),
        }
    }

    #[cfg(test)]
    pub fn from_entries(entries: Vec<AssetIndexEntry>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[AssetIndexEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

lazy_static::lazy_static! {
    static ref BUNDLED: AssetIndex = AssetIndex::load_or_empty(BUNDLED_INDEX);
}

/// The bundled index, parsed on first access
pub fn bundled() -> &'static AssetIndex {
    &BUNDLED
}
