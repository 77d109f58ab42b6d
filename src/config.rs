// Config module for locating the asset root and index payload

use crate::constants;
use anyhow::Context;
use serde::Deserialize;
use std::path::{Path, PathBuf};

pub fn config_dir() -> String {
    std::env::var("LANGPACK_DIR").unwrap_or_else(|_| ".".to_string())
}

pub fn config_path() -> String {
    let dir = config_dir();
    if dir == "." {
        constants::CONFIG_FILE.to_string()
    } else {
        format!("{}/{}", dir, constants::CONFIG_FILE)
    }
}

/// Settings the resolver needs from its surroundings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Remote root every pack filename is appended to
    pub asset_root: String,
    /// Index payload to use instead of the bundled one
    pub index: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            asset_root: constants::DEFAULT_ASSET_ROOT.to_string(),
            index: None,
        }
    }
}

/// On-disk shape of `langpack.toml`; every key is optional
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    asset_root: Option<String>,
    index: Option<PathBuf>,
}

impl Config {
    /// Load `langpack.toml` from the config directory (if present), then apply
    /// `LANGPACK_ASSET_ROOT` and `LANGPACK_INDEX` overrides.
    pub fn load() -> anyhow::Result<Self> {
        let path = config_path();
        let file = if Path::new(&path).exists() {
            let text = std::fs::read_to_string(&path)?;
            parse_file(&text).with_context(|| format!("Invalid config file {}", path))?
        } else {
            ConfigFile::default()
        };

        Ok(Self::merge(
            file,
            Path::new(&config_dir()),
            std::env::var("LANGPACK_ASSET_ROOT").ok(),
            std::env::var("LANGPACK_INDEX").ok().map(PathBuf::from),
        ))
    }

    /// Environment values win over file values, which win over defaults.
    /// A relative `index` from the file is taken relative to the config directory.
    fn merge(
        file: ConfigFile,
        dir: &Path,
        env_asset_root: Option<String>,
        env_index: Option<PathBuf>,
    ) -> Self {
        let file_index = file.index.map(|p| if p.is_relative() { dir.join(p) } else { p });

        Self {
            asset_root: env_asset_root
                .or(file.asset_root)
                .unwrap_or_else(|| constants::DEFAULT_ASSET_ROOT.to_string()),
            index: env_index.or(file_index),
        }
    }
}

fn parse_file(text: &str) -> anyhow::Result<ConfigFile> {
    Ok(toml::from_str(text)?)
}
