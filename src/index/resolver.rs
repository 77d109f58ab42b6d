// Resolution of a game version and loader to the language packs to download

use crate::constants;
use crate::error::{ResolveError, ResolveResult};
use crate::index::repository::{AssetIndex, AssetIndexEntry, DownloadDescriptor};
use crate::index::version::Version;
use crate::index::version_range::VersionRange;
use log::debug;
use serde::Serialize;

/// Result of resolving a game version: what to fetch and whether to convert it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedAsset {
    /// One download per contributing index entry, in `convertFrom` order
    pub downloads: Vec<AssetDownload>,
    #[serde(flatten)]
    pub conversion: Option<Conversion>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetDownload {
    pub file_name: String,
    pub file_url: String,
    pub md5_url: String,
    pub target_version: String,
}

/// Present only when the downloads must be merged and converted
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Conversion {
    #[serde(rename = "conversionPackFormat")]
    pub pack_format: i32,
    #[serde(rename = "conversionFileName")]
    pub file_name: String,
}

impl Conversion {
    fn for_entry(entry: &AssetIndexEntry) -> Self {
        Self {
            pack_format: entry.pack_format,
            file_name: constants::converted_file_name(entry.pack_format),
        }
    }
}

impl ResolvedAsset {
    pub fn conversion_pack_format(&self) -> Option<i32> {
        self.conversion.as_ref().map(|c| c.pack_format)
    }

    pub fn conversion_file_name(&self) -> Option<&str> {
        self.conversion.as_ref().map(|c| c.file_name.as_str())
    }
}

/// Resolves against a borrowed, already loaded index
pub struct AssetResolver<'a> {
    index: &'a AssetIndex,
    asset_root: String,
}

impl<'a> AssetResolver<'a> {
    pub fn new(index: &'a AssetIndex, asset_root: impl Into<String>) -> Self {
        Self {
            index,
            asset_root: asset_root.into(),
        }
    }

    /// Resolve the packs for `minecraft_version`, preferring downloads for `loader`
    ///
    /// # Errors
    /// - `Parse` if the version, or an index range scanned before the match, is malformed
    /// - `NoMatchingIndex` if no entry covers the version
    /// - `UnresolvedReference` if a `convertFrom` reference matches no entry
    /// - `NoDownloadsDeclared` if a contributing entry has nothing to download
    pub fn resolve(&self, minecraft_version: &str, loader: &str) -> ResolveResult<ResolvedAsset> {
        let (_, entry) = self.lookup(minecraft_version)?;
        debug!(
            "Minecraft {} matched index entry '{}'",
            minecraft_version, entry.game_versions
        );

        let Some(references) = &entry.convert_from else {
            let download = select_download(entry, loader)?;
            return Ok(ResolvedAsset {
                downloads: vec![self.assemble(download)],
                conversion: None,
            });
        };

        let downloads = references
            .iter()
            .map(|reference| {
                let (_, source) = self.lookup_reference(reference)?;
                debug!(
                    "Converting from '{}' via index entry '{}'",
                    reference, source.game_versions
                );
                select_download(source, loader).map(|d| self.assemble(d))
            })
            .collect::<ResolveResult<Vec<_>>>()?;

        Ok(ResolvedAsset {
            downloads,
            conversion: Some(Conversion::for_entry(entry)),
        })
    }

    /// First entry (in index order) whose range contains `minecraft_version`
    pub fn lookup(&self, minecraft_version: &str) -> ResolveResult<(usize, &'a AssetIndexEntry)> {
        let version = Version::parse(minecraft_version)?;
        self.find_containing(&version)?
            .ok_or_else(|| ResolveError::NoMatchingIndex {
                version: minecraft_version.to_string(),
            })
    }

    /// Entry a `convertFrom` reference points at.
    ///
    /// The reference is parsed first. The first entry whose range covers the same
    /// versions wins; otherwise the reference's representative version is looked up.
    /// Entry ranges are parsed in index order either way.
    pub fn lookup_reference(&self, reference: &str) -> ResolveResult<(usize, &'a AssetIndexEntry)> {
        let wanted = VersionRange::parse(reference)?;
        for (position, entry) in self.index.entries().iter().enumerate() {
            if VersionRange::parse(&entry.game_versions)?.same_versions(&wanted) {
                return Ok((position, entry));
            }
        }

        let unresolved = || ResolveError::UnresolvedReference {
            reference: reference.to_string(),
        };
        let representative = wanted.representative().ok_or_else(unresolved)?;
        self.find_containing(&representative)?.ok_or_else(unresolved)
    }

    fn find_containing(
        &self,
        version: &Version,
    ) -> ResolveResult<Option<(usize, &'a AssetIndexEntry)>> {
        for (position, entry) in self.index.entries().iter().enumerate() {
            let range = VersionRange::parse(&entry.game_versions)?;
            if range.contains(version) {
                return Ok(Some((position, entry)));
            }
        }
        Ok(None)
    }

    fn assemble(&self, download: &DownloadDescriptor) -> AssetDownload {
        AssetDownload {
            file_name: download.filename.clone(),
            file_url: format!("{}{}", self.asset_root, download.filename),
            md5_url: format!("{}{}", self.asset_root, download.md5_filename),
            target_version: download.target_version.clone(),
        }
    }
}

/// Download for `loader` (case-insensitive), else the entry's first download
pub fn select_download<'e>(
    entry: &'e AssetIndexEntry,
    loader: &str,
) -> ResolveResult<&'e DownloadDescriptor> {
    let downloads = entry.downloads();
    let first = downloads
        .first()
        .ok_or_else(|| ResolveError::NoDownloadsDeclared {
            game_versions: entry.game_versions.clone(),
        })?;

    Ok(downloads
        .iter()
        .find(|d| d.loader.eq_ignore_ascii_case(loader))
        .unwrap_or_else(|| {
            debug!(
                "No '{}' download in '{}', using '{}'",
                loader, entry.game_versions, first.loader
            );
            first
        }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ParseError;

    const ROOT: &str = "https://mirror.example/files/";

    fn download(loader: &str, name: &str, target: &str) -> DownloadDescriptor {
        DownloadDescriptor {
            loader: loader.to_string(),
            target_version: target.to_string(),
            filename: format!("{}.zip", name),
            md5_filename: format!("{}.md5", name),
        }
    }

    fn entry(
        game_versions: &str,
        pack_format: i32,
        convert_from: Option<Vec<&str>>,
        downloads: Option<Vec<DownloadDescriptor>>,
    ) -> AssetIndexEntry {
        AssetIndexEntry {
            game_versions: game_versions.to_string(),
            pack_format,
            convert_from: convert_from.map(|refs| refs.into_iter().map(String::from).collect()),
            downloads,
        }
    }

    fn sample_index() -> AssetIndex {
        AssetIndex::from_entries(vec![
            entry(
                "[1.12,1.12.2]",
                3,
                None,
                Some(vec![download("forge", "pack-1-12", "1.12.2")]),
            ),
            entry(
                "[1.16,1.17)",
                6,
                None,
                Some(vec![
                    download("forge", "pack-1-16", "1.16"),
                    download("fabric", "pack-1-16-fabric", "1.16-fabric"),
                ]),
            ),
            entry(
                "[1.18,1.18.2]",
                8,
                None,
                Some(vec![
                    download("Forge", "pack-1-18", "1.18"),
                    download("Fabric", "pack-1-18-fabric", "1.18-fabric"),
                ]),
            ),
            entry("1.19.x", 9, Some(vec!["1.18.2"]), None),
            entry("[1.20,)", 15, Some(vec!["[1.16,1.17)", "[1.18,1.18.2]"]), None),
        ])
    }

    #[test]
    fn test_single_entry_scenario() {
        let index = AssetIndex::from_entries(vec![entry(
            "1.16.x",
            5,
            None,
            Some(vec![DownloadDescriptor {
                loader: "forge".to_string(),
                target_version: "1.16".to_string(),
                filename: "a.zip".to_string(),
                md5_filename: "a.zip.md5".to_string(),
            }]),
        )]);
        let resolver = AssetResolver::new(&index, ROOT);

        let asset = resolver.resolve("1.16.5", "forge").unwrap();
        assert_eq!(
            asset.downloads,
            vec![AssetDownload {
                file_name: "a.zip".to_string(),
                file_url: format!("{}a.zip", ROOT),
                md5_url: format!("{}a.zip.md5", ROOT),
                target_version: "1.16".to_string(),
            }]
        );
        assert_eq!(asset.conversion_pack_format(), None);
        assert_eq!(asset.conversion_file_name(), None);

        assert_eq!(
            resolver.resolve("1.99.0", "forge"),
            Err(ResolveError::NoMatchingIndex {
                version: "1.99.0".to_string()
            })
        );
    }

    #[test]
    fn test_loader_is_case_insensitive() {
        let index = sample_index();
        let resolver = AssetResolver::new(&index, ROOT);

        for loader in ["fabric", "FABRIC", "Fabric"] {
            let asset = resolver.resolve("1.18.1", loader).unwrap();
            assert_eq!(asset.downloads[0].file_name, "pack-1-18-fabric.zip");
        }
        assert_eq!(
            resolver.resolve("1.16.5", "Forge").unwrap(),
            resolver.resolve("1.16.5", "forge").unwrap()
        );
    }

    #[test]
    fn test_unknown_loader_falls_back_to_first() {
        let index = sample_index();
        let resolver = AssetResolver::new(&index, ROOT);

        let asset = resolver.resolve("1.16.5", "quilt").unwrap();
        assert_eq!(asset.downloads[0].file_name, "pack-1-16.zip");

        let asset = resolver.resolve("1.12.2", "").unwrap();
        assert_eq!(asset.downloads[0].file_name, "pack-1-12.zip");
    }

    #[test]
    fn test_fabric_only_entry_serves_forge() {
        let index = AssetIndex::from_entries(vec![entry(
            "[1.14,1.15]",
            4,
            None,
            Some(vec![download("fabric", "fabric-only", "1.14-fabric")]),
        )]);
        let asset = AssetResolver::new(&index, ROOT)
            .resolve("1.14.4", "forge")
            .unwrap();
        assert_eq!(asset.downloads[0].file_name, "fabric-only.zip");
    }

    #[test]
    fn test_first_match_wins() {
        let index = AssetIndex::from_entries(vec![
            entry("[1.16,1.17)", 6, None, Some(vec![download("forge", "first", "1.16")])),
            entry("1.16.5", 6, None, Some(vec![download("forge", "second", "1.16.5")])),
        ]);
        let asset = AssetResolver::new(&index, ROOT)
            .resolve("1.16.5", "forge")
            .unwrap();
        assert_eq!(asset.downloads[0].file_name, "first.zip");
    }

    #[test]
    fn test_convert_from_version_reference() {
        let index = sample_index();
        let asset = AssetResolver::new(&index, ROOT)
            .resolve("1.19.2", "fabric")
            .unwrap();

        assert_eq!(asset.downloads.len(), 1);
        assert_eq!(asset.downloads[0].file_name, "pack-1-18-fabric.zip");
        assert_eq!(asset.downloads[0].target_version, "1.18-fabric");
        assert_eq!(asset.conversion_pack_format(), Some(9));
        assert_eq!(
            asset.conversion_file_name(),
            Some("Minecraft-Mod-Language-Modpack-Converted-9.zip")
        );
    }

    #[test]
    fn test_convert_from_range_references_keep_order() {
        let index = sample_index();
        let asset = AssetResolver::new(&index, ROOT)
            .resolve("1.21", "forge")
            .unwrap();

        let names: Vec<&str> = asset.downloads.iter().map(|d| d.file_name.as_str()).collect();
        assert_eq!(names, vec!["pack-1-16.zip", "pack-1-18.zip"]);
        assert_eq!(asset.downloads[1].md5_url, format!("{}pack-1-18.md5", ROOT));
        assert_eq!(asset.conversion_pack_format(), Some(15));
        assert_eq!(
            asset.conversion_file_name(),
            Some("Minecraft-Mod-Language-Modpack-Converted-15.zip")
        );
    }

    #[test]
    fn test_reference_by_representative_version() {
        let index = AssetIndex::from_entries(vec![
            entry("[1.12,1.12.2]", 3, None, Some(vec![download("forge", "old", "1.12.2")])),
            entry("1.13", 4, Some(vec!["1.12.x", "(,1.12.1]"]), None),
        ]);
        let asset = AssetResolver::new(&index, ROOT).resolve("1.13", "forge").unwrap();
        assert_eq!(asset.downloads.len(), 2);
        assert!(asset.downloads.iter().all(|d| d.file_name == "old.zip"));
    }

    #[test]
    fn test_empty_convert_from_still_converts() {
        let index = AssetIndex::from_entries(vec![entry("1.20", 15, Some(vec![]), None)]);
        let asset = AssetResolver::new(&index, ROOT).resolve("1.20", "forge").unwrap();
        assert!(asset.downloads.is_empty());
        assert_eq!(asset.conversion_pack_format(), Some(15));
    }

    #[test]
    fn test_convert_from_is_one_level() {
        // 1.20 converts from 1.19, which itself only converts; its own chain is not followed
        let index = AssetIndex::from_entries(vec![
            entry("1.18", 8, None, Some(vec![download("forge", "p18", "1.18")])),
            entry("1.19", 9, Some(vec!["1.18"]), None),
            entry("1.20", 15, Some(vec!["1.19"]), None),
        ]);
        assert_eq!(
            AssetResolver::new(&index, ROOT).resolve("1.20", "forge"),
            Err(ResolveError::NoDownloadsDeclared {
                game_versions: "1.19".to_string()
            })
        );
    }

    #[test]
    fn test_unresolvable_reference() {
        let index = AssetIndex::from_entries(vec![entry("1.19", 9, Some(vec!["1.18.2"]), None)]);
        assert_eq!(
            AssetResolver::new(&index, ROOT).resolve("1.19", "forge"),
            Err(ResolveError::UnresolvedReference {
                reference: "1.18.2".to_string()
            })
        );

        let index = AssetIndex::from_entries(vec![entry("1.19", 9, Some(vec!["(1.16,1.17)"]), None)]);
        let err = AssetResolver::new(&index, ROOT)
            .resolve("1.19", "forge")
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "convertFrom reference '(1.16,1.17)' matches no asset index entry"
        );
    }

    #[test]
    fn test_no_downloads_declared() {
        let index = AssetIndex::from_entries(vec![
            entry("1.17", 7, None, None),
            entry("1.17.1", 7, None, Some(vec![])),
        ]);
        let resolver = AssetResolver::new(&index, ROOT);
        assert_eq!(
            resolver.resolve("1.17", "forge"),
            Err(ResolveError::NoDownloadsDeclared {
                game_versions: "1.17".to_string()
            })
        );
        assert!(matches!(
            resolver.resolve("1.17.1", "forge"),
            Err(ResolveError::NoDownloadsDeclared { .. })
        ));
    }

    #[test]
    fn test_parse_errors_surface() {
        let index = sample_index();
        let resolver = AssetResolver::new(&index, ROOT);
        assert_eq!(
            resolver.resolve("1.x", "forge"),
            Err(ResolveError::Parse(ParseError::InvalidVersion("1.x".to_string())))
        );

        let broken = AssetIndex::from_entries(vec![
            entry("[1.10,", 2, None, Some(vec![download("forge", "x", "1.10")])),
            entry("1.12.2", 3, None, Some(vec![download("forge", "y", "1.12.2")])),
        ]);
        assert!(matches!(
            AssetResolver::new(&broken, ROOT).resolve("1.12.2", "forge"),
            Err(ResolveError::Parse(ParseError::InvalidRange { .. }))
        ));
    }

    #[test]
    fn test_malformed_reference_is_a_parse_error() {
        // a reference spelled like a malformed entry must not match it by text
        let index = AssetIndex::from_entries(vec![
            entry("1.19", 9, Some(vec!["latest"]), None),
            entry("latest", 8, None, Some(vec![download("forge", "x", "latest")])),
        ]);
        assert!(matches!(
            AssetResolver::new(&index, ROOT).resolve("1.19", "forge"),
            Err(ResolveError::Parse(ParseError::InvalidRange { .. }))
        ));
    }

    #[test]
    fn test_reference_lookup_parses_entries_in_order() {
        let index = AssetIndex::from_entries(vec![
            entry("1.19", 9, Some(vec!["1.18"]), None),
            entry("[1.10,", 2, None, Some(vec![download("forge", "x", "1.10")])),
            entry("1.18", 8, None, Some(vec![download("forge", "y", "1.18")])),
        ]);
        assert!(matches!(
            AssetResolver::new(&index, ROOT).resolve("1.19", "forge"),
            Err(ResolveError::Parse(ParseError::InvalidRange { .. }))
        ));
    }

    #[test]
    fn test_reference_matches_equivalent_spelling() {
        let index = AssetIndex::from_entries(vec![
            entry("[1.18, 1.18.2]", 8, None, Some(vec![download("forge", "p18", "1.18")])),
            entry("1.19", 9, Some(vec!["[1.18,1.18.2]"]), None),
        ]);
        let asset = AssetResolver::new(&index, ROOT).resolve("1.19", "forge").unwrap();
        assert_eq!(asset.downloads[0].file_name, "p18.zip");
    }

    #[test]
    fn test_empty_index_never_matches() {
        let index = AssetIndex::load_or_empty("{ definitely not an index");
        assert!(matches!(
            AssetResolver::new(&index, ROOT).resolve("1.20.1", "forge"),
            Err(ResolveError::NoMatchingIndex { .. })
        ));
    }

    #[test]
    fn test_json_shape() {
        let index = sample_index();
        let resolver = AssetResolver::new(&index, ROOT);

        let plain = serde_json::to_value(resolver.resolve("1.12.2", "forge").unwrap()).unwrap();
        assert_eq!(plain["downloads"][0]["fileName"], "pack-1-12.zip");
        assert_eq!(plain["downloads"][0]["md5Url"], format!("{}pack-1-12.md5", ROOT));
        assert!(plain.get("conversionPackFormat").is_none());
        assert!(plain.get("conversionFileName").is_none());

        let converted = serde_json::to_value(resolver.resolve("1.19", "forge").unwrap()).unwrap();
        assert_eq!(converted["conversionPackFormat"], 9);
        assert_eq!(
            converted["conversionFileName"],
            "Minecraft-Mod-Language-Modpack-Converted-9.zip"
        );
    }

    #[test]
    fn test_bundled_index() {
        let index = crate::index::repository::bundled();
        let resolver = AssetResolver::new(index, constants::DEFAULT_ASSET_ROOT);

        let asset = resolver.resolve("1.20.1", "fabric").unwrap();
        assert_eq!(
            asset.downloads[0].file_name,
            "Minecraft-Mod-Language-Modpack-1-20-Fabric.zip"
        );
        assert_eq!(asset.conversion, None);

        let asset = resolver.resolve("1.17.1", "forge").unwrap();
        assert_eq!(asset.downloads.len(), 2);
        assert_eq!(asset.downloads[0].target_version, "1.16");
        assert_eq!(asset.downloads[1].target_version, "1.18");
        assert_eq!(asset.conversion_pack_format(), Some(7));
    }
}
