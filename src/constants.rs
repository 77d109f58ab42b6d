// Constants module for shared string constants

pub const CONFIG_FILE: &str = "langpack.toml";
pub const DEFAULT_LOADER: &str = "forge";

/// Mirror of CFPAOrg/Minecraft-Mod-Language-Package release files
pub const DEFAULT_ASSET_ROOT: &str =
    "https://gitcode.net/chearlai/translationpackmirror/-/raw/main/files-2444-T/";

/// Name of the archive produced when older packs are converted to a newer pack format
pub fn converted_file_name(pack_format: i32) -> String {
    format!("Minecraft-Mod-Language-Modpack-Converted-{}.zip", pack_format)
}

/// Schema version for the validate --json output format.
/// Increment only on breaking changes.
pub const SCHEMA_VERSION: u32 = 1;
