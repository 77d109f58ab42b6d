// Resolve command for showing which language packs a game version needs

use crate::config::Config;
use crate::index::{AssetIndex, AssetResolver, ResolvedAsset};
use crate::ui;
use log::info;

pub fn resolve(version: &str, loader: &str, json: bool) -> anyhow::Result<i32> {
    let config = Config::load()?;
    let index = AssetIndex::from_config(&config);
    info!(
        "Resolving Minecraft {} for loader '{}' against {} index entries",
        version,
        loader,
        index.len()
    );

    let resolver = AssetResolver::new(&index, config.asset_root.as_str());

    // Exit codes:
    // 0 = resolved
    // 2 = no usable pack for this version
    let asset = match resolver.resolve(version, loader) {
        Ok(asset) => asset,
        Err(e) => {
            ui::error(&format!("Cannot resolve language pack: {}", e));
            return Ok(2);
        }
    };

    if json {
        ui::json(&asset)?;
    } else {
        output_human_readable(version, &asset);
    }
    Ok(0)
}

fn output_human_readable(version: &str, asset: &ResolvedAsset) {
    ui::header(&format!("Language packs for Minecraft {}", version));
    for download in &asset.downloads {
        ui::action(&format!(
            "{} (for {})",
            download.file_name, download.target_version
        ));
        ui::detail("url", &download.file_url);
        ui::detail("md5", &download.md5_url);
    }

    match (asset.conversion_pack_format(), asset.conversion_file_name()) {
        (Some(pack_format), Some(file_name)) => ui::success(&format!(
            "Convert to pack format {} as {}",
            pack_format, file_name
        )),
        _ => ui::dim("No conversion needed"),
    }
}
