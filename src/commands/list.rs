// List command for printing the asset index

use crate::config::Config;
use crate::index::{AssetIndex, AssetIndexEntry};
use crate::ui;

pub fn list() -> anyhow::Result<()> {
    let config = Config::load()?;
    let index = AssetIndex::from_config(&config);

    if index.is_empty() {
        ui::warning("Asset index is empty");
        return Ok(());
    }

    ui::header(&format!("{} index entries", index.len()));
    for (position, entry) in index.entries().iter().enumerate() {
        ui::action(&format!(
            "#{} {} (pack format {})",
            position, entry.game_versions, entry.pack_format
        ));
        ui::dim(&format!("    {}", describe(entry)));
    }
    Ok(())
}

fn describe(entry: &AssetIndexEntry) -> String {
    if let Some(references) = &entry.convert_from {
        return format!("converted from {}", references.join(", "));
    }

    let loaders: Vec<&str> = entry
        .downloads()
        .iter()
        .map(|d| d.loader.as_str())
        .collect();
    if loaders.is_empty() {
        "no downloads".to_string()
    } else {
        format!("loaders: {}", loaders.join(", "))
    }
}
