// Validate command for checking an index payload before it ships

use crate::config::Config;
use crate::constants;
use crate::index::AssetIndex;
use crate::index::validate::{IndexIssue, validate as check_index};
use crate::ui;
use serde::Serialize;

#[derive(Debug, Serialize)]
struct ValidateOutput<'a> {
    schema_version: u32,
    status: &'static str,
    entries: usize,
    issues: &'a [IndexIssue],
}

pub fn validate(json: bool) -> anyhow::Result<i32> {
    let config = Config::load()?;
    let index = AssetIndex::from_config(&config);
    let issues = check_index(&index);

    // Exit codes:
    // 0 = index is consistent
    // 1 = issues found, or nothing to validate
    let (status, exit_code) = if index.is_empty() {
        ("empty", 1)
    } else if issues.is_empty() {
        ("ok", 0)
    } else {
        ("issues", 1)
    };

    if json {
        ui::json(&ValidateOutput {
            schema_version: constants::SCHEMA_VERSION,
            status,
            entries: index.len(),
            issues: &issues,
        })?;
        return Ok(exit_code);
    }

    for issue in &issues {
        ui::error(&format!(
            "#{} {}: {}",
            issue.position, issue.game_versions, issue.problem
        ));
    }
    if index.is_empty() {
        ui::warning("Asset index is empty");
    } else if issues.is_empty() {
        ui::success(&format!("{} index entries, no issues", index.len()));
    } else {
        ui::warning(&format!("{} issue(s) found", issues.len()));
    }

    Ok(exit_code)
}
