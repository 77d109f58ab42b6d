// Consistency checks for an index payload before it ships

use crate::index::repository::AssetIndex;
use crate::index::resolver::AssetResolver;
use crate::index::version_range::VersionRange;
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Problem {
    InvalidRange { reason: String },
    NoDownloads,
    UnresolvedReference { reference: String, reason: String },
    SelfReference { reference: String },
    ReferenceWithoutDownloads { reference: String, target: String },
}

impl fmt::Display for Problem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Problem::InvalidRange { reason } => write!(f, "{}", reason),
            Problem::NoDownloads => write!(f, "declares neither downloads nor convertFrom"),
            Problem::UnresolvedReference { reference, reason } => {
                write!(f, "convertFrom '{}' does not resolve: {}", reference, reason)
            }
            Problem::SelfReference { reference } => {
                write!(f, "convertFrom '{}' resolves to the entry itself", reference)
            }
            Problem::ReferenceWithoutDownloads { reference, target } => write!(
                f,
                "convertFrom '{}' resolves to '{}', which has no downloads",
                reference, target
            ),
        }
    }
}

/// A problem found in one index entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IndexIssue {
    /// Zero-based position of the entry in the payload
    pub position: usize,
    pub game_versions: String,
    #[serde(flatten)]
    pub problem: Problem,
}

/// Check every entry of `index`; an empty result means every version the index
/// covers can be resolved for any loader.
pub fn validate(index: &AssetIndex) -> Vec<IndexIssue> {
    // URLs are irrelevant here, only entry lookup is exercised
    let resolver = AssetResolver::new(index, "");
    let mut issues = Vec::new();

    for (position, entry) in index.entries().iter().enumerate() {
        let mut report = |problem: Problem| {
            issues.push(IndexIssue {
                position,
                game_versions: entry.game_versions.clone(),
                problem,
            })
        };

        if let Err(e) = VersionRange::parse(&entry.game_versions) {
            report(Problem::InvalidRange {
                reason: e.to_string(),
            });
        }

        let Some(references) = &entry.convert_from else {
            if entry.downloads().is_empty() {
                report(Problem::NoDownloads);
            }
            continue;
        };

        for reference in references {
            match resolver.lookup_reference(reference) {
                Err(e) => report(Problem::UnresolvedReference {
                    reference: reference.clone(),
                    reason: e.to_string(),
                }),
                Ok((target, _)) if target == position => report(Problem::SelfReference {
                    reference: reference.clone(),
                }),
                Ok((_, source)) if source.downloads().is_empty() => {
                    report(Problem::ReferenceWithoutDownloads {
                        reference: reference.clone(),
                        target: source.game_versions.clone(),
                    })
                }
                Ok(_) => {}
            }
        }
    }

    issues
}
