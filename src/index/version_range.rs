// Version range expressions used by the asset index

use crate::error::ParseError;
use crate::index::version::Version;
use std::fmt;

/// One side of an interval
#[derive(Debug, Clone, PartialEq, Eq)]
enum Bound {
    Inclusive(Version),
    Exclusive(Version),
    Unbounded,
}

/// A single comma-free term of a range expression
#[derive(Debug, Clone, PartialEq, Eq)]
enum VersionSet {
    /// `1.12.2`
    Exact(Version),
    /// `1.16.x` or `1.16.*`
    Prefix(Version),
    /// `[1.12,1.12.2]`, `[1.19,)`, `(,1.12.2]`, `[1.16,1.17)`
    Interval { lower: Bound, upper: Bound },
}

impl VersionSet {
    fn contains(&self, version: &Version) -> bool {
        match self {
            VersionSet::Exact(exact) => version == exact,
            VersionSet::Prefix(prefix) => version.starts_with(prefix),
            VersionSet::Interval { lower, upper } => {
                let above = match lower {
                    Bound::Inclusive(v) => version >= v,
                    Bound::Exclusive(v) => version > v,
                    Bound::Unbounded => true,
                };
                let below = match upper {
                    Bound::Inclusive(v) => version <= v,
                    Bound::Exclusive(v) => version < v,
                    Bound::Unbounded => true,
                };
                above && below
            }
        }
    }
}

/// A parsed range expression: one or more version sets joined by top-level commas.
///
/// Supported forms:
/// - exact: `1.12.2`
/// - wildcard: `1.16.x`, `1.16.*`
/// - at least: `[1.19,)`
/// - at most: `(,1.12.2]`
/// - unbounded sides take `(` or `)`; `[,1.12]` is rejected
/// - interval: `[1.12,1.12.2]`, with `(` / `)` marking an exclusive side
/// - union: `[1.12,1.12.2],[1.16,1.17)`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionRange {
    expr: String,
    sets: Vec<VersionSet>,
}

impl VersionRange {
    pub fn parse(expr: &str) -> Result<Self, ParseError> {
        let trimmed = expr.trim();
        if trimmed.is_empty() {
            return Err(ParseError::range(expr, "empty expression"));
        }

        let sets = split_terms(trimmed)?
            .into_iter()
            .map(|term| parse_term(trimmed, term))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            expr: trimmed.to_string(),
            sets,
        })
    }

    /// Whether `version` falls inside any set of this range
    pub fn contains(&self, version: &Version) -> bool {
        self.sets.iter().any(|set| set.contains(version))
    }

    /// Whether both ranges are made of the same sets, however they were spelled
    pub fn same_versions(&self, other: &VersionRange) -> bool {
        self.sets == other.sets
    }

    /// A concrete version that stands for this range when it is used as a
    /// reference to another index entry.
    ///
    /// Taken from the first set: the exact version, the wildcard prefix, or an
    /// inclusive interval bound (lower first). `None` when the first set has no
    /// inclusive bound, e.g. `(1.16,1.17)` or `(,)`.
    pub fn representative(&self) -> Option<Version> {
        match self.sets.first()? {
            VersionSet::Exact(v) | VersionSet::Prefix(v) => Some(v.clone()),
            VersionSet::Interval { lower, upper } => match (lower, upper) {
                (Bound::Inclusive(v), _) => Some(v.clone()),
                (_, Bound::Inclusive(v)) => Some(v.clone()),
                _ => None,
            },
        }
    }
}

impl fmt::Display for VersionRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.expr)
    }
}

/// Split on commas that are not inside a bracket pair
fn split_terms(expr: &str) -> Result<Vec<&str>, ParseError> {
    let mut terms = Vec::new();
    let mut start = 0;
    let mut open = false;

    for (i, c) in expr.char_indices() {
        match c {
            '[' | '(' => {
                if open {
                    return Err(ParseError::range(expr, "nested bracket"));
                }
                open = true;
            }
            ']' | ')' => {
                if !open {
                    return Err(ParseError::range(expr, "unmatched closing bracket"));
                }
                open = false;
            }
            ',' if !open => {
                terms.push(&expr[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }

    if open {
        return Err(ParseError::range(expr, "unclosed bracket"));
    }
    terms.push(&expr[start..]);

    Ok(terms)
}

fn parse_term(expr: &str, term: &str) -> Result<VersionSet, ParseError> {
    let term = term.trim();
    if term.is_empty() {
        return Err(ParseError::range(expr, "empty term"));
    }

    if term.starts_with('[') || term.starts_with('(') {
        return parse_interval(expr, term);
    }

    if let Some(prefix) = term
        .strip_suffix(".x")
        .or_else(|| term.strip_suffix(".X"))
        .or_else(|| term.strip_suffix(".*"))
    {
        return Ok(VersionSet::Prefix(parse_version(expr, prefix)?));
    }

    Ok(VersionSet::Exact(parse_version(expr, term)?))
}

fn parse_interval(expr: &str, term: &str) -> Result<VersionSet, ParseError> {
    // split_terms guarantees a single bracket pair, but it may be followed by junk
    let lower_inclusive = term.starts_with('[');
    let upper_inclusive = if term.ends_with(']') {
        true
    } else if term.ends_with(')') {
        false
    } else {
        return Err(ParseError::range(expr, format!("'{}' must end with ']' or ')'", term)));
    };
    let inner = &term[1..term.len() - 1];

    let parts: Vec<&str> = inner.split(',').map(str::trim).collect();
    match parts.as_slice() {
        [single] => {
            if !(lower_inclusive && upper_inclusive) {
                return Err(ParseError::range(
                    expr,
                    format!("single-version set '{}' must use '[' and ']'", term),
                ));
            }
            Ok(VersionSet::Exact(parse_version(expr, single)?))
        }
        [low, high] => {
            let lower = parse_bound(expr, low, lower_inclusive)?;
            let upper = parse_bound(expr, high, upper_inclusive)?;
            check_not_empty(expr, term, &lower, &upper)?;
            Ok(VersionSet::Interval { lower, upper })
        }
        _ => Err(ParseError::range(
            expr,
            format!("'{}' has more than two bounds", term),
        )),
    }
}

fn parse_bound(expr: &str, text: &str, inclusive: bool) -> Result<Bound, ParseError> {
    if text.is_empty() {
        if inclusive {
            return Err(ParseError::range(
                expr,
                "an unbounded side must use '(' or ')'",
            ));
        }
        return Ok(Bound::Unbounded);
    }
    let version = parse_version(expr, text)?;
    Ok(if inclusive {
        Bound::Inclusive(version)
    } else {
        Bound::Exclusive(version)
    })
}

fn check_not_empty(expr: &str, term: &str, lower: &Bound, upper: &Bound) -> Result<(), ParseError> {
    let (low, low_inclusive) = match lower {
        Bound::Inclusive(v) => (v, true),
        Bound::Exclusive(v) => (v, false),
        Bound::Unbounded => return Ok(()),
    };
    let (high, high_inclusive) = match upper {
        Bound::Inclusive(v) => (v, true),
        Bound::Exclusive(v) => (v, false),
        Bound::Unbounded => return Ok(()),
    };

    if low > high || (low == high && !(low_inclusive && high_inclusive)) {
        return Err(ParseError::range(
            expr,
            format!("'{}' contains no versions", term),
        ));
    }
    Ok(())
}

fn parse_version(expr: &str, text: &str) -> Result<Version, ParseError> {
    Version::parse(text)
        .map_err(|_| ParseError::range(expr, format!("'{}' is not a version", text.trim())))
}
