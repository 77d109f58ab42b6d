// Dotted numeric Minecraft version parsing and ordering

use crate::error::ParseError;
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// A parsed game version such as `1.20.1`.
///
/// Ordering is component-wise with missing trailing components treated as 0,
/// so `1.20` and `1.20.0` compare (and test) equal. Each segment must fit in a
/// `u64`; a longer run of digits is an `InvalidVersion`.
#[derive(Debug, Clone)]
pub struct Version {
    components: Vec<u64>,
}

impl Version {
    /// Parse a dotted version string
    ///
    /// # Examples
    /// ```
    /// let v = Version::parse("1.20.1")?;
    /// assert_eq!(v.to_string(), "1.20.1");
    /// ```
    pub fn parse(text: &str) -> Result<Self, ParseError> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(ParseError::InvalidVersion(text.to_string()));
        }

        let components = trimmed
            .split('.')
            .map(|segment| {
                // u64::from_str accepts a leading '+', which is not a version digit
                if segment.is_empty() || !segment.bytes().all(|b| b.is_ascii_digit()) {
                    return Err(ParseError::InvalidVersion(text.to_string()));
                }
                segment
                    .parse::<u64>()
                    .map_err(|_| ParseError::InvalidVersion(text.to_string()))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { components })
    }

    /// Whether this version's leading components equal `prefix`
    /// (e.g. `1.16.5` starts with `1.16`, `1.16` starts with `1.16`, `1.1` does not start with `1.16`)
    pub fn starts_with(&self, prefix: &Version) -> bool {
        prefix
            .components
            .iter()
            .enumerate()
            .all(|(i, part)| self.component(i) == *part)
    }

    fn component(&self, index: usize) -> u64 {
        self.components.get(index).copied().unwrap_or(0)
    }
}

impl FromStr for Version {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Version::parse(s)
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.components.iter().map(|c| c.to_string()).collect();
        write!(f, "{}", parts.join("."))
    }
}

impl Ord for Version {
    fn cmp(&self, other: &Self) -> Ordering {
        let len = self.components.len().max(other.components.len());
        (0..len)
            .map(|i| self.component(i).cmp(&other.component(i)))
            .find(|ordering| *ordering != Ordering::Equal)
            .unwrap_or(Ordering::Equal)
    }
}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Version {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Version {}
