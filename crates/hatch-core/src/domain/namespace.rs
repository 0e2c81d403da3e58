//! Generator namespaces and their mapping to relative paths.
//!
//! A [`Namespace`] is an ordered list of non-empty segments. Its canonical
//! string form joins the segments with `:` (`widgets:card`); its path form
//! joins them with the platform separator (`widgets/card`). The two
//! conversions are exact inverses for every valid namespace.

use std::fmt;
use std::path::{Component, Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::error::DomainError;

/// Separator between namespace segments.
pub const SEPARATOR: char = ':';

// ── Namespace ────────────────────────────────────────────────────────────────

/// A colon-delimited hierarchical generator identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Namespace {
    segments: Vec<String>,
}

impl Namespace {
    /// Parse a canonical `a:b:c` string.
    pub fn parse(raw: &str) -> Result<Self, DomainError> {
        if raw.is_empty() {
            return Err(DomainError::EmptyNamespace);
        }
        Self::from_segments(raw.split(SEPARATOR)).map_err(|reason| {
            DomainError::InvalidNamespace {
                namespace: raw.to_string(),
                reason,
            }
        })
    }

    /// A single-segment namespace.
    pub fn segment(name: &str) -> Result<Self, DomainError> {
        validate_segment(name).map_err(|reason| DomainError::InvalidNamespace {
            namespace: name.to_string(),
            reason,
        })?;
        Ok(Self {
            segments: vec![name.to_string()],
        })
    }

    /// Single-segment namespace from a compile-time constant known to be valid.
    pub(crate) fn from_static(segment: &'static str) -> Self {
        debug_assert!(validate_segment(segment).is_ok());
        Self {
            segments: vec![segment.to_string()],
        }
    }

    /// Inverse of [`Namespace::to_path`]: rejoin directory segments with `:`.
    ///
    /// Only plain (`Normal`) components are accepted; `..`, roots and
    /// prefixes have no namespace equivalent.
    pub fn from_relative_path(path: &Path) -> Result<Self, DomainError> {
        let invalid = |reason: String| DomainError::InvalidNamespacePath {
            path: path.display().to_string(),
            reason,
        };

        let mut segments = Vec::new();
        for component in path.components() {
            match component {
                Component::Normal(part) => {
                    let part = part
                        .to_str()
                        .ok_or_else(|| invalid("segment is not valid UTF-8".into()))?;
                    segments.push(part.to_string());
                }
                Component::CurDir => continue,
                other => {
                    return Err(invalid(format!(
                        "unsupported path component {:?}",
                        other.as_os_str()
                    )));
                }
            }
        }

        if segments.is_empty() {
            return Err(invalid("path has no segments".into()));
        }
        Self::from_segments(segments.iter().map(String::as_str)).map_err(invalid)
    }

    fn from_segments<'a>(parts: impl IntoIterator<Item = &'a str>) -> Result<Self, String> {
        let segments = parts
            .into_iter()
            .map(|part| validate_segment(part).map(|()| part.to_string()))
            .collect::<Result<Vec<_>, _>>()?;
        if segments.is_empty() {
            return Err("namespace has no segments".into());
        }
        Ok(Self { segments })
    }

    /// Relative path for this namespace: `a:b:c` becomes `a/b/c`.
    pub fn to_path(&self) -> PathBuf {
        self.segments.iter().collect()
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// First segment; groups listings.
    pub fn first(&self) -> &str {
        &self.segments[0]
    }

    /// Last segment; the generator's short name.
    pub fn name(&self) -> &str {
        &self.segments[self.segments.len() - 1]
    }

    /// Everything but the last segment, if any.
    pub fn parent(&self) -> Option<Self> {
        if self.segments.len() < 2 {
            return None;
        }
        Some(Self {
            segments: self.segments[..self.segments.len() - 1].to_vec(),
        })
    }

    /// `self:other`.
    pub fn join(&self, other: &Namespace) -> Self {
        let mut segments = self.segments.clone();
        segments.extend(other.segments.iter().cloned());
        Self { segments }
    }

    /// Display form with a leading group segment removed, when it matches.
    pub fn strip_group(&self, group: &str) -> String {
        if self.segments.len() > 1 && self.first() == group {
            self.segments[1..].join(":")
        } else {
            self.to_string()
        }
    }
}

fn validate_segment(segment: &str) -> Result<(), String> {
    if segment.is_empty() {
        return Err("empty segment".into());
    }
    if segment.contains(SEPARATOR) {
        return Err(format!("segment '{segment}' contains '{SEPARATOR}'"));
    }
    if segment.contains(['/', '\\']) {
        return Err(format!("segment '{segment}' contains a path separator"));
    }
    if segment == "." || segment == ".." {
        return Err(format!("segment '{segment}' is reserved"));
    }
    Ok(())
}

impl fmt::Display for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.segments.join(":"))
    }
}

impl FromStr for Namespace {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Namespace {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Namespace> for String {
    fn from(value: Namespace) -> Self {
        value.to_string()
    }
}
