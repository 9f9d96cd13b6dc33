//! Package versions as used by recipes and build configurations.
//!
//! A [`Version`] is either a *release* (an ordered point such as `2.9.0` or `0.5.0rc1`)
//! or a *moving* version such as a development branch (`master`, `develop`). Moving
//! versions do not occupy a fixed position in the release ordering, so comparing one
//! against a release yields [`Placement::Unordered`] instead of a silent `false`.

use crate::error::VersionError;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

pub mod range;

pub use range::{MovingVersionPolicy, RangeMembership, VersionRange};

/// A single component of a release version.
///
/// Alphabetic components sort before numeric ones, so `1.0rc1 < 1.0.1`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum VersionComponent {
    Alpha(String),
    Numeric(u64),
}

impl fmt::Display for VersionComponent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VersionComponent::Alpha(s) => write!(f, "{}", s),
            VersionComponent::Numeric(n) => write!(f, "{}", n),
        }
    }
}

/// Whether a version string names a fixed release or a moving target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VersionKind {
    Fixed,
    Moving,
}

/// The relative position of two versions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    Ordered(Ordering),
    Unordered,
}

/// A release point of a package or a symbolic, moving version.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Version {
    Release {
        spelling: String,
        components: Vec<VersionComponent>,
    },
    Moving {
        name: String,
    },
}

impl Version {
    /// Parses a version string, classifying it by its syntax alone.
    ///
    /// Strings starting with a digit are releases; anything else (`master`, `develop`)
    /// is a moving version.
    pub fn parse(input: &str) -> Result<Self, VersionError> {
        let input = input.trim();
        let first = input.chars().next().ok_or(VersionError::Empty)?;
        if first.is_ascii_digit() {
            Self::release(input)
        } else {
            Self::moving(input)
        }
    }

    /// Parses `input` with an explicit classification, e.g. one supplied by a
    /// [`VersionProvider`](crate::provider::VersionProvider).
    pub fn parse_as(input: &str, kind: VersionKind) -> Result<Self, VersionError> {
        match kind {
            VersionKind::Fixed => Self::release(input.trim()),
            VersionKind::Moving => Self::moving(input.trim()),
        }
    }

    /// Creates a release version from its spelling.
    pub fn release(input: &str) -> Result<Self, VersionError> {
        if input.is_empty() {
            return Err(VersionError::Empty);
        }
        let mut components = Vec::new();
        for segment in input.split(['.', '-', '_']) {
            if segment.is_empty() {
                return Err(VersionError::EmptyComponent(input.to_string()));
            }
            split_segment(input, segment, &mut components)?;
        }
        Ok(Version::Release {
            spelling: input.to_string(),
            components,
        })
    }

    /// Creates a moving version, e.g. a branch tip.
    pub fn moving(name: &str) -> Result<Self, VersionError> {
        if name.is_empty() {
            return Err(VersionError::Empty);
        }
        if let Some(c) = name
            .chars()
            .find(|c| !(c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_' | '/')))
        {
            return Err(VersionError::InvalidCharacter {
                input: name.to_string(),
                character: c,
            });
        }
        Ok(Version::Moving {
            name: name.to_string(),
        })
    }

    pub fn kind(&self) -> VersionKind {
        match self {
            Version::Release { .. } => VersionKind::Fixed,
            Version::Moving { .. } => VersionKind::Moving,
        }
    }

    pub fn is_moving(&self) -> bool {
        matches!(self, Version::Moving { .. })
    }

    /// Release components, or `None` for a moving version.
    pub fn components(&self) -> Option<&[VersionComponent]> {
        match self {
            Version::Release { components, .. } => Some(components),
            Version::Moving { .. } => None,
        }
    }

    /// Positions `self` relative to `other`.
    ///
    /// Releases are totally ordered. Two moving versions are equal when their names
    /// match; every other pairing is unordered.
    pub fn placement(&self, other: &Version) -> Placement {
        match (self, other) {
            (Version::Release { components: a, .. }, Version::Release { components: b, .. }) => {
                Placement::Ordered(a.cmp(b))
            }
            (Version::Moving { name: a }, Version::Moving { name: b }) if a == b => {
                Placement::Ordered(Ordering::Equal)
            }
            _ => Placement::Unordered,
        }
    }

    /// True if `self` is a release whose components start with all of `prefix`'s.
    /// `1.2` is a prefix of `1.2` and `1.2.7`, but not of `1.20`.
    pub fn has_prefix(&self, prefix: &Version) -> bool {
        match (self.components(), prefix.components()) {
            (Some(own), Some(pre)) => own.len() >= pre.len() && own[..pre.len()] == *pre,
            _ => false,
        }
    }
}

fn split_segment(
    input: &str,
    segment: &str,
    components: &mut Vec<VersionComponent>,
) -> Result<(), VersionError> {
    let mut rest = segment;
    while let Some(first) = rest.chars().next() {
        if !first.is_ascii_alphanumeric() {
            return Err(VersionError::InvalidCharacter {
                input: input.to_string(),
                character: first,
            });
        }
        let numeric = first.is_ascii_digit();
        let end = rest
            .find(|c: char| !c.is_ascii_alphanumeric() || c.is_ascii_digit() != numeric)
            .unwrap_or(rest.len());
        let (run, tail) = rest.split_at(end);
        if numeric {
            let n = run
                .parse::<u64>()
                .map_err(|_| VersionError::Overflow(input.to_string()))?;
            components.push(VersionComponent::Numeric(n));
        } else {
            components.push(VersionComponent::Alpha(run.to_string()));
        }
        rest = tail;
    }
    Ok(())
}

// Releases compare by components, so `1.0` and `1-0` are the same version.
impl PartialEq for Version {
    fn eq(&self, other: &Self) -> bool {
        self.placement(other) == Placement::Ordered(Ordering::Equal)
    }
}

impl Eq for Version {}

impl Hash for Version {
    fn hash<H: Hasher>(&self, state: &mut H) {
        core::mem::discriminant(self).hash(state);
        match self {
            Version::Release { components, .. } => components.hash(state),
            Version::Moving { name } => name.hash(state),
        }
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Version::Release { spelling, .. } => write!(f, "{}", spelling),
            Version::Moving { name } => write!(f, "{}", name),
        }
    }
}

impl FromStr for Version {
    type Err = VersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
