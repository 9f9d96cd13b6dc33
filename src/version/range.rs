use super::{Placement, Version};
use crate::error::VersionError;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// How a moving version is treated by a range that it cannot be ordered against.
///
/// A moving version never satisfies a range with an upper bound, whatever the policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum MovingVersionPolicy {
    /// Lower-bound-only ranges (`@1.0:`) admit moving versions.
    #[default]
    SatisfiesLowerBounds,
    /// Moving versions only satisfy the unbounded range.
    Unordered,
}

/// The result of classifying a version against a range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeMembership {
    Inside,
    Outside,
    /// The version cannot be placed relative to the range's bounds.
    Unordered,
}

/// An inclusive version range in recipe syntax.
///
/// * `:` or an empty string: any version
/// * `1.2`: `1.2` and everything it prefixes (`1.2.7`)
/// * `1.2:`, `:2.9.99`, `0.5:0.6`: inclusive bounds; the upper bound also admits every
///   version it prefixes, so `:0.6` contains `0.6.3`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VersionRange {
    Any,
    Exact(Version),
    Interval {
        lower: Option<Version>,
        upper: Option<Version>,
    },
}

impl VersionRange {
    pub fn parse(input: &str) -> Result<Self, VersionError> {
        let input = input.trim();
        if input.is_empty() || input == ":" {
            return Ok(VersionRange::Any);
        }
        let Some((lower, upper)) = input.split_once(':') else {
            return Ok(VersionRange::Exact(Version::parse(input)?));
        };

        let lower = parse_bound(input, lower)?;
        let upper = parse_bound(input, upper)?;
        if let (Some(lo), Some(hi)) = (&lower, &upper) {
            if lo.placement(hi) == Placement::Ordered(Ordering::Greater) && !lo.has_prefix(hi) {
                return Err(VersionError::InvalidRange {
                    range: input.to_string(),
                    message: format!("lower bound {} is above upper bound {}", lo, hi),
                });
            }
        }
        Ok(VersionRange::Interval { lower, upper })
    }

    pub fn upper(&self) -> Option<&Version> {
        match self {
            VersionRange::Exact(v) => Some(v),
            VersionRange::Interval { upper, .. } => upper.as_ref(),
            VersionRange::Any => None,
        }
    }

    pub fn lower(&self) -> Option<&Version> {
        match self {
            VersionRange::Exact(v) => Some(v),
            VersionRange::Interval { lower, .. } => lower.as_ref(),
            VersionRange::Any => None,
        }
    }

    /// Places `version` relative to this range without applying any policy.
    pub fn classify(&self, version: &Version) -> RangeMembership {
        match self {
            VersionRange::Any => RangeMembership::Inside,
            VersionRange::Exact(exact) => match version.placement(exact) {
                Placement::Ordered(Ordering::Equal) => RangeMembership::Inside,
                Placement::Ordered(_) if version.has_prefix(exact) => RangeMembership::Inside,
                Placement::Ordered(_) => RangeMembership::Outside,
                Placement::Unordered if version.is_moving() && exact.is_moving() => {
                    RangeMembership::Outside
                }
                Placement::Unordered => RangeMembership::Unordered,
            },
            VersionRange::Interval { lower, upper } => {
                if version.is_moving() {
                    return RangeMembership::Unordered;
                }
                let above_lower = lower.as_ref().is_none_or(|lo| {
                    matches!(
                        version.placement(lo),
                        Placement::Ordered(Ordering::Greater | Ordering::Equal)
                    )
                });
                let below_upper = upper.as_ref().is_none_or(|hi| {
                    matches!(
                        version.placement(hi),
                        Placement::Ordered(Ordering::Less | Ordering::Equal)
                    ) || version.has_prefix(hi)
                });
                if above_lower && below_upper {
                    RangeMembership::Inside
                } else {
                    RangeMembership::Outside
                }
            }
        }
    }

    /// Whether `version` satisfies the range under `policy`.
    pub fn contains(&self, version: &Version, policy: MovingVersionPolicy) -> bool {
        match self.classify(version) {
            RangeMembership::Inside => true,
            RangeMembership::Outside => false,
            RangeMembership::Unordered => match (policy, self) {
                (
                    MovingVersionPolicy::SatisfiesLowerBounds,
                    VersionRange::Interval { upper: None, .. },
                ) => true,
                _ => false,
            },
        }
    }
}

fn parse_bound(range: &str, bound: &str) -> Result<Option<Version>, VersionError> {
    let bound = bound.trim();
    if bound.is_empty() {
        return Ok(None);
    }
    let version = Version::parse(bound)?;
    if version.is_moving() {
        return Err(VersionError::InvalidRange {
            range: range.to_string(),
            message: format!("moving version '{}' cannot bound a range", version),
        });
    }
    Ok(Some(version))
}

impl fmt::Display for VersionRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VersionRange::Any => write!(f, ":"),
            VersionRange::Exact(v) => write!(f, "{}", v),
            VersionRange::Interval { lower, upper } => {
                if let Some(lo) = lower {
                    write!(f, "{}", lo)?;
                }
                write!(f, ":")?;
                if let Some(hi) = upper {
                    write!(f, "{}", hi)?;
                }
                Ok(())
            }
        }
    }
}

impl FromStr for VersionRange {
    type Err = VersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
