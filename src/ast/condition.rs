use super::VariantValue;
use crate::version::VersionRange;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// A guard predicate over a build configuration.
///
/// Conditions are compiled from recipe strings such as `+rootless ^libfuse@:2.9.99`
/// and evaluated uniformly for dependencies, conflicts and argument rules.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Condition {
    /// Unconditionally true.
    Always,

    // Leaf predicates
    Variant {
        name: String,
        value: VariantValue,
    },
    SelfVersion(VersionRange),
    Dependency {
        name: String,
        range: Option<VersionRange>,
    },

    /// Conjunction. Recipes have no negation or disjunction, so every guard is
    /// monotone in the set of enabled dependencies.
    And(Box<Condition>, Box<Condition>),
}

impl Condition {
    /// Combines terms with AND. An empty list is `Always`.
    pub fn all(terms: Vec<Condition>) -> Condition {
        terms
            .into_iter()
            .reduce(|acc, term| Condition::And(Box::new(acc), Box::new(term)))
            .unwrap_or(Condition::Always)
    }

    pub fn is_always(&self) -> bool {
        matches!(self, Condition::Always)
    }

    /// Collects the names of all variants referenced by this condition.
    pub fn referenced_variants<'a>(&'a self, variants: &mut HashSet<&'a str>) {
        match self {
            Condition::Variant { name, .. } => {
                variants.insert(name);
            }
            Condition::And(l, r) => {
                l.referenced_variants(variants);
                r.referenced_variants(variants);
            }
            Condition::Always | Condition::SelfVersion(_) | Condition::Dependency { .. } => {}
        }
    }

    /// Collects the names of all dependencies referenced with `^name`.
    pub fn referenced_dependencies<'a>(&'a self, dependencies: &mut HashSet<&'a str>) {
        match self {
            Condition::Dependency { name, .. } => {
                dependencies.insert(name);
            }
            Condition::And(l, r) => {
                l.referenced_dependencies(dependencies);
                r.referenced_dependencies(dependencies);
            }
            Condition::Always | Condition::SelfVersion(_) | Condition::Variant { .. } => {}
        }
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Condition::Always => write!(f, "always"),
            Condition::Variant { name, value } => match value {
                VariantValue::Bool(true) => write!(f, "+{}", name),
                VariantValue::Bool(false) => write!(f, "~{}", name),
                VariantValue::Str(s) => write!(f, "{}={}", name, s),
            },
            Condition::SelfVersion(range) => write!(f, "@{}", range),
            Condition::Dependency { name, range } => match range {
                Some(range) => write!(f, "^{}@{}", name, range),
                None => write!(f, "^{}", name),
            },
            Condition::And(l, r) => write!(f, "{} {}", l, r),
        }
    }
}
