use crate::error::ConfigurationError;
use crate::recipe::DependencyType;
use crate::version::Version;
use itertools::Itertools;
use serde_json::json;

/// A dependency required by a build plan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedDependency {
    pub name: String,
    /// Union of the types of every declaration that fired, sorted.
    pub types: Vec<DependencyType>,
    /// The version the configuration supplied, if any.
    pub version: Option<Version>,
}

/// The resolved output of a recipe: required dependencies (sorted by name) and the
/// build-tool arguments in declaration order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildPlan {
    pub package: String,
    pub version: Version,
    pub build_system: Option<String>,
    pub dependencies: Vec<ResolvedDependency>,
    pub arguments: Vec<String>,
}

impl BuildPlan {
    pub fn dependency(&self, name: &str) -> Option<&ResolvedDependency> {
        self.dependencies.iter().find(|d| d.name == name)
    }

    pub fn dependency_names(&self) -> Vec<&str> {
        self.dependencies.iter().map(|d| d.name.as_str()).collect()
    }

    pub fn to_json(&self) -> serde_json::Value {
        json!({
            "package": self.package,
            "version": self.version.to_string(),
            "build_system": self.build_system,
            "dependencies": self
                .dependencies
                .iter()
                .map(|d| json!({
                    "name": d.name,
                    "type": d.types.iter().map(ToString::to_string).collect::<Vec<_>>(),
                    "version": d.version.as_ref().map(ToString::to_string),
                }))
                .collect::<Vec<_>>(),
            "arguments": self.arguments,
        })
    }

    /// The dependency set as `name@version (types)` lines.
    pub fn dependency_summary(&self) -> String {
        self.dependencies
            .iter()
            .map(|d| {
                let version = d
                    .version
                    .as_ref()
                    .map(|v| format!("@{}", v))
                    .unwrap_or_default();
                format!("{}{} ({})", d.name, version, d.types.iter().join(", "))
            })
            .join("\n")
    }
}

/// A conflict rule that matched a configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConflictViolation {
    pub rule: String,
    pub message: Option<String>,
    /// The predicates that matched, with the values they observed.
    pub reason: String,
}

impl From<ConflictViolation> for ConfigurationError {
    fn from(violation: ConflictViolation) -> Self {
        ConfigurationError::ConflictDetected {
            rule: violation.rule,
            message: violation.message,
            reason: violation.reason,
        }
    }
}

/// How one rule evaluated for a configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleReport {
    pub rule: String,
    pub fired: bool,
    pub reason: String,
}

/// Every rule of a recipe evaluated against one configuration, for diagnostics.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Explanation {
    pub dependencies: Vec<RuleReport>,
    pub conflicts: Vec<RuleReport>,
    /// Argument rules and the select branches that were reached.
    pub arguments: Vec<RuleReport>,
}
