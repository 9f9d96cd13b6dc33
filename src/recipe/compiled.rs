use crate::ast::{Condition, VariantValue};
use crate::error::RecipeError;
use crate::version::{Version, VersionRange};
use ahash::AHashMap;
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

/// Descriptive fields of a recipe. None of them take part in resolution.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecipeMetadata {
    pub name: String,
    pub description: Option<String>,
    pub homepage: Option<String>,
    pub url: Option<String>,
    pub git: Option<String>,
    pub license: Option<String>,
    pub maintainers: Vec<String>,
    pub build_system: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeclaredVersion {
    pub version: Version,
    pub sha256: Option<String>,
    pub branch: Option<String>,
    pub preferred: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum VariantDomain {
    Bool,
    Values(Vec<String>),
}

/// A declared build option with its domain and default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Variant {
    pub name: String,
    pub description: Option<String>,
    pub domain: VariantDomain,
    pub default: VariantValue,
}

impl Variant {
    /// Strict domain membership: boolean variants only accept `Bool` values.
    pub fn admits(&self, value: &VariantValue) -> bool {
        match (&self.domain, value) {
            (VariantDomain::Bool, VariantValue::Bool(_)) => true,
            (VariantDomain::Values(values), VariantValue::Str(s)) => values.contains(s),
            _ => false,
        }
    }

    /// Coerces textual spellings into the variant's domain (`"true"` for a boolean
    /// variant, `true` for an enumerated one with a `"true"` value).
    pub fn normalize(&self, value: VariantValue) -> VariantValue {
        match (&self.domain, value) {
            (VariantDomain::Bool, VariantValue::Str(s)) => VariantValue::from_text(&s),
            (VariantDomain::Values(_), VariantValue::Bool(b)) => VariantValue::Str(b.to_string()),
            (_, value) => value,
        }
    }

    /// The domain rendered for error messages.
    pub fn allowed(&self) -> String {
        match &self.domain {
            VariantDomain::Bool => "true, false".to_string(),
            VariantDomain::Values(values) => values.iter().join(", "),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum DependencyType {
    Build,
    Link,
    Run,
    Test,
}

impl DependencyType {
    pub const DEFAULT: [DependencyType; 2] = [DependencyType::Build, DependencyType::Link];
}

impl FromStr for DependencyType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "build" => Ok(DependencyType::Build),
            "link" => Ok(DependencyType::Link),
            "run" => Ok(DependencyType::Run),
            "test" => Ok(DependencyType::Test),
            other => Err(format!("unknown dependency type '{}'", other)),
        }
    }
}

impl fmt::Display for DependencyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DependencyType::Build => "build",
            DependencyType::Link => "link",
            DependencyType::Run => "run",
            DependencyType::Test => "test",
        };
        write!(f, "{}", name)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dependency {
    pub name: String,
    pub types: Vec<DependencyType>,
    pub when: Condition,
    pub constraint: Option<VersionRange>,
}

impl Dependency {
    pub fn identity(&self) -> String {
        match &self.constraint {
            Some(range) => format!("{}@{}", self.name, range),
            None => self.name.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Conflict {
    pub spec: Condition,
    pub when: Condition,
    pub message: Option<String>,
}

impl Conflict {
    /// The rule as written, e.g. `+rootless when @:0.6`.
    pub fn identity(&self) -> String {
        if self.when.is_always() {
            self.spec.to_string()
        } else {
            format!("{} when {}", self.spec, self.when)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArgumentRule {
    pub when: Condition,
    pub args: Vec<String>,
    /// Mutually exclusive branches, first match wins.
    pub select: Vec<ArgumentRule>,
}

/// An immutable, validated recipe. Produced by the `Compiler` and consumed read-only
/// by the `Evaluator`.
///
/// The rule tables are read-only once compiled. Artifacts loaded with
/// `Recipe::from_bytes` are checked with `verify` before use.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    pub(crate) metadata: RecipeMetadata,
    pub(crate) versions: Vec<DeclaredVersion>,
    pub(crate) variants: Vec<Variant>,
    pub(crate) dependencies: Vec<Dependency>,
    pub(crate) conflicts: Vec<Conflict>,
    pub(crate) arguments: Vec<ArgumentRule>,
    // Rebuilt from `variants` on load.
    #[serde(skip)]
    pub(crate) variant_index: AHashMap<String, usize>,
}

impl Recipe {
    pub fn name(&self) -> &str {
        &self.metadata.name
    }

    pub fn metadata(&self) -> &RecipeMetadata {
        &self.metadata
    }

    pub fn versions(&self) -> &[DeclaredVersion] {
        &self.versions
    }

    pub fn variants(&self) -> &[Variant] {
        &self.variants
    }

    pub fn dependencies(&self) -> &[Dependency] {
        &self.dependencies
    }

    pub fn conflicts(&self) -> &[Conflict] {
        &self.conflicts
    }

    pub fn arguments(&self) -> &[ArgumentRule] {
        &self.arguments
    }

    pub fn variant(&self, name: &str) -> Option<&Variant> {
        self.variant_index
            .get(name)
            .and_then(|&i| self.variants.get(i))
    }

    /// Re-establishes the compile-time invariants of a recipe that did not come
    /// straight from the `Compiler`: unique variants with in-domain defaults, and
    /// every variant referenced by a rule declared. Rebuilds the variant index.
    pub(crate) fn verify(&mut self) -> Result<(), RecipeError> {
        let mut index = AHashMap::with_capacity(self.variants.len());
        for (i, variant) in self.variants.iter().enumerate() {
            if index.insert(variant.name.clone(), i).is_some() {
                return Err(RecipeError::DuplicateVariant(variant.name.clone()));
            }
            if !variant.admits(&variant.default) {
                return Err(RecipeError::InvalidVariantDefault {
                    variant: variant.name.clone(),
                    default: variant.default.to_string(),
                });
            }
        }

        let mut guards: Vec<(String, &Condition)> = Vec::new();
        for dependency in &self.dependencies {
            guards.push((format!("dependency '{}'", dependency.identity()), &dependency.when));
        }
        for conflict in &self.conflicts {
            let rule = format!("conflict '{}'", conflict.spec);
            guards.push((rule.clone(), &conflict.spec));
            guards.push((rule, &conflict.when));
        }
        for (i, rule) in self.arguments.iter().enumerate() {
            collect_argument_guards(rule, format!("argument rule #{}", i + 1), &mut guards);
        }

        for (rule, condition) in guards {
            let mut referenced = HashSet::new();
            condition.referenced_variants(&mut referenced);
            if let Some(missing) = referenced
                .into_iter()
                .sorted()
                .find(|name| !index.contains_key(*name))
            {
                return Err(RecipeError::UndeclaredVariant {
                    variant: missing.to_string(),
                    rule,
                });
            }
        }

        self.variant_index = index;
        Ok(())
    }

    pub fn declared_version(&self, version: &Version) -> Option<&DeclaredVersion> {
        self.versions.iter().find(|d| &d.version == version)
    }

    /// The version a caller gets when they do not ask for one: the version marked
    /// `preferred`, otherwise the newest release, otherwise the first declared version.
    pub fn default_version(&self) -> Option<&Version> {
        self.versions
            .iter()
            .find(|d| d.preferred)
            .or_else(|| {
                self.versions
                    .iter()
                    .filter(|d| !d.version.is_moving())
                    .max_by(|a, b| {
                        a.version
                            .components()
                            .cmp(&b.version.components())
                    })
            })
            .or_else(|| self.versions.first())
            .map(|d| &d.version)
    }

    /// Names of all dependencies the recipe can ever require, sorted.
    pub fn dependency_names(&self) -> Vec<&str> {
        self.dependencies
            .iter()
            .map(|d| d.name.as_str())
            .sorted()
            .dedup()
            .collect()
    }
}

fn collect_argument_guards<'a>(
    rule: &'a ArgumentRule,
    label: String,
    guards: &mut Vec<(String, &'a Condition)>,
) {
    guards.push((label.clone(), &rule.when));
    for (i, branch) in rule.select.iter().enumerate() {
        collect_argument_guards(branch, format!("{}.{}", label, i + 1), guards);
    }
}
