use crate::error::RecipeError;
use serde::{Deserialize, Serialize};
use std::fs;

/// The complete, canonical declaration of a package recipe, ready for compilation.
/// This is the target structure for any custom recipe format conversion.
///
/// Conditions, dependency specs and ranges are kept as strings here; the `Compiler`
/// parses and validates them.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RecipeDefinition {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub homepage: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub git: Option<String>,
    #[serde(default)]
    pub license: Option<String>,
    #[serde(default)]
    pub maintainers: Vec<String>,
    /// The build tool consuming the derived arguments, e.g. `meson`.
    #[serde(default, alias = "buildSystem")]
    pub build_system: Option<String>,
    #[serde(default)]
    pub versions: Vec<VersionDefinition>,
    #[serde(default)]
    pub variants: Vec<VariantDefinition>,
    #[serde(default)]
    pub dependencies: Vec<DependencyDefinition>,
    #[serde(default)]
    pub conflicts: Vec<ConflictDefinition>,
    #[serde(default)]
    pub arguments: Vec<ArgumentRuleDefinition>,
}

/// A version the recipe knows how to build.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VersionDefinition {
    pub version: String,
    #[serde(default)]
    pub sha256: Option<String>,
    /// Set for versions tracking a branch; such versions are moving.
    #[serde(default)]
    pub branch: Option<String>,
    #[serde(default)]
    pub preferred: bool,
}

/// A build option. `values` turns it into an enumerated variant; without it the
/// variant is boolean.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VariantDefinition {
    pub name: String,
    pub default: serde_json::Value,
    #[serde(default)]
    pub values: Option<Vec<String>>,
    #[serde(default)]
    pub description: Option<String>,
}

/// `spec` is a dependency name with an optional range, e.g. `libfuse@3:`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DependencyDefinition {
    pub spec: String,
    #[serde(default, rename = "type")]
    pub types: Vec<String>,
    #[serde(default)]
    pub when: Option<String>,
}

/// The recipe cannot be built when both `spec` and `when` hold.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConflictDefinition {
    pub spec: String,
    #[serde(default)]
    pub when: Option<String>,
    #[serde(default, alias = "message")]
    pub msg: Option<String>,
}

/// Appends `args` when `when` holds, then takes the first matching `select` branch.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ArgumentRuleDefinition {
    #[serde(default)]
    pub when: Option<String>,
    #[serde(default)]
    pub args: Vec<String>,
    #[serde(default)]
    pub select: Vec<ArgumentRuleDefinition>,
}

impl RecipeDefinition {
    pub fn from_json(json: &str) -> Result<Self, RecipeError> {
        serde_json::from_str(json).map_err(|e| RecipeError::JsonParseError(e.to_string()))
    }

    /// Load a recipe definition from a JSON file.
    pub fn from_file(path: &str) -> Result<Self, RecipeError> {
        let content = fs::read_to_string(path).map_err(|e| {
            RecipeError::JsonParseError(format!("Could not read file '{}': {}", path, e))
        })?;
        Self::from_json(&content)
    }
}
