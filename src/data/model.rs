use crate::ast::VariantValue;
use crate::data::BuildConfiguration;
use crate::error::RequestError;
use crate::provider::VersionProvider;
use crate::recipe::Recipe;
use crate::version::Version;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;

/// A build configuration as written by a user, matching the expected JSON format:
///
/// ```json
/// { "version": "0.7.0", "variants": { "rootless": true }, "dependencies": { "libfuse": "3.1.0" } }
/// ```
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct BuildRequest {
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub variants: BTreeMap<String, serde_json::Value>,
    #[serde(default)]
    pub dependencies: BTreeMap<String, String>,
}

impl BuildRequest {
    pub fn from_json(json: &str) -> Result<Self, RequestError> {
        serde_json::from_str(json).map_err(|e| RequestError::JsonParseError(e.to_string()))
    }

    /// Load a build request from a JSON file.
    pub fn from_file(path: &str) -> Result<Self, RequestError> {
        let content = fs::read_to_string(path).map_err(|source| RequestError::Io {
            path: path.to_string(),
            source,
        })?;
        Self::from_json(&content)
    }

    /// Converts the request into a configuration for `recipe`.
    ///
    /// Version strings are classified through `provider`, falling back to their
    /// spelling. Without a requested version the recipe's default version is used.
    /// Textual values of declared variants are coerced into the variant's domain, so
    /// `"false"` works for a boolean variant; anything else is left for the evaluator
    /// to reject.
    pub fn into_configuration(
        self,
        recipe: &Recipe,
        provider: &dyn VersionProvider,
    ) -> Result<BuildConfiguration, RequestError> {
        let version = match &self.version {
            Some(raw) => classify(provider, recipe.name(), raw)?,
            None => recipe
                .default_version()
                .cloned()
                .ok_or_else(|| RequestError::MissingVersion(recipe.name().to_string()))?,
        };

        let mut configuration = BuildConfiguration::new(version);
        for (name, raw) in &self.variants {
            let value =
                VariantValue::from_json(raw).ok_or_else(|| RequestError::UnsupportedValue {
                    variant: name.clone(),
                    value: raw.to_string(),
                })?;
            let value = match recipe.variant(name) {
                Some(variant) => variant.normalize(value),
                None => value,
            };
            configuration.set_variant(name, value);
        }
        for (name, raw) in &self.dependencies {
            configuration.set_dependency(name, classify(provider, name, raw)?);
        }
        Ok(configuration)
    }
}

fn classify(
    provider: &dyn VersionProvider,
    package: &str,
    raw: &str,
) -> Result<Version, RequestError> {
    let parsed = match provider.classify(package, raw) {
        Some(kind) => Version::parse_as(raw, kind),
        None => Version::parse(raw),
    };
    parsed.map_err(|source| RequestError::InvalidVersion {
        package: package.to_string(),
        input: raw.to_string(),
        source,
    })
}
