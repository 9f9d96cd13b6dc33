use crate::ast::VariantValue;
use crate::recipe::Recipe;
use crate::version::Version;
use ahash::AHashMap;
use itertools::Itertools;

/// The sole runtime input of a resolution: the package version, variant values and
/// the concrete versions chosen for dependencies.
///
/// Declared variants that are not set here take their recipe default during
/// resolution. Values are checked against the recipe only by `Evaluator::resolve`.
#[derive(Debug, Clone, PartialEq)]
pub struct BuildConfiguration {
    version: Version,
    variants: AHashMap<String, VariantValue>,
    dependencies: AHashMap<String, Version>,
}

impl BuildConfiguration {
    pub fn new(version: Version) -> Self {
        Self {
            version,
            variants: AHashMap::new(),
            dependencies: AHashMap::new(),
        }
    }

    /// A configuration with every declared variant explicitly set to its default.
    pub fn with_defaults(recipe: &Recipe, version: Version) -> Self {
        let mut configuration = Self::new(version);
        for variant in &recipe.variants {
            configuration.set_variant(&variant.name, variant.default.clone());
        }
        configuration
    }

    pub fn with_variant(mut self, name: &str, value: impl Into<VariantValue>) -> Self {
        self.set_variant(name, value);
        self
    }

    pub fn with_dependency(mut self, name: &str, version: Version) -> Self {
        self.set_dependency(name, version);
        self
    }

    pub fn set_variant(&mut self, name: &str, value: impl Into<VariantValue>) {
        self.variants.insert(name.to_string(), value.into());
    }

    pub fn set_dependency(&mut self, name: &str, version: Version) {
        self.dependencies.insert(name.to_string(), version);
    }

    pub fn set_version(&mut self, version: Version) {
        self.version = version;
    }

    pub fn version(&self) -> &Version {
        &self.version
    }

    pub fn variant(&self, name: &str) -> Option<&VariantValue> {
        self.variants.get(name)
    }

    /// Configured variants, sorted by name.
    pub fn variants(&self) -> impl Iterator<Item = (&str, &VariantValue)> {
        self.variants
            .iter()
            .map(|(k, v)| (k.as_str(), v))
            .sorted_by_key(|(k, _)| *k)
    }

    pub fn dependency_version(&self, name: &str) -> Option<&Version> {
        self.dependencies.get(name)
    }
}
