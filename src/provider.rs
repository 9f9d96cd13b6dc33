use crate::recipe::Recipe;
use crate::version::VersionKind;
use ahash::AHashMap;
use serde::{Deserialize, Serialize};

/// A version known to a provider, with its classification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProvidedVersion {
    pub version: String,
    pub kind: VersionKind,
}

/// Read-only lookup of installable versions, e.g. backed by a package database.
///
/// The evaluator never enumerates versions itself. It only needs to know whether a
/// version string a caller supplied is a fixed release or a moving target, which is
/// what `classify` answers.
pub trait VersionProvider: Send + Sync {
    fn available_versions(&self, package: &str) -> Vec<ProvidedVersion>;

    /// Classifies `version` of `package`, or `None` if the provider does not know it.
    fn classify(&self, package: &str, version: &str) -> Option<VersionKind> {
        self.available_versions(package)
            .into_iter()
            .find(|v| v.version == version)
            .map(|v| v.kind)
    }
}

/// An in-memory provider, seeded from recipes and explicit entries.
#[derive(Debug, Clone, Default)]
pub struct StaticVersionProvider {
    packages: AHashMap<String, Vec<ProvidedVersion>>,
}

impl StaticVersionProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// A provider knowing the versions `recipe` declares for itself. Versions that
    /// track a branch are moving.
    pub fn from_recipe(recipe: &Recipe) -> Self {
        let mut provider = Self::new();
        for declared in &recipe.versions {
            let kind = if declared.branch.is_some() {
                VersionKind::Moving
            } else {
                declared.version.kind()
            };
            provider.add_version(recipe.name(), &declared.version.to_string(), kind);
        }
        provider
    }

    pub fn with_version(mut self, package: &str, version: &str, kind: VersionKind) -> Self {
        self.add_version(package, version, kind);
        self
    }

    pub fn add_version(&mut self, package: &str, version: &str, kind: VersionKind) {
        let versions = self.packages.entry(package.to_string()).or_default();
        versions.retain(|v| v.version != version);
        versions.push(ProvidedVersion {
            version: version.to_string(),
            kind,
        });
    }
}

impl VersionProvider for StaticVersionProvider {
    fn available_versions(&self, package: &str) -> Vec<ProvidedVersion> {
        self.packages.get(package).cloned().unwrap_or_default()
    }
}
