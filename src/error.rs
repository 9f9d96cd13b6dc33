use thiserror::Error;

/// Errors produced while parsing version strings and version ranges.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VersionError {
    #[error("Version string is empty")]
    Empty,

    #[error("Invalid character '{character}' in version '{input}'")]
    InvalidCharacter { input: String, character: char },

    #[error("Version '{0}' contains an empty component")]
    EmptyComponent(String),

    #[error("Numeric component of version '{0}' is out of range")]
    Overflow(String),

    #[error("Version range '{range}' is invalid: {message}")]
    InvalidRange { range: String, message: String },
}

/// Errors that make a recipe invalid. They are raised while compiling a
/// `RecipeDefinition`, so no resolution can ever run against a malformed recipe.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RecipeError {
    #[error("Failed to parse recipe JSON: {0}")]
    JsonParseError(String),

    #[error("Variant '{0}' is declared more than once")]
    DuplicateVariant(String),

    #[error("Variant '{variant}' has default '{default}', which is not one of its values")]
    InvalidVariantDefault { variant: String, default: String },

    #[error("Variant '{0}' declares an empty set of values")]
    EmptyVariantDomain(String),

    #[error("Rule '{rule}' references undeclared variant '{variant}'")]
    UndeclaredVariant { variant: String, rule: String },

    #[error("Rule '{rule}' references undeclared dependency '{dependency}'")]
    UndeclaredDependency { dependency: String, rule: String },

    #[error("Condition '{condition}' in rule '{rule}' is invalid: {message}")]
    InvalidCondition {
        rule: String,
        condition: String,
        message: String,
    },

    #[error("Rule '{rule}' contains an invalid version: {source}")]
    InvalidVersion {
        rule: String,
        #[source]
        source: VersionError,
    },

    #[error("Version '{0}' is declared more than once")]
    DuplicateVersion(String),

    #[error("Compiled recipe artifact error: {0}")]
    Artifact(String),
}

/// Errors raised by `Evaluator::resolve` for a configuration that cannot be built.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigurationError {
    #[error("Variant '{0}' is not declared by this recipe")]
    UndeclaredVariant(String),

    #[error("Value '{value}' is not valid for variant '{variant}' (expected one of: {allowed})")]
    UnknownVariantValue {
        variant: String,
        value: String,
        allowed: String,
    },

    #[error("Configuration conflicts with rule '{rule}': {reason}{}", conflict_message(.message))]
    ConflictDetected {
        rule: String,
        message: Option<String>,
        reason: String,
    },

    #[error("Dependency '{dependency}' requires version '{constraint}', but {} was supplied", supplied_version(.supplied))]
    UnsatisfiedDependencyVersion {
        dependency: String,
        constraint: String,
        supplied: Option<String>,
    },
}

fn conflict_message(message: &Option<String>) -> String {
    message
        .as_ref()
        .map(|m| format!(" ({})", m))
        .unwrap_or_default()
}

fn supplied_version(supplied: &Option<String>) -> String {
    supplied
        .as_ref()
        .map(|s| format!("'{}'", s))
        .unwrap_or_else(|| "no version".to_string())
}

/// Errors that occur when turning a user-supplied `BuildRequest` into a configuration.
#[derive(Error, Debug)]
pub enum RequestError {
    #[error("Failed to read build request '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse build request JSON: {0}")]
    JsonParseError(String),

    #[error("Invalid version '{input}' for '{package}': {source}")]
    InvalidVersion {
        package: String,
        input: String,
        #[source]
        source: VersionError,
    },

    #[error("No version requested and recipe '{0}' declares none")]
    MissingVersion(String),

    #[error("Variant '{variant}' has an unsupported value '{value}' (expected a boolean or a string)")]
    UnsupportedValue { variant: String, value: String },
}

/// Errors that can occur when converting a custom user format into a `RecipeDefinition`.
#[derive(Error, Debug, Clone)]
pub enum RecipeConversionError {
    #[error("Invalid custom data: {0}")]
    ValidationError(String),
}
