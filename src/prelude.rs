//! Prelude module for convenient imports
//!
//! This module re-exports the most commonly used types and traits from the kumitate
//! crate. Import it to get the core functionality without importing each type
//! individually.
//!
//! # Example
//!
//! ```rust,no_run
//! use kumitate::prelude::*;
//!
//! # fn run_example() -> Result<()> {
//! let definition = RecipeDefinition::from_file("path/to/recipe.json")?;
//! let recipe = Compiler::builder(definition).build().compile()?;
//!
//! let provider = StaticVersionProvider::from_recipe(&recipe);
//! let configuration = BuildRequest::from_file("path/to/request.json")?
//!     .into_configuration(&recipe, &provider)?;
//!
//! let evaluator = Evaluator::new(recipe);
//! let plan = evaluator.resolve(&configuration)?;
//! println!("Build arguments: {:?}", plan.arguments);
//! # Ok(())
//! # }
//! ```

// Core compilation and evaluation
pub use crate::compiler::Compiler;
pub use crate::evaluator::{BuildPlan, ConflictViolation, Evaluator, Explanation};

// Conditions and traces
pub use crate::ast::{Condition, EvaluationTrace, VariantValue};

// Recipes
pub use crate::recipe::{
    ArgumentRuleDefinition, ConflictDefinition, DependencyDefinition, DependencyType, IntoRecipe,
    Recipe, RecipeDefinition, VariantDefinition, VersionDefinition,
};

// Versions
pub use crate::version::{MovingVersionPolicy, Version, VersionKind, VersionRange};

// Configurations
pub use crate::data::{BuildConfiguration, BuildRequest};
pub use crate::provider::{StaticVersionProvider, VersionProvider};

// Error types
pub use crate::error::{ConfigurationError, RecipeError, RequestError, VersionError};

// Trace formatting
pub use crate::trace::TraceFormatter;

// Result type alias for convenience
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;
