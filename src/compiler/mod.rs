use crate::error::RecipeError;
use crate::recipe::{Recipe, RecipeDefinition, RecipeMetadata};
use tracing::debug;

mod builder;
pub mod parsing;

use builder::RecipeBuilder;

/// Turns a `RecipeDefinition` into an immutable, validated `Recipe`.
pub struct Compiler {
    definition: RecipeDefinition,
    allow_undeclared_dependencies: bool,
}

pub struct CompilerBuilder {
    definition: RecipeDefinition,
    allow_undeclared_dependencies: bool,
}

impl CompilerBuilder {
    pub fn new(definition: RecipeDefinition) -> Self {
        Self {
            definition,
            allow_undeclared_dependencies: false,
        }
    }

    /// Accept `^name` terms for dependencies this recipe never declares, e.g. when a
    /// guard inspects a transitive dependency. Such terms are false unless the
    /// configuration enables the dependency through another declaration.
    pub fn allow_undeclared_dependencies(mut self, allow: bool) -> Self {
        self.allow_undeclared_dependencies = allow;
        self
    }

    pub fn build(self) -> Compiler {
        Compiler {
            definition: self.definition,
            allow_undeclared_dependencies: self.allow_undeclared_dependencies,
        }
    }
}

impl Compiler {
    pub fn builder(definition: RecipeDefinition) -> CompilerBuilder {
        CompilerBuilder::new(definition)
    }

    /// Shorthand for compiling a JSON recipe with default options.
    pub fn from_json(json: &str) -> Result<Recipe, RecipeError> {
        Self::builder(RecipeDefinition::from_json(json)?)
            .build()
            .compile()
    }

    pub fn compile(self) -> Result<Recipe, RecipeError> {
        let mut builder = RecipeBuilder::new(&self.definition, self.allow_undeclared_dependencies);

        builder.build_variants()?;
        let versions = builder.build_versions()?;
        let dependencies = builder.build_dependencies()?;
        let conflicts = builder.build_conflicts()?;
        let arguments = builder.build_arguments()?;
        let (variants, variant_index) = builder.finish();

        debug!(
            recipe = %self.definition.name,
            versions = versions.len(),
            variants = variants.len(),
            dependencies = dependencies.len(),
            conflicts = conflicts.len(),
            arguments = arguments.len(),
            "compiled recipe"
        );

        let RecipeDefinition {
            name,
            description,
            homepage,
            url,
            git,
            license,
            maintainers,
            build_system,
            ..
        } = self.definition;

        Ok(Recipe {
            metadata: RecipeMetadata {
                name,
                description,
                homepage,
                url,
                git,
                license,
                maintainers,
                build_system,
            },
            versions,
            variants,
            dependencies,
            conflicts,
            arguments,
            variant_index,
        })
    }
}
