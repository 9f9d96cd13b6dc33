use super::definition::RecipeDefinition;
use crate::error::RecipeConversionError;

/// A trait for custom recipe formats that can be converted into a `RecipeDefinition`.
///
/// This is the extension point for loading recipes from something other than the
/// canonical JSON layout. Implement it on your own structs to provide a translation
/// layer; the compiler then validates the result like any other definition.
///
/// # Example
///
/// ```rust,no_run
/// use kumitate::prelude::*;
/// use kumitate::error::RecipeConversionError;
/// use std::result::Result;
///
/// // A format where every dependency is a plain, unconditional name.
/// struct FlatRecipe { name: String, requires: Vec<String> }
///
/// impl IntoRecipe for FlatRecipe {
///     fn into_recipe(self) -> Result<RecipeDefinition, RecipeConversionError> {
///         let dependencies = self
///             .requires
///             .into_iter()
///             .map(|spec| DependencyDefinition { spec, types: vec![], when: None })
///             .collect();
///
///         Ok(RecipeDefinition {
///             name: self.name,
///             dependencies,
///             ..Default::default()
///         })
///     }
/// }
/// ```
pub trait IntoRecipe {
    /// Consumes the object and converts it into a recipe definition.
    fn into_recipe(self) -> Result<RecipeDefinition, RecipeConversionError>;
}
