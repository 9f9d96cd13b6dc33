use super::Recipe;
use crate::error::RecipeError;
use bincode::config::standard;
use bincode::serde::{decode_from_slice, encode_to_vec};
use std::fs;
use std::io::{Read, Write};
use tracing::debug;

impl Recipe {
    /// Serializes the compiled recipe with bincode.
    pub fn to_bytes(&self) -> Result<Vec<u8>, RecipeError> {
        encode_to_vec(self, standard())
            .map_err(|e| RecipeError::Artifact(format!("Serialization failed: {}", e)))
    }

    /// Saves the compiled recipe to a file using the bincode format.
    pub fn save(&self, path: &str) -> Result<(), RecipeError> {
        let bytes = self.to_bytes()?;
        let mut file = fs::File::create(path).map_err(|e| {
            RecipeError::Artifact(format!("Could not create file '{}': {}", path, e))
        })?;
        file.write_all(&bytes).map_err(|e| {
            RecipeError::Artifact(format!("Could not write to file '{}': {}", path, e))
        })?;
        debug!(path, bytes = bytes.len(), "saved compiled recipe");
        Ok(())
    }

    /// Loads a compiled recipe from a file.
    pub fn from_file(path: &str) -> Result<Self, RecipeError> {
        let mut file = fs::File::open(path)
            .map_err(|e| RecipeError::Artifact(format!("Could not open file '{}': {}", path, e)))?;
        let mut bytes = Vec::new();
        file.read_to_end(&mut bytes).map_err(|e| {
            RecipeError::Artifact(format!("Could not read from file '{}': {}", path, e))
        })?;
        Self::from_bytes(&bytes)
    }

    /// Deserializes a compiled recipe from a byte slice and checks that its rule
    /// tables are consistent before handing it out.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, RecipeError> {
        let mut recipe: Recipe = decode_from_slice(bytes, standard())
            .map(|(recipe, _)| recipe) // bincode 2 returns a tuple (data, bytes_read)
            .map_err(|e| RecipeError::Artifact(format!("Deserialization failed: {}", e)))?;
        recipe.verify()?;
        Ok(recipe)
    }
}
