//! The static local dataset used in fallback mode.
//!
//! A twelve-record catalog is compiled into the crate. A JSON array of
//! records on disk can replace it via the `[dataset]` config section.

use crate::error::DatasetError;
use crate::types::Recipe;
use std::path::Path;

const BUILTIN_RECIPES: &str = include_str!("../data/recipes.json");

/// The compiled-in dataset.
pub fn builtin() -> Vec<Recipe> {
    serde_json::from_str(BUILTIN_RECIPES).expect("built-in recipe dataset must deserialize correctly")
}

/// Load a replacement dataset from a JSON array on disk.
pub fn load(path: &Path) -> Result<Vec<Recipe>, DatasetError> {
    let text = std::fs::read_to_string(path).map_err(|source| DatasetError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(serde_json::from_str(&text)?)
}

/// The configured dataset: `path` if given, else the built-in one.
pub fn resolve(path: Option<&Path>) -> Result<Vec<Recipe>, DatasetError> {
    match path {
        Some(path) => load(path),
        None => Ok(builtin()),
    }
}
