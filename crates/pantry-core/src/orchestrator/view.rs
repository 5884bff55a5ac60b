//! The published catalog view.

use crate::error::CatalogError;
use crate::mode::{Connectivity, SourceMode};
use crate::types::Recipe;

/// Everything presentation renders, as of the last state change.
///
/// `records` are already projected through the favorite overlay.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CatalogView {
    pub records: Vec<Recipe>,
    pub suggestions: Vec<String>,
    pub connectivity: Connectivity,
    /// At least one boundary call is outstanding.
    pub loading: bool,
    /// Advisory from the last failed operation, if any.
    pub error: Option<CatalogError>,
}

impl CatalogView {
    pub fn mode(&self) -> Option<SourceMode> {
        self.connectivity.mode()
    }

    pub fn is_offline(&self) -> bool {
        self.mode() == Some(SourceMode::LocalFallback)
    }
}
