//! Domain service for the set catalog.

use serde::Serialize;
use thiserror::Error;

use crate::models::catalog::{LegoSet, NewSet, SetChanges, Theme, ValidationErrors};

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("{0}")]
    NotAvailable(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Validation(ValidationErrors),

    #[error("{0}")]
    Persistence(String),
}

impl From<ValidationErrors> for CatalogError {
    fn from(errors: ValidationErrors) -> Self {
        Self::Validation(errors)
    }
}

/// Row counts written by [`CatalogStore::seed`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SeedSummary {
    pub themes: usize,
    pub sets: usize,
}

/// Domain service trait for the catalog.
#[async_trait::async_trait]
pub trait CatalogStore: Send + Sync {
    /// Every set with its theme. An empty catalog is not an error.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::NotAvailable`] on backend failure.
    async fn get_all_sets(&self) -> Result<Vec<LegoSet>, CatalogError>;

    /// # Errors
    ///
    /// Returns [`CatalogError::NotFound`] if no set has this number.
    async fn get_set_by_num(&self, set_num: &str) -> Result<LegoSet, CatalogError>;

    /// Sets whose theme name contains `theme`, ignoring case.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::NotFound`] if nothing matches.
    async fn get_sets_by_theme(&self, theme: &str) -> Result<Vec<LegoSet>, CatalogError>;

    /// The theme id is not checked against existing themes here; the backend's foreign key
    /// decides.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Validation`] with every message collected.
    async fn add_set(&self, set: NewSet) -> Result<(), CatalogError>;

    async fn get_all_themes(&self) -> Result<Vec<Theme>, CatalogError>;

    /// # Errors
    ///
    /// Returns [`CatalogError::NotFound`] when no row matched and
    /// [`CatalogError::Validation`] when the write was rejected.
    async fn edit_set(&self, set_num: &str, changes: SetChanges) -> Result<(), CatalogError>;

    /// Idempotent: removing a set that does not exist succeeds.
    async fn delete_set(&self, set_num: &str) -> Result<(), CatalogError>;

    /// Adds a theme under the next free id.
    async fn add_theme(&self, name: &str) -> Result<Theme, CatalogError>;

    /// Bulk-loads themes (ids kept) then sets, overwriting existing rows with the same key.
    async fn seed(
        &self,
        themes: Vec<Theme>,
        sets: Vec<NewSet>,
    ) -> Result<SeedSummary, CatalogError>;
}
