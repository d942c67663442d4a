//! `SeaORM` implementation of the `CatalogStore` trait.

use async_trait::async_trait;
use sea_orm::{DatabaseConnection, DbErr, SqlErr};
use sea_orm_migration::MigratorTrait;
use tracing::{debug, error, info, warn};

use crate::config::CatalogConfig;
use crate::db::migrator::CatalogMigrator;
use crate::db::repositories::set::SetRepository;
use crate::db::repositories::theme::ThemeRepository;
use crate::db::{self, ConnectionError};
use crate::models::catalog::{LegoSet, NewSet, SetChanges, Theme, ValidationErrors};
use crate::services::catalog_store::{CatalogError, CatalogStore, SeedSummary};

pub struct SeaOrmCatalogStore {
    conn: DatabaseConnection,
}

impl SeaOrmCatalogStore {
    /// Wraps a connection whose schema is already in place.
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    /// Connects to the catalog and creates the theme and set tables if missing.
    pub async fn initialize(config: &CatalogConfig) -> Result<Self, ConnectionError> {
        let conn = db::connect(
            &config.connection_url(),
            config.max_connections,
            config.min_connections,
        )
        .await?;

        CatalogMigrator::up(&conn, None)
            .await
            .map_err(ConnectionError::Schema)?;

        info!("Catalog store ready");
        Ok(Self::new(conn))
    }

    fn sets(&self) -> SetRepository {
        SetRepository::new(self.conn.clone())
    }

    fn themes(&self) -> ThemeRepository {
        ThemeRepository::new(self.conn.clone())
    }
}

/// Maps a rejected write to the message shown for it.
fn write_rejection(err: &DbErr) -> ValidationErrors {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => {
            ValidationErrors::single("set_num must be unique")
        }
        Some(SqlErr::ForeignKeyConstraintViolation(_)) => {
            ValidationErrors::single("theme_id must reference an existing theme")
        }
        _ => ValidationErrors::single(err.to_string()),
    }
}

#[async_trait]
impl CatalogStore for SeaOrmCatalogStore {
    async fn get_all_sets(&self) -> Result<Vec<LegoSet>, CatalogError> {
        let rows = self.sets().list_all().await.map_err(|e| {
            error!("Failed to list sets: {e}");
            CatalogError::NotAvailable("No sets available.".to_string())
        })?;

        Ok(rows.into_iter().map(LegoSet::from).collect())
    }

    async fn get_set_by_num(&self, set_num: &str) -> Result<LegoSet, CatalogError> {
        let not_found = || CatalogError::NotFound("Unable to find requested set".to_string());

        let row = self.sets().find_by_num(set_num).await.map_err(|e| {
            warn!(set_num, "Failed to look up set: {e}");
            not_found()
        })?;

        row.map(LegoSet::from).ok_or_else(not_found)
    }

    async fn get_sets_by_theme(&self, theme: &str) -> Result<Vec<LegoSet>, CatalogError> {
        let not_found = || CatalogError::NotFound("Unable to find requested sets".to_string());

        let rows = self.sets().find_by_theme_name(theme).await.map_err(|e| {
            warn!(theme, "Failed to look up sets by theme: {e}");
            not_found()
        })?;

        if rows.is_empty() {
            return Err(not_found());
        }

        Ok(rows.into_iter().map(LegoSet::from).collect())
    }

    async fn add_set(&self, set: NewSet) -> Result<(), CatalogError> {
        set.validate()?;

        self.sets().insert(&set).await.map_err(|e| {
            warn!(set_num = %set.set_num, "Set rejected: {e}");
            CatalogError::Validation(write_rejection(&e))
        })?;

        info!(set_num = %set.set_num, "Added set");
        Ok(())
    }

    async fn get_all_themes(&self) -> Result<Vec<Theme>, CatalogError> {
        let rows = self.themes().list_all().await.map_err(|e| {
            error!("Failed to list themes: {e}");
            CatalogError::NotAvailable("Unable to retrieve themes.".to_string())
        })?;

        Ok(rows.into_iter().map(Theme::from).collect())
    }

    async fn edit_set(&self, set_num: &str, changes: SetChanges) -> Result<(), CatalogError> {
        changes.validate()?;

        let updated = self.sets().update(set_num, &changes).await.map_err(|e| {
            warn!(set_num, "Set update rejected: {e}");
            CatalogError::Validation(write_rejection(&e))
        })?;

        if updated == 0 {
            return Err(CatalogError::NotFound(
                "No set found with the specified set_num.".to_string(),
            ));
        }

        info!(set_num, "Updated set");
        Ok(())
    }

    async fn delete_set(&self, set_num: &str) -> Result<(), CatalogError> {
        let removed = self.sets().delete(set_num).await.map_err(|e| {
            error!(set_num, "Failed to delete set: {e}");
            CatalogError::Persistence(e.to_string())
        })?;

        debug!(set_num, removed, "Delete set");
        Ok(())
    }

    async fn add_theme(&self, name: &str) -> Result<Theme, CatalogError> {
        if name.trim().is_empty() {
            return Err(ValidationErrors::single("name cannot be empty").into());
        }

        let model = self
            .themes()
            .insert(name)
            .await
            .map_err(|e| CatalogError::Persistence(e.to_string()))?;

        info!(id = model.id, name, "Added theme");
        Ok(Theme::from(model))
    }

    async fn seed(
        &self,
        themes: Vec<Theme>,
        sets: Vec<NewSet>,
    ) -> Result<SeedSummary, CatalogError> {
        let mut errors = Vec::new();
        for set in &sets {
            if let Err(e) = set.validate() {
                errors.extend(
                    e.messages()
                        .iter()
                        .map(|m| format!("{}: {m}", set.set_num)),
                );
            }
        }
        if !errors.is_empty() {
            return Err(CatalogError::Validation(ValidationErrors::from(errors)));
        }

        self.themes()
            .upsert_many(&themes)
            .await
            .map_err(|e| CatalogError::Persistence(e.to_string()))?;

        self.sets()
            .upsert_many(&sets)
            .await
            .map_err(|e| CatalogError::Validation(write_rejection(&e)))?;

        let summary = SeedSummary {
            themes: themes.len(),
            sets: sets.len(),
        };
        info!(themes = summary.themes, sets = summary.sets, "Seeded catalog");
        Ok(summary)
    }
}
