//! Seed command handler

use anyhow::Context;
use serde::de::DeserializeOwned;
use std::path::Path;

use crate::config::Config;
use crate::models::catalog::{NewSet, Theme};
use crate::services::{CatalogStore, SeaOrmCatalogStore};

pub async fn cmd_seed(config: &Config, themes_path: &Path, sets_path: &Path) -> anyhow::Result<()> {
    let themes: Vec<Theme> = read_seed_file(themes_path).await?;
    let sets: Vec<NewSet> = read_seed_file(sets_path).await?;

    let store = SeaOrmCatalogStore::initialize(&config.catalog).await?;
    let summary = store.seed(themes, sets).await?;

    println!("✓ Seeded {} themes and {} sets", summary.themes, summary.sets);
    Ok(())
}

pub async fn read_seed_file<T: DeserializeOwned>(path: &Path) -> anyhow::Result<Vec<T>> {
    let content = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read seed file: {}", path.display()))?;

    serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse seed file: {}", path.display()))
}
