//! List command handlers

use crate::config::Config;
use crate::services::{CatalogError, CatalogStore, SeaOrmCatalogStore};

pub async fn cmd_list_themes(config: &Config) -> anyhow::Result<()> {
    let store = SeaOrmCatalogStore::initialize(&config.catalog).await?;
    let themes = store.get_all_themes().await?;

    if themes.is_empty() {
        println!("No themes in the catalog.");
        println!();
        println!("Load some with: brickshelf seed --themes themes.json --sets sets.json");
        return Ok(());
    }

    println!("Themes ({} total)", themes.len());
    println!("{:-<50}", "");
    for theme in themes {
        println!("{:>6}  {}", theme.id, theme.name);
    }

    Ok(())
}

pub async fn cmd_list_sets(config: &Config, theme: Option<&str>) -> anyhow::Result<()> {
    let store = SeaOrmCatalogStore::initialize(&config.catalog).await?;

    let result = match theme {
        Some(theme) => store.get_sets_by_theme(theme).await,
        None => store.get_all_sets().await,
    };

    let sets = match result {
        Ok(sets) => sets,
        Err(CatalogError::NotFound(msg)) => {
            println!("{msg}");
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };

    println!("Sets ({} total)", sets.len());
    println!("{:-<70}", "");
    for set in sets {
        let theme_name = set.theme.as_ref().map_or("?", |t| t.name.as_str());
        println!("{} {} ({})", set.set_num, set.name, set.year);
        println!("  Theme: {} | Parts: {}", theme_name, set.num_parts);
    }

    Ok(())
}
