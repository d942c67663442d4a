use sea_orm::sea_query::OnConflict;
use sea_orm::{ActiveModelTrait, DatabaseConnection, DbErr, EntityTrait, QueryOrder, Set};

use crate::entities::themes;
use crate::models::catalog::Theme;

pub struct ThemeRepository {
    conn: DatabaseConnection,
}

impl ThemeRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn list_all(&self) -> Result<Vec<themes::Model>, DbErr> {
        themes::Entity::find()
            .order_by_asc(themes::Column::Id)
            .all(&self.conn)
            .await
    }

    /// Inserts a theme under the next free id.
    pub async fn insert(&self, name: &str) -> Result<themes::Model, DbErr> {
        themes::ActiveModel {
            name: Set(name.to_string()),
            ..Default::default()
        }
        .insert(&self.conn)
        .await
    }

    /// Inserts themes with their given ids, renaming rows whose id already exists.
    pub async fn upsert_many(&self, themes_to_write: &[Theme]) -> Result<(), DbErr> {
        if themes_to_write.is_empty() {
            return Ok(());
        }

        let models = themes_to_write.iter().map(|theme| themes::ActiveModel {
            id: Set(theme.id),
            name: Set(theme.name.clone()),
        });

        themes::Entity::insert_many(models)
            .on_conflict(
                OnConflict::column(themes::Column::Id)
                    .update_column(themes::Column::Name)
                    .to_owned(),
            )
            .exec_without_returning(&self.conn)
            .await?;

        Ok(())
    }
}
