use sea_orm::sea_query::OnConflict;
use sea_orm::{ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, QueryOrder, Set};

use crate::entities::{sets, themes};
use crate::models::catalog::{NewSet, SetChanges};

pub type SetWithTheme = (sets::Model, Option<themes::Model>);

pub struct SetRepository {
    conn: DatabaseConnection,
}

impl SetRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    fn active_model(set: &NewSet) -> sets::ActiveModel {
        sets::ActiveModel {
            set_num: Set(set.set_num.clone()),
            name: Set(set.name.clone()),
            year: Set(set.year),
            num_parts: Set(set.num_parts),
            theme_id: Set(set.theme_id),
            img_url: Set(set.img_url.clone()),
        }
    }

    pub async fn list_all(&self) -> Result<Vec<SetWithTheme>, DbErr> {
        sets::Entity::find()
            .order_by_asc(sets::Column::SetNum)
            .find_also_related(themes::Entity)
            .all(&self.conn)
            .await
    }

    /// Exact match on the set number. Only the first row is kept should the backend ever
    /// return several.
    pub async fn find_by_num(&self, set_num: &str) -> Result<Option<SetWithTheme>, DbErr> {
        sets::Entity::find()
            .filter(sets::Column::SetNum.eq(set_num))
            .find_also_related(themes::Entity)
            .one(&self.conn)
            .await
    }

    /// Case-insensitive substring match on the theme name. Names are folded with Unicode
    /// rules here since `SQLite`'s `lower()` only folds ASCII.
    pub async fn find_by_theme_name(&self, needle: &str) -> Result<Vec<SetWithTheme>, DbErr> {
        let needle = needle.to_lowercase();

        let theme_ids: Vec<i32> = themes::Entity::find()
            .all(&self.conn)
            .await?
            .into_iter()
            .filter(|theme| theme.name.to_lowercase().contains(&needle))
            .map(|theme| theme.id)
            .collect();

        if theme_ids.is_empty() {
            return Ok(Vec::new());
        }

        sets::Entity::find()
            .filter(sets::Column::ThemeId.is_in(theme_ids))
            .order_by_asc(sets::Column::SetNum)
            .find_also_related(themes::Entity)
            .all(&self.conn)
            .await
    }

    pub async fn insert(&self, set: &NewSet) -> Result<(), DbErr> {
        sets::Entity::insert(Self::active_model(set))
            .exec_without_returning(&self.conn)
            .await?;
        Ok(())
    }

    /// Returns the number of rows updated.
    pub async fn update(&self, set_num: &str, changes: &SetChanges) -> Result<u64, DbErr> {
        let active = sets::ActiveModel {
            name: Set(changes.name.clone()),
            year: Set(changes.year),
            num_parts: Set(changes.num_parts),
            theme_id: Set(changes.theme_id),
            img_url: Set(changes.img_url.clone()),
            ..Default::default()
        };

        let result = sets::Entity::update_many()
            .set(active)
            .filter(sets::Column::SetNum.eq(set_num))
            .exec(&self.conn)
            .await?;

        Ok(result.rows_affected)
    }

    /// Returns the number of rows removed.
    pub async fn delete(&self, set_num: &str) -> Result<u64, DbErr> {
        let result = sets::Entity::delete_many()
            .filter(sets::Column::SetNum.eq(set_num))
            .exec(&self.conn)
            .await?;

        Ok(result.rows_affected)
    }

    /// Inserts sets, overwriting rows that already carry the same set number.
    pub async fn upsert_many(&self, sets_to_write: &[NewSet]) -> Result<(), DbErr> {
        if sets_to_write.is_empty() {
            return Ok(());
        }

        sets::Entity::insert_many(sets_to_write.iter().map(Self::active_model))
            .on_conflict(
                OnConflict::column(sets::Column::SetNum)
                    .update_columns([
                        sets::Column::Name,
                        sets::Column::Year,
                        sets::Column::NumParts,
                        sets::Column::ThemeId,
                        sets::Column::ImgUrl,
                    ])
                    .to_owned(),
            )
            .exec_without_returning(&self.conn)
            .await?;

        Ok(())
    }
}
