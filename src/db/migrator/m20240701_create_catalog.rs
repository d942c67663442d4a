use crate::entities::prelude::*;
use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_orm::Schema;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let backend = manager.get_database_backend();
        let schema = Schema::new(backend);

        manager
            .create_table(
                schema
                    .create_table_from_entity(Themes)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        // sets.theme_id references themes.id; rows are never cascaded.
        manager
            .create_table(
                schema
                    .create_table_from_entity(Sets)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Sets).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Themes).to_owned())
            .await?;

        Ok(())
    }
}
