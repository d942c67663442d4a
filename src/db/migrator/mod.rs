use sea_orm_migration::prelude::*;

mod m20240701_create_catalog;
mod m20240708_create_users;

/// Schema of the relational catalog store.
pub struct CatalogMigrator;

#[async_trait::async_trait]
impl MigratorTrait for CatalogMigrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![Box::new(m20240701_create_catalog::Migration)]
    }

    fn migration_table_name() -> DynIden {
        Alias::new("catalog_migrations").into_iden()
    }
}

/// Schema of the credential store.
pub struct CredentialMigrator;

#[async_trait::async_trait]
impl MigratorTrait for CredentialMigrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![Box::new(m20240708_create_users::Migration)]
    }

    fn migration_table_name() -> DynIden {
        Alias::new("credential_migrations").into_iden()
    }
}
