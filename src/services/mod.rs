pub mod catalog_store;
pub use catalog_store::{CatalogError, CatalogStore, SeedSummary};

pub mod catalog_store_impl;
pub use catalog_store_impl::SeaOrmCatalogStore;

pub mod credential_store;
pub use credential_store::{AuthError, CredentialStore, RegistrationError};

pub mod credential_store_impl;
pub use credential_store_impl::SeaOrmCredentialStore;
