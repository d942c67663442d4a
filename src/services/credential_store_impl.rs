//! `SeaORM` implementation of the `CredentialStore` trait.

use async_trait::async_trait;
use sea_orm::{DatabaseConnection, SqlErr};
use sea_orm_migration::MigratorTrait;
use tokio::task;
use tracing::{debug, error, info, warn};

use crate::config::{CredentialsConfig, SecurityConfig};
use crate::db::migrator::CredentialMigrator;
use crate::db::repositories::user::{UserRepository, hash_password, verify_password};
use crate::db::{self, ConnectionError};
use crate::models::user::{LoginEvent, NewUser, User, record_login};
use crate::services::credential_store::{AuthError, CredentialStore, RegistrationError};

pub struct SeaOrmCredentialStore {
    conn: DatabaseConnection,
    security: SecurityConfig,
}

impl SeaOrmCredentialStore {
    /// Wraps a connection whose schema is already in place.
    #[must_use]
    pub const fn new(conn: DatabaseConnection, security: SecurityConfig) -> Self {
        Self { conn, security }
    }

    /// Connects to the credential store and creates the users table if missing.
    pub async fn initialize(
        config: &CredentialsConfig,
        security: &SecurityConfig,
    ) -> Result<Self, ConnectionError> {
        let conn = db::connect(&config.url, config.max_connections, config.min_connections).await?;

        CredentialMigrator::up(&conn, None)
            .await
            .map_err(ConnectionError::Schema)?;

        info!("Credential store ready");
        Ok(Self::new(conn, security.clone()))
    }

    fn users(&self) -> UserRepository {
        UserRepository::new(self.conn.clone())
    }
}

#[async_trait]
impl CredentialStore for SeaOrmCredentialStore {
    async fn register_user(&self, candidate: NewUser) -> Result<(), RegistrationError> {
        if candidate.password != candidate.confirm_password {
            return Err(RegistrationError::PasswordMismatch);
        }

        if let Some(field) = candidate.missing_field() {
            return Err(RegistrationError::MissingField(field));
        }

        let password = candidate.password.clone();
        let security = self.security.clone();

        // Argon2 is CPU-bound, keep it off the async workers
        let password_hash = task::spawn_blocking(move || hash_password(&password, &security))
            .await
            .map_err(|e| {
                RegistrationError::Persistence(format!("Password hashing task failed: {e}"))
            })?
            .map_err(|e| RegistrationError::Persistence(e.to_string()))?;

        match self
            .users()
            .insert(&candidate.user_name, &password_hash, &candidate.email)
            .await
        {
            Ok(()) => {
                info!(user_name = %candidate.user_name, "Registered user");
                Ok(())
            }
            Err(err) if matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) => {
                warn!(user_name = %candidate.user_name, "Registration rejected: user name taken");
                Err(RegistrationError::DuplicateUserName(candidate.user_name))
            }
            Err(err) => {
                error!(user_name = %candidate.user_name, "Failed to store user: {err}");
                Err(RegistrationError::Persistence(err.to_string()))
            }
        }
    }

    async fn check_user(
        &self,
        user_name: &str,
        password: &str,
        client_agent: &str,
    ) -> Result<User, AuthError> {
        let users = self.users();

        let Some(model) = users
            .find_by_user_name(user_name)
            .await
            .map_err(|e| {
                error!(user_name, "Failed to look up user: {e}");
                AuthError::Persistence(e.to_string())
            })?
        else {
            warn!(user_name, "Login failed: unknown user");
            return Err(AuthError::UserNotFound(user_name.to_string()));
        };

        let id = model.id;
        let password_hash = model.password_hash.clone();
        let password = password.to_string();

        let is_valid = task::spawn_blocking(move || verify_password(&password, &password_hash))
            .await
            .map_err(|e| AuthError::Persistence(format!("Password verification task failed: {e}")))?
            .map_err(|e| AuthError::Persistence(e.to_string()))?;

        if !is_valid {
            warn!(user_name, "Login failed: incorrect password");
            return Err(AuthError::IncorrectPassword(user_name.to_string()));
        }

        let mut user = User::try_from(model).map_err(|e| {
            AuthError::Persistence(format!("Stored login history is unreadable: {e}"))
        })?;

        record_login(&mut user.login_history, LoginEvent::now(client_agent));

        users
            .update_login_history(id, &user.login_history)
            .await
            .map_err(|e| {
                error!(user_name, "Failed to record login: {e}");
                AuthError::Persistence(e.to_string())
            })?;

        debug!(user_name, history = user.login_history.len(), "Login recorded");
        Ok(user)
    }
}
