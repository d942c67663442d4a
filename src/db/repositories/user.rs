use anyhow::Result;
use argon2::{
    Algorithm, Argon2, Params, Version,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use sea_orm::sea_query::Expr;
use sea_orm::{ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, Set};

use crate::config::SecurityConfig;
use crate::entities::users;
use crate::models::user::LoginEvent;

pub struct UserRepository {
    conn: DatabaseConnection,
}

impl UserRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    /// Inserts a user with an empty login history. A taken user name surfaces as the
    /// backend's unique-constraint error.
    pub async fn insert(
        &self,
        user_name: &str,
        password_hash: &str,
        email: &str,
    ) -> Result<(), DbErr> {
        let active = users::ActiveModel {
            user_name: Set(user_name.to_string()),
            password_hash: Set(password_hash.to_string()),
            email: Set(email.to_string()),
            login_history: Set("[]".to_string()),
            created_at: Set(chrono::Utc::now().to_rfc3339()),
            ..Default::default()
        };

        users::Entity::insert(active)
            .exec_without_returning(&self.conn)
            .await?;

        Ok(())
    }

    /// Get user by user name, including the password hash
    pub async fn find_by_user_name(&self, user_name: &str) -> Result<Option<users::Model>, DbErr> {
        users::Entity::find()
            .filter(users::Column::UserName.eq(user_name))
            .one(&self.conn)
            .await
    }

    /// Replaces the stored login history of one user.
    pub async fn update_login_history(&self, id: i32, history: &[LoginEvent]) -> Result<(), DbErr> {
        let json = serde_json::to_string(history).map_err(|e| DbErr::Custom(e.to_string()))?;

        let result = users::Entity::update_many()
            .col_expr(users::Column::LoginHistory, Expr::value(json))
            .filter(users::Column::Id.eq(id))
            .exec(&self.conn)
            .await?;

        if result.rows_affected == 0 {
            return Err(DbErr::RecordNotUpdated);
        }

        Ok(())
    }
}

/// Hash a password using Argon2id with a fresh random salt.
pub fn hash_password(password: &str, config: &SecurityConfig) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);

    let params = Params::new(
        config.argon2_memory_cost_kib,
        config.argon2_time_cost,
        config.argon2_parallelism,
        None, // output length (use default)
    )
    .map_err(|e| anyhow::anyhow!("Invalid Argon2 params: {e}"))?;

    let hash = Argon2::new(Algorithm::Argon2id, Version::V0x13, params)
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| anyhow::anyhow!("Failed to hash password: {e}"))?;

    Ok(hash.to_string())
}

/// Checks `password` against a stored PHC hash string. The parameters are read from the
/// hash itself, so hashes made under older settings keep verifying.
pub fn verify_password(password: &str, password_hash: &str) -> Result<bool> {
    let parsed_hash = PasswordHash::new(password_hash)
        .map_err(|e| anyhow::anyhow!("Invalid password hash format: {e}"))?;

    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fast_params() -> SecurityConfig {
        SecurityConfig {
            argon2_memory_cost_kib: 1024,
            argon2_time_cost: 1,
            argon2_parallelism: 1,
        }
    }

    #[test]
    fn test_hash_is_salted_and_verifies() {
        let first = hash_password("p1", &fast_params()).unwrap();
        let second = hash_password("p1", &fast_params()).unwrap();

        assert_ne!(first, second);
        assert!(first.starts_with("$argon2id$"));
        assert!(verify_password("p1", &first).unwrap());
        assert!(verify_password("p1", &second).unwrap());
        assert!(!verify_password("wrong", &first).unwrap());
    }

    #[test]
    fn test_verify_rejects_malformed_hash() {
        assert!(verify_password("p1", "p1").is_err());
    }
}
