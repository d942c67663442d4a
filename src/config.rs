use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub general: GeneralConfig,

    pub server: ServerConfig,

    pub credentials: CredentialsConfig,

    pub catalog: CatalogConfig,

    pub security: SecurityConfig,

    pub quotes: QuotesConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    pub log_level: String,

    /// `pretty` or `json`
    pub log_format: String,

    /// Number of tokio worker threads (default: 2)
    /// Set to 0 to use the number of CPU cores
    pub worker_threads: usize,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: "pretty".to_string(),
            worker_threads: 2,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub port: u16,

    /// Whether to set the Secure flag on session cookies.
    /// Set to false for local development without HTTPS.
    pub secure_cookies: bool,

    /// Idle minutes before a login session expires.
    pub session_minutes: i64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 8080,
            secure_cookies: true,
            session_minutes: 60,
        }
    }
}

/// Store holding user credentials and login history.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CredentialsConfig {
    pub url: String,

    pub max_connections: u32,

    pub min_connections: u32,
}

impl Default for CredentialsConfig {
    fn default() -> Self {
        Self {
            url: "sqlite:data/credentials.db".to_string(),
            max_connections: 5,
            min_connections: 1,
        }
    }
}

impl CredentialsConfig {
    #[must_use]
    pub fn in_memory() -> Self {
        Self {
            url: "sqlite::memory:".to_string(),
            max_connections: 1,
            min_connections: 1,
        }
    }
}

/// Relational store holding themes and sets.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// Full connection URL. When set, the individual fields below are ignored.
    pub url: Option<String>,

    pub host: String,

    pub port: u16,

    pub database: String,

    pub user: String,

    pub password: String,

    /// Encrypt the connection without verifying the server certificate.
    pub accept_invalid_certs: bool,

    pub max_connections: u32,

    pub min_connections: u32,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            url: None,
            host: "localhost".to_string(),
            port: 5432,
            database: "brickshelf".to_string(),
            user: "postgres".to_string(),
            password: String::new(),
            accept_invalid_certs: true,
            max_connections: 5,
            min_connections: 1,
        }
    }
}

impl CatalogConfig {
    #[must_use]
    pub fn in_memory() -> Self {
        Self {
            url: Some("sqlite::memory:".to_string()),
            max_connections: 1,
            min_connections: 1,
            ..Self::default()
        }
    }

    /// Connection URL for the catalog, built from the individual fields unless `url` is set.
    #[must_use]
    pub fn connection_url(&self) -> String {
        if let Some(url) = self.url.as_deref().filter(|u| !u.is_empty()) {
            return url.to_string();
        }

        let ssl_mode = if self.accept_invalid_certs {
            "require"
        } else {
            "verify-full"
        };

        format!(
            "postgres://{}:{}@{}:{}/{}?sslmode={ssl_mode}",
            urlencoding::encode(&self.user),
            urlencoding::encode(&self.password),
            self.host,
            self.port,
            urlencoding::encode(&self.database),
        )
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SecurityConfig {
    /// Argon2 memory cost in KiB (default: 8192 = 8MB)
    pub argon2_memory_cost_kib: u32,

    /// Argon2 time cost (iterations)
    pub argon2_time_cost: u32,

    /// Argon2 parallelism (default: 1)
    pub argon2_parallelism: u32,
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            argon2_memory_cost_kib: 8192,
            argon2_time_cost: 3,
            argon2_parallelism: 1,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct QuotesConfig {
    pub enabled: bool,

    pub base_url: String,

    /// Request timeout in seconds (default: 5)
    pub request_timeout_seconds: u64,
}

impl Default for QuotesConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            base_url: "https://api.quotable.io".to_string(),
            request_timeout_seconds: 5,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        dotenvy::dotenv().ok();

        let mut config = Self::load_file()?;
        config.apply_env_overrides(|key| std::env::var(key).ok());
        Ok(config)
    }

    fn load_file() -> Result<Self> {
        for path in &Self::config_paths() {
            if path.exists() {
                info!("Loading config from: {}", path.display());
                return Self::load_from_path(path);
            }
        }

        info!("No config file found, using defaults");
        Ok(Self::default())
    }

    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Overrides file values with connection settings from the environment.
    pub fn apply_env_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(url) = lookup("BRICKSHELF_CREDENTIALS_URL") {
            self.credentials.url = url;
        }
        if let Some(url) = lookup("BRICKSHELF_CATALOG_URL") {
            self.catalog.url = Some(url);
        }
        if let Some(host) = lookup("PGHOST") {
            self.catalog.host = host;
        }
        if let Some(port) = lookup("PGPORT").and_then(|p| p.parse().ok()) {
            self.catalog.port = port;
        }
        if let Some(database) = lookup("PGDATABASE") {
            self.catalog.database = database;
        }
        if let Some(user) = lookup("PGUSER") {
            self.catalog.user = user;
        }
        if let Some(password) = lookup("PGPASSWORD") {
            self.catalog.password = password;
        }
        if let Some(port) = lookup("PORT").and_then(|p| p.parse().ok()) {
            self.server.port = port;
        }
    }

    fn config_paths() -> Vec<PathBuf> {
        let mut paths = vec![PathBuf::from("config.toml")];

        if let Some(config_dir) = dirs::config_dir() {
            paths.push(config_dir.join("brickshelf").join("config.toml"));
        }

        if let Some(home) = dirs::home_dir() {
            paths.push(home.join(".brickshelf").join("config.toml"));
        }

        paths
    }

    pub fn validate(&self) -> Result<()> {
        if self.credentials.url.trim().is_empty() {
            anyhow::bail!("Credentials store URL cannot be empty");
        }

        if self.catalog.url.as_deref().is_none_or(str::is_empty)
            && (self.catalog.host.is_empty() || self.catalog.database.is_empty())
        {
            anyhow::bail!("Catalog store needs either a URL or a host and database name");
        }

        for (name, max, min) in [
            (
                "credentials",
                self.credentials.max_connections,
                self.credentials.min_connections,
            ),
            (
                "catalog",
                self.catalog.max_connections,
                self.catalog.min_connections,
            ),
        ] {
            if max == 0 || min > max {
                anyhow::bail!("Invalid {name} pool size: min {min}, max {max}");
            }
        }

        argon2::Params::new(
            self.security.argon2_memory_cost_kib,
            self.security.argon2_time_cost,
            self.security.argon2_parallelism,
            None,
        )
        .map_err(|e| anyhow::anyhow!("Invalid Argon2 params: {e}"))?;

        Ok(())
    }
}
