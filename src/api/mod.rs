use anyhow::Context;
use axum::{
    Router, middleware,
    routing::{get, post},
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tower_sessions::{Expiry, MemoryStore, SessionManagerLayer};

use crate::clients::quotable::QuoteClient;
use crate::config::{Config, ServerConfig};
use crate::services::{CatalogStore, CredentialStore, SeaOrmCatalogStore, SeaOrmCredentialStore};

pub mod auth;
mod error;
pub mod sets;
mod types;

pub use error::ApiError;
pub use types::*;

#[derive(Clone)]
pub struct AppState {
    pub credentials: Arc<dyn CredentialStore>,

    pub catalog: Arc<dyn CatalogStore>,

    pub quotes: Option<QuoteClient>,
}

/// Brings both stores to the ready state. A failure here is fatal to the process.
pub async fn create_app_state_from_config(config: &Config) -> anyhow::Result<Arc<AppState>> {
    let credentials = SeaOrmCredentialStore::initialize(&config.credentials, &config.security)
        .await
        .context("Failed to initialize credential store")?;

    let catalog = SeaOrmCatalogStore::initialize(&config.catalog)
        .await
        .context("Failed to initialize catalog store")?;

    let quotes = if config.quotes.enabled {
        Some(QuoteClient::new(&config.quotes)?)
    } else {
        None
    };

    Ok(Arc::new(AppState {
        credentials: Arc::new(credentials),
        catalog: Arc::new(catalog),
        quotes,
    }))
}

pub fn router(state: Arc<AppState>, server: &ServerConfig) -> Router {
    let session_layer = SessionManagerLayer::new(MemoryStore::default())
        .with_secure(server.secure_cookies)
        .with_same_site(tower_sessions::cookie::SameSite::Lax)
        .with_expiry(Expiry::OnInactivity(time::Duration::minutes(
            server.session_minutes,
        )));

    let protected_routes = Router::new()
        .route("/lego/sets", post(sets::add_set))
        .route(
            "/lego/sets/{num}",
            axum::routing::put(sets::edit_set).delete(sets::delete_set),
        )
        .route("/user/history", get(auth::login_history))
        .route_layer(middleware::from_fn(auth::require_login));

    let api_router = Router::new()
        .merge(protected_routes)
        .route("/lego/sets", get(sets::list_sets))
        .route("/lego/sets/{num}", get(sets::get_set))
        .route("/lego/themes", get(sets::list_themes))
        .route("/register", post(auth::register))
        .route("/login", post(auth::login))
        .route("/logout", post(auth::logout))
        .layer(session_layer)
        .with_state(state);

    Router::new()
        .nest("/api", api_router)
        .layer(TraceLayer::new_for_http())
}
