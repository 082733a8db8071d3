//! HTTP API server

use axum::http::{header, HeaderValue, Method};
use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tokio::sync::RwLock;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::auth::models::{Role, User};
use crate::auth::password::hash_password;
use crate::books::Catalog;
use crate::config::Config;
use crate::error::Result;
use crate::store::UserStore;

use super::routes;

/// Application state shared across handlers
pub struct AppState {
    pub config: Config,
    pub users: UserStore,
    pub books: Catalog,
}

pub type SharedState = Arc<RwLock<AppState>>;

/// Run the HTTP API server
pub async fn run_server(config: Config, host: &str, port: u16) -> Result<()> {
    let users = UserStore::new();
    let books = Catalog::new();

    seed_admin(&config, &users).await?;

    let cors_origin = config.server.cors_origin.clone();
    let state = Arc::new(RwLock::new(AppState {
        config,
        users,
        books,
    }));

    let app = create_router(state, cors_origin.as_deref());

    let addr = format!("{}:{}", host, port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}

/// Seed the configured admin account, if any.
///
/// Registration only ever creates regular users, so this is the supported
/// way to provision an admin.
async fn seed_admin(config: &Config, users: &UserStore) -> Result<()> {
    let (Some(email), Some(password)) = (&config.auth.admin_email, &config.auth.admin_password)
    else {
        return Ok(());
    };

    let user = User::new(email.clone(), hash_password(password)?, Role::Admin);
    users.insert(user).await?;
    tracing::info!(email = %email, "Seeded admin account");
    Ok(())
}

/// Create the router with all routes
pub fn create_router(state: SharedState, cors_origin: Option<&str>) -> Router {
    Router::new()
        // Public routes
        .route("/health", get(routes::health))
        .route("/register", post(routes::register))
        .route("/login", post(routes::login))
        // Protected routes - handlers authenticate and check roles
        .route("/books", get(routes::list_books))
        .route("/books", post(routes::create_book))
        // Session routes
        .route("/refresh_token", post(routes::refresh_token))
        .route("/logout", post(routes::logout))
        // Middleware
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(cors_origin))
        .with_state(state)
}

/// Build the CORS layer. A configured origin gets credentials support so the
/// refresh cookie can cross origins; otherwise anything goes, without
/// credentials.
fn cors_layer(origin: Option<&str>) -> CorsLayer {
    match origin.and_then(|o| o.parse::<HeaderValue>().ok()) {
        Some(origin) => CorsLayer::new()
            .allow_origin(origin)
            .allow_credentials(true)
            .allow_methods([Method::GET, Method::POST])
            .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]),
        None => CorsLayer::permissive(),
    }
}
