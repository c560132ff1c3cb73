//! # iam_api
//!
//! HTTP API library for the IAM service: a thin axum adapter over
//! `iam_core`'s auth workflow and user store.

pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod validation;

use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use iam_core::auth::jwt::TokenManager;
use iam_core::auth::service::AuthService;
use iam_core::config::ConfigError;
use iam_core::store::{MemoryUserStore, UserStore};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::ApiConfig;
use crate::handlers::{auth, health, users};

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Auth workflow, holding the user store and token manager.
    pub auth: AuthService,
    /// API configuration.
    pub config: ApiConfig,
}

impl AppState {
    /// Build state with a fresh in-memory user store.
    pub fn new(config: ApiConfig) -> Result<Self, ConfigError> {
        let store = Arc::new(MemoryUserStore::with_bcrypt_cost(config.bcrypt_cost));
        Self::with_store(config, store)
    }

    /// Build state around an existing user store.
    pub fn with_store(config: ApiConfig, store: Arc<dyn UserStore>) -> Result<Self, ConfigError> {
        let tokens = TokenManager::new(config.auth.clone())?;
        Ok(Self {
            auth: AuthService::new(store, tokens),
            config,
        })
    }
}

/// Builds the Axum router with all routes and shared state.
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Public routes (signout/refresh validate their own bearer token)
    let public = Router::new()
        .route(routes::GET_HEALTH, get(health::health_handler))
        .route(routes::POST_AUTH_SIGNUP, post(auth::signup_handler))
        .route(routes::POST_AUTH_SIGNIN, post(auth::signin_handler))
        .route(routes::POST_AUTH_SIGNOUT, post(auth::signout_handler))
        .route(routes::POST_AUTH_REFRESH, post(auth::refresh_handler));

    // Protected routes (require an access token)
    let protected = Router::new()
        .route(
            routes::USERS,
            get(users::list_users_handler).post(users::create_user_handler),
        )
        .route(routes::USERS_ID, get(users::get_user_handler))
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            middleware::auth::require_auth,
        ));

    let mut app = Router::new().merge(public).merge(protected).layer(cors);
    if state.config.request_logging {
        app = app.layer(TraceLayer::new_for_http());
    }
    app.with_state(state)
}
