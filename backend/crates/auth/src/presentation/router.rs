//! Auth Routers
//!
//! Two routers: the public login surface and the admin user-management
//! surface. The admin router is expected to sit behind `require_auth`;
//! role checks happen inside the use cases.

use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::domain::repository::UserRepository;
use crate::presentation::handlers::{self, AuthAppState};

/// Create the public auth router (`/api/auth`)
pub fn auth_router<R>(repo: Arc<R>, config: Arc<AuthConfig>) -> Router
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    let state = AuthAppState { repo, config };

    Router::new()
        .route("/login", post(handlers::login::<R>))
        .with_state(state)
}

/// Create the admin user-management router (`/api/admin`)
pub fn users_router<R>(repo: Arc<R>, config: Arc<AuthConfig>) -> Router
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    let state = AuthAppState { repo, config };

    Router::new()
        .route(
            "/users",
            get(handlers::list_users::<R>).post(handlers::create_user::<R>),
        )
        .route(
            "/users/{id}",
            axum::routing::delete(handlers::delete_user::<R>),
        )
        .with_state(state)
}
