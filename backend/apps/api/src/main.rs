//! API Server Entry Point
//!
//! Application entry point and server initialization.
//! Uses `anyhow` for startup errors, but application-level
//! errors should use `kernel::error::AppError`.

use auth::domain::entities::NewUser;
use auth::domain::repository::UserRepository;
use auth::{AuthConfig, AuthLayerState, PgUserRepository, auth_router, require_auth, users_router};
use axum::{
    Router, http,
    http::{Method, header},
    middleware,
};
use base64::Engine;
use base64::engine::general_purpose;
use cards::{PgCardRepository, cards_router};
use kernel::identity::Role;
use platform::password::ClearTextPassword;
use sqlx::postgres::PgPoolOptions;
use std::env;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::{AllowHeaders, AllowMethods, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "api=info,auth=info,cards=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Database connection
    let database_url = env::var("DATABASE_URL").expect("DATABASE_URL must be set in environment");

    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&database_url)
        .await?;

    tracing::info!("Connected to database");

    // Run migrations
    sqlx::migrate!("../../../database/migrations")
        .run(&pool)
        .await?;

    tracing::info!("Migrations completed");

    // Auth configuration
    let auth_config = if cfg!(debug_assertions) {
        AuthConfig::development()
    } else {
        // In production, load secret from environment
        let secret_b64 =
            env::var("AUTH_TOKEN_SECRET").expect("AUTH_TOKEN_SECRET must be set in production");
        let secret_bytes = Engine::decode(&general_purpose::STANDARD, &secret_b64)?;
        anyhow::ensure!(
            secret_bytes.len() == 32,
            "AUTH_TOKEN_SECRET must decode to 32 bytes"
        );
        let mut secret = [0u8; 32];
        secret.copy_from_slice(&secret_bytes);
        AuthConfig {
            token_secret: secret,
            ..AuthConfig::default()
        }
    };

    // Optional application-wide password pepper
    let auth_config = match env::var("PASSWORD_PEPPER") {
        Ok(pepper_b64) => AuthConfig {
            password_pepper: Some(Engine::decode(&general_purpose::STANDARD, &pepper_b64)?),
            ..auth_config
        },
        Err(_) => auth_config,
    };

    let auth_config = Arc::new(auth_config);

    let user_repo = Arc::new(PgUserRepository::new(pool.clone()));
    let card_repo = Arc::new(PgCardRepository::new(pool.clone()));

    bootstrap_admin(&user_repo, &auth_config).await;

    // CORS configuration
    let frontend_origins = env::var("FRONTEND_ORIGINS")
        .unwrap_or_else(|_| "http://localhost:3000,http://127.0.0.1:3000".to_string());

    let allowed_origins: Vec<http::HeaderValue> = frontend_origins
        .split(',')
        .filter_map(|origin| origin.trim().parse().ok())
        .collect();

    let cors = CorsLayer::new()
        .allow_origin(allowed_origins)
        .allow_methods(AllowMethods::list([
            Method::GET,
            Method::POST,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ]))
        .allow_headers(AllowHeaders::list([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            header::ACCEPT,
        ]))
        .allow_credentials(true);

    // Everything except login requires a valid bearer token
    let protected = Router::new()
        .nest("/api/cards", cards_router(card_repo))
        .nest("/api/admin", users_router(user_repo.clone(), auth_config.clone()))
        .layer(middleware::from_fn_with_state(
            AuthLayerState::new(auth_config.signer()),
            require_auth,
        ));

    // Build router
    let app = Router::new()
        .nest("/api/auth", auth_router(user_repo, auth_config))
        .merge(protected)
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], 8080));
    tracing::info!("Listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}

/// Create the first admin account from ADMIN_USERNAME / ADMIN_PASSWORD
/// when no admin exists yet.
///
/// Failures are logged and do not prevent server startup.
async fn bootstrap_admin(repo: &Arc<PgUserRepository>, config: &Arc<AuthConfig>) {
    match repo.admin_exists().await {
        Ok(true) => return,
        Ok(false) => {}
        Err(e) => {
            tracing::warn!(error = %e, "Admin bootstrap check failed, continuing anyway");
            return;
        }
    }

    let (Ok(username), Ok(password)) = (env::var("ADMIN_USERNAME"), env::var("ADMIN_PASSWORD"))
    else {
        tracing::warn!("No admin account exists and ADMIN_USERNAME/ADMIN_PASSWORD are not set");
        return;
    };

    let result = async {
        let password_hash = ClearTextPassword::new(password)?.hash(config.pepper())?;
        repo.create(&NewUser {
            username: username.clone(),
            password_hash,
            role: Role::Admin,
        })
        .await
        .map_err(anyhow::Error::from)
    }
    .await;

    match result {
        Ok(user) => tracing::info!(username = %user.username, "Bootstrap admin created"),
        Err(e) => tracing::warn!(error = %e, "Bootstrap admin creation failed, continuing anyway"),
    }
}
