//! Auth (Authentication & User Administration) Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - User entity, repository trait, admin policy
//! - `application/` - Use cases (login, user administration)
//! - `infra/` - Database implementations
//! - `presentation/` - HTTP handlers, DTOs, router, middleware
//!
//! ## Features
//! - Login with username + password, returning a signed bearer token
//! - Admin-only user management (list, create, delete)
//! - Bearer-token middleware producing the caller identity for
//!   downstream handlers
//!
//! ## Security Model
//! - Passwords hashed with Argon2id (NIST SP 800-63B compliant)
//! - Tokens are HMAC-SHA256 signed claims with expiry; the server keeps
//!   no session state
//! - Unknown user and wrong password are indistinguishable to callers

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use application::config::AuthConfig;
pub use error::{AuthError, AuthResult};
pub use infra::postgres::PgUserRepository;
pub use presentation::middleware::{AuthLayerState, require_auth};
pub use presentation::router::{auth_router, users_router};
