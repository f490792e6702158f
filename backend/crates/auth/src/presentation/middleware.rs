//! Auth Middleware
//!
//! Verifies the bearer token on protected routes and hands the caller
//! identity to downstream handlers via a request extension.

use axum::body::Body;
use axum::extract::State;
use axum::http::{Request, header};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use kernel::identity::{Caller, Role};
use platform::token::TokenSigner;

use crate::error::AuthError;

/// Middleware state
#[derive(Clone)]
pub struct AuthLayerState {
    pub signer: TokenSigner,
}

impl AuthLayerState {
    pub fn new(signer: TokenSigner) -> Self {
        Self { signer }
    }
}

/// Middleware that requires a valid bearer token
///
/// On success the request carries a [`Caller`] extension.
pub async fn require_auth(
    State(state): State<AuthLayerState>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, Response> {
    let token = bearer_token(&req).ok_or_else(|| AuthError::TokenInvalid.into_response())?;

    let claims = state
        .signer
        .verify(&token)
        .map_err(|e| AuthError::from(e).into_response())?;

    let role = Role::from_code(&claims.role)
        .ok_or_else(|| AuthError::TokenInvalid.into_response())?;

    req.extensions_mut().insert(Caller::new(claims.sub, role));

    Ok(next.run(req).await)
}

fn bearer_token(req: &Request<Body>) -> Option<String> {
    let value = req.headers().get(header::AUTHORIZATION)?.to_str().ok()?;
    value
        .strip_prefix("Bearer ")
        .map(|token| token.trim().to_string())
}
