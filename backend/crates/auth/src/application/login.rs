//! Login Use Case
//!
//! Authenticates a user and issues a signed bearer token.

use std::sync::Arc;

use chrono::Utc;
use kernel::identity::Role;
use platform::password::ClearTextPassword;
use platform::token::Claims;

use crate::application::config::AuthConfig;
use crate::domain::repository::UserRepository;
use crate::error::{AuthError, AuthResult};

/// Login input
pub struct LoginInput {
    pub username: String,
    pub password: String,
}

/// Login output
pub struct LoginOutput {
    /// Signed bearer token
    pub token: String,
    pub username: String,
    pub role: Role,
}

/// Login use case
pub struct LoginUseCase<R>
where
    R: UserRepository,
{
    user_repo: Arc<R>,
    config: Arc<AuthConfig>,
}

impl<R> LoginUseCase<R>
where
    R: UserRepository,
{
    pub fn new(user_repo: Arc<R>, config: Arc<AuthConfig>) -> Self {
        Self { user_repo, config }
    }

    pub async fn execute(&self, input: LoginInput) -> AuthResult<LoginOutput> {
        let user = self
            .user_repo
            .find_by_username(&input.username)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        // Policy violations here mean the password cannot be the stored
        // one; answer the same as a wrong password
        let password =
            ClearTextPassword::new(input.password).map_err(|_| AuthError::InvalidCredentials)?;

        if !user.password_hash.verify(&password, self.config.pepper()) {
            return Err(AuthError::InvalidCredentials);
        }

        let claims = Claims {
            sub: user.username.clone(),
            role: user.role.code().to_string(),
            exp_ms: Utc::now().timestamp_millis() + self.config.token_ttl_ms(),
        };
        let token = self.config.signer().issue(&claims);

        tracing::info!(username = %user.username, role = %user.role, "User logged in");

        Ok(LoginOutput {
            token,
            username: user.username,
            role: user.role,
        })
    }
}
