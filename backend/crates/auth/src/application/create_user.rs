//! Create User Use Case (admin only)

use std::sync::Arc;

use kernel::identity::{Caller, Role};
use platform::password::ClearTextPassword;

use crate::application::config::AuthConfig;
use crate::domain::entities::{NewUser, User};
use crate::domain::policy::ensure_admin;
use crate::domain::repository::UserRepository;
use crate::error::{AuthError, AuthResult};

/// Create user input
pub struct CreateUserInput {
    pub username: String,
    pub password: String,
    /// Role code ("USER" / "ADMIN")
    pub role: String,
}

/// Create user use case
pub struct CreateUserUseCase<R>
where
    R: UserRepository,
{
    user_repo: Arc<R>,
    config: Arc<AuthConfig>,
}

impl<R> CreateUserUseCase<R>
where
    R: UserRepository,
{
    pub fn new(user_repo: Arc<R>, config: Arc<AuthConfig>) -> Self {
        Self { user_repo, config }
    }

    pub async fn execute(&self, caller: &Caller, input: CreateUserInput) -> AuthResult<User> {
        ensure_admin(caller, "create users")?;

        let username = input.username.trim();
        if username.is_empty() {
            return Err(AuthError::Validation("Username is required".to_string()));
        }

        let role = Role::from_code(&input.role).ok_or_else(|| {
            AuthError::Validation(format!("Unknown role: {} (expected USER or ADMIN)", input.role))
        })?;

        let password = ClearTextPassword::new(input.password)?;
        let password_hash = password.hash(self.config.pepper())?;

        let user = self
            .user_repo
            .create(&NewUser {
                username: username.to_string(),
                password_hash,
                role,
            })
            .await?;

        tracing::info!(user_id = user.id, username = %user.username, role = %user.role, "User created");

        Ok(user)
    }
}
