//! Delete User Use Case (admin only)
//!
//! Deleting an absent id fails with `UserNotFound`; card deletion uses
//! the same policy so both delete operations behave alike.

use std::sync::Arc;

use kernel::identity::Caller;

use crate::domain::policy::ensure_admin;
use crate::domain::repository::UserRepository;
use crate::error::{AuthError, AuthResult};

/// Delete user use case
pub struct DeleteUserUseCase<R>
where
    R: UserRepository,
{
    user_repo: Arc<R>,
}

impl<R> DeleteUserUseCase<R>
where
    R: UserRepository,
{
    pub fn new(user_repo: Arc<R>) -> Self {
        Self { user_repo }
    }

    pub async fn execute(&self, caller: &Caller, user_id: i64) -> AuthResult<()> {
        ensure_admin(caller, "delete users")?;

        if !self.user_repo.delete(user_id).await? {
            return Err(AuthError::UserNotFound(user_id));
        }

        tracing::info!(user_id, "User deleted");
        Ok(())
    }
}
