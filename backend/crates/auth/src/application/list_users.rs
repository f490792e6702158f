//! List Users Use Case (admin only)

use std::sync::Arc;

use kernel::identity::Caller;
use kernel::page::{Page, PageRequest};

use crate::domain::entities::User;
use crate::domain::policy::ensure_admin;
use crate::domain::repository::UserRepository;
use crate::error::AuthResult;

/// List users use case
pub struct ListUsersUseCase<R>
where
    R: UserRepository,
{
    user_repo: Arc<R>,
}

impl<R> ListUsersUseCase<R>
where
    R: UserRepository,
{
    pub fn new(user_repo: Arc<R>) -> Self {
        Self { user_repo }
    }

    pub async fn execute(&self, caller: &Caller, page: &PageRequest) -> AuthResult<Page<User>> {
        ensure_admin(caller, "list users")?;
        self.user_repo.list(page).await
    }
}
