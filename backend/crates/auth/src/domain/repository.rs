//! Repository Traits
//!
//! Interfaces for data persistence. Implementation is in infrastructure layer.

use kernel::page::{Page, PageRequest};

use crate::domain::entities::{NewUser, User};
use crate::error::AuthResult;

/// User repository trait
#[trait_variant::make(UserRepository: Send)]
pub trait LocalUserRepository {
    /// Persist a new user, assigning its id
    async fn create(&self, user: &NewUser) -> AuthResult<User>;

    /// Find user by ID
    async fn find_by_id(&self, user_id: i64) -> AuthResult<Option<User>>;

    /// Find user by username
    async fn find_by_username(&self, username: &str) -> AuthResult<Option<User>>;

    /// Whether any admin account exists
    async fn admin_exists(&self) -> AuthResult<bool>;

    /// Page over all users, id descending
    async fn list(&self, page: &PageRequest) -> AuthResult<Page<User>>;

    /// Delete a user by id; returns false when the id did not exist
    async fn delete(&self, user_id: i64) -> AuthResult<bool>;
}
