//! User Entity

use chrono::{DateTime, Utc};
use kernel::identity::Role;
use platform::password::HashedPassword;

/// User account
///
/// Owns zero or more cards (the card side carries the foreign key).
#[derive(Debug, Clone)]
pub struct User {
    /// Database identifier
    pub id: i64,
    /// Username (unique, for login and ownership checks)
    pub username: String,
    /// Argon2id password hash (PHC string)
    pub password_hash: HashedPassword,
    /// Role (User or Admin)
    pub role: Role,
    /// Created timestamp
    pub created_at: DateTime<Utc>,
    /// Updated timestamp
    pub updated_at: DateTime<Utc>,
}

/// A user not yet persisted; the store assigns the id
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub password_hash: HashedPassword,
    pub role: Role,
}
