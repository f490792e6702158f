//! PostgreSQL Repository Implementations

use chrono::{DateTime, Utc};
use kernel::identity::Role;
use kernel::page::{Page, PageRequest};
use platform::password::HashedPassword;
use sqlx::PgPool;

use crate::domain::entities::{NewUser, User};
use crate::domain::repository::UserRepository;
use crate::error::{AuthError, AuthResult};

/// PostgreSQL unique-constraint violation
const PG_UNIQUE_VIOLATION: &str = "23505";
/// PostgreSQL foreign-key violation
const PG_FOREIGN_KEY_VIOLATION: &str = "23503";

/// PostgreSQL-backed user repository
#[derive(Clone)]
pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl UserRepository for PgUserRepository {
    async fn create(&self, user: &NewUser) -> AuthResult<User> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            INSERT INTO users (username, password_hash, user_role)
            VALUES ($1, $2, $3)
            RETURNING id, username, password_hash, user_role, created_at, updated_at
            "#,
        )
        .bind(&user.username)
        .bind(user.password_hash.as_phc_string())
        .bind(user.role.id())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if db_error_code(&e, PG_UNIQUE_VIOLATION) {
                AuthError::UsernameTaken
            } else {
                AuthError::Database(e)
            }
        })?;

        row.into_user()
    }

    async fn find_by_id(&self, user_id: i64) -> AuthResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, username, password_hash, user_role, created_at, updated_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| r.into_user()).transpose()
    }

    async fn find_by_username(&self, username: &str) -> AuthResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, username, password_hash, user_role, created_at, updated_at
            FROM users
            WHERE username = $1
            "#,
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| r.into_user()).transpose()
    }

    async fn admin_exists(&self) -> AuthResult<bool> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM users WHERE user_role = $1)",
        )
        .bind(Role::Admin.id())
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    async fn list(&self, page: &PageRequest) -> AuthResult<Page<User>> {
        let total = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await?;

        let rows = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, username, password_hash, user_role, created_at, updated_at
            FROM users
            ORDER BY id DESC
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(page.limit())
        .bind(page.offset())
        .fetch_all(&self.pool)
        .await?;

        let users = rows
            .into_iter()
            .map(|r| r.into_user())
            .collect::<AuthResult<Vec<_>>>()?;

        Ok(Page::new(users, page, total))
    }

    async fn delete(&self, user_id: i64) -> AuthResult<bool> {
        let deleted = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(user_id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                // cards.user_id is ON DELETE RESTRICT
                if db_error_code(&e, PG_FOREIGN_KEY_VIOLATION) {
                    AuthError::Validation("User still owns cards".to_string())
                } else {
                    AuthError::Database(e)
                }
            })?
            .rows_affected();

        Ok(deleted > 0)
    }
}

/// True when the error is a database error with the given SQLSTATE code
fn db_error_code(err: &sqlx::Error, code: &str) -> bool {
    matches!(err, sqlx::Error::Database(db_err) if db_err.code().as_deref() == Some(code))
}

#[derive(sqlx::FromRow)]
struct UserRow {
    id: i64,
    username: String,
    password_hash: String,
    user_role: i16,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl UserRow {
    fn into_user(self) -> AuthResult<User> {
        let password_hash = HashedPassword::from_phc_string(self.password_hash)
            .map_err(|e| AuthError::Internal(format!("Invalid password hash: {}", e)))?;

        let role = Role::from_id(self.user_role)
            .ok_or_else(|| AuthError::Internal(format!("Invalid user_role: {}", self.user_role)))?;

        Ok(User {
            id: self.id,
            username: self.username,
            password_hash,
            role,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}
