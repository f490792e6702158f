//! Application Layer
//!
//! Use cases and application services.

pub mod config;
pub mod create_user;
pub mod delete_user;
pub mod list_users;
pub mod login;

// Re-exports
pub use config::AuthConfig;
pub use create_user::{CreateUserInput, CreateUserUseCase};
pub use delete_user::DeleteUserUseCase;
pub use list_users::ListUsersUseCase;
pub use login::{LoginInput, LoginOutput, LoginUseCase};
