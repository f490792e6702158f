//! HTTP Handlers

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::{Extension, Json};
use kernel::identity::Caller;
use kernel::page::Page;
use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::{
    CreateUserInput, CreateUserUseCase, DeleteUserUseCase, ListUsersUseCase, LoginInput,
    LoginUseCase,
};
use crate::domain::repository::UserRepository;
use crate::error::AuthResult;
use crate::presentation::dto::{
    CreateUserRequest, LoginRequest, LoginResponse, PageParams, UserResponse,
};

/// Shared state for auth handlers
#[derive(Clone)]
pub struct AuthAppState<R>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub config: Arc<AuthConfig>,
}

/// POST /api/auth/login
pub async fn login<R>(
    State(state): State<AuthAppState<R>>,
    Json(req): Json<LoginRequest>,
) -> AuthResult<Json<LoginResponse>>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    let use_case = LoginUseCase::new(state.repo.clone(), state.config.clone());

    let output = use_case
        .execute(LoginInput {
            username: req.username,
            password: req.password,
        })
        .await?;

    Ok(Json(LoginResponse {
        token: output.token,
        username: output.username,
        role: output.role.code().to_string(),
    }))
}

/// GET /api/admin/users
pub async fn list_users<R>(
    State(state): State<AuthAppState<R>>,
    Extension(caller): Extension<Caller>,
    Query(params): Query<PageParams>,
) -> AuthResult<Json<Page<UserResponse>>>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    let use_case = ListUsersUseCase::new(state.repo.clone());

    let page = use_case.execute(&caller, &params.page_request()).await?;

    Ok(Json(page.map(|user| UserResponse::from(&user))))
}

/// POST /api/admin/users
pub async fn create_user<R>(
    State(state): State<AuthAppState<R>>,
    Extension(caller): Extension<Caller>,
    Json(req): Json<CreateUserRequest>,
) -> AuthResult<Json<UserResponse>>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    let use_case = CreateUserUseCase::new(state.repo.clone(), state.config.clone());

    let user = use_case
        .execute(
            &caller,
            CreateUserInput {
                username: req.username,
                password: req.password,
                role: req.role,
            },
        )
        .await?;

    Ok(Json(UserResponse::from(&user)))
}

/// DELETE /api/admin/users/{id}
pub async fn delete_user<R>(
    State(state): State<AuthAppState<R>>,
    Extension(caller): Extension<Caller>,
    Path(user_id): Path<i64>,
) -> AuthResult<StatusCode>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    let use_case = DeleteUserUseCase::new(state.repo.clone());

    use_case.execute(&caller, user_id).await?;

    Ok(StatusCode::NO_CONTENT)
}
