//! HTTP Handlers

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::{Extension, Json};
use kernel::identity::Caller;
use kernel::page::Page;
use std::sync::Arc;

use crate::application::{
    ActivateCardUseCase, BlockCardUseCase, CreateCardUseCase, DeleteCardUseCase, GetCardUseCase,
    ListAllCardsUseCase, ListMyCardsUseCase, TransferFundsInput, TransferFundsUseCase,
};
use crate::domain::repository::CardRepository;
use crate::error::CardResult;
use crate::presentation::dto::{CardPageParams, CardResponse, CreateCardRequest, TransferRequest};

/// Shared state for card handlers
#[derive(Clone)]
pub struct CardAppState<R>
where
    R: CardRepository + Clone + Send + Sync + 'static,
{
    pub repo: Arc<R>,
}

/// POST /api/cards
pub async fn create_card<R>(
    State(state): State<CardAppState<R>>,
    Extension(caller): Extension<Caller>,
    Json(req): Json<CreateCardRequest>,
) -> CardResult<Json<CardResponse>>
where
    R: CardRepository + Clone + Send + Sync + 'static,
{
    let input = req.validate()?;

    let use_case = CreateCardUseCase::new(state.repo.clone());
    let card = use_case.execute(&caller, input).await?;

    Ok(Json(CardResponse::from(&card)))
}

/// GET /api/cards/my
pub async fn list_my_cards<R>(
    State(state): State<CardAppState<R>>,
    Extension(caller): Extension<Caller>,
    Query(params): Query<CardPageParams>,
) -> CardResult<Json<Page<CardResponse>>>
where
    R: CardRepository + Clone + Send + Sync + 'static,
{
    let use_case = ListMyCardsUseCase::new(state.repo.clone());

    let page = use_case
        .execute(&caller, &params.page_request(), params.sort())
        .await?;

    Ok(Json(page.map(|card| CardResponse::from(&card))))
}

/// GET /api/cards/admin/all
pub async fn list_all_cards<R>(
    State(state): State<CardAppState<R>>,
    Extension(caller): Extension<Caller>,
    Query(params): Query<CardPageParams>,
) -> CardResult<Json<Page<CardResponse>>>
where
    R: CardRepository + Clone + Send + Sync + 'static,
{
    let use_case = ListAllCardsUseCase::new(state.repo.clone());

    let page = use_case
        .execute(&caller, &params.page_request(), params.sort())
        .await?;

    Ok(Json(page.map(|card| CardResponse::from(&card))))
}

/// GET /api/cards/{id}
pub async fn get_card<R>(
    State(state): State<CardAppState<R>>,
    Extension(caller): Extension<Caller>,
    Path(card_id): Path<i64>,
) -> CardResult<Json<CardResponse>>
where
    R: CardRepository + Clone + Send + Sync + 'static,
{
    let use_case = GetCardUseCase::new(state.repo.clone());
    let card = use_case.execute(&caller, card_id).await?;

    Ok(Json(CardResponse::from(&card)))
}

/// DELETE /api/cards/{id}
pub async fn delete_card<R>(
    State(state): State<CardAppState<R>>,
    Extension(caller): Extension<Caller>,
    Path(card_id): Path<i64>,
) -> CardResult<StatusCode>
where
    R: CardRepository + Clone + Send + Sync + 'static,
{
    let use_case = DeleteCardUseCase::new(state.repo.clone());
    use_case.execute(&caller, card_id).await?;

    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/cards/transfer
pub async fn transfer<R>(
    State(state): State<CardAppState<R>>,
    Extension(caller): Extension<Caller>,
    Json(req): Json<TransferRequest>,
) -> CardResult<StatusCode>
where
    R: CardRepository + Clone + Send + Sync + 'static,
{
    let use_case = TransferFundsUseCase::new(state.repo.clone());

    use_case
        .execute(
            &caller,
            TransferFundsInput {
                from_card_id: req.from_card_id,
                to_card_id: req.to_card_id,
                amount: req.amount,
            },
        )
        .await?;

    Ok(StatusCode::OK)
}

/// PATCH /api/cards/{id}/block
pub async fn block_card<R>(
    State(state): State<CardAppState<R>>,
    Extension(caller): Extension<Caller>,
    Path(card_id): Path<i64>,
) -> CardResult<Json<CardResponse>>
where
    R: CardRepository + Clone + Send + Sync + 'static,
{
    let use_case = BlockCardUseCase::new(state.repo.clone());
    let card = use_case.execute(&caller, card_id).await?;

    Ok(Json(CardResponse::from(&card)))
}

/// PATCH /api/cards/{id}/activate
pub async fn activate_card<R>(
    State(state): State<CardAppState<R>>,
    Extension(caller): Extension<Caller>,
    Path(card_id): Path<i64>,
) -> CardResult<Json<CardResponse>>
where
    R: CardRepository + Clone + Send + Sync + 'static,
{
    let use_case = ActivateCardUseCase::new(state.repo.clone());
    let card = use_case.execute(&caller, card_id).await?;

    Ok(Json(CardResponse::from(&card)))
}
