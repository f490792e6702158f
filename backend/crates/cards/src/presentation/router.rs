//! Cards Router
//!
//! The whole surface sits behind `require_auth`; role and ownership
//! checks happen inside the use cases.

use axum::{
    Router,
    routing::{get, patch, post},
};
use std::sync::Arc;

use crate::domain::repository::CardRepository;
use crate::presentation::handlers::{self, CardAppState};

/// Create the cards router (`/api/cards`)
pub fn cards_router<R>(repo: Arc<R>) -> Router
where
    R: CardRepository + Clone + Send + Sync + 'static,
{
    let state = CardAppState { repo };

    Router::new()
        .route("/", post(handlers::create_card::<R>))
        .route("/my", get(handlers::list_my_cards::<R>))
        .route("/admin/all", get(handlers::list_all_cards::<R>))
        .route(
            "/{id}",
            get(handlers::get_card::<R>).delete(handlers::delete_card::<R>),
        )
        .route("/transfer", post(handlers::transfer::<R>))
        .route("/{id}/block", patch(handlers::block_card::<R>))
        .route("/{id}/activate", patch(handlers::activate_card::<R>))
        .with_state(state)
}
