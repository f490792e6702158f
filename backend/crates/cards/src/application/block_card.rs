//! Block Card Use Case
//!
//! Owners may block their own cards; admins may block any card.

use std::sync::Arc;

use kernel::identity::Caller;

use crate::domain::entities::Card;
use crate::domain::policy::{CardAction, authorize};
use crate::domain::repository::CardRepository;
use crate::domain::value_objects::CardStatus;
use crate::error::{CardError, CardResult};

pub struct BlockCardUseCase<R>
where
    R: CardRepository,
{
    card_repo: Arc<R>,
}

impl<R> BlockCardUseCase<R>
where
    R: CardRepository,
{
    pub fn new(card_repo: Arc<R>) -> Self {
        Self { card_repo }
    }

    pub async fn execute(&self, caller: &Caller, card_id: i64) -> CardResult<Card> {
        let card = self
            .card_repo
            .find_by_id(card_id)
            .await?
            .ok_or(CardError::CardNotFound(card_id))?;

        authorize(caller, CardAction::Block { owner_username: &card.owner_username })?;

        // Blocking is idempotent; an already blocked card stays blocked
        self.card_repo
            .update_status(card_id, CardStatus::Blocked)
            .await?;

        tracing::info!(card_id, "Card blocked");

        Ok(Card { status: CardStatus::Blocked, ..card })
    }
}
