//! Activate Card Use Case (admin only)
//!
//! Activation is unconditional; it applies to blocked and expired
//! cards alike.

use std::sync::Arc;

use kernel::identity::Caller;

use crate::domain::entities::Card;
use crate::domain::policy::{CardAction, authorize};
use crate::domain::repository::CardRepository;
use crate::domain::value_objects::CardStatus;
use crate::error::{CardError, CardResult};

pub struct ActivateCardUseCase<R>
where
    R: CardRepository,
{
    card_repo: Arc<R>,
}

impl<R> ActivateCardUseCase<R>
where
    R: CardRepository,
{
    pub fn new(card_repo: Arc<R>) -> Self {
        Self { card_repo }
    }

    pub async fn execute(&self, caller: &Caller, card_id: i64) -> CardResult<Card> {
        authorize(caller, CardAction::Activate)?;

        let card = self
            .card_repo
            .find_by_id(card_id)
            .await?
            .ok_or(CardError::CardNotFound(card_id))?;

        self.card_repo
            .update_status(card_id, CardStatus::Active)
            .await?;

        tracing::info!(card_id, "Card activated");

        Ok(Card { status: CardStatus::Active, ..card })
    }
}
