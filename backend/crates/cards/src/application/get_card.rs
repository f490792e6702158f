//! Get Card Use Case
//!
//! Admins can fetch any card; regular users only their own.

use std::sync::Arc;

use kernel::identity::Caller;

use crate::domain::entities::Card;
use crate::domain::policy::{CardAction, authorize};
use crate::domain::repository::CardRepository;
use crate::error::{CardError, CardResult};

pub struct GetCardUseCase<R>
where
    R: CardRepository,
{
    card_repo: Arc<R>,
}

impl<R> GetCardUseCase<R>
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

        authorize(caller, CardAction::View { owner_username: &card.owner_username })?;

        Ok(card)
    }
}
