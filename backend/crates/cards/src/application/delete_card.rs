//! Delete Card Use Case (admin only)
//!
//! Deleting an id that does not exist is reported as not found rather
//! than silently succeeding, matching user deletion in the auth module.

use std::sync::Arc;

use kernel::identity::Caller;

use crate::domain::policy::{CardAction, authorize};
use crate::domain::repository::CardRepository;
use crate::error::{CardError, CardResult};

pub struct DeleteCardUseCase<R>
where
    R: CardRepository,
{
    card_repo: Arc<R>,
}

impl<R> DeleteCardUseCase<R>
where
    R: CardRepository,
{
    pub fn new(card_repo: Arc<R>) -> Self {
        Self { card_repo }
    }

    pub async fn execute(&self, caller: &Caller, card_id: i64) -> CardResult<()> {
        authorize(caller, CardAction::Delete)?;

        if !self.card_repo.delete(card_id).await? {
            return Err(CardError::CardNotFound(card_id));
        }

        tracing::info!(card_id, "Card deleted");

        Ok(())
    }
}
