//! Create Card Use Case (admin only)

use std::sync::Arc;

use chrono::NaiveDate;
use kernel::identity::Caller;
use rust_decimal::Decimal;

use crate::domain::entities::{Card, NewCard};
use crate::domain::policy::{CardAction, authorize};
use crate::domain::repository::CardRepository;
use crate::domain::value_objects::{CardNumber, CardStatus};
use crate::error::{CardError, CardResult};

/// Create card input, validated at the DTO boundary
pub struct CreateCardInput {
    pub number: CardNumber,
    pub owner_name: String,
    pub expiration_date: NaiveDate,
    pub initial_balance: Decimal,
    /// Owning user account
    pub user_id: i64,
}

/// Create card use case
pub struct CreateCardUseCase<R>
where
    R: CardRepository,
{
    card_repo: Arc<R>,
}

impl<R> CreateCardUseCase<R>
where
    R: CardRepository,
{
    pub fn new(card_repo: Arc<R>) -> Self {
        Self { card_repo }
    }

    /// New cards always start out active, whatever the request says.
    pub async fn execute(&self, caller: &Caller, input: CreateCardInput) -> CardResult<Card> {
        authorize(caller, CardAction::Create)?;

        if !self.card_repo.user_exists(input.user_id).await? {
            return Err(CardError::UserNotFound(input.user_id));
        }

        let card = self
            .card_repo
            .insert(&NewCard {
                number: input.number,
                owner_name: input.owner_name,
                expiration_date: input.expiration_date,
                status: CardStatus::Active,
                balance: input.initial_balance,
                user_id: input.user_id,
            })
            .await?;

        tracing::info!(card_id = card.id, user_id = card.user_id, "Card created");

        Ok(card)
    }
}
