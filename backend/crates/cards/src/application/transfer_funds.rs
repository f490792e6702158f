//! Transfer Funds Use Case
//!
//! Moves money between two cards the caller owns. The business checks
//! and both balance writes happen inside one repository transaction;
//! see `domain::services::plan_transfer` for the rule chain.

use std::sync::Arc;

use kernel::identity::Caller;
use rust_decimal::Decimal;

use crate::domain::policy::{CardAction, authorize};
use crate::domain::repository::CardRepository;
use crate::error::CardResult;

pub struct TransferFundsInput {
    pub from_card_id: i64,
    pub to_card_id: i64,
    pub amount: Decimal,
}

pub struct TransferFundsUseCase<R>
where
    R: CardRepository,
{
    card_repo: Arc<R>,
}

impl<R> TransferFundsUseCase<R>
where
    R: CardRepository,
{
    pub fn new(card_repo: Arc<R>) -> Self {
        Self { card_repo }
    }

    pub async fn execute(&self, caller: &Caller, input: TransferFundsInput) -> CardResult<()> {
        authorize(caller, CardAction::Transfer)?;

        self.card_repo
            .transfer(
                &caller.username,
                input.from_card_id,
                input.to_card_id,
                input.amount,
            )
            .await?;

        tracing::info!(
            from_card_id = input.from_card_id,
            to_card_id = input.to_card_id,
            amount = %input.amount,
            "Transfer completed"
        );

        Ok(())
    }
}
