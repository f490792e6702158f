//! Transfer rules
//!
//! [`plan_transfer`] is the whole transfer decision as a pure
//! function. The repository loads and locks both cards, asks for a
//! plan, and applies the resulting balances inside the same
//! transaction. Checks run in a fixed order so callers get the most
//! specific rejection first.

use rust_decimal::Decimal;

use super::entities::Card;
use crate::error::{CardError, CardResult};

/// Balances to write once a transfer has been approved
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransferPlan {
    pub from_balance: Decimal,
    pub to_balance: Decimal,
}

/// Validates a transfer of `amount` between two loaded cards.
///
/// Order: ownership, same-card, status, amount sign, sufficiency.
pub fn plan_transfer(
    caller_username: &str,
    from: &Card,
    to: &Card,
    amount: Decimal,
) -> CardResult<TransferPlan> {
    if !from.is_owned_by(caller_username) {
        return Err(CardError::TransferNotAllowed(
            "Source card does not belong to you".to_string(),
        ));
    }
    if !to.is_owned_by(caller_username) {
        return Err(CardError::TransferNotAllowed(
            "Target card does not belong to you".to_string(),
        ));
    }
    if from.id == to.id {
        return Err(CardError::TransferNotAllowed(
            "Cannot transfer to the same card".to_string(),
        ));
    }
    if !from.status.is_active() {
        return Err(CardError::TransferNotAllowed(format!(
            "Source card is not active. Current status: {}",
            from.status
        )));
    }
    if !to.status.is_active() {
        return Err(CardError::TransferNotAllowed(format!(
            "Target card is not active. Current status: {}",
            to.status
        )));
    }
    if amount <= Decimal::ZERO {
        return Err(CardError::TransferNotAllowed(
            "Transfer amount must be positive".to_string(),
        ));
    }
    if from.balance < amount {
        return Err(CardError::InsufficientFunds {
            card_id: from.id,
            available: from.balance,
            required: amount,
        });
    }
    Ok(TransferPlan {
        from_balance: from.balance - amount,
        to_balance: to.balance + amount,
    })
}
