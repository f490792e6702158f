//! Card access policy
//!
//! Centralizes who may do what to a card. Use cases call
//! [`authorize`] before touching the repository; the checks fail
//! closed, so a caller is denied unless a rule explicitly allows it.

use kernel::identity::Caller;

use crate::error::{CardError, CardResult};

/// An operation on cards, carrying the context needed to decide it
#[derive(Debug, Clone, Copy)]
pub enum CardAction<'a> {
    /// Issue a new card to a user
    Create,
    /// List every card in the system
    ViewAll,
    /// View one card owned by `owner_username`
    View { owner_username: &'a str },
    /// Delete a card
    Delete,
    /// Block a card owned by `owner_username`
    Block { owner_username: &'a str },
    /// Re-activate a blocked card
    Activate,
    /// Move funds between the caller's own cards
    Transfer,
}

/// Returns `Ok(())` when `caller` may perform `action`
pub fn authorize(caller: &Caller, action: CardAction<'_>) -> CardResult<()> {
    // Transfers are a user-only operation; admin accounts hold no cards
    if let CardAction::Transfer = action {
        return if caller.role.is_admin() {
            Err(CardError::AccessDenied(
                "Only users can transfer between their own cards",
            ))
        } else {
            Ok(())
        };
    }
    if caller.role.is_admin() {
        return Ok(());
    }
    match action {
        CardAction::Create => Err(CardError::AccessDenied("Only admin can create cards")),
        CardAction::ViewAll => Err(CardError::AccessDenied("Only admin can access all cards")),
        CardAction::View { owner_username } => {
            if caller.is_owner(owner_username) {
                Ok(())
            } else {
                Err(CardError::AccessDenied("You don't have access to this card"))
            }
        }
        CardAction::Delete => Err(CardError::AccessDenied("Only admin can delete cards")),
        CardAction::Block { owner_username } => {
            if caller.is_owner(owner_username) {
                Ok(())
            } else {
                Err(CardError::AccessDenied("You can only block your own cards"))
            }
        }
        CardAction::Activate => Err(CardError::AccessDenied("Only admin can activate cards")),
        // Handled by the early return above
        CardAction::Transfer => unreachable!(),
    }
}
