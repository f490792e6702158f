//! Repository Traits
//!
//! Interfaces for data persistence. Implementation is in infrastructure layer.

use kernel::page::{Page, PageRequest};
use rust_decimal::Decimal;

use crate::domain::entities::{Card, NewCard};
use crate::domain::value_objects::{CardSortField, CardStatus};
use crate::error::CardResult;

/// Card repository trait
#[trait_variant::make(CardRepository: Send)]
pub trait LocalCardRepository {
    /// Persist a new card, assigning its id
    async fn insert(&self, card: &NewCard) -> CardResult<Card>;

    /// Find card by ID, with its owner's username
    async fn find_by_id(&self, card_id: i64) -> CardResult<Option<Card>>;

    /// Page over every card, sorted descending by `sort`
    async fn list_all(&self, page: &PageRequest, sort: CardSortField) -> CardResult<Page<Card>>;

    /// Page over the cards owned by `owner_username`, sorted descending
    /// by `sort`
    async fn list_by_owner(
        &self,
        owner_username: &str,
        page: &PageRequest,
        sort: CardSortField,
    ) -> CardResult<Page<Card>>;

    /// Set a card's status; returns false when the id did not exist
    async fn update_status(&self, card_id: i64, status: CardStatus) -> CardResult<bool>;

    /// Delete a card by id; returns false when the id did not exist
    async fn delete(&self, card_id: i64) -> CardResult<bool>;

    /// Whether a user account with this id exists
    async fn user_exists(&self, user_id: i64) -> CardResult<bool>;

    /// Atomically move `amount` between two cards owned by
    /// `caller_username`.
    ///
    /// Both cards are locked for the duration of the checks and the
    /// balance updates; either both balances change or neither does.
    async fn transfer(
        &self,
        caller_username: &str,
        from_card_id: i64,
        to_card_id: i64,
        amount: Decimal,
    ) -> CardResult<()>;
}
