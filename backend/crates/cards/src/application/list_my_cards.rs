//! List My Cards Use Case
//!
//! Open to any authenticated caller; scoped to the caller's own cards.

use std::sync::Arc;

use kernel::identity::Caller;
use kernel::page::{Page, PageRequest};

use crate::domain::entities::Card;
use crate::domain::repository::CardRepository;
use crate::domain::value_objects::CardSortField;
use crate::error::CardResult;

pub struct ListMyCardsUseCase<R>
where
    R: CardRepository,
{
    card_repo: Arc<R>,
}

impl<R> ListMyCardsUseCase<R>
where
    R: CardRepository,
{
    pub fn new(card_repo: Arc<R>) -> Self {
        Self { card_repo }
    }

    pub async fn execute(
        &self,
        caller: &Caller,
        page: &PageRequest,
        sort: CardSortField,
    ) -> CardResult<Page<Card>> {
        self.card_repo
            .list_by_owner(&caller.username, page, sort)
            .await
    }
}
