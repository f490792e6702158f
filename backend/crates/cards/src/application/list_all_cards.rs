//! List All Cards Use Case (admin only)

use std::sync::Arc;

use kernel::identity::Caller;
use kernel::page::{Page, PageRequest};

use crate::domain::entities::Card;
use crate::domain::policy::{CardAction, authorize};
use crate::domain::repository::CardRepository;
use crate::domain::value_objects::CardSortField;
use crate::error::CardResult;

pub struct ListAllCardsUseCase<R>
where
    R: CardRepository,
{
    card_repo: Arc<R>,
}

impl<R> ListAllCardsUseCase<R>
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
        authorize(caller, CardAction::ViewAll)?;
        self.card_repo.list_all(page, sort).await
    }
}
