//! Unit tests for the cards crate
//!
//! Use cases run against an in-memory card store whose transfer holds
//! one lock across the checks and both balance writes, mirroring the
//! row locks the Postgres implementation takes.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use chrono::NaiveDate;
use kernel::identity::{Caller, Role};
use kernel::page::{Page, PageRequest};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::domain::entities::{Card, NewCard};
use crate::domain::repository::CardRepository;
use crate::domain::services::plan_transfer;
use crate::domain::value_objects::{CardNumber, CardSortField, CardStatus};
use crate::error::{CardError, CardResult};

/// In-memory card store for use-case tests
#[derive(Clone, Default)]
struct InMemoryCardStore {
    inner: Arc<Mutex<StoreInner>>,
}

#[derive(Default)]
struct StoreInner {
    cards: Vec<Card>,
    /// user id -> username
    users: HashMap<i64, String>,
    next_id: i64,
}

impl InMemoryCardStore {
    fn add_user(&self, user_id: i64, username: &str) {
        self.inner
            .lock()
            .unwrap()
            .users
            .insert(user_id, username.to_string());
    }

    fn balance_of(&self, card_id: i64) -> Decimal {
        let inner = self.inner.lock().unwrap();
        inner
            .cards
            .iter()
            .find(|c| c.id == card_id)
            .map(|c| c.balance)
            .unwrap()
    }
}

fn sort_descending(cards: &mut [Card], sort: CardSortField) {
    match sort {
        CardSortField::Id => cards.sort_by(|a, b| b.id.cmp(&a.id)),
        CardSortField::Balance => {
            cards.sort_by(|a, b| b.balance.cmp(&a.balance).then(b.id.cmp(&a.id)))
        }
        CardSortField::ExpirationDate => {
            cards.sort_by(|a, b| b.expiration_date.cmp(&a.expiration_date).then(b.id.cmp(&a.id)))
        }
        CardSortField::OwnerName => {
            cards.sort_by(|a, b| b.owner_name.cmp(&a.owner_name).then(b.id.cmp(&a.id)))
        }
        CardSortField::Status => {
            cards.sort_by(|a, b| b.status.id().cmp(&a.status.id()).then(b.id.cmp(&a.id)))
        }
    }
}

fn page_of(mut cards: Vec<Card>, page: &PageRequest, sort: CardSortField) -> Page<Card> {
    sort_descending(&mut cards, sort);
    let total = cards.len() as i64;
    let content = cards
        .into_iter()
        .skip(page.offset() as usize)
        .take(page.limit() as usize)
        .collect();
    Page::new(content, page, total)
}

impl CardRepository for InMemoryCardStore {
    async fn insert(&self, card: &NewCard) -> CardResult<Card> {
        let mut inner = self.inner.lock().unwrap();
        if inner.cards.iter().any(|c| c.number == card.number) {
            return Err(CardError::DuplicateCardNumber);
        }
        let owner_username = inner
            .users
            .get(&card.user_id)
            .cloned()
            .ok_or(CardError::UserNotFound(card.user_id))?;
        inner.next_id += 1;
        let created = Card {
            id: inner.next_id,
            number: card.number.clone(),
            owner_name: card.owner_name.clone(),
            expiration_date: card.expiration_date,
            status: card.status,
            balance: card.balance,
            user_id: card.user_id,
            owner_username,
        };
        inner.cards.push(created.clone());
        Ok(created)
    }

    async fn find_by_id(&self, card_id: i64) -> CardResult<Option<Card>> {
        let inner = self.inner.lock().unwrap();
        Ok(inner.cards.iter().find(|c| c.id == card_id).cloned())
    }

    async fn list_all(&self, page: &PageRequest, sort: CardSortField) -> CardResult<Page<Card>> {
        let inner = self.inner.lock().unwrap();
        Ok(page_of(inner.cards.clone(), page, sort))
    }

    async fn list_by_owner(
        &self,
        owner_username: &str,
        page: &PageRequest,
        sort: CardSortField,
    ) -> CardResult<Page<Card>> {
        let inner = self.inner.lock().unwrap();
        let cards: Vec<Card> = inner
            .cards
            .iter()
            .filter(|c| c.owner_username == owner_username)
            .cloned()
            .collect();
        Ok(page_of(cards, page, sort))
    }

    async fn update_status(&self, card_id: i64, status: CardStatus) -> CardResult<bool> {
        let mut inner = self.inner.lock().unwrap();
        match inner.cards.iter_mut().find(|c| c.id == card_id) {
            Some(card) => {
                card.status = status;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, card_id: i64) -> CardResult<bool> {
        let mut inner = self.inner.lock().unwrap();
        let before = inner.cards.len();
        inner.cards.retain(|c| c.id != card_id);
        Ok(inner.cards.len() < before)
    }

    async fn user_exists(&self, user_id: i64) -> CardResult<bool> {
        let inner = self.inner.lock().unwrap();
        Ok(inner.users.contains_key(&user_id))
    }

    async fn transfer(
        &self,
        caller_username: &str,
        from_card_id: i64,
        to_card_id: i64,
        amount: Decimal,
    ) -> CardResult<()> {
        // One lock over checks and both writes, like the row locks in
        // the Postgres implementation
        let mut inner = self.inner.lock().unwrap();

        let from = inner
            .cards
            .iter()
            .find(|c| c.id == from_card_id)
            .cloned()
            .ok_or(CardError::CardNotFound(from_card_id))?;
        let to = inner
            .cards
            .iter()
            .find(|c| c.id == to_card_id)
            .cloned()
            .ok_or(CardError::CardNotFound(to_card_id))?;

        let plan = plan_transfer(caller_username, &from, &to, amount)?;

        for card in inner.cards.iter_mut() {
            if card.id == from_card_id {
                card.balance = plan.from_balance;
            } else if card.id == to_card_id {
                card.balance = plan.to_balance;
            }
        }
        Ok(())
    }
}

fn admin() -> Caller {
    Caller::new("root", Role::Admin)
}

fn user(name: &str) -> Caller {
    Caller::new(name, Role::User)
}

fn expiry() -> NaiveDate {
    NaiveDate::from_ymd_opt(2030, 1, 1).unwrap()
}

async fn seed_card(
    store: &InMemoryCardStore,
    user_id: i64,
    number: &str,
    status: CardStatus,
    balance: Decimal,
) -> Card {
    store
        .insert(&NewCard {
            number: CardNumber::new(number).unwrap(),
            owner_name: "CARD HOLDER".to_string(),
            expiration_date: expiry(),
            status,
            balance,
            user_id,
        })
        .await
        .unwrap()
}

/// Store with alice (user 1, two active cards) and bob (user 2, one card)
async fn seeded_store() -> (InMemoryCardStore, Card, Card, Card) {
    let store = InMemoryCardStore::default();
    store.add_user(1, "alice");
    store.add_user(2, "bob");
    let a1 = seed_card(&store, 1, "1111222233334444", CardStatus::Active, dec!(100.00)).await;
    let a2 = seed_card(&store, 1, "5555666677778888", CardStatus::Active, dec!(0.00)).await;
    let b1 = seed_card(&store, 2, "9999000011112222", CardStatus::Active, dec!(50.00)).await;
    (store, a1, a2, b1)
}

#[cfg(test)]
mod create_card_tests {
    use super::*;
    use crate::application::{CreateCardInput, CreateCardUseCase};

    fn input(number: &str, user_id: i64) -> CreateCardInput {
        CreateCardInput {
            number: CardNumber::new(number).unwrap(),
            owner_name: "ALICE EXAMPLE".to_string(),
            expiration_date: expiry(),
            initial_balance: dec!(25.00),
            user_id,
        }
    }

    #[tokio::test]
    async fn test_admin_creates_active_card() {
        let store = InMemoryCardStore::default();
        store.add_user(1, "alice");
        let use_case = CreateCardUseCase::new(Arc::new(store.clone()));

        let card = use_case
            .execute(&admin(), input("1234567890123456", 1))
            .await
            .unwrap();

        assert_eq!(card.status, CardStatus::Active);
        assert_eq!(card.balance, dec!(25.00));
        assert_eq!(card.owner_username, "alice");
    }

    #[tokio::test]
    async fn test_non_admin_cannot_create() {
        let store = InMemoryCardStore::default();
        store.add_user(1, "alice");
        let use_case = CreateCardUseCase::new(Arc::new(store.clone()));

        let result = use_case
            .execute(&user("alice"), input("1234567890123456", 1))
            .await;

        assert!(matches!(result, Err(CardError::AccessDenied(_))));
    }

    #[tokio::test]
    async fn test_unknown_user_is_not_found() {
        let store = InMemoryCardStore::default();
        let use_case = CreateCardUseCase::new(Arc::new(store.clone()));

        let result = use_case.execute(&admin(), input("1234567890123456", 42)).await;

        assert!(matches!(result, Err(CardError::UserNotFound(42))));
    }

    #[tokio::test]
    async fn test_duplicate_number_conflicts() {
        let store = InMemoryCardStore::default();
        store.add_user(1, "alice");
        let use_case = CreateCardUseCase::new(Arc::new(store.clone()));

        use_case
            .execute(&admin(), input("1234567890123456", 1))
            .await
            .unwrap();
        let result = use_case.execute(&admin(), input("1234567890123456", 1)).await;

        assert!(matches!(result, Err(CardError::DuplicateCardNumber)));
    }
}

#[cfg(test)]
mod view_card_tests {
    use super::*;
    use crate::application::{GetCardUseCase, ListAllCardsUseCase, ListMyCardsUseCase};

    #[tokio::test]
    async fn test_owner_and_admin_can_view_others_cannot() {
        let (store, a1, _, _) = seeded_store().await;
        let use_case = GetCardUseCase::new(Arc::new(store.clone()));

        assert!(use_case.execute(&user("alice"), a1.id).await.is_ok());
        assert!(use_case.execute(&admin(), a1.id).await.is_ok());

        let result = use_case.execute(&user("bob"), a1.id).await;
        assert!(matches!(
            result,
            Err(CardError::AccessDenied("You don't have access to this card"))
        ));
    }

    #[tokio::test]
    async fn test_missing_card_is_not_found() {
        let (store, ..) = seeded_store().await;
        let use_case = GetCardUseCase::new(Arc::new(store.clone()));

        let result = use_case.execute(&admin(), 9999).await;
        assert!(matches!(result, Err(CardError::CardNotFound(9999))));
    }

    #[tokio::test]
    async fn test_my_cards_are_scoped_to_the_caller() {
        let (store, a1, a2, _) = seeded_store().await;
        let use_case = ListMyCardsUseCase::new(Arc::new(store.clone()));

        let page = use_case
            .execute(&user("alice"), &PageRequest::default(), CardSortField::Id)
            .await
            .unwrap();

        assert_eq!(page.total_elements, 2);
        let ids: Vec<i64> = page.content.iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![a2.id, a1.id]);
    }

    #[tokio::test]
    async fn test_all_cards_admin_only_sorted_by_balance() {
        let (store, a1, a2, b1) = seeded_store().await;
        let use_case = ListAllCardsUseCase::new(Arc::new(store.clone()));

        let page = use_case
            .execute(&admin(), &PageRequest::default(), CardSortField::Balance)
            .await
            .unwrap();

        assert_eq!(page.total_elements, 3);
        let ids: Vec<i64> = page.content.iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![a1.id, b1.id, a2.id]);

        let result = use_case
            .execute(&user("alice"), &PageRequest::default(), CardSortField::Id)
            .await;
        assert!(matches!(
            result,
            Err(CardError::AccessDenied("Only admin can access all cards"))
        ));
    }

    #[tokio::test]
    async fn test_paging_splits_results() {
        let (store, ..) = seeded_store().await;
        let use_case = ListAllCardsUseCase::new(Arc::new(store.clone()));

        let page = use_case
            .execute(&admin(), &PageRequest::new(1, 2), CardSortField::Id)
            .await
            .unwrap();

        assert_eq!(page.total_pages, 2);
        assert_eq!(page.content.len(), 1);
    }
}

#[cfg(test)]
mod lifecycle_tests {
    use super::*;
    use crate::application::{ActivateCardUseCase, BlockCardUseCase, DeleteCardUseCase};

    #[tokio::test]
    async fn test_owner_blocks_own_card() {
        let (store, a1, ..) = seeded_store().await;
        let use_case = BlockCardUseCase::new(Arc::new(store.clone()));

        let card = use_case.execute(&user("alice"), a1.id).await.unwrap();
        assert_eq!(card.status, CardStatus::Blocked);
        assert_eq!(
            store.find_by_id(a1.id).await.unwrap().unwrap().status,
            CardStatus::Blocked
        );
    }

    #[tokio::test]
    async fn test_blocking_someone_elses_card_denied() {
        let (store, a1, ..) = seeded_store().await;
        let use_case = BlockCardUseCase::new(Arc::new(store.clone()));

        let result = use_case.execute(&user("bob"), a1.id).await;
        assert!(matches!(
            result,
            Err(CardError::AccessDenied("You can only block your own cards"))
        ));
    }

    #[tokio::test]
    async fn test_admin_blocks_any_card() {
        let (store, a1, ..) = seeded_store().await;
        let use_case = BlockCardUseCase::new(Arc::new(store.clone()));

        let card = use_case.execute(&admin(), a1.id).await.unwrap();
        assert_eq!(card.status, CardStatus::Blocked);
    }

    #[tokio::test]
    async fn test_activation_is_admin_only_and_unconditional() {
        let store = InMemoryCardStore::default();
        store.add_user(1, "alice");
        let expired =
            seed_card(&store, 1, "1234567890123456", CardStatus::Expired, dec!(0.00)).await;
        let use_case = ActivateCardUseCase::new(Arc::new(store.clone()));

        let result = use_case.execute(&user("alice"), expired.id).await;
        assert!(matches!(
            result,
            Err(CardError::AccessDenied("Only admin can activate cards"))
        ));

        let card = use_case.execute(&admin(), expired.id).await.unwrap();
        assert_eq!(card.status, CardStatus::Active);
    }

    #[tokio::test]
    async fn test_delete_admin_only_and_missing_id_is_not_found() {
        let (store, a1, ..) = seeded_store().await;
        let use_case = DeleteCardUseCase::new(Arc::new(store.clone()));

        assert!(matches!(
            use_case.execute(&user("alice"), a1.id).await,
            Err(CardError::AccessDenied("Only admin can delete cards"))
        ));

        use_case.execute(&admin(), a1.id).await.unwrap();
        assert!(store.find_by_id(a1.id).await.unwrap().is_none());

        assert!(matches!(
            use_case.execute(&admin(), a1.id).await,
            Err(CardError::CardNotFound(_))
        ));
    }
}

#[cfg(test)]
mod transfer_tests {
    use super::*;
    use crate::application::{TransferFundsInput, TransferFundsUseCase};

    fn transfer_input(from: i64, to: i64, amount: Decimal) -> TransferFundsInput {
        TransferFundsInput {
            from_card_id: from,
            to_card_id: to,
            amount,
        }
    }

    #[tokio::test]
    async fn test_transfer_moves_the_amount_between_own_cards() {
        let (store, a1, a2, _) = seeded_store().await;
        let use_case = TransferFundsUseCase::new(Arc::new(store.clone()));

        use_case
            .execute(&user("alice"), transfer_input(a1.id, a2.id, dec!(100.00)))
            .await
            .unwrap();

        assert_eq!(store.balance_of(a1.id), dec!(0.00));
        assert_eq!(store.balance_of(a2.id), dec!(100.00));
    }

    #[tokio::test]
    async fn test_partial_then_overdrawn_transfer() {
        let (store, a1, a2, _) = seeded_store().await;
        let use_case = TransferFundsUseCase::new(Arc::new(store.clone()));

        use_case
            .execute(&user("alice"), transfer_input(a1.id, a2.id, dec!(40.00)))
            .await
            .unwrap();
        assert_eq!(store.balance_of(a1.id), dec!(60.00));
        assert_eq!(store.balance_of(a2.id), dec!(40.00));

        let err = use_case
            .execute(&user("alice"), transfer_input(a1.id, a2.id, dec!(1000.00)))
            .await
            .unwrap_err();

        match err {
            CardError::InsufficientFunds {
                card_id,
                available,
                required,
            } => {
                assert_eq!(card_id, a1.id);
                assert_eq!(available, dec!(60.00));
                assert_eq!(required, dec!(1000.00));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_admin_cannot_transfer() {
        let (store, a1, a2, _) = seeded_store().await;
        let use_case = TransferFundsUseCase::new(Arc::new(store.clone()));

        let result = use_case
            .execute(&admin(), transfer_input(a1.id, a2.id, dec!(10.00)))
            .await;

        assert!(matches!(result, Err(CardError::AccessDenied(_))));
    }

    #[tokio::test]
    async fn test_missing_card_reported_before_any_rule() {
        let (store, a1, ..) = seeded_store().await;
        let use_case = TransferFundsUseCase::new(Arc::new(store.clone()));

        let result = use_case
            .execute(&user("alice"), transfer_input(a1.id, 9999, dec!(10.00)))
            .await;

        assert!(matches!(result, Err(CardError::CardNotFound(9999))));
    }

    #[tokio::test]
    async fn test_rejected_transfer_changes_no_balance() {
        let (store, a1, a2, b1) = seeded_store().await;
        let use_case = TransferFundsUseCase::new(Arc::new(store.clone()));

        let cases = vec![
            // Foreign target
            transfer_input(a1.id, b1.id, dec!(10.00)),
            // Same card
            transfer_input(a1.id, a1.id, dec!(10.00)),
            // Non-positive amount
            transfer_input(a1.id, a2.id, dec!(0.00)),
            // More than available
            transfer_input(a1.id, a2.id, dec!(100.01)),
        ];

        for input in cases {
            assert!(use_case.execute(&user("alice"), input).await.is_err());
        }

        assert_eq!(store.balance_of(a1.id), dec!(100.00));
        assert_eq!(store.balance_of(a2.id), dec!(0.00));
        assert_eq!(store.balance_of(b1.id), dec!(50.00));
    }

    #[tokio::test]
    async fn test_blocked_source_rejected_with_status() {
        let (store, a1, a2, _) = seeded_store().await;
        store.update_status(a1.id, CardStatus::Blocked).await.unwrap();
        let use_case = TransferFundsUseCase::new(Arc::new(store.clone()));

        let err = use_case
            .execute(&user("alice"), transfer_input(a1.id, a2.id, dec!(10.00)))
            .await
            .unwrap_err();

        assert!(matches!(err, CardError::TransferNotAllowed(msg)
            if msg == "Source card is not active. Current status: BLOCKED"));
    }

    #[tokio::test]
    async fn test_concurrent_transfers_never_overdraw() {
        let (store, a1, a2, _) = seeded_store().await;
        let use_case = Arc::new(TransferFundsUseCase::new(Arc::new(store.clone())));

        // 15 concurrent attempts to move 10.00 out of a 100.00 balance:
        // exactly 10 can succeed
        let mut handles = Vec::new();
        for _ in 0..15 {
            let use_case = use_case.clone();
            let (from, to) = (a1.id, a2.id);
            handles.push(tokio::spawn(async move {
                use_case
                    .execute(&user("alice"), transfer_input(from, to, dec!(10.00)))
                    .await
            }));
        }

        let mut ok = 0;
        let mut insufficient = 0;
        for handle in handles {
            match handle.await.unwrap() {
                Ok(()) => ok += 1,
                Err(CardError::InsufficientFunds { .. }) => insufficient += 1,
                Err(other) => panic!("unexpected error: {other:?}"),
            }
        }

        assert_eq!(ok, 10);
        assert_eq!(insufficient, 5);
        assert_eq!(store.balance_of(a1.id), dec!(0.00));
        assert_eq!(store.balance_of(a2.id), dec!(100.00));
    }
}
