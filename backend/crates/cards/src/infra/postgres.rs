//! PostgreSQL Repository Implementations
//!
//! Cards are always read together with their owner's username, so the
//! ownership checks never need a second round trip.

use chrono::NaiveDate;
use kernel::page::{Page, PageRequest};
use rust_decimal::Decimal;
use sqlx::PgPool;

use crate::domain::entities::{Card, NewCard};
use crate::domain::repository::CardRepository;
use crate::domain::services::plan_transfer;
use crate::domain::value_objects::{CardNumber, CardSortField, CardStatus};
use crate::error::{CardError, CardResult};

/// PostgreSQL unique-constraint violation
const PG_UNIQUE_VIOLATION: &str = "23505";
/// PostgreSQL foreign-key violation
const PG_FOREIGN_KEY_VIOLATION: &str = "23503";

/// PostgreSQL-backed card repository
#[derive(Clone)]
pub struct PgCardRepository {
    pool: PgPool,
}

impl PgCardRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl CardRepository for PgCardRepository {
    async fn insert(&self, card: &NewCard) -> CardResult<Card> {
        let row = sqlx::query_as::<_, CardRow>(
            r#"
            WITH inserted AS (
                INSERT INTO cards (card_number, owner_name, expiration_date, status, balance, user_id)
                VALUES ($1, $2, $3, $4, $5, $6)
                RETURNING id, card_number, owner_name, expiration_date, status, balance, user_id
            )
            SELECT i.id, i.card_number, i.owner_name, i.expiration_date, i.status,
                   i.balance, i.user_id, u.username AS owner_username
            FROM inserted i
            JOIN users u ON u.id = i.user_id
            "#,
        )
        .bind(card.number.as_str())
        .bind(&card.owner_name)
        .bind(card.expiration_date)
        .bind(card.status.id())
        .bind(card.balance)
        .bind(card.user_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if db_error_code(&e, PG_UNIQUE_VIOLATION) {
                CardError::DuplicateCardNumber
            } else if db_error_code(&e, PG_FOREIGN_KEY_VIOLATION) {
                // Owning user vanished between the existence check and
                // the insert
                CardError::UserNotFound(card.user_id)
            } else {
                CardError::Database(e)
            }
        })?;

        row.into_card()
    }

    async fn find_by_id(&self, card_id: i64) -> CardResult<Option<Card>> {
        let row = sqlx::query_as::<_, CardRow>(
            r#"
            SELECT c.id, c.card_number, c.owner_name, c.expiration_date, c.status,
                   c.balance, c.user_id, u.username AS owner_username
            FROM cards c
            JOIN users u ON u.id = c.user_id
            WHERE c.id = $1
            "#,
        )
        .bind(card_id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| r.into_card()).transpose()
    }

    async fn list_all(&self, page: &PageRequest, sort: CardSortField) -> CardResult<Page<Card>> {
        let total = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM cards")
            .fetch_one(&self.pool)
            .await?;

        // Sort column comes from a fixed whitelist, never raw input
        let query = format!(
            r#"
            SELECT c.id, c.card_number, c.owner_name, c.expiration_date, c.status,
                   c.balance, c.user_id, u.username AS owner_username
            FROM cards c
            JOIN users u ON u.id = c.user_id
            ORDER BY c.{} DESC, c.id DESC
            LIMIT $1 OFFSET $2
            "#,
            sort.column()
        );

        let rows = sqlx::query_as::<_, CardRow>(&query)
            .bind(page.limit())
            .bind(page.offset())
            .fetch_all(&self.pool)
            .await?;

        let cards = rows
            .into_iter()
            .map(|r| r.into_card())
            .collect::<CardResult<Vec<_>>>()?;

        Ok(Page::new(cards, page, total))
    }

    async fn list_by_owner(
        &self,
        owner_username: &str,
        page: &PageRequest,
        sort: CardSortField,
    ) -> CardResult<Page<Card>> {
        let total = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*)
            FROM cards c
            JOIN users u ON u.id = c.user_id
            WHERE u.username = $1
            "#,
        )
        .bind(owner_username)
        .fetch_one(&self.pool)
        .await?;

        let query = format!(
            r#"
            SELECT c.id, c.card_number, c.owner_name, c.expiration_date, c.status,
                   c.balance, c.user_id, u.username AS owner_username
            FROM cards c
            JOIN users u ON u.id = c.user_id
            WHERE u.username = $1
            ORDER BY c.{} DESC, c.id DESC
            LIMIT $2 OFFSET $3
            "#,
            sort.column()
        );

        let rows = sqlx::query_as::<_, CardRow>(&query)
            .bind(owner_username)
            .bind(page.limit())
            .bind(page.offset())
            .fetch_all(&self.pool)
            .await?;

        let cards = rows
            .into_iter()
            .map(|r| r.into_card())
            .collect::<CardResult<Vec<_>>>()?;

        Ok(Page::new(cards, page, total))
    }

    async fn update_status(&self, card_id: i64, status: CardStatus) -> CardResult<bool> {
        let updated = sqlx::query("UPDATE cards SET status = $2 WHERE id = $1")
            .bind(card_id)
            .bind(status.id())
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(updated > 0)
    }

    async fn delete(&self, card_id: i64) -> CardResult<bool> {
        let deleted = sqlx::query("DELETE FROM cards WHERE id = $1")
            .bind(card_id)
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(deleted > 0)
    }

    async fn user_exists(&self, user_id: i64) -> CardResult<bool> {
        let exists =
            sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM users WHERE id = $1)")
                .bind(user_id)
                .fetch_one(&self.pool)
                .await?;

        Ok(exists)
    }

    async fn transfer(
        &self,
        caller_username: &str,
        from_card_id: i64,
        to_card_id: i64,
        amount: Decimal,
    ) -> CardResult<()> {
        let mut tx = self.pool.begin().await?;

        // Lock both rows in id order so concurrent transfers over the
        // same pair cannot deadlock
        let rows = sqlx::query_as::<_, CardRow>(
            r#"
            SELECT c.id, c.card_number, c.owner_name, c.expiration_date, c.status,
                   c.balance, c.user_id, u.username AS owner_username
            FROM cards c
            JOIN users u ON u.id = c.user_id
            WHERE c.id = ANY($1)
            ORDER BY c.id
            FOR UPDATE OF c
            "#,
        )
        .bind(vec![from_card_id, to_card_id])
        .fetch_all(&mut *tx)
        .await?;

        let cards = rows
            .into_iter()
            .map(|r| r.into_card())
            .collect::<CardResult<Vec<_>>>()?;

        let from = card_by_id(&cards, from_card_id)?;
        let to = card_by_id(&cards, to_card_id)?;

        // Rejection rolls the transaction back and releases the locks
        let plan = plan_transfer(caller_username, &from, &to, amount)?;

        sqlx::query("UPDATE cards SET balance = $2 WHERE id = $1")
            .bind(from.id)
            .bind(plan.from_balance)
            .execute(&mut *tx)
            .await?;

        sqlx::query("UPDATE cards SET balance = $2 WHERE id = $1")
            .bind(to.id)
            .bind(plan.to_balance)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(())
    }
}

fn card_by_id(cards: &[Card], card_id: i64) -> CardResult<Card> {
    cards
        .iter()
        .find(|c| c.id == card_id)
        .cloned()
        .ok_or(CardError::CardNotFound(card_id))
}

/// True when the error is a database error with the given SQLSTATE code
fn db_error_code(err: &sqlx::Error, code: &str) -> bool {
    matches!(err, sqlx::Error::Database(db_err) if db_err.code().as_deref() == Some(code))
}

#[derive(sqlx::FromRow)]
struct CardRow {
    id: i64,
    card_number: String,
    owner_name: String,
    expiration_date: NaiveDate,
    status: i16,
    balance: Decimal,
    user_id: i64,
    owner_username: String,
}

impl CardRow {
    fn into_card(self) -> CardResult<Card> {
        let number = CardNumber::new(self.card_number)
            .map_err(|e| CardError::Internal(format!("Invalid stored card number: {}", e)))?;

        let status = CardStatus::from_id(self.status)
            .ok_or_else(|| CardError::Internal(format!("Invalid card status: {}", self.status)))?;

        Ok(Card {
            id: self.id,
            number,
            owner_name: self.owner_name,
            expiration_date: self.expiration_date,
            status,
            balance: self.balance,
            user_id: self.user_id,
            owner_username: self.owner_username,
        })
    }
}
