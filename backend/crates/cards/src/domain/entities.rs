//! Card entity

use chrono::NaiveDate;
use rust_decimal::Decimal;

use super::value_objects::{CardNumber, CardStatus};

/// A bank card tied to exactly one owning user
#[derive(Debug, Clone)]
pub struct Card {
    pub id: i64,
    pub number: CardNumber,
    /// Printed cardholder name, independent of the owning account
    pub owner_name: String,
    pub expiration_date: NaiveDate,
    pub status: CardStatus,
    pub balance: Decimal,
    pub user_id: i64,
    /// Username of the owning account, joined from the users table
    pub owner_username: String,
}

impl Card {
    pub fn is_owned_by(&self, username: &str) -> bool {
        self.owner_username == username
    }
}

/// Data for a card that has not been persisted yet
#[derive(Debug, Clone)]
pub struct NewCard {
    pub number: CardNumber,
    pub owner_name: String,
    pub expiration_date: NaiveDate,
    pub status: CardStatus,
    pub balance: Decimal,
    pub user_id: i64,
}
