//! API DTOs (Data Transfer Objects)
//!
//! Requests are validated here, before a use case sees them, so
//! malformed input surfaces as a 400 and never reaches the business
//! rules. Responses only ever carry the masked card number.

use chrono::NaiveDate;
use kernel::page::PageRequest;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::application::CreateCardInput;
use crate::domain::entities::Card;
use crate::domain::value_objects::{CardNumber, CardSortField};
use crate::error::{CardError, CardResult};

/// Create card request
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCardRequest {
    pub card_number: String,
    pub owner_name: String,
    pub expiration_date: NaiveDate,
    pub initial_balance: Decimal,
    pub user_id: i64,
}

impl CreateCardRequest {
    pub fn validate(self) -> CardResult<CreateCardInput> {
        let number = CardNumber::new(self.card_number)?;

        let owner_name = self.owner_name.trim();
        if owner_name.is_empty() {
            return Err(CardError::Validation("Owner name is required".to_string()));
        }

        if self.initial_balance <= Decimal::ZERO {
            return Err(CardError::Validation("Balance must be positive".to_string()));
        }

        Ok(CreateCardInput {
            number,
            owner_name: owner_name.to_string(),
            expiration_date: self.expiration_date,
            initial_balance: self.initial_balance,
            user_id: self.user_id,
        })
    }
}

/// Transfer request
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferRequest {
    pub from_card_id: i64,
    pub to_card_id: i64,
    /// Checked by the transfer rules, not here, so a bad sign is
    /// reported in documented check order
    pub amount: Decimal,
}

/// Card view returned by every card endpoint
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CardResponse {
    pub id: i64,
    pub masked_number: String,
    pub owner_name: String,
    pub balance: Decimal,
    /// Status code ("ACTIVE" / "BLOCKED" / "EXPIRED")
    pub status: String,
    pub expiration_date: NaiveDate,
}

impl From<&Card> for CardResponse {
    fn from(card: &Card) -> Self {
        Self {
            id: card.id,
            masked_number: card.number.masked(),
            owner_name: card.owner_name.clone(),
            balance: card.balance,
            status: card.status.code().to_string(),
            expiration_date: card.expiration_date,
        }
    }
}

/// Pagination and sorting query parameters
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardPageParams {
    pub page: Option<u32>,
    pub size: Option<u32>,
    pub sort_by: Option<String>,
}

impl CardPageParams {
    pub fn page_request(&self) -> PageRequest {
        let defaults = PageRequest::default();
        PageRequest::new(
            self.page.unwrap_or(defaults.page),
            self.size.unwrap_or(defaults.size),
        )
    }

    pub fn sort(&self) -> CardSortField {
        CardSortField::from_param(self.sort_by.as_deref())
    }
}

#[cfg(test)]
mod dto_tests {
    use super::*;

    fn request() -> CreateCardRequest {
        CreateCardRequest {
            card_number: "1234567890123456".to_string(),
            owner_name: "  ALICE EXAMPLE  ".to_string(),
            expiration_date: NaiveDate::from_ymd_opt(2030, 1, 1).unwrap(),
            initial_balance: Decimal::new(10000, 2),
            user_id: 1,
        }
    }

    #[test]
    fn test_valid_request_trims_owner_name() {
        let input = request().validate().unwrap();
        assert_eq!(input.owner_name, "ALICE EXAMPLE");
        assert_eq!(input.number.masked(), "**** **** **** 3456");
    }

    #[test]
    fn test_bad_card_number_rejected() {
        let mut req = request();
        req.card_number = "1234".to_string();
        assert!(matches!(req.validate(), Err(CardError::Validation(_))));
    }

    #[test]
    fn test_blank_owner_name_rejected() {
        let mut req = request();
        req.owner_name = "   ".to_string();
        assert!(matches!(req.validate(), Err(CardError::Validation(_))));
    }

    #[test]
    fn test_non_positive_balance_rejected() {
        for balance in [Decimal::ZERO, Decimal::new(-100, 2)] {
            let mut req = request();
            req.initial_balance = balance;
            assert!(matches!(req.validate(), Err(CardError::Validation(_))));
        }
    }

    #[test]
    fn test_response_masks_the_number() {
        let json = serde_json::to_value(CardResponse {
            id: 1,
            masked_number: "**** **** **** 3456".to_string(),
            owner_name: "ALICE EXAMPLE".to_string(),
            balance: Decimal::new(10000, 2),
            status: "ACTIVE".to_string(),
            expiration_date: NaiveDate::from_ymd_opt(2030, 1, 1).unwrap(),
        })
        .unwrap();

        assert_eq!(json["maskedNumber"], "**** **** **** 3456");
        assert!(json.get("cardNumber").is_none());
    }
}
