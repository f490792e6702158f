//! Card value objects
//!
//! Card numbers are validated on construction and never rendered in
//! full outside this module. `Display` shows the masked form so a card
//! number cannot leak through logging by accident.

use std::fmt;

use crate::error::CardError;

/// Number of digits in a card number
pub const CARD_NUMBER_LEN: usize = 16;

/// Digits revealed by the masked representation
const VISIBLE_SUFFIX_LEN: usize = 4;

/// A validated 16-digit card number
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct CardNumber(String);

impl CardNumber {
    pub fn new(raw: impl Into<String>) -> Result<Self, CardError> {
        let raw = raw.into();
        if raw.len() != CARD_NUMBER_LEN || !raw.bytes().all(|b| b.is_ascii_digit()) {
            return Err(CardError::Validation(
                "Card number must be exactly 16 digits".to_string(),
            ));
        }
        Ok(Self(raw))
    }

    /// Full card number, for persistence only
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// `**** **** **** 3456`
    pub fn masked(&self) -> String {
        let suffix = &self.0[CARD_NUMBER_LEN - VISIBLE_SUFFIX_LEN..];
        format!("**** **** **** {suffix}")
    }
}

impl fmt::Display for CardNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.masked())
    }
}

impl fmt::Debug for CardNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CardNumber({})", self.masked())
    }
}

/// Card lifecycle status, stored as a SMALLINT code
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i16)]
pub enum CardStatus {
    Active = 0,
    Blocked = 1,
    Expired = 2,
}

impl CardStatus {
    pub fn id(&self) -> i16 {
        *self as i16
    }

    pub fn code(&self) -> &'static str {
        match self {
            Self::Active => "ACTIVE",
            Self::Blocked => "BLOCKED",
            Self::Expired => "EXPIRED",
        }
    }

    pub fn from_id(id: i16) -> Option<Self> {
        match id {
            0 => Some(Self::Active),
            1 => Some(Self::Blocked),
            2 => Some(Self::Expired),
            _ => None,
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(self, Self::Active)
    }
}

impl fmt::Display for CardStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Whitelisted sort columns for card listings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CardSortField {
    #[default]
    Id,
    Balance,
    ExpirationDate,
    OwnerName,
    Status,
}

impl CardSortField {
    /// Column name for ORDER BY; values are fixed identifiers, never
    /// interpolated from user input directly
    pub fn column(&self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::Balance => "balance",
            Self::ExpirationDate => "expiration_date",
            Self::OwnerName => "owner_name",
            Self::Status => "status",
        }
    }

    /// Unknown or absent parameters fall back to `Id`
    pub fn from_param(param: Option<&str>) -> Self {
        match param {
            Some("balance") => Self::Balance,
            Some("expirationDate") => Self::ExpirationDate,
            Some("ownerName") => Self::OwnerName,
            Some("status") => Self::Status,
            _ => Self::Id,
        }
    }
}
