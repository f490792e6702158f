//! Cards (Bank Card Management) Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Card entity, value objects, transfer rules, access policy
//! - `application/` - Use cases (card CRUD, status changes, transfers)
//! - `infra/` - Database implementations
//! - `presentation/` - HTTP handlers, DTOs, router
//!
//! ## Features
//! - Admin-issued cards tied to user accounts
//! - Owner-scoped and admin-wide card listings with pagination and
//!   whitelisted sorting
//! - Card lifecycle (active, blocked, expired) with owner blocking and
//!   admin activation
//! - Atomic card-to-card transfers between a user's own cards
//!
//! ## Security Model
//! - Card numbers never leave the module unmasked; responses and logs
//!   only ever see `**** **** **** 1234`
//! - Every operation is authorized against the caller produced by the
//!   auth middleware; checks fail closed
//! - Transfers lock both cards inside one database transaction, so
//!   balances move entirely or not at all

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use error::{CardError, CardResult};
pub use infra::postgres::PgCardRepository;
pub use presentation::router::cards_router;

#[cfg(test)]
mod tests;
