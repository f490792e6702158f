//! Application Layer
//!
//! Use cases and application services.

pub mod activate_card;
pub mod block_card;
pub mod create_card;
pub mod delete_card;
pub mod get_card;
pub mod list_all_cards;
pub mod list_my_cards;
pub mod transfer_funds;

// Re-exports
pub use activate_card::ActivateCardUseCase;
pub use block_card::BlockCardUseCase;
pub use create_card::{CreateCardInput, CreateCardUseCase};
pub use delete_card::DeleteCardUseCase;
pub use get_card::GetCardUseCase;
pub use list_all_cards::ListAllCardsUseCase;
pub use list_my_cards::ListMyCardsUseCase;
pub use transfer_funds::{TransferFundsInput, TransferFundsUseCase};
