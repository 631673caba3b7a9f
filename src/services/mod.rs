pub mod inventory;
pub mod transactions;

pub use inventory::InventoryService;
pub use transactions::{CartPricing, TransactionService, PLACEHOLDER_UNIT_PRICE};
