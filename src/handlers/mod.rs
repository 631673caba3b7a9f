pub mod common;
pub mod health;
pub mod point_of_sale;
pub mod products;

use std::sync::Arc;
use tracing::info;

use crate::config::AppConfig;
use crate::db::DbPool;
use crate::repositories::{ProductRepository, ProductStore, SaleRepository};
use crate::services::{InventoryService, TransactionService};

// Re-export AppState so handler modules can import it as crate::handlers::AppState
pub use crate::AppState;

/// Services layer that encapsulates business logic used by HTTP handlers
#[derive(Clone)]
pub struct AppServices {
    pub inventory: Arc<InventoryService>,
    pub transactions: Arc<TransactionService>,
}

impl AppServices {
    /// Wires the sea-orm stores into the services according to `config`
    pub fn new(db_pool: Arc<DbPool>, config: &AppConfig) -> Self {
        let products: Arc<dyn ProductStore> = Arc::new(ProductRepository::new(db_pool.clone()));

        let mut transactions = TransactionService::new(products.clone(), config.cart_pricing());
        if config.record_sales {
            transactions = transactions.with_journal(Arc::new(SaleRepository::new(db_pool)));
        }
        info!(
            cart_pricing = %transactions.pricing(),
            record_sales = config.record_sales,
            "Services initialized"
        );

        Self {
            inventory: Arc::new(InventoryService::new(products)),
            transactions: Arc::new(transactions),
        }
    }
}
