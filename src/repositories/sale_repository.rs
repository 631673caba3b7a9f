use async_trait::async_trait;
use chrono::Utc;
use metrics::counter;
use sea_orm::{ActiveModelTrait, DatabaseConnection, Set};
use std::sync::Arc;
use tracing::debug;

use crate::entities::sale::ActiveModel;
use crate::errors::ServiceError;
use crate::models::{PaymentInfo, Sale};
use crate::repositories::Repository;

use super::BaseRepository;

/// Write-only journal of sales returned to callers
#[async_trait]
pub trait SaleStore: Send + Sync {
    async fn record(&self, sale: &Sale, payment: Option<&PaymentInfo>) -> Result<(), ServiceError>;
}

#[derive(Debug, Clone)]
pub struct SaleRepository {
    base: BaseRepository,
}

impl SaleRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }
}

#[async_trait]
impl SaleStore for SaleRepository {
    async fn record(&self, sale: &Sale, payment: Option<&PaymentInfo>) -> Result<(), ServiceError> {
        let row = ActiveModel {
            id: Set(sale.id.clone()),
            total_amount: Set(sale.total_amount),
            status: Set(sale.status),
            payment_method: Set(payment.map(|p| p.method.clone())),
            amount_paid: Set(payment.map(|p| p.amount_paid)),
            created_at: Set(Utc::now()),
        };

        row.insert(self.base.get_db()).await?;
        counter!("pos_db.sales.recorded", 1);
        debug!(sale_id = %sale.id, status = ?sale.status, "Recorded sale");
        Ok(())
    }
}
