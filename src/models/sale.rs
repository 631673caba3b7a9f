use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::entities::sale::SaleStatus;

/// A sale produced by add-to-cart or checkout
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Sale {
    /// UUID v4
    #[schema(example = "3f0c2a4e-5b1d-4c8e-9a6f-2d7b1e0c9a11")]
    pub id: String,
    #[schema(value_type = String, example = "30.00")]
    pub total_amount: Decimal,
    pub status: SaleStatus,
}

impl Sale {
    /// Fresh pending sale with a zero total
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            total_amount: Decimal::ZERO,
            status: SaleStatus::Pending,
        }
    }
}

impl Default for Sale {
    fn default() -> Self {
        Self::new()
    }
}

/// Payment presented at checkout
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct PaymentInfo {
    #[schema(example = "CASH")]
    pub method: String,
    #[serde(alias = "amountPaid")]
    #[schema(value_type = String, example = "20.00")]
    pub amount_paid: Decimal,
}
