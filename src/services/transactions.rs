use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::{fmt, str::FromStr, sync::Arc};
use tracing::{info, instrument, warn};

use crate::entities::sale::SaleStatus;
use crate::errors::ServiceError;
use crate::models::{parse_product_id, PaymentInfo, Sale};
use crate::repositories::{ProductStore, SaleStore};

/// Unit price charged per item when carts are not priced from the catalog
pub const PLACEHOLDER_UNIT_PRICE: Decimal = dec!(10.00);

/// Where add-to-cart takes its unit price from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CartPricing {
    /// Every item costs [`PLACEHOLDER_UNIT_PRICE`]; the product id is ignored
    #[default]
    Placeholder,
    /// The stored price of the product
    Catalog,
}

impl FromStr for CartPricing {
    type Err = ServiceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "placeholder" => Ok(Self::Placeholder),
            "catalog" => Ok(Self::Catalog),
            other => Err(ServiceError::InvalidInput(format!(
                "Unknown cart pricing mode '{}'",
                other
            ))),
        }
    }
}

impl fmt::Display for CartPricing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Placeholder => f.write_str("placeholder"),
            Self::Catalog => f.write_str("catalog"),
        }
    }
}

/// Produces sales for add-to-cart and checkout. Holds no cart state: every
/// call starts a fresh sale.
#[derive(Clone)]
pub struct TransactionService {
    products: Arc<dyn ProductStore>,
    pricing: CartPricing,
    journal: Option<Arc<dyn SaleStore>>,
}

impl TransactionService {
    pub fn new(products: Arc<dyn ProductStore>, pricing: CartPricing) -> Self {
        Self {
            products,
            pricing,
            journal: None,
        }
    }

    /// Records every returned sale in `journal`
    pub fn with_journal(mut self, journal: Arc<dyn SaleStore>) -> Self {
        self.journal = Some(journal);
        self
    }

    pub fn pricing(&self) -> CartPricing {
        self.pricing
    }

    pub fn start_new_sale(&self) -> Sale {
        let sale = Sale::new();
        info!(sale_id = %sale.id, "Started new sale");
        sale
    }

    /// Prices `quantity` units of `product_id` on a new pending sale
    #[instrument(skip(self))]
    pub async fn add_item_to_cart(
        &self,
        product_id: &str,
        quantity: i32,
    ) -> Result<Sale, ServiceError> {
        let unit_price = self.unit_price(product_id).await?;

        let total = unit_price
            .checked_mul(Decimal::from(quantity))
            .ok_or_else(|| {
                ServiceError::InvalidInput(format!(
                    "Cart total for {} x {} is out of range",
                    quantity, unit_price
                ))
            })?;

        let mut sale = self.start_new_sale();
        sale.total_amount = total;

        self.journal(&sale, None).await?;
        info!(
            sale_id = %sale.id,
            total = %sale.total_amount,
            pricing = %self.pricing,
            "Item added to cart"
        );
        Ok(sale)
    }

    /// Completes a new sale. Payment is accepted as presented.
    #[instrument(skip(self, payment), fields(method = %payment.method))]
    pub async fn process_checkout(&self, payment: PaymentInfo) -> Result<Sale, ServiceError> {
        let mut sale = self.start_new_sale();
        sale.status = SaleStatus::Completed;

        self.journal(&sale, Some(&payment)).await?;
        info!(
            sale_id = %sale.id,
            amount_paid = %payment.amount_paid,
            "Checkout completed"
        );
        Ok(sale)
    }

    async fn unit_price(&self, product_id: &str) -> Result<Decimal, ServiceError> {
        match self.pricing {
            CartPricing::Placeholder => Ok(PLACEHOLDER_UNIT_PRICE),
            CartPricing::Catalog => {
                let not_found =
                    || ServiceError::NotFound(format!("Product {} not found", product_id));
                let id = parse_product_id(product_id).ok_or_else(not_found)?;
                let product = self.products.get_by_id(id).await?.ok_or_else(|| {
                    warn!(product_id = id, "Cart item references unknown product");
                    not_found()
                })?;
                Ok(product.price)
            }
        }
    }

    async fn journal(&self, sale: &Sale, payment: Option<&PaymentInfo>) -> Result<(), ServiceError> {
        match &self.journal {
            Some(store) => store.record(sale, payment).await,
            None => Ok(()),
        }
    }
}
