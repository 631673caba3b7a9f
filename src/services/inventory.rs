use std::sync::Arc;
use tracing::{info, instrument};

use crate::errors::ServiceError;
use crate::models::{parse_product_id, Product, ProductDetails, ProductVariant};
use crate::repositories::ProductStore;

/// Catalog operations over a [`ProductStore`]
///
/// Identifiers arrive as raw strings from paths and queries. One that does not
/// parse is handled exactly like an id with no product behind it.
#[derive(Clone)]
pub struct InventoryService {
    store: Arc<dyn ProductStore>,
}

impl InventoryService {
    pub fn new(store: Arc<dyn ProductStore>) -> Self {
        Self { store }
    }

    /// Lists every product, or the name matches for a non-blank search term.
    /// A term that is also the id of an existing product puts that product
    /// first.
    #[instrument(skip(self))]
    pub async fn list_products(&self, search: Option<&str>) -> Result<Vec<Product>, ServiceError> {
        let term = match search.map(str::trim).filter(|term| !term.is_empty()) {
            Some(term) => term,
            None => return self.store.get_all().await,
        };

        let mut products = self.store.find_by_name_contains(term).await?;

        if let Some(id) = parse_product_id(term) {
            if !products.iter().any(|p| p.id == Some(id)) {
                if let Some(product) = self.store.get_by_id(id).await? {
                    products.insert(0, product);
                }
            }
        }

        info!(count = products.len(), "Product search completed");
        Ok(products)
    }

    #[instrument(skip(self))]
    pub async fn get_product(&self, id: &str) -> Result<Option<Product>, ServiceError> {
        match parse_product_id(id) {
            Some(id) => self.store.get_by_id(id).await,
            None => Ok(None),
        }
    }

    /// Creates a product with a store-assigned id
    #[instrument(skip(self, product), fields(name = %product.name))]
    pub async fn add_product(&self, mut product: Product) -> Result<Product, ServiceError> {
        product.id = None;
        if product.quantity.is_none() {
            product.quantity = Some(product.variant.default_quantity());
        }

        let created = self.store.save(product).await?;
        info!(
            product_id = ?created.id,
            perishable = created.is_perishable(),
            "Product created"
        );
        Ok(created)
    }

    /// Overwrites name and price. The expiry date only changes when both the
    /// stored product and the update are perishable. Returns `false` when
    /// there is no such product.
    #[instrument(skip(self, details))]
    pub async fn update_product(
        &self,
        id: &str,
        details: ProductDetails,
    ) -> Result<bool, ServiceError> {
        let Some(id) = parse_product_id(id) else {
            return Ok(false);
        };
        let Some(mut product) = self.store.get_by_id(id).await? else {
            return Ok(false);
        };

        product.name = details.name;
        product.price = details.price;
        match (&mut product.variant, details.expiry_date) {
            (ProductVariant::Perishable { expiry_date }, Some(incoming)) => *expiry_date = incoming,
            (ProductVariant::Perishable { .. }, None) | (ProductVariant::Standard, _) => {}
        }

        self.store.save(product).await?;
        info!(product_id = id, "Product updated");
        Ok(true)
    }

    #[instrument(skip(self))]
    pub async fn delete_product(&self, id: &str) -> Result<bool, ServiceError> {
        let Some(id) = parse_product_id(id) else {
            return Ok(false);
        };

        let deleted = self.store.delete_by_id(id).await?;
        if deleted {
            info!(product_id = id, "Product deleted");
        }
        Ok(deleted)
    }
}
