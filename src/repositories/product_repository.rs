use async_trait::async_trait;
use metrics::counter;
use sea_orm::sea_query::{Expr, Func, LikeExpr};
use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, DatabaseConnection, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, Set,
};
use std::sync::Arc;
use tracing::debug;

use crate::entities::product::{ActiveModel, Column, Entity as ProductEntity, Model};
use crate::errors::ServiceError;
use crate::models::{Product, ProductId};
use crate::repositories::Repository;

use super::BaseRepository;

const LIKE_ESCAPE: char = '\\';

/// Persistence for catalog products
#[async_trait]
pub trait ProductStore: Send + Sync {
    /// Every product, ordered by id
    async fn get_all(&self) -> Result<Vec<Product>, ServiceError>;

    async fn get_by_id(&self, id: ProductId) -> Result<Option<Product>, ServiceError>;

    /// Inserts when `id` is `None` or unknown, otherwise overwrites every field
    async fn save(&self, product: Product) -> Result<Product, ServiceError>;

    async fn exists_by_id(&self, id: ProductId) -> Result<bool, ServiceError>;

    /// Returns `false` when nothing was deleted
    async fn delete_by_id(&self, id: ProductId) -> Result<bool, ServiceError>;

    /// Case-insensitive substring match on name, ordered by id
    async fn find_by_name_contains(&self, text: &str) -> Result<Vec<Product>, ServiceError>;
}

/// Escapes LIKE wildcards so user text matches literally
pub(crate) fn escape_like(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        if matches!(ch, '%' | '_' | LIKE_ESCAPE) {
            escaped.push(LIKE_ESCAPE);
        }
        escaped.push(ch);
    }
    escaped
}

fn to_products(models: Vec<Model>) -> Result<Vec<Product>, ServiceError> {
    models.into_iter().map(Product::try_from).collect()
}

/// sea-orm backed [`ProductStore`]
#[derive(Debug, Clone)]
pub struct ProductRepository {
    base: BaseRepository,
}

impl ProductRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    fn active_model(product: &Product) -> ActiveModel {
        ActiveModel {
            id: product.id.map(Set).unwrap_or(NotSet),
            name: Set(product.name.clone()),
            price: Set(product.price),
            quantity: Set(product.quantity),
            kind: Set(product.variant.kind()),
            expiry_date: Set(product.variant.expiry_date()),
        }
    }
}

#[async_trait]
impl ProductStore for ProductRepository {
    async fn get_all(&self) -> Result<Vec<Product>, ServiceError> {
        let models = ProductEntity::find()
            .order_by_asc(Column::Id)
            .all(self.base.get_db())
            .await?;
        to_products(models)
    }

    async fn get_by_id(&self, id: ProductId) -> Result<Option<Product>, ServiceError> {
        ProductEntity::find_by_id(id)
            .one(self.base.get_db())
            .await?
            .map(Product::try_from)
            .transpose()
    }

    async fn save(&self, product: Product) -> Result<Product, ServiceError> {
        let db = self.base.get_db();
        let model = Self::active_model(&product);

        let saved = match product.id {
            Some(id) if self.exists_by_id(id).await? => {
                debug!(product_id = id, "Overwriting product");
                model.update(db).await?
            }
            _ => {
                let inserted = model.insert(db).await?;
                debug!(product_id = inserted.id, "Inserted product");
                inserted
            }
        };

        counter!("pos_db.products.saved", 1);
        Product::try_from(saved)
    }

    async fn exists_by_id(&self, id: ProductId) -> Result<bool, ServiceError> {
        let count = ProductEntity::find_by_id(id)
            .count(self.base.get_db())
            .await?;
        Ok(count > 0)
    }

    async fn delete_by_id(&self, id: ProductId) -> Result<bool, ServiceError> {
        let result = ProductEntity::delete_by_id(id)
            .exec(self.base.get_db())
            .await?;
        if result.rows_affected > 0 {
            counter!("pos_db.products.deleted", 1);
        }
        Ok(result.rows_affected > 0)
    }

    async fn find_by_name_contains(&self, text: &str) -> Result<Vec<Product>, ServiceError> {
        let pattern = format!("%{}%", escape_like(&text.to_lowercase()));
        let models = ProductEntity::find()
            .filter(
                Expr::expr(Func::lower(Expr::col(Column::Name)))
                    .like(LikeExpr::new(pattern).escape(LIKE_ESCAPE)),
            )
            .order_by_asc(Column::Id)
            .all(self.base.get_db())
            .await?;
        to_products(models)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::memory_pool;
    use crate::models::ProductVariant;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    async fn repository() -> ProductRepository {
        ProductRepository::new(Arc::new(memory_pool().await))
    }

    #[test]
    fn escape_like_escapes_wildcards() {
        assert_eq!(escape_like("50%_off"), "50\\%\\_off");
        assert_eq!(escape_like("a\\b"), "a\\\\b");
        assert_eq!(escape_like("plain"), "plain");
    }

    #[tokio::test]
    async fn save_without_id_assigns_one() {
        let repo = repository().await;

        let first = repo
            .save(Product::standard("Pen", dec!(1.50)).with_quantity(Some(0)))
            .await
            .unwrap();
        let second = repo
            .save(Product::standard("Pad", dec!(2.00)).with_quantity(Some(3)))
            .await
            .unwrap();

        let (a, b) = (first.id.unwrap(), second.id.unwrap());
        assert_ne!(a, b);
        assert_eq!(repo.get_by_id(a).await.unwrap(), Some(first));
    }

    #[tokio::test]
    async fn save_with_existing_id_overwrites() {
        let repo = repository().await;
        let expiry = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        let saved = repo
            .save(Product::perishable("Milk", dec!(3.00), expiry).with_quantity(Some(1)))
            .await
            .unwrap();
        let id = saved.id.unwrap();

        let mut changed = saved.clone();
        changed.name = "Oat Milk".into();
        changed.price = dec!(3.50);
        repo.save(changed).await.unwrap();

        let stored = repo.get_by_id(id).await.unwrap().unwrap();
        assert_eq!(stored.name, "Oat Milk");
        assert_eq!(stored.price, dec!(3.50));
        assert_eq!(stored.variant, ProductVariant::Perishable { expiry_date: expiry });
        assert_eq!(repo.get_all().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn save_with_unknown_id_inserts_with_that_id() {
        let repo = repository().await;

        let saved = repo
            .save(Product::standard("Stapler", dec!(7.25)).with_id(77))
            .await
            .unwrap();

        assert_eq!(saved.id, Some(77));
        assert!(repo.exists_by_id(77).await.unwrap());
    }

    #[tokio::test]
    async fn delete_reports_whether_a_row_was_removed() {
        let repo = repository().await;
        let id = repo
            .save(Product::standard("Pen", dec!(1.50)))
            .await
            .unwrap()
            .id
            .unwrap();

        assert!(repo.delete_by_id(id).await.unwrap());
        assert!(!repo.delete_by_id(id).await.unwrap());
        assert!(!repo.exists_by_id(id).await.unwrap());
    }

    #[tokio::test]
    async fn name_search_is_case_insensitive_and_literal() {
        let repo = repository().await;
        for name in ["Blue Pen", "PENCIL", "Notebook", "100% Cotton"] {
            repo.save(Product::standard(name, dec!(1.00))).await.unwrap();
        }

        let names: Vec<String> = repo
            .find_by_name_contains("pen")
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.name)
            .collect();
        assert_eq!(names, vec!["Blue Pen", "PENCIL"]);

        let literal = repo.find_by_name_contains("0%").await.unwrap();
        assert_eq!(literal.len(), 1);
        assert_eq!(literal[0].name, "100% Cotton");

        assert!(repo.find_by_name_contains("_").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn get_all_returns_both_variants_in_id_order() {
        let repo = repository().await;
        let expiry = NaiveDate::from_ymd_opt(2030, 6, 30).unwrap();
        repo.save(Product::standard("Pen", dec!(1.50))).await.unwrap();
        repo.save(Product::perishable("Milk", dec!(3.00), expiry))
            .await
            .unwrap();

        let all = repo.get_all().await.unwrap();
        assert_eq!(all.len(), 2);
        assert!(all[0].id < all[1].id);
        assert!(!all[0].is_perishable());
        assert!(all[1].is_perishable());
    }
}
