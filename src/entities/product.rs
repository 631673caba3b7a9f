use rust_decimal::Decimal;
use sea_orm::entity::prelude::*;
use sea_orm::{ActiveValue, ActiveValue::Set, ConnectionTrait};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Product entity
///
/// Standard and perishable products live in the same table; `kind` tells
/// them apart and `expiry_date` is only meaningful for perishables.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "products")]
pub struct Model {
    /// Primary key, assigned by the store on insert
    #[sea_orm(primary_key)]
    pub id: i64,

    /// Product name
    pub name: String,

    /// Unit price
    #[sea_orm(column_type = "Decimal(Some((10, 2)))")]
    pub price: Decimal,

    /// Units in stock
    pub quantity: Option<i32>,

    /// Product variant discriminator
    pub kind: ProductKind,

    /// Expiry date for perishable products
    pub expiry_date: Option<Date>,
}

/// Product variant stored in the `kind` column
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    EnumIter,
    DeriveActiveEnum,
    ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
#[serde(rename_all = "snake_case")]
pub enum ProductKind {
    #[sea_orm(string_value = "standard")]
    Standard,
    #[sea_orm(string_value = "perishable")]
    Perishable,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

#[async_trait::async_trait]
impl ActiveModelBehavior for ActiveModel {
    async fn before_save<C>(self, _db: &C, insert: bool) -> Result<Self, DbErr>
    where
        C: ConnectionTrait,
    {
        let mut active_model = self;

        if insert {
            if let ActiveValue::NotSet = active_model.kind {
                active_model.kind = Set(ProductKind::Standard);
            }
        }

        // Only perishables carry an expiry date
        if let ActiveValue::Set(ProductKind::Standard) = active_model.kind {
            active_model.expiry_date = Set(None);
        }

        Ok(active_model)
    }
}
