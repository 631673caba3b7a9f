use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::entities::product::{self, ProductKind};
use crate::errors::ServiceError;

/// Numeric product identifier assigned by the store
pub type ProductId = i64;

/// Parses a path or query identifier. Anything that is not an `i64` yields
/// `None`, which callers treat as "not found".
pub fn parse_product_id(raw: &str) -> Option<ProductId> {
    raw.trim().parse().ok()
}

/// Standard or perishable product
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ProductVariant {
    Standard,
    Perishable { expiry_date: NaiveDate },
}

impl ProductVariant {
    pub fn kind(&self) -> ProductKind {
        match self {
            ProductVariant::Standard => ProductKind::Standard,
            ProductVariant::Perishable { .. } => ProductKind::Perishable,
        }
    }

    pub fn is_perishable(&self) -> bool {
        matches!(self, ProductVariant::Perishable { .. })
    }

    pub fn expiry_date(&self) -> Option<NaiveDate> {
        match self {
            ProductVariant::Standard => None,
            ProductVariant::Perishable { expiry_date } => Some(*expiry_date),
        }
    }

    /// Default stock for a newly created product without a quantity
    pub fn default_quantity(&self) -> i32 {
        match self {
            ProductVariant::Standard => 0,
            ProductVariant::Perishable { .. } => 1,
        }
    }
}

/// A catalog product
#[derive(Clone, Debug, PartialEq)]
pub struct Product {
    /// `None` until the store assigns one
    pub id: Option<ProductId>,
    pub name: String,
    pub price: Decimal,
    pub quantity: Option<i32>,
    pub variant: ProductVariant,
}

impl Product {
    pub fn standard(name: impl Into<String>, price: Decimal) -> Self {
        Self {
            id: None,
            name: name.into(),
            price,
            quantity: None,
            variant: ProductVariant::Standard,
        }
    }

    pub fn perishable(name: impl Into<String>, price: Decimal, expiry_date: NaiveDate) -> Self {
        Self {
            id: None,
            name: name.into(),
            price,
            quantity: None,
            variant: ProductVariant::Perishable { expiry_date },
        }
    }

    pub fn with_quantity(mut self, quantity: Option<i32>) -> Self {
        self.quantity = quantity;
        self
    }

    pub fn with_id(mut self, id: ProductId) -> Self {
        self.id = Some(id);
        self
    }

    pub fn is_perishable(&self) -> bool {
        self.variant.is_perishable()
    }
}

impl TryFrom<product::Model> for Product {
    type Error = ServiceError;

    fn try_from(model: product::Model) -> Result<Self, Self::Error> {
        let variant = match (model.kind, model.expiry_date) {
            (ProductKind::Standard, _) => ProductVariant::Standard,
            (ProductKind::Perishable, Some(expiry_date)) => {
                ProductVariant::Perishable { expiry_date }
            }
            (ProductKind::Perishable, None) => {
                return Err(ServiceError::InternalError(format!(
                    "Perishable product {} has no expiry date",
                    model.id
                )))
            }
        };

        Ok(Self {
            id: Some(model.id),
            name: model.name,
            price: model.price,
            quantity: model.quantity,
            variant,
        })
    }
}

/// Fields accepted by a product update. Carrying an expiry date makes it a
/// perishable update.
#[derive(Clone, Debug, PartialEq)]
pub struct ProductDetails {
    pub name: String,
    pub price: Decimal,
    pub expiry_date: Option<NaiveDate>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use rust_decimal_macros::dec;

    fn milk_expiry() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, 1).unwrap()
    }

    #[rstest]
    #[case("42", Some(42))]
    #[case(" 7 ", Some(7))]
    #[case("-3", Some(-3))]
    #[case("abc", None)]
    #[case("", None)]
    #[case("1.5", None)]
    #[case("99999999999999999999", None)]
    fn parses_product_ids(#[case] raw: &str, #[case] expected: Option<ProductId>) {
        assert_eq!(parse_product_id(raw), expected);
    }

    #[test]
    fn variant_drives_defaults_and_flags() {
        let pen = Product::standard("Pen", dec!(1.50));
        assert!(!pen.is_perishable());
        assert_eq!(pen.variant.default_quantity(), 0);
        assert_eq!(pen.variant.kind(), ProductKind::Standard);
        assert_eq!(pen.variant.expiry_date(), None);

        let milk = Product::perishable("Milk", dec!(3.00), milk_expiry());
        assert!(milk.is_perishable());
        assert_eq!(milk.variant.default_quantity(), 1);
        assert_eq!(milk.variant.kind(), ProductKind::Perishable);
        assert_eq!(milk.variant.expiry_date(), Some(milk_expiry()));
    }

    #[test]
    fn model_conversion_rebuilds_variant() {
        let model = product::Model {
            id: 5,
            name: "Milk".into(),
            price: dec!(3.00),
            quantity: Some(1),
            kind: ProductKind::Perishable,
            expiry_date: Some(milk_expiry()),
        };

        let product = Product::try_from(model).unwrap();
        assert_eq!(product.id, Some(5));
        assert_eq!(
            product.variant,
            ProductVariant::Perishable {
                expiry_date: milk_expiry()
            }
        );
    }

    #[test]
    fn standard_row_ignores_stray_expiry_date() {
        let model = product::Model {
            id: 1,
            name: "Pen".into(),
            price: dec!(1.50),
            quantity: Some(0),
            kind: ProductKind::Standard,
            expiry_date: Some(milk_expiry()),
        };

        let product = Product::try_from(model).unwrap();
        assert_eq!(product.variant, ProductVariant::Standard);
    }

    #[test]
    fn perishable_row_without_expiry_is_rejected() {
        let model = product::Model {
            id: 9,
            name: "Yogurt".into(),
            price: dec!(0.99),
            quantity: None,
            kind: ProductKind::Perishable,
            expiry_date: None,
        };

        assert!(matches!(
            Product::try_from(model),
            Err(ServiceError::InternalError(_))
        ));
    }
}
