//! Domain values passed between handlers, services and stores.

pub mod product;
pub mod sale;

pub use product::{parse_product_id, Product, ProductDetails, ProductId, ProductVariant};
pub use sale::{PaymentInfo, Sale};
