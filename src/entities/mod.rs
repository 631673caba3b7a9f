pub mod product;
pub mod sale;
