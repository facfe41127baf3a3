//! Catalog domain module.
//!
//! This crate contains business rules for products, implemented purely as
//! deterministic domain logic (no IO, no HTTP, no storage).

pub mod category;
pub mod product;

pub use category::Category;
pub use product::{
    ApplyDiscount, CreateProduct, DiscountApplied, Product, ProductCommand, ProductCreated,
    ProductEvent, ProductId, Restock, SaleCompleted, SaleRejected, SaleRejection, Sell,
    StockRestocked, MAX_DISCOUNT,
};
