//! Products, as far as categories need to know about them.
//!
//! Managing the product catalogue is handled elsewhere; this module only
//! owns the product table's link to categories and counts products per
//! category.

mod db;

pub use db::{
    Product, ProductId, count_products_per_category, create_product, create_product_table,
};
