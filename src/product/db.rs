//! Database operations for products.

use std::collections::HashMap;

use rusqlite::Connection;

use crate::{Error, category::CategoryId};

/// Database identifier for a product.
pub type ProductId = i64;

/// A product that may belong to a category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub category_id: Option<CategoryId>,
}

/// Create a product and return it with its generated ID.
///
/// # Errors
///
/// Returns an error if `category_id` does not refer to an existing category.
pub fn create_product(
    name: &str,
    category_id: Option<CategoryId>,
    connection: &Connection,
) -> Result<Product, Error> {
    connection.execute(
        "INSERT INTO product (name, category_id) VALUES (?1, ?2);",
        (name, category_id),
    )?;

    Ok(Product {
        id: connection.last_insert_rowid(),
        name: name.to_owned(),
        category_id,
    })
}

/// Count the products in each category with a single aggregate query.
///
/// Categories without products are absent from the returned map.
pub fn count_products_per_category(
    connection: &Connection,
) -> Result<HashMap<CategoryId, u32>, Error> {
    let result: Result<HashMap<CategoryId, u32>, rusqlite::Error> = connection
        .prepare(
            "SELECT category_id, COUNT(1) FROM product WHERE category_id IS NOT NULL GROUP BY category_id",
        )?
        .query_map((), |row| {
            let category_id = row.get(0)?;
            let count = row.get(1)?;

            Ok((category_id, count))
        })?
        .collect();

    result.map_err(Error::from)
}

/// Initialize the product table and indexes.
///
/// Deleting a category clears the category of its products rather than
/// deleting them.
pub fn create_product_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute_batch(
        "CREATE TABLE IF NOT EXISTS product (
            id INTEGER PRIMARY KEY,
            name TEXT NOT NULL,
            category_id INTEGER,
            FOREIGN KEY(category_id) REFERENCES category(id) ON UPDATE CASCADE ON DELETE SET NULL
        );

        CREATE INDEX IF NOT EXISTS idx_product_category ON product(category_id);",
    )?;

    Ok(())
}
