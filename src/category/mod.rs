//! Category management for grouping products.

mod create;
mod db;
mod delete;
mod domain;
mod edit;
mod get;
mod list;
mod search;

pub use create::create_category_endpoint;
pub use db::{
    CategoryUpdate, create_category, create_category_table, delete_category, get_all_categories,
    get_category, search_categories, update_category,
};
pub use delete::delete_category_endpoint;
pub use domain::{
    Category, CategoryId, CategoryName, CategoryWithCount, CreateCategoryData, SearchQuery,
    UpdateCategoryData, normalize_description,
};
pub use edit::update_category_endpoint;
pub use get::get_category_endpoint;
pub use list::list_categories_endpoint;
pub use search::search_categories_endpoint;
