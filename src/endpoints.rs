//! The API endpoints URIs.
//!
//! For endpoints that take a parameter, e.g., '/api/categories/{category_id}', use [format_endpoint].

/// The route to create and list categories.
pub const CATEGORIES: &str = "/api/categories";
/// The route to get, update and delete a single category.
pub const CATEGORY: &str = "/api/categories/{category_id}";
/// The route to search categories by name and description.
pub const SEARCH_CATEGORIES: &str = "/api/categories/search";

/// Replace the parameter in `endpoint_path` with `id`.
///
/// Assumes that the parameter is at the end of the path, e.g.
/// '/api/categories/{category_id}'.
pub fn format_endpoint(endpoint_path: &str, id: i64) -> String {
    match endpoint_path.find('{') {
        Some(param_start) => format!("{}{}", &endpoint_path[..param_start], id),
        None => endpoint_path.to_owned(),
    }
}
