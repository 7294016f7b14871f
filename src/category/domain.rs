//! Core category domain types.

use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::Error;

/// A validated, non-empty category name.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Hash)]
pub struct CategoryName(String);

impl CategoryName {
    /// Create a category name from `name` with surrounding whitespace removed.
    ///
    /// # Errors
    ///
    /// This function will return an [Error::EmptyCategoryName] if `name` is empty or only whitespace.
    pub fn new(name: &str) -> Result<Self, Error> {
        let name = name.trim();

        if name.is_empty() {
            Err(Error::EmptyCategoryName)
        } else {
            Ok(Self(name.to_string()))
        }
    }

    /// Create a category name without validation.
    ///
    /// The caller should ensure that the string is not empty and trimmed.
    ///
    /// This function has `_unchecked` in the name but is not `unsafe`, because if the non-empty invariant is violated it will cause incorrect behaviour but not affect memory safety.
    pub fn new_unchecked(name: &str) -> Self {
        Self(name.to_string())
    }
}

impl AsRef<str> for CategoryName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl FromStr for CategoryName {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CategoryName::new(s)
    }
}

impl Display for CategoryName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Trim a category description, treating a blank description as no description.
pub fn normalize_description(description: Option<&str>) -> Option<String> {
    description
        .map(str::trim)
        .filter(|description| !description.is_empty())
        .map(str::to_owned)
}

/// Database identifier for a category.
pub type CategoryId = i64;

/// A named grouping of products (e.g., 'Shoes', 'Kitchenware').
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: CategoryId,
    pub name: CategoryName,
    pub description: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

/// A category with the number of products that reference it.
///
/// The count is computed when the category is read and is not stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryWithCount {
    #[serde(flatten)]
    pub category: Category,
    pub product_count: u32,
}

/// Request body for creating a category.
///
/// `name` is optional here so that a missing name is reported as a
/// validation error rather than a deserialization failure.
#[derive(Debug, Default, Deserialize)]
pub struct CreateCategoryData {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

/// Request body for updating a category. Absent fields are left unchanged.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateCategoryData {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

/// Query string for searching categories.
#[derive(Debug, Default, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub query: Option<String>,
}


#[cfg(test)]
mod normalize_description_tests {
    use super::normalize_description;

    #[test]
    fn trims_description() {
        assert_eq!(
            normalize_description(Some("  Things for feet ")),
            Some("Things for feet".to_owned())
        );
    }

    #[test]
    fn blank_description_becomes_none() {
        assert_eq!(normalize_description(Some("   ")), None);
        assert_eq!(normalize_description(None), None);
    }
}
