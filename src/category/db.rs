//! Database operations for categories.

use rusqlite::{Connection, Row};

use crate::{
    Error,
    category::{Category, CategoryId, CategoryName},
    db::current_timestamp,
};

/// The changes to apply to an existing category.
///
/// `None` leaves a field unchanged. For the description, `Some(None)` clears it.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CategoryUpdate {
    pub name: Option<CategoryName>,
    pub description: Option<Option<String>>,
}

/// Create a category and return it with its generated ID and timestamps.
///
/// # Errors
///
/// Returns [Error::DuplicateCategoryName] if another category already uses `name`.
pub fn create_category(
    name: CategoryName,
    description: Option<String>,
    connection: &Connection,
) -> Result<Category, Error> {
    let now = current_timestamp();

    connection.execute(
        "INSERT INTO category (name, description, created_at, updated_at) VALUES (?1, ?2, ?3, ?3);",
        (name.as_ref(), &description, now),
    )?;

    let id = connection.last_insert_rowid();

    Ok(Category {
        id,
        name,
        description,
        created_at: now,
        updated_at: now,
    })
}

/// Retrieve a single category by ID.
pub fn get_category(category_id: CategoryId, connection: &Connection) -> Result<Category, Error> {
    connection
        .prepare(
            "SELECT id, name, description, created_at, updated_at FROM category WHERE id = :id;",
        )?
        .query_row(&[(":id", &category_id)], map_row)
        .map_err(|error| error.into())
}

/// Retrieve all categories ordered alphabetically by name.
pub fn get_all_categories(connection: &Connection) -> Result<Vec<Category>, Error> {
    connection
        .prepare(
            "SELECT id, name, description, created_at, updated_at FROM category ORDER BY name ASC;",
        )?
        .query_map([], map_row)?
        .map(|maybe_category| maybe_category.map_err(|error| error.into()))
        .collect()
}

/// Retrieve the categories whose name or description contains `query`,
/// ignoring ASCII case, ordered by name.
///
/// `query` is matched as a plain substring, so characters such as '%', '_' or
/// '.' have no special meaning.
pub fn search_categories(query: &str, connection: &Connection) -> Result<Vec<Category>, Error> {
    connection
        .prepare(
            "SELECT id, name, description, created_at, updated_at FROM category
            WHERE instr(lower(name), lower(:query)) > 0
                OR instr(lower(COALESCE(description, '')), lower(:query)) > 0
            ORDER BY name ASC;",
        )?
        .query_map(&[(":query", &query)], map_row)?
        .map(|maybe_category| maybe_category.map_err(|error| error.into()))
        .collect()
}

/// Apply `update` to a category and return the updated category.
///
/// The `updated_at` timestamp is refreshed even if no fields change.
///
/// # Errors
///
/// Returns [Error::UpdateMissingCategory] if the category doesn't exist, or
/// [Error::DuplicateCategoryName] if the new name is used by another category.
pub fn update_category(
    category_id: CategoryId,
    update: CategoryUpdate,
    connection: &Connection,
) -> Result<Category, Error> {
    let name: Option<&str> = update.name.as_ref().map(|name| name.as_ref());
    let replace_description = update.description.is_some();
    let description = update.description.flatten();

    let rows_affected = connection.execute(
        "UPDATE category
        SET name = COALESCE(?1, name),
            description = CASE WHEN ?2 THEN ?3 ELSE description END,
            updated_at = ?4
        WHERE id = ?5",
        (
            name,
            replace_description,
            description,
            current_timestamp(),
            category_id,
        ),
    )?;

    if rows_affected == 0 {
        return Err(Error::UpdateMissingCategory);
    }

    get_category(category_id, connection)
}

/// Delete a category by ID and return the deleted category.
///
/// # Errors
///
/// Returns [Error::DeleteMissingCategory] if the category doesn't exist.
pub fn delete_category(
    category_id: CategoryId,
    connection: &Connection,
) -> Result<Category, Error> {
    connection
        .prepare(
            "DELETE FROM category WHERE id = ?1
            RETURNING id, name, description, created_at, updated_at",
        )?
        .query_row([category_id], map_row)
        .map_err(|error| match error {
            rusqlite::Error::QueryReturnedNoRows => Error::DeleteMissingCategory,
            error => error.into(),
        })
}

/// Initialize the category table and indexes.
pub fn create_category_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute_batch(
        "CREATE TABLE IF NOT EXISTS category (
            id INTEGER PRIMARY KEY,
            name TEXT NOT NULL UNIQUE,
            description TEXT,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_category_name ON category(name);",
    )?;

    Ok(())
}

fn map_row(row: &Row) -> Result<Category, rusqlite::Error> {
    let id = row.get(0)?;
    let raw_name: String = row.get(1)?;
    let name = CategoryName::new_unchecked(&raw_name);
    let description = row.get(2)?;
    let created_at = row.get(3)?;
    let updated_at = row.get(4)?;

    Ok(Category {
        id,
        name,
        description,
        created_at,
        updated_at,
    })
}

#[cfg(test)]
mod category_query_tests {
    use std::collections::HashSet;

    use rusqlite::Connection;

    use crate::{
        Error,
        category::{CategoryName, create_category, get_all_categories, get_category},
    };

    use super::{
        CategoryUpdate, create_category_table, delete_category, search_categories,
        update_category,
    };

    fn get_test_db_connection() -> Connection {
        let connection = Connection::open_in_memory().unwrap();
        create_category_table(&connection).expect("Could not create category table");
        connection
    }

    #[test]
    fn create_category_succeeds() {
        let connection = get_test_db_connection();
        let name = CategoryName::new("Shoes").unwrap();

        let category = create_category(name.clone(), Some("For feet".to_owned()), &connection);

        let got = category.expect("Could not create category");
        assert!(got.id > 0);
        assert_eq!(got.name, name);
        assert_eq!(got.description.as_deref(), Some("For feet"));
        assert_eq!(got.created_at, got.updated_at);
    }

    #[test]
    fn create_category_with_duplicate_name_fails() {
        let connection = get_test_db_connection();
        create_category(CategoryName::new_unchecked("Shoes"), None, &connection).unwrap();

        let result = create_category(CategoryName::new_unchecked("Shoes"), None, &connection);

        assert_eq!(result, Err(Error::DuplicateCategoryName));
        assert_eq!(get_all_categories(&connection).unwrap().len(), 1);
    }

    #[test]
    fn names_are_unique_case_sensitively() {
        let connection = get_test_db_connection();
        create_category(CategoryName::new_unchecked("Shoes"), None, &connection).unwrap();

        let result = create_category(CategoryName::new_unchecked("shoes"), None, &connection);

        assert!(result.is_ok());
    }

    #[test]
    fn get_category_succeeds() {
        let connection = get_test_db_connection();
        let inserted = create_category(
            CategoryName::new_unchecked("Foo"),
            Some("Bar".to_owned()),
            &connection,
        )
        .expect("Could not create test category");

        let selected = get_category(inserted.id, &connection);

        assert_eq!(Ok(inserted), selected);
    }

    #[test]
    fn get_category_with_invalid_id_returns_not_found() {
        let connection = get_test_db_connection();
        let inserted = create_category(CategoryName::new_unchecked("Foo"), None, &connection)
            .expect("Could not create test category");

        let selected = get_category(inserted.id + 123, &connection);

        assert_eq!(selected, Err(Error::NotFound));
    }

    #[test]
    fn get_all_categories_returns_every_category() {
        let connection = get_test_db_connection();
        let inserted: HashSet<_> = ["Foo", "Bar"]
            .into_iter()
            .map(|name| {
                create_category(CategoryName::new_unchecked(name), None, &connection)
                    .expect("Could not create test category")
                    .id
            })
            .collect();

        let selected: HashSet<_> = get_all_categories(&connection)
            .expect("Could not get all categories")
            .into_iter()
            .map(|category| category.id)
            .collect();

        assert_eq!(inserted, selected);
    }

    #[test]
    fn search_matches_name_and_description_ignoring_case() {
        let connection = get_test_db_connection();
        let footwear =
            create_category(CategoryName::new_unchecked("Footwear"), None, &connection).unwrap();
        let boots = create_category(
            CategoryName::new_unchecked("Boots"),
            Some("Outdoor WEAR for hikers".to_owned()),
            &connection,
        )
        .unwrap();
        create_category(
            CategoryName::new_unchecked("Kitchen"),
            Some("Pots and pans".to_owned()),
            &connection,
        )
        .unwrap();

        let got: HashSet<_> = search_categories("wear", &connection)
            .unwrap()
            .into_iter()
            .map(|category| category.id)
            .collect();

        assert_eq!(got, HashSet::from([footwear.id, boots.id]));
    }

    #[test]
    fn search_treats_query_as_plain_text() {
        let connection = get_test_db_connection();
        create_category(CategoryName::new_unchecked("Shoes"), None, &connection).unwrap();
        let discounts = create_category(
            CategoryName::new_unchecked("Discounts"),
            Some("Up to 50% off".to_owned()),
            &connection,
        )
        .unwrap();

        for query in [".*", "%", "_", "S%s"] {
            let got = search_categories(query, &connection).unwrap();

            if query == "%" {
                assert_eq!(got, vec![discounts.clone()]);
            } else {
                assert!(got.is_empty(), "{query:?} matched {got:?}");
            }
        }
    }

    #[test]
    fn search_returns_matches_ordered_by_name() {
        let connection = get_test_db_connection();
        for name in ["Outerwear", "Hats", "Footwear"] {
            create_category(CategoryName::new_unchecked(name), None, &connection).unwrap();
        }

        let names: Vec<_> = search_categories("WEAR", &connection)
            .unwrap()
            .into_iter()
            .map(|category| category.name.to_string())
            .collect();

        assert_eq!(names, vec!["Footwear", "Outerwear"]);
    }

    #[test]
    fn update_category_name_keeps_description() {
        let connection = get_test_db_connection();
        let category = create_category(
            CategoryName::new_unchecked("Original"),
            Some("Unchanged".to_owned()),
            &connection,
        )
        .unwrap();

        let update = CategoryUpdate {
            name: Some(CategoryName::new_unchecked("Updated")),
            description: None,
        };
        let updated = update_category(category.id, update, &connection).unwrap();

        assert_eq!(updated.id, category.id);
        assert_eq!(updated.name.as_ref(), "Updated");
        assert_eq!(updated.description.as_deref(), Some("Unchanged"));
        assert_eq!(updated.created_at, category.created_at);
    }

    #[test]
    fn update_category_can_clear_description() {
        let connection = get_test_db_connection();
        let category = create_category(
            CategoryName::new_unchecked("Shoes"),
            Some("Old".to_owned()),
            &connection,
        )
        .unwrap();

        let update = CategoryUpdate {
            name: None,
            description: Some(None),
        };
        let updated = update_category(category.id, update, &connection).unwrap();

        assert_eq!(updated.name.as_ref(), "Shoes");
        assert_eq!(updated.description, None);
    }

    #[test]
    fn update_category_with_invalid_id_returns_error() {
        let connection = get_test_db_connection();

        let result = update_category(999999, CategoryUpdate::default(), &connection);

        assert_eq!(result, Err(Error::UpdateMissingCategory));
    }

    #[test]
    fn update_category_to_existing_name_fails() {
        let connection = get_test_db_connection();
        create_category(CategoryName::new_unchecked("Shoes"), None, &connection).unwrap();
        let hats = create_category(CategoryName::new_unchecked("Hats"), None, &connection).unwrap();

        let update = CategoryUpdate {
            name: Some(CategoryName::new_unchecked("Shoes")),
            description: None,
        };
        let result = update_category(hats.id, update, &connection);

        assert_eq!(result, Err(Error::DuplicateCategoryName));
    }

    #[test]
    fn delete_category_returns_deleted_category() {
        let connection = get_test_db_connection();
        let category =
            create_category(CategoryName::new_unchecked("ToDelete"), None, &connection).unwrap();

        let deleted = delete_category(category.id, &connection);

        assert_eq!(deleted, Ok(category.clone()));
        assert_eq!(get_category(category.id, &connection), Err(Error::NotFound));
    }

    #[test]
    fn delete_category_with_invalid_id_returns_error() {
        let connection = get_test_db_connection();

        let result = delete_category(999999, &connection);

        assert_eq!(result, Err(Error::DeleteMissingCategory));
    }
}
