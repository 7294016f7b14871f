use std::error::Error;
use std::path::Path;
use std::process::exit;

use clap::Parser;
use rusqlite::Connection;

use category_service::{
    category::{CategoryName, create_category},
    initialize_db,
    product::create_product,
};

/// A utility for creating a test database for the category REST API server.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File path to save the SQLite database to.
    #[arg(long, short)]
    output_path: String,
}

/// Categories to create, with a description and the products in each.
const TEST_CATEGORIES: &[(&str, Option<&str>, &[&str])] = &[
    (
        "Footwear",
        Some("Shoes, boots and sandals"),
        &["Running shoe", "Hiking boot", "Sandal"],
    ),
    ("Hats", Some("Things for heads"), &["Beanie", "Sun hat"]),
    ("Kitchenware", None, &[]),
];

/// Create and populate a database for manual testing.
fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    let output_path = Path::new(&args.output_path);

    match output_path.extension() {
        None => {
            eprintln!("Output path must include a file extension (e.g., 'my_database.db').");
            exit(1);
        }
        Some(extension) if extension.is_empty() => {
            eprintln!("Output path must include a file extension (e.g., 'my_database.db').");
            exit(1);
        }
        _ => {}
    }

    if output_path.is_file() {
        eprintln!("File already exists at {output_path:#?}!");
        exit(1);
    }

    println!("Creating database at {output_path:#?}");
    let conn = Connection::open(output_path)?;

    initialize_db(&conn)?;

    println!("Creating test categories...");

    for (name, description, products) in TEST_CATEGORIES {
        let category = create_category(
            CategoryName::new(name)?,
            description.map(str::to_owned),
            &conn,
        )?;

        for product in products.iter() {
            create_product(product, Some(category.id), &conn)?;
        }
    }

    create_product("Gift card", None, &conn)?;

    println!("Success!");

    Ok(())
}
