// Example: Basic engine usage
// Run with: cargo run --example basic_usage

use mini_sql::{format_rows, load_table, Catalog, CsvOptions, OutputFormat, QueryExecutor, QueryParser};
use std::path::Path;

fn main() -> anyhow::Result<()> {
    println!("=== mini-sql Basic Usage Example ===\n");

    // 1. Load a CSV file as a table named after the file
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("demos/data/people.csv");
    println!("1. Loading {}...", path.display());
    let table = load_table(&path, &CsvOptions::default())?;
    println!("Loaded '{}' with {} rows\n", table.name, table.row_count());

    let mut catalog = Catalog::new();
    catalog.insert(table)?;
    let executor = QueryExecutor::new(&catalog);

    let queries = [
        ("2. Selecting everything...", "SELECT * FROM people"),
        ("3. Projecting two columns...", "SELECT name, country FROM people"),
        (
            "4. Numeric filter (the 'unknown' age is skipped)...",
            "SELECT name, age FROM people WHERE age > 29",
        ),
        (
            "5. String filter...",
            "SELECT name FROM people WHERE country = 'India'",
        ),
        ("6. Counting rows...", "SELECT COUNT(*) FROM people WHERE age >= 30"),
        ("7. Counting non-empty emails...", "SELECT COUNT(email) FROM people"),
    ];

    for (title, sql) in queries {
        println!("{}", title);
        println!("{}", sql);
        let plan = QueryParser::parse(sql)?;
        let rows = executor.execute(&plan)?;
        println!("{}\n", format_rows(&rows, OutputFormat::Table)?);
    }

    // 8. Errors are values, not panics
    println!("8. Querying a table that doesn't exist...");
    let plan = QueryParser::parse("SELECT * FROM orders")?;
    match executor.execute(&plan) {
        Ok(_) => println!("unexpected success"),
        Err(e) => println!("Error: {}\n", e),
    }

    println!("=== Example Complete ===");
    Ok(())
}
