// Main entry point for the mini-sql CLI
// Loads delimited files as tables, then runs one query or an interactive shell

use anyhow::{bail, Context, Result};
use clap::Parser as ClapParser;
use mini_sql::session::prompt_for_tables;
use mini_sql::{load_table, Catalog, CsvOptions, OutputFormat, Session, StdConsole};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// mini-sql - run simple SELECT queries over CSV files
#[derive(ClapParser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Files to load; each becomes a table named after the file (without extension)
    #[arg(env = "MINI_SQL_FILES", value_delimiter = ',')]
    files: Vec<PathBuf>,

    /// Execute a single query and exit
    #[arg(short, long)]
    execute: Option<String>,

    /// Output format for query results
    #[arg(short, long, value_enum, default_value = "table", env = "MINI_SQL_FORMAT")]
    format: OutputFormat,

    /// Field delimiter (a single ASCII character)
    #[arg(short, long, default_value = ",", value_parser = parse_delimiter)]
    delimiter: u8,
}

fn parse_delimiter(s: &str) -> std::result::Result<u8, String> {
    match s.as_bytes() {
        [byte] if byte.is_ascii() => Ok(*byte),
        _ => Err(format!("delimiter must be a single ASCII character, got '{}'", s)),
    }
}

fn main() -> Result<()> {
    init_logging();
    let args = Args::parse();
    let options = CsvOptions {
        delimiter: args.delimiter,
    };
    let mut console = StdConsole;

    let catalog = if !args.files.is_empty() {
        load_catalog(&args.files, &options)?
    } else if args.execute.is_some() {
        bail!("--execute needs at least one file to query");
    } else {
        match prompt_for_tables(&mut console, &options)? {
            Some(catalog) => catalog,
            None => return Ok(()),
        }
    };

    let mut session = Session::new(catalog, console, args.format);

    // If a query was provided, execute it and exit
    if let Some(sql) = args.execute {
        println!("{}", session.execute_formatted(&sql)?);
        return Ok(());
    }

    session.run()
}

/// Load every file, failing on the first one that can't be read
fn load_catalog(files: &[PathBuf], options: &CsvOptions) -> Result<Catalog> {
    let mut catalog = Catalog::new();
    for path in files {
        let table = load_table(path, options)
            .with_context(|| format!("Error loading CSV: {}", path.display()))?;
        catalog.insert(table)?;
    }
    Ok(catalog)
}

/// Logs go to stderr so they never mix with query results.
/// Defaults to warnings only; override with RUST_LOG.
fn init_logging() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("mini_sql=warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_delimiter_accepts_single_ascii_char() {
        assert_eq!(parse_delimiter(","), Ok(b','));
        assert_eq!(parse_delimiter(";"), Ok(b';'));
        assert_eq!(parse_delimiter("\t"), Ok(b'\t'));
    }

    #[test]
    fn test_parse_delimiter_rejects_everything_else() {
        assert!(parse_delimiter("ab").is_err());
        assert!(parse_delimiter("é").is_err());
        assert!(parse_delimiter("").is_err());
    }

    #[test]
    fn test_args_delimiter_flag() {
        let args = Args::try_parse_from(["mini-sql", "-d", "|", "people.csv"]).unwrap();
        assert_eq!(args.delimiter, b'|');
        assert_eq!(args.files, vec![PathBuf::from("people.csv")]);

        assert!(Args::try_parse_from(["mini-sql", "--delimiter", "ab", "people.csv"]).is_err());
    }
}
