// Interactive session
// The shell reads one query per line, runs it against the loaded catalog and
// prints the result. Input and output go through the Console trait so the
// loop can be driven by stdin/stdout or by a script in tests.

use crate::error::SqlError;
use crate::output::{format_rows, OutputFormat};
use crate::query::{QueryExecutor, QueryParser};
use crate::storage::loader::{load_table, CsvOptions};
use crate::storage::{Catalog, Row};
use anyhow::Result;
use std::io::{self, BufRead, Write};
use tracing::debug;

pub const PROMPT: &str = "mini-sql> ";

/// Line-oriented input and output for the shell
pub trait Console {
    /// Show `prompt` and read one line without its line ending.
    /// Returns `None` at end of input.
    fn read_line(&mut self, prompt: &str) -> io::Result<Option<String>>;

    fn write_line(&mut self, line: &str) -> io::Result<()>;
}

/// Console over the process's stdin and stdout
#[derive(Debug, Default)]
pub struct StdConsole;

impl Console for StdConsole {
    fn read_line(&mut self, prompt: &str) -> io::Result<Option<String>> {
        let mut stdout = io::stdout();
        write!(stdout, "{}", prompt)?;
        stdout.flush()?; // Ensure prompt is displayed immediately

        let mut input = String::new();
        if io::stdin().lock().read_line(&mut input)? == 0 {
            return Ok(None);
        }
        Ok(Some(input.trim_end_matches(&['\r', '\n'][..]).to_string()))
    }

    fn write_line(&mut self, line: &str) -> io::Result<()> {
        writeln!(io::stdout(), "{}", line)
    }
}

/// Ask for a file path and load it as the session's only table
/// Returns `None` when input ends or the file can't be loaded; the load
/// failure is reported on the console.
pub fn prompt_for_tables<C: Console>(
    console: &mut C,
    options: &CsvOptions,
) -> Result<Option<Catalog>> {
    console.write_line("Enter CSV file path (e.g. sample.csv):")?;
    let Some(path) = console.read_line("> ")? else {
        return Ok(None);
    };
    let path = path.trim();

    match load_table(path, options) {
        Ok(table) => {
            console.write_line(&format!("Loaded table '{}' from {}", table.name, path))?;
            Ok(Some(Catalog::from_tables([table])?))
        }
        Err(e) => {
            console.write_line(&format!("Error loading CSV: {}", e))?;
            Ok(None)
        }
    }
}

/// An interactive query session over a fixed set of tables
pub struct Session<C: Console> {
    catalog: Catalog,
    console: C,
    format: OutputFormat,
}

impl<C: Console> Session<C> {
    pub fn new(catalog: Catalog, console: C, format: OutputFormat) -> Self {
        Self {
            catalog,
            console,
            format,
        }
    }

    /// Parse and run one query
    pub fn execute(&self, sql: &str) -> Result<Vec<Row>> {
        let plan = QueryParser::parse(sql)?;
        let rows = QueryExecutor::new(&self.catalog).execute(&plan)?;
        Ok(rows)
    }

    /// Run one query and format its result
    pub fn execute_formatted(&self, sql: &str) -> Result<String> {
        let rows = self.execute(sql)?;
        format_rows(&rows, self.format)
    }

    /// Read-eval-print loop, until `exit`/`quit` or end of input
    pub fn run(&mut self) -> Result<()> {
        self.console.write_line("Mini SQL Engine")?;
        let names = self.catalog.table_names();
        self.console
            .write_line(&format!("Tables: {}", names.join(", ")))?;
        self.console.write_line("")?;
        self.print_help()?;

        while let Some(input) = self.console.read_line(PROMPT)? {
            let input = input.trim();
            if input.is_empty() {
                continue;
            }

            match input.to_ascii_lowercase().as_str() {
                "exit" | "quit" | ".exit" | ".quit" => {
                    self.console.write_line("Bye.")?;
                    break;
                }
                ".help" => self.print_help()?,
                ".tables" => {
                    for name in self.catalog.table_names() {
                        self.console.write_line(&name)?;
                    }
                }
                command if command.starts_with('.') => {
                    self.console
                        .write_line(&format!("Unknown command: {}", input))?;
                    self.console.write_line("Type '.help' for help")?;
                }
                _ => self.handle_query(input)?,
            }
        }

        Ok(())
    }

    /// Query failures are reported and the session carries on
    fn handle_query(&mut self, sql: &str) -> io::Result<()> {
        match self.execute_formatted(sql) {
            Ok(text) => self.console.write_line(&text),
            Err(e) => {
                debug!(error = %e, "query failed");
                let message = match e.downcast_ref::<SqlError>() {
                    Some(sql_error) => format!("SQL error: {}", sql_error),
                    None => format!("Unexpected error: {}", e),
                };
                self.console.write_line(&message)
            }
        }
    }

    fn print_help(&mut self) -> io::Result<()> {
        let lines = [
            "Supported syntax (single table, single WHERE condition):",
            "  SELECT * FROM table;",
            "  SELECT col1, col2 FROM table;",
            "  SELECT * FROM table WHERE age > 30;",
            "  SELECT COUNT(*) FROM table;",
            "  SELECT COUNT(col) FROM table WHERE country = 'India';",
            "Operators: =, !=, >, <, >=, <=",
            "Commands: .help, .tables",
            "Type 'exit' or 'quit' to leave.",
            "",
        ];
        for line in lines {
            self.console.write_line(line)?;
        }
        Ok(())
    }
}
