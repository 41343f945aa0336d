use std::path::{Path, PathBuf};
use std::process;

use clap::{Parser, ValueEnum};
use selectast::repl::{self, LineOutcome, StatementBuffer};
use selectast::SelectQuery;
use tracing::{debug, Level};
use tracing_subscriber::FmtSubscriber;

const BANNER: &str =
    "\nEnter a SELECT query. Use a semicolon to end the query.\nTo exit, enter `0` or `exit`.";

#[derive(Clone, Copy, Debug, ValueEnum)]
enum OutputFormat {
    /// Indented JSON
    Pretty,
    /// Single-line JSON
    Compact,
    /// Rust debug representation
    Debug,
}

#[derive(Parser)]
#[command(name = "selectast", about = "Parse SQL SELECT statements into a syntax tree")]
struct Cli {
    /// Parse a single statement and exit
    #[arg(short = 'e')]
    execute: Option<String>,

    /// Parse every statement in a script file and exit
    #[arg(short = 'f', long)]
    file: Option<PathBuf>,

    /// How to print parsed statements
    #[arg(long, value_enum, default_value = "pretty")]
    format: OutputFormat,

    /// Log each clause as it is parsed
    #[arg(short, long)]
    verbose: bool,
}

fn render(query: &SelectQuery, format: OutputFormat) -> String {
    match format {
        OutputFormat::Pretty => query.to_string(),
        OutputFormat::Compact => serde_json::to_string(query)
            .unwrap_or_else(|e| format!("ERROR: Failed to render query: {}", e)),
        OutputFormat::Debug => format!("{:#?}", query),
    }
}

fn print_result(result: &selectast::Result<SelectQuery>, format: OutputFormat) -> bool {
    match result {
        Ok(query) => {
            println!("{}", render(query, format));
            true
        }
        Err(e) => {
            eprintln!("ERROR: {}", e);
            false
        }
    }
}

/// Interactive echo. Errors go to stdout so they stay next to the query.
fn parse_and_print(sql: &str, format: OutputFormat) {
    println!("\nYour query:");
    println!("{}", sql);
    match selectast::parse(sql) {
        Ok(query) => println!("{}", render(&query, format)),
        Err(e) => println!("ERROR: {}", e),
    }
}

fn run_file(path: &Path, format: OutputFormat) -> bool {
    let results = repl::parse_script_file(path).unwrap_or_else(|e| {
        eprintln!("ERROR: Failed to read {}: {}", path.display(), e);
        process::exit(1);
    });

    let mut ok = true;
    for (sql, result) in &results {
        println!("\n{}", sql);
        ok &= print_result(result, format);
    }
    ok
}

fn run_repl(format: OutputFormat) {
    let mut rl = rustyline::DefaultEditor::new().unwrap_or_else(|e| {
        eprintln!("ERROR: Failed to initialize REPL: {}", e);
        process::exit(1);
    });

    let mut buffer = StatementBuffer::new();
    println!("{}", BANNER);

    loop {
        let prompt = if buffer.is_empty() {
            "selectast> "
        } else {
            "        -> "
        };

        match rl.readline(prompt) {
            Ok(line) => match buffer.push_line(&line) {
                LineOutcome::Exit => break,
                LineOutcome::Incomplete => {}
                LineOutcome::Complete(sql) => {
                    let _ = rl.add_history_entry(sql.trim());
                    parse_and_print(&sql, format);
                    println!("{}", BANNER);
                }
            },
            Err(rustyline::error::ReadlineError::Interrupted) => {
                // Ctrl-C: clear current buffer
                buffer.clear();
                println!();
            }
            Err(rustyline::error::ReadlineError::Eof) => break,
            Err(e) => {
                eprintln!("ERROR: {}", e);
                break;
            }
        }
    }
}

fn main() {
    let cli = Cli::parse();

    let subscriber = FmtSubscriber::builder()
        .with_max_level(if cli.verbose { Level::DEBUG } else { Level::INFO })
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .finish();
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("WARNING: Failed to install logger: {}", e);
    }

    if let Some(sql) = &cli.execute {
        debug!(sql = sql.as_str(), "parsing statement from command line");
        if !print_result(&selectast::parse(sql), cli.format) {
            process::exit(1);
        }
    } else if let Some(path) = &cli.file {
        if !run_file(path, cli.format) {
            process::exit(1);
        }
    } else {
        run_repl(cli.format);
    }
}
