//! vibeql - filter JSON records with a boolean query

use anyhow::{bail, Context, Result};
use clap::Parser as ClapParser;
use std::io;
use std::path::PathBuf;
use vibeql::input::{load_records, load_records_from_path, records_to_json};
use vibeql::{sample, QueryEngine};

/// vibeql - filter JSON records with queries like "department = HR AND age > 30"
#[derive(ClapParser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Query to evaluate against every record
    query: String,

    /// JSON file holding an array of flat objects (reads stdin when omitted)
    #[arg(short, long, conflicts_with = "demo")]
    file: Option<PathBuf>,

    /// Use the built-in employee records instead of reading input
    #[arg(long)]
    demo: bool,

    /// Print only the number of matching records
    #[arg(long)]
    count: bool,

    /// Print the parsed query and exit without filtering
    #[arg(long)]
    explain: bool,

    /// Fail if the query produced parse warnings
    #[arg(long)]
    strict: bool,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let log_level = if args.debug { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let engine = QueryEngine::new();
    let query = engine.compile(&args.query);

    for warning in query.warnings() {
        log::warn!("{}", warning);
    }
    if args.strict && !query.warnings().is_empty() {
        bail!(
            "Query '{}' produced {} warning(s)",
            query.source(),
            query.warnings().len()
        );
    }

    if args.explain {
        println!("Query:   {}", query.source());
        println!("Parsed:  {}", query.expression());
        println!("Fields:  {}", query.expression().referenced_fields().join(", "));
        for warning in query.warnings() {
            println!("Warning: {}", warning);
        }
        return Ok(());
    }

    let records = if args.demo {
        sample::employees()
    } else if let Some(path) = &args.file {
        load_records_from_path(path)?
    } else {
        load_records(io::stdin().lock()).context("Failed to read records from stdin")?
    };

    if args.count {
        println!("{}", query.count(&records));
    } else {
        let matched = query.apply(&records);
        println!("{}", records_to_json(&matched)?);
    }

    Ok(())
}
