use std::io::{self, IsTerminal};

use accessreader::{Database, RecordList, Report};
use anyhow::{Context, Result};
use clap::Parser;
use tracing::debug;

mod cli;

use cli::Args;

fn main() {
    let args = Args::parse();
    if let Err(err) = cli::init_tracing(args.verbose) {
        eprintln!("{err}");
    }

    let mut db = Database::default();
    if let Err(err) = run(&mut db, &args) {
        println!("{err:#}");
    }
    db.disconnect();

    if !args.no_wait {
        println!("Press any key to exit...");
        if io::stdin().is_terminal() {
            if let Err(err) = cli::wait_for_key() {
                debug!(error = %err, "could not read a key press");
            }
        }
    }
}

fn run(db: &mut Database, args: &Args) -> Result<()> {
    db.connect(&args.database)
        .context("Could not connect to the database!")?;
    println!("Connected to the database!");

    let list = RecordList::from_rows(db.read(&args.query)?)?;
    print!("{}", Report::new(&list));

    Ok(())
}
