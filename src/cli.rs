//! Command-line arguments, logging setup and the closing key prompt.
use std::io;
use std::path::PathBuf;

use anyhow::{anyhow, Result};
use clap::Parser;
use crossterm::event::{self, Event, KeyEventKind};
use crossterm::terminal;
use tracing_subscriber::EnvFilter;

pub const DEFAULT_DATABASE: &str = "TestDataBase/Test.mdb";
pub const DEFAULT_QUERY: &str = "select * from 品目マスタ";

/// Print the item table of an Access database.
#[derive(Parser, Debug)]
#[clap(author, version, about)]
pub struct Args {
    /// Access database file to open
    #[clap(short, long, default_value = DEFAULT_DATABASE)]
    pub database: PathBuf,

    /// Query whose first three columns are key, name and price
    #[clap(short, long, default_value = DEFAULT_QUERY)]
    pub query: String,

    /// Exit without waiting for a key press
    #[clap(long)]
    pub no_wait: bool,

    /// Enable debug logging (RUST_LOG takes precedence)
    #[clap(short, long)]
    pub verbose: bool,
}

/// Log to stderr so stdout carries only the table.
pub fn init_tracing(verbose: bool) -> Result<()> {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(verbose)
        .compact()
        .try_init()
        .map_err(|err| anyhow!(err))
}

/// Block until one key is pressed.
pub fn wait_for_key() -> io::Result<()> {
    terminal::enable_raw_mode()?;
    let pressed = loop {
        match event::read() {
            Ok(Event::Key(key)) if key.kind == KeyEventKind::Press => break Ok(()),
            Ok(_) => continue,
            Err(err) => break Err(err),
        }
    };
    terminal::disable_raw_mode()?;
    pressed
}
