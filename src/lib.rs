//! Read the item table of an Access database on Unix-like systems.
//!
//! Access files are opened through [libmdbsql](https://github.com/mdbtools/mdbtools),
//! so the SQL accepted by [`Database::read`] is the subset described in
//! [mdb-sql](https://man.cx/mdb-sql(1)).
//!
//! # Example
//!
//! ```rust,no_run
//! use accessreader::{Database, Error, RecordList, Report};
//!
//! # fn main() -> Result<(), Error> {
//! let mut db = Database::default();
//! db.connect("TestDataBase/Test.mdb")?;
//!
//! let list = RecordList::from_rows(db.read("select * from 品目マスタ")?)?;
//! for record in &list {
//!     println!("{} {} {}", record.key(), record.name(), record.price());
//! }
//! print!("{}", Report::new(&list));
//!
//! db.disconnect();
//! # Ok(())
//! # }
//! ```
mod connection_string;
mod database;
pub mod driver;
mod error;
mod ffi;
pub mod mdbsql;
mod record;
mod report;
#[cfg(test)]
mod test_utils;

pub use crate::connection_string::ConnectionString;
pub use crate::database::{CursorOf, Database};
pub use crate::error::Error;
pub use crate::record::{Record, RecordList};
pub use crate::report::Report;
