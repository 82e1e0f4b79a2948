//! The seam between [`Database`](crate::Database) and whatever actually reads the file.
//!
//! A [`Driver`] opens a database file into a [`Handle`]; a handle runs queries,
//! handing back a forward-only [`Cursor`] of [`Row`]s, and commands.
use std::path::Path;

use crate::error::Error;

/// Opens database files.
pub trait Driver {
    type Handle: Handle;

    /// Identifier written into the `DRIVER` key of a connection string.
    fn id(&self) -> &str;

    fn open(&self, path: &Path) -> Result<Self::Handle, Error>;
}

/// An open database file.
pub trait Handle {
    type Cursor<'h>: Cursor
    where
        Self: 'h;

    /// Run a query and return a cursor over its result set.
    fn query(&self, sql: &str) -> Result<Self::Cursor<'_>, Error>;

    /// Run a command and return the number of affected rows.
    ///
    /// Statements that change nothing return `-1`.
    fn execute(&self, sql: &str) -> Result<i64, Error>;

    fn close(self) -> Result<(), Error>;
}

/// Forward-only handle over the rows of one result set.
pub trait Cursor: Iterator<Item = Result<Row, Error>> {
    fn columns(&self) -> &[Column];
}

/// Column of a result set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    name: String,
}

impl Column {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

/// Row of values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    values: Vec<String>,
}

impl Row {
    pub fn new(values: Vec<String>) -> Self {
        Self { values }
    }

    /// Number of columns in the row.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Get value at index.
    pub fn get<T: FromSql>(&self, idx: usize) -> Result<T, Error> {
        match self.values.get(idx) {
            Some(value) => T::column_result(value),
            None => Err(Error::InvalidRowIndex(idx)),
        }
    }
}

impl<S: Into<String>> FromIterator<S> for Row {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::new(iter.into_iter().map(Into::into).collect())
    }
}

pub trait FromSql: Sized {
    /// Converts SQL value into Rust value.
    fn column_result(value: &str) -> Result<Self, Error>;
}

impl<T> FromSql for T
where
    T: serde::de::DeserializeOwned,
{
    fn column_result(value: &str) -> Result<T, Error> {
        Ok(serde_plain::from_str(value)?)
    }
}
