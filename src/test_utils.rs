//! In-memory driver and fixtures for unit tests.
use std::cell::Cell;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use std::vec;

use crate::driver::{Column, Cursor, Driver, Handle, Row};
use crate::error::Error;
use crate::mdbsql::{Connection, Session};

pub const MEMORY_DRIVER: &str = "Memory";

pub fn row<const N: usize>(values: [&str; N]) -> Row {
    values.into_iter().collect()
}

/// The two-item fixture table: (1, Apple, 100), (2, Pear, 200).
pub fn fruit_rows() -> Vec<Result<Row, Error>> {
    vec![Ok(row(["1", "Apple", "100"])), Ok(row(["2", "Pear", "200"]))]
}

/// Serves one table per registered path. Only statements starting with
/// `select` are understood.
#[derive(Default)]
pub struct MemoryDriver {
    files: HashMap<PathBuf, Vec<Row>>,
    pub opens: Rc<Cell<usize>>,
    pub closes: Rc<Cell<usize>>,
    pub fail_close: bool,
}

impl MemoryDriver {
    pub fn with_file(mut self, path: impl Into<PathBuf>, rows: Vec<Row>) -> Self {
        self.files.insert(path.into(), rows);
        self
    }
}

impl Driver for MemoryDriver {
    type Handle = MemoryHandle;

    fn id(&self) -> &str {
        MEMORY_DRIVER
    }

    fn open(&self, path: &Path) -> Result<MemoryHandle, Error> {
        let rows = self
            .files
            .get(path)
            .ok_or_else(|| Error::InvalidPath(path.to_path_buf()))?;
        self.opens.set(self.opens.get() + 1);

        Ok(MemoryHandle {
            rows: rows.clone(),
            closes: Rc::clone(&self.closes),
            fail_close: self.fail_close,
        })
    }
}

pub struct MemoryHandle {
    rows: Vec<Row>,
    closes: Rc<Cell<usize>>,
    fail_close: bool,
}

impl MemoryHandle {
    fn check(sql: &str) -> Result<(), Error> {
        if sql.trim_start().to_ascii_lowercase().starts_with("select") {
            Ok(())
        } else {
            Err(Error::MdbSqlError(format!("syntax error near {sql}")))
        }
    }
}

impl Handle for MemoryHandle {
    type Cursor<'h> = MemoryCursor;

    fn query(&self, sql: &str) -> Result<MemoryCursor, Error> {
        Self::check(sql)?;
        Ok(MemoryCursor {
            columns: ["key", "name", "price"].into_iter().map(Column::new).collect(),
            rows: self.rows.clone().into_iter(),
        })
    }

    fn execute(&self, sql: &str) -> Result<i64, Error> {
        Self::check(sql)?;
        Ok(-1)
    }

    fn close(self) -> Result<(), Error> {
        self.closes.set(self.closes.get() + 1);
        if self.fail_close {
            Err(Error::MdbSqlError("close failed".to_string()))
        } else {
            Ok(())
        }
    }
}

pub struct MemoryCursor {
    columns: Vec<Column>,
    rows: vec::IntoIter<Row>,
}

impl Iterator for MemoryCursor {
    type Item = Result<Row, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        self.rows.next().map(Ok)
    }
}

impl Cursor for MemoryCursor {
    fn columns(&self) -> &[Column] {
        &self.columns
    }
}

/// Stands in for libmdbsql behind [`Connection`]: replays a fixed result
/// set for every `select`, including fetch failures, and counts resets.
pub struct ScriptedSession {
    script: Vec<Result<Row, String>>,
    position: Cell<usize>,
    pub resets: Rc<Cell<usize>>,
}

impl ScriptedSession {
    pub fn new(script: Vec<Result<Row, Error>>) -> Self {
        let script: Vec<_> = script
            .into_iter()
            .map(|r| r.map_err(|e| e.to_string()))
            .collect();
        let position = Cell::new(script.len());

        Self {
            script,
            position,
            resets: Rc::default(),
        }
    }
}

impl Session for ScriptedSession {
    fn run_query(&self, query: &str) -> Result<(), Error> {
        MemoryHandle::check(query)?;
        self.position.set(0);
        Ok(())
    }

    fn columns(&self) -> Vec<Column> {
        ["key", "name", "price"].into_iter().map(Column::new).collect()
    }

    fn fetch_row(&self) -> Result<Option<Row>, Error> {
        let position = self.position.get();
        match self.script.get(position) {
            Some(step) => {
                self.position.set(position + 1);
                step.clone().map(Some).map_err(Error::MdbSqlError)
            }
            None => Ok(None),
        }
    }

    fn reset(&self) {
        self.position.set(self.script.len());
        self.resets.set(self.resets.get() + 1);
    }
}

/// Opens every path as a [`Connection`] over a [`ScriptedSession`] of `rows`.
pub struct ScriptedDriver(pub Vec<Row>);

impl Driver for ScriptedDriver {
    type Handle = Connection<ScriptedSession>;

    fn id(&self) -> &str {
        MEMORY_DRIVER
    }

    fn open(&self, _path: &Path) -> Result<Self::Handle, Error> {
        let script = self.0.iter().cloned().map(Ok).collect();
        Ok(Connection::from_session(ScriptedSession::new(script)))
    }
}
