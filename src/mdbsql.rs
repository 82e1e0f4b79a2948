use std::path::Path;
use std::sync::{Mutex, MutexGuard, TryLockError};

use tracing::debug;

use crate::driver::{Column, Cursor, Driver, Handle, Row};
use crate::error::Error;
use crate::ffi::Mdb;

/// Driver id of the mdbtools ODBC driver, which wraps the same libmdbsql.
pub const MDBTOOLS_DRIVER: &str = "MDBTools";

/// libmdbsql cannot write; this is what every accepted statement affects.
const NO_ROWS_AFFECTED: i64 = -1;

/// Access driver backed by libmdbsql.
#[derive(Debug, Default, Clone, Copy)]
pub struct MdbTools;

impl Driver for MdbTools {
    type Handle = Connection;

    fn id(&self) -> &str {
        MDBTOOLS_DRIVER
    }

    fn open(&self, path: &Path) -> Result<Connection, Error> {
        Connection::open(path)
    }
}

/// Query state of one libmdbsql session: one result set at a time.
pub trait Session {
    /// Run `query`, leaving its result set ready for [`Session::fetch_row`].
    fn run_query(&self, query: &str) -> Result<(), Error>;

    /// Columns of the current result set.
    fn columns(&self) -> Vec<Column>;

    /// Advance the result set, copying the values of the new row out.
    fn fetch_row(&self) -> Result<Option<Row>, Error>;

    /// Release the current result set.
    fn reset(&self);
}

/// A connection to a mdb database.
pub struct Connection<S = Mdb> {
    db: Mutex<S>,
}

impl Connection {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        Ok(Self::from_session(Mdb::open(path.as_ref())?))
    }
}

impl<S: Session> Connection<S> {
    pub fn from_session(session: S) -> Self {
        Self {
            db: Mutex::new(session),
        }
    }

    pub fn prepare(&self, query: &str) -> Result<Rows<'_, S>, Error> {
        let guard = self.lock()?;
        debug!(query, "running query");
        guard.run_query(query)?;

        Ok(guard.into())
    }

    /// The session stays locked while a [`Rows`] from it is alive.
    fn lock(&self) -> Result<MutexGuard<'_, S>, Error> {
        match self.db.try_lock() {
            Ok(guard) => Ok(guard),
            Err(TryLockError::WouldBlock) => Err(Error::ConnectionBusy),
            Err(TryLockError::Poisoned(e)) => Err(e.into()),
        }
    }
}

impl<S: Session> Handle for Connection<S> {
    type Cursor<'h> = Rows<'h, S> where S: 'h;

    fn query(&self, sql: &str) -> Result<Rows<'_, S>, Error> {
        self.prepare(sql)
    }

    fn execute(&self, sql: &str) -> Result<i64, Error> {
        let guard = self.lock()?;
        debug!(sql, "running command");
        guard.run_query(sql)?;
        guard.reset();

        Ok(NO_ROWS_AFFECTED)
    }

    fn close(self) -> Result<(), Error> {
        drop(self.db.into_inner()?);
        Ok(())
    }
}

/// A handle for rows of query result.
///
/// Holds the connection lock until dropped; the result set is reset once
/// it is exhausted, fails, or is dropped early.
pub struct Rows<'mdb, S: Session = Mdb> {
    mdb_guard: MutexGuard<'mdb, S>,
    columns: Vec<Column>,
    exhausted: bool,
}

impl<'mdb, S: Session> From<MutexGuard<'mdb, S>> for Rows<'mdb, S> {
    fn from(mdb_guard: MutexGuard<'mdb, S>) -> Self {
        let columns = mdb_guard.columns();
        Self {
            mdb_guard,
            columns,
            exhausted: false,
        }
    }
}

impl<'mdb, S: Session> Cursor for Rows<'mdb, S> {
    fn columns(&self) -> &[Column] {
        &self.columns
    }
}

impl<'mdb, S: Session> Iterator for Rows<'mdb, S> {
    type Item = Result<Row, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.exhausted {
            return None;
        }

        match self.mdb_guard.fetch_row() {
            Ok(Some(row)) => Some(Ok(row)),
            Ok(None) => {
                self.finish();
                None
            }
            Err(e) => {
                self.finish();
                Some(Err(e))
            }
        }
    }
}

impl<'mdb, S: Session> Rows<'mdb, S> {
    fn finish(&mut self) {
        self.mdb_guard.reset();
        self.exhausted = true;
    }
}

impl<'mdb, S: Session> Drop for Rows<'mdb, S> {
    fn drop(&mut self) {
        if !self.exhausted {
            self.mdb_guard.reset();
        }
    }
}
