use std::path::Path;

use tracing::{debug, info, warn};

use crate::connection_string::ConnectionString;
use crate::driver::{Driver, Handle};
use crate::error::Error;
use crate::mdbsql::MdbTools;

/// Cursor type returned by [`Database::read`] for driver `D`.
pub type CursorOf<'a, D> = <<D as Driver>::Handle as Handle>::Cursor<'a>;

struct OpenConnection<H> {
    connection_string: ConnectionString,
    handle: H,
}

/// Connection to at most one Access database at a time.
///
/// Owned by whoever runs the queries and lent out by reference. Dropping it
/// disconnects.
pub struct Database<D: Driver = MdbTools> {
    driver: D,
    session: Option<OpenConnection<D::Handle>>,
}

impl Default for Database<MdbTools> {
    fn default() -> Self {
        Self::new(MdbTools)
    }
}

impl<D: Driver> Database<D> {
    pub fn new(driver: D) -> Self {
        Self {
            driver,
            session: None,
        }
    }

    /// Connect to the database file at `path`.
    ///
    /// Does nothing if already connected. On failure the database stays
    /// disconnected and the cause is returned.
    pub fn connect<P: AsRef<Path>>(&mut self, path: P) -> Result<(), Error> {
        if self.is_connected() {
            debug!("already connected, keeping the open handle");
            return Ok(());
        }

        let connection_string = ConnectionString::new(self.driver.id(), path.as_ref());
        self.open(connection_string)
    }

    /// Connect using a full `DRIVER=...;DBQ=...` string.
    pub fn connect_with(&mut self, connection_string: &str) -> Result<(), Error> {
        if self.is_connected() {
            debug!("already connected, keeping the open handle");
            return Ok(());
        }

        let connection_string: ConnectionString = connection_string.parse()?;
        if !connection_string
            .driver()
            .eq_ignore_ascii_case(self.driver.id())
        {
            return Err(Error::UnknownDriver(connection_string.driver().to_string()));
        }
        self.open(connection_string)
    }

    fn open(&mut self, connection_string: ConnectionString) -> Result<(), Error> {
        debug!(%connection_string, "opening database");
        match self.driver.open(connection_string.dbq()) {
            Ok(handle) => {
                info!(path = %connection_string.dbq().display(), "connected");
                self.session = Some(OpenConnection {
                    connection_string,
                    handle,
                });
                Ok(())
            }
            Err(e) => {
                debug!(error = %e, "connection failed");
                Err(e)
            }
        }
    }

    /// Close the connection, if any. Close errors are logged and dropped.
    pub fn disconnect(&mut self) {
        if let Some(session) = self.session.take() {
            match session.handle.close() {
                Ok(()) => info!(path = %session.connection_string.dbq().display(), "disconnected"),
                Err(e) => warn!(error = %e, "error while closing database, dropped"),
            }
        }
    }

    /// Run a query, returning a cursor over its rows.
    pub fn read(&self, sql: &str) -> Result<CursorOf<'_, D>, Error> {
        self.handle()?.query(sql)
    }

    /// Run a command, returning the number of affected rows (`-1` when the
    /// statement changes nothing).
    pub fn update(&self, sql: &str) -> Result<i64, Error> {
        self.handle()?.execute(sql)
    }

    pub fn is_connected(&self) -> bool {
        self.session.is_some()
    }

    pub fn connection_string(&self) -> Option<&ConnectionString> {
        self.session.as_ref().map(|s| &s.connection_string)
    }

    fn handle(&self) -> Result<&D::Handle, Error> {
        self.session
            .as_ref()
            .map(|s| &s.handle)
            .ok_or(Error::NotConnected)
    }
}

impl<D: Driver> Drop for Database<D> {
    fn drop(&mut self) {
        self.disconnect();
    }
}
