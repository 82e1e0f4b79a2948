use std::path::PathBuf;
use std::sync::PoisonError;

/// Enum listing for errors from accessreader.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// Error when given path is not a file.
    #[error("invalid path: {}", .0.display())]
    InvalidPath(PathBuf),

    /// Error when given path is not a valid Access database.
    #[error("invalid mdb file: {}", .0.display())]
    InvalidMdbFile(PathBuf),

    /// Error from libmdbsql
    #[error("{0}")]
    MdbSqlError(String),

    /// Error converting a string to c-string.
    #[error(transparent)]
    NulError(#[from] std::ffi::NulError),

    /// Error converting a string to utf8.
    #[error(transparent)]
    Utf8Error(#[from] std::str::Utf8Error),

    /// Poison error for the lock around a driver handle.
    #[error("{0}")]
    MutexPoisonError(String),

    /// Error when access to row value with invalid index
    #[error("invalid index to row results: {0}")]
    InvalidRowIndex(usize),

    /// Error converting SQL value to `T`
    #[error(transparent)]
    FromSqlError(#[from] serde_plain::Error),

    /// The connection string names a driver other than the one in use.
    #[error("unknown driver: {0}")]
    UnknownDriver(String),

    /// The connection string lacks `DRIVER` or `DBQ`, or is not `key=value` pairs.
    #[error("malformed connection string: {0}")]
    MalformedConnectionString(String),

    /// Query or command issued while a cursor still holds the connection.
    #[error("connection busy: a previous result set is still open")]
    ConnectionBusy,

    /// Query or command issued without an open connection.
    #[error("not connected to a database")]
    NotConnected,
}

impl<T> From<PoisonError<T>> for Error {
    fn from(error: PoisonError<T>) -> Self {
        Self::MutexPoisonError(error.to_string())
    }
}
