//! `DRIVER={...};DBQ=...` connection strings.
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::error::Error;

/// Driver id plus database file, the two keys an Access connection needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionString {
    driver: String,
    dbq: PathBuf,
}

impl ConnectionString {
    pub fn new(driver: impl Into<String>, dbq: impl Into<PathBuf>) -> Self {
        Self {
            driver: driver.into(),
            dbq: dbq.into(),
        }
    }

    pub fn driver(&self) -> &str {
        &self.driver
    }

    pub fn dbq(&self) -> &Path {
        &self.dbq
    }
}

/// `}` inside a braced value is written doubled.
fn braced(value: &str) -> String {
    format!("{{{}}}", value.replace('}', "}}"))
}

/// Split a braced value (opening `{` already consumed) at its closing `}`,
/// undoubling `}}`. Returns `None` when the value is never closed.
fn unbrace(s: &str) -> Option<(String, &str)> {
    let mut value = String::new();
    let mut chars = s.char_indices().peekable();

    while let Some((i, c)) = chars.next() {
        if c != '}' {
            value.push(c);
        } else if let Some((_, '}')) = chars.peek() {
            value.push('}');
            chars.next();
        } else {
            return Some((value, &s[i + 1..]));
        }
    }
    None
}

impl fmt::Display for ConnectionString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let dbq = self.dbq.to_string_lossy();
        if dbq.contains(';') || dbq.starts_with('{') {
            write!(f, "DRIVER={};DBQ={}", braced(&self.driver), braced(&dbq))
        } else {
            write!(f, "DRIVER={};DBQ={}", braced(&self.driver), dbq)
        }
    }
}

impl FromStr for ConnectionString {
    type Err = Error;

    /// Parses `key=value` pairs separated by `;`. Keys are case-insensitive and
    /// a value wrapped in `{}` may contain `;`, with `}}` standing for `}`.
    /// Keys other than `DRIVER` and `DBQ` are ignored.
    fn from_str(s: &str) -> Result<Self, Error> {
        let malformed = || Error::MalformedConnectionString(s.to_string());

        let mut driver = None;
        let mut dbq = None;
        let mut rest = s;

        while !rest.trim().is_empty() {
            let (key, tail) = rest.split_once('=').ok_or_else(malformed)?;
            let tail = tail.trim_start();

            let (value, tail) = match tail.strip_prefix('{') {
                Some(opened) => {
                    let (value, after) = unbrace(opened).ok_or_else(malformed)?;
                    let after = after.trim_start();
                    let after = match after.strip_prefix(';') {
                        Some(after) => after,
                        None if after.is_empty() => after,
                        None => return Err(malformed()),
                    };
                    (value, after)
                }
                None => match tail.split_once(';') {
                    Some((value, after)) => (value.trim().to_string(), after),
                    None => (tail.trim().to_string(), ""),
                },
            };

            match key.trim().to_ascii_uppercase().as_str() {
                "DRIVER" => driver = Some(value),
                "DBQ" => dbq = Some(PathBuf::from(value)),
                "" => return Err(malformed()),
                _ => {}
            }
            rest = tail;
        }

        match (driver, dbq) {
            (Some(driver), Some(dbq)) if !driver.is_empty() && !dbq.as_os_str().is_empty() => {
                Ok(Self { driver, dbq })
            }
            _ => Err(malformed()),
        }
    }
}
