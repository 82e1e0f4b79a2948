use glib_sys::GPtrArray;
use libc::c_char;
use std::ffi::{CStr, CString};
use std::os::unix::ffi::OsStrExt;
use std::path::Path;
use std::slice;

use libmdb_sys::{
    mdb_open, mdb_sql_exit, mdb_sql_fetch_row, mdb_sql_init, mdb_sql_reset, mdb_sql_run_query,
    MdbFileFlags_MDB_NOFLAGS, MdbSQL, MdbSQLColumn,
};

use crate::driver::{Column, Row};
use crate::error::Error;
use crate::mdbsql::Session;

/// View the elements of a glib pointer array.
///
/// # Safety
///
/// `arr` must be null or point to a live `GPtrArray` whose elements are `*const T`,
/// and the array must outlive the returned slice.
unsafe fn ptr_array<'a, T>(arr: *const GPtrArray) -> &'a [*const T] {
    if arr.is_null() || (*arr).len == 0 {
        &[]
    } else {
        slice::from_raw_parts((*arr).pdata as *const *const T, (*arr).len as usize)
    }
}

/// An open libmdbsql session over one Access file.
#[derive(Debug)]
pub struct Mdb(*mut MdbSQL);

unsafe impl Send for Mdb {}

impl Drop for Mdb {
    fn drop(&mut self) {
        // Also closes the underlying MdbHandle.
        unsafe { mdb_sql_exit(self.0) }
    }
}

impl Mdb {
    pub fn open(path: &Path) -> Result<Self, Error> {
        if !path.is_file() {
            return Err(Error::InvalidPath(path.to_path_buf()));
        }

        let c_path = CString::new(path.as_os_str().as_bytes())?;

        unsafe {
            let mdb_handle = mdb_open(c_path.as_ptr(), MdbFileFlags_MDB_NOFLAGS);
            if mdb_handle.is_null() {
                Err(Error::InvalidMdbFile(path.to_path_buf()))
            } else {
                let db_ptr = mdb_sql_init();
                (*db_ptr).mdb = mdb_handle;
                Ok(Mdb(db_ptr))
            }
        }
    }

    fn error_msg(&self) -> Option<String> {
        unsafe {
            let error_msg = &(*self.0).error_msg;
            match error_msg[0] {
                0 => None,
                _ => Some(
                    CStr::from_ptr(error_msg.as_ptr())
                        .to_string_lossy()
                        .into_owned(),
                ),
            }
        }
    }
}

impl Session for Mdb {
    fn run_query(&self, query: &str) -> Result<(), Error> {
        let query = CString::new(query)?;

        unsafe {
            (*self.0).error_msg[0] = 0;
            mdb_sql_run_query(self.0, query.as_ptr() as *const c_char);
        }

        match self.error_msg() {
            None => Ok(()),
            Some(msg) => {
                self.reset();
                Err(Error::MdbSqlError(msg))
            }
        }
    }

    fn columns(&self) -> Vec<Column> {
        unsafe {
            ptr_array::<MdbSQLColumn>((*self.0).columns)
                .iter()
                .map(|&c| Column::new(CStr::from_ptr((*c).name).to_string_lossy()))
                .collect()
        }
    }

    fn fetch_row(&self) -> Result<Option<Row>, Error> {
        unsafe {
            if mdb_sql_fetch_row(self.0, (*self.0).cur_table) != 1 {
                return Ok(None);
            }

            let values = ptr_array::<c_char>((*self.0).bound_values)
                .iter()
                .map(|&v| {
                    if v.is_null() {
                        Ok(String::new())
                    } else {
                        Ok(CStr::from_ptr(v).to_str()?.to_string())
                    }
                })
                .collect::<Result<Vec<_>, Error>>()?;

            Ok(Some(Row::new(values)))
        }
    }

    fn reset(&self) {
        unsafe { mdb_sql_reset(self.0) }
    }
}
