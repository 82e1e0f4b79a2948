//! Typed view over the rows of the item table.
use std::ops::Index;
use std::slice;
use std::vec;

use crate::driver::Row;
use crate::error::Error;

/// One item: key, name and price, read from the first three columns of a row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    key: i32,
    name: String,
    price: i32,
}

impl Record {
    pub fn from_row(row: &Row) -> Result<Self, Error> {
        Ok(Self {
            key: row.get(0)?,
            name: row.get(1)?,
            price: row.get(2)?,
        })
    }

    pub fn key(&self) -> i32 {
        self.key
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn price(&self) -> i32 {
        self.price
    }
}

impl TryFrom<&Row> for Record {
    type Error = Error;

    fn try_from(row: &Row) -> Result<Self, Error> {
        Self::from_row(row)
    }
}

/// Every record of a result set, in the order the cursor returned them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordList {
    records: Vec<Record>,
}

impl RecordList {
    /// Drain `rows`, stopping at the first row that fails to fetch or convert.
    pub fn from_rows<I>(rows: I) -> Result<Self, Error>
    where
        I: IntoIterator<Item = Result<Row, Error>>,
    {
        let records = rows
            .into_iter()
            .map(|row| Record::from_row(&row?))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { records })
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Record> {
        self.records.get(index)
    }

    pub fn iter(&self) -> slice::Iter<'_, Record> {
        self.records.iter()
    }
}

impl Index<usize> for RecordList {
    type Output = Record;

    fn index(&self, index: usize) -> &Record {
        &self.records[index]
    }
}

impl<'a> IntoIterator for &'a RecordList {
    type Item = &'a Record;
    type IntoIter = slice::Iter<'a, Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl IntoIterator for RecordList {
    type Item = Record;
    type IntoIter = vec::IntoIter<Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.into_iter()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::test_utils::{fruit_rows, row};

    #[test]
    fn record_from_row() {
        let record = Record::try_from(&row(["1", "Apple", "100"])).unwrap();

        assert_eq!(record.key(), 1);
        assert_eq!(record.name(), "Apple");
        assert_eq!(record.price(), 100);
    }

    #[test]
    fn record_extra_columns_ignored() {
        let record = Record::from_row(&row(["3", "りんご", "120", "note"])).unwrap();

        assert_eq!(record.name(), "りんご");
        assert_eq!(record.price(), 120);
    }

    #[test]
    fn record_too_few_columns() {
        let err = Record::from_row(&row(["1", "Apple"])).unwrap_err();

        assert!(matches!(err, Error::InvalidRowIndex(2)));
    }

    #[test]
    fn record_incompatible_column() {
        let err = Record::from_row(&row(["one", "Apple", "100"])).unwrap_err();

        assert!(matches!(err, Error::FromSqlError(_)));
    }

    #[test]
    fn list_keeps_cursor_order() {
        let list = RecordList::from_rows(fruit_rows()).unwrap();

        assert_eq!(list.len(), 2);
        assert_eq!((list[0].key(), list[0].name(), list[0].price()), (1, "Apple", 100));
        assert_eq!((list[1].key(), list[1].name(), list[1].price()), (2, "Pear", 200));

        let names: Vec<&str> = list.iter().map(Record::name).collect();
        assert_eq!(names, ["Apple", "Pear"]);

        let keys: Vec<i32> = list.into_iter().map(|r| r.key()).collect();
        assert_eq!(keys, [1, 2]);
    }

    #[test]
    fn list_from_empty_cursor() {
        let list = RecordList::from_rows(Vec::<Result<Row, Error>>::new()).unwrap();

        assert!(list.is_empty());
        assert_eq!(list.iter().count(), 0);
    }

    #[test]
    fn list_get_out_of_range() {
        let list = RecordList::from_rows(fruit_rows()).unwrap();

        assert!(list.get(1).is_some());
        assert!(list.get(2).is_none());
    }

    #[test]
    #[should_panic]
    fn list_index_out_of_range() {
        let list = RecordList::from_rows(fruit_rows()).unwrap();

        let _ = &list[list.len()];
    }

    #[test]
    fn list_stops_at_bad_row() {
        let mut rows = fruit_rows();
        rows.insert(1, Ok(row(["x", "Bad", "0"])));

        assert!(matches!(
            RecordList::from_rows(rows),
            Err(Error::FromSqlError(_))
        ));
    }

    #[test]
    fn list_propagates_cursor_error() {
        let rows = vec![
            Ok(row(["1", "Apple", "100"])),
            Err(Error::MdbSqlError("read failed".to_string())),
        ];

        assert!(matches!(
            RecordList::from_rows(rows),
            Err(Error::MdbSqlError(msg)) if msg == "read failed"
        ));
    }
}
