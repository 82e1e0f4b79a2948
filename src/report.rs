use std::fmt;

use unicode_width::UnicodeWidthStr;

use crate::record::{Record, RecordList};

pub const BORDER_WIDTH: usize = 25;
/// Display columns for the name: eight full-width characters.
pub const NAME_WIDTH: usize = 16;
pub const PRICE_WIDTH: usize = 5;

/// Bordered text table of item names and prices.
pub struct Report<'a> {
    records: &'a RecordList,
}

impl<'a> Report<'a> {
    pub fn new(records: &'a RecordList) -> Self {
        Self { records }
    }

    pub fn border() -> String {
        "-".repeat(BORDER_WIDTH)
    }

    pub fn line(record: &Record) -> String {
        let name = record.name();
        let padding = NAME_WIDTH.saturating_sub(name.width());
        format!(
            "|{}{}|{:>width$}|",
            name,
            " ".repeat(padding),
            record.price(),
            width = PRICE_WIDTH
        )
    }
}

impl<'a> fmt::Display for Report<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", Self::border())?;
        for record in self.records {
            writeln!(f, "{}", Self::line(record))?;
        }
        writeln!(f, "{}", Self::border())
    }
}
