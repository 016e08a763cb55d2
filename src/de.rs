//! Building tables from text.
//!
//! This module is the inverse of [`ser`](crate::ser): it reads lines from a
//! [`LineRead`] source and turns each one into a row.
//!
//! ## Overview
//!
//! - [`StringTable::from_lines`] drains any line reader, one line per row.
//!   Lines are stored whole, however long.
//! - [`StringTable::parse`] splits each line of serialized text on a
//!   separator and spreads the fields across the row's columns.
//! - [`StringTable::load`] and [`StringTable::load_separated`] do the same
//!   for a file.
//! - [`StringTable::from_rows`] builds a table from nested iterators; the
//!   [`table!`](crate::table) macro is a thin wrapper around it.
//!
//! `StringTable` also implements `serde::Deserialize` from any sequence of
//! sequences of strings.
//!
//! ## Usage
//!
//! ```rust
//! use line_toolbox::{LineEnding, StringTable};
//!
//! let table = StringTable::parse("eth0\t10.0.0.7\nlo\t127.0.0.1\n", "\t").unwrap();
//! assert_eq!(table.len(), 2);
//! assert_eq!(table.value_for_key("lo", 1).unwrap(), Some("127.0.0.1"));
//! assert_eq!(table.to_text("\t", LineEnding::Lf), "eth0\t10.0.0.7\nlo\t127.0.0.1\n");
//! ```

use crate::options::ReaderOptions;
use crate::parser::split_fields;
use crate::reader::{LineRead, TextBufferReader, TextFileReader};
use crate::table::StringTable;
use crate::Result;
use serde::de::{self, Deserialize, Deserializer, SeqAccess, Visitor};
use std::fmt;
use std::path::Path;
use tracing::debug;

impl StringTable {
    /// Appends one row per remaining line of `reader`.
    ///
    /// # Errors
    ///
    /// Propagates reader failures and [`Error::OutOfMemory`](crate::Error::OutOfMemory).
    ///
    /// # Examples
    ///
    /// ```rust
    /// use line_toolbox::{StringTable, TextBufferReader};
    ///
    /// let mut reader = TextBufferReader::from_text("eth0\nlo\n");
    /// let table = StringTable::from_lines(&mut reader).unwrap();
    /// assert_eq!(table.lines().collect::<Vec<_>>(), vec!["eth0", "lo"]);
    /// ```
    pub fn from_lines<R: LineRead>(reader: &mut R) -> Result<StringTable> {
        read_rows(reader, None)
    }

    /// Appends one row per remaining line of `reader`, cells split on
    /// `separator` without collapsing empty fields.
    ///
    /// # Errors
    ///
    /// Same as [`parse`](Self::parse), plus reader failures.
    pub fn from_separated_lines<R: LineRead>(reader: &mut R, separator: &str) -> Result<StringTable> {
        read_rows(reader, Some(separator))
    }

    /// Parses serialized text, one row per line, cells split on `separator`.
    /// Empty lines become rows with empty text.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`](crate::Error::InvalidArgument) for
    /// an empty separator and
    /// [`Error::ColumnsExhausted`](crate::Error::ColumnsExhausted) for a line
    /// with more fields than the table has columns.
    pub fn parse(text: &str, separator: &str) -> Result<StringTable> {
        let options = ReaderOptions::new().with_skip_empty_lines(false);
        let mut reader = TextBufferReader::with_options(text.as_bytes(), options);
        read_rows(&mut reader, Some(separator))
    }

    /// Loads a text file, one line per row.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`](crate::Error::Io) if the file cannot be read.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<StringTable> {
        let mut reader = TextFileReader::open(path.as_ref())?;
        let table = read_rows(&mut reader, None)?;
        debug!(path = %path.as_ref().display(), rows = table.len(), "loaded string table");
        Ok(table)
    }

    /// Loads a file written by [`save`](StringTable::save), splitting each
    /// line on `separator`.
    ///
    /// # Errors
    ///
    /// Same as [`load`](Self::load) and [`parse`](Self::parse).
    pub fn load_separated<P: AsRef<Path>>(path: P, separator: &str) -> Result<StringTable> {
        let mut reader = TextFileReader::open(path.as_ref())?;
        read_rows(&mut reader, Some(separator))
    }

    /// Builds a table from rows of cells. A row without cells becomes a row
    /// with empty text.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ColumnsExhausted`](crate::Error::ColumnsExhausted) for
    /// a row with more cells than the table has columns.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use line_toolbox::StringTable;
    ///
    /// let table = StringTable::from_rows([vec!["eth0", "up"], vec!["lo"]]).unwrap();
    /// assert_eq!(table.cell(0, 1), Some("up"));
    /// assert_eq!(table.cell(1, 1), None);
    /// ```
    pub fn from_rows<I, R, S>(rows: I) -> Result<StringTable>
    where
        I: IntoIterator<Item = R>,
        R: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut table = StringTable::new();
        for cells in rows {
            push_row(&mut table, cells)?;
        }
        Ok(table)
    }
}

fn push_row<R, S>(table: &mut StringTable, cells: R) -> Result<usize>
where
    R: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut cells = cells.into_iter();
    let first = cells.next();
    let row = table.insert(table.len(), first.as_ref().map_or("", |cell| cell.as_ref()))?;
    for cell in cells {
        table.col_append(row, cell.as_ref())?;
    }
    Ok(row)
}

fn read_rows<R: LineRead>(reader: &mut R, separator: Option<&str>) -> Result<StringTable> {
    if separator == Some("") {
        return Err(crate::Error::invalid_argument("separator is empty"));
    }
    let mut table = StringTable::new();
    while let Some(line) = reader.next_line()? {
        match separator {
            Some(separator) => push_row(&mut table, split_fields(&line, separator, false))?,
            None => table.insert(table.len(), &line)?,
        };
    }
    Ok(table)
}

struct TableVisitor;

impl<'de> Visitor<'de> for TableVisitor {
    type Value = StringTable;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a sequence of rows, each a sequence of strings")
    }

    fn visit_seq<A>(self, mut seq: A) -> std::result::Result<StringTable, A::Error>
    where
        A: SeqAccess<'de>,
    {
        let mut table = StringTable::new();
        while let Some(cells) = seq.next_element::<Vec<String>>()? {
            push_row(&mut table, cells).map_err(de::Error::custom)?;
        }
        Ok(table)
    }
}

impl<'de> Deserialize<'de> for StringTable {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_seq(TableVisitor)
    }
}
