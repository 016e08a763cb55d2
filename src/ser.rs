//! Table serialization.
//!
//! This module turns a [`StringTable`] back into text.
//!
//! ## Overview
//!
//! Each row becomes one line: its populated cells joined by a separator,
//! followed by a line ending. Absent cells are skipped, so a row with
//! columns 0 and 2 populated prints as two fields.
//!
//! The same text can go to several destinations:
//!
//! - [`to_text`](StringTable::to_text): a new `String`
//! - [`write_to`](StringTable::write_to): any [`std::io::Write`]
//! - [`write_into`](StringTable::write_into): a fixed caller slice, with a
//!   partial write and [`Error::BufferTooSmall`] when it runs out
//! - [`append_to`](StringTable::append_to): a growable [`AppendBuffer`]
//! - [`save`](StringTable::save): a file
//!
//! `Display` prints the tab-separated, LF-terminated form, and the table also
//! implements `serde::Serialize` as a sequence of rows, each a sequence of
//! its populated cells.
//!
//! ## Usage
//!
//! ```rust
//! use line_toolbox::{LineEnding, StringTable};
//!
//! let mut table = StringTable::new();
//! let row = table.add("eth0").unwrap();
//! table.col_append(row, "10.0.0.7").unwrap();
//! table.add("lo").unwrap();
//!
//! assert_eq!(table.to_text("\t", LineEnding::Lf), "eth0\t10.0.0.7\nlo\n");
//! assert_eq!(table.to_text(";", LineEnding::CrLf), "eth0;10.0.0.7\r\nlo\r\n");
//! assert_eq!(table.to_string(), "eth0\t10.0.0.7\nlo\n");
//! ```

use crate::append::AppendBuffer;
use crate::options::LineEnding;
use crate::table::StringTable;
use crate::{Error, Result};
use serde::ser::{Serialize, SerializeSeq, Serializer};
use std::fmt;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::debug;

/// Separator used by `Display` and the crate-level helpers.
pub const DEFAULT_SEPARATOR: &str = "\t";

impl StringTable {
    /// Visits the output text piece by piece, in order.
    fn for_each_piece<F>(&self, separator: &str, line_ending: LineEnding, mut emit: F) -> Result<()>
    where
        F: FnMut(&str) -> Result<()>,
    {
        for row in 0..self.len() {
            for (i, cell) in self.cells(row).enumerate() {
                if i > 0 {
                    emit(separator)?;
                }
                emit(cell)?;
            }
            emit(line_ending.as_str())?;
        }
        Ok(())
    }

    /// Exact length of the serialized text in bytes.
    #[must_use]
    pub fn text_len(&self, separator: &str, line_ending: LineEnding) -> usize {
        let mut len = 0;
        let _ = self.for_each_piece(separator, line_ending, |piece| {
            len += piece.len();
            Ok(())
        });
        len
    }

    /// Serializes the table into a new string.
    #[must_use]
    pub fn to_text(&self, separator: &str, line_ending: LineEnding) -> String {
        let mut output = String::with_capacity(self.text_len(separator, line_ending));
        let _ = self.for_each_piece(separator, line_ending, |piece| {
            output.push_str(piece);
            Ok(())
        });
        output
    }

    /// Serializes the table into `writer`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if writing fails.
    pub fn write_to<W: Write>(
        &self,
        mut writer: W,
        separator: &str,
        line_ending: LineEnding,
    ) -> Result<()> {
        self.for_each_piece(separator, line_ending, |piece| {
            writer.write_all(piece.as_bytes()).map_err(Error::from)
        })?;
        writer.flush()?;
        Ok(())
    }

    /// Serializes the table into a fixed-size slice and returns the number of
    /// bytes written.
    ///
    /// # Errors
    ///
    /// Returns [`Error::BufferTooSmall`] when the text does not fit. The
    /// slice then holds as much of the text as fits.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use line_toolbox::{Error, LineEnding, StringTable};
    ///
    /// let mut table = StringTable::new();
    /// table.add("eth0").unwrap();
    /// table.add("wlan0").unwrap();
    ///
    /// let mut out = [0u8; 8];
    /// let err = table.write_into(&mut out, "\t", LineEnding::Lf).unwrap_err();
    /// assert_eq!(err, Error::BufferTooSmall { needed: 11, available: 8 });
    /// assert_eq!(&out, b"eth0\nwla");
    /// ```
    pub fn write_into(
        &self,
        out: &mut [u8],
        separator: &str,
        line_ending: LineEnding,
    ) -> Result<usize> {
        let available = out.len();
        let mut written = 0;
        let mut truncated = false;
        self.for_each_piece(separator, line_ending, |piece| {
            let take = piece.len().min(available - written);
            out[written..written + take].copy_from_slice(&piece.as_bytes()[..take]);
            written += take;
            truncated |= take < piece.len();
            Ok(())
        })?;
        if truncated {
            return Err(Error::BufferTooSmall {
                needed: self.text_len(separator, line_ending),
                available,
            });
        }
        Ok(written)
    }

    /// Serializes the table onto the end of `buffer`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfMemory`] if the buffer cannot grow.
    pub fn append_to(
        &self,
        buffer: &mut AppendBuffer,
        separator: &str,
        line_ending: LineEnding,
    ) -> Result<()> {
        self.for_each_piece(separator, line_ending, |piece| {
            buffer.append(piece.as_bytes(), None, None)
        })
    }

    /// Writes the table to a file, replacing its content.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if the file cannot be created or written.
    pub fn save<P: AsRef<Path>>(
        &self,
        path: P,
        separator: &str,
        line_ending: LineEnding,
    ) -> Result<()> {
        let path = path.as_ref();
        let file = File::create(path)
            .map_err(|err| Error::io(format!("cannot create {}: {err}", path.display())))?;
        self.write_to(BufWriter::new(file), separator, line_ending)?;
        debug!(path = %path.display(), rows = self.len(), "saved string table");
        Ok(())
    }
}

impl fmt::Display for StringTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.len() {
            for (i, cell) in self.cells(row).enumerate() {
                if i > 0 {
                    f.write_str(DEFAULT_SEPARATOR)?;
                }
                f.write_str(cell)?;
            }
            f.write_str(LineEnding::Lf.as_str())?;
        }
        Ok(())
    }
}

impl Serialize for StringTable {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut seq = serializer.serialize_seq(Some(self.len()))?;
        for row in 0..self.len() {
            let cells: Vec<&str> = self.cells(row).collect();
            seq.serialize_element(&cells)?;
        }
        seq.end()
    }
}
