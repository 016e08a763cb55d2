//! # line_toolbox
//!
//! Line-oriented text parsing: turn command output (`ifconfig`, `ip addr`,
//! log files) into rows and columns, and pull tagged values out of lines.
//!
//! ## What is in the box?
//!
//! - [`StringTable`]: a growable, jagged table of strings with absent cells,
//!   slot-recycling removal, substring and key searches, substitution and a
//!   case-insensitive sort
//! - [`LineParser`]: tag, delimiter and dashed-parameter extraction over one
//!   line at a time, with bounded inputs and a reusable scratch workspace
//! - [`StreamLineReader`], [`TextFileReader`] and [`TextBufferReader`]:
//!   incremental line readers that survive lines longer than their buffers
//!   and CRLF pairs split across reads
//! - [`AppendBuffer`]: the grow-on-demand byte buffer the rest is built on
//!
//! ## Quick Start
//!
//! Add this to your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! line_toolbox = "0.1"
//! ```
//!
//! ### Reading command output into a table
//!
//! ```rust
//! use line_toolbox::{StringTable, TextBufferReader};
//!
//! let output = "eth0 10.0.0.7 up\nlo 127.0.0.1 up\nwlan0 - down\n";
//! let mut reader = TextBufferReader::from_text(output);
//! let mut table = StringTable::from_lines(&mut reader).unwrap();
//! table.split_column(" ").unwrap();
//!
//! assert_eq!(table.value_for_key("lo", 1).unwrap(), Some("127.0.0.1"));
//! assert_eq!(table.find_in_column("down", 2).unwrap(), Some(2));
//! ```
//!
//! ### Extracting values from a line
//!
//! ```rust
//! use line_toolbox::LineParser;
//!
//! let mut parser = LineParser::new();
//! let line = "something::HASH(231230302)::blabla";
//! assert_eq!(parser.extract_tag(line, "HASH").unwrap(), Some("231230302"));
//!
//! let fields = parser.split(line, "::").unwrap();
//! assert_eq!(fields.len(), 3);
//! ```
//!
//! ### Round-tripping through text
//!
//! ```rust
//! use line_toolbox::{from_str, to_string, table};
//!
//! let table = table![["eth0", "up"], ["lo", "up"]];
//! let text = to_string(&table);
//! assert_eq!(text, "eth0\tup\nlo\tup\n");
//! assert_eq!(from_str(&text).unwrap(), table);
//! ```
//!
//! ## Error Model
//!
//! Every fallible operation returns [`Result`]. "Not found" is not an error:
//! searches return `Option`, removals return `Ok(None)`. See [`Error`] for
//! the failure kinds.
//!
//! ## Logging
//!
//! The crate emits [`tracing`] events (`debug` for table growth, overflow
//! splits, file open and save; `trace` for reader refills) and never installs
//! a subscriber.
//!
//! ## Safety Guarantees
//!
//! - No `unsafe` code blocks
//! - Failed growth leaves tables and buffers in their previous state
//! - Oversized parser inputs are rejected, never truncated silently
//!
//! ## Examples
//!
//! See the `demos/` directory:
//!
//! - **`split_fields.rs`** - Splitting, merging and tag extraction
//! - **`interface_table.rs`** - Parsing interface listings into a table
//!
//! Run any example with: `cargo run --example <name>`

pub mod append;
pub mod de;
pub mod error;
pub mod macros;
pub mod options;
pub mod parser;
pub mod reader;
pub mod ser;
pub mod table;

pub use append::AppendBuffer;
pub use error::{Error, Result};
pub use options::{
    LineEnding, ParserOptions, ReaderOptions, SortOrder, SubstituteMode, TableOptions,
};
pub use parser::{FirstWord, LineParser, Replaced, MERGE_SEPARATOR};
pub use reader::{
    LineRead, LineStatus, Lines, ReaderState, StreamLineReader, TextBufferReader, TextFileReader,
};
pub use ser::DEFAULT_SEPARATOR;
pub use table::{compare_case_insensitive, StringTable};

use std::io;

/// Serialize a table to tab-separated, LF-terminated text.
///
/// # Examples
///
/// ```rust
/// use line_toolbox::{table, to_string};
///
/// let table = table![["eth0", "up"]];
/// assert_eq!(to_string(&table), "eth0\tup\n");
/// ```
#[must_use]
pub fn to_string(table: &StringTable) -> String {
    table.to_text(DEFAULT_SEPARATOR, LineEnding::Lf)
}

/// Serialize a table to a writer as tab-separated, LF-terminated text.
///
/// # Errors
///
/// Returns an error if writing to the writer fails.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_writer<W>(writer: W, table: &StringTable) -> Result<()>
where
    W: io::Write,
{
    table.write_to(writer, DEFAULT_SEPARATOR, LineEnding::Lf)
}

/// Parse tab-separated text into a table.
///
/// # Examples
///
/// ```rust
/// use line_toolbox::from_str;
///
/// let table = from_str("eth0\tup\nlo\n").unwrap();
/// assert_eq!(table.cell(0, 1), Some("up"));
/// assert_eq!(table.line(1), Some("lo"));
/// ```
///
/// # Errors
///
/// Returns an error if a line has more fields than a table has columns.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_str(text: &str) -> Result<StringTable> {
    StringTable::parse(text, DEFAULT_SEPARATOR)
}

/// Parse tab-separated text from an I/O stream into a table.
///
/// Unlike [`from_str`], the stream is read line by line and never held in
/// memory as a whole.
///
/// # Examples
///
/// ```rust
/// use line_toolbox::from_reader;
/// use std::io::Cursor;
///
/// let table = from_reader(Cursor::new(b"eth0\tup\r\nlo\tup\r\n")).unwrap();
/// assert_eq!(table.len(), 2);
/// assert_eq!(table.cell(1, 1), Some("up"));
/// ```
///
/// # Errors
///
/// Returns an error if reading fails or a line has too many fields.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_reader<R>(reader: R) -> Result<StringTable>
where
    R: io::Read,
{
    let mut lines = StreamLineReader::new(reader);
    StringTable::from_separated_lines(&mut lines, DEFAULT_SEPARATOR)
}

/// Parse tab-separated bytes into a table. Invalid UTF-8 is replaced.
///
/// # Errors
///
/// Same as [`from_str`].
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_slice(bytes: &[u8]) -> Result<StringTable> {
    from_str(&String::from_utf8_lossy(bytes))
}
