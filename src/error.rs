//! Error types for the line toolbox.
//!
//! Every fallible operation in this crate returns [`Result`]. Absence is not
//! an error: searches return `Option`, and removals return `Option<row>` so a
//! caller can tell "not found" (`Ok(None)`) from "removed" (`Ok(Some(row))`)
//! from a genuine failure (`Err`).
//!
//! ## Error Categories
//!
//! - **Argument errors**: empty needles or delimiters, inputs beyond a fixed bound
//! - **Addressing errors**: a row outside the table, a row without a free column
//! - **Capacity errors**: allocation failure, caller buffer too small
//! - **I/O errors**: open, read or write failures on the underlying source
//!
//! ## Examples
//!
//! ```rust
//! use line_toolbox::{Error, LineParser};
//!
//! let mut parser = LineParser::new();
//! let long_line = "x".repeat(4096);
//! let result = parser.extract_tag(&long_line, "HASH");
//! assert!(matches!(result, Err(Error::TooLong { .. })));
//! ```

use std::fmt;
use thiserror::Error;

/// Represents all possible errors raised by the toolbox.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// IO error during reading or writing
    #[error("IO error: {0}")]
    Io(String),

    /// An argument was empty, zero or otherwise unusable
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Input exceeds a fixed bound; rejected rather than truncated
    #[error("{what} is {len} bytes long, the limit is {max} bytes")]
    TooLong {
        what: &'static str,
        len: usize,
        max: usize,
    },

    /// The instance was closed and cannot be used any more
    #[error("{0} is not initialized (already closed)")]
    NotInitialized(&'static str),

    /// Growing a buffer or the row backbone failed
    #[error("Out of memory while reserving {requested} more slots")]
    OutOfMemory { requested: usize },

    /// The destination could not hold the whole output; a prefix was written
    #[error("Buffer too small: {needed} bytes needed, {available} available")]
    BufferTooSmall { needed: usize, available: usize },

    /// A duplicate row was rejected
    #[error("Row already exists: {0}")]
    AlreadyExists(String),

    /// The addressed row is not in use
    #[error("Row {row} is out of range (table has {rows} rows)")]
    RowOutOfRange { row: usize, rows: usize },

    /// The addressed row has no unused column left
    #[error("Row {row} has no free column (all {columns} columns are used)")]
    ColumnsExhausted { row: usize, columns: usize },

    /// A code path that should be unreachable was taken
    #[error("Internal design problem: {0}")]
    InternalDesign(String),
}

impl Error {
    /// Creates an invalid argument error.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use line_toolbox::Error;
    ///
    /// let err = Error::invalid_argument("needle is empty");
    /// assert!(err.to_string().contains("needle is empty"));
    /// ```
    pub fn invalid_argument<T: fmt::Display>(msg: T) -> Self {
        Error::InvalidArgument(msg.to_string())
    }

    /// Creates a bound violation for input named `what`.
    pub fn too_long(what: &'static str, len: usize, max: usize) -> Self {
        Error::TooLong { what, len, max }
    }

    /// Creates an allocation failure error.
    pub fn out_of_memory(requested: usize) -> Self {
        Error::OutOfMemory { requested }
    }

    /// Creates an I/O error for file reading/writing failures.
    pub fn io<T: fmt::Display>(msg: T) -> Self {
        Error::Io(msg.to_string())
    }

    /// Creates an internal error for paths the design never expects.
    pub fn internal<T: fmt::Display>(msg: T) -> Self {
        Error::InternalDesign(msg.to_string())
    }

    /// Returns `true` when the operation wrote a partial result before stopping.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use line_toolbox::Error;
    ///
    /// let err = Error::BufferTooSmall { needed: 10, available: 4 };
    /// assert!(err.is_partial());
    /// assert!(!Error::io("disk").is_partial());
    /// ```
    #[must_use]
    pub fn is_partial(&self) -> bool {
        matches!(self, Error::BufferTooSmall { .. })
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
