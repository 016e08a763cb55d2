//! Configuration options for tables, parsers and readers.
//!
//! Every bound the toolbox works with is configurable here rather than fixed
//! at compile time:
//!
//! - [`TableOptions`]: row capacity, growth step, column count, cell length
//! - [`ParserOptions`]: workspace and tag bounds, split greediness
//! - [`ReaderOptions`]: lookahead size and empty-line policy
//! - [`LineEnding`], [`SortOrder`], [`SubstituteMode`]: small selector enums
//!
//! All option structs derive `Serialize`/`Deserialize` so they can be kept in
//! a configuration file.
//!
//! ## Examples
//!
//! ```rust
//! use line_toolbox::{StringTable, TableOptions};
//!
//! let options = TableOptions::new()
//!     .with_row_capacity(8)
//!     .with_cell_length(64);
//! let mut table = StringTable::with_options(options).unwrap();
//! table.add("eth0").unwrap();
//! assert_eq!(table.capacity(), 8);
//! ```

use serde::{Deserialize, Serialize};

/// Default number of rows allocated up front and added on each growth.
pub const DEFAULT_ROW_CAPACITY: usize = 100;
/// Default number of column slots per row.
pub const DEFAULT_COLUMNS: usize = 30;
/// Default size of a cell buffer, terminator slot included.
pub const DEFAULT_CELL_LENGTH: usize = 1024;
/// Default upper bound for a parser input line.
pub const DEFAULT_MAX_WORKSPACE: usize = 1024;
/// Default upper bound for a parser tag, delimiter or search string.
pub const DEFAULT_MAX_TAG: usize = 256;
/// Default size of a streaming reader's lookahead buffer.
pub const DEFAULT_LOOKAHEAD: usize = 1024;

/// Line terminator written after each serialized row.
///
/// # Examples
///
/// ```rust
/// use line_toolbox::LineEnding;
///
/// assert_eq!(LineEnding::Lf.as_str(), "\n");
/// assert_eq!(LineEnding::CrLf.as_str(), "\r\n");
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LineEnding {
    #[default]
    Lf,
    CrLf,
}

impl LineEnding {
    /// Returns the terminator bytes as a string.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            LineEnding::Lf => "\n",
            LineEnding::CrLf => "\r\n",
        }
    }
}

/// Direction of [`StringTable::sort`](crate::StringTable::sort).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SortOrder {
    #[default]
    Ascending,
    Descending,
}

impl SortOrder {
    /// Returns the order's name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Ascending => "ascending",
            SortOrder::Descending => "descending",
        }
    }
}

/// How far [`StringTable::substitute_in_matching`](crate::StringTable::substitute_in_matching) goes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SubstituteMode {
    /// Replace the first occurrence found in the table, then stop.
    #[default]
    First,
    /// Replace every occurrence in every row.
    All,
}

impl SubstituteMode {
    /// Returns the mode's name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            SubstituteMode::First => "first",
            SubstituteMode::All => "all",
        }
    }
}

/// Configuration for a [`StringTable`](crate::StringTable).
///
/// # Examples
///
/// ```rust
/// use line_toolbox::TableOptions;
///
/// let options = TableOptions::new();
/// assert_eq!(options.row_capacity, 100);
/// assert_eq!(options.columns, 30);
/// assert_eq!(options.cell_length, 1024);
/// assert!(options.allow_duplicates);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableOptions {
    /// Rows allocated at construction.
    pub row_capacity: usize,
    /// Rows added each time the table runs out of capacity.
    pub growth_step: usize,
    /// Column slots per row.
    pub columns: usize,
    /// Cell buffer size; text is truncated to `cell_length - 1` bytes on
    /// operations that do not grow cells.
    pub cell_length: usize,
    /// When `false`, `add` and `insert` reject text already present in column 0.
    pub allow_duplicates: bool,
}

impl Default for TableOptions {
    fn default() -> Self {
        TableOptions {
            row_capacity: DEFAULT_ROW_CAPACITY,
            growth_step: DEFAULT_ROW_CAPACITY,
            columns: DEFAULT_COLUMNS,
            cell_length: DEFAULT_CELL_LENGTH,
            allow_duplicates: true,
        }
    }
}

impl TableOptions {
    /// Creates the default options.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the initial row capacity. Zero falls back to the default.
    #[must_use]
    pub fn with_row_capacity(mut self, rows: usize) -> Self {
        self.row_capacity = if rows == 0 { DEFAULT_ROW_CAPACITY } else { rows };
        self
    }

    /// Sets how many rows each growth adds.
    #[must_use]
    pub fn with_growth_step(mut self, rows: usize) -> Self {
        self.growth_step = rows;
        self
    }

    /// Sets the number of column slots per row.
    #[must_use]
    pub fn with_columns(mut self, columns: usize) -> Self {
        self.columns = columns;
        self
    }

    /// Sets the cell buffer size.
    #[must_use]
    pub fn with_cell_length(mut self, cell_length: usize) -> Self {
        self.cell_length = cell_length;
        self
    }

    /// Allows or rejects duplicate rows.
    #[must_use]
    pub fn with_duplicates(mut self, allow: bool) -> Self {
        self.allow_duplicates = allow;
        self
    }
}

/// Configuration for a [`LineParser`](crate::LineParser).
///
/// # Examples
///
/// ```rust
/// use line_toolbox::ParserOptions;
///
/// let options = ParserOptions::new().with_greedy(true);
/// assert!(options.greedy);
/// assert_eq!(options.max_workspace, 1024);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserOptions {
    /// Longest accepted input line, and the size of the scratch workspace.
    pub max_workspace: usize,
    /// Longest accepted tag, delimiter or search string.
    pub max_tag: usize,
    /// Collapse adjacent delimiters when splitting.
    pub greedy: bool,
}

impl Default for ParserOptions {
    fn default() -> Self {
        ParserOptions {
            max_workspace: DEFAULT_MAX_WORKSPACE,
            max_tag: DEFAULT_MAX_TAG,
            greedy: false,
        }
    }
}

impl ParserOptions {
    /// Creates the default options.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the workspace bound.
    #[must_use]
    pub fn with_max_workspace(mut self, bytes: usize) -> Self {
        self.max_workspace = bytes;
        self
    }

    /// Sets the tag bound.
    #[must_use]
    pub fn with_max_tag(mut self, bytes: usize) -> Self {
        self.max_tag = bytes;
        self
    }

    /// Sets split greediness.
    #[must_use]
    pub fn with_greedy(mut self, greedy: bool) -> Self {
        self.greedy = greedy;
        self
    }
}

/// Configuration for the streaming line readers.
///
/// The stream reader keeps empty lines by default; the buffer reader skips
/// them by default.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReaderOptions {
    /// Size of the read-ahead buffer. Must be at least 2.
    pub lookahead: usize,
    /// `Some(flag)` overrides the reader's empty-line default.
    pub skip_empty_lines: Option<bool>,
}

impl Default for ReaderOptions {
    fn default() -> Self {
        ReaderOptions {
            lookahead: DEFAULT_LOOKAHEAD,
            skip_empty_lines: None,
        }
    }
}

impl ReaderOptions {
    /// Creates the default options.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the lookahead buffer size.
    #[must_use]
    pub fn with_lookahead(mut self, bytes: usize) -> Self {
        self.lookahead = bytes;
        self
    }

    /// Forces empty lines to be skipped or kept.
    #[must_use]
    pub fn with_skip_empty_lines(mut self, skip: bool) -> Self {
        self.skip_empty_lines = Some(skip);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_row_capacity_uses_default() {
        let options = TableOptions::new().with_row_capacity(0);
        assert_eq!(options.row_capacity, DEFAULT_ROW_CAPACITY);
    }

    #[test]
    fn test_options_from_partial_json() {
        let options: TableOptions = serde_json::from_str(r#"{"columns": 4}"#).unwrap();
        assert_eq!(options.columns, 4);
        assert_eq!(options.cell_length, DEFAULT_CELL_LENGTH);

        let parser: ParserOptions = serde_json::from_str(r#"{"greedy": true}"#).unwrap();
        assert!(parser.greedy);
        assert_eq!(parser.max_tag, DEFAULT_MAX_TAG);
    }

    #[test]
    fn test_selector_names() {
        assert_eq!(SortOrder::default().as_str(), "ascending");
        assert_eq!(SubstituteMode::All.as_str(), "all");
        assert_eq!(LineEnding::default(), LineEnding::Lf);
    }

    #[test]
    fn test_reader_override() {
        let options = ReaderOptions::new().with_skip_empty_lines(false);
        assert_eq!(options.skip_empty_lines, Some(false));
        assert_eq!(options.lookahead, DEFAULT_LOOKAHEAD);
    }
}
