//! Growable, jagged table of strings.
//!
//! [`StringTable`] stores one logical record per row (usually one source
//! line) and up to a fixed number of columns per row. Column 0 of a used row
//! always holds text; the remaining columns are either populated or absent,
//! and absent is distinct from the empty string.
//!
//! ## Storage
//!
//! Rows live in a backbone of pre-allocated slots. Removing a row recycles
//! its slot to the end of the used range instead of freeing it, and growth
//! extends the backbone by a fixed step. Growth is fallible: when it fails
//! the table keeps every committed row and reports [`Error::OutOfMemory`].
//!
//! ## Searching
//!
//! There are two needle families and they deliberately differ:
//!
//! - [`find_matching`](StringTable::find_matching) does substring search on
//!   column 0. A needle with `|` requires *every* alternative to occur in one
//!   of the row's own `|`-separated tokens. A needle with `.*` requires its
//!   pieces to occur in order.
//! - [`find_exact`](StringTable::find_exact) and
//!   [`find_in_column`](StringTable::find_in_column) compare for equality.
//!   For `find_in_column` a needle with `|` matches a cell equal to *any*
//!   alternative.
//!
//! ## Examples
//!
//! ```rust
//! use line_toolbox::{SortOrder, StringTable};
//!
//! let mut table = StringTable::new();
//! table.add("wlan0").unwrap();
//! table.add("eth0").unwrap();
//! table.add("Lo").unwrap();
//! table.sort(0, SortOrder::Ascending, 0, None).unwrap();
//!
//! let lines: Vec<&str> = table.lines().collect();
//! assert_eq!(lines, vec!["eth0", "Lo", "wlan0"]);
//! ```

use crate::options::{SortOrder, SubstituteMode, TableOptions};
use crate::parser::split_fields;
use crate::{Error, Result};
use memchr::memmem;
use std::cmp::Ordering;
use tracing::{debug, trace};

/// One row slot: a fixed number of optional cells.
#[derive(Clone, Debug)]
struct Row {
    cells: Vec<Option<String>>,
}

impl Row {
    fn empty(columns: usize) -> Self {
        Row {
            cells: vec![None; columns],
        }
    }

    fn try_empty(columns: usize) -> Result<Self> {
        let mut cells = Vec::new();
        cells
            .try_reserve_exact(columns)
            .map_err(|_| Error::out_of_memory(columns))?;
        cells.resize(columns, None);
        Ok(Row { cells })
    }

    fn text(&self) -> &str {
        self.cell(0).unwrap_or("")
    }

    fn cell(&self, column: usize) -> Option<&str> {
        self.cells.get(column).and_then(Option::as_deref)
    }

    /// Clears the row for reuse; the column-0 allocation is kept.
    fn recycle(&mut self) {
        let mut cells = self.cells.iter_mut();
        if let Some(Some(first)) = cells.next() {
            first.clear();
        }
        for cell in cells {
            *cell = None;
        }
    }
}

/// Writes `text` into a cell, reusing its allocation when there is one.
fn write_cell(slot: &mut Option<String>, text: &str, cell_length: usize) -> Result<()> {
    match slot {
        Some(existing) => {
            // Reserve before clearing so a failed rewrite keeps the old text.
            let additional = text.len().saturating_sub(existing.len());
            existing
                .try_reserve(additional)
                .map_err(|_| Error::out_of_memory(additional))?;
            existing.clear();
            existing.push_str(text);
        }
        None => {
            let mut fresh = String::new();
            let size = cell_length.max(text.len() + 1);
            fresh
                .try_reserve_exact(size)
                .map_err(|_| Error::out_of_memory(size))?;
            fresh.push_str(text);
            *slot = Some(fresh);
        }
    }
    Ok(())
}

/// Cuts `text` to at most `cell_length - 1` bytes on a character boundary.
fn clip(text: &str, cell_length: usize) -> &str {
    let max = cell_length.saturating_sub(1);
    if text.len() <= max {
        return text;
    }
    let mut end = max;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    &text[..end]
}

/// Compares two strings ignoring ASCII case, like `strcasecmp`.
///
/// # Examples
///
/// ```rust
/// use line_toolbox::compare_case_insensitive;
/// use std::cmp::Ordering;
///
/// assert_eq!(compare_case_insensitive("ETH0", "eth0"), Ordering::Equal);
/// assert_eq!(compare_case_insensitive("Lo", "eth0"), Ordering::Greater);
/// ```
#[must_use]
pub fn compare_case_insensitive(left: &str, right: &str) -> Ordering {
    left.bytes()
        .map(|b| b.to_ascii_lowercase())
        .cmp(right.bytes().map(|b| b.to_ascii_lowercase()))
}

/// Search needle for the substring family.
enum Needle<'a> {
    Substring(&'a str),
    Wildcard(Vec<&'a str>),
    AllOf(Vec<&'a str>),
}

impl<'a> Needle<'a> {
    fn parse(needle: &'a str) -> Self {
        if needle.contains('|') {
            Needle::AllOf(needle.split('|').filter(|alt| !alt.is_empty()).collect())
        } else if needle.contains(".*") {
            Needle::Wildcard(needle.split(".*").filter(|p| !p.is_empty()).collect())
        } else {
            Needle::Substring(needle)
        }
    }

    fn matches(&self, text: &str) -> bool {
        match self {
            Needle::Substring(needle) => text.contains(needle),
            Needle::Wildcard(pieces) => wildcard_match(text, pieces),
            Needle::AllOf(alternatives) => {
                !alternatives.is_empty()
                    && alternatives.iter().all(|alt| {
                        text.split('|').any(|token| simple_match(token, alt))
                    })
            }
        }
    }
}

fn simple_match(text: &str, pattern: &str) -> bool {
    if pattern.contains(".*") {
        let pieces: Vec<&str> = pattern.split(".*").filter(|p| !p.is_empty()).collect();
        wildcard_match(text, &pieces)
    } else {
        text.contains(pattern)
    }
}

// Every piece must occur, in order, without overlapping.
fn wildcard_match(text: &str, pieces: &[&str]) -> bool {
    if pieces.is_empty() {
        return false;
    }
    let mut rest = text;
    for piece in pieces {
        match rest.find(piece) {
            Some(at) => rest = &rest[at + piece.len()..],
            None => return false,
        }
    }
    true
}

fn require_needle(needle: &str, what: &str) -> Result<()> {
    if needle.is_empty() {
        return Err(Error::invalid_argument(format!("{what} is empty")));
    }
    Ok(())
}

/// A growable, jagged table of strings addressed by `(row, column)`.
///
/// See the [module documentation](self) for the storage and search model.
#[derive(Clone, Debug)]
pub struct StringTable {
    rows: Vec<Row>,
    used: usize,
    columns_used: usize,
    options: TableOptions,
}

impl Default for StringTable {
    fn default() -> Self {
        StringTable::new()
    }
}

impl StringTable {
    /// Creates a table with the default options (100 rows, 30 columns,
    /// 1024-byte cells).
    #[must_use]
    pub fn new() -> Self {
        StringTable::build(TableOptions::default())
    }

    /// Infallible constructor for options known to be valid.
    pub(crate) fn build(options: TableOptions) -> Self {
        let rows = (0..options.row_capacity.max(1))
            .map(|_| Row::empty(options.columns))
            .collect();
        StringTable {
            rows,
            used: 0,
            columns_used: 1,
            options,
        }
    }

    /// Creates a table with room for `rows` rows before the first growth.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfMemory`] if the backbone cannot be allocated.
    pub fn with_capacity(rows: usize) -> Result<Self> {
        Self::with_options(TableOptions::new().with_row_capacity(rows))
    }

    /// Creates a table with custom options.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] for zero columns, a zero growth step
    /// or a cell length below 2, and [`Error::OutOfMemory`] if the backbone
    /// cannot be allocated.
    pub fn with_options(options: TableOptions) -> Result<Self> {
        if options.columns == 0 {
            return Err(Error::invalid_argument("a table needs at least one column"));
        }
        if options.growth_step == 0 {
            return Err(Error::invalid_argument("growth step must be positive"));
        }
        if options.cell_length < 2 {
            return Err(Error::invalid_argument("cell length must be at least 2"));
        }
        let row_capacity = options.row_capacity.max(1);
        let mut rows = Vec::new();
        rows.try_reserve_exact(row_capacity)
            .map_err(|_| Error::out_of_memory(row_capacity))?;
        for _ in 0..row_capacity {
            rows.push(Row::try_empty(options.columns)?);
        }
        Ok(StringTable {
            rows,
            used: 0,
            columns_used: 1,
            options,
        })
    }

    /// Number of rows in use.
    #[must_use]
    pub fn len(&self) -> usize {
        self.used
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.used == 0
    }

    /// Number of allocated row slots.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.rows.len()
    }

    /// Column slots per row.
    #[must_use]
    pub fn columns(&self) -> usize {
        self.options.columns
    }

    /// Highest column index ever populated, plus one.
    #[must_use]
    pub fn columns_used(&self) -> usize {
        self.columns_used
    }

    #[must_use]
    pub fn options(&self) -> &TableOptions {
        &self.options
    }

    /// Column 0 of `row`.
    #[must_use]
    pub fn line(&self, row: usize) -> Option<&str> {
        self.used_rows().get(row).map(Row::text)
    }

    /// Column 0 of the last row.
    #[must_use]
    pub fn last_line(&self) -> Option<&str> {
        self.used_rows().last().map(Row::text)
    }

    /// The cell at `(row, column)`, or `None` when the row is unused or the
    /// cell is absent.
    #[must_use]
    pub fn cell(&self, row: usize, column: usize) -> Option<&str> {
        self.used_rows().get(row).and_then(|r| r.cell(column))
    }

    /// The populated cells of `row`, in column order.
    pub fn cells(&self, row: usize) -> impl Iterator<Item = &str> + '_ {
        self.used_rows()
            .get(row)
            .into_iter()
            .flat_map(|r| r.cells.iter().flatten().map(String::as_str))
    }

    /// Column 0 of every row, in row order.
    pub fn lines(&self) -> impl Iterator<Item = &str> + '_ {
        self.used_rows().iter().map(Row::text)
    }

    fn used_rows(&self) -> &[Row] {
        &self.rows[..self.used]
    }

    /// Makes room for one more row, growing the backbone by the growth step.
    fn reserve_row(&mut self) -> Result<()> {
        if self.used < self.rows.len() {
            return Ok(());
        }
        let step = self.options.growth_step;
        let mut fresh = Vec::new();
        fresh
            .try_reserve_exact(step)
            .map_err(|_| Error::out_of_memory(step))?;
        for _ in 0..step {
            fresh.push(Row::try_empty(self.options.columns)?);
        }
        self.rows
            .try_reserve_exact(step)
            .map_err(|_| Error::out_of_memory(step))?;
        self.rows.append(&mut fresh);
        debug!(capacity = self.rows.len(), "string table grew");
        Ok(())
    }

    fn reject_duplicate(&self, text: &str) -> Result<()> {
        if !self.options.allow_duplicates && self.lines().any(|line| line == text) {
            return Err(Error::AlreadyExists(text.to_string()));
        }
        Ok(())
    }

    /// Appends a row holding `text` in column 0 and returns its index.
    ///
    /// Text longer than `cell_length - 1` bytes is truncated. The row count
    /// only changes when the whole operation succeeds.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfMemory`] when growth fails and
    /// [`Error::AlreadyExists`] when duplicates are disabled.
    pub fn add(&mut self, text: &str) -> Result<usize> {
        let text = clip(text, self.options.cell_length);
        self.reject_duplicate(text)?;
        self.reserve_row()?;
        let row = self.used;
        write_cell(&mut self.rows[row].cells[0], text, self.options.cell_length)?;
        self.used += 1;
        Ok(row)
    }

    /// Inserts a row before `before_row` (clamped to `len()`) and returns the
    /// index it landed at. The cell grows to fit `text`.
    ///
    /// # Errors
    ///
    /// Same as [`add`](Self::add).
    ///
    /// # Examples
    ///
    /// ```rust
    /// use line_toolbox::StringTable;
    ///
    /// let mut table = StringTable::new();
    /// table.add("a").unwrap();
    /// table.add("c").unwrap();
    /// assert_eq!(table.insert(1, "b").unwrap(), 1);
    /// assert_eq!(table.insert(99, "d").unwrap(), 3);
    /// assert_eq!(table.lines().collect::<Vec<_>>(), vec!["a", "b", "c", "d"]);
    /// ```
    pub fn insert(&mut self, before_row: usize, text: &str) -> Result<usize> {
        self.reject_duplicate(text)?;
        self.reserve_row()?;
        let before_row = before_row.min(self.used);
        let spare = self.used;
        write_cell(&mut self.rows[spare].cells[0], text, self.options.cell_length)?;
        self.rows[before_row..=spare].rotate_right(1);
        self.used += 1;
        Ok(before_row)
    }

    /// Overwrites column 0 of an existing row, truncating like [`add`](Self::add).
    ///
    /// # Errors
    ///
    /// Returns [`Error::RowOutOfRange`] if `row` is not in use.
    pub fn replace(&mut self, row: usize, text: &str) -> Result<()> {
        let text = clip(text, self.options.cell_length);
        self.overwrite(row, text)
    }

    // Column-0 write without truncation.
    fn overwrite(&mut self, row: usize, text: &str) -> Result<()> {
        if row >= self.used {
            return Err(Error::RowOutOfRange {
                row,
                rows: self.used,
            });
        }
        write_cell(&mut self.rows[row].cells[0], text, self.options.cell_length)
    }

    /// Puts `text` in the first unused column of `row` and returns that column.
    ///
    /// # Errors
    ///
    /// Returns [`Error::RowOutOfRange`] if the row is not in use and
    /// [`Error::ColumnsExhausted`] if every column of the row is populated.
    pub fn col_append(&mut self, row: usize, text: &str) -> Result<usize> {
        if row >= self.used {
            return Err(Error::RowOutOfRange {
                row,
                rows: self.used,
            });
        }
        let cell_length = self.options.cell_length;
        let columns = self.options.columns;
        let cells = &mut self.rows[row].cells;
        let column = cells
            .iter()
            .position(Option::is_none)
            .ok_or(Error::ColumnsExhausted { row, columns })?;
        write_cell(&mut cells[column], clip(text, cell_length), cell_length)?;
        self.columns_used = self.columns_used.max(column + 1);
        Ok(column)
    }

    fn next_containing(&self, finder: &memmem::Finder<'_>, start_row: usize) -> Option<usize> {
        (start_row..self.used).find(|&row| finder.find(self.rows[row].text().as_bytes()).is_some())
    }

    fn remove_row(&mut self, row: usize) {
        self.rows[row].recycle();
        self.rows[row..self.used].rotate_left(1);
        self.used -= 1;
    }

    /// Removes the row at `row`.
    ///
    /// Returns `Ok(None)` when there is no such row.
    ///
    /// # Errors
    ///
    /// This operation currently cannot fail; the `Result` keeps the removal
    /// family uniform.
    pub fn remove_at(&mut self, row: usize) -> Result<Option<usize>> {
        if row >= self.used {
            return Ok(None);
        }
        self.remove_row(row);
        Ok(Some(row))
    }

    /// Removes the first row whose column 0 contains `needle`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] for an empty needle.
    pub fn remove_matching(&mut self, needle: &str) -> Result<Option<usize>> {
        self.remove_matching_from(needle, 0)
    }

    /// Like [`remove_matching`](Self::remove_matching) but starts at
    /// `start_row`. The returned index now holds the row after the removed
    /// one, so it is where the next search should resume.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] for an empty needle.
    pub fn remove_matching_from(
        &mut self,
        needle: &str,
        start_row: usize,
    ) -> Result<Option<usize>> {
        require_needle(needle, "needle")?;
        let finder = memmem::Finder::new(needle);
        let found = self.next_containing(&finder, start_row);
        Ok(found.map(|row| {
            self.remove_row(row);
            row
        }))
    }

    /// Removes the first row whose column 0 equals `line`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] for an empty line.
    pub fn remove_exact(&mut self, line: &str) -> Result<Option<usize>> {
        let found = self.position_exact(line)?;
        Ok(found.map(|row| {
            self.remove_row(row);
            row
        }))
    }

    /// Removes `row` and every row before it; returns how many were removed.
    /// A `row` past the end removes everything.
    pub fn remove_through(&mut self, row: usize) -> usize {
        if self.used == 0 {
            return 0;
        }
        let count = row.min(self.used - 1) + 1;
        for slot in &mut self.rows[..count] {
            slot.recycle();
        }
        self.rows[..self.used].rotate_left(count);
        self.used -= count;
        count
    }

    /// Clears every row while keeping the allocated backbone.
    pub fn zero(&mut self) {
        for row in &mut self.rows[..self.used] {
            row.recycle();
        }
        self.used = 0;
        self.columns_used = 1;
    }

    /// Returns the first row whose column 0 matches `needle`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] for an empty needle.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use line_toolbox::StringTable;
    ///
    /// let mut table = StringTable::new();
    /// table.add("eth0|up|10.0.0.7").unwrap();
    /// table.add("lo|up|127.0.0.1").unwrap();
    ///
    /// assert_eq!(table.find_matching("127.0").unwrap(), Some("lo|up|127.0.0.1"));
    /// // Every alternative must be present.
    /// assert_eq!(table.find_matching("eth0|10.0").unwrap(), Some("eth0|up|10.0.0.7"));
    /// assert_eq!(table.find_matching("eth0|127").unwrap(), None);
    /// ```
    pub fn find_matching(&self, needle: &str) -> Result<Option<&str>> {
        let found = self.position_matching(needle, 0, None)?;
        Ok(found.map(|row| self.rows[row].text()))
    }

    /// Index of the first row in `start_row..=stop_row` (to the end when
    /// `stop_row` is `None`) matching `needle` with the substring rules.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] for an empty needle or a stop row
    /// before the start row.
    pub fn position_matching(
        &self,
        needle: &str,
        start_row: usize,
        stop_row: Option<usize>,
    ) -> Result<Option<usize>> {
        require_needle(needle, "needle")?;
        if let Some(stop) = stop_row.filter(|&stop| stop < start_row) {
            return Err(Error::invalid_argument(format!(
                "stop row {stop} is before start row {start_row}"
            )));
        }
        if self.used == 0 {
            return Ok(None);
        }
        let stop = stop_row.map_or(self.used - 1, |stop| stop.min(self.used - 1));
        let needle = Needle::parse(needle);
        Ok((start_row..=stop).find(|&row| needle.matches(self.rows[row].text())))
    }

    /// Returns the first row whose column 0 equals `line`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] for an empty line.
    pub fn find_exact(&self, line: &str) -> Result<Option<&str>> {
        let found = self.position_exact(line)?;
        Ok(found.map(|row| self.rows[row].text()))
    }

    /// Index of the first row whose column 0 equals `line`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] for an empty line.
    pub fn position_exact(&self, line: &str) -> Result<Option<usize>> {
        require_needle(line, "line")?;
        Ok(self.lines().position(|text| text == line))
    }

    /// Index of the first row whose cell in `column` equals `needle`, or any
    /// of its `|`-separated alternatives.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] for an empty needle or a column
    /// beyond the table's column count.
    pub fn find_in_column(&self, needle: &str, column: usize) -> Result<Option<usize>> {
        require_needle(needle, "needle")?;
        if column >= self.options.columns {
            return Err(Error::invalid_argument(format!(
                "column {column} is beyond the {} columns of this table",
                self.options.columns
            )));
        }
        let alternatives: Vec<&str> = if needle.contains('|') {
            needle.split('|').collect()
        } else {
            vec![needle]
        };
        Ok(self.used_rows().iter().position(|row| {
            row.cell(column)
                .map_or(false, |cell| alternatives.iter().any(|alt| *alt == cell))
        }))
    }

    /// Key lookup: the `column` cell of the first row whose column 0 equals
    /// `key` (or any of its `|` alternatives). `None` when no row matches or
    /// the cell is absent.
    ///
    /// # Errors
    ///
    /// Same as [`find_in_column`](Self::find_in_column).
    ///
    /// # Examples
    ///
    /// ```rust
    /// use line_toolbox::StringTable;
    ///
    /// let mut table = StringTable::new();
    /// let row = table.add("eth0").unwrap();
    /// table.col_append(row, "10.0.0.7").unwrap();
    /// assert_eq!(table.value_for_key("eth0", 1).unwrap(), Some("10.0.0.7"));
    /// assert_eq!(table.value_for_key("eth0", 2).unwrap(), None);
    /// ```
    pub fn value_for_key(&self, key: &str, column: usize) -> Result<Option<&str>> {
        let found = self.find_in_column(key, 0)?;
        Ok(found.and_then(|row| self.rows[row].cell(column)))
    }

    /// Replaces `needle` with `replacement` in column 0, scanning rows in
    /// order, and returns the number of replacements made.
    ///
    /// [`SubstituteMode::First`] stops after the first occurrence in the
    /// table; [`SubstituteMode::All`] replaces every occurrence in every row.
    /// Replacement text is never rescanned. When a result would not fit in a
    /// cell the row is split instead: the text around each occurrence and the
    /// replacement become consecutive rows.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] for an empty needle and
    /// [`Error::OutOfMemory`] if a split needs growth that fails.
    pub fn substitute_in_matching(
        &mut self,
        needle: &str,
        replacement: &str,
        mode: SubstituteMode,
    ) -> Result<usize> {
        require_needle(needle, "needle")?;
        let finder = memmem::Finder::new(needle);
        let mut next_row = 0;
        let mut total = 0;

        while let Some(row) = self.next_containing(&finder, next_row) {
            let text = self.rows[row].text().to_string();
            let pieces: Vec<&str> = match mode {
                SubstituteMode::First => text.splitn(2, needle).collect(),
                SubstituteMode::All => text.split(needle).collect(),
            };
            let replaced = pieces.len() - 1;
            let joined = pieces.join(replacement);

            next_row = if joined.len() < self.options.cell_length {
                self.overwrite(row, &joined)?;
                row + 1
            } else {
                let mut parts = Vec::with_capacity(pieces.len() * 2);
                for (i, piece) in pieces.iter().copied().enumerate() {
                    if i > 0 {
                        parts.push(replacement);
                    }
                    if !piece.is_empty() {
                        parts.push(piece);
                    }
                }
                debug!(
                    row,
                    rows = parts.len(),
                    mode = mode.as_str(),
                    "substitution overflowed a cell, splitting row"
                );
                self.replace_with_rows(row, &parts)?
            };

            total += replaced;
            if mode == SubstituteMode::First {
                break;
            }
        }
        Ok(total)
    }

    /// Replaces the first row containing `needle` with: the text before the
    /// needle, every line of `replacement`, then the text after the needle,
    /// each as its own row. Empty surrounding text produces no row.
    ///
    /// Returns `false` when no row contains the needle.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] for an empty needle and
    /// [`Error::OutOfMemory`] if growth fails.
    pub fn substitute_with_table(
        &mut self,
        needle: &str,
        replacement: &StringTable,
    ) -> Result<bool> {
        require_needle(needle, "needle")?;
        let Some(row) = (0..self.used).find(|&row| self.rows[row].text().contains(needle)) else {
            return Ok(false);
        };
        let text = self.rows[row].text().to_string();
        let (before, after) = text.split_once(needle).unwrap_or((text.as_str(), ""));

        let mut parts: Vec<&str> = Vec::with_capacity(replacement.len() + 2);
        if !before.is_empty() {
            parts.push(before);
        }
        parts.extend(replacement.lines());
        if !after.is_empty() {
            parts.push(after);
        }
        self.replace_with_rows(row, &parts)?;
        Ok(true)
    }

    /// Puts `parts[0]` in `row` and inserts the rest after it. With no parts
    /// the row is removed. Returns the index following the last written row.
    fn replace_with_rows(&mut self, row: usize, parts: &[&str]) -> Result<usize> {
        let Some((first, rest)) = parts.split_first() else {
            self.remove_row(row);
            return Ok(row);
        };
        self.overwrite(row, first)?;
        let mut at = row;
        for part in rest {
            at += 1;
            self.reserve_row()?;
            let spare = self.used;
            write_cell(&mut self.rows[spare].cells[0], part, self.options.cell_length)?;
            self.rows[at..=spare].rotate_right(1);
            self.used += 1;
        }
        Ok(at + 1)
    }

    /// Sorts rows `first_row..=last_row` (to the end when `last_row` is
    /// `None`) on `column`, ignoring ASCII case. Absent cells sort as empty
    /// text.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] for a column beyond the table's
    /// column count.
    pub fn sort(
        &mut self,
        column: usize,
        order: SortOrder,
        first_row: usize,
        last_row: Option<usize>,
    ) -> Result<()> {
        if column >= self.options.columns {
            return Err(Error::invalid_argument(format!(
                "cannot sort on column {column}, the table has {} columns",
                self.options.columns
            )));
        }
        if self.used == 0 {
            return Ok(());
        }
        let last = last_row.map_or(self.used - 1, |last| last.min(self.used - 1));
        if first_row >= last {
            return Ok(());
        }
        trace!(column, order = order.as_str(), first_row, last, "sorting rows");
        quicksort(&mut self.rows[first_row..=last], column, order);
        Ok(())
    }

    /// Appends every row of `other`, with all of its populated columns.
    ///
    /// # Errors
    ///
    /// Propagates the first [`add`](Self::add) or
    /// [`col_append`](Self::col_append) failure.
    pub fn append_table(&mut self, other: &StringTable) -> Result<()> {
        for source in other.used_rows() {
            let row = self.add(source.text())?;
            for cell in source.cells.iter().skip(1).flatten() {
                self.col_append(row, cell)?;
            }
        }
        Ok(())
    }

    /// Replaces this table's content with a copy of `other`'s.
    ///
    /// # Errors
    ///
    /// Same as [`append_table`](Self::append_table).
    pub fn update_from(&mut self, other: &StringTable) -> Result<()> {
        self.zero();
        self.append_table(other)
    }

    /// Splits column 0 of every row on `delimiter` (non-greedy) and spreads
    /// the fields across that row's columns.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] for an empty delimiter and
    /// [`Error::ColumnsExhausted`] if a row has more fields than free columns.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use line_toolbox::StringTable;
    ///
    /// let mut table = StringTable::new();
    /// table.add("eth0 10.0.0.7 up").unwrap();
    /// table.split_column(" ").unwrap();
    /// assert_eq!(table.cell(0, 0), Some("eth0"));
    /// assert_eq!(table.cell(0, 2), Some("up"));
    /// ```
    pub fn split_column(&mut self, delimiter: &str) -> Result<()> {
        require_needle(delimiter, "delimiter")?;
        for row in 0..self.used {
            let text = self.rows[row].text().to_string();
            let fields = split_fields(&text, delimiter, false);
            let Some((first, rest)) = fields.split_first() else {
                continue;
            };
            self.overwrite(row, first)?;
            for field in rest {
                self.col_append(row, field)?;
            }
        }
        Ok(())
    }
}

fn sort_key(row: &Row, column: usize) -> &str {
    row.cell(column).unwrap_or("")
}

// Hoare partition around the middle row's key. The smaller side recurses and
// the larger side is handled by the loop, which bounds the depth to log2(n).
fn quicksort(mut rows: &mut [Row], column: usize, order: SortOrder) {
    while rows.len() > 1 {
        let pivot = sort_key(&rows[rows.len() / 2], column).to_string();
        let before = |row: &Row| {
            let ord = compare_case_insensitive(sort_key(row, column), &pivot);
            match order {
                SortOrder::Ascending => ord == Ordering::Less,
                SortOrder::Descending => ord == Ordering::Greater,
            }
        };
        let after = |row: &Row| {
            let ord = compare_case_insensitive(sort_key(row, column), &pivot);
            match order {
                SortOrder::Ascending => ord == Ordering::Greater,
                SortOrder::Descending => ord == Ordering::Less,
            }
        };

        let mut alpha: isize = 0;
        let mut omega: isize = rows.len() as isize - 1;
        while alpha <= omega {
            while before(&rows[alpha as usize]) {
                alpha += 1;
            }
            while after(&rows[omega as usize]) {
                omega -= 1;
            }
            if alpha <= omega {
                rows.swap(alpha as usize, omega as usize);
                alpha += 1;
                omega -= 1;
            }
        }

        // Rows between the two halves already equal the pivot.
        let taken = std::mem::take(&mut rows);
        let (low, high) = taken.split_at_mut(alpha as usize);
        let low = &mut low[..(omega + 1) as usize];
        if low.len() < high.len() {
            quicksort(low, column, order);
            rows = high;
        } else {
            quicksort(high, column, order);
            rows = low;
        }
    }
}

/// Two tables are equal when they have the same number of rows and the same
/// column-0 text in every row. Other columns are not compared.
impl PartialEq for StringTable {
    fn eq(&self, other: &Self) -> bool {
        self.used == other.used && self.lines().eq(other.lines())
    }
}
