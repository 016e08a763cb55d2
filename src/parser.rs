//! Tag and delimiter extraction over single lines of text.
//!
//! A [`LineParser`] owns one scratch workspace and one scratch table. Every
//! operation writes its result there and hands back a borrow, so the result
//! of one call is only valid until the next call on the same parser. The
//! borrow checker enforces this: a returned `&str` or `&StringTable` borrows
//! the parser mutably and must be dropped (or copied) before the next call.
//!
//! Inputs are bounded. A line longer than
//! [`max_workspace`](crate::ParserOptions::max_workspace) or a tag longer than
//! [`max_tag`](crate::ParserOptions::max_tag) is rejected with
//! [`Error::TooLong`], never truncated.
//!
//! ```rust
//! use line_toolbox::LineParser;
//!
//! let mut parser = LineParser::new();
//! let hash = parser
//!     .extract_tag("something::HASH(231230302)::blabla", "HASH")
//!     .unwrap();
//! assert_eq!(hash, Some("231230302"));
//!
//! let fields = parser.split("a::b::c", "::").unwrap();
//! assert_eq!(fields.lines().collect::<Vec<_>>(), vec!["a", "b", "c"]);
//! ```

use crate::options::{ParserOptions, TableOptions};
use crate::table::StringTable;
use crate::{Error, Result};

/// Fixed separator used by [`LineParser::merge`].
pub const MERGE_SEPARATOR: &str = "::";

/// Splits `line` on `delimiter`.
///
/// An empty line, or a line that is exactly the delimiter, has no fields.
/// Leading and trailing delimiters produce empty edge fields. Greedy mode
/// drops every empty field except a trailing one, so a leading delimiter
/// yields nothing.
pub(crate) fn split_fields<'a>(line: &'a str, delimiter: &str, greedy: bool) -> Vec<&'a str> {
    if line.is_empty() || line == delimiter {
        return Vec::new();
    }
    let fields: Vec<&str> = line.split(delimiter).collect();
    if !greedy {
        return fields;
    }
    let last = fields.len() - 1;
    fields
        .into_iter()
        .enumerate()
        .filter(|&(i, field)| !field.is_empty() || i == last)
        .map(|(_, field)| field)
        .collect()
}

/// Outcome of [`LineParser::replace_first`] and [`LineParser::replace_all`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Replaced<'a> {
    /// The rebuilt line (the input unchanged when `count` is zero).
    pub text: &'a str,
    /// Number of occurrences replaced.
    pub count: usize,
}

/// Result of [`LineParser::first_word`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FirstWord<'a> {
    /// Text before the first space.
    Word(&'a str),
    /// The line has no space; this is all of it.
    WholeLine(&'a str),
    /// The line is empty.
    Empty,
}

impl<'a> FirstWord<'a> {
    /// The extracted text, if any.
    #[must_use]
    pub fn as_str(&self) -> Option<&'a str> {
        match self {
            FirstWord::Word(word) | FirstWord::WholeLine(word) => Some(word),
            FirstWord::Empty => None,
        }
    }
}

/// Single-line text extractor with a reusable scratch workspace.
#[derive(Clone, Debug)]
pub struct LineParser {
    workspace: String,
    fields: StringTable,
    options: ParserOptions,
}

impl Default for LineParser {
    fn default() -> Self {
        LineParser::new()
    }
}

impl LineParser {
    /// Creates a parser with the default bounds and non-greedy splitting.
    #[must_use]
    pub fn new() -> Self {
        let options = ParserOptions::default();
        LineParser {
            workspace: String::with_capacity(options.max_workspace),
            fields: StringTable::build(scratch_table_options(&options)),
            options,
        }
    }

    /// Creates a parser with custom bounds.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] when either bound is zero and
    /// [`Error::OutOfMemory`] if the scratch storage cannot be allocated.
    pub fn with_options(options: ParserOptions) -> Result<Self> {
        if options.max_workspace == 0 || options.max_tag == 0 {
            return Err(Error::invalid_argument("parser bounds must be positive"));
        }
        let mut workspace = String::new();
        workspace
            .try_reserve_exact(options.max_workspace)
            .map_err(|_| Error::out_of_memory(options.max_workspace))?;
        let fields = StringTable::with_options(scratch_table_options(&options))?;
        Ok(LineParser {
            workspace,
            fields,
            options,
        })
    }

    #[must_use]
    pub fn options(&self) -> &ParserOptions {
        &self.options
    }

    #[must_use]
    pub fn greedy(&self) -> bool {
        self.options.greedy
    }

    /// Sets split greediness and returns the previous setting, so a caller
    /// can restore it afterwards.
    ///
    /// ```rust
    /// use line_toolbox::LineParser;
    ///
    /// let mut parser = LineParser::new();
    /// let previous = parser.set_greedy(true);
    /// assert_eq!(parser.split("a  b", " ").unwrap().len(), 2);
    /// parser.set_greedy(previous);
    /// assert_eq!(parser.split("a  b", " ").unwrap().len(), 3);
    /// ```
    pub fn set_greedy(&mut self, greedy: bool) -> bool {
        std::mem::replace(&mut self.options.greedy, greedy)
    }

    fn check_line(&self, line: &str) -> Result<()> {
        if line.len() > self.options.max_workspace {
            return Err(Error::too_long("line", line.len(), self.options.max_workspace));
        }
        Ok(())
    }

    fn check_tag(&self, what: &'static str, tag: &str) -> Result<()> {
        if tag.is_empty() {
            return Err(Error::invalid_argument(format!("{what} is empty")));
        }
        if tag.len() > self.options.max_tag {
            return Err(Error::too_long(what, tag.len(), self.options.max_tag));
        }
        Ok(())
    }

    fn check_result(&self) -> Result<()> {
        if self.workspace.len() > self.options.max_workspace {
            return Err(Error::too_long(
                "result",
                self.workspace.len(),
                self.options.max_workspace,
            ));
        }
        Ok(())
    }

    fn publish(&mut self, text: &str) -> &str {
        self.workspace.clear();
        self.workspace.push_str(text);
        &self.workspace
    }

    /// Finds `<tag>(` and returns the text up to the next `)`.
    ///
    /// `Ok(None)` when the opening sequence or the closing parenthesis is
    /// missing, or the value between them is empty.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TooLong`] for an oversized line or tag and
    /// [`Error::InvalidArgument`] for an empty tag.
    pub fn extract_tag(&mut self, line: &str, tag: &str) -> Result<Option<&str>> {
        self.check_line(line)?;
        self.check_tag("tag", tag)?;
        let Some((_, value, _)) = locate_tag(line, tag) else {
            return Ok(None);
        };
        if value.is_empty() {
            return Ok(None);
        }
        Ok(Some(self.publish(value)))
    }

    /// Rebuilds `line` with the value of `<tag>(...)` swapped for
    /// `replacement`.
    ///
    /// # Errors
    ///
    /// Same as [`extract_tag`](Self::extract_tag), plus [`Error::TooLong`]
    /// when the rebuilt line exceeds the workspace.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use line_toolbox::LineParser;
    ///
    /// let mut parser = LineParser::new();
    /// let line = parser.replace_tag("id::HASH(1234)::end", "HASH", "99").unwrap();
    /// assert_eq!(line, Some("id::HASH(99)::end"));
    /// ```
    pub fn replace_tag(
        &mut self,
        line: &str,
        tag: &str,
        replacement: &str,
    ) -> Result<Option<&str>> {
        self.check_line(line)?;
        self.check_tag("tag", tag)?;
        let Some((prefix, _, suffix)) = locate_tag(line, tag) else {
            return Ok(None);
        };
        self.workspace.clear();
        for piece in [prefix, tag, "(", replacement, ")", suffix] {
            self.workspace.push_str(piece);
        }
        self.check_result()?;
        Ok(Some(self.workspace.as_str()))
    }

    /// Returns the value after `-<name> `, which must start the line or
    /// follow a space. A value starting with `"` runs to the next `"`;
    /// otherwise it runs to the next space or the end of the line.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TooLong`] for an oversized line or name and
    /// [`Error::InvalidArgument`] for an empty name.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use line_toolbox::LineParser;
    ///
    /// let mut parser = LineParser::new();
    /// let line = r#"tool -i eth0 -m "quoted value" x-i no"#;
    /// assert_eq!(parser.extract_dashed_parameter(line, "i").unwrap(), Some("eth0"));
    /// assert_eq!(parser.extract_dashed_parameter(line, "m").unwrap(), Some("quoted value"));
    /// ```
    pub fn extract_dashed_parameter(&mut self, line: &str, name: &str) -> Result<Option<&str>> {
        self.check_line(line)?;
        self.check_tag("parameter", name)?;
        let marker = format!("-{name} ");
        let start = line
            .match_indices(&marker)
            .map(|(at, _)| at)
            .find(|&at| at == 0 || line.as_bytes()[at - 1] == b' ');
        let Some(start) = start else {
            return Ok(None);
        };
        let rest = &line[start + marker.len()..];
        let value = if let Some(quoted) = rest.strip_prefix('"') {
            match quoted.find('"') {
                Some(end) => &quoted[..end],
                None => return Ok(None),
            }
        } else {
            rest.split(' ').next().unwrap_or(rest)
        };
        Ok(Some(self.publish(value)))
    }

    /// Returns the text strictly between the first `left` and the next
    /// `right` after it. `None` (or an empty string) anchors at the start or
    /// end of the line.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TooLong`] for an oversized line or anchor.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use line_toolbox::LineParser;
    ///
    /// let mut parser = LineParser::new();
    /// let line = "inet addr:10.0.0.7  Bcast:10.0.0.255";
    /// assert_eq!(parser.extract_between(line, Some("addr:"), Some(" ")).unwrap(), Some("10.0.0.7"));
    /// assert_eq!(parser.extract_between(line, Some("Bcast:"), None).unwrap(), Some("10.0.0.255"));
    /// assert_eq!(parser.extract_between(line, None, Some(" ")).unwrap(), Some("inet"));
    /// ```
    pub fn extract_between(
        &mut self,
        line: &str,
        left: Option<&str>,
        right: Option<&str>,
    ) -> Result<Option<&str>> {
        self.check_line(line)?;
        let left = left.filter(|l| !l.is_empty());
        let right = right.filter(|r| !r.is_empty());
        if let Some(left) = left {
            self.check_tag("left anchor", left)?;
        }
        if let Some(right) = right {
            self.check_tag("right anchor", right)?;
        }

        let start = match left {
            Some(left) => match line.find(left) {
                Some(at) => at + left.len(),
                None => return Ok(None),
            },
            None => 0,
        };
        let rest = &line[start..];
        let end = match right {
            Some(right) => match rest.find(right) {
                Some(at) => at,
                None => return Ok(None),
            },
            None => rest.len(),
        };
        Ok(Some(self.publish(&rest[..end])))
    }

    /// Splits `line` on every `delimiter` into the parser's scratch table,
    /// one field per row.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TooLong`] for an oversized line or delimiter and
    /// [`Error::InvalidArgument`] for an empty delimiter.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use line_toolbox::LineParser;
    ///
    /// let mut parser = LineParser::new();
    /// let fields = parser.split("::b::c::", "::").unwrap();
    /// assert_eq!(fields.lines().collect::<Vec<_>>(), vec!["", "b", "c", ""]);
    /// assert!(parser.split("::", "::").unwrap().is_empty());
    /// ```
    pub fn split(&mut self, line: &str, delimiter: &str) -> Result<&StringTable> {
        self.check_line(line)?;
        self.check_tag("delimiter", delimiter)?;
        self.fields.zero();
        for field in split_fields(line, delimiter, self.options.greedy) {
            self.fields.add(field)?;
        }
        Ok(&self.fields)
    }

    /// Joins column 0 of every row of `fields` with `"::"`, whatever
    /// delimiter produced them.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TooLong`] when the joined line exceeds the workspace.
    pub fn merge(&mut self, fields: &StringTable) -> Result<&str> {
        self.workspace.clear();
        for (i, field) in fields.lines().enumerate() {
            if i > 0 {
                self.workspace.push_str(MERGE_SEPARATOR);
            }
            self.workspace.push_str(field);
        }
        self.check_result()?;
        Ok(self.workspace.as_str())
    }

    /// Returns the text after `key` up to the next `;` or the end of line.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TooLong`] for an oversized line or key and
    /// [`Error::InvalidArgument`] for an empty key.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use line_toolbox::LineParser;
    ///
    /// let mut parser = LineParser::new();
    /// let line = "name=eth0;mtu=1500";
    /// assert_eq!(parser.extract_key_value(line, "mtu=").unwrap(), Some("1500"));
    /// assert_eq!(parser.extract_key_value(line, "name=").unwrap(), Some("eth0"));
    /// ```
    pub fn extract_key_value(&mut self, line: &str, key: &str) -> Result<Option<&str>> {
        self.check_line(line)?;
        self.check_tag("key", key)?;
        let Some(at) = line.find(key) else {
            return Ok(None);
        };
        let rest = &line[at + key.len()..];
        let value = rest.split(';').next().unwrap_or(rest);
        Ok(Some(self.publish(value)))
    }

    /// Replaces the first literal occurrence of `search`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] for an empty search string and
    /// [`Error::TooLong`] for oversized input or output.
    pub fn replace_first(
        &mut self,
        line: &str,
        search: &str,
        replacement: &str,
    ) -> Result<Replaced<'_>> {
        self.replace(line, search, replacement, Some(1))
    }

    /// Replaces every non-overlapping occurrence of `search`, left to right.
    /// Replacement text is not searched again.
    ///
    /// # Errors
    ///
    /// Same as [`replace_first`](Self::replace_first).
    ///
    /// # Examples
    ///
    /// ```rust
    /// use line_toolbox::LineParser;
    ///
    /// let mut parser = LineParser::new();
    /// let replaced = parser.replace_all("a.b.c", ".", "::").unwrap();
    /// assert_eq!(replaced.text, "a::b::c");
    /// assert_eq!(replaced.count, 2);
    ///
    /// let untouched = parser.replace_all("abc", "x", "y").unwrap();
    /// assert_eq!((untouched.text, untouched.count), ("abc", 0));
    /// ```
    pub fn replace_all(
        &mut self,
        line: &str,
        search: &str,
        replacement: &str,
    ) -> Result<Replaced<'_>> {
        self.replace(line, search, replacement, None)
    }

    fn replace(
        &mut self,
        line: &str,
        search: &str,
        replacement: &str,
        limit: Option<usize>,
    ) -> Result<Replaced<'_>> {
        self.check_line(line)?;
        self.check_tag("search string", search)?;

        self.workspace.clear();
        let mut count = 0;
        let mut rest = line;
        while limit.map_or(true, |limit| count < limit) {
            let Some(at) = rest.find(search) else {
                break;
            };
            self.workspace.push_str(&rest[..at]);
            self.workspace.push_str(replacement);
            rest = &rest[at + search.len()..];
            count += 1;
        }
        self.workspace.push_str(rest);
        self.check_result()?;
        Ok(Replaced {
            text: &self.workspace,
            count,
        })
    }

    /// Removes leading spaces and/or trailing spaces and newlines.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TooLong`] for an oversized line.
    pub fn strip(&mut self, line: &str, trim_left: bool, trim_right: bool) -> Result<&str> {
        self.check_line(line)?;
        let mut text = line;
        if trim_left {
            text = text.trim_start_matches(' ');
        }
        if trim_right {
            text = text.trim_end_matches(|c: char| c == ' ' || c == '\n');
        }
        Ok(self.publish(text))
    }

    /// Returns the text before the first space.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TooLong`] for an oversized line.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use line_toolbox::{FirstWord, LineParser};
    ///
    /// let mut parser = LineParser::new();
    /// assert_eq!(parser.first_word("eth0 Link").unwrap(), FirstWord::Word("eth0"));
    /// assert_eq!(parser.first_word("eth0").unwrap(), FirstWord::WholeLine("eth0"));
    /// assert_eq!(parser.first_word("").unwrap(), FirstWord::Empty);
    /// ```
    pub fn first_word(&mut self, line: &str) -> Result<FirstWord<'_>> {
        self.check_line(line)?;
        if line.is_empty() {
            return Ok(FirstWord::Empty);
        }
        Ok(match line.split_once(' ') {
            Some((word, _)) => FirstWord::Word(self.publish(word)),
            None => FirstWord::WholeLine(self.publish(line)),
        })
    }
}

// Scratch cells hold a whole line without truncation.
fn scratch_table_options(options: &ParserOptions) -> TableOptions {
    TableOptions::new().with_cell_length(options.max_workspace + 1)
}

/// Splits `line` around the first `<tag>(value)`: prefix, value, suffix.
fn locate_tag<'a>(line: &'a str, tag: &str) -> Option<(&'a str, &'a str, &'a str)> {
    let opening = format!("{tag}(");
    let at = line.find(&opening)?;
    let value_start = at + opening.len();
    let close = line[value_start..].find(')')? + value_start;
    Some((&line[..at], &line[value_start..close], &line[close + 1..]))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_fields_edge_policy() {
        assert_eq!(split_fields("a::b::c", "::", false), vec!["a", "b", "c"]);
        assert_eq!(split_fields("::b::c", "::", false), vec!["", "b", "c"]);
        assert_eq!(split_fields("b::", "::", false), vec!["b", ""]);
        assert_eq!(split_fields("::b::c::", "::", false), vec!["", "b", "c", ""]);
        assert_eq!(split_fields("lonely", "::", false), vec!["lonely"]);
        assert!(split_fields("::", "::", false).is_empty());
        assert!(split_fields("", "::", false).is_empty());
    }

    #[test]
    fn test_split_fields_greedy_collapses_interior() {
        assert_eq!(split_fields("a::::b", "::", false), vec!["a", "", "b"]);
        assert_eq!(split_fields("a::::b", "::", true), vec!["a", "b"]);
        assert_eq!(split_fields("::a  b::", "::", true), vec!["a  b", ""]);
        assert_eq!(split_fields("a   b", " ", true), vec!["a", "b"]);
    }

    #[test]
    fn test_split_fields_greedy_drops_leading_empty_field() {
        assert_eq!(split_fields("::b", "::", false), vec!["", "b"]);
        assert_eq!(split_fields("::b", "::", true), vec!["b"]);
        assert_eq!(split_fields("::::b::c", "::", true), vec!["b", "c"]);
        assert_eq!(split_fields("b::", "::", true), vec!["b", ""]);
    }

    #[test]
    fn test_locate_tag() {
        assert_eq!(locate_tag("x HASH(1) y", "HASH"), Some(("x ", "1", " y")));
        assert_eq!(locate_tag("HASH(1", "HASH"), None);
        assert_eq!(locate_tag("no tag", "HASH"), None);
    }

    #[test]
    fn test_extract_tag_rejects_empty_value() {
        let mut parser = LineParser::new();
        assert_eq!(parser.extract_tag("HASH()", "HASH").unwrap(), None);
    }

    #[test]
    fn test_tag_bound() {
        let options = ParserOptions::new().with_max_tag(4);
        let mut parser = LineParser::with_options(options).unwrap();
        assert_eq!(
            parser.extract_tag("LONGTAG(1)", "LONGTAG"),
            Err(Error::too_long("tag", 7, 4))
        );
    }

    #[test]
    fn test_replace_output_bound() {
        let options = ParserOptions::new().with_max_workspace(8);
        let mut parser = LineParser::with_options(options).unwrap();
        assert!(matches!(
            parser.replace_all("a.a.a", ".", "-----"),
            Err(Error::TooLong { what: "result", .. })
        ));
    }

    #[test]
    fn test_strip() {
        let mut parser = LineParser::new();
        assert_eq!(parser.strip("  eth0  \n", true, true).unwrap(), "eth0");
        assert_eq!(parser.strip("  eth0  ", true, false).unwrap(), "eth0  ");
        assert_eq!(parser.strip("  eth0 \n", false, true).unwrap(), "  eth0");
    }

    #[test]
    fn test_dashed_parameter_needs_word_start() {
        let mut parser = LineParser::new();
        assert_eq!(parser.extract_dashed_parameter("x-i eth0", "i").unwrap(), None);
        assert_eq!(
            parser.extract_dashed_parameter("x-i a -i b", "i").unwrap(),
            Some("b")
        );
        assert_eq!(
            parser.extract_dashed_parameter(r#"-m "open"#, "m").unwrap(),
            None
        );
    }

    #[test]
    fn test_merge_uses_fixed_separator() {
        let mut parser = LineParser::new();
        let fields = crate::table![["a"], ["b"], ["c"]];
        assert_eq!(parser.merge(&fields).unwrap(), "a::b::c");
    }
}
