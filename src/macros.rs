/// Builds a [`StringTable`](crate::StringTable) from literal rows.
///
/// Each bracketed group is one row; its first cell is column 0. Cells are
/// `&str` expressions. A row with more cells than the default column count
/// cannot be represented, and the macro then yields an empty table, the way
/// a failed conversion would.
///
/// ```rust
/// use line_toolbox::table;
///
/// let table = table![
///     ["eth0", "10.0.0.7", "up"],
///     ["lo", "127.0.0.1"],
/// ];
/// assert_eq!(table.len(), 2);
/// assert_eq!(table.cell(0, 2), Some("up"));
/// assert!(table![].is_empty());
/// ```
#[macro_export]
macro_rules! table {
    () => {
        $crate::StringTable::new()
    };

    ($([ $($cell:expr),+ $(,)? ]),+ $(,)?) => {
        $crate::StringTable::from_rows([$(::std::vec![$($cell),+]),+]).unwrap_or_default()
    };
}
