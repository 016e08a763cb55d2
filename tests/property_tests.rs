//! Property-based tests for the table bookkeeping, the sort order and the
//! reader framing.
//!
//! These complement the example-based suites by checking invariants across
//! generated inputs rather than hand-picked cases.

use line_toolbox::{
    compare_case_insensitive, from_str, to_string, LineParser, LineRead, ReaderOptions,
    SortOrder, StreamLineReader, StringTable,
};
use proptest::prelude::*;
use std::cmp::Ordering;

#[derive(Clone, Debug)]
enum Op {
    Add(String),
    Insert(usize, String),
    RemoveAt(usize),
    RemoveExact(String),
}

fn cell_text() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9 ]{0,12}"
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        cell_text().prop_map(Op::Add),
        (0..20usize, cell_text()).prop_map(|(row, text)| Op::Insert(row, text)),
        (0..20usize).prop_map(Op::RemoveAt),
        "[a-c]{1,2}".prop_map(Op::RemoveExact),
    ]
}

fn table_of(rows: &[String]) -> StringTable {
    let mut table = StringTable::new();
    for row in rows {
        table.add(row).unwrap();
    }
    table
}

proptest! {
    #[test]
    fn prop_table_tracks_vec_model(ops in prop::collection::vec(op(), 0..200)) {
        let mut table = StringTable::with_capacity(3).unwrap();
        let mut model: Vec<String> = Vec::new();

        for op in ops {
            match op {
                Op::Add(text) => {
                    prop_assert_eq!(table.add(&text).unwrap(), model.len());
                    model.push(text);
                }
                Op::Insert(row, text) => {
                    let at = row.min(model.len());
                    prop_assert_eq!(table.insert(row, &text).unwrap(), at);
                    model.insert(at, text);
                }
                Op::RemoveAt(row) => {
                    let removed = table.remove_at(row).unwrap();
                    if row < model.len() {
                        prop_assert_eq!(removed, Some(row));
                        model.remove(row);
                    } else {
                        prop_assert_eq!(removed, None);
                    }
                }
                Op::RemoveExact(text) => {
                    let expected = model.iter().position(|line| *line == text);
                    prop_assert_eq!(table.remove_exact(&text).unwrap(), expected);
                    if let Some(row) = expected {
                        model.remove(row);
                    }
                }
            }
            prop_assert_eq!(table.len(), model.len());
            prop_assert!(table.len() <= table.capacity());
        }

        let lines: Vec<&str> = table.lines().collect();
        prop_assert_eq!(lines, model.iter().map(String::as_str).collect::<Vec<_>>());
        for row in 0..table.len() {
            prop_assert_eq!(table.cell(row, 1), None);
        }
    }

    #[test]
    fn prop_sort_orders_adjacent_rows(rows in prop::collection::vec(cell_text(), 0..60)) {
        let mut table = table_of(&rows);
        table.sort(0, SortOrder::Ascending, 0, None).unwrap();
        let sorted: Vec<&str> = table.lines().collect();
        prop_assert_eq!(sorted.len(), rows.len());
        for pair in sorted.windows(2) {
            prop_assert_ne!(compare_case_insensitive(pair[0], pair[1]), Ordering::Greater);
        }

        let mut expected = rows.clone();
        expected.sort();
        let mut actual: Vec<String> = sorted.iter().map(|line| line.to_string()).collect();
        actual.sort();
        prop_assert_eq!(actual, expected);
    }

    #[test]
    fn prop_sort_descending(rows in prop::collection::vec(cell_text(), 0..60)) {
        let mut table = table_of(&rows);
        table.sort(0, SortOrder::Descending, 0, None).unwrap();
        let sorted: Vec<&str> = table.lines().collect();
        for pair in sorted.windows(2) {
            prop_assert_ne!(compare_case_insensitive(pair[0], pair[1]), Ordering::Less);
        }
    }

    #[test]
    fn prop_text_form_is_stable(
        rows in prop::collection::vec(prop::collection::vec("[a-z0-9]{1,6}", 1..5), 0..20)
    ) {
        let table = StringTable::from_rows(&rows).unwrap();
        let text = to_string(&table);
        let back = from_str(&text).unwrap();
        prop_assert_eq!(to_string(&back), text);
        for (row, cells) in rows.iter().enumerate() {
            prop_assert_eq!(back.cells(row).collect::<Vec<_>>(), cells.iter().map(String::as_str).collect::<Vec<_>>());
        }
    }

    #[test]
    fn prop_split_then_merge_restores_line(
        fields in prop::collection::vec("[a-z0-9 ]{1,8}", 1..10)
    ) {
        let line = fields.join("::");
        let mut parser = LineParser::new();
        let split = parser.split(&line, "::").unwrap().clone();
        prop_assert_eq!(split.len(), fields.len());
        prop_assert_eq!(parser.merge(&split).unwrap(), line.as_str());
    }

    #[test]
    fn prop_reader_recovers_lines(
        lines in prop::collection::vec("[a-z \r]{0,40}", 0..20),
        crlf in any::<bool>(),
        lookahead in 2usize..64,
    ) {
        // A line ending in '\r' would lose it to the CRLF rule.
        let lines: Vec<String> = lines
            .into_iter()
            .map(|line| line.trim_end_matches('\r').to_string())
            .collect();
        let ending = if crlf { "\r\n" } else { "\n" };
        let mut text = String::new();
        for line in &lines {
            text.push_str(line);
            text.push_str(ending);
        }

        let options = ReaderOptions::new().with_lookahead(lookahead);
        let mut reader = StreamLineReader::with_options(text.as_bytes(), options).unwrap();
        let read: Vec<String> = reader.lines().collect::<Result<_, _>>().unwrap();
        prop_assert_eq!(read, lines);
    }
}
