use line_toolbox::{
    table, AppendBuffer, Error, LineEnding, SortOrder, StringTable, SubstituteMode, TableOptions,
};

fn lines(table: &StringTable) -> Vec<&str> {
    table.lines().collect()
}

fn interfaces() -> StringTable {
    table![
        ["eth0", "10.0.0.7", "up"],
        ["lo", "127.0.0.1", "up"],
        ["wlan0", "192.168.1.20", "down"],
    ]
}

#[test]
fn test_add_returns_row_index() {
    let mut table = StringTable::new();
    assert_eq!(table.add("first").unwrap(), 0);
    assert_eq!(table.add("second").unwrap(), 1);
    assert_eq!(table.len(), 2);
    assert_eq!(table.last_line(), Some("second"));
}

#[test]
fn test_absent_cell_is_not_empty_cell() {
    let mut table = StringTable::new();
    let row = table.add("eth0").unwrap();
    table.col_append(row, "").unwrap();
    assert_eq!(table.cell(row, 1), Some(""));
    assert_eq!(table.cell(row, 2), None);
}

#[test]
fn test_replace_out_of_range() {
    let mut table = interfaces();
    table.replace(1, "loopback").unwrap();
    assert_eq!(table.line(1), Some("loopback"));
    assert_eq!(
        table.replace(3, "nope"),
        Err(Error::RowOutOfRange { row: 3, rows: 3 })
    );
}

#[test]
fn test_remove_keeps_other_rows_intact() {
    let mut table = interfaces();
    assert_eq!(table.remove_exact("lo").unwrap(), Some(1));
    assert_eq!(lines(&table), vec!["eth0", "wlan0"]);
    assert_eq!(table.cell(1, 1), Some("192.168.1.20"));
    assert_eq!(table.cell(1, 2), Some("down"));
    assert_eq!(table.remove_exact("lo").unwrap(), None);
}

#[test]
fn test_removed_rows_do_not_leak_into_new_rows() {
    let mut table = interfaces();
    table.remove_at(0).unwrap();
    table.remove_at(0).unwrap();
    table.add("tun0").unwrap();
    table.add("tun1").unwrap();
    assert_eq!(lines(&table), vec!["wlan0", "tun0", "tun1"]);
    assert_eq!(table.cell(1, 1), None);
    assert_eq!(table.cell(2, 1), None);
}

#[test]
fn test_find_matching_variants() {
    let table = table![["eth0|up|10.0.0.7"], ["lo|up|127.0.0.1"], ["plain text line"]];
    assert_eq!(table.find_matching("text").unwrap(), Some("plain text line"));
    assert_eq!(table.find_matching("plain.*line").unwrap(), Some("plain text line"));
    assert_eq!(table.find_matching("up|127").unwrap(), Some("lo|up|127.0.0.1"));
    assert_eq!(table.find_matching("nothing").unwrap(), None);
    assert!(table.find_matching("").is_err());
}

#[test]
fn test_position_matching_range() {
    let table = table![["x"], ["y"], ["x"], ["y"]];
    assert_eq!(table.position_matching("x", 1, None).unwrap(), Some(2));
    assert_eq!(table.position_matching("x", 1, Some(1)).unwrap(), None);
    assert_eq!(table.position_matching("y", 2, Some(99)).unwrap(), Some(3));
    assert!(table.position_matching("x", 3, Some(1)).is_err());
}

#[test]
fn test_find_exact_ignores_pipes() {
    let table = table![["a|b"], ["a"]];
    assert_eq!(table.find_exact("a|b").unwrap(), Some("a|b"));
    assert_eq!(table.position_exact("a").unwrap(), Some(1));
    assert_eq!(table.find_exact("b").unwrap(), None);
}

#[test]
fn test_find_in_column_and_value_for_key() {
    let table = interfaces();
    assert_eq!(table.find_in_column("down", 2).unwrap(), Some(2));
    assert_eq!(table.find_in_column("127.0.0.1|10.0.0.7", 1).unwrap(), Some(0));
    assert_eq!(table.value_for_key("wlan0", 1).unwrap(), Some("192.168.1.20"));
    assert_eq!(table.value_for_key("ppp0", 1).unwrap(), None);
    assert_eq!(table.value_for_key("lo|ppp0", 2).unwrap(), Some("up"));
}

#[test]
fn test_substitute_all_with_overflow() {
    let options = TableOptions::new().with_cell_length(16);
    let mut table = StringTable::with_options(options).unwrap();
    table.add("a,b,c").unwrap();
    table.add("untouched").unwrap();
    let count = table
        .substitute_in_matching(",", " <separator> ", SubstituteMode::All)
        .unwrap();
    assert_eq!(count, 2);
    assert_eq!(
        lines(&table),
        vec!["a", " <separator> ", "b", " <separator> ", "c", "untouched"]
    );
}

#[test]
fn test_substitute_without_match_is_zero() {
    let mut table = interfaces();
    let before = table.clone();
    assert_eq!(
        table
            .substitute_in_matching("ppp", "x", SubstituteMode::All)
            .unwrap(),
        0
    );
    assert_eq!(table, before);
}

#[test]
fn test_sort_is_case_insensitive() {
    let mut table = table![["beta"], ["Alpha"], ["gamma"], ["ALPHA2"]];
    table.sort(0, SortOrder::Ascending, 0, None).unwrap();
    assert_eq!(lines(&table), vec!["Alpha", "ALPHA2", "beta", "gamma"]);
}

#[test]
fn test_sort_treats_absent_cells_as_empty() {
    let mut table = table![["b", "2"], ["a"], ["c", "1"]];
    table.sort(1, SortOrder::Ascending, 0, None).unwrap();
    assert_eq!(lines(&table), vec!["a", "c", "b"]);
}

#[test]
fn test_sort_rejects_unknown_column() {
    let mut table = interfaces();
    assert!(table.sort(30, SortOrder::Ascending, 0, None).is_err());
}

#[test]
fn test_sort_large_presorted_table() {
    const ROWS: usize = 50_000;
    let options = TableOptions::new()
        .with_row_capacity(ROWS)
        .with_columns(1)
        .with_cell_length(16);
    let mut table = StringTable::with_options(options).unwrap();
    for i in 0..ROWS {
        table.add(&format!("{i:08}")).unwrap();
    }
    let ascending: Vec<String> = (0..ROWS).map(|i| format!("{i:08}")).collect();
    let descending: Vec<String> = ascending.iter().rev().cloned().collect();

    table.sort(0, SortOrder::Ascending, 0, None).unwrap();
    assert_eq!(lines(&table), ascending);

    table.sort(0, SortOrder::Descending, 0, None).unwrap();
    assert_eq!(lines(&table), descending);

    table.sort(0, SortOrder::Descending, 0, None).unwrap();
    assert_eq!(lines(&table), descending);

    table.sort(0, SortOrder::Ascending, 0, None).unwrap();
    assert_eq!(lines(&table), ascending);
}

#[test]
fn test_sort_large_table_of_equal_keys() {
    let options = TableOptions::new().with_row_capacity(20_000).with_columns(2);
    let mut table = StringTable::with_options(options).unwrap();
    for i in 0..20_000 {
        let row = table.add("same").unwrap();
        table.col_append(row, &i.to_string()).unwrap();
    }
    table.sort(0, SortOrder::Ascending, 0, None).unwrap();
    assert_eq!(table.len(), 20_000);
    assert!(table.lines().all(|line| line == "same"));
}

#[test]
fn test_append_and_update() {
    let mut target = table![["existing"]];
    let source = interfaces();
    target.append_table(&source).unwrap();
    assert_eq!(target.len(), 4);
    assert_eq!(target.cell(3, 2), Some("down"));

    target.update_from(&source).unwrap();
    assert_eq!(target, source);
    assert_eq!(target.cell(0, 1), Some("10.0.0.7"));
}

#[test]
fn test_split_column_spreads_fields() {
    let mut table = table![["key=value=extra"], ["lonely"], [""]];
    table.split_column("=").unwrap();
    assert_eq!(table.cells(0).collect::<Vec<_>>(), vec!["key", "value", "extra"]);
    assert_eq!(table.cells(1).collect::<Vec<_>>(), vec!["lonely"]);
    assert_eq!(table.line(2), Some(""));
}

#[test]
fn test_split_column_overflow() {
    let options = TableOptions::new().with_columns(2);
    let mut table = StringTable::with_options(options).unwrap();
    table.add("a b c").unwrap();
    assert_eq!(
        table.split_column(" "),
        Err(Error::ColumnsExhausted { row: 0, columns: 2 })
    );
}

#[test]
fn test_to_text_skips_absent_cells() {
    let table = interfaces();
    assert_eq!(
        table.to_text(",", LineEnding::Lf),
        "eth0,10.0.0.7,up\nlo,127.0.0.1,up\nwlan0,192.168.1.20,down\n"
    );
}

#[test]
fn test_save_and_load_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("interfaces.txt");
    let table = interfaces();
    table.save(&path, "\t", LineEnding::CrLf).unwrap();

    let whole_lines = StringTable::load(&path).unwrap();
    assert_eq!(whole_lines.line(0), Some("eth0\t10.0.0.7\tup"));

    let columns = StringTable::load_separated(&path, "\t").unwrap();
    assert_eq!(columns.to_text("\t", LineEnding::Lf), table.to_string());
}

#[test]
fn test_load_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let result = StringTable::load(dir.path().join("missing.txt"));
    assert!(matches!(result, Err(Error::Io(_))));
}

#[test]
fn test_append_to_grows_buffer() {
    let table = interfaces();
    let mut buffer = AppendBuffer::new();
    table.append_to(&mut buffer, "\t", LineEnding::Lf).unwrap();
    table.append_to(&mut buffer, "\t", LineEnding::Lf).unwrap();
    assert_eq!(buffer.len(), 2 * table.text_len("\t", LineEnding::Lf));
}

#[test]
fn test_equality_compares_first_column_only() {
    let a = table![["eth0", "up"]];
    let b = table![["eth0", "down"]];
    let c = table![["eth1", "up"]];
    assert_eq!(a, b);
    assert_ne!(a, c);
}

#[test]
fn test_json_round_trip() {
    let table = interfaces();
    let json = serde_json::to_string(&table).unwrap();
    let back: StringTable = serde_json::from_str(&json).unwrap();
    assert_eq!(back.to_string(), table.to_string());
}
