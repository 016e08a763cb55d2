use line_toolbox::{table, LineEnding, StringTable};

#[test]
fn test_table_macro_empty() {
    let table = table![];
    assert!(table.is_empty());
    assert_eq!(table.capacity(), 100);
}

#[test]
fn test_table_macro_single_row() {
    let table = table![["eth0"]];
    assert_eq!(table.len(), 1);
    assert_eq!(table.line(0), Some("eth0"));
    assert_eq!(table.cell(0, 1), None);
}

#[test]
fn test_table_macro_jagged_rows() {
    let table = table![
        ["eth0", "10.0.0.7", "up"],
        ["lo"],
        ["wlan0", "down"],
    ];
    assert_eq!(table.len(), 3);
    assert_eq!(table.columns_used(), 3);
    assert_eq!(table.cells(0).count(), 3);
    assert_eq!(table.cells(1).count(), 1);
    assert_eq!(table.cell(2, 1), Some("down"));
}

#[test]
fn test_table_macro_trailing_commas() {
    let table = table![["a", "b",], ["c",],];
    assert_eq!(table.to_text(" ", LineEnding::Lf), "a b\nc\n");
}

#[test]
fn test_table_macro_empty_cells_are_present() {
    let table = table![["key", ""]];
    assert_eq!(table.cell(0, 1), Some(""));
    assert_eq!(table.cell(0, 2), None);
}

#[test]
fn test_table_macro_with_expressions() {
    let names = ["eth0", "eth1"];
    let state = String::from("up");
    let table = table![[names[0], state.as_str()], [names[1], state.as_str()]];
    assert_eq!(table.value_for_key("eth1", 1).unwrap(), Some("up"));
}

#[test]
fn test_table_macro_matches_from_rows() {
    let built = StringTable::from_rows([vec!["x", "1"], vec!["y", "2"]]).unwrap();
    let table = table![["x", "1"], ["y", "2"]];
    assert_eq!(table.to_string(), built.to_string());
}

#[test]
fn test_table_macro_too_many_cells_yields_empty_table() {
    let table = table![[
        "0", "1", "2", "3", "4", "5", "6", "7", "8", "9", "10", "11", "12", "13", "14", "15",
        "16", "17", "18", "19", "20", "21", "22", "23", "24", "25", "26", "27", "28", "29", "30"
    ]];
    assert!(table.is_empty());
}
