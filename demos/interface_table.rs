//! Reading an interface listing into a table, then searching, sorting and
//! saving it.
//!
//! Run with: cargo run --example interface_table

use line_toolbox::{
    LineEnding, LineRead, SortOrder, StringTable, SubstituteMode, TextBufferReader,
    TextFileReader,
};
use std::error::Error;

const LISTING: &str = "\
eth0   10.0.0.7      up
lo     127.0.0.1     up

wlan0  192.168.1.20  down
tun0   10.8.0.1      up
";

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    // One row per non-empty line, then columns on runs of spaces
    let mut reader = TextBufferReader::from_text(LISTING);
    let mut table = StringTable::from_lines(&mut reader)?;
    for row in 0..table.len() {
        let line = table.line(row).unwrap_or_default().to_string();
        let mut words = line.split_whitespace();
        table.replace(row, words.next().unwrap_or_default())?;
        for word in words {
            table.col_append(row, word)?;
        }
    }
    println!("Parsed table:\n{table}");

    // Lookups
    println!("lo address: {:?}", table.value_for_key("lo", 1)?);
    println!("first down interface: {:?}", table.find_in_column("down", 2)?);
    println!("10.x interfaces: {:?}", table.find_matching("10.")?);

    // Sorting on the address column
    table.sort(1, SortOrder::Ascending, 0, None)?;
    println!("Sorted by address:\n{table}");

    // Rename in place, drop the tunnel
    let renamed = table.substitute_in_matching("eth", "enp", SubstituteMode::All)?;
    println!("Renamed {renamed} interface(s)");
    if let Some(row) = table.remove_matching("tun")? {
        println!("Removed row {row}");
    }

    // Save as CSV and read it back line by line
    let path = std::env::temp_dir().join("interface_table.csv");
    table.save(&path, ",", LineEnding::CrLf)?;
    let mut file = TextFileReader::open(&path)?;
    while let Some(line) = file.next_line()? {
        println!("saved: {line}");
    }
    std::fs::remove_file(&path)?;

    Ok(())
}
