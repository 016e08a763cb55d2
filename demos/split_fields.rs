//! Splitting, merging and pulling tagged values out of single lines.
//!
//! Run with: cargo run --example split_fields

use line_toolbox::{LineParser, ParserOptions};
use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    let mut parser = LineParser::new();
    let line = "something::HASH(231230302)::blabla";

    // Tagged values
    if let Some(hash) = parser.extract_tag(line, "HASH")? {
        println!("HASH tag: {hash}");
    }
    println!("Retagged: {:?}", parser.replace_tag(line, "HASH", "0")?);

    // Fields on a delimiter, and back again
    let fields = parser.split(line, "::")?.clone();
    for (i, field) in fields.lines().enumerate() {
        println!("field {i}: {field:?}");
    }
    println!("Merged: {}\n", parser.merge(&fields)?);

    // Greedy splitting collapses runs of the delimiter
    let columns = "eth0      Link encap:Ethernet  HWaddr 00:11:22:33:44:55";
    let mut greedy = LineParser::with_options(ParserOptions::new().with_greedy(true))?;
    let words: Vec<String> = greedy.split(columns, " ")?.lines().map(String::from).collect();
    println!("Greedy split: {words:?}");
    println!("Non-greedy field count: {}\n", parser.split(columns, " ")?.len());

    // Command-line style parameters
    let command = r#"mount -t ext4 -o "rw,noatime" /dev/sda1"#;
    for name in ["t", "o", "x"] {
        println!("-{name}: {:?}", parser.extract_dashed_parameter(command, name)?);
    }

    // Anchors, keys and replacement
    println!(
        "Between: {:?}",
        parser.extract_between("inet addr:10.0.0.7  Bcast:10.0.0.255", Some("addr:"), Some(" "))?
    );
    println!(
        "Key value: {:?}",
        parser.extract_key_value("user=alice;shell=/bin/sh", "shell=")?
    );
    let replaced = parser.replace_all("a-b-c", "-", " / ")?;
    println!("Replaced {} times: {}", replaced.count, replaced.text);

    Ok(())
}
