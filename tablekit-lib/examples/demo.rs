//! Table Demo
//!
//! Drives a table through a scripted session and prints each page:
//! - Sorting by two columns
//! - Filtering by column and globally
//! - Paging with the navigation buttons
//! - Reordering columns and expanding a row
//!
//! Debug logs are written to `table-demo.log`.

use std::fs::File;

use log::LevelFilter;
use serde_json::json;
use simplelog::{Config, WriteLogger};
use tablekit_lib::config::TableConfig;
use tablekit_lib::expansion::RowId;
use tablekit_lib::filter::{GLOBAL_KEY, PredicateRegistry};
use tablekit_lib::model::{Record, Value};
use tablekit_lib::page::PageButton;
use tablekit_lib::render::Renderers;
use tablekit_lib::{Table, TableError};

const CONFIG: &str = r#"{
    "columns": [
        { "key": "id", "hidden": true },
        { "key": "name", "displayName": "Name" },
        { "key": "team", "displayName": "Team" },
        { "key": "score", "displayName": "Score" },
        { "key": "active", "displayName": "Active", "sortable": false }
    ],
    "pageSize": 3,
    "identityKey": "id",
    "summaryTemplate": "{min} - {max} of {total} (page {page}/{pages})"
}"#;

fn players() -> Result<Vec<Record>, serde_json::Error> {
    serde_json::from_value(json!([
        { "id": 1, "name": "Ada", "team": "red", "score": 72, "active": true },
        { "id": 2, "name": "Brook", "team": "blue", "score": 91, "active": true },
        { "id": 3, "name": "Cyd", "team": "red", "score": 91, "active": false },
        { "id": 4, "name": "Dex", "team": "green", "score": 55, "active": true },
        { "id": 5, "name": "Eli", "team": "blue", "score": 72, "active": false },
        { "id": 6, "name": "Fay", "team": "green", "score": 88, "active": true },
        { "id": 7, "name": "Gus", "team": "red", "score": 64, "active": true },
    ]))
}

// ============================================================================
// Printing
// ============================================================================

fn print_page(title: &str, table: &mut Table<Record>) {
    println!("== {} ==", title);

    let columns = table.visible_columns();
    let header: Vec<String> = columns
        .iter()
        .map(|c| format!("{:<8}", c.label()))
        .collect();
    println!("   {}", header.join(" "));

    for row in table.displayed_page_rows() {
        let marker = if table.is_row_expanded(row) { "v" } else { ">" };
        let cells: Vec<String> = columns
            .iter()
            .map(|c| format!("{:<8}", table.render_cell(row, &c.key)))
            .collect();
        println!(" {} {}", marker, cells.join(" "));
        if table.is_row_expanded(row) {
            println!("     details for #{}", table.render_cell(row, "id"));
        }
    }

    println!("   {}", table.pagination_label());
    for event in table.drain_events() {
        println!("   event: {:?}", event);
    }
    for warning in table.sort_warnings() {
        println!("   warning: {}", warning);
    }
    println!();
}

fn run() -> Result<(), TableError> {
    let renderers = Renderers::new().with("active", |_key: &str, value: Option<&Value>| {
        match value {
            Some(Value::Bool(true)) => "yes".to_string(),
            _ => "no".to_string(),
        }
    });

    let mut table: Table<Record> = Table::from_config(
        TableConfig::from_json(CONFIG)?,
        &PredicateRegistry::new(),
    )?
    .with_renderers(renderers);
    table.set_rows(players()?)?;
    print_page("Source order", &mut table);

    table.on_header_click("name");
    table.on_header_click("score");
    table.on_header_click("score");
    print_page("Score descending, then name", &mut table);

    table.on_page_button(PageButton::Next);
    print_page("Page 2", &mut table);

    table.on_filter_change("team", "red");
    print_page("Team red", &mut table);

    table.on_filter_change("team", "");
    table.on_filter_change(GLOBAL_KEY, "7");
    print_page("Global '7'", &mut table);

    table.on_filter_change(GLOBAL_KEY, "");
    table.on_columns_reordered(&["id", "score", "name", "team", "active"])?;
    table.on_expander_click(&RowId::from("2"))?;
    print_page("Reordered, Brook expanded", &mut table);

    Ok(())
}

fn main() {
    // Initialize file logging
    if let Ok(log_file) = File::create("table-demo.log") {
        let _ = WriteLogger::init(LevelFilter::Debug, Config::default(), log_file);
    }

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
    }
}
