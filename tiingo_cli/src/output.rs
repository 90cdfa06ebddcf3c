use std::io::Write;

use anyhow::Result;
use tabled::builder::Builder;
use tabled::settings::Style;
use tiingo_lib::table::format_time;
use tiingo_lib::{ResultTable, WideTable};

#[derive(Clone, Debug, PartialEq)]
pub enum OutputFormat {
    Table,
    Json,
    Csv,
    Markdown,
}

impl OutputFormat {
    pub fn parse(s: &str) -> Self {
        match s {
            "json" => OutputFormat::Json,
            "csv" => OutputFormat::Csv,
            "markdown" | "md" => OutputFormat::Markdown,
            _ => OutputFormat::Table,
        }
    }
}

// -- Record builders --

/// Header row followed by one record per table row.
///
/// The `Date` column is only present when at least one row is dated, so
/// metadata tables render as ticker + fields.
fn build_records(table: &ResultTable) -> Vec<Vec<String>> {
    let dated = table.rows().iter().any(|r| r.date.is_some());

    let mut header = vec!["Ticker".to_string()];
    if dated {
        header.push("Date".to_string());
    }
    header.extend(table.columns().iter().cloned());

    let mut records = vec![header];
    for row in table.rows() {
        let mut record = vec![row.ticker.clone()];
        if dated {
            record.push(row.date.as_ref().map(format_time).unwrap_or_default());
        }
        record.extend(row.cells.iter().map(|c| c.to_string()));
        records.push(record);
    }
    records
}

fn build_wide_records(table: &WideTable) -> Vec<Vec<String>> {
    let mut header = vec!["Date".to_string()];
    header.extend(table.tickers.iter().cloned());

    let mut records = vec![header];
    for (date, cells) in &table.rows {
        let mut record = vec![format_time(date)];
        record.extend(cells.iter().map(|c| c.to_string()));
        records.push(record);
    }
    records
}

// -- Renderers --

fn render_table(records: Vec<Vec<String>>, markdown: bool) -> String {
    let mut builder = Builder::default();
    for record in records {
        builder.push_record(record);
    }
    let mut table = builder.build();
    if markdown {
        table.with(Style::markdown());
    }
    table.to_string()
}

fn write_csv<W: Write>(records: &[Vec<String>], writer: W) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    for record in records {
        wtr.write_record(record)?;
    }
    wtr.flush()?;
    Ok(())
}

fn print_records(records: Vec<Vec<String>>, format: &OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Table => println!("{}", render_table(records, false)),
        OutputFormat::Markdown => println!("{}", render_table(records, true)),
        OutputFormat::Csv => write_csv(&records, std::io::stdout())?,
        OutputFormat::Json => print_json(&records),
    }
    Ok(())
}

pub fn print_result_table(table: &ResultTable, format: &OutputFormat) -> Result<()> {
    if *format == OutputFormat::Json {
        print_json(table);
        return Ok(());
    }
    print_records(build_records(table), format)
}

pub fn print_wide_table(table: &WideTable, format: &OutputFormat) -> Result<()> {
    if *format == OutputFormat::Json {
        print_json(table);
        return Ok(());
    }
    print_records(build_wide_records(table), format)
}

// -- JSON output --

pub fn print_json<T: serde::Serialize>(data: &T) {
    match serde_json::to_string_pretty(data) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Failed to serialize to JSON: {}", e),
    }
}

#[cfg(test)]
#[path = "output_tests.rs"]
mod tests;
