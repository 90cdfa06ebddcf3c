//! Tabular results keyed by `(ticker, date)`.
//!
//! A [`ResultTable`] is the library's DataFrame stand-in: an ordered column
//! list and rows in insertion order (ticker in request order, then date in the
//! order the API returned it). Materializing it as a real DataFrame, CSV or
//! terminal table is left to the caller.

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Serialize, Serializer};
use tiingo_api::types::{Metadata, PriceRecord, Quote};

/// Columns of a metadata table.
pub const METADATA_COLUMNS: &[&str] = &["name", "description", "exchangeCode", "startDate", "endDate"];

/// A single value in a [`ResultTable`].
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Number(f64),
    Text(String),
    Date(NaiveDate),
    Time(DateTime<Utc>),
    Empty,
}

impl Cell {
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Cell::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }
}

impl From<Option<f64>> for Cell {
    fn from(value: Option<f64>) -> Self {
        value.map(Cell::Number).unwrap_or(Cell::Empty)
    }
}

impl From<Option<String>> for Cell {
    fn from(value: Option<String>) -> Self {
        value.map(Cell::Text).unwrap_or(Cell::Empty)
    }
}

impl From<Option<NaiveDate>> for Cell {
    fn from(value: Option<NaiveDate>) -> Self {
        value.map(Cell::Date).unwrap_or(Cell::Empty)
    }
}

impl From<Option<DateTime<Utc>>> for Cell {
    fn from(value: Option<DateTime<Utc>>) -> Self {
        value.map(Cell::Time).unwrap_or(Cell::Empty)
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Number(n) => write!(f, "{}", n),
            Cell::Text(s) => write!(f, "{}", s),
            Cell::Date(d) => write!(f, "{}", d.format("%Y-%m-%d")),
            Cell::Time(t) => write!(f, "{}", format_time(t)),
            Cell::Empty => Ok(()),
        }
    }
}

impl Serialize for Cell {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Cell::Number(n) => serializer.serialize_f64(*n),
            Cell::Text(s) => serializer.serialize_str(s),
            Cell::Empty => serializer.serialize_none(),
            Cell::Date(_) | Cell::Time(_) => serializer.collect_str(self),
        }
    }
}

/// Render a timestamp as RFC 3339, dropping the time for midnight (daily bars).
pub fn format_time(t: &DateTime<Utc>) -> String {
    if t.time() == chrono::NaiveTime::MIN {
        t.format("%Y-%m-%d").to_string()
    } else {
        t.to_rfc3339_opts(SecondsFormat::AutoSi, true)
    }
}

/// One row: the `(ticker, date)` key and one cell per table column.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    pub ticker: String,
    /// `None` for metadata rows, which are keyed by ticker alone.
    pub date: Option<DateTime<Utc>>,
    pub cells: Vec<Cell>,
}

/// Ordered rows keyed by `(ticker, date)` with a fixed column list.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResultTable {
    columns: Vec<String>,
    rows: Vec<Row>,
}

impl ResultTable {
    /// An empty table with the given columns.
    pub fn new<S: AsRef<str>>(columns: &[S]) -> Self {
        Self {
            columns: columns.iter().map(|c| c.as_ref().to_string()).collect(),
            rows: Vec::new(),
        }
    }

    /// Builds a price table from per-ticker series, in the given order.
    pub fn from_prices(columns: &[&str], series: Vec<(String, Vec<PriceRecord>)>) -> Self {
        let mut table = Self::new(columns);
        for (ticker, records) in series {
            for record in records {
                let cells = columns.iter().map(|c| Cell::from(record.value(c))).collect();
                table.rows.push(Row {
                    ticker: ticker.clone(),
                    date: Some(record.date),
                    cells,
                });
            }
        }
        table
    }

    /// Builds a latest-quote table, one row per ticker keyed by the quote timestamp.
    pub fn from_quotes(columns: &[&str], quotes: Vec<(String, Quote)>) -> Self {
        let mut table = Self::new(columns);
        for (ticker, quote) in quotes {
            let cells = columns
                .iter()
                .map(|c| {
                    if Quote::is_time_column(c) {
                        Cell::from(quote.time(c))
                    } else {
                        Cell::from(quote.number(c))
                    }
                })
                .collect();
            table.rows.push(Row {
                ticker,
                date: quote.timestamp,
                cells,
            });
        }
        table
    }

    /// Builds a metadata table, one undated row per ticker.
    pub fn from_metadata(records: Vec<(String, Metadata)>) -> Self {
        let mut table = Self::new(METADATA_COLUMNS);
        for (ticker, meta) in records {
            table.rows.push(Row {
                ticker,
                date: None,
                cells: vec![
                    Cell::from(meta.name),
                    Cell::from(meta.description),
                    Cell::from(meta.exchange_code),
                    Cell::from(meta.start_date),
                    Cell::from(meta.end_date),
                ],
            });
        }
        table
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Distinct tickers in first-seen order.
    pub fn tickers(&self) -> Vec<&str> {
        let mut seen: Vec<&str> = Vec::new();
        for row in &self.rows {
            if !seen.contains(&row.ticker.as_str()) {
                seen.push(row.ticker.as_str());
            }
        }
        seen
    }

    pub fn rows_for<'a>(&'a self, ticker: &'a str) -> impl Iterator<Item = &'a Row> + 'a {
        self.rows.iter().filter(move |r| r.ticker == ticker)
    }

    pub fn column_index(&self, column: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == column)
    }

    /// Looks up one cell. `date` must match the row key exactly (`None` for metadata).
    pub fn get(&self, ticker: &str, date: Option<DateTime<Utc>>, column: &str) -> Option<&Cell> {
        let idx = self.column_index(column)?;
        self.rows
            .iter()
            .find(|r| r.ticker == ticker && r.date == date)
            .and_then(|r| r.cells.get(idx))
    }

    /// Pivots one column into a date-keyed table with a column per ticker.
    ///
    /// Dates are sorted ascending; a ticker with no observation on a date gets
    /// [`Cell::Empty`]. Undated rows are skipped. Returns `None` if `column` is
    /// not in the table.
    pub fn pivot(&self, column: &str) -> Option<WideTable> {
        let idx = self.column_index(column)?;
        let tickers: Vec<String> = self.tickers().into_iter().map(str::to_string).collect();
        let mut by_date: BTreeMap<DateTime<Utc>, Vec<Cell>> = BTreeMap::new();
        for row in &self.rows {
            let Some(date) = row.date else { continue };
            let Some(pos) = tickers.iter().position(|t| *t == row.ticker) else {
                continue;
            };
            let line = by_date
                .entry(date)
                .or_insert_with(|| vec![Cell::Empty; tickers.len()]);
            line[pos] = row.cells[idx].clone();
        }
        Some(WideTable {
            column: column.to_string(),
            tickers,
            rows: by_date.into_iter().collect(),
        })
    }
}

struct RowView<'a> {
    columns: &'a [String],
    row: &'a Row,
}

impl Serialize for RowView<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.columns.len() + 2))?;
        map.serialize_entry("ticker", &self.row.ticker)?;
        if let Some(date) = &self.row.date {
            map.serialize_entry("date", &format_time(date))?;
        }
        for (column, cell) in self.columns.iter().zip(&self.row.cells) {
            map.serialize_entry(column, cell)?;
        }
        map.end()
    }
}

/// Serializes as an array of row objects: `ticker`, `date`, then the columns.
impl Serialize for ResultTable {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.rows.len()))?;
        for row in &self.rows {
            seq.serialize_element(&RowView {
                columns: &self.columns,
                row,
            })?;
        }
        seq.end()
    }
}

/// One column of a [`ResultTable`] spread across tickers.
#[derive(Debug, Clone, PartialEq)]
pub struct WideTable {
    pub column: String,
    pub tickers: Vec<String>,
    pub rows: Vec<(DateTime<Utc>, Vec<Cell>)>,
}

impl Serialize for WideTable {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.rows.len()))?;
        for (date, cells) in &self.rows {
            let entries: Vec<(&str, &Cell)> = self
                .tickers
                .iter()
                .map(String::as_str)
                .zip(cells.iter())
                .collect();
            seq.serialize_element(&WideRowView {
                date: format_time(date),
                entries,
            })?;
        }
        seq.end()
    }
}

struct WideRowView<'a> {
    date: String,
    entries: Vec<(&'a str, &'a Cell)>,
}

impl Serialize for WideRowView<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len() + 1))?;
        map.serialize_entry("date", &self.date)?;
        for (ticker, cell) in &self.entries {
            map.serialize_entry(ticker, cell)?;
        }
        map.end()
    }
}
