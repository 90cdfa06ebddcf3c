use anyhow::{bail, Result};
use clap::Args;
use tiingo_lib::TiingoClient;

use crate::output::{print_result_table, print_wide_table, OutputFormat};

#[derive(Args)]
pub struct HistoryArgs {
    /// Ticker symbols (space or comma separated)
    #[arg(required = true, value_delimiter = ',')]
    pub tickers: Vec<String>,

    /// Resample frequency: daily, weekly, monthly, annually, or intraday like 5min, 1hour
    #[arg(long, default_value = "daily")]
    pub frequency: String,

    /// Columns to return (e.g. open,close,adjClose). Unknown names are ignored
    #[arg(long, value_delimiter = ',')]
    pub columns: Vec<String>,

    /// First date, YYYY-MM-DD
    #[arg(long)]
    pub start: Option<String>,

    /// Last date, YYYY-MM-DD
    #[arg(long)]
    pub end: Option<String>,

    /// Show a single column with one column per ticker
    #[arg(long)]
    pub pivot: Option<String>,
}

pub async fn run(args: &HistoryArgs, client: &TiingoClient, format: &OutputFormat) -> Result<()> {
    let table = client
        .get_stock_historical(
            &args.tickers,
            &args.frequency,
            &args.columns,
            args.start.as_deref(),
            args.end.as_deref(),
        )
        .await?;

    if table.is_empty() {
        super::report_empty("prices");
    }

    if let Some(column) = &args.pivot {
        match table.pivot(column) {
            Some(wide) => return print_wide_table(&wide, format),
            None => bail!(
                "cannot pivot on '{}': result columns are {}",
                column,
                table.columns().join(", ")
            ),
        }
    }

    print_result_table(&table, format)
}
