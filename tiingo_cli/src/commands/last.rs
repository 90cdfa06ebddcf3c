use anyhow::Result;
use clap::Args;
use tiingo_lib::TiingoClient;

use crate::output::{print_result_table, OutputFormat};

#[derive(Args)]
pub struct LastArgs {
    /// Ticker symbols (space or comma separated)
    #[arg(required = true, value_delimiter = ',')]
    pub tickers: Vec<String>,

    /// Columns to return (e.g. last,prevClose,bidPrice). Unknown names are ignored
    #[arg(long, value_delimiter = ',')]
    pub columns: Vec<String>,
}

pub async fn run(args: &LastArgs, client: &TiingoClient, format: &OutputFormat) -> Result<()> {
    let table = client.get_stock_last(&args.tickers, &args.columns).await;
    if table.is_empty() {
        super::report_empty("quotes");
    }
    print_result_table(&table, format)
}
