use anyhow::Result;
use clap::Args;
use tiingo_lib::TiingoClient;

use crate::output::{print_result_table, OutputFormat};

#[derive(Args)]
pub struct MetaArgs {
    /// Ticker symbols (space or comma separated)
    #[arg(required = true, value_delimiter = ',')]
    pub tickers: Vec<String>,
}

pub async fn run(args: &MetaArgs, client: &TiingoClient, format: &OutputFormat) -> Result<()> {
    let table = client.get_stock_metadata(&args.tickers).await;
    if table.is_empty() {
        super::report_empty("metadata");
    }
    print_result_table(&table, format)
}
