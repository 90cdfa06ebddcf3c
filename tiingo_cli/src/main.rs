mod commands;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tiingo_lib::config::TOKEN_VAR;
use tiingo_lib::{ClientConfig, TiingoClient};

use crate::output::OutputFormat;

#[derive(Parser)]
#[command(name = "tiingo")]
#[command(about = "Fetch stock metadata, price history and latest quotes from Tiingo")]
struct Cli {
    /// Output format: table, markdown, csv or json
    #[arg(long, default_value = "table", global = true)]
    output: String,

    /// API token (defaults to the TIINGO_API_TOKEN environment variable)
    #[arg(long, global = true)]
    token: Option<String>,

    /// Override the API base URL (defaults to TIINGO_BASE_URL or https://api.tiingo.com)
    #[arg(long, global = true)]
    base_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Look up ticker metadata
    Meta(commands::meta::MetaArgs),
    /// Fetch historical prices
    History(commands::history::HistoryArgs),
    /// Fetch the latest IEX quote
    Last(commands::last::LastArgs),
    /// Check that the API token is accepted
    Verify,
}

fn load_config(cli: &Cli) -> Result<ClientConfig> {
    let mut config = match &cli.token {
        Some(token) => ClientConfig::from_lookup(|key| {
            if key == TOKEN_VAR {
                Some(token.clone())
            } else {
                std::env::var(key).ok()
            }
        })?,
        None => ClientConfig::from_env()?,
    };
    if let Some(base_url) = &cli.base_url {
        config = config.with_base_url(base_url);
    }
    Ok(config)
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("tiingo=info".parse()?),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let format = OutputFormat::parse(&cli.output);

    let config = load_config(&cli)?;
    let client = TiingoClient::from_config(&config)?;

    match &cli.command {
        Commands::Meta(args) => commands::meta::run(args, &client, &format).await?,
        Commands::History(args) => commands::history::run(args, &client, &format).await?,
        Commands::Last(args) => commands::last::run(args, &client, &format).await?,
        Commands::Verify => commands::verify::run(&client).await?,
    }

    Ok(())
}
