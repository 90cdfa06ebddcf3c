use anyhow::Result;
use tiingo_lib::TiingoClient;

pub async fn run(client: &TiingoClient) -> Result<()> {
    client.verify_token().await?;
    eprintln!("Token accepted by Tiingo");
    Ok(())
}
