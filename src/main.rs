use anyhow::Result;
use casebrief::cli;

#[tokio::main]
async fn main() -> Result<()> {
    cli::run().await
}
