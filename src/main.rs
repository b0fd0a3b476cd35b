use anyhow::Result;
use clap::Parser;
use skyclock::cli::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    skyclock::run(cli).await
}
