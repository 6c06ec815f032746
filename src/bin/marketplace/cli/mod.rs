use clap::{Parser, Subcommand};
use marketplace::client::{DEFAULT_BASE_URL, MarketplaceClient};

mod offers;
mod shops;

#[derive(Debug, Parser)]
#[command(name = "marketplace", about = "Shop marketplace CLI", long_about = None)]
pub(crate) struct Cli {
    /// API base URL, including the `/api` prefix
    #[arg(long, global = true, env = "MARKETPLACE_URL", default_value = DEFAULT_BASE_URL)]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    Shops(shops::ShopsCommand),
    Offers(offers::OffersCommand),
    /// Check that the server is up
    Health,
}

impl Cli {
    pub(crate) async fn run(self) -> anyhow::Result<()> {
        let client = MarketplaceClient::new(self.url)?;

        match self.command {
            Commands::Shops(command) => shops::run(&client, command).await,
            Commands::Offers(command) => offers::run(&client, command).await,
            Commands::Health => {
                println!("{}", client.health().await?.message);
                Ok(())
            }
        }
    }
}
