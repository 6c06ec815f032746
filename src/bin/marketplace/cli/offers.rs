use super::shops::fail_on_error;
use clap::{Args, Subcommand};
use marketplace::client::MarketplaceClient;
use marketplace::entities::Offer;
use marketplace::ui::{OfferForm, ViewState, format_date};
use uuid::Uuid;

#[derive(Debug, Args)]
pub(crate) struct OffersCommand {
    #[command(subcommand)]
    command: OffersSubcommand,
}

#[derive(Debug, Subcommand)]
enum OffersSubcommand {
    /// All offers of a shop, newest first
    List { shop_id: Uuid },
    /// Offers of a shop that are running now
    Active { shop_id: Uuid },
    /// Add an offer to a shop
    Create(CreateOfferArgs),
    /// Delete one offer
    Delete { id: Uuid },
}

#[derive(Debug, Args)]
struct CreateOfferArgs {
    #[arg(long)]
    shop_id: Uuid,

    #[arg(long)]
    title: String,

    #[arg(long)]
    description: String,

    /// `YYYY-MM-DD` or RFC 3339
    #[arg(long)]
    start: String,

    /// `YYYY-MM-DD` or RFC 3339
    #[arg(long)]
    end: String,
}

pub(crate) async fn run(client: &MarketplaceClient, command: OffersCommand) -> anyhow::Result<()> {
    match command.command {
        OffersSubcommand::List { shop_id } => {
            print_offers(client.offers().list_by_shop(&shop_id).await.map_err(Into::into))
        }
        OffersSubcommand::Active { shop_id } => {
            print_offers(client.offers().active_by_shop(&shop_id).await.map_err(Into::into))
        }
        OffersSubcommand::Create(args) => {
            let form = OfferForm {
                shop_id: args.shop_id,
                title: args.title,
                description: args.description,
                start_date: args.start,
                end_date: args.end,
            };
            let offer = form.submit(client).await?;
            println!("Created offer {} ({})", offer.title, offer.id);
            Ok(())
        }
        OffersSubcommand::Delete { id } => {
            println!("{}", client.offers().delete(&id).await?.message);
            Ok(())
        }
    }
}

fn print_offers(result: anyhow::Result<Vec<Offer>>) -> anyhow::Result<()> {
    let state = match result {
        Ok(offers) => ViewState::Ready(offers),
        Err(e) => {
            tracing::error!(error = %e, "Error fetching offers");
            ViewState::Failed("Failed to fetch offers".to_string())
        }
    };

    if let Some(offers) = state.data() {
        if offers.is_empty() {
            println!("No offers yet");
        }
        for offer in offers {
            println!(
                "{}  [{}]\n  {}\n  {} -> {}",
                offer.title,
                offer.id,
                offer.description,
                format_date(&offer.start_date),
                format_date(&offer.end_date)
            );
        }
    }
    fail_on_error(&state)
}
