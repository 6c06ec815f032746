use clap::{Args, Subcommand};
use marketplace::client::MarketplaceClient;
use marketplace::ui::{ShopDetailView, ShopForm, ShopListView, ViewState};
use uuid::Uuid;

#[derive(Debug, Args)]
pub(crate) struct ShopsCommand {
    #[command(subcommand)]
    command: ShopsSubcommand,
}

#[derive(Debug, Subcommand)]
enum ShopsSubcommand {
    /// List all shops, newest first
    List,
    /// Show a shop with its offers
    Show { id: Uuid },
    /// Register a new shop
    Create(CreateShopArgs),
    /// Delete a shop and all of its offers
    Delete { id: Uuid },
}

#[derive(Debug, Args)]
struct CreateShopArgs {
    #[arg(long)]
    name: String,

    #[arg(long)]
    address: String,

    #[arg(long)]
    phone: String,

    #[arg(long)]
    email: String,

    /// Link shown instead of the generated map search
    #[arg(long, default_value = "")]
    map_link: String,

    #[arg(long, default_value = "", allow_hyphen_values = true)]
    longitude: String,

    #[arg(long, default_value = "", allow_hyphen_values = true)]
    latitude: String,
}

pub(crate) async fn run(client: &MarketplaceClient, command: ShopsCommand) -> anyhow::Result<()> {
    match command.command {
        ShopsSubcommand::List => {
            let mut view = ShopListView::new();
            view.load(client).await;
            print!("{}", rendered(&view.state, || view.render())?);
            Ok(())
        }
        ShopsSubcommand::Show { id } => {
            let mut view = ShopDetailView::new(id);
            view.load(client).await;
            print!("{}", rendered(&view.state, || view.render(chrono::Utc::now()))?);
            Ok(())
        }
        ShopsSubcommand::Create(args) => {
            let form = ShopForm {
                name: args.name,
                address: args.address,
                phone: args.phone,
                email: args.email,
                map_link: args.map_link,
                longitude: args.longitude,
                latitude: args.latitude,
            };
            let shop = form.submit(client).await?;
            println!("Created shop {} ({})", shop.name, shop.id);
            Ok(())
        }
        ShopsSubcommand::Delete { id } => {
            println!("{}", client.shops().delete(&id).await?.message);
            Ok(())
        }
    }
}

pub(crate) fn fail_on_error<T>(state: &ViewState<T>) -> anyhow::Result<()> {
    match state.error() {
        Some(message) => Err(anyhow::anyhow!("{}", message)),
        None => Ok(()),
    }
}

/// The rendered view, or the load error alone so it is reported once
fn rendered<T>(state: &ViewState<T>, render: impl FnOnce() -> String) -> anyhow::Result<String> {
    fail_on_error(state)?;
    Ok(render())
}
