mod cart;
mod catalog;
mod chat;
mod checkout;
mod relay;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::cart::CartCommands;

#[derive(Debug, Parser)]
#[command(name = "bcb")]
#[command(about = "Bayou City Blues merch store: browse, cart, checkout, and chat")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// List the catalog
    Products {
        /// Category key (all, apparel, hats, drinkware, accessories, banners)
        #[arg(long)]
        category: Option<String>,
        /// Only show featured products
        #[arg(long)]
        featured: bool,
    },
    /// Show and edit the cart
    Cart {
        #[command(subcommand)]
        command: CartCommands,
    },
    /// Start a hosted checkout for the current cart
    Checkout {
        /// Prefill the payment page with this email
        #[arg(long)]
        email: Option<String>,
    },
    /// Ask the shopping assistant a question, or start a session without one
    Chat {
        /// Message to send
        message: Vec<String>,
    },
    /// List upcoming watch parties
    Events,
}

/// `RUST_LOG` wins; otherwise the configured `BCB_LOG_LEVEL`.
fn log_filter(default_level: &str) -> Result<EnvFilter, tracing_subscriber::filter::ParseError> {
    EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(default_level))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = bcb_core::load_app_config()?;
    tracing_subscriber::fmt()
        .with_env_filter(log_filter(&config.log_level)?)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Some(Commands::Products { category, featured }) => {
            catalog::run_products(&config, category.as_deref(), featured).await?;
        }
        Some(Commands::Cart { command }) => cart::run_cart(&config, command).await?,
        Some(Commands::Checkout { email }) => checkout::run_checkout(&config, email).await?,
        Some(Commands::Chat { message }) => chat::run_chat(&config, &message.join(" ")).await?,
        Some(Commands::Events) => catalog::run_events(),
        None => println!("bcb: try `bcb products` or `bcb --help`"),
    }

    Ok(())
}

#[cfg(test)]
mod tests;
