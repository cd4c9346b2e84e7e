//! Cart subcommands.

use std::sync::Arc;

use clap::{Args, Subcommand};
use veranda_app::{
    cart::{
        CartStore, FileCartIdStore, GraphqlCartBackend, LineId, MutationOutcome, VariantId,
    },
    commerce::CommerceClient,
    config::AppConfig,
};

#[derive(Debug, Args)]
pub(crate) struct CartCommand {
    #[command(subcommand)]
    command: CartSubcommand,
}

#[derive(Debug, Subcommand)]
enum CartSubcommand {
    /// Show the current cart.
    Show,
    /// Add a merchandise variant to the cart.
    Add {
        /// Variant identifier, e.g. `gid://shop/ProductVariant/1`.
        variant: String,

        /// Number of units to add.
        #[arg(long, default_value_t = 1)]
        quantity: u32,
    },
    /// Change a line's quantity; zero removes the line.
    Update {
        /// Cart line identifier.
        line: String,

        /// New quantity.
        quantity: u32,
    },
    /// Remove a line from the cart.
    Remove {
        /// Cart line identifier.
        line: String,
    },
    /// Print the hosted checkout URL.
    Checkout,
}

pub(crate) async fn run(config: &AppConfig, command: CartCommand) -> Result<(), String> {
    let endpoint = config.commerce.endpoint().ok_or(
        "commerce backend is not configured; \
         set COMMERCE_STORE_DOMAIN and COMMERCE_STOREFRONT_TOKEN",
    )?;

    let backend = GraphqlCartBackend::new(CommerceClient::new(endpoint));
    let storage = FileCartIdStore::new(config.storage.cart_id_path.clone());
    let store = CartStore::new(Arc::new(backend), Arc::new(storage));

    store.rehydrate().await;

    match command.command {
        CartSubcommand::Show => {}
        CartSubcommand::Add { variant, quantity } => {
            report(store.add_to_cart(&VariantId::new(variant), quantity).await)?;
        }
        CartSubcommand::Update { line, quantity } => {
            report(store.update_quantity(&LineId::new(line), quantity).await)?;
        }
        CartSubcommand::Remove { line } => {
            report(store.remove_from_cart(&LineId::new(line)).await)?;
        }
        CartSubcommand::Checkout => {
            let url = store
                .checkout_url()
                .ok_or("the cart has no checkout url yet")?;

            println!("{url}");
            return Ok(());
        }
    }

    print_cart(&store);

    Ok(())
}

fn report(outcome: MutationOutcome) -> Result<(), String> {
    match outcome {
        MutationOutcome::Applied | MutationOutcome::Superseded => Ok(()),
        MutationOutcome::Rejected(errors) => {
            let messages: Vec<&str> = errors.iter().map(|error| error.message.as_str()).collect();

            Err(format!("the backend rejected the change: {}", messages.join("; ")))
        }
        MutationOutcome::Failed => Err("the request failed; see the log for details".to_string()),
        MutationOutcome::NoActiveCart => Err("there is no active cart".to_string()),
    }
}

fn print_cart(store: &CartStore) {
    let state = store.state();

    let Some(cart) = state.cart else {
        println!("cart is empty");
        return;
    };

    for line in &cart.lines {
        println!(
            "{}  {}  {} x {}  [{}]",
            line.merchandise.product.title,
            line.merchandise.title,
            line.quantity,
            line.merchandise.price.format(),
            line.id,
        );
    }

    println!("items: {}", cart.total_quantity);
    println!("subtotal: {}", cart.cost.subtotal_amount.format());

    if let Some(tax) = &cart.cost.total_tax_amount {
        println!("tax: {}", tax.format());
    }

    println!("total: {}", cart.cost.total_amount.format());
}
