//! Catalog subcommands.

use clap::{Args, Subcommand};
use veranda_app::{
    catalog::{CatalogService, Product},
    commerce::CommerceClient,
    config::AppConfig,
};

#[derive(Debug, Args)]
pub(crate) struct CatalogCommand {
    #[command(subcommand)]
    command: CatalogSubcommand,
}

#[derive(Debug, Subcommand)]
enum CatalogSubcommand {
    /// List products, best sellers first.
    Products {
        /// Maximum number of products to list.
        #[arg(long, default_value_t = 20)]
        first: u32,
    },
    /// Show one product with its variants.
    Product {
        /// Product handle, e.g. `classic-tee`.
        handle: String,
    },
    /// List collections.
    Collections {
        /// Maximum number of collections to list.
        #[arg(long, default_value_t = 20)]
        first: u32,
    },
    /// Show one collection and its products.
    Collection {
        /// Collection handle, e.g. `featured`.
        handle: String,

        /// Maximum number of products to include.
        #[arg(long, default_value_t = 50)]
        first: u32,
    },
}

pub(crate) async fn run(config: &AppConfig, command: CatalogCommand) -> Result<(), String> {
    let endpoint = config.commerce.endpoint().ok_or(
        "commerce backend is not configured; \
         set COMMERCE_STORE_DOMAIN and COMMERCE_STOREFRONT_TOKEN",
    )?;

    let catalog = CatalogService::new(CommerceClient::new(endpoint));

    match command.command {
        CatalogSubcommand::Products { first } => {
            let products = catalog
                .products(first)
                .await
                .map_err(|error| format!("failed to list products: {error}"))?;

            for product in &products {
                print_product_line(product);
            }
        }
        CatalogSubcommand::Product { handle } => {
            let product = catalog
                .product_by_handle(&handle)
                .await
                .map_err(|error| format!("failed to fetch product: {error}"))?
                .ok_or_else(|| format!("no product with handle {handle}"))?;

            println!("{} ({})", product.title, product.vendor);
            println!("{}", product.description);

            for variant in &product.variants {
                let availability = if variant.available_for_sale {
                    "available"
                } else {
                    "sold out"
                };

                println!(
                    "  {}  {} ({availability})  [{}]",
                    variant.title,
                    variant.price.format(),
                    variant.id,
                );
            }
        }
        CatalogSubcommand::Collections { first } => {
            let collections = catalog
                .collections(first)
                .await
                .map_err(|error| format!("failed to list collections: {error}"))?;

            for collection in &collections {
                println!("{}  [{}]", collection.title, collection.handle);
            }
        }
        CatalogSubcommand::Collection { handle, first } => {
            let collection = catalog
                .collection_by_handle(&handle, first)
                .await
                .map_err(|error| format!("failed to fetch collection: {error}"))?
                .ok_or_else(|| format!("no collection with handle {handle}"))?;

            println!("{}", collection.title);

            for product in &collection.products {
                print_product_line(product);
            }
        }
    }

    Ok(())
}

fn print_product_line(product: &Product) {
    println!(
        "{}  from {}  [{}]",
        product.title,
        product.price_range.min_variant_price.format(),
        product.handle,
    );
}
