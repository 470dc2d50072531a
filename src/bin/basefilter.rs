use anyhow::Result;
use clap::{Parser, Subcommand};

use basefilter::cache::TieredCache;
use basefilter::catalog::ProductCatalog;
use basefilter::config::ShopConfig;
use basefilter::fetch::BaseApiClient;
use basefilter::filter::{self, FilterSelection};
use basefilter::product::Product;
use basefilter::tracing::init_tracing;
use basefilter::util::env;

#[derive(Parser, Debug)]
#[command(name = "basefilter", version, about = "BASE shop product catalog CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
#[command(rename_all = "kebab-case")]
enum Commands {
    /// Fetch all products from the shop API and print a summary
    Fetch {
        /// Bypass both cache tiers and re-fetch
        #[arg(long, default_value_t = false)]
        force: bool,
    },
    /// Fetch (cache-first) and print products matching the given filters
    Show {
        /// Comma-separated canonical brand values
        #[arg(long)]
        brand: Option<String>,
        /// Comma-separated canonical color values
        #[arg(long)]
        color: Option<String>,
        /// Comma-separated canonical size values
        #[arg(long)]
        size: Option<String>,
        /// Comma-separated canonical length values
        #[arg(long)]
        length: Option<String>,
        /// Inclusive price range as min-max (minor units), or "all"
        #[arg(long)]
        price_range: Option<String>,
        /// Emit the filtered list as JSON instead of one line per product
        #[arg(long, default_value_t = false)]
        json: bool,
    },
}

fn build_catalog() -> Result<ProductCatalog<BaseApiClient>> {
    let config = ShopConfig::from_env();
    let token = config.access_token.clone().unwrap_or_default();
    let client = BaseApiClient::new(&config.api_base, &token)?;
    let cache = TieredCache::in_memory(config.cache_ttl);
    Ok(ProductCatalog::new(client, cache, config))
}

fn print_line(p: &Product) {
    let colors = p.colors.iter().cloned().collect::<Vec<_>>().join("/");
    println!(
        "{}\t¥{}\t{}\t{}\t{}\t{}",
        p.id,
        p.price,
        p.brand.as_deref().unwrap_or("-"),
        p.size.as_deref().unwrap_or("-"),
        if colors.is_empty() { "-".to_string() } else { colors },
        p.title,
    );
}

#[tokio::main]
async fn main() -> Result<()> {
    env::init_env();
    init_tracing("basefilter=info")?;

    let cli = Cli::parse();
    let catalog = build_catalog()?;

    match cli.command {
        Commands::Fetch { force } => {
            let products = catalog.products(force).await;
            println!("{} products", products.len());
            if let Some(issue) = catalog.last_issue().await {
                println!("last issue: {issue}");
            }
        }
        Commands::Show {
            brand,
            color,
            size,
            length,
            price_range,
            json,
        } => {
            let selection = FilterSelection::from_csv(
                brand.as_deref(),
                color.as_deref(),
                size.as_deref(),
                length.as_deref(),
                price_range.as_deref(),
            );
            let products = catalog.products(false).await;
            let filtered = filter::apply(&products, &selection);
            if json {
                println!("{}", serde_json::to_string_pretty(&filtered)?);
            } else {
                for p in &filtered {
                    print_line(p);
                }
                println!("{} / {} products", filtered.len(), products.len());
            }
            if let Some(issue) = catalog.last_issue().await {
                eprintln!("last issue: {issue}");
            }
        }
    }

    Ok(())
}
