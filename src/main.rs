use clap::{Parser, Subcommand};
use std::sync::Arc;
use tracing::error;

use playstore_scraper::aggregator::SearchAggregator;
use playstore_scraper::config::Config;
use playstore_scraper::constants;
use playstore_scraper::observability::{logging, metrics};
use playstore_scraper::pipeline;
use playstore_scraper::play::PlaySearchClient;
use playstore_scraper::provider::SearchProvider;
use playstore_scraper::registry::{normalize_category_key, CategoryRegistry};
use playstore_scraper::server::{self, AppState};

#[derive(Parser)]
#[command(name = "playstore_scraper")]
#[command(about = "US Play Store category scraper")]
#[command(version = "0.1.0")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP API server
    Serve {
        /// Port to bind, overriding config.toml
        #[arg(long)]
        port: Option<u16>,
    },
    /// Scrape one category and write a run artifact to the output directory
    Scrape {
        /// Category key, e.g. action or productivity
        category: String,
        /// Maximum apps in the output
        #[arg(long, default_value_t = constants::DEFAULT_LIMIT)]
        limit: usize,
        /// Keep only apps rated below 4.0
        #[arg(long)]
        underperforming_only: bool,
        /// Directory for run artifacts
        #[arg(long, default_value = "output")]
        output_dir: String,
    },
    /// Search one keyword broadly and report apps rated 3.0 to 4.0
    DeepScan {
        /// Keyword to search
        keyword: String,
    },
    /// List every supported category
    Categories,
}

async fn run_scrape(
    aggregator: &SearchAggregator,
    registry: &CategoryRegistry,
    category_name: &str,
    limit: usize,
    underperforming_only: bool,
    output_dir: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let category = normalize_category_key(category_name);
    if !registry.contains(&category) {
        println!("⚠️  Unknown category: {}", category_name);
        let mut suggestions = registry.suggestions_for(&category);
        if suggestions.is_empty() {
            suggestions = registry.first_keys(10);
        }
        println!("   Try one of: {}", suggestions.join(", "));
        return Ok(());
    }

    let limit = limit.clamp(constants::MIN_LIMIT, constants::MAX_LIMIT);
    println!("📡 Scraping category {}...", category);

    match pipeline::run_category_scrape(aggregator, &category, underperforming_only, limit).await {
        Ok(outcome) => {
            println!("\n📊 Scrape results for {}:", outcome.category);
            println!("   Raw collected: {}", outcome.total_raw_collected);
            println!("   Unique after dedup: {}", outcome.total_unique_after_dedup);
            println!("   Returned: {}", outcome.total_returned);

            let output_file = pipeline::persist_run(&outcome, output_dir)?;
            println!("💾 Saved run to {}", output_file);
        }
        Err(e) => {
            error!("Scrape failed: {}", e);
            println!("❌ Scrape failed: {}", e);
        }
    }
    Ok(())
}

async fn run_deep_scan(
    aggregator: &SearchAggregator,
    keyword: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    println!("🔍 Deep scanning '{}'...", keyword);

    match pipeline::run_deep_scan(aggregator, keyword).await {
        Ok(outcome) => {
            println!(
                "\n📊 Scanned {} apps, {} rated 3.0 to 4.0:",
                outcome.total_apps_scanned, outcome.low_rated_apps_count
            );
            for app in &outcome.apps {
                println!("   {:.1}  {}  ({})", app.score, app.title, app.app_id);
            }
        }
        Err(e) => {
            error!("Deep scan failed: {}", e);
            println!("❌ Deep scan failed: {}", e);
        }
    }
    Ok(())
}

fn print_categories(registry: &CategoryRegistry) {
    println!("📂 {} supported categories\n", registry.len());
    println!("Apps:");
    for key in registry.app_categories() {
        println!("   {:<18} {}", key, registry.resolve(key).unwrap_or_default());
    }
    println!("\nGames:");
    for key in registry.game_categories() {
        println!("   {:<18} {}", key, registry.resolve(key).unwrap_or_default());
    }
    println!("\nUse a category name with: playstore_scraper scrape <category>");
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();
    logging::init_logging();
    metrics::init_metrics();

    let cli = Cli::parse();
    let config = Config::load_or_default();

    let registry = Arc::new(CategoryRegistry::bundled());
    let provider: Arc<dyn SearchProvider> = Arc::new(PlaySearchClient::new(&config.search)?);
    let aggregator = Arc::new(SearchAggregator::new(
        provider,
        Arc::clone(&registry),
        config.search.clone(),
    ));

    match cli.command {
        Commands::Serve { port } => {
            let port = port.unwrap_or(config.server.port);
            let state = AppState {
                registry,
                aggregator,
            };
            server::start_server(state, &config.server.host, port).await?;
        }
        Commands::Scrape {
            category,
            limit,
            underperforming_only,
            output_dir,
        } => {
            run_scrape(
                &aggregator,
                &registry,
                &category,
                limit,
                underperforming_only,
                &output_dir,
            )
            .await?;
        }
        Commands::DeepScan { keyword } => {
            run_deep_scan(&aggregator, &keyword).await?;
        }
        Commands::Categories => {
            print_categories(&registry);
        }
    }
    Ok(())
}
