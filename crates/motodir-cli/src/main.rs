use std::time::Duration;

use clap::{Parser, Subcommand};

use motodir_core::Country;

#[derive(Debug, Parser)]
#[command(name = "motodir-cli")]
#[command(about = "motodir command line interface")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Import repair shops from OpenStreetMap.
    ///
    /// With no arguments every EU country is walked; otherwise only the
    /// given ISO codes (e.g. `motodir-cli import DE FR IT`). Unknown codes
    /// are ignored.
    Import {
        /// ISO 3166-1 alpha-2 country codes to import.
        countries: Vec<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = motodir_core::load_app_config()?;

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .or_else(|_| tracing_subscriber::EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    match cli.command {
        Commands::Import { countries } => run_import(&config, &countries).await,
    }
}

async fn run_import(config: &motodir_core::AppConfig, codes: &[String]) -> anyhow::Result<()> {
    let countries = if codes.is_empty() {
        Country::ALL.to_vec()
    } else {
        let countries = Country::parse_many(codes);
        if countries.is_empty() {
            anyhow::bail!(
                "no valid country codes in {codes:?}; use ISO 3166-1 alpha-2 codes (e.g. DE, FR, IT)"
            );
        }
        countries
    };

    let pool_config = motodir_db::PoolConfig::from_app_config(config);
    let pool = motodir_db::connect_pool(&config.database_url, pool_config).await?;
    motodir_db::run_migrations(&pool).await?;

    let client = motodir_osm::OverpassClient::with_endpoint(
        &config.overpass_url,
        config.overpass_timeout_secs,
        &config.overpass_user_agent,
    )?;

    tracing::info!(countries = countries.len(), "starting OSM import");
    let summary = motodir_osm::run_extraction(
        &client,
        &pool,
        &countries,
        Duration::from_millis(config.import_delay_ms),
    )
    .await;

    println!(
        "imported {} new shops across {} countries ({} duplicates skipped)",
        summary.total_imported, summary.countries_processed, summary.duplicates_skipped
    );
    for error in &summary.errors {
        eprintln!("failed: {error}");
    }

    if summary.errors.len() == summary.countries_processed && summary.countries_processed > 0 {
        anyhow::bail!("every country failed to import");
    }

    Ok(())
}
