//! The extraction run: one country at a time, fetch → normalize → insert.

use std::time::Duration;

use serde::Serialize;
use sqlx::PgPool;
use thiserror::Error;

use motodir_core::Country;

use crate::client::OverpassClient;
use crate::error::OsmError;
use crate::normalize::normalize_element;
use crate::query::build_area_query;

/// A failure scoped to one country's extraction. Both variants abort the
/// country and land in the run's error list; the run itself continues.
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error(transparent)]
    Overpass(#[from] OsmError),

    #[error("database error: {0}")]
    Db(#[from] sqlx::Error),
}

/// Aggregate outcome of one extraction run.
#[derive(Debug, Default, Serialize)]
pub struct ExtractionSummary {
    pub total_imported: u64,
    pub countries_processed: usize,
    /// One `"<country>: <message>"` entry per failed country.
    pub errors: Vec<String>,
    /// Elements whose `osm_id` was already persisted.
    pub duplicates_skipped: u64,
}

#[derive(Debug, Default)]
struct CountryStats {
    fetched: usize,
    imported: u64,
    duplicates: u64,
}

/// Run the extraction over `countries`, strictly sequentially.
///
/// Each country is queried, its elements normalized and inserted, and any
/// per-country failure recorded before moving on — a broken country never
/// aborts the run. Consecutive countries are separated by `delay` to bound
/// the request rate against Overpass. The summary always reports
/// `countries_processed` as the length of the input list.
pub async fn run_extraction(
    client: &OverpassClient,
    pool: &PgPool,
    countries: &[Country],
    delay: Duration,
) -> ExtractionSummary {
    let mut summary = ExtractionSummary {
        countries_processed: countries.len(),
        ..ExtractionSummary::default()
    };

    for (idx, country) in countries.iter().enumerate() {
        match extract_country(client, pool, *country).await {
            Ok(stats) => {
                tracing::info!(
                    country = country.name(),
                    fetched = stats.fetched,
                    imported = stats.imported,
                    duplicates = stats.duplicates,
                    "country extraction finished"
                );
                summary.total_imported += stats.imported;
                summary.duplicates_skipped += stats.duplicates;
            }
            Err(e) => {
                tracing::warn!(country = country.name(), error = %e, "country extraction failed");
                summary.errors.push(format!("{}: {e}", country.name()));
            }
        }

        if idx + 1 < countries.len() {
            tokio::time::sleep(delay).await;
        }
    }

    summary
}

async fn extract_country(
    client: &OverpassClient,
    pool: &PgPool,
    country: Country,
) -> Result<CountryStats, ExtractError> {
    let query = build_area_query(country);
    let elements = client.fetch_elements(&query).await?;

    let mut stats = CountryStats {
        fetched: elements.len(),
        ..CountryStats::default()
    };

    for element in &elements {
        let Some(shop) = normalize_element(element, country) else {
            // Missing name or coordinates: not an error, just unusable data.
            continue;
        };

        if motodir_db::insert_shop_if_new(pool, &shop).await? {
            tracing::debug!(name = %shop.name, osm_id = %shop.osm_id, "imported shop");
            stats.imported += 1;
        } else {
            stats.duplicates += 1;
        }
    }

    Ok(stats)
}
