//! Orchestration for scrape and deep-scan runs, shared by the HTTP
//! handlers and the CLI.

use std::fs;
use std::path::Path;

use metrics::counter;
use tracing::{info, instrument};

use crate::aggregator::SearchAggregator;
use crate::error::{Result, ScraperError};
use crate::shaper;
use crate::types::{DeepScanOutcome, ScrapeOutcome, ScrapeRunRecord};

/// Run one full category scrape: gather every keyword variant, dedup,
/// shape, and cap the output. The caller has already validated the
/// category and limit.
#[instrument(skip(aggregator))]
pub async fn run_category_scrape(
    aggregator: &SearchAggregator,
    category: &str,
    underperforming_only: bool,
    limit: usize,
) -> Result<ScrapeOutcome> {
    info!("Starting scrape for category {}", category);

    let gathered = match aggregator.gather(category).await {
        Ok(gathered) => gathered,
        Err(e) => {
            counter!("playstore_scrapes_total", "result" => "error").increment(1);
            return Err(e);
        }
    };

    let apps = shaper::shape_category(&gathered.deduped, underperforming_only, limit);
    counter!("playstore_scrapes_total", "result" => "success").increment(1);

    Ok(ScrapeOutcome {
        category: category.to_string(),
        total_raw_collected: gathered.raw.len(),
        total_unique_after_dedup: gathered.deduped.len(),
        total_returned: apps.len(),
        apps,
    })
}

/// Run one deep scan: a single broad search filtered down to the
/// 3.0..4.0 rating band, worst apps first.
#[instrument(skip(aggregator))]
pub async fn run_deep_scan(
    aggregator: &SearchAggregator,
    keyword: &str,
) -> Result<DeepScanOutcome> {
    let keyword = keyword.trim();
    if keyword.is_empty() {
        return Err(ScraperError::EmptyKeyword);
    }

    let records = match aggregator.broad_search(keyword).await {
        Ok(records) => records,
        Err(e) => {
            counter!("playstore_deep_scans_total", "result" => "error").increment(1);
            return Err(e);
        }
    };
    if records.is_empty() {
        counter!("playstore_deep_scans_total", "result" => "no_results").increment(1);
        return Err(ScraperError::NoResults {
            keyword: keyword.to_string(),
        });
    }

    let apps = shaper::shape_deep_scan(&records);
    counter!("playstore_deep_scans_total", "result" => "success").increment(1);
    info!(
        "Deep scan for '{}' matched {} of {} scanned apps",
        keyword,
        apps.len(),
        records.len()
    );

    Ok(DeepScanOutcome {
        keyword_searched: keyword.to_string(),
        total_apps_scanned: records.len(),
        low_rated_apps_count: apps.len(),
        apps,
    })
}

/// Persist a scrape outcome as a timestamped run artifact under
/// `output_dir`. Returns the path written.
pub fn persist_run(outcome: &ScrapeOutcome, output_dir: &str) -> Result<String> {
    fs::create_dir_all(output_dir)?;

    let record = ScrapeRunRecord::new(outcome.clone());
    let timestamp = record.scraped_at.format("%Y%m%d_%H%M%S");
    let filename = format!("{}_{timestamp}.json", outcome.category);
    let filepath = Path::new(output_dir).join(&filename);

    let json_content = serde_json::to_string_pretty(&record)?;
    fs::write(&filepath, json_content)?;

    Ok(filepath.to_string_lossy().to_string())
}
