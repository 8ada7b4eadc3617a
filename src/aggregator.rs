use std::collections::HashSet;
use std::sync::Arc;
use std::time::Instant;

use metrics::{counter, histogram};
use tracing::{debug, info, instrument, warn};

use crate::config::SearchSettings;
use crate::error::{Result, ScraperError};
use crate::provider::{flatten_search_payload, SearchProvider, SearchQuery};
use crate::registry::CategoryRegistry;
use crate::types::RawAppData;

/// Outcome of one keyword-variant search. Failures are absorbed here so a
/// flaky variant never takes down the whole gather.
#[derive(Debug)]
pub enum VariantOutcome {
    Fetched { keyword: String, records: Vec<RawAppData> },
    Failed { keyword: String, reason: String },
}

/// Everything one gather produced: the full raw list across all variants
/// and the deduplicated list in first-seen order.
#[derive(Debug, Default)]
pub struct GatherOutcome {
    pub raw: Vec<RawAppData>,
    pub deduped: Vec<RawAppData>,
}

/// Runs every keyword variant of a category against the search provider
/// and merges the results by app identifier.
pub struct SearchAggregator {
    provider: Arc<dyn SearchProvider>,
    registry: Arc<CategoryRegistry>,
    settings: SearchSettings,
}

impl SearchAggregator {
    pub fn new(
        provider: Arc<dyn SearchProvider>,
        registry: Arc<CategoryRegistry>,
        settings: SearchSettings,
    ) -> Self {
        Self {
            provider,
            registry,
            settings,
        }
    }

    /// Search every keyword variant for a category and merge the results.
    ///
    /// Records without a non-empty string "appId" still count toward the
    /// raw total but never reach the deduplicated list. The first record
    /// seen for an identifier wins; later duplicates are dropped whole.
    #[instrument(skip(self))]
    pub async fn gather(&self, category: &str) -> Result<GatherOutcome> {
        let variants = self
            .registry
            .keyword_variants(category)
            .ok_or_else(|| ScraperError::CategoryNotFound {
                category: category.to_string(),
            })?;

        let gather_start = Instant::now();
        let mut outcome = GatherOutcome::default();
        let mut seen_ids: HashSet<String> = HashSet::new();

        for keyword in variants {
            match self.run_variant(keyword).await {
                VariantOutcome::Fetched { keyword, records } => {
                    counter!("playstore_variant_searches_total", "category" => category.to_string(), "result" => "success")
                        .increment(1);
                    debug!("Keyword '{}' returned {} records", keyword, records.len());
                    for record in records {
                        if let Some(app_id) = record
                            .get("appId")
                            .and_then(|v| v.as_str())
                            .filter(|s| !s.is_empty())
                        {
                            if !seen_ids.contains(app_id) {
                                seen_ids.insert(app_id.to_string());
                                outcome.deduped.push(record.clone());
                            }
                        }
                        outcome.raw.push(record);
                    }
                }
                VariantOutcome::Failed { keyword, reason } => {
                    counter!("playstore_variant_searches_total", "category" => category.to_string(), "result" => "error")
                        .increment(1);
                    warn!("Keyword '{}' failed, continuing without it: {}", keyword, reason);
                }
            }
        }

        histogram!("playstore_gather_duration_seconds", "category" => category.to_string())
            .record(gather_start.elapsed().as_secs_f64());
        counter!("playstore_raw_records_total", "category" => category.to_string())
            .increment(outcome.raw.len() as u64);
        counter!("playstore_unique_apps_total", "category" => category.to_string())
            .increment(outcome.deduped.len() as u64);

        info!(
            "Gathered {} raw records, {} unique apps for category {}",
            outcome.raw.len(),
            outcome.deduped.len(),
            category
        );
        Ok(outcome)
    }

    /// Run the single broad search behind a deep scan. Unlike gather, a
    /// provider failure here is fatal: there are no other variants to
    /// fall back on.
    #[instrument(skip(self))]
    pub async fn broad_search(&self, keyword: &str) -> Result<Vec<RawAppData>> {
        let query = SearchQuery {
            query: keyword.to_string(),
            n_hits: self.settings.deep_scan_hits,
            lang: self.settings.lang.clone(),
            country: self.settings.country.clone(),
        };
        let payload = self.provider.search(&query).await?;
        Ok(flatten_search_payload(payload))
    }

    async fn run_variant(&self, keyword: &str) -> VariantOutcome {
        let query = SearchQuery {
            query: keyword.to_string(),
            n_hits: self.settings.per_keyword_hits,
            lang: self.settings.lang.clone(),
            country: self.settings.country.clone(),
        };
        match self.provider.search(&query).await {
            Ok(payload) => VariantOutcome::Fetched {
                keyword: keyword.to_string(),
                records: flatten_search_payload(payload),
            },
            Err(e) => VariantOutcome::Failed {
                keyword: keyword.to_string(),
                reason: e.to_string(),
            },
        }
    }
}
