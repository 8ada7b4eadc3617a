use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use anyhow::Result;
use async_trait::async_trait;
use serde_json::{json, Value};
use tempfile::tempdir;

use playstore_scraper::aggregator::SearchAggregator;
use playstore_scraper::config::SearchSettings;
use playstore_scraper::error::ScraperError;
use playstore_scraper::pipeline;
use playstore_scraper::provider::{SearchProvider, SearchQuery};
use playstore_scraper::registry::CategoryRegistry;
use playstore_scraper::types::{AppInfo, ScrapeOutcome, ScrapeRunRecord};

/// Provider fed from a canned keyword -> payload map, recording every
/// query it sees. Keywords in `fail_on` error out; unknown keywords
/// return an empty list.
struct CannedProvider {
    responses: HashMap<String, Value>,
    fail_on: Vec<String>,
    calls: Mutex<Vec<String>>,
}

impl CannedProvider {
    fn new() -> Self {
        CannedProvider {
            responses: HashMap::new(),
            fail_on: Vec::new(),
            calls: Mutex::new(Vec::new()),
        }
    }

    fn respond(mut self, keyword: &str, payload: Value) -> Self {
        self.responses.insert(keyword.to_string(), payload);
        self
    }

    fn fail_on(mut self, keyword: &str) -> Self {
        self.fail_on.push(keyword.to_string());
        self
    }
}

#[async_trait]
impl SearchProvider for CannedProvider {
    async fn search(&self, query: &SearchQuery) -> playstore_scraper::error::Result<Value> {
        self.calls.lock().unwrap().push(query.query.clone());
        if self.fail_on.contains(&query.query) {
            return Err(ScraperError::Provider {
                message: "canned failure".to_string(),
            });
        }
        Ok(self
            .responses
            .get(&query.query)
            .cloned()
            .unwrap_or_else(|| json!([])))
    }
}

fn make_aggregator(provider: Arc<CannedProvider>) -> SearchAggregator {
    SearchAggregator::new(
        provider,
        Arc::new(CategoryRegistry::bundled()),
        SearchSettings::default(),
    )
}

fn app(id: &str, title: &str) -> Value {
    json!({"appId": id, "title": title, "score": 4.2})
}

#[tokio::test]
async fn test_gather_visits_every_variant_and_dedups_first_seen() -> Result<()> {
    let provider = Arc::new(
        CannedProvider::new()
            .respond(
                "puzzle games android",
                json!([app("com.a", "First Title"), app("com.b", "Beta")]),
            )
            .respond(
                "puzzle apps",
                json!([app("com.a", "Second Title"), app("com.c", "Gamma")]),
            ),
    );
    let aggregator = make_aggregator(Arc::clone(&provider));

    let outcome = aggregator.gather("puzzle").await?;

    assert_eq!(outcome.raw.len(), 4);
    assert_eq!(outcome.deduped.len(), 3);
    // The first record for com.a is the one that survives
    assert_eq!(outcome.deduped[0]["title"], "First Title");

    // All six keyword variants were searched, base phrase first
    let calls = provider.calls.lock().unwrap();
    assert_eq!(calls.len(), 6);
    assert_eq!(calls[0], "puzzle games android");
    assert!(calls.contains(&"puzzle app download".to_string()));
    Ok(())
}

#[tokio::test]
async fn test_gather_absorbs_failed_variants() -> Result<()> {
    let provider = Arc::new(
        CannedProvider::new()
            .fail_on("puzzle games android")
            .respond("puzzle apps", json!([app("com.a", "Alpha")])),
    );
    let aggregator = make_aggregator(Arc::clone(&provider));

    let outcome = aggregator.gather("puzzle").await?;

    assert_eq!(outcome.raw.len(), 1);
    assert_eq!(outcome.deduped.len(), 1);
    // The failure did not stop the remaining variants
    assert_eq!(provider.calls.lock().unwrap().len(), 6);
    Ok(())
}

#[tokio::test]
async fn test_gather_keeps_idless_records_out_of_dedup() -> Result<()> {
    let provider = Arc::new(CannedProvider::new().respond(
        "puzzle games android",
        json!([
            json!({"title": "No Id"}),
            app("com.a", "Alpha"),
            json!({"appId": "", "title": "Empty Id"}),
        ]),
    ));
    let aggregator = make_aggregator(provider);

    let outcome = aggregator.gather("puzzle").await?;

    assert_eq!(outcome.raw.len(), 3);
    assert_eq!(outcome.deduped.len(), 1);
    assert_eq!(outcome.deduped[0]["appId"], "com.a");
    Ok(())
}

#[tokio::test]
async fn test_gather_flattens_bag_and_bare_payloads() -> Result<()> {
    let provider = Arc::new(
        CannedProvider::new()
            .respond("puzzle games android", json!({"apps": [app("com.a", "Alpha")]}))
            .respond("puzzle apps", json!([app("com.b", "Beta")])),
    );
    let aggregator = make_aggregator(provider);

    let outcome = aggregator.gather("puzzle").await?;

    assert_eq!(outcome.deduped.len(), 2);
    Ok(())
}

#[tokio::test]
async fn test_gather_rejects_unknown_category() -> Result<()> {
    let aggregator = make_aggregator(Arc::new(CannedProvider::new()));

    let err = aggregator.gather("nonexistent").await.unwrap_err();
    assert!(matches!(err, ScraperError::CategoryNotFound { .. }));
    Ok(())
}

#[tokio::test]
async fn test_run_category_scrape_reports_counts_and_caps_output() -> Result<()> {
    let records: Vec<Value> = (0..5)
        .map(|i| app(&format!("com.app{i}"), &format!("App {i}")))
        .collect();
    let provider = Arc::new(CannedProvider::new().respond("puzzle games android", json!(records)));
    let aggregator = make_aggregator(provider);

    let outcome = pipeline::run_category_scrape(&aggregator, "puzzle", false, 2).await?;

    assert_eq!(outcome.category, "puzzle");
    assert_eq!(outcome.total_raw_collected, 5);
    assert_eq!(outcome.total_unique_after_dedup, 5);
    assert_eq!(outcome.total_returned, 2);
    assert_eq!(outcome.apps.len(), 2);
    assert_eq!(outcome.apps[0].name, "App 0");
    Ok(())
}

#[tokio::test]
async fn test_run_category_scrape_underperforming_only() -> Result<()> {
    let provider = Arc::new(CannedProvider::new().respond(
        "puzzle games android",
        json!([
            json!({"appId": "com.low", "title": "Low", "score": 3.0}),
            json!({"appId": "com.high", "title": "High", "score": 4.9}),
            json!({"appId": "com.unrated", "title": "Unrated"}),
        ]),
    ));
    let aggregator = make_aggregator(provider);

    let outcome = pipeline::run_category_scrape(&aggregator, "puzzle", true, 100).await?;

    assert_eq!(outcome.total_unique_after_dedup, 3);
    assert_eq!(outcome.total_returned, 1);
    assert_eq!(outcome.apps[0].name, "Low");
    Ok(())
}

#[tokio::test]
async fn test_run_deep_scan_trims_and_rejects_blank_keyword() -> Result<()> {
    let aggregator = make_aggregator(Arc::new(CannedProvider::new()));

    let err = pipeline::run_deep_scan(&aggregator, "   ").await.unwrap_err();
    assert!(matches!(err, ScraperError::EmptyKeyword));
    Ok(())
}

#[tokio::test]
async fn test_run_deep_scan_reports_missing_results() -> Result<()> {
    let aggregator = make_aggregator(Arc::new(CannedProvider::new()));

    let err = pipeline::run_deep_scan(&aggregator, "ghost").await.unwrap_err();
    match err {
        ScraperError::NoResults { keyword } => assert_eq!(keyword, "ghost"),
        other => panic!("expected NoResults, got {other:?}"),
    }
    Ok(())
}

#[tokio::test]
async fn test_run_deep_scan_searches_trimmed_keyword() -> Result<()> {
    let provider = Arc::new(CannedProvider::new().respond(
        "fitness tracker",
        json!([
            json!({"appId": "com.b", "title": "B", "score": 3.9}),
            json!({"appId": "com.a", "title": "A", "score": 3.1}),
            json!({"appId": "com.high", "title": "High", "score": 4.5}),
        ]),
    ));
    let aggregator = make_aggregator(Arc::clone(&provider));

    let outcome = pipeline::run_deep_scan(&aggregator, "  fitness tracker  ").await?;

    assert_eq!(outcome.keyword_searched, "fitness tracker");
    assert_eq!(outcome.total_apps_scanned, 3);
    assert_eq!(outcome.low_rated_apps_count, 2);
    assert_eq!(outcome.apps[0].app_id, "com.a");
    assert_eq!(outcome.apps[1].app_id, "com.b");
    assert_eq!(provider.calls.lock().unwrap()[0], "fitness tracker");
    Ok(())
}

#[tokio::test]
async fn test_persist_run_writes_timestamped_artifact() -> Result<()> {
    let temp_dir = tempdir()?;
    let output_dir = temp_dir.path().to_str().unwrap();

    let outcome = ScrapeOutcome {
        category: "puzzle".to_string(),
        total_raw_collected: 2,
        total_unique_after_dedup: 1,
        total_returned: 1,
        apps: vec![AppInfo {
            name: "Alpha".to_string(),
            rating: Some(4.2),
            reviews: Some(1200),
            min_installs: Some(10000),
            url: "https://play.google.com/store/apps/details?id=com.a".to_string(),
        }],
    };

    let path = pipeline::persist_run(&outcome, output_dir)?;
    assert!(path.contains("puzzle_"));

    let content = std::fs::read_to_string(&path)?;
    let record: ScrapeRunRecord = serde_json::from_str(&content)?;
    assert_eq!(record.outcome.category, "puzzle");
    assert_eq!(record.outcome.apps.len(), 1);
    Ok(())
}
