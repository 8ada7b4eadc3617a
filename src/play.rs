use std::collections::HashSet;
use std::time::Duration;

use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{Html, Selector};
use serde_json::{Map, Value};
use tracing::{debug, instrument, warn};

use crate::config::SearchSettings;
use crate::constants;
use crate::error::{Result, ScraperError};
use crate::provider::{SearchProvider, SearchQuery};

// Search results are embedded in the page as AF_initDataCallback blocks,
// one per script tag. The data payload runs up to the sideChannel marker.
static DATASET_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)AF_initDataCallback\(\{key:\s*'ds:\d+'.*?data:(?P<data>.*?), sideChannel:")
        .unwrap()
});

// An app card is an array carrying its identifier at [12][0] and title at
// [2]; the remaining fields sit at these fixed positions.
const IDX_TITLE: &[usize] = &[2];
const IDX_DEVELOPER: &[usize] = &[4, 0, 0, 0];
const IDX_SUMMARY: &[usize] = &[4, 1, 1, 1, 1];
const IDX_SCORE: &[usize] = &[6, 0, 2, 1, 1];
const IDX_URL_PATH: &[usize] = &[9, 4, 2];
const IDX_APP_ID: &[usize] = &[12, 0];

const MAX_SCAN_DEPTH: usize = 32;

/// Live search client for the Play Store web frontend.
///
/// One GET per keyword; results come back inside the page's embedded
/// datasets rather than a JSON endpoint, so this pulls them out of the
/// script tags and reshapes each card into a flat record.
pub struct PlaySearchClient {
    client: reqwest::Client,
}

impl PlaySearchClient {
    pub fn new(settings: &SearchSettings) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(constants::SEARCH_USER_AGENT)
            .timeout(Duration::from_secs(settings.timeout_seconds))
            .build()?;
        Ok(Self { client })
    }
}

#[async_trait::async_trait]
impl SearchProvider for PlaySearchClient {
    #[instrument(skip(self))]
    async fn search(&self, query: &SearchQuery) -> Result<Value> {
        debug!("Fetching store search page for '{}'", query.query);
        let response = self
            .client
            .get(constants::PLAY_SEARCH_URL)
            .query(&[
                ("q", query.query.as_str()),
                ("c", "apps"),
                ("hl", query.lang.as_str()),
                ("gl", query.country.as_str()),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ScraperError::Provider {
                message: format!(
                    "search for '{}' returned HTTP {}",
                    query.query,
                    status.as_u16()
                ),
            });
        }

        let body = response.text().await?;
        let records = extract_search_records(&body, query.n_hits)?;
        debug!("Extracted {} records for '{}'", records.len(), query.query);
        Ok(Value::Array(records))
    }
}

/// Pull app records out of a search page body, capped at `n_hits`.
///
/// A page carrying no embedded datasets at all is treated as a provider
/// failure (layout change or consent interstitial); datasets that simply
/// contain no app cards produce an empty list.
fn extract_search_records(body: &str, n_hits: usize) -> Result<Vec<Value>> {
    let document = Html::parse_document(body);
    let selector = Selector::parse("script").unwrap();

    let mut records = Vec::new();
    let mut seen_ids = HashSet::new();
    let mut found_dataset = false;

    for element in document.select(&selector) {
        let text = element.inner_html();
        if !text.contains("AF_initDataCallback") {
            continue;
        }
        found_dataset = true;

        let Some(caps) = DATASET_RE.captures(&text) else {
            continue;
        };
        match serde_json::from_str::<Value>(&caps["data"]) {
            Ok(dataset) => collect_app_records(&dataset, 0, &mut records, &mut seen_ids),
            Err(e) => debug!("Skipping dataset with unparseable payload: {}", e),
        }
        if records.len() >= n_hits {
            break;
        }
    }

    if !found_dataset {
        warn!("No embedded datasets found on search page");
        return Err(ScraperError::Provider {
            message: "no embedded datasets found on search page".to_string(),
        });
    }

    records.truncate(n_hits);
    Ok(records)
}

/// Walk a dataset tree collecting app cards. Cards do not nest, so a
/// matched node is not descended into; datasets can repeat a card, hence
/// the seen set.
fn collect_app_records(
    node: &Value,
    depth: usize,
    records: &mut Vec<Value>,
    seen_ids: &mut HashSet<String>,
) {
    if depth > MAX_SCAN_DEPTH {
        return;
    }
    let Value::Array(items) = node else {
        return;
    };

    if let Some((app_id, record)) = map_app_card(node) {
        if seen_ids.insert(app_id) {
            records.push(record);
        }
        return;
    }

    for item in items {
        collect_app_records(item, depth + 1, records, seen_ids);
    }
}

/// Reshape one card array into a flat record, keyed the way downstream
/// shaping expects. Returns None unless both identifier and title are
/// present, which is what distinguishes a card from the surrounding arrays.
fn map_app_card(node: &Value) -> Option<(String, Value)> {
    let app_id = pluck(node, IDX_APP_ID)?
        .as_str()
        .filter(|s| !s.is_empty())?
        .to_string();
    let title = pluck(node, IDX_TITLE)?.as_str()?.to_string();

    let mut record = Map::new();
    record.insert("appId".to_string(), Value::String(app_id.clone()));
    record.insert("title".to_string(), Value::String(title));

    if let Some(score) = pluck(node, IDX_SCORE).and_then(Value::as_f64) {
        if let Some(number) = serde_json::Number::from_f64(score) {
            record.insert("score".to_string(), Value::Number(number));
        }
    }
    if let Some(developer) = pluck(node, IDX_DEVELOPER).and_then(Value::as_str) {
        record.insert("developer".to_string(), Value::String(developer.to_string()));
    }
    if let Some(summary) = pluck(node, IDX_SUMMARY).and_then(Value::as_str) {
        record.insert("summary".to_string(), Value::String(summary.to_string()));
    }

    let url = pluck(node, IDX_URL_PATH)
        .and_then(Value::as_str)
        .map(|path| format!("https://play.google.com{path}"))
        .unwrap_or_else(|| constants::play_details_url(&app_id));
    record.insert("url".to_string(), Value::String(url));

    Some((app_id, Value::Object(record)))
}

fn pluck<'a>(value: &'a Value, path: &[usize]) -> Option<&'a Value> {
    path.iter().try_fold(value, |node, &idx| node.get(idx))
}
