//! Output shaping: raw provider records become the cleaned payloads the
//! API returns. All field access here is defensive; records arrive in
//! whatever shape the provider produced them.

use std::cmp::Ordering;

use serde_json::Value;
use tracing::debug;

use crate::constants;
use crate::numeric::normalize_count;
use crate::types::{AppInfo, DeepScanApp, RawAppData};

/// Convert one raw record into the cleaned category-scrape shape.
///
/// Returns None when the record carries neither a URL nor an identifier
/// to rebuild one from; such records are dropped from output.
pub fn to_app_info(record: &RawAppData) -> Option<AppInfo> {
    let url = match record.get("url").and_then(Value::as_str) {
        Some(url) if !url.is_empty() => url.to_string(),
        _ => {
            let app_id = record
                .get("appId")
                .and_then(Value::as_str)
                .filter(|s| !s.is_empty())?;
            constants::play_details_url(app_id)
        }
    };

    Some(AppInfo {
        name: record
            .get("title")
            .and_then(Value::as_str)
            .unwrap_or(constants::PLACEHOLDER)
            .to_string(),
        rating: record.get("score").and_then(Value::as_f64),
        reviews: record.get("reviews").and_then(normalize_count),
        min_installs: record.get("installs").and_then(normalize_count),
        url,
    })
}

/// Apply the optional underperforming filter, convert, and cap the output.
///
/// With the filter on, only apps whose rating is present and below the
/// cutoff survive. Conversion stops once `limit` apps are produced.
pub fn shape_category(
    deduped: &[RawAppData],
    underperforming_only: bool,
    limit: usize,
) -> Vec<AppInfo> {
    let mut apps = Vec::new();
    for record in deduped {
        if underperforming_only {
            match record.get("score").and_then(Value::as_f64) {
                Some(score) if score < constants::UNDERPERFORMING_RATING_CUTOFF => {}
                _ => continue,
            }
        }
        let Some(info) = to_app_info(record) else {
            debug!("Dropping record without identifier or URL");
            continue;
        };
        apps.push(info);
        if apps.len() >= limit {
            break;
        }
    }
    apps
}

/// Keep apps rated inside the deep-scan band and order them worst first.
///
/// Unrated records and records scored exactly 0 (the store's "no ratings
/// yet") are excluded. The sort is stable, so equal scores keep their
/// discovery order.
pub fn shape_deep_scan(records: &[RawAppData]) -> Vec<DeepScanApp> {
    let mut apps: Vec<DeepScanApp> = records
        .iter()
        .filter_map(|record| {
            let score = record.get("score").and_then(Value::as_f64)?;
            if score == 0.0
                || score < constants::DEEP_SCAN_MIN_SCORE
                || score >= constants::DEEP_SCAN_MAX_SCORE
            {
                return None;
            }
            Some(to_deep_scan_app(record, score))
        })
        .collect();

    apps.sort_by(|a, b| a.score.partial_cmp(&b.score).unwrap_or(Ordering::Equal));
    apps
}

fn to_deep_scan_app(record: &RawAppData, score: f64) -> DeepScanApp {
    // "summary" wins over "description"; the fallback applies only when the
    // summary key is absent entirely, not when it holds null.
    let description = match record.get("summary") {
        Some(value) => value.as_str().map(str::to_string),
        None => record
            .get("description")
            .and_then(Value::as_str)
            .map(str::to_string),
    };
    // Installs stay as raw display text here; a missing key becomes the
    // placeholder, an explicit null stays null.
    let installs = match record.get("installs") {
        Some(value) => value.as_str().map(str::to_string),
        None => Some(constants::PLACEHOLDER.to_string()),
    };

    DeepScanApp {
        title: string_or_placeholder(record, "title"),
        app_id: string_or_placeholder(record, "appId"),
        score,
        developer: string_or_placeholder(record, "developer"),
        description,
        installs,
    }
}

fn string_or_placeholder(record: &RawAppData, key: &str) -> String {
    record
        .get(key)
        .and_then(Value::as_str)
        .unwrap_or(constants::PLACEHOLDER)
        .to_string()
}
