use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Raw app record as returned by the search provider
pub type RawAppData = serde_json::Value;

/// Cleaned app payload returned by category scrapes
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppInfo {
    pub name: String,
    pub rating: Option<f64>,
    pub reviews: Option<i64>,
    pub min_installs: Option<i64>,
    pub url: String,
}

/// Full category scrape result with collection counters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScrapeOutcome {
    pub category: String,
    pub total_raw_collected: usize,
    pub total_unique_after_dedup: usize,
    pub total_returned: usize,
    pub apps: Vec<AppInfo>,
}

/// One app in a deep-scan report; the string fields fall back to "N/A"
/// when the store omits them
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeepScanApp {
    pub title: String,
    pub app_id: String,
    pub score: f64,
    pub developer: String,
    pub description: Option<String>,
    pub installs: Option<String>,
}

/// Deep-scan result for one keyword, apps ordered worst-rated first
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeepScanOutcome {
    pub keyword_searched: String,
    pub total_apps_scanned: usize,
    pub low_rated_apps_count: usize,
    pub apps: Vec<DeepScanApp>,
}

/// One CLI scrape run as persisted to disk
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScrapeRunRecord {
    pub run_id: Uuid,
    pub scraped_at: DateTime<Utc>,
    pub outcome: ScrapeOutcome,
}

impl ScrapeRunRecord {
    pub fn new(outcome: ScrapeOutcome) -> Self {
        ScrapeRunRecord {
            run_id: Uuid::new_v4(),
            scraped_at: Utc::now(),
            outcome,
        }
    }
}
