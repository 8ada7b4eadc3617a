/// Fixed parameters shared across the scrape pipeline and API layer
/// These constants mirror the defaults documented in config.toml

// Play Store endpoints
pub const PLAY_SEARCH_URL: &str = "https://play.google.com/store/search";
pub const PLAY_DETAILS_URL_PREFIX: &str = "https://play.google.com/store/apps/details?id=";

// Browser-like user agent; the store serves a stripped page to unknown clients
pub const SEARCH_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36";

// Search defaults (overridable via config.toml)
pub const DEFAULT_COUNTRY: &str = "us";
pub const DEFAULT_LANG: &str = "en";
pub const PER_KEYWORD_HITS: usize = 200;
pub const DEEP_SCAN_HITS: usize = 500;
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 30;

// Bounds for the `limit` parameter on category scrapes
pub const MIN_LIMIT: usize = 1;
pub const MAX_LIMIT: usize = 1000;
pub const DEFAULT_LIMIT: usize = 200;

// An app counts as underperforming when its rating sits below this
pub const UNDERPERFORMING_RATING_CUTOFF: f64 = 4.0;

// Deep scans keep ratings in [3.0, 4.0). A score of exactly 0 means
// "no ratings yet" and is excluded along with unrated apps.
pub const DEEP_SCAN_MIN_SCORE: f64 = 3.0;
pub const DEEP_SCAN_MAX_SCORE: f64 = 4.0;

// Placeholder for fields the store did not return
pub const PLACEHOLDER: &str = "N/A";

// Service identity reported by `/` and `/health`
pub const API_TITLE: &str = "US Play Store Scraper API";

/// Build the canonical detail-page URL for an app identifier
pub fn play_details_url(app_id: &str) -> String {
    format!("{PLAY_DETAILS_URL_PREFIX}{app_id}")
}
