//! Prometheus metrics wiring.
//!
//! The recorder installs once at startup; every counter and histogram the
//! pipeline emits is described here so the exposition carries help text.

use std::sync::OnceLock;

use metrics::{describe_counter, describe_histogram};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use tracing::warn;

static PROMETHEUS_HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();

/// Install the global Prometheus recorder. Calling this twice is
/// harmless; only the first install sticks.
pub fn init_metrics() {
    if PROMETHEUS_HANDLE.get().is_some() {
        return;
    }
    match PrometheusBuilder::new().install_recorder() {
        Ok(handle) => {
            describe_metrics();
            let _ = PROMETHEUS_HANDLE.set(handle);
        }
        Err(e) => warn!("Failed to install Prometheus recorder: {}", e),
    }
}

/// Current exposition text for the /metrics route. Empty when no
/// recorder is installed, as in tests.
pub fn render() -> String {
    PROMETHEUS_HANDLE
        .get()
        .map(|handle| handle.render())
        .unwrap_or_default()
}

fn describe_metrics() {
    describe_counter!(
        "playstore_variant_searches_total",
        "Keyword-variant searches by category and result"
    );
    describe_counter!(
        "playstore_raw_records_total",
        "Raw records collected across all keyword variants of a category"
    );
    describe_counter!(
        "playstore_unique_apps_total",
        "Unique apps remaining after identifier dedup"
    );
    describe_counter!("playstore_scrapes_total", "Category scrape runs by result");
    describe_counter!("playstore_deep_scans_total", "Deep-scan runs by result");
    describe_histogram!(
        "playstore_gather_duration_seconds",
        "Wall time of one full category gather"
    );
}
