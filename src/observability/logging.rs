use std::fs;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Wire up console output plus a daily-rolling JSON log file.
///
/// RUST_LOG wins when set; otherwise the crate logs at info. The file
/// layer under logs/ is structured JSON, the console layer stays
/// human-readable.
pub fn init_logging() {
    let _ = fs::create_dir_all("logs");

    let file_appender = tracing_appender::rolling::daily("logs", "playstore_scraper.log");
    let (file_writer, guard) = tracing_appender::non_blocking(file_appender);

    let file_layer = fmt::layer().json().with_writer(file_writer);
    let console_layer = fmt::layer().with_target(true).with_writer(std::io::stdout);

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("playstore_scraper=info"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .with(console_layer)
        .init();

    // The guard must outlive main or buffered lines are lost on exit
    std::mem::forget(guard);
}
