use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::{Method, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{error, info};

use crate::aggregator::SearchAggregator;
use crate::constants;
use crate::error::{Result, ScraperError};
use crate::observability::metrics;
use crate::pipeline;
use crate::registry::{normalize_category_key, CategoryRegistry};
use crate::types::{DeepScanOutcome, ScrapeOutcome};

/// Shared read-only state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub registry: Arc<CategoryRegistry>,
    pub aggregator: Arc<SearchAggregator>,
}

#[derive(Debug, Deserialize)]
pub struct ScrapeParams {
    pub limit: Option<usize>,
    #[serde(alias = "underperformingOnly")]
    pub underperforming_only: Option<bool>,
}

/// API-facing failure carrying an HTTP status and a structured JSON body.
#[derive(Debug)]
pub enum ApiError {
    UnknownCategory {
        category: String,
        suggestions: Vec<&'static str>,
        available: usize,
    },
    InvalidLimit {
        limit: usize,
    },
    EmptyKeyword,
    NoResults {
        keyword: String,
    },
    ScrapeFailed {
        category: String,
        details: String,
    },
    DeepScanFailed {
        keyword: String,
        details: String,
    },
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            ApiError::UnknownCategory {
                category,
                suggestions,
                available,
            } => (
                StatusCode::BAD_REQUEST,
                json!({
                    "error": format!("Category '{category}' not found"),
                    "suggested_categories": suggestions,
                    "available_categories_count": available,
                }),
            ),
            ApiError::InvalidLimit { limit } => (
                StatusCode::BAD_REQUEST,
                json!({
                    "error": format!(
                        "limit must be between {} and {}, got {}",
                        constants::MIN_LIMIT,
                        constants::MAX_LIMIT,
                        limit
                    ),
                }),
            ),
            ApiError::EmptyKeyword => (
                StatusCode::BAD_REQUEST,
                json!({ "error": "Keyword cannot be empty" }),
            ),
            ApiError::NoResults { keyword } => (
                StatusCode::NOT_FOUND,
                json!({
                    "error": format!("No results found for keyword '{keyword}'"),
                    "suggestion": "Try a different keyword or check spelling",
                }),
            ),
            ApiError::ScrapeFailed { category, details } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({
                    "error": "Failed to scrape category",
                    "details": details,
                    "category": category,
                }),
            ),
            ApiError::DeepScanFailed { keyword, details } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({
                    "error": "Failed to perform deep scan",
                    "details": details,
                    "keyword": keyword,
                }),
            ),
        };
        (status, Json(body)).into_response()
    }
}

async fn root() -> impl IntoResponse {
    Json(json!({
        "message": format!("Welcome to the {}", constants::API_TITLE),
        "description": "Scrape apps and games from the US Google Play Store",
        "endpoints": {
            "scrape": "/scrape/{category_name}",
            "deep_scan": "/deep-scan/{keyword}",
            "categories": "/categories",
            "health_check": "/health",
            "metrics": "/metrics",
        },
        "example_usage": "/scrape/action (action games) or /scrape/productivity (productivity apps)",
    }))
}

async fn health() -> impl IntoResponse {
    Json(json!({
        "status": "healthy",
        "service": constants::API_TITLE,
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

async fn list_categories(State(state): State<AppState>) -> impl IntoResponse {
    let app_categories = state.registry.app_categories();
    let game_categories = state.registry.game_categories();
    Json(json!({
        "total_categories": state.registry.len(),
        "app_categories": {
            "count": app_categories.len(),
            "categories": app_categories,
        },
        "game_categories": {
            "count": game_categories.len(),
            "categories": game_categories,
        },
        "usage": "Use these category names in /scrape/{category_name} endpoint",
    }))
}

async fn scrape_category(
    State(state): State<AppState>,
    Path(category_name): Path<String>,
    Query(params): Query<ScrapeParams>,
) -> std::result::Result<Json<ScrapeOutcome>, ApiError> {
    let limit = params.limit.unwrap_or(constants::DEFAULT_LIMIT);
    if !(constants::MIN_LIMIT..=constants::MAX_LIMIT).contains(&limit) {
        return Err(ApiError::InvalidLimit { limit });
    }
    let underperforming_only = params.underperforming_only.unwrap_or(false);

    let category = normalize_category_key(&category_name);
    if !state.registry.contains(&category) {
        let mut suggestions = state.registry.suggestions_for(&category);
        if suggestions.is_empty() {
            suggestions = state.registry.first_keys(10);
        }
        return Err(ApiError::UnknownCategory {
            category: category_name,
            suggestions,
            available: state.registry.len(),
        });
    }

    info!(
        "Scrape request for {} (limit {}, underperforming_only {})",
        category, limit, underperforming_only
    );
    let outcome =
        pipeline::run_category_scrape(&state.aggregator, &category, underperforming_only, limit)
            .await
            .map_err(|e| {
                error!("Scrape failed for category {}: {}", category, e);
                ApiError::ScrapeFailed {
                    category: category.clone(),
                    details: e.to_string(),
                }
            })?;

    Ok(Json(outcome))
}

async fn deep_scan(
    State(state): State<AppState>,
    Path(keyword): Path<String>,
) -> std::result::Result<Json<DeepScanOutcome>, ApiError> {
    match pipeline::run_deep_scan(&state.aggregator, &keyword).await {
        Ok(outcome) => Ok(Json(outcome)),
        Err(ScraperError::EmptyKeyword) => Err(ApiError::EmptyKeyword),
        Err(ScraperError::NoResults { keyword }) => Err(ApiError::NoResults { keyword }),
        Err(e) => {
            error!("Deep scan failed for '{}': {}", keyword, e);
            Err(ApiError::DeepScanFailed {
                keyword,
                details: e.to_string(),
            })
        }
    }
}

async fn metrics_text() -> impl IntoResponse {
    metrics::render()
}

pub fn app_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET])
        .allow_headers(Any);

    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .route("/categories", get(list_categories))
        .route("/scrape/:category_name", get(scrape_category))
        .route("/deep-scan/:keyword", get(deep_scan))
        .route("/metrics", get(metrics_text))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Bind and serve until the process exits.
pub async fn start_server(state: AppState, host: &str, port: u16) -> Result<()> {
    let app = app_router(state);
    let bind_addr = format!("{host}:{port}");
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;

    info!("HTTP server listening on {}", bind_addr);
    println!("🚀 {} running on http://{}", constants::API_TITLE, bind_addr);
    println!("💚 Health:     http://{}/health", bind_addr);
    println!("📂 Categories: http://{}/categories", bind_addr);
    println!("📈 Metrics:    http://{}/metrics", bind_addr);

    axum::serve(listener, app).await?;
    Ok(())
}
