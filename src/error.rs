use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScraperError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON deserialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML deserialization failed: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Category '{category}' not found")]
    CategoryNotFound { category: String },

    #[error("Keyword cannot be empty")]
    EmptyKeyword,

    #[error("No results found for keyword '{keyword}'")]
    NoResults { keyword: String },

    #[error("Search provider error: {message}")]
    Provider { message: String },
}

pub type Result<T> = std::result::Result<T, ScraperError>;
