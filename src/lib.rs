pub mod aggregator;
pub mod config;
pub mod constants;
pub mod error;
pub mod keywords;
pub mod numeric;
pub mod observability;
pub mod pipeline;
pub mod play;
pub mod provider;
pub mod registry;
pub mod server;
pub mod shaper;
pub mod types;

// Raw records flow through the pipeline as plain JSON values
pub use types::RawAppData;
