use async_trait::async_trait;
use serde_json::Value;

use crate::error::Result;
use crate::types::RawAppData;

/// Parameters for one provider search call
#[derive(Debug, Clone)]
pub struct SearchQuery {
    pub query: String,
    pub n_hits: usize,
    pub lang: String,
    pub country: String,
}

/// Anything that can run a single store keyword search.
///
/// Implementations hand back the payload as received; callers flatten it
/// with [`flatten_search_payload`] so record-shape quirks stay in one place.
#[async_trait]
pub trait SearchProvider: Send + Sync {
    async fn search(&self, query: &SearchQuery) -> Result<Value>;
}

/// Flatten a provider payload into a record list.
///
/// Providers return either a bare array of records or a bag with the list
/// nested under "apps". Anything else yields no records.
pub fn flatten_search_payload(payload: Value) -> Vec<RawAppData> {
    match payload {
        Value::Array(records) => records,
        Value::Object(mut bag) => match bag.remove("apps") {
            Some(Value::Array(records)) => records,
            _ => Vec::new(),
        },
        _ => Vec::new(),
    }
}
