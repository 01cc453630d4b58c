use analyzer::SentimentService;
use serde::Deserialize;
use std::sync::Arc;

#[derive(Debug, Deserialize)]
pub struct AnalyzeQuery {
    pub topic: Option<String>,
    pub max_results: Option<u32>,
}

pub type SharedState = AppState;

#[derive(Clone)]
pub struct AppState {
    pub service: Arc<SentimentService>,
}

impl AppState {
    pub fn new(service: SentimentService) -> Self {
        Self {
            service: Arc::new(service),
        }
    }
}
