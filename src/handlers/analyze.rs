use crate::error::AppError;
use crate::state::{AnalyzeQuery, SharedState};
use axum::{
    extract::{Query, State},
    response::Json,
};
use chrono::{DateTime, Utc};
use sentiment_core::{AnalysisResult, Sentiment, SummaryRow, MAX_RESULTS, MIN_RESULTS};
use serde::Serialize;

/// 件数指定がないときの取得件数
pub const DEFAULT_MAX_RESULTS: u32 = 20;

const EMPTY_MESSAGE: &str = "No posts found for this topic. Try another keyword.";

#[derive(Debug, Serialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum DashboardStatus {
    Ok,
    Empty,
}

/// ダッシュボードに描く 1 投稿分
#[derive(Debug, Serialize)]
pub struct PostRow {
    pub created_at: DateTime<Utc>,
    pub sentiment: Sentiment,
    pub text: String,
}

#[derive(Debug, Serialize)]
pub struct DashboardResponse {
    pub topic: String,
    pub max_results: u32,
    pub status: DashboardStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub total: usize,
    pub summary: Vec<SummaryRow>,
    pub posts: Vec<PostRow>,
}

impl DashboardResponse {
    fn from_result(topic: String, max_results: u32, result: &AnalysisResult) -> Self {
        if result.is_empty() {
            return Self {
                topic,
                max_results,
                status: DashboardStatus::Empty,
                message: Some(EMPTY_MESSAGE.to_string()),
                total: 0,
                summary: vec![],
                posts: vec![],
            };
        }

        let summary = result.summary();
        let posts = result
            .posts
            .iter()
            .map(|p| PostRow {
                created_at: p.post.created_at,
                sentiment: p.sentiment,
                text: p.post.text.clone(),
            })
            .collect();

        Self {
            topic,
            max_results,
            status: DashboardStatus::Ok,
            message: None,
            total: summary.total,
            summary: summary.rows,
            posts,
        }
    }
}

pub async fn analyze(
    State(state): State<SharedState>,
    Query(params): Query<AnalyzeQuery>,
) -> Result<Json<DashboardResponse>, AppError> {
    let topic = params
        .topic
        .as_deref()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or_else(|| AppError::BadRequest("Please enter a topic to analyze.".to_string()))?
        .to_string();

    let max_results = params.max_results.unwrap_or(DEFAULT_MAX_RESULTS);
    if !(MIN_RESULTS..=MAX_RESULTS).contains(&max_results) {
        return Err(AppError::BadRequest(format!(
            "max_results must be between {} and {}",
            MIN_RESULTS, MAX_RESULTS
        )));
    }

    tracing::info!("Received analyze request: topic={} max_results={}", topic, max_results);

    let result = state.service.analyze(&topic, max_results).await?;

    tracing::info!("Analyzed {} posts for topic={}", result.len(), topic);

    Ok(Json(DashboardResponse::from_result(topic, max_results, &result)))
}
