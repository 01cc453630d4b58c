use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::{DateTime, Utc};
use sentiment_core::AnalyzeError;
use serde_json::json;
use tracing::error;

#[derive(Debug)]
pub enum AppError {
    BadRequest(String),
    /// `main` はトークンなしでは起動しないので、サーバーからは返らない (ライブラリ利用向け)
    Configuration(String),
    RateLimited { reset_at: Option<DateTime<Utc>> },
    Internal(anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, json!({ "error": msg })),
            AppError::RateLimited { reset_at } => (
                StatusCode::TOO_MANY_REQUESTS,
                json!({
                    "error": "API rate limit exceeded",
                    "detail": "The search API limits how many searches you can do in a short time. Please wait 15 minutes before trying again.",
                    "reset_at": reset_at,
                }),
            ),
            AppError::Configuration(msg) => {
                error!("Configuration error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({
                        "error": format!("Configuration Error: {}", msg),
                        "detail": "Please make sure you have created a .env file with your BEARER_TOKEN.",
                    }),
                )
            }
            AppError::Internal(err) => {
                error!("Internal error: {:#}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "error": format!("An unexpected error occurred: {}", err) }),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}

impl From<AnalyzeError> for AppError {
    fn from(err: AnalyzeError) -> Self {
        match err {
            AnalyzeError::Configuration(msg) => AppError::Configuration(msg),
            AnalyzeError::RateLimited { reset_at } => AppError::RateLimited { reset_at },
        }
    }
}

// Anyhow conversion
impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::Internal(err)
    }
}
