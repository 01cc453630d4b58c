use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::oneshot;

/// 検索 API のフェイク
///
/// クエリ先頭のキーワードで挙動を切り替える:
/// - `ratelimited` → 429 (`x-rate-limit-reset` 付き)
/// - `nothing` → 該当なし
/// - `broken` → 500
/// - それ以外 → 固定の 3 件
pub struct MockServer {
    pub port: u16,
    hits: Arc<AtomicUsize>,
    shutdown_tx: Option<oneshot::Sender<()>>,
}

pub const RATE_LIMIT_RESET: &str = "1740831300"; // 2025-03-01T12:15:00Z

impl MockServer {
    pub async fn start() -> Self {
        let hits = Arc::new(AtomicUsize::new(0));
        let app = Router::new()
            .route("/2/tweets/search/recent", get(handle_search))
            .with_state(hits.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();
        let (tx, rx) = oneshot::channel();

        tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async {
                    rx.await.ok();
                })
                .await
                .unwrap();
        });

        MockServer {
            port,
            hits,
            shutdown_tx: Some(tx),
        }
    }

    pub fn base_url(&self) -> String {
        format!("http://127.0.0.1:{}", self.port)
    }

    /// これまでに受けた検索リクエスト数
    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }
}

impl Drop for MockServer {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

async fn handle_search(
    State(hits): State<Arc<AtomicUsize>>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    hits.fetch_add(1, Ordering::SeqCst);

    let query = params.get("query").map(|s| s.as_str()).unwrap_or("");
    let keyword = query.split_whitespace().next().unwrap_or("");

    match keyword {
        "ratelimited" => (
            StatusCode::TOO_MANY_REQUESTS,
            [("x-rate-limit-reset", RATE_LIMIT_RESET)],
            Json(serde_json::json!({ "title": "Too Many Requests" })),
        )
            .into_response(),
        "nothing" => Json(serde_json::json!({ "meta": { "result_count": 0 } })).into_response(),
        "broken" => (StatusCode::INTERNAL_SERVER_ERROR, "upstream exploded").into_response(),
        _ => Json(serde_json::json!({
            "data": [
                {
                    "id": "1",
                    "text": format!("I love this {}", keyword),
                    "created_at": "2025-03-01T12:00:00.000Z"
                },
                {
                    "id": "2",
                    "text": "The car is blue",
                    "created_at": "2025-03-01T11:59:00.000Z"
                },
                {
                    "id": "3",
                    "text": "This is not good",
                    "created_at": "2025-03-01T11:58:00.000Z"
                }
            ],
            "meta": { "result_count": 3 }
        }))
        .into_response(),
    }
}
