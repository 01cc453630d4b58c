pub async fn root() -> &'static str {
    "Topic sentiment dashboard. Try GET /api/analyze?topic=<keyword>&max_results=<10-100>"
}

pub async fn health() -> &'static str {
    "OK"
}
