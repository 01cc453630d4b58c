use crate::helpers::client::TestClient;
use crate::helpers::mock_server::MockServer;
use axum::http::StatusCode;

/// 観点: 429 はリセット時刻付きで 429 として返り、キャッシュされない
#[tokio::test]
async fn test_rate_limit_is_surfaced() {
    let server = MockServer::start().await;
    let client = TestClient::new(server.base_url());

    let (status, body) = client.analyze("ratelimited", Some(10)).await;

    assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);
    assert_eq!(body["error"], "API rate limit exceeded");
    assert!(body["detail"]
        .as_str()
        .unwrap()
        .contains("Please wait 15 minutes before trying again."));
    assert_eq!(body["reset_at"], "2025-03-01T12:15:00Z");

    // 失敗はキャッシュされないので再度問い合わせる
    let (status, _) = client.analyze("ratelimited", Some(10)).await;
    assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);
    assert_eq!(server.hits(), 2);
}
