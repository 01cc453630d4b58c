use crate::helpers::client::TestClient;
use crate::helpers::mock_server::MockServer;
use axum::http::StatusCode;

/// 観点: /health エンドポイントが 200 OK を返すか
#[tokio::test]
async fn test_health_check() {
    let server = MockServer::start().await;
    let client = TestClient::new(server.base_url());
    let (status, body) = client.get_health().await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "OK");
    assert_eq!(server.hits(), 0);
}

/// 観点: / が使い方を返すか
#[tokio::test]
async fn test_root() {
    let server = MockServer::start().await;
    let client = TestClient::new(server.base_url());
    let (status, body) = client.get_root().await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("/api/analyze"));
}
