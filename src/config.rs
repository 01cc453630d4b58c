use analyzer::api::{SearchConfig, DEFAULT_API_URL};

const DEFAULT_PORT: u16 = 3000;

/// 環境変数 (と `.env`) から読み込むアプリ設定
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub search: SearchConfig,
    pub port: u16,
}

impl AppConfig {
    /// - `BEARER_TOKEN`: 必須。欠落はクライアント生成時に Configuration エラーになる
    /// - `X_API_URL`: 検索 API のベース URL (既定: `https://api.twitter.com`)
    /// - `PORT`: 待ち受けポート (既定: 3000)
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let bearer_token = lookup("BEARER_TOKEN").filter(|t| !t.trim().is_empty());
        let api_url = lookup("X_API_URL")
            .filter(|u| !u.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());
        let port = lookup("PORT")
            .and_then(|p| p.parse().ok())
            .unwrap_or(DEFAULT_PORT);

        Self {
            search: SearchConfig::new(bearer_token, api_url),
            port,
        }
    }
}
