//! 投稿検索 API クライアント
//!
//! - クエリ: `"<topic> -is:retweet lang:en"` (リポスト除外・英語のみ)
//! - 429 はレート制限としてそのまま呼び出し元に返す
//! - それ以外の失敗はログに残して「投稿なし」(空のリスト) として扱う

use anyhow::Context;
use chrono::{DateTime, Utc};
use reqwest::{header::HeaderMap, Client, StatusCode};
use sentiment_core::{AnalyzeError, Post, MAX_RESULTS, MIN_RESULTS};
use serde::Deserialize;

pub const DEFAULT_API_URL: &str = "https://api.twitter.com";
const SEARCH_PATH: &str = "/2/tweets/search/recent";
const RATE_LIMIT_RESET_HEADER: &str = "x-rate-limit-reset";

#[derive(Debug, Deserialize)]
pub struct SearchResponse {
    /// 該当なしの場合はフィールド自体が省略される
    #[serde(default)]
    pub data: Vec<TweetView>,
    #[serde(default)]
    pub meta: Option<SearchMeta>,
}

#[derive(Debug, Deserialize)]
pub struct TweetView {
    pub id: String,
    pub text: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct SearchMeta {
    #[serde(default)]
    pub result_count: u32,
}

impl From<TweetView> for Post {
    fn from(tweet: TweetView) -> Self {
        Post {
            id: tweet.id,
            text: tweet.text,
            created_at: tweet.created_at,
        }
    }
}

/// 検索 API の接続設定
///
/// プロセス起動時に環境変数から一度だけ組み立て、クライアント生成時に明示的に渡す。
#[derive(Clone)]
pub struct SearchConfig {
    pub bearer_token: Option<String>,
    pub base_url: String,
}

impl SearchConfig {
    pub fn new(bearer_token: Option<String>, base_url: impl Into<String>) -> Self {
        Self {
            bearer_token,
            base_url: base_url.into(),
        }
    }
}

impl std::fmt::Debug for SearchConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchConfig")
            .field("bearer_token", &self.bearer_token.as_ref().map(|_| "<redacted>"))
            .field("base_url", &self.base_url)
            .finish()
    }
}

#[async_trait::async_trait]
pub trait PostFetcher: Send + Sync {
    /// `topic` に一致する最近の投稿を最大 `max_results` 件取得する
    async fn fetch(&self, topic: &str, max_results: u32) -> Result<Vec<Post>, AnalyzeError>;
}

/// 検索クエリ文字列を組み立てる
pub fn build_query(topic: &str) -> String {
    format!("{} -is:retweet lang:en", topic.trim())
}

enum FetchFailure {
    RateLimited(Option<DateTime<Utc>>),
    Other(anyhow::Error),
}

impl From<anyhow::Error> for FetchFailure {
    fn from(err: anyhow::Error) -> Self {
        FetchFailure::Other(err)
    }
}

pub struct XSearchClient {
    client: Client,
    bearer_token: String,
    search_url: String,
}

impl std::fmt::Debug for XSearchClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("XSearchClient")
            .field("search_url", &self.search_url)
            .finish_non_exhaustive()
    }
}

impl XSearchClient {
    /// トークンがなければネットワークに触れる前に失敗する
    pub fn new(client: Client, config: &SearchConfig) -> Result<Self, AnalyzeError> {
        let bearer_token = config
            .bearer_token
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or_else(|| {
                AnalyzeError::Configuration(
                    "BEARER_TOKEN not found. Check your .env file.".to_string(),
                )
            })?;

        let base_url = config.base_url.trim_end_matches('/');
        Ok(Self {
            client,
            bearer_token: bearer_token.to_string(),
            search_url: format!("{}{}", base_url, SEARCH_PATH),
        })
    }

    async fn search(&self, topic: &str, max_results: u32) -> Result<Vec<Post>, FetchFailure> {
        let query = build_query(topic);
        let limit = max_results.clamp(MIN_RESULTS, MAX_RESULTS).to_string();

        let res = self
            .client
            .get(&self.search_url)
            .bearer_auth(&self.bearer_token)
            .query(&[
                ("query", query.as_str()),
                ("max_results", limit.as_str()),
                ("tweet.fields", "created_at"),
            ])
            .send()
            .await
            .context("Search request failed")?;

        let status = res.status();
        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(FetchFailure::RateLimited(rate_limit_reset(res.headers())));
        }

        if !status.is_success() {
            let text = res.text().await.unwrap_or_default();
            return Err(anyhow::anyhow!("Search API failed: {} - {}", status, text).into());
        }

        let search_res: SearchResponse = res
            .json()
            .await
            .context("Failed to parse search response")?;

        if let Some(meta) = &search_res.meta {
            tracing::debug!("[search] result_count={}", meta.result_count);
        }

        Ok(search_res.data.into_iter().map(Post::from).collect())
    }
}

fn rate_limit_reset(headers: &HeaderMap) -> Option<DateTime<Utc>> {
    headers
        .get(RATE_LIMIT_RESET_HEADER)?
        .to_str()
        .ok()?
        .trim()
        .parse::<i64>()
        .ok()
        .and_then(|secs| DateTime::from_timestamp(secs, 0))
}

#[async_trait::async_trait]
impl PostFetcher for XSearchClient {
    async fn fetch(&self, topic: &str, max_results: u32) -> Result<Vec<Post>, AnalyzeError> {
        match self.search(topic, max_results).await {
            Ok(posts) => {
                tracing::info!("[search] Fetched {} posts for {:?}", posts.len(), topic);
                Ok(posts)
            }
            Err(FetchFailure::RateLimited(reset_at)) => {
                tracing::warn!("[search] Rate limited (reset_at={:?})", reset_at);
                Err(AnalyzeError::RateLimited { reset_at })
            }
            Err(FetchFailure::Other(e)) => {
                // 429 以外の失敗は「投稿なし」扱い
                tracing::warn!("[search] Error fetching posts for {:?}: {:#}", topic, e);
                Ok(vec![])
            }
        }
    }
}
