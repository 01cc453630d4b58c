pub mod api;
pub mod cache;
pub mod logic;
#[cfg(test)]
mod mocks;

use crate::api::{PostFetcher, SearchConfig, XSearchClient};
use crate::cache::{Clock, QueryCache, SystemClock};
use reqwest::Client;
use sentiment_core::{AnalysisResult, AnalyzeError};
use std::sync::Arc;

/// 投稿取得 → 極性判定 → キャッシュをまとめた窓口
pub struct SentimentService<C: Clock = SystemClock> {
    fetcher: Arc<dyn PostFetcher>,
    cache: QueryCache<C>,
}

impl SentimentService<SystemClock> {
    pub fn new(fetcher: Arc<dyn PostFetcher>) -> Self {
        Self::with_cache(fetcher, QueryCache::new())
    }

    /// 設定から検索クライアントを組み立てる。トークンがなければここで失敗する。
    pub fn from_config(client: Client, config: &SearchConfig) -> Result<Self, AnalyzeError> {
        let fetcher = XSearchClient::new(client, config)?;
        Ok(Self::new(Arc::new(fetcher)))
    }
}

impl<C: Clock> SentimentService<C> {
    pub fn with_cache(fetcher: Arc<dyn PostFetcher>, cache: QueryCache<C>) -> Self {
        Self { fetcher, cache }
    }

    /// `topic` の最近の投稿を分析する (TTL 内は同じ結果を返す)
    pub async fn analyze(
        &self,
        topic: &str,
        max_results: u32,
    ) -> Result<Arc<AnalysisResult>, AnalyzeError> {
        self.cache
            .get_or_compute(topic, max_results, || {
                logic::run_analysis(self.fetcher.as_ref(), topic, max_results)
            })
            .await
    }
}
