//! 分析結果のメモリキャッシュ
//!
//! - キー: (topic, max_results) の完全一致
//! - TTL: 900 秒。経過したエントリは存在しないものとして扱う (遅延失効、掃除はしない)
//! - 失敗した計算結果は保存しない
//! - 同じキーへの同時書き込みは後勝ち (再計算は冪等)

use chrono::{DateTime, Duration, Utc};
use sentiment_core::{AnalysisResult, AnalyzeError};
use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;
use tokio::sync::RwLock;

pub const CACHE_TTL_SECS: i64 = 900;

/// 現在時刻の取得元。テストでは時刻を手で進める実装に差し替える。
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

impl<T: Clock + ?Sized> Clock for Arc<T> {
    fn now(&self) -> DateTime<Utc> {
        (**self).now()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub topic: String,
    pub max_results: u32,
}

impl CacheKey {
    pub fn new(topic: &str, max_results: u32) -> Self {
        Self {
            topic: topic.to_string(),
            max_results,
        }
    }
}

struct CacheEntry {
    value: Arc<AnalysisResult>,
    created_at: DateTime<Utc>,
}

impl CacheEntry {
    fn is_fresh(&self, now: DateTime<Utc>, ttl: Duration) -> bool {
        now - self.created_at < ttl
    }
}

pub struct QueryCache<C: Clock = SystemClock> {
    entries: RwLock<HashMap<CacheKey, CacheEntry>>,
    ttl: Duration,
    clock: C,
}

impl QueryCache<SystemClock> {
    pub fn new() -> Self {
        Self::with_clock(SystemClock)
    }
}

impl Default for QueryCache<SystemClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock> QueryCache<C> {
    pub fn with_clock(clock: C) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            ttl: Duration::seconds(CACHE_TTL_SECS),
            clock,
        }
    }

    /// TTL 内のエントリだけを返す
    pub async fn get(&self, topic: &str, max_results: u32) -> Option<Arc<AnalysisResult>> {
        let now = self.clock.now();
        let entries = self.entries.read().await;
        entries
            .get(&CacheKey::new(topic, max_results))
            .filter(|entry| entry.is_fresh(now, self.ttl))
            .map(|entry| entry.value.clone())
    }

    /// 現在時刻で保存する (既存のエントリは上書き)
    pub async fn insert(
        &self,
        topic: &str,
        max_results: u32,
        value: AnalysisResult,
    ) -> Arc<AnalysisResult> {
        let value = Arc::new(value);
        let entry = CacheEntry {
            value: value.clone(),
            created_at: self.clock.now(),
        };
        self.entries
            .write()
            .await
            .insert(CacheKey::new(topic, max_results), entry);
        value
    }

    /// キャッシュがあればそれを返し、なければ `compute` を実行して保存する
    ///
    /// `compute` の実行中はロックを保持しない。
    pub async fn get_or_compute<F, Fut>(
        &self,
        topic: &str,
        max_results: u32,
        compute: F,
    ) -> Result<Arc<AnalysisResult>, AnalyzeError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<AnalysisResult, AnalyzeError>>,
    {
        if let Some(hit) = self.get(topic, max_results).await {
            tracing::debug!("[cache] Hit for {:?} (max_results={})", topic, max_results);
            return Ok(hit);
        }

        tracing::debug!("[cache] Miss for {:?} (max_results={})", topic, max_results);
        let value = compute().await?;
        Ok(self.insert(topic, max_results, value).await)
    }

    /// 保存されているエントリ数 (期限切れも含む)
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}
