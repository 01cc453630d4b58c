use crate::api::PostFetcher;
use chrono::{DateTime, TimeZone, Utc};
use mockall::mock;
use sentiment_core::{AnalyzeError, Post};

mock! {
    pub PostFetcher {}
    #[async_trait::async_trait]
    impl PostFetcher for PostFetcher {
        async fn fetch(&self, topic: &str, max_results: u32) -> Result<Vec<Post>, AnalyzeError>;
    }
}

pub fn base_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap()
}

/// テキストだけを指定してテスト用の投稿を作る (新しい順)
pub fn posts_from(texts: &[&str]) -> Vec<Post> {
    texts
        .iter()
        .enumerate()
        .map(|(i, text)| Post {
            id: i.to_string(),
            text: text.to_string(),
            created_at: base_time() - chrono::Duration::minutes(i as i64),
        })
        .collect()
}
