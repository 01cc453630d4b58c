use crate::api::PostFetcher;
use sentiment_core::{AnalysisResult, AnalyzeError, AnalyzedPost};

/// 投稿を取得して 1 件ずつ極性を判定する
///
/// - 取得結果が空なら空の [`AnalysisResult`] を返す (エラーではない)
/// - 並び順は API の返却順のまま。重複除去・並べ替え・絞り込みはしない
/// - レート制限エラーはそのまま返す
pub async fn run_analysis<F: PostFetcher + ?Sized>(
    fetcher: &F,
    topic: &str,
    max_results: u32,
) -> Result<AnalysisResult, AnalyzeError> {
    let posts = fetcher.fetch(topic, max_results).await?;

    if posts.is_empty() {
        tracing::info!("No posts found for {:?}", topic);
        return Ok(AnalysisResult::default());
    }

    let analyzed: Vec<AnalyzedPost> = posts
        .into_iter()
        .map(|post| {
            let sentiment = polarity::classify(&post.text);
            AnalyzedPost { post, sentiment }
        })
        .collect();

    tracing::debug!("Analyzed {} posts for {:?}", analyzed.len(), topic);
    Ok(AnalysisResult::new(analyzed))
}
