use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 検索 API に渡せる取得件数の下限
pub const MIN_RESULTS: u32 = 10;
/// 検索 API に渡せる取得件数の上限
pub const MAX_RESULTS: u32 = 100;

/// 極性判定のしきい値 (compound がこの値以上なら Positive、符号反転で Negative)
pub const POLARITY_THRESHOLD: f64 = 0.05;

/// 検索 API から取得した投稿 (取得後は不変)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    pub id: String,
    pub text: String,
    pub created_at: DateTime<Utc>,
}

/// 感情ラベル
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sentiment {
    Positive,
    Neutral,
    Negative,
}

impl Sentiment {
    /// サマリーの表示順
    pub const ALL: [Sentiment; 3] = [Self::Positive, Self::Neutral, Self::Negative];

    /// compound スコアからラベルを決める
    ///
    /// - `>= 0.05` → Positive
    /// - `<= -0.05` → Negative
    /// - それ以外 → Neutral
    pub fn from_compound(compound: f64) -> Self {
        if compound >= POLARITY_THRESHOLD {
            Self::Positive
        } else if compound <= -POLARITY_THRESHOLD {
            Self::Negative
        } else {
            Self::Neutral
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Positive => "Positive",
            Self::Neutral => "Neutral",
            Self::Negative => "Negative",
        }
    }
}

impl std::fmt::Display for Sentiment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 感情ラベル付きの投稿
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyzedPost {
    #[serde(flatten)]
    pub post: Post,
    pub sentiment: Sentiment,
}

/// 分析結果。並び順は API の返却順のまま。
///
/// 空の結果は「該当する投稿なし」を意味し、エラーとは区別される。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub posts: Vec<AnalyzedPost>,
}

impl AnalysisResult {
    pub fn new(posts: Vec<AnalyzedPost>) -> Self {
        Self { posts }
    }

    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }

    pub fn len(&self) -> usize {
        self.posts.len()
    }

    pub fn summary(&self) -> SentimentSummary {
        SentimentSummary::from_posts(&self.posts)
    }
}

/// サマリーの 1 行
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryRow {
    pub sentiment: Sentiment,
    pub count: usize,
    /// 全体に対する割合 (%)。小数第 2 位で丸める。
    pub percentage: f64,
}

/// ラベルごとの件数と割合
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentimentSummary {
    pub total: usize,
    /// Positive, Neutral, Negative の順で常に 3 行
    pub rows: Vec<SummaryRow>,
}

impl SentimentSummary {
    pub fn from_posts(posts: &[AnalyzedPost]) -> Self {
        let total = posts.len();
        let rows = Sentiment::ALL
            .iter()
            .map(|&sentiment| {
                let count = posts.iter().filter(|p| p.sentiment == sentiment).count();
                SummaryRow {
                    sentiment,
                    count,
                    percentage: percentage(count, total),
                }
            })
            .collect();
        Self { total, rows }
    }

    pub fn count(&self, sentiment: Sentiment) -> usize {
        self.row(sentiment).map(|r| r.count).unwrap_or(0)
    }

    pub fn percentage(&self, sentiment: Sentiment) -> f64 {
        self.row(sentiment).map(|r| r.percentage).unwrap_or(0.0)
    }

    fn row(&self, sentiment: Sentiment) -> Option<&SummaryRow> {
        self.rows.iter().find(|r| r.sentiment == sentiment)
    }
}

fn percentage(count: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    let raw = (count as f64 * 100.0) / total as f64;
    (raw * 100.0).round() / 100.0
}

/// 分析処理が呼び出し元に伝えるエラー
///
/// 「投稿なし」はエラーではなく空の [`AnalysisResult`] で表す。
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AnalyzeError {
    /// 認証情報の欠落など。リトライしても直らない。
    #[error("configuration error: {0}")]
    Configuration(String),

    /// 検索 API のレート制限。キャッシュにも保存せず、そのまま上位へ返す。
    #[error("search API rate limit exceeded")]
    RateLimited {
        /// `x-rate-limit-reset` ヘッダーから分かる解除時刻
        reset_at: Option<DateTime<Utc>>,
    },
}
