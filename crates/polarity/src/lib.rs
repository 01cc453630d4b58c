//! 投稿テキストの極性判定
//!
//! スコア計算は VADER (`vader_sentiment`) に任せ、ここではラベル付けのしきい値だけを決める。

use sentiment_core::Sentiment;
use vader_sentiment::SentimentIntensityAnalyzer;

/// ルールベースの極性スコア
///
/// `neg` / `neu` / `pos` は割合 (合計がおおよそ 1.0)、`compound` は [-1, 1] に正規化した総合スコア。
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PolarityScores {
    pub neg: f64,
    pub neu: f64,
    pub pos: f64,
    pub compound: f64,
}

impl PolarityScores {
    fn neutral() -> Self {
        Self {
            neg: 0.0,
            neu: 0.0,
            pos: 0.0,
            compound: 0.0,
        }
    }
}

/// テキストの極性スコアを計算する
pub fn polarity_scores(text: &str) -> PolarityScores {
    if text.trim().is_empty() {
        return PolarityScores::neutral();
    }

    let analyzer = SentimentIntensityAnalyzer::new();
    let scores = analyzer.polarity_scores(text);
    let score = |key: &str| scores.get(key).copied().unwrap_or(0.0);

    PolarityScores {
        neg: score("neg"),
        neu: score("neu"),
        pos: score("pos"),
        compound: score("compound"),
    }
}

/// テキストを Positive / Neutral / Negative に分類する
///
/// 状態を持たない純粋関数。同じ入力には常に同じラベルを返す。
pub fn classify(text: &str) -> Sentiment {
    Sentiment::from_compound(polarity_scores(text).compound)
}
