use async_trait::async_trait;
use pipeline_core::{PipelineError, SentimentClassifier, SentimentLabel, SentimentScore};

const POSITIVE_KEYWORDS: &[&str] = &[
    "surges", "rally", "gains", "profit", "growth", "beats", "exceeds", "strong",
    "bullish", "upgrade", "optimistic", "breakthrough", "success", "record",
    "soars", "rebound", "outperform", "buyback", "dividend", "upside",
];

const NEGATIVE_KEYWORDS: &[&str] = &[
    "falls", "plunges", "losses", "decline", "weak", "misses", "cuts", "drops",
    "bearish", "downgrade", "pessimistic", "failure", "concern", "warning",
    "crashes", "lawsuit", "layoff", "bankruptcy", "recall", "slump",
];

/// Keyword-count sentiment classifier. Used when no inference service is
/// configured; no network, deterministic.
#[derive(Debug, Clone, Default)]
pub struct KeywordClassifier;

impl KeywordClassifier {
    pub fn new() -> Self {
        Self
    }

    fn score_text(&self, text: &str) -> SentimentScore {
        let text = text.to_lowercase();

        let positive: usize = POSITIVE_KEYWORDS.iter().map(|kw| text.matches(kw).count()).sum();
        let negative: usize = NEGATIVE_KEYWORDS.iter().map(|kw| text.matches(kw).count()).sum();

        let total = positive + negative;
        if total == 0 {
            // No directional vocabulary at all: confidently neutral.
            return SentimentScore {
                label: SentimentLabel::Neutral,
                confidence: 1.0,
            };
        }

        let net = positive as f64 - negative as f64;
        let strength = (net.abs() / total as f64).clamp(0.0, 1.0);

        let label = if net > 0.0 {
            SentimentLabel::Positive
        } else if net < 0.0 {
            SentimentLabel::Negative
        } else {
            SentimentLabel::Neutral
        };

        SentimentScore {
            label,
            confidence: strength,
        }
    }
}

#[async_trait]
impl SentimentClassifier for KeywordClassifier {
    async fn classify(&self, text: &str) -> Result<SentimentScore, PipelineError> {
        Ok(self.score_text(text))
    }
}
