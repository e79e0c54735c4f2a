use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// News article as delivered by a news source
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Article {
    pub source: Option<String>,
    pub author: Option<String>,
    pub title: String,
    pub description: Option<String>,
    /// Unique key for deduplication. Articles without a url are treated
    /// as always-novel and never enter the dedup set.
    pub url: Option<String>,
    pub published_at: Option<DateTime<Utc>>,
}

impl Article {
    /// Text handed to the sentiment classifier: title and description
    /// joined with ". ".
    pub fn classifier_text(&self) -> String {
        format!("{}. {}", self.title, self.description.as_deref().unwrap_or(""))
    }
}

/// Sentiment label produced by the classifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SentimentLabel {
    Positive,
    Negative,
    Neutral,
}

impl SentimentLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            SentimentLabel::Positive => "positive",
            SentimentLabel::Negative => "negative",
            SentimentLabel::Neutral => "neutral",
        }
    }

    /// Parse a model-emitted label string. Unrecognized labels fall back
    /// to neutral rather than failing the article.
    pub fn from_model_label(label: &str) -> Self {
        match label.to_lowercase().as_str() {
            "positive" => SentimentLabel::Positive,
            "negative" => SentimentLabel::Negative,
            _ => SentimentLabel::Neutral,
        }
    }
}

/// Raw classifier output: label plus confidence in [0, 1]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SentimentScore {
    pub label: SentimentLabel,
    pub confidence: f64,
}

/// Trading directionality derived from label + confidence threshold
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Signal {
    Bullish,
    Bearish,
    Neutral,
}

impl Signal {
    pub fn as_str(&self) -> &'static str {
        match self {
            Signal::Bullish => "BULLISH",
            Signal::Bearish => "BEARISH",
            Signal::Neutral => "NEUTRAL",
        }
    }
}

/// Confidence thresholds for signal derivation, independently tunable
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SentimentThresholds {
    pub positive: f64,
    pub negative: f64,
}

impl Default for SentimentThresholds {
    fn default() -> Self {
        Self {
            positive: 0.5,
            negative: 0.5,
        }
    }
}

/// Classifier output with the derived signal attached
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SentimentResult {
    pub label: SentimentLabel,
    pub confidence: f64,
    pub signal: Signal,
}

impl SentimentResult {
    /// Derive the signal from a raw score. Threshold comparison is
    /// inclusive: confidence exactly at the threshold fires the signal.
    pub fn from_score(score: SentimentScore, thresholds: &SentimentThresholds) -> Self {
        let signal = match score.label {
            SentimentLabel::Positive if score.confidence >= thresholds.positive => Signal::Bullish,
            SentimentLabel::Negative if score.confidence >= thresholds.negative => Signal::Bearish,
            _ => Signal::Neutral,
        };

        Self {
            label: score.label,
            confidence: score.confidence,
            signal,
        }
    }
}

/// How central a ticker mention is to the article: high when the symbol
/// appears in the title, medium when only in the description
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Relevance {
    High,
    Medium,
}

/// A ticker symbol found in an article, tagged with relevance
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickerMention {
    pub ticker: String,
    pub relevance: Relevance,
}

/// Per-ticker sentiment direction, broadcast from the article label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Impact {
    Positive,
    Negative,
    Neutral,
    /// No sentiment available for the article. Distinct from neutral;
    /// excluded from affected-ticker lists and aggregate counts.
    Unknown,
}

impl Impact {
    pub fn from_label(label: SentimentLabel) -> Self {
        match label {
            SentimentLabel::Positive => Impact::Positive,
            SentimentLabel::Negative => Impact::Negative,
            SentimentLabel::Neutral => Impact::Neutral,
        }
    }
}

/// One (article, ticker) impact record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickerImpact {
    pub ticker: String,
    pub impact: Impact,
    pub relevance: Relevance,
}

/// Immutable record of one processed article, appended to the history
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessedArticle {
    pub title: String,
    pub sentiment: SentimentLabel,
    pub confidence: f64,
    pub signal: Signal,
    pub tickers: Vec<String>,
    pub primary_ticker: Option<String>,
    pub ticker_impacts: Vec<TickerImpact>,
}

/// Query parameters passed through to the news source unchanged
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewsQuery {
    pub country: String,
    pub category: String,
    pub language: String,
    pub page_size: u32,
    pub keywords: Option<String>,
}

impl Default for NewsQuery {
    fn default() -> Self {
        Self {
            country: "us".to_string(),
            category: "business".to_string(),
            language: "en".to_string(),
            page_size: 100,
            keywords: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn score(label: SentimentLabel, confidence: f64) -> SentimentScore {
        SentimentScore { label, confidence }
    }

    #[test]
    fn positive_above_threshold_is_bullish() {
        let result = SentimentResult::from_score(
            score(SentimentLabel::Positive, 0.9),
            &SentimentThresholds::default(),
        );
        assert_eq!(result.signal, Signal::Bullish);
    }

    #[test]
    fn threshold_boundary_is_inclusive() {
        let result = SentimentResult::from_score(
            score(SentimentLabel::Positive, 0.5),
            &SentimentThresholds::default(),
        );
        assert_eq!(result.signal, Signal::Bullish);

        let result = SentimentResult::from_score(
            score(SentimentLabel::Negative, 0.5),
            &SentimentThresholds::default(),
        );
        assert_eq!(result.signal, Signal::Bearish);
    }

    #[test]
    fn below_threshold_is_neutral() {
        let result = SentimentResult::from_score(
            score(SentimentLabel::Positive, 0.49),
            &SentimentThresholds::default(),
        );
        assert_eq!(result.signal, Signal::Neutral);
    }

    #[test]
    fn neutral_label_is_neutral_at_any_confidence() {
        let result = SentimentResult::from_score(
            score(SentimentLabel::Neutral, 0.99),
            &SentimentThresholds::default(),
        );
        assert_eq!(result.signal, Signal::Neutral);
    }

    #[test]
    fn thresholds_are_independent() {
        let thresholds = SentimentThresholds {
            positive: 0.9,
            negative: 0.3,
        };
        let result = SentimentResult::from_score(score(SentimentLabel::Positive, 0.8), &thresholds);
        assert_eq!(result.signal, Signal::Neutral);

        let result = SentimentResult::from_score(score(SentimentLabel::Negative, 0.8), &thresholds);
        assert_eq!(result.signal, Signal::Bearish);
    }

    #[test]
    fn impact_follows_label() {
        assert_eq!(Impact::from_label(SentimentLabel::Positive), Impact::Positive);
        assert_eq!(Impact::from_label(SentimentLabel::Negative), Impact::Negative);
        assert_eq!(Impact::from_label(SentimentLabel::Neutral), Impact::Neutral);
    }

    #[test]
    fn model_label_parsing_falls_back_to_neutral() {
        assert_eq!(SentimentLabel::from_model_label("POSITIVE"), SentimentLabel::Positive);
        assert_eq!(SentimentLabel::from_model_label("negative"), SentimentLabel::Negative);
        assert_eq!(SentimentLabel::from_model_label("mixed"), SentimentLabel::Neutral);
    }

    #[test]
    fn classifier_text_joins_title_and_description() {
        let article = Article {
            source: None,
            author: None,
            title: "Apple beats earnings".to_string(),
            description: Some("Shares rose in after-hours trading".to_string()),
            url: Some("https://example.com/a".to_string()),
            published_at: None,
        };
        assert_eq!(
            article.classifier_text(),
            "Apple beats earnings. Shares rose in after-hours trading"
        );
    }

    #[test]
    fn signal_serializes_screaming_case() {
        assert_eq!(serde_json::to_string(&Signal::Bullish).unwrap(), "\"BULLISH\"");
        assert_eq!(serde_json::to_string(&SentimentLabel::Positive).unwrap(), "\"positive\"");
        assert_eq!(serde_json::to_string(&Impact::Unknown).unwrap(), "\"unknown\"");
    }
}
