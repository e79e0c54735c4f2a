use pipeline_core::{Impact, Relevance, SentimentResult, TickerImpact};

use crate::TickerExtractor;

/// Per-article ticker impact bundle produced by the impact resolver
#[derive(Debug, Clone, PartialEq)]
pub struct TickerImpactBundle {
    pub tickers: Vec<TickerImpact>,
    pub count: usize,
    pub has_tickers: bool,
    /// First high-relevance ticker in extraction order
    pub primary_ticker: Option<String>,
    pub affected_positively: Vec<String>,
    pub affected_negatively: Vec<String>,
}

/// Combine ticker extraction with an article's sentiment. Pure: the output
/// depends only on the inputs. Absent sentiment marks every ticker with an
/// unknown impact, which keeps it out of both affected lists.
pub fn resolve_impacts(
    extractor: &TickerExtractor,
    title: &str,
    description: &str,
    sentiment: Option<&SentimentResult>,
) -> TickerImpactBundle {
    let tickers = extractor.tickers_with_impact(title, description, sentiment.map(|s| s.label));

    let primary_ticker = tickers
        .iter()
        .find(|t| t.relevance == Relevance::High)
        .map(|t| t.ticker.clone());

    let affected_positively = tickers
        .iter()
        .filter(|t| t.impact == Impact::Positive)
        .map(|t| t.ticker.clone())
        .collect();

    let affected_negatively = tickers
        .iter()
        .filter(|t| t.impact == Impact::Negative)
        .map(|t| t.ticker.clone())
        .collect();

    TickerImpactBundle {
        count: tickers.len(),
        has_tickers: !tickers.is_empty(),
        primary_ticker,
        affected_positively,
        affected_negatively,
        tickers,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pipeline_core::{SentimentLabel, SentimentScore, SentimentThresholds, Signal};

    fn sentiment(label: SentimentLabel, confidence: f64) -> SentimentResult {
        SentimentResult::from_score(
            SentimentScore { label, confidence },
            &SentimentThresholds::default(),
        )
    }

    #[test]
    fn primary_ticker_is_first_high_in_extraction_order() {
        let extractor = TickerExtractor::new();
        let bundle = resolve_impacts(
            &extractor,
            "Microsoft and Apple report earnings",
            "",
            Some(&sentiment(SentimentLabel::Positive, 0.8)),
        );

        // Lexicon order within the title: apple precedes microsoft in the
        // table, so AAPL is extracted first and wins the tie.
        assert_eq!(bundle.primary_ticker.as_deref(), Some("AAPL"));
        assert_eq!(bundle.count, 2);
        assert!(bundle.has_tickers);
    }

    #[test]
    fn negative_sentiment_fills_affected_negatively() {
        let extractor = TickerExtractor::new();
        let bundle = resolve_impacts(
            &extractor,
            "Tesla misses delivery targets",
            "Ford announced similar struggles",
            Some(&sentiment(SentimentLabel::Negative, 0.9)),
        );

        assert_eq!(bundle.primary_ticker.as_deref(), Some("TSLA"));
        assert_eq!(bundle.affected_negatively, vec!["TSLA", "F"]);
        assert!(bundle.affected_positively.is_empty());
        assert_eq!(bundle.tickers[1].relevance, Relevance::Medium);
    }

    #[test]
    fn absent_sentiment_is_unknown_and_excluded_from_affected_lists() {
        let extractor = TickerExtractor::new();
        let bundle = resolve_impacts(&extractor, "Apple event scheduled", "", None);

        assert_eq!(bundle.tickers[0].impact, Impact::Unknown);
        assert!(bundle.affected_positively.is_empty());
        assert!(bundle.affected_negatively.is_empty());
    }

    #[test]
    fn neutral_sentiment_excluded_from_affected_lists() {
        let extractor = TickerExtractor::new();
        let bundle = resolve_impacts(
            &extractor,
            "Apple holds shareholder meeting",
            "",
            Some(&sentiment(SentimentLabel::Neutral, 0.9)),
        );

        assert_eq!(bundle.tickers[0].impact, Impact::Neutral);
        assert!(bundle.affected_positively.is_empty());
        assert!(bundle.affected_negatively.is_empty());
    }

    #[test]
    fn no_tickers_yields_empty_bundle() {
        let extractor = TickerExtractor::new();
        let bundle = resolve_impacts(
            &extractor,
            "Treasury yields climb",
            "",
            Some(&sentiment(SentimentLabel::Positive, 0.8)),
        );

        assert!(!bundle.has_tickers);
        assert_eq!(bundle.count, 0);
        assert!(bundle.primary_ticker.is_none());
    }

    #[test]
    fn description_only_ticker_is_not_primary() {
        let extractor = TickerExtractor::new();
        let bundle = resolve_impacts(
            &extractor,
            "Sector outlook improves",
            "Analysts flagged Nvidia as a beneficiary",
            Some(&sentiment(SentimentLabel::Positive, 0.8)),
        );

        assert_eq!(bundle.count, 1);
        assert!(bundle.primary_ticker.is_none());
    }
}
