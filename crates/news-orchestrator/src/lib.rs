use pipeline_core::{
    Article, NewsQuery, NewsSource, PipelineError, ProcessedArticle, SentimentClassifier,
    SentimentResult, SentimentThresholds, Signal,
};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use ticker_extractor::{resolve_impacts, TickerExtractor, TickerImpactBundle};

pub mod aggregate;
pub mod dedup;
pub mod sink;

pub use aggregate::{AffectedTicker, AggregateStore};
pub use dedup::SeenUrls;
pub use sink::{ArticleSink, JsonFileSink};

/// Orchestrator settings; the query is passed through to the news source
/// unchanged.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrchestratorConfig {
    pub query: NewsQuery,
    pub thresholds: SentimentThresholds,
    pub seen_urls_cap: usize,
    pub top_affected: usize,
}

impl Default for OrchestratorConfig {
    fn default() -> Self {
        Self {
            query: NewsQuery::default(),
            thresholds: SentimentThresholds::default(),
            seen_urls_cap: 500,
            top_affected: 5,
        }
    }
}

/// Counters for one fetch-filter-process-aggregate-report pass
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CycleSummary {
    /// Articles returned by the news source
    pub fetched: usize,
    /// Articles that survived dedup filtering
    pub fresh: usize,
    /// Articles successfully classified (neutral ones included)
    pub processed: usize,
    pub bullish: usize,
    pub bearish: usize,
}

/// The pipeline core: drives fetch → dedup filter → classify → impact
/// resolution → aggregation, one cycle at a time. All mutable state is
/// owned by the instance and persists across cycles.
pub struct NewsOrchestrator {
    source: Box<dyn NewsSource>,
    classifier: Box<dyn SentimentClassifier>,
    extractor: TickerExtractor,
    config: OrchestratorConfig,
    seen_urls: SeenUrls,
    bullish_urls: HashSet<String>,
    bearish_urls: HashSet<String>,
    aggregates: AggregateStore,
    history: Vec<ProcessedArticle>,
    sink: Option<Box<dyn ArticleSink>>,
}

impl NewsOrchestrator {
    pub fn new(
        source: Box<dyn NewsSource>,
        classifier: Box<dyn SentimentClassifier>,
        config: OrchestratorConfig,
    ) -> Self {
        let seen_urls = SeenUrls::new(config.seen_urls_cap);
        Self {
            source,
            classifier,
            extractor: TickerExtractor::new(),
            config,
            seen_urls,
            bullish_urls: HashSet::new(),
            bearish_urls: HashSet::new(),
            aggregates: AggregateStore::new(),
            history: Vec::new(),
            sink: None,
        }
    }

    /// Replace the default extractor, e.g. to merge custom lexicon entries.
    pub fn with_extractor(mut self, extractor: TickerExtractor) -> Self {
        self.extractor = extractor;
        self
    }

    pub fn with_sink(mut self, sink: Box<dyn ArticleSink>) -> Self {
        self.sink = Some(sink);
        self
    }

    /// Run one processing cycle. A fetch failure aborts before any
    /// dedup-marking or aggregation, so the next cycle retries cleanly.
    pub async fn run_cycle(&mut self) -> Result<CycleSummary, PipelineError> {
        let articles = self.source.fetch(&self.config.query).await?;
        let fetched = articles.len();

        let fresh: Vec<Article> = articles
            .into_iter()
            .filter(|article| match &article.url {
                Some(url) => !self.seen_urls.contains(url),
                // Url-less articles are always novel; they never enter the
                // dedup set so they cannot shadow each other.
                None => true,
            })
            .collect();
        let fresh_count = fresh.len();

        let mut processed = 0;
        let mut bullish = 0;
        let mut bearish = 0;

        for article in &fresh {
            // Mark seen before classification: at-most-once attempt. A
            // classifier failure drops the article for good rather than
            // risking duplicate side effects on retry.
            if let Some(url) = &article.url {
                self.seen_urls.insert(url);
            }

            match self.process_article(article).await {
                Ok(signal) => {
                    processed += 1;
                    match signal {
                        Signal::Bullish => bullish += 1,
                        Signal::Bearish => bearish += 1,
                        Signal::Neutral => {}
                    }
                }
                Err(e) => {
                    tracing::warn!("Skipping article \"{}\": {}", article.title, e);
                }
            }
        }

        self.seen_urls.enforce_cap();

        if let Some(sink) = &self.sink {
            if let Err(e) = sink.persist(&self.history) {
                tracing::error!("Failed to persist article history: {}", e);
            }
        }

        let summary = CycleSummary {
            fetched,
            fresh: fresh_count,
            processed,
            bullish,
            bearish,
        };
        self.report_cycle(&summary);

        Ok(summary)
    }

    async fn process_article(&mut self, article: &Article) -> Result<Signal, PipelineError> {
        let score = self.classifier.classify(&article.classifier_text()).await?;
        let result = SentimentResult::from_score(score, &self.config.thresholds);

        // Neutral signal: the article is recorded nowhere further. This is
        // a filtering policy, not an error.
        if result.signal == Signal::Neutral {
            return Ok(Signal::Neutral);
        }

        let bundle = resolve_impacts(
            &self.extractor,
            &article.title,
            article.description.as_deref().unwrap_or(""),
            Some(&result),
        );

        self.report_article(article, &result, &bundle);

        if let Some(url) = &article.url {
            match result.signal {
                Signal::Bullish => self.bullish_urls.insert(url.clone()),
                Signal::Bearish => self.bearish_urls.insert(url.clone()),
                Signal::Neutral => false,
            };
        }

        for impact in &bundle.tickers {
            self.aggregates.record(impact);
        }

        self.history.push(ProcessedArticle {
            title: article.title.clone(),
            sentiment: result.label,
            confidence: result.confidence,
            signal: result.signal,
            tickers: bundle.tickers.iter().map(|t| t.ticker.clone()).collect(),
            primary_ticker: bundle.primary_ticker.clone(),
            ticker_impacts: bundle.tickers,
        });

        Ok(result.signal)
    }

    fn report_article(&self, article: &Article, result: &SentimentResult, bundle: &TickerImpactBundle) {
        tracing::info!("Title: {}", article.title);
        tracing::info!(
            "Sentiment: {} (Score: {:.4})",
            result.label.as_str().to_uppercase(),
            result.confidence
        );
        tracing::info!("Signal: {}", result.signal.as_str());

        if bundle.has_tickers {
            let tickers: Vec<&str> = bundle.tickers.iter().map(|t| t.ticker.as_str()).collect();
            tracing::info!("Tickers: {}", tickers.join(", "));
            if let Some(primary) = &bundle.primary_ticker {
                tracing::info!("Primary ticker: {}", primary);
            }
            if !bundle.affected_positively.is_empty() {
                tracing::info!("Positively affected: {}", bundle.affected_positively.join(", "));
            }
            if !bundle.affected_negatively.is_empty() {
                tracing::info!("Negatively affected: {}", bundle.affected_negatively.join(", "));
            }
        } else {
            tracing::info!("Tickers: None identified");
        }
    }

    fn report_cycle(&self, summary: &CycleSummary) {
        tracing::info!(
            "Cycle complete: {} fetched, {} fresh, {} processed ({} bullish, {} bearish)",
            summary.fetched,
            summary.fresh,
            summary.processed,
            summary.bullish,
            summary.bearish
        );

        for entry in self.most_affected_tickers(self.config.top_affected) {
            tracing::info!(
                "  {} [{}]: {} mentions (+{} / -{})",
                entry.ticker,
                entry.label,
                entry.total,
                entry.positive,
                entry.negative
            );
        }
    }

    /// Rank tickers by total mentions; stable on ties (first-seen order).
    pub fn most_affected_tickers(&self, top_n: usize) -> Vec<AffectedTicker> {
        self.aggregates.most_affected(top_n)
    }

    /// Cumulative ordered history of processed articles across cycles.
    pub fn history(&self) -> &[ProcessedArticle] {
        &self.history
    }

    pub fn aggregates(&self) -> &AggregateStore {
        &self.aggregates
    }

    pub fn seen_url_count(&self) -> usize {
        self.seen_urls.len()
    }

    pub fn bullish_urls(&self) -> &HashSet<String> {
        &self.bullish_urls
    }

    pub fn bearish_urls(&self) -> &HashSet<String> {
        &self.bearish_urls
    }
}
