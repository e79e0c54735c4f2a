use async_trait::async_trait;

use crate::{Article, NewsQuery, PipelineError, SentimentScore};

/// Trait for news sources
#[async_trait]
pub trait NewsSource: Send + Sync {
    async fn fetch(&self, query: &NewsQuery) -> Result<Vec<Article>, PipelineError>;
}

/// Trait for sentiment classifiers
#[async_trait]
pub trait SentimentClassifier: Send + Sync {
    async fn classify(&self, text: &str) -> Result<SentimentScore, PipelineError>;

    /// Batch classification with index-aligned, order-preserving results.
    /// Per-item semantics are identical to single calls.
    async fn classify_batch(&self, texts: &[String]) -> Result<Vec<SentimentScore>, PipelineError> {
        let mut results = Vec::with_capacity(texts.len());
        for text in texts {
            results.push(self.classify(text).await?);
        }
        Ok(results)
    }
}
