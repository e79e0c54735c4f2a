use pipeline_core::{PipelineError, ProcessedArticle};
use std::fs;
use std::path::PathBuf;

/// Destination for the cumulative processed-article history, rewritten
/// once per cycle.
pub trait ArticleSink: Send + Sync {
    fn persist(&self, records: &[ProcessedArticle]) -> Result<(), PipelineError>;
}

/// Writes the history as a JSON array to a file, overwriting any
/// previous contents.
pub struct JsonFileSink {
    path: PathBuf,
}

impl JsonFileSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl ArticleSink for JsonFileSink {
    fn persist(&self, records: &[ProcessedArticle]) -> Result<(), PipelineError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| PipelineError::Sink(e.to_string()))?;
            }
        }

        let json = serde_json::to_string_pretty(records)
            .map_err(|e| PipelineError::Sink(e.to_string()))?;
        fs::write(&self.path, json).map_err(|e| PipelineError::Sink(e.to_string()))?;

        tracing::debug!("Persisted {} records to {}", records.len(), self.path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pipeline_core::{SentimentLabel, Signal};

    fn record(title: &str) -> ProcessedArticle {
        ProcessedArticle {
            title: title.to_string(),
            sentiment: SentimentLabel::Positive,
            confidence: 0.9,
            signal: Signal::Bullish,
            tickers: vec!["AAPL".to_string()],
            primary_ticker: Some("AAPL".to_string()),
            ticker_impacts: vec![],
        }
    }

    #[test]
    fn persist_overwrites_with_full_history() {
        let path = std::env::temp_dir().join(format!(
            "market-pulse-sink-test-{}.json",
            std::process::id()
        ));
        let sink = JsonFileSink::new(&path);

        sink.persist(&[record("first")]).unwrap();
        sink.persist(&[record("first"), record("second")]).unwrap();

        let contents = fs::read_to_string(&path).unwrap();
        let parsed: Vec<ProcessedArticle> = serde_json::from_str(&contents).unwrap();
        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed[1].title, "second");

        fs::remove_file(&path).ok();
    }
}
