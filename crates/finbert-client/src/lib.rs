use async_trait::async_trait;
use pipeline_core::{PipelineError, SentimentClassifier, SentimentLabel, SentimentScore};
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub mod keyword;
pub use keyword::KeywordClassifier;

#[derive(Debug, Clone, Serialize)]
struct PredictRequest {
    texts: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
struct Prediction {
    label: String,
    score: f64,
}

#[derive(Debug, Clone, Deserialize)]
struct PredictResponse {
    predictions: Vec<Prediction>,
}

/// Client for a FinBERT sentiment inference service
#[derive(Clone)]
pub struct FinBertClient {
    client: reqwest::Client,
    base_url: String,
}

impl FinBertClient {
    pub fn new(base_url: String, timeout: Duration) -> Self {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        Self { client, base_url }
    }

    async fn predict(&self, texts: Vec<String>) -> Result<Vec<SentimentScore>, PipelineError> {
        let expected = texts.len();
        let request = PredictRequest { texts };

        let response = self
            .client
            .post(format!("{}/predict", self.base_url))
            .json(&request)
            .send()
            .await
            .map_err(|e| PipelineError::Classifier(e.to_string()))?;

        if !response.status().is_success() {
            return Err(PipelineError::Classifier(format!(
                "sentiment service returned {}",
                response.status()
            )));
        }

        let result: PredictResponse = response
            .json()
            .await
            .map_err(|e| PipelineError::Classifier(e.to_string()))?;

        if result.predictions.len() != expected {
            return Err(PipelineError::Classifier(format!(
                "expected {} predictions, got {}",
                expected,
                result.predictions.len()
            )));
        }

        Ok(result
            .predictions
            .into_iter()
            .map(|p| SentimentScore {
                label: SentimentLabel::from_model_label(&p.label),
                confidence: p.score.clamp(0.0, 1.0),
            })
            .collect())
    }
}

#[async_trait]
impl SentimentClassifier for FinBertClient {
    async fn classify(&self, text: &str) -> Result<SentimentScore, PipelineError> {
        let mut scores = self.predict(vec![text.to_string()]).await?;
        scores
            .pop()
            .ok_or_else(|| PipelineError::Classifier("empty prediction list".to_string()))
    }

    async fn classify_batch(&self, texts: &[String]) -> Result<Vec<SentimentScore>, PipelineError> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }
        self.predict(texts.to_vec()).await
    }
}
