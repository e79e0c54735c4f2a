use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::env;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentConfig {
    // News source
    pub newsapi_key: String,
    pub newsapi_base_url: String,
    pub page_size: u32,
    pub keywords: Option<String>,

    // Sentiment
    pub sentiment_service_url: Option<String>, // absent -> keyword fallback
    pub positive_threshold: f64,
    pub negative_threshold: f64,

    // Pipeline
    pub seen_urls_cap: usize,
    pub top_affected: usize,
    pub output_path: String,
    pub cycle_interval_seconds: u64,
}

impl AgentConfig {
    pub fn from_env() -> Result<Self> {
        let config = Self {
            newsapi_key: env::var("NEWSAPI_KEY")
                .context("NEWSAPI_KEY not found in environment variables")?,
            newsapi_base_url: env::var("NEWSAPI_BASE_URL")
                .unwrap_or_else(|_| "https://newsapi.org/v2".to_string()),
            page_size: env::var("NEWS_PAGE_SIZE")
                .unwrap_or_else(|_| "100".to_string())
                .parse()?,
            keywords: env::var("NEWS_KEYWORDS").ok().filter(|k| !k.is_empty()),

            sentiment_service_url: env::var("SENTIMENT_SERVICE_URL")
                .ok()
                .filter(|url| !url.is_empty()),
            positive_threshold: env::var("SENTIMENT_POSITIVE_THRESHOLD")
                .unwrap_or_else(|_| "0.5".to_string())
                .parse()?,
            negative_threshold: env::var("SENTIMENT_NEGATIVE_THRESHOLD")
                .unwrap_or_else(|_| "0.5".to_string())
                .parse()?,

            seen_urls_cap: env::var("SEEN_URLS_CAP")
                .unwrap_or_else(|_| "500".to_string())
                .parse()?,
            top_affected: env::var("TOP_AFFECTED_COUNT")
                .unwrap_or_else(|_| "5".to_string())
                .parse()?,
            output_path: env::var("OUTPUT_PATH")
                .unwrap_or_else(|_| "data/processed_articles.json".to_string()),
            cycle_interval_seconds: env::var("CYCLE_INTERVAL_SECONDS")
                .unwrap_or_else(|_| "300".to_string())
                .parse()?,
        };

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.newsapi_key.trim().is_empty() {
            bail!("NEWSAPI_KEY must not be empty");
        }
        for (name, value) in [
            ("SENTIMENT_POSITIVE_THRESHOLD", self.positive_threshold),
            ("SENTIMENT_NEGATIVE_THRESHOLD", self.negative_threshold),
        ] {
            if !(0.0..=1.0).contains(&value) {
                bail!("{} must be within [0, 1], got {}", name, value);
            }
        }
        if self.page_size == 0 {
            bail!("NEWS_PAGE_SIZE must be positive");
        }
        if self.seen_urls_cap == 0 {
            bail!("SEEN_URLS_CAP must be positive");
        }
        if self.cycle_interval_seconds == 0 {
            bail!("CYCLE_INTERVAL_SECONDS must be positive");
        }
        Ok(())
    }
}
