use async_trait::async_trait;
use chrono::{DateTime, Utc};
use pipeline_core::{Article, NewsQuery, NewsSource, PipelineError};
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

const DEFAULT_BASE_URL: &str = "https://newsapi.org/v2";

/// NewsAPI.org client. One instance per process; the orchestrator polls
/// it once per cycle.
#[derive(Clone)]
pub struct NewsApiClient {
    api_key: String,
    base_url: String,
    client: Client,
}

impl NewsApiClient {
    pub fn new(api_key: String) -> Result<Self, PipelineError> {
        Self::with_base_url(api_key, DEFAULT_BASE_URL.to_string())
    }

    pub fn with_base_url(api_key: String, base_url: String) -> Result<Self, PipelineError> {
        if api_key.trim().is_empty() {
            return Err(PipelineError::Config(
                "NEWSAPI_KEY is missing or empty".to_string(),
            ));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .unwrap_or_else(|_| Client::new());

        Ok(Self {
            api_key,
            base_url,
            client,
        })
    }

    /// Fetch latest top headlines for the given query.
    pub async fn fetch_top_headlines(&self, query: &NewsQuery) -> Result<Vec<Article>, PipelineError> {
        let url = format!("{}/top-headlines", self.base_url);

        let mut params = vec![
            ("country", query.country.clone()),
            ("category", query.category.clone()),
            ("language", query.language.clone()),
            ("pageSize", query.page_size.to_string()),
            ("apiKey", self.api_key.clone()),
        ];
        if let Some(keywords) = &query.keywords {
            params.push(("q", keywords.clone()));
        }

        self.execute(&url, &params).await
    }

    /// Fetch from the /everything endpoint for keyword backfill over a
    /// date range.
    pub async fn fetch_everything(
        &self,
        keywords: &str,
        from: Option<DateTime<Utc>>,
        to: Option<DateTime<Utc>>,
        page_size: u32,
    ) -> Result<Vec<Article>, PipelineError> {
        let url = format!("{}/everything", self.base_url);

        let mut params = vec![
            ("q", keywords.to_string()),
            ("pageSize", page_size.to_string()),
            ("sortBy", "publishedAt".to_string()),
            ("apiKey", self.api_key.clone()),
        ];
        if let Some(from) = from {
            params.push(("from", from.format("%Y-%m-%d").to_string()));
        }
        if let Some(to) = to {
            params.push(("to", to.format("%Y-%m-%d").to_string()));
        }

        self.execute(&url, &params).await
    }

    async fn execute(&self, url: &str, params: &[(&str, String)]) -> Result<Vec<Article>, PipelineError> {
        let response = self
            .client
            .get(url)
            .query(params)
            .send()
            .await
            .map_err(|e| PipelineError::Fetch(e.to_string()))?;

        let status = response.status();
        if status.as_u16() == 401 || status.as_u16() == 403 {
            let body = response.text().await.unwrap_or_default();
            return Err(PipelineError::Auth(format!("HTTP {}: {}", status, body)));
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(PipelineError::Fetch(format!("HTTP {}: {}", status, body)));
        }

        let payload: NewsApiResponse = response
            .json()
            .await
            .map_err(|e| PipelineError::Fetch(e.to_string()))?;

        if payload.status != "ok" {
            return Err(PipelineError::Fetch(format!(
                "NewsAPI error {}: {}",
                payload.code.unwrap_or_default(),
                payload.message.unwrap_or_default()
            )));
        }

        tracing::debug!("NewsAPI returned {} articles", payload.articles.len());

        Ok(payload.articles.into_iter().map(Article::from).collect())
    }
}

#[async_trait]
impl NewsSource for NewsApiClient {
    async fn fetch(&self, query: &NewsQuery) -> Result<Vec<Article>, PipelineError> {
        self.fetch_top_headlines(query).await
    }
}

#[derive(Debug, Deserialize)]
struct NewsApiResponse {
    status: String,
    code: Option<String>,
    message: Option<String>,
    #[serde(default)]
    articles: Vec<WireArticle>,
}

#[derive(Debug, Deserialize)]
struct WireSource {
    name: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireArticle {
    source: Option<WireSource>,
    author: Option<String>,
    title: Option<String>,
    description: Option<String>,
    url: Option<String>,
    published_at: Option<DateTime<Utc>>,
}

impl From<WireArticle> for Article {
    fn from(wire: WireArticle) -> Self {
        Article {
            source: wire.source.and_then(|s| s.name),
            author: wire.author,
            title: wire.title.unwrap_or_default(),
            description: wire.description,
            url: wire.url,
            published_at: wire.published_at,
        }
    }
}
