use std::time::Duration;

use anyhow::Result;
use finbert_client::{FinBertClient, KeywordClassifier};
use news_orchestrator::{JsonFileSink, NewsOrchestrator, OrchestratorConfig};
use newsapi_client::NewsApiClient;
use pipeline_core::{NewsQuery, SentimentClassifier, SentimentThresholds};
use tokio::time;

mod config;

use config::AgentConfig;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let json_logging = std::env::var("RUST_LOG_FORMAT")
        .map(|v| v.eq_ignore_ascii_case("json"))
        .unwrap_or(false);
    if json_logging {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
            )
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
            )
            .init();
    }

    tracing::info!("Starting MarketPulse news agent");

    // Configuration errors are fatal: no cycle runs without a credential.
    let config = AgentConfig::from_env()?;
    tracing::info!("Configuration loaded and validated");
    tracing::info!("  Page size: {}", config.page_size);
    tracing::info!(
        "  Thresholds: positive {:.2} / negative {:.2}",
        config.positive_threshold,
        config.negative_threshold
    );
    tracing::info!("  Seen-url cap: {}", config.seen_urls_cap);
    tracing::info!("  Cycle interval: {}s", config.cycle_interval_seconds);
    tracing::info!("  Output: {}", config.output_path);

    let news_client = NewsApiClient::with_base_url(
        config.newsapi_key.clone(),
        config.newsapi_base_url.clone(),
    )?;

    let classifier: Box<dyn SentimentClassifier> = match &config.sentiment_service_url {
        Some(url) => {
            tracing::info!("  Classifier: FinBERT service at {}", url);
            Box::new(FinBertClient::new(url.clone(), Duration::from_secs(10)))
        }
        None => {
            tracing::info!("  Classifier: keyword fallback (no SENTIMENT_SERVICE_URL set)");
            Box::new(KeywordClassifier::new())
        }
    };

    let orchestrator_config = OrchestratorConfig {
        query: NewsQuery {
            page_size: config.page_size,
            keywords: config.keywords.clone(),
            ..NewsQuery::default()
        },
        thresholds: SentimentThresholds {
            positive: config.positive_threshold,
            negative: config.negative_threshold,
        },
        seen_urls_cap: config.seen_urls_cap,
        top_affected: config.top_affected,
    };

    let mut orchestrator = NewsOrchestrator::new(
        Box::new(news_client),
        classifier,
        orchestrator_config,
    )
    .with_sink(Box::new(JsonFileSink::new(&config.output_path)));

    let mut interval = time::interval(Duration::from_secs(config.cycle_interval_seconds));

    loop {
        tokio::select! {
            _ = interval.tick() => {
                match orchestrator.run_cycle().await {
                    Ok(summary) => {
                        tracing::info!(
                            "Cycle finished: {} processed, {} bullish, {} bearish",
                            summary.processed,
                            summary.bullish,
                            summary.bearish
                        );
                    }
                    // A failed fetch aborts only this cycle; the next tick
                    // retries with dedup state intact.
                    Err(e) => tracing::error!("Cycle failed: {}", e),
                }
            }
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("Shutdown signal received, stopping");
                break;
            }
        }
    }

    Ok(())
}
