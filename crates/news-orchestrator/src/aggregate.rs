use pipeline_core::{Impact, TickerImpact};
use serde::Serialize;
use std::collections::HashMap;

#[derive(Debug, Clone, Copy)]
struct TickerCounts {
    positive: u64,
    negative: u64,
    /// Insertion sequence, used as the tie-breaker so ranking is stable
    /// in first-seen order.
    first_seen: u64,
}

/// One ranked entry from the aggregate store
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AffectedTicker {
    pub ticker: String,
    pub positive: u64,
    pub negative: u64,
    pub total: u64,
    pub net: i64,
    pub label: &'static str,
}

/// Running per-ticker mention counters. Never reset within a cycle;
/// lives as long as the orchestrator instance.
#[derive(Debug, Default)]
pub struct AggregateStore {
    counts: HashMap<String, TickerCounts>,
    next_seq: u64,
}

impl AggregateStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one ticker impact. Neutral and unknown impacts do not move
    /// any counter and do not register the ticker.
    pub fn record(&mut self, impact: &TickerImpact) {
        match impact.impact {
            Impact::Positive | Impact::Negative => {}
            Impact::Neutral | Impact::Unknown => return,
        }

        let seq = self.next_seq;
        let entry = self
            .counts
            .entry(impact.ticker.clone())
            .or_insert_with(|| {
                TickerCounts {
                    positive: 0,
                    negative: 0,
                    first_seen: seq,
                }
            });
        if entry.first_seen == seq {
            self.next_seq += 1;
        }

        match impact.impact {
            Impact::Positive => entry.positive += 1,
            Impact::Negative => entry.negative += 1,
            _ => unreachable!(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    pub fn counts_for(&self, ticker: &str) -> Option<(u64, u64)> {
        self.counts.get(ticker).map(|c| (c.positive, c.negative))
    }

    /// Rank tickers by total mentions descending. Equal totals keep
    /// first-seen order.
    pub fn most_affected(&self, top_n: usize) -> Vec<AffectedTicker> {
        let mut ranked: Vec<(&String, &TickerCounts)> = self.counts.iter().collect();
        ranked.sort_by(|a, b| {
            let total_a = a.1.positive + a.1.negative;
            let total_b = b.1.positive + b.1.negative;
            total_b
                .cmp(&total_a)
                .then(a.1.first_seen.cmp(&b.1.first_seen))
        });

        ranked
            .into_iter()
            .take(top_n)
            .map(|(ticker, counts)| {
                let total = counts.positive + counts.negative;
                let net = counts.positive as i64 - counts.negative as i64;
                let label = if net > 0 {
                    "bullish"
                } else if net < 0 {
                    "bearish"
                } else {
                    "neutral"
                };
                AffectedTicker {
                    ticker: ticker.clone(),
                    positive: counts.positive,
                    negative: counts.negative,
                    total,
                    net,
                    label,
                }
            })
            .collect()
    }
}
