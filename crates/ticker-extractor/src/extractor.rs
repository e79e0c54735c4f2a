use pipeline_core::{Impact, Relevance, SentimentLabel, TickerImpact, TickerMention};
use regex::Regex;

/// Built-in company name → ticker lexicon, matched case-insensitively as
/// substrings. Covers large caps that dominate business headlines.
const COMPANY_TICKERS: &[(&str, &str)] = &[
    ("apple", "AAPL"),
    ("microsoft", "MSFT"),
    ("google", "GOOGL"),
    ("alphabet", "GOOGL"),
    ("amazon", "AMZN"),
    ("tesla", "TSLA"),
    ("nvidia", "NVDA"),
    ("meta", "META"),
    ("facebook", "META"),
    ("netflix", "NFLX"),
    ("walmart", "WMT"),
    ("jpmorgan", "JPM"),
    ("jp morgan", "JPM"),
    ("goldman sachs", "GS"),
    ("bank of america", "BAC"),
    ("boeing", "BA"),
    ("disney", "DIS"),
    ("coca-cola", "KO"),
    ("coca cola", "KO"),
    ("pepsi", "PEP"),
    ("pepsico", "PEP"),
    ("intel", "INTC"),
    ("amd", "AMD"),
    ("salesforce", "CRM"),
    ("adobe", "ADBE"),
    ("paypal", "PYPL"),
    ("uber", "UBER"),
    ("lyft", "LYFT"),
    ("airbnb", "ABNB"),
    ("zoom", "ZM"),
    ("spotify", "SPOT"),
    ("twitter", "X"),
    ("chevron", "CVX"),
    ("exxon", "XOM"),
    ("exxonmobil", "XOM"),
    ("ford", "F"),
];

/// Maps free text to candidate ticker symbols via an explicit-symbol
/// pattern ($AAPL, (AAPL)) and a company-name lexicon.
pub struct TickerExtractor {
    mappings: Vec<(String, String)>,
    pattern: Regex,
}

impl TickerExtractor {
    pub fn new() -> Self {
        Self::with_mappings(&[])
    }

    /// Build an extractor with extra company → ticker mappings merged over
    /// the built-in lexicon. A duplicate company name overrides the
    /// built-in entry.
    pub fn with_mappings(custom: &[(&str, &str)]) -> Self {
        let mut mappings: Vec<(String, String)> = COMPANY_TICKERS
            .iter()
            .map(|(company, ticker)| (company.to_string(), ticker.to_string()))
            .collect();

        for (company, ticker) in custom {
            let company = company.to_lowercase();
            match mappings.iter_mut().find(|(c, _)| *c == company) {
                Some(entry) => entry.1 = ticker.to_string(),
                None => mappings.push((company, ticker.to_string())),
            }
        }

        Self {
            mappings,
            pattern: Regex::new(r"[\$\(]([A-Z]{1,5})[\)\s\.,]").expect("valid ticker pattern"),
        }
    }

    /// Extract candidate symbols from a text span. Union of pattern and
    /// lexicon matches, deduplicated, first-occurrence order preserved so
    /// primary-ticker selection is deterministic.
    pub fn extract(&self, text: &str) -> Vec<String> {
        let mut tickers: Vec<String> = Vec::new();
        let text_lower = text.to_lowercase();

        for capture in self.pattern.captures_iter(text) {
            let symbol = capture[1].to_string();
            if !tickers.contains(&symbol) {
                tickers.push(symbol);
            }
        }

        for (company, ticker) in &self.mappings {
            if text_lower.contains(company.as_str()) && !tickers.contains(ticker) {
                tickers.push(ticker.clone());
            }
        }

        tickers
    }

    /// Relevance-tagged extraction: title symbols are high, symbols found
    /// only in the description are medium. A symbol in both is reported
    /// once, as high.
    pub fn extract_with_context(&self, title: &str, description: &str) -> Vec<TickerMention> {
        let title_tickers = self.extract(title);
        let desc_tickers = self.extract(description);

        let mut mentions: Vec<TickerMention> = title_tickers
            .iter()
            .map(|ticker| TickerMention {
                ticker: ticker.clone(),
                relevance: Relevance::High,
            })
            .collect();

        for ticker in desc_tickers {
            if !title_tickers.contains(&ticker) {
                mentions.push(TickerMention {
                    ticker,
                    relevance: Relevance::Medium,
                });
            }
        }

        mentions
    }

    /// Extraction composed with impact derivation: the article-level
    /// sentiment label is broadcast to every extracted ticker. Empty when
    /// no tickers are found, never an error.
    pub fn tickers_with_impact(
        &self,
        title: &str,
        description: &str,
        label: Option<SentimentLabel>,
    ) -> Vec<TickerImpact> {
        let impact = label.map(Impact::from_label).unwrap_or(Impact::Unknown);

        self.extract_with_context(title, description)
            .into_iter()
            .map(|mention| TickerImpact {
                ticker: mention.ticker,
                impact,
                relevance: mention.relevance,
            })
            .collect()
    }
}

impl Default for TickerExtractor {
    fn default() -> Self {
        Self::new()
    }
}
