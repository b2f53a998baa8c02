//! Query routing for the analysis team
//!
//! Classifies a user query into the specialist domain that should handle
//! it, and extracts the securities the query mentions. Both Chinese and
//! English phrasing are recognized.

use regex::Regex;
use std::sync::OnceLock;

/// Domain a query belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryIntent {
    /// Individual stock analysis
    Stock,
    /// Fund analysis
    Fund,
    /// Risk assessment and position management
    Risk,
    /// Macro and market-wide analysis
    Market,
    /// No clear domain
    General,
}

impl QueryIntent {
    /// Routing key of the specialist that handles this intent
    ///
    /// General queries go to the market analyst: broad market context is
    /// the safest default for an unclassified finance question.
    pub fn agent_key(self) -> &'static str {
        match self {
            QueryIntent::Stock => "stock",
            QueryIntent::Fund => "fund",
            QueryIntent::Risk => "risk",
            QueryIntent::Market | QueryIntent::General => "market",
        }
    }
}

/// Keyword-based query router
#[derive(Debug, Default, Clone, Copy)]
pub struct QueryRouter;

const FUND_KEYWORDS: &[&str] = &[
    "基金", "净值", "申购", "赎回", "基金经理", "fund", "etf",
];

const RISK_KEYWORDS: &[&str] = &[
    "风险", "回撤", "止损", "仓位", "资产配置", "对冲", "risk", "drawdown", "hedge",
    "stop loss", "position size",
];

const MARKET_KEYWORDS: &[&str] = &[
    "宏观", "大盘", "行业", "板块", "政策", "利率", "通胀", "经济", "市场情绪",
    "macro", "sector", "industry", "economy", "inflation", "market outlook",
];

const STOCK_KEYWORDS: &[&str] = &[
    "股票", "股价", "个股", "k线", "均线", "市盈率", "估值", "财报", "stock", "share price",
    "ticker", "valuation", "earnings",
];

impl QueryRouter {
    /// Create a new router
    pub fn new() -> Self {
        Self
    }

    /// Classify a query into its domain
    ///
    /// Funds and risk are checked before stocks: "这只基金的风险" should go
    /// to the risk analyst only when risk language dominates, so the more
    /// specific domains win over the generic stock vocabulary.
    pub fn classify(&self, query: &str) -> QueryIntent {
        let lowered = query.to_lowercase();
        let contains_any = |keywords: &[&str]| keywords.iter().any(|k| lowered.contains(k));

        if contains_any(FUND_KEYWORDS) {
            return QueryIntent::Fund;
        }
        if contains_any(RISK_KEYWORDS) {
            return QueryIntent::Risk;
        }
        if contains_any(MARKET_KEYWORDS) {
            return QueryIntent::Market;
        }
        if contains_any(STOCK_KEYWORDS) || !self.extract_symbols(query).is_empty() {
            return QueryIntent::Stock;
        }

        QueryIntent::General
    }

    /// Extract security symbols mentioned in a query
    ///
    /// Recognizes A-share codes (`600519`, `000858.SZ`) and US tickers
    /// (`AAPL`), filtering out indicator acronyms that look like tickers.
    pub fn extract_symbols(&self, query: &str) -> Vec<String> {
        static A_SHARE: OnceLock<Regex> = OnceLock::new();
        static US_TICKER: OnceLock<Regex> = OnceLock::new();

        let a_share = A_SHARE
            .get_or_init(|| Regex::new(r"\b\d{6}(?:\.(?:SH|SZ|BJ))?\b").expect("valid regex"));
        let us_ticker =
            US_TICKER.get_or_init(|| Regex::new(r"\b[A-Z]{1,5}\b").expect("valid regex"));

        // Indicator and finance acronyms that match the ticker pattern
        const NOT_TICKERS: &[&str] = &[
            "RSI", "MACD", "KDJ", "BOLL", "EPS", "ROE", "ROA", "PE", "PB", "PEG", "ETF", "GDP",
            "CPI", "PPI", "IPO", "VAR", "A", "I", "US", "CNY", "USD",
            // A-share exchange suffixes, already captured with their code
            "SH", "SZ", "BJ",
        ];

        let mut symbols: Vec<String> = Vec::new();

        for m in a_share.find_iter(query) {
            symbols.push(m.as_str().to_string());
        }

        for m in us_ticker.find_iter(query) {
            let candidate = m.as_str();
            if !NOT_TICKERS.contains(&candidate) && !symbols.iter().any(|s| s == candidate) {
                symbols.push(candidate.to_string());
            }
        }

        symbols
    }
}
