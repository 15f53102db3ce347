use {
    crate::domain::{PriceWindow, SymbolPair, Ticker},
    async_trait::async_trait,
    std::{error::Error, fmt},
};

/// Ticker + candle window for one symbol, already normalised to the common
/// shapes. Raw wire formats never leave the source that fetched them.
#[derive(Debug, Clone)]
pub struct MarketData {
    pub ticker: Ticker,
    pub window: PriceWindow,
}

/// The "source unavailable" error class: one exchange failed for one call.
/// Recoverable by failover; everything else propagates.
#[derive(Debug)]
pub enum SourceError {
    /// Transport-level failure (DNS, TLS, timeout, connection reset).
    Network(String),
    /// Non-success HTTP status.
    Http { status: u16 },
    /// Body arrived but could not be turned into ticker/candles.
    Malformed(String),
}

impl fmt::Display for SourceError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            SourceError::Network(msg) => write!(f, "network error: {}", msg),
            SourceError::Http { status } => write!(f, "http status {}", status),
            SourceError::Malformed(msg) => write!(f, "malformed payload: {}", msg),
        }
    }
}

impl Error for SourceError {}

impl From<reqwest::Error> for SourceError {
    fn from(e: reqwest::Error) -> Self {
        match e.status() {
            Some(status) => SourceError::Http {
                status: status.as_u16(),
            },
            None => SourceError::Network(e.to_string()),
        }
    }
}

/// Abstract interface over one exchange's ticker + candle-history fetch.
/// Implementations issue exactly one ticker request and one candle request
/// per call, concurrently (the two have no ordering dependency).
#[async_trait]
pub trait MarketDataSource: Send + Sync {
    fn name(&self) -> &'static str;

    async fn fetch(&self, symbol: &SymbolPair) -> Result<MarketData, SourceError>;
}

/// Shared guard for string-to-price parsing in source normalisation.
pub(crate) fn parse_price(field: &str, raw: &str) -> Result<f64, SourceError> {
    raw.parse::<f64>()
        .map_err(|_| SourceError::Malformed(format!("{}: not a number: {:?}", field, raw)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_price_rejects_garbage() {
        assert!(parse_price("lastPrice", "42.5").is_ok());
        assert!(parse_price("lastPrice", "n/a").is_err());
    }
}
