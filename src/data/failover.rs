use {
    crate::{
        data::source::{MarketData, MarketDataSource, SourceError},
        domain::SymbolPair,
    },
    std::{error::Error, fmt, sync::Arc},
};

/// Per-symbol failure the batch records instead of aborting. Both variants
/// are treated identically by the coordinator.
#[derive(Debug)]
pub enum FetchFailure {
    /// Primary and secondary both failed for this symbol this cycle.
    AllSourcesFailed {
        primary: SourceError,
        secondary: SourceError,
    },
    /// Candle window too short for a meaningful swing range.
    InsufficientData { got: usize, min: usize },
}

impl fmt::Display for FetchFailure {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            FetchFailure::AllSourcesFailed { primary, secondary } => {
                write!(
                    f,
                    "all sources failed (primary: {}; secondary: {})",
                    primary, secondary
                )
            }
            FetchFailure::InsufficientData { got, min } => {
                write!(f, "insufficient data: {} candles (minimum: {})", got, min)
            }
        }
    }
}

impl Error for FetchFailure {}

/// Tries the primary source once; on any source-level failure tries the
/// secondary once (with its own symbol naming). No retries within a source,
/// no synthetic fallback data, ever.
pub struct FailoverProvider {
    primary: Arc<dyn MarketDataSource>,
    secondary: Arc<dyn MarketDataSource>,
}

impl FailoverProvider {
    pub fn new(primary: Arc<dyn MarketDataSource>, secondary: Arc<dyn MarketDataSource>) -> Self {
        Self { primary, secondary }
    }

    pub async fn market_data(&self, symbol: &SymbolPair) -> Result<MarketData, FetchFailure> {
        let primary_err = match self.primary.fetch(symbol).await {
            Ok(data) => return Ok(data),
            Err(e) => e,
        };

        log::warn!(
            "{}: primary source '{}' failed ({}), trying '{}'",
            symbol,
            self.primary.name(),
            primary_err,
            self.secondary.name()
        );

        match self.secondary.fetch(symbol).await {
            Ok(data) => Ok(data),
            Err(secondary_err) => Err(FetchFailure::AllSourcesFailed {
                primary: primary_err,
                secondary: secondary_err,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Candle, PriceWindow, Ticker};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct StubSource {
        name: &'static str,
        fail: bool,
        calls: AtomicUsize,
    }

    impl StubSource {
        fn new(name: &'static str, fail: bool) -> Arc<Self> {
            Arc::new(Self {
                name,
                fail,
                calls: AtomicUsize::new(0),
            })
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl MarketDataSource for StubSource {
        fn name(&self) -> &'static str {
            self.name
        }

        async fn fetch(&self, _symbol: &SymbolPair) -> Result<MarketData, SourceError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(SourceError::Http { status: 503 });
            }
            let candles = (0..12)
                .map(|i| Candle::new(i * 1000, 110.0 + i as f64, 90.0, 100.0))
                .collect();
            Ok(MarketData {
                ticker: Ticker {
                    last_price: 100.0,
                    price_change_pct: 2.0,
                },
                window: PriceWindow::from_unordered(candles),
            })
        }
    }

    #[tokio::test]
    async fn healthy_primary_never_touches_secondary() {
        let primary = StubSource::new("p", false);
        let secondary = StubSource::new("s", false);
        let provider = FailoverProvider::new(primary.clone(), secondary.clone());

        let data = provider
            .market_data(&SymbolPair::new("BTCUSDT"))
            .await
            .unwrap();
        assert_eq!(data.ticker.last_price, 100.0);
        assert_eq!(primary.calls(), 1);
        assert_eq!(secondary.calls(), 0);
    }

    #[tokio::test]
    async fn failing_primary_falls_over_once() {
        let primary = StubSource::new("p", true);
        let secondary = StubSource::new("s", false);
        let provider = FailoverProvider::new(primary.clone(), secondary.clone());

        let data = provider
            .market_data(&SymbolPair::new("BTCUSDT"))
            .await
            .unwrap();
        assert_eq!(data.window.len(), 12);
        // One-shot failover: each source called exactly once.
        assert_eq!(primary.calls(), 1);
        assert_eq!(secondary.calls(), 1);
    }

    #[tokio::test]
    async fn both_failing_reports_all_sources_failed() {
        let primary = StubSource::new("p", true);
        let secondary = StubSource::new("s", true);
        let provider = FailoverProvider::new(primary, secondary);

        let err = provider
            .market_data(&SymbolPair::new("BTCUSDT"))
            .await
            .unwrap_err();
        assert!(matches!(err, FetchFailure::AllSourcesFailed { .. }));
    }
}
