use {
    crate::{
        analysis::analyze_pair,
        config::REFRESH,
        data::{FailoverProvider, FetchFailure},
        domain::SymbolPair,
        models::AnalysisResult,
        utils::now_timestamp_ms,
    },
    std::{collections::BTreeMap, error::Error, fmt},
    tokio::sync::Mutex,
};

/// One symbol's outcome for one cycle.
pub type SymbolOutcome = Result<AnalysisResult, FetchFailure>;

/// The refresh-completed record handed to the presentation layer.
#[derive(Debug)]
pub struct RefreshCycle {
    pub outcomes: BTreeMap<SymbolPair, SymbolOutcome>,
    pub completed_at_ms: i64,
    /// True only for explicitly requested offline cycles; synthetic data is
    /// never mixed into a genuine cycle.
    pub demo: bool,
}

impl RefreshCycle {
    pub fn succeeded(&self) -> usize {
        self.outcomes.values().filter(|o| o.is_ok()).count()
    }

    pub fn failed(&self) -> usize {
        self.outcomes.len() - self.succeeded()
    }
}

/// Batch-level failures. `Empty` is the only batch-fatal condition: every
/// symbol failed, so there is nothing to show.
#[derive(Debug)]
pub enum BatchError {
    Empty { attempted: usize },
    /// A previous cycle is still in flight; this one was not started.
    InFlight,
    NoSymbols,
}

impl fmt::Display for BatchError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            BatchError::Empty { attempted } => {
                write!(f, "no usable result from any of {} symbols", attempted)
            }
            BatchError::InFlight => write!(f, "a refresh cycle is already in flight"),
            BatchError::NoSymbols => write!(f, "no symbols configured"),
        }
    }
}

impl Error for BatchError {}

/// Iterates the symbol set with a fixed inter-dispatch delay, runs the
/// fetch→analyze chain per symbol, and aggregates outcomes. One symbol's
/// failure never aborts the batch.
pub struct RefreshCoordinator {
    provider: FailoverProvider,
    /// Re-entrancy guard: a new cycle must not start while one is running.
    in_flight: Mutex<()>,
}

impl RefreshCoordinator {
    pub fn new(provider: FailoverProvider) -> Self {
        Self {
            provider,
            in_flight: Mutex::new(()),
        }
    }

    pub async fn refresh_all(&self, symbols: &[SymbolPair]) -> Result<RefreshCycle, BatchError> {
        let _guard = self.in_flight.try_lock().map_err(|_| BatchError::InFlight)?;

        if symbols.is_empty() {
            return Err(BatchError::NoSymbols);
        }

        let mut outcomes = BTreeMap::new();
        for (i, symbol) in symbols.iter().enumerate() {
            if i > 0 {
                tokio::time::sleep(REFRESH.dispatch_delay).await;
            }

            let outcome = match self.provider.market_data(symbol).await {
                Ok(data) => analyze_pair(symbol, &data, now_timestamp_ms()),
                Err(failure) => Err(failure),
            };

            match &outcome {
                Ok(result) => log::debug!(
                    "{}: price {} strength {} ({})",
                    symbol,
                    result.current_price,
                    result.strength,
                    result.strategy.kind
                ),
                Err(failure) => log::warn!("{}: {}", symbol, failure),
            }

            outcomes.insert(symbol.clone(), outcome);
        }

        let cycle = RefreshCycle {
            completed_at_ms: now_timestamp_ms(),
            demo: false,
            outcomes,
        };

        if cycle.succeeded() == 0 {
            return Err(BatchError::Empty {
                attempted: symbols.len(),
            });
        }

        log::info!(
            "refresh cycle complete: {} ok, {} failed",
            cycle.succeeded(),
            cycle.failed()
        );
        Ok(cycle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{MarketData, MarketDataSource, SourceError};
    use crate::domain::{Candle, PriceWindow, Ticker};
    use async_trait::async_trait;
    use std::sync::Arc;

    /// Succeeds for every symbol except the ones listed.
    struct SelectiveSource {
        fail_for: Vec<&'static str>,
    }

    #[async_trait]
    impl MarketDataSource for SelectiveSource {
        fn name(&self) -> &'static str {
            "selective"
        }

        async fn fetch(&self, symbol: &SymbolPair) -> Result<MarketData, SourceError> {
            if self.fail_for.contains(&symbol.name()) {
                return Err(SourceError::Network("stub down".into()));
            }
            let candles = (0..20)
                .map(|i| Candle::new(i * 1000, 110.0, 90.0, 100.0))
                .collect();
            Ok(MarketData {
                ticker: Ticker {
                    last_price: 100.0,
                    price_change_pct: 1.0,
                },
                window: PriceWindow::from_unordered(candles),
            })
        }
    }

    fn coordinator(fail_for: Vec<&'static str>) -> RefreshCoordinator {
        let primary = Arc::new(SelectiveSource {
            fail_for: fail_for.clone(),
        });
        let secondary = Arc::new(SelectiveSource { fail_for });
        RefreshCoordinator::new(FailoverProvider::new(primary, secondary))
    }

    fn symbols(names: &[&str]) -> Vec<SymbolPair> {
        names.iter().copied().map(SymbolPair::new).collect()
    }

    #[tokio::test]
    async fn partial_failure_is_not_batch_fatal() {
        let coordinator = coordinator(vec!["ETHUSDT"]);
        let cycle = coordinator
            .refresh_all(&symbols(&["BTCUSDT", "ETHUSDT", "SOLUSDT"]))
            .await
            .unwrap();

        assert_eq!(cycle.succeeded(), 2);
        assert_eq!(cycle.failed(), 1);
        let failed = cycle
            .outcomes
            .get(&SymbolPair::new("ETHUSDT"))
            .unwrap()
            .as_ref()
            .unwrap_err();
        assert!(matches!(failed, FetchFailure::AllSourcesFailed { .. }));
    }

    #[tokio::test]
    async fn all_failing_is_batch_empty() {
        let coordinator = coordinator(vec!["BTCUSDT", "ETHUSDT"]);
        let err = coordinator
            .refresh_all(&symbols(&["BTCUSDT", "ETHUSDT"]))
            .await
            .unwrap_err();
        assert!(matches!(err, BatchError::Empty { attempted: 2 }));
    }

    #[tokio::test]
    async fn empty_symbol_list_is_rejected() {
        let coordinator = coordinator(vec![]);
        assert!(matches!(
            coordinator.refresh_all(&[]).await,
            Err(BatchError::NoSymbols)
        ));
    }

    #[tokio::test]
    async fn concurrent_cycles_are_refused() {
        let coordinator = Arc::new(coordinator(vec![]));
        // Hold the guard as a stand-in for a cycle in flight.
        let guard = coordinator.in_flight.try_lock().unwrap();
        let err = coordinator
            .refresh_all(&symbols(&["BTCUSDT"]))
            .await
            .unwrap_err();
        assert!(matches!(err, BatchError::InFlight));
        drop(guard);
    }
}
