use crate::{
    analysis::{fibonacci::compute_levels, strategy::generate_strategy, strength::classify_strength},
    config::ANALYSIS,
    data::{FetchFailure, MarketData},
    domain::SymbolPair,
    models::AnalysisResult,
};

/// Runs the full per-pair chain on already-normalised market data:
/// window validation, swing range, levels, strength, strategy.
/// Isolated from all I/O; the coordinator supplies the timestamp.
pub fn analyze_pair(
    symbol: &SymbolPair,
    data: &MarketData,
    now_ms: i64,
) -> Result<AnalysisResult, FetchFailure> {
    let got = data.window.len();
    if got < ANALYSIS.min_candles {
        return Err(FetchFailure::InsufficientData {
            got,
            min: ANALYSIS.min_candles,
        });
    }

    let swing = data
        .window
        .swing_range()
        .ok_or(FetchFailure::InsufficientData {
            got,
            min: ANALYSIS.min_candles,
        })?;

    let current_price = data.ticker.last_price;
    let is_up_trend = data.ticker.is_up_trend();

    let levels = compute_levels(&swing, current_price, is_up_trend);
    let strength = classify_strength(current_price, &levels);
    let strategy = generate_strategy(current_price, &levels, is_up_trend);

    Ok(AnalysisResult {
        symbol: symbol.clone(),
        current_price,
        price_change_pct: data.ticker.price_change_pct,
        is_up_trend,
        swing,
        levels,
        strength,
        strategy,
        updated_at_ms: now_ms,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Candle, PriceWindow, Ticker};

    fn market_data(candle_count: usize) -> MarketData {
        let candles = (0..candle_count)
            .map(|i| Candle::new(i as i64 * 1000, 110.0, 90.0, 100.0))
            .collect();
        MarketData {
            ticker: Ticker {
                last_price: 100.0,
                price_change_pct: 1.5,
            },
            window: PriceWindow::from_unordered(candles),
        }
    }

    #[test]
    fn short_window_is_insufficient() {
        let err = analyze_pair(&SymbolPair::new("BTCUSDT"), &market_data(9), 0).unwrap_err();
        assert!(matches!(
            err,
            FetchFailure::InsufficientData { got: 9, min: 10 }
        ));
    }

    #[test]
    fn full_chain_produces_a_result() {
        let result = analyze_pair(&SymbolPair::new("BTCUSDT"), &market_data(50), 1234).unwrap();
        assert_eq!(result.symbol.name(), "BTCUSDT");
        assert_eq!(result.swing.high, 110.0);
        assert_eq!(result.swing.low, 90.0);
        assert!(result.is_up_trend);
        assert_eq!(result.updated_at_ms, 1234);
        // Price 100 sits exactly on the 50% retracement of [90, 110].
        assert_eq!(result.strength, crate::models::Strength::VeryStrong);
    }
}
