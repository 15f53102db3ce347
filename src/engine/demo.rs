// Explicit offline mode: synthetic candles run through the real analysis
// chain. Only reachable after a BatchEmpty and only when the user asked for
// it; the resulting cycle is labeled demo end to end.

use {
    crate::{
        analysis::analyze_pair,
        config::ANALYSIS,
        data::MarketData,
        domain::{Candle, PriceWindow, SymbolPair, Ticker},
        engine::coordinator::RefreshCycle,
        utils::{MS_IN_D, now_timestamp_ms},
    },
    std::collections::BTreeMap,
};

/// Deterministic per-symbol seed so demo output is stable across runs.
fn seed_for(symbol: &SymbolPair) -> f64 {
    let sum: u32 = symbol.name().bytes().map(u32::from).sum();
    f64::from(sum % 97) + 3.0
}

fn synthetic_market_data(symbol: &SymbolPair, now_ms: i64) -> MarketData {
    let base = seed_for(symbol) * 10.0;
    let count = ANALYSIS.window_limit as i64;

    let candles: Vec<Candle> = (0..count)
        .map(|i| {
            let t = i as f64 / 8.0;
            let mid = base * (1.0 + 0.15 * t.sin());
            let spread = base * 0.02;
            Candle::new(
                now_ms - (count - i) * MS_IN_D,
                mid + spread,
                mid - spread,
                mid,
            )
        })
        .collect();

    let window = PriceWindow::from_unordered(candles);
    let last_close = window.latest().map(|c| c.close).unwrap_or(base);

    MarketData {
        ticker: Ticker {
            last_price: last_close,
            price_change_pct: if seed_for(symbol) as u32 % 2 == 0 {
                1.8
            } else {
                -1.8
            },
        },
        window,
    }
}

/// Builds a fully synthetic cycle through the genuine analysis pipeline.
pub fn demo_cycle(symbols: &[SymbolPair]) -> RefreshCycle {
    let now_ms = now_timestamp_ms();
    let outcomes = symbols
        .iter()
        .map(|symbol| {
            let data = synthetic_market_data(symbol, now_ms);
            (symbol.clone(), analyze_pair(symbol, &data, now_ms))
        })
        .collect::<BTreeMap<_, _>>();

    RefreshCycle {
        outcomes,
        completed_at_ms: now_ms,
        demo: true,
    }
}
