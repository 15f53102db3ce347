use std::time::Duration;

/// Candle window and strength-classification constants.
pub struct AnalysisConfig {
    /// How many candles we request per symbol per cycle.
    pub window_limit: u32,
    /// Below this many candles the swing range is meaningless; abort the symbol.
    pub min_candles: usize,
    pub thresholds: StrengthThresholds,
}

/// Normalised distance cut-offs between current price and the nearest key level.
pub struct StrengthThresholds {
    pub very_strong: f64,
    pub strong: f64,
    pub medium: f64,
}

pub const ANALYSIS: AnalysisConfig = AnalysisConfig {
    window_limit: 50,
    min_candles: 10,
    thresholds: StrengthThresholds {
        very_strong: 0.01,
        strong: 0.025,
        medium: 0.05,
    },
};

/// Batch refresh cadence.
pub struct RefreshConfig {
    pub interval: Duration,
    /// Fixed delay between per-symbol dispatches (exchange rate-limit courtesy).
    pub dispatch_delay: Duration,
}

pub const REFRESH: RefreshConfig = RefreshConfig {
    interval: Duration::from_secs(15 * 60),
    dispatch_delay: Duration::from_millis(500),
};
